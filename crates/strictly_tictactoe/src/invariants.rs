//! Invariants that must hold for every live game session.
//!
//! Checked with `debug_assert!` after each accepted move. A violation is a
//! programming error, never a user-facing rejection.

use crate::session::GameSession;
use crate::{Player, rules};
use tracing::warn;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// X moves first: `count(X) == count(O)` or `count(X) == count(O) + 1`.
pub struct BalancedMarks;

impl Invariant<GameSession> for BalancedMarks {
    fn holds(session: &GameSession) -> bool {
        let x = session.board().count(Player::X);
        let o = session.board().count(Player::O);
        let valid = x == o || x == o + 1;
        if !valid {
            warn!(x_count = x, o_count = o, "Mark balance violated");
        }
        valid
    }

    fn description() -> &'static str {
        "X count equals O count or exceeds it by one"
    }
}

/// The stored status is exactly what the rules derive from the board.
pub struct StatusMatchesBoard;

impl Invariant<GameSession> for StatusMatchesBoard {
    fn holds(session: &GameSession) -> bool {
        rules::evaluate(session.board()) == session.status()
    }

    fn description() -> &'static str {
        "Status is derived from the board"
    }
}

/// While in progress, the side to move is determined by the mark counts.
pub struct TurnMatchesCounts;

impl Invariant<GameSession> for TurnMatchesCounts {
    fn holds(session: &GameSession) -> bool {
        if session.status().is_terminal() {
            return true;
        }
        let expected = if session.board().count(Player::X) == session.board().count(Player::O) {
            Player::X
        } else {
            Player::O
        };
        session.to_move() == expected
    }

    fn description() -> &'static str {
        "Side to move follows from the mark counts"
    }
}

/// Returns the descriptions of every violated invariant.
pub fn violations(session: &GameSession) -> Vec<&'static str> {
    let mut out = Vec::new();
    if !BalancedMarks::holds(session) {
        out.push(BalancedMarks::description());
    }
    if !StatusMatchesBoard::holds(session) {
        out.push(StatusMatchesBoard::description());
    }
    if !TurnMatchesCounts::holds(session) {
        out.push(TurnMatchesCounts::description());
    }
    out
}

/// Asserts that all session invariants hold (panics on violation in debug builds).
pub fn assert_invariants(session: &GameSession) {
    debug_assert!(
        violations(session).is_empty(),
        "Session invariants violated: {:?}",
        violations(session)
    );
}
