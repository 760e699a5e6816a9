//! Move selection for the automated player.
//!
//! Three policies, one per [`Difficulty`]:
//!
//! - **Easy**: uniform random choice among empty squares.
//! - **Medium**: win now if possible, else block the opponent's immediate
//!   win, else random. Greedy and depth-1; it can fall into forks.
//! - **Hard**: exhaustive minimax over the remaining game tree.
//!
//! Randomness is always supplied by the caller so seeded generators give
//! reproducible games.

pub mod greedy;
pub mod minimax;
pub mod random;

pub use greedy::GreedyStrategy;
pub use minimax::{MinimaxStrategy, SearchResult};
pub use random::RandomStrategy;

use crate::{Board, Player, Position, rules};
use rand::RngCore;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// A move-selection policy.
pub trait Strategy {
    /// Picks a square for `mark` on a board that is still in progress.
    fn propose(&self, board: &Board, mark: Player, rng: &mut dyn RngCore) -> Option<Position>;

    /// Short policy name for logs.
    fn name(&self) -> &'static str;

    /// Picks a square for `mark`, or `None` when the game is decided or the
    /// board is full.
    fn select(&self, board: &Board, mark: Player, rng: &mut dyn RngCore) -> Option<Position> {
        if rules::evaluate(board).is_terminal() {
            return None;
        }
        self.propose(board, mark, rng)
    }
}

/// Opponent strength, fixed for the lifetime of a session.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    /// Random legal moves.
    Easy,
    /// Win-or-block heuristic.
    #[default]
    Medium,
    /// Full minimax search.
    Hard,
}

impl Difficulty {
    /// Parses a difficulty name, falling back to [`Difficulty::Medium`] for
    /// anything unrecognized.
    #[instrument]
    pub fn parse_or_default(name: &str) -> Self {
        name.trim().parse().unwrap_or_else(|_| {
            debug!(name, "Unknown difficulty, using medium");
            Difficulty::default()
        })
    }

    /// The policy backing this difficulty.
    pub fn strategy(self) -> &'static dyn Strategy {
        match self {
            Difficulty::Easy => &RandomStrategy,
            Difficulty::Medium => &GreedyStrategy,
            Difficulty::Hard => &MinimaxStrategy,
        }
    }
}

/// Chooses a move for `mark` under `difficulty`.
///
/// Returns `None` when the board is already decided or has no empty square.
#[instrument(skip(board, rng), fields(empty = board.empty_cells().len()))]
pub fn choose_move(
    board: &Board,
    mark: Player,
    difficulty: Difficulty,
    rng: &mut dyn RngCore,
) -> Option<Position> {
    let strategy = difficulty.strategy();
    let choice = strategy.select(board, mark, rng);
    debug!(strategy = strategy.name(), choice = ?choice, "Strategy selected move");
    choice
}
