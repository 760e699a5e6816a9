//! Hard: exhaustive minimax.
//!
//! Scores are taken from the acting mark's perspective: +1 when the acting
//! mark wins, -1 when its opponent wins, 0 for a draw. With O as the acting
//! mark this is the classic "O maximizes" convention.
//!
//! Each node works on its own copy of the board, so the caller's board is
//! never touched. No pruning and no memoization: the 3x3 tree is small
//! enough to walk in full, and ties go to the first square in row-major order.

use super::Strategy;
use crate::{Board, GameStatus, Player, Position, Square, rules};
use rand::RngCore;
use tracing::{debug, instrument};

const WIN: i32 = 1;
const LOSS: i32 = -1;
const DRAW: i32 = 0;

/// Outcome of a root search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// Best square for the acting mark, `None` on a decided or full board.
    pub best_move: Option<Position>,
    /// Backed-up score from the acting mark's perspective.
    pub score: i32,
    /// Nodes visited, root included.
    pub nodes: u64,
}

/// Full-depth minimax player.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinimaxStrategy;

/// Searches the full game tree with `mark` to move and maximizing.
#[instrument(skip(board))]
pub fn search(board: &Board, mark: Player) -> SearchResult {
    let mut nodes = 0;
    let (score, best_move) = minimax(board, mark, mark, &mut nodes);
    debug!(score, nodes, best_move = ?best_move, "Minimax search complete");
    SearchResult {
        best_move,
        score,
        nodes,
    }
}

/// Best square for `mark`, or `None` if the game is decided.
pub fn best_move(board: &Board, mark: Player) -> Option<Position> {
    search(board, mark).best_move
}

fn terminal_score(status: GameStatus, maximizer: Player) -> Option<i32> {
    match status {
        GameStatus::Won(winner) if winner == maximizer => Some(WIN),
        GameStatus::Won(_) => Some(LOSS),
        GameStatus::Draw => Some(DRAW),
        GameStatus::InProgress => None,
    }
}

fn minimax(
    board: &Board,
    to_move: Player,
    maximizer: Player,
    nodes: &mut u64,
) -> (i32, Option<Position>) {
    *nodes += 1;
    if let Some(score) = terminal_score(rules::evaluate(board), maximizer) {
        return (score, None);
    }

    let maximizing = to_move == maximizer;
    let mut best: Option<(i32, Position)> = None;

    for pos in board.empty_cells() {
        let mut child = *board;
        child.place(pos, Square::Occupied(to_move));
        let (score, _) = minimax(&child, to_move.opponent(), maximizer, nodes);

        let improves = match best {
            None => true,
            Some((best_score, _)) if maximizing => score > best_score,
            Some((best_score, _)) => score < best_score,
        };
        if improves {
            best = Some((score, pos));
        }
    }

    match best {
        Some((score, pos)) => (score, Some(pos)),
        // Unreachable for a non-terminal board, which always has an empty square.
        None => (DRAW, None),
    }
}

impl Strategy for MinimaxStrategy {
    fn propose(&self, board: &Board, mark: Player, _rng: &mut dyn RngCore) -> Option<Position> {
        best_move(board, mark)
    }

    fn name(&self) -> &'static str {
        "minimax"
    }
}
