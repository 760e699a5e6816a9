//! Medium: take an immediate win, else block one, else play randomly.

use super::{Strategy, random};
use crate::{Board, Player, Position, Square, rules};
use rand::RngCore;

/// Depth-1 win-or-block heuristic.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyStrategy;

/// First empty square (row-major) where `mark` completes a line.
pub fn winning_move(board: &Board, mark: Player) -> Option<Position> {
    board.empty_cells().into_iter().find(|pos| {
        let mut scratch = *board;
        scratch.place(*pos, Square::Occupied(mark));
        rules::check_winner(&scratch) == Some(mark)
    })
}

impl Strategy for GreedyStrategy {
    fn propose(&self, board: &Board, mark: Player, rng: &mut dyn RngCore) -> Option<Position> {
        // A win outranks a block.
        winning_move(board, mark)
            .or_else(|| winning_move(board, mark.opponent()))
            .or_else(|| random::pick(board, rng))
    }

    fn name(&self) -> &'static str {
        "greedy"
    }
}
