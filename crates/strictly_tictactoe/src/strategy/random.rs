//! Easy: uniform random choice.

use super::Strategy;
use crate::{Board, Player, Position};
use rand::{Rng, RngCore};

/// Picks uniformly among the empty squares.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomStrategy;

/// Uniform choice over `board.empty_cells()`, `None` on a full board.
pub fn pick(board: &Board, rng: &mut dyn RngCore) -> Option<Position> {
    let cells = board.empty_cells();
    if cells.is_empty() {
        None
    } else {
        Some(cells[rng.random_range(0..cells.len())])
    }
}

impl Strategy for RandomStrategy {
    fn propose(&self, board: &Board, _mark: Player, rng: &mut dyn RngCore) -> Option<Position> {
        pick(board, rng)
    }

    fn name(&self) -> &'static str {
        "random"
    }
}
