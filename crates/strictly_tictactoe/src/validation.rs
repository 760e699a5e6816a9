//! Move legality checks.
//!
//! The validator answers yes or no. It never mutates the board and never
//! picks a move on the caller's behalf; missing coordinates must be resolved
//! before a move reaches this module.

use crate::action::MoveError;
use crate::{Board, GameStatus, Position};
use tracing::{instrument, warn};

/// Checks a move against the board and status, returning the target
/// position when legal.
///
/// Order of checks: terminal status, coordinate range, occupancy.
#[instrument(skip(board))]
pub fn check_move(
    board: &Board,
    status: GameStatus,
    row: i64,
    col: i64,
) -> Result<Position, MoveError> {
    if status.is_terminal() {
        return Err(MoveError::GameOver(status));
    }
    let pos = Position::from_signed(row, col).ok_or(MoveError::OutOfRange { row, col })?;
    if !board.is_empty(pos) {
        warn!(position = %pos, "Rejected move onto occupied square");
        return Err(MoveError::SquareOccupied(pos));
    }
    Ok(pos)
}

/// True iff the status is in progress, both coordinates are in `0..3` and the
/// square is empty.
pub fn is_legal(board: &Board, status: GameStatus, row: i64, col: i64) -> bool {
    check_move(board, status, row, col).is_ok()
}
