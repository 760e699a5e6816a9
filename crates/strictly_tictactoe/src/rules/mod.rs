//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`] snapshot. Nothing here mutates shared
//! state, so the opponent search may call them freely on scratch copies.

pub mod win;

pub use win::{LINES, check_winner};

use crate::{Board, GameStatus};

/// Derives the game status from a board.
///
/// The first complete line in [`LINES`] order decides a win; otherwise a full
/// board is a draw and anything else is still in progress.
pub fn evaluate(board: &Board) -> GameStatus {
    if let Some(winner) = check_winner(board) {
        GameStatus::Won(winner)
    } else if board.is_full() {
        GameStatus::Draw
    } else {
        GameStatus::InProgress
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Player, Position, Square};

    #[test]
    fn test_empty_board_in_progress() {
        assert_eq!(evaluate(&Board::new()), GameStatus::InProgress);
    }

    #[test]
    fn test_full_board_with_line_is_won_not_draw() {
        // X X X / O O X / O X O
        #[rustfmt::skip]
        let marks = [
            Player::X, Player::X, Player::X,
            Player::O, Player::O, Player::X,
            Player::O, Player::X, Player::O,
        ];
        let mut board = Board::new();
        for (pos, mark) in Position::ALL.iter().zip(marks) {
            board.place(*pos, Square::Occupied(mark));
        }
        assert_eq!(evaluate(&board), GameStatus::Won(Player::X));
    }

    #[test]
    fn test_draw() {
        // X O X / X O O / O X X
        #[rustfmt::skip]
        let marks = [
            Player::X, Player::O, Player::X,
            Player::X, Player::O, Player::O,
            Player::O, Player::X, Player::X,
        ];
        let mut board = Board::new();
        for (pos, mark) in Position::ALL.iter().zip(marks) {
            board.place(*pos, Square::Occupied(mark));
        }
        assert_eq!(evaluate(&board), GameStatus::Draw);
    }

    #[test]
    fn test_partial_board_in_progress() {
        let mut board = Board::new();
        board.place(Position::Center, Square::Occupied(Player::X));
        assert!(!board.is_full());
        assert_eq!(evaluate(&board), GameStatus::InProgress);
    }

    #[test]
    fn test_partial_board_with_line_is_won() {
        let mut board = Board::new();
        for pos in [Position::TopLeft, Position::TopCenter, Position::TopRight] {
            board.place(pos, Square::Occupied(Player::X));
        }
        board.place(Position::MiddleLeft, Square::Occupied(Player::O));
        board.place(Position::Center, Square::Occupied(Player::O));
        assert!(!board.is_full());
        assert_eq!(evaluate(&board), GameStatus::Won(Player::X));
    }
}
