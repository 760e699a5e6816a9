//! Core domain types for tic-tac-toe.

use crate::position::Position;
use derive_more::{Display, Error};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Player in the game.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
pub enum Player {
    /// Player X (goes first).
    X,
    /// Player O (goes second).
    O,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Single-character symbol used in board renderings.
    pub fn symbol(self) -> char {
        match self {
            Player::X => 'X',
            Player::O => 'O',
        }
    }
}

/// A square on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    #[default]
    Empty,
    /// Square occupied by a player.
    Occupied(Player),
}

impl Square {
    fn symbol(self) -> char {
        match self {
            Square::Empty => ' ',
            Square::Occupied(player) => player.symbol(),
        }
    }
}

/// Raised when a (row, col) pair falls outside the 3x3 grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("Coordinate ({}, {}) is outside the 3x3 board", row, col)]
pub struct BoardError {
    /// Offending row.
    pub row: usize,
    /// Offending column.
    pub col: usize,
}

/// 3x3 tic-tac-toe board.
///
/// The board only enforces index range. Whether a write is legal is the
/// caller's business (see [`crate::validation`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; 9],
        }
    }

    /// Gets the square at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> Result<Square, BoardError> {
        Position::from_coords(row, col)
            .map(|pos| self.at(pos))
            .ok_or(BoardError { row, col })
    }

    /// Writes `square` at `(row, col)` unconditionally.
    pub fn set(&mut self, row: usize, col: usize, square: Square) -> Result<(), BoardError> {
        let pos = Position::from_coords(row, col).ok_or(BoardError { row, col })?;
        self.place(pos, square);
        Ok(())
    }

    /// Gets the square at a position.
    pub fn at(&self, pos: Position) -> Square {
        self.squares[pos.to_index()]
    }

    /// Writes the square at a position.
    pub fn place(&mut self, pos: Position, square: Square) {
        self.squares[pos.to_index()] = square;
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.at(pos) == Square::Empty
    }

    /// True iff no square is empty.
    pub fn is_full(&self) -> bool {
        self.squares.iter().all(|s| *s != Square::Empty)
    }

    /// All empty positions in row-major order.
    pub fn empty_cells(&self) -> Vec<Position> {
        Position::ALL
            .iter()
            .copied()
            .filter(|pos| self.is_empty(*pos))
            .collect()
    }

    /// Number of squares holding `player`'s mark.
    pub fn count(&self, player: Player) -> usize {
        self.squares
            .iter()
            .filter(|s| **s == Square::Occupied(player))
            .count()
    }

    /// Number of non-empty squares.
    pub fn filled(&self) -> usize {
        self.squares.iter().filter(|s| **s != Square::Empty).count()
    }

    /// Formats the board as a human-readable string.
    ///
    /// ```text
    ///
    /// X | O |
    /// - + - + -
    ///   | X |
    /// - + - + -
    ///   |   | O
    /// ```
    #[instrument(skip(self))]
    pub fn display(&self) -> String {
        let rows: Vec<String> = (0..3)
            .map(|row| {
                (0..3)
                    .map(|col| self.squares[row * 3 + col].symbol().to_string())
                    .collect::<Vec<_>>()
                    .join(" | ")
            })
            .collect();
        format!("\n{}\n", rows.join("\n- + - + -\n"))
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.display())
    }
}

/// Current status of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// Game is ongoing.
    InProgress,
    /// Game ended in a win.
    Won(Player),
    /// Game ended in a draw.
    Draw,
}

impl GameStatus {
    /// True for `Won(_)` and `Draw`.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }

    /// The winner, if any.
    pub fn winner(&self) -> Option<Player> {
        match self {
            GameStatus::Won(player) => Some(*player),
            GameStatus::InProgress | GameStatus::Draw => None,
        }
    }

    /// Wire label used in tool responses.
    pub fn label(&self) -> &'static str {
        match self {
            GameStatus::InProgress => "playing",
            GameStatus::Won(Player::X) => "win_X",
            GameStatus::Won(Player::O) => "win_O",
            GameStatus::Draw => "draw",
        }
    }
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_get_out_of_range() {
        let board = Board::new();
        assert_eq!(board.get(3, 0), Err(BoardError { row: 3, col: 0 }));
        assert_eq!(board.get(0, 7), Err(BoardError { row: 0, col: 7 }));
        assert_eq!(board.get(2, 2), Ok(Square::Empty));
    }

    #[test]
    fn test_set_then_get() {
        let mut board = Board::new();
        board.set(1, 2, Square::Occupied(Player::O)).unwrap();
        assert_eq!(board.get(1, 2), Ok(Square::Occupied(Player::O)));
        assert!(board.set(1, 3, Square::Occupied(Player::X)).is_err());
        assert_eq!(board.filled(), 1);
    }

    #[test]
    fn test_empty_cells_row_major() {
        let mut board = Board::new();
        board.place(Position::TopCenter, Square::Occupied(Player::X));
        board.place(Position::Center, Square::Occupied(Player::O));
        let cells: Vec<_> = board.empty_cells().iter().map(|p| p.coords()).collect();
        assert_eq!(
            cells,
            vec![(0, 0), (0, 2), (1, 0), (1, 2), (2, 0), (2, 1), (2, 2)]
        );
    }

    #[test]
    fn test_is_full() {
        let mut board = Board::new();
        assert!(!board.is_full());
        for (i, pos) in Position::ALL.iter().enumerate() {
            let player = if i % 2 == 0 { Player::X } else { Player::O };
            board.place(*pos, Square::Occupied(player));
        }
        assert!(board.is_full());
        assert!(board.empty_cells().is_empty());
    }

    #[test]
    fn test_display_format() {
        let mut board = Board::new();
        board.place(Position::TopLeft, Square::Occupied(Player::X));
        board.place(Position::TopCenter, Square::Occupied(Player::O));
        board.place(Position::BottomRight, Square::Occupied(Player::X));
        assert_eq!(
            board.display(),
            "\nX | O |  \n- + - + -\n  |   |  \n- + - + -\n  |   | X\n"
        );
    }

    #[test]
    fn test_player_parse() {
        assert_eq!(Player::from_str("X"), Ok(Player::X));
        assert_eq!(Player::from_str("O"), Ok(Player::O));
        assert!(Player::from_str("Z").is_err());
        assert_eq!(Player::X.opponent(), Player::O);
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(GameStatus::InProgress.label(), "playing");
        assert_eq!(GameStatus::Won(Player::O).to_string(), "win_O");
        assert_eq!(GameStatus::Draw.winner(), None);
        assert!(GameStatus::Draw.is_terminal());
    }
}
