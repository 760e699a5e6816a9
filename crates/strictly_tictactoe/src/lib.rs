//! Pure tic-tac-toe game logic with a difficulty-tiered opponent.
//!
//! # Architecture
//!
//! - **Board**: 3x3 grid of squares with range-checked access
//! - **Rules**: derives in-progress / won / draw from a board snapshot
//! - **Validation**: yes/no legality of a proposed move
//! - **Strategy**: random, win-or-block, and full minimax opponents
//! - **Session**: the stateful game, the only owner of the live board
//! - **Dispatch**: the `print_board` / `ask_user_move` / `make_move` tool surface
//!
//! # Example
//!
//! ```
//! use strictly_tictactoe::{Difficulty, GameSession, GameStatus, Player};
//!
//! let mut session = GameSession::new(Difficulty::Hard, Player::O, 42);
//! session.play(Player::X, 0, 0).unwrap();
//! session.play_automated().unwrap();
//! assert_eq!(session.status(), GameStatus::InProgress);
//! assert_eq!(session.board().filled(), 2);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
pub mod dispatch;
pub mod invariants;
mod position;
pub mod rules;
mod session;
pub mod strategy;
mod types;
pub mod validation;

pub use action::{Move, MoveError};
pub use dispatch::{
    BoardView, DispatchError, LastMove, MakeMoveArgs, MoveApplied, MovePrompt, Operation,
    OperationName, ToolError, ToolResponse,
};
pub use position::Position;
pub use session::{CoordArg, GameSession, MoveReport, SessionError, Transition};
pub use strategy::{Difficulty, Strategy, choose_move};
pub use types::{Board, BoardError, GameStatus, Player, Square};
