//! Strictly Tic-Tac-Toe host - MCP server and terminal front end
//!
//! Wraps a single [`strictly_tictactoe::GameSession`] for two kinds of client.
//!
//! # Architecture
//!
//! - **Server**: MCP stdio server exposing `print_board`, `ask_user_move`,
//!   `make_move` and `new_game`
//! - **Play**: interactive terminal game against the engine
//! - **Config**: TOML engine settings with command-line overrides
//!
//! # Example
//!
//! ```no_run
//! use strictly_tictactoe_mcp::{EngineConfig, TicTacToeServer};
//! use rmcp::ServiceExt;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let server = TicTacToeServer::new(EngineConfig::default());
//! let service = server.serve(rmcp::transport::stdio()).await?;
//! service.waiting().await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod play;

mod config;
mod server;

// Crate-level exports - Configuration
pub use config::{ConfigError, EngineConfig};

// Crate-level exports - Server types
pub use server::{NewGameRequest, TicTacToeServer};
