//! Command-line interface for strictly_tictactoe.

use crate::config::{ConfigError, EngineConfig};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use strictly_tictactoe::{Difficulty, Player};

/// Strictly Tic-Tac-Toe - Type-safe game engine with MCP interface
#[derive(Parser, Debug)]
#[command(name = "strictly_tictactoe")]
#[command(about = "Tic-tac-toe engine for humans and LLM agents", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Engine settings
    #[command(flatten)]
    pub engine: EngineArgs,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Engine settings shared by every command.
#[derive(Args, Debug, Clone, Default)]
pub struct EngineArgs {
    /// Path to a TOML engine config
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Opponent difficulty (easy, medium, hard)
    #[arg(short, long, global = true)]
    pub difficulty: Option<Difficulty>,

    /// Seed for the engine's random choices
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Mark played by the engine (X or O)
    #[arg(long, global = true)]
    pub automated_player: Option<Player>,
}

impl EngineArgs {
    /// Resolves the config file, if any, then applies flag overrides.
    pub fn resolve(&self) -> Result<EngineConfig, ConfigError> {
        let base = match &self.config {
            Some(path) => EngineConfig::from_file(path)?,
            None => EngineConfig::default(),
        };
        Ok(base.with_overrides(self.difficulty, self.automated_player, self.seed))
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the MCP game server (stdio mode)
    Serve,

    /// Play against the engine in the terminal
    Play,
}
