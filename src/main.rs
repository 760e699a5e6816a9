//! Strictly Tic-Tac-Toe - Unified CLI
//!
//! Runs the engine as an MCP server or as a terminal game.

#![warn(missing_docs)]

use anyhow::Result;
use clap::Parser;
use rmcp::ServiceExt;
use std::io;
use strictly_tictactoe_mcp::cli::{Cli, Command};
use strictly_tictactoe_mcp::{EngineConfig, TicTacToeServer, play};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve => {
            init_tracing("info");
            run_mcp_server(cli.engine.resolve()?).await
        }
        Command::Play => {
            init_tracing("warn");
            run_play(cli.engine.resolve()?)
        }
    }
}

/// Logs go to stderr; stdout belongs to the MCP transport or the game.
fn init_tracing(default_filter: &str) {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();
}

/// Run the MCP game server (stdio mode)
async fn run_mcp_server(config: EngineConfig) -> Result<()> {
    info!(
        difficulty = %config.difficulty(),
        automated_player = %config.automated_player(),
        "Starting tic-tac-toe MCP server"
    );

    let server = TicTacToeServer::new(config);

    info!("Server ready - connect via MCP protocol");
    let service = server.serve(rmcp::transport::stdio()).await?;
    service.waiting().await?;

    Ok(())
}

/// Run a terminal game on stdin/stdout
fn run_play(config: EngineConfig) -> Result<()> {
    let mut session = config.new_session();
    let stdin = io::stdin();
    let stdout = io::stdout();
    play::run(&mut session, stdin.lock(), stdout.lock())?;
    Ok(())
}
