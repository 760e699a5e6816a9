//! MCP server exposing the tic-tac-toe tool surface.

use crate::config::EngineConfig;
use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{CallToolResult, Content, ServerCapabilities, ServerInfo};
use rmcp::{ErrorData as McpError, ServerHandler, tool, tool_handler, tool_router};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use strictly_tictactoe::{Difficulty, GameSession, MakeMoveArgs, Operation, ToolResponse};
use tracing::{debug, error, info, instrument, warn};

/// Request for starting a new game.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct NewGameRequest {
    /// Difficulty: easy, medium or hard. Unknown names fall back to medium;
    /// omit to keep the configured difficulty.
    #[serde(default)]
    pub difficulty: Option<String>,
}

/// Main server handler.
#[derive(Clone)]
pub struct TicTacToeServer {
    config: EngineConfig,
    session: Arc<Mutex<GameSession>>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl TicTacToeServer {
    /// Creates a server with a fresh session built from `config`.
    #[instrument(skip(config), fields(difficulty = %config.difficulty()))]
    pub fn new(config: EngineConfig) -> Self {
        info!("Creating tic-tac-toe server");
        let session = config.new_session();
        Self {
            config,
            session: Arc::new(Mutex::new(session)),
            tool_router: Self::tool_router(),
        }
    }

    /// Runs one operation against the shared session.
    #[instrument(skip(self, op), fields(op = %op.name()))]
    pub fn call(&self, op: Operation) -> Result<ToolResponse, McpError> {
        let mut session = self.session.lock().map_err(|e| {
            error!(error = %e, "Session lock poisoned");
            McpError::internal_error("Session lock poisoned", None)
        })?;
        let response = session.dispatch(op);
        if response.is_error() {
            debug!("Operation rejected");
        }
        Ok(response)
    }

    /// Replaces the session with a fresh game.
    #[instrument(skip(self))]
    pub fn reset(&self, difficulty: Option<Difficulty>) -> Result<ToolResponse, McpError> {
        let config = match difficulty {
            Some(difficulty) => self.config.at_difficulty(difficulty),
            None => self.config.clone(),
        };
        {
            let mut session = self.session.lock().map_err(|e| {
                error!(error = %e, "Session lock poisoned");
                McpError::internal_error("Session lock poisoned", None)
            })?;
            *session = config.new_session();
        }
        info!(difficulty = %config.difficulty(), "New game started");
        self.call(Operation::PrintBoard)
    }

    /// Shows the current board, status and winner.
    #[tool(description = "Show the current tic-tac-toe board, game status and winner.")]
    pub async fn print_board(&self) -> Result<CallToolResult, McpError> {
        to_result(self.call(Operation::PrintBoard)?)
    }

    /// Prompts the human player for a move.
    #[tool(description = "Ask the human player for a move. Returns the legal [row, col] pairs and the board.")]
    pub async fn ask_user_move(&self) -> Result<CallToolResult, McpError> {
        to_result(self.call(Operation::AskUserMove)?)
    }

    /// Applies a move.
    #[instrument(skip(self, args))]
    #[tool(
        description = "Make a move. Pass row and col (0..2) with player 'X' or 'O'. Omit row and col on the engine's turn to let it choose."
    )]
    pub async fn make_move(
        &self,
        Parameters(args): Parameters<MakeMoveArgs>,
    ) -> Result<CallToolResult, McpError> {
        debug!(row = ?args.row, col = ?args.col, player = ?args.player, "Move requested");
        to_result(self.call(Operation::MakeMove(args))?)
    }

    /// Starts a new game.
    #[instrument(skip(self, req))]
    #[tool(description = "Start a new game. Optionally choose the difficulty: easy, medium or hard.")]
    pub async fn new_game(
        &self,
        Parameters(req): Parameters<NewGameRequest>,
    ) -> Result<CallToolResult, McpError> {
        let difficulty = req.difficulty.as_deref().map(Difficulty::parse_or_default);
        to_result(self.reset(difficulty)?)
    }
}

fn to_result(response: ToolResponse) -> Result<CallToolResult, McpError> {
    let text = serde_json::to_string(&response).map_err(|e| {
        error!(error = %e, "Failed to serialize response");
        McpError::internal_error(format!("Failed to serialize response: {}", e), None)
    })?;
    if response.is_error() {
        warn!(response = %text, "Returning error payload");
        Ok(CallToolResult::error(vec![Content::text(text)]))
    } else {
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for TicTacToeServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Tic-tac-toe against a built-in opponent. X moves first; call make_move without coordinates on the engine's turn."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
