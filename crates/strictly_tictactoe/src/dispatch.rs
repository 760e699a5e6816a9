//! Tool-call surface consumed by an agent harness.
//!
//! Three named operations, parsed up front into a closed [`Operation`] set.
//! Every outcome, including rejected moves, comes back as a structured
//! [`ToolResponse`]; nothing here can take the host process down.

use crate::session::{CoordArg, GameSession, SessionError, Transition};
use crate::{Board, GameStatus, Player, Position};
use derive_more::{Display, Error};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument, warn};

/// Message sent with every invalid-move response.
pub const INVALID_MOVE_MESSAGE: &str = "Invalid move. Use 0..2 for row/col and pick an empty cell.";

/// Names of the supported operations.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum OperationName {
    /// Show the board, status and winner.
    PrintBoard,
    /// Prompt the human for a move.
    AskUserMove,
    /// Apply a move, choosing one for the engine when coordinates are omitted.
    MakeMove,
}

/// Arguments to `make_move`, exactly as they arrive off the wire.
///
/// Fields stay loosely typed so that bad values become invalid-move or
/// invalid-player responses instead of decode failures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MakeMoveArgs {
    /// Row index 0..2. Omit to let the engine choose.
    #[serde(default)]
    pub row: Option<Value>,
    /// Column index 0..2. Omit to let the engine choose.
    #[serde(default)]
    pub col: Option<Value>,
    /// 'X' or 'O'. Defaults to the side to move.
    #[serde(default)]
    pub player: Option<Value>,
}

impl MakeMoveArgs {
    /// Typed coordinates for a human move.
    pub fn at(row: i64, col: i64) -> Self {
        Self {
            row: Some(Value::from(row)),
            col: Some(Value::from(col)),
            player: None,
        }
    }

    /// Sets the player argument.
    pub fn by(mut self, player: Player) -> Self {
        self.player = Some(Value::from(player.to_string()));
        self
    }

    fn player_arg(&self) -> Option<String> {
        match &self.player {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
        }
    }
}

/// Interprets a wire value as a board coordinate.
///
/// Integers too large for `i64` saturate, so they still read as out of range.
pub fn coord_arg(value: Option<&Value>) -> CoordArg {
    match value {
        None | Some(Value::Null) => CoordArg::Missing,
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_u64().map(|_| i64::MAX))
            .or_else(|| {
                n.as_f64()
                    .filter(|f| f.is_finite() && f.fract() == 0.0)
                    .map(|f| f as i64)
            })
            .map_or(CoordArg::Malformed, CoordArg::Index),
        Some(Value::String(s)) => s
            .trim()
            .parse::<i128>()
            .map(|v| v.clamp(i64::MIN.into(), i64::MAX.into()) as i64)
            .map_or(CoordArg::Malformed, CoordArg::Index),
        Some(_) => CoordArg::Malformed,
    }
}

/// A validated tool call.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// `print_board`
    PrintBoard,
    /// `ask_user_move`
    AskUserMove,
    /// `make_move`
    MakeMove(MakeMoveArgs),
}

/// A tool call that could not be routed.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum DispatchError {
    /// Name outside the supported set.
    #[display("Unknown tictactoe function: {}", _0)]
    UnknownOperation(#[error(not(source))] String),
    /// Arguments that are not a JSON object.
    #[display("Arguments for {} must be an object", _0)]
    BadArguments(#[error(not(source))] OperationName),
}

impl Operation {
    /// Parses a named call with its argument bag.
    #[instrument(skip(args))]
    pub fn from_call(name: &str, args: &Value) -> Result<Self, DispatchError> {
        let op: OperationName = name.parse().map_err(|_| {
            warn!(name, "Unknown operation");
            DispatchError::UnknownOperation(name.to_string())
        })?;
        match op {
            OperationName::PrintBoard => Ok(Operation::PrintBoard),
            OperationName::AskUserMove => Ok(Operation::AskUserMove),
            OperationName::MakeMove => {
                let args = match args {
                    Value::Null => MakeMoveArgs::default(),
                    Value::Object(_) => serde_json::from_value(args.clone())
                        .map_err(|_| DispatchError::BadArguments(op))?,
                    _ => return Err(DispatchError::BadArguments(op)),
                };
                Ok(Operation::MakeMove(args))
            }
        }
    }

    /// The operation's wire name.
    pub fn name(&self) -> OperationName {
        match self {
            Operation::PrintBoard => OperationName::PrintBoard,
            Operation::AskUserMove => OperationName::AskUserMove,
            Operation::MakeMove(_) => OperationName::MakeMove,
        }
    }
}

/// A move as reported back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastMove {
    /// Row index.
    pub row: usize,
    /// Column index.
    pub col: usize,
    /// Who moved.
    pub player: Player,
}

/// `print_board` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardView {
    /// Rendered board.
    pub board: String,
    /// Status label.
    pub status: String,
    /// Winner, if any.
    pub winner: Option<Player>,
}

/// `ask_user_move` payload, also sent when a human move lacks coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovePrompt {
    /// Instruction for the human.
    pub message: String,
    /// Legal `[row, col]` pairs.
    pub legal_moves: Vec<[usize; 2]>,
    /// Rendered board.
    pub board: String,
    /// Status label.
    pub status: String,
}

/// Successful `make_move` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveApplied {
    /// Rendered board after the move.
    pub board: String,
    /// The move just applied.
    pub last_move: LastMove,
    /// Status label after the move.
    pub status: String,
    /// Winner, if any.
    pub winner: Option<Player>,
    /// Whose turn follows.
    pub next_player: Player,
}

/// Rejection payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolError {
    /// What went wrong.
    pub error: String,
    /// Specific reason, when there is more to say than `error`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Legal `[row, col]` pairs as a hint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legal_moves: Option<Vec<[usize; 2]>>,
    /// Rendered board.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub board: Option<String>,
    /// Status label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Winner, included once the game is over.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<Option<Player>>,
}

impl ToolError {
    fn bare(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            reason: None,
            legal_moves: None,
            board: None,
            status: None,
            winner: None,
        }
    }
}

/// Any response from the dispatch surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ToolResponse {
    /// `print_board`
    Board(BoardView),
    /// `ask_user_move` or a human move without coordinates.
    Prompt(MovePrompt),
    /// Accepted move.
    Moved(MoveApplied),
    /// Rejected request.
    Error(ToolError),
}

impl ToolResponse {
    /// True for [`ToolResponse::Error`].
    pub fn is_error(&self) -> bool {
        matches!(self, ToolResponse::Error(_))
    }

    /// Serializes into a JSON value.
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|e| Value::String(e.to_string()))
    }
}

fn coords(cells: Vec<Position>) -> Vec<[usize; 2]> {
    cells.into_iter().map(|p| [p.row(), p.col()]).collect()
}

fn board_view(board: &Board, status: GameStatus) -> BoardView {
    BoardView {
        board: board.display(),
        status: status.label().to_string(),
        winner: status.winner(),
    }
}

impl GameSession {
    /// Executes a parsed operation.
    #[instrument(skip(self, op), fields(op = %op.name()))]
    pub fn dispatch(&mut self, op: Operation) -> ToolResponse {
        match op {
            Operation::PrintBoard => ToolResponse::Board(board_view(self.board(), self.status())),
            Operation::AskUserMove => ToolResponse::Prompt(self.prompt(self.human())),
            Operation::MakeMove(args) => self.make_move(&args),
        }
    }

    /// Parses and executes a named call, returning the JSON payload.
    pub fn handle(&mut self, name: &str, args: &Value) -> Result<Value, DispatchError> {
        let op = Operation::from_call(name, args)?;
        Ok(self.dispatch(op).to_value())
    }

    fn prompt(&self, player: Player) -> MovePrompt {
        MovePrompt {
            message: format!("Your turn as '{}'. Provide row and col (0..2).", player),
            legal_moves: coords(self.legal_moves()),
            board: self.render(),
            status: self.status().label().to_string(),
        }
    }

    fn game_over(&self) -> ToolError {
        let status = self.status();
        ToolError {
            error: format!("Game over: {}", status),
            board: Some(self.render()),
            status: Some(status.label().to_string()),
            winner: Some(status.winner()),
            ..ToolError::bare("")
        }
    }

    fn make_move(&mut self, args: &MakeMoveArgs) -> ToolResponse {
        let player = args.player_arg();
        let row = coord_arg(args.row.as_ref());
        let col = coord_arg(args.col.as_ref());
        debug!(?player, ?row, ?col, "make_move");

        match self.apply_move(player.as_deref(), row, col) {
            Ok(Transition::Applied(report)) => ToolResponse::Moved(MoveApplied {
                board: self.render(),
                last_move: LastMove {
                    row: report.last_move.position().row(),
                    col: report.last_move.position().col(),
                    player: report.last_move.player(),
                },
                status: report.status.label().to_string(),
                winner: report.status.winner(),
                next_player: report.next_player,
            }),
            Ok(Transition::Unchanged(status)) if status.is_terminal() => {
                ToolResponse::Error(self.game_over())
            }
            Ok(Transition::Unchanged(status)) => {
                ToolResponse::Board(board_view(self.board(), status))
            }
            Err(err @ SessionError::InvalidPlayer(_)) => {
                ToolResponse::Error(ToolError::bare(err.to_string()))
            }
            Err(SessionError::InvalidMove {
                reason,
                legal_moves,
            }) => ToolResponse::Error(ToolError {
                reason: Some(reason.to_string()),
                legal_moves: Some(coords(legal_moves)),
                board: Some(self.render()),
                ..ToolError::bare(INVALID_MOVE_MESSAGE)
            }),
            Err(SessionError::MissingCoordinates { player, .. }) => {
                ToolResponse::Prompt(self.prompt(player))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MoveError;
    use crate::strategy::Difficulty;
    use serde_json::json;

    fn session() -> GameSession {
        GameSession::new(Difficulty::Hard, Player::O, 7)
    }

    #[test]
    fn test_operation_names() {
        assert_eq!(
            Operation::from_call("print_board", &Value::Null),
            Ok(Operation::PrintBoard)
        );
        assert_eq!(
            Operation::from_call("ask_user_move", &json!({})),
            Ok(Operation::AskUserMove)
        );
        assert_eq!(
            Operation::from_call("reset", &json!({})),
            Err(DispatchError::UnknownOperation("reset".to_string()))
        );
        assert_eq!(OperationName::MakeMove.to_string(), "make_move");
    }

    #[test]
    fn test_make_move_args_parse() {
        let op =
            Operation::from_call("make_move", &json!({"row": 1, "col": 2, "player": "X"})).unwrap();
        assert_eq!(op, Operation::MakeMove(MakeMoveArgs::at(1, 2).by(Player::X)));
        assert!(matches!(
            Operation::from_call("make_move", &json!([1, 2])),
            Err(DispatchError::BadArguments(OperationName::MakeMove))
        ));
    }

    #[test]
    fn test_coord_arg() {
        assert_eq!(coord_arg(None), CoordArg::Missing);
        assert_eq!(coord_arg(Some(&Value::Null)), CoordArg::Missing);
        assert_eq!(coord_arg(Some(&json!(2))), CoordArg::Index(2));
        assert_eq!(coord_arg(Some(&json!(-4))), CoordArg::Index(-4));
        assert_eq!(coord_arg(Some(&json!(1.0))), CoordArg::Index(1));
        assert_eq!(coord_arg(Some(&json!(1.5))), CoordArg::Malformed);
        assert_eq!(coord_arg(Some(&json!(" 0 "))), CoordArg::Index(0));
        assert_eq!(coord_arg(Some(&json!("middle"))), CoordArg::Malformed);
        assert_eq!(coord_arg(Some(&json!(true))), CoordArg::Malformed);
    }

    #[test]
    fn test_huge_integers_are_out_of_range() {
        assert_eq!(coord_arg(Some(&json!(u64::MAX))), CoordArg::Index(i64::MAX));
        assert_eq!(coord_arg(Some(&json!(-1e30))), CoordArg::Index(i64::MIN));
        assert_eq!(
            coord_arg(Some(&json!("99999999999999999999"))),
            CoordArg::Index(i64::MAX)
        );

        let mut s = session();
        let value = s
            .handle("make_move", &json!({"row": u64::MAX, "col": 0, "player": "X"}))
            .unwrap();
        assert_eq!(value["error"], INVALID_MOVE_MESSAGE);
        assert_ne!(value["reason"], MoveError::Malformed.to_string());
        assert!(value["reason"].as_str().unwrap().contains("off the board"));
    }

    #[test]
    fn test_print_board_payload() {
        let mut s = session();
        let value = s.handle("print_board", &json!({})).unwrap();
        assert_eq!(value["status"], "playing");
        assert_eq!(value["winner"], Value::Null);
        assert_eq!(value["board"], Board::new().display());
    }

    #[test]
    fn test_ask_user_move_payload() {
        let mut s = session();
        let value = s.handle("ask_user_move", &Value::Null).unwrap();
        assert_eq!(value["message"], "Your turn as 'X'. Provide row and col (0..2).");
        assert_eq!(value["legal_moves"].as_array().map(Vec::len), Some(9));
        assert_eq!(value["legal_moves"][0], json!([0, 0]));
        assert_eq!(value["status"], "playing");
    }

    #[test]
    fn test_make_move_payload() {
        let mut s = session();
        let value = s
            .handle("make_move", &json!({"row": 0, "col": 0, "player": "X"}))
            .unwrap();
        assert_eq!(value["last_move"], json!({"row": 0, "col": 0, "player": "X"}));
        assert_eq!(value["status"], "playing");
        assert_eq!(value["winner"], Value::Null);
        assert_eq!(value["next_player"], "O");
    }

    #[test]
    fn test_invalid_move_payload_has_hints() {
        let mut s = session();
        s.handle("make_move", &json!({"row": 0, "col": 0})).unwrap();
        s.handle("make_move", &json!({"row": 1, "col": 1})).unwrap();
        let value = s.handle("make_move", &json!({"row": 1, "col": 1})).unwrap();
        assert_eq!(value["error"], INVALID_MOVE_MESSAGE);
        assert_eq!(value["legal_moves"].as_array().map(Vec::len), Some(7));
        assert!(value["board"].is_string());

        let value = s.handle("make_move", &json!({"row": "two", "col": 1})).unwrap();
        assert_eq!(value["error"], INVALID_MOVE_MESSAGE);
        let value = s.handle("make_move", &json!({"row": 9, "col": 1})).unwrap();
        assert_eq!(value["error"], INVALID_MOVE_MESSAGE);
        assert_eq!(s.board().filled(), 2);
    }

    #[test]
    fn test_invalid_player_payload() {
        let mut s = session();
        let value = s
            .handle("make_move", &json!({"row": 0, "col": 0, "player": "Y"}))
            .unwrap();
        assert_eq!(value["error"], "Invalid player 'Y'. Use 'X' or 'O'.");
        let value = s
            .handle("make_move", &json!({"row": 0, "col": 0, "player": 1}))
            .unwrap();
        assert!(value["error"].as_str().unwrap().starts_with("Invalid player"));
    }

    #[test]
    fn test_missing_human_coordinates_prompts() {
        let mut s = session();
        let response = s.dispatch(Operation::MakeMove(MakeMoveArgs::default()));
        match response {
            ToolResponse::Prompt(prompt) => assert_eq!(prompt.legal_moves.len(), 9),
            other => panic!("expected prompt, got {other:?}"),
        }
    }

    #[test]
    fn test_game_over_payload() {
        let mut s = GameSession::new(Difficulty::Easy, Player::O, 7);
        for (row, col) in [(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)] {
            s.handle("make_move", &json!({"row": row, "col": col})).unwrap();
        }
        let value = s.handle("make_move", &json!({"player": "O"})).unwrap();
        assert_eq!(value["error"], "Game over: win_X");
        assert_eq!(value["status"], "win_X");
        assert_eq!(value["winner"], "X");
    }
}
