//! Integration tests for the MCP tool surface.

use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::CallToolResult;
use serde_json::{Value, json};
use strictly_tictactoe::{Difficulty, MakeMoveArgs, Operation, Player, ToolResponse};
use strictly_tictactoe_mcp::{EngineConfig, NewGameRequest, TicTacToeServer};

fn server(difficulty: Difficulty) -> TicTacToeServer {
    TicTacToeServer::new(EngineConfig::new(difficulty, Player::O, Some(11)))
}

fn payload(result: &CallToolResult) -> Value {
    let text = result.content[0]
        .as_text()
        .map(|t| t.text.clone())
        .expect("text content");
    serde_json::from_str(&text).expect("json payload")
}

#[tokio::test]
async fn test_print_board_starts_empty() {
    let server = server(Difficulty::Hard);
    let result = server.print_board().await.unwrap();
    assert_eq!(result.is_error, Some(false));
    let body = payload(&result);
    assert_eq!(body["status"], "playing");
    assert_eq!(body["winner"], Value::Null);
}

#[tokio::test]
async fn test_ask_user_move_lists_all_squares() {
    let server = server(Difficulty::Hard);
    let body = payload(&server.ask_user_move().await.unwrap());
    assert_eq!(body["legal_moves"].as_array().unwrap().len(), 9);
    assert_eq!(body["message"], "Your turn as 'X'. Provide row and col (0..2).");
}

#[tokio::test]
async fn test_human_then_engine_move() {
    let server = server(Difficulty::Hard);
    let human = payload(
        &server
            .make_move(Parameters(MakeMoveArgs::at(0, 0).by(Player::X)))
            .await
            .unwrap(),
    );
    assert_eq!(human["last_move"], json!({"row": 0, "col": 0, "player": "X"}));
    assert_eq!(human["next_player"], "O");

    let engine = payload(&server.make_move(Parameters(MakeMoveArgs::default())).await.unwrap());
    assert_eq!(engine["last_move"], json!({"row": 1, "col": 1, "player": "O"}));
    assert_eq!(engine["status"], "playing");
}

#[tokio::test]
async fn test_invalid_move_is_error_payload() {
    let server = server(Difficulty::Hard);
    let result = server
        .make_move(Parameters(MakeMoveArgs::at(3, 0).by(Player::X)))
        .await
        .unwrap();
    assert_eq!(result.is_error, Some(true));
    let body = payload(&result);
    assert_eq!(body["error"], "Invalid move. Use 0..2 for row/col and pick an empty cell.");
    assert_eq!(body["legal_moves"].as_array().unwrap().len(), 9);
}

#[tokio::test]
async fn test_invalid_player_is_error_payload() {
    let server = server(Difficulty::Hard);
    let args = MakeMoveArgs {
        player: Some(json!("Z")),
        ..MakeMoveArgs::at(1, 1)
    };
    let body = payload(&server.make_move(Parameters(args)).await.unwrap());
    assert_eq!(body["error"], "Invalid player 'Z'. Use 'X' or 'O'.");
}

#[tokio::test]
async fn test_new_game_resets_board() {
    let server = server(Difficulty::Hard);
    server
        .make_move(Parameters(MakeMoveArgs::at(2, 2).by(Player::X)))
        .await
        .unwrap();

    let body = payload(
        &server
            .new_game(Parameters(NewGameRequest {
                difficulty: Some("easy".to_string()),
            }))
            .await
            .unwrap(),
    );
    assert_eq!(body["status"], "playing");
    let prompt = payload(&server.ask_user_move().await.unwrap());
    assert_eq!(prompt["legal_moves"].as_array().unwrap().len(), 9);
}

#[test]
fn test_hard_game_through_call_never_lost() {
    let server = server(Difficulty::Hard);
    // X plays the first free square in row-major order each turn.
    loop {
        let prompt = match server.call(Operation::AskUserMove).unwrap() {
            ToolResponse::Prompt(prompt) => prompt,
            other => panic!("expected prompt, got {:?}", other),
        };
        if prompt.status != "playing" {
            assert_ne!(prompt.status, "win_X");
            break;
        }
        let [row, col] = prompt.legal_moves[0];
        let moved = server
            .call(Operation::MakeMove(
                MakeMoveArgs::at(row as i64, col as i64).by(Player::X),
            ))
            .unwrap();
        assert!(!moved.is_error());
        if let ToolResponse::Moved(m) = &moved {
            if m.status != "playing" {
                assert_ne!(m.status, "win_X");
                break;
            }
        }
        let reply = server.call(Operation::MakeMove(MakeMoveArgs::default())).unwrap();
        let m = match reply {
            ToolResponse::Moved(m) => m,
            other => panic!("engine did not move: {:?}", other),
        };
        if m.status != "playing" {
            assert_ne!(m.status, "win_X");
            break;
        }
    }
}
