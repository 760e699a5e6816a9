//! Interactive terminal game against the engine.

use anyhow::{Context, Result};
use serde_json::Value;
use std::io::{BufRead, Write};
use strictly_tictactoe::{GameSession, GameStatus, MakeMoveArgs, Operation, ToolResponse};
use tracing::{debug, info, instrument};

/// Runs a game on `input`/`output` until it ends, the human quits, or input closes.
///
/// The human types `row col` (or `row,col`); `q` quits.
#[instrument(skip_all, fields(human = %session.human(), difficulty = %session.difficulty()))]
pub fn run<R: BufRead, W: Write>(
    session: &mut GameSession,
    input: R,
    mut output: W,
) -> Result<GameStatus> {
    info!("Starting terminal game");
    writeln!(
        output,
        "You are '{}'. Enter moves as `row col` (0..2), or `q` to quit.",
        session.human()
    )?;

    let mut lines = input.lines();
    loop {
        if session.status().is_terminal() {
            let response = session.dispatch(Operation::PrintBoard);
            print_response(&mut output, &response)?;
            writeln!(output, "Game over: {}", describe(session.status(), session))?;
            return Ok(session.status());
        }

        if session.to_move() == session.automated() {
            let response = session.dispatch(Operation::MakeMove(MakeMoveArgs::default()));
            if let ToolResponse::Moved(moved) = &response {
                writeln!(
                    output,
                    "Engine plays ({}, {})",
                    moved.last_move.row, moved.last_move.col
                )?;
            }
            continue;
        }

        let prompt = session.dispatch(Operation::AskUserMove);
        print_response(&mut output, &prompt)?;
        write!(output, "> ")?;
        output.flush().context("Failed to flush output")?;

        let Some(line) = lines.next() else {
            debug!("Input closed");
            writeln!(output)?;
            return Ok(session.status());
        };
        let line = line.context("Failed to read move")?;
        let line = line.trim();

        if line.eq_ignore_ascii_case("q") || line.eq_ignore_ascii_case("quit") {
            info!("Player quit");
            writeln!(output, "Bye.")?;
            return Ok(session.status());
        }

        let Some(args) = parse_move(line, session) else {
            writeln!(output, "Enter row and col, e.g. `1 2`.")?;
            continue;
        };

        let response = session.dispatch(Operation::MakeMove(args));
        if let ToolResponse::Error(err) = &response {
            match &err.reason {
                Some(reason) => writeln!(output, "{} ({})", err.error, reason)?,
                None => writeln!(output, "{}", err.error)?,
            }
        }
    }
}

/// Splits a `row col` line into move arguments for the human player.
///
/// Tokens are passed through as strings so that non-numeric input comes back
/// as an ordinary invalid-move response.
fn parse_move(line: &str, session: &GameSession) -> Option<MakeMoveArgs> {
    let tokens: Vec<&str> = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .collect();
    match tokens.as_slice() {
        [row, col] => Some(MakeMoveArgs {
            row: Some(Value::from(*row)),
            col: Some(Value::from(*col)),
            player: None,
        }
        .by(session.human())),
        _ => None,
    }
}

fn describe(status: GameStatus, session: &GameSession) -> String {
    match status.winner() {
        Some(winner) if winner == session.human() => "you win!".to_string(),
        Some(_) => "the engine wins.".to_string(),
        None => "draw.".to_string(),
    }
}

fn print_response<W: Write>(output: &mut W, response: &ToolResponse) -> Result<()> {
    match response {
        ToolResponse::Board(view) => write!(output, "{}", view.board)?,
        ToolResponse::Prompt(prompt) => {
            write!(output, "{}", prompt.board)?;
            writeln!(output, "{}", prompt.message)?;
        }
        ToolResponse::Moved(moved) => write!(output, "{}", moved.board)?,
        ToolResponse::Error(err) => writeln!(output, "{}", err.error)?,
    }
    Ok(())
}
