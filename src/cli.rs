//! Text front end helpers: coordinate parsing, command parsing and the status
//! line shown under the board.

#![cfg(feature = "std")]

use std::string::String;

use crate::{
    board::{column_label, Board},
    common::{GameError, Pos},
    config::AiMode,
    game::PlayerKind,
    session::Session,
};

/// A line of player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Reveal(Pos),
    Flag(Pos),
    /// New game; `None` keeps the current mode.
    NewGame(Option<AiMode>),
    /// Mine count for the next game.
    Mines(usize),
    Show,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  r B3 | B3     reveal a cell
  f B3          flag or unflag a cell
  n [mode]      new game (classic, easy, medium, hard)
  m 15          mine count for the next game
  h             this help
  q             quit";

pub fn coord_to_string(pos: Pos) -> String {
    format!("{}{}", column_label(pos.1), pos.0 + 1)
}

/// Parse `B3` style coordinates: column letter then 1-based row.
/// Letters are case-insensitive on boards up to 26 columns wide.
pub fn parse_coord(input: &str, board: &Board) -> Result<Pos, GameError> {
    let input = input.trim();
    let mut chars = input.chars();
    let col_ch = chars.next().ok_or(GameError::InvalidCoordinate)?;
    let col_ch = if board.cols() <= 26 {
        col_ch.to_ascii_uppercase()
    } else {
        col_ch
    };
    let col = match col_ch {
        'A'..='Z' => col_ch as usize - 'A' as usize,
        'a'..='z' => col_ch as usize - 'a' as usize + 26,
        _ => return Err(GameError::InvalidCoordinate),
    };
    let row: usize = chars
        .as_str()
        .parse()
        .map_err(|_| GameError::InvalidCoordinate)?;
    if row == 0 {
        return Err(GameError::InvalidCoordinate);
    }
    let (row, col) = (row - 1, col);
    if !board.in_bounds(row, col) {
        return Err(GameError::OutOfBounds { row, col });
    }
    Ok((row, col))
}

pub fn parse_command(line: &str, board: &Board) -> Result<Command, GameError> {
    let mut parts = line.split_whitespace();
    let Some(head) = parts.next() else {
        return Ok(Command::Show);
    };
    let arg = parts.next();
    if parts.next().is_some() {
        return Err(GameError::UnknownCommand);
    }
    match (head.to_ascii_lowercase().as_str(), arg) {
        ("r" | "reveal", Some(pos)) => parse_coord(pos, board).map(Command::Reveal),
        ("f" | "flag", Some(pos)) => parse_coord(pos, board).map(Command::Flag),
        ("n" | "new", None) => Ok(Command::NewGame(None)),
        ("n" | "new", Some(mode)) => mode.parse().map(|m| Command::NewGame(Some(m))),
        ("m" | "mines", Some(n)) => n
            .parse()
            .map(Command::Mines)
            .map_err(|_| GameError::UnknownCommand),
        ("h" | "help" | "?", None) => Ok(Command::Help),
        ("q" | "quit" | "exit", None) => Ok(Command::Quit),
        (_, None) => parse_coord(head, board)
            .map(Command::Reveal)
            .map_err(|_| GameError::UnknownCommand),
        _ => Err(GameError::UnknownCommand),
    }
}

/// One-line summary under the board: status, turn, flags and AI progress.
pub fn status_line(session: &Session) -> String {
    let state = session.state();
    let mut line = format!(
        "{} | mines {} | flags left {}",
        state.status_text(),
        state.mine_count(),
        state.flags_left()
    );
    if state.is_active() {
        line.push_str(&format!(" | turn: {}", state.current_player()));
        if state.current_player() == PlayerKind::Ai {
            const WIDTH: usize = 10;
            let filled = (session.ai_thinking() * WIDTH as f32).round() as usize;
            line.push_str(&format!(
                " [{}{}]",
                "#".repeat(filled.min(WIDTH)),
                "-".repeat(WIDTH - filled.min(WIDTH))
            ));
        }
    } else if let Some(by) = state.decided_by() {
        line.push_str(&format!(" | decided by {}", by));
    }
    line
}

/// Board followed by the status line.
pub fn render(session: &Session) -> String {
    format!("{}\n{}", session.board(), status_line(session))
}
