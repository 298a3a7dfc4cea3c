use alloc::vec::Vec;
use core::fmt;
use core::time::Duration;

use crate::{
    board::Board,
    config::{AiMode, GameConfig, AI_THINK_DELAY},
    scheduler::{ScheduledAction, Scheduler, SchedulerEvent},
};

/// Current status of a game. `Won` and `Lost` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum GameStatus {
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    pub fn text(self) -> &'static str {
        match self {
            GameStatus::Playing => "Playing",
            GameStatus::Won => "Victory",
            GameStatus::Lost => "Game Over: Loss",
        }
    }
}

/// Who is acting on the shared board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayerKind {
    Human,
    Ai,
}

impl fmt::Display for PlayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerKind::Human => write!(f, "You"),
            PlayerKind::Ai => write!(f, "AI"),
        }
    }
}

/// Snapshot of the session for display or logging.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct GameInfo {
    pub status: &'static str,
    pub mine_count: usize,
    pub remaining_mines: usize,
    pub cells_revealed: usize,
    pub flags_placed: usize,
    pub first_click_made: bool,
    pub is_active: bool,
}

/// Status, turn order and flag budget for one session.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    status: GameStatus,
    mine_count: usize,
    flags_left: usize,
    players: Vec<PlayerKind>,
    turn: usize,
    ai_mode: AiMode,
    ai_thinking: f32,
    decided_by: Option<PlayerKind>,
    cells_revealed: usize,
    flags_placed: usize,
    first_click_made: bool,
    pending: Scheduler,
}

impl GameState {
    /// Fresh state: the human moves first; an AI player joins unless `mode`
    /// is `AiMode::None`.
    pub fn new(mine_count: usize, mode: AiMode) -> Self {
        let mut players = Vec::with_capacity(2);
        players.push(PlayerKind::Human);
        if mode.has_opponent() {
            players.push(PlayerKind::Ai);
        }
        Self {
            status: GameStatus::Playing,
            mine_count,
            flags_left: mine_count,
            players,
            turn: 0,
            ai_mode: mode,
            ai_thinking: 0.0,
            decided_by: None,
            cells_revealed: 0,
            flags_placed: 0,
            first_click_made: false,
            pending: Scheduler::new(),
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn status_text(&self) -> &'static str {
        self.status.text()
    }

    pub fn is_active(&self) -> bool {
        self.status == GameStatus::Playing
    }

    /// Enter a terminal state. Ignored once the game has ended.
    pub fn end_game(&mut self, won: bool, by: PlayerKind) {
        if !self.is_active() {
            return;
        }
        self.status = if won { GameStatus::Won } else { GameStatus::Lost };
        self.decided_by = Some(by);
        self.pending.clear();
        self.ai_thinking = 0.0;
        log::info!("{} by {}", self.status.text(), by);
    }

    /// Player whose move ended the game.
    pub fn decided_by(&self) -> Option<PlayerKind> {
        self.decided_by
    }

    pub fn mine_count(&self) -> usize {
        self.mine_count
    }

    pub fn flags_left(&self) -> usize {
        self.flags_left
    }

    pub fn remaining_mines(&self) -> usize {
        self.flags_left
    }

    pub fn players(&self) -> &[PlayerKind] {
        &self.players
    }

    pub fn current_player(&self) -> PlayerKind {
        self.players[self.turn]
    }

    pub fn ai_mode(&self) -> AiMode {
        self.ai_mode
    }

    /// Progress of the AI's thinking delay, `0.0..=1.0`.
    pub fn ai_thinking(&self) -> f32 {
        self.ai_thinking
    }

    pub(crate) fn set_ai_thinking(&mut self, fraction: f32) {
        self.ai_thinking = fraction;
    }

    /// Pass the turn on. Handing the turn to the AI schedules its move.
    pub fn next_turn(&mut self) {
        if !self.is_active() {
            return;
        }
        self.turn = (self.turn + 1) % self.players.len();
        if self.current_player() == PlayerKind::Ai {
            self.pending.schedule(ScheduledAction::AiMove, AI_THINK_DELAY);
        }
    }

    /// Advance delayed actions; the caller applies the returned effects.
    pub fn tick(&mut self, delta: Duration) -> Vec<SchedulerEvent> {
        self.pending.tick(delta)
    }

    pub fn pending(&self) -> &Scheduler {
        &self.pending
    }

    pub fn clear_pending(&mut self) {
        self.pending.clear();
    }

    pub fn cancel_pending(&mut self, action: ScheduledAction) {
        self.pending.cancel(action);
    }

    /// Toggle a flag while enforcing the budget: placing needs a flag left,
    /// removing always succeeds.
    pub fn toggle_flag(&mut self, board: &mut Board, row: usize, col: usize) -> bool {
        let Some(cell) = board.get_cell(row, col) else {
            return false;
        };
        if cell.is_revealed() {
            return false;
        }
        if cell.is_flagged() {
            if board.toggle_flag(row, col) {
                self.flags_left += 1;
                self.sync_statistics(board);
                return true;
            }
            return false;
        }
        if self.flags_left == 0 {
            return false;
        }
        if board.toggle_flag(row, col) {
            self.flags_left -= 1;
            self.sync_statistics(board);
            return true;
        }
        false
    }

    pub fn mark_first_click(&mut self) {
        self.first_click_made = true;
    }

    pub fn first_click_made(&self) -> bool {
        self.first_click_made
    }

    /// Copy reveal/flag counters from the board.
    pub fn sync_statistics(&mut self, board: &Board) {
        self.cells_revealed = board.revealed_count();
        self.flags_placed = board.flag_count();
    }

    pub fn cells_revealed(&self) -> usize {
        self.cells_revealed
    }

    pub fn flags_placed(&self) -> usize {
        self.flags_placed
    }

    pub fn info(&self) -> GameInfo {
        GameInfo {
            status: self.status_text(),
            mine_count: self.mine_count,
            remaining_mines: self.remaining_mines(),
            cells_revealed: self.cells_revealed,
            flags_placed: self.flags_placed,
            first_click_made: self.first_click_made,
            is_active: self.is_active(),
        }
    }

    /// Reinitialise for a new game with the same players.
    pub fn reset(&mut self, mine_count: usize) {
        *self = GameState::new(mine_count, self.ai_mode);
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "GameState(status={}, mines={}, remaining={}, revealed={}, flags={}, turn={})",
            self.status_text(),
            self.mine_count,
            self.remaining_mines(),
            self.cells_revealed,
            self.flags_placed,
            self.current_player()
        )
    }
}

/// Fresh board and state for a classic game; `mine_count` is clamped to the
/// configured range.
pub fn new_game(mine_count: usize, mode: AiMode) -> (Board, GameState) {
    new_game_with(&GameConfig::classic(mine_count, mode))
}

/// Fresh board and state from an explicit configuration.
pub fn new_game_with(config: &GameConfig) -> (Board, GameState) {
    let board = Board::from_config(config);
    let state = GameState::new(board.mine_count(), config.mode);
    (board, state)
}
