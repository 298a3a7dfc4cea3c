//! Session controller: owns one game's board, state, opponent and RNG, and
//! sequences human actions, the AI's delayed turn and the win/loss transition.

use core::time::Duration;
use rand::{rngs::SmallRng, SeedableRng};

use crate::{
    ai::AiOutcome,
    board::Board,
    config::{AiMode, GameConfig},
    game::{new_game_with, GameState, PlayerKind},
    player::AiPlayer,
    scheduler::{ScheduledAction, SchedulerEvent},
};

/// Result of a human action routed through the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Nothing changed: game over, not the human's turn, or an invalid target.
    Ignored,
    /// Cells were revealed and play continues.
    Revealed,
    /// A mine was revealed; the game is lost.
    MineHit,
    /// The last safe cell was revealed; the game is won.
    Won,
}

#[derive(Debug)]
pub struct Session {
    config: GameConfig,
    board: Board,
    state: GameState,
    ai: AiPlayer,
    rng: SmallRng,
}

impl Session {
    pub fn new(config: GameConfig, rng: SmallRng) -> Self {
        let (board, state) = new_game_with(&config);
        Self {
            config,
            board,
            state,
            ai: AiPlayer::new(config.mode),
            rng,
        }
    }

    /// Reproducible session.
    pub fn seeded(config: GameConfig, seed: u64) -> Self {
        Self::new(config, SmallRng::seed_from_u64(seed))
    }

    /// Session around a prepared board, e.g. one built with
    /// [`Board::with_mines`].
    pub fn from_board(board: Board, mode: AiMode, rng: SmallRng) -> Self {
        let config = GameConfig {
            rows: board.rows(),
            cols: board.cols(),
            mine_count: board.mine_count(),
            mode,
        };
        let state = GameState::new(board.mine_count(), mode);
        Self {
            config,
            board,
            state,
            ai: AiPlayer::new(mode),
            rng,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn ai(&self) -> &AiPlayer {
        &self.ai
    }

    fn accepts_human_input(&self) -> bool {
        self.state.is_active() && self.state.current_player() == PlayerKind::Human
    }

    /// Human reveal. Consumes the human's turn only if something changed.
    pub fn reveal(&mut self, row: usize, col: usize) -> MoveOutcome {
        if !self.accepts_human_input() {
            return MoveOutcome::Ignored;
        }
        let before = self.board.revealed_count();
        let hit = self.board.reveal_cell(&mut self.rng, row, col);
        if !hit && self.board.revealed_count() == before {
            return MoveOutcome::Ignored;
        }
        log::debug!("You revealed ({}, {})", row, col);
        self.finish_move(PlayerKind::Human, hit)
    }

    /// Human flag toggle, subject to the flag budget. Does not pass the turn.
    pub fn toggle_flag(&mut self, row: usize, col: usize) -> bool {
        if !self.accepts_human_input() {
            return false;
        }
        self.state.toggle_flag(&mut self.board, row, col)
    }

    /// Apply the end-of-move transition for `by`: loss on a mine, win once
    /// every safe cell is open, otherwise hand over the turn.
    fn finish_move(&mut self, by: PlayerKind, mine_hit: bool) -> MoveOutcome {
        self.state.sync_statistics(&self.board);
        if self.board.revealed_count() > 0 {
            self.state.mark_first_click();
        }
        if mine_hit {
            self.board.reveal_all_mines();
            self.state.end_game(false, by);
            MoveOutcome::MineHit
        } else if self.board.is_game_won() {
            self.state.end_game(true, by);
            MoveOutcome::Won
        } else {
            self.state.next_turn();
            MoveOutcome::Revealed
        }
    }

    /// Let the AI play its turn now, dropping its scheduled move. Does nothing
    /// unless it is the AI's turn.
    pub fn ai_move(&mut self) -> AiOutcome {
        if !self.state.is_active() || self.state.current_player() != PlayerKind::Ai {
            return AiOutcome::NoMove;
        }
        self.state.cancel_pending(ScheduledAction::AiMove);
        let outcome = self
            .ai
            .take_turn(&mut self.rng, &mut self.board, &mut self.state);
        self.state.set_ai_thinking(0.0);
        match outcome {
            AiOutcome::MineHit(_) => {
                self.finish_move(PlayerKind::Ai, true);
            }
            AiOutcome::NoMove => self.state.next_turn(),
            AiOutcome::Flagged(_) | AiOutcome::Revealed(_) => {
                self.finish_move(PlayerKind::Ai, false);
            }
        }
        outcome
    }

    /// Advance timers by `delta`. Returns the AI's action if its delayed turn
    /// fired during this tick.
    pub fn tick(&mut self, delta: Duration) -> Option<AiOutcome> {
        let mut played = None;
        for event in self.state.tick(delta) {
            match event {
                SchedulerEvent::Progress {
                    action: ScheduledAction::AiMove,
                    fraction,
                } => self.state.set_ai_thinking(fraction),
                SchedulerEvent::Fire(ScheduledAction::AiMove) => {
                    played = Some(self.ai_move());
                }
            }
        }
        played
    }

    /// Thinking-indicator progress for the renderer.
    pub fn ai_thinking(&self) -> f32 {
        self.state.ai_thinking()
    }

    /// Start over with a new configuration. Pending AI turns are dropped
    /// first so they cannot fire against the new board.
    pub fn new_game(&mut self, config: GameConfig) {
        self.state.clear_pending();
        let (board, state) = new_game_with(&config);
        self.config = config;
        self.board = board;
        self.state = state;
        self.ai = AiPlayer::new(config.mode);
        log::info!(
            "New {}x{} game, {} mines, mode {}",
            config.rows,
            config.cols,
            self.board.mine_count(),
            config.mode.name()
        );
    }

    /// Start over with the current configuration.
    pub fn restart(&mut self) {
        self.new_game(self.config);
    }
}
