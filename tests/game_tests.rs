use minesweeper::{
    new_game, new_game_with, AiMode, Board, GameConfig, GameError, GameState, GameStatus,
    PlayerKind, Preset, ScheduledAction, AI_THINK_DELAY, MAX_MINES, MIN_MINES,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[test]
fn test_new_game_clamps_mine_count() {
    let (board, state) = new_game(5, AiMode::None);
    assert_eq!(board.mine_count(), MIN_MINES);
    assert_eq!(state.mine_count(), MIN_MINES);
    assert_eq!((board.rows(), board.cols()), (10, 10));

    let (board, state) = new_game(50, AiMode::Hard);
    assert_eq!(board.mine_count(), MAX_MINES);
    assert_eq!(state.flags_left(), MAX_MINES);
    assert_eq!(state.players(), &[PlayerKind::Human, PlayerKind::Ai]);
}

#[test]
fn test_custom_config_validation() {
    assert!(GameConfig::custom(5, 5, 16, AiMode::None).is_ok());
    assert_eq!(
        GameConfig::custom(5, 5, 17, AiMode::None).unwrap_err(),
        GameError::TooManyMines {
            requested: 17,
            capacity: 16
        }
    );
    assert_eq!(
        GameConfig::custom(0, 5, 1, AiMode::None).unwrap_err(),
        GameError::InvalidDimensions { rows: 0, cols: 5 }
    );

    let (board, _) = new_game_with(&GameConfig::preset(Preset::Expert, AiMode::Easy));
    assert_eq!((board.rows(), board.cols(), board.mine_count()), (16, 30, 99));
}

#[test]
fn test_ai_mode_parsing() {
    assert_eq!("classic".parse::<AiMode>().unwrap(), AiMode::None);
    assert_eq!("Hard".parse::<AiMode>().unwrap(), AiMode::Hard);
    assert_eq!(" easy ".parse::<AiMode>().unwrap(), AiMode::Easy);
    assert!("expert".parse::<AiMode>().is_err());
    assert!(!AiMode::None.has_opponent());
    assert!(AiMode::Medium.has_opponent());
}

#[test]
fn test_initial_state() {
    let state = GameState::new(10, AiMode::None);
    assert_eq!(state.status(), GameStatus::Playing);
    assert_eq!(state.status_text(), "Playing");
    assert!(state.is_active());
    assert_eq!(state.flags_left(), 10);
    assert_eq!(state.remaining_mines(), 10);
    assert_eq!(state.players(), &[PlayerKind::Human]);
    assert_eq!(state.current_player(), PlayerKind::Human);
    assert_eq!(state.decided_by(), None);
    assert!(state.pending().is_empty());
}

#[test]
fn test_flag_budget_roundtrip() {
    let (mut board, mut state) = new_game(10, AiMode::None);
    assert!(state.toggle_flag(&mut board, 0, 0));
    assert!(board.get_cell(0, 0).unwrap().is_flagged());
    assert_eq!(state.flags_left(), 9);
    assert_eq!(state.flags_placed(), 1);

    assert!(state.toggle_flag(&mut board, 0, 0));
    assert!(!board.get_cell(0, 0).unwrap().is_flagged());
    assert_eq!(state.flags_left(), 10);
    assert_eq!(state.flags_placed(), 0);
}

#[test]
fn test_flag_budget_exhausted() {
    let mut board = Board::with_mines(3, 3, &[(1, 1)]).unwrap();
    let mut state = GameState::new(board.mine_count(), AiMode::None);
    assert!(state.toggle_flag(&mut board, 0, 0));
    assert_eq!(state.flags_left(), 0);

    assert!(!state.toggle_flag(&mut board, 0, 1));
    assert!(!board.get_cell(0, 1).unwrap().is_flagged());

    // removing a flag is always allowed
    assert!(state.toggle_flag(&mut board, 0, 0));
    assert_eq!(state.flags_left(), 1);
}

#[test]
fn test_flag_rejected_on_revealed_or_outside() {
    let mut board = Board::with_mines(3, 3, &[(1, 1)]).unwrap();
    let mut state = GameState::new(1, AiMode::None);
    board.reveal_cell(&mut SmallRng::seed_from_u64(1), 0, 0);
    assert!(!state.toggle_flag(&mut board, 0, 0));
    assert!(!state.toggle_flag(&mut board, 3, 3));
    assert_eq!(state.flags_left(), 1);
}

#[test]
fn test_end_game_is_final() {
    let mut state = GameState::new(10, AiMode::Easy);
    state.end_game(true, PlayerKind::Human);
    assert_eq!(state.status(), GameStatus::Won);
    assert_eq!(state.status_text(), "Victory");
    assert_eq!(state.decided_by(), Some(PlayerKind::Human));

    state.end_game(false, PlayerKind::Ai);
    assert_eq!(state.status(), GameStatus::Won);
    assert_eq!(state.decided_by(), Some(PlayerKind::Human));

    state.next_turn();
    assert_eq!(state.current_player(), PlayerKind::Human);
    assert!(state.pending().is_empty());

    let mut lost = GameState::new(10, AiMode::None);
    lost.end_game(false, PlayerKind::Human);
    assert_eq!(lost.status_text(), "Game Over: Loss");
    assert!(!lost.info().is_active);
}

#[test]
fn test_turn_handover_schedules_ai() {
    let mut state = GameState::new(10, AiMode::Medium);
    state.next_turn();
    assert_eq!(state.current_player(), PlayerKind::Ai);
    let pending = state.pending().pending();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].action, ScheduledAction::AiMove);
    assert_eq!(pending[0].delay, AI_THINK_DELAY);

    state.next_turn();
    assert_eq!(state.current_player(), PlayerKind::Human);
    assert_eq!(state.pending().len(), 1);
}

#[test]
fn test_single_player_keeps_turn() {
    let mut state = GameState::new(10, AiMode::None);
    state.next_turn();
    state.next_turn();
    assert_eq!(state.current_player(), PlayerKind::Human);
    assert!(state.pending().is_empty());
}

#[test]
fn test_end_game_drops_pending_ai_move() {
    let mut state = GameState::new(10, AiMode::Hard);
    state.next_turn();
    assert_eq!(state.pending().len(), 1);
    state.end_game(false, PlayerKind::Human);
    assert!(state.pending().is_empty());
    assert!(state.tick(AI_THINK_DELAY * 2).is_empty());
}

#[test]
fn test_one_mine_board_won_one_reveal_at_a_time() {
    let mut rng = SmallRng::seed_from_u64(3);
    let mut board = Board::with_mines(3, 3, &[(1, 1)]).unwrap();
    let mut state = GameState::new(1, AiMode::None);
    let cells: Vec<_> = board.neighbors(1, 1).collect();
    for (r, c) in cells {
        assert!(state.is_active());
        assert!(!board.reveal_cell(&mut rng, r, c));
        state.sync_statistics(&board);
        if board.is_game_won() {
            state.end_game(true, PlayerKind::Human);
        }
    }
    assert_eq!(state.status(), GameStatus::Won);
    assert_eq!(state.cells_revealed(), 8);
}

#[test]
fn test_info_and_reset() {
    let (mut board, mut state) = new_game(12, AiMode::Easy);
    state.toggle_flag(&mut board, 4, 4);
    state.mark_first_click();
    let info = state.info();
    assert_eq!(info.status, "Playing");
    assert_eq!(info.mine_count, 12);
    assert_eq!(info.remaining_mines, 11);
    assert_eq!(info.flags_placed, 1);
    assert!(info.first_click_made);
    assert!(info.is_active);

    state.end_game(true, PlayerKind::Human);
    state.reset(15);
    assert!(state.is_active());
    assert_eq!(state.flags_left(), 15);
    assert_eq!(state.ai_mode(), AiMode::Easy);
    assert!(!state.first_click_made());
    assert_eq!(state.decided_by(), None);
}
