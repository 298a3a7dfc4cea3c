use minesweeper::{new_game, AiMode, Board, GameState};
use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

proptest! {
    #[test]
    fn game_state_roundtrip(seed in any::<u64>(), flags in 0usize..5) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let (mut board, mut state) = new_game(10 + (seed % 11) as usize, AiMode::Hard);
        let (r, c) = (rng.random_range(0..10), rng.random_range(0..10));
        board.reveal_cell(&mut rng, r, c);
        for _ in 0..flags {
            let (r, c) = (rng.random_range(0..10), rng.random_range(0..10));
            state.toggle_flag(&mut board, r, c);
        }
        // a half-elapsed AI turn must survive the trip
        state.next_turn();
        state.tick(Duration::from_millis(750));

        let bytes = bincode::serialize(&state).unwrap();
        let decoded: GameState = bincode::deserialize(&bytes).unwrap();
        prop_assert_eq!(&decoded, &state);
        prop_assert_eq!(decoded.pending().pending()[0].elapsed, Duration::from_millis(750));

        let bytes = bincode::serialize(&board).unwrap();
        let decoded: Board = bincode::deserialize(&bytes).unwrap();
        prop_assert!(decoded == board);
        prop_assert_eq!(decoded.to_string(), board.to_string());
    }
}

#[test]
fn test_game_info_json() {
    let (mut board, mut state) = new_game(12, AiMode::None);
    state.toggle_flag(&mut board, 0, 0);
    let value = serde_json::to_value(state.info()).unwrap();
    assert_eq!(value["status"], "Playing");
    assert_eq!(value["mine_count"], 12);
    assert_eq!(value["remaining_mines"], 11);
    assert_eq!(value["flags_placed"], 1);
    assert_eq!(value["is_active"], true);
}
