//! Seeded self-play: a stand-in human takes turns against the AI on one
//! board and the result is printed as JSON.

use clap::Parser;
use minesweeper::{
    known_mines, AiMode, GameConfig, MoveOutcome, PlayerKind, Session, DEFAULT_MINES,
};
use rand::{rngs::SmallRng, Rng, SeedableRng};
use serde_json::json;
use std::time::Duration;

const FRAME: Duration = Duration::from_millis(100);
const MAX_TURNS: usize = 10_000;
const MAX_TICKS_PER_TURN: usize = 100;

#[derive(Parser)]
#[command(about = "Simulate a game between a guessing player and the AI")]
struct Args {
    seed: u64,
    #[arg(long, value_enum, default_value_t = AiMode::Hard)]
    mode: AiMode,
    #[arg(long, default_value_t = DEFAULT_MINES)]
    mines: usize,
}

fn main() -> anyhow::Result<()> {
    minesweeper::init_logging(log::LevelFilter::Warn);
    let args = Args::parse();
    let mut session = Session::seeded(GameConfig::classic(args.mines, args.mode), args.seed);
    let mut guesser = SmallRng::seed_from_u64(args.seed.wrapping_add(1));

    let mut turns = 0;
    while session.state().is_active() && turns < MAX_TURNS {
        turns += 1;
        match session.state().current_player() {
            PlayerKind::Human => {
                let board = session.board();
                let (r, c) = if !board.first_click_made() {
                    (board.rows() / 2, board.cols() / 2)
                } else {
                    let mines = known_mines(board);
                    let mut options = board.covered_cells();
                    options.retain(|pos| !mines.contains(pos));
                    if options.is_empty() {
                        options = board.covered_cells();
                    }
                    if options.is_empty() {
                        break;
                    }
                    options[guesser.random_range(0..options.len())]
                };
                if session.reveal(r, c) == MoveOutcome::Ignored {
                    break;
                }
            }
            PlayerKind::Ai => {
                // let the delayed turn fire through the scheduler
                let fired = (0..MAX_TICKS_PER_TURN).any(|_| session.tick(FRAME).is_some());
                if !fired {
                    break;
                }
            }
        }
    }

    let state = session.state();
    let result = json!({
        "seed": args.seed,
        "mode": args.mode.name(),
        "turns": turns,
        "decided_by": state.decided_by(),
        "game": state.info(),
    });
    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
