use minesweeper::{
    cli::{coord_to_string, parse_command, render, Command, HELP},
    init_logging, AiMode, AiOutcome, GameConfig, MoveOutcome, Preset, Session, DEFAULT_COLS,
    DEFAULT_MINES, DEFAULT_ROWS,
};

use clap::{Parser, Subcommand};
use log::LevelFilter;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{Duration, Instant, MissedTickBehavior};

/// Frame period of the terminal loop (60 ticks per second).
const FRAME: Duration = Duration::from_micros(16_667);

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play in the terminal, alone or taking turns with the AI.
    Play {
        #[arg(long, default_value_t = DEFAULT_MINES, help = "Mines on the classic 10x10 board (10-20)")]
        mines: usize,
        #[arg(long, value_enum, default_value_t = AiMode::None)]
        mode: AiMode,
        #[arg(long, value_enum, help = "Use a standard board size instead of 10x10")]
        preset: Option<Preset>,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    init_logging(LevelFilter::Info);
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            mines,
            mode,
            preset,
            seed,
        } => {
            let config = match preset {
                Some(p) => GameConfig::preset(p, mode),
                None => GameConfig::classic(mines, mode),
            };
            if let Some(s) = seed {
                println!("Using fixed seed: {} (game will be reproducible)", s);
            }
            let rng = if let Some(s) = seed {
                SmallRng::seed_from_u64(s)
            } else {
                let mut seed_rng = rand::rng();
                SmallRng::from_rng(&mut seed_rng)
            };
            run_terminal(Session::new(config, rng)).await?;
        }
    }
    Ok(())
}

/// Config for the next game: the classic board is re-clamped, other sizes
/// keep their dimensions when the mine count fits.
fn next_config(current: &GameConfig, mines: usize, mode: AiMode) -> GameConfig {
    if current.rows == DEFAULT_ROWS && current.cols == DEFAULT_COLS {
        GameConfig::classic(mines, mode)
    } else {
        GameConfig::custom(current.rows, current.cols, mines, mode)
            .unwrap_or(GameConfig { mode, ..*current })
    }
}

fn describe(outcome: AiOutcome) -> String {
    match outcome {
        AiOutcome::Flagged(n) => format!("AI placed {} flag(s)", n),
        AiOutcome::Revealed(pos) => format!("AI revealed {}", coord_to_string(pos)),
        AiOutcome::MineHit(pos) => format!("AI hit a mine at {}", coord_to_string(pos)),
        AiOutcome::NoMove => "AI passed".to_string(),
    }
}

async fn run_terminal(mut session: Session) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut ticker = tokio::time::interval(FRAME);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut last = Instant::now();
    let mut next_mines = session.config().mine_count;

    println!("{}\n\n{}", HELP, render(&session));
    loop {
        tokio::select! {
            now = ticker.tick() => {
                let delta = now.saturating_duration_since(last);
                last = now;
                if let Some(outcome) = session.tick(delta) {
                    println!("{}\n{}", describe(outcome), render(&session));
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                match parse_command(&line, session.board()) {
                    Ok(Command::Quit) => break,
                    Ok(Command::Help) => println!("{}", HELP),
                    Ok(Command::Show) => {}
                    Ok(Command::Reveal((r, c))) => match session.reveal(r, c) {
                        MoveOutcome::Ignored => println!("Cannot reveal {} now", coord_to_string((r, c))),
                        MoveOutcome::MineHit => println!("Boom! Press n for a new game."),
                        MoveOutcome::Won => println!("Cleared! Press n for a new game."),
                        MoveOutcome::Revealed => {}
                    },
                    Ok(Command::Flag((r, c))) => {
                        if !session.toggle_flag(r, c) {
                            println!("Cannot flag {} now", coord_to_string((r, c)));
                        }
                    }
                    Ok(Command::NewGame(mode)) => {
                        let mode = mode.unwrap_or(session.config().mode);
                        let config = next_config(session.config(), next_mines, mode);
                        session.new_game(config);
                    }
                    Ok(Command::Mines(n)) => {
                        next_mines = n;
                        let preview = next_config(session.config(), n, session.config().mode);
                        println!("Next game uses {} mines", preview.mine_count);
                        continue;
                    }
                    Err(e) => {
                        println!("{} (h for help)", e);
                        continue;
                    }
                }
                println!("{}", render(&session));
            }
        }
    }
    Ok(())
}
