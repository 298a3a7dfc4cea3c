use core::str::FromStr;
use core::time::Duration;

use crate::common::GameError;

pub const DEFAULT_ROWS: usize = 10;
pub const DEFAULT_COLS: usize = 10;
pub const MIN_MINES: usize = 10;
pub const MAX_MINES: usize = 20;
pub const DEFAULT_MINES: usize = MIN_MINES;

/// Largest possible safe zone: the first click plus its eight neighbours.
pub const SAFE_ZONE_CELLS: usize = 9;

/// How long the AI "thinks" before acting on its turn.
pub const AI_THINK_DELAY: Duration = Duration::from_secs(2);

/// Difficulty of the computer opponent. `None` is a single-player game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize, clap::ValueEnum))]
pub enum AiMode {
    #[default]
    #[cfg_attr(feature = "std", value(alias = "classic"))]
    None,
    Easy,
    Medium,
    Hard,
}

impl AiMode {
    /// Whether an AI player takes turns in this mode.
    pub fn has_opponent(self) -> bool {
        !matches!(self, AiMode::None)
    }

    pub fn name(self) -> &'static str {
        match self {
            AiMode::None => "classic",
            AiMode::Easy => "easy",
            AiMode::Medium => "medium",
            AiMode::Hard => "hard",
        }
    }
}

impl FromStr for AiMode {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            m if m.eq_ignore_ascii_case("none") || m.eq_ignore_ascii_case("classic") => {
                Ok(AiMode::None)
            }
            m if m.eq_ignore_ascii_case("easy") => Ok(AiMode::Easy),
            m if m.eq_ignore_ascii_case("medium") => Ok(AiMode::Medium),
            m if m.eq_ignore_ascii_case("hard") => Ok(AiMode::Hard),
            _ => Err(GameError::UnknownCommand),
        }
    }
}

/// Standard board sizes outside the classic 10×10 game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(clap::ValueEnum))]
pub enum Preset {
    Beginner,
    Intermediate,
    Expert,
}

impl Preset {
    /// `(rows, cols, mines)` for the preset.
    pub const fn dimensions(self) -> (usize, usize, usize) {
        match self {
            Preset::Beginner => (9, 9, 10),
            Preset::Intermediate => (16, 16, 40),
            Preset::Expert => (16, 30, 99),
        }
    }
}

/// Session parameters, validated before a board is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub rows: usize,
    pub cols: usize,
    pub mine_count: usize,
    pub mode: AiMode,
}

impl GameConfig {
    /// Classic 10×10 game; `mine_count` is clamped into `MIN_MINES..=MAX_MINES`.
    pub fn classic(mine_count: usize, mode: AiMode) -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            mine_count: mine_count.clamp(MIN_MINES, MAX_MINES),
            mode,
        }
    }

    /// Arbitrary grid. Fails if the grid is empty or the mines would not leave
    /// room for a full safe zone.
    pub fn custom(
        rows: usize,
        cols: usize,
        mine_count: usize,
        mode: AiMode,
    ) -> Result<Self, GameError> {
        if rows == 0 || cols == 0 {
            return Err(GameError::InvalidDimensions { rows, cols });
        }
        let capacity = mine_capacity(rows, cols);
        if mine_count > capacity {
            return Err(GameError::TooManyMines {
                requested: mine_count,
                capacity,
            });
        }
        Ok(Self {
            rows,
            cols,
            mine_count,
            mode,
        })
    }

    pub fn preset(preset: Preset, mode: AiMode) -> Self {
        let (rows, cols, mine_count) = preset.dimensions();
        Self {
            rows,
            cols,
            mine_count,
            mode,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::classic(DEFAULT_MINES, AiMode::None)
    }
}

/// Maximum number of mines that can always be placed outside any safe zone.
pub fn mine_capacity(rows: usize, cols: usize) -> usize {
    (rows * cols).saturating_sub(SAFE_ZONE_CELLS)
}
