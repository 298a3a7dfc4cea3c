//! Common types for Minesweeper: grid coordinates and configuration errors.

/// Grid coordinate as `(row, col)`.
pub type Pos = (usize, usize);

/// Errors returned when building a board or parsing player input.
///
/// Gameplay itself never fails with an error: invalid moves are no-ops that
/// report `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    /// Grid must have at least one row and one column.
    InvalidDimensions { rows: usize, cols: usize },
    /// Mine count leaves no room for the first-click safe zone.
    TooManyMines { requested: usize, capacity: usize },
    /// Coordinate outside the grid.
    OutOfBounds { row: usize, col: usize },
    /// Coordinate text could not be parsed.
    InvalidCoordinate,
    /// Command text could not be parsed.
    UnknownCommand,
}

impl core::fmt::Display for GameError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            GameError::InvalidDimensions { rows, cols } => {
                write!(f, "Invalid board dimensions: {}x{}", rows, cols)
            }
            GameError::TooManyMines {
                requested,
                capacity,
            } => write!(
                f,
                "Too many mines: requested {} but the board fits at most {}",
                requested, capacity
            ),
            GameError::OutOfBounds { row, col } => {
                write!(f, "Coordinate out of bounds: row={}, col={}", row, col)
            }
            GameError::InvalidCoordinate => write!(f, "Coordinate could not be parsed"),
            GameError::UnknownCommand => write!(f, "Unknown command"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for GameError {}
