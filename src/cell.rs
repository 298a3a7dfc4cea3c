//! A single grid position: mine, cover and flag state plus its neighbour count.

use core::fmt;

/// What a renderer should draw for a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellSymbol {
    Flag,
    Covered,
    Mine,
    Blank,
    Number(u8),
}

impl fmt::Display for CellSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellSymbol::Flag => write!(f, "F"),
            CellSymbol::Covered => write!(f, "."),
            CellSymbol::Mine => write!(f, "*"),
            CellSymbol::Blank => write!(f, " "),
            CellSymbol::Number(n) => write!(f, "{}", n),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    is_mine: bool,
    is_revealed: bool,
    is_flagged: bool,
    adjacent_mines: u8,
}

impl Cell {
    /// A covered, unflagged, mine-free cell.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_mine(&self) -> bool {
        self.is_mine
    }

    pub fn is_revealed(&self) -> bool {
        self.is_revealed
    }

    pub fn is_flagged(&self) -> bool {
        self.is_flagged
    }

    /// Number of mines among the up-to-8 neighbours.
    pub fn adjacent_mines(&self) -> u8 {
        self.adjacent_mines
    }

    /// Covered and not flagged.
    pub fn is_covered(&self) -> bool {
        !self.is_revealed && !self.is_flagged
    }

    pub fn set_mine(&mut self) {
        self.is_mine = true;
    }

    /// Uncover the cell. Fails on a flagged cell.
    pub fn reveal(&mut self) -> bool {
        if self.is_flagged {
            return false;
        }
        self.is_revealed = true;
        true
    }

    /// Flip the flag. Fails once the cell is revealed.
    pub fn toggle_flag(&mut self) -> bool {
        if self.is_revealed {
            return false;
        }
        self.is_flagged = !self.is_flagged;
        true
    }

    /// Values outside `0..=8` are ignored.
    pub fn set_adjacent_mines(&mut self, count: u8) {
        if count <= 8 {
            self.adjacent_mines = count;
        }
    }

    pub fn display_value(&self) -> CellSymbol {
        match (self.is_revealed, self.is_flagged) {
            (false, true) => CellSymbol::Flag,
            (false, false) => CellSymbol::Covered,
            (true, _) if self.is_mine => CellSymbol::Mine,
            (true, _) if self.adjacent_mines == 0 => CellSymbol::Blank,
            (true, _) => CellSymbol::Number(self.adjacent_mines),
        }
    }

    /// Uncover regardless of flag state; used to show mines after a loss.
    pub(crate) fn expose(&mut self) {
        self.is_revealed = true;
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_value())
    }
}
