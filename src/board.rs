//! Game board: the cell grid, deferred mine placement, flood-fill reveal and
//! win detection.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;
use rand::Rng;

use crate::cell::Cell;
use crate::common::{GameError, Pos};
use crate::config::GameConfig;

const DISPLACEMENTS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// In-bounds neighbours of a coordinate, clipped to the grid.
#[derive(Debug, Clone)]
pub struct Neighbors {
    center: Pos,
    rows: usize,
    cols: usize,
    index: usize,
}

impl Iterator for Neighbors {
    type Item = Pos;

    fn next(&mut self) -> Option<Self::Item> {
        while self.index < DISPLACEMENTS.len() {
            let (dr, dc) = DISPLACEMENTS[self.index];
            self.index += 1;
            let (Some(r), Some(c)) = (
                self.center.0.checked_add_signed(dr),
                self.center.1.checked_add_signed(dc),
            ) else {
                continue;
            };
            if r < self.rows && c < self.cols {
                return Some((r, c));
            }
        }
        None
    }
}

/// Column label used by the text dump and the terminal front end:
/// `A..Z` then `a..z`.
pub fn column_label(col: usize) -> char {
    match col {
        0..=25 => (b'A' + col as u8) as char,
        26..=51 => (b'a' + (col - 26) as u8) as char,
        _ => '?',
    }
}

#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Board {
    rows: usize,
    cols: usize,
    mine_count: usize,
    grid: Vec<Cell>,
    first_click_made: bool,
    revealed_count: usize,
}

impl Board {
    /// Create a covered board. Mines are placed on the first reveal.
    ///
    /// Dimensions are raised to at least 1×1 and `mine_count` is capped so
    /// that at least one cell stays safe.
    pub fn new(rows: usize, cols: usize, mine_count: usize) -> Self {
        let (rows, cols) = (rows.max(1), cols.max(1));
        let cap = rows * cols - 1;
        if mine_count > cap {
            log::warn!(
                "Requested {} mines but a {}x{} board fits {}, clamping",
                mine_count,
                rows,
                cols,
                cap
            );
        }
        Board {
            rows,
            cols,
            mine_count: mine_count.min(cap),
            grid: vec![Cell::new(); rows * cols],
            first_click_made: false,
            revealed_count: 0,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.rows, config.cols, config.mine_count)
    }

    /// Build a board with mines at fixed positions. Placement counts as done,
    /// so the first reveal does not move them.
    pub fn with_mines(rows: usize, cols: usize, mines: &[Pos]) -> Result<Self, GameError> {
        if rows == 0 || cols == 0 {
            return Err(GameError::InvalidDimensions { rows, cols });
        }
        let mut board = Board::new(rows, cols, 0);
        for &(r, c) in mines {
            if !board.in_bounds(r, c) {
                return Err(GameError::OutOfBounds { row: r, col: c });
            }
            let idx = board.index(r, c);
            if !board.grid[idx].is_mine() {
                board.grid[idx].set_mine();
                board.mine_count += 1;
            }
        }
        if board.mine_count == rows * cols {
            return Err(GameError::TooManyMines {
                requested: board.mine_count,
                capacity: rows * cols - 1,
            });
        }
        board.first_click_made = true;
        board.calculate_adjacent_mines();
        Ok(board)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn mine_count(&self) -> usize {
        self.mine_count
    }

    pub fn first_click_made(&self) -> bool {
        self.first_click_made
    }

    pub fn revealed_count(&self) -> usize {
        self.revealed_count
    }

    pub fn total_safe_cells(&self) -> usize {
        self.rows * self.cols - self.mine_count
    }

    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    pub fn neighbors(&self, row: usize, col: usize) -> Neighbors {
        Neighbors {
            center: (row, col),
            rows: self.rows,
            cols: self.cols,
            index: 0,
        }
    }

    /// Scatter mines by rejection sampling, avoiding `(safe_row, safe_col)` and
    /// its neighbours, then compute neighbour counts. Mines are placed once per
    /// board; later calls do nothing.
    pub fn place_mines<R: Rng + ?Sized>(&mut self, rng: &mut R, safe_row: usize, safe_col: usize) {
        if self.first_click_made {
            log::debug!(
                "Mines already placed, ignoring placement at ({}, {})",
                safe_row,
                safe_col
            );
            return;
        }
        let mut safe_zone: Vec<Pos> = self.neighbors(safe_row, safe_col).collect();
        safe_zone.push((safe_row, safe_col));

        let available = self.rows * self.cols - safe_zone.len();
        if self.mine_count > available {
            log::warn!(
                "Safe zone around ({}, {}) leaves room for {} mines, {} requested",
                safe_row,
                safe_col,
                available,
                self.mine_count
            );
            self.mine_count = available;
        }

        let mut placed = 0;
        while placed < self.mine_count {
            let r = rng.random_range(0..self.rows);
            let c = rng.random_range(0..self.cols);
            let idx = self.index(r, c);
            if safe_zone.contains(&(r, c)) || self.grid[idx].is_mine() {
                continue;
            }
            self.grid[idx].set_mine();
            placed += 1;
        }
        self.first_click_made = true;
        self.calculate_adjacent_mines();
        log::debug!(
            "Placed {} mines, safe zone around ({}, {})",
            placed,
            safe_row,
            safe_col
        );
    }

    fn calculate_adjacent_mines(&mut self) {
        for r in 0..self.rows {
            for c in 0..self.cols {
                let count = self
                    .neighbors(r, c)
                    .filter(|&(nr, nc)| self.grid[self.index(nr, nc)].is_mine())
                    .count();
                let idx = self.index(r, c);
                self.grid[idx].set_adjacent_mines(count as u8);
            }
        }
    }

    /// Reveal a cell, placing mines first if this is the opening move.
    /// Returns `true` only when a mine was uncovered.
    pub fn reveal_cell<R: Rng + ?Sized>(&mut self, rng: &mut R, row: usize, col: usize) -> bool {
        if !self.in_bounds(row, col) {
            return false;
        }
        if !self.first_click_made {
            self.place_mines(rng, row, col);
        }
        let idx = self.index(row, col);
        let cell = &mut self.grid[idx];
        if cell.is_flagged() || cell.is_revealed() {
            return false;
        }
        cell.reveal();
        self.revealed_count += 1;
        if cell.is_mine() {
            return true;
        }
        if cell.adjacent_mines() == 0 {
            self.flood_fill(row, col);
        }
        false
    }

    /// Open the zero-region connected to `(row, col)` and its numbered border.
    /// Flagged cells stop the fill.
    fn flood_fill(&mut self, row: usize, col: usize) {
        let mut visited = vec![false; self.grid.len()];
        visited[self.index(row, col)] = true;
        let mut stack = vec![(row, col)];
        let mut opened = 0usize;

        while let Some((r, c)) = stack.pop() {
            for (nr, nc) in self.neighbors(r, c) {
                let idx = self.index(nr, nc);
                if visited[idx] {
                    continue;
                }
                visited[idx] = true;
                let cell = &mut self.grid[idx];
                if cell.is_revealed() || cell.is_flagged() || cell.is_mine() {
                    continue;
                }
                cell.reveal();
                self.revealed_count += 1;
                opened += 1;
                if cell.adjacent_mines() == 0 {
                    stack.push((nr, nc));
                }
            }
        }
        log::trace!("Flood fill from ({}, {}) opened {} cells", row, col, opened);
    }

    /// Flip the flag on a covered cell. No flag budget is enforced here.
    pub fn toggle_flag(&mut self, row: usize, col: usize) -> bool {
        if !self.in_bounds(row, col) {
            return false;
        }
        let idx = self.index(row, col);
        self.grid[idx].toggle_flag()
    }

    pub fn is_game_won(&self) -> bool {
        self.revealed_count == self.total_safe_cells()
    }

    /// Uncover every mine for the end-of-game view. `revealed_count` is not
    /// affected.
    pub fn reveal_all_mines(&mut self) {
        for cell in self.grid.iter_mut().filter(|c| c.is_mine()) {
            cell.expose();
        }
    }

    pub fn get_cell(&self, row: usize, col: usize) -> Option<&Cell> {
        if self.in_bounds(row, col) {
            Some(&self.grid[self.index(row, col)])
        } else {
            None
        }
    }

    /// All cells with their coordinates, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (Pos, &Cell)> + '_ {
        self.grid
            .iter()
            .enumerate()
            .map(move |(i, cell)| ((i / self.cols, i % self.cols), cell))
    }

    /// Unrevealed, unflagged cells.
    pub fn covered_cells(&self) -> Vec<Pos> {
        self.cells()
            .filter(|(_, cell)| cell.is_covered())
            .map(|(pos, _)| pos)
            .collect()
    }

    /// Unrevealed neighbours of `(row, col)`, flagged ones included.
    pub fn hidden_neighbors(&self, row: usize, col: usize) -> Vec<Pos> {
        if !self.in_bounds(row, col) {
            return Vec::new();
        }
        self.neighbors(row, col)
            .filter(|&(r, c)| !self.grid[self.index(r, c)].is_revealed())
            .collect()
    }

    pub fn flag_count(&self) -> usize {
        self.grid.iter().filter(|c| c.is_flagged()).count()
    }

    /// Mines minus placed flags; negative when over-flagged.
    pub fn remaining_mines(&self) -> isize {
        self.mine_count as isize - self.flag_count() as isize
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   ")?;
        for c in 0..self.cols {
            write!(f, " {}", column_label(c))?;
        }
        writeln!(f)?;
        for r in 0..self.rows {
            write!(f, "{:2} ", r + 1)?;
            for c in 0..self.cols {
                write!(f, " {}", self.grid[self.index(r, c)])?;
            }
            if r + 1 < self.rows {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Board {{ {}x{}, mines: {}, revealed: {}/{}, first_click_made: {} }}",
            self.rows,
            self.cols,
            self.mine_count,
            self.revealed_count,
            self.total_safe_cells(),
            self.first_click_made
        )?;
        for r in 0..self.rows {
            for c in 0..self.cols {
                let cell = &self.grid[self.index(r, c)];
                let ch = if cell.is_mine() {
                    '*'
                } else {
                    (b'0' + cell.adjacent_mines()) as char
                };
                write!(f, "{} ", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
