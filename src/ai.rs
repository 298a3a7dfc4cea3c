//! Rule-based opponent: each tier inspects the board and either takes one
//! action or passes to the next tier.

use alloc::vec::Vec;
use rand::{rngs::SmallRng, Rng};

use crate::{board::Board, common::Pos, game::GameState};

/// What the AI did on its turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiOutcome {
    /// Placed this many flags.
    Flagged(usize),
    /// Revealed a safe cell.
    Revealed(Pos),
    /// Revealed a mine; the turn controller must end the game.
    MineHit(Pos),
    /// No covered cell was left to act on.
    NoMove,
}

impl AiOutcome {
    pub fn is_loss(&self) -> bool {
        matches!(self, AiOutcome::MineHit(_))
    }
}

/// One layer of the decision policy.
pub trait Tier {
    fn name(&self) -> &'static str;

    /// Take at most one action. `None` passes to the next tier.
    fn act(&self, rng: &mut SmallRng, board: &mut Board, state: &mut GameState)
        -> Option<AiOutcome>;
}

fn reveal_at(rng: &mut SmallRng, board: &mut Board, state: &mut GameState, pos: Pos) -> AiOutcome {
    let hit = board.reveal_cell(rng, pos.0, pos.1);
    state.sync_statistics(board);
    if hit {
        AiOutcome::MineHit(pos)
    } else {
        AiOutcome::Revealed(pos)
    }
}

/// Revealed number of a non-mine cell, if it shows one.
fn shown_number(board: &Board, row: usize, col: usize) -> Option<usize> {
    let cell = board.get_cell(row, col)?;
    if cell.is_revealed() && !cell.is_mine() && cell.adjacent_mines() > 0 {
        Some(cell.adjacent_mines() as usize)
    } else {
        None
    }
}

fn is_covered(board: &Board, pos: Pos) -> bool {
    board.get_cell(pos.0, pos.1).is_some_and(|c| c.is_covered())
}

/// Hidden cells that some revealed number forces to be mines.
pub fn known_mines(board: &Board) -> Vec<Pos> {
    let mut mines = Vec::new();
    for r in 0..board.rows() {
        for c in 0..board.cols() {
            let Some(number) = shown_number(board, r, c) else {
                continue;
            };
            let hidden = board.hidden_neighbors(r, c);
            if hidden.len() == number {
                for pos in hidden {
                    if !mines.contains(&pos) {
                        mines.push(pos);
                    }
                }
            }
        }
    }
    mines
}

/// Single-cell constraints: a number whose hidden neighbours equal it flags
/// them all; a number already satisfied by flags opens one of the rest.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstraintDeduction;

impl Tier for ConstraintDeduction {
    fn name(&self) -> &'static str {
        "constraint"
    }

    fn act(
        &self,
        rng: &mut SmallRng,
        board: &mut Board,
        state: &mut GameState,
    ) -> Option<AiOutcome> {
        for r in 0..board.rows() {
            for c in 0..board.cols() {
                let Some(number) = shown_number(board, r, c) else {
                    continue;
                };
                let hidden = board.hidden_neighbors(r, c);
                let (flagged, unflagged): (Vec<Pos>, Vec<Pos>) = hidden
                    .iter()
                    .partition(|&&(nr, nc)| board.get_cell(nr, nc).is_some_and(|n| n.is_flagged()));
                if unflagged.is_empty() {
                    continue;
                }

                if hidden.len() == number && state.flags_left() > 0 {
                    let mut placed = 0;
                    for &(nr, nc) in &unflagged {
                        if state.flags_left() == 0 {
                            break;
                        }
                        if state.toggle_flag(board, nr, nc) {
                            placed += 1;
                        }
                    }
                    if placed > 0 {
                        return Some(AiOutcome::Flagged(placed));
                    }
                }

                if flagged.len() == number {
                    let pick = unflagged[rng.random_range(0..unflagged.len())];
                    let outcome = reveal_at(rng, board, state, pick);
                    if outcome.is_loss() {
                        log::warn!(
                            "Cell {:?} deduced safe from ({}, {}) held a mine",
                            pick,
                            r,
                            c
                        );
                    }
                    return Some(outcome);
                }
            }
        }
        None
    }
}

/// Three revealed cells in a row reading 1-2-1: on each flank the outer
/// cells are mines and the middle cell is safe.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternDeduction;

const PATTERN: [usize; 3] = [1, 2, 1];

impl PatternDeduction {
    fn matches(board: &Board, run: [Pos; 3]) -> bool {
        run.iter()
            .zip(PATTERN)
            .all(|(&(r, c), n)| shown_number(board, r, c) == Some(n))
    }

    /// Flag the outer flank cells and open the middle one. `None` when the
    /// flank offers nothing left to do.
    fn resolve(
        rng: &mut SmallRng,
        board: &mut Board,
        state: &mut GameState,
        flank: [Pos; 3],
    ) -> Option<AiOutcome> {
        let mut placed = 0;
        for pos in [flank[0], flank[2]] {
            if is_covered(board, pos) && state.flags_left() > 0 && state.toggle_flag(board, pos.0, pos.1)
            {
                placed += 1;
            }
        }
        if is_covered(board, flank[1]) {
            return Some(reveal_at(rng, board, state, flank[1]));
        }
        if placed > 0 {
            return Some(AiOutcome::Flagged(placed));
        }
        None
    }
}

impl Tier for PatternDeduction {
    fn name(&self) -> &'static str {
        "1-2-1 pattern"
    }

    fn act(
        &self,
        rng: &mut SmallRng,
        board: &mut Board,
        state: &mut GameState,
    ) -> Option<AiOutcome> {
        let (rows, cols) = (board.rows(), board.cols());

        // horizontal runs, flanks above and below
        for r in 0..rows {
            for c in 0..cols.saturating_sub(2) {
                if !Self::matches(board, [(r, c), (r, c + 1), (r, c + 2)]) {
                    continue;
                }
                for fr in [r.checked_sub(1), Some(r + 1)].into_iter().flatten() {
                    if fr >= rows {
                        continue;
                    }
                    let flank = [(fr, c), (fr, c + 1), (fr, c + 2)];
                    if let Some(outcome) = Self::resolve(rng, board, state, flank) {
                        return Some(outcome);
                    }
                }
            }
        }

        // vertical runs, flanks left and right
        for r in 0..rows.saturating_sub(2) {
            for c in 0..cols {
                if !Self::matches(board, [(r, c), (r + 1, c), (r + 2, c)]) {
                    continue;
                }
                for fc in [c.checked_sub(1), Some(c + 1)].into_iter().flatten() {
                    if fc >= cols {
                        continue;
                    }
                    let flank = [(r, fc), (r + 1, fc), (r + 2, fc)];
                    if let Some(outcome) = Self::resolve(rng, board, state, flank) {
                        return Some(outcome);
                    }
                }
            }
        }
        None
    }
}

/// Uniform guess among covered cells. The cautious variant skips cells that
/// a revealed number already proves to be mines, unless nothing else is left.
#[derive(Debug, Clone, Copy)]
pub struct RandomReveal {
    avoid_known_mines: bool,
}

impl RandomReveal {
    pub const PLAIN: RandomReveal = RandomReveal {
        avoid_known_mines: false,
    };
    pub const CAUTIOUS: RandomReveal = RandomReveal {
        avoid_known_mines: true,
    };
}

impl Tier for RandomReveal {
    fn name(&self) -> &'static str {
        if self.avoid_known_mines {
            "cautious guess"
        } else {
            "random guess"
        }
    }

    fn act(
        &self,
        rng: &mut SmallRng,
        board: &mut Board,
        state: &mut GameState,
    ) -> Option<AiOutcome> {
        let covered = board.covered_cells();
        if covered.is_empty() {
            return None;
        }
        let mut candidates = covered.clone();
        if self.avoid_known_mines {
            let mines = known_mines(board);
            candidates.retain(|pos| !mines.contains(pos));
            if candidates.is_empty() {
                candidates = covered;
            }
        }
        let pick = candidates[rng.random_range(0..candidates.len())];
        Some(reveal_at(rng, board, state, pick))
    }
}
