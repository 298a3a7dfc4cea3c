use rand::rngs::SmallRng;

use crate::{
    ai::{AiOutcome, ConstraintDeduction, PatternDeduction, RandomReveal, Tier},
    board::Board,
    config::AiMode,
    game::GameState,
};

const NO_TIERS: &[&dyn Tier] = &[];
const EASY_TIERS: &[&dyn Tier] = &[&RandomReveal::PLAIN];
const MEDIUM_TIERS: &[&dyn Tier] = &[&ConstraintDeduction, &RandomReveal::PLAIN];
const HARD_TIERS: &[&dyn Tier] = &[
    &ConstraintDeduction,
    &PatternDeduction,
    &RandomReveal::CAUTIOUS,
];

/// Computer opponent: runs the tiers enabled for its difficulty in priority
/// order and stops at the first one that acts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AiPlayer {
    mode: AiMode,
}

impl AiPlayer {
    pub fn new(mode: AiMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> AiMode {
        self.mode
    }

    pub fn tiers(&self) -> &'static [&'static dyn Tier] {
        match self.mode {
            AiMode::None => NO_TIERS,
            AiMode::Easy => EASY_TIERS,
            AiMode::Medium => MEDIUM_TIERS,
            AiMode::Hard => HARD_TIERS,
        }
    }

    /// Play one turn against `board`, spending flags from `state`.
    pub fn take_turn(
        &self,
        rng: &mut SmallRng,
        board: &mut Board,
        state: &mut GameState,
    ) -> AiOutcome {
        for tier in self.tiers() {
            if let Some(outcome) = tier.act(rng, board, state) {
                log::debug!("AI ({}) {}: {:?}", self.mode.name(), tier.name(), outcome);
                return outcome;
            }
        }
        log::debug!("AI ({}) found no move", self.mode.name());
        AiOutcome::NoMove
    }
}
