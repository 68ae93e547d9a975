//! Single-trial state machine.
//!
//! A rollout starts alive at Seed and draws one uniform value per stage.
//! Death happens when the draw is at or above the stage's survival
//! probability, so a stage passes with exactly that probability: p = 0
//! always kills and p = 1 never does.

use crate::stages::{Stage, StageTable};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Terminal result of one rollout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RolloutOutcome {
    Survived,
    DiedAt(Stage),
}

/// Position of a rollout in the stage sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RolloutState {
    Alive(Stage),
    Survived,
    Dead(Stage),
}

impl RolloutState {
    pub const START: RolloutState = RolloutState::Alive(Stage::Seed);

    /// Advance one stage using the draw `r` in [0, 1).
    ///
    /// Terminal states are absorbing.
    pub fn step(self, pass: &StageTable<f64>, r: f64) -> RolloutState {
        match self {
            RolloutState::Alive(stage) => {
                if r >= pass[stage] {
                    RolloutState::Dead(stage)
                } else {
                    match stage.next() {
                        Some(next) => RolloutState::Alive(next),
                        None => RolloutState::Survived,
                    }
                }
            }
            terminal => terminal,
        }
    }

    pub fn outcome(self) -> Option<RolloutOutcome> {
        match self {
            RolloutState::Alive(_) => None,
            RolloutState::Survived => Some(RolloutOutcome::Survived),
            RolloutState::Dead(stage) => Some(RolloutOutcome::DiedAt(stage)),
        }
    }
}

/// Walk the stage sequence until death or full survival.
///
/// `pass` holds the per-stage survival probabilities. Stages after the one
/// that kills the rollout draw nothing from `rng`.
pub fn rollout<R: Rng + ?Sized>(pass: &StageTable<f64>, rng: &mut R) -> RolloutOutcome {
    let mut state = RolloutState::START;
    loop {
        if let Some(outcome) = state.outcome() {
            return outcome;
        }
        state = state.step(pass, rng.gen::<f64>());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn table(p: f64) -> StageTable<f64> {
        StageTable::from_fn(|_| p)
    }

    #[test]
    fn test_step_death_boundary() {
        let pass = StageTable::from([0.5, 0.0, 1.0, 0.5, 0.5]);
        assert_eq!(RolloutState::START.step(&pass, 0.5), RolloutState::Dead(Stage::Seed));
        assert_eq!(
            RolloutState::START.step(&pass, 0.4999),
            RolloutState::Alive(Stage::Mvp)
        );
        // Probability 0 kills even on a zero draw.
        assert_eq!(
            RolloutState::Alive(Stage::Mvp).step(&pass, 0.0),
            RolloutState::Dead(Stage::Mvp)
        );
        // Probability 1 passes on the largest possible draw.
        let largest_below_one = 1.0 - f64::EPSILON / 2.0;
        assert_eq!(
            RolloutState::Alive(Stage::Pmf).step(&pass, largest_below_one),
            RolloutState::Alive(Stage::ScaleUp)
        );
    }

    #[test]
    fn test_last_stage_leads_to_survival() {
        let pass = table(1.0);
        assert_eq!(
            RolloutState::Alive(Stage::Unicorn).step(&pass, 0.3),
            RolloutState::Survived
        );
    }

    #[test]
    fn test_terminal_states_absorb() {
        let pass = table(0.0);
        assert_eq!(RolloutState::Survived.step(&pass, 0.9), RolloutState::Survived);
        assert_eq!(
            RolloutState::Dead(Stage::Pmf).step(&pass, 0.0),
            RolloutState::Dead(Stage::Pmf)
        );
        assert_eq!(RolloutState::Alive(Stage::Seed).outcome(), None);
    }

    #[test]
    fn test_certain_outcomes() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..200 {
            assert_eq!(rollout(&table(0.0), &mut rng), RolloutOutcome::DiedAt(Stage::Seed));
            assert_eq!(rollout(&table(1.0), &mut rng), RolloutOutcome::Survived);
        }
    }

    #[test]
    fn test_only_reachable_stage_can_kill() {
        let pass = StageTable::from([1.0, 1.0, 1.0, 0.0, 1.0]);
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        for _ in 0..100 {
            assert_eq!(rollout(&pass, &mut rng), RolloutOutcome::DiedAt(Stage::ScaleUp));
        }
    }

    #[test]
    fn test_same_seed_same_outcome() {
        let pass = table(0.6);
        let a: Vec<_> = {
            let mut rng = ChaCha8Rng::seed_from_u64(2024);
            (0..50).map(|_| rollout(&pass, &mut rng)).collect()
        };
        let b: Vec<_> = {
            let mut rng = ChaCha8Rng::seed_from_u64(2024);
            (0..50).map(|_| rollout(&pass, &mut rng)).collect()
        };
        assert_eq!(a, b);
    }
}
