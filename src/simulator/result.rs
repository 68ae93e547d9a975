//! Aggregated outcome of a simulation run.

use super::rollout::RolloutOutcome;
use crate::stages::{Stage, StageTable};
use serde::{Deserialize, Serialize};

/// Counters accumulated over rollouts. Partial tallies merge by addition,
/// so the final counts do not depend on the order trials ran in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub survivors: u64,
    pub deaths: StageTable<u64>,
}

impl Tally {
    pub fn record(&mut self, outcome: RolloutOutcome) {
        match outcome {
            RolloutOutcome::Survived => self.survivors += 1,
            RolloutOutcome::DiedAt(stage) => self.deaths[stage] += 1,
        }
    }

    pub fn merge(mut self, other: Tally) -> Tally {
        self.survivors += other.survivors;
        for stage in Stage::ALL {
            self.deaths[stage] += other.deaths[stage];
        }
        self
    }

    pub fn trials(&self) -> u64 {
        self.survivors + self.deaths.values().sum::<u64>()
    }
}

/// Stage with the most deaths.
///
/// Ties go to the earliest stage in rollout order, so a run with no deaths
/// at all reports Seed.
pub fn bottleneck_of(deaths: &StageTable<u64>) -> Stage {
    let mut bottleneck = Stage::Seed;
    for (stage, &count) in deaths.iter() {
        if count > deaths[bottleneck] {
            bottleneck = stage;
        }
    }
    bottleneck
}

/// Summary of one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub iterations: u64,
    /// Base seed the run used; rerunning with it reproduces this result.
    pub seed: u64,
    pub survivors: u64,
    /// Percentage of rollouts that cleared every stage.
    pub survival_rate: f64,
    pub death_counts: StageTable<u64>,
    pub bottleneck_stage: Stage,
}

impl SimulationResult {
    pub fn from_tally(seed: u64, tally: Tally) -> Self {
        let iterations = tally.trials();
        let survival_rate = if iterations == 0 {
            0.0
        } else {
            100.0 * tally.survivors as f64 / iterations as f64
        };
        Self {
            iterations,
            seed,
            survivors: tally.survivors,
            survival_rate,
            death_counts: tally.deaths,
            bottleneck_stage: bottleneck_of(&tally.deaths),
        }
    }

    pub fn deaths(&self) -> u64 {
        self.death_counts.values().sum()
    }

    /// Fraction of all rollouts that died at `stage`.
    pub fn death_share(&self, stage: Stage) -> f64 {
        if self.iterations == 0 {
            0.0
        } else {
            self.death_counts[stage] as f64 / self.iterations as f64
        }
    }
}
