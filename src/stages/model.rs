//! Per-stage capability weighting and difficulty.
//!
//! A stage's survival probability is the weighted mean of the profile's
//! scores, scaled to [0, 1] and multiplied by the stage difficulty. The
//! function is pure; all randomness lives in the rollout.

use super::types::{Stage, StageTable};
use crate::error::{ConfigurationError, SimError};
use crate::profile::{Capability, CapabilityProfile, MAX_SCORE};
use serde::{Deserialize, Serialize};

/// Non-negative importance of each capability within one stage.
///
/// Weights need not sum to 1; the survival formula divides by their sum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapabilityWeights {
    pub product: f64,
    pub team: f64,
    pub strategy: f64,
    pub marketing: f64,
    pub consumer_needs: f64,
}

impl CapabilityWeights {
    pub const fn new(product: f64, team: f64, strategy: f64, marketing: f64, consumer_needs: f64) -> Self {
        Self {
            product,
            team,
            strategy,
            marketing,
            consumer_needs,
        }
    }

    /// Equal weight on every capability.
    pub const fn even() -> Self {
        Self::new(1.0, 1.0, 1.0, 1.0, 1.0)
    }

    pub fn get(&self, capability: Capability) -> f64 {
        match capability {
            Capability::Product => self.product,
            Capability::Team => self.team,
            Capability::Strategy => self.strategy,
            Capability::Marketing => self.marketing,
            Capability::ConsumerNeeds => self.consumer_needs,
        }
    }

    pub fn sum(&self) -> f64 {
        Capability::ALL.iter().map(|&c| self.get(c)).sum()
    }
}

/// Exact outcome distribution of a single rollout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExpectedOutcome {
    /// Probability that a rollout clears every stage.
    pub survival: f64,
    /// Probability that a rollout dies at each stage.
    pub death: StageTable<f64>,
}

impl ExpectedOutcome {
    /// Stage with the highest death probability; earliest stage wins ties.
    pub fn likeliest_death(&self) -> Stage {
        let mut best = Stage::Seed;
        for (stage, &p) in self.death.iter() {
            if p > self.death[best] {
                best = stage;
            }
        }
        best
    }
}

/// Static stage configuration: weights and difficulty for every stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageModel {
    pub weights: StageTable<CapabilityWeights>,
    pub difficulty: StageTable<f64>,
}

impl Default for StageModel {
    fn default() -> Self {
        Self::canonical()
    }
}

impl StageModel {
    /// Production configuration.
    ///
    /// Team and consumer needs dominate early; strategy and marketing take
    /// over from Scale-up. Every stage is harder than the last.
    pub fn canonical() -> Self {
        Self {
            weights: StageTable::from([
                CapabilityWeights::new(0.10, 0.35, 0.10, 0.10, 0.35),
                CapabilityWeights::new(0.20, 0.25, 0.10, 0.10, 0.35),
                CapabilityWeights::new(0.20, 0.10, 0.20, 0.20, 0.30),
                CapabilityWeights::new(0.20, 0.20, 0.30, 0.25, 0.05),
                CapabilityWeights::new(0.20, 0.10, 0.30, 0.35, 0.05),
            ]),
            difficulty: StageTable::from([0.70, 0.60, 0.50, 0.40, 0.30]),
        }
    }

    /// Load a model from JSON and validate it.
    pub fn from_json(text: &str) -> Result<Self, SimError> {
        let model: StageModel = serde_json::from_str(text).map_err(SimError::ModelFormat)?;
        model.validate()?;
        Ok(model)
    }

    pub fn with_weights(mut self, stage: Stage, weights: CapabilityWeights) -> Self {
        self.weights[stage] = weights;
        self
    }

    pub fn with_difficulty(mut self, stage: Stage, difficulty: f64) -> Self {
        self.difficulty[stage] = difficulty;
        self
    }

    pub fn with_uniform_difficulty(mut self, difficulty: f64) -> Self {
        self.difficulty = StageTable::from_fn(|_| difficulty);
        self
    }

    /// Check every stage's configuration.
    pub fn validate(&self) -> Result<(), SimError> {
        for stage in Stage::ALL {
            self.validate_stage(stage)?;
        }
        Ok(())
    }

    fn validate_stage(&self, stage: Stage) -> Result<(), ConfigurationError> {
        let weights = &self.weights[stage];
        for capability in Capability::ALL {
            let value = weights.get(capability);
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigurationError::InvalidWeight {
                    stage,
                    capability,
                    value,
                });
            }
        }
        if weights.sum() <= 0.0 {
            return Err(ConfigurationError::ZeroWeightSum { stage });
        }

        let difficulty = self.difficulty[stage];
        if !difficulty.is_finite() || difficulty <= 0.0 || difficulty > 1.0 {
            return Err(ConfigurationError::DifficultyOutOfRange {
                stage,
                value: difficulty,
            });
        }
        Ok(())
    }

    /// Probability in [0, 1] that a venture with this profile passes `stage`.
    pub fn compute_survival(&self, profile: &CapabilityProfile, stage: Stage) -> Result<f64, SimError> {
        self.validate_stage(stage)?;

        let weights = &self.weights[stage];
        let raw: f64 = profile
            .iter()
            .map(|(capability, score)| f64::from(score) * weights.get(capability))
            .sum();
        let score = raw / weights.sum();
        let base = score / f64::from(MAX_SCORE);

        Ok((base * self.difficulty[stage]).clamp(0.0, 1.0))
    }

    /// Survival probability for every stage, validating the whole model once.
    pub fn survival_table(&self, profile: &CapabilityProfile) -> Result<StageTable<f64>, SimError> {
        self.validate()?;
        let mut table = StageTable::default();
        for stage in Stage::ALL {
            table[stage] = self.compute_survival(profile, stage)?;
        }
        Ok(table)
    }

    /// Exact probabilities of dying at each stage and of surviving them all.
    pub fn expected_outcome(&self, profile: &CapabilityProfile) -> Result<ExpectedOutcome, SimError> {
        let pass = self.survival_table(profile)?;
        let mut reach = 1.0;
        let mut death = StageTable::default();
        for (stage, &p) in pass.iter() {
            death[stage] = reach * (1.0 - p);
            reach *= p;
        }
        Ok(ExpectedOutcome {
            survival: reach,
            death,
        })
    }
}

/// Survival probability of `stage` under the canonical model.
pub fn compute_survival(profile: &CapabilityProfile, stage: Stage) -> Result<f64, SimError> {
    StageModel::canonical().compute_survival(profile, stage)
}
