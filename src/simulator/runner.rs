//! Monte Carlo runner: many independent rollouts, one aggregated result.
//!
//! Every trial gets its own `ChaCha8Rng` seeded from the run's base seed
//! plus the trial index. Sequential and parallel runs therefore produce the
//! same counts for the same seed.

use super::config::SimConfig;
use super::result::{SimulationResult, Tally};
use super::rollout::{rollout, RolloutOutcome};
use crate::error::{ConfigurationError, SimError};
use crate::profile::CapabilityProfile;
use crate::stages::{StageModel, StageTable};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

/// Run `iterations` rollouts against the canonical stage model.
///
/// The seed is drawn from entropy and recorded in the result.
pub fn run_simulation(
    profile: &CapabilityProfile,
    iterations: i64,
) -> Result<SimulationResult, SimError> {
    let config = SimConfig::try_with_iterations(iterations)?;
    run_simulation_with(profile, &StageModel::canonical(), &config)
}

/// Run a simulation with an explicit model and configuration.
pub fn run_simulation_with(
    profile: &CapabilityProfile,
    model: &StageModel,
    config: &SimConfig,
) -> Result<SimulationResult, SimError> {
    if config.iterations == 0 {
        return Err(ConfigurationError::NonPositiveIterations(0).into());
    }
    let pass = model.survival_table(profile)?;
    let seed = config.seed.unwrap_or_else(rand::random);

    tracing::debug!(
        iterations = config.iterations,
        seed,
        parallel = config.parallel,
        "starting simulation"
    );

    let tally = if config.parallel {
        (0..config.iterations)
            .into_par_iter()
            .fold(Tally::default, |mut tally, trial| {
                tally.record(run_trial(&pass, seed, trial));
                tally
            })
            .reduce(Tally::default, Tally::merge)
    } else {
        (0..config.iterations).fold(Tally::default(), |mut tally, trial| {
            tally.record(run_trial(&pass, seed, trial));
            tally
        })
    };

    let result = SimulationResult::from_tally(seed, tally);
    tracing::debug!(
        survival_rate = result.survival_rate,
        bottleneck = %result.bottleneck_stage,
        "simulation finished"
    );
    Ok(result)
}

fn run_trial(pass: &StageTable<f64>, seed: u64, trial: u64) -> RolloutOutcome {
    let mut rng = ChaCha8Rng::seed_from_u64(seed.wrapping_add(trial));
    rollout(pass, &mut rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stages::Stage;

    #[test]
    fn test_zero_iterations_rejected() {
        let profile = CapabilityProfile::uniform(50);
        let err = run_simulation_with(&profile, &StageModel::canonical(), &SimConfig::seeded(0, 1))
            .unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_negative_iterations_rejected() {
        let profile = CapabilityProfile::uniform(50);
        for n in [0, -1, i64::MIN] {
            let err = run_simulation(&profile, n).unwrap_err();
            assert!(matches!(
                err,
                SimError::InvalidConfiguration(ConfigurationError::NonPositiveIterations(v)) if v == n
            ));
        }
    }

    #[test]
    fn test_invalid_model_rejected_before_running() {
        let model = StageModel::canonical().with_difficulty(Stage::Mvp, 0.0);
        let result = run_simulation_with(
            &CapabilityProfile::uniform(90),
            &model,
            &SimConfig::seeded(100, 3),
        );
        assert!(matches!(result, Err(SimError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_counts_add_up() {
        let config = SimConfig::seeded(2_000, 42);
        let result = run_simulation_with(
            &CapabilityProfile::new(75, 60, 55, 40, 85),
            &StageModel::canonical(),
            &config,
        )
        .unwrap();

        assert_eq!(result.iterations, 2_000);
        assert_eq!(result.deaths(), result.iterations - result.survivors);
        let rate = 100.0 * result.survivors as f64 / 2_000.0;
        assert!((result.survival_rate - rate).abs() < 1e-9);
        assert_eq!(result.seed, 42);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let profile = CapabilityProfile::new(90, 70, 65, 50, 80);
        let model = StageModel::canonical();
        let sequential = SimConfig::seeded(5_000, 777);
        let parallel = SimConfig {
            parallel: true,
            ..sequential.clone()
        };

        let a = run_simulation_with(&profile, &model, &sequential).unwrap();
        let b = run_simulation_with(&profile, &model, &parallel).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_entropy_seed_is_recorded() {
        let profile = CapabilityProfile::uniform(60);
        let first = run_simulation(&profile, 300).unwrap();
        let replay = run_simulation_with(
            &profile,
            &StageModel::canonical(),
            &SimConfig::seeded(300, first.seed),
        )
        .unwrap();
        assert_eq!(first, replay);
    }
}
