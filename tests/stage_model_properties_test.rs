//! Property tests for the per-stage survival probability.

use proptest::prelude::*;
use startup_hell::profile::Capability;
use startup_hell::stages::CapabilityWeights;
use startup_hell::{compute_survival, CapabilityProfile, Stage, StageModel};

fn any_stage() -> impl Strategy<Value = Stage> {
    prop::sample::select(Stage::ALL.to_vec())
}

fn any_capability() -> impl Strategy<Value = Capability> {
    prop::sample::select(Capability::ALL.to_vec())
}

fn any_profile() -> impl Strategy<Value = CapabilityProfile> {
    (
        -50i64..200,
        -50i64..200,
        -50i64..200,
        -50i64..200,
        -50i64..200,
    )
        .prop_map(|(p, t, s, m, n)| CapabilityProfile::new(p, t, s, m, n))
}

fn any_weights() -> impl Strategy<Value = CapabilityWeights> {
    (0.0..5.0f64, 0.0..5.0f64, 0.0..5.0f64, 0.0..5.0f64, 0.01..5.0f64)
        .prop_map(|(p, t, s, m, n)| CapabilityWeights::new(p, t, s, m, n))
}

proptest! {
    #[test]
    fn probability_is_always_in_unit_interval(profile in any_profile(), stage in any_stage()) {
        let p = compute_survival(&profile, stage).unwrap();
        prop_assert!((0.0..=1.0).contains(&p), "p = {}", p);
    }

    #[test]
    fn probability_in_unit_interval_for_any_valid_model(
        profile in any_profile(),
        stage in any_stage(),
        weights in any_weights(),
        difficulty in 0.001..=1.0f64,
    ) {
        let model = StageModel::canonical()
            .with_weights(stage, weights)
            .with_difficulty(stage, difficulty);
        let p = model.compute_survival(&profile, stage).unwrap();
        prop_assert!((0.0..=1.0).contains(&p));
    }

    #[test]
    fn monotonic_in_each_weighted_capability(
        profile in any_profile(),
        stage in any_stage(),
        capability in any_capability(),
        bump in 1i64..100,
    ) {
        let model = StageModel::canonical();
        prop_assume!(model.weights[stage].get(capability) > 0.0);

        let current = i64::from(profile.get(capability));
        let raised = profile.with_score(capability, current + bump);
        let before = model.compute_survival(&profile, stage).unwrap();
        let after = model.compute_survival(&raised, stage).unwrap();
        prop_assert!(after >= before, "{} -> {}", before, after);
    }

    #[test]
    fn zero_profile_never_survives(stage in any_stage(), weights in any_weights()) {
        let model = StageModel::canonical().with_weights(stage, weights);
        let p = model.compute_survival(&CapabilityProfile::uniform(0), stage).unwrap();
        prop_assert_eq!(p, 0.0);
    }

    #[test]
    fn compute_survival_is_pure(profile in any_profile(), stage in any_stage()) {
        let a = compute_survival(&profile, stage).unwrap();
        let b = compute_survival(&profile, stage).unwrap();
        prop_assert_eq!(a.to_bits(), b.to_bits());
    }
}

#[test]
fn test_perfect_profile_with_unit_difficulty_is_certain() {
    let model = StageModel::canonical().with_uniform_difficulty(1.0);
    let profile = CapabilityProfile::uniform(100);
    for stage in Stage::ALL {
        assert_eq!(model.compute_survival(&profile, stage).unwrap(), 1.0);
    }

    let even = StageModel::canonical()
        .with_uniform_difficulty(1.0)
        .with_weights(Stage::Pmf, CapabilityWeights::even());
    assert_eq!(even.compute_survival(&profile, Stage::Pmf).unwrap(), 1.0);
}

#[test]
fn test_zero_profile_is_zero_for_every_stage() {
    let profile = CapabilityProfile::uniform(0);
    for stage in Stage::ALL {
        assert_eq!(compute_survival(&profile, stage).unwrap(), 0.0);
    }
}

#[test]
fn test_perfect_profile_equals_difficulty() {
    let model = StageModel::canonical();
    let profile = CapabilityProfile::uniform(100);
    for stage in Stage::ALL {
        let p = model.compute_survival(&profile, stage).unwrap();
        assert!((p - model.difficulty[stage]).abs() < 1e-12);
    }
}
