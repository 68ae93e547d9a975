//! Simulation configuration.

use crate::error::ConfigurationError;

/// Iteration count the web front end runs per analysis.
pub const DEFAULT_ITERATIONS: u64 = 1200;

/// Configuration for a simulation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimConfig {
    /// Number of independent rollouts to perform
    pub iterations: u64,

    /// Random seed for reproducibility (None = drawn from entropy and recorded)
    pub seed: Option<u64>,

    /// Spread rollouts over the rayon thread pool
    pub parallel: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            seed: None,
            parallel: false,
        }
    }
}

impl SimConfig {
    pub fn with_iterations(iterations: u64) -> Self {
        Self {
            iterations,
            ..Default::default()
        }
    }

    /// Config for a signed iteration count; zero or negative is rejected.
    pub fn try_with_iterations(iterations: i64) -> Result<Self, ConfigurationError> {
        u64::try_from(iterations)
            .ok()
            .filter(|&n| n > 0)
            .map(Self::with_iterations)
            .ok_or(ConfigurationError::NonPositiveIterations(iterations))
    }

    /// Reproducible config: same seed, profile and model give the same result.
    pub fn seeded(iterations: u64, seed: u64) -> Self {
        Self {
            iterations,
            seed: Some(seed),
            ..Default::default()
        }
    }

    /// Large parallel run for tight estimates
    pub fn precise(seed: Option<u64>) -> Self {
        Self {
            iterations: 100_000,
            seed,
            parallel: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        assert_eq!(SimConfig::default().iterations, DEFAULT_ITERATIONS);
        assert_eq!(SimConfig::seeded(10, 7).seed, Some(7));
        assert!(!SimConfig::seeded(10, 7).parallel);
        assert!(SimConfig::precise(None).parallel);
    }

    #[test]
    fn test_signed_iteration_counts() {
        assert_eq!(SimConfig::try_with_iterations(5).unwrap().iterations, 5);
        assert_eq!(
            SimConfig::try_with_iterations(0),
            Err(ConfigurationError::NonPositiveIterations(0))
        );
        assert_eq!(
            SimConfig::try_with_iterations(-20),
            Err(ConfigurationError::NonPositiveIterations(-20))
        );
    }
}
