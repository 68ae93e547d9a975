//! Error types for the survival simulator.
//!
//! Only configuration problems are hard errors. Unreadable capability scores
//! are never errors: they coerce to 0 (see `profile::coerce_score`).

use crate::profile::Capability;
use crate::stages::Stage;
use thiserror::Error;

/// The main error type for simulator operations.
#[derive(Debug, Error)]
pub enum SimError {
    /// The run or the stage model is misconfigured. Raised before any trial.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigurationError),

    /// A capability profile document is not valid JSON.
    #[error("malformed capability profile: {0}")]
    ProfileFormat(#[source] serde_json::Error),

    /// A stage model document could not be parsed.
    #[error("malformed stage model: {0}")]
    ModelFormat(#[source] serde_json::Error),
}

impl SimError {
    /// True when the error came from run or model configuration.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::InvalidConfiguration(_))
    }
}

/// Configuration problems detected before a simulation starts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("iteration count must be positive, got {0}")]
    NonPositiveIterations(i64),

    #[error("stage {stage} has capability weights summing to zero")]
    ZeroWeightSum { stage: Stage },

    #[error("stage {stage} has invalid weight {value} for {capability}")]
    InvalidWeight {
        stage: Stage,
        capability: Capability,
        value: f64,
    },

    #[error("stage {stage} difficulty {value} is outside (0, 1]")]
    DifficultyOutOfRange { stage: Stage, value: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_errors_convert() {
        let err: SimError = ConfigurationError::NonPositiveIterations(0).into();
        assert!(err.is_configuration());
        assert_eq!(
            err.to_string(),
            "invalid configuration: iteration count must be positive, got 0"
        );
    }

    #[test]
    fn test_stage_named_in_message() {
        let err = ConfigurationError::ZeroWeightSum { stage: Stage::ScaleUp };
        assert_eq!(
            err.to_string(),
            "stage Scale-up has capability weights summing to zero"
        );
    }

    #[test]
    fn test_format_errors_are_not_configuration() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(!SimError::ProfileFormat(parse).is_configuration());
    }
}
