//! Error types for sampling configuration.

use stochastic_core::types::StochasticError;
use thiserror::Error;

/// Configuration error for the sampling engine.
///
/// These errors occur during construction when invalid options are provided.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Sample count above [`MAX_SAMPLES`](crate::config::MAX_SAMPLES).
    #[error("Invalid sample count {0}: must be at most 1_000_000 (0 selects automatically)")]
    InvalidSampleCount(usize),

    /// Scenario threshold below the automatic sentinel.
    #[error("Invalid scenario threshold {0}: must be -1 (automatic) or non-negative")]
    InvalidThreshold(i64),

    /// Invalid parameter value with name and description.
    #[error("Invalid parameter '{name}': {value}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Description of the invalid value.
        value: String,
    },
}

impl From<ConfigError> for StochasticError {
    fn from(err: ConfigError) -> Self {
        StochasticError::model_data(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidSampleCount(2_000_000);
        assert!(err.to_string().contains("Invalid sample count 2000000"));

        let err = ConfigError::InvalidThreshold(-5);
        assert!(err.to_string().contains("-5"));

        let err = ConfigError::InvalidParameter {
            name: "sampling_method",
            value: "unknown method 'sobol'".to_string(),
        };
        assert!(err.to_string().contains("sampling_method"));
    }

    #[test]
    fn test_config_error_is_model_data() {
        let err: StochasticError = ConfigError::InvalidSampleCount(0).into();
        assert!(matches!(err, StochasticError::ModelData(_)));
    }
}
