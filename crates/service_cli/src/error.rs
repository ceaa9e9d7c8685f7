//! CLI error types.

use stochastic_core::types::{DistributionError, StochasticError};
use stochastic_sampling::ConfigError;
use thiserror::Error;

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Model file does not exist.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Invalid command-line argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Malformed model file or environment override.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid distribution in the model file.
    #[error("Distribution error: {0}")]
    Distribution(#[from] DistributionError),

    /// Failure reported by the engine.
    #[error(transparent)]
    Engine(#[from] StochasticError),

    /// I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::Config(err.to_string())
    }
}

/// Result alias for CLI commands.
pub type Result<T> = std::result::Result<T, CliError>;
