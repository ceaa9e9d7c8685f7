//! Error types for structured error handling.
//!
//! This module provides:
//! - `DistributionError`: Errors from distribution construction, evaluation
//!   and sampling, including numerical kernels
//! - `ErrorKind`: The category a failure belongs to
//! - `StochasticError`: Top-level error surfaced to the solve orchestration

use thiserror::Error;

/// Category of a failure.
///
/// The engine distinguishes three outcomes that must never be confused:
/// a user mistake, an engine limitation and a cooperative abort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorKind {
    /// Parameters or arguments outside their domain.
    InvalidInput,
    /// A numerical algorithm exceeded its iteration or range bounds.
    NonConvergence,
    /// The cooperative abort predicate fired.
    Cancelled,
}

/// Distribution and numerical-kernel errors.
///
/// # Variants
/// - `InvalidParameter`: A constructor parameter violates its domain
/// - `InvalidArgument`: An evaluation argument is unusable (e.g. NaN)
/// - `NonConvergence`: An iterative algorithm hit its iteration cap
/// - `OutOfRange`: A result does not fit its target representation
/// - `Cancelled`: The abort predicate fired inside a bounded loop
///
/// # Examples
/// ```
/// use stochastic_core::types::{DistributionError, ErrorKind};
///
/// let err = DistributionError::invalid_parameter("Exponential", "rate must be positive, got -1");
/// assert_eq!(err.kind(), ErrorKind::InvalidInput);
/// assert!(format!("{}", err).contains("Exponential"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DistributionError {
    /// Constructor parameter outside the distribution's domain.
    #[error("Invalid {distribution} parameter: {reason}")]
    InvalidParameter {
        /// Distribution family name
        distribution: String,
        /// Description of the violated constraint
        reason: String,
    },

    /// Argument to an evaluation function is unusable.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Iterative algorithm failed to converge.
    #[error("{algorithm} failed to converge after {iterations} iterations")]
    NonConvergence {
        /// Algorithm name
        algorithm: String,
        /// Number of iterations attempted
        iterations: usize,
    },

    /// Result outside its representable range.
    #[error("Result out of range: {0}")]
    OutOfRange(String),

    /// Cooperative abort requested.
    #[error("Operation cancelled")]
    Cancelled,
}

impl DistributionError {
    /// Create an invalid-parameter error.
    pub fn invalid_parameter(distribution: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            distribution: distribution.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid-argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Create a non-convergence error.
    pub fn non_convergence(algorithm: impl Into<String>, iterations: usize) -> Self {
        Self::NonConvergence {
            algorithm: algorithm.into(),
            iterations,
        }
    }

    /// Classify the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidParameter { .. } | Self::InvalidArgument(_) => ErrorKind::InvalidInput,
            Self::NonConvergence { .. } | Self::OutOfRange(_) => ErrorKind::NonConvergence,
            Self::Cancelled => ErrorKind::Cancelled,
        }
    }
}

/// Top-level errors surfaced to the solve orchestration.
///
/// # Variants
/// - `ModelData`: Invalid input (distribution parameters, directives,
///   ill-posed goals); wraps the violated constraint
/// - `Algorithm`: Engine limitation (non-convergence, range overflow)
/// - `Cancelled`: Cooperative abort
///
/// # Examples
/// ```
/// use stochastic_core::types::{DistributionError, StochasticError};
///
/// let err: StochasticError = DistributionError::non_convergence("BTRD", 1000).into();
/// assert!(matches!(err, StochasticError::Algorithm(_)));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StochasticError {
    /// Invalid model data.
    #[error("Model data error: {0}")]
    ModelData(String),

    /// Internal algorithm failure.
    #[error("Algorithm failure: {0}")]
    Algorithm(String),

    /// The solve was cancelled.
    #[error("Solve cancelled")]
    Cancelled,
}

impl StochasticError {
    /// Create a model-data error.
    pub fn model_data(message: impl Into<String>) -> Self {
        Self::ModelData(message.into())
    }

    /// Create an algorithm error.
    pub fn algorithm(message: impl Into<String>) -> Self {
        Self::Algorithm(message.into())
    }

    /// Classify the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ModelData(_) => ErrorKind::InvalidInput,
            Self::Algorithm(_) => ErrorKind::NonConvergence,
            Self::Cancelled => ErrorKind::Cancelled,
        }
    }
}

impl From<DistributionError> for StochasticError {
    fn from(err: DistributionError) -> Self {
        match err.kind() {
            ErrorKind::InvalidInput => StochasticError::ModelData(err.to_string()),
            ErrorKind::NonConvergence => StochasticError::Algorithm(err.to_string()),
            ErrorKind::Cancelled => StochasticError::Cancelled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameter_display() {
        let err = DistributionError::invalid_parameter("Binomial", "numberOfTrials must be > 0");
        assert_eq!(
            format!("{}", err),
            "Invalid Binomial parameter: numberOfTrials must be > 0"
        );
    }

    #[test]
    fn test_non_convergence_display() {
        let err = DistributionError::non_convergence("BTRD", 1000);
        assert_eq!(format!("{}", err), "BTRD failed to converge after 1000 iterations");
    }

    #[test]
    fn test_kind_classification() {
        assert_eq!(
            DistributionError::invalid_argument("NaN").kind(),
            ErrorKind::InvalidInput
        );
        assert_eq!(
            DistributionError::OutOfRange("2^40".to_string()).kind(),
            ErrorKind::NonConvergence
        );
        assert_eq!(DistributionError::Cancelled.kind(), ErrorKind::Cancelled);
    }

    #[test]
    fn test_invalid_parameter_to_model_data() {
        let err = DistributionError::invalid_parameter("Normal", "standard deviation is NaN");
        match StochasticError::from(err) {
            StochasticError::ModelData(msg) => assert!(msg.contains("standard deviation")),
            other => panic!("Expected ModelData, got {:?}", other),
        }
    }

    #[test]
    fn test_cancelled_stays_cancelled() {
        let err: StochasticError = DistributionError::Cancelled.into();
        assert_eq!(err, StochasticError::Cancelled);
        assert_eq!(err.kind(), ErrorKind::Cancelled);
    }

    #[test]
    fn test_error_trait_implementation() {
        let err = StochasticError::model_data("two goals enabled");
        let _: &dyn std::error::Error = &err;
    }
}
