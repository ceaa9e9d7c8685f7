//! Stochastic solve directive.
//!
//! The directive carries the two options that shape a stochastic solve:
//! the scenario count above which sampling replaces enumeration, and the
//! requested decomposition.

use std::fmt;
use std::str::FromStr;

use stochastic_core::types::StochasticError;
use stochastic_sampling::config::{resolve_scenario_threshold, AUTOMATIC_THRESHOLD};
use stochastic_sampling::ConfigError;

/// How the stochastic program is handed to the solver.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DecompositionType {
    /// Let the engine choose; always the deterministic equivalent.
    #[default]
    Automatic,
    /// One extensive-form problem over all scenarios.
    DeterministicEquivalent,
    /// Stage-wise decomposition. Not supported; the deterministic
    /// equivalent is built instead.
    Decomposition,
}

impl fmt::Display for DecompositionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Automatic => "automatic",
            Self::DeterministicEquivalent => "deterministic_equivalent",
            Self::Decomposition => "decomposition",
        };
        f.write_str(name)
    }
}

impl FromStr for DecompositionType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "automatic" | "auto" => Ok(Self::Automatic),
            "deterministic_equivalent" | "de" => Ok(Self::DeterministicEquivalent),
            "decomposition" => Ok(Self::Decomposition),
            other => Err(ConfigError::InvalidParameter {
                name: "decomposition_type",
                value: format!("unknown decomposition '{}'", other),
            }),
        }
    }
}

/// Options for one stochastic solve.
///
/// # Examples
///
/// ```rust
/// use stochastic_model::{DecompositionType, StochasticDirective};
///
/// let directive = StochasticDirective::default();
/// assert_eq!(directive.scenario_threshold().unwrap(), 500);
///
/// let directive = StochasticDirective::new(20, DecompositionType::DeterministicEquivalent);
/// assert_eq!(directive.scenario_threshold().unwrap(), 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StochasticDirective {
    /// Scenario count above which sampling is used (-1 = automatic).
    pub maximum_scenario_count_before_sampling: i64,
    /// Requested decomposition.
    pub decomposition_type: DecompositionType,
}

impl Default for StochasticDirective {
    fn default() -> Self {
        Self {
            maximum_scenario_count_before_sampling: AUTOMATIC_THRESHOLD,
            decomposition_type: DecompositionType::Automatic,
        }
    }
}

impl StochasticDirective {
    /// Creates a directive.
    pub fn new(maximum_scenario_count_before_sampling: i64, decomposition_type: DecompositionType) -> Self {
        Self {
            maximum_scenario_count_before_sampling,
            decomposition_type,
        }
    }

    /// Resolved sampling threshold.
    ///
    /// # Errors
    ///
    /// `ModelData` for values below `-1`.
    pub fn scenario_threshold(&self) -> Result<i32, StochasticError> {
        Ok(resolve_scenario_threshold(
            self.maximum_scenario_count_before_sampling,
        )?)
    }

    /// Validates the directive.
    ///
    /// # Errors
    ///
    /// `ModelData` for a malformed threshold.
    pub fn validate(&self) -> Result<(), StochasticError> {
        self.scenario_threshold().map(|_| ())
    }
}
