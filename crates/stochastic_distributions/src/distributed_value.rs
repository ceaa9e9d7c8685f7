//! Named random parameters.
//!
//! A [`DistributedValue`] binds a [`ParameterId`] to a [`Distribution`]. It
//! carries no "current value": the scenario generator hands out realised
//! values per scenario as plain data keyed by the parameter id.

use std::fmt;

use stochastic_core::types::DistributionError;

use crate::distribution::{RandomNumberNeeded, UnivariateDistribution, SCENARIO_COUNT_UNBOUNDED};
use crate::distribution_enum::Distribution;
use crate::scenario::Scenario;

/// Identifier of a random parameter.
///
/// # Examples
///
/// ```
/// use stochastic_distributions::ParameterId;
///
/// let id = ParameterId::new("demand");
/// assert_eq!(id.as_str(), "demand");
/// assert_eq!(id.to_string(), "demand");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParameterId(String);

impl ParameterId {
    /// Creates a new parameter ID.
    #[inline]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the ID as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParameterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ParameterId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ParameterId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A model parameter that follows a distribution.
///
/// # Examples
///
/// ```
/// use stochastic_distributions::{DiscreteUniform, DistributedValue};
///
/// let die = DistributedValue::new("die", DiscreteUniform::new(1, 6).unwrap());
/// assert_eq!(die.scenario_count(), 6);
/// assert_eq!(die.scenarios().unwrap().len(), 6);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DistributedValue {
    id: ParameterId,
    distribution: Distribution,
}

impl DistributedValue {
    /// Creates a distributed value.
    pub fn new(id: impl Into<ParameterId>, distribution: impl Into<Distribution>) -> Self {
        Self {
            id: id.into(),
            distribution: distribution.into(),
        }
    }

    /// Parameter identifier.
    #[inline]
    pub fn id(&self) -> &ParameterId {
        &self.id
    }

    /// Underlying distribution.
    #[inline]
    pub fn distribution(&self) -> &Distribution {
        &self.distribution
    }

    /// Number of distinct outcomes, or [`SCENARIO_COUNT_UNBOUNDED`].
    pub fn scenario_count(&self) -> i32 {
        self.distribution.scenario_count()
    }

    /// Whether the support is finite.
    pub fn is_bounded(&self) -> bool {
        self.scenario_count() != SCENARIO_COUNT_UNBOUNDED
    }

    /// Enumerated outcomes.
    ///
    /// # Errors
    /// `InvalidArgument` if the distribution has unbounded support.
    pub fn scenarios(&self) -> Result<Vec<Scenario>, DistributionError> {
        self.distribution.scenarios().ok_or_else(|| {
            DistributionError::invalid_argument(format!(
                "parameter '{}' follows a {} distribution with unbounded support and cannot be enumerated",
                self.id,
                self.distribution.name()
            ))
        })
    }

    /// Uniform variates consumed per sample.
    pub fn random_number_needed(&self) -> RandomNumberNeeded {
        self.distribution.random_number_needed()
    }

    /// Whether the parameter can be stratified.
    pub fn supports_latin_hypercube(&self) -> bool {
        self.distribution.supports_latin_hypercube()
    }
}
