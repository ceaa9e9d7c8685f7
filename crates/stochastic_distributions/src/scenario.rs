//! Finite scenario distributions.
//!
//! A [`Scenario`] is a `(probability, value)` outcome. A
//! [`ScenarioCollection`] accumulates scenarios, rejecting any addition that
//! would push the total probability above one, and finishes into a
//! [`ScenariosDistribution`] once the total is one within
//! [`PROBABILITY_TOLERANCE`](stochastic_core::math::PROBABILITY_TOLERANCE).

use stochastic_core::math::{approx_one, at_most_one, is_valid_probability};
use stochastic_core::types::DistributionError;

use crate::distribution::{
    check_argument, check_probability, UnivariateDistribution, DISCRETE_QUANTILE_TOLERANCE,
};

const FAMILY: &str = "Scenarios";

/// A single discrete outcome.
///
/// # Examples
///
/// ```
/// use stochastic_distributions::Scenario;
///
/// let s = Scenario::new(0.25, 80.0).unwrap();
/// assert_eq!(s.probability(), 0.25);
/// assert!(Scenario::new(0.0, 80.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scenario {
    probability: f64,
    value: f64,
}

impl Scenario {
    /// Creates a scenario.
    ///
    /// # Errors
    /// `InvalidParameter` unless `0 < probability <= 1` and `value` is finite.
    pub fn new(probability: f64, value: f64) -> Result<Self, DistributionError> {
        if probability <= 0.0 || !is_valid_probability(probability) {
            return Err(DistributionError::invalid_parameter(
                FAMILY,
                format!("probability must lie in (0, 1], got {}", probability),
            ));
        }
        if !value.is_finite() {
            return Err(DistributionError::invalid_parameter(
                FAMILY,
                format!("scenario value must be finite, got {}", value),
            ));
        }
        Ok(Self { probability, value })
    }

    /// Probability of the outcome.
    #[inline]
    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// Value of the outcome.
    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }
}

/// Incremental builder for [`ScenariosDistribution`].
///
/// # Examples
///
/// ```
/// use stochastic_distributions::{ScenarioCollection, UnivariateDistribution};
///
/// let mut collection = ScenarioCollection::new();
/// collection.add(0.3, 80.0).unwrap();
/// collection.add(0.7, 120.0).unwrap();
/// assert!(collection.add(0.2, 150.0).is_err());
///
/// let dist = collection.finish().unwrap();
/// assert!((dist.mean() - 108.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioCollection {
    scenarios: Vec<Scenario>,
    total_probability: f64,
}

impl ScenarioCollection {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and adds an outcome.
    ///
    /// # Errors
    /// `InvalidParameter` if the scenario is invalid or the running total
    /// would exceed one beyond tolerance. A rejected scenario is not added.
    pub fn add(&mut self, probability: f64, value: f64) -> Result<(), DistributionError> {
        let scenario = Scenario::new(probability, value)?;
        self.add_scenario(scenario)
    }

    /// Adds an already validated scenario.
    ///
    /// # Errors
    /// `InvalidParameter` if the running total would exceed one.
    pub fn add_scenario(&mut self, scenario: Scenario) -> Result<(), DistributionError> {
        let total = self.total_probability + scenario.probability();
        if !at_most_one(total) {
            return Err(DistributionError::invalid_parameter(
                FAMILY,
                format!("total probability {} exceeds one", total),
            ));
        }
        self.total_probability = total;
        self.scenarios.push(scenario);
        Ok(())
    }

    /// Number of outcomes added so far.
    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    /// Whether no outcome has been added.
    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    /// Running total probability.
    pub fn total_probability(&self) -> f64 {
        self.total_probability
    }

    /// Finalises the collection.
    ///
    /// # Errors
    /// `InvalidParameter` if the collection is empty or the total
    /// probability is not one within tolerance.
    pub fn finish(self) -> Result<ScenariosDistribution, DistributionError> {
        if self.scenarios.is_empty() {
            return Err(DistributionError::invalid_parameter(
                FAMILY,
                "at least one scenario is required",
            ));
        }
        if !approx_one(self.total_probability) {
            return Err(DistributionError::invalid_parameter(
                FAMILY,
                format!(
                    "probabilities must sum to one, got {}",
                    self.total_probability
                ),
            ));
        }
        Ok(ScenariosDistribution::from_parts(
            self.scenarios,
            self.total_probability,
        ))
    }
}

/// Distribution over a finite list of user-supplied outcomes.
///
/// Enumeration preserves insertion order. Moments, cumulative density and
/// quantile treat the probabilities as normalised by their total, which
/// differs from one by at most the tolerance.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenariosDistribution {
    /// Outcomes in insertion order.
    scenarios: Vec<Scenario>,
    /// Outcomes sorted by value, for cumulative evaluation.
    sorted: Vec<Scenario>,
    total_probability: f64,
}

impl ScenariosDistribution {
    /// Builds a distribution from `(probability, value)` pairs.
    ///
    /// # Errors
    /// As [`ScenarioCollection::add`] and [`ScenarioCollection::finish`].
    pub fn from_pairs<I>(pairs: I) -> Result<Self, DistributionError>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let mut collection = ScenarioCollection::new();
        for (probability, value) in pairs {
            collection.add(probability, value)?;
        }
        collection.finish()
    }

    fn from_parts(scenarios: Vec<Scenario>, total_probability: f64) -> Self {
        let mut sorted = scenarios.clone();
        sorted.sort_by(|a, b| a.value().total_cmp(&b.value()));
        Self {
            scenarios,
            sorted,
            total_probability,
        }
    }

    /// Outcomes in insertion order.
    pub fn outcomes(&self) -> &[Scenario] {
        &self.scenarios
    }

    /// Sum of the outcome probabilities.
    pub fn total_probability(&self) -> f64 {
        self.total_probability
    }

    fn weighted(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        let total = self.total_probability;
        self.scenarios
            .iter()
            .map(move |s| (s.probability() / total, s.value()))
    }

    fn central_moment(&self, order: i32) -> f64 {
        let mean = self.mean();
        self.weighted()
            .map(|(w, v)| w * (v - mean).powi(order))
            .sum()
    }
}

impl UnivariateDistribution for ScenariosDistribution {
    fn name(&self) -> &'static str {
        FAMILY
    }

    fn mean(&self) -> f64 {
        self.weighted().map(|(w, v)| w * v).sum()
    }

    fn variance(&self) -> f64 {
        self.central_moment(2)
    }

    fn skewness(&self) -> f64 {
        let m2 = self.central_moment(2);
        if m2 <= 0.0 {
            return f64::NAN;
        }
        self.central_moment(3) / m2.powf(1.5)
    }

    fn kurtosis(&self) -> f64 {
        let m2 = self.central_moment(2);
        if m2 <= 0.0 {
            return f64::NAN;
        }
        self.central_moment(4) / (m2 * m2) - 3.0
    }

    fn density(&self, x: f64) -> Result<f64, DistributionError> {
        check_argument(x)?;
        Ok(self
            .weighted()
            .filter(|&(_, v)| v == x)
            .map(|(w, _)| w)
            .sum())
    }

    fn cumulative_density(&self, x: f64) -> Result<f64, DistributionError> {
        check_argument(x)?;
        let mass: f64 = self
            .sorted
            .iter()
            .take_while(|s| s.value() <= x)
            .map(Scenario::probability)
            .sum();
        Ok((mass / self.total_probability).min(1.0))
    }

    fn quantile(&self, p: f64) -> Result<f64, DistributionError> {
        check_probability(p)?;
        let target = p - DISCRETE_QUANTILE_TOLERANCE;
        let mut cumulative = 0.0;
        for scenario in &self.sorted {
            cumulative += scenario.probability() / self.total_probability;
            if cumulative >= target {
                return Ok(scenario.value());
            }
        }
        // Rounding in the running sum can leave p = 1 just out of reach.
        Ok(self.sorted[self.sorted.len() - 1].value())
    }

    fn is_discrete(&self) -> bool {
        true
    }

    fn scenario_count(&self) -> i32 {
        i32::try_from(self.scenarios.len()).unwrap_or(i32::MAX)
    }

    fn scenarios(&self) -> Option<Vec<Scenario>> {
        Some(self.scenarios.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn demand() -> ScenariosDistribution {
        ScenariosDistribution::from_pairs([(0.5, 120.0), (0.2, 80.0), (0.3, 100.0)]).unwrap()
    }

    #[test]
    fn test_scenario_validation() {
        assert!(Scenario::new(1.0, 0.0).is_ok());
        assert!(Scenario::new(-0.1, 0.0).is_err());
        assert!(Scenario::new(1.5, 0.0).is_err());
        assert!(Scenario::new(0.5, f64::NAN).is_err());
        assert!(Scenario::new(0.5, f64::INFINITY).is_err());
    }

    #[test]
    fn test_collection_rejects_excess_probability() {
        let mut collection = ScenarioCollection::new();
        collection.add(0.6, 1.0).unwrap();
        let err = collection.add(0.5, 2.0).unwrap_err();
        assert!(matches!(err, DistributionError::InvalidParameter { .. }));
        // Rejected scenario was not added
        assert_eq!(collection.len(), 1);
        collection.add(0.4, 2.0).unwrap();
        assert!(collection.finish().is_ok());
    }

    #[test]
    fn test_collection_accepts_total_within_tolerance() {
        let mut collection = ScenarioCollection::new();
        collection.add(0.33333, 1.0).unwrap();
        collection.add(0.33333, 2.0).unwrap();
        collection.add(0.33333, 3.0).unwrap();
        assert!(collection.finish().is_ok());
    }

    #[test]
    fn test_finish_rejects_incomplete_or_empty() {
        let mut collection = ScenarioCollection::new();
        collection.add(0.5, 1.0).unwrap();
        assert!(collection.finish().is_err());
        assert!(ScenarioCollection::new().finish().is_err());
    }

    #[test]
    fn test_enumeration_keeps_insertion_order() {
        let dist = demand();
        let values: Vec<f64> = dist.scenarios().unwrap().iter().map(|s| s.value()).collect();
        assert_eq!(values, vec![120.0, 80.0, 100.0]);
        assert_eq!(dist.scenario_count(), 3);
        assert!(dist.is_discrete());
    }

    #[test]
    fn test_moments() {
        let dist = demand();
        assert_relative_eq!(dist.mean(), 106.0, epsilon = 1e-12);
        // E[X^2] = 0.5*14400 + 0.2*6400 + 0.3*10000 = 11480
        assert_relative_eq!(dist.variance(), 11480.0 - 106.0 * 106.0, epsilon = 1e-9);
    }

    #[test]
    fn test_cdf_and_quantile() {
        let dist = demand();
        assert_eq!(dist.cumulative_density(79.0).unwrap(), 0.0);
        assert_relative_eq!(dist.cumulative_density(80.0).unwrap(), 0.2, epsilon = 1e-12);
        assert_relative_eq!(dist.cumulative_density(110.0).unwrap(), 0.5, epsilon = 1e-12);
        assert_relative_eq!(dist.cumulative_density(1e9).unwrap(), 1.0, epsilon = 1e-12);

        assert_eq!(dist.quantile(0.0).unwrap(), 80.0);
        assert_eq!(dist.quantile(0.2).unwrap(), 80.0);
        assert_eq!(dist.quantile(0.21).unwrap(), 100.0);
        assert_eq!(dist.quantile(1.0).unwrap(), 120.0);
        assert!(dist.quantile(1.1).is_err());
    }

    #[test]
    fn test_density_is_mass() {
        let dist = demand();
        assert_relative_eq!(dist.density(100.0).unwrap(), 0.3, epsilon = 1e-12);
        assert_eq!(dist.density(101.0).unwrap(), 0.0);
        assert!(dist.density(f64::NAN).is_err());
    }
}
