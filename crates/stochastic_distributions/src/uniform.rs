//! Continuous and discrete uniform distributions.

use stochastic_core::types::DistributionError;

use crate::distribution::{check_argument, check_probability, UnivariateDistribution};
use crate::scenario::Scenario;

/// Slack subtracted before rounding `u·n` up, so that `quantile(cdf(k))`
/// returns `k` despite rounding.
const DISCRETE_UNIFORM_SNAP: f64 = 1e-9;

/// Continuous uniform distribution on `[lower, upper]`.
///
/// # Examples
///
/// ```
/// use stochastic_distributions::{ContinuousUniform, UnivariateDistribution};
///
/// let d = ContinuousUniform::new(2.0, 6.0).unwrap();
/// assert_eq!(d.mean(), 4.0);
/// assert_eq!(d.quantile(0.25).unwrap(), 3.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContinuousUniform {
    lower: f64,
    upper: f64,
}

impl ContinuousUniform {
    /// Creates a continuous uniform distribution.
    ///
    /// # Errors
    /// `InvalidParameter` unless both bounds are finite, `lower <= upper`,
    /// and the width `upper - lower` is finite.
    pub fn new(lower: f64, upper: f64) -> Result<Self, DistributionError> {
        if !(upper - lower).is_finite() || lower > upper {
            return Err(DistributionError::invalid_parameter(
                "ContinuousUniform",
                format!("bounds must be finite with lower <= upper, got [{}, {}]", lower, upper),
            ));
        }
        Ok(Self { lower, upper })
    }

    /// Lower bound.
    pub fn lower(&self) -> f64 {
        self.lower
    }

    /// Upper bound.
    pub fn upper(&self) -> f64 {
        self.upper
    }

    fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

impl UnivariateDistribution for ContinuousUniform {
    fn name(&self) -> &'static str {
        "ContinuousUniform"
    }

    fn mean(&self) -> f64 {
        0.5 * (self.lower + self.upper)
    }

    fn variance(&self) -> f64 {
        self.width() * self.width() / 12.0
    }

    fn skewness(&self) -> f64 {
        0.0
    }

    fn kurtosis(&self) -> f64 {
        -1.2
    }

    fn density(&self, x: f64) -> Result<f64, DistributionError> {
        check_argument(x)?;
        if x < self.lower || x > self.upper {
            return Ok(0.0);
        }
        if self.width() == 0.0 {
            return Ok(f64::INFINITY);
        }
        Ok(1.0 / self.width())
    }

    fn cumulative_density(&self, x: f64) -> Result<f64, DistributionError> {
        check_argument(x)?;
        if x < self.lower {
            Ok(0.0)
        } else if x >= self.upper {
            Ok(1.0)
        } else {
            Ok((x - self.lower) / self.width())
        }
    }

    fn quantile(&self, p: f64) -> Result<f64, DistributionError> {
        check_probability(p)?;
        Ok((self.lower + p * self.width()).min(self.upper))
    }
}

/// Discrete uniform distribution on the integers `lower..=upper`.
///
/// # Examples
///
/// ```
/// use stochastic_distributions::{DiscreteUniform, UnivariateDistribution};
///
/// let die = DiscreteUniform::new(1, 6).unwrap();
/// assert_eq!(die.mean(), 3.5);
/// assert_eq!(die.scenario_count(), 6);
/// assert_eq!(die.quantile(0.5).unwrap(), 3.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscreteUniform {
    lower: i32,
    upper: i32,
}

impl DiscreteUniform {
    /// Creates a discrete uniform distribution.
    ///
    /// # Errors
    /// `InvalidParameter` if `lower > upper`.
    pub fn new(lower: i32, upper: i32) -> Result<Self, DistributionError> {
        if lower > upper {
            return Err(DistributionError::invalid_parameter(
                "DiscreteUniform",
                format!("lower bound {} exceeds upper bound {}", lower, upper),
            ));
        }
        Ok(Self { lower, upper })
    }

    /// Smallest support point.
    pub fn lower(&self) -> i32 {
        self.lower
    }

    /// Largest support point.
    pub fn upper(&self) -> i32 {
        self.upper
    }

    /// Number of support points.
    pub fn support_size(&self) -> i64 {
        i64::from(self.upper) - i64::from(self.lower) + 1
    }

    /// Integer-valued quantile.
    ///
    /// # Errors
    /// `InvalidArgument` if `p` is outside `[0, 1]`.
    pub fn quantile_index(&self, p: f64) -> Result<i32, DistributionError> {
        check_probability(p)?;
        let n = self.support_size() as f64;
        let position = (p * n - DISCRETE_UNIFORM_SNAP).ceil().max(1.0).min(n);
        let k = i64::from(self.lower) + position as i64 - 1;
        Ok(k.clamp(i64::from(self.lower), i64::from(self.upper)) as i32)
    }
}

impl UnivariateDistribution for DiscreteUniform {
    fn name(&self) -> &'static str {
        "DiscreteUniform"
    }

    fn mean(&self) -> f64 {
        0.5 * (f64::from(self.lower) + f64::from(self.upper))
    }

    fn variance(&self) -> f64 {
        let n = self.support_size() as f64;
        (n * n - 1.0) / 12.0
    }

    fn skewness(&self) -> f64 {
        if self.lower == self.upper {
            f64::NAN
        } else {
            0.0
        }
    }

    fn kurtosis(&self) -> f64 {
        let n2 = (self.support_size() as f64).powi(2);
        if n2 == 1.0 {
            return f64::NAN;
        }
        -6.0 * (n2 + 1.0) / (5.0 * (n2 - 1.0))
    }

    fn density(&self, x: f64) -> Result<f64, DistributionError> {
        check_argument(x)?;
        let inside = x >= f64::from(self.lower) && x <= f64::from(self.upper);
        if inside && x.fract() == 0.0 {
            Ok(1.0 / self.support_size() as f64)
        } else {
            Ok(0.0)
        }
    }

    fn cumulative_density(&self, x: f64) -> Result<f64, DistributionError> {
        check_argument(x)?;
        if x < f64::from(self.lower) {
            return Ok(0.0);
        }
        if x >= f64::from(self.upper) {
            return Ok(1.0);
        }
        let covered = x.floor() - f64::from(self.lower) + 1.0;
        Ok(covered / self.support_size() as f64)
    }

    fn quantile(&self, p: f64) -> Result<f64, DistributionError> {
        self.quantile_index(p).map(f64::from)
    }

    fn is_discrete(&self) -> bool {
        true
    }

    fn scenario_count(&self) -> i32 {
        i32::try_from(self.support_size()).unwrap_or(i32::MAX)
    }

    fn scenarios(&self) -> Option<Vec<Scenario>> {
        let probability = 1.0 / self.support_size() as f64;
        (self.lower..=self.upper)
            .map(|k| Scenario::new(probability, f64::from(k)).ok())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_continuous_bounds() {
        let d = ContinuousUniform::new(-1.0, 1.0).unwrap();
        assert_eq!(d.cumulative_density(-2.0).unwrap(), 0.0);
        assert_eq!(d.cumulative_density(0.0).unwrap(), 0.5);
        assert_eq!(d.cumulative_density(1.0).unwrap(), 1.0);
        assert_eq!(d.density(0.3).unwrap(), 0.5);
        assert_eq!(d.quantile(0.0).unwrap(), -1.0);
        assert_eq!(d.quantile(1.0).unwrap(), 1.0);
        assert_relative_eq!(d.kurtosis(), -1.2);
        assert!(ContinuousUniform::new(1.0, 0.0).is_err());
    }

    #[test]
    fn test_continuous_rejects_overflowing_width() {
        assert!(ContinuousUniform::new(-f64::MAX, f64::MAX).is_err());
        assert!(ContinuousUniform::new(f64::NEG_INFINITY, 0.0).is_err());
        assert!(ContinuousUniform::new(f64::NAN, 1.0).is_err());

        let half = ContinuousUniform::new(-f64::MAX / 2.0, f64::MAX / 2.0).unwrap();
        assert!(half.quantile(0.75).unwrap().is_finite());
    }

    #[test]
    fn test_continuous_degenerate() {
        let d = ContinuousUniform::new(3.0, 3.0).unwrap();
        assert_eq!(d.quantile(0.7).unwrap(), 3.0);
        assert_eq!(d.cumulative_density(3.0).unwrap(), 1.0);
        assert_eq!(d.variance(), 0.0);
    }

    #[test]
    fn test_discrete_quantile_strata() {
        let d = DiscreteUniform::new(1, 4).unwrap();
        assert_eq!(d.quantile_index(0.0).unwrap(), 1);
        assert_eq!(d.quantile_index(0.1).unwrap(), 1);
        assert_eq!(d.quantile_index(0.25).unwrap(), 1);
        assert_eq!(d.quantile_index(0.26).unwrap(), 2);
        assert_eq!(d.quantile_index(0.75).unwrap(), 3);
        assert_eq!(d.quantile_index(0.999).unwrap(), 4);
        assert_eq!(d.quantile_index(1.0).unwrap(), 4);
    }

    #[test]
    fn test_discrete_round_trip() {
        let d = DiscreteUniform::new(-3, 7).unwrap();
        for k in -3..=7 {
            let p = d.cumulative_density(f64::from(k)).unwrap();
            assert_eq!(d.quantile_index(p).unwrap(), k);
        }
    }

    #[test]
    fn test_discrete_scenarios() {
        let d = DiscreteUniform::new(0, 2).unwrap();
        let scenarios = d.scenarios().unwrap();
        assert_eq!(scenarios.len(), 3);
        let total: f64 = scenarios.iter().map(|s| s.probability()).sum();
        assert_relative_eq!(total, 1.0, epsilon = 1e-15);
        assert_eq!(scenarios[2].value(), 2.0);
    }

    #[test]
    fn test_discrete_moments() {
        let die = DiscreteUniform::new(1, 6).unwrap();
        assert_relative_eq!(die.variance(), 35.0 / 12.0, epsilon = 1e-15);
        assert_relative_eq!(die.kurtosis(), -6.0 * 37.0 / (5.0 * 35.0), epsilon = 1e-15);
        assert!(DiscreteUniform::new(3, 3).unwrap().kurtosis().is_nan());
        assert!(DiscreteUniform::new(4, 3).is_err());
    }

    #[test]
    fn test_full_range_count_saturates() {
        let d = DiscreteUniform::new(i32::MIN, i32::MAX).unwrap();
        assert_eq!(d.scenario_count(), i32::MAX);
    }
}
