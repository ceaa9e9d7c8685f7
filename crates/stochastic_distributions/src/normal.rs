//! Normal distribution.
//!
//! # Mathematical Definition
//! f(x) = φ((x − μ) / σ) / σ,  F(x) = Φ((x − μ) / σ)
//!
//! A zero standard deviation is accepted and yields a point mass at μ.

use stochastic_core::math::{inverse_norm_cdf, norm_cdf, norm_pdf};
use stochastic_core::types::DistributionError;

use crate::distribution::{check_argument, check_probability, UnivariateDistribution};

const FAMILY: &str = "Normal";

/// Normal distribution N(μ, σ²).
///
/// # Examples
///
/// ```
/// use stochastic_distributions::{Normal, UnivariateDistribution};
///
/// let n = Normal::new(0.0, 1.0).unwrap();
/// assert!((n.cumulative_density(0.0).unwrap() - 0.5).abs() < 1e-15);
/// assert!((n.quantile(0.975).unwrap() - 1.959964).abs() < 1e-6);
/// assert!(Normal::new(0.0, -1.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normal {
    mean: f64,
    std_dev: f64,
}

impl Normal {
    /// Creates a normal distribution.
    ///
    /// # Errors
    /// `InvalidParameter` if `mean` is not finite or `std_dev` is negative
    /// or not finite.
    pub fn new(mean: f64, std_dev: f64) -> Result<Self, DistributionError> {
        if !mean.is_finite() {
            return Err(DistributionError::invalid_parameter(
                FAMILY,
                format!("mean must be finite, got {}", mean),
            ));
        }
        if !std_dev.is_finite() || std_dev < 0.0 {
            return Err(DistributionError::invalid_parameter(
                FAMILY,
                format!(
                    "standard deviation must be finite and non-negative, got {}",
                    std_dev
                ),
            ));
        }
        Ok(Self { mean, std_dev })
    }

    /// Standard normal N(0, 1).
    pub fn standard() -> Self {
        Self {
            mean: 0.0,
            std_dev: 1.0,
        }
    }

    /// Location parameter μ.
    pub fn location(&self) -> f64 {
        self.mean
    }

    /// Scale parameter σ.
    pub fn scale(&self) -> f64 {
        self.std_dev
    }
}

impl UnivariateDistribution for Normal {
    fn name(&self) -> &'static str {
        FAMILY
    }

    fn mean(&self) -> f64 {
        self.mean
    }

    fn variance(&self) -> f64 {
        self.std_dev * self.std_dev
    }

    fn standard_deviation(&self) -> f64 {
        self.std_dev
    }

    fn skewness(&self) -> f64 {
        0.0
    }

    fn kurtosis(&self) -> f64 {
        0.0
    }

    fn density(&self, x: f64) -> Result<f64, DistributionError> {
        check_argument(x)?;
        if self.std_dev == 0.0 {
            return Ok(if x == self.mean { f64::INFINITY } else { 0.0 });
        }
        Ok(norm_pdf((x - self.mean) / self.std_dev) / self.std_dev)
    }

    fn cumulative_density(&self, x: f64) -> Result<f64, DistributionError> {
        check_argument(x)?;
        if self.std_dev == 0.0 {
            return Ok(if x < self.mean { 0.0 } else { 1.0 });
        }
        norm_cdf((x - self.mean) / self.std_dev)
    }

    fn quantile(&self, p: f64) -> Result<f64, DistributionError> {
        check_probability(p)?;
        if self.std_dev == 0.0 {
            return Ok(self.mean);
        }
        Ok(self.mean + self.std_dev * inverse_norm_cdf(p)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_moments() {
        let n = Normal::new(100.0, 15.0).unwrap();
        assert_eq!(n.mean(), 100.0);
        assert_relative_eq!(n.variance(), 225.0);
        assert_eq!(n.standard_deviation(), 15.0);
        assert_eq!(n.skewness(), 0.0);
        assert_eq!(n.kurtosis(), 0.0);
    }

    #[test]
    fn test_density_peak() {
        let n = Normal::new(1.0, 2.0).unwrap();
        assert_relative_eq!(
            n.density(1.0).unwrap(),
            0.398_942_280_401_432_7 / 2.0,
            epsilon = 1e-15
        );
    }

    #[test]
    fn test_quantile_endpoints() {
        let n = Normal::standard();
        assert_eq!(n.quantile(0.0).unwrap(), f64::NEG_INFINITY);
        assert_eq!(n.quantile(1.0).unwrap(), f64::INFINITY);
        assert!(n.quantile(-0.1).is_err());
        assert!(n.cumulative_density(f64::NAN).is_err());
    }

    #[test]
    fn test_point_mass() {
        let n = Normal::new(5.0, 0.0).unwrap();
        assert_eq!(n.quantile(0.3).unwrap(), 5.0);
        assert_eq!(n.cumulative_density(4.9).unwrap(), 0.0);
        assert_eq!(n.cumulative_density(5.0).unwrap(), 1.0);
        assert_eq!(n.density(6.0).unwrap(), 0.0);
    }

    #[test]
    fn test_rejects_non_finite_parameters() {
        assert!(Normal::new(f64::NAN, 1.0).is_err());
        assert!(Normal::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_sample_is_inversion() {
        let n = Normal::new(10.0, 3.0).unwrap();
        assert_relative_eq!(
            n.sample(&[0.8]).unwrap(),
            n.quantile(0.8).unwrap(),
            epsilon = 1e-15
        );
        assert!(n.sample(&[]).is_err());
    }
}
