//! Log-normal distribution.
//!
//! # Mathematical Definition
//! X = exp(μ + σZ) with Z ~ N(0, 1), supported on (0, ∞).

use stochastic_core::math::{inverse_norm_cdf, norm_cdf, norm_pdf};
use stochastic_core::types::DistributionError;

use crate::distribution::{check_argument, check_probability, UnivariateDistribution};

const FAMILY: &str = "LogNormal";

/// Log-normal distribution parameterised by the mean μ and standard
/// deviation σ of the underlying normal.
///
/// # Examples
///
/// ```
/// use stochastic_distributions::{LogNormal, UnivariateDistribution};
///
/// let d = LogNormal::new(0.0, 0.5).unwrap();
/// assert!((d.quantile(0.5).unwrap() - 1.0).abs() < 1e-12);
/// assert_eq!(d.cumulative_density(-1.0).unwrap(), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogNormal {
    mu: f64,
    sigma: f64,
}

impl LogNormal {
    /// Creates a log-normal distribution.
    ///
    /// # Errors
    /// `InvalidParameter` if `mu` is not finite or `sigma` is negative or
    /// not finite.
    pub fn new(mu: f64, sigma: f64) -> Result<Self, DistributionError> {
        if !mu.is_finite() {
            return Err(DistributionError::invalid_parameter(
                FAMILY,
                format!("log-mean must be finite, got {}", mu),
            ));
        }
        if !sigma.is_finite() || sigma < 0.0 {
            return Err(DistributionError::invalid_parameter(
                FAMILY,
                format!(
                    "log-standard deviation must be finite and non-negative, got {}",
                    sigma
                ),
            ));
        }
        Ok(Self { mu, sigma })
    }

    /// Mean of the underlying normal.
    pub fn mu(&self) -> f64 {
        self.mu
    }

    /// Standard deviation of the underlying normal.
    pub fn sigma(&self) -> f64 {
        self.sigma
    }
}

impl UnivariateDistribution for LogNormal {
    fn name(&self) -> &'static str {
        FAMILY
    }

    fn mean(&self) -> f64 {
        (self.mu + 0.5 * self.sigma * self.sigma).exp()
    }

    fn variance(&self) -> f64 {
        let s2 = self.sigma * self.sigma;
        s2.exp_m1() * (2.0 * self.mu + s2).exp()
    }

    fn skewness(&self) -> f64 {
        let s2 = self.sigma * self.sigma;
        (s2.exp() + 2.0) * s2.exp_m1().sqrt()
    }

    fn kurtosis(&self) -> f64 {
        let s2 = self.sigma * self.sigma;
        (4.0 * s2).exp() + 2.0 * (3.0 * s2).exp() + 3.0 * (2.0 * s2).exp() - 6.0
    }

    fn density(&self, x: f64) -> Result<f64, DistributionError> {
        check_argument(x)?;
        if x <= 0.0 {
            return Ok(0.0);
        }
        if self.sigma == 0.0 {
            return Ok(if x == self.mu.exp() { f64::INFINITY } else { 0.0 });
        }
        let z = (x.ln() - self.mu) / self.sigma;
        Ok(norm_pdf(z) / (x * self.sigma))
    }

    fn cumulative_density(&self, x: f64) -> Result<f64, DistributionError> {
        check_argument(x)?;
        if x <= 0.0 {
            return Ok(0.0);
        }
        if self.sigma == 0.0 {
            return Ok(if x < self.mu.exp() { 0.0 } else { 1.0 });
        }
        norm_cdf((x.ln() - self.mu) / self.sigma)
    }

    fn quantile(&self, p: f64) -> Result<f64, DistributionError> {
        check_probability(p)?;
        if self.sigma == 0.0 {
            return Ok(self.mu.exp());
        }
        Ok((self.mu + self.sigma * inverse_norm_cdf(p)?).exp())
    }
}
