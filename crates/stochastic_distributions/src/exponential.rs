//! Exponential distribution.
//!
//! # Mathematical Definition
//! f(x) = λ e^(−λx),  F(x) = 1 − e^(−λx) for x ≥ 0

use stochastic_core::types::DistributionError;

use crate::distribution::{check_argument, check_probability, UnivariateDistribution};

const FAMILY: &str = "Exponential";

/// Exponential distribution with rate λ.
///
/// # Examples
///
/// ```
/// use stochastic_distributions::{Exponential, UnivariateDistribution};
///
/// let d = Exponential::new(2.0).unwrap();
/// assert_eq!(d.mean(), 0.5);
/// assert!((d.quantile(0.5).unwrap() - std::f64::consts::LN_2 / 2.0).abs() < 1e-15);
/// assert!(Exponential::new(0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Exponential {
    rate: f64,
}

impl Exponential {
    /// Creates an exponential distribution.
    ///
    /// # Errors
    /// `InvalidParameter` unless `rate` is finite and positive.
    pub fn new(rate: f64) -> Result<Self, DistributionError> {
        if !rate.is_finite() || rate <= 0.0 {
            return Err(DistributionError::invalid_parameter(
                FAMILY,
                format!("rate must be finite and positive, got {}", rate),
            ));
        }
        Ok(Self { rate })
    }

    /// Rate parameter λ.
    pub fn rate(&self) -> f64 {
        self.rate
    }
}

impl UnivariateDistribution for Exponential {
    fn name(&self) -> &'static str {
        FAMILY
    }

    fn mean(&self) -> f64 {
        1.0 / self.rate
    }

    fn variance(&self) -> f64 {
        1.0 / (self.rate * self.rate)
    }

    fn skewness(&self) -> f64 {
        2.0
    }

    fn kurtosis(&self) -> f64 {
        6.0
    }

    fn density(&self, x: f64) -> Result<f64, DistributionError> {
        check_argument(x)?;
        if x < 0.0 {
            return Ok(0.0);
        }
        Ok(self.rate * (-self.rate * x).exp())
    }

    fn cumulative_density(&self, x: f64) -> Result<f64, DistributionError> {
        check_argument(x)?;
        if x <= 0.0 {
            return Ok(0.0);
        }
        Ok(-(-self.rate * x).exp_m1())
    }

    fn quantile(&self, p: f64) -> Result<f64, DistributionError> {
        check_probability(p)?;
        Ok(-(-p).ln_1p() / self.rate)
    }
}
