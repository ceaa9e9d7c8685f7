//! Geometric distribution.
//!
//! # Mathematical Definition
//! Number of failures before the first success:
//! P(X = k) = p(1 − p)^k,  F(k) = 1 − (1 − p)^(k+1) for k = 0, 1, 2, …

use stochastic_core::types::DistributionError;

use crate::distribution::{
    check_argument, check_probability, to_support_index, UnivariateDistribution,
};

const FAMILY: &str = "Geometric";

/// Relative slack subtracted from the log ratio before flooring, so that a
/// ratio landing a rounding error above an integer is not pushed past it.
const RATIO_SNAP: f64 = 1e-10;

/// Geometric distribution with success probability `p`.
///
/// # Examples
///
/// ```
/// use stochastic_distributions::{Geometric, UnivariateDistribution};
///
/// let g = Geometric::new(0.25).unwrap();
/// assert_eq!(g.mean(), 3.0);
/// assert_eq!(g.quantile(0.25).unwrap(), 0.0);
/// assert_eq!(g.quantile(0.26).unwrap(), 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometric {
    probability: f64,
}

impl Geometric {
    /// Creates a geometric distribution.
    ///
    /// # Errors
    /// `InvalidParameter` unless `0 < probability <= 1`.
    pub fn new(probability: f64) -> Result<Self, DistributionError> {
        if !(probability > 0.0 && probability <= 1.0) {
            return Err(DistributionError::invalid_parameter(
                FAMILY,
                format!("probability must lie in (0, 1], got {}", probability),
            ));
        }
        Ok(Self { probability })
    }

    /// Success probability `p`.
    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// Integer-valued quantile.
    ///
    /// # Errors
    /// `InvalidArgument` for `p` outside `[0, 1]`; `OutOfRange` if the
    /// result does not fit a 32-bit integer (including `p = 1`).
    pub fn quantile_index(&self, p: f64) -> Result<i32, DistributionError> {
        check_probability(p)?;
        if self.probability == 1.0 || p == 0.0 {
            return Ok(0);
        }
        // Smallest k with 1 − (1 − prob)^(k+1) >= p is ceil(ratio) − 1.
        let ratio = (-p).ln_1p() / (-self.probability).ln_1p();
        let snapped = ratio - RATIO_SNAP * ratio.abs().max(1.0);
        let k = snapped.ceil() - 1.0;
        to_support_index(k.max(0.0), FAMILY)
    }
}

impl UnivariateDistribution for Geometric {
    fn name(&self) -> &'static str {
        FAMILY
    }

    fn mean(&self) -> f64 {
        (1.0 - self.probability) / self.probability
    }

    fn variance(&self) -> f64 {
        (1.0 - self.probability) / (self.probability * self.probability)
    }

    fn skewness(&self) -> f64 {
        if self.probability == 1.0 {
            return f64::NAN;
        }
        (2.0 - self.probability) / (1.0 - self.probability).sqrt()
    }

    fn kurtosis(&self) -> f64 {
        if self.probability == 1.0 {
            return f64::NAN;
        }
        6.0 + self.probability * self.probability / (1.0 - self.probability)
    }

    fn density(&self, x: f64) -> Result<f64, DistributionError> {
        check_argument(x)?;
        if x < 0.0 || x.fract() != 0.0 {
            return Ok(0.0);
        }
        if self.probability == 1.0 {
            return Ok(if x == 0.0 { 1.0 } else { 0.0 });
        }
        Ok(self.probability * (x * (-self.probability).ln_1p()).exp())
    }

    fn cumulative_density(&self, x: f64) -> Result<f64, DistributionError> {
        check_argument(x)?;
        if x < 0.0 {
            return Ok(0.0);
        }
        if self.probability == 1.0 || x == f64::INFINITY {
            return Ok(1.0);
        }
        let k = x.floor();
        Ok(-((k + 1.0) * (-self.probability).ln_1p()).exp_m1())
    }

    fn quantile(&self, p: f64) -> Result<f64, DistributionError> {
        self.quantile_index(p).map(f64::from)
    }

    fn is_discrete(&self) -> bool {
        true
    }
}
