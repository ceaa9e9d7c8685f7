//! The univariate distribution interface.
//!
//! Every family in this crate implements [`UnivariateDistribution`]. The
//! trait separates two sampling paths:
//!
//! - [`UnivariateDistribution::sample`] maps a fixed slice of uniforms to a
//!   value. Families needing a single uniform sample by inversion, which is
//!   what makes Latin Hypercube stratification meaningful.
//! - [`UnivariateDistribution::sample_from`] pulls as many uniforms as it
//!   needs from a [`UniformSource`], polling an [`AbortCheck`] inside any
//!   open-ended loop.

use stochastic_core::cancel::AbortCheck;
use stochastic_core::rng::UniformSource;
use stochastic_core::types::DistributionError;

use crate::scenario::Scenario;

/// Scenario count reported by distributions with infinite or continuous
/// support.
pub const SCENARIO_COUNT_UNBOUNDED: i32 = i32::MAX;

/// Tolerance used when walking a discrete cumulative distribution.
///
/// A support point `k` satisfies a quantile request for `p` once
/// `F(k) >= p - DISCRETE_QUANTILE_TOLERANCE`, so that `quantile(cdf(k))`
/// lands on `k` despite rounding in the accumulated sum.
pub(crate) const DISCRETE_QUANTILE_TOLERANCE: f64 = 1e-12;

/// Number of uniform variates a distribution consumes per sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RandomNumberNeeded {
    /// Exactly this many uniforms per sample.
    Fixed(usize),
    /// An open-ended number of uniforms (acceptance-rejection).
    Dynamic,
}

/// A univariate probability distribution.
///
/// Moments follow the usual conventions; `kurtosis` is the *excess*
/// kurtosis, zero for the normal distribution. Moments that are undefined
/// for a degenerate parameterisation are `NaN`.
///
/// # Errors
///
/// Evaluation functions reject `NaN` arguments and `quantile` rejects
/// probabilities outside `[0, 1]` with
/// [`DistributionError::InvalidArgument`].
pub trait UnivariateDistribution {
    /// Family name used in diagnostics.
    fn name(&self) -> &'static str;

    /// Expected value.
    fn mean(&self) -> f64;

    /// Variance.
    fn variance(&self) -> f64;

    /// Standard deviation.
    fn standard_deviation(&self) -> f64 {
        self.variance().sqrt()
    }

    /// Skewness.
    fn skewness(&self) -> f64;

    /// Excess kurtosis.
    fn kurtosis(&self) -> f64;

    /// Probability density (continuous) or mass (discrete) at `x`.
    fn density(&self, x: f64) -> Result<f64, DistributionError>;

    /// `P(X <= x)`.
    fn cumulative_density(&self, x: f64) -> Result<f64, DistributionError>;

    /// Inverse of the cumulative distribution at `p`.
    ///
    /// For discrete families this is the smallest support point whose
    /// cumulative probability reaches `p`.
    fn quantile(&self, p: f64) -> Result<f64, DistributionError>;

    /// Whether the support is discrete.
    fn is_discrete(&self) -> bool {
        false
    }

    /// Number of distinct outcomes, or [`SCENARIO_COUNT_UNBOUNDED`].
    fn scenario_count(&self) -> i32 {
        SCENARIO_COUNT_UNBOUNDED
    }

    /// Enumerates `(probability, value)` outcomes when the support is
    /// finite; `None` otherwise.
    fn scenarios(&self) -> Option<Vec<Scenario>> {
        None
    }

    /// Uniform variates consumed per sample.
    fn random_number_needed(&self) -> RandomNumberNeeded {
        RandomNumberNeeded::Fixed(1)
    }

    /// Whether samples can be stratified across the unit interval.
    fn supports_latin_hypercube(&self) -> bool {
        self.random_number_needed() == RandomNumberNeeded::Fixed(1)
    }

    /// Maps uniforms in (0, 1) to a sample.
    ///
    /// The default implementation inverts the first uniform.
    fn sample(&self, uniforms: &[f64]) -> Result<f64, DistributionError> {
        let u = uniforms.first().copied().ok_or_else(|| {
            DistributionError::invalid_argument(format!(
                "{} needs at least one uniform variate",
                self.name()
            ))
        })?;
        self.quantile(u)
    }

    /// Draws a sample, pulling uniforms from `source` as needed.
    ///
    /// Fixed-count families pull exactly their count and delegate to
    /// [`sample`](Self::sample). Families with a dynamic count override this.
    fn sample_from(
        &self,
        source: &mut dyn UniformSource,
        abort: &dyn AbortCheck,
    ) -> Result<f64, DistributionError> {
        match self.random_number_needed() {
            RandomNumberNeeded::Fixed(count) => {
                abort.check()?;
                let uniforms: Vec<f64> = (0..count).map(|_| source.next_uniform()).collect();
                self.sample(&uniforms)
            }
            RandomNumberNeeded::Dynamic => Err(DistributionError::invalid_argument(format!(
                "{} requires a dynamic sampler",
                self.name()
            ))),
        }
    }
}

/// Rejects `NaN` evaluation arguments.
#[inline]
pub(crate) fn check_argument(x: f64) -> Result<(), DistributionError> {
    if x.is_nan() {
        Err(DistributionError::invalid_argument(
            "cannot evaluate a distribution at NaN",
        ))
    } else {
        Ok(())
    }
}

/// Rejects quantile arguments outside `[0, 1]`.
#[inline]
pub(crate) fn check_probability(p: f64) -> Result<(), DistributionError> {
    if (0.0..=1.0).contains(&p) {
        Ok(())
    } else {
        Err(DistributionError::invalid_argument(format!(
            "quantile probability must lie in [0, 1], got {}",
            p
        )))
    }
}

/// Converts an integer-valued support point to `i32`.
#[inline]
pub(crate) fn to_support_index(value: f64, family: &str) -> Result<i32, DistributionError> {
    if value.is_finite() && value >= f64::from(i32::MIN) && value <= f64::from(i32::MAX) {
        Ok(value as i32)
    } else {
        Err(DistributionError::OutOfRange(format!(
            "{} quantile {} does not fit a 32-bit integer",
            family, value
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_probability_bounds() {
        assert!(check_probability(0.0).is_ok());
        assert!(check_probability(1.0).is_ok());
        assert!(check_probability(-1e-15).is_err());
        assert!(check_probability(1.0 + 1e-15).is_err());
        assert!(check_probability(f64::NAN).is_err());
    }

    #[test]
    fn test_check_argument_rejects_nan() {
        assert!(check_argument(0.0).is_ok());
        assert!(check_argument(f64::INFINITY).is_ok());
        assert!(matches!(
            check_argument(f64::NAN),
            Err(DistributionError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_support_index_overflow() {
        assert_eq!(to_support_index(42.0, "Test").unwrap(), 42);
        assert!(matches!(
            to_support_index(3.0e9, "Test"),
            Err(DistributionError::OutOfRange(_))
        ));
        assert!(to_support_index(f64::INFINITY, "Test").is_err());
    }
}
