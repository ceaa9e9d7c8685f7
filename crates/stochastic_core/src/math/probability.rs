//! Probability validity checks and tolerant comparisons.

/// Tolerance used when accumulating scenario probabilities.
pub const PROBABILITY_TOLERANCE: f64 = 1e-4;

/// Returns `true` for a finite value in [0, 1].
///
/// # Examples
/// ```
/// use stochastic_core::math::is_valid_probability;
///
/// assert!(is_valid_probability(0.0));
/// assert!(is_valid_probability(1.0));
/// assert!(!is_valid_probability(1.0 + 1e-12));
/// assert!(!is_valid_probability(f64::NAN));
/// ```
#[inline]
pub fn is_valid_probability(p: f64) -> bool {
    (0.0..=1.0).contains(&p)
}

/// Returns `true` when `value` is within [`PROBABILITY_TOLERANCE`] of one.
#[inline]
pub fn approx_one(value: f64) -> bool {
    (value - 1.0).abs() <= PROBABILITY_TOLERANCE
}

/// Returns `true` when `value` is within [`PROBABILITY_TOLERANCE`] of zero.
#[inline]
pub fn approx_zero(value: f64) -> bool {
    value.abs() <= PROBABILITY_TOLERANCE
}

/// Returns `true` when `value` does not exceed one by more than the tolerance.
#[inline]
pub fn at_most_one(value: f64) -> bool {
    value <= 1.0 + PROBABILITY_TOLERANCE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approx_one() {
        assert!(approx_one(1.0));
        assert!(approx_one(0.99995));
        assert!(approx_one(1.00005));
        assert!(!approx_one(0.9998));
        assert!(!approx_one(f64::NAN));
    }

    #[test]
    fn test_approx_zero() {
        assert!(approx_zero(0.0));
        assert!(approx_zero(-5e-5));
        assert!(!approx_zero(2e-4));
    }

    #[test]
    fn test_at_most_one() {
        assert!(at_most_one(1.00009));
        assert!(!at_most_one(1.1));
    }
}
