//! Real intervals with explicit endpoint semantics.

use crate::types::DistributionError;

/// A bounded real interval whose endpoints may each be open or closed.
///
/// # Examples
///
/// ```rust
/// use stochastic_core::rng::Interval;
///
/// let unit = Interval::closed_open(0.0, 1.0).unwrap();
/// assert!(unit.contains(0.0));
/// assert!(!unit.contains(1.0));
///
/// // A degenerate interval must be closed on both sides
/// assert!(Interval::closed(2.0, 2.0).is_ok());
/// assert!(Interval::open(2.0, 2.0).is_err());
///
/// // An open interval needs a representable interior point
/// assert!(Interval::open(1.0, 1.0 + f64::EPSILON).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Interval {
    lower: f64,
    upper: f64,
    lower_closed: bool,
    upper_closed: bool,
}

impl Interval {
    /// Creates an interval, rejecting empty or non-finite ones.
    ///
    /// # Errors
    /// `InvalidArgument` if a bound is not finite, the width overflows,
    /// `lower > upper`, the bounds coincide while either endpoint is open, or
    /// an open interval holds no `f64` strictly between its bounds.
    pub fn new(
        lower: f64,
        upper: f64,
        lower_closed: bool,
        upper_closed: bool,
    ) -> Result<Self, DistributionError> {
        if !lower.is_finite() || !upper.is_finite() {
            return Err(DistributionError::invalid_argument(format!(
                "interval bounds must be finite, got [{}, {}]",
                lower, upper
            )));
        }
        if !(upper - lower).is_finite() {
            return Err(DistributionError::invalid_argument(format!(
                "interval width overflows for [{}, {}]",
                lower, upper
            )));
        }
        let no_interior = !lower_closed && !upper_closed && next_up(lower) >= upper;
        if lower > upper || (lower == upper && !(lower_closed && upper_closed)) || no_interior {
            return Err(DistributionError::invalid_argument(format!(
                "interval {}{}, {}{} is empty",
                if lower_closed { '[' } else { '(' },
                lower,
                upper,
                if upper_closed { ']' } else { ')' },
            )));
        }
        Ok(Self {
            lower,
            upper,
            lower_closed,
            upper_closed,
        })
    }

    /// `[lower, upper]`
    pub fn closed(lower: f64, upper: f64) -> Result<Self, DistributionError> {
        Self::new(lower, upper, true, true)
    }

    /// `(lower, upper)`
    pub fn open(lower: f64, upper: f64) -> Result<Self, DistributionError> {
        Self::new(lower, upper, false, false)
    }

    /// `[lower, upper)`
    pub fn closed_open(lower: f64, upper: f64) -> Result<Self, DistributionError> {
        Self::new(lower, upper, true, false)
    }

    /// `(lower, upper]`
    pub fn open_closed(lower: f64, upper: f64) -> Result<Self, DistributionError> {
        Self::new(lower, upper, false, true)
    }

    /// Lower bound.
    pub fn lower(&self) -> f64 {
        self.lower
    }

    /// Upper bound.
    pub fn upper(&self) -> f64 {
        self.upper
    }

    /// Whether the lower bound belongs to the interval.
    pub fn is_lower_closed(&self) -> bool {
        self.lower_closed
    }

    /// Whether the upper bound belongs to the interval.
    pub fn is_upper_closed(&self) -> bool {
        self.upper_closed
    }

    /// Width of the interval.
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Smallest `f64` inside the interval.
    pub fn first(&self) -> f64 {
        if self.lower_closed {
            self.lower
        } else {
            next_up(self.lower)
        }
    }

    /// Largest `f64` inside the interval.
    pub fn last(&self) -> f64 {
        if self.upper_closed {
            self.upper
        } else {
            next_down(self.upper)
        }
    }

    /// Smallest and largest `f32` inside the interval, if it holds any.
    pub fn f32_members(&self) -> Option<(f32, f32)> {
        // `as` rounds to nearest, so at most one step is needed on each side
        let mut first = self.lower as f32;
        if !self.contains(f64::from(first)) {
            first = next_up_f32(first);
        }
        let mut last = self.upper as f32;
        if !self.contains(f64::from(last)) {
            last = next_down_f32(last);
        }
        let valid = first <= last
            && self.contains(f64::from(first))
            && self.contains(f64::from(last));
        valid.then_some((first, last))
    }

    /// Membership test honouring endpoint semantics.
    pub fn contains(&self, x: f64) -> bool {
        let above = if self.lower_closed {
            x >= self.lower
        } else {
            x > self.lower
        };
        let below = if self.upper_closed {
            x <= self.upper
        } else {
            x < self.upper
        };
        above && below
    }
}

fn next_up(x: f64) -> f64 {
    if x.is_nan() || x == f64::INFINITY {
        x
    } else if x == 0.0 {
        f64::from_bits(1)
    } else if x > 0.0 {
        f64::from_bits(x.to_bits() + 1)
    } else {
        f64::from_bits(x.to_bits() - 1)
    }
}

fn next_down(x: f64) -> f64 {
    -next_up(-x)
}

fn next_up_f32(x: f32) -> f32 {
    if x.is_nan() || x == f32::INFINITY {
        x
    } else if x == 0.0 {
        f32::from_bits(1)
    } else if x > 0.0 {
        f32::from_bits(x.to_bits() + 1)
    } else {
        f32::from_bits(x.to_bits() - 1)
    }
}

fn next_down_f32(x: f32) -> f32 {
    -next_up_f32(-x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_semantics() {
        let interval = Interval::open_closed(-1.0, 1.0).unwrap();
        assert!(!interval.contains(-1.0));
        assert!(interval.contains(1.0));
        assert!(interval.contains(0.0));
        assert!(!interval.contains(f64::NAN));
    }

    #[test]
    fn test_rejects_reversed_bounds() {
        assert!(Interval::closed(1.0, 0.0).is_err());
    }

    #[test]
    fn test_rejects_non_finite() {
        assert!(Interval::closed(0.0, f64::INFINITY).is_err());
        assert!(Interval::closed(f64::NAN, 1.0).is_err());
    }

    #[test]
    fn test_rejects_overflowing_width() {
        assert!(Interval::closed(-f64::MAX, f64::MAX).is_err());
        assert!(Interval::closed(-f64::MAX / 2.0, f64::MAX / 2.0).is_ok());
    }

    #[test]
    fn test_open_interval_needs_interior() {
        let up = f64::from_bits(1.0f64.to_bits() + 1);
        assert!(Interval::open(1.0, up).is_err());
        assert!(Interval::closed_open(1.0, up).is_ok());
        assert!(Interval::open_closed(1.0, up).is_ok());

        let two_up = f64::from_bits(1.0f64.to_bits() + 2);
        let interval = Interval::open(1.0, two_up).unwrap();
        assert_eq!(interval.first(), up);
        assert_eq!(interval.last(), up);
    }

    #[test]
    fn test_first_and_last_members() {
        let interval = Interval::open(-1.0, 0.0).unwrap();
        assert!(interval.contains(interval.first()));
        assert!(interval.contains(interval.last()));
        assert!(interval.last() < 0.0);
        assert_eq!(Interval::closed(2.0, 3.0).unwrap().first(), 2.0);
    }

    #[test]
    fn test_f32_members() {
        let (first, last) = Interval::closed(0.1, 0.2).unwrap().f32_members().unwrap();
        assert!(f64::from(first) >= 0.1 && f64::from(last) <= 0.2);

        // Narrower than f32 resolution around one
        let narrow = Interval::open(1.0 + 1e-12, 1.0 + 2e-12).unwrap();
        assert!(narrow.f32_members().is_none());
    }

    #[test]
    fn test_half_open_degenerate_is_empty() {
        assert!(Interval::closed_open(3.0, 3.0).is_err());
        assert!(Interval::open_closed(3.0, 3.0).is_err());
    }
}
