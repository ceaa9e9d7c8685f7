//! Standard normal distribution functions.
//!
//! This module provides:
//! - `norm_pdf`: Probability density function, generic over `T: Float`
//! - `norm_cdf`: Cumulative distribution function built from `erfc`
//! - `inverse_norm_cdf`: Acklam's rational approximation in three bands,
//!   refined by one correction step against `norm_cdf`

use num_traits::Float;

use super::special::erfc;
use crate::types::DistributionError;

/// 1 / sqrt(2 * pi)
const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// sqrt(2 * pi)
const SQRT_2PI: f64 = 2.506_628_274_631_000_5;

/// Lower boundary of the central band.
const P_LOW: f64 = 0.024_25;

/// Upper boundary of the central band.
const P_HIGH: f64 = 1.0 - P_LOW;

/// Central band numerator coefficients.
const A: [f64; 6] = [
    -3.969_683_028_665_376e1,
    2.209_460_984_245_205e2,
    -2.759_285_104_469_687e2,
    1.383_577_518_672_690e2,
    -3.066_479_806_614_716e1,
    2.506_628_277_459_239,
];

/// Central band denominator coefficients.
const B: [f64; 5] = [
    -5.447_609_879_822_406e1,
    1.615_858_368_580_409e2,
    -1.556_989_798_598_866e2,
    6.680_131_188_771_972e1,
    -1.328_068_155_288_572e1,
];

/// Tail band numerator coefficients.
const C: [f64; 6] = [
    -7.784_894_002_430_293e-3,
    -3.223_964_580_411_365e-1,
    -2.400_758_277_161_838,
    -2.549_732_539_343_734,
    4.374_664_141_464_968,
    2.938_163_982_698_783,
];

/// Tail band denominator coefficients.
const D: [f64; 4] = [
    7.784_695_709_041_462e-3,
    3.224_671_290_700_398e-1,
    2.445_134_137_142_996,
    3.754_408_661_907_416,
];

/// Standard normal probability density function.
///
/// # Mathematical Definition
/// φ(x) = (1 / sqrt(2π)) * exp(-x² / 2)
///
/// # Examples
/// ```
/// use stochastic_core::math::norm_pdf;
///
/// assert!((norm_pdf(0.0_f64) - 0.3989422804).abs() < 1e-9);
/// assert!((norm_pdf(1.0_f32) - 0.24197073).abs() < 1e-6);
/// ```
#[inline]
pub fn norm_pdf<T: Float>(x: T) -> T {
    let frac_1_sqrt_2pi = T::from(FRAC_1_SQRT_2PI).unwrap_or_else(T::zero);
    let half = T::from(0.5).unwrap_or_else(T::zero);
    frac_1_sqrt_2pi * (-half * x * x).exp()
}

/// Standard normal cumulative distribution function.
///
/// # Mathematical Definition
/// Φ(x) = ½ erfc(−x / √2)
///
/// # Errors
/// `InvalidArgument` if `x` is NaN.
///
/// # Examples
/// ```
/// use stochastic_core::math::norm_cdf;
///
/// assert!((norm_cdf(0.0).unwrap() - 0.5).abs() < 1e-15);
/// assert!((norm_cdf(1.0).unwrap() - 0.8413447460685429).abs() < 1e-14);
/// ```
pub fn norm_cdf(x: f64) -> Result<f64, DistributionError> {
    if x.is_nan() {
        return Err(DistributionError::invalid_argument("normal CDF argument is NaN"));
    }
    Ok(0.5 * erfc(-x / std::f64::consts::SQRT_2)?)
}

fn lower_tail(p: f64) -> f64 {
    let q = (-2.0 * p.ln()).sqrt();
    (((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
        / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
}

fn central(p: f64) -> f64 {
    let q = p - 0.5;
    let r = q * q;
    (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q
        / (((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0)
}

/// Inverse of the standard normal CDF.
///
/// Acklam's approximation (relative error 1.15e-9) evaluated in the lower
/// tail (p < 0.02425), the central band, or the upper tail, followed by one
/// Halley correction using [`norm_cdf`], which brings the result close to
/// machine precision.
///
/// # Returns
/// `-∞` for `p = 0`, `+∞` for `p = 1`.
///
/// # Errors
/// `InvalidArgument` if `p` is NaN or outside [0, 1].
///
/// # Examples
/// ```
/// use stochastic_core::math::inverse_norm_cdf;
///
/// assert_eq!(inverse_norm_cdf(0.5).unwrap(), 0.0);
/// assert!((inverse_norm_cdf(0.841344746068543).unwrap() - 1.0).abs() < 1e-12);
/// assert_eq!(inverse_norm_cdf(0.0).unwrap(), f64::NEG_INFINITY);
/// ```
pub fn inverse_norm_cdf(p: f64) -> Result<f64, DistributionError> {
    if !(0.0..=1.0).contains(&p) {
        return Err(DistributionError::invalid_argument(format!(
            "probability must lie in [0, 1], got {}",
            p
        )));
    }
    if p == 0.0 {
        return Ok(f64::NEG_INFINITY);
    }
    if p == 1.0 {
        return Ok(f64::INFINITY);
    }
    if p == 0.5 {
        return Ok(0.0);
    }

    let x = if p < P_LOW {
        lower_tail(p)
    } else if p <= P_HIGH {
        central(p)
    } else {
        -lower_tail(1.0 - p)
    };

    let e = norm_cdf(x)? - p;
    let u = e * SQRT_2PI * (0.5 * x * x).exp();
    let refined = x - u / (1.0 + 0.5 * x * u);
    Ok(if refined.is_finite() { refined } else { x })
}
