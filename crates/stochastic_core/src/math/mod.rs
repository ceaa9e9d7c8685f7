//! Numerical kernels shared by every distribution.
//!
//! - [`special`]: Lanczos gamma, regularised incomplete gamma, error function,
//!   Stirling correction terms
//! - [`normal`]: Standard normal density, CDF and inverse CDF
//! - [`probability`]: Probability validity checks and tolerant comparisons
//!
//! Kernels that iterate return `Result` so that a failure to converge surfaces
//! as [`DistributionError::NonConvergence`](crate::types::DistributionError)
//! rather than a silently wrong value.

pub mod normal;
pub mod probability;
pub mod special;

pub use normal::{inverse_norm_cdf, norm_cdf, norm_pdf};
pub use probability::{
    approx_one, approx_zero, at_most_one, is_valid_probability, PROBABILITY_TOLERANCE,
};
pub use special::{
    erf, erfc, gamma, ln_gamma, regularized_gamma_p, regularized_gamma_q, stirling_correction,
};
