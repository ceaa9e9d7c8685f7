//! # stochastic_core: Foundation for the Stochastic Scenario Engine
//!
//! ## Layer 1 (Foundation) Role
//!
//! stochastic_core is the bottom layer of the workspace, providing:
//! - Shared numerical kernels (`math`): Lanczos gamma, regularised incomplete
//!   gamma, error function, normal CDF and its inverse, Stirling corrections
//! - Probability validity and tolerance helpers (`math::probability`)
//! - A seeded, reproducible pseudo-random source (`rng`)
//! - Cooperative cancellation predicates (`cancel`)
//! - Error taxonomy: `DistributionError`, `StochasticError` (`types::error`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other stochastic_* crates, with minimal
//! external dependencies:
//! - num-traits: generic floating-point helpers
//! - rand: the underlying `StdRng` generator
//! - thiserror: error derives
//! - serde: serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use stochastic_core::math::{inverse_norm_cdf, norm_cdf};
//! use stochastic_core::rng::PseudoRandom;
//!
//! let x = inverse_norm_cdf(0.975).unwrap();
//! assert!((x - 1.959964).abs() < 1e-6);
//! assert!((norm_cdf(x).unwrap() - 0.975).abs() < 1e-12);
//!
//! let mut rng = PseudoRandom::from_seed(42);
//! let u = rng.next_double();
//! assert!((0.0..1.0).contains(&u));
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for error values and intervals

#![warn(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod cancel;
pub mod math;
pub mod rng;
pub mod types;
