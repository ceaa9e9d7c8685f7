//! # Pseudo-Random Source
//!
//! This module provides the reproducible uniform generator that drives every
//! sampling pass of the scenario engine.
//!
//! ## Design Rationale
//!
//! - **Reproducibility**: Identical seeds produce bit-identical sequences, so
//!   resolving the same model twice yields the same scenarios
//! - **Exclusive ownership**: A generator belongs to one scenario generator /
//!   sampling engine pair for the duration of a solve and is never shared
//! - **Boundary semantics**: Interval draws honour open and closed endpoints
//!   by rejection rather than by clamping
//!
//! ## Module Structure
//!
//! - [`prng`]: `PseudoRandom`, the seeded generator
//! - [`interval`]: `Interval`, a real interval with open/closed endpoints
//! - [`source`]: `UniformSource`, the stream interface consumed by rejection
//!   samplers
//!
//! ## Usage Example
//!
//! ```rust
//! use stochastic_core::rng::{Interval, PseudoRandom, UniformSource};
//!
//! let mut rng = PseudoRandom::from_seed(12345);
//!
//! let u = rng.next_double();
//! assert!((0.0..1.0).contains(&u));
//!
//! let stratum = Interval::closed_open(0.25, 0.5).unwrap();
//! let x = rng.next_f64_in(&stratum);
//! assert!(stratum.contains(x));
//!
//! let v = rng.next_uniform();
//! assert!(v > 0.0 && v < 1.0);
//! ```

mod interval;
mod prng;
mod source;

pub use interval::Interval;
pub use prng::{PseudoRandom, DEFAULT_RANDOM_SEED};
pub use source::UniformSource;
