//! # stochastic_sampling: Scenario Generation Engine
//!
//! ## Layer 3 (Engine) Role
//!
//! stochastic_sampling turns an ordered set of distributed values into a
//! stream of weighted scenarios:
//! - [`config`]: sampling method, sample count and seed, with a validating
//!   builder
//! - [`engine`]: [`SamplingEngine`], Monte Carlo and Latin Hypercube draws
//! - [`enumerate`]: [`CrossProduct`], exact enumeration of finite supports
//! - [`generator`]: [`ScenarioGenerator`], which picks enumeration or
//!   sampling and hands out owned [`ScenarioSample`]s one pull at a time
//!
//! ## Usage Example
//!
//! ```rust
//! use stochastic_core::cancel::NeverAbort;
//! use stochastic_distributions::{DiscreteUniform, DistributedValue};
//! use stochastic_sampling::{SamplingConfig, ScenarioGenerator, ScenarioPull};
//!
//! let values = vec![DistributedValue::new("die", DiscreteUniform::new(1, 6).unwrap())];
//! let mut generator = ScenarioGenerator::new(values, &SamplingConfig::default(), 500).unwrap();
//! assert!(!generator.sampling_needed());
//!
//! let mut total = 0.0;
//! while let ScenarioPull::Scenario(sample) = generator.next_scenario(&NeverAbort).unwrap() {
//!     total += sample.probability;
//! }
//! assert!((total - 1.0).abs() < 1e-12);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for configuration and scenario samples

#![warn(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod config;
pub mod engine;
pub mod enumerate;
pub mod error;
pub mod generator;

pub use config::{
    SamplingConfig, SamplingConfigBuilder, SamplingMethod, DEFAULT_LATIN_HYPERCUBE_SAMPLES,
    DEFAULT_MONTE_CARLO_SAMPLES, DEFAULT_SCENARIO_THRESHOLD, MAX_ENUMERATED_SUPPORT, MAX_SAMPLES,
};
pub use engine::{SamplingEngine, SamplingScheme};
pub use enumerate::CrossProduct;
pub use error::ConfigError;
pub use generator::{ScenarioGenerator, ScenarioPull, ScenarioSample};
