//! # stochastic_distributions: Uncertain Parameters for the Scenario Engine
//!
//! ## Layer 2 (Distributions) Role
//!
//! stochastic_distributions sits on top of stochastic_core and provides:
//! - The [`UnivariateDistribution`] interface: moments, density, cumulative
//!   density, quantile and sampling
//! - Continuous families: [`Normal`], [`LogNormal`], [`Exponential`],
//!   [`ContinuousUniform`]
//! - Discrete families: [`Binomial`], [`Geometric`], [`DiscreteUniform`]
//! - Finite user-supplied outcomes: [`Scenario`], [`ScenarioCollection`],
//!   [`ScenariosDistribution`]
//! - [`Distribution`]: a static-dispatch enum over all families
//! - [`DistributedValue`]: a named random parameter of a model
//!
//! ## Sampling Contract
//!
//! Every family reports how many uniform variates it consumes per sample
//! through [`RandomNumberNeeded`]. Families consuming exactly one variate
//! sample by inversion and can be stratified (Latin Hypercube). The
//! large-mean binomial needs an open-ended stream and is sampled by
//! acceptance-rejection.
//!
//! ## Usage Examples
//!
//! ```rust
//! use stochastic_distributions::{Distribution, Normal, UnivariateDistribution};
//!
//! let demand: Distribution = Normal::new(100.0, 15.0).unwrap().into();
//! assert_eq!(demand.mean(), 100.0);
//!
//! let median = demand.quantile(0.5).unwrap();
//! assert!((median - 100.0).abs() < 1e-12);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for identifiers and scenarios

#![warn(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod binomial;
pub mod distributed_value;
pub mod distribution;
pub mod distribution_enum;
pub mod exponential;
pub mod geometric;
pub mod lognormal;
pub mod normal;
pub mod scenario;
pub mod uniform;

pub use binomial::Binomial;
pub use distributed_value::{DistributedValue, ParameterId};
pub use distribution::{RandomNumberNeeded, UnivariateDistribution, SCENARIO_COUNT_UNBOUNDED};
pub use distribution_enum::Distribution;
pub use exponential::Exponential;
pub use geometric::Geometric;
pub use lognormal::LogNormal;
pub use normal::Normal;
pub use scenario::{Scenario, ScenarioCollection, ScenariosDistribution};
pub use uniform::{ContinuousUniform, DiscreteUniform};
