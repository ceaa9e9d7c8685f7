//! # stochastic_model: Deterministic Equivalent Generation
//!
//! ## Layer 4 (Application) Role
//!
//! stochastic_model folds the scenarios of a two-stage stochastic program
//! into a single linear problem a conventional solver can consume:
//! - [`directive`]: [`StochasticDirective`], sampling threshold and
//!   decomposition request
//! - [`model`]: the [`StochasticModel`] boundary trait and the in-memory
//!   [`LinearStochasticModel`]
//! - [`generator`]: [`StochasticModelGenerator`], the phased build
//! - [`task`]: [`LinearStochasticTask`], the [`LinearSolverSink`] boundary and
//!   the inspecting [`RowCollector`]
//! - [`statistics`]: [`RecourseStatistics`] over solved clone values
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          stochastic_model (L4)          │
//! ├─────────────────────────────────────────┤
//! │  model/      - decisions, constraints,  │
//! │                goals, model boundary    │
//! │  generator/  - phased build             │
//! │  task/       - columns, rows, sink      │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │        stochastic_sampling (L3)         │
//! │  enumeration, Monte Carlo, LHS          │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage Example
//!
//! ```rust
//! use stochastic_core::cancel::NeverAbort;
//! use stochastic_distributions::{DistributedValue, ScenariosDistribution};
//! use stochastic_model::{
//!     BuildOutcome, Decision, Goal, LinearStochasticModel, RowCollector,
//!     StochasticDirective, StochasticModelGenerator, Term,
//! };
//! use stochastic_sampling::SamplingConfig;
//!
//! let cost = ScenariosDistribution::from_pairs([(0.5, 1.0), (0.5, 3.0)]).unwrap();
//! let mut model = LinearStochasticModel::new();
//! model.add_parameter(DistributedValue::new("cost", cost)).unwrap();
//! model.add_decision(Decision::recourse("y")).unwrap();
//! model.add_goal(Goal::minimize("total", vec![Term::new(4.0, "y")]));
//!
//! let mut generator =
//!     StochasticModelGenerator::new(StochasticDirective::default(), SamplingConfig::default());
//! let BuildOutcome::Completed(task) = generator.build(&mut model, &NeverAbort).unwrap() else {
//!     panic!("not cancelled");
//! };
//!
//! let mut sink = RowCollector::new();
//! task.forward(&mut sink).unwrap();
//! assert_eq!(sink.columns.len(), 2);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for model entities and tasks. Infinite
//!   bounds are written by omitting the field.

#![warn(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

#[cfg(feature = "serde")]
mod bounds;
pub mod directive;
pub mod generator;
pub mod ids;
pub mod model;
pub mod statistics;
pub mod task;

pub use directive::{DecompositionType, StochasticDirective};
pub use generator::{BuildOutcome, BuildPhase, StochasticModelGenerator};
pub use ids::DecisionId;
pub use model::{
    Coefficient, Constraint, Decision, DecisionKind, Goal, GoalSense, LinearStochasticModel,
    StochasticModel, Term,
};
pub use statistics::RecourseStatistics;
pub use task::{Column, GoalRow, LinearSolverSink, LinearStochasticTask, Row, RowCollector};
