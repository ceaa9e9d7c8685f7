//! Shared types for the scenario engine.
//!
//! This module provides:
//! - `DistributionError`: failures raised by distributions and numerical kernels
//! - `StochasticError`: the three-way taxonomy surfaced at the solve boundary
//! - `ErrorKind`: classification used to route one into the other

pub mod error;

pub use error::{DistributionError, ErrorKind, StochasticError};
