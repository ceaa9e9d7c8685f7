//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod build;
pub mod check;
pub mod scenarios;

use clap::ValueEnum;

/// Output format shared by the commands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table.
    #[default]
    Table,
    /// Pretty-printed JSON.
    Json,
}
