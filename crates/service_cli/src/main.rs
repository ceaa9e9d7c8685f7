//! Stochastic CLI - Command Line Operations for the Scenario Engine
//!
//! This is the operational entry point for the stochastic scenario engine.
//!
//! # Commands
//!
//! - `stochastic scenarios --model <file>` - List the generated scenarios
//! - `stochastic build --model <file>` - Build the deterministic equivalent
//! - `stochastic check --model <file>` - Validate a model file
//!
//! # Configuration
//!
//! Models are TOML files (see `demo/newsvendor.toml`). Sampling options may
//! be overridden with `STOCHASTIC_SAMPLING_METHOD`, `STOCHASTIC_SAMPLE_COUNT`,
//! `STOCHASTIC_RANDOM_SEED` and `STOCHASTIC_MAX_SCENARIOS`. Log output is
//! controlled by `RUST_LOG`.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;

pub use error::{CliError, Result};

use commands::OutputFormat;

/// Stochastic Scenario Engine CLI
#[derive(Parser)]
#[command(name = "stochastic")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate and list the scenarios of a model
    Scenarios {
        /// Path to the model file (TOML)
        #[arg(short, long)]
        model: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,

        /// Maximum number of scenarios to print
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Build the deterministic equivalent of a model
    Build {
        /// Path to the model file (TOML)
        #[arg(short, long)]
        model: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Validate a model file
    Check {
        /// Path to the model file (TOML)
        #[arg(short, long)]
        model: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    match cli.command {
        Commands::Scenarios {
            model,
            format,
            limit,
        } => commands::scenarios::run(&model, format, limit)
            .with_context(|| format!("generating scenarios for {}", model.display())),
        Commands::Build { model, format } => commands::build::run(&model, format)
            .with_context(|| format!("building {}", model.display())),
        Commands::Check { model } => {
            commands::check::run(&model).with_context(|| format!("checking {}", model.display()))
        }
    }
}
