//! Loanrisk CLI - Command Line Operations for Scenario Adjustment
//!
//! This is the operational entry point for the loanrisk scenario
//! adjustment engine.
//!
//! # Commands
//!
//! - `loanrisk run --catalog <file> --loans <file> --scenario <id>` -
//!   Evaluate a loan file against a scenario and emit adjusted assumptions
//! - `loanrisk validate --catalog <file> --scenario <id>` - Resolve a
//!   scenario's configuration without running it
//!
//! # Architecture
//!
//! As the service layer, this crate orchestrates the domain and engine
//! layers to provide a unified command-line interface.

use clap::{Parser, Subcommand};
use loanrisk_engine::DEFAULT_BATCH_SIZE;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod error;
mod input;

pub use error::{CliError, Result};

/// Loanrisk Scenario Adjustment CLI
#[derive(Parser)]
#[command(name = "loanrisk")]
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
    /// Evaluate a loan file against a scenario
    Run {
        /// Path to the catalog file (JSON configuration tables)
        #[arg(short, long)]
        catalog: String,

        /// Path to the loan file (JSON array of loan records)
        #[arg(short, long)]
        loans: String,

        /// Scenario identifier to run
        #[arg(short, long)]
        scenario: u64,

        /// Work items per parallel batch
        #[arg(short, long, default_value_t = DEFAULT_BATCH_SIZE)]
        batch_size: usize,

        /// Output file for adjusted-assumption records (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Resolve a scenario's configuration without running it
    Validate {
        /// Path to the catalog file
        #[arg(short, long)]
        catalog: String,

        /// Scenario identifier to validate
        #[arg(short, long)]
        scenario: u64,
    },
}

fn main() -> Result<()> {
    // Initialise tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    match cli.command {
        Commands::Run {
            catalog,
            loans,
            scenario,
            batch_size,
            output,
        } => commands::run::run(&catalog, &loans, scenario, batch_size, output.as_deref()),
        Commands::Validate { catalog, scenario } => commands::validate::run(&catalog, scenario),
    }
}
