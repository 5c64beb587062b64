//! # creg CLI entry point
//!
//! Parses command-line arguments, loads the optional configuration file and
//! dispatches to subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use creg_cli::check::{run_check, CheckArgs};
use creg_cli::config::CliConfig;
use creg_cli::sample::{run_sample, SampleArgs};
use creg_cli::show::{run_show, ShowArgs};
use creg_cli::validate::{run_validate, ValidateArgs};

/// Contract registry CLI
///
/// Validates messages against registered contracts, generates sample
/// messages and renders contract outlines.
#[derive(Parser, Debug)]
#[command(name = "creg", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to configuration file (falls back to $CREG_CONFIG).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Test a message against a contract.
    Validate(ValidateArgs),

    /// Generate a sample message from a contract.
    Sample(SampleArgs),

    /// Print a contract outline.
    Show(ShowArgs),

    /// Check a contract against the registry requirements.
    Check(CheckArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let config = match CliConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e:#}");
            return ExitCode::from(2);
        }
    };

    let result = match cli.command {
        Commands::Validate(args) => run_validate(&args, &config),
        Commands::Sample(args) => run_sample(&args, &config),
        Commands::Show(args) => run_show(&args),
        Commands::Check(args) => run_check(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}
