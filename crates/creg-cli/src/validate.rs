//! # Validate Subcommand
//!
//! Tests a message file against a contract and prints every finding.
//!
//! ```bash
//! creg validate --contract person.json --message msg.json
//! creg validate --contract person.json --message msg.json --allow-subset --json
//! creg validate --contract person.json --message msg.json --deprecated-on 2030-01-01
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Args;

use creg_core::parse_date_time;
use creg_schema::{test_contract_version, test_message, ContractVersion, TestOptions, TestOutcome};

use crate::config::{CliConfig, OutputFormat};
use crate::read_input;

/// Arguments for `creg validate`.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Contract schema file.
    #[arg(long)]
    pub contract: PathBuf,

    /// Message file to test.
    #[arg(long)]
    pub message: PathBuf,

    /// Accept messages that omit contract properties.
    #[arg(long)]
    pub allow_subset: bool,

    /// Deprecation date of this contract version. A past date refuses the
    /// message; a future one adds a warning.
    #[arg(long, value_name = "DATE")]
    pub deprecated_on: Option<String>,

    /// Print the result as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Execute the validate subcommand.
pub fn run_validate(args: &ValidateArgs, config: &CliConfig) -> Result<u8> {
    let outcome = evaluate(args, config)?;
    let format = if args.json {
        OutputFormat::Json
    } else {
        config.output
    };
    println!("{}", render(&outcome, format)?);
    Ok(if outcome.result.is_valid { 0 } else { 1 })
}

/// Run the test without printing anything.
pub fn evaluate(args: &ValidateArgs, config: &CliConfig) -> Result<TestOutcome> {
    let schema = read_input(&args.contract)?;
    let message = read_input(&args.message)?;
    let options = TestOptions {
        allow_subset: args.allow_subset || config.allow_subset,
    };

    let outcome = match &args.deprecated_on {
        Some(date) => {
            let deprecation_date = parse_date_time(date)
                .with_context(|| format!("invalid --deprecated-on value {date:?}"))?;
            let version = ContractVersion {
                schema,
                deprecation_date: Some(deprecation_date),
            };
            test_contract_version(&version, &message, options, Utc::now())
        }
        None => TestOutcome {
            result: test_message(&schema, &message, options),
            warning: None,
        },
    };

    tracing::info!(
        contract = %args.contract.display(),
        valid = outcome.result.is_valid,
        findings = outcome.result.errors.len(),
        "message tested"
    );
    Ok(outcome)
}

/// Format an outcome for the terminal.
pub fn render(outcome: &TestOutcome, format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(outcome)?);
    }

    let mut out = String::new();
    if let Some(warning) = &outcome.warning {
        out.push_str(&format!("warning: {warning}\n"));
    }
    if outcome.result.is_valid {
        out.push_str("Message is valid.");
    } else {
        out.push_str("Message is invalid:");
        for error in &outcome.result.errors {
            out.push_str(&format!("\n  - {error}"));
        }
    }
    Ok(out)
}
