//! # Check Subcommand
//!
//! Reports whether a contract meets the registry requirements: it must
//! resolve cleanly and define `Id` and `Timestamp` properties.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use creg_schema::{build_schema_dictionary, check_contract_requirements};

use crate::read_input;

/// Arguments for `creg check`.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Contract schema file.
    #[arg(long)]
    pub contract: PathBuf,
}

/// Execute the check subcommand.
pub fn run_check(args: &CheckArgs) -> Result<u8> {
    let schema = read_input(&args.contract)?;
    let findings = findings(&schema);
    if findings.is_empty() {
        println!("Contract meets registry requirements.");
        return Ok(0);
    }
    for finding in &findings {
        println!("  - {finding}");
    }
    Ok(1)
}

/// Structural errors first; requirement findings only for contracts that
/// resolve.
pub fn findings(schema: &str) -> Vec<String> {
    match build_schema_dictionary(schema) {
        Ok(dictionary) => check_contract_requirements(&dictionary),
        Err(e) => vec![e.to_string()],
    }
}
