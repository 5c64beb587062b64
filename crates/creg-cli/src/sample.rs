//! # Sample Subcommand
//!
//! Generates an example message from a contract. Writes to stdout unless
//! `--out` is given.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use creg_schema::generate_sample;

use crate::config::CliConfig;
use crate::read_input;

/// Arguments for `creg sample`.
#[derive(Args, Debug)]
pub struct SampleArgs {
    /// Contract schema file.
    #[arg(long)]
    pub contract: PathBuf,

    /// Write the sample to this file.
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Default length for arrays without bounds (overrides config).
    #[arg(long)]
    pub array_length: Option<usize>,
}

/// Execute the sample subcommand.
pub fn run_sample(args: &SampleArgs, config: &CliConfig) -> Result<u8> {
    let schema = read_input(&args.contract)?;
    let mut options = config.sample;
    if let Some(length) = args.array_length {
        options.array_length = length;
    }

    let sample = match generate_sample(&schema, options) {
        Ok(sample) => sample,
        Err(e) => {
            eprintln!("{e}");
            return Ok(1);
        }
    };

    match &args.out {
        Some(path) => {
            std::fs::write(path, format!("{sample}\n"))
                .with_context(|| format!("failed to write sample: {}", path.display()))?;
            tracing::info!(path = %path.display(), "sample written");
        }
        None => println!("{sample}"),
    }
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn writes_sample_file() {
        let dir = tempfile::tempdir().unwrap();
        let contract = dir.path().join("contract.json");
        let out = dir.path().join("sample.json");
        std::fs::write(
            &contract,
            r#"{"Contract":{"type":"object","properties":{
                "Tags":{"type":"array","items":{"type":"integer"}}}}}"#,
        )
        .unwrap();

        let args = SampleArgs {
            contract,
            out: Some(out.clone()),
            array_length: Some(2),
        };
        assert_eq!(run_sample(&args, &CliConfig::default()).unwrap(), 0);

        let sample: Value = serde_json::from_str(&std::fs::read_to_string(out).unwrap()).unwrap();
        assert_eq!(sample, serde_json::json!({"Tags": [30, 30]}));
    }

    #[test]
    fn broken_contract_exits_one() {
        let dir = tempfile::tempdir().unwrap();
        let contract = dir.path().join("contract.json");
        let out = dir.path().join("sample.json");
        std::fs::write(&contract, r#"{"Other":{"type":"string"}}"#).unwrap();

        let args = SampleArgs {
            contract,
            out: Some(out.clone()),
            array_length: None,
        };
        assert_eq!(run_sample(&args, &CliConfig::default()).unwrap(), 1);
        assert!(!out.exists());
    }
}
