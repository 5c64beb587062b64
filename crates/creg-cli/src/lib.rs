//! # creg-cli: Contract Registry CLI
//!
//! Provides the `creg` command-line interface over `creg-schema`.
//!
//! ## Subcommands
//!
//! - `creg validate`: Test a message file against a contract.
//! - `creg sample`: Generate an example message from a contract.
//! - `creg show`: Print the contract as a text or HTML outline.
//! - `creg check`: Check a contract against the registry requirements.
//!
//! ```bash
//! creg validate --contract person.json --message msg.json --allow-subset
//! creg sample --contract person.json --out sample.json
//! creg show --contract person.json --html
//! ```
//!
//! Every handler returns the process exit code: `0` on success, `1` when
//! the input was rejected. Operational failures (unreadable files, bad
//! config) propagate as `anyhow::Error` and exit with `2`.

pub mod check;
pub mod config;
pub mod sample;
pub mod show;
pub mod validate;

use std::path::Path;

use anyhow::{Context, Result};

/// Read a contract or message file.
pub fn read_input(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))
}
