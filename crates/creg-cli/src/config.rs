//! # CLI Configuration
//!
//! Optional YAML file with defaults for every subcommand. Looked up from
//! `--config`, then the `CREG_CONFIG` environment variable; without either,
//! built-in defaults apply.
//!
//! ```yaml
//! allow_subset: false
//! output: text        # or json
//! sample:
//!   array_length: 3
//!   max_repeat: 10
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use creg_schema::SampleOptions;
use serde::{Deserialize, Serialize};

/// Environment variable naming the configuration file.
pub const CONFIG_ENV: &str = "CREG_CONFIG";

/// How validation results are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Default for `validate --allow-subset`.
    pub allow_subset: bool,
    pub output: OutputFormat,
    pub sample: SampleOptions,
}

impl CliConfig {
    /// Read a configuration file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read config file {}", path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("invalid config file {}", path.display()))
    }

    /// Resolve the configuration for this invocation.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));

        match path {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading config");
                Self::from_file(&path)
            }
            None => Ok(Self::default()),
        }
    }
}
