//! Configuration for the `slots` CLI.
//!
//! Read from a TOML file (default `slots.toml` in the working directory).
//! Every field has a default, so a missing file is not an error. Command-line
//! flags override whatever the file says.

use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Deserialize;

pub const DEFAULT_CONFIG_PATH: &str = "slots.toml";

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Config {
    /// IANA timezone used to decide the sitter's "today".
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default)]
    pub format: OutputFormat,
}

fn default_timezone() -> String {
    "UTC".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            format: OutputFormat::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
}

impl Config {
    /// Load configuration from a specific path, falling back to defaults if absent.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))
    }
}
