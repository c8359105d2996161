//! # Configuration
//!
//! Coinsieve configuration is managed by [`clapfig`], which handles layered
//! loading from TOML files, environment variables, and programmatic overrides.
//!
//! ## Storage Hierarchy
//!
//! Configuration is resolved in priority order:
//! 1. **Environment variables**: `COINSIEVE__ASSETS_FILE`, `COINSIEVE__OUTPUT`.
//! 2. **Working directory**: `./coinsieve.toml`.
//! 3. **Data directory**: `coinsieve.toml` next to the persisted filters.
//! 4. **Compiled Defaults**: Built-in fallbacks via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `assets_file` | `assets.json` | Asset list read by `coinsieve apply` |
//! | `output` | `table` | Default output of `apply`: `table` or `json` |
//!
//! The storage key of the filter model is fixed and not configurable.

use confique::Config;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How filtered assets are printed.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Table => f.write_str("table"),
            OutputFormat::Json => f.write_str("json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format '{}' (expected table or json)", other)),
        }
    }
}

/// Configuration for coinsieve, stored in `coinsieve.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SieveConfig {
    /// Asset list (JSON array) used when `apply` is given no file.
    #[config(default = "assets.json")]
    pub assets_file: String,

    /// Default output format for `apply`.
    #[config(default = "table")]
    pub output: OutputFormat,
}

impl Default for SieveConfig {
    fn default() -> Self {
        Self {
            assets_file: "assets.json".to_string(),
            output: OutputFormat::Table,
        }
    }
}

impl SieveConfig {
    /// Value of a setting by key, for display.
    pub fn get(&self, key: &str) -> Option<String> {
        match key.replace('-', "_").as_str() {
            "assets_file" => Some(self.assets_file.clone()),
            "output" => Some(self.output.to_string()),
            _ => None,
        }
    }
}
