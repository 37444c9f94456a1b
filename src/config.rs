//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.tkgstats.toml` files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Scanner settings.
    #[serde(default)]
    pub scanner: ScannerConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// General application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

/// Dataset scanner settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannerConfig {
    /// Split file extension (without dot).
    #[serde(default = "default_split_extension")]
    pub split_extension: String,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            split_extension: default_split_extension(),
        }
    }
}

fn default_split_extension() -> String {
    "txt".to_string()
}

/// Report settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Number of top entries per ranking.
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// Include per-split summaries by default.
    #[serde(default)]
    pub per_file: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
            per_file: false,
        }
    }
}

fn default_top_n() -> usize {
    5
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(".tkgstats.toml");

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with `stats` CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings, but only
    /// when explicitly provided; an absent flag leaves the config value
    /// in effect.
    pub fn merge_with_args(&mut self, args: &crate::cli::StatsArgs) {
        if let Some(top_n) = args.top_n {
            self.report.top_n = top_n;
        }

        if args.per_file {
            self.report.per_file = true;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
