//! Configuration management for flightsearch.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::flight::default_airlines;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default configuration directory name.
const CONFIG_DIR_NAME: &str = "flightsearch";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `FLIGHTSEARCH_`)
/// 2. TOML config file at `~/.config/flightsearch/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Search configuration.
    pub search: SearchConfig,
    /// Filter panel configuration.
    pub filters: FiltersConfig,
    /// Output configuration.
    pub output: OutputConfig,
}

/// Search-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Artificial delay before the static source answers, in milliseconds.
    pub delay_ms: u64,
}

/// Filter panel configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FiltersConfig {
    /// Airlines offered for selection.
    pub airlines: Vec<String>,
}

/// Output-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format: `plain`, `table` or `json`.
    pub format: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { delay_ms: 1000 }
    }
}

impl Default for FiltersConfig {
    fn default() -> Self {
        Self {
            airlines: default_airlines(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "table".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("FLIGHTSEARCH_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for airline in &self.filters.airlines {
            if airline.trim().is_empty() {
                return Err(Error::ConfigValidation {
                    message: "airline names cannot be empty".to_string(),
                });
            }
            if !seen.insert(airline.as_str()) {
                return Err(Error::ConfigValidation {
                    message: format!("duplicate airline: {airline}"),
                });
            }
        }

        if !matches!(self.output.format.as_str(), "plain" | "table" | "json") {
            return Err(Error::ConfigValidation {
                message: format!(
                    "unknown output format '{}' (expected plain, table or json)",
                    self.output.format
                ),
            });
        }

        Ok(())
    }

    /// Get the search delay as a Duration.
    #[must_use]
    pub fn search_delay(&self) -> Duration {
        Duration::from_millis(self.search.delay_ms)
    }
}
