//! Configuration for love-sandwiches
//!
//! Settings come from a TOML file, then `LOVE_SANDWICHES_*` environment
//! variables, then command-line flags, each layer overriding the last.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::forecast::ForecastSettings;
use crate::worksheet::{BackendType, WorksheetConfig};

pub mod loader;

pub use loader::ConfigLoader;

/// File name looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "love-sandwiches.toml";

/// Prefix shared by every environment override
pub const ENV_PREFIX: &str = "LOVE_SANDWICHES_";

/// Settings that can be overridden from the environment, without the prefix
pub const ENV_OVERRIDES: [&str; 7] = [
    "BACKEND",
    "DATA_DIR",
    "SPREADSHEET_ID",
    "ACCESS_TOKEN",
    "LOG_LEVEL",
    "FORECAST_WINDOW",
    "SHORT_HISTORY",
];

/// Location of the per-user configuration file
pub fn global_config_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "love-sandwiches", "love-sandwiches")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub storage: WorksheetConfig,

    #[serde(default)]
    pub forecast: ForecastSettings,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            storage: WorksheetConfig::default(),
            forecast: ForecastSettings::default(),
        }
    }
}

impl Config {
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply `LOVE_SANDWICHES_*` overrides from the process environment
    pub fn merge_env_vars(&mut self) -> Result<()> {
        self.merge_vars(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any variable lookup
    pub fn merge_vars<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(&format!("{}{}", ENV_PREFIX, name));

        if let Some(backend) = var("BACKEND") {
            self.storage.backend = backend.parse::<BackendType>().map_err(Error::Config)?;
        }
        if let Some(dir) = var("DATA_DIR") {
            self.storage.file.data_dir = PathBuf::from(dir);
        }
        if let Some(id) = var("SPREADSHEET_ID") {
            self.storage.sheets.spreadsheet_id = Some(id);
        }
        if let Some(token) = var("ACCESS_TOKEN") {
            self.storage.sheets.access_token = Some(token);
        }
        if let Some(level) = var("LOG_LEVEL") {
            self.log_level = level;
        }
        if let Some(window) = var("FORECAST_WINDOW") {
            self.forecast.window = window.parse().map_err(|_| {
                Error::config(format!(
                    "{}FORECAST_WINDOW must be a whole number, got '{}'",
                    ENV_PREFIX, window
                ))
            })?;
        }
        if let Some(policy) = var("SHORT_HISTORY") {
            self.forecast.short_history = policy.parse()?;
        }

        Ok(())
    }

    /// Check the combined settings before a session starts
    pub fn validate(&self) -> Result<()> {
        self.storage.validate()?;
        self.forecast.validate()
    }
}
