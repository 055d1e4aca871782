use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use super::{global_config_path, Config, LOCAL_CONFIG_FILE};
use crate::error::{Error, Result};

/// Finds and reads the configuration file
pub struct ConfigLoader {
    explicit: Option<PathBuf>,
    search_dir: PathBuf,
    global: Option<PathBuf>,
}

impl ConfigLoader {
    /// Loader that honours an explicit `--config` path, then the working
    /// directory, then the per-user config directory
    pub fn new(explicit: Option<PathBuf>) -> Result<Self> {
        Ok(Self {
            explicit,
            search_dir: std::env::current_dir()?,
            global: global_config_path(),
        })
    }

    /// Loader with fixed search locations, for tests
    pub fn with_locations(
        explicit: Option<PathBuf>,
        search_dir: PathBuf,
        global: Option<PathBuf>,
    ) -> Self {
        Self {
            explicit,
            search_dir,
            global,
        }
    }

    /// The file that would be read, if any
    pub async fn resolve(&self) -> Result<Option<PathBuf>> {
        if let Some(path) = &self.explicit {
            if !fs::try_exists(path).await? {
                return Err(Error::config(format!(
                    "config file {} does not exist",
                    path.display()
                )));
            }
            return Ok(Some(path.clone()));
        }

        let local = self.search_dir.join(LOCAL_CONFIG_FILE);
        if fs::try_exists(&local).await? {
            return Ok(Some(local));
        }

        if let Some(global) = &self.global {
            if fs::try_exists(global).await? {
                return Ok(Some(global.clone()));
            }
        }

        Ok(None)
    }

    /// Read the file (or defaults) without environment overrides
    pub async fn load_file(&self) -> Result<Config> {
        match self.resolve().await? {
            Some(path) => read_config(&path).await,
            None => {
                debug!("No configuration file found, using defaults");
                Ok(Config::default())
            }
        }
    }

    /// Read the file and apply environment overrides
    pub async fn load(&self) -> Result<Config> {
        let mut config = self.load_file().await?;
        config.merge_env_vars()?;
        Ok(config)
    }
}

async fn read_config(path: &Path) -> Result<Config> {
    debug!(path = %path.display(), "Loading configuration");
    let content = fs::read_to_string(path).await?;
    Config::from_toml(&content)
        .map_err(|e| Error::config(format!("failed to parse {}: {}", path.display(), e)))
}
