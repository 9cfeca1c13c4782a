// src/infrastructure/config_store.rs
use crate::application::settings::SettingsStore;
use crate::domain::Config;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// TOML-backed store for the three configuration fields.
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Store at the per-user default location.
    pub fn default_store() -> Result<Self> {
        Ok(Self::new(default_config_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

pub fn default_config_path() -> Result<PathBuf> {
    let base = dirs::config_dir().context("Could not find config directory")?;
    Ok(base.join("gitnotes").join("config.toml"))
}

impl SettingsStore for ConfigStore {
    /// Load configuration, normalizing as it comes in. A missing file is an
    /// empty (invalid) config, not an error.
    fn load(&self) -> Result<Config> {
        if !self.path.exists() {
            debug!(path = ?self.path, "No config file yet");
            return Ok(Config::default());
        }

        let content =
            std::fs::read_to_string(&self.path).context("Failed to read config file")?;
        let config: Config = toml::from_str(&content).context("Failed to parse TOML config")?;

        Ok(config.normalized())
    }

    /// Save configuration and return the normalized form that was written.
    fn save(&self, config: &Config) -> Result<Config> {
        let stored = config.clone().normalized();

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
        let toml_string =
            toml::to_string_pretty(&stored).context("Failed to serialize config to TOML")?;
        std::fs::write(&self.path, toml_string).context("Failed to write config file")?;

        debug!(path = ?self.path, "Config saved");
        Ok(stored)
    }
}
