// src/application/settings.rs
use crate::domain::Config;
use anyhow::Result;

/// Port for durable persistence of the three-field configuration.
pub trait SettingsStore {
    fn load(&self) -> Result<Config>;

    /// Persist the config; returns the normalized form that was written.
    fn save(&self, config: &Config) -> Result<Config>;
}
