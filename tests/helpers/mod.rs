use anyhow::{Context, Result};
use gitnotes::application::settings::SettingsStore;
use gitnotes::domain::{Config, NoteEntry};
use gitnotes::infrastructure::ConfigStore;
use std::path::PathBuf;
use tempfile::TempDir;

/// Test fixture for working with a temporary configuration store
#[allow(dead_code)]
pub struct TestStore {
    _temp_dir: TempDir,
    pub store: ConfigStore,
    pub config_path: PathBuf,
}

#[allow(dead_code)]
impl TestStore {
    /// Store with no configuration saved yet
    pub fn empty() -> Result<Self> {
        let temp_dir = tempfile::tempdir().context("Failed to create temporary directory")?;
        let config_path = temp_dir.path().join("config.toml");
        let store = ConfigStore::new(&config_path);

        Ok(Self {
            _temp_dir: temp_dir,
            store,
            config_path,
        })
    }

    /// Store with a valid configuration already saved
    pub fn configured() -> Result<Self> {
        let fixture = Self::empty()?;
        fixture
            .store
            .save(&valid_config())
            .context("Failed to seed config")?;
        Ok(fixture)
    }
}

#[allow(dead_code)]
pub fn valid_config() -> Config {
    Config {
        account: "octocat".to_string(),
        repository: "my-notes".to_string(),
        token: "ghp_abc123".to_string(),
    }
}

#[allow(dead_code)]
pub fn entry(name: &str, sha: &str) -> NoteEntry {
    NoteEntry {
        name: name.to_string(),
        url: format!("https://api.github.com/repos/octocat/my-notes/contents/notes/{name}"),
        sha: sha.to_string(),
    }
}
