// src/infrastructure/shell_cache.rs
use crate::constants::{CONNECT_TIMEOUT_SECS, SHELL_ASSETS, SHELL_CACHE_VERSION};
use anyhow::{Context, Result};
use reqwest::Client;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Offline cache for the fixed shell asset list.
///
/// Mirrors the install/activate/fetch lifecycle of a service worker: install
/// pre-fetches every asset into a versioned directory, activate deletes the
/// directories of all other versions, and fetch is network-first with the
/// cached copy as fallback. API responses are never cached here.
pub struct ShellCache {
    client: Client,
    root: PathBuf,
    version: String,
    assets: Vec<String>,
}

impl ShellCache {
    pub fn new(root: impl AsRef<Path>, version: &str, assets: &[&str]) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("gitnotes/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            root: root.as_ref().to_path_buf(),
            version: version.to_string(),
            assets: assets.iter().map(|a| a.to_string()).collect(),
        })
    }

    /// Cache rooted at the per-user cache directory with the built-in asset
    /// list and version.
    pub fn default_cache() -> Result<Self> {
        let base = dirs::cache_dir().context("Could not find cache directory")?;
        Self::new(base.join("gitnotes"), SHELL_CACHE_VERSION, SHELL_ASSETS)
    }

    fn dir(&self) -> PathBuf {
        self.root.join(format!("shell-{}", self.version))
    }

    /// One file per asset URL, named by the URL's SHA-256.
    fn cache_path(&self, url: &str) -> PathBuf {
        let digest = Sha256::digest(url.as_bytes());
        self.dir().join(format!("{digest:x}"))
    }

    fn store(&self, url: &str, bytes: &[u8]) -> Result<()> {
        std::fs::create_dir_all(self.dir()).context("Failed to create cache directory")?;
        std::fs::write(self.cache_path(url), bytes).context("Failed to write cached asset")?;
        Ok(())
    }

    fn cached(&self, url: &str) -> Option<Vec<u8>> {
        std::fs::read(self.cache_path(url)).ok()
    }

    /// Pre-fetch every asset on the allow-list. Any single failure fails the
    /// install as a whole; a partial shell is worse than none.
    pub async fn install(&self) -> Result<()> {
        for url in &self.assets {
            let response = self
                .client
                .get(url)
                .send()
                .await
                .with_context(|| format!("Failed to fetch shell asset {url}"))?;
            if !response.status().is_success() {
                anyhow::bail!("Shell asset {url} returned {}", response.status());
            }
            let bytes = response
                .bytes()
                .await
                .with_context(|| format!("Failed to read shell asset {url}"))?;
            self.store(url, &bytes)?;
            debug!(%url, "Shell asset cached");
        }
        info!(version = %self.version, count = self.assets.len(), "Shell cache installed");
        Ok(())
    }

    /// Delete the cache directories of every other version.
    pub fn activate(&self) -> Result<()> {
        let current = format!("shell-{}", self.version);
        let entries = match std::fs::read_dir(&self.root) {
            Ok(entries) => entries,
            // No cache root yet means nothing to clean up.
            Err(_) => return Ok(()),
        };

        for entry in entries {
            let entry = entry.context("Failed to read cache directory entry")?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with("shell-") && name != current {
                debug!(%name, "Removing stale shell cache");
                std::fs::remove_dir_all(entry.path())
                    .with_context(|| format!("Failed to remove stale cache {name}"))?;
            }
        }
        Ok(())
    }

    /// Network-first fetch with cache fallback.
    ///
    /// Only transport failures fall back to the cache; an HTTP error status
    /// is surfaced as-is.
    pub async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        match self.client.get(url).send().await {
            Ok(response) => {
                if !response.status().is_success() {
                    anyhow::bail!("{url} returned {}", response.status());
                }
                let bytes = response
                    .bytes()
                    .await
                    .with_context(|| format!("Failed to read {url}"))?;
                Ok(bytes.to_vec())
            }
            Err(err) => {
                warn!(%url, %err, "Network fetch failed, trying cache");
                self.cached(url)
                    .with_context(|| format!("{url} unavailable and not cached"))
            }
        }
    }
}

/// Install then activate, logging failures; never fatal to the caller.
pub fn spawn_background_install(cache: ShellCache) {
    tokio::spawn(async move {
        if let Err(err) = cache.install().await {
            warn!(%err, "Shell cache install failed");
            return;
        }
        if let Err(err) = cache.activate() {
            warn!(%err, "Shell cache activation failed");
        }
    });
}
