// src/domain/config.rs
use serde::{Deserialize, Serialize};

/// The three strings every remote operation needs.
///
/// Persisted as plain text; the token is stripped of all whitespace on load
/// and save, since pasted tokens routinely pick up stray newlines.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub account: String,
    #[serde(default)]
    pub repository: String,
    #[serde(default)]
    pub token: String,
}

impl Config {
    /// Stored form: account and repository trimmed, token stripped of all
    /// whitespace.
    pub fn normalized(mut self) -> Self {
        self.account = self.account.trim().to_string();
        self.repository = self.repository.trim().to_string();
        self.token.retain(|c| !c.is_whitespace());
        self
    }

    /// A config is valid iff all three fields are non-empty once
    /// normalized. Nothing remote may be attempted otherwise.
    pub fn is_valid(&self) -> bool {
        !self.account.trim().is_empty()
            && !self.repository.trim().is_empty()
            && self.token.chars().any(|c| !c.is_whitespace())
    }
}
