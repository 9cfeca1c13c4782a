// src/util/testing.rs

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::env;
use std::sync::Mutex;
use tracing::{debug, info};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::application::NoteRepository;
use crate::domain::{DomainError, NoteEntry};

// Common test environment variables
pub const TEST_ENV_VARS: &[&str] = &["RUST_LOG", "NO_CLEANUP"];

enum StatBehavior {
    FreshSha(String),
    NetworkError,
}

enum WriteBehavior {
    Succeed,
    Conflict,
}

/// A `put_note` call as the mock saw it.
#[derive(Debug, Clone)]
pub struct PutRecord {
    pub name: String,
    pub message: String,
    pub content: String,
    pub sha: Option<String>,
}

/// A `delete_note` call as the mock saw it.
#[derive(Debug, Clone)]
pub struct DeleteRecord {
    pub name: String,
    pub message: String,
    pub sha: String,
}

/// Shared mock repository for testing use cases that depend on NoteRepository
///
/// This mock provides configurable behavior for all NoteRepository methods
/// and records every write, eliminating the need for each test file to
/// define its own mock.
///
/// # Examples
///
/// ```
/// use gitnotes::util::testing::MockNoteRepository;
/// use gitnotes::domain::NoteEntry;
///
/// let mock = MockNoteRepository::builder()
///     .with_listing(vec![NoteEntry {
///         name: "2024-01-02_03-04_hello.md".to_string(),
///         url: "https://example.invalid/hello".to_string(),
///         sha: "abc".to_string(),
///     }])
///     .with_fresh_sha("2024-01-02_03-04_hello.md", "def")
///     .build();
/// ```
pub struct MockNoteRepository {
    listing_error: Option<(u16, String)>,
    listing: Vec<NoteEntry>,
    bodies: HashMap<String, String>,
    stats: HashMap<String, StatBehavior>,
    put_behaviors: HashMap<String, WriteBehavior>,
    delete_behaviors: HashMap<String, WriteBehavior>,
    puts: Mutex<Vec<PutRecord>>,
    deletes: Mutex<Vec<DeleteRecord>>,
}

impl MockNoteRepository {
    pub fn builder() -> MockNoteRepositoryBuilder {
        MockNoteRepositoryBuilder::new()
    }

    pub fn recorded_puts(&self) -> Vec<PutRecord> {
        self.puts.lock().expect("mock lock poisoned").clone()
    }

    pub fn recorded_deletes(&self) -> Vec<DeleteRecord> {
        self.deletes.lock().expect("mock lock poisoned").clone()
    }
}

#[async_trait]
impl NoteRepository for MockNoteRepository {
    async fn list_notes(&self) -> Result<Vec<NoteEntry>, DomainError> {
        if let Some((status, message)) = &self.listing_error {
            return Err(DomainError::Http {
                status: *status,
                message: message.clone(),
            });
        }
        Ok(self.listing.clone())
    }

    async fn read_note(&self, entry: &NoteEntry) -> Result<String, DomainError> {
        self.bodies
            .get(&entry.name)
            .cloned()
            .ok_or_else(|| DomainError::NoteNotFound(entry.name.clone()))
    }

    async fn fetch_entry(&self, name: &str) -> Result<NoteEntry, DomainError> {
        match self.stats.get(name) {
            Some(StatBehavior::FreshSha(sha)) => Ok(NoteEntry {
                name: name.to_string(),
                url: format!("https://example.invalid/{name}"),
                sha: sha.clone(),
            }),
            Some(StatBehavior::NetworkError) => {
                Err(DomainError::Network("connection reset".to_string()))
            }
            None => Err(DomainError::NoteNotFound(name.to_string())),
        }
    }

    async fn put_note(
        &self,
        name: &str,
        message: &str,
        content: &str,
        sha: Option<&str>,
    ) -> Result<(), DomainError> {
        self.puts.lock().expect("mock lock poisoned").push(PutRecord {
            name: name.to_string(),
            message: message.to_string(),
            content: content.to_string(),
            sha: sha.map(str::to_string),
        });

        match self.put_behaviors.get(name) {
            Some(WriteBehavior::Conflict) => Err(DomainError::Conflict(name.to_string())),
            _ => Ok(()),
        }
    }

    async fn delete_note(&self, name: &str, message: &str, sha: &str) -> Result<(), DomainError> {
        self.deletes
            .lock()
            .expect("mock lock poisoned")
            .push(DeleteRecord {
                name: name.to_string(),
                message: message.to_string(),
                sha: sha.to_string(),
            });

        match self.delete_behaviors.get(name) {
            Some(WriteBehavior::Conflict) => Err(DomainError::Conflict(name.to_string())),
            _ => Ok(()),
        }
    }
}

/// Builder for MockNoteRepository
///
/// Provides a fluent interface for configuring mock behavior.
pub struct MockNoteRepositoryBuilder {
    listing_error: Option<(u16, String)>,
    listing: Vec<NoteEntry>,
    bodies: HashMap<String, String>,
    stats: HashMap<String, StatBehavior>,
    put_behaviors: HashMap<String, WriteBehavior>,
    delete_behaviors: HashMap<String, WriteBehavior>,
}

impl MockNoteRepositoryBuilder {
    pub fn new() -> Self {
        Self {
            listing_error: None,
            listing: Vec::new(),
            bodies: HashMap::new(),
            stats: HashMap::new(),
            put_behaviors: HashMap::new(),
            delete_behaviors: HashMap::new(),
        }
    }

    /// Set the listing returned by list_notes (already in display order)
    pub fn with_listing(mut self, entries: Vec<NoteEntry>) -> Self {
        self.listing = entries;
        self
    }

    /// Configure list_notes to fail with an HTTP error
    pub fn with_listing_http_error(mut self, status: u16, message: &str) -> Self {
        self.listing_error = Some((status, message.to_string()));
        self
    }

    /// Set the raw text returned when reading a note by name
    pub fn with_body(mut self, name: &str, body: &str) -> Self {
        self.bodies.insert(name.to_string(), body.to_string());
        self
    }

    /// Configure fetch_entry to return a fresh SHA for a name
    pub fn with_fresh_sha(mut self, name: &str, sha: &str) -> Self {
        self.stats
            .insert(name.to_string(), StatBehavior::FreshSha(sha.to_string()));
        self
    }

    /// Configure fetch_entry to fail with a network error for a name
    pub fn with_stat_network_error(mut self, name: &str) -> Self {
        self.stats
            .insert(name.to_string(), StatBehavior::NetworkError);
        self
    }

    /// Configure put_note to fail with a conflict for a name
    pub fn with_put_conflict(mut self, name: &str) -> Self {
        self.put_behaviors
            .insert(name.to_string(), WriteBehavior::Conflict);
        self
    }

    /// Configure delete_note to fail with a conflict for a name
    pub fn with_delete_conflict(mut self, name: &str) -> Self {
        self.delete_behaviors
            .insert(name.to_string(), WriteBehavior::Conflict);
        self
    }

    pub fn build(self) -> MockNoteRepository {
        MockNoteRepository {
            listing_error: self.listing_error,
            listing: self.listing,
            bodies: self.bodies,
            stats: self.stats,
            put_behaviors: self.put_behaviors,
            delete_behaviors: self.delete_behaviors,
            puts: Mutex::new(Vec::new()),
            deletes: Mutex::new(Vec::new()),
        }
    }
}

impl Default for MockNoteRepositoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn init_test_setup() -> Result<()> {
    // Set up logging first
    setup_test_logging();

    info!("Test Setup complete");
    Ok(())
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "trace");
    }

    // Create a filter for noisy modules
    let noisy_modules = ["hyper", "reqwest", "rustls", "mio"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    // Set up the subscriber with environment filter
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    // Build and set the subscriber
    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}
