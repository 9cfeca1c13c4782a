// src/constants.rs
//
// Application-wide constants extracted from magic values throughout the codebase.
// Each constant is documented with its purpose and usage context.

/// Base URL of the GitHub REST API.
///
/// Used in: `infrastructure/github.rs`
pub const API_ROOT: &str = "https://api.github.com";

/// Repository subdirectory that holds all notes.
///
/// The app never creates or reads files anywhere else in the configured
/// repository.
///
/// Used in: `infrastructure/github.rs`
pub const NOTES_DIR: &str = "notes";

/// Maximum length of the slug portion of a generated filename, in characters.
///
/// Used in: `domain/filename.rs`
pub const SLUG_MAX_LEN: usize = 30;

/// Slug used when a title reduces to nothing after sanitization.
///
/// Used in: `domain/filename.rs`
pub const FALLBACK_SLUG: &str = "note";

/// Timestamp prefix format for generated filenames.
///
/// Zero-padded so that lexicographic order on filenames equals recency order.
/// Changing this breaks the sort contract of the note listing.
///
/// Used in: `domain/filename.rs`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M";

/// Connect timeout for all outgoing HTTP requests, in seconds.
///
/// A request that cannot connect within this window fails instead of leaving
/// the prompt hanging indefinitely.
///
/// Used in: `infrastructure/github.rs`, `infrastructure/shell_cache.rs`
pub const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Version tag of the offline shell cache.
///
/// Bumping this invalidates every previous cache wholesale on the next
/// activation.
///
/// Used in: `infrastructure/shell_cache.rs`
pub const SHELL_CACHE_VERSION: &str = "v1";

/// Static assets pre-cached for offline use.
///
/// Fixed allow-list; the shell cache stores nothing outside it and never
/// caches API responses.
///
/// Used in: `infrastructure/shell_cache.rs`
pub const SHELL_ASSETS: &[&str] = &[
    "https://placehold.co/192x192/007AFF/FFFFFF.png?text=GN",
    "https://placehold.co/512x512/007AFF/FFFFFF.png?text=GN",
];
