// src/domain/error.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Configuration is missing or incomplete; run `gitnotes setup` first")]
    ConfigMissing,
    #[error("Note not found: {0}")]
    NoteNotFound(String),
    #[error("Conflict: {0} was modified remotely")]
    Conflict(String),
    #[error("HTTP error: {status} {message}")]
    Http { status: u16, message: String },
    #[error("Network error: {0}")]
    Network(String),
    #[error("Unexpected API response: {0}")]
    InvalidResponse(String),
}
