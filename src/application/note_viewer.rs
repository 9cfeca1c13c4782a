// src/application/note_viewer.rs
use crate::domain::{DomainError, NoteEntry, OpenNote};
use async_trait::async_trait;

/// Port to the remote note store.
///
/// Operations are primitives over the Contents API; use-case policy (fresh
/// SHA fetches, fallbacks, commit messages) lives in the application
/// services so it can be tested against a mock.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// List the notes directory, newest first. An absent directory is an
    /// empty list, not an error.
    async fn list_notes(&self) -> Result<Vec<NoteEntry>, DomainError>;

    /// Fetch the raw text of a note.
    async fn read_note(&self, entry: &NoteEntry) -> Result<String, DomainError>;

    /// Fetch current metadata (including the content SHA) for a single file.
    async fn fetch_entry(&self, name: &str) -> Result<NoteEntry, DomainError>;

    /// Create or replace a file. `sha` must be `None` for create and the
    /// current blob SHA for replace; the server rejects a stale SHA.
    async fn put_note(
        &self,
        name: &str,
        message: &str,
        content: &str,
        sha: Option<&str>,
    ) -> Result<(), DomainError>;

    /// Delete a file at the given SHA.
    async fn delete_note(&self, name: &str, message: &str, sha: &str) -> Result<(), DomainError>;
}

pub struct NoteViewer<R: NoteRepository> {
    repository: R,
}

impl<R: NoteRepository> NoteViewer<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Open a note: fetch its raw text and pair it with the listing entry,
    /// whose SHA becomes the last-known SHA for subsequent edits.
    pub async fn view_note(&self, entry: &NoteEntry) -> Result<OpenNote, DomainError> {
        let body = self.repository.read_note(entry).await?;
        Ok(OpenNote {
            entry: entry.clone(),
            body,
        })
    }
}
