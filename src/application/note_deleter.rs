// src/application/note_deleter.rs
use crate::application::NoteRepository;
use crate::domain::{DomainError, NoteEntry};
use tracing::debug;

pub struct NoteDeleter<R: NoteRepository> {
    repository: R,
}

impl<R: NoteRepository> NoteDeleter<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Delete a note.
    ///
    /// The SHA is re-fetched first; unlike update there is no stale
    /// fallback — if the file cannot be stat'ed the delete fails.
    pub async fn delete_note(&self, entry: &NoteEntry) -> Result<(), DomainError> {
        debug!(name = %entry.name, "Deleting note");
        let fresh = self.repository.fetch_entry(&entry.name).await?;

        self.repository
            .delete_note(
                &entry.name,
                &format!("Delete note: {}", entry.name),
                &fresh.sha,
            )
            .await
    }
}
