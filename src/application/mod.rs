// src/application/mod.rs
pub mod note_deleter;
pub mod note_lister;
pub mod note_viewer;
pub mod note_writer;
pub mod session;
pub mod settings;

pub use note_deleter::NoteDeleter;
pub use note_lister::NoteLister;
pub use note_viewer::{NoteRepository, NoteViewer};
pub use note_writer::NoteWriter;

use crate::domain::{DomainError, NoteEntry};
use async_trait::async_trait;

/// Repositories are usable through shared references so several services can
/// hold the same instance within one session.
#[async_trait]
impl<'r, T: NoteRepository + ?Sized> NoteRepository for &'r T {
    async fn list_notes(&self) -> Result<Vec<NoteEntry>, DomainError> {
        (**self).list_notes().await
    }

    async fn read_note(&self, entry: &NoteEntry) -> Result<String, DomainError> {
        (**self).read_note(entry).await
    }

    async fn fetch_entry(&self, name: &str) -> Result<NoteEntry, DomainError> {
        (**self).fetch_entry(name).await
    }

    async fn put_note(
        &self,
        name: &str,
        message: &str,
        content: &str,
        sha: Option<&str>,
    ) -> Result<(), DomainError> {
        (**self).put_note(name, message, content, sha).await
    }

    async fn delete_note(&self, name: &str, message: &str, sha: &str) -> Result<(), DomainError> {
        (**self).delete_note(name, message, sha).await
    }
}
