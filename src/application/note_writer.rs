// src/application/note_writer.rs
use crate::application::NoteRepository;
use crate::domain::filename::filename_for;
use crate::domain::{DomainError, NoteEntry};
use chrono::NaiveDateTime;
use tracing::{debug, warn};

pub struct NoteWriter<R: NoteRepository> {
    repository: R,
}

/// Full Markdown document for a freshly created note: title header, creation
/// timestamp line, a rule, then the body.
fn compose_document(title: &str, timestamp: NaiveDateTime, body: &str) -> String {
    format!(
        "# {}\n\n*{}*\n\n---\n\n{}",
        title,
        timestamp.format("%Y-%m-%d %H:%M"),
        body
    )
}

impl<R: NoteRepository> NoteWriter<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Create a new note and return its generated filename.
    ///
    /// The filename embeds `timestamp`; callers pass the current local time
    /// (tests pass a fixed one). The PUT carries no SHA, so the server only
    /// creates and never overwrites.
    pub async fn create(
        &self,
        title: &str,
        body: &str,
        timestamp: NaiveDateTime,
    ) -> Result<String, DomainError> {
        let title = title.trim();
        let filename = filename_for(title, timestamp);
        let content = compose_document(title, timestamp, body);
        debug!(%filename, "Creating note");

        self.repository
            .put_note(&filename, &format!("Add note: {title}"), &content, None)
            .await?;

        Ok(filename)
    }

    /// Replace the content of an existing note.
    ///
    /// The current SHA is re-fetched immediately before writing to shrink
    /// the lost-update window. If that fetch fails the write proceeds with
    /// the last-known SHA instead of aborting; a stale SHA then surfaces as
    /// a conflict from the server.
    pub async fn update(&self, entry: &NoteEntry, body: &str) -> Result<(), DomainError> {
        let sha = match self.repository.fetch_entry(&entry.name).await {
            Ok(fresh) => fresh.sha,
            Err(err) => {
                warn!(name = %entry.name, %err, "SHA refresh failed, writing with last-known SHA");
                entry.sha.clone()
            }
        };

        self.repository
            .put_note(
                &entry.name,
                &format!("Update note: {}", entry.name),
                body,
                Some(&sha),
            )
            .await
    }
}
