// src/domain/note.rs
use serde::Serialize;

/// A note as it appears in the remote directory listing.
///
/// The `name` doubles as the note's identity: it embeds the creation
/// timestamp and is immutable after creation. `sha` is the content blob hash
/// last seen for this file; write operations re-fetch a fresh one.
#[derive(Debug, Clone, Serialize)]
pub struct NoteEntry {
    pub name: String,
    pub url: String,
    pub sha: String,
}

impl NoteEntry {
    /// Human-readable title derived from the filename: everything after the
    /// date and time segments.
    pub fn display_title(&self) -> String {
        let stem = self.name.trim_end_matches(".md");
        let title = stem.split('_').skip(2).collect::<Vec<_>>().join(" ");
        if title.is_empty() {
            self.name.clone()
        } else {
            title
        }
    }

    /// The `YYYY-MM-DD HH-MM` portion of the filename.
    pub fn display_date(&self) -> String {
        self.name.split('_').take(2).collect::<Vec<_>>().join(" ")
    }
}

/// The note currently open in the detail or editor view: the listing entry
/// plus its raw text. The entry's SHA is the last-known SHA for edits.
#[derive(Debug, Clone)]
pub struct OpenNote {
    pub entry: NoteEntry,
    pub body: String,
}
