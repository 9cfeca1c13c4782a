// src/application/note_lister.rs
use crate::application::NoteRepository;
use crate::domain::{DomainError, NoteEntry};

pub struct NoteLister<R: NoteRepository> {
    repository: R,
}

impl<R: NoteRepository> NoteLister<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// List all notes, newest first.
    ///
    /// Filtering to `.md` files and descending sort are guaranteed by the
    /// repository; an empty repository (or a missing notes directory)
    /// yields an empty vector.
    pub async fn list_notes(&self) -> Result<Vec<NoteEntry>, DomainError> {
        self.repository.list_notes().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::testing::MockNoteRepository;

    fn entry(name: &str) -> NoteEntry {
        NoteEntry {
            name: name.to_string(),
            url: format!("https://example.invalid/{name}"),
            sha: "sha".to_string(),
        }
    }

    #[tokio::test]
    async fn given_notes_when_listing_then_returns_all_notes() {
        // Arrange
        let mock = MockNoteRepository::builder()
            .with_listing(vec![
                entry("2024-01-02_10-00_b.md"),
                entry("2024-01-01_09-00_a.md"),
            ])
            .build();
        let lister = NoteLister::new(mock);

        // Act
        let result = lister.list_notes().await.expect("List should succeed");

        // Assert
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].name, "2024-01-02_10-00_b.md");
    }

    #[tokio::test]
    async fn given_empty_repository_when_listing_then_returns_empty_vec() {
        // Arrange
        let mock = MockNoteRepository::builder().build();
        let lister = NoteLister::new(mock);

        // Act
        let result = lister.list_notes().await.expect("List should succeed");

        // Assert
        assert!(result.is_empty());
    }
}
