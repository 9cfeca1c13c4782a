mod helpers;

use gitnotes::application::session::Session;
use gitnotes::application::settings::SettingsStore;
use gitnotes::domain::Config;
use gitnotes::infrastructure::ConfigStore;
use gitnotes::ports::TerminalPresenter;
use gitnotes::util::testing::MockNoteRepository;
use helpers::{entry, TestStore};
use std::io::Cursor;

/// Drive a full session against scripted input and return everything it
/// printed.
async fn run_session(store: &ConfigStore, mock: &MockNoteRepository, script: &str) -> String {
    let mut out: Vec<u8> = Vec::new();
    let session = Session::new(
        store,
        |_config: &Config| Ok(mock),
        TerminalPresenter::plain(),
        Cursor::new(script.as_bytes().to_vec()),
        &mut out,
    );
    session.run().await.expect("Session should not fail");
    String::from_utf8(out).expect("Output should be UTF-8")
}

#[tokio::test]
async fn given_no_config_when_starting_then_opens_settings_and_save_leads_to_list() {
    // Arrange
    let fixture = TestStore::empty().expect("fixture");
    let mock = MockNoteRepository::builder()
        .with_listing(vec![entry("2024-01-02_03-04_hello.md", "abc")])
        .build();
    let script = "account octocat\nrepository my-notes\ntoken ghp_abc123\nsave\nquit\n";

    // Act
    let output = run_session(&fixture.store, &mock, script).await;

    // Assert
    assert!(output.contains("== Settings =="), "starts in settings");
    assert!(output.contains("== GitNotes =="), "save leads to the list");
    assert!(output.contains("hello"), "list was fetched after save");
    let saved = fixture.store.load().expect("config saved");
    assert!(saved.is_valid());
    assert_eq!(saved.account, "octocat");
}

#[tokio::test]
async fn given_incomplete_fields_when_saving_then_reports_and_stays_in_settings() {
    // Arrange
    let fixture = TestStore::empty().expect("fixture");
    let mock = MockNoteRepository::builder().build();
    let script = "account octocat\nsave\n";

    // Act
    let output = run_session(&fixture.store, &mock, script).await;

    // Assert
    assert!(output.contains("All three fields are required."));
    assert!(!output.contains("== GitNotes =="));
    assert!(!fixture.store.load().expect("load").is_valid());
}

#[tokio::test]
async fn given_valid_config_when_starting_then_lists_notes_newest_first() {
    // Arrange
    let fixture = TestStore::configured().expect("fixture");
    let mock = MockNoteRepository::builder()
        .with_listing(vec![
            entry("2024-01-02_10-00_second.md", "b"),
            entry("2024-01-01_09-00_first.md", "a"),
        ])
        .build();

    // Act
    let output = run_session(&fixture.store, &mock, "quit\n").await;

    // Assert
    assert!(output.contains("== GitNotes =="));
    assert!(output.contains("1. second"));
    assert!(output.contains("2. first"));
}

#[tokio::test]
async fn given_note_selected_when_opening_then_shows_detail_and_back_returns() {
    // Arrange
    let fixture = TestStore::configured().expect("fixture");
    let mock = MockNoteRepository::builder()
        .with_listing(vec![entry("2024-01-02_03-04_hello.md", "abc")])
        .with_body("2024-01-02_03-04_hello.md", "# Hello\n\nworld")
        .build();
    let script = "1\nback\nquit\n";

    // Act
    let output = run_session(&fixture.store, &mock, script).await;

    // Assert
    assert!(output.contains("== Detail =="));
    assert!(output.contains("# Hello"));
    assert!(output.contains("world"));
}

#[tokio::test]
async fn given_add_flow_when_saving_then_creates_note_without_sha() {
    // Arrange
    let fixture = TestStore::configured().expect("fixture");
    let mock = MockNoteRepository::builder().build();
    let script = "add\nMy Note\nline one\nline two\n.\nquit\n";

    // Act
    let output = run_session(&fixture.store, &mock, script).await;

    // Assert
    assert!(output.contains("Saved "));
    let puts = mock.recorded_puts();
    assert_eq!(puts.len(), 1);
    assert!(puts[0].name.ends_with("_my-note.md"));
    assert_eq!(puts[0].message, "Add note: My Note");
    assert_eq!(puts[0].sha, None);
    assert!(puts[0].content.contains("line one\nline two"));
}

#[tokio::test]
async fn given_empty_title_when_adding_then_rejects_and_returns_to_list() {
    // Arrange
    let fixture = TestStore::configured().expect("fixture");
    let mock = MockNoteRepository::builder().build();
    let script = "add\n   \nquit\n";

    // Act
    let output = run_session(&fixture.store, &mock, script).await;

    // Assert
    assert!(output.contains("Title must not be empty."));
    assert!(mock.recorded_puts().is_empty());
}

#[tokio::test]
async fn given_edit_flow_when_saving_then_updates_with_fresh_sha_and_locked_title() {
    // Arrange
    let fixture = TestStore::configured().expect("fixture");
    let mock = MockNoteRepository::builder()
        .with_listing(vec![entry("2024-01-02_03-04_hello.md", "stale-sha")])
        .with_body("2024-01-02_03-04_hello.md", "old body")
        .with_fresh_sha("2024-01-02_03-04_hello.md", "fresh-sha")
        .build();
    let script = "1\nedit\nnew body\n.\nquit\n";

    // Act
    let output = run_session(&fixture.store, &mock, script).await;

    // Assert
    assert!(output.contains("(locked)"), "title is locked during edit");
    let puts = mock.recorded_puts();
    assert_eq!(puts.len(), 1);
    assert_eq!(puts[0].name, "2024-01-02_03-04_hello.md");
    assert_eq!(puts[0].sha.as_deref(), Some("fresh-sha"));
    assert_eq!(puts[0].content, "new body");
}

#[tokio::test]
async fn given_delete_confirmed_when_deleting_then_removes_with_fresh_sha() {
    // Arrange
    let fixture = TestStore::configured().expect("fixture");
    let mock = MockNoteRepository::builder()
        .with_listing(vec![entry("2024-01-02_03-04_hello.md", "stale-sha")])
        .with_body("2024-01-02_03-04_hello.md", "body")
        .with_fresh_sha("2024-01-02_03-04_hello.md", "fresh-sha")
        .build();
    let script = "1\ndelete\ny\nquit\n";

    // Act
    let output = run_session(&fixture.store, &mock, script).await;

    // Assert
    assert!(output.contains("Deleted 2024-01-02_03-04_hello.md."));
    let deletes = mock.recorded_deletes();
    assert_eq!(deletes.len(), 1);
    assert_eq!(deletes[0].sha, "fresh-sha");
}

#[tokio::test]
async fn given_delete_declined_when_prompted_then_nothing_is_deleted() {
    // Arrange
    let fixture = TestStore::configured().expect("fixture");
    let mock = MockNoteRepository::builder()
        .with_listing(vec![entry("2024-01-02_03-04_hello.md", "abc")])
        .with_body("2024-01-02_03-04_hello.md", "body")
        .build();
    let script = "1\ndelete\nn\nback\nquit\n";

    // Act
    let output = run_session(&fixture.store, &mock, script).await;

    // Assert
    assert!(output.contains("Not deleted."));
    assert!(mock.recorded_deletes().is_empty());
}

#[tokio::test]
async fn given_listing_fails_when_refreshing_then_reports_and_stays_interactive() {
    // Arrange
    let fixture = TestStore::configured().expect("fixture");
    let mock = MockNoteRepository::builder()
        .with_listing_http_error(401, "Bad credentials")
        .build();
    let script = "quit\n";

    // Act
    let output = run_session(&fixture.store, &mock, script).await;

    // Assert
    assert!(output.contains("Bad credentials"));
    assert!(output.contains("> "), "prompt still shown after the error");
}

#[tokio::test]
async fn given_settings_opened_from_list_when_going_back_then_returns_to_list() {
    // Arrange
    let fixture = TestStore::configured().expect("fixture");
    let mock = MockNoteRepository::builder().build();
    let script = "settings\nback\nquit\n";

    // Act
    let output = run_session(&fixture.store, &mock, script).await;

    // Assert
    assert!(output.contains("== Settings =="));
    let list_views = output.matches("== GitNotes ==").count();
    assert!(list_views >= 2, "list is rendered before and after settings");
}
