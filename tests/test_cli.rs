use clap::Parser;
use gitnotes::cli::args::{Args, Command};

#[test]
fn given_no_subcommand_when_parsing_then_fails() {
    // Arrange
    let args = vec!["gitnotes"];

    // Act & Assert
    let result = Args::try_parse_from(args);
    assert!(result.is_err(), "Should fail without subcommand");
}

#[test]
fn given_list_command_when_parsing_then_succeeds() {
    // Arrange
    let args = vec!["gitnotes", "list"];

    // Act
    let parsed = Args::try_parse_from(args).unwrap();

    // Assert
    assert!(matches!(parsed.command, Command::List));
    assert_eq!(parsed.config, None);
}

#[test]
fn given_setup_command_when_parsing_then_captures_all_three_fields() {
    // Arrange
    let args = vec!["gitnotes", "setup", "octocat", "my-notes", "ghp_abc123"];

    // Act
    let parsed = Args::try_parse_from(args).unwrap();

    // Assert
    match parsed.command {
        Command::Setup {
            account,
            repository,
            token,
        } => {
            assert_eq!(account, "octocat");
            assert_eq!(repository, "my-notes");
            assert_eq!(token, "ghp_abc123");
        }
        _ => panic!("Expected Setup command"),
    }
}

#[test]
fn given_setup_with_missing_field_when_parsing_then_fails() {
    // Arrange
    let args = vec!["gitnotes", "setup", "octocat", "my-notes"];

    // Act & Assert
    let result = Args::try_parse_from(args);
    assert!(result.is_err(), "Setup requires all three values");
}

#[test]
fn given_show_command_with_json_flag_when_parsing_then_json_is_true() {
    // Arrange
    let args = vec!["gitnotes", "show", "--json", "2024-01-02_03-04_hello.md"];

    // Act
    let parsed = Args::try_parse_from(args).unwrap();

    // Assert
    match parsed.command {
        Command::Show { name, json, raw } => {
            assert_eq!(name, "2024-01-02_03-04_hello.md");
            assert!(json);
            assert!(!raw);
        }
        _ => panic!("Expected Show command"),
    }
}

#[test]
fn given_show_with_json_and_raw_when_parsing_then_fails() {
    // Arrange
    let args = vec!["gitnotes", "show", "--json", "--raw", "x.md"];

    // Act & Assert
    let result = Args::try_parse_from(args);
    assert!(result.is_err(), "--json and --raw are mutually exclusive");
}

#[test]
fn given_add_command_with_body_when_parsing_then_succeeds() {
    // Arrange
    let args = vec!["gitnotes", "add", "My Note", "--body", "some text"];

    // Act
    let parsed = Args::try_parse_from(args).unwrap();

    // Assert
    match parsed.command {
        Command::Add { title, body, file } => {
            assert_eq!(title, "My Note");
            assert_eq!(body.as_deref(), Some("some text"));
            assert_eq!(file, None);
        }
        _ => panic!("Expected Add command"),
    }
}

#[test]
fn given_add_with_body_and_file_when_parsing_then_fails() {
    // Arrange
    let args = vec![
        "gitnotes", "add", "My Note", "--body", "text", "--file", "note.md",
    ];

    // Act & Assert
    let result = Args::try_parse_from(args);
    assert!(result.is_err(), "--body and --file are mutually exclusive");
}

#[test]
fn given_delete_command_with_yes_flag_when_parsing_then_skips_confirmation() {
    // Arrange
    let args = vec!["gitnotes", "delete", "-y", "2024-01-02_03-04_hello.md"];

    // Act
    let parsed = Args::try_parse_from(args).unwrap();

    // Assert
    match parsed.command {
        Command::Delete { name, yes } => {
            assert_eq!(name, "2024-01-02_03-04_hello.md");
            assert!(yes);
        }
        _ => panic!("Expected Delete command"),
    }
}

#[test]
fn given_global_config_flag_when_parsing_then_succeeds() {
    // Arrange
    let args = vec!["gitnotes", "-c", "/tmp/gitnotes.toml", "list"];

    // Act
    let parsed = Args::try_parse_from(args).unwrap();

    // Assert
    assert!(matches!(parsed.command, Command::List));
    assert_eq!(
        parsed.config,
        Some(std::path::PathBuf::from("/tmp/gitnotes.toml"))
    );
}

#[test]
fn given_config_flag_after_subcommand_when_parsing_then_succeeds() {
    // Arrange - global flags work anywhere when marked as global
    let args = vec!["gitnotes", "list", "-c", "/tmp/gitnotes.toml"];

    // Act
    let parsed = Args::try_parse_from(args).unwrap();

    // Assert
    assert_eq!(
        parsed.config,
        Some(std::path::PathBuf::from("/tmp/gitnotes.toml"))
    );
}

#[test]
fn given_verbose_flag_when_parsing_then_increments_count() {
    // Arrange
    let args = vec!["gitnotes", "-vv", "list"];

    // Act
    let parsed = Args::try_parse_from(args).unwrap();

    // Assert
    assert_eq!(parsed.verbose, 2);
}

#[test]
fn given_ui_command_when_parsing_then_succeeds() {
    // Arrange
    let args = vec!["gitnotes", "ui"];

    // Act
    let parsed = Args::try_parse_from(args).unwrap();

    // Assert
    assert!(matches!(parsed.command, Command::Ui));
}

#[test]
fn given_edit_command_with_file_when_parsing_then_succeeds() {
    // Arrange
    let args = vec!["gitnotes", "edit", "hello", "--file", "body.md"];

    // Act
    let parsed = Args::try_parse_from(args).unwrap();

    // Assert
    match parsed.command {
        Command::Edit { name, body, file } => {
            assert_eq!(name, "hello");
            assert_eq!(body, None);
            assert_eq!(file, Some(std::path::PathBuf::from("body.md")));
        }
        _ => panic!("Expected Edit command"),
    }
}
