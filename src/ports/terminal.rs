// src/ports/terminal.rs
use crate::domain::{DomainError, NoteEntry};

/// ANSI color codes
pub struct Color;

impl Color {
    pub const RESET: &'static str = "\x1b[0m";
    pub const BOLD: &'static str = "\x1b[1m";
    pub const DIM: &'static str = "\x1b[2m";
}

/// Renders notes and listings for the terminal.
///
/// Markdown handling is deliberately minimal: the two header levels get
/// emphasis and line breaks are preserved; everything else passes through
/// untouched.
#[derive(Debug)]
pub struct TerminalPresenter {
    use_color: bool,
}

impl TerminalPresenter {
    pub fn new() -> Self {
        Self { use_color: true }
    }

    /// Presenter without ANSI escapes, for piped output and tests.
    pub fn plain() -> Self {
        Self { use_color: false }
    }

    fn emphasized(&self, line: &str) -> String {
        if self.use_color {
            format!("{}{}{}", Color::BOLD, line, Color::RESET)
        } else {
            line.to_string()
        }
    }

    fn dimmed(&self, text: &str) -> String {
        if self.use_color {
            format!("{}{}{}", Color::DIM, text, Color::RESET)
        } else {
            text.to_string()
        }
    }

    /// Render note text line by line.
    pub fn render(&self, text: &str) -> String {
        text.lines()
            .map(|line| {
                if line.starts_with("# ") || line.starts_with("## ") {
                    self.emphasized(line)
                } else {
                    line.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Render the note listing as a numbered list, newest first.
    pub fn render_list(&self, entries: &[NoteEntry]) -> String {
        if entries.is_empty() {
            return "No notes yet.".to_string();
        }

        entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                format!(
                    "{:>3}. {}  {}",
                    i + 1,
                    entry.display_title(),
                    self.dimmed(&format!("({})", entry.display_date()))
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// User-facing message for a failed action, with a troubleshooting hint
    /// appended when the message looks like a transport failure.
    pub fn error_message(&self, err: &DomainError) -> String {
        user_message(err)
    }
}

/// Format a domain error for the user, appending a hint for
/// transport-looking failures.
pub fn user_message(err: &DomainError) -> String {
    let text = err.to_string();
    match network_hint(&text) {
        Some(hint) => format!("{text}\nTIP: {hint}"),
        None => text,
    }
}

impl Default for TerminalPresenter {
    fn default() -> Self {
        Self::new()
    }
}

/// Substring heuristics over the error message; there is no reliable
/// structured way to tell "no internet" from other failures here.
pub fn network_hint(message: &str) -> Option<&'static str> {
    let lowered = message.to_lowercase();
    let looks_transport = ["network", "connect", "connection", "dns", "timed out"]
        .iter()
        .any(|needle| lowered.contains(needle));

    if looks_transport {
        Some(
            "Check your internet connection and make sure the token was pasted \
             without stray whitespace.",
        )
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str) -> NoteEntry {
        NoteEntry {
            name: name.to_string(),
            url: format!("https://example.invalid/{name}"),
            sha: "sha".to_string(),
        }
    }

    #[test]
    fn given_two_header_levels_when_rendering_then_both_are_emphasized() {
        let presenter = TerminalPresenter::new();

        let rendered = presenter.render("# Title\n## Section\nplain text");

        let lines: Vec<&str> = rendered.lines().collect();
        assert!(lines[0].contains(Color::BOLD));
        assert!(lines[1].contains(Color::BOLD));
        assert_eq!(lines[2], "plain text");
    }

    #[test]
    fn given_deeper_header_when_rendering_then_left_untouched() {
        let presenter = TerminalPresenter::plain();

        let rendered = presenter.render("### Deep header");

        assert_eq!(rendered, "### Deep header");
    }

    #[test]
    fn given_blank_lines_when_rendering_then_line_breaks_are_preserved() {
        let presenter = TerminalPresenter::plain();

        let rendered = presenter.render("one\n\ntwo");

        assert_eq!(rendered, "one\n\ntwo");
    }

    #[test]
    fn given_entries_when_rendering_list_then_numbers_titles_and_dates() {
        let presenter = TerminalPresenter::plain();
        let entries = vec![
            entry("2024-01-02_10-00_second.md"),
            entry("2024-01-01_09-00_first.md"),
        ];

        let rendered = presenter.render_list(&entries);

        let lines: Vec<&str> = rendered.lines().collect();
        assert!(lines[0].contains("1. second"));
        assert!(lines[0].contains("(2024-01-02 10-00)"));
        assert!(lines[1].contains("2. first"));
    }

    #[test]
    fn given_no_entries_when_rendering_list_then_says_so() {
        let presenter = TerminalPresenter::plain();

        assert_eq!(presenter.render_list(&[]), "No notes yet.");
    }

    #[test]
    fn given_network_error_when_formatting_then_appends_hint() {
        let presenter = TerminalPresenter::plain();
        let err = DomainError::Network("error sending request: connection refused".to_string());

        let message = presenter.error_message(&err);

        assert!(message.contains("TIP:"));
    }

    #[test]
    fn given_http_error_when_formatting_then_no_hint() {
        let presenter = TerminalPresenter::plain();
        let err = DomainError::Http {
            status: 401,
            message: "Bad credentials".to_string(),
        };

        let message = presenter.error_message(&err);

        assert!(!message.contains("TIP:"));
        assert!(message.contains("401"));
    }
}
