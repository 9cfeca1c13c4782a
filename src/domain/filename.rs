// src/domain/filename.rs
use crate::constants::{FALLBACK_SLUG, SLUG_MAX_LEN, TIMESTAMP_FORMAT};
use chrono::NaiveDateTime;
use regex::Regex;
use std::sync::OnceLock;

fn strip_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^\w\s-]").expect("static regex"))
}

fn whitespace_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("static regex"))
}

/// Derive a filename slug from a note title.
///
/// Lowercases, strips everything that is not a word character, whitespace or
/// hyphen, collapses whitespace runs to single hyphens and truncates to
/// [`SLUG_MAX_LEN`] characters. An empty result falls back to
/// [`FALLBACK_SLUG`] so the filename always carries a slug segment.
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    let stripped = strip_regex().replace_all(&lowered, "");
    let hyphenated = whitespace_regex().replace_all(&stripped, "-");

    let slug: String = hyphenated.chars().take(SLUG_MAX_LEN).collect();
    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug
    }
}

/// Compute the storage filename for a note created at `timestamp`.
///
/// The timestamp prefix is zero-padded (`YYYY-MM-DD_HH-MM`) so the filename
/// doubles as a lexicographic sort key: sorting names descending yields
/// recency order. Filenames are immutable after creation.
pub fn filename_for(title: &str, timestamp: NaiveDateTime) -> String {
    format!(
        "{}_{}.md",
        timestamp.format(TIMESTAMP_FORMAT),
        slugify(title)
    )
}
