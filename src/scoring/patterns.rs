//! Pattern constants behind the structure and efficiency heuristics
//!
//! The exact shape of these patterns is what "quality" means to the scorer,
//! so each one is a named constant with its own tests.

use regex::Regex;
use std::sync::OnceLock;

/// A numbered (`12.`), hyphen (`-`) or bullet (`•`) list marker at a line start.
///
/// Indented markers do not count, and only ASCII digits form a number.
pub const LIST_MARKER: &str = r"(?m)^(?:[0-9]+\.|-|•)";

/// A labeled-section heading: a Cyrillic or Latin capital at line start,
/// no other colon on the line, and a colon right before the line end.
///
/// Only `А-Я` and `A-Z` initials count. `Ё` and other scripts are not
/// recognised.
pub const SECTION_HEADING: &str = r"(?m)^[А-ЯA-Z][^:\n]*:[ \t\r]*$";

/// A blank line: two consecutive newlines. A line holding only spaces, or a
/// CRLF pair between the newlines, does not separate paragraphs.
pub const PARAGRAPH_BREAK: &str = r"\n\n";

/// One or more consecutive terminal punctuation marks act as one delimiter
pub const SENTENCE_TERMINATORS: &str = r"[.!?]+";

/// Imperative task verbs, matched as lowercase substrings.
///
/// Roughly: do, form, give, create, compose, describe, suggest, format, output.
pub const DIRECTIVE_STEMS: [&str; 9] = [
    "сделай",
    "сформируй",
    "дай",
    "создай",
    "составь",
    "опиши",
    "предложи",
    "оформи",
    "выведи",
];

static LIST_MARKER_RE: OnceLock<Regex> = OnceLock::new();
static SECTION_HEADING_RE: OnceLock<Regex> = OnceLock::new();
static PARAGRAPH_BREAK_RE: OnceLock<Regex> = OnceLock::new();
static SENTENCE_TERMINATORS_RE: OnceLock<Regex> = OnceLock::new();

pub fn list_marker() -> &'static Regex {
    LIST_MARKER_RE.get_or_init(|| Regex::new(LIST_MARKER).expect("valid regex"))
}

pub fn section_heading() -> &'static Regex {
    SECTION_HEADING_RE.get_or_init(|| Regex::new(SECTION_HEADING).expect("valid regex"))
}

pub fn paragraph_break() -> &'static Regex {
    PARAGRAPH_BREAK_RE.get_or_init(|| Regex::new(PARAGRAPH_BREAK).expect("valid regex"))
}

pub fn sentence_terminators() -> &'static Regex {
    SENTENCE_TERMINATORS_RE.get_or_init(|| Regex::new(SENTENCE_TERMINATORS).expect("valid regex"))
}

/// Case-insensitive substring check against [`DIRECTIVE_STEMS`]
pub fn has_directive(text: &str) -> bool {
    let lower = text.to_lowercase();
    DIRECTIVE_STEMS.iter().any(|stem| lower.contains(stem))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_marker_numbered() {
        assert!(list_marker().is_match("Plan\n1. First"));
        assert!(list_marker().is_match("12. Twelfth item"));
    }

    #[test]
    fn test_list_marker_rejects_indent_and_non_ascii_digits() {
        assert!(!list_marker().is_match("Plan\n   3. step"));
        assert!(!list_marker().is_match("Plan\n\t- step"));
        assert!(!list_marker().is_match("Plan\n١. step"));
    }

    #[test]
    fn test_list_marker_bullets() {
        assert!(list_marker().is_match("Items\n- one"));
        assert!(list_marker().is_match("Items\n• one"));
    }

    #[test]
    fn test_list_marker_requires_line_start() {
        assert!(!list_marker().is_match("Version 1. is out - really"));
        assert!(!list_marker().is_match("no markers here"));
        // Digits without a dot are not a numbered marker
        assert!(!list_marker().is_match("2024 was a year"));
    }

    #[test]
    fn test_section_heading_latin_and_cyrillic() {
        assert!(section_heading().is_match("Context:\nsome text"));
        assert!(section_heading().is_match("intro\nЗадача:"));
        assert!(section_heading().is_match("Output format:  \nJSON"));
    }

    #[test]
    fn test_section_heading_rejects_inline_colon_and_lowercase() {
        assert!(!section_heading().is_match("Задача: написать письмо"));
        assert!(!section_heading().is_match("context:\n"));
        assert!(!section_heading().is_match("Time: 10:30:"));
    }

    #[test]
    fn test_section_heading_limited_scripts() {
        // Ё sits outside А-Я; Greek capitals are not recognised either
        assert!(!section_heading().is_match("Ёлка:"));
        assert!(!section_heading().is_match("Σκοπός:"));
    }

    #[test]
    fn test_section_heading_crlf() {
        assert!(section_heading().is_match("Steps:\r\n1. go"));
    }

    #[test]
    fn test_paragraph_break() {
        assert!(paragraph_break().is_match("first\n\nsecond"));
        assert!(!paragraph_break().is_match("first\n  \t\nsecond"));
        assert!(!paragraph_break().is_match("first\r\n\r\nsecond"));
        assert!(!paragraph_break().is_match("first\nsecond"));
    }

    #[test]
    fn test_sentence_terminators_collapse_runs() {
        let parts: Vec<&str> = sentence_terminators().split("Wait?! Really... Yes.").collect();
        assert_eq!(parts, vec!["Wait", " Really", " Yes", ""]);
    }

    #[test]
    fn test_directive_case_insensitive() {
        assert!(has_directive("СДЕЛАЙ отчёт"));
        assert!(has_directive("Пожалуйста, опиши процесс"));
        assert!(has_directive("выведи таблицу"));
        assert!(!has_directive("Write a summary of the text"));
    }

    #[test]
    fn test_directive_matches_substrings() {
        // Stems are substrings, so inflected or compound words also match
        assert!(has_directive("Дайте три примера"));
        assert!(has_directive("Составьте план"));
    }

    #[test]
    fn test_nine_directive_stems() {
        assert_eq!(DIRECTIVE_STEMS.len(), 9);
        for stem in DIRECTIVE_STEMS {
            assert_eq!(stem, stem.to_lowercase());
        }
    }
}
