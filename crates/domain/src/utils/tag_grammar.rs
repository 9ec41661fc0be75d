//! Inline tag marker grammar.
//!
//! Event descriptions carry category markers of the form `[[[TAG:token]]]`.
//! This module only knows the text shape of those markers; deciding whether a
//! token is a whitelisted category happens in the core validator.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;

static TAG_MARKER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i-u)\[\[\[TAG:([A-Z0-9_-]+)\]\]\]").expect("TAG_MARKER_REGEX should compile")
});

/// Three or more line breaks (blank lines may carry spaces or tabs)
static BLANK_LINE_RUN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\r?\n[ \t]*){3,}").expect("BLANK_LINE_RUN_REGEX should compile")
});

static TAG_FORMAT_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z0-9_-]+$").expect("TAG_FORMAT_REGEX should compile"));

/// Return every marker token in `text`, uppercased, in order of appearance.
///
/// Duplicates are kept; set semantics are applied by the caller.
pub fn find_tag_tokens(text: &str) -> Vec<String> {
    TAG_MARKER_REGEX
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_ascii_uppercase())
        .collect()
}

/// Whether `text` contains at least one marker.
pub fn has_tag_marker(text: &str) -> bool {
    TAG_MARKER_REGEX.is_match(text)
}

/// Remove all markers, collapse blank-line runs and trim.
///
/// Removal is repeated until no marker is left because deleting an inner
/// marker can splice its neighbours into a new one
/// (`[[[TAG:[[[TAG:X]]]Y]]]`). The result is a fixpoint, so
/// `strip_tags(strip_tags(x)) == strip_tags(x)`.
pub fn strip_tags(text: &str) -> String {
    let mut stripped = text.to_string();
    while TAG_MARKER_REGEX.is_match(&stripped) {
        stripped = TAG_MARKER_REGEX.replace_all(&stripped, "").into_owned();
    }

    let collapsed = BLANK_LINE_RUN_REGEX.replace_all(&stripped, "\n\n");
    collapsed.trim().to_string()
}

/// Check an admin-entered category id against `[A-Z0-9_-]+` (any casing).
pub fn is_valid_tag_format(token: &str) -> bool {
    TAG_FORMAT_REGEX.is_match(&token.to_ascii_uppercase())
}

/// Normalize a requested tag filter: trim, uppercase, drop blanks, dedupe, sort.
pub fn normalize_tag_filter<S: AsRef<str>>(tags: &[S]) -> Vec<String> {
    tags.iter()
        .map(|tag| tag.as_ref().trim().to_ascii_uppercase())
        .filter(|tag| !tag.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_tokens_case_insensitively() {
        let tokens = find_tag_tokens("Join us [[[TAG:community]]] and [[[tag:Workshop]]]");
        assert_eq!(tokens, vec!["COMMUNITY".to_string(), "WORKSHOP".to_string()]);
    }

    #[test]
    fn keeps_duplicates_for_caller() {
        let tokens = find_tag_tokens("[[[TAG:community]]] [[[TAG:COMMUNITY]]]");
        assert_eq!(tokens.len(), 2);
    }

    #[test]
    fn ignores_malformed_markers() {
        assert!(find_tag_tokens("[[TAG:COMMUNITY]]").is_empty());
        assert!(find_tag_tokens("[[[TAG:]]]").is_empty());
        assert!(find_tag_tokens("[[[TAG:two words]]]").is_empty());
        assert!(find_tag_tokens("[[[TAG:caf\u{e9}]]]").is_empty());
    }

    #[test]
    fn accepts_dash_and_underscore() {
        assert_eq!(find_tag_tokens("[[[TAG:open_day-2]]]"), vec!["OPEN_DAY-2".to_string()]);
    }

    #[test]
    fn strip_removes_markers_and_trims() {
        let text = "[[[TAG:COMMUNITY]]]\nBring snacks.\n[[[TAG:FOOBAR]]]";
        assert_eq!(strip_tags(text), "Bring snacks.");
        assert!(!has_tag_marker(&strip_tags(text)));
    }

    #[test]
    fn strip_collapses_blank_line_runs() {
        let text = "First line\n\n[[[TAG:A]]]\n\n\nSecond line";
        assert_eq!(strip_tags(text), "First line\n\nSecond line");

        let spaced = "One\n  \n\t\n\nTwo";
        assert_eq!(strip_tags(spaced), "One\n\nTwo");
    }

    #[test]
    fn strip_keeps_single_blank_line() {
        assert_eq!(strip_tags("a\n\nb"), "a\n\nb");
        assert_eq!(strip_tags("a\nb"), "a\nb");
    }

    #[test]
    fn strip_handles_nested_markers() {
        let nested = "x [[[TAG:[[[TAG:INNER]]]OUTER]]] y";
        let once = strip_tags(nested);
        assert!(!has_tag_marker(&once));
        assert_eq!(once, "x  y");
    }

    #[test]
    fn strip_is_idempotent() {
        let samples = [
            "",
            "   ",
            "plain text",
            "[[[TAG:A]]][[[TAG:B]]]",
            "a\r\n\r\n\r\n\r\nb",
            "x [[[TAG:[[[TAG:INNER]]]OUTER]]] y",
            "\n\n[[[TAG:A]]]\n\n\n\nmiddle\n\n\n[[[tag:b]]]  ",
            "[[[TAG:A]]\n]]]",
        ];
        for sample in samples {
            let once = strip_tags(sample);
            assert_eq!(strip_tags(&once), once, "not idempotent for {sample:?}");
        }
    }

    #[test]
    fn filter_normalization_sorts_and_dedupes() {
        let normalized = normalize_tag_filter(&["b", " A ", "B", ""]);
        assert_eq!(normalized, vec!["A".to_string(), "B".to_string()]);
        assert!(normalize_tag_filter::<&str>(&[]).is_empty());
    }

    #[test]
    fn tag_format_validation() {
        assert!(is_valid_tag_format("COMMUNITY"));
        assert!(is_valid_tag_format("community"));
        assert!(is_valid_tag_format("OPEN_DAY-2"));
        assert!(!is_valid_tag_format(""));
        assert!(!is_valid_tag_format("HAS SPACE"));
        assert!(!is_valid_tag_format("EMOJI\u{1f600}"));
        assert!(!is_valid_tag_format("A.B"));
    }
}
