//! Article text cleaning.
//!
//! Wire copy usually opens with a byline such as `NEW YORK (Reuters) - `
//! or `LONDON -- `. [`clean_content`] strips it, flattens whitespace and
//! never turns non-empty input into an empty string.

use regex::Regex;
use std::sync::LazyLock;

static BYLINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^.*?(?:\([^)]+\)\s*-\s*|\s+--\s+)").expect("byline pattern is valid")
});

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

fn collapse_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}

/// Strip leading bylines, collapse whitespace runs to one space and trim.
///
/// Bylines are stripped repeatedly while something non-blank remains, so
/// the result is a fixed point: `clean_content(clean_content(x)) ==
/// clean_content(x)`. If the first byline leaves nothing behind, or the
/// input is blank, it is returned unchanged.
pub fn clean_content(text: &str) -> String {
    if let Some(m) = BYLINE.find(text) {
        if text[m.end()..].trim().is_empty() {
            return text.to_string();
        }
    }

    let mut body = text;
    while let Some(m) = BYLINE.find(body) {
        let rest = &body[m.end()..];
        if rest.trim().is_empty() {
            break;
        }
        body = rest;
    }

    let cleaned = collapse_whitespace(body);
    if cleaned.is_empty() {
        text.to_string()
    } else {
        cleaned
    }
}

/// [`clean_content`] for a cell that may be absent. Absent input is empty.
pub fn clean_optional(text: Option<&str>) -> String {
    text.map(clean_content).unwrap_or_default()
}

/// Truncate to at most `max_chars` characters, appending `...` when cut.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
