//! Text normalization shared by the matchers.
//!
//! Matching is substring-based over normalized text, so both sides of every
//! comparison must go through the same normalization. The helpers here are
//! the single source of that behavior.

use regex::Regex;
use std::sync::LazyLock;

/// Voltage token pattern: a number followed by "kV" or a standalone "V".
static VOLTAGE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+(?:\.\d+)?)\s*(?:kv|v\b)").expect("static regex"));

/// Lowercase and trim.
#[must_use]
pub fn normalize(value: &str) -> String {
    value.to_lowercase().trim().to_string()
}

/// Lowercase, trim, and collapse interior whitespace runs to single spaces.
#[must_use]
pub fn normalize_ws(value: &str) -> String {
    value
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lowercase and replace every character outside `[a-z0-9_]` and whitespace
/// with a space. Used to prepare the combined tender text for keyword and
/// voltage-token scanning.
#[must_use]
pub fn strip_punctuation(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '_' || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect()
}

/// Remove everything outside `[a-z0-9_]` entirely. Used to compare voltage
/// tokens against catalog rating strings ("11 kV" and "11kV" must agree).
#[must_use]
pub fn compact(value: &str) -> String {
    value
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect()
}

/// Extract the first voltage token from already punctuation-stripped text,
/// with internal whitespace removed (e.g. "11 kv" → "11kv").
#[must_use]
pub fn extract_voltage_token(stripped_text: &str) -> Option<String> {
    VOLTAGE_TOKEN
        .find(stripped_text)
        .map(|m| m.as_str().split_whitespace().collect())
}

/// Whether any of the keywords occurs in the text.
#[must_use]
pub fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}
