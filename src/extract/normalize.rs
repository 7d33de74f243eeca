//! Field-level text cleaning applied between scraped text and the record

use regex::Regex;
use std::sync::LazyLock;

static NUMBER_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^[0-9]+\.\s*(.*)$").unwrap());

static LEADING_DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^([0-9]+)").unwrap());

/// Trim surrounding whitespace. Missing input stays missing.
pub fn strip_text(value: Option<&str>) -> Option<&str> {
    value.map(str::trim)
}

/// Trim whitespace and any run of enclosing parenthesis characters.
///
/// Balance is not checked: `"(1.2M"` and `"1.2M)"` both become `"1.2M"`.
pub fn remove_parentheses(value: &str) -> String {
    value
        .trim_matches(|c: char| c == '(' || c == ')' || c.is_whitespace())
        .to_string()
}

/// Drop inline chart positions such as `"12. "` from the front of a title.
///
/// Stacked positions (`"1. 2. Title"`) are all removed, so the result never
/// starts with another one.
pub fn remove_number_prefix(value: &str) -> String {
    let mut value = value.trim();
    while let Some(rest) = NUMBER_PREFIX.captures(value).and_then(|caps| caps.get(1)) {
        value = rest.as_str();
    }
    value.to_string()
}

/// Leading run of digits from a ranking label, or `""` when there is none.
pub fn clean_rank(value: &str) -> String {
    LEADING_DIGITS
        .captures(value.trim())
        .map(|caps| caps[1].to_string())
        .unwrap_or_default()
}
