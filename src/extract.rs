//! Remedy name extraction from generated text.
//!
//! The remedies prompt asks for a numbered list; each item's name is the text
//! after `N. ` up to the first hyphen or end of line. A name that itself
//! contains a hyphen ("Ginger-Lemon Tea") is cut at the hyphen, since the
//! model puts sub-details after " - " on the same line.

use regex::Regex;
use std::sync::LazyLock;

/// Line-start item marker: optional indentation, digits, a period, whitespace.
/// Captures everything up to the first hyphen.
static NUMBERED_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[ \t]*\d+\.[ \t]+([^-]*)").expect("numbered item pattern is valid")
});

/// Extract remedy names from `text` in order of appearance.
///
/// The numeric labels are ignored for ordering. Duplicates are kept. Items
/// whose name is empty after trimming are dropped; malformed lists simply
/// yield fewer names.
pub fn extract_remedies(text: &str) -> Vec<String> {
    text.lines()
        .filter_map(|line| NUMBERED_ITEM.captures(line))
        .filter_map(|caps| caps.get(1))
        .map(|name| name.as_str().trim())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
