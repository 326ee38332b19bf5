//! Utility functions for HTML output and paste handling.

use once_cell::sync::Lazy;
use regex::Regex;

/// URL shape accepted by paste handling: an optional scheme, `//`, then a
/// dotted host or localhost
static URL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:\w+:)?//([^\s.]+\.\S{2}|localhost[:?\d]*)\S*$").expect("valid URL pattern")
});

/// Void elements among the tags the codec understands
pub const VOID_ELEMENTS: &[&str] = &["br"];

/// Check if a tag is a void element
pub fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag.to_lowercase().as_str())
}

/// Escape text content
pub fn escape_text(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            _ => result.push(c),
        }
    }
    result
}

/// Escape an attribute value
pub fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Check if a pasted string is a bare URL
pub fn looks_like_url(text: &str) -> bool {
    URL_PATTERN.is_match(text)
}
