//! Utility functions for identifier and string quoting in DOT text.
//!
//! This module provides functions for safely writing labels and titles into
//! DOT graph descriptions, ensuring special characters are escaped when
//! writing and restored when reading.

/// DOT keywords, which cannot be used as bare identifiers.
const DOT_KEYWORDS: &[&str] = &["node", "edge", "graph", "digraph", "subgraph", "strict"];

/// Checks if a string can be written as a bare DOT identifier:
/// - a letter/underscore followed by letters, digits and underscores, or
/// - a numeral (optional `-`, digits with at most one decimal point),
///
/// and is not a DOT keyword.
///
/// # Examples
/// ```
/// # use decaygraph::parser::utils::is_bare_id;
/// assert!(is_bare_id("gamma"));
/// assert!(is_bare_id("42"));
/// assert!(is_bare_id("-0.5"));
/// assert!(!is_bare_id("pi+"));
/// assert!(!is_bare_id("Event 0"));
/// assert!(!is_bare_id("node"));
/// assert!(!is_bare_id(""));
/// ```
pub fn is_bare_id(s: &str) -> bool {
    if s.is_empty() || DOT_KEYWORDS.iter().any(|k| k.eq_ignore_ascii_case(s)) {
        return false;
    }

    let first = s.as_bytes()[0];
    if first.is_ascii_alphabetic() || first == b'_' {
        return s.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_');
    }

    let digits = s.strip_prefix('-').unwrap_or(s);
    !digits.is_empty()
        && digits != "."
        && digits.bytes().all(|b| b.is_ascii_digit() || b == b'.')
        && digits.bytes().filter(|&b| b == b'.').count() <= 1
}

/// Quotes a string for use as a DOT identifier or attribute value.
///
/// The result is always enclosed in double quotes; internal double quotes and
/// backslashes are escaped with a backslash, so that
/// [ByteParser::parse_quoted_string](crate::parser::ByteParser::parse_quoted_string)
/// restores the original text exactly.
///
/// # Examples
/// ```
/// # use decaygraph::parser::utils::quote;
/// assert_eq!(quote("gamma"), "\"gamma\"");
/// assert_eq!(quote("Event 3"), "\"Event 3\"");
/// assert_eq!(quote("K(S)0"), "\"K(S)0\"");
/// assert_eq!(quote("say \"hi\""), "\"say \\\"hi\\\"\"");
/// assert_eq!(quote("a\\b"), "\"a\\\\b\"");
/// ```
pub fn quote(s: &str) -> String {
    let mut quoted = String::with_capacity(s.len() + 2);
    quoted.push('"');
    for ch in s.chars() {
        if ch == '"' || ch == '\\' {
            quoted.push('\\');
        }
        quoted.push(ch);
    }
    quoted.push('"');
    quoted
}

/// Writes `s` bare if it is a valid bare identifier, quoted otherwise.
///
/// # Examples
/// ```
/// # use decaygraph::parser::utils::quote_if_needed;
/// assert_eq!(quote_if_needed("circle"), "circle");
/// assert_eq!(quote_if_needed("pi-"), "\"pi-\"");
/// ```
pub fn quote_if_needed(s: &str) -> String {
    if is_bare_id(s) { s.to_string() } else { quote(s) }
}
