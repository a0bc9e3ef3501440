//! Common utilities for TypeScript declaration generation.
//!
//! This module provides identifier and comment helpers shared by the builder,
//! the generator, and emission.

/// Check if a property name must be quoted to be used as a key.
///
/// Returns true if the name:
/// - Is empty
/// - Doesn't start with a letter, underscore, or dollar sign
/// - Contains characters other than alphanumeric, underscore, or dollar sign
pub fn needs_quoting(name: &str) -> bool {
    name.is_empty()
        || !name
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        || !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Escape a string for use in a single-quoted TypeScript string literal.
pub fn escape_js_string(s: &str) -> String {
    s.replace('\\', "\\\\").replace('\'', "\\'")
}

/// Quote a property key if it is not a valid identifier.
pub fn quote_if_needed(name: &str) -> String {
    if needs_quoting(name) {
        format!("'{}'", escape_js_string(name))
    } else {
        name.to_string()
    }
}

/// Build a PascalCase symbol prefix from an interface name.
///
/// Every character that can't appear in an identifier acts as a word
/// separator: `user-list` becomes `UserList`, `{id}` becomes `Id`. A leading
/// digit gets an underscore prefix. An empty result falls back to `Index`.
pub fn symbol_prefix(name: &str) -> String {
    let mut result = String::new();
    for part in name.split(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '$')) {
        result.push_str(&capitalize_first(part));
    }

    if result.is_empty() {
        return "Index".to_string();
    }

    if result.starts_with(|c: char| c.is_ascii_digit()) {
        result.insert(0, '_');
    }

    result
}

/// Capitalize the first letter of a string.
pub fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Collapse text onto one line so it can sit inside a `//` comment.
pub fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
