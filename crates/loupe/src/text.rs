//! Text helpers shared by the query engine and the code codec.

/// Collapse every whitespace run to a single space and trim both ends.
#[must_use]
pub fn normalize_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Compare a candidate against a search string the way every text-based
/// locator does: both sides normalized, then either equality or a
/// case-insensitive substring test.
#[must_use]
pub fn text_matches(candidate: &str, search: &str, exact: bool) -> bool {
    let candidate = normalize_text(candidate);
    let search = normalize_text(search);
    if exact {
        candidate == search
    } else {
        candidate.to_lowercase().contains(&search.to_lowercase())
    }
}

/// Escape a value for interpolation into a double-quoted string literal.
#[must_use]
pub fn escape_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            _ => out.push(ch),
        }
    }
    out
}

/// Escape a value for a single-quoted literal. Applies [`escape_string`] and
/// additionally escapes the single quote.
#[must_use]
pub fn escape_single_quoted(text: &str) -> String {
    escape_string(text).replace('\'', "\\'")
}

/// Undo the escapes produced by [`escape_string`] and [`escape_single_quoted`].
///
/// Unknown escapes keep the escaped character.
#[must_use]
pub fn unescape_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

/// Shorten `text` to `len` characters, appending `...` when cut.
#[must_use]
pub fn truncate(text: &str, len: usize) -> String {
    if text.chars().count() > len {
        let mut cut: String = text.chars().take(len).collect();
        cut.push_str("...");
        cut
    } else {
        text.to_string()
    }
}
