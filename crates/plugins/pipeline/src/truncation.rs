//! Truncation utilities for limiting output size.
//!
//! All limits are counted in characters, never bytes, so multi-byte text is
//! never split inside a code point.

/// Suffix appended to shortened text.
const ELLIPSIS: &str = "...";

/// Byte offset of the `n`-th character of `s`, or `s.len()` if shorter.
fn char_boundary(s: &str, n: usize) -> usize {
    s.char_indices().nth(n).map(|(i, _)| i).unwrap_or(s.len())
}

/// Cut `s` to its first `max_chars` characters and append `...`.
///
/// Strings of at most `max_chars` characters are returned unchanged. This is
/// the hard cut used for short previews, it does not look for word breaks.
pub fn preview(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    format!("{}{}", &s[..char_boundary(s, max_chars)], ELLIPSIS)
}

/// Truncate a string to max_chars, preserving word boundaries.
/// The returned string will be at most max_chars long (including ellipsis).
pub fn truncate_string(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }

    let content_limit = max_chars.saturating_sub(ELLIPSIS.len());
    if content_limit == 0 {
        return ELLIPSIS.to_string();
    }

    let truncated = &s[..char_boundary(s, content_limit)];
    let half = truncated.len() / 2;

    // Try to break at newline first
    if let Some(pos) = truncated.rfind('\n') {
        if pos > half {
            return format!("{}{}", &s[..pos], ELLIPSIS);
        }
    }

    // Fall back to word boundary
    if let Some(pos) = truncated.rfind(' ') {
        if pos > half {
            return format!("{}{}", &s[..pos], ELLIPSIS);
        }
    }

    format!("{}{}", truncated, ELLIPSIS)
}
