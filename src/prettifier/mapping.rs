//! Heuristic position mapping between original and pretty-printed text.
//!
//! Formatters move text around but rarely reorder it, so a greedy forward scan
//! is enough to line up most non-whitespace characters. The result is allowed
//! to under-map (`None`) but never points outside the formatted text and never
//! moves backwards.

/// Default number of formatted characters scanned per source character.
pub const DEFAULT_LOOKAHEAD: usize = 200;

/// Map every char of `original` to a char index in `formatted`, using the
/// default lookahead window.
pub fn compute_mapping(original: &str, formatted: &str) -> Vec<Option<usize>> {
    compute_mapping_with_window(original, formatted, DEFAULT_LOOKAHEAD)
}

/// Map every char of `original` to a char index in `formatted`.
///
/// The returned vector has one slot per char of `original`. Whitespace is
/// always `None`; every other char is matched against the next `window`
/// chars of `formatted` following the last match.
pub fn compute_mapping_with_window(
    original: &str,
    formatted: &str,
    window: usize,
) -> Vec<Option<usize>> {
    let formatted: Vec<char> = formatted.chars().collect();
    let mut mapping = Vec::with_capacity(original.len());
    let mut cursor = 0usize;

    for ch in original.chars() {
        if ch.is_whitespace() {
            mapping.push(None);
            continue;
        }

        let end = cursor.saturating_add(window).min(formatted.len());
        let found = formatted
            .get(cursor..end)
            .and_then(|candidates| candidates.iter().position(|&f| chars_equivalent(ch, f)))
            .map(|offset| cursor + offset);

        if let Some(idx) = found {
            cursor = idx + 1;
        }
        mapping.push(found);
    }

    mapping
}

/// Identical chars match; single and double quotes are interchangeable.
fn chars_equivalent(a: char, b: char) -> bool {
    a == b || (is_quote(a) && is_quote(b))
}

fn is_quote(c: char) -> bool {
    c == '\'' || c == '"'
}
