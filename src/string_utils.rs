//! Char-offset string utilities
//!
//! Block offsets in the document model are counted in chars (Unicode scalar
//! values), while Rust strings are indexed by byte. These helpers translate
//! between the two so that editing code never slices inside a multi-byte
//! character.
//!
//! # Example
//! ```ignore
//! use crate::string_utils::{char_count, slice_chars};
//!
//! let text = "Hei på deg";
//! assert_eq!(char_count(text), 10);
//! assert_eq!(slice_chars(text, 4, 6), "på");
//! ```

// ─────────────────────────────────────────────────────────────────────────────
// Index Conversion
// ─────────────────────────────────────────────────────────────────────────────

/// Number of chars in `s`.
#[inline]
pub fn char_count(s: &str) -> usize {
    s.chars().count()
}

/// Convert a char offset into a byte index.
///
/// Offsets past the end of the string clamp to `s.len()`.
#[inline]
pub fn char_to_byte(s: &str, char_index: usize) -> usize {
    s.char_indices()
        .nth(char_index)
        .map(|(byte, _)| byte)
        .unwrap_or(s.len())
}

// ─────────────────────────────────────────────────────────────────────────────
// Slicing and Splicing
// ─────────────────────────────────────────────────────────────────────────────

/// Slice `s` between two char offsets. Out-of-range offsets are clamped and
/// an inverted range yields an empty string.
pub fn slice_chars(s: &str, start: usize, end: usize) -> &str {
    let start_byte = char_to_byte(s, start);
    let end_byte = char_to_byte(s, end);
    if start_byte >= end_byte {
        return "";
    }
    &s[start_byte..end_byte]
}

/// Replace the chars in `[start, end)` with `replacement`, returning the new
/// string.
pub fn splice_chars(s: &str, start: usize, end: usize, replacement: &str) -> String {
    let start_byte = char_to_byte(s, start);
    let end_byte = char_to_byte(s, end).max(start_byte);

    let mut out = String::with_capacity(s.len() - (end_byte - start_byte) + replacement.len());
    out.push_str(&s[..start_byte]);
    out.push_str(replacement);
    out.push_str(&s[end_byte..]);
    out
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
