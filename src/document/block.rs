//! Text blocks and inline style ranges

use crate::document::style::{InlineStyle, StyleSet};
use crate::string_utils::{char_count, slice_chars, splice_chars};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

// ─────────────────────────────────────────────────────────────────────────────
// Block Key
// ─────────────────────────────────────────────────────────────────────────────

static NEXT_KEY: AtomicU64 = AtomicU64::new(1);

/// Identifier of a block, unique within one document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockKey(String);

impl BlockKey {
    /// Generate a new key. Keys are short base-36 strings.
    pub fn generate() -> Self {
        let mut n = NEXT_KEY.fetch_add(1, Ordering::Relaxed);
        let mut digits = Vec::new();
        while n > 0 {
            let d = (n % 36) as u32;
            digits.push(std::char::from_digit(d, 36).unwrap_or('0'));
            n /= 36;
        }
        digits.reverse();
        let body: String = digits.into_iter().collect();
        BlockKey(format!("b{body}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for BlockKey {
    fn from(s: &str) -> Self {
        BlockKey(s.to_string())
    }
}

impl From<String> for BlockKey {
    fn from(s: String) -> Self {
        BlockKey(s)
    }
}

impl fmt::Display for BlockKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Style Range
// ─────────────────────────────────────────────────────────────────────────────

/// A maximal run of characters carrying one style.
///
/// Offsets and lengths are in chars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleRange {
    pub offset: usize,
    pub length: usize,
    pub style: InlineStyle,
}

impl StyleRange {
    pub fn new(offset: usize, length: usize, style: InlineStyle) -> Self {
        Self {
            offset,
            length,
            style,
        }
    }

    pub fn end(&self) -> usize {
        self.offset + self.length
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Block
// ─────────────────────────────────────────────────────────────────────────────

/// One line of text with a style set per character.
///
/// Invariant: `styles.len()` equals the number of chars in `text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    key: BlockKey,
    text: String,
    styles: Vec<StyleSet>,
}

impl Block {
    /// Create an empty block.
    pub fn new(key: BlockKey) -> Self {
        Self {
            key,
            text: String::new(),
            styles: Vec::new(),
        }
    }

    /// Create a block of unstyled text.
    pub fn with_text(key: BlockKey, text: &str) -> Self {
        Self {
            key,
            text: text.to_string(),
            styles: vec![StyleSet::empty(); char_count(text)],
        }
    }

    /// Build a block from text and style ranges.
    ///
    /// Ranges reaching past the end of the text are clipped.
    pub fn from_ranges(key: BlockKey, text: &str, ranges: &[StyleRange]) -> Self {
        let mut block = Self::with_text(key, text);
        for range in ranges {
            block.set_style(range.offset, range.end(), range.style, true);
        }
        block
    }

    pub fn key(&self) -> &BlockKey {
        &self.key
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length in chars.
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Styles of the char at `offset`, if any.
    pub fn style_at(&self, offset: usize) -> Option<StyleSet> {
        self.styles.get(offset).copied()
    }

    /// Styles of the chars in `[start, end)`.
    pub fn styles_in(&self, start: usize, end: usize) -> &[StyleSet] {
        let end = end.min(self.len());
        let start = start.min(end);
        &self.styles[start..end]
    }

    /// Insert `text` at `offset`, every inserted char carrying `style`.
    pub fn insert(&mut self, offset: usize, text: &str, style: StyleSet) {
        let offset = offset.min(self.len());
        self.text = splice_chars(&self.text, offset, offset, text);
        let inserted = std::iter::repeat(style).take(char_count(text));
        self.styles.splice(offset..offset, inserted);
    }

    /// Remove the chars in `[start, end)`.
    pub fn remove(&mut self, start: usize, end: usize) {
        let end = end.min(self.len());
        let start = start.min(end);
        if start == end {
            return;
        }
        self.text = splice_chars(&self.text, start, end, "");
        self.styles.drain(start..end);
    }

    /// Split the block at `offset`, returning the tail as a new block with
    /// the given key.
    pub fn split_off(&mut self, offset: usize, key: BlockKey) -> Block {
        let offset = offset.min(self.len());
        let tail_text = slice_chars(&self.text, offset, self.len()).to_string();
        let tail_styles = self.styles.split_off(offset);
        self.text = slice_chars(&self.text, 0, offset).to_string();
        Block {
            key,
            text: tail_text,
            styles: tail_styles,
        }
    }

    /// Append the contents of `other` to this block.
    pub fn append(&mut self, other: Block) {
        self.text.push_str(&other.text);
        self.styles.extend(other.styles);
    }

    /// Add (`on == true`) or remove `style` on the chars in `[start, end)`.
    pub fn set_style(&mut self, start: usize, end: usize, style: InlineStyle, on: bool) {
        let end = end.min(self.len());
        let start = start.min(end);
        for set in &mut self.styles[start..end] {
            *set = if on { set.with(style) } else { set.without(style) };
        }
    }

    /// Derive the style ranges of this block.
    ///
    /// Ranges are ordered by offset, then by style. Each range is a maximal
    /// run, so one style never has two ranges starting at the same offset or
    /// touching each other.
    pub fn style_ranges(&self) -> Vec<StyleRange> {
        let mut ranges = Vec::new();
        for style in InlineStyle::ALL {
            let mut run_start: Option<usize> = None;
            for (i, set) in self.styles.iter().enumerate() {
                match (set.contains(style), run_start) {
                    (true, None) => run_start = Some(i),
                    (false, Some(start)) => {
                        ranges.push(StyleRange::new(start, i - start, style));
                        run_start = None;
                    }
                    _ => {}
                }
            }
            if let Some(start) = run_start {
                ranges.push(StyleRange::new(start, self.len() - start, style));
            }
        }
        ranges.sort_by_key(|r| (r.offset, r.style));
        ranges
    }

    /// Iterate maximal runs of identically styled text as
    /// `(text, styles)` pairs, for rendering.
    pub fn styled_runs(&self) -> Vec<(&str, StyleSet)> {
        let mut runs = Vec::new();
        let mut run_start = 0;
        for i in 1..=self.len() {
            if i == self.len() || self.styles[i] != self.styles[run_start] {
                runs.push((slice_chars(&self.text, run_start, i), self.styles[run_start]));
                run_start = i;
            }
        }
        runs
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> BlockKey {
        BlockKey::from(s)
    }

    #[test]
    fn test_generated_keys_are_unique() {
        let a = BlockKey::generate();
        let b = BlockKey::generate();
        assert_ne!(a, b);
        assert!(a.as_str().starts_with('b'));
    }

    #[test]
    fn test_insert_styles_inserted_chars() {
        let mut block = Block::with_text(key("a"), "ab");
        block.insert(1, "XY", StyleSet::of(InlineStyle::Red));
        assert_eq!(block.text(), "aXYb");
        assert_eq!(block.len(), 4);
        assert_eq!(
            block.style_ranges(),
            vec![StyleRange::new(1, 2, InlineStyle::Red)]
        );
    }

    #[test]
    fn test_insert_multibyte_keeps_invariant() {
        let mut block = Block::new(key("a"));
        block.insert(0, "på", StyleSet::empty());
        block.insert(2, "🎉", StyleSet::of(InlineStyle::Heading));
        assert_eq!(block.text(), "på🎉");
        assert_eq!(block.len(), 3);
        assert_eq!(block.style_at(2), Some(StyleSet::of(InlineStyle::Heading)));
    }

    #[test]
    fn test_remove_range() {
        let mut block = Block::with_text(key("a"), "***");
        block.remove(0, 3);
        assert!(block.is_empty());
        assert_eq!(block.text(), "");
    }

    #[test]
    fn test_remove_out_of_range_is_clamped() {
        let mut block = Block::with_text(key("a"), "abc");
        block.remove(2, 10);
        assert_eq!(block.text(), "ab");
        block.remove(5, 1);
        assert_eq!(block.text(), "ab");
    }

    #[test]
    fn test_split_and_append() {
        let mut block = Block::from_ranges(
            key("a"),
            "Hello",
            &[StyleRange::new(0, 5, InlineStyle::Underline)],
        );
        let tail = block.split_off(2, key("b"));
        assert_eq!(block.text(), "He");
        assert_eq!(tail.text(), "llo");
        assert_eq!(tail.key(), &key("b"));
        assert_eq!(
            tail.style_ranges(),
            vec![StyleRange::new(0, 3, InlineStyle::Underline)]
        );

        block.append(tail);
        assert_eq!(block.text(), "Hello");
        assert_eq!(
            block.style_ranges(),
            vec![StyleRange::new(0, 5, InlineStyle::Underline)]
        );
    }

    #[test]
    fn test_style_ranges_are_maximal_and_ordered() {
        let block = Block::from_ranges(
            key("a"),
            "abcdef",
            &[
                StyleRange::new(0, 2, InlineStyle::Red),
                StyleRange::new(2, 2, InlineStyle::Red),
                StyleRange::new(1, 4, InlineStyle::Heading),
            ],
        );
        assert_eq!(
            block.style_ranges(),
            vec![
                StyleRange::new(0, 4, InlineStyle::Red),
                StyleRange::new(1, 4, InlineStyle::Heading),
            ]
        );
    }

    #[test]
    fn test_set_style_off() {
        let mut block = Block::from_ranges(
            key("a"),
            "abcd",
            &[StyleRange::new(0, 4, InlineStyle::Bold)],
        );
        block.set_style(1, 3, InlineStyle::Bold, false);
        assert_eq!(
            block.style_ranges(),
            vec![
                StyleRange::new(0, 1, InlineStyle::Bold),
                StyleRange::new(3, 1, InlineStyle::Bold),
            ]
        );
    }

    #[test]
    fn test_styled_runs() {
        let block = Block::from_ranges(
            key("a"),
            "abcd",
            &[StyleRange::new(2, 2, InlineStyle::Red)],
        );
        let runs = block.styled_runs();
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0], ("ab", StyleSet::empty()));
        assert_eq!(runs[1], ("cd", StyleSet::of(InlineStyle::Red)));
        assert!(Block::new(key("e")).styled_runs().is_empty());
    }
}
