//! Document content: an ordered list of blocks
//!
//! `ContentState` is a value type. Editing operations take `&self` and
//! return the next revision, leaving the original untouched; the editor
//! state decides which revision becomes current.

use crate::document::block::{Block, BlockKey};
use crate::document::selection::Selection;
use crate::document::style::{InlineStyle, StyleSet};
use log::debug;

/// The full styled text of a document.
///
/// Invariant: there is always at least one block and block keys are unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentState {
    blocks: Vec<Block>,
}

impl Default for ContentState {
    fn default() -> Self {
        Self::new_empty()
    }
}

impl ContentState {
    /// A document with a single empty block.
    pub fn new_empty() -> Self {
        Self {
            blocks: vec![Block::new(BlockKey::generate())],
        }
    }

    /// Unstyled content with one block per line of `text`.
    #[cfg(test)]
    pub(crate) fn from_text(text: &str) -> Self {
        let blocks = text
            .split('\n')
            .map(|line| Block::with_text(BlockKey::generate(), line))
            .collect();
        Self { blocks }
    }

    /// Build content from already-validated blocks.
    ///
    /// Returns `None` when `blocks` is empty or contains duplicate keys.
    pub fn from_blocks(blocks: Vec<Block>) -> Option<Self> {
        if blocks.is_empty() {
            return None;
        }
        let mut keys: Vec<&BlockKey> = blocks.iter().map(Block::key).collect();
        keys.sort();
        keys.dedup();
        if keys.len() != blocks.len() {
            return None;
        }
        Some(Self { blocks })
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn first_block(&self) -> &Block {
        &self.blocks[0]
    }

    pub fn block_for_key(&self, key: &BlockKey) -> Option<&Block> {
        self.blocks.iter().find(|b| b.key() == key)
    }

    pub fn block_index(&self, key: &BlockKey) -> Option<usize> {
        self.blocks.iter().position(|b| b.key() == key)
    }

    pub fn block_before(&self, key: &BlockKey) -> Option<&Block> {
        let index = self.block_index(key)?;
        index.checked_sub(1).map(|i| &self.blocks[i])
    }

    pub fn block_after(&self, key: &BlockKey) -> Option<&Block> {
        let index = self.block_index(key)?;
        self.blocks.get(index + 1)
    }

    /// Whether any block holds text.
    pub fn has_text(&self) -> bool {
        self.blocks.iter().any(|b| !b.is_empty())
    }

    /// All block texts joined with newlines.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(Block::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// A block key that is not used by any block of this document.
    pub fn fresh_key(&self) -> BlockKey {
        loop {
            let key = BlockKey::generate();
            if self.block_for_key(&key).is_none() {
                return key;
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Revisions
    // ─────────────────────────────────────────────────────────────────────────

    /// Replace the selected text with `text`, which must not contain line
    /// breaks. Inserted chars carry `style`.
    pub fn replace_text(&self, selection: &Selection, text: &str, style: StyleSet) -> Self {
        let mut next = self.clone();
        if let Some(block) = next.block_mut(&selection.block_key) {
            block.remove(selection.start(), selection.end());
            block.insert(selection.start(), text, style);
        } else {
            debug!("replace_text: no block {}", selection.block_key);
        }
        next
    }

    /// Split the block `key` at `offset`. Returns the new content and the
    /// key of the block holding the tail.
    pub fn split_block(&self, key: &BlockKey, offset: usize) -> (Self, BlockKey) {
        let mut next = self.clone();
        let tail_key = next.fresh_key();
        if let Some(index) = next.block_index(key) {
            let tail = next.blocks[index].split_off(offset, tail_key.clone());
            next.blocks.insert(index + 1, tail);
        } else {
            debug!("split_block: no block {}", key);
        }
        (next, tail_key)
    }

    /// Join block `key` onto the end of the block before it. Returns the new
    /// content, the surviving key and the offset of the join point, or
    /// `None` when `key` is the first block.
    pub fn join_with_previous(&self, key: &BlockKey) -> Option<(Self, BlockKey, usize)> {
        let index = self.block_index(key)?;
        if index == 0 {
            return None;
        }
        let mut next = self.clone();
        let removed = next.blocks.remove(index);
        let previous = &mut next.blocks[index - 1];
        let join_offset = previous.len();
        previous.append(removed);
        let previous_key = previous.key().clone();
        Some((next, previous_key, join_offset))
    }

    /// Add or remove `style` on the selected range.
    pub fn apply_style(&self, selection: &Selection, style: InlineStyle, on: bool) -> Self {
        let mut next = self.clone();
        if let Some(block) = next.block_mut(&selection.block_key) {
            block.set_style(selection.start(), selection.end(), style, on);
        }
        next
    }

    fn block_mut(&mut self, key: &BlockKey) -> Option<&mut Block> {
        self.blocks.iter_mut().find(|b| b.key() == key)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::block::StyleRange;

    #[test]
    fn test_new_empty_has_one_block() {
        let content = ContentState::new_empty();
        assert_eq!(content.blocks().len(), 1);
        assert!(content.first_block().is_empty());
        assert!(!content.has_text());
    }

    #[test]
    fn test_from_text_splits_lines() {
        let content = ContentState::from_text("one\ntwo\n");
        assert_eq!(content.blocks().len(), 3);
        assert_eq!(content.plain_text(), "one\ntwo\n");
    }

    #[test]
    fn test_from_blocks_rejects_duplicates_and_empty() {
        assert!(ContentState::from_blocks(vec![]).is_none());
        let dup = vec![
            Block::new(BlockKey::from("x")),
            Block::new(BlockKey::from("x")),
        ];
        assert!(ContentState::from_blocks(dup).is_none());
    }

    #[test]
    fn test_replace_text_leaves_original_untouched() {
        let content = ContentState::from_text("#");
        let key = content.first_block().key().clone();
        let next = content.replace_text(&Selection::range(key, 0, 1), "", StyleSet::empty());
        assert_eq!(content.plain_text(), "#");
        assert_eq!(next.plain_text(), "");
    }

    #[test]
    fn test_split_then_join() {
        let content = ContentState::from_text("Hello");
        let key = content.first_block().key().clone();
        let (split, tail_key) = content.split_block(&key, 2);
        assert_eq!(split.blocks().len(), 2);
        assert_eq!(split.block_for_key(&tail_key).map(Block::text), Some("llo"));
        assert_eq!(split.block_after(&key).map(Block::key), Some(&tail_key));

        let (joined, survivor, offset) = split.join_with_previous(&tail_key).unwrap();
        assert_eq!(survivor, key);
        assert_eq!(offset, 2);
        assert_eq!(joined.plain_text(), "Hello");
        assert!(joined.join_with_previous(&key).is_none());
    }

    #[test]
    fn test_apply_style() {
        let content = ContentState::from_text("abc");
        let key = content.first_block().key().clone();
        let styled = content.apply_style(&Selection::range(key, 0, 2), InlineStyle::Red, true);
        assert_eq!(
            styled.first_block().style_ranges(),
            vec![StyleRange::new(0, 2, InlineStyle::Red)]
        );
    }

    #[test]
    fn test_fresh_key_is_unused() {
        let content = ContentState::from_text("a\nb\nc");
        let key = content.fresh_key();
        assert!(content.block_for_key(&key).is_none());
    }
}
