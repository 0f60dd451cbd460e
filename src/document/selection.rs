//! Caret and selection within a single block

use crate::document::block::BlockKey;

/// The active block and the caret or selected span inside it.
///
/// Offsets are in chars. `anchor` is where the selection started and
/// `focus` is where the caret currently is; either may be larger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub block_key: BlockKey,
    pub anchor_offset: usize,
    pub focus_offset: usize,
}

impl Selection {
    /// A collapsed caret at `offset`.
    pub fn collapsed(block_key: BlockKey, offset: usize) -> Self {
        Self {
            block_key,
            anchor_offset: offset,
            focus_offset: offset,
        }
    }

    /// A selection spanning `[anchor, focus)` (or the reverse).
    pub fn range(block_key: BlockKey, anchor_offset: usize, focus_offset: usize) -> Self {
        Self {
            block_key,
            anchor_offset,
            focus_offset,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor_offset == self.focus_offset
    }

    pub fn start(&self) -> usize {
        self.anchor_offset.min(self.focus_offset)
    }

    pub fn end(&self) -> usize {
        self.anchor_offset.max(self.focus_offset)
    }

    /// Copy of this selection with new offsets in the same block.
    #[must_use]
    pub fn merge(&self, anchor_offset: usize, focus_offset: usize) -> Self {
        Self {
            block_key: self.block_key.clone(),
            anchor_offset,
            focus_offset,
        }
    }

    /// Clamp both offsets to `len`.
    #[must_use]
    pub fn clamped(mut self, len: usize) -> Self {
        self.anchor_offset = self.anchor_offset.min(len);
        self.focus_offset = self.focus_offset.min(len);
        self
    }
}
