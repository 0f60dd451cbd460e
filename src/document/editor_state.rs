//! Editor state: content, selection and the pending inline style
//!
//! Every edit goes through [`EditorState::push`], which installs a new
//! content revision together with the caret position that follows it. There
//! is no undo stack; each push only records the kind of change and bumps the
//! revision counter so views can tell that the document moved on.

use crate::document::block::Block;
use crate::document::content::ContentState;
use crate::document::selection::Selection;
use crate::document::style::{InlineStyle, StyleSet};
use crate::string_utils::char_count;
use log::debug;

// ─────────────────────────────────────────────────────────────────────────────
// Change Type
// ─────────────────────────────────────────────────────────────────────────────

/// The kind of edit that produced a content revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeType {
    /// Typed or pasted text
    InsertCharacters,
    /// A range deleted programmatically (trigger removal, cut)
    RemoveRange,
    /// Backspace over a single character or block boundary
    BackspaceCharacter,
    /// Forward delete over a single character or block boundary
    DeleteCharacter,
    /// Enter pressed
    SplitBlock,
    /// A style added to or removed from a range
    ChangeInlineStyle,
}

// ─────────────────────────────────────────────────────────────────────────────
// Editor State
// ─────────────────────────────────────────────────────────────────────────────

/// The live state of one editing surface.
#[derive(Debug, Clone)]
pub struct EditorState {
    content: ContentState,
    selection: Selection,
    /// Styles the next inserted characters receive, when set explicitly.
    inline_style_override: Option<StyleSet>,
    last_change_type: Option<ChangeType>,
    revision: u64,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new_empty()
    }
}

impl EditorState {
    /// An editor holding one empty block with the caret at offset 0.
    pub fn new_empty() -> Self {
        Self::with_content(ContentState::new_empty())
    }

    /// An editor over `content` with the caret at the start of the first
    /// block.
    pub fn with_content(content: ContentState) -> Self {
        let selection = Selection::collapsed(content.first_block().key().clone(), 0);
        Self {
            content,
            selection,
            inline_style_override: None,
            last_change_type: None,
            revision: 0,
        }
    }

    pub fn content(&self) -> &ContentState {
        &self.content
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn inline_style_override(&self) -> Option<StyleSet> {
        self.inline_style_override
    }

    pub fn last_change_type(&self) -> Option<ChangeType> {
        self.last_change_type
    }

    /// Incremented on every pushed revision.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// The block holding the selection.
    pub fn active_block(&self) -> &Block {
        self.content
            .block_for_key(&self.selection.block_key)
            .unwrap_or_else(|| self.content.first_block())
    }

    /// Move the selection. Unknown block keys are ignored; offsets are
    /// clamped to the block length. Moving the selection drops any pending
    /// style override.
    pub fn set_selection(&mut self, selection: Selection) {
        let Some(block) = self.content.block_for_key(&selection.block_key) else {
            debug!("Ignoring selection in unknown block {}", selection.block_key);
            return;
        };
        let selection = selection.clamped(block.len());
        if selection != self.selection {
            self.inline_style_override = None;
        }
        self.selection = selection;
    }

    /// Install a new content revision and the selection that follows it.
    ///
    /// Each push is a discrete step tagged with `change_type`. The pending
    /// style override is cleared.
    pub fn push(&mut self, content: ContentState, selection_after: Selection, change_type: ChangeType) {
        let len = content
            .block_for_key(&selection_after.block_key)
            .map(Block::len);
        self.selection = match len {
            Some(len) => selection_after.clamped(len),
            None => Selection::collapsed(content.first_block().key().clone(), 0),
        };
        self.content = content;
        self.inline_style_override = None;
        self.last_change_type = Some(change_type);
        self.revision += 1;
        debug!("Pushed revision {} ({:?})", self.revision, change_type);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Inline Style
    // ─────────────────────────────────────────────────────────────────────────

    /// The styles the next inserted character will carry.
    ///
    /// The explicit override wins. Otherwise a collapsed caret takes the
    /// style of the char before it, or of the first char at offset 0; an
    /// empty block looks upward to the last char of the nearest non-empty
    /// block above. A range selection takes the style of its first char.
    pub fn current_inline_style(&self) -> StyleSet {
        if let Some(styles) = self.inline_style_override {
            return styles;
        }

        let block = self.active_block();
        let sel = &self.selection;
        if !sel.is_collapsed() {
            return block.style_at(sel.start()).unwrap_or_default();
        }
        if sel.start() > 0 {
            return block.style_at(sel.start() - 1).unwrap_or_default();
        }
        if !block.is_empty() {
            return block.style_at(0).unwrap_or_default();
        }
        self.look_upward_for_style()
    }

    fn look_upward_for_style(&self) -> StyleSet {
        let Some(index) = self.content.block_index(&self.selection.block_key) else {
            return StyleSet::empty();
        };
        self.content.blocks()[..index]
            .iter()
            .rev()
            .find(|b| !b.is_empty())
            .and_then(|b| b.style_at(b.len() - 1))
            .unwrap_or_default()
    }

    /// Toggle `style` for the current selection.
    ///
    /// A collapsed caret flips the style in the pending override, so the
    /// next typed chars carry (or lose) it. A range selection removes the
    /// style when every selected char already has it and applies it
    /// otherwise.
    pub fn toggle_inline_style(&mut self, style: InlineStyle) {
        if self.selection.is_collapsed() {
            let next = self.current_inline_style().toggled(style);
            debug!("Inline style override now {:?}", next.iter().collect::<Vec<_>>());
            self.inline_style_override = Some(next);
            return;
        }

        let block = self.active_block();
        let all_have = block
            .styles_in(self.selection.start(), self.selection.end())
            .iter()
            .all(|s| s.contains(style));
        let content = self.content.apply_style(&self.selection, style, !all_have);
        let selection = self.selection.clone();
        self.push(content, selection, ChangeType::ChangeInlineStyle);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Text Editing
    // ─────────────────────────────────────────────────────────────────────────

    /// Replace the selection with `text`. Line breaks split blocks.
    pub fn insert_text(&mut self, text: &str) {
        if text.is_empty() && self.selection.is_collapsed() {
            return;
        }
        let style = self.current_inline_style();
        let mut content = self.content.clone();
        let mut selection = self.selection.clone();

        for (i, line) in text.split('\n').enumerate() {
            if i > 0 {
                let (next, tail_key) = content.split_block(&selection.block_key, selection.start());
                content = next;
                selection = Selection::collapsed(tail_key, 0);
            }
            content = content.replace_text(&selection, line, style);
            let caret = selection.start() + char_count(line);
            selection = Selection::collapsed(selection.block_key.clone(), caret);
        }

        self.push(content, selection, ChangeType::InsertCharacters);
    }

    /// Split the active block at the caret, deleting any selected text first.
    pub fn split_block(&mut self) {
        let cleared = self
            .content
            .replace_text(&self.selection, "", StyleSet::empty());
        let (content, tail_key) = cleared.split_block(&self.selection.block_key, self.selection.start());
        self.push(content, Selection::collapsed(tail_key, 0), ChangeType::SplitBlock);
    }

    /// Backspace: delete the selection, the char before the caret, or join
    /// with the previous block at offset 0.
    pub fn delete_backward(&mut self) {
        if !self.selection.is_collapsed() {
            self.remove_selection();
            return;
        }
        let offset = self.selection.start();
        if offset > 0 {
            let range = self.selection.merge(offset - 1, offset);
            let content = self.content.replace_text(&range, "", StyleSet::empty());
            let caret = self.selection.merge(offset - 1, offset - 1);
            self.push(content, caret, ChangeType::BackspaceCharacter);
        } else if let Some((content, key, join)) =
            self.content.join_with_previous(&self.selection.block_key)
        {
            self.push(content, Selection::collapsed(key, join), ChangeType::BackspaceCharacter);
        }
    }

    /// Forward delete: delete the selection, the char after the caret, or
    /// pull the next block up at the end of a block.
    pub fn delete_forward(&mut self) {
        if !self.selection.is_collapsed() {
            self.remove_selection();
            return;
        }
        let offset = self.selection.start();
        let len = self.active_block().len();
        if offset < len {
            let range = self.selection.merge(offset, offset + 1);
            let content = self.content.replace_text(&range, "", StyleSet::empty());
            let caret = self.selection.clone();
            self.push(content, caret, ChangeType::DeleteCharacter);
        } else if let Some(next_key) = self
            .content
            .block_after(&self.selection.block_key)
            .map(|b| b.key().clone())
        {
            if let Some((content, key, join)) = self.content.join_with_previous(&next_key) {
                self.push(content, Selection::collapsed(key, join), ChangeType::DeleteCharacter);
            }
        }
    }

    fn remove_selection(&mut self) {
        let content = self.content.replace_text(&self.selection, "", StyleSet::empty());
        let start = self.selection.start();
        let caret = self.selection.merge(start, start);
        self.push(content, caret, ChangeType::RemoveRange);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Caret Motion
    // ─────────────────────────────────────────────────────────────────────────

    /// Move the caret one char left, crossing into the previous block.
    pub fn move_left(&mut self, extend: bool) {
        let sel = self.selection.clone();
        if !extend && !sel.is_collapsed() {
            self.set_selection(sel.merge(sel.start(), sel.start()));
        } else if sel.focus_offset > 0 {
            let focus = sel.focus_offset - 1;
            let anchor = if extend { sel.anchor_offset } else { focus };
            self.set_selection(sel.merge(anchor, focus));
        } else if let Some(prev) = self.content.block_before(&sel.block_key) {
            self.set_selection(Selection::collapsed(prev.key().clone(), prev.len()));
        }
    }

    /// Move the caret one char right, crossing into the next block.
    pub fn move_right(&mut self, extend: bool) {
        let sel = self.selection.clone();
        let len = self.active_block().len();
        if !extend && !sel.is_collapsed() {
            self.set_selection(sel.merge(sel.end(), sel.end()));
        } else if sel.focus_offset < len {
            let focus = sel.focus_offset + 1;
            let anchor = if extend { sel.anchor_offset } else { focus };
            self.set_selection(sel.merge(anchor, focus));
        } else if let Some(next) = self.content.block_after(&sel.block_key) {
            self.set_selection(Selection::collapsed(next.key().clone(), 0));
        }
    }

    /// Move to the block above, keeping the column where possible.
    pub fn move_up(&mut self) {
        let column = self.selection.focus_offset;
        if let Some(prev) = self.content.block_before(&self.selection.block_key) {
            let target = Selection::collapsed(prev.key().clone(), column.min(prev.len()));
            self.set_selection(target);
        } else {
            let sel = self.selection.merge(0, 0);
            self.set_selection(sel);
        }
    }

    /// Move to the block below, keeping the column where possible.
    pub fn move_down(&mut self) {
        let column = self.selection.focus_offset;
        if let Some(next) = self.content.block_after(&self.selection.block_key) {
            let target = Selection::collapsed(next.key().clone(), column.min(next.len()));
            self.set_selection(target);
        } else {
            let len = self.active_block().len();
            let sel = self.selection.merge(len, len);
            self.set_selection(sel);
        }
    }

    pub fn move_home(&mut self, extend: bool) {
        let anchor = if extend { self.selection.anchor_offset } else { 0 };
        let sel = self.selection.merge(anchor, 0);
        self.set_selection(sel);
    }

    pub fn move_end(&mut self, extend: bool) {
        let len = self.active_block().len();
        let anchor = if extend { self.selection.anchor_offset } else { len };
        let sel = self.selection.merge(anchor, len);
        self.set_selection(sel);
    }

    /// Select the whole active block.
    pub fn select_block(&mut self) {
        let len = self.active_block().len();
        let sel = self.selection.merge(0, len);
        self.set_selection(sel);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::block::StyleRange;

    fn typed(text: &str) -> EditorState {
        let mut state = EditorState::new_empty();
        state.insert_text(text);
        state
    }

    #[test]
    fn test_new_empty_state() {
        let state = EditorState::new_empty();
        assert_eq!(state.content().blocks().len(), 1);
        assert!(state.selection().is_collapsed());
        assert_eq!(state.selection().start(), 0);
        assert!(state.current_inline_style().is_empty());
        assert_eq!(state.revision(), 0);
    }

    #[test]
    fn test_insert_text_moves_caret() {
        let state = typed("Hello");
        assert_eq!(state.content().plain_text(), "Hello");
        assert_eq!(state.selection().start(), 5);
        assert_eq!(state.last_change_type(), Some(ChangeType::InsertCharacters));
    }

    #[test]
    fn test_insert_multiline_text() {
        let state = typed("ab\ncd");
        assert_eq!(state.content().blocks().len(), 2);
        assert_eq!(state.active_block().text(), "cd");
        assert_eq!(state.selection().start(), 2);
    }

    #[test]
    fn test_toggle_twice_restores_style() {
        let mut state = typed("abc");
        let before = state.current_inline_style();
        state.toggle_inline_style(InlineStyle::Red);
        assert!(state.current_inline_style().contains(InlineStyle::Red));
        state.toggle_inline_style(InlineStyle::Red);
        assert_eq!(state.current_inline_style(), before);
    }

    #[test]
    fn test_override_styles_typed_text() {
        let mut state = EditorState::new_empty();
        state.toggle_inline_style(InlineStyle::Heading);
        state.insert_text("Hi");
        state.insert_text("!");
        assert_eq!(
            state.content().first_block().style_ranges(),
            vec![StyleRange::new(0, 3, InlineStyle::Heading)]
        );
    }

    #[test]
    fn test_toggle_range_applies_then_removes() {
        let mut state = typed("abcd");
        state.set_selection(state.selection().merge(1, 3));
        state.toggle_inline_style(InlineStyle::Underline);
        assert_eq!(
            state.content().first_block().style_ranges(),
            vec![StyleRange::new(1, 2, InlineStyle::Underline)]
        );
        assert_eq!(state.last_change_type(), Some(ChangeType::ChangeInlineStyle));

        state.toggle_inline_style(InlineStyle::Underline);
        assert!(state.content().first_block().style_ranges().is_empty());
    }

    #[test]
    fn test_selection_change_drops_override() {
        let mut state = typed("abc");
        state.toggle_inline_style(InlineStyle::Bold);
        state.move_left(false);
        assert!(state.inline_style_override().is_none());
        assert!(!state.current_inline_style().contains(InlineStyle::Bold));
    }

    #[test]
    fn test_empty_block_inherits_style_from_above() {
        let mut state = EditorState::new_empty();
        state.toggle_inline_style(InlineStyle::Red);
        state.insert_text("red");
        state.split_block();
        assert!(state.active_block().is_empty());
        assert!(state.current_inline_style().contains(InlineStyle::Red));
    }

    #[test]
    fn test_split_and_backspace_join() {
        let mut state = typed("Hello");
        state.set_selection(state.selection().merge(2, 2));
        state.split_block();
        assert_eq!(state.content().plain_text(), "He\nllo");
        assert_eq!(state.selection().start(), 0);

        state.delete_backward();
        assert_eq!(state.content().plain_text(), "Hello");
        assert_eq!(state.selection().start(), 2);
    }

    #[test]
    fn test_backspace_at_document_start_is_noop() {
        let mut state = EditorState::new_empty();
        state.delete_backward();
        assert_eq!(state.revision(), 0);
    }

    #[test]
    fn test_delete_forward_joins_next_block() {
        let mut state = typed("ab\ncd");
        state.move_up();
        state.move_end(false);
        state.delete_forward();
        assert_eq!(state.content().plain_text(), "abcd");
        assert_eq!(state.selection().start(), 2);
    }

    #[test]
    fn test_delete_selection() {
        let mut state = typed("abcdef");
        state.set_selection(state.selection().merge(4, 1));
        state.delete_backward();
        assert_eq!(state.content().plain_text(), "aef");
        assert_eq!(state.selection().start(), 1);
        assert_eq!(state.last_change_type(), Some(ChangeType::RemoveRange));
    }

    #[test]
    fn test_motion_across_blocks() {
        let mut state = typed("ab\ncd");
        state.move_home(false);
        state.move_left(false);
        assert_eq!(state.active_block().text(), "ab");
        assert_eq!(state.selection().start(), 2);
        state.move_right(false);
        assert_eq!(state.active_block().text(), "cd");
        assert_eq!(state.selection().start(), 0);
    }

    #[test]
    fn test_extend_selection() {
        let mut state = typed("abc");
        state.move_left(true);
        state.move_left(true);
        assert_eq!((state.selection().start(), state.selection().end()), (1, 3));
        state.move_right(false);
        assert!(state.selection().is_collapsed());
        assert_eq!(state.selection().start(), 3);
    }

    #[test]
    fn test_set_selection_unknown_block_ignored() {
        let mut state = typed("abc");
        let before = state.selection().clone();
        state.set_selection(Selection::collapsed("missing".into(), 0));
        assert_eq!(state.selection(), &before);
    }
}
