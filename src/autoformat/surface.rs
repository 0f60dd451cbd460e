//! The editing surface seen by the autoformatter
//!
//! The trigger detector only needs to read the active block, delete a range
//! and toggle a style. Any editor model that offers these operations can be
//! autoformatted; [`EditorState`] is the one this application uses.

use crate::document::{BlockKey, ChangeType, ContentState, EditorState, InlineStyle, Selection};
use crate::string_utils::char_count;

/// A content revision paired with the caret position that follows it.
#[derive(Debug, Clone)]
pub struct Revision<C> {
    pub content: C,
    pub selection_after: Selection,
}

/// Operations an editor model exposes to the autoformatter.
pub trait RichTextSurface {
    /// The content type of a revision.
    type Content;

    /// Text of the block `key`, if it exists.
    fn block_text(&self, key: &BlockKey) -> Option<&str>;

    /// The current selection.
    fn selection(&self) -> Selection;

    /// Compute the revision that replaces `range` with `text`, without
    /// installing it.
    fn replace_range(&self, range: &Selection, text: &str) -> Revision<Self::Content>;

    /// Install `revision` as a discrete step tagged `change_type`.
    fn push_state(&mut self, revision: Revision<Self::Content>, change_type: ChangeType);

    /// Toggle `style` for the current selection.
    fn toggle_style(&mut self, style: InlineStyle);
}

impl RichTextSurface for EditorState {
    type Content = ContentState;

    fn block_text(&self, key: &BlockKey) -> Option<&str> {
        self.content().block_for_key(key).map(|b| b.text())
    }

    fn selection(&self) -> Selection {
        EditorState::selection(self).clone()
    }

    fn replace_range(&self, range: &Selection, text: &str) -> Revision<ContentState> {
        let style = self.current_inline_style();
        let content = self.content().replace_text(range, text, style);
        let caret = range.start() + char_count(text);
        Revision {
            content,
            selection_after: range.merge(caret, caret),
        }
    }

    fn push_state(&mut self, revision: Revision<ContentState>, change_type: ChangeType) {
        self.push(revision.content, revision.selection_after, change_type);
    }

    fn toggle_style(&mut self, style: InlineStyle) {
        self.toggle_inline_style(style);
    }
}

