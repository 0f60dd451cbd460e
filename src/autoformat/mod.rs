//! Markdown-like autoformatting
//!
//! Typed input passes through [`handle_before_input`] before it reaches the
//! document. The detector works against the [`RichTextSurface`] trait, so it
//! has no knowledge of how the document is stored or rendered.

mod surface;
mod triggers;

pub use surface::{Revision, RichTextSurface};
pub use triggers::{apply_trigger, handle_before_input, match_trigger, InputHandling, Trigger, TRIGGERS};

use crate::document::EditorState;

/// Feed typed text into `state` one char at a time, letting each char be
/// consumed by a trigger before falling back to a normal insert.
pub fn type_text(state: &mut EditorState, text: &str) {
    let mut buf = [0u8; 4];
    for c in text.chars() {
        let input: &str = c.encode_utf8(&mut buf);
        if handle_before_input(state, input) == InputHandling::NotHandled {
            state.insert_text(input);
        }
    }
}
