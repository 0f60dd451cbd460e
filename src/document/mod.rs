//! Styled document model
//!
//! A document is an ordered list of blocks, each a line of text with a set
//! of inline styles per character. The editor state wraps the current
//! content with a single-block selection and the style that the next typed
//! characters will receive.

mod block;
mod content;
mod editor_state;
mod selection;
mod style;

pub use block::{Block, BlockKey, StyleRange};
pub use content::ContentState;
pub use editor_state::{ChangeType, EditorState};
pub use selection::Selection;
pub use style::{InlineStyle, Rgb, StyleAttributes, StyleSet};
