//! Editor module for Quillnote
//!
//! This module contains the rich-text editing surface that renders the
//! document model and forwards keyboard input to it.

mod widget;

pub use widget::{EditorOutput, RichEditor};
