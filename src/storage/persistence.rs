//! Saving and restoring the editor document
//!
//! The whole document is written under a single key on every save. There is
//! no incremental persistence: each save overwrites the previous value.

use crate::document::{ContentState, EditorState};
use crate::error::Result;
use crate::storage::raw::RawContent;
use crate::storage::store::KeyValueStore;
use log::{debug, info};

/// Key the document is stored under.
pub const CONTENT_KEY: &str = "editorContent";

/// Write `content` under [`CONTENT_KEY`], overwriting any previous value.
pub fn write_content<S: KeyValueStore + ?Sized>(store: &mut S, content: &ContentState) -> Result<()> {
    let json = RawContent::from_content(content).to_json()?;
    store.set(CONTENT_KEY, &json)?;
    info!(
        "Saved {} block(s) ({} bytes) under '{}'",
        content.blocks().len(),
        json.len(),
        CONTENT_KEY
    );
    Ok(())
}

/// Save the document, then reset the editor to a fresh empty document.
///
/// The editor is only reset once the write succeeded.
pub fn save_content<S: KeyValueStore + ?Sized>(store: &mut S, state: &mut EditorState) -> Result<()> {
    write_content(store, state.content())?;
    *state = EditorState::new_empty();
    debug!("Editor reset to an empty document after save");
    Ok(())
}

/// Restore the editor from the store.
///
/// An absent key yields an empty editor.
///
/// # Errors
///
/// Returns `Error::ContentParse` for malformed JSON and
/// `Error::InvalidContent` for JSON that breaks the document invariants.
pub fn load_content<S: KeyValueStore + ?Sized>(store: &S) -> Result<EditorState> {
    let Some(json) = store.get(CONTENT_KEY)? else {
        debug!("No stored content under '{}', starting empty", CONTENT_KEY);
        return Ok(EditorState::new_empty());
    };

    let content = RawContent::from_json(CONTENT_KEY, &json)?.into_content()?;
    info!("Restored {} block(s) from '{}'", content.blocks().len(), CONTENT_KEY);
    Ok(EditorState::with_content(content))
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
