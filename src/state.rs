//! Application state management for Quillnote
//!
//! This module defines the central `AppState` struct that owns the settings,
//! the live editor document, the document store and transient UI state.
//! It has no dependency on the UI toolkit, so the save flow can be tested
//! directly.

use crate::config::{get_storage_path, save_config_silent, Settings};
use crate::document::EditorState;
use crate::error::{Result, ResultExt};
use crate::storage::{load_content, save_content, write_content, FileStore, KeyValueStore, MemoryStore};
use log::{debug, info, warn};

// ─────────────────────────────────────────────────────────────────────────────
// UI State
// ─────────────────────────────────────────────────────────────────────────────

/// Outcome of the last save, shown until acknowledged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveNotice {
    /// The document was written to the store
    Saved,
    /// The write failed; the document was left in the editor
    Failed(String),
}

impl SaveNotice {
    /// Message shown in the acknowledgment window.
    pub fn message(&self) -> String {
        match self {
            SaveNotice::Saved => "Content saved!".to_string(),
            SaveNotice::Failed(err) => format!("Could not save: {}", err),
        }
    }
}

/// Transient UI state that is never persisted.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Pending save acknowledgment; while set, the editor is blocked.
    pub save_notice: Option<SaveNotice>,
    /// Whether the editor should take focus on the next frame
    pub focus_editor: bool,
}

// ─────────────────────────────────────────────────────────────────────────────
// App State
// ─────────────────────────────────────────────────────────────────────────────

/// Central application state.
pub struct AppState {
    /// User settings
    pub settings: Settings,
    /// Whether settings changed since the last write
    settings_dirty: bool,
    /// The live document
    pub editor: EditorState,
    /// Where saved documents go
    store: Box<dyn KeyValueStore>,
    /// Transient UI state
    pub ui: UiState,
}

impl AppState {
    /// Create the application state, opening the configured store and
    /// restoring the saved document from it.
    ///
    /// A store that cannot be opened is replaced by an in-memory one, and
    /// unreadable saved content starts the editor empty; both are logged.
    pub fn new(settings: Settings) -> Self {
        let store: Box<dyn KeyValueStore> = match open_file_store(&settings) {
            Ok(store) => Box::new(store),
            Err(e) => {
                warn!("Failed to open document store: {}. Saves will not persist.", e);
                Box::new(MemoryStore::new())
            }
        };
        Self::with_store(settings, store)
    }

    /// Create the application state over an explicit store.
    pub fn with_store(settings: Settings, store: Box<dyn KeyValueStore>) -> Self {
        let editor = load_content(store.as_ref())
            .unwrap_or_warn_default(EditorState::new_empty(), "Failed to restore saved content");
        Self {
            settings,
            settings_dirty: false,
            editor,
            store,
            ui: UiState {
                save_notice: None,
                focus_editor: true,
            },
        }
    }

    /// The document store.
    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    /// Whether a save acknowledgment is waiting to be dismissed.
    pub fn is_blocked(&self) -> bool {
        self.ui.save_notice.is_some()
    }

    /// Save the document and raise the acknowledgment.
    ///
    /// On success the editor is reset to an empty document unless
    /// `clear_after_save` is off. Failures leave the document in place.
    pub fn save_document(&mut self) {
        let result = if self.settings.clear_after_save {
            save_content(self.store.as_mut(), &mut self.editor)
        } else {
            write_content(self.store.as_mut(), self.editor.content())
        };

        let notice = match result {
            Ok(()) => {
                info!("Document saved");
                SaveNotice::Saved
            }
            Err(e) => {
                warn!("Failed to save document: {}", e);
                SaveNotice::Failed(e.to_string())
            }
        };

        if self.settings.confirm_save || matches!(notice, SaveNotice::Failed(_)) {
            self.ui.save_notice = Some(notice);
        } else {
            self.ui.focus_editor = true;
        }
    }

    /// Dismiss the save acknowledgment and hand focus back to the editor.
    pub fn acknowledge_save(&mut self) {
        self.ui.save_notice = None;
        self.ui.focus_editor = true;
    }

    /// Record that settings changed and need to be written.
    pub fn mark_settings_dirty(&mut self) {
        self.settings_dirty = true;
    }

    /// Record the current window geometry so the next launch restores it.
    ///
    /// A maximized window keeps its restored size. Returns `true` and marks
    /// the settings dirty when anything changed by more than a pixel.
    pub fn update_window_size(&mut self, width: f32, height: f32, maximized: bool) -> bool {
        let window = &mut self.settings.window_size;
        let resized = !maximized
            && ((window.width - width).abs() > 1.0 || (window.height - height).abs() > 1.0);
        if !resized && window.maximized == maximized {
            return false;
        }

        if resized {
            window.width = width;
            window.height = height;
        }
        window.maximized = maximized;
        debug!(
            "Window state updated: {}x{}, maximized: {}",
            window.width, window.height, window.maximized
        );
        self.settings_dirty = true;
        true
    }

    /// Write settings if they changed since the last write.
    pub fn save_settings_if_dirty(&mut self) {
        if self.settings_dirty && save_config_silent(&self.settings) {
            self.settings_dirty = false;
        }
    }

    /// Flush anything pending before exit.
    pub fn shutdown(&mut self) {
        info!("Shutting down");
        self.save_settings_if_dirty();
    }
}

fn open_file_store(settings: &Settings) -> Result<FileStore> {
    FileStore::open(get_storage_path(settings)?)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autoformat::type_text;
    use crate::document::InlineStyle;
    use crate::storage::CONTENT_KEY;
    use tempfile::TempDir;

    fn memory_state(settings: Settings) -> AppState {
        AppState::with_store(settings, Box::new(MemoryStore::new()))
    }

    #[test]
    fn test_starts_empty_without_saved_content() {
        let state = memory_state(Settings::default());
        assert!(!state.editor.content().has_text());
        assert!(!state.is_blocked());
        assert!(state.ui.focus_editor);
    }

    #[test]
    fn test_save_resets_editor_and_raises_notice() {
        let mut state = memory_state(Settings::default());
        type_text(&mut state.editor, "# Hello");
        state.save_document();

        assert_eq!(state.ui.save_notice, Some(SaveNotice::Saved));
        assert!(state.is_blocked());
        assert!(!state.editor.content().has_text());
        assert!(state.store().get(CONTENT_KEY).unwrap().is_some());

        state.acknowledge_save();
        assert!(!state.is_blocked());
        assert!(state.ui.focus_editor);
    }

    #[test]
    fn test_save_can_keep_document() {
        let settings = Settings {
            clear_after_save: false,
            confirm_save: false,
            ..Settings::default()
        };
        let mut state = memory_state(settings);
        type_text(&mut state.editor, "** keep me");
        state.save_document();

        assert!(!state.is_blocked());
        assert_eq!(state.editor.content().plain_text(), "keep me");
        assert!(state
            .editor
            .current_inline_style()
            .contains(InlineStyle::Red));
    }

    #[test]
    fn test_corrupt_saved_content_starts_empty() {
        let mut store = MemoryStore::new();
        store.set(CONTENT_KEY, "not json").unwrap();
        let state = AppState::with_store(Settings::default(), Box::new(store));
        assert!(!state.editor.content().has_text());
    }

    #[test]
    fn test_restores_from_file_store() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let settings = Settings {
            storage_path: Some(dir.path().join("storage.json")),
            ..Settings::default()
        };

        let mut first = AppState::new(settings.clone());
        type_text(&mut first.editor, "*** saved");
        first.settings.clear_after_save = false;
        first.save_document();
        drop(first);

        let second = AppState::new(settings);
        assert_eq!(second.editor.content().plain_text(), "saved");
    }

    #[test]
    fn test_window_size_is_tracked() {
        let mut state = memory_state(Settings::default());
        assert!(!state.update_window_size(960.5, 640.0, false));
        assert!(!state.settings_dirty);

        assert!(state.update_window_size(1200.0, 800.0, false));
        assert_eq!(state.settings.window_size.width, 1200.0);
        assert_eq!(state.settings.window_size.height, 800.0);
        assert!(state.settings_dirty);

        assert!(state.update_window_size(1920.0, 1080.0, true));
        assert!(state.settings.window_size.maximized);
        assert_eq!(state.settings.window_size.width, 1200.0);
        assert!(!state.update_window_size(1920.0, 1080.0, true));
    }

    #[test]
    fn test_notice_messages() {
        assert_eq!(SaveNotice::Saved.message(), "Content saved!");
        assert!(SaveNotice::Failed("disk full".into())
            .message()
            .contains("disk full"));
    }
}
