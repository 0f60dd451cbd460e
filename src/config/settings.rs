//! User settings and preferences for Quillnote
//!
//! This module defines the `Settings` struct that holds all user-configurable
//! options, with serde support for JSON persistence.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Theme Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Available color themes for the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Get a display label for the theme.
    pub fn label(&self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
        }
    }

    /// Switch between light and dark.
    pub fn toggle(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Window Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Window size and position settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowSize {
    /// Window width in pixels
    pub width: f32,
    /// Window height in pixels
    pub height: f32,
    /// Whether the window was maximized
    #[serde(default)]
    pub maximized: bool,
}

impl Default for WindowSize {
    fn default() -> Self {
        Self {
            width: 960.0,
            height: 640.0,
            maximized: false,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Main Settings Struct
// ─────────────────────────────────────────────────────────────────────────────

/// Application settings persisted to `config.json`.
///
/// Missing fields fall back to their defaults, so older or hand-edited files
/// keep loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Color theme
    pub theme: Theme,
    /// Font size of unstyled text, in points
    pub base_font_size: f32,
    /// Reset the editor to an empty document after a successful save
    pub clear_after_save: bool,
    /// Show the "Content saved!" acknowledgment after saving
    pub confirm_save: bool,
    /// Override for the document store file; `None` uses the config directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_path: Option<PathBuf>,
    /// Last window size
    pub window_size: WindowSize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            base_font_size: 14.0,
            clear_after_save: true,
            confirm_save: true,
            storage_path: None,
            window_size: WindowSize::default(),
        }
    }
}

impl Settings {
    /// Minimum allowed font size.
    pub const MIN_FONT_SIZE: f32 = 8.0;
    /// Maximum allowed font size.
    pub const MAX_FONT_SIZE: f32 = 32.0;
    /// Minimum window dimension.
    pub const MIN_WINDOW_SIZE: f32 = 200.0;
    /// Maximum window dimension.
    pub const MAX_WINDOW_SIZE: f32 = 10000.0;

    /// Sanitize settings by clamping values to valid ranges.
    ///
    /// This is useful after loading settings from a file that might have
    /// been manually edited with invalid values.
    pub fn sanitize(&mut self) {
        self.base_font_size = self
            .base_font_size
            .clamp(Self::MIN_FONT_SIZE, Self::MAX_FONT_SIZE);

        self.window_size.width = self
            .window_size
            .width
            .clamp(Self::MIN_WINDOW_SIZE, Self::MAX_WINDOW_SIZE);
        self.window_size.height = self
            .window_size
            .height
            .clamp(Self::MIN_WINDOW_SIZE, Self::MAX_WINDOW_SIZE);

        if self
            .storage_path
            .as_ref()
            .is_some_and(|p| p.as_os_str().is_empty())
        {
            self.storage_path = None;
        }
    }

    /// Parse settings from JSON and sanitize them.
    pub fn from_json_sanitized(json: &str) -> Result<Self, serde_json::Error> {
        let mut settings: Self = serde_json::from_str(json)?;
        settings.sanitize();
        Ok(settings)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();

        assert_eq!(settings.theme, Theme::Light);
        assert_eq!(settings.base_font_size, 14.0);
        assert!(settings.clear_after_save);
        assert!(settings.confirm_save);
        assert!(settings.storage_path.is_none());
        assert_eq!(settings.window_size.width, 960.0);
    }

    #[test]
    fn test_theme_serialization() {
        assert_eq!(serde_json::to_string(&Theme::Dark).unwrap(), "\"dark\"");
        let theme: Theme = serde_json::from_str("\"light\"").unwrap();
        assert_eq!(theme, Theme::Light);
        assert_eq!(Theme::Light.toggle(), Theme::Dark);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"clear_after_save": false}"#).unwrap();
        assert!(!settings.clear_after_save);
        assert_eq!(settings.base_font_size, 14.0);
        assert!(settings.confirm_save);
    }

    #[test]
    fn test_sanitize_font_size() {
        let mut settings = Settings {
            base_font_size: 2.0,
            ..Settings::default()
        };
        settings.sanitize();
        assert_eq!(settings.base_font_size, Settings::MIN_FONT_SIZE);

        settings.base_font_size = 100.0;
        settings.sanitize();
        assert_eq!(settings.base_font_size, Settings::MAX_FONT_SIZE);
    }

    #[test]
    fn test_sanitize_window_and_storage_path() {
        let mut settings = Settings {
            storage_path: Some(PathBuf::new()),
            window_size: WindowSize {
                width: 10.0,
                height: 50000.0,
                maximized: false,
            },
            ..Settings::default()
        };
        settings.sanitize();
        assert_eq!(settings.window_size.width, Settings::MIN_WINDOW_SIZE);
        assert_eq!(settings.window_size.height, Settings::MAX_WINDOW_SIZE);
        assert!(settings.storage_path.is_none());
    }

    #[test]
    fn test_round_trip() {
        let original = Settings {
            theme: Theme::Dark,
            base_font_size: 18.0,
            clear_after_save: false,
            confirm_save: false,
            storage_path: Some(PathBuf::from("/tmp/notes.json")),
            window_size: WindowSize::default(),
        };
        let json = serde_json::to_string_pretty(&original).unwrap();
        let loaded = Settings::from_json_sanitized(&json).unwrap();
        assert_eq!(original, loaded);
    }
}
