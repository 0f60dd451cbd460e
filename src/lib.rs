//! Quillnote
//!
//! A minimal rich-text note editor built around a small document model and a
//! line-prefix autoformatter. The model, the autoformatter and persistence
//! have no UI dependency; the `app` and `editor` modules put an egui surface
//! on top.

pub mod app;
pub mod autoformat;
pub mod config;
pub mod document;
pub mod editor;
pub mod error;
pub mod state;
pub mod storage;
pub mod string_utils;
