// Hide console window on Windows in release builds
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! Quillnote - Main Entry Point
//!
//! A minimal rich-text note editor. Typing `#`, `*`, `**` or `***` alone on a
//! line followed by a space switches the style of what comes next; Save
//! stores the note and starts a fresh one.

use log::info;
use quillnote::app::QuillnoteApp;
use quillnote::config::load_config;

/// Application name constant.
const APP_NAME: &str = "Quillnote";

fn main() -> eframe::Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("Starting {}", APP_NAME);

    let settings = load_config();
    let window_size = settings.window_size.clone();

    info!(
        "Window configuration: {}x{}, maximized: {}",
        window_size.width, window_size.height, window_size.maximized
    );

    let viewport = eframe::egui::ViewportBuilder::default()
        .with_title(APP_NAME)
        .with_inner_size([window_size.width, window_size.height])
        .with_min_inner_size([400.0, 300.0])
        .with_maximized(window_size.maximized);

    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        APP_NAME,
        native_options,
        Box::new(move |cc| Ok(Box::new(QuillnoteApp::new(cc, settings)))),
    )
}
