//! Main application module for Quillnote
//!
//! This module implements the eframe App trait: a header with the title and
//! the Save button, the rich-text editing surface, and the modal save
//! acknowledgment.

use crate::config::{Settings, Theme};
use crate::editor::RichEditor;
use crate::state::AppState;
use eframe::egui;
use log::{debug, info};

/// Title shown in the header.
const HEADER_TITLE: &str = "Quillnote";

/// Hint shown in an empty editor.
const PLACEHOLDER: &str = "Type here...";

/// Border color of the editing area.
const EDITOR_BORDER: egui::Color32 = egui::Color32::from_rgb(220, 38, 38);

/// The main application struct that holds all state and implements eframe::App.
pub struct QuillnoteApp {
    /// Central application state
    state: AppState,
}

impl QuillnoteApp {
    /// Create a new QuillnoteApp instance.
    ///
    /// This restores the saved document and applies the saved theme.
    pub fn new(cc: &eframe::CreationContext<'_>, settings: Settings) -> Self {
        info!("Initializing {}", HEADER_TITLE);
        apply_theme(&cc.egui_ctx, settings.theme);
        Self {
            state: AppState::new(settings),
        }
    }

    fn render_header(&mut self, ctx: &egui::Context) -> bool {
        let mut save_clicked = false;
        egui::TopBottomPanel::top("header")
            .exact_height(48.0)
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    let theme = self.state.settings.theme;
                    if ui
                        .button(theme.toggle().label())
                        .on_hover_text("Switch theme")
                        .clicked()
                    {
                        self.handle_set_theme(theme.toggle(), ctx);
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let save = egui::Button::new(egui::RichText::new("Save").strong())
                            .min_size(egui::vec2(96.0, 28.0));
                        if ui
                            .add_enabled(!self.state.is_blocked(), save)
                            .on_hover_text("Save (Ctrl+S)")
                            .clicked()
                        {
                            save_clicked = true;
                        }

                        ui.centered_and_justified(|ui| {
                            ui.label(egui::RichText::new(HEADER_TITLE).size(20.0));
                        });
                    });
                });
            });
        save_clicked
    }

    fn render_editor(&mut self, ctx: &egui::Context) {
        let interactive = !self.state.is_blocked();
        let focus = interactive && std::mem::take(&mut self.state.ui.focus_editor);
        let base_font_size = self.state.settings.base_font_size;

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::Frame::none()
                .stroke(egui::Stroke::new(1.0, EDITOR_BORDER))
                .inner_margin(egui::Margin::same(16.0))
                .show(ui, |ui| {
                    egui::ScrollArea::vertical()
                        .auto_shrink([false, false])
                        .show(ui, |ui| {
                            let output = RichEditor::new(&mut self.state.editor)
                                .id(egui::Id::new("quillnote_editor"))
                                .base_font_size(base_font_size)
                                .placeholder(PLACEHOLDER)
                                .interactive(interactive)
                                .request_focus(focus)
                                .show(ui);
                            if output.changed {
                                debug!("Editor at revision {}", self.state.editor.revision());
                            }
                        });
                });
        });
    }

    fn render_save_notice(&mut self, ctx: &egui::Context) {
        let Some(notice) = self.state.ui.save_notice.clone() else {
            return;
        };

        let mut acknowledged = ctx.input(|i| {
            i.key_pressed(egui::Key::Enter) || i.key_pressed(egui::Key::Escape)
        });
        egui::Window::new("Quillnote")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                ui.label(notice.message());
                ui.separator();
                ui.vertical_centered(|ui| {
                    if ui.button("OK").clicked() {
                        acknowledged = true;
                    }
                });
            });

        if acknowledged {
            self.state.acknowledge_save();
        }
    }

    fn handle_keyboard_shortcuts(&mut self, ctx: &egui::Context) -> bool {
        if self.state.is_blocked() {
            return false;
        }
        ctx.input_mut(|i| i.consume_key(egui::Modifiers::COMMAND, egui::Key::S))
    }

    fn update_window_state(&mut self, ctx: &egui::Context) {
        let window = ctx.input(|i| {
            let viewport = i.viewport();
            viewport
                .inner_rect
                .map(|rect| (rect.size(), viewport.maximized.unwrap_or(false)))
        });
        if let Some((size, maximized)) = window {
            self.state.update_window_size(size.x, size.y, maximized);
        }
    }

    fn handle_save(&mut self) {
        debug!("Save requested");
        self.state.save_document();
    }

    fn handle_set_theme(&mut self, theme: Theme, ctx: &egui::Context) {
        self.state.settings.theme = theme;
        self.state.mark_settings_dirty();
        apply_theme(ctx, theme);
        info!("Theme changed to {:?}", theme);
    }
}

fn apply_theme(ctx: &egui::Context, theme: Theme) {
    let visuals = match theme {
        Theme::Light => egui::Visuals::light(),
        Theme::Dark => egui::Visuals::dark(),
    };
    ctx.set_visuals(visuals);
}

impl eframe::App for QuillnoteApp {
    /// Called each time the UI needs repainting.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Shortcuts are consumed before the editor sees the events.
        let shortcut_save = self.handle_keyboard_shortcuts(ctx);

        let save_clicked = self.render_header(ctx);
        self.render_editor(ctx);

        if save_clicked || shortcut_save {
            self.handle_save();
        }

        self.render_save_notice(ctx);
        self.update_window_state(ctx);
    }

    /// Called when the application is about to close.
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("Application exiting");
        self.state.shutdown();
    }

    /// Save persistent state.
    fn save(&mut self, _storage: &mut dyn eframe::Storage) {
        debug!("Saving application state");
        self.state.save_settings_if_dirty();
    }
}
