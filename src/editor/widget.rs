//! Rich-text editor widget for Quillnote
//!
//! Renders the blocks of an [`EditorState`] with each style's attribute
//! bundle and turns keyboard events into editing operations. Typed text is
//! routed through the autoformatter, so trigger patterns are handled before
//! a character reaches the document.

use crate::autoformat::type_text;
use crate::document::{Block, EditorState, Rgb, Selection, StyleAttributes, StyleSet};
use crate::string_utils::slice_chars;
use eframe::egui::{
    self, text::CCursor, text::LayoutJob, Color32, EventFilter, FontId, Galley, Key, Pos2, Rect,
    Sense, Stroke, TextFormat, Ui, Vec2,
};
use log::debug;
use std::sync::Arc;

/// Vertical gap between blocks, in points.
const BLOCK_SPACING: f32 = 4.0;

/// Result of showing the editor widget.
pub struct EditorOutput {
    /// Whether the document or selection changed this frame.
    pub changed: bool,
    /// Response of the editing area.
    pub response: egui::Response,
}

/// A styled-text editing surface bound to an [`EditorState`].
///
/// # Example
///
/// ```ignore
/// RichEditor::new(&mut state)
///     .base_font_size(settings.base_font_size)
///     .placeholder("Type here...")
///     .show(ui);
/// ```
pub struct RichEditor<'a> {
    state: &'a mut EditorState,
    base_font_size: f32,
    placeholder: &'a str,
    id: Option<egui::Id>,
    request_focus: bool,
    interactive: bool,
}

impl<'a> RichEditor<'a> {
    /// Create a new editor widget for the given state.
    pub fn new(state: &'a mut EditorState) -> Self {
        Self {
            state,
            base_font_size: 14.0,
            placeholder: "",
            id: None,
            request_focus: false,
            interactive: true,
        }
    }

    /// Font size of unstyled text.
    #[must_use]
    pub fn base_font_size(mut self, size: f32) -> Self {
        self.base_font_size = size;
        self
    }

    /// Hint shown while the document is empty.
    #[must_use]
    pub fn placeholder(mut self, text: &'a str) -> Self {
        self.placeholder = text;
        self
    }

    /// Set a custom ID for the editor.
    #[must_use]
    pub fn id(mut self, id: egui::Id) -> Self {
        self.id = Some(id);
        self
    }

    /// Take keyboard focus this frame.
    #[must_use]
    pub fn request_focus(mut self, focus: bool) -> Self {
        self.request_focus = focus;
        self
    }

    /// Whether the widget accepts input. A non-interactive editor still
    /// renders but ignores keyboard and pointer events.
    #[must_use]
    pub fn interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    /// Show the editor widget and return the output.
    pub fn show(self, ui: &mut Ui) -> EditorOutput {
        let id = self.id.unwrap_or_else(|| ui.id().with("rich_editor"));
        let revision = self.state.revision();
        let selection_before = self.state.selection().clone();
        let style_before = self.state.current_inline_style();

        // Input first, so the layout below reflects this frame's edits.
        if self.interactive && ui.memory(|m| m.has_focus(id)) {
            ui.memory_mut(|m| {
                m.set_focus_lock_filter(
                    id,
                    EventFilter {
                        tab: false,
                        horizontal_arrows: true,
                        vertical_arrows: true,
                        escape: false,
                    },
                )
            });
            let events = ui.input(|i| i.events.clone());
            for event in &events {
                handle_event(ui.ctx(), self.state, event);
            }
        }

        let text_color = ui.visuals().text_color();
        let strong_color = ui.visuals().strong_text_color();
        let width = ui.available_width();

        let state: &EditorState = &*self.state;
        let galleys: Vec<Arc<Galley>> = state
            .content()
            .blocks()
            .iter()
            .map(|block| {
                let trailing = trailing_style(state, block);
                let job = block_layout_job(
                    block,
                    trailing,
                    self.base_font_size,
                    text_color,
                    strong_color,
                    width,
                );
                ui.fonts(|f| f.layout_job(job))
            })
            .collect();

        let content_height: f32 = galleys.iter().map(|g| g.size().y + BLOCK_SPACING).sum();
        let desired = Vec2::new(width, content_height.max(ui.available_height()));
        let (rect, _) = ui.allocate_exact_size(desired, Sense::hover());
        let sense = if self.interactive {
            Sense::click()
        } else {
            Sense::hover()
        };
        let response = ui.interact(rect, id, sense);

        if self.request_focus || response.clicked() {
            response.request_focus();
        }

        // Block origins in screen space.
        let mut origins = Vec::with_capacity(galleys.len());
        let mut y = rect.top();
        for galley in &galleys {
            origins.push(Pos2::new(rect.left(), y));
            y += galley.size().y + BLOCK_SPACING;
        }

        if response.clicked() {
            if let Some(pointer) = response.interact_pointer_pos() {
                place_caret(self.state, &galleys, &origins, pointer);
            }
        }

        let painter = ui.painter_at(rect);
        let has_focus = response.has_focus();

        for ((block, galley), origin) in self
            .state
            .content()
            .blocks()
            .iter()
            .zip(&galleys)
            .zip(&origins)
        {
            let selection = self.state.selection();
            let active = block.key() == &selection.block_key;

            if active && !selection.is_collapsed() {
                paint_selection(&painter, ui, galley, *origin, selection);
            }
            painter.galley(*origin, galley.clone(), text_color);

            if active && has_focus {
                let cursor = galley.from_ccursor(CCursor::new(selection.focus_offset));
                let caret = galley.pos_from_cursor(&cursor).translate(origin.to_vec2());
                painter.line_segment(
                    [caret.center_top(), caret.center_bottom()],
                    Stroke::new(1.5, text_color),
                );
            }
        }

        if !self.state.content().has_text() && self.state.content().blocks().len() == 1 {
            let hint_pos = origins.first().copied().unwrap_or(rect.left_top());
            painter.text(
                hint_pos + Vec2::new(4.0, 0.0),
                egui::Align2::LEFT_TOP,
                self.placeholder,
                FontId::proportional(self.base_font_size),
                ui.visuals().weak_text_color(),
            );
        }

        let changed = self.state.revision() != revision
            || self.state.selection() != &selection_before
            || self.state.current_inline_style() != style_before;
        if changed {
            ui.ctx().request_repaint();
        }

        EditorOutput { changed, response }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Input Handling
// ─────────────────────────────────────────────────────────────────────────────

/// Apply one input event to the editor state.
fn handle_event(ctx: &egui::Context, state: &mut EditorState, event: &egui::Event) {
    match event {
        egui::Event::Text(text) => type_text(state, text),
        egui::Event::Paste(text) => state.insert_text(&text.replace("\r\n", "\n")),
        egui::Event::Copy => {
            if let Some(text) = selected_text(state) {
                ctx.copy_text(text);
            }
        }
        egui::Event::Cut => {
            if let Some(text) = selected_text(state) {
                ctx.copy_text(text);
                state.delete_backward();
            }
        }
        egui::Event::Key {
            key,
            pressed: true,
            modifiers,
            ..
        } => {
            let extend = modifiers.shift;
            match key {
                Key::Backspace => state.delete_backward(),
                Key::Delete => state.delete_forward(),
                Key::Enter => state.split_block(),
                Key::ArrowLeft => state.move_left(extend),
                Key::ArrowRight => state.move_right(extend),
                Key::ArrowUp => state.move_up(),
                Key::ArrowDown => state.move_down(),
                Key::Home => state.move_home(extend),
                Key::End => state.move_end(extend),
                Key::A if modifiers.command => state.select_block(),
                _ => {}
            }
        }
        _ => {}
    }
}

fn selected_text(state: &EditorState) -> Option<String> {
    let sel = state.selection();
    if sel.is_collapsed() {
        return None;
    }
    Some(slice_chars(state.active_block().text(), sel.start(), sel.end()).to_string())
}

/// Move the caret to the char nearest `pointer`.
fn place_caret(state: &mut EditorState, galleys: &[Arc<Galley>], origins: &[Pos2], pointer: Pos2) {
    let index = origins
        .iter()
        .rposition(|origin| origin.y <= pointer.y)
        .unwrap_or(0);
    let (Some(galley), Some(origin), Some(block)) = (
        galleys.get(index),
        origins.get(index),
        state.content().blocks().get(index),
    ) else {
        return;
    };
    let cursor = galley.cursor_from_pos(pointer - *origin);
    let key = block.key().clone();
    debug!("Caret placed in block {} at {}", key, cursor.ccursor.index);
    state.set_selection(Selection::collapsed(key, cursor.ccursor.index));
}

// ─────────────────────────────────────────────────────────────────────────────
// Layout and Painting
// ─────────────────────────────────────────────────────────────────────────────

/// Styles that decide the height of an empty block: the pending style for
/// the active block, nothing otherwise.
fn trailing_style(state: &EditorState, block: &Block) -> StyleSet {
    if block.key() == &state.selection().block_key {
        state.current_inline_style()
    } else {
        StyleSet::empty()
    }
}

/// Convert merged style attributes into an egui text format.
///
/// The default fonts have no bold face, so bold renders in the strong text
/// color.
pub fn text_format(
    attrs: StyleAttributes,
    base_font_size: f32,
    text_color: Color32,
    strong_color: Color32,
) -> TextFormat {
    let color = match (attrs.color, attrs.bold) {
        (Some(Rgb(r, g, b)), _) => Color32::from_rgb(r, g, b),
        (None, true) => strong_color,
        (None, false) => text_color,
    };
    let underline = if attrs.underline {
        Stroke::new(1.0, color)
    } else {
        Stroke::NONE
    };
    TextFormat {
        font_id: FontId::proportional(attrs.font_size.unwrap_or(base_font_size)),
        color,
        underline,
        ..Default::default()
    }
}

fn block_layout_job(
    block: &Block,
    trailing: StyleSet,
    base_font_size: f32,
    text_color: Color32,
    strong_color: Color32,
    wrap_width: f32,
) -> LayoutJob {
    let mut job = LayoutJob::default();
    job.wrap.max_width = wrap_width;

    for (text, styles) in block.styled_runs() {
        let format = text_format(styles.attributes(), base_font_size, text_color, strong_color);
        job.append(text, 0.0, format);
    }
    if block.is_empty() {
        // An empty section still sets the row height.
        let format = text_format(trailing.attributes(), base_font_size, text_color, strong_color);
        job.append("", 0.0, format);
    }
    job
}

fn paint_selection(
    painter: &egui::Painter,
    ui: &Ui,
    galley: &Galley,
    origin: Pos2,
    selection: &Selection,
) {
    let fill = ui.visuals().selection.bg_fill;
    let (start, end) = (selection.start(), selection.end());
    let mut row_start = 0;
    for row in &galley.rows {
        let row_len = row.char_count_excluding_newline();
        let from = start.max(row_start);
        let to = end.min(row_start + row_len);
        if from < to {
            let left = row.x_offset(from - row_start);
            let right = row.x_offset(to - row_start);
            let rect = Rect::from_x_y_ranges(left..=right, row.rect.y_range())
                .translate(origin.to_vec2());
            painter.rect_filled(rect, 0.0, fill);
        }
        row_start += row.char_count_including_newline();
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
