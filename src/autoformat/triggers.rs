//! Line-prefix triggers
//!
//! Typing a space into a block whose entire text is one of the trigger
//! patterns clears the block and toggles the matching style:
//!
//! | Pattern | Style       |
//! |---------|-------------|
//! | `#`     | `HEADING`   |
//! | `*`     | `BOLD`      |
//! | `**`    | `RED`       |
//! | `***`   | `UNDERLINE` |
//!
//! Matching is exact equality on the whole block text. `"# "`, `"##"` or
//! `"a#"` never trigger.

use crate::autoformat::surface::RichTextSurface;
use crate::document::{ChangeType, InlineStyle, Selection};
use crate::string_utils::char_count;
use log::debug;

// ─────────────────────────────────────────────────────────────────────────────
// Trigger Table
// ─────────────────────────────────────────────────────────────────────────────

/// A block text that, followed by a space, applies a style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trigger {
    pub pattern: &'static str,
    pub style: InlineStyle,
}

/// The fixed trigger vocabulary.
pub static TRIGGERS: [Trigger; 4] = [
    Trigger {
        pattern: "#",
        style: InlineStyle::Heading,
    },
    Trigger {
        pattern: "*",
        style: InlineStyle::Bold,
    },
    Trigger {
        pattern: "**",
        style: InlineStyle::Red,
    },
    Trigger {
        pattern: "***",
        style: InlineStyle::Underline,
    },
];

/// The input that arms the trigger check.
pub const TRIGGER_INPUT: &str = " ";

/// Find the trigger whose pattern equals `block_text` exactly.
pub fn match_trigger(block_text: &str) -> Option<&'static Trigger> {
    TRIGGERS.iter().find(|t| t.pattern == block_text)
}

// ─────────────────────────────────────────────────────────────────────────────
// Detection
// ─────────────────────────────────────────────────────────────────────────────

/// Whether a before-input hook consumed the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputHandling {
    /// The input was consumed and must not be inserted.
    Handled,
    /// The caller should insert the input normally.
    NotHandled,
}

/// Inspect `input` before it is inserted.
///
/// When `input` is a single space and the block holding the selection start
/// consists of exactly one trigger pattern, the pattern is removed, the
/// style toggled and the input consumed.
pub fn handle_before_input<S: RichTextSurface>(surface: &mut S, input: &str) -> InputHandling {
    if input != TRIGGER_INPUT {
        return InputHandling::NotHandled;
    }

    let selection = surface.selection();
    let Some(trigger) = surface.block_text(&selection.block_key).and_then(match_trigger) else {
        return InputHandling::NotHandled;
    };

    debug!(
        "Trigger {:?} matched in block {}, applying {}",
        trigger.pattern, selection.block_key, trigger.style
    );
    let range = selection.merge(0, char_count(trigger.pattern));
    apply_trigger(surface, &range, trigger.style);
    InputHandling::Handled
}

/// Remove `range` as its own revision, then toggle `style` for what is typed
/// next. The caret ends at the start of the removed range.
pub fn apply_trigger<S: RichTextSurface>(
    surface: &mut S,
    range: &Selection,
    style: InlineStyle,
) {
    let revision = surface.replace_range(range, "");
    surface.push_state(revision, ChangeType::RemoveRange);
    surface.toggle_style(style);
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autoformat::surface::Revision;
    use crate::document::{BlockKey, EditorState, StyleRange};

    fn state_with(text: &str) -> EditorState {
        let mut state = EditorState::new_empty();
        state.insert_text(text);
        state
    }

    #[test]
    fn test_every_trigger_clears_block_and_activates_style() {
        for trigger in TRIGGERS {
            let mut state = state_with(trigger.pattern);
            let result = handle_before_input(&mut state, " ");

            assert_eq!(result, InputHandling::Handled, "pattern {}", trigger.pattern);
            assert_eq!(state.active_block().text(), "");
            assert_eq!(state.selection().start(), 0);
            assert!(state.current_inline_style().contains(trigger.style));
            assert_eq!(state.last_change_type(), Some(ChangeType::RemoveRange));
        }
    }

    #[test]
    fn test_non_matching_text_is_not_handled() {
        for text in ["# ", "##", "a#", " #", "****", "", "Hello"] {
            let mut state = state_with(text);
            let revision = state.revision();
            let style = state.current_inline_style();

            assert_eq!(handle_before_input(&mut state, " "), InputHandling::NotHandled);
            assert_eq!(state.revision(), revision);
            assert_eq!(state.current_inline_style(), style);
        }
    }

    #[test]
    fn test_only_space_arms_the_check() {
        let mut state = state_with("#");
        assert_eq!(handle_before_input(&mut state, "a"), InputHandling::NotHandled);
        assert_eq!(handle_before_input(&mut state, "  "), InputHandling::NotHandled);
        assert_eq!(state.active_block().text(), "#");
    }

    #[test]
    fn test_trigger_on_second_line_leaves_first_alone() {
        let mut state = state_with("Intro\n**");
        assert_eq!(handle_before_input(&mut state, " "), InputHandling::Handled);
        assert_eq!(state.content().plain_text(), "Intro\n");
        assert!(state.current_inline_style().contains(InlineStyle::Red));
    }

    #[test]
    fn test_trigger_toggles_off_an_inherited_style() {
        let mut state = EditorState::new_empty();
        state.toggle_inline_style(InlineStyle::Heading);
        state.insert_text("Title");
        state.split_block();
        state.insert_text("#");

        assert_eq!(handle_before_input(&mut state, " "), InputHandling::Handled);
        assert!(!state.current_inline_style().contains(InlineStyle::Heading));
        assert_eq!(state.content().plain_text(), "Title\n");
    }

    #[test]
    fn test_removed_pattern_takes_its_style_with_it() {
        let mut state = EditorState::new_empty();
        state.toggle_inline_style(InlineStyle::Heading);
        state.insert_text("#");

        assert_eq!(handle_before_input(&mut state, " "), InputHandling::Handled);
        assert!(state.current_inline_style().contains(InlineStyle::Heading));
    }

    #[test]
    fn test_typed_text_after_trigger_carries_style() {
        let mut state = state_with("#");
        handle_before_input(&mut state, " ");
        state.insert_text("Title");
        assert_eq!(
            state.content().first_block().style_ranges(),
            vec![StyleRange::new(0, 5, InlineStyle::Heading)]
        );
    }

    #[test]
    fn test_match_trigger_table() {
        assert_eq!(match_trigger("#").map(|t| t.style), Some(InlineStyle::Heading));
        assert_eq!(match_trigger("*").map(|t| t.style), Some(InlineStyle::Bold));
        assert_eq!(match_trigger("**").map(|t| t.style), Some(InlineStyle::Red));
        assert_eq!(match_trigger("***").map(|t| t.style), Some(InlineStyle::Underline));
        assert!(match_trigger("#").is_some_and(|t| t.pattern == "#"));
        assert!(match_trigger("H").is_none());
    }

    /// A plain-text surface that records calls, to exercise the detector
    /// without the document model.
    #[derive(Default)]
    struct RecordingSurface {
        text: String,
        pushed: Vec<ChangeType>,
        toggled: Vec<InlineStyle>,
    }

    impl RichTextSurface for RecordingSurface {
        type Content = String;

        fn block_text(&self, _key: &BlockKey) -> Option<&str> {
            Some(&self.text)
        }

        fn selection(&self) -> Selection {
            Selection::collapsed(BlockKey::from("only"), char_count(&self.text))
        }

        fn replace_range(&self, range: &Selection, text: &str) -> Revision<String> {
            let content =
                crate::string_utils::splice_chars(&self.text, range.start(), range.end(), text);
            Revision {
                content,
                selection_after: range.merge(range.start(), range.start()),
            }
        }

        fn push_state(&mut self, revision: Revision<String>, change_type: ChangeType) {
            self.text = revision.content;
            self.pushed.push(change_type);
        }

        fn toggle_style(&mut self, style: InlineStyle) {
            self.toggled.push(style);
        }
    }

    #[test]
    fn test_detector_works_on_any_surface() {
        let mut surface = RecordingSurface {
            text: "***".to_string(),
            ..Default::default()
        };
        assert_eq!(handle_before_input(&mut surface, " "), InputHandling::Handled);
        assert_eq!(surface.text, "");
        assert_eq!(surface.pushed, vec![ChangeType::RemoveRange]);
        assert_eq!(surface.toggled, vec![InlineStyle::Underline]);
    }
}
