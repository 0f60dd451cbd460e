//! Inline styles and their visual attribute bundles
//!
//! The style vocabulary is closed: every style the editor can apply is a
//! variant of [`InlineStyle`], and every variant maps to exactly one
//! [`StyleAttributes`] bundle through a `match`.

use serde::{Deserialize, Serialize};
use std::fmt;

// ─────────────────────────────────────────────────────────────────────────────
// Inline Style
// ─────────────────────────────────────────────────────────────────────────────

/// An inline style that can be applied to a run of characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InlineStyle {
    /// Large bold text
    Heading,
    /// Red text. The name is historical; it does not change the weight.
    Bold,
    /// Red text
    Red,
    /// Underlined black text
    Underline,
}

impl InlineStyle {
    /// All styles, in bit order.
    pub const ALL: [InlineStyle; 4] = [
        InlineStyle::Heading,
        InlineStyle::Bold,
        InlineStyle::Red,
        InlineStyle::Underline,
    ];

    /// The name used in the persisted raw form.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Heading => "HEADING",
            Self::Bold => "BOLD",
            Self::Red => "RED",
            Self::Underline => "UNDERLINE",
        }
    }

    /// Visual attributes for text carrying only this style.
    pub fn attributes(&self) -> StyleAttributes {
        match self {
            Self::Heading => StyleAttributes {
                font_size: Some(24.0),
                bold: true,
                color: None,
                underline: false,
            },
            Self::Bold | Self::Red => StyleAttributes {
                font_size: Some(14.0),
                bold: false,
                color: Some(Rgb::RED),
                underline: false,
            },
            Self::Underline => StyleAttributes {
                font_size: Some(14.0),
                bold: false,
                color: Some(Rgb::BLACK),
                underline: true,
            },
        }
    }

    fn bit(&self) -> u8 {
        match self {
            Self::Heading => 1 << 0,
            Self::Bold => 1 << 1,
            Self::Red => 1 << 2,
            Self::Underline => 1 << 3,
        }
    }
}

impl fmt::Display for InlineStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Attribute Bundle
// ─────────────────────────────────────────────────────────────────────────────

/// A plain RGB color, independent of any UI toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const RED: Rgb = Rgb(255, 0, 0);
    pub const BLACK: Rgb = Rgb(0, 0, 0);
}

/// Concrete visual attributes of a style, or of a merged style set.
///
/// `None` means "inherit the editor default".
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StyleAttributes {
    /// Font size in points
    pub font_size: Option<f32>,
    /// Bold weight
    pub bold: bool,
    /// Text color
    pub color: Option<Rgb>,
    /// Underline decoration
    pub underline: bool,
}

impl StyleAttributes {
    /// Layer `other` on top of `self`. Later styles win for scalar
    /// attributes; flags accumulate.
    ///
    /// Sets are merged in [`InlineStyle::ALL`] order, not in the order the
    /// styles were applied, so `Heading + Underline` renders at 14px.
    fn merge(self, other: StyleAttributes) -> StyleAttributes {
        StyleAttributes {
            font_size: other.font_size.or(self.font_size),
            bold: self.bold || other.bold,
            color: other.color.or(self.color),
            underline: self.underline || other.underline,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Style Set
// ─────────────────────────────────────────────────────────────────────────────

/// A set of inline styles attached to one character (or the caret).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct StyleSet(u8);

impl StyleSet {
    /// The empty set.
    pub const fn empty() -> Self {
        StyleSet(0)
    }

    /// A set holding a single style.
    pub fn of(style: InlineStyle) -> Self {
        StyleSet(style.bit())
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn contains(&self, style: InlineStyle) -> bool {
        self.0 & style.bit() != 0
    }

    #[must_use]
    pub fn with(self, style: InlineStyle) -> Self {
        StyleSet(self.0 | style.bit())
    }

    #[must_use]
    pub fn without(self, style: InlineStyle) -> Self {
        StyleSet(self.0 & !style.bit())
    }

    /// Flip membership of `style`.
    #[must_use]
    pub fn toggled(self, style: InlineStyle) -> Self {
        StyleSet(self.0 ^ style.bit())
    }

    /// Iterate the styles in the set in a stable order.
    pub fn iter(&self) -> impl Iterator<Item = InlineStyle> + '_ {
        InlineStyle::ALL.into_iter().filter(move |s| self.contains(*s))
    }

    /// Merge the attribute bundles of every style in the set.
    pub fn attributes(&self) -> StyleAttributes {
        self.iter()
            .fold(StyleAttributes::default(), |acc, s| acc.merge(s.attributes()))
    }
}

impl FromIterator<InlineStyle> for StyleSet {
    fn from_iter<I: IntoIterator<Item = InlineStyle>>(iter: I) -> Self {
        iter.into_iter().fold(StyleSet::empty(), StyleSet::with)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_names_serialize_uppercase() {
        for style in InlineStyle::ALL {
            let json = serde_json::to_string(&style).unwrap();
            assert_eq!(json, format!("\"{}\"", style.name()));
        }
    }

    #[test]
    fn test_heading_attributes() {
        let attrs = InlineStyle::Heading.attributes();
        assert_eq!(attrs.font_size, Some(24.0));
        assert!(attrs.bold);
        assert_eq!(attrs.color, None);
    }

    #[test]
    fn test_bold_is_red_not_heavy() {
        let attrs = InlineStyle::Bold.attributes();
        assert!(!attrs.bold);
        assert_eq!(attrs.color, Some(Rgb::RED));
    }

    #[test]
    fn test_underline_attributes() {
        let attrs = InlineStyle::Underline.attributes();
        assert!(attrs.underline);
        assert_eq!(attrs.color, Some(Rgb::BLACK));
        assert_eq!(attrs.font_size, Some(14.0));
    }

    #[test]
    fn test_toggle_is_its_own_inverse() {
        let set = StyleSet::of(InlineStyle::Red);
        for style in InlineStyle::ALL {
            assert_eq!(set.toggled(style).toggled(style), set);
        }
    }

    #[test]
    fn test_set_membership() {
        let set: StyleSet = [InlineStyle::Heading, InlineStyle::Underline]
            .into_iter()
            .collect();
        assert!(set.contains(InlineStyle::Heading));
        assert!(!set.contains(InlineStyle::Red));
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            vec![InlineStyle::Heading, InlineStyle::Underline]
        );
        assert!(set.without(InlineStyle::Heading).without(InlineStyle::Underline).is_empty());
    }

    #[test]
    fn test_merged_attributes() {
        let set: StyleSet = [InlineStyle::Heading, InlineStyle::Underline]
            .into_iter()
            .collect();
        let attrs = set.attributes();
        assert!(attrs.bold);
        assert!(attrs.underline);
        assert_eq!(attrs.font_size, Some(14.0));
        assert_eq!(attrs.color, Some(Rgb::BLACK));

        let reversed: StyleSet = [InlineStyle::Underline, InlineStyle::Heading]
            .into_iter()
            .collect();
        assert_eq!(reversed.attributes(), attrs);
    }

    #[test]
    fn test_empty_set_has_default_attributes() {
        assert_eq!(StyleSet::empty().attributes(), StyleAttributes::default());
    }
}
