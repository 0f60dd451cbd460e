//! Portable raw form of a document
//!
//! The raw form is what gets written to the store: a list of blocks, each
//! with its text and the inline style ranges derived from the per-char
//! styles. Field order is fixed by the struct definitions so the JSON output
//! is stable. There is no version field.
//!
//! ```json
//! {
//!   "blocks": [
//!     {
//!       "key": "b1",
//!       "text": "Hello",
//!       "type": "unstyled",
//!       "depth": 0,
//!       "inlineStyleRanges": [{ "offset": 0, "length": 5, "style": "HEADING" }],
//!       "entityRanges": [],
//!       "data": {}
//!     }
//!   ],
//!   "entityMap": {}
//! }
//! ```

use crate::document::{Block, BlockKey, ContentState, InlineStyle, StyleRange};
use crate::error::{Error, Result};
use crate::string_utils::char_count;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Block type written for every block; only plain paragraphs exist.
const UNSTYLED: &str = "unstyled";

fn default_block_type() -> String {
    UNSTYLED.to_string()
}

// ─────────────────────────────────────────────────────────────────────────────
// Raw Types
// ─────────────────────────────────────────────────────────────────────────────

/// A whole document in raw form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawContent {
    pub blocks: Vec<RawBlock>,
    #[serde(default)]
    pub entity_map: Map<String, Value>,
}

/// One block in raw form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBlock {
    pub key: String,
    pub text: String,
    #[serde(rename = "type", default = "default_block_type")]
    pub block_type: String,
    #[serde(default)]
    pub depth: u32,
    #[serde(default)]
    pub inline_style_ranges: Vec<RawStyleRange>,
    #[serde(default)]
    pub entity_ranges: Vec<Value>,
    #[serde(default)]
    pub data: Map<String, Value>,
}

/// An inline style range; offsets and lengths are in chars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawStyleRange {
    pub offset: usize,
    pub length: usize,
    pub style: InlineStyle,
}

// ─────────────────────────────────────────────────────────────────────────────
// Conversion
// ─────────────────────────────────────────────────────────────────────────────

impl RawContent {
    /// Convert live content into raw form.
    pub fn from_content(content: &ContentState) -> Self {
        let blocks = content
            .blocks()
            .iter()
            .map(|block| RawBlock {
                key: block.key().to_string(),
                text: block.text().to_string(),
                block_type: default_block_type(),
                depth: 0,
                inline_style_ranges: block
                    .style_ranges()
                    .into_iter()
                    .map(|r| RawStyleRange {
                        offset: r.offset,
                        length: r.length,
                        style: r.style,
                    })
                    .collect(),
                entity_ranges: Vec::new(),
                data: Map::new(),
            })
            .collect();

        Self {
            blocks,
            entity_map: Map::new(),
        }
    }

    /// Rebuild live content, checking the document invariants.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidContent` when there are no blocks, block keys
    /// repeat, or a style range reaches past its block's text.
    pub fn into_content(self) -> Result<ContentState> {
        let mut blocks = Vec::with_capacity(self.blocks.len());
        for raw in self.blocks {
            let len = char_count(&raw.text);
            let mut ranges = Vec::with_capacity(raw.inline_style_ranges.len());
            for r in &raw.inline_style_ranges {
                if r.offset.checked_add(r.length).map_or(true, |end| end > len) {
                    return Err(Error::InvalidContent(format!(
                        "style range at {} (length {}) exceeds block '{}' of length {}",
                        r.offset, r.length, raw.key, len
                    )));
                }
                ranges.push(StyleRange::new(r.offset, r.length, r.style));
            }
            blocks.push(Block::from_ranges(BlockKey::from(raw.key), &raw.text, &ranges));
        }

        ContentState::from_blocks(blocks).ok_or_else(|| {
            Error::InvalidContent("document has no blocks or repeats a block key".to_string())
        })
    }

    /// Serialize to compact JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse JSON read from the store under `key`.
    pub fn from_json(key: &str, json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|source| Error::ContentParse {
            key: key.to_string(),
            source,
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
