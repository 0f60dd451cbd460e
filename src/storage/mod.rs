//! Document persistence
//!
//! The document is serialized to a portable raw form and written under one
//! fixed key of a flat key-value store.

mod persistence;
mod raw;
mod store;

pub use persistence::{load_content, save_content, write_content, CONTENT_KEY};
pub use raw::{RawBlock, RawContent, RawStyleRange};
pub use store::{FileStore, KeyValueStore, MemoryStore};
