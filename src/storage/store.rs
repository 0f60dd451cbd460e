//! Flat string-keyed stores
//!
//! A store maps string keys to string values and nothing more. The editor
//! holds a store handle explicitly rather than reaching for a process-wide
//! location, so tests and multiple documents can each use their own.

use crate::error::{Error, Result};
use log::{debug, info};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::PathBuf;

/// A flat key-value store.
pub trait KeyValueStore {
    /// Read the value under `key`, or `None` if absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Delete `key`. Deleting an absent key is not an error.
    fn remove(&mut self, key: &str) -> Result<()>;
}

// ─────────────────────────────────────────────────────────────────────────────
// In-Memory Store
// ─────────────────────────────────────────────────────────────────────────────

/// A store that lives only as long as the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File-Backed Store
// ─────────────────────────────────────────────────────────────────────────────

/// A store persisted as a single JSON object file.
///
/// The whole file is rewritten on every change: the new contents go to a
/// sibling temp file which is then renamed over the original.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Open the store at `path`, reading existing entries.
    ///
    /// A missing or empty file opens as an empty store.
    ///
    /// # Errors
    ///
    /// Returns `Error::StoreRead` if the file cannot be read or is not a JSON
    /// object of strings.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if !path.exists() {
            debug!("Store file {} not found, starting empty", path.display());
            return Ok(Self {
                path,
                entries: BTreeMap::new(),
            });
        }

        let contents = fs::read_to_string(&path).map_err(|e| Error::StoreRead {
            path: path.clone(),
            source: Box::new(e),
        })?;

        let entries = if contents.trim().is_empty() {
            BTreeMap::new()
        } else {
            serde_json::from_str(&contents).map_err(|e| Error::StoreRead {
                path: path.clone(),
                source: Box::new(e),
            })?
        };

        info!("Opened store {}", path.display());
        Ok(Self { path, entries })
    }

    /// Write `entries` to disk. The caller commits them to `self.entries`
    /// only once this succeeds.
    fn flush(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                debug!("Creating store directory: {}", parent.display());
                fs::create_dir_all(parent).map_err(|e| Error::StoreWrite {
                    path: parent.to_path_buf(),
                    source: Box::new(e),
                })?;
            }
        }

        let json = serde_json::to_string_pretty(entries).map_err(|e| Error::StoreWrite {
            path: self.path.clone(),
            source: Box::new(e),
        })?;

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, &json).map_err(|e| Error::StoreWrite {
            path: tmp_path.clone(),
            source: Box::new(e),
        })?;
        fs::rename(&tmp_path, &self.path).map_err(|e| Error::StoreWrite {
            path: self.path.clone(),
            source: Box::new(e),
        })?;

        debug!("Flushed {} store entries to {}", entries.len(), self.path.display());
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut next = self.entries.clone();
        next.insert(key.to_string(), value.to_string());
        self.flush(&next)?;
        self.entries = next;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if !self.entries.contains_key(key) {
            return Ok(());
        }
        let mut next = self.entries.clone();
        next.remove(key);
        self.flush(&next)?;
        self.entries = next;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
