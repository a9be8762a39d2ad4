//! Key-value persistence for site content.
//!
//! Everything the site remembers lives under three string keys, each holding
//! a string value:
//!
//! | Key | Value |
//! |-----|-------|
//! | [`GALLERY_KEY`] | JSON array of gallery images |
//! | [`PRICING_KEY`] | JSON array of pricing plans |
//! | [`AUTH_KEY`] | the plain `"authenticated"` sentinel, when logged in |
//!
//! The [`Store`] trait is the raw get/set/remove surface. Two backends exist:
//!
//! - [`MemoryStore`]: a map that lives as long as the process. Used by tests
//!   and anywhere persistence across runs is not wanted.
//! - [`FileStore`]: the same map mirrored to a single JSON object file. The
//!   file is rewritten in full on every write.
//!
//! Typed access goes through [`read_json`] and [`write_json`]. A value that
//! is present but does not parse is logged and reported as absent, so callers
//! fall through to their defaults instead of failing on a corrupt entry.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use thiserror::Error;

/// Store key for the gallery collection.
pub const GALLERY_KEY: &str = "framesoflife_gallery";
/// Store key for the pricing collection.
pub const PRICING_KEY: &str = "framesoflife_pricing";
/// Store key for the admin authentication flag.
pub const AUTH_KEY: &str = "framesoflife_auth";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("store lock poisoned")]
    Poisoned,
}

/// Synchronous string key-value storage.
pub trait Store: Send + Sync {
    /// Value under `key`, or `None` when nothing is stored.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    /// Drop `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Read and decode the JSON value under `key`.
///
/// Returns `Ok(None)` when the key is absent or its value is not valid JSON
/// for `T`. Only backend failures are errors.
pub fn read_json<T: DeserializeOwned>(store: &dyn Store, key: &str) -> Result<Option<T>, StoreError> {
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(err) => {
            tracing::warn!(key, error = %err, "ignoring malformed stored value");
            Ok(None)
        }
    }
}

/// Encode `value` as JSON and store it under `key`.
pub fn write_json<T: Serialize + ?Sized>(
    store: &dyn Store,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    let json = serde_json::to_string(value)?;
    store.set(key, &json)
}

// ============================================================================
// In-memory backend
// ============================================================================

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every stored entry, sorted by key.
    pub fn entries(&self) -> Result<BTreeMap<String, String>, StoreError> {
        let entries = self.entries.read().map_err(|_| StoreError::Poisoned)?;
        Ok(entries.clone())
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.read().map_err(|_| StoreError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.write().map_err(|_| StoreError::Poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.write().map_err(|_| StoreError::Poisoned)?;
        entries.remove(key);
        Ok(())
    }
}

// ============================================================================
// File backend
// ============================================================================

/// A [`Store`] mirrored to one JSON object file on disk.
///
/// The whole file is read once at [`FileStore::open`] and rewritten after
/// every `set` or `remove`. Nothing is written until the first mutation, so
/// opening a store for reading never creates the file.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open the store at `path`. A missing file is an empty store; a file that
    /// exists but is not a JSON object of strings is an error.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = if path.exists() {
            let content = fs::read_to_string(&path)?;
            serde_json::from_str(&content)?
        } else {
            BTreeMap::new()
        };
        tracing::debug!(path = %path.display(), keys = entries.len(), "opened store");
        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl Store for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.read().map_err(|_| StoreError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.write().map_err(|_| StoreError::Poisoned)?;
        let mut next = entries.clone();
        next.insert(key.to_string(), value.to_string());
        self.flush(&next)?;
        *entries = next;
        tracing::trace!(key, bytes = value.len(), "wrote store entry");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.write().map_err(|_| StoreError::Poisoned)?;
        if !entries.contains_key(key) {
            return Ok(());
        }
        let mut next = entries.clone();
        next.remove(key);
        self.flush(&next)?;
        *entries = next;
        Ok(())
    }
}
