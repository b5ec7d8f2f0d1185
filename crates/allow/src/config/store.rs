//! Durable key/value stores for settings.
//!
//! The validator only needs string get/set. [`MemoryStore`] keeps values for
//! the life of the process; [`FileStore`] keeps them in a JSON object on disk
//! so a fresh process reads back what an earlier one wrote.

use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Error type for settings store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// I/O error while reading or writing.
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    /// The backing file is not a JSON object of strings.
    #[error("malformed settings file {path}: {source}")]
    Malformed {
        /// The file that failed to parse.
        path: PathBuf,
        /// The parse failure.
        #[source]
        source: serde_json::Error,
    },

    /// Serialization failure on write.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Storage port for persisted string settings.
pub trait SettingsStore: Send + Sync {
    /// Reads `key`. Returns `Ok(None)` when it was never written.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Writes `key`.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

// ============================================================================
// MEMORY STORE
// ============================================================================

/// Thread-safe in-process store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if nothing has been stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl SettingsStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .write()
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

// ============================================================================
// FILE STORE
// ============================================================================

/// Store backed by a single JSON object file.
///
/// A missing file reads as empty; it and its parent directories are created
/// on the first write.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Creates a store for `path`. Nothing is touched until the first access.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(err) => return Err(StoreError::Io(err)),
        };
        if bytes.is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_slice(&bytes).map_err(|source| StoreError::Malformed {
            path: self.path.clone(),
            source,
        })
    }
}

impl SettingsStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.read_all()?;
        entries.insert(key.to_owned(), value.to_owned());
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(&entries)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}
