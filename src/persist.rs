//! Key-value persistence for the theme preference.
//!
//! The store persists exactly one string value (the preference wire form)
//! under a caller-chosen key. [`Storage`] abstracts where that value
//! lives so tests and unusual hosts can substitute their own backend:
//!
//! - [`MemoryStorage`]: process-local map; nothing survives a restart.
//!   Also the degrade target when no durable backend is available.
//! - [`FileStorage`]: one file per key under a platform config
//!   directory, e.g. `~/.config/<app>/theme` on Linux.
//!
//! Callers of the theme store never see these errors: persistence
//! failures are logged and the store continues in-memory.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use thiserror::Error;

/// Errors from a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Failed to read the value for a key.
    #[error("failed to read '{path}': {source}")]
    Read {
        /// Path of the backing file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Failed to write the value for a key.
    #[error("failed to write '{path}': {source}")]
    Write {
        /// Path of the backing file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The backend cannot be used at all (e.g. no config directory).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// A host-provided key-value backend holding string values.
///
/// Implementations must tolerate concurrent calls; the theme store
/// serializes its own access but multiple stores may share one backend.
pub trait Storage: Send + Sync {
    /// Reads the value for `key`. `Ok(None)` means no value is present.
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Writes `value` for `key`, replacing any previous value.
    fn store(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory storage. The default backend and the standard test double.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Creates an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    fn store(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// File-backed storage: one file per key inside a base directory.
///
/// # Platform Paths
///
/// With [`FileStorage::for_app`], the base directory is the platform
/// config dir plus the application name:
///
/// - Linux: `~/.config/<app>/`
/// - macOS: `~/Library/Application Support/<app>/`
/// - Windows: `%APPDATA%\<app>\`
///
/// The directory is created on first write, not on construction.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Creates storage rooted at the platform config dir for `app`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] when the platform config
    /// directory cannot be determined.
    pub fn for_app(app: &str) -> Result<Self, StorageError> {
        let base = dirs::config_dir()
            .ok_or_else(|| StorageError::Unavailable("no config directory".to_string()))?;
        Ok(Self {
            dir: base.join(app),
        })
    }

    /// Creates storage rooted at an explicit directory.
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

impl Storage for FileStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content.trim_end().to_string())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Read { path, source }),
        }
    }

    fn store(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir).map_err(|source| StorageError::Write {
            path: self.dir.clone(),
            source,
        })?;
        let path = self.path_for(key);
        fs::write(&path, value).map_err(|source| StorageError::Write { path, source })
    }
}
