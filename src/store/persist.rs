//! State persistence boundary
//!
//! The whole [`State`] is stored as one JSON blob under a fixed key.
//! Loading runs the blob through the validators; anything malformed is
//! discarded with a warning and the caller starts from the default state
//! instead of partially trusting it.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::state::{decode_state, State};

/// Fixed key the serialized state is stored under
pub const STORAGE_KEY: &str = "wallet-manager.state";

/// String-keyed blob storage, the local-storage analog
///
/// Implementations must be `Send + Sync`; the manager persists from a
/// store subscription.
pub trait StorageAdapter: Send + Sync {
    /// Read the blob stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` under `key`, replacing any previous blob
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete the blob under `key`, if any
    fn remove(&self, key: &str) -> Result<()>;
}

/// In-memory storage for tests and ephemeral sessions
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create an empty in-memory storage
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageAdapter for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        entries.remove(key);
        Ok(())
    }
}

/// File-backed storage: one `<key>.json` file per key in a directory
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Create a file storage rooted at `dir`
    ///
    /// The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl StorageAdapter for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)
            .map_err(|e| Error::Storage(format!("Failed to read {}: {}", path.display(), e)))?;
        Ok(Some(content))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| Error::Storage(format!("Failed to create storage dir: {}", e)))?;
        let path = self.path_for(key);
        fs::write(&path, value)
            .map_err(|e| Error::Storage(format!("Failed to write {}: {}", path.display(), e)))
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key);
        if path.exists() {
            fs::remove_file(&path)
                .map_err(|e| Error::Storage(format!("Failed to remove {}: {}", path.display(), e)))?;
        }
        Ok(())
    }
}

/// Load the persisted state, if a trustworthy one exists
///
/// Returns `None` when nothing is stored or the stored blob fails
/// validation; invalid blobs are discarded rather than raised to the
/// caller.
pub fn load_state(storage: &dyn StorageAdapter) -> Option<State> {
    let raw = match storage.get(STORAGE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            warn!("Failed to read persisted state: {}", e);
            return None;
        }
    };

    match decode_state(&raw) {
        Ok(state) => {
            info!("Loaded persisted state with {} wallet(s)", state.wallets.len());
            Some(state)
        }
        Err(e) => {
            warn!("Discarding invalid persisted state: {}", e);
            None
        }
    }
}

/// Serialize the state and write it under [`STORAGE_KEY`]
pub fn save_state(storage: &dyn StorageAdapter, state: &State) -> Result<()> {
    let json = serde_json::to_string_pretty(state)?;
    storage.set(STORAGE_KEY, &json)?;
    debug!("Saved wallet state");
    Ok(())
}
