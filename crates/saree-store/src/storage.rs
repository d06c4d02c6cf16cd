//! Raw string storage backends.
//!
//! A [`Storage`] behaves like the browser's `localStorage`: string keys,
//! string values, and interior mutability so a shared handle can write.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::StoreError;

/// A string key-value backend.
pub trait Storage: Send + Sync {
    /// Read a raw value.
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write a raw value, replacing any previous one.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove a key. Removing a missing key is not an error.
    fn remove_item(&self, key: &str) -> Result<(), StoreError>;

    /// List all keys in sorted order.
    fn keys(&self) -> Result<Vec<String>, StoreError>;
}

/// In-memory storage, used by tests and as the fallback backend.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.read().map_err(|_| StoreError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.write().map_err(|_| StoreError::Poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.write().map_err(|_| StoreError::Poisoned)?;
        entries.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        let entries = self.entries.read().map_err(|_| StoreError::Poisoned)?;
        Ok(entries.keys().cloned().collect())
    }
}

/// Storage persisted as a single JSON object on disk.
///
/// The whole file is rewritten on every mutation, which is fine for the
/// handful of keys the storefront keeps.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, String>>,
}

impl FileStorage {
    /// Open (or lazily create) a storage file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let entries = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&content)?
            }
        } else {
            BTreeMap::new()
        };

        tracing::debug!(path = %path.display(), keys = entries.len(), "opened file storage");

        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.read().map_err(|_| StoreError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.write().map_err(|_| StoreError::Poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        self.flush(&entries)
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.write().map_err(|_| StoreError::Poisoned)?;
        if entries.remove(key).is_some() {
            self.flush(&entries)?;
        }
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        let entries = self.entries.read().map_err(|_| StoreError::Poisoned)?;
        Ok(entries.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_roundtrip() {
        let storage = MemoryStorage::new();
        storage.set_item("cartCount", "3").unwrap();
        assert_eq!(storage.get_item("cartCount").unwrap().as_deref(), Some("3"));

        storage.remove_item("cartCount").unwrap();
        assert_eq!(storage.get_item("cartCount").unwrap(), None);
    }

    #[test]
    fn test_memory_remove_missing_is_ok() {
        let storage = MemoryStorage::new();
        assert!(storage.remove_item("nope").is_ok());
    }

    #[test]
    fn test_file_storage_persists_between_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        {
            let storage = FileStorage::open(&path).unwrap();
            storage.set_item("userName", "Priya Sharma").unwrap();
        }

        let reopened = FileStorage::open(&path).unwrap();
        assert_eq!(
            reopened.get_item("userName").unwrap().as_deref(),
            Some("Priya Sharma")
        );
        assert_eq!(reopened.keys().unwrap(), vec!["userName".to_string()]);
    }
}
