//! Filesystem-backed key-value store.
//!
//! Stores each key as one file under a base directory. Keys are validated
//! to prevent directory escape; a key never names a path, only a file
//! stem.

use super::KeyValueStore;
use crate::{Error, Result};
use std::fs;
use std::path::PathBuf;

/// Maximum stored value size (1MB). Prevents memory exhaustion from a
/// corrupted or maliciously large file.
const MAX_VALUE_SIZE: u64 = 1024 * 1024;

/// Filesystem-backed store, one file per key.
pub struct FileStore {
    /// Base directory for stored values.
    base_path: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at `base_path`, creating the directory if
    /// needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new(base_path: impl Into<PathBuf>) -> Result<Self> {
        let base_path = base_path.into();
        fs::create_dir_all(&base_path).map_err(|e| Error::Storage {
            operation: "create_store_dir".to_string(),
            cause: e.to_string(),
        })?;
        Ok(Self { base_path })
    }

    /// Validates a key and resolves it to a file path.
    fn key_path(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty()
            || !key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(Error::Storage {
                operation: "validate_key".to_string(),
                cause: format!("invalid store key '{key}'"),
            });
        }
        Ok(self.base_path.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key)?;
        if !path.exists() {
            return Ok(None);
        }

        let metadata = fs::metadata(&path).map_err(|e| Error::Storage {
            operation: "stat_key".to_string(),
            cause: e.to_string(),
        })?;
        if metadata.len() > MAX_VALUE_SIZE {
            return Err(Error::Storage {
                operation: "read_key".to_string(),
                cause: format!("stored value for '{key}' exceeds {MAX_VALUE_SIZE} bytes"),
            });
        }

        fs::read_to_string(&path)
            .map(Some)
            .map_err(|e| Error::Storage {
                operation: "read_key".to_string(),
                cause: e.to_string(),
            })
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.key_path(key)?;
        fs::write(&path, value).map_err(|e| Error::Storage {
            operation: "write_key".to_string(),
            cause: e.to_string(),
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.key_path(key)?;
        if !path.exists() {
            return Ok(());
        }
        fs::remove_file(&path).map_err(|e| Error::Storage {
            operation: "remove_key".to_string(),
            cause: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path()).unwrap();

        store.set("pokemon_favorites", "[25,1]").unwrap();
        assert_eq!(
            store.get("pokemon_favorites").unwrap().as_deref(),
            Some("[25,1]")
        );
    }

    #[test]
    fn test_get_missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path()).unwrap();
        assert_eq!(store.get("pokemon_theme").unwrap(), None);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path()).unwrap();

        store.set("pokemon_filters", "{}").unwrap();
        store.remove("pokemon_filters").unwrap();
        store.remove("pokemon_filters").unwrap();
        assert_eq!(store.get("pokemon_filters").unwrap(), None);
    }

    #[test]
    fn test_rejects_path_traversal_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path()).unwrap();

        assert!(store.get("../escape").is_err());
        assert!(store.set("a/b", "x").is_err());
        assert!(store.set("", "x").is_err());
    }

    #[test]
    fn test_overwrite_replaces_value() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path()).unwrap();

        store.set("pokemon_language", "\"en\"").unwrap();
        store.set("pokemon_language", "\"ka\"").unwrap();
        assert_eq!(
            store.get("pokemon_language").unwrap().as_deref(),
            Some("\"ka\"")
        );
    }
}
