//! In-memory key-value store.
//!
//! Non-durable backend for tests and ephemeral sessions.

use super::KeyValueStore;
use crate::Result;
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory store backed by a mutex-guarded map.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        values.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let store = MemoryStore::new();
        store.set("pokemon_theme", "\"dark\"").unwrap();
        assert_eq!(
            store.get("pokemon_theme").unwrap().as_deref(),
            Some("\"dark\"")
        );
        store.remove("pokemon_theme").unwrap();
        assert_eq!(store.get("pokemon_theme").unwrap(), None);
    }
}
