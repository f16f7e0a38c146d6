//! Session storage abstraction.
//!
//! The store serializes every collection into a string-keyed storage after
//! each mutation, mirroring how a browser tab writes JSON into session
//! storage. The trait keeps the backend swappable; `MemoryStorage` is the
//! default and lives exactly as long as the process (one "session").

use std::collections::HashMap;
use std::sync::Mutex;

/// String-keyed storage with session-storage semantics: values are JSON
/// strings, and the whole thing is discarded when the session ends.
pub trait SessionStorage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: String);
    fn clear(&self);
}

/// In-process implementation backed by a mutex-guarded map.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: String) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value);
        }
    }

    fn clear(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_then_get_round_trips() {
        let storage = MemoryStorage::new();
        storage.set("k", "v".to_string());
        assert_eq!(storage.get("k"), Some("v".to_string()));
    }

    #[test]
    fn test_get_missing_key_is_none() {
        let storage = MemoryStorage::new();
        assert!(storage.get("missing").is_none());
    }

    #[test]
    fn test_set_overwrites_existing_value() {
        let storage = MemoryStorage::new();
        storage.set("k", "one".to_string());
        storage.set("k", "two".to_string());
        assert_eq!(storage.get("k"), Some("two".to_string()));
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn test_clear_removes_everything() {
        let storage = MemoryStorage::new();
        storage.set("a", "1".to_string());
        storage.set("b", "2".to_string());
        storage.clear();
        assert!(storage.is_empty());
        assert!(storage.get("a").is_none());
    }
}
