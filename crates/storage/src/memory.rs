//! In-memory storage, used by tests and throwaway sessions.

use std::collections::HashMap;

use super::trait_::{validate_key, KeyValueStore, Result, StorageError};

/// Store that keeps records in a map.
///
/// Can be switched into an unavailable state to exercise write failures.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    records: HashMap<String, serde_json::Value>,
    writes: usize,
    unavailable: bool,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `set` fail (or succeed again).
    pub fn set_unavailable(&mut self, unavailable: bool) {
        self.unavailable = unavailable;
    }

    /// Number of successful writes so far.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<serde_json::Value>> {
        validate_key(key)?;
        Ok(self.records.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: serde_json::Value) -> Result<()> {
        validate_key(key)?;
        if self.unavailable {
            return Err(StorageError::Unavailable("memory store is read-only".to_string()));
        }
        self.records.insert(key.to_string(), value);
        self.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set() {
        let mut store = MemoryStore::new();
        assert!(store.get("goals").unwrap().is_none());
        store.set("goals", serde_json::json!(["g"])).unwrap();
        assert_eq!(store.get("goals").unwrap(), Some(serde_json::json!(["g"])));
        assert_eq!(store.writes(), 1);
    }

    #[test]
    fn test_unavailable_keeps_previous_value() {
        let mut store = MemoryStore::new();
        store.set("tasks", serde_json::json!([1])).unwrap();
        store.set_unavailable(true);
        assert!(matches!(
            store.set("tasks", serde_json::json!([2])),
            Err(StorageError::Unavailable(_))
        ));
        assert_eq!(store.get("tasks").unwrap(), Some(serde_json::json!([1])));
        assert_eq!(store.writes(), 1);
    }
}
