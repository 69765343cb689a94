//! Key-value store abstraction.

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Error type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Key contains characters that cannot name a record
    #[error("Invalid key: {0:?}")]
    InvalidKey(String),

    /// Backend refused the operation (quota, unavailable medium)
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Durable store of named JSON blobs.
///
/// Reads happen once per record at startup; every mutation of a record is
/// followed by a full `set` of that record.
pub trait KeyValueStore {
    /// Read a record. Absent keys yield `None`.
    fn get(&self, key: &str) -> Result<Option<serde_json::Value>>;

    /// Replace a record.
    fn set(&mut self, key: &str, value: serde_json::Value) -> Result<()>;
}

/// Read a record and decode it.
pub fn load<T: DeserializeOwned>(store: &impl KeyValueStore, key: &str) -> Result<Option<T>> {
    match store.get(key)? {
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
        None => Ok(None),
    }
}

/// Encode a value and write it as a record.
pub fn save<T: Serialize + ?Sized>(
    store: &mut impl KeyValueStore,
    key: &str,
    value: &T,
) -> Result<()> {
    let value = serde_json::to_value(value)?;
    store.set(key, value)
}

/// Keys name files on disk, so only a conservative alphabet is accepted.
pub(crate) fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key() {
        assert!(validate_key("tasks").is_ok());
        assert!(validate_key("goal_list-2").is_ok());
        assert!(validate_key("").is_err());
        assert!(validate_key("../etc").is_err());
        assert!(validate_key("a b").is_err());
    }
}
