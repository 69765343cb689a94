//! JSON file storage implementation.
//!
//! Stores each record as `<key>.json` in a data directory. Writes go to a
//! temporary sibling first and are renamed into place, so a crash mid-write
//! leaves the previous record intact.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::trait_::{validate_key, KeyValueStore, Result};

/// File-based JSON storage backend.
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    /// Create storage rooted at `root`, creating the directory if needed.
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Data directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn record_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<serde_json::Value>> {
        validate_key(key)?;
        match fs::read_to_string(self.record_path(key)) {
            Ok(json) => Ok(Some(serde_json::from_str(&json)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: serde_json::Value) -> Result<()> {
        validate_key(key)?;
        let path = self.record_path(key);
        let tmp = self.root.join(format!(".{}.json.tmp", key));
        let json = serde_json::to_string_pretty(&value)?;
        let written = fs::write(&tmp, json.as_bytes()).and_then(|()| fs::rename(&tmp, &path));
        if let Err(e) = written {
            fs::remove_file(&tmp).ok();
            return Err(e.into());
        }
        debug!(key, path = %path.display(), "record written");
        Ok(())
    }
}
