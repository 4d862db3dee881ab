//! Persistent key-value store.
//!
//! The whole store is one JSON object on disk, rewritten after every change.
//! A missing or unreadable snapshot opens as an empty store, and a failed
//! write is logged and otherwise ignored. This is a convenience cache, not
//! a durable database.

use crate::io;
use serde_json::{Map, Value as JsonValue};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Snapshot path used when none is configured.
pub const DEFAULT_STORAGE_PATH: &str = ".agency_storage.json";

/// String-keyed JSON store backed by a snapshot file.
#[derive(Debug, Clone)]
pub struct AssetStore {
    path: PathBuf,
    entries: Map<String, JsonValue>,
}

impl AssetStore {
    /// Opens the store at `path`, loading the snapshot if there is one.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = if path.exists() {
            match io::read_json::<Map<String, JsonValue>>(&path) {
                Ok(entries) => entries,
                Err(error) => {
                    warn!(path = %path.display(), %error, "ignoring unreadable storage snapshot");
                    Map::new()
                }
            }
        } else {
            Map::new()
        };
        debug!(path = %path.display(), keys = entries.len(), "opened asset store");
        Self { path, entries }
    }

    /// Path of the snapshot file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stores `value` under `key`, replacing any previous value.
    pub fn store(&mut self, key: impl Into<String>, value: JsonValue) {
        self.entries.insert(key.into(), value);
        self.save();
    }

    /// Retrieves the value stored under `key`.
    #[must_use]
    pub fn retrieve(&self, key: &str) -> Option<&JsonValue> {
        self.entries.get(key)
    }

    /// Deletes `key`. Returns whether it existed.
    pub fn delete(&mut self, key: &str) -> bool {
        if self.entries.shift_remove(key).is_some() {
            self.save();
            true
        } else {
            false
        }
    }

    /// Keys starting with `prefix`, in insertion order. An empty prefix
    /// lists every key.
    #[must_use]
    pub fn list(&self, prefix: &str) -> Vec<&str> {
        self.entries
            .keys()
            .filter(|k| k.starts_with(prefix))
            .map(String::as_str)
            .collect()
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.save();
    }

    fn save(&self) {
        if let Err(error) = io::write_json(&self.path, &self.entries) {
            warn!(path = %self.path.display(), %error, "failed to save storage snapshot");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn store_and_retrieve() {
        let dir = TempDir::new().expect("tempdir");
        let mut store = AssetStore::open(dir.path().join("store.json"));

        store.store("test_key", json!({"data": "value"}));
        assert_eq!(store.retrieve("test_key"), Some(&json!({"data": "value"})));
        assert!(store.retrieve("other").is_none());
    }

    #[test]
    fn list_with_prefix() {
        let dir = TempDir::new().expect("tempdir");
        let mut store = AssetStore::open(dir.path().join("store.json"));
        store.store("test_1", json!("value1"));
        store.store("test_2", json!("value2"));
        store.store("other_1", json!("value3"));

        assert_eq!(store.list("").len(), 3);
        assert_eq!(store.list("test_"), vec!["test_1", "test_2"]);
    }

    #[test]
    fn snapshot_survives_reopen() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("store.json");

        let mut store = AssetStore::open(&path);
        store.store("kept", json!([1, 2, 3]));
        store.store("dropped", json!(true));
        assert!(store.delete("dropped"));
        assert!(!store.delete("dropped"));

        let reopened = AssetStore::open(&path);
        assert_eq!(reopened.retrieve("kept"), Some(&json!([1, 2, 3])));
        assert_eq!(reopened.list(""), vec!["kept"]);
    }

    #[test]
    fn corrupt_snapshot_opens_empty() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("store.json");
        io::write_text(&path, "{not json").expect("write");

        let store = AssetStore::open(&path);
        assert!(store.list("").is_empty());
    }

    #[test]
    fn clear_empties_snapshot() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("store.json");
        let mut store = AssetStore::open(&path);
        store.store("a", json!(1));
        store.clear();

        assert!(AssetStore::open(&path).list("").is_empty());
    }

    #[test]
    fn write_failures_are_swallowed() {
        let dir = TempDir::new().expect("tempdir");
        let mut store = AssetStore::open(dir.path());

        store.store("still", json!("in memory"));
        assert_eq!(store.retrieve("still"), Some(&json!("in memory")));
    }
}
