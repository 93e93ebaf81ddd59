//! Persisted key-value preference store.
//!
//! The navigation cursor and the active picker variant survive process
//! restarts as plain strings in a small TOML file. There is no versioning
//! and no migration: readers tolerate absent keys (returned as empty
//! strings) and values that no longer match reality.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tracing::warn;

#[derive(Debug)]
struct Inner {
    path: Option<PathBuf>,
    entries: BTreeMap<String, String>,
}

/// Shared handle to the preference store. Clones see the same entries.
#[derive(Debug, Clone)]
pub struct PrefStore {
    inner: Arc<Mutex<Inner>>,
}

impl PrefStore {
    /// Open a store backed by `path`. A missing or unreadable file starts
    /// the store empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(text) => toml::from_str(&text).unwrap_or_else(|e| {
                warn!("ignoring malformed state file {}: {e}", path.display());
                BTreeMap::new()
            }),
            Err(_) => BTreeMap::new(),
        };
        Self {
            inner: Arc::new(Mutex::new(Inner {
                path: Some(path),
                entries,
            })),
        }
    }

    /// A store that never touches disk; `commit` is a no-op.
    pub fn in_memory() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                path: None,
                entries: BTreeMap::new(),
            })),
        }
    }

    /// Read a value. Absent keys read as the empty string.
    pub fn get(&self, key: &str) -> String {
        self.inner
            .lock()
            .ok()
            .and_then(|inner| inner.entries.get(key).cloned())
            .unwrap_or_default()
    }

    /// Stage a value. Nothing reaches disk until `commit`.
    pub fn put(&self, key: &str, value: &str) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.entries.insert(key.to_string(), value.to_string());
        }
    }

    /// Flush staged entries to disk. Write failures are absorbed; the
    /// in-memory view stays authoritative for this process.
    pub fn commit(&self) {
        let Ok(inner) = self.inner.lock() else {
            return;
        };
        let Some(path) = inner.path.clone() else {
            return;
        };
        let text = match toml::to_string_pretty(&inner.entries) {
            Ok(t) => t,
            Err(e) => {
                warn!("could not serialize state: {e}");
                return;
            }
        };
        if let Some(parent) = path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        if let Err(e) = fs::write(&path, text) {
            warn!("could not write state file {}: {e}", path.display());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn absent_keys_read_as_empty_string() {
        let store = PrefStore::in_memory();
        assert_eq!(store.get("nothing_here"), "");
    }

    #[test]
    fn put_commit_reload_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.toml");

        let store = PrefStore::open(&path);
        store.put("dir_artist", "/music/Artist");
        store.put("picker_variant", "directory");
        store.commit();

        let reloaded = PrefStore::open(&path);
        assert_eq!(reloaded.get("dir_artist"), "/music/Artist");
        assert_eq!(reloaded.get("picker_variant"), "directory");
        assert_eq!(reloaded.get("dir_album"), "");
    }

    #[test]
    fn commit_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("state.toml");

        let store = PrefStore::open(&path);
        store.put("k", "v");
        store.commit();

        assert_eq!(PrefStore::open(&path).get("k"), "v");
    }

    #[test]
    fn malformed_state_file_starts_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.toml");
        std::fs::write(&path, "this is { not toml").unwrap();

        let store = PrefStore::open(&path);
        assert_eq!(store.get("anything"), "");
    }

    #[test]
    fn clones_share_entries() {
        let store = PrefStore::in_memory();
        let other = store.clone();
        store.put("k", "v");
        assert_eq!(other.get("k"), "v");
    }
}
