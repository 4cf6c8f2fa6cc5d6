//! Local key-value storage.
//!
//! The store holds string values under string keys, the same shape as browser
//! local storage. `FileStore` keeps the whole map in one JSON file and rewrites
//! it on every change; there is no locking, so two processes writing at once
//! resolve as last-write-wins. `MemoryStore` backs tests.
//!
//! A store file that cannot be parsed reads as empty.

use std::collections::{BTreeMap, HashMap};
use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use uramp_common::Result;

/// Minimal local-storage interface.
pub trait KeyValueStore {
    /// Value under `key`, or `None` when absent.
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    /// Insert or replace the value under `key`.
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;
    /// Drop `key`; missing keys are not an error.
    fn remove_item(&mut self, key: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        (**self).remove_item(key)
    }
}

/// In-memory store.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    items: HashMap<String, String>,
}

impl MemoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        self.items.remove(key);
        Ok(())
    }
}

/// Store backed by a single JSON object file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Store at `path`. The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling the store is written to before the rename: the full file name
    /// plus `.tmp`, so it never equals the store path.
    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("storage"));
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_str(&raw) {
            Ok(items) => Ok(items),
            Err(e) => {
                warn!(
                    "Ignoring unreadable store file {}: {}",
                    self.path.display(),
                    e
                );
                Ok(BTreeMap::new())
            }
        }
    }

    fn write_all(&self, items: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let data = serde_json::to_vec_pretty(items)?;
        // Write to a sibling temp file then rename so readers never see a torn file.
        let temp_path = self.temp_path();
        fs::write(&temp_path, data)?;
        fs::rename(&temp_path, &self.path)?;
        debug!("Store {} written ({} keys)", self.path.display(), items.len());
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        let mut items = self.read_all()?;
        items.insert(key.to_string(), value.to_string());
        self.write_all(&items)
    }

    fn remove_item(&mut self, key: &str) -> Result<()> {
        let mut items = self.read_all()?;
        if items.remove(key).is_some() {
            self.write_all(&items)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_store() -> (FileStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path().join("nested").join("storage.json"));
        (store, temp_dir)
    }

    #[test]
    fn file_store_basic_operations() {
        let (mut store, _temp_dir) = create_test_store();

        assert_eq!(store.get_item("k").unwrap(), None);
        store.set_item("k", "v1").unwrap();
        store.set_item("other", "x").unwrap();
        assert_eq!(store.get_item("k").unwrap().as_deref(), Some("v1"));

        store.set_item("k", "v2").unwrap();
        assert_eq!(store.get_item("k").unwrap().as_deref(), Some("v2"));

        store.remove_item("k").unwrap();
        assert_eq!(store.get_item("k").unwrap(), None);
        assert_eq!(store.get_item("other").unwrap().as_deref(), Some("x"));
    }

    #[test]
    fn file_store_survives_reopen() {
        let (mut store, _temp_dir) = create_test_store();
        store.set_item("k", "v").unwrap();

        let reopened = FileStore::new(store.path().to_path_buf());
        assert_eq!(reopened.get_item("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn corrupt_file_reads_as_empty() {
        let (mut store, _temp_dir) = create_test_store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "{not json").unwrap();

        assert_eq!(store.get_item("k").unwrap(), None);
        store.set_item("k", "v").unwrap();
        assert_eq!(store.get_item("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn temp_file_never_aliases_the_store() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = FileStore::new(temp_dir.path().join("storage.tmp"));
        assert_eq!(store.temp_path(), temp_dir.path().join("storage.tmp.tmp"));
        assert_ne!(store.temp_path(), store.path());

        store.set_item("k", "v").unwrap();
        store.set_item("k2", "v2").unwrap();
        assert!(!store.temp_path().exists());
        assert_eq!(store.get_item("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn memory_store_through_mut_reference() {
        fn put<S: KeyValueStore>(mut store: S) {
            store.set_item("k", "v").unwrap();
        }

        let mut store = MemoryStore::new();
        put(&mut store);
        assert_eq!(store.get_item("k").unwrap().as_deref(), Some("v"));
        store.remove_item("k").unwrap();
        store.remove_item("k").unwrap();
        assert_eq!(store.get_item("k").unwrap(), None);
    }
}
