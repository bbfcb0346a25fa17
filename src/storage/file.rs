//! JSON-file backed store.
//!
//! The whole store is one JSON object mapping keys to record strings. It is
//! re-read on every `get` and rewritten on every `set`, so external edits
//! and crashes between writes never leave stale state in memory.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::error::StorageError;
use super::PersistenceStore;

/// Application directory name under the platform config directory.
const APP_DIR_NAME: &str = "pomodoro-widget";

/// File name of the store document.
const STORE_FILE_NAME: &str = "storage.json";

/// Returns the default store location.
///
/// `<config dir>/pomodoro-widget/storage.json`, or `./pomodoro-widget.json`
/// when the platform has no config directory.
#[must_use]
pub fn default_store_path() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR_NAME).join(STORE_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(format!("{APP_DIR_NAME}.json")))
}

/// A [`PersistenceStore`] persisted as a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store at the default location.
    #[must_use]
    pub fn new() -> Self {
        Self::with_path(default_store_path())
    }

    /// Creates a store backed by the given file.
    ///
    /// The file does not need to exist yet.
    pub fn with_path(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(StorageError::io(&self.path, &e)),
        };

        serde_json::from_slice(&bytes).map_err(|e| StorageError::Corrupt(e.to_string()))
    }

    fn write_document(&self, doc: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, &e))?;
            }
        }

        let data = serde_json::to_vec_pretty(doc)
            .map_err(|e| StorageError::Serialize("<document>".to_string(), e.to_string()))?;
        fs::write(&self.path, data).map_err(|e| StorageError::io(&self.path, &e))
    }
}

impl Default for JsonFileStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PersistenceStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_document()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        // A corrupt document is replaced rather than blocking every future save.
        let mut doc = match self.read_document() {
            Ok(doc) => doc,
            Err(e) if e.is_data_error() => BTreeMap::new(),
            Err(e) => return Err(e),
        };
        doc.insert(key.to_string(), value.to_string());
        self.write_document(&doc)?;

        debug!("Stored '{}' in {}", key, self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_reads_as_empty() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::with_path(dir.path().join("none.json"));
        assert_eq!(store.get("anything").unwrap(), None);
    }

    #[test]
    fn test_set_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("storage.json");
        let mut store = JsonFileStore::with_path(&path);

        store.set("k", "v").unwrap();

        assert!(path.exists());
        assert_eq!(store.get("k").unwrap(), Some("v".to_string()));
    }

    #[test]
    fn test_keys_are_independent() {
        let dir = tempdir().unwrap();
        let mut store = JsonFileStore::with_path(dir.path().join("s.json"));

        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();
        store.set("a", "3").unwrap();

        assert_eq!(store.get("a").unwrap(), Some("3".to_string()));
        assert_eq!(store.get("b").unwrap(), Some("2".to_string()));
    }

    #[test]
    fn test_corrupt_document_errors_on_read_and_is_replaced_on_write() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("s.json");
        fs::write(&path, "][").unwrap();
        let mut store = JsonFileStore::with_path(&path);

        let err = store.get("a").unwrap_err();
        assert!(err.is_data_error());

        store.set("a", "1").unwrap();
        assert_eq!(store.get("a").unwrap(), Some("1".to_string()));
    }

    #[test]
    fn test_persists_across_instances() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("s.json");

        JsonFileStore::with_path(&path).set("k", "v").unwrap();
        let reopened = JsonFileStore::with_path(&path);

        assert_eq!(reopened.get("k").unwrap(), Some("v".to_string()));
    }

    #[test]
    fn test_default_store_path_file_name() {
        let path = default_store_path();
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name == STORE_FILE_NAME || name == "pomodoro-widget.json");
    }
}
