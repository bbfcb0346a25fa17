//! Key/value persistence for settings and progress.
//!
//! Records are stored as JSON text under a string key, one document per
//! key, the same way a browser's local storage would hold them. Two
//! implementations are provided:
//!
//! - [`JsonFileStore`]: a single JSON file on disk (the default)
//! - [`MemoryStore`]: an in-process map with fault injection, for tests
//!   and headless drivers
//!
//! All writes are synchronous. Readers must treat a missing or unparsable
//! value as "use defaults" rather than as an error.

mod error;
mod file;
mod memory;

pub use error::StorageError;
pub use file::{default_store_path, JsonFileStore};
pub use memory::MemoryStore;

/// Key of the persisted settings record.
pub const SETTINGS_KEY: &str = "pomodoroSettings";

/// Key of the persisted progress record.
pub const PROGRESS_KEY: &str = "pomodoroProgress";

/// Durable key/value storage.
pub trait PersistenceStore {
    /// Returns the raw value stored under `key`, or `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<T: PersistenceStore + ?Sized> PersistenceStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

/// Reads `key` and parses it as a JSON value.
///
/// Any failure (read error, missing key, invalid JSON) yields `None`; the
/// read error is logged.
pub fn read_json(store: &dyn PersistenceStore, key: &str) -> Option<serde_json::Value> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!("Failed to read '{}': {}", key, e);
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("Ignoring malformed '{}' record: {}", key, e);
            None
        }
    }
}

/// Serializes `value` as JSON and stores it under `key`.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn write_json<T: serde::Serialize>(
    store: &mut dyn PersistenceStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value)
        .map_err(|e| StorageError::Serialize(key.to_string(), e.to_string()))?;
    store.set(key, &raw)
}
