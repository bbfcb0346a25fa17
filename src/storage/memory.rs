//! In-memory store with fault injection.

use std::collections::HashMap;

use super::error::StorageError;
use super::PersistenceStore;

/// A [`PersistenceStore`] backed by a `HashMap`.
///
/// Reads and writes can be made to fail on demand, which is how storage
/// faults are simulated in tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    fail_reads: bool,
    fail_writes: bool,
    write_count: usize,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_reads(&mut self, fail: bool) {
        self.fail_reads = fail;
    }

    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Number of successful writes so far.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.write_count
    }

    /// Returns the raw stored value, bypassing fault injection.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl PersistenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.fail_reads {
            return Err(StorageError::Unavailable("injected read failure".to_string()));
        }
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::Unavailable("injected write failure".to_string()));
        }
        self.entries.insert(key.to_string(), value.to_string());
        self.write_count += 1;
        Ok(())
    }
}
