//! In-memory storage.

use std::collections::HashMap;

use super::{CartStorage, StorageError};

/// Storage held in a `HashMap`.
///
/// The storefront loads the session's cart value into one of these, runs a
/// command against it and writes the result back to the session.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
}

impl MemoryStorage {
    /// Empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-populated with one value.
    #[must_use]
    pub fn with_value(key: &str, value: impl Into<String>) -> Self {
        let mut storage = Self::new();
        storage.values.insert(key.to_owned(), value.into());
        storage
    }

    /// Take the value stored under `key` out of the storage.
    pub fn take(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }
}

impl CartStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.values.remove(key);
        Ok(())
    }
}
