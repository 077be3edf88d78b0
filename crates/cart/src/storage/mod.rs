//! Key-value back-ends for persisted cart state.
//!
//! Values are opaque strings (the cart store writes JSON). Reads and writes
//! are synchronous and whole-value; there is no partial update.

mod file;
mod memory;

use std::path::PathBuf;

use thiserror::Error;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Errors raised by a storage back-end.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("storage I/O error at {path}: {source}")]
    Io {
        /// File that was being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Key contains characters the back-end cannot store.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),
}

/// Durable key-value storage scoped to one shopper.
pub trait CartStorage {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the back-end cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Deleting a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the back-end cannot be written.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<T: CartStorage + ?Sized> CartStorage for &mut T {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}
