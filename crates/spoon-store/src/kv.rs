//! Key-value store with automatic serialization.

use crate::{FileStore, MemoryStore, StoreError};
use serde::{de::DeserializeOwned, Serialize};
use std::path::PathBuf;

/// Type-safe store over a durable or in-memory backend.
///
/// Values are JSON-serialized; any type implementing `Serialize` and
/// `DeserializeOwned` can be stored.
#[derive(Debug)]
pub enum Store {
    /// Durable backend: one file per key under a root directory.
    File(FileStore),
    /// Ephemeral backend for tests or persistence-unavailable sessions.
    Memory(MemoryStore),
}

impl Store {
    /// Open a file-backed store rooted at the given directory.
    ///
    /// The directory is created if it does not exist.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let store = Store::open("~/.silver-spoon")?;
    /// ```
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        Ok(Store::File(FileStore::open(root)?))
    }

    /// Open an in-memory store. Nothing survives the process.
    pub fn in_memory() -> Self {
        Store::Memory(MemoryStore::new())
    }

    /// Get a value from the store.
    ///
    /// Returns `None` if the key doesn't exist. Returns an error if the
    /// stored bytes cannot be deserialized into `T`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let settings: Option<PolicySettings> = store.get("silver-spoon-policy")?;
    /// ```
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        match self.get_raw(key)? {
            Some(bytes) => {
                let value: T = serde_json::from_slice(&bytes)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Set a value in the store.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// store.set("silver-spoon-policy", &settings)?;
    /// ```
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(value)?;
        self.set_raw(key, &bytes)
    }

    /// Delete a value from the store. Deleting a missing key is not an error.
    pub fn delete(&self, key: &str) -> Result<(), StoreError> {
        match self {
            Store::File(f) => f.delete(key),
            Store::Memory(m) => m.delete(key),
        }
    }

    /// Check if a key exists in the store.
    pub fn exists(&self, key: &str) -> Result<bool, StoreError> {
        match self {
            Store::File(f) => f.exists(key),
            Store::Memory(m) => m.exists(key),
        }
    }

    /// Get all keys in the store.
    pub fn keys(&self) -> Result<Vec<String>, StoreError> {
        match self {
            Store::File(f) => f.keys(),
            Store::Memory(m) => m.keys(),
        }
    }

    fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        match self {
            Store::File(f) => f.get_raw(key),
            Store::Memory(m) => m.get_raw(key),
        }
    }

    fn set_raw(&self, key: &str, bytes: &[u8]) -> Result<(), StoreError> {
        match self {
            Store::File(f) => f.set_raw(key, bytes),
            Store::Memory(m) => m.set_raw(key, bytes),
        }
    }
}
