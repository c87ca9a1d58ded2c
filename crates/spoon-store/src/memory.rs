//! In-memory store backend.

use crate::StoreError;
use std::cell::RefCell;
use std::collections::BTreeMap;

/// Ephemeral key-value backend.
///
/// Interior mutability keeps the API identical to [`crate::FileStore`];
/// the engine is single-threaded, so a `RefCell` is all that's needed.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<BTreeMap<String, Vec<u8>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    pub(crate) fn set_raw(&self, key: &str, bytes: &[u8]) -> Result<(), StoreError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), bytes.to_vec());
        Ok(())
    }

    pub(crate) fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }

    pub(crate) fn exists(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.entries.borrow().contains_key(key))
    }

    pub(crate) fn keys(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.entries.borrow().keys().cloned().collect())
    }
}
