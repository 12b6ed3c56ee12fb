//! Key/value storage port.
//!
//! The browser build plugs `localStorage` in; tests and native tools use
//! [`MemoryStore`]. Values are strings because that is what the browser
//! store holds.

pub mod store_book;

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use thiserror::Error;

/// Error type for storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Key not present in the store.
    #[error("not found")]
    NotFound,
    /// The backing store refused the operation (quota, privacy mode, ...).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    /// A stored value could not be (de)serialized.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// String blobs keyed by logical name.
pub trait KeyValueStore {
    /// Returns `NotFound` when the key is missing.
    fn load_raw(&self, key: &str) -> Result<String, StorageError>;
    fn save_raw(&self, key: &str, data: &str) -> Result<(), StorageError>;
    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// In-memory store. Clones share the same entries, which lets a test hand
/// one clone to an engine and keep the other to inspect or "reload" from.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.borrow().contains_key(key)
    }
}

impl KeyValueStore for MemoryStore {
    fn load_raw(&self, key: &str) -> Result<String, StorageError> {
        self.get(key).ok_or(StorageError::NotFound)
    }

    fn save_raw(&self, key: &str, data: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), data.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_entries() {
        let a = MemoryStore::new();
        let b = a.clone();
        a.save_raw("k", "v").unwrap();
        assert_eq!(b.load_raw("k").unwrap(), "v");
        b.remove("k").unwrap();
        assert!(matches!(a.load_raw("k"), Err(StorageError::NotFound)));
        assert!(b.remove("k").is_ok());
    }
}
