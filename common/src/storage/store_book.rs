//! Saved store lists, one per actor name.
//!
//! Kept under its own key so that ending a session (which erases the session
//! blob) leaves the list of stores an actor usually visits in place.

use std::collections::BTreeMap;

use crate::model::store::Store;
use crate::storage::{KeyValueStore, StorageError};

/// Storage key of the saved store lists.
pub const STORE_BOOK_KEY: &str = "soh_collection_stores";

type BookMap = BTreeMap<String, Vec<Store>>;

/// Thin service over a [`KeyValueStore`] holding `{actorName: [Store, ...]}`.
pub struct StoreBook<'a, S> {
    store: &'a S,
}

impl<'a, S> StoreBook<'a, S>
where
    S: KeyValueStore,
{
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Stores saved by `actor`, in the order they were added. Unreadable data
    /// reads as an empty list.
    pub fn stores_for(&self, actor: &str) -> Vec<Store> {
        match self.load() {
            Ok(mut book) => book.remove(actor).unwrap_or_default(),
            Err(e) => {
                log::warn!("failed to load saved stores: {e}");
                Vec::new()
            }
        }
    }

    /// Adds `store` unless one with the same bsrn is already saved for
    /// `actor`. Returns whether the list changed.
    pub fn add(&self, actor: &str, store: Store) -> bool {
        let mut book = match self.load() {
            Ok(book) => book,
            Err(e) => {
                // Overwriting would throw away every other actor's list.
                log::warn!("not saving store {}: {e}", store.bsrn);
                return false;
            }
        };
        let stores = book.entry(actor.to_string()).or_default();
        if stores.iter().any(|s| s.same_store(&store)) {
            return false;
        }
        stores.push(store);
        self.save(&book)
    }

    /// Removes the store with `bsrn` from `actor`'s list.
    pub fn remove(&self, actor: &str, bsrn: &str) -> bool {
        let Ok(mut book) = self.load() else {
            return false;
        };
        let Some(stores) = book.get_mut(actor) else {
            return false;
        };
        let before = stores.len();
        stores.retain(|s| !s.has_bsrn(bsrn));
        if stores.len() == before {
            return false;
        }
        self.save(&book)
    }

    fn load(&self) -> Result<BookMap, StorageError> {
        match self.store.load_raw(STORE_BOOK_KEY) {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(StorageError::NotFound) => Ok(BookMap::new()),
            Err(e) => Err(e),
        }
    }

    fn save(&self, book: &BookMap) -> bool {
        let result = serde_json::to_string(book)
            .map_err(StorageError::from)
            .and_then(|raw| self.store.save_raw(STORE_BOOK_KEY, &raw));
        if let Err(e) = &result {
            log::warn!("failed to save stores: {e}");
        }
        result.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn add_dedups_by_bsrn_per_actor() {
        let mem = MemoryStore::new();
        let book = StoreBook::new(&mem);
        assert!(book.add("Asha", Store::new("Glow", "S1")));
        assert!(!book.add("Asha", Store::new("Glow again", " S1")));
        assert!(book.add("Ravi", Store::new("Glow", "S1")));
        assert!(book.add("Asha", Store::new("Shine", "S2")));

        let names: Vec<_> = book.stores_for("Asha").into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["Glow", "Shine"]);
        assert_eq!(book.stores_for("Ravi").len(), 1);
        assert!(book.stores_for("Nobody").is_empty());
    }

    #[test]
    fn remove_only_touches_one_actor() {
        let mem = MemoryStore::new();
        let book = StoreBook::new(&mem);
        book.add("Asha", Store::new("Glow", "S1"));
        book.add("Ravi", Store::new("Glow", "S1"));
        assert!(book.remove("Asha", "S1"));
        assert!(!book.remove("Asha", "S1"));
        assert!(book.stores_for("Asha").is_empty());
        assert_eq!(book.stores_for("Ravi").len(), 1);
    }

    #[test]
    fn corrupt_book_is_not_overwritten() {
        let mem = MemoryStore::new();
        mem.save_raw(STORE_BOOK_KEY, "{not json").unwrap();
        let book = StoreBook::new(&mem);
        assert!(book.stores_for("Asha").is_empty());
        assert!(!book.add("Asha", Store::new("Glow", "S1")));
        assert_eq!(mem.get(STORE_BOOK_KEY).as_deref(), Some("{not json"));
    }
}
