use common::storage::{KeyValueStore, StorageError};
use wasm_bindgen::JsValue;
use web_sys::Storage;

/// `window.localStorage`. Every call looks the storage object up again, so a
/// browser that refuses storage (private mode, quota) yields `Unavailable`
/// errors instead of a panic at startup.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageStore;

fn unavailable(e: JsValue) -> StorageError {
    StorageError::Unavailable(format!("{:?}", e))
}

impl LocalStorageStore {
    fn storage(&self) -> Result<Storage, StorageError> {
        web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("no window".to_string()))?
            .local_storage()
            .map_err(unavailable)?
            .ok_or_else(|| StorageError::Unavailable("localStorage disabled".to_string()))
    }
}

impl KeyValueStore for LocalStorageStore {
    fn load_raw(&self, key: &str) -> Result<String, StorageError> {
        self.storage()?
            .get_item(key)
            .map_err(unavailable)?
            .ok_or(StorageError::NotFound)
    }

    fn save_raw(&self, key: &str, data: &str) -> Result<(), StorageError> {
        self.storage()?.set_item(key, data).map_err(unavailable)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.storage()?.remove_item(key).map_err(unavailable)
    }
}
