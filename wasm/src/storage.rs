//! Browser `localStorage` as a key-value store

use shared::{KeyValueStore, MemoryStore, StorageError};
use wasm_bindgen::JsValue;

fn unavailable(err: JsValue) -> StorageError {
    StorageError::Unavailable(format!("{:?}", err))
}

/// `window.localStorage`
pub struct LocalStorage {
    storage: web_sys::Storage,
}

impl LocalStorage {
    pub fn open() -> Result<Self, StorageError> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("no window".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(unavailable)?
            .ok_or_else(|| StorageError::Unavailable("localStorage is disabled".to_string()))?;
        Ok(Self { storage })
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage.get_item(key).map_err(unavailable)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage.set_item(key, value).map_err(unavailable)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.storage.remove_item(key).map_err(unavailable)
    }
}

/// `localStorage` when the page has one, page-lifetime memory otherwise
pub fn browser_store() -> Box<dyn KeyValueStore> {
    match LocalStorage::open() {
        Ok(storage) => Box::new(storage),
        Err(e) => {
            tracing::warn!("{}; falling back to in-memory storage", e);
            Box::new(MemoryStore::new())
        }
    }
}
