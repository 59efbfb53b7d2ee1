//! Client-side persistence
//!
//! A passive key-value mirror (browser `localStorage`, a JSON file on
//! disk, or plain memory) and the selected-business store built on it.

use std::collections::HashMap;

use thiserror::Error;

use crate::models::Business;

/// Key under which the selected business is stored
pub const SELECTED_BUSINESS_KEY: &str = "selectedBusiness";

const PROBE_KEY: &str = "__test__";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Stored value is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// String key-value storage
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
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

/// Storage that lives only as long as the process (or page)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Durable storage when it works, session-only memory otherwise
#[derive(Debug)]
pub enum Persistence<S> {
    Durable(S),
    Session(MemoryStore),
}

impl<S: KeyValueStore> Persistence<S> {
    /// Probe `store` with a write/delete round trip; fall back to memory on failure
    pub fn probe(mut store: S) -> Self {
        let probe = store
            .set(PROBE_KEY, PROBE_KEY)
            .and_then(|_| store.remove(PROBE_KEY));
        match probe {
            Ok(()) => Persistence::Durable(store),
            Err(e) => {
                tracing::warn!(
                    "Storage is not available ({}). Selections will not persist across sessions.",
                    e
                );
                Persistence::Session(MemoryStore::new())
            }
        }
    }

    pub fn is_durable(&self) -> bool {
        matches!(self, Persistence::Durable(_))
    }
}

impl<S: KeyValueStore> KeyValueStore for Persistence<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match self {
            Persistence::Durable(s) => s.get(key),
            Persistence::Session(s) => s.get(key),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        match self {
            Persistence::Durable(s) => s.set(key, value),
            Persistence::Session(s) => s.set(key, value),
        }
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        match self {
            Persistence::Durable(s) => s.remove(key),
            Persistence::Session(s) => s.remove(key),
        }
    }
}

/// The single business currently in focus, mirrored to storage
#[derive(Debug)]
pub struct SelectionStore<S> {
    backend: Persistence<S>,
    selected: Option<Business>,
}

impl<S: KeyValueStore> SelectionStore<S> {
    /// Open the store, restoring a previously saved selection if one parses
    pub fn open(store: S) -> Self {
        let backend = Persistence::probe(store);
        let selected = match backend.get(SELECTED_BUSINESS_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Business>(&raw) {
                Ok(business) => {
                    tracing::debug!(business_id = business.id, "restored selected business");
                    Some(business)
                }
                Err(e) => {
                    tracing::error!("Failed to load business from storage: {}", e);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                tracing::error!("Failed to load business from storage: {}", e);
                None
            }
        };
        Self { backend, selected }
    }

    pub fn selected(&self) -> Option<&Business> {
        self.selected.as_ref()
    }

    /// Replace the selection; storage failures are logged, never returned
    pub fn set_selected(&mut self, business: Option<Business>) {
        tracing::debug!(business_id = business.as_ref().map(|b| b.id), "setting selected business");
        let saved = match &business {
            Some(b) => serde_json::to_string(b)
                .map_err(StorageError::from)
                .and_then(|raw| self.backend.set(SELECTED_BUSINESS_KEY, &raw)),
            None => self.backend.remove(SELECTED_BUSINESS_KEY),
        };
        if let Err(e) = saved {
            tracing::error!("Failed to save business to storage: {}", e);
        }
        self.selected = business;
    }

    pub fn is_durable(&self) -> bool {
        self.backend.is_durable()
    }
}
