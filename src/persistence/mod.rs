//! Snapshot persistence
//!
//! Features:
//! - Key-value store abstraction (LocalStorage on web, files on native, memory in tests)
//! - JSON snapshot under a fixed key
//! - Corruption detection (the caller decides how to recover)

mod memory;

pub use memory::MemoryStore;

use crate::consts::STORAGE_KEY;
use crate::error::{PersistenceError, StoreError};
use crate::sim::Snapshot;

/// String key-value storage
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

impl<K: KeyValueStore + ?Sized> KeyValueStore for Box<K> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}

/// Saves and loads the simulation snapshot through a [`KeyValueStore`]
#[derive(Debug, Clone)]
pub struct SnapshotStore<K> {
    store: K,
    key: String,
}

impl<K: KeyValueStore> SnapshotStore<K> {
    pub fn new(store: K) -> Self {
        Self::with_key(store, STORAGE_KEY)
    }

    pub fn with_key(store: K, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Underlying store (e.g. for settings under another key)
    pub fn inner(&self) -> &K {
        &self.store
    }

    pub fn inner_mut(&mut self) -> &mut K {
        &mut self.store
    }

    /// `Ok(None)` when nothing is saved; `Err` with [`PersistenceError::is_corrupt`]
    /// when the saved data can't be parsed.
    pub fn load(&self) -> Result<Option<Snapshot>, PersistenceError> {
        let Some(json) = self.store.get(&self.key)? else {
            return Ok(None);
        };
        let snapshot = Snapshot::from_json(&json)?;
        Ok(Some(snapshot))
    }

    pub fn save(&mut self, snapshot: &Snapshot) -> Result<(), PersistenceError> {
        let json = snapshot.to_json().map_err(PersistenceError::Encode)?;
        self.store.set(&self.key, &json)?;
        Ok(())
    }

    pub fn clear(&mut self) -> Result<(), PersistenceError> {
        self.store.remove(&self.key)?;
        Ok(())
    }
}
