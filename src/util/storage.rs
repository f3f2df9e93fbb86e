//! Durable key/value slots backing the session and UI preferences.
//!
//! SYSTEM CONTEXT
//! ==============
//! `LocalStorage` is the browser's `window.localStorage`; every browser-only
//! call is centralized here so the session store can stay storage-agnostic.
//! `MemoryStorage` is the in-process stand-in used by tests.
//!
//! TRADE-OFFS
//! ==========
//! Reads are best-effort: an unavailable or throwing store reads as "absent".
//! Writes report failure so callers can log it, but never abort the in-memory
//! update they accompany.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("storage is not available")]
    Unavailable,
    #[error("storage write failed: {0}")]
    Write(String),
}

/// Named string slots that survive a page reload.
pub trait SessionStorage {
    fn get(&self, key: &str) -> Option<String>;

    /// # Errors
    ///
    /// Returns a [`StorageError`] if the value could not be persisted.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// # Errors
    ///
    /// Returns a [`StorageError`] if the slot could not be cleared.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Browser `localStorage`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

#[cfg(feature = "csr")]
impl LocalStorage {
    fn storage() -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok().flatten())
            .ok_or(StorageError::Unavailable)
    }
}

impl SessionStorage for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        #[cfg(feature = "csr")]
        {
            Self::storage().ok()?.get_item(key).ok().flatten()
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
            None
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        #[cfg(feature = "csr")]
        {
            Self::storage()?
                .set_item(key, value)
                .map_err(|e| StorageError::Write(format!("{e:?}")))
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (key, value);
            Err(StorageError::Unavailable)
        }
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        #[cfg(feature = "csr")]
        {
            Self::storage()?
                .remove_item(key)
                .map_err(|e| StorageError::Write(format!("{e:?}")))
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
            Err(StorageError::Unavailable)
        }
    }
}

/// In-process slots. Clones share the same map, so a clone handed to a new
/// store behaves like the same browser profile after a reload.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: Arc<Mutex<HashMap<String, String>>>,
    read_only: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose writes always fail (quota exceeded, private mode).
    pub fn read_only() -> Self {
        Self { read_only: true, ..Self::default() }
    }

    /// Storage pre-seeded with `entries`.
    pub fn with_entries(entries: &[(&str, &str)]) -> Self {
        let storage = Self::new();
        if let Ok(mut slots) = storage.slots.lock() {
            for (key, value) in entries {
                slots.insert((*key).to_owned(), (*value).to_owned());
            }
        }
        storage
    }

    pub fn is_empty(&self) -> bool {
        self.slots.lock().map_or(true, |slots| slots.is_empty())
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.slots.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.read_only {
            return Err(StorageError::Write("read-only storage".to_owned()));
        }
        let mut slots = self.slots.lock().map_err(|_| StorageError::Unavailable)?;
        slots.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        if self.read_only {
            return Err(StorageError::Write("read-only storage".to_owned()));
        }
        let mut slots = self.slots.lock().map_err(|_| StorageError::Unavailable)?;
        slots.remove(key);
        Ok(())
    }
}
