//! Durable key/value storage backends for the persisted credential bundle.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session store writes two keys together and clears them together, so
//! the trait only exposes multi-key writes. Each backend makes those writes
//! all-or-nothing from the caller's point of view.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};

/// Storage access failed; the message is backend-specific.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("storage read failed for `{key}`: {message}")]
    Read { key: String, message: String },
    #[error("storage write failed for `{key}`: {message}")]
    Write { key: String, message: String },
}

/// String key/value store with all-or-nothing multi-key mutation.
pub trait Storage {
    /// Read one key. `Ok(None)` means the key is absent.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write every entry, or none of them.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when any entry fails; earlier entries are rolled back.
    fn set_all(&self, entries: &[(&str, &str)]) -> Result<(), StorageError>;

    /// Remove every key, or none of them.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when any removal fails; earlier removals are restored.
    fn remove_all(&self, keys: &[&str]) -> Result<(), StorageError>;
}

impl<S: Storage + ?Sized> Storage for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set_all(&self, entries: &[(&str, &str)]) -> Result<(), StorageError> {
        (**self).set_all(entries)
    }

    fn remove_all(&self, keys: &[&str]) -> Result<(), StorageError> {
        (**self).remove_all(keys)
    }
}

/// In-process storage used by tests and non-browser builds.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed storage with raw entries.
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let map = entries
            .into_iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Self { entries: Mutex::new(map) }
    }

    /// Copy of every stored entry.
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set_all(&self, entries: &[(&str, &str)]) -> Result<(), StorageError> {
        let mut map = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        for (key, value) in entries {
            map.insert((*key).to_owned(), (*value).to_owned());
        }
        Ok(())
    }

    fn remove_all(&self, keys: &[&str]) -> Result<(), StorageError> {
        let mut map = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        for key in keys {
            map.remove(*key);
        }
        Ok(())
    }
}

/// `window.localStorage`, available in the `csr` build only.
///
/// Elsewhere every read reports absence and every write fails with
/// [`StorageError::Unavailable`].
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

#[cfg(feature = "csr")]
fn local_storage() -> Result<web_sys::Storage, StorageError> {
    web_sys::window()
        .ok_or_else(|| StorageError::Unavailable("no window".to_owned()))?
        .local_storage()
        .map_err(|e| StorageError::Unavailable(format!("{e:?}")))?
        .ok_or_else(|| StorageError::Unavailable("localStorage disabled".to_owned()))
}

/// Raw item access with rollback-based multi-key mutation on top.
#[cfg_attr(not(any(feature = "csr", test)), allow(dead_code))]
trait ItemStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, String>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), String>;
    fn remove_item(&self, key: &str) -> Result<(), String>;

    /// Put the recorded prior values back, newest first.
    fn restore(&self, previous: Vec<(&str, Option<String>)>) {
        for (key, prior) in previous.into_iter().rev() {
            let _ = match prior {
                Some(old) => self.set_item(key, &old),
                None => self.remove_item(key),
            };
        }
    }

    fn set_items(&self, entries: &[(&str, &str)]) -> Result<(), StorageError> {
        let mut previous = Vec::with_capacity(entries.len());
        for &(key, value) in entries {
            let prior = self.get_item(key).ok().flatten();
            if let Err(message) = self.set_item(key, value) {
                self.restore(previous);
                return Err(StorageError::Write { key: key.to_owned(), message });
            }
            previous.push((key, prior));
        }
        Ok(())
    }

    fn remove_items(&self, keys: &[&str]) -> Result<(), StorageError> {
        let mut previous = Vec::with_capacity(keys.len());
        for &key in keys {
            let prior = self.get_item(key).ok().flatten();
            if let Err(message) = self.remove_item(key) {
                self.restore(previous);
                return Err(StorageError::Write { key: key.to_owned(), message });
            }
            previous.push((key, prior));
        }
        Ok(())
    }
}

#[cfg(feature = "csr")]
impl ItemStore for web_sys::Storage {
    fn get_item(&self, key: &str) -> Result<Option<String>, String> {
        web_sys::Storage::get_item(self, key).map_err(|e| format!("{e:?}"))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), String> {
        web_sys::Storage::set_item(self, key, value).map_err(|e| format!("{e:?}"))
    }

    fn remove_item(&self, key: &str) -> Result<(), String> {
        web_sys::Storage::remove_item(self, key).map_err(|e| format!("{e:?}"))
    }
}

impl Storage for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        #[cfg(feature = "csr")]
        {
            ItemStore::get_item(&local_storage()?, key)
                .map_err(|message| StorageError::Read { key: key.to_owned(), message })
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
            Ok(None)
        }
    }

    fn set_all(&self, entries: &[(&str, &str)]) -> Result<(), StorageError> {
        #[cfg(feature = "csr")]
        {
            local_storage()?.set_items(entries)
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = entries;
            Err(StorageError::Unavailable("localStorage requires the browser build".to_owned()))
        }
    }

    fn remove_all(&self, keys: &[&str]) -> Result<(), StorageError> {
        #[cfg(feature = "csr")]
        {
            local_storage()?.remove_items(keys)
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = keys;
            Err(StorageError::Unavailable("localStorage requires the browser build".to_owned()))
        }
    }
}
