//! In-memory preference store.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use super::{PreferenceStore, StoreError};

/// A preference store kept in memory.
///
/// Clones share the same entries, so a test (or an embedding application)
/// can hand one clone to the controller and inspect the other.
///
/// # Example
///
/// ```rust
/// use themeswitch::{MemoryStore, PreferenceStore};
///
/// let store = MemoryStore::new().with_entry("theme", "dark");
/// let mut handle = store.clone();
/// handle.set("theme", "system").unwrap();
///
/// assert_eq!(store.value("theme").as_deref(), Some("system"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
    reject_writes: Rc<Cell<bool>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds an entry, returning the store for chaining.
    pub fn with_entry(self, key: &str, value: &str) -> Self {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self
    }

    /// Returns the current value under `key`.
    pub fn value(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    /// Makes subsequent writes fail with [`StoreError::Unavailable`].
    ///
    /// Simulates a full or disabled store.
    pub fn reject_writes(&self, reject: bool) {
        self.reject_writes.set(reject);
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.value(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.reject_writes.get() {
            return Err(StoreError::Unavailable("writes rejected".to_string()));
        }
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
