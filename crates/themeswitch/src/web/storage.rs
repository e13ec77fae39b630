//! `localStorage`-backed preference store.

use web_sys::Storage;

use super::describe_js;
use crate::store::{PreferenceStore, StoreError};

/// Preference store backed by the origin's `localStorage`.
///
/// Values survive reloads and navigation between pages of the same origin,
/// with no expiry.
pub struct LocalStorageStore {
    storage: Storage,
}

impl LocalStorageStore {
    /// Opens `window.localStorage`.
    ///
    /// # Errors
    ///
    /// [`StoreError::Unavailable`] if there is no window or storage is disabled.
    pub fn new() -> Result<Self, StoreError> {
        let window =
            web_sys::window().ok_or_else(|| StoreError::Unavailable("no window".to_string()))?;
        let storage = window
            .local_storage()
            .map_err(|e| StoreError::Unavailable(describe_js(&e)))?
            .ok_or_else(|| StoreError::Unavailable("localStorage is disabled".to_string()))?;
        Ok(Self { storage })
    }
}

impl PreferenceStore for LocalStorageStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.storage
            .get_item(key)
            .map_err(|e| StoreError::Unavailable(describe_js(&e)))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.storage
            .set_item(key, value)
            .map_err(|e| StoreError::Unavailable(describe_js(&e)))
    }
}
