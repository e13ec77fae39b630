//! Durable key-value storage for the preference.
//!
//! The controller only needs two operations: read a string by key and write
//! a string by key. [`PreferenceStore`] captures exactly that, so the same
//! controller can persist to memory, a JSON file, or browser `localStorage`.

mod error;
mod file;
mod memory;

pub use error::StoreError;
pub use file::FileStore;
pub use memory::MemoryStore;

/// A string key-value store scoped to one application.
pub trait PreferenceStore {
    /// Reads the value stored under `key`, or `None` if it was never written.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Writes `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<S: PreferenceStore + ?Sized> PreferenceStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}
