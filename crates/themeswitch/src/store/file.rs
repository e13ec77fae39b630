//! JSON-file preference store.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::{PreferenceStore, StoreError};

/// A preference store backed by a JSON object on disk.
///
/// The file holds a flat object of string values, for example
/// `{"theme": "dark"}`. It is created (along with missing parent
/// directories) on the first write, so a missing file reads as empty.
///
/// Writes go to a sibling temporary file which is then renamed over the
/// target, so a crash never leaves a half-written store behind. A file that
/// does not parse reports [`StoreError::Format`] on reads, and the next write
/// replaces it.
///
/// # Example
///
/// ```rust
/// use themeswitch::{FileStore, PreferenceStore};
///
/// let dir = tempfile::tempdir().unwrap();
/// let mut store = FileStore::new(dir.path().join("prefs.json"));
///
/// assert_eq!(store.get("theme").unwrap(), None);
/// store.set("theme", "dark").unwrap();
///
/// let reopened = FileStore::new(dir.path().join("prefs.json"));
/// assert_eq!(reopened.get("theme").unwrap().as_deref(), Some("dark"));
/// ```
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => return Err(self.io_error(source)),
        };

        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&content).map_err(|source| StoreError::Format {
            path: self.path.clone(),
            source,
        })
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
            }
        }

        let json = serde_json::to_string_pretty(entries).map_err(|source| StoreError::Format {
            path: self.path.clone(),
            source,
        })?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json + "\n").map_err(|e| self.io_error(e))?;
        fs::rename(&tmp, &self.path).map_err(|e| self.io_error(e))
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = match self.read_entries() {
            Ok(entries) => entries,
            Err(e @ StoreError::Format { .. }) => {
                tracing::warn!(error = %e, "replacing unreadable preference file");
                BTreeMap::new()
            }
            Err(e) => return Err(e),
        };
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries)
    }
}
