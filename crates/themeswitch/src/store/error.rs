//! Preference store errors.

use std::io;
use std::path::PathBuf;

/// Error returned by a [`PreferenceStore`](super::PreferenceStore).
///
/// The controller never surfaces these to the user; it logs them and carries
/// on with the in-memory preference.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backing file could not be read or written.
    #[error("failed to access preference file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The backing file exists but is not a JSON object of strings.
    #[error("preference file {} is malformed", path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// The store refused the operation (quota, private mode, missing API).
    #[error("preference store unavailable: {0}")]
    Unavailable(String),
}
