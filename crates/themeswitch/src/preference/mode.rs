//! Effective color mode.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The binary mode a surface renders.
///
/// Unlike [`ThemePreference`](super::ThemePreference) this is never persisted;
/// it is recomputed whenever the preference or the device scheme changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Light,
    Dark,
}

impl ColorMode {
    /// Maps a "prefers dark" query result to a mode.
    pub fn from_dark(is_dark: bool) -> Self {
        if is_dark {
            ColorMode::Dark
        } else {
            ColorMode::Light
        }
    }

    pub fn is_dark(self) -> bool {
        self == ColorMode::Dark
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ColorMode::Light => "light",
            ColorMode::Dark => "dark",
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
