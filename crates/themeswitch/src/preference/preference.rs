//! The persisted tri-state preference.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::indicator::Indicator;
use super::mode::ColorMode;

/// The user's theme choice.
///
/// `Light` and `Dark` pin the rendered mode; `System` follows the device.
/// Activating the toggle moves through a fixed cycle:
///
/// | current | next |
/// |---------|------|
/// | `Light` | `Dark` |
/// | `Dark` | `System` |
/// | `System` | `Light` |
///
/// # Example
///
/// ```rust
/// use themeswitch::{ColorMode, ThemePreference};
///
/// let pref = ThemePreference::from_stored(Some("dark"));
/// assert_eq!(pref.next(), ThemePreference::System);
///
/// // Missing or corrupted values fall back to following the device
/// assert_eq!(ThemePreference::from_stored(None), ThemePreference::System);
/// assert_eq!(ThemePreference::from_stored(Some("sepia")), ThemePreference::System);
///
/// assert_eq!(ThemePreference::System.resolve(ColorMode::Dark), ColorMode::Dark);
/// assert_eq!(ThemePreference::Light.resolve(ColorMode::Dark), ColorMode::Light);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    Light,
    Dark,
    #[default]
    System,
}

impl ThemePreference {
    /// All preferences, in cycle order starting from `Light`.
    pub const ALL: [ThemePreference; 3] = [
        ThemePreference::Light,
        ThemePreference::Dark,
        ThemePreference::System,
    ];

    /// Returns the successor in the toggle cycle.
    pub fn next(self) -> Self {
        match self {
            ThemePreference::Light => ThemePreference::Dark,
            ThemePreference::Dark => ThemePreference::System,
            ThemePreference::System => ThemePreference::Light,
        }
    }

    /// The string written to the preference store.
    pub fn as_str(self) -> &'static str {
        match self {
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
            ThemePreference::System => "system",
        }
    }

    /// Interprets a raw stored value.
    ///
    /// Never fails: an absent or unrecognised value yields `System`.
    pub fn from_stored(value: Option<&str>) -> Self {
        value
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_default()
    }

    /// Computes the effective mode given the device's current scheme.
    pub fn resolve(self, device: ColorMode) -> ColorMode {
        match self {
            ThemePreference::Light => ColorMode::Light,
            ThemePreference::Dark => ColorMode::Dark,
            ThemePreference::System => device,
        }
    }

    /// Whether the device scheme influences the rendered mode.
    pub fn follows_device(self) -> bool {
        self == ThemePreference::System
    }

    /// The indicator shown on the toggle control for this preference.
    pub fn indicator(self) -> Indicator {
        Indicator::for_preference(self)
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not one of `light`, `dark` or `system`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown theme preference '{0}' (expected light, dark or system)")]
pub struct ParsePreferenceError(pub String);

impl FromStr for ThemePreference {
    type Err = ParsePreferenceError;

    /// Parses the exact lowercase forms; anything else is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(ThemePreference::Light),
            "dark" => Ok(ThemePreference::Dark),
            "system" => Ok(ThemePreference::System),
            other => Err(ParsePreferenceError(other.to_string())),
        }
    }
}
