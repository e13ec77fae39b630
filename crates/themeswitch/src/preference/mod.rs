//! Theme preference model.
//!
//! This module provides:
//!
//! - [`ThemePreference`]: the persisted tri-state choice and its cycle
//! - [`ColorMode`]: the binary mode actually rendered
//! - [`Indicator`]: what the toggle control shows for a given preference
//!
//! Only [`ThemePreference`] is ever stored. [`ColorMode`] is always derived
//! from the preference and the device scheme via [`ThemePreference::resolve`].

mod indicator;
mod mode;
#[allow(clippy::module_inception)]
mod preference;

pub use indicator::Indicator;
pub use mode::ColorMode;
pub use preference::{ParsePreferenceError, ThemePreference};
