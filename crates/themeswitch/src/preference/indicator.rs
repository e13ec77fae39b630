//! Toggle indicator contents.

use serde::Serialize;

use super::preference::ThemePreference;

/// What the toggle control displays.
///
/// The indicator describes the action the next activation performs, not the
/// mode currently on screen: while `Dark` is selected it offers to switch to
/// the system default, and so on around the cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Indicator {
    /// Glyph shown on the control.
    pub icon: &'static str,
    /// Accessible label describing the action.
    pub label: &'static str,
    /// The preference the next activation selects.
    pub next: ThemePreference,
}

impl Indicator {
    pub fn for_preference(preference: ThemePreference) -> Self {
        let (icon, label) = match preference {
            ThemePreference::Dark => ("\u{2600}\u{fe0f}", "Switch to system default theme"),
            ThemePreference::Light => ("\u{1f319}", "Switch to dark mode"),
            ThemePreference::System => ("\u{1f5a5}\u{fe0f}", "Switch to light mode"),
        };
        Self {
            icon,
            label,
            next: preference.next(),
        }
    }
}
