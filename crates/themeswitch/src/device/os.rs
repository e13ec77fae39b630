//! Operating-system color scheme via `dark-light`.

use dark_light::{detect as detect_os_theme, Mode as OsThemeMode};
use once_cell::sync::Lazy;
use std::cell::Cell;
use std::rc::Rc;
use std::sync::{Mutex, PoisonError};

use super::{DeviceSchemeSource, SchemeListener};
use crate::preference::ColorMode;
use crate::subscription::{ListenerSet, Subscription};

/// Function used to query the device scheme.
pub type SchemeDetector = fn() -> ColorMode;

static SCHEME_DETECTOR: Lazy<Mutex<SchemeDetector>> = Lazy::new(|| Mutex::new(os_scheme_detector));

/// Overrides the detector used by [`OsScheme`] and [`detect_scheme`].
///
/// This is process-wide; it is meant for tests and for forcing a scheme on
/// platforms where detection is unreliable.
pub fn set_scheme_detector(detector: SchemeDetector) {
    let mut guard = SCHEME_DETECTOR
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    *guard = detector;
}

/// Restores the operating-system detector.
pub fn reset_scheme_detector() {
    set_scheme_detector(os_scheme_detector);
}

/// Queries the active detector.
pub fn detect_scheme() -> ColorMode {
    let detector = *SCHEME_DETECTOR
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    detector()
}

fn os_scheme_detector() -> ColorMode {
    match detect_os_theme() {
        OsThemeMode::Dark => ColorMode::Dark,
        OsThemeMode::Light => ColorMode::Light,
    }
}

struct State {
    last: Cell<ColorMode>,
    listeners: ListenerSet<ColorMode>,
}

/// Device scheme reported by the operating system.
///
/// The OS offers no portable change notification, so the host calls
/// [`poll`](Self::poll) periodically; listeners fire only when the detected
/// scheme differs from the previous poll. Clones share state.
#[derive(Clone)]
pub struct OsScheme {
    state: Rc<State>,
}

impl OsScheme {
    /// Creates a source primed with the scheme detected right now.
    pub fn new() -> Self {
        Self {
            state: Rc::new(State {
                last: Cell::new(detect_scheme()),
                listeners: ListenerSet::new(),
            }),
        }
    }

    /// Re-detects the scheme and notifies listeners if it changed.
    ///
    /// Returns the new scheme when a change was observed.
    pub fn poll(&self) -> Option<ColorMode> {
        let detected = detect_scheme();
        if self.state.last.replace(detected) == detected {
            return None;
        }
        tracing::debug!(scheme = %detected, "device color scheme changed");
        self.state.listeners.emit(detected);
        Some(detected)
    }
}

impl Default for OsScheme {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for OsScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OsScheme")
            .field("last", &self.state.last.get())
            .finish_non_exhaustive()
    }
}

impl DeviceSchemeSource for OsScheme {
    fn current(&self) -> ColorMode {
        detect_scheme()
    }

    fn subscribe(&mut self, listener: SchemeListener) -> Subscription {
        self.state.listeners.add(listener)
    }

    fn unsubscribe(&mut self, subscription: Subscription) {
        self.state.listeners.remove(subscription);
    }
}
