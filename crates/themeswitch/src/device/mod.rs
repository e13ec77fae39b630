//! Device color-scheme signal.
//!
//! A [`DeviceSchemeSource`] answers "does the device prefer dark right now?"
//! and notifies subscribers when that answer changes. Two adapters live here:
//!
//! - [`ManualScheme`]: set by hand; used by tests and by hosts that receive
//!   the signal through their own event loop
//! - [`OsScheme`]: asks the operating system via `dark-light` and notifies on
//!   [`poll`](OsScheme::poll)

mod manual;
mod os;

pub use manual::ManualScheme;
pub use os::{detect_scheme, reset_scheme_detector, set_scheme_detector, OsScheme, SchemeDetector};

use crate::preference::ColorMode;
use crate::subscription::Subscription;

/// Callback invoked with the device's new scheme.
pub type SchemeListener = Box<dyn FnMut(ColorMode)>;

/// Source of the device's preferred color scheme.
///
/// Platforms that cannot answer the query report [`ColorMode::Light`].
pub trait DeviceSchemeSource {
    /// The scheme the device currently prefers.
    fn current(&self) -> ColorMode;

    /// Registers `listener` to be called whenever the scheme changes.
    fn subscribe(&mut self, listener: SchemeListener) -> Subscription;

    /// Removes a listener registered with [`subscribe`](Self::subscribe).
    fn unsubscribe(&mut self, subscription: Subscription);
}
