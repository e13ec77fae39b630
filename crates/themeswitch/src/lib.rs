//! # Themeswitch - light, dark, or follow the device
//!
//! `themeswitch` keeps a tri-state theme preference ([`ThemePreference`]),
//! persists it in a key-value store, and reconciles it with the device's
//! live color scheme to produce a binary [`ColorMode`].
//!
//! ## Core Concepts
//!
//! - [`ThemePreference`]: `Light`, `Dark` or `System`, cycled in that order
//! - [`ColorMode`]: the effective, rendered mode (never stored)
//! - [`Indicator`]: icon and label for the toggle control, describing the next action
//! - [`ThemeController`]: owns the preference and drives a [`ThemeSurface`]
//!
//! The controller talks to the outside world only through four narrow traits:
//!
//! | Trait | Role | Adapters |
//! |-------|------|----------|
//! | [`PreferenceStore`] | durable key-value storage | [`MemoryStore`], [`FileStore`] |
//! | [`DeviceSchemeSource`] | device color scheme + change notifications | [`ManualScheme`], [`OsScheme`] |
//! | [`ActivationSource`] | user activation of the toggle | [`ManualActivation`] |
//! | [`ThemeSurface`] | renders mode and indicator | [`RecordingSurface`] |
//!
//! With the `web` feature, [`web`] adds browser adapters backed by
//! `localStorage`, `matchMedia` and the DOM.
//!
//! ## Quick Start
//!
//! ```rust
//! use themeswitch::{
//!     ColorMode, ManualScheme, MemoryStore, RecordingSurface, ThemeController, ThemePreference,
//! };
//!
//! let store = MemoryStore::new();
//! let device = ManualScheme::new(ColorMode::Dark);
//! let surface = RecordingSurface::new();
//!
//! let mut controller = ThemeController::builder()
//!     .store(store.clone())
//!     .device(device.clone())
//!     .surface(surface.clone())
//!     .build()
//!     .unwrap();
//!
//! controller.initialize();
//! assert_eq!(controller.preference(), ThemePreference::System);
//! assert_eq!(surface.mode(), Some(ColorMode::Dark));
//!
//! controller.cycle();
//! assert_eq!(store.value("theme").as_deref(), Some("light"));
//! assert_eq!(surface.mode(), Some(ColorMode::Light));
//! ```
//!
//! ## Threading
//!
//! Everything here is single-threaded. Callbacks run to completion on the
//! thread that triggered them and the controller is `!Send`.

mod activation;
mod controller;
mod device;
mod preference;
mod store;
mod subscription;
mod surface;

#[cfg(feature = "web")]
pub mod web;

pub use activation::{ActivationListener, ActivationSource, ManualActivation};
pub use controller::{
    SetupError, ThemeController, ThemeControllerBuilder, DEFAULT_ACKNOWLEDGMENT,
    DEFAULT_STORAGE_KEY,
};
pub use device::{
    detect_scheme, reset_scheme_detector, set_scheme_detector, DeviceSchemeSource, ManualScheme,
    OsScheme, SchemeDetector, SchemeListener,
};
pub use preference::{ColorMode, Indicator, ParsePreferenceError, ThemePreference};
pub use store::{FileStore, MemoryStore, PreferenceStore, StoreError};
pub use subscription::Subscription;
pub use surface::{RecordingSurface, SurfaceEvent, ThemeSurface};
