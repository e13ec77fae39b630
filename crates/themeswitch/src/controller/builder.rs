//! Builder for [`ThemeController`].

use std::time::Duration;

use super::{SetupError, ThemeController, DEFAULT_ACKNOWLEDGMENT, DEFAULT_STORAGE_KEY};
use crate::device::DeviceSchemeSource;
use crate::store::PreferenceStore;
use crate::surface::ThemeSurface;

/// Assembles a [`ThemeController`] from its capabilities.
///
/// The store, device source and surface are required; the storage key
/// defaults to [`DEFAULT_STORAGE_KEY`] and the acknowledgment duration to
/// [`DEFAULT_ACKNOWLEDGMENT`].
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use themeswitch::{ColorMode, ManualScheme, MemoryStore, RecordingSurface, ThemeController};
///
/// let controller = ThemeController::builder()
///     .storage_key("site-theme")
///     .acknowledgment(Duration::from_millis(150))
///     .store(MemoryStore::new())
///     .device(ManualScheme::new(ColorMode::Light))
///     .surface(RecordingSurface::new())
///     .build()
///     .unwrap();
///
/// assert_eq!(controller.storage_key(), "site-theme");
/// ```
#[derive(Default)]
pub struct ThemeControllerBuilder {
    storage_key: Option<String>,
    acknowledgment: Option<Duration>,
    store: Option<Box<dyn PreferenceStore>>,
    device: Option<Box<dyn DeviceSchemeSource>>,
    surface: Option<Box<dyn ThemeSurface>>,
}

impl ThemeControllerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key under which the preference is stored.
    pub fn storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = Some(key.into());
        self
    }

    /// How long the post-toggle acknowledgment lasts.
    pub fn acknowledgment(mut self, duration: Duration) -> Self {
        self.acknowledgment = Some(duration);
        self
    }

    pub fn store(mut self, store: impl PreferenceStore + 'static) -> Self {
        self.store = Some(Box::new(store));
        self
    }

    pub fn device(mut self, device: impl DeviceSchemeSource + 'static) -> Self {
        self.device = Some(Box::new(device));
        self
    }

    pub fn surface(mut self, surface: impl ThemeSurface + 'static) -> Self {
        self.surface = Some(Box::new(surface));
        self
    }

    /// Builds the controller. It still needs [`ThemeController::initialize`].
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::Missing`] if a capability was not supplied, or
    /// [`SetupError::EmptyKey`] for an empty storage key.
    pub fn build(self) -> Result<ThemeController, SetupError> {
        let storage_key = self
            .storage_key
            .unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_string());
        if storage_key.is_empty() {
            return Err(SetupError::EmptyKey);
        }

        let store = self.store.ok_or(SetupError::Missing("store"))?;
        let device = self.device.ok_or(SetupError::Missing("device scheme source"))?;
        let surface = self.surface.ok_or(SetupError::Missing("surface"))?;

        Ok(ThemeController::from_parts(
            storage_key,
            self.acknowledgment.unwrap_or(DEFAULT_ACKNOWLEDGMENT),
            store,
            device,
            surface,
        ))
    }
}
