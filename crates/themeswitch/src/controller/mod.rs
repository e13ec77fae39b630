//! The theme controller.
//!
//! [`ThemeController`] owns the [`ThemePreference`], keeps the surface's mode
//! and indicator consistent with it, and writes every change through to the
//! preference store.
//!
//! # Lifecycle
//!
//! 1. [`ThemeController::builder`] wires the store, device source and surface.
//! 2. [`initialize`](ThemeController::initialize) reads the stored preference,
//!    renders it, and subscribes to device scheme changes.
//! 3. [`cycle`](ThemeController::cycle) (directly or through a bound
//!    [`ActivationSource`]) advances Light → Dark → System → Light.
//! 4. Device changes re-render only while the preference is `System`.
//! 5. [`dispose`](ThemeController::dispose), or dropping the controller,
//!    unregisters every callback.
//!
//! Callbacks registered with sources hold weak references only, so a
//! notification that outlives the controller is a no-op.

mod builder;
mod error;

pub use builder::ThemeControllerBuilder;
pub use error::SetupError;

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use crate::activation::ActivationSource;
use crate::device::DeviceSchemeSource;
use crate::preference::{ColorMode, Indicator, ThemePreference};
use crate::store::PreferenceStore;
use crate::subscription::Subscription;
use crate::surface::ThemeSurface;

/// Key the preference is stored under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "theme";

/// Length of the post-toggle acknowledgment unless configured otherwise.
pub const DEFAULT_ACKNOWLEDGMENT: Duration = Duration::from_millis(300);

#[derive(Debug)]
struct Settings {
    storage_key: String,
    acknowledgment: Duration,
}

/// State reachable from source callbacks.
struct Shared {
    settings: Rc<Settings>,
    preference: ThemePreference,
    effective: ColorMode,
    store: Box<dyn PreferenceStore>,
    device: Box<dyn DeviceSchemeSource>,
    surface: Box<dyn ThemeSurface>,
}

impl Shared {
    fn load(&mut self) {
        let key = &self.settings.storage_key;
        let stored = match self.store.get(key) {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!(error = %e, key = %key, "could not read theme preference, following device");
                None
            }
        };

        let preference = ThemePreference::from_stored(stored.as_deref());
        if let Some(raw) = stored.as_deref() {
            if raw != preference.as_str() {
                tracing::warn!(value = %raw, key = %key, "ignoring unrecognised theme preference");
            }
        }
        self.preference = preference;
    }

    /// Mode first, then indicator: the page must never show the wrong mode
    /// while the control is being updated.
    fn render(&mut self) {
        self.effective = self.preference.resolve(self.device.current());
        self.surface.apply_mode(self.effective);
        self.surface.show_indicator(self.preference.indicator());
    }

    fn cycle(&mut self) -> ThemePreference {
        let previous = self.preference;
        self.preference = previous.next();

        if let Err(e) = self
            .store
            .set(&self.settings.storage_key, self.preference.as_str())
        {
            tracing::warn!(error = %e, preference = %self.preference, "theme preference not persisted");
        }

        self.render();
        self.surface.acknowledge(self.settings.acknowledgment);

        tracing::debug!(from = %previous, to = %self.preference, mode = %self.effective, "theme cycled");
        self.preference
    }

    fn device_changed(&mut self, scheme: ColorMode) {
        if !self.preference.follows_device() {
            tracing::debug!(scheme = %scheme, preference = %self.preference, "device scheme ignored");
            return;
        }
        self.effective = scheme;
        self.surface.apply_mode(scheme);
        tracing::debug!(mode = %scheme, "theme follows device");
    }
}

/// Runs `f` against the shared state if the controller is still alive and
/// not already mid-operation.
fn dispatch(shared: &Weak<RefCell<Shared>>, event: &'static str, f: impl FnOnce(&mut Shared)) {
    let Some(shared) = shared.upgrade() else {
        tracing::debug!(event, "theme controller gone, notification dropped");
        return;
    };
    let outcome = shared.try_borrow_mut().map(|mut state| f(&mut *state));
    if outcome.is_err() {
        tracing::debug!(event, "theme controller busy, re-entrant notification dropped");
    }
}

/// Maintains the theme preference and renders it.
///
/// # Example
///
/// ```rust
/// use themeswitch::{
///     ColorMode, ManualActivation, ManualScheme, MemoryStore, RecordingSurface,
///     ThemeController, ThemePreference,
/// };
///
/// let store = MemoryStore::new().with_entry("theme", "dark");
/// let device = ManualScheme::new(ColorMode::Light);
/// let surface = RecordingSurface::new();
/// let button = ManualActivation::new();
///
/// let mut controller = ThemeController::builder()
///     .store(store.clone())
///     .device(device.clone())
///     .surface(surface.clone())
///     .build()
///     .unwrap();
/// controller.initialize();
/// controller.bind_activation(button.clone());
///
/// assert!(surface.is_dark());
///
/// // Dark -> System: now follows the (light) device
/// button.activate();
/// assert_eq!(controller.preference(), ThemePreference::System);
/// assert_eq!(store.value("theme").as_deref(), Some("system"));
/// assert!(!surface.is_dark());
///
/// device.set(ColorMode::Dark);
/// assert!(surface.is_dark());
/// ```
pub struct ThemeController {
    shared: Rc<RefCell<Shared>>,
    settings: Rc<Settings>,
    device_subscription: Option<Subscription>,
    activations: Vec<(Box<dyn ActivationSource>, Subscription)>,
}

impl ThemeController {
    /// Creates a new builder.
    pub fn builder() -> ThemeControllerBuilder {
        ThemeControllerBuilder::new()
    }

    pub(crate) fn from_parts(
        storage_key: String,
        acknowledgment: Duration,
        store: Box<dyn PreferenceStore>,
        device: Box<dyn DeviceSchemeSource>,
        surface: Box<dyn ThemeSurface>,
    ) -> Self {
        let settings = Rc::new(Settings {
            storage_key,
            acknowledgment,
        });
        let preference = ThemePreference::default();
        let effective = preference.resolve(device.current());

        Self {
            shared: Rc::new(RefCell::new(Shared {
                settings: settings.clone(),
                preference,
                effective,
                store,
                device,
                surface,
            })),
            settings,
            device_subscription: None,
            activations: Vec::new(),
        }
    }

    /// Loads the stored preference and renders it.
    ///
    /// Call this as early as possible during startup so the correct mode is
    /// in place before anything is drawn. Missing, unreadable or corrupted
    /// values fall back to [`ThemePreference::System`].
    ///
    /// The first call also subscribes to device scheme changes; later calls
    /// reload and re-render without subscribing again.
    pub fn initialize(&mut self) {
        let mut shared = self.shared.borrow_mut();
        shared.load();
        shared.render();

        if self.device_subscription.is_none() {
            let weak = Rc::downgrade(&self.shared);
            let subscription = shared.device.subscribe(Box::new(move |scheme: ColorMode| {
                dispatch(&weak, "device scheme", |state| state.device_changed(scheme));
            }));
            self.device_subscription = Some(subscription);
        }

        tracing::debug!(
            preference = %shared.preference,
            mode = %shared.effective,
            "theme initialized"
        );
    }

    /// Advances the preference one step, persists it and re-renders.
    ///
    /// Returns the new preference. A failed store write is logged and
    /// otherwise ignored.
    pub fn cycle(&self) -> ThemePreference {
        self.shared.borrow_mut().cycle()
    }

    /// Reacts to a new device scheme.
    ///
    /// Subscribed sources call this automatically; it is public for hosts that
    /// deliver the signal themselves. Ignored unless the preference is
    /// [`ThemePreference::System`]. Never touches the store.
    pub fn on_device_scheme_change(&self, scheme: ColorMode) {
        self.shared.borrow_mut().device_changed(scheme);
    }

    /// Makes every activation of `source` call [`cycle`](Self::cycle).
    pub fn bind_activation(&mut self, source: impl ActivationSource + 'static) {
        let mut source: Box<dyn ActivationSource> = Box::new(source);
        let weak = Rc::downgrade(&self.shared);
        let subscription = source.on_activate(Box::new(move || {
            dispatch(&weak, "activation", |state| {
                state.cycle();
            });
        }));
        self.activations.push((source, subscription));
    }

    /// Unregisters the device subscription and all bound activation sources.
    ///
    /// The last rendered state stays on the surface. Safe to call repeatedly.
    /// If the controller is mid-operation the device subscription is kept,
    /// and a later call releases it.
    pub fn dispose(&mut self) {
        if let Some(subscription) = self.device_subscription {
            match self.shared.try_borrow_mut() {
                Ok(mut shared) => {
                    shared.device.unsubscribe(subscription);
                    self.device_subscription = None;
                }
                Err(_) => {
                    tracing::debug!("theme controller busy, device subscription kept until next dispose");
                }
            }
        }
        for (mut source, subscription) in self.activations.drain(..) {
            source.unsubscribe(subscription);
        }
    }

    /// The current preference.
    pub fn preference(&self) -> ThemePreference {
        self.shared.borrow().preference
    }

    /// The mode most recently rendered.
    pub fn effective_mode(&self) -> ColorMode {
        self.shared.borrow().effective
    }

    /// The device's current scheme, as reported by the source.
    pub fn device_scheme(&self) -> ColorMode {
        self.shared.borrow().device.current()
    }

    /// The indicator for the current preference.
    pub fn indicator(&self) -> Indicator {
        self.preference().indicator()
    }

    /// Whether the controller is subscribed to device changes.
    pub fn is_listening(&self) -> bool {
        self.device_subscription.is_some()
    }

    pub fn storage_key(&self) -> &str {
        &self.settings.storage_key
    }

    pub fn acknowledgment(&self) -> Duration {
        self.settings.acknowledgment
    }
}

impl Drop for ThemeController {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl std::fmt::Debug for ThemeController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut s = f.debug_struct("ThemeController");
        s.field("settings", &self.settings);
        if let Ok(shared) = self.shared.try_borrow() {
            s.field("preference", &shared.preference)
                .field("effective", &shared.effective);
        }
        s.field("listening", &self.is_listening())
            .field("activations", &self.activations.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::SurfaceEvent;
    use crate::{ManualActivation, ManualScheme, MemoryStore, RecordingSurface};

    struct Fixture {
        store: MemoryStore,
        device: ManualScheme,
        surface: RecordingSurface,
        controller: ThemeController,
    }

    fn fixture(stored: Option<&str>, device: ColorMode) -> Fixture {
        let store = match stored {
            Some(value) => MemoryStore::new().with_entry(DEFAULT_STORAGE_KEY, value),
            None => MemoryStore::new(),
        };
        let device = ManualScheme::new(device);
        let surface = RecordingSurface::new();
        let controller = ThemeController::builder()
            .store(store.clone())
            .device(device.clone())
            .surface(surface.clone())
            .build()
            .unwrap();
        Fixture {
            store,
            device,
            surface,
            controller,
        }
    }

    #[test]
    fn test_initialize_applies_mode_before_indicator() {
        let mut f = fixture(Some("dark"), ColorMode::Light);
        f.controller.initialize();

        assert_eq!(
            f.surface.events(),
            vec![
                SurfaceEvent::Mode(ColorMode::Dark),
                SurfaceEvent::Indicator(ThemePreference::Dark.indicator()),
            ]
        );
    }

    #[test]
    fn test_initialize_subscribes_once() {
        let mut f = fixture(None, ColorMode::Light);
        f.controller.initialize();
        f.controller.initialize();
        assert_eq!(f.device.listener_count(), 1);
        assert!(f.controller.is_listening());
    }

    #[test]
    fn test_reinitialize_picks_up_external_store_change() {
        let mut f = fixture(Some("light"), ColorMode::Dark);
        f.controller.initialize();
        assert!(!f.surface.is_dark());

        let _ = f.store.clone().with_entry(DEFAULT_STORAGE_KEY, "dark");
        f.controller.initialize();
        assert_eq!(f.controller.preference(), ThemePreference::Dark);
        assert!(f.surface.is_dark());
    }

    #[test]
    fn test_cycle_acknowledges_after_render() {
        let mut f = fixture(Some("light"), ColorMode::Light);
        f.controller.initialize();
        f.surface.clear_events();

        f.controller.cycle();
        assert_eq!(
            f.surface.events(),
            vec![
                SurfaceEvent::Mode(ColorMode::Dark),
                SurfaceEvent::Indicator(ThemePreference::Dark.indicator()),
                SurfaceEvent::Acknowledged(DEFAULT_ACKNOWLEDGMENT),
            ]
        );
    }

    #[test]
    fn test_device_change_does_not_touch_indicator_or_store() {
        let mut f = fixture(None, ColorMode::Light);
        f.controller.initialize();
        f.surface.clear_events();

        f.device.set(ColorMode::Dark);
        assert_eq!(f.surface.events(), vec![SurfaceEvent::Mode(ColorMode::Dark)]);
        assert_eq!(f.store.value(DEFAULT_STORAGE_KEY), None);
    }

    #[test]
    fn test_activation_from_bound_source() {
        let mut f = fixture(Some("system"), ColorMode::Dark);
        let button = ManualActivation::new();
        f.controller.initialize();
        f.controller.bind_activation(button.clone());

        button.activate();
        assert_eq!(f.controller.preference(), ThemePreference::Light);
        assert_eq!(f.store.value(DEFAULT_STORAGE_KEY).as_deref(), Some("light"));
    }

    #[test]
    fn test_dispose_unregisters_everything() {
        let mut f = fixture(None, ColorMode::Light);
        let button = ManualActivation::new();
        f.controller.initialize();
        f.controller.bind_activation(button.clone());

        f.controller.dispose();
        assert_eq!(f.device.listener_count(), 0);
        assert_eq!(button.listener_count(), 0);
        assert!(!f.controller.is_listening());

        f.device.set(ColorMode::Dark);
        button.activate();
        assert!(!f.surface.is_dark());
        assert_eq!(f.controller.preference(), ThemePreference::System);
    }

    #[test]
    fn test_dispose_while_busy_keeps_device_subscription() {
        let mut f = fixture(None, ColorMode::Light);
        f.controller.initialize();

        let busy = f.controller.shared.clone();
        let guard = busy.borrow();
        f.controller.dispose();
        assert!(f.controller.is_listening());
        assert_eq!(f.device.listener_count(), 1);
        drop(guard);

        f.controller.dispose();
        assert!(!f.controller.is_listening());
        assert_eq!(f.device.listener_count(), 0);
    }

    #[test]
    fn test_drop_unregisters_device_listener() {
        let mut f = fixture(None, ColorMode::Light);
        f.controller.initialize();
        let device = f.device.clone();
        drop(f);
        assert_eq!(device.listener_count(), 0);
    }

    #[test]
    fn test_debug_output() {
        let f = fixture(Some("dark"), ColorMode::Light);
        let debug = format!("{:?}", f.controller);
        assert!(debug.contains("ThemeController"));
        assert!(debug.contains("theme"));
    }
}
