//! Behavioral tests for the theme controller against in-memory capabilities.

use proptest::prelude::*;
use themeswitch::{
    ColorMode, ManualActivation, ManualScheme, MemoryStore, RecordingSurface, ThemeController,
    ThemePreference,
};

const KEY: &str = "theme";

struct Page {
    store: MemoryStore,
    device: ManualScheme,
    surface: RecordingSurface,
    controller: ThemeController,
}

fn load_page(store: MemoryStore, device: ColorMode) -> Page {
    let device = ManualScheme::new(device);
    let surface = RecordingSurface::new();
    let mut controller = ThemeController::builder()
        .store(store.clone())
        .device(device.clone())
        .surface(surface.clone())
        .build()
        .unwrap();
    controller.initialize();
    Page {
        store,
        device,
        surface,
        controller,
    }
}

fn store_with(value: Option<&str>) -> MemoryStore {
    match value {
        Some(v) => MemoryStore::new().with_entry(KEY, v),
        None => MemoryStore::new(),
    }
}

fn mode_strategy() -> impl Strategy<Value = ColorMode> {
    prop_oneof![Just(ColorMode::Light), Just(ColorMode::Dark)]
}

fn preference_strategy() -> impl Strategy<Value = ThemePreference> {
    prop_oneof![
        Just(ThemePreference::Light),
        Just(ThemePreference::Dark),
        Just(ThemePreference::System),
    ]
}

#[test]
fn test_empty_store_follows_dark_device() {
    let page = load_page(MemoryStore::new(), ColorMode::Dark);

    assert_eq!(page.controller.preference(), ThemePreference::System);
    assert_eq!(page.controller.effective_mode(), ColorMode::Dark);
    assert!(page.surface.is_dark());
    assert_eq!(
        page.surface.indicator().map(|i| i.label),
        Some("Switch to light mode")
    );
}

#[test]
fn test_stored_light_ignores_device() {
    for device in [ColorMode::Light, ColorMode::Dark] {
        let page = load_page(store_with(Some("light")), device);
        assert_eq!(page.controller.preference(), ThemePreference::Light);
        assert_eq!(page.surface.mode(), Some(ColorMode::Light));
    }
}

#[test]
fn test_stored_dark_cycles_to_system() {
    let page = load_page(store_with(Some("dark")), ColorMode::Light);

    let next = page.controller.cycle();
    assert_eq!(next, ThemePreference::System);
    assert_eq!(page.controller.preference(), ThemePreference::System);
    assert_eq!(page.store.value(KEY).as_deref(), Some("system"));
    assert_eq!(page.surface.mode(), Some(ColorMode::Light));
}

#[test]
fn test_corrupted_values_initialize_to_system() {
    for raw in ["", "Dark", "LIGHT", " system", "auto", "{\"theme\":\"dark\"}"] {
        let page = load_page(store_with(Some(raw)), ColorMode::Dark);
        assert_eq!(
            page.controller.preference(),
            ThemePreference::System,
            "value {raw:?}"
        );
        assert!(page.surface.is_dark());
        // Loading never rewrites the store
        assert_eq!(page.store.value(KEY).as_deref(), Some(raw));
    }
}

#[test]
fn test_indicator_tracks_preference_not_mode() {
    // System resolving to dark still offers "switch to light"
    let page = load_page(MemoryStore::new(), ColorMode::Dark);
    assert_eq!(
        page.controller.indicator().label,
        "Switch to light mode"
    );

    page.controller.cycle();
    assert_eq!(page.controller.preference(), ThemePreference::Light);
    assert_eq!(
        page.surface.indicator().map(|i| i.label),
        Some("Switch to dark mode")
    );

    page.controller.cycle();
    assert_eq!(
        page.surface.indicator().map(|i| i.label),
        Some("Switch to system default theme")
    );
}

#[test]
fn test_system_follows_device_changes() {
    let page = load_page(MemoryStore::new(), ColorMode::Light);
    assert!(!page.surface.is_dark());

    page.device.set(ColorMode::Dark);
    assert!(page.surface.is_dark());
    assert_eq!(page.controller.effective_mode(), ColorMode::Dark);

    page.device.set(ColorMode::Light);
    assert!(!page.surface.is_dark());

    assert_eq!(page.controller.preference(), ThemePreference::System);
    assert_eq!(page.store.value(KEY), None);
}

#[test]
fn test_explicit_dark_overrides_device() {
    let page = load_page(store_with(Some("dark")), ColorMode::Dark);

    page.device.set(ColorMode::Light);
    assert!(page.surface.is_dark());
    assert_eq!(page.controller.effective_mode(), ColorMode::Dark);
    assert_eq!(page.store.value(KEY).as_deref(), Some("dark"));
}

#[test]
fn test_device_change_while_explicit_is_picked_up_on_return_to_system() {
    let page = load_page(store_with(Some("dark")), ColorMode::Light);

    page.device.set(ColorMode::Dark);
    page.device.set(ColorMode::Light);
    assert!(page.surface.is_dark());

    page.controller.cycle();
    assert_eq!(page.controller.preference(), ThemePreference::System);
    assert!(!page.surface.is_dark());
}

#[test]
fn test_write_failure_is_not_fatal() {
    let store = store_with(Some("light"));
    let page = load_page(store, ColorMode::Light);
    page.store.reject_writes(true);

    let next = page.controller.cycle();
    assert_eq!(next, ThemePreference::Dark);
    assert!(page.surface.is_dark());
    assert_eq!(page.store.value(KEY).as_deref(), Some("light"));
}

#[test]
fn test_preference_survives_reload() {
    let store = MemoryStore::new();
    {
        let page = load_page(store.clone(), ColorMode::Light);
        page.controller.cycle();
        page.controller.cycle();
    }

    let reloaded = load_page(store, ColorMode::Light);
    assert_eq!(reloaded.controller.preference(), ThemePreference::Dark);
    assert!(reloaded.surface.is_dark());
}

#[test]
fn test_keyboard_and_pointer_share_one_activation_path() {
    let mut page = load_page(MemoryStore::new(), ColorMode::Light);
    let pointer = ManualActivation::new();
    let keyboard = ManualActivation::new();
    page.controller.bind_activation(pointer.clone());
    page.controller.bind_activation(keyboard.clone());

    pointer.activate();
    keyboard.activate();
    assert_eq!(page.controller.preference(), ThemePreference::Dark);
    assert_eq!(page.store.value(KEY).as_deref(), Some("dark"));
}

#[test]
fn test_custom_storage_key() {
    let store = MemoryStore::new().with_entry("site-theme", "dark");
    let surface = RecordingSurface::new();
    let mut controller = ThemeController::builder()
        .storage_key("site-theme")
        .store(store.clone())
        .device(ManualScheme::new(ColorMode::Light))
        .surface(surface.clone())
        .build()
        .unwrap();
    controller.initialize();

    assert!(surface.is_dark());
    controller.cycle();
    assert_eq!(store.value("site-theme").as_deref(), Some("system"));
    assert_eq!(store.value(KEY), None);
}

#[test]
fn test_dispose_stops_following_device() {
    let mut page = load_page(MemoryStore::new(), ColorMode::Light);
    page.controller.dispose();

    page.device.set(ColorMode::Dark);
    assert!(!page.surface.is_dark());
    assert_eq!(page.device.listener_count(), 0);
}

proptest! {
    #[test]
    fn prop_initialize_renders_effective_mode(
        preference in preference_strategy(),
        device in mode_strategy(),
    ) {
        let mut page = load_page(store_with(Some(preference.as_str())), device);
        prop_assert_eq!(page.controller.preference(), preference);
        prop_assert_eq!(page.surface.mode(), Some(preference.resolve(device)));

        page.controller.initialize();
        prop_assert_eq!(page.controller.preference(), preference);
        prop_assert_eq!(page.surface.mode(), Some(preference.resolve(device)));
    }

    #[test]
    fn prop_three_cycles_return_to_start(
        preference in preference_strategy(),
        device in mode_strategy(),
    ) {
        let page = load_page(store_with(Some(preference.as_str())), device);
        for _ in 0..3 {
            page.controller.cycle();
        }
        prop_assert_eq!(page.controller.preference(), preference);
        prop_assert_eq!(page.store.value(KEY), Some(preference.as_str().to_string()));
    }

    #[test]
    fn prop_every_cycle_writes_through(
        start in preference_strategy(),
        steps in 1usize..10,
    ) {
        let page = load_page(store_with(Some(start.as_str())), ColorMode::Light);
        for _ in 0..steps {
            let next = page.controller.cycle();
            prop_assert_eq!(page.store.value(KEY), Some(next.as_str().to_string()));
            prop_assert_eq!(page.controller.preference(), next);
            prop_assert_eq!(page.surface.indicator(), Some(next.indicator()));
        }
    }

    #[test]
    fn prop_device_signal_only_matters_for_system(
        preference in preference_strategy(),
        changes in proptest::collection::vec(mode_strategy(), 0..8),
    ) {
        let page = load_page(store_with(Some(preference.as_str())), ColorMode::Light);
        let mut device = ColorMode::Light;
        for change in changes {
            page.device.set(change);
            device = change;
            prop_assert_eq!(page.controller.effective_mode(), preference.resolve(device));
            prop_assert_eq!(page.surface.mode(), Some(preference.resolve(device)));
        }
        prop_assert_eq!(page.store.value(KEY), Some(preference.as_str().to_string()));
    }
}
