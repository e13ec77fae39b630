//! Browser adapters, enabled with the `web` feature.
//!
//! | Adapter | Backed by |
//! |---------|-----------|
//! | [`LocalStorageStore`] | `window.localStorage` |
//! | [`MediaQueryScheme`] | `matchMedia("(prefers-color-scheme: dark)")` |
//! | [`DocumentSurface`] | a class on `<body>` plus the toggle's text and `aria-label` |
//! | [`ElementActivation`] | `click` and Enter/Space `keydown` on the toggle |
//!
//! [`PageTheme`] wires them together in two steps. The stored mode must be on
//! `<body>` before first paint, but at that point the toggle has usually not
//! been parsed yet:
//!
//! ```html
//! <body>
//!   <script type="module">
//!     import init, { applyStoredTheme } from "./themeswitch.js";
//!     await init();
//!     applyStoredTheme();
//!   </script>
//!   ...
//!   <button id="themeToggle"></button>
//!   <script type="module">
//!     import { bindThemeToggle } from "./themeswitch.js";
//!     bindThemeToggle("themeToggle");
//!   </script>
//! </body>
//! ```

mod activation;
mod document;
mod media;
mod storage;

pub use activation::{is_activation_key, ElementActivation};
pub use document::{DocumentSurface, ACKNOWLEDGE_TRANSFORM, DEFAULT_DARK_CLASS};
pub use media::{MediaQueryScheme, PREFERS_DARK_QUERY};
pub use storage::LocalStorageStore;

use std::cell::RefCell;
use wasm_bindgen::prelude::*;

use crate::controller::{SetupError, ThemeController};
use crate::store::MemoryStore;

/// A page-lifetime controller rendering into the current document.
pub struct PageTheme {
    controller: ThemeController,
    surface: DocumentSurface,
    bound: Option<String>,
}

impl PageTheme {
    /// Builds and initializes a controller that applies the stored mode to
    /// `<body>`. Needs nothing else from the document.
    ///
    /// When `localStorage` is unavailable (private browsing, disabled storage)
    /// the preference lives in memory for the lifetime of the page.
    ///
    /// # Errors
    ///
    /// Fails only if there is no `window`, `document` or `<body>`.
    pub fn apply() -> Result<Self, SetupError> {
        let surface = DocumentSurface::new()?;

        let builder = ThemeController::builder()
            .device(MediaQueryScheme::new())
            .surface(surface.clone());
        let builder = match LocalStorageStore::new() {
            Ok(store) => builder.store(store),
            Err(e) => {
                tracing::warn!(error = %e, "localStorage unavailable, theme preference will not persist");
                builder.store(MemoryStore::new())
            }
        };

        let mut controller = builder.build()?;
        controller.initialize();
        Ok(Self {
            controller,
            surface,
            bound: None,
        })
    }

    /// Attaches the toggle with id `control_id`: it shows the indicator and
    /// cycles the preference on activation.
    ///
    /// Binding again is a no-op.
    ///
    /// # Errors
    ///
    /// [`SetupError::Environment`] if the element does not exist yet.
    pub fn bind(&mut self, control_id: &str) -> Result<(), SetupError> {
        if let Some(bound) = &self.bound {
            tracing::debug!(control_id, bound = %bound, "theme toggle already bound");
            return Ok(());
        }

        let activation = ElementActivation::by_id(control_id)?;
        self.surface.attach_control(activation.element().clone());
        self.controller.bind_activation(activation);
        self.bound = Some(control_id.to_string());
        Ok(())
    }

    pub fn controller(&self) -> &ThemeController {
        &self.controller
    }

    pub fn is_bound(&self) -> bool {
        self.bound.is_some()
    }
}

thread_local! {
    static INSTALLED: RefCell<Option<PageTheme>> = const { RefCell::new(None) };
}

fn to_js(e: SetupError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Runs `f` on the page's [`PageTheme`], applying the stored theme first if
/// that has not happened yet.
fn with_page(f: impl FnOnce(&mut PageTheme) -> Result<(), SetupError>) -> Result<(), JsValue> {
    INSTALLED.with(|slot| {
        let mut slot = slot.borrow_mut();
        let mut page = match slot.take() {
            Some(page) => page,
            None => PageTheme::apply().map_err(to_js)?,
        };
        let result = f(&mut page).map_err(to_js);
        *slot = Some(page);
        result
    })
}

/// JavaScript entry point for the top of `<body>`: applies the stored mode.
///
/// Calling it again leaves the existing controller in place.
#[wasm_bindgen(js_name = applyStoredTheme)]
pub fn apply_stored_theme() -> Result<(), JsValue> {
    with_page(|_| Ok(()))
}

/// JavaScript entry point for once the toggle exists: binds it to the
/// controller created by [`apply_stored_theme`], creating one if needed.
#[wasm_bindgen(js_name = bindThemeToggle)]
pub fn bind_theme_toggle(control_id: &str) -> Result<(), JsValue> {
    with_page(|page| page.bind(control_id))
}

/// Best-effort text for a thrown JavaScript value.
pub(crate) fn describe_js(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}
