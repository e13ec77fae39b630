//! DOM surface: body class plus toggle control.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use gloo_timers::callback::Timeout;
use web_sys::HtmlElement;

use super::describe_js;
use crate::controller::SetupError;
use crate::preference::{ColorMode, Indicator};
use crate::surface::ThemeSurface;

/// Class toggled on `<body>` while dark mode is active.
pub const DEFAULT_DARK_CLASS: &str = "dark-mode";

/// CSS transform applied to the toggle while acknowledging a click.
pub const ACKNOWLEDGE_TRANSFORM: &str = "scale(0.85) rotate(180deg)";

/// A control that may be attached after indicators have been shown.
///
/// The last indicator is kept so a late control starts out current.
struct IndicatorSlot<C> {
    control: Option<C>,
    last: Option<Indicator>,
}

impl<C> IndicatorSlot<C> {
    fn new() -> Self {
        Self {
            control: None,
            last: None,
        }
    }

    fn attach(&mut self, control: C, render: impl Fn(&C, Indicator)) {
        if let Some(indicator) = self.last {
            render(&control, indicator);
        }
        self.control = Some(control);
    }

    fn show(&mut self, indicator: Indicator, render: impl Fn(&C, Indicator)) {
        self.last = Some(indicator);
        if let Some(control) = &self.control {
            render(control, indicator);
        }
    }

    fn control(&self) -> Option<&C> {
        self.control.as_ref()
    }
}

struct Inner {
    body: HtmlElement,
    slot: IndicatorSlot<HtmlElement>,
    dark_class: String,
}

/// Renders the theme into the current document.
///
/// Page stylesheets key off the dark class on `<body>`. Only `<body>` is
/// needed up front, so the mode can be applied before the rest of the page
/// is parsed; the toggle control is attached later with
/// [`attach_control`](Self::attach_control) and immediately shows the
/// current indicator.
///
/// Clones share the same document state.
#[derive(Clone)]
pub struct DocumentSurface {
    inner: Rc<RefCell<Inner>>,
}

impl DocumentSurface {
    /// Targets `<body>` of the current document.
    ///
    /// # Errors
    ///
    /// [`SetupError::Environment`] if there is no document or body.
    pub fn new() -> Result<Self, SetupError> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| SetupError::Environment("no document".to_string()))?;
        let body = document
            .body()
            .ok_or_else(|| SetupError::Environment("document has no body".to_string()))?;

        Ok(Self {
            inner: Rc::new(RefCell::new(Inner {
                body,
                slot: IndicatorSlot::new(),
                dark_class: DEFAULT_DARK_CLASS.to_string(),
            })),
        })
    }

    /// Uses `class` instead of [`DEFAULT_DARK_CLASS`].
    pub fn with_dark_class(self, class: impl Into<String>) -> Self {
        self.inner.borrow_mut().dark_class = class.into();
        self
    }

    /// Starts rendering the indicator into `control`.
    pub fn attach_control(&self, control: HtmlElement) {
        self.inner
            .borrow_mut()
            .slot
            .attach(control, render_indicator);
    }

    /// The toggle control, once attached.
    pub fn control(&self) -> Option<HtmlElement> {
        self.inner.borrow().slot.control().cloned()
    }
}

fn render_indicator(control: &HtmlElement, indicator: Indicator) {
    control.set_text_content(Some(indicator.icon));
    if let Err(e) = control.set_attribute("aria-label", indicator.label) {
        tracing::debug!(error = %describe_js(&e), "could not set toggle label");
    }
}

impl ThemeSurface for DocumentSurface {
    fn apply_mode(&mut self, mode: ColorMode) {
        let inner = self.inner.borrow();
        if let Err(e) = inner
            .body
            .class_list()
            .toggle_with_force(&inner.dark_class, mode.is_dark())
        {
            tracing::warn!(error = %describe_js(&e), "could not toggle dark class");
        }
    }

    fn show_indicator(&mut self, indicator: Indicator) {
        self.inner
            .borrow_mut()
            .slot
            .show(indicator, render_indicator);
    }

    fn acknowledge(&mut self, duration: Duration) {
        let Some(control) = self.control() else {
            return;
        };
        if control
            .style()
            .set_property("transform", ACKNOWLEDGE_TRANSFORM)
            .is_err()
        {
            return;
        }

        let millis = u32::try_from(duration.as_millis()).unwrap_or(u32::MAX);
        Timeout::new(millis, move || {
            let _ = control.style().set_property("transform", "");
        })
        .forget();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preference::ThemePreference;

    type Rendered = RefCell<Vec<&'static str>>;

    fn record(control: &Rendered, indicator: Indicator) {
        control.borrow_mut().push(indicator.label);
    }

    #[test]
    fn test_late_control_shows_last_indicator() {
        let mut slot = IndicatorSlot::<Rendered>::new();
        slot.show(ThemePreference::Light.indicator(), record);
        slot.show(ThemePreference::Dark.indicator(), record);

        slot.attach(RefCell::new(Vec::new()), record);
        let rendered = slot.control().map(|c| c.borrow().clone());
        assert_eq!(rendered, Some(vec!["Switch to system default theme"]));
    }

    #[test]
    fn test_attached_control_follows_later_indicators() {
        let mut slot = IndicatorSlot::<Rendered>::new();
        slot.attach(RefCell::new(Vec::new()), record);
        slot.show(ThemePreference::System.indicator(), record);

        let rendered = slot.control().map(|c| c.borrow().clone());
        assert_eq!(rendered, Some(vec!["Switch to light mode"]));
    }

    #[test]
    fn test_attach_before_any_indicator_renders_nothing() {
        let mut slot = IndicatorSlot::<Rendered>::new();
        slot.attach(RefCell::new(Vec::new()), record);
        assert_eq!(slot.control().map(|c| c.borrow().len()), Some(0));
    }
}
