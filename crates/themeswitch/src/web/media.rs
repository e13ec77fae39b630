//! `prefers-color-scheme` media query as a device scheme source.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{MediaQueryList, MediaQueryListEvent};

use super::describe_js;
use crate::device::{DeviceSchemeSource, SchemeListener};
use crate::preference::ColorMode;
use crate::subscription::{Subscription, SubscriptionIds};

/// The media query whose match means "device prefers dark".
pub const PREFERS_DARK_QUERY: &str = "(prefers-color-scheme: dark)";

type ChangeHandler = Closure<dyn FnMut(MediaQueryListEvent)>;

/// Device scheme read from `matchMedia`.
///
/// Browsers without `matchMedia` report [`ColorMode::Light`] and never notify.
pub struct MediaQueryScheme {
    query: Option<MediaQueryList>,
    ids: SubscriptionIds,
    handlers: Vec<(Subscription, ChangeHandler)>,
}

impl MediaQueryScheme {
    pub fn new() -> Self {
        let query = web_sys::window().and_then(|w| w.match_media(PREFERS_DARK_QUERY).ok().flatten());
        if query.is_none() {
            tracing::debug!("matchMedia unsupported, device scheme treated as light");
        }
        Self {
            query,
            ids: SubscriptionIds::default(),
            handlers: Vec::new(),
        }
    }
}

impl Default for MediaQueryScheme {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceSchemeSource for MediaQueryScheme {
    fn current(&self) -> ColorMode {
        ColorMode::from_dark(self.query.as_ref().is_some_and(MediaQueryList::matches))
    }

    fn subscribe(&mut self, mut listener: SchemeListener) -> Subscription {
        let subscription = self.ids.next();
        let Some(query) = &self.query else {
            return subscription;
        };

        let handler = ChangeHandler::new(move |event: MediaQueryListEvent| {
            listener(ColorMode::from_dark(event.matches()));
        });
        match query.add_event_listener_with_callback("change", handler.as_ref().unchecked_ref()) {
            Ok(()) => self.handlers.push((subscription, handler)),
            Err(e) => {
                tracing::warn!(error = %describe_js(&e), "could not listen for color scheme changes");
            }
        }
        subscription
    }

    fn unsubscribe(&mut self, subscription: Subscription) {
        let Some(index) = self.handlers.iter().position(|(s, _)| *s == subscription) else {
            return;
        };
        let (_, handler) = self.handlers.remove(index);
        if let Some(query) = &self.query {
            let _ = query
                .remove_event_listener_with_callback("change", handler.as_ref().unchecked_ref());
        }
    }
}
