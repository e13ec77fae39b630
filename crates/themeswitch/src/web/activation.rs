//! Click and keyboard activation of a DOM element.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlElement, KeyboardEvent};

use super::describe_js;
use crate::activation::{ActivationListener, ActivationSource};
use crate::controller::SetupError;
use crate::subscription::{Subscription, SubscriptionIds};

/// Keys that activate the toggle from the keyboard.
pub fn is_activation_key(key: &str) -> bool {
    matches!(key, "Enter" | " ")
}

struct Handlers {
    subscription: Subscription,
    click: Closure<dyn FnMut(Event)>,
    keydown: Closure<dyn FnMut(KeyboardEvent)>,
}

/// Activation via pointer click, or Enter/Space while the element has focus.
///
/// Keyboard activation suppresses the key's default action so Space does
/// not scroll the page.
pub struct ElementActivation {
    element: HtmlElement,
    ids: SubscriptionIds,
    handlers: Vec<Handlers>,
}

impl ElementActivation {
    pub fn new(element: HtmlElement) -> Self {
        Self {
            element,
            ids: SubscriptionIds::default(),
            handlers: Vec::new(),
        }
    }

    /// Looks up the element with id `id`.
    ///
    /// # Errors
    ///
    /// [`SetupError::Environment`] if no such HTML element exists.
    pub fn by_id(id: &str) -> Result<Self, SetupError> {
        web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(id))
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            .map(Self::new)
            .ok_or_else(|| SetupError::Environment(format!("no element with id '{id}'")))
    }

    pub fn element(&self) -> &HtmlElement {
        &self.element
    }
}

fn fire(listener: &RefCell<ActivationListener>) {
    if let Ok(mut listener) = listener.try_borrow_mut() {
        (&mut **listener)();
    }
}

impl ActivationSource for ElementActivation {
    fn on_activate(&mut self, listener: ActivationListener) -> Subscription {
        let subscription = self.ids.next();
        let listener = Rc::new(RefCell::new(listener));

        let on_click = listener.clone();
        let click = Closure::<dyn FnMut(Event)>::new(move |_event: Event| fire(&on_click));

        let on_key = listener;
        let keydown = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
            if is_activation_key(&event.key()) {
                event.prevent_default();
                fire(&on_key);
            }
        });

        let registered = self
            .element
            .add_event_listener_with_callback("click", click.as_ref().unchecked_ref())
            .and_then(|()| {
                self.element
                    .add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref())
            });
        if let Err(e) = registered {
            tracing::warn!(error = %describe_js(&e), "could not bind theme toggle");
        }

        self.handlers.push(Handlers {
            subscription,
            click,
            keydown,
        });
        subscription
    }

    fn unsubscribe(&mut self, subscription: Subscription) {
        let Some(index) = self
            .handlers
            .iter()
            .position(|h| h.subscription == subscription)
        else {
            return;
        };
        let handlers = self.handlers.remove(index);
        let _ = self
            .element
            .remove_event_listener_with_callback("click", handlers.click.as_ref().unchecked_ref());
        let _ = self.element.remove_event_listener_with_callback(
            "keydown",
            handlers.keydown.as_ref().unchecked_ref(),
        );
    }
}
