//! Hand-driven device scheme.

use std::cell::Cell;
use std::rc::Rc;

use super::{DeviceSchemeSource, SchemeListener};
use crate::preference::ColorMode;
use crate::subscription::{ListenerSet, Subscription};

struct State {
    mode: Cell<ColorMode>,
    listeners: ListenerSet<ColorMode>,
}

/// A device scheme whose value is set explicitly.
///
/// Clones share state: give one clone to the controller and keep another to
/// drive changes.
///
/// # Example
///
/// ```rust
/// use themeswitch::{ColorMode, DeviceSchemeSource, ManualScheme};
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// let device = ManualScheme::new(ColorMode::Light);
/// let seen = Rc::new(Cell::new(None));
///
/// let mut handle = device.clone();
/// let sink = seen.clone();
/// handle.subscribe(Box::new(move |mode| sink.set(Some(mode))));
///
/// device.set(ColorMode::Dark);
/// assert_eq!(seen.get(), Some(ColorMode::Dark));
/// assert_eq!(handle.current(), ColorMode::Dark);
/// ```
#[derive(Clone)]
pub struct ManualScheme {
    state: Rc<State>,
}

impl ManualScheme {
    pub fn new(mode: ColorMode) -> Self {
        Self {
            state: Rc::new(State {
                mode: Cell::new(mode),
                listeners: ListenerSet::new(),
            }),
        }
    }

    /// Changes the device scheme, notifying listeners if it differs.
    pub fn set(&self, mode: ColorMode) {
        if self.state.mode.replace(mode) != mode {
            self.state.listeners.emit(mode);
        }
    }

    /// Number of live subscriptions.
    pub fn listener_count(&self) -> usize {
        self.state.listeners.len()
    }
}

impl Default for ManualScheme {
    fn default() -> Self {
        Self::new(ColorMode::Light)
    }
}

impl std::fmt::Debug for ManualScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManualScheme")
            .field("mode", &self.state.mode.get())
            .field("listeners", &self.state.listeners.len())
            .finish()
    }
}

impl DeviceSchemeSource for ManualScheme {
    fn current(&self) -> ColorMode {
        self.state.mode.get()
    }

    fn subscribe(&mut self, listener: SchemeListener) -> Subscription {
        self.state.listeners.add(listener)
    }

    fn unsubscribe(&mut self, subscription: Subscription) {
        self.state.listeners.remove(subscription);
    }
}
