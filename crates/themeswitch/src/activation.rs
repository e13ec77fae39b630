//! User activation of the theme toggle.

use std::rc::Rc;

use crate::subscription::{ListenerSet, Subscription};

/// Callback invoked each time the toggle is activated.
pub type ActivationListener = Box<dyn FnMut()>;

/// Something the user can activate (click, tap, Enter/Space) to cycle the theme.
pub trait ActivationSource {
    /// Registers `listener` to run on every activation.
    fn on_activate(&mut self, listener: ActivationListener) -> Subscription;

    /// Removes a listener registered with [`on_activate`](Self::on_activate).
    fn unsubscribe(&mut self, subscription: Subscription);
}

/// An activation source triggered in code.
///
/// Clones share listeners, so a host can bind one clone to a controller and
/// call [`activate`](Self::activate) on another from its own input handling.
#[derive(Clone)]
pub struct ManualActivation {
    listeners: Rc<ListenerSet<()>>,
}

impl ManualActivation {
    pub fn new() -> Self {
        Self {
            listeners: Rc::new(ListenerSet::new()),
        }
    }

    /// Fires every registered listener once.
    pub fn activate(&self) {
        self.listeners.emit(());
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl Default for ManualActivation {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ManualActivation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManualActivation")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl ActivationSource for ManualActivation {
    fn on_activate(&mut self, mut listener: ActivationListener) -> Subscription {
        self.listeners.add(Box::new(move |()| listener()))
    }

    fn unsubscribe(&mut self, subscription: Subscription) {
        self.listeners.remove(subscription);
    }
}
