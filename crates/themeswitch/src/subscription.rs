//! Subscription handles and listener bookkeeping for single-threaded sources.

use std::cell::{Cell, RefCell};

/// Handle returned when registering a listener; pass it back to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

impl Subscription {
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Allocator for unique [`Subscription`] handles.
#[derive(Debug, Default)]
pub(crate) struct SubscriptionIds {
    next: Cell<u64>,
}

impl SubscriptionIds {
    pub(crate) fn next(&self) -> Subscription {
        let id = self.next.get();
        self.next.set(id + 1);
        Subscription(id)
    }
}

type Entry<A> = (Subscription, Box<dyn FnMut(A)>);

/// Ordered set of listeners that can be notified through a shared reference.
///
/// Listeners may subscribe or unsubscribe from inside a notification; those
/// changes take effect once the current [`emit`](Self::emit) returns.
pub(crate) struct ListenerSet<A> {
    ids: SubscriptionIds,
    entries: RefCell<Vec<Entry<A>>>,
    /// Listeners taken out of `entries` by the running `emit`.
    in_flight: RefCell<Vec<Subscription>>,
    removed_while_emitting: RefCell<Vec<Subscription>>,
}

impl<A: Copy> ListenerSet<A> {
    pub(crate) fn new() -> Self {
        Self {
            ids: SubscriptionIds::default(),
            entries: RefCell::new(Vec::new()),
            in_flight: RefCell::new(Vec::new()),
            removed_while_emitting: RefCell::new(Vec::new()),
        }
    }

    pub(crate) fn add(&self, listener: Box<dyn FnMut(A)>) -> Subscription {
        let subscription = self.ids.next();
        self.entries.borrow_mut().push((subscription, listener));
        subscription
    }

    /// Removes a listener. Returns `false` if it was not registered.
    pub(crate) fn remove(&self, subscription: Subscription) -> bool {
        let mut entries = self.entries.borrow_mut();
        let before = entries.len();
        entries.retain(|(s, _)| *s != subscription);
        if entries.len() != before {
            return true;
        }

        let mut removed = self.removed_while_emitting.borrow_mut();
        if self.in_flight.borrow().contains(&subscription) && !removed.contains(&subscription) {
            removed.push(subscription);
            return true;
        }
        false
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Calls every registered listener with `value`, in registration order.
    pub(crate) fn emit(&self, value: A) {
        let mut running = std::mem::take(&mut *self.entries.borrow_mut());
        *self.in_flight.borrow_mut() = running.iter().map(|(s, _)| *s).collect();
        for (_, listener) in running.iter_mut() {
            listener(value);
        }
        self.in_flight.borrow_mut().clear();

        let removed = std::mem::take(&mut *self.removed_while_emitting.borrow_mut());
        running.retain(|(s, _)| !removed.contains(s));

        let mut entries = self.entries.borrow_mut();
        running.append(&mut entries);
        *entries = running;
    }
}
