use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Unique identifier for a subscriber on a [`ChangeBus`].
    pub struct SubscriberId;
}

/// A shared dirty marker for cached derived data.
///
/// Cloning yields another handle to the same flag. Marking is idempotent;
/// redundant marks are no-ops. Single-threaded by design (one writer, one
/// reader context), hence `Rc<Cell<_>>` rather than atomics.
#[derive(Debug, Clone, Default)]
pub struct DirtyFlag(Rc<Cell<bool>>);

impl DirtyFlag {
    /// Creates a new flag in the clean state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the flag dirty.
    pub fn mark(&self) {
        self.0.set(true);
    }

    /// Returns whether the flag is currently dirty.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.0.get()
    }

    /// Clears the flag and returns whether it was dirty.
    pub fn take(&self) -> bool {
        self.0.replace(false)
    }
}

type Subscribers = RefCell<SlotMap<SubscriberId, DirtyFlag>>;

/// A change-notification bus that marks subscribed dirty flags.
///
/// This replaces per-field change events: any number of parameters can
/// notify the same bus, and any number of dependents can subscribe a flag.
#[derive(Debug, Default)]
pub struct ChangeBus {
    subscribers: Rc<Subscribers>,
}

impl ChangeBus {
    /// Creates a new bus with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes a dirty flag to this bus.
    ///
    /// The flag is marked on every [`notify`](Self::notify) until the
    /// returned guard is dropped. Teardown is ownership-scoped: dropping
    /// the [`Subscription`] unsubscribes, and a bus that no longer exists
    /// makes the drop a no-op.
    #[must_use]
    pub fn subscribe(&self, flag: DirtyFlag) -> Subscription {
        let key = self.subscribers.borrow_mut().insert(flag);
        Subscription {
            subscribers: Rc::downgrade(&self.subscribers),
            key,
        }
    }

    /// Marks every subscribed flag dirty.
    pub fn notify(&self) {
        for flag in self.subscribers.borrow().values() {
            flag.mark();
        }
    }

    /// Returns the number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }
}

/// RAII guard for a [`ChangeBus`] subscription.
///
/// Dropping the guard removes the subscriber from the bus, so no stale
/// subscription can outlive its owner.
#[derive(Debug)]
pub struct Subscription {
    subscribers: Weak<Subscribers>,
    key: SubscriberId,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(subscribers) = self.subscribers.upgrade() {
            subscribers.borrow_mut().remove(self.key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notify_marks_subscribed_flag() {
        let bus = ChangeBus::new();
        let flag = DirtyFlag::new();
        let _guard = bus.subscribe(flag.clone());

        assert!(!flag.is_dirty());
        bus.notify();
        assert!(flag.is_dirty());
    }

    #[test]
    fn marking_is_idempotent() {
        let flag = DirtyFlag::new();
        flag.mark();
        flag.mark();
        assert!(flag.take());
        assert!(!flag.is_dirty());
    }

    #[test]
    fn dropped_subscription_stops_marking() {
        let bus = ChangeBus::new();
        let flag = DirtyFlag::new();
        let guard = bus.subscribe(flag.clone());
        drop(guard);

        bus.notify();
        assert!(!flag.is_dirty());
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn guard_outliving_bus_is_harmless() {
        let flag = DirtyFlag::new();
        let guard = {
            let bus = ChangeBus::new();
            bus.subscribe(flag.clone())
        };
        // Bus is gone; dropping the guard must not panic.
        drop(guard);
    }

    #[test]
    fn clones_share_state() {
        let flag = DirtyFlag::new();
        let other = flag.clone();
        flag.mark();
        assert!(other.is_dirty());
        assert!(other.take());
        assert!(!flag.is_dirty());
    }
}
