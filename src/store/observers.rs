// SPDX-License-Identifier: MPL-2.0
//! Observer registration and snapshot publication.
//!
//! Observers are plain callbacks invoked synchronously, in registration
//! order, with the full state snapshot after every accepted action.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError, Weak};

use super::state::State;

/// Callback receiving the full state snapshot after every transition.
pub type Observer = Arc<dyn Fn(&State) + Send + Sync>;

/// Registry of observers with stable registration order.
#[derive(Default)]
pub(crate) struct ObserverRegistry {
    next_id: u64,
    observers: Vec<(u64, Observer)>,
}

impl ObserverRegistry {
    /// Registers an observer, returning its registration key.
    pub(crate) fn register(&mut self, observer: Observer) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.observers.push((id, observer));
        id
    }

    /// Removes the observer with the given key.
    ///
    /// Returns false if the key was already removed; the remaining
    /// observers keep their relative order either way.
    pub(crate) fn remove(&mut self, id: u64) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(key, _)| *key != id);
        self.observers.len() != before
    }

    /// Returns the registered observers in registration order.
    ///
    /// The clones are cheap (`Arc`), and let the caller invoke observers
    /// without holding the registry lock.
    pub(crate) fn snapshot(&self) -> Vec<Observer> {
        self.observers.iter().map(|(_, obs)| Arc::clone(obs)).collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.observers.len()
    }
}

impl fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("observers", &self.observers.len())
            .finish()
    }
}

/// Handle returned by `ToastHub::subscribe`.
///
/// Unsubscription is explicit and idempotent: calling
/// [`Subscription::unsubscribe`] more than once is a safe no-op, and
/// dropping the handle does not unsubscribe.
#[derive(Debug, Clone)]
pub struct Subscription {
    registry: Weak<Mutex<ObserverRegistry>>,
    id: u64,
}

impl Subscription {
    pub(crate) fn new(registry: Weak<Mutex<ObserverRegistry>>, id: u64) -> Self {
        Self { registry, id }
    }

    /// Removes this subscription's observer from the registry.
    ///
    /// Only this observer is removed; other observers keep receiving
    /// snapshots in their original order. Safe to call any number of
    /// times, and after the store itself has been dropped.
    pub fn unsubscribe(&self) {
        if let Some(registry) = self.registry.upgrade() {
            let mut registry = registry.lock().unwrap_or_else(PoisonError::into_inner);
            registry.remove(self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_observer(counter: &Arc<AtomicUsize>) -> Observer {
        let counter = Arc::clone(counter);
        Arc::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn snapshot_preserves_registration_order() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let mut registry = ObserverRegistry::default();

        for label in ["first", "second", "third"] {
            let order = Arc::clone(&order);
            registry.register(Arc::new(move |_| order.lock().unwrap().push(label)));
        }

        let state = State::new(1);
        for observer in registry.snapshot() {
            observer(&state);
        }

        assert_eq!(*order.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn remove_is_idempotent() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut registry = ObserverRegistry::default();
        let id = registry.register(counting_observer(&counter));

        assert!(registry.remove(id));
        assert!(!registry.remove(id));
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn remove_keeps_other_observers_in_order() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let mut registry = ObserverRegistry::default();

        let mut ids = Vec::new();
        for label in ["a", "b", "c"] {
            let order = Arc::clone(&order);
            ids.push(registry.register(Arc::new(move |_| order.lock().unwrap().push(label))));
        }

        registry.remove(ids[1]);

        let state = State::new(1);
        for observer in registry.snapshot() {
            observer(&state);
        }

        assert_eq!(*order.lock().unwrap(), vec!["a", "c"]);
    }

    #[test]
    fn unsubscribe_after_registry_dropped_is_safe() {
        let registry = Arc::new(Mutex::new(ObserverRegistry::default()));
        let id = registry
            .lock()
            .unwrap()
            .register(Arc::new(|_| {}));
        let subscription = Subscription::new(Arc::downgrade(&registry), id);

        drop(registry);
        subscription.unsubscribe();
        subscription.unsubscribe();
    }
}
