// SPDX-License-Identifier: MPL-2.0
//! Store state and the pure state transition function.
//!
//! The reducer is a pure function from (state, action) to the next
//! state: no identifier generation, no timer scheduling, no observer
//! notification. Those side effects live in the orchestration layer
//! (`hub`), which keeps every transition replayable in isolation.

use super::notification::{Notification, NotificationId, NotificationPatch};

/// Full store state: the ordered notification sequence plus its
/// configured capacity.
///
/// The sequence is ordered newest first. Its length never exceeds the
/// capacity; overflow is dropped from the tail on every add.
#[derive(Debug, Clone)]
pub struct State {
    toasts: Vec<Notification>,
    capacity: usize,
}

impl State {
    /// Creates an empty state with the given capacity.
    ///
    /// Callers validate the capacity before construction; the store
    /// rejects zero at configuration time.
    pub(crate) fn new(capacity: usize) -> Self {
        debug_assert!(capacity > 0, "capacity is validated at construction");
        Self {
            toasts: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Returns the active notifications, newest first.
    #[must_use]
    pub fn toasts(&self) -> &[Notification] {
        &self.toasts
    }

    /// Returns the notification with the given id, if present.
    #[must_use]
    pub fn get(&self, id: NotificationId) -> Option<&Notification> {
        self.toasts.iter().find(|t| t.id() == id)
    }

    /// Returns whether a notification with the given id is present.
    #[must_use]
    pub fn contains(&self, id: NotificationId) -> bool {
        self.get(id).is_some()
    }

    /// Returns the number of notifications currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    /// Returns true if no notifications are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    /// Returns the configured capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// State transition of the notification store.
///
/// A closed set: every mutation of the sequence goes through exactly one
/// of these four variants.
#[derive(Debug, Clone)]
pub enum Action {
    /// Prepend a notification, truncating overflow from the tail.
    Add(Notification),
    /// Merge a partial update into the entry with the given id.
    /// A missing id is a no-op.
    Update {
        /// Target notification.
        id: NotificationId,
        /// Fields to merge.
        patch: NotificationPatch,
    },
    /// Mark one entry (or all entries, when `None`) invisible.
    /// The entries stay in the sequence until removed.
    Dismiss(Option<NotificationId>),
    /// Delete one entry (or the whole sequence, when `None`).
    /// A missing id is a no-op.
    Remove(Option<NotificationId>),
}

/// Applies an action to a state, returning the next state.
///
/// Pure and deterministic; the input state is left untouched.
#[must_use]
pub fn reduce(state: &State, action: Action) -> State {
    let mut next = state.clone();
    match action {
        Action::Add(notification) => {
            next.toasts.insert(0, notification);
            next.toasts.truncate(next.capacity);
        }
        Action::Update { id, patch } => {
            if let Some(toast) = next.toasts.iter_mut().find(|t| t.id() == id) {
                toast.merge(&patch);
            }
        }
        Action::Dismiss(target) => {
            for toast in &mut next.toasts {
                if target.is_none() || target == Some(toast.id()) {
                    toast.hide();
                }
            }
        }
        Action::Remove(target) => match target {
            Some(id) => next.toasts.retain(|t| t.id() != id),
            None => next.toasts.clear(),
        },
    }
    next
}
