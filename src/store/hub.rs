// SPDX-License-Identifier: MPL-2.0
//! Notification store orchestration.
//!
//! [`ToastHub`] wraps the pure reducer with everything effectful:
//! identifier generation, removal timer scheduling, observer
//! notification, and the optional diagnostics hook. The hub is cheap to
//! clone (`Arc`-backed) and safe to hand to UI components and timer
//! callbacks alike.
//!
//! Lifecycle of a notification:
//!
//! 1. [`ToastHub::notify`] (or a severity shortcut) assigns a fresh id
//!    and prepends the entry, evicting overflow beyond capacity
//! 2. the returned [`ToastHandle`] can update the entry in place
//! 3. [`ToastHub::dismiss`] flips the entry invisible and arms exactly
//!    one removal timer for it
//! 4. the timer expiry (or [`ToastHub::clear_all`]) deletes the entry
//!    and clears the timer registration

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use crate::config::{
    Config, DEFAULT_REMOVAL_DELAY_MS, DEFAULT_STORE_CAPACITY, MAX_REMOVAL_DELAY_MS,
    MIN_REMOVAL_DELAY_MS,
};
use crate::diagnostics::DiagnosticsHandle;
use crate::error::{Error, Result};

use super::notification::{
    Notification, NotificationId, NotificationInput, NotificationPatch, Severity,
    VisibilityCallback,
};
use super::observers::{Observer, ObserverRegistry, Subscription};
use super::scheduler::{RemovalScheduler, TimerGuard, TokioScheduler};
use super::state::{reduce, Action, State};

/// Validated construction options for a [`ToastHub`].
#[derive(Debug, Clone, Copy)]
pub struct StoreOptions {
    capacity: usize,
    removal_delay: Duration,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_STORE_CAPACITY,
            removal_delay: Duration::from_millis(DEFAULT_REMOVAL_DELAY_MS),
        }
    }
}

impl StoreOptions {
    /// Creates options with the given capacity and removal delay.
    ///
    /// The delay is clamped to the documented bounds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `capacity` is zero.
    pub fn new(capacity: usize, removal_delay: Duration) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::Config(
                "store capacity must be at least 1".to_string(),
            ));
        }
        let min = Duration::from_millis(MIN_REMOVAL_DELAY_MS);
        let max = Duration::from_millis(MAX_REMOVAL_DELAY_MS);
        Ok(Self {
            capacity,
            removal_delay: removal_delay.clamp(min, max),
        })
    }

    /// Derives options from a loaded [`Config`], applying defaults for
    /// absent fields.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the configured capacity is zero.
    pub fn from_config(config: &Config) -> Result<Self> {
        let capacity = config.capacity.unwrap_or(DEFAULT_STORE_CAPACITY);
        let delay_ms = config.removal_delay_ms.unwrap_or(DEFAULT_REMOVAL_DELAY_MS);
        Self::new(capacity, Duration::from_millis(delay_ms))
    }

    /// Returns the configured capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the removal delay.
    #[must_use]
    pub fn removal_delay(&self) -> Duration {
        self.removal_delay
    }
}

struct HubInner {
    state: Mutex<State>,
    observers: Arc<Mutex<ObserverRegistry>>,
    /// One pending removal timer per dismissed id. Entries are dropped
    /// (cancelling the timer if still armed) on every removal path.
    timers: Mutex<HashMap<NotificationId, TimerGuard>>,
    scheduler: Box<dyn RemovalScheduler>,
    removal_delay: Duration,
    next_id: AtomicU64,
    diagnostics: Mutex<Option<DiagnosticsHandle>>,
}

/// The notification store.
///
/// Owns the bounded notification sequence, applies every mutation
/// through the pure reducer, and publishes the resulting snapshot to all
/// subscribed observers synchronously, in registration order.
///
/// Clones share the same underlying store.
#[derive(Clone)]
pub struct ToastHub {
    inner: Arc<HubInner>,
}

impl ToastHub {
    /// Creates a store with default options and the tokio scheduler.
    ///
    /// Default capacity is 1: a new toast replaces the previous one, the
    /// admin console's reference behavior.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(StoreOptions::default())
    }

    /// Creates a store with the given options and the tokio scheduler.
    #[must_use]
    pub fn with_options(options: StoreOptions) -> Self {
        Self::with_scheduler(options, TokioScheduler::new())
    }

    /// Creates a store with the given options and a custom removal
    /// scheduler.
    #[must_use]
    pub fn with_scheduler(
        options: StoreOptions,
        scheduler: impl RemovalScheduler + 'static,
    ) -> Self {
        Self {
            inner: Arc::new(HubInner {
                state: Mutex::new(State::new(options.capacity)),
                observers: Arc::new(Mutex::new(ObserverRegistry::default())),
                timers: Mutex::new(HashMap::new()),
                scheduler: Box::new(scheduler),
                removal_delay: options.removal_delay,
                next_id: AtomicU64::new(1),
                diagnostics: Mutex::new(None),
            }),
        }
    }

    /// Creates a notification and returns a handle to it.
    ///
    /// The notification is prepended visible, with a wired
    /// visibility-change capability: when the UI reports it hidden, the
    /// store dismisses it. Overflow beyond capacity is evicted from the
    /// tail; an evicted entry's pending removal timer, if any, later
    /// fires as a harmless no-op.
    pub fn notify(&self, input: NotificationInput) -> ToastHandle {
        let id = NotificationId::from_raw(self.inner.next_id.fetch_add(1, Ordering::Relaxed));

        let weak = Arc::downgrade(&self.inner);
        let on_visibility_change: VisibilityCallback = Arc::new(move |visible| {
            if !visible {
                if let Some(inner) = weak.upgrade() {
                    ToastHub { inner }.dismiss(id);
                }
            }
        });

        let notification = Notification::from_input(id, input, on_visibility_change);
        let severity = notification.severity();

        let evicted = {
            let state = self.lock_state();
            if state.len() == state.capacity() {
                state.toasts().last().map(Notification::id)
            } else {
                None
            }
        };

        self.dispatch(Action::Add(notification));

        if let Some(diagnostics) = self.diagnostics() {
            diagnostics.notification_added(id, severity);
            if let Some(evicted) = evicted {
                diagnostics.capacity_eviction(evicted);
            }
        }

        ToastHandle {
            id,
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Creates a success notification.
    pub fn success(&self, input: NotificationInput) -> ToastHandle {
        self.notify_with_severity(input, Severity::Success)
    }

    /// Creates an error notification.
    pub fn error(&self, input: NotificationInput) -> ToastHandle {
        self.notify_with_severity(input, Severity::Error)
    }

    /// Creates a warning notification.
    pub fn warning(&self, input: NotificationInput) -> ToastHandle {
        self.notify_with_severity(input, Severity::Warning)
    }

    /// Creates an info notification.
    pub fn info(&self, input: NotificationInput) -> ToastHandle {
        self.notify_with_severity(input, Severity::Info)
    }

    fn notify_with_severity(&self, input: NotificationInput, severity: Severity) -> ToastHandle {
        self.notify(input.severity(severity).style(severity.style_hint()))
    }

    /// Dismisses the notification with the given id.
    ///
    /// The entry turns invisible but keeps its capacity slot until the
    /// removal timer fires. Dismissing an absent id is a no-op; repeated
    /// dismissal never arms a second timer.
    pub fn dismiss(&self, id: NotificationId) {
        self.dismiss_target(Some(id));
    }

    /// Dismisses every active notification.
    ///
    /// Each currently-held id without a pending removal timer gets one.
    pub fn dismiss_all(&self) {
        self.dismiss_target(None);
    }

    fn dismiss_target(&self, target: Option<NotificationId>) {
        let affected: Vec<NotificationId> = {
            let state = self.lock_state();
            state
                .toasts()
                .iter()
                .map(Notification::id)
                .filter(|id| target.is_none() || target == Some(*id))
                .collect()
        };

        self.dispatch(Action::Dismiss(target));

        for id in &affected {
            self.schedule_removal(*id);
        }

        if let Some(diagnostics) = self.diagnostics() {
            for id in &affected {
                diagnostics.dismiss_requested(*id);
            }
        }
    }

    /// Removes the notification with the given id immediately,
    /// cancelling its pending removal timer if one is armed.
    ///
    /// Removing an absent id is a no-op.
    pub fn remove(&self, id: NotificationId) {
        let guard = self.lock_timers().remove(&id);
        drop(guard);
        self.dispatch(Action::Remove(Some(id)));
    }

    /// Empties the store and cancels every pending removal timer.
    pub fn clear_all(&self) {
        let guards: Vec<TimerGuard> = {
            let mut timers = self.lock_timers();
            timers.drain().map(|(_, guard)| guard).collect()
        };
        drop(guards);

        let removed = self.lock_state().len();
        self.dispatch(Action::Remove(None));

        if let Some(diagnostics) = self.diagnostics() {
            diagnostics.store_cleared(removed);
        }
    }

    /// Registers an observer.
    ///
    /// The observer is invoked synchronously with the full state
    /// snapshot after every accepted action, in registration order.
    /// The returned subscription unsubscribes idempotently.
    pub fn subscribe(&self, observer: impl Fn(&State) + Send + Sync + 'static) -> Subscription {
        let observer: Observer = Arc::new(observer);
        let id = {
            let mut registry = self.lock_observers();
            registry.register(observer)
        };
        Subscription::new(Arc::downgrade(&self.inner.observers), id)
    }

    /// Returns a clone of the current state.
    #[must_use]
    pub fn snapshot(&self) -> State {
        self.lock_state().clone()
    }

    /// Returns the configured capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.lock_state().capacity()
    }

    /// Returns the configured removal delay.
    #[must_use]
    pub fn removal_delay(&self) -> Duration {
        self.inner.removal_delay
    }

    /// Attaches a diagnostics handle.
    ///
    /// Store lifecycle moments (adds, evictions, dismissals, removals,
    /// clears) are logged through it from then on.
    pub fn set_diagnostics(&self, handle: DiagnosticsHandle) {
        let mut diagnostics = self
            .inner
            .diagnostics
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        *diagnostics = Some(handle);
    }

    /// Arms a removal timer for `id` unless one is already pending.
    fn schedule_removal(&self, id: NotificationId) {
        let mut timers = self.lock_timers();
        if timers.contains_key(&id) {
            return;
        }

        let weak = Arc::downgrade(&self.inner);
        let guard = self.inner.scheduler.schedule(
            self.inner.removal_delay,
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    ToastHub { inner }.removal_expired(id);
                }
            }),
        );
        timers.insert(id, guard);
    }

    /// Timer expiry path: clears the timer registration, then removes
    /// the entry. A stale expiry for an already-removed id degrades to a
    /// no-op dispatch.
    fn removal_expired(&self, id: NotificationId) {
        let guard = self.lock_timers().remove(&id);
        drop(guard);

        self.dispatch(Action::Remove(Some(id)));

        if let Some(diagnostics) = self.diagnostics() {
            diagnostics.removal_fired(id);
        }
    }

    /// Applies an action and publishes the new snapshot.
    ///
    /// Observers run outside the state lock, so they may call back into
    /// the store freely.
    fn dispatch(&self, action: Action) {
        let snapshot = {
            let mut state = self.lock_state();
            *state = reduce(&state, action);
            state.clone()
        };

        let observers = self.lock_observers().snapshot();
        for observer in observers {
            observer(&snapshot);
        }
    }

    fn diagnostics(&self) -> Option<DiagnosticsHandle> {
        self.inner
            .diagnostics
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    // The state is replaced wholesale on every dispatch, so a lock
    // poisoned by a panicking caller still holds a coherent value.
    fn lock_state(&self) -> MutexGuard<'_, State> {
        self.inner.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_timers(&self) -> MutexGuard<'_, HashMap<NotificationId, TimerGuard>> {
        self.inner.timers.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_observers(&self) -> MutexGuard<'_, ObserverRegistry> {
        self.inner
            .observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ToastHub {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ToastHub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock_state();
        f.debug_struct("ToastHub")
            .field("len", &state.len())
            .field("capacity", &state.capacity())
            .field("observers", &self.lock_observers().len())
            .finish_non_exhaustive()
    }
}

/// Handle to a created notification.
///
/// Holds no strong reference to the store; operations on a handle whose
/// store has been dropped are no-ops.
#[derive(Debug, Clone)]
pub struct ToastHandle {
    id: NotificationId,
    inner: Weak<HubInner>,
}

impl ToastHandle {
    /// Returns the notification's id.
    #[must_use]
    pub fn id(&self) -> NotificationId {
        self.id
    }

    /// Merges a partial update into the notification.
    ///
    /// A no-op if the notification has already been evicted or removed.
    pub fn update(&self, patch: NotificationPatch) {
        if let Some(inner) = self.inner.upgrade() {
            ToastHub { inner }.dispatch(Action::Update { id: self.id, patch });
        }
    }

    /// Dismisses the notification.
    pub fn dismiss(&self) {
        if let Some(inner) = self.inner.upgrade() {
            ToastHub { inner }.dismiss(self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::scheduler::ManualScheduler;
    use std::sync::atomic::AtomicUsize;

    fn hub_with_capacity(capacity: usize) -> (ToastHub, ManualScheduler) {
        let scheduler = ManualScheduler::new();
        let options =
            StoreOptions::new(capacity, Duration::from_millis(3000)).expect("valid options");
        let hub = ToastHub::with_scheduler(options, scheduler.clone());
        (hub, scheduler)
    }

    #[test]
    fn notify_assigns_monotonically_increasing_ids() {
        let (hub, _) = hub_with_capacity(5);
        let a = hub.notify(NotificationInput::new());
        let b = hub.notify(NotificationInput::new());

        assert!(b.id().value() > a.id().value());
    }

    #[test]
    fn capacity_zero_is_rejected_at_construction() {
        let err = StoreOptions::new(0, Duration::from_millis(3000)).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn removal_delay_is_clamped_to_bounds() {
        let options = StoreOptions::new(1, Duration::from_secs(3600)).expect("valid options");
        assert_eq!(
            options.removal_delay(),
            Duration::from_millis(MAX_REMOVAL_DELAY_MS)
        );
    }

    #[test]
    fn options_from_config_applies_defaults() {
        let config = Config::default();
        let options = StoreOptions::from_config(&config).expect("default config is valid");

        assert_eq!(options.capacity(), DEFAULT_STORE_CAPACITY);
        assert_eq!(
            options.removal_delay(),
            Duration::from_millis(DEFAULT_REMOVAL_DELAY_MS)
        );
    }

    #[test]
    fn dismiss_hides_entry_and_arms_one_timer() {
        let (hub, scheduler) = hub_with_capacity(2);
        let handle = hub.notify(NotificationInput::new().title("hello"));

        handle.dismiss();

        let state = hub.snapshot();
        assert_eq!(state.len(), 1);
        assert!(!state.toasts()[0].is_visible());
        assert_eq!(scheduler.pending(), 1);

        // Repeated dismissal never arms a second timer.
        handle.dismiss();
        hub.dismiss(handle.id());
        assert_eq!(scheduler.pending(), 1);
    }

    #[test]
    fn timer_expiry_removes_entry_and_registration() {
        let (hub, scheduler) = hub_with_capacity(2);
        let handle = hub.notify(NotificationInput::new());
        handle.dismiss();

        scheduler.fire_all();

        assert!(hub.snapshot().is_empty());
        assert_eq!(scheduler.pending(), 0);

        // A later dismissal of the same id arms nothing: the id is gone.
        hub.dismiss(handle.id());
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn dismiss_uses_configured_delay() {
        let scheduler = ManualScheduler::new();
        let options = StoreOptions::new(1, Duration::from_millis(500)).expect("valid options");
        let hub = ToastHub::with_scheduler(options, scheduler.clone());

        hub.notify(NotificationInput::new()).dismiss();

        assert_eq!(scheduler.next_delay(), Some(Duration::from_millis(500)));
    }

    #[test]
    fn clear_all_empties_store_and_cancels_timers() {
        let (hub, scheduler) = hub_with_capacity(3);
        hub.notify(NotificationInput::new()).dismiss();
        hub.notify(NotificationInput::new()).dismiss();
        assert_eq!(scheduler.pending(), 2);

        hub.clear_all();

        assert!(hub.snapshot().is_empty());
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn evicted_entry_timer_fires_harmlessly() {
        let (hub, scheduler) = hub_with_capacity(1);
        let first = hub.notify(NotificationInput::new().title("first"));
        first.dismiss();

        // Capacity pressure evicts the dismissed entry; its timer stays
        // armed and must no-op against the replacement.
        let _second = hub.notify(NotificationInput::new().title("second"));
        scheduler.fire_all();

        let state = hub.snapshot();
        assert_eq!(state.len(), 1);
        assert_eq!(state.toasts()[0].title(), Some("second"));
    }

    #[test]
    fn explicit_remove_cancels_pending_timer() {
        let (hub, scheduler) = hub_with_capacity(2);
        let handle = hub.notify(NotificationInput::new());
        handle.dismiss();
        assert_eq!(scheduler.pending(), 1);

        hub.remove(handle.id());

        assert!(hub.snapshot().is_empty());
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn visibility_change_report_triggers_dismissal() {
        let (hub, scheduler) = hub_with_capacity(2);
        hub.notify(NotificationInput::new());

        let state = hub.snapshot();
        state.toasts()[0].visibility_changed(false);

        assert!(!hub.snapshot().toasts()[0].is_visible());
        assert_eq!(scheduler.pending(), 1);
    }

    #[test]
    fn severity_shortcuts_prefill_severity_and_style() {
        let (hub, _) = hub_with_capacity(4);
        hub.success(NotificationInput::new().title("saved"));

        let state = hub.snapshot();
        let toast = &state.toasts()[0];
        assert_eq!(toast.severity(), Severity::Success);
        assert_eq!(toast.style(), Severity::Success.style_hint());
    }

    #[test]
    fn observers_are_notified_per_dispatch() {
        let (hub, _) = hub_with_capacity(2);
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = Arc::clone(&calls);
        let _subscription = hub.subscribe(move |_| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
        });

        let handle = hub.notify(NotificationInput::new());
        handle.update(NotificationPatch::new().title("t"));
        handle.dismiss();

        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn observer_can_reenter_the_store() {
        let (hub, _) = hub_with_capacity(2);
        let hub_clone = hub.clone();
        let _subscription = hub.subscribe(move |state| {
            // Reading back in from an observer must not deadlock.
            let _ = hub_clone.snapshot();
            let _ = state.len();
        });

        hub.notify(NotificationInput::new());
    }

    #[test]
    fn handle_outliving_store_is_inert() {
        let (hub, _) = hub_with_capacity(1);
        let handle = hub.notify(NotificationInput::new());
        drop(hub);

        handle.update(NotificationPatch::new().title("late"));
        handle.dismiss();
    }

    #[test]
    fn diagnostics_records_lifecycle_events() {
        use crate::diagnostics::{DiagnosticEventKind, DiagnosticsCollector};

        let (hub, scheduler) = hub_with_capacity(1);
        let (mut collector, handle) = DiagnosticsCollector::with_raw_capacity(16);
        hub.set_diagnostics(handle);

        let toast = hub.error(NotificationInput::new().title("boom"));
        toast.dismiss();
        scheduler.fire_all();

        collector.process_pending();
        let kinds: Vec<_> = collector.events().map(|e| e.kind.clone()).collect();

        assert!(matches!(
            kinds[0],
            DiagnosticEventKind::NotificationAdded {
                severity: Severity::Error,
                ..
            }
        ));
        assert!(kinds
            .iter()
            .any(|k| matches!(k, DiagnosticEventKind::DismissRequested { .. })));
        assert!(kinds
            .iter()
            .any(|k| matches!(k, DiagnosticEventKind::RemovalFired { .. })));
    }
}
