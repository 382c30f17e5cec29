// SPDX-License-Identifier: MPL-2.0
//! Removal timer scheduling port.
//!
//! The store's only outbound dependency is a timer primitive: schedule a
//! callback after a delay, cancel it by handle. This module defines the
//! [`RemovalScheduler`] trait and two implementations:
//!
//! - [`TokioScheduler`]: the default, backed by the tokio runtime
//! - [`ManualScheduler`]: deterministic fire-on-demand scheduling for
//!   tests and simulations
//!
//! # Design Notes
//!
//! - Cancellation is tied to [`TimerGuard`] ownership: dropping the guard
//!   cancels the timer if it has not fired yet
//! - Cancelling a timer that already fired is a no-op
//! - The trait is `Send + Sync` so schedulers can be shared across tasks

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

/// Callback run when a removal timer expires.
pub type RemovalCallback = Box<dyn FnOnce() + Send>;

/// Timer-scheduling primitive supplied by the host runtime.
pub trait RemovalScheduler: Send + Sync {
    /// Schedules `callback` to run once after `delay`.
    ///
    /// The returned guard cancels the timer when dropped.
    fn schedule(&self, delay: Duration, callback: RemovalCallback) -> TimerGuard;
}

/// Handle to a pending timer.
///
/// Dropping the guard cancels the timer. Once the timer has fired,
/// cancellation has no effect.
pub struct TimerGuard {
    cancel: Option<Box<dyn FnMut() + Send>>,
}

impl TimerGuard {
    /// Creates a guard from a cancellation closure.
    #[must_use]
    pub fn new(cancel: impl FnMut() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Cancels the timer explicitly.
    pub fn cancel(mut self) {
        self.run_cancel();
    }

    fn run_cancel(&mut self) {
        if let Some(mut cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for TimerGuard {
    fn drop(&mut self) {
        self.run_cancel();
    }
}

impl fmt::Debug for TimerGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerGuard")
            .field("armed", &self.cancel.is_some())
            .finish()
    }
}

/// Scheduler backed by the tokio runtime.
///
/// Must be used from within a tokio runtime: scheduling spawns a task
/// that sleeps for the delay and then runs the callback. Cancellation
/// aborts the task.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioScheduler;

impl TokioScheduler {
    /// Creates a tokio-backed scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl RemovalScheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, callback: RemovalCallback) -> TimerGuard {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            callback();
        });
        TimerGuard::new(move || handle.abort())
    }
}

/// Deterministic scheduler that fires timers only on demand.
///
/// Scheduled callbacks are held until [`ManualScheduler::fire_next`] or
/// [`ManualScheduler::fire_all`] is called, which makes timing-dependent
/// store behavior fully reproducible in tests.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    inner: Arc<Mutex<ManualInner>>,
}

#[derive(Default)]
struct ManualInner {
    next_key: u64,
    pending: BTreeMap<u64, PendingTimer>,
}

struct PendingTimer {
    delay: Duration,
    callback: RemovalCallback,
}

impl fmt::Debug for ManualInner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualInner")
            .field("pending", &self.pending.len())
            .finish()
    }
}

impl ManualScheduler {
    /// Creates an empty manual scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of timers waiting to fire.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.lock().pending.len()
    }

    /// Returns the delay the next pending timer was scheduled with.
    #[must_use]
    pub fn next_delay(&self) -> Option<Duration> {
        self.lock()
            .pending
            .values()
            .next()
            .map(|timer| timer.delay)
    }

    /// Fires the oldest pending timer.
    ///
    /// Returns false if no timer was pending. The callback runs on the
    /// calling thread, outside the scheduler's internal lock, so it may
    /// freely schedule or cancel further timers.
    pub fn fire_next(&self) -> bool {
        let entry = {
            let mut inner = self.lock();
            inner.pending.pop_first()
        };
        match entry {
            Some((_, timer)) => {
                (timer.callback)();
                true
            }
            None => false,
        }
    }

    /// Fires all pending timers in scheduling order.
    ///
    /// Timers scheduled by the callbacks themselves are fired too.
    pub fn fire_all(&self) {
        while self.fire_next() {}
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ManualInner> {
        // A poisoned lock only means a fired callback panicked; the
        // pending map itself is still coherent.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl RemovalScheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, callback: RemovalCallback) -> TimerGuard {
        let key = {
            let mut inner = self.lock();
            let key = inner.next_key;
            inner.next_key += 1;
            inner.pending.insert(key, PendingTimer { delay, callback });
            key
        };

        let inner = Arc::clone(&self.inner);
        TimerGuard::new(move || {
            let mut inner = inner.lock().unwrap_or_else(PoisonError::into_inner);
            inner.pending.remove(&key);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_callback(counter: &Arc<AtomicUsize>) -> RemovalCallback {
        let counter = Arc::clone(counter);
        Box::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn manual_scheduler_holds_until_fired() {
        let scheduler = ManualScheduler::new();
        let fired = Arc::new(AtomicUsize::new(0));

        let _guard = scheduler.schedule(Duration::from_secs(3), counting_callback(&fired));

        assert_eq!(scheduler.pending(), 1);
        assert_eq!(fired.load(Ordering::SeqCst), 0);

        assert!(scheduler.fire_next());
        assert_eq!(fired.load(Ordering::SeqCst), 1);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn manual_scheduler_fires_in_scheduling_order() {
        let scheduler = ManualScheduler::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        let mut guards = Vec::new();
        for label in ["first", "second", "third"] {
            let order = Arc::clone(&order);
            guards.push(scheduler.schedule(
                Duration::from_secs(1),
                Box::new(move || order.lock().unwrap().push(label)),
            ));
        }

        scheduler.fire_all();

        assert_eq!(*order.lock().unwrap(), vec!["first", "second", "third"]);
    }

    #[test]
    fn dropping_guard_cancels_pending_timer() {
        let scheduler = ManualScheduler::new();
        let fired = Arc::new(AtomicUsize::new(0));

        let guard = scheduler.schedule(Duration::from_secs(3), counting_callback(&fired));
        drop(guard);

        assert_eq!(scheduler.pending(), 0);
        assert!(!scheduler.fire_next());
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn cancel_after_fire_is_noop() {
        let scheduler = ManualScheduler::new();
        let fired = Arc::new(AtomicUsize::new(0));

        let guard = scheduler.schedule(Duration::from_secs(3), counting_callback(&fired));
        scheduler.fire_all();
        guard.cancel();

        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn next_delay_reports_scheduled_delay() {
        let scheduler = ManualScheduler::new();
        assert_eq!(scheduler.next_delay(), None);

        let _guard = scheduler.schedule(Duration::from_millis(3000), Box::new(|| {}));
        assert_eq!(scheduler.next_delay(), Some(Duration::from_millis(3000)));
    }

    #[tokio::test]
    async fn tokio_scheduler_fires_after_delay() {
        let scheduler = TokioScheduler::new();
        let fired = Arc::new(AtomicUsize::new(0));

        let _guard = scheduler.schedule(Duration::from_millis(10), counting_callback(&fired));

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn tokio_scheduler_cancellation_prevents_fire() {
        let scheduler = TokioScheduler::new();
        let fired = Arc::new(AtomicUsize::new(0));

        let guard = scheduler.schedule(Duration::from_millis(10), counting_callback(&fired));
        guard.cancel();

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }
}
