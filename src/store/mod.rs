// SPDX-License-Identifier: MPL-2.0
//! In-memory toast notification store.
//!
//! This module decouples "something happened" events from the UI
//! components that render them: producers create notifications through
//! the store, consumers subscribe to full state snapshots.
//!
//! # Components
//!
//! - [`notification`] - Core `Notification` struct with severity levels
//!   and presentation hints
//! - [`state`] - Store state and the pure reducer over the closed
//!   action set
//! - [`hub`] - `ToastHub` orchestration: id generation, removal timers,
//!   observer notification
//! - [`scheduler`] - The cancellable timer port with tokio-backed and
//!   manual implementations
//! - [`observers`] - Subscription handling
//!
//! # Usage
//!
//! ```
//! use toast_hub::store::{ManualScheduler, NotificationInput, StoreOptions, ToastHub};
//! use std::time::Duration;
//!
//! let options = StoreOptions::new(3, Duration::from_millis(3000)).unwrap();
//! let hub = ToastHub::with_scheduler(options, ManualScheduler::new());
//!
//! let subscription = hub.subscribe(|state| {
//!     // render state.toasts()
//!     let _ = state.len();
//! });
//!
//! let toast = hub.success(NotificationInput::new().title("User created"));
//! toast.dismiss();
//! subscription.unsubscribe();
//! ```
//!
//! # Design Considerations
//!
//! - Dismissal and removal are distinct: a dismissed toast stays in the
//!   sequence (and counts toward capacity) until its removal timer fires
//! - Capacity is the only backpressure: the oldest entry is evicted on
//!   overflow regardless of visibility or pending timers
//! - Operations against an id that is already gone are silent no-ops;
//!   removal races with late-firing timers are expected

mod hub;
mod notification;
mod observers;
mod scheduler;
mod state;

pub use hub::{StoreOptions, ToastHandle, ToastHub};
pub use notification::{
    Notification, NotificationId, NotificationInput, NotificationPatch, Severity, StyleHint,
    Variant, VisibilityCallback,
};
pub use observers::{Observer, Subscription};
pub use scheduler::{
    ManualScheduler, RemovalCallback, RemovalScheduler, TimerGuard, TokioScheduler,
};
pub use state::{reduce, Action, State};
