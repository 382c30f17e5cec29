// SPDX-License-Identifier: MPL-2.0
//! `toast_hub` is an in-memory toast notification store for UI applications.
//!
//! It decouples "something happened" events from the components that render
//! them: a bounded, ordered notification sequence driven by a pure reducer,
//! delayed cancellable removal timers, and synchronous full-snapshot
//! publication to registered observers.

#![doc(html_root_url = "https://docs.rs/toast_hub/0.1.0")]

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod store;
