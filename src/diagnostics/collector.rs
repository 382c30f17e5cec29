// SPDX-License-Identifier: MPL-2.0
//! Diagnostics collector for aggregating and storing diagnostic events.
//!
//! This module provides the collector that receives events from the
//! store and keeps them in a circular buffer, plus the cheap cloneable
//! handle the store logs through.

use crossbeam_channel::{bounded, Receiver, Sender};

use super::buffer::{BufferCapacity, CircularBuffer};
use super::events::{DiagnosticEvent, DiagnosticEventKind};
use crate::store::{NotificationId, Severity};

/// Capacity of the handle-to-collector channel. Events beyond it are
/// dropped rather than blocking the dispatching thread.
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Handle for sending diagnostic events to the collector.
///
/// This handle is cheap to clone and can be shared across threads.
/// All logging methods are non-blocking and drop the event if the
/// internal channel is full (backpressure protection).
#[derive(Clone, Debug)]
pub struct DiagnosticsHandle {
    event_tx: Sender<DiagnosticEvent>,
}

impl DiagnosticsHandle {
    /// Logs an arbitrary event kind.
    pub fn log(&self, kind: DiagnosticEventKind) {
        // Non-blocking send - drop if channel is full
        let _ = self.event_tx.try_send(DiagnosticEvent::new(kind));
    }

    /// Logs a notification entering the store.
    pub fn notification_added(&self, id: NotificationId, severity: Severity) {
        self.log(DiagnosticEventKind::NotificationAdded { id, severity });
    }

    /// Logs an eviction caused by capacity pressure.
    pub fn capacity_eviction(&self, evicted: NotificationId) {
        self.log(DiagnosticEventKind::CapacityEviction { evicted });
    }

    /// Logs a dismissal.
    pub fn dismiss_requested(&self, id: NotificationId) {
        self.log(DiagnosticEventKind::DismissRequested { id });
    }

    /// Logs a removal timer expiry.
    pub fn removal_fired(&self, id: NotificationId) {
        self.log(DiagnosticEventKind::RemovalFired { id });
    }

    /// Logs a full store clear.
    pub fn store_cleared(&self, removed: usize) {
        self.log(DiagnosticEventKind::StoreCleared { removed });
    }
}

/// Collects diagnostic events into a bounded buffer.
///
/// Create a collector with [`DiagnosticsCollector::new`], hand its
/// [`DiagnosticsHandle`] to the store, and drain pending events
/// periodically with [`DiagnosticsCollector::process_pending`].
#[derive(Debug)]
pub struct DiagnosticsCollector {
    event_rx: Receiver<DiagnosticEvent>,
    buffer: CircularBuffer<DiagnosticEvent>,
}

impl DiagnosticsCollector {
    /// Creates a collector with the given buffer capacity, returning it
    /// together with the handle that feeds it.
    #[must_use]
    pub fn new(capacity: BufferCapacity) -> (Self, DiagnosticsHandle) {
        Self::with_raw_capacity(capacity.value())
    }

    /// Creates a collector with a raw buffer capacity.
    ///
    /// Useful for testing with small buffers; production use goes
    /// through [`DiagnosticsCollector::new`].
    #[must_use]
    pub fn with_raw_capacity(capacity: usize) -> (Self, DiagnosticsHandle) {
        let (event_tx, event_rx) = bounded(EVENT_CHANNEL_CAPACITY);
        let collector = Self {
            event_rx,
            buffer: CircularBuffer::with_raw_capacity(capacity),
        };
        (collector, DiagnosticsHandle { event_tx })
    }

    /// Drains all pending events into the buffer.
    ///
    /// Returns the number of events drained.
    pub fn process_pending(&mut self) -> usize {
        let mut drained = 0;
        while let Ok(event) = self.event_rx.try_recv() {
            self.buffer.push(event);
            drained += 1;
        }
        drained
    }

    /// Returns the buffered events in chronological order.
    pub fn events(&self) -> impl Iterator<Item = &DiagnosticEvent> {
        self.buffer.iter()
    }

    /// Returns the number of buffered events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Returns true if no events are buffered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Discards all buffered events.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}
