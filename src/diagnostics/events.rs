// SPDX-License-Identifier: MPL-2.0
//! Diagnostic event definitions.
//!
//! Events capture the store's lifecycle moments with a timestamp; they
//! carry ids and severities only, never display payloads.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::store::{NotificationId, Severity};

/// A single timestamped diagnostic event.
#[derive(Debug, Clone)]
pub struct DiagnosticEvent {
    /// When the event was recorded.
    pub timestamp: DateTime<Utc>,
    /// What happened.
    pub kind: DiagnosticEventKind,
}

impl DiagnosticEvent {
    /// Creates an event stamped with the current time.
    #[must_use]
    pub fn new(kind: DiagnosticEventKind) -> Self {
        Self {
            timestamp: Utc::now(),
            kind,
        }
    }
}

/// The store lifecycle moments recorded by diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticEventKind {
    /// A notification entered the store.
    NotificationAdded {
        /// Assigned identifier.
        id: NotificationId,
        /// Severity it was created with.
        severity: Severity,
    },
    /// An entry was evicted by capacity pressure on add.
    CapacityEviction {
        /// Identifier of the evicted entry.
        evicted: NotificationId,
    },
    /// A dismissal was applied and a removal timer armed.
    DismissRequested {
        /// Target identifier.
        id: NotificationId,
    },
    /// A removal timer expired.
    RemovalFired {
        /// Target identifier.
        id: NotificationId,
    },
    /// The store was emptied and all timers cancelled.
    StoreCleared {
        /// Number of entries removed.
        removed: usize,
    },
}

impl fmt::Display for DiagnosticEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticEventKind::NotificationAdded { id, severity } => {
                write!(f, "added #{id} ({severity})")
            }
            DiagnosticEventKind::CapacityEviction { evicted } => {
                write!(f, "evicted #{evicted}")
            }
            DiagnosticEventKind::DismissRequested { id } => write!(f, "dismissed #{id}"),
            DiagnosticEventKind::RemovalFired { id } => write!(f, "removed #{id}"),
            DiagnosticEventKind::StoreCleared { removed } => {
                write!(f, "cleared {removed} notifications")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_is_stamped_at_creation() {
        let before = Utc::now();
        let event = DiagnosticEvent::new(DiagnosticEventKind::StoreCleared { removed: 0 });
        let after = Utc::now();

        assert!(event.timestamp >= before);
        assert!(event.timestamp <= after);
    }

    #[test]
    fn kind_display_is_compact() {
        let kind = DiagnosticEventKind::NotificationAdded {
            id: NotificationId::from_raw(7),
            severity: Severity::Warning,
        };
        assert_eq!(kind.to_string(), "added #7 (warning)");

        let kind = DiagnosticEventKind::StoreCleared { removed: 3 };
        assert_eq!(kind.to_string(), "cleared 3 notifications");
    }
}
