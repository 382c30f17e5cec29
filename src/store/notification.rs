// SPDX-License-Identifier: MPL-2.0
//! Core notification data structures.
//!
//! This module defines the `Notification` struct, the closed `Severity`
//! set, and the severity-derived `StyleHint` presentation data used by
//! UI consumers.

use std::fmt;
use std::sync::Arc;

/// Unique identifier for a notification.
///
/// Identifiers are assigned by the store at creation time from a
/// per-store wrapping counter and are never reused within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationId(u64);

impl NotificationId {
    /// Creates an identifier from a raw counter value.
    pub(crate) const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw numeric value of this identifier.
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Severity of a notification.
///
/// Severity determines the default presentation styling only; the store
/// never branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Severity {
    /// Unstyled notification (default).
    #[default]
    Default,
    /// Operation completed successfully (green).
    Success,
    /// Error requiring attention (red, destructive variant).
    Error,
    /// Warning that doesn't block operation (yellow).
    Warning,
    /// Informational message (blue).
    Info,
}

impl Severity {
    /// Returns the default presentation hint for this severity.
    #[must_use]
    pub fn style_hint(&self) -> StyleHint {
        match self {
            Severity::Default => StyleHint::default(),
            Severity::Success => StyleHint {
                variant: Variant::Default,
                class: Some("bg-green-500 text-white border-green-600"),
            },
            Severity::Error => StyleHint {
                variant: Variant::Destructive,
                class: Some("bg-red-500 text-white border-red-600"),
            },
            Severity::Warning => StyleHint {
                variant: Variant::Default,
                class: Some("bg-yellow-500 text-black border-yellow-600"),
            },
            Severity::Info => StyleHint {
                variant: Variant::Default,
                class: Some("bg-blue-500 text-white border-blue-600"),
            },
        }
    }

    /// Returns a stable lowercase name for this severity.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Default => "default",
            Severity::Success => "success",
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Presentation variant of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Variant {
    /// Standard presentation.
    #[default]
    Default,
    /// Destructive presentation, used for errors.
    Destructive,
}

/// Severity-derived presentation hint.
///
/// Hints are plain data interpreted only by the UI layer. The `class`
/// string carries the utility classes the admin console's widgets apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StyleHint {
    /// Presentation variant.
    pub variant: Variant,
    /// Optional utility-class string for the rendered toast.
    pub class: Option<&'static str>,
}

/// Callback invoked by the UI layer when a notification's visibility
/// changes externally (e.g. the user closes it).
pub type VisibilityCallback = Arc<dyn Fn(bool) + Send + Sync>;

/// A notification managed by the store.
#[derive(Clone)]
pub struct Notification {
    id: NotificationId,
    title: Option<String>,
    description: Option<String>,
    severity: Severity,
    style: StyleHint,
    visible: bool,
    on_visibility_change: Option<VisibilityCallback>,
}

impl Notification {
    /// Builds a notification from a creation payload.
    ///
    /// The store assigns the identifier and wires the visibility-change
    /// capability; consumers go through `ToastHub::notify`.
    pub(crate) fn from_input(
        id: NotificationId,
        input: NotificationInput,
        on_visibility_change: VisibilityCallback,
    ) -> Self {
        let severity = input.severity.unwrap_or_default();
        let style = input.style.unwrap_or_else(|| severity.style_hint());
        Self {
            id,
            title: input.title,
            description: input.description,
            severity,
            style,
            visible: true,
            on_visibility_change: Some(on_visibility_change),
        }
    }

    /// Returns the notification's unique ID.
    #[must_use]
    pub fn id(&self) -> NotificationId {
        self.id
    }

    /// Returns the display title, if any.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Returns the display description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the severity.
    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Returns the presentation hint.
    #[must_use]
    pub fn style(&self) -> StyleHint {
        self.style
    }

    /// Returns whether the notification should currently be rendered.
    ///
    /// A dismissed notification stays in the sequence (and counts toward
    /// capacity) until its removal timer fires.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Reports an external visibility change back to the store.
    ///
    /// The UI layer calls this when the user hides the toast; a `false`
    /// value triggers the store's own dismissal flow.
    pub fn visibility_changed(&self, visible: bool) {
        if let Some(callback) = &self.on_visibility_change {
            callback(visible);
        }
    }

    /// Marks the notification invisible. Used by the reducer.
    pub(crate) fn hide(&mut self) {
        self.visible = false;
    }

    /// Merges a partial update into this notification in place.
    ///
    /// Only fields present in the patch change; identifier, visibility,
    /// and the visibility capability are never touched.
    pub(crate) fn merge(&mut self, patch: &NotificationPatch) {
        if let Some(title) = &patch.title {
            self.title = Some(title.clone());
        }
        if let Some(description) = &patch.description {
            self.description = Some(description.clone());
        }
        if let Some(severity) = patch.severity {
            self.severity = severity;
        }
        if let Some(style) = patch.style {
            self.style = style;
        }
    }
}

impl fmt::Debug for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notification")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("description", &self.description)
            .field("severity", &self.severity)
            .field("style", &self.style)
            .field("visible", &self.visible)
            .finish_non_exhaustive()
    }
}

/// Creation payload for a notification.
///
/// All fields are optional; severity defaults to [`Severity::Default`]
/// and the style hint is derived from the severity unless overridden.
#[derive(Debug, Clone, Default)]
pub struct NotificationInput {
    pub(crate) title: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) severity: Option<Severity>,
    pub(crate) style: Option<StyleHint>,
}

impl NotificationInput {
    /// Creates an empty payload.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the display title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the display description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the severity.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    /// Overrides the severity-derived style hint.
    #[must_use]
    pub fn style(mut self, style: StyleHint) -> Self {
        self.style = Some(style);
        self
    }
}

/// Partial update applied to an existing notification by id.
#[derive(Debug, Clone, Default)]
pub struct NotificationPatch {
    pub(crate) title: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) severity: Option<Severity>,
    pub(crate) style: Option<StyleHint>,
}

impl NotificationPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the display title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the display description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces the severity.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    /// Replaces the style hint.
    #[must_use]
    pub fn style(mut self, style: StyleHint) -> Self {
        self.style = Some(style);
        self
    }
}
