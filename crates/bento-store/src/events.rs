//! Store events and the sinks that receive them.
//!
//! The store never talks to a UI directly. It reports what happened to an
//! injected [`EventSink`]; a front end turns events into toasts through
//! [`StoreEvent::notification`].

use bento_core::WidgetId;
use std::sync::{Arc, Mutex, PoisonError};

/// Something the store did or failed to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    /// An existing profile was loaded.
    ProfileLoaded {
        /// Owner key
        owner: String,
        /// Number of widgets
        widgets: usize,
    },
    /// A starter profile was created for a first-time owner.
    ProfileCreated {
        /// Owner key
        owner: String,
    },
    /// Profile header or theme fields changed.
    ProfileUpdated,
    /// A widget was appended.
    WidgetAdded {
        /// New widget
        id: WidgetId,
        /// Assigned position
        position: u32,
    },
    /// A widget's fields were merged.
    WidgetUpdated {
        /// Target widget
        id: WidgetId,
    },
    /// A widget was removed.
    WidgetDeleted {
        /// Removed widget
        id: WidgetId,
    },
    /// Widgets were put in a new order.
    WidgetsReordered {
        /// Collection size
        count: usize,
    },
    /// A widget's dimensions changed.
    WidgetResized {
        /// Target widget
        id: WidgetId,
        /// New width
        width: u32,
        /// New height
        height: u32,
    },
    /// A reorder was rejected because the ids did not match.
    PermutationRejected {
        /// Collection size
        expected: usize,
        /// Ids supplied
        found: usize,
    },
    /// A write-through save failed; in-memory state was kept.
    PersistenceFailed {
        /// Repository error text
        message: String,
    },
}

/// Visual weight of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Neutral confirmation
    Info,
    /// Something the user should look at
    Warning,
    /// An operation failed
    Error,
}

/// A dismissible, non-blocking message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Headline
    pub title: String,
    /// Detail line
    pub description: String,
    /// Visual weight
    pub severity: Severity,
}

impl Notification {
    fn new(title: &str, description: &str, severity: Severity) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            severity,
        }
    }
}

impl StoreEvent {
    /// User-facing message for this event, if it warrants one.
    #[must_use]
    pub fn notification(&self) -> Option<Notification> {
        match self {
            Self::WidgetAdded { .. } => Some(Notification::new(
                "Widget added",
                "Your new widget has been added to your profile",
                Severity::Info,
            )),
            Self::WidgetUpdated { .. } => Some(Notification::new(
                "Widget updated",
                "Your widget has been updated successfully",
                Severity::Info,
            )),
            Self::WidgetDeleted { .. } => Some(Notification::new(
                "Widget deleted",
                "Your widget has been removed from your profile",
                Severity::Info,
            )),
            Self::ProfileUpdated => Some(Notification::new(
                "Profile updated",
                "Your profile has been updated successfully",
                Severity::Info,
            )),
            Self::PermutationRejected { .. } => Some(Notification::new(
                "Layout not changed",
                "Your widgets changed while you were rearranging them",
                Severity::Warning,
            )),
            Self::PersistenceFailed { message } => Some(Notification {
                title: "Couldn't save your changes".to_string(),
                description: message.clone(),
                severity: Severity::Error,
            }),
            Self::ProfileLoaded { .. }
            | Self::ProfileCreated { .. }
            | Self::WidgetsReordered { .. }
            | Self::WidgetResized { .. } => None,
        }
    }
}

/// Receiver of store events.
pub trait EventSink {
    /// Handle one event. Must not fail or block.
    fn emit(&self, event: &StoreEvent);
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: &StoreEvent) {}
}

/// Logs events through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: &StoreEvent) {
        match event.notification() {
            Some(Notification {
                severity: Severity::Error | Severity::Warning,
                title,
                description,
            }) => tracing::warn!(%title, %description, "store notification"),
            Some(Notification {
                title, description, ..
            }) => tracing::info!(%title, %description, "store notification"),
            None => tracing::debug!(?event, "store event"),
        }
    }
}

/// Keeps every event. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    events: Arc<Mutex<Vec<StoreEvent>>>,
}

impl RecordingSink {
    /// Empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything recorded so far.
    #[must_use]
    pub fn events(&self) -> Vec<StoreEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Notifications derived from the recorded events.
    #[must_use]
    pub fn notifications(&self) -> Vec<Notification> {
        self.events()
            .iter()
            .filter_map(StoreEvent::notification)
            .collect()
    }

    /// Drop recorded events.
    pub fn clear(&self) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: &StoreEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
    }
}
