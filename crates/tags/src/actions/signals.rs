//! Signal traits toward the presentation layer
//!
//! The handler never reaches into ambient UI state; the notification sink
//! and the list view hook are injected at construction.

use crate::models::Target;

/// Severity of a user-facing outcome message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeSeverity {
    Success,
    Error,
}

/// A human-readable outcome message for one intent's settlement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: NoticeSeverity,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            severity: NoticeSeverity::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: NoticeSeverity::Error,
            message: message.into(),
        }
    }
}

/// Receiver of user-facing outcome messages (a toaster, typically)
///
/// Invoked exactly once per intent settlement, success or failure.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Hook into the external list view for optimistic removal
///
/// When a remove-tag action runs with `remove_from_list`, the view is told
/// to drop the items before the remote call resolves, and to restore them
/// if the call fails. The handler owns the signaling, not the view state.
pub trait TagListView: Send + Sync {
    /// Drop the items from the visible list ahead of remote confirmation
    fn drop_from_view(&self, targets: &[Target], tag_name: &str);

    /// Re-insert items whose optimistic removal could not be confirmed
    fn restore_to_view(&self, targets: &[Target], tag_name: &str);
}

/// A list view hook for contexts with no list to update
pub struct NullListView;

impl TagListView for NullListView {
    fn drop_from_view(&self, _targets: &[Target], _tag_name: &str) {}
    fn restore_to_view(&self, _targets: &[Target], _tag_name: &str) {}
}
