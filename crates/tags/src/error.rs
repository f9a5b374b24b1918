//! Error taxonomy for tag operations
//!
//! Validation errors are detected locally and never reach the network;
//! `RemoteFailure` wraps any failure of a remote call with its cause attached.

use crate::actions::TagIntent;
use crate::models::TargetKind;

/// Error type for tag registry and tag action operations
#[derive(Debug, thiserror::Error)]
pub enum TagError {
    /// A tag with this name already exists; duplicate names are a usage
    /// error, never silently merged.
    #[error("a tag named '{name}' already exists")]
    DuplicateTag { name: String },

    /// Color index outside the fixed 10-entry palette
    #[error("color {color} is outside the tag palette (0-9)")]
    InvalidColor { color: u8 },

    /// Empty name, or a name containing characters the remote service rejects
    #[error("'{name}' is not a valid tag name")]
    InvalidTagName { name: String },

    /// No active tag with this name
    #[error("no tag named '{name}'")]
    TagNotFound { name: String },

    /// An action was requested with nothing selected
    #[error("no items selected")]
    EmptyTargetSet,

    /// The intent is not in the capability set for this handler's target kind
    #[error("{intent} is not available for {kind} tagging")]
    IntentNotAvailable {
        intent: TagIntent,
        kind: TargetKind,
    },

    /// A target of the wrong kind was passed to the handler
    #[error("expected {expected} targets, got a {found}")]
    TargetKindMismatch {
        expected: TargetKind,
        found: TargetKind,
    },

    /// A remote call failed (network, timeout, server error, bad response).
    /// Reported once; retry policy belongs to the transport layer.
    #[error("remote tag service call failed")]
    RemoteFailure(#[source] anyhow::Error),
}

impl TagError {
    /// True for errors detected before any remote call is issued
    pub fn is_validation(&self) -> bool {
        !matches!(self, TagError::RemoteFailure(_))
    }
}
