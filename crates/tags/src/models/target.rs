//! Target model: the message or contact a tag action operates on

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a taggable item (message or contact ID)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TargetId(pub String);

impl TargetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for TargetId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for TargetId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// The kind of item a tag action targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetKind {
    Message,
    Contact,
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetKind::Message => write!(f, "message"),
            TargetKind::Contact => write!(f, "contact"),
        }
    }
}

/// A single taggable item, constructed per invocation from the UI selection
///
/// Targets are ephemeral and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Target {
    pub id: TargetId,
    pub kind: TargetKind,
}

impl Target {
    pub fn new(id: impl Into<TargetId>, kind: TargetKind) -> Self {
        Self {
            id: id.into(),
            kind,
        }
    }

    pub fn message(id: impl Into<TargetId>) -> Self {
        Self::new(id, TargetKind::Message)
    }

    pub fn contact(id: impl Into<TargetId>) -> Self {
        Self::new(id, TargetKind::Contact)
    }
}
