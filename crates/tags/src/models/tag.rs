//! Tag model representing a user-defined label on messages and contacts

use serde::{Deserialize, Serialize};

/// Unique identifier for a tag (server-assigned, opaque)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TagId(pub String);

impl TagId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for TagId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for TagId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A tag: a named, colored label assignable to messages and contacts
///
/// Tag ids are assigned by the server on creation; the client never
/// fabricates one. Names are unique among active tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Server-assigned tag ID
    pub id: TagId,
    /// Display name, unique among active tags
    pub name: String,
    /// Palette index in [0, 9]
    pub color: u8,
    /// Number of unread items carrying this tag
    #[serde(rename = "unread")]
    pub unread_count: u32,
}

impl Tag {
    /// Create a new tag
    pub fn new(id: impl Into<TagId>, name: impl Into<String>, color: u8) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color,
            unread_count: 0,
        }
    }

    /// Builder method to set the unread count
    pub fn with_unread_count(mut self, count: u32) -> Self {
        self.unread_count = count;
        self
    }
}

/// Partial update for a rename/recolor action
///
/// Either field may be absent; an update with both fields absent is a no-op.
#[derive(Debug, Clone, Default)]
pub struct TagUpdate {
    pub name: Option<String>,
    pub color: Option<u8>,
}

impl TagUpdate {
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            color: None,
        }
    }

    pub fn recolor(color: u8) -> Self {
        Self {
            name: None,
            color: Some(color),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.color.is_none()
    }
}

/// Number of entries in the fixed tag color palette
pub const PALETTE_SIZE: u8 = 10;

/// Check whether a color index falls inside the fixed palette
pub fn is_valid_color(color: u8) -> bool {
    color < PALETTE_SIZE
}

/// Get the display name for a palette color index
pub fn color_name(color: u8) -> &'static str {
    match color {
        0 => "blue", // palette default
        1 => "blue",
        2 => "cyan",
        3 => "green",
        4 => "purple",
        5 => "red",
        6 => "yellow",
        7 => "pink",
        8 => "gray",
        9 => "orange",
        _ => "unknown",
    }
}
