//! Remote tag service integration
//!
//! This module provides:
//! - The `TagService` trait covering the four remote operations
//! - An HTTP implementation using bearer-token auth
//! - An in-memory implementation used as a stub and test double

mod http;
mod memory;

pub use http::HttpTagService;
pub use memory::InMemoryTagService;

use anyhow::Result;

use crate::models::{Tag, TagId, TargetId};

/// Batched add/remove of a tag on a set of items
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagOp {
    Add,
    Remove,
}

impl TagOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            TagOp::Add => "add",
            TagOp::Remove => "remove",
        }
    }
}

/// Mutation of an existing tag itself
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagActionOp {
    Delete,
    /// Rename, optionally recoloring in the same call
    Rename { name: String, color: Option<u8> },
    Color { color: u8 },
}

impl TagActionOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            TagActionOp::Delete => "delete",
            TagActionOp::Rename { .. } => "rename",
            TagActionOp::Color { .. } => "color",
        }
    }
}

/// The server-side API owning authoritative tag and assignment state
///
/// Transport and authentication are assumed established; every method is a
/// single blocking remote call. Implementations do not retry mutations.
pub trait TagService: Send + Sync {
    /// Create a tag; the server assigns the id
    fn create_tag(&self, name: &str, color: u8) -> Result<Tag>;

    /// List all tags in server order
    fn list_tags(&self) -> Result<Vec<Tag>>;

    /// Add or remove a tag on a batch of items in one call
    ///
    /// Idempotent server-side: adding an already-present tag (or removing an
    /// absent one) is a no-op success.
    fn apply_or_remove_tag(
        &self,
        ids: &[TargetId],
        op: TagOp,
        tag_name: &str,
        remove_from_list: bool,
    ) -> Result<()>;

    /// Delete, rename, or recolor an existing tag by id
    fn tag_action(&self, id: &TagId, action: TagActionOp) -> Result<()>;
}

/// Remote API request types
pub mod api {
    use serde::Serialize;

    /// Body for creating a tag
    #[derive(Debug, Serialize)]
    pub struct CreateTagRequest<'a> {
        pub name: &'a str,
        pub color: u8,
    }

    /// Body for the batched per-item tag add/remove operation
    #[derive(Debug, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ItemActionRequest<'a> {
        pub ids: Vec<&'a str>,
        /// "add" or "remove"
        pub op: &'a str,
        pub tag_name: &'a str,
        /// Whether the caller's list view dropped the items optimistically
        pub remove_from_list: bool,
    }

    /// Body for delete/rename/color actions on a tag
    #[derive(Debug, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct TagActionRequest<'a> {
        /// "delete", "rename", or "color"
        pub op: &'a str,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub name: Option<&'a str>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub color: Option<u8>,
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_item_action_request_shape() {
            let req = ItemActionRequest {
                ids: vec!["1000", "1001"],
                op: "remove",
                tag_name: "Work",
                remove_from_list: true,
            };
            let json = serde_json::to_value(&req).unwrap();
            assert_eq!(json["ids"][1], "1001");
            assert_eq!(json["op"], "remove");
            assert_eq!(json["tagName"], "Work");
            assert_eq!(json["removeFromList"], true);
        }

        #[test]
        fn test_tag_action_request_omits_absent_fields() {
            let req = TagActionRequest {
                op: "delete",
                name: None,
                color: None,
            };
            let json = serde_json::to_value(&req).unwrap();
            assert!(json.get("name").is_none());
            assert!(json.get("color").is_none());
        }
    }
}
