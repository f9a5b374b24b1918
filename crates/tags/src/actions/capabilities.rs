//! Per-kind capability sets
//!
//! Message and contact tagging share one handler; they differ only in which
//! intents the UI offers. Contacts get no tag listing, deletion, or
//! rename/recolor affordance.

use std::fmt;

use crate::models::TargetKind;

/// The high-level intents the action handler exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagIntent {
    Create,
    Apply,
    Remove,
    List,
    Delete,
    Update,
}

impl fmt::Display for TagIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TagIntent::Create => "create tag",
            TagIntent::Apply => "apply tag",
            TagIntent::Remove => "remove tag",
            TagIntent::List => "list tags",
            TagIntent::Delete => "delete tag",
            TagIntent::Update => "rename or recolor tag",
        };
        write!(f, "{}", name)
    }
}

/// The intents available for a target kind, in menu order
pub fn intents_for(kind: TargetKind) -> &'static [TagIntent] {
    match kind {
        TargetKind::Message => &[
            TagIntent::Create,
            TagIntent::Apply,
            TagIntent::Remove,
            TagIntent::List,
            TagIntent::Delete,
            TagIntent::Update,
        ],
        TargetKind::Contact => &[TagIntent::Create, TagIntent::Apply, TagIntent::Remove],
    }
}
