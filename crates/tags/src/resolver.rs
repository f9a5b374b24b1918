//! Target resolution
//!
//! Normalizes a UI selection (one message, one contact, or a multi-select)
//! into a flat, de-duplicated list of targets for the action handler.

use std::collections::HashSet;

use crate::error::TagError;
use crate::models::{Target, TargetId, TargetKind};

/// The selection context a tag action was invoked from
///
/// Mirrors the shapes the UI hands over: the clicked message's id, or the
/// ids of a contact multi-select.
#[derive(Debug, Clone)]
pub enum Selection {
    /// A single clicked message
    Message(TargetId),
    /// A message multi-select
    Messages(Vec<TargetId>),
    /// A single clicked contact
    Contact(TargetId),
    /// A contact multi-select
    Contacts(Vec<TargetId>),
}

impl Selection {
    /// The target kind this selection produces
    pub fn kind(&self) -> TargetKind {
        match self {
            Selection::Message(_) | Selection::Messages(_) => TargetKind::Message,
            Selection::Contact(_) | Selection::Contacts(_) => TargetKind::Contact,
        }
    }
}

/// Resolve a selection into targets
///
/// Flattens and de-duplicates by id, preserving first occurrence order.
/// Fails with `EmptyTargetSet` if the selection holds no ids; this is the
/// only validation performed here.
pub fn resolve(selection: &Selection) -> Result<Vec<Target>, TagError> {
    let kind = selection.kind();
    let ids: &[TargetId] = match selection {
        Selection::Message(id) | Selection::Contact(id) => std::slice::from_ref(id),
        Selection::Messages(ids) | Selection::Contacts(ids) => ids.as_slice(),
    };

    let mut seen = HashSet::new();
    let mut targets = Vec::with_capacity(ids.len());
    for id in ids {
        if seen.insert(id.clone()) {
            targets.push(Target::new(id.clone(), kind));
        }
    }

    if targets.is_empty() {
        return Err(TagError::EmptyTargetSet);
    }
    Ok(targets)
}
