//! Action handler for tag operations
//!
//! Coordinates between the remote tag service and the local tag registry.
//!
//! Actions are performed in two steps:
//! 1. Call the remote service to update server state
//! 2. Update the registry cache to reflect the confirmed change
//!
//! This keeps the server the source of truth: the registry is only mutated
//! after a call settles. The one optimistic path is list removal, which goes
//! through the injected list view, never through the registry.

use log::{info, warn};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::capabilities::{TagIntent, intents_for};
use super::signals::{Notice, NotificationSink, TagListView};
use crate::error::TagError;
use crate::models::{Tag, TagId, TagUpdate, Target, TargetId, TargetKind, color_name, is_valid_color};
use crate::registry::TagRegistry;
use crate::remote::{TagActionOp, TagOp, TagService};

/// Characters the remote service rejects in tag names
const FORBIDDEN_NAME_CHARS: &[char] = &['"', ':', '\\'];

/// Handler for tag actions: create, apply, remove, delete, rename/recolor
///
/// One handler serves both message and contact tagging; it is parameterized
/// by target kind, which selects the capability set the UI may invoke.
/// Mutating operations on the same tag name are serialized in issuance
/// order; distinct names proceed independently, and listing never blocks.
pub struct TagActionHandler {
    kind: TargetKind,
    intents: &'static [TagIntent],
    registry: Arc<TagRegistry>,
    service: Arc<dyn TagService>,
    notifications: Arc<dyn NotificationSink>,
    list_view: Arc<dyn TagListView>,
    /// Per-tag-name serialization locks; entries live for the session
    in_flight: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl TagActionHandler {
    /// Create a new action handler for the given target kind
    pub fn new(
        kind: TargetKind,
        registry: Arc<TagRegistry>,
        service: Arc<dyn TagService>,
        notifications: Arc<dyn NotificationSink>,
        list_view: Arc<dyn TagListView>,
    ) -> Self {
        Self {
            kind,
            intents: intents_for(kind),
            registry,
            service,
            notifications,
            list_view,
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    /// The target kind this handler serves
    pub fn kind(&self) -> TargetKind {
        self.kind
    }

    /// The intents the menu layer may offer for this handler
    pub fn available_intents(&self) -> &'static [TagIntent] {
        self.intents
    }

    /// Create a tag and return its server-assigned id
    ///
    /// There is no optimistic insert: the registry is only updated with the
    /// tag the server returns, since correctness requires the server id.
    pub fn create_tag(&self, name: &str, color: u8) -> Result<TagId, TagError> {
        let result = self.do_create_tag(name, color);
        match &result {
            Ok(id) => self.settle_ok(format!("Tag created with id: {}", id.as_str())),
            Err(err) => self.settle_err(err),
        }
        result
    }

    /// Apply a tag to a batch of targets in one remote call
    pub fn apply_tag(&self, targets: &[Target], tag_name: &str) -> Result<(), TagError> {
        let result = self.do_apply_tag(targets, tag_name);
        match &result {
            Ok(()) => self.settle_ok(format!(
                "Tagged {} {}(s) with '{}'",
                targets.len(),
                self.kind,
                tag_name
            )),
            Err(err) => self.settle_err(err),
        }
        result
    }

    /// Remove a tag from a batch of targets in one remote call
    ///
    /// With `remove_from_list` the injected list view drops the targets
    /// before the call resolves; if the call fails the view gets exactly one
    /// restore signal to roll the optimistic removal back.
    pub fn remove_tag(
        &self,
        targets: &[Target],
        tag_name: &str,
        remove_from_list: bool,
    ) -> Result<(), TagError> {
        let result = self.do_remove_tag(targets, tag_name, remove_from_list);
        match &result {
            Ok(()) => self.settle_ok(format!(
                "Removed tag '{}' from {} {}(s)",
                tag_name,
                targets.len(),
                self.kind
            )),
            Err(err) => self.settle_err(err),
        }
        result
    }

    /// Delete a tag by name
    pub fn delete_tag(&self, tag_name: &str) -> Result<(), TagError> {
        let result = self.do_delete_tag(tag_name);
        match &result {
            Ok(()) => self.settle_ok(format!("Deleted tag '{}'", tag_name)),
            Err(err) => self.settle_err(err),
        }
        result
    }

    /// Rename and/or recolor a tag, returning the merged tag
    pub fn update_tag(&self, tag_name: &str, update: TagUpdate) -> Result<Tag, TagError> {
        let result = self.do_update_tag(tag_name, update);
        match &result {
            Ok(tag) => self.settle_ok(format!("Updated tag '{}'", tag.name)),
            Err(err) => self.settle_err(err),
        }
        result
    }

    /// List all known tags in server order
    ///
    /// Read-only; never waits on in-flight mutations.
    pub fn list_tags(&self) -> Result<Vec<Tag>, TagError> {
        let result = self.require_intent(TagIntent::List).and_then(|_| self.registry.list_tags());
        match &result {
            Ok(tags) => self.settle_ok(format!("{} tags", tags.len())),
            Err(err) => self.settle_err(err),
        }
        result
    }

    fn do_create_tag(&self, name: &str, color: u8) -> Result<TagId, TagError> {
        self.require_intent(TagIntent::Create)?;
        validate_tag_name(name)?;
        if !is_valid_color(color) {
            return Err(TagError::InvalidColor { color });
        }

        let slot = self.name_lock(name);
        let _guard = slot.lock().unwrap();

        if self.registry.find_by_name(name)?.is_some() {
            return Err(TagError::DuplicateTag {
                name: name.to_string(),
            });
        }

        info!("Creating tag '{}' ({})", name, color_name(color));
        let tag = self
            .service
            .create_tag(name, color)
            .map_err(TagError::RemoteFailure)?;
        let id = tag.id.clone();
        self.registry.upsert(tag);
        Ok(id)
    }

    fn do_apply_tag(&self, targets: &[Target], tag_name: &str) -> Result<(), TagError> {
        self.require_intent(TagIntent::Apply)?;
        self.check_targets(targets)?;

        let slot = self.name_lock(tag_name);
        let _guard = slot.lock().unwrap();

        self.resolve_tag(tag_name)?;

        let ids = target_ids(targets);
        info!("Tagging {} {}(s) with '{}'", ids.len(), self.kind, tag_name);
        self.service
            .apply_or_remove_tag(&ids, TagOp::Add, tag_name, false)
            .map_err(TagError::RemoteFailure)?;

        // Assignment state lives server-side; nothing to update locally.
        Ok(())
    }

    fn do_remove_tag(
        &self,
        targets: &[Target],
        tag_name: &str,
        remove_from_list: bool,
    ) -> Result<(), TagError> {
        self.require_intent(TagIntent::Remove)?;
        self.check_targets(targets)?;

        let slot = self.name_lock(tag_name);
        let _guard = slot.lock().unwrap();

        self.resolve_tag(tag_name)?;

        // The view drops the items before the call resolves.
        if remove_from_list {
            self.list_view.drop_from_view(targets, tag_name);
        }

        let ids = target_ids(targets);
        info!(
            "Removing tag '{}' from {} {}(s)",
            tag_name,
            ids.len(),
            self.kind
        );
        match self
            .service
            .apply_or_remove_tag(&ids, TagOp::Remove, tag_name, remove_from_list)
        {
            Ok(()) => Ok(()),
            Err(err) => {
                if remove_from_list {
                    self.list_view.restore_to_view(targets, tag_name);
                }
                Err(TagError::RemoteFailure(err))
            }
        }
    }

    fn do_delete_tag(&self, tag_name: &str) -> Result<(), TagError> {
        self.require_intent(TagIntent::Delete)?;

        let slot = self.name_lock(tag_name);
        let _guard = slot.lock().unwrap();

        let tag = self.resolve_tag(tag_name)?;

        info!("Deleting tag '{}' ({})", tag_name, tag.id.as_str());
        self.service
            .tag_action(&tag.id, TagActionOp::Delete)
            .map_err(TagError::RemoteFailure)?;
        self.registry.remove_by_id(&tag.id);
        Ok(())
    }

    fn do_update_tag(&self, tag_name: &str, update: TagUpdate) -> Result<Tag, TagError> {
        self.require_intent(TagIntent::Update)?;
        if let Some(name) = &update.name {
            validate_tag_name(name)?;
        }
        if let Some(color) = update.color {
            if !is_valid_color(color) {
                return Err(TagError::InvalidColor { color });
            }
        }

        let slot = self.name_lock(tag_name);
        let _guard = slot.lock().unwrap();

        let tag = self.resolve_tag(tag_name)?;

        // Renaming onto another active tag's name would break uniqueness.
        if let Some(new_name) = &update.name {
            if new_name != tag_name && self.registry.find_by_name(new_name)?.is_some() {
                return Err(TagError::DuplicateTag {
                    name: new_name.clone(),
                });
            }
        }

        let action = if let Some(name) = update.name.clone() {
            TagActionOp::Rename {
                name,
                color: update.color,
            }
        } else if let Some(color) = update.color {
            TagActionOp::Color { color }
        } else {
            // Nothing to change; settle locally without a remote call.
            return Ok(tag);
        };

        info!("Updating tag '{}' ({})", tag_name, action.as_str());
        self.service
            .tag_action(&tag.id, action)
            .map_err(TagError::RemoteFailure)?;

        let merged = Tag {
            id: tag.id.clone(),
            name: update.name.unwrap_or(tag.name),
            color: update.color.unwrap_or(tag.color),
            unread_count: tag.unread_count,
        };
        self.registry.upsert(merged.clone());
        Ok(merged)
    }

    /// Look up a tag by name, failing with `TagNotFound` when absent
    fn resolve_tag(&self, tag_name: &str) -> Result<Tag, TagError> {
        self.registry
            .find_by_name(tag_name)?
            .ok_or_else(|| TagError::TagNotFound {
                name: tag_name.to_string(),
            })
    }

    fn require_intent(&self, intent: TagIntent) -> Result<(), TagError> {
        if self.intents.contains(&intent) {
            Ok(())
        } else {
            Err(TagError::IntentNotAvailable {
                intent,
                kind: self.kind,
            })
        }
    }

    fn check_targets(&self, targets: &[Target]) -> Result<(), TagError> {
        if targets.is_empty() {
            return Err(TagError::EmptyTargetSet);
        }
        if let Some(target) = targets.iter().find(|t| t.kind != self.kind) {
            return Err(TagError::TargetKindMismatch {
                expected: self.kind,
                found: target.kind,
            });
        }
        Ok(())
    }

    /// Get the serialization lock for a tag name
    ///
    /// Callers hold the returned lock for the whole mutating operation, so a
    /// second intent naming the same tag queues behind the first instead of
    /// racing it.
    fn name_lock(&self, name: &str) -> Arc<Mutex<()>> {
        let mut table = self.in_flight.lock().unwrap();
        table.entry(name.to_string()).or_default().clone()
    }

    fn settle_ok(&self, message: String) {
        self.notifications.notify(Notice::success(message));
    }

    fn settle_err(&self, err: &TagError) {
        let message = match err {
            // Surface the underlying cause for remote failures.
            TagError::RemoteFailure(source) => format!("{}: {:#}", err, source),
            _ => err.to_string(),
        };
        warn!("Tag action failed: {}", message);
        self.notifications.notify(Notice::error(message));
    }
}

/// Validate a user-supplied tag name
///
/// Names must be non-empty after trimming and must not contain control
/// characters or characters the remote service rejects.
fn validate_tag_name(name: &str) -> Result<(), TagError> {
    let invalid = name.trim().is_empty()
        || name != name.trim()
        || name
            .chars()
            .any(|c| c.is_control() || FORBIDDEN_NAME_CHARS.contains(&c));
    if invalid {
        return Err(TagError::InvalidTagName {
            name: name.to_string(),
        });
    }
    Ok(())
}

fn target_ids(targets: &[Target]) -> Vec<TargetId> {
    targets.iter().map(|t| t.id.clone()).collect()
}
