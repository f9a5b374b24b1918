//! In-memory tag service implementation
//!
//! Simulates the server side of the tag/action API: a tag set with
//! monotonically assigned ids and per-item assignment state. Used for
//! testing and as a stub where no real service is configured.

use anyhow::{Result, bail};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Mutex, RwLock};
use std::time::Duration;

use super::{TagActionOp, TagOp, TagService};
use crate::models::{Tag, TagId, TargetId};

/// In-memory implementation of TagService
///
/// Assignment state maps item id to the set of assigned tag ids, so renames
/// don't orphan assignments. Add and remove are idempotent no-op successes
/// when the assignment is already in the requested state, matching the real
/// service. An offline switch and a call log let tests force remote failures
/// and assert that validation errors never reach the service.
pub struct InMemoryTagService {
    tags: RwLock<Vec<Tag>>,
    /// item id -> assigned tag ids
    assignments: RwLock<HashMap<String, HashSet<String>>>,
    next_id: AtomicU64,
    offline: AtomicBool,
    latency: RwLock<Option<Duration>>,
    calls: Mutex<Vec<String>>,
}

impl InMemoryTagService {
    /// Create a new empty in-memory service
    pub fn new() -> Self {
        Self {
            tags: RwLock::new(Vec::new()),
            assignments: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
            offline: AtomicBool::new(false),
            latency: RwLock::new(None),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Seed a tag directly into server state, bypassing the call log
    pub fn seed_tag(&self, tag: Tag) {
        self.tags.write().unwrap().push(tag);
    }

    /// Simulate the service being unreachable; every call fails until unset
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Add artificial latency to every call
    pub fn set_latency(&self, latency: Duration) {
        *self.latency.write().unwrap() = Some(latency);
    }

    /// Number of calls that reached the service
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// The calls that reached the service, in processing order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Names of the tags currently assigned to an item, sorted
    pub fn tag_names_for(&self, item_id: &str) -> Vec<String> {
        let assignments = self.assignments.read().unwrap();
        let tags = self.tags.read().unwrap();
        let Some(assigned) = assignments.get(item_id) else {
            return Vec::new();
        };
        let mut names: Vec<String> = tags
            .iter()
            .filter(|t| assigned.contains(t.id.as_str()))
            .map(|t| t.name.clone())
            .collect();
        names.sort();
        names
    }

    /// Look up a tag in server state by name
    pub fn tag_by_name(&self, name: &str) -> Option<Tag> {
        self.tags.read().unwrap().iter().find(|t| t.name == name).cloned()
    }

    /// Record a call, honoring latency and the offline switch
    fn begin(&self, call: String) -> Result<()> {
        if let Some(latency) = *self.latency.read().unwrap() {
            std::thread::sleep(latency);
        }
        self.calls.lock().unwrap().push(call);
        if self.offline.load(Ordering::SeqCst) {
            bail!("tag service is offline");
        }
        Ok(())
    }
}

impl Default for InMemoryTagService {
    fn default() -> Self {
        Self::new()
    }
}

impl TagService for InMemoryTagService {
    fn create_tag(&self, name: &str, color: u8) -> Result<Tag> {
        self.begin(format!("createTag({name}, {color})"))?;

        let mut tags = self.tags.write().unwrap();
        if tags.iter().any(|t| t.name == name) {
            bail!("tag '{}' already exists", name);
        }
        let id = format!("tag-{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        let tag = Tag::new(id, name, color);
        tags.push(tag.clone());
        Ok(tag)
    }

    fn list_tags(&self) -> Result<Vec<Tag>> {
        self.begin("listTags".to_string())?;
        Ok(self.tags.read().unwrap().clone())
    }

    fn apply_or_remove_tag(
        &self,
        ids: &[TargetId],
        op: TagOp,
        tag_name: &str,
        remove_from_list: bool,
    ) -> Result<()> {
        self.begin(format!(
            "itemAction({}, {}, {}, {})",
            ids.len(),
            op.as_str(),
            tag_name,
            remove_from_list
        ))?;

        let tag_id = {
            let tags = self.tags.read().unwrap();
            match tags.iter().find(|t| t.name == tag_name) {
                Some(tag) => tag.id.0.clone(),
                None => bail!("no tag named '{}'", tag_name),
            }
        };

        let mut assignments = self.assignments.write().unwrap();
        for id in ids {
            let assigned = assignments.entry(id.0.clone()).or_default();
            match op {
                TagOp::Add => {
                    assigned.insert(tag_id.clone());
                }
                TagOp::Remove => {
                    assigned.remove(&tag_id);
                }
            }
        }
        Ok(())
    }

    fn tag_action(&self, id: &TagId, action: TagActionOp) -> Result<()> {
        self.begin(format!("tagAction({}, {})", id.as_str(), action.as_str()))?;

        let mut tags = self.tags.write().unwrap();
        let Some(pos) = tags.iter().position(|t| &t.id == id) else {
            bail!("no tag with id '{}'", id.as_str());
        };

        match action {
            TagActionOp::Delete => {
                tags.remove(pos);
                let mut assignments = self.assignments.write().unwrap();
                for assigned in assignments.values_mut() {
                    assigned.remove(id.as_str());
                }
            }
            TagActionOp::Rename { name, color } => {
                tags[pos].name = name;
                if let Some(color) = color {
                    tags[pos].color = color;
                }
            }
            TagActionOp::Color { color } => {
                tags[pos].color = color;
            }
        }
        Ok(())
    }
}
