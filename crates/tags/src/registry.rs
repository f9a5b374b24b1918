//! In-memory tag registry
//!
//! Holds the authoritative-as-known set of tags, lazily fetched from the
//! remote service and updated by the action handler after a remote call
//! settles. The cache is the only shared mutable state in this crate beyond
//! the per-tag-name serialization in the action handler.

use log::{debug, info};
use std::sync::{Arc, RwLock};

use crate::error::TagError;
use crate::models::{Tag, TagId};
use crate::remote::TagService;

/// Cached view of the server's tag set
///
/// The cache starts unpopulated and is filled on first read. Server order is
/// preserved; the registry never reorders tags. Mutation methods update the
/// cache synchronously and never call the remote service themselves.
pub struct TagRegistry {
    service: Arc<dyn TagService>,
    /// None = never fetched or invalidated
    cache: RwLock<Option<Vec<Tag>>>,
}

impl TagRegistry {
    /// Create a registry backed by the given remote service
    pub fn new(service: Arc<dyn TagService>) -> Self {
        Self {
            service,
            cache: RwLock::new(None),
        }
    }

    /// List all known tags in server-provided order
    ///
    /// Fetches from the remote service when the cache is unpopulated or has
    /// been invalidated. Fails with `RemoteFailure` if the fetch cannot
    /// complete and no cache exists; a populated cache is never refetched.
    pub fn list_tags(&self) -> Result<Vec<Tag>, TagError> {
        if let Some(tags) = self.cache.read().unwrap().as_ref() {
            return Ok(tags.clone());
        }
        self.refresh()
    }

    /// Find a tag by exact name
    pub fn find_by_name(&self, name: &str) -> Result<Option<Tag>, TagError> {
        Ok(self.list_tags()?.into_iter().find(|t| t.name == name))
    }

    /// Insert or replace a tag by id
    ///
    /// Idempotent. Replacing keeps the tag's position; inserting appends.
    /// If the cache has never been populated the upsert is dropped: the next
    /// fetch returns the authoritative set, which already includes the tag.
    pub fn upsert(&self, tag: Tag) {
        let mut cache = self.cache.write().unwrap();
        let Some(tags) = cache.as_mut() else {
            return;
        };
        match tags.iter_mut().find(|t| t.id == tag.id) {
            Some(slot) => *slot = tag,
            None => tags.push(tag),
        }
    }

    /// Remove a tag by id
    ///
    /// Idempotent; removing an id that isn't present is a no-op.
    pub fn remove_by_id(&self, id: &TagId) {
        let mut cache = self.cache.write().unwrap();
        if let Some(tags) = cache.as_mut() {
            tags.retain(|t| &t.id != id);
        }
    }

    /// Drop the cache so the next read refetches from the server
    pub fn invalidate(&self) {
        debug!("Invalidating tag cache");
        *self.cache.write().unwrap() = None;
    }

    /// Fetch the tag list and replace the cache with it
    fn refresh(&self) -> Result<Vec<Tag>, TagError> {
        let tags = self
            .service
            .list_tags()
            .map_err(TagError::RemoteFailure)?;
        info!("Fetched {} tags from remote service", tags.len());
        *self.cache.write().unwrap() = Some(tags.clone());
        Ok(tags)
    }
}
