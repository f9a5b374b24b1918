//! Tags crate - Business logic for tag workflows on messages and contacts
//!
//! This crate provides platform-independent tag functionality including:
//! - Domain models (Tag, Target)
//! - A registry caching the server's tag set
//! - Target resolution from UI selections
//! - An action handler for mutations (create, apply, remove, delete,
//!   rename/recolor) with per-tag-name serialization and optimistic
//!   list-removal signaling
//! - A remote service abstraction with HTTP and in-memory implementations
//!
//! This crate has zero UI dependencies; the menu layer talks to it through
//! the handler's intents and the injected notification/list-view signals.

pub mod actions;
pub mod config;
pub mod error;
pub mod models;
pub mod registry;
pub mod remote;
pub mod resolver;

pub use actions::{
    Notice, NoticeSeverity, NotificationSink, NullListView, TagActionHandler, TagIntent,
    TagListView, intents_for,
};
pub use config::ServiceCredentials;
pub use error::TagError;
pub use models::{
    PALETTE_SIZE, Tag, TagId, TagUpdate, Target, TargetId, TargetKind, color_name, is_valid_color,
};
pub use registry::TagRegistry;
pub use remote::{HttpTagService, InMemoryTagService, TagActionOp, TagOp, TagService};
pub use resolver::{Selection, resolve};
