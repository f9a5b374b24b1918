//! Tag actions module
//!
//! Provides the high-level handler that turns user intents (create, apply,
//! remove, delete, rename/recolor, list) into remote mutations, plus the
//! per-kind capability table and the signal traits toward the presentation
//! layer.

mod capabilities;
mod handler;
mod signals;

pub use capabilities::{TagIntent, intents_for};
pub use handler::TagActionHandler;
pub use signals::{Notice, NoticeSeverity, NotificationSink, NullListView, TagListView};
