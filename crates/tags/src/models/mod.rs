//! Domain models for tag entities

mod tag;
mod target;

pub use tag::{PALETTE_SIZE, Tag, TagId, TagUpdate, color_name, is_valid_color};
pub use target::{Target, TargetId, TargetKind};
