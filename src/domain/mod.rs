//! Diff data model: lines, groups, and per-file containers.
//!
//! Everything here is built by the parser and treated as read-only by
//! the rendering pipeline.

mod error;
mod file;
mod group;
mod line;

pub use error::DiffError;
pub use file::FileDiff;
pub use group::{DiffGroup, GroupKind};
pub use line::{ContextAction, DiffLine, LineKind, Message};
