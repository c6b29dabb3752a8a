//! Unified diff rendering with stateful, line-at-a-time syntax
//! highlighting.
//!
//! The pipeline turns parsed diff groups into ordered render records:
//! [`parse`] builds the model from unified diff text, [`syntax`]
//! highlights one line at a time while carrying lexical state across
//! line boundaries, and [`render`] walks the groups and emits sections
//! for a display layer to consume. Highlighting is best-effort
//! throughout: any tokenizer failure degrades a line to plain text and
//! never blocks rendering.

pub mod config;
pub mod domain;
pub mod parse;
pub mod render;
pub mod syntax;

pub use domain::{ContextAction, DiffGroup, DiffLine, FileDiff, GroupKind, LineKind, Message};
pub use render::{
    DiffBuilder, DiffLayout, RenderSink, Section, SectionId, SectionList, SideBySideDiffBuilder,
    UnifiedDiffBuilder,
};
pub use syntax::{SyntaxHighlighter, SyntectTokenizer, Tokenizer};
