//! Diff-to-render-record pipeline.
//!
//! A [`DiffBuilder`] walks the ordered [`DiffGroup`]s of one file and
//! emits one [`Section`] per group into a [`RenderSink`]. Everything is
//! synchronous and caller-driven: callers choose when each group is
//! emitted (all at once, or lazily as collapsed context expands) and
//! where it lands via the sink's insertion marker.

mod cache;
mod side_by_side;
pub mod term;
mod types;
mod unified;

pub use cache::CachedRenderer;
pub use side_by_side::SideBySideDiffBuilder;
pub use types::{RenderSink, Row, RowCells, Section, SectionId, SectionList, TextCell};
pub use unified::UnifiedDiffBuilder;

use serde::{Deserialize, Serialize};

use crate::domain::{DiffGroup, FileDiff};
use crate::syntax::{SyntaxHighlighter, Tokenizer};

/// Diff layout variant, selected at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffLayout {
    /// Both line-number columns share one row per line.
    #[default]
    Unified,
    /// Old and new versions in two panes.
    SideBySide,
}

/// A layout-specific renderer for one file's groups.
pub trait DiffBuilder {
    /// Renders `group` into one section and inserts it into the sink
    /// before `before`, or at the end when absent. Returns the new
    /// section's marker.
    fn emit_group(&mut self, group: &DiffGroup, before: Option<SectionId>) -> SectionId;
}

/// Renders every group of `file` in order and returns the sections.
pub fn render_file<T>(file: &FileDiff, layout: DiffLayout, tokenizer: T) -> Vec<Section>
where
    T: Tokenizer + Clone,
{
    let mut sink = SectionList::new();
    render_into(file, layout, tokenizer, &mut sink);
    sink.into_sections()
}

/// Like [`render_file`], but into a caller-supplied sink.
pub fn render_into<T, S>(file: &FileDiff, layout: DiffLayout, tokenizer: T, sink: &mut S)
where
    T: Tokenizer + Clone,
    S: RenderSink,
{
    let language = file.language.clone().unwrap_or_default();
    match layout {
        DiffLayout::Unified => {
            let highlighter = SyntaxHighlighter::new(tokenizer, language);
            let mut builder = UnifiedDiffBuilder::new(file, sink, highlighter);
            for group in &file.groups {
                builder.emit_group(group, None);
            }
        }
        DiffLayout::SideBySide => {
            let old_side = SyntaxHighlighter::new(tokenizer.clone(), language.clone());
            let new_side = SyntaxHighlighter::new(tokenizer, language);
            let mut builder = SideBySideDiffBuilder::new(file, sink, old_side, new_side);
            for group in &file.groups {
                builder.emit_group(group, None);
            }
        }
    }
}
