use log::debug;

use crate::domain::{DiffGroup, DiffLine, FileDiff};
use crate::syntax::{SyntaxHighlighter, Tokenizer};

use super::types::{RenderSink, Row, RowCells, Section, SectionId, TextCell};
use super::DiffBuilder;

/// Unified-layout builder: one row per line, before/after line-number
/// gutters side by side on the same row.
///
/// The builder holds the file's one highlighter and feeds every line
/// through it in emission order, so groups must be emitted
/// top-to-bottom to keep multi-line constructs highlighted correctly
/// (reset the highlighter when starting over from the top).
pub struct UnifiedDiffBuilder<'a, S: RenderSink, T: Tokenizer> {
    file: &'a FileDiff,
    sink: &'a mut S,
    highlighter: SyntaxHighlighter<T>,
}

impl<'a, S: RenderSink, T: Tokenizer> UnifiedDiffBuilder<'a, S, T> {
    pub fn new(file: &'a FileDiff, sink: &'a mut S, highlighter: SyntaxHighlighter<T>) -> Self {
        debug!(
            "unified layout for {} ({} groups)",
            file.display_path(),
            file.groups.len()
        );
        Self {
            file,
            sink,
            highlighter,
        }
    }

    pub fn file(&self) -> &FileDiff {
        self.file
    }

    /// The per-file highlighter, e.g. to reset its state before
    /// re-emitting from the top.
    pub fn highlighter_mut(&mut self) -> &mut SyntaxHighlighter<T> {
        &mut self.highlighter
    }

    fn emit_line(&mut self, section: &mut Section, line: &DiffLine) {
        // Highlighting is best-effort: a None here must never block the
        // row, only downgrade it to plain text.
        let cell = match self.highlighter.parse_text(&line.text) {
            Some(spans) => TextCell::Highlighted(spans),
            None => TextCell::Plain(line.text.clone()),
        };

        section.rows.push(Row {
            kind: line.kind,
            before_number: line.before_number,
            after_number: line.after_number,
            cells: RowCells::Unified(cell),
            context_action: line.context_action.clone(),
            messages: line.messages.clone(),
            inline_segments: line.inline_segments.clone(),
        });
    }
}

impl<S: RenderSink, T: Tokenizer> DiffBuilder for UnifiedDiffBuilder<'_, S, T> {
    fn emit_group(&mut self, group: &DiffGroup, before: Option<SectionId>) -> SectionId {
        let mut section = Section::new(group.kind());
        for line in group.lines() {
            self.emit_line(&mut section, line);
        }
        self.sink.insert_section(section, before)
    }
}
