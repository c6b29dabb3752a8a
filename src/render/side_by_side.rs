use log::debug;

use crate::domain::{DiffGroup, DiffLine, FileDiff, GroupKind, LineKind};
use crate::syntax::{SyntaxHighlighter, Tokenizer};

use super::types::{RenderSink, Row, RowCells, Section, SectionId, TextCell};
use super::DiffBuilder;

/// Side-by-side layout builder: split rows with old/new cells.
///
/// Each side gets its own highlighter and is only ever fed that side's
/// lines, in file order, so continuation state stays correct per file
/// version. Mixed groups pair `removed[i]` with `added[i]`; the longer
/// run leaves the other side blank. Hunk headers become full-width rows
/// and touch neither highlighter.
pub struct SideBySideDiffBuilder<'a, S: RenderSink, T: Tokenizer> {
    file: &'a FileDiff,
    sink: &'a mut S,
    old_side: SyntaxHighlighter<T>,
    new_side: SyntaxHighlighter<T>,
}

impl<'a, S: RenderSink, T: Tokenizer> SideBySideDiffBuilder<'a, S, T> {
    pub fn new(
        file: &'a FileDiff,
        sink: &'a mut S,
        old_side: SyntaxHighlighter<T>,
        new_side: SyntaxHighlighter<T>,
    ) -> Self {
        debug!(
            "side-by-side layout for {} ({} groups)",
            file.display_path(),
            file.groups.len()
        );
        Self {
            file,
            sink,
            old_side,
            new_side,
        }
    }

    pub fn file(&self) -> &FileDiff {
        self.file
    }

    fn old_cell(&mut self, line: &DiffLine) -> TextCell {
        match self.old_side.parse_text(&line.text) {
            Some(spans) => TextCell::Highlighted(spans),
            None => TextCell::Plain(line.text.clone()),
        }
    }

    fn new_cell(&mut self, line: &DiffLine) -> TextCell {
        match self.new_side.parse_text(&line.text) {
            Some(spans) => TextCell::Highlighted(spans),
            None => TextCell::Plain(line.text.clone()),
        }
    }

    fn emit_plain_row(section: &mut Section, line: &DiffLine, cells: RowCells) {
        section.rows.push(Row {
            kind: line.kind,
            before_number: line.before_number,
            after_number: line.after_number,
            cells,
            context_action: line.context_action.clone(),
            messages: line.messages.clone(),
            inline_segments: line.inline_segments.clone(),
        });
    }

    fn emit_line(&mut self, section: &mut Section, line: &DiffLine) {
        match line.kind {
            // Full-width rows; header text belongs to neither version,
            // so it must not disturb either side's lexical state.
            LineKind::Header | LineKind::CommentAnchor => {
                Self::emit_plain_row(
                    section,
                    line,
                    RowCells::Unified(TextCell::Plain(line.text.clone())),
                );
            }
            LineKind::Unchanged => {
                let old = self.old_cell(line);
                let new = self.new_cell(line);
                Self::emit_plain_row(
                    section,
                    line,
                    RowCells::Split {
                        old: Some(old),
                        new: Some(new),
                    },
                );
            }
            LineKind::Removed => {
                let old = self.old_cell(line);
                Self::emit_plain_row(
                    section,
                    line,
                    RowCells::Split {
                        old: Some(old),
                        new: None,
                    },
                );
            }
            LineKind::Added => {
                let new = self.new_cell(line);
                Self::emit_plain_row(
                    section,
                    line,
                    RowCells::Split {
                        old: None,
                        new: Some(new),
                    },
                );
            }
        }
    }

    fn emit_mixed_group(&mut self, section: &mut Section, group: &DiffGroup) {
        let removed: Vec<&DiffLine> = group
            .lines()
            .iter()
            .filter(|l| l.kind == LineKind::Removed)
            .collect();
        let added: Vec<&DiffLine> = group
            .lines()
            .iter()
            .filter(|l| l.kind == LineKind::Added)
            .collect();

        // Highlight each side in file order before pairing rows, so the
        // continuation state sees its side's lines contiguously.
        let old_cells: Vec<TextCell> = removed.iter().map(|l| self.old_cell(l)).collect();
        let new_cells: Vec<TextCell> = added.iter().map(|l| self.new_cell(l)).collect();

        for i in 0..removed.len().max(added.len()) {
            let old_line = removed.get(i).copied();
            let new_line = added.get(i).copied();

            let mut messages = Vec::new();
            if let Some(line) = old_line {
                messages.extend(line.messages.iter().cloned());
            }
            if let Some(line) = new_line {
                messages.extend(line.messages.iter().cloned());
            }

            let lead = new_line.or(old_line).expect("pair index in range");
            section.rows.push(Row {
                kind: lead.kind,
                before_number: old_line.and_then(|l| l.before_number),
                after_number: new_line.and_then(|l| l.after_number),
                cells: RowCells::Split {
                    old: old_line.map(|_| old_cells[i].clone()),
                    new: new_line.map(|_| new_cells[i].clone()),
                },
                context_action: old_line
                    .and_then(|l| l.context_action.clone())
                    .or_else(|| new_line.and_then(|l| l.context_action.clone())),
                messages,
                inline_segments: new_line
                    .and_then(|l| l.inline_segments.clone())
                    .or_else(|| old_line.and_then(|l| l.inline_segments.clone())),
            });
        }
    }
}

impl<S: RenderSink, T: Tokenizer> DiffBuilder for SideBySideDiffBuilder<'_, S, T> {
    fn emit_group(&mut self, group: &DiffGroup, before: Option<SectionId>) -> SectionId {
        let mut section = Section::new(group.kind());
        if group.kind() == GroupKind::Mixed {
            self.emit_mixed_group(&mut section, group);
        } else {
            for line in group.lines() {
                self.emit_line(&mut section, line);
            }
        }
        self.sink.insert_section(section, before)
    }
}
