use serde::{Deserialize, Serialize};

use crate::domain::{ContextAction, GroupKind, LineKind, Message};
use crate::syntax::StyledSpan;

/// Marker a sink hands back for an inserted section; later insertions
/// can target the slot immediately before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SectionId(pub u64);

/// Text cell of one rendered row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextCell {
    /// Highlighting succeeded; spans are ready for display.
    Highlighted(Vec<StyledSpan>),
    /// Highlighting declined or failed; render the raw text, escaped.
    Plain(String),
}

impl TextCell {
    /// The cell's character content with styling stripped.
    pub fn raw_text(&self) -> String {
        match self {
            TextCell::Highlighted(spans) => spans.iter().map(|s| s.text.as_str()).collect(),
            TextCell::Plain(text) => text.clone(),
        }
    }
}

/// Row cells, by layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowCells {
    /// One shared text cell: every unified-layout row, and full-width
    /// rows (hunk headers) in the split layout.
    Unified(TextCell),
    /// Old/new cells of the side-by-side layout; `None` leaves that
    /// side blank.
    Split {
        old: Option<TextCell>,
        new: Option<TextCell>,
    },
}

/// One rendered line.
///
/// For split rows carrying both sides, `kind` is the new side's kind;
/// per-cell styling should key off cell presence instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    pub kind: LineKind,
    pub before_number: Option<usize>,
    pub after_number: Option<usize>,
    pub cells: RowCells,
    #[serde(default)]
    pub context_action: Option<ContextAction>,
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default)]
    pub inline_segments: Option<Vec<(String, bool)>>,
}

/// A run of rendered rows sharing one group classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub kind: GroupKind,
    pub rows: Vec<Row>,
}

impl Section {
    pub fn new(kind: GroupKind) -> Self {
        Self {
            kind,
            rows: Vec::new(),
        }
    }
}

/// Receives completed sections in file order.
///
/// The single required operation: insert a section immediately before a
/// previously returned marker, or at the end when no marker is given.
/// This lets a caller render groups incrementally (lazily expanding
/// collapsed context) while preserving file order.
pub trait RenderSink {
    fn insert_section(&mut self, section: Section, before: Option<SectionId>) -> SectionId;
}

/// Growable in-memory sink; the reference implementation used by the
/// render cache, the CLI, and tests.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct SectionList {
    entries: Vec<(SectionId, Section)>,
    next_id: u64,
}

impl SectionList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: SectionId) -> Option<&Section> {
        self.entries
            .iter()
            .find(|(entry_id, _)| *entry_id == id)
            .map(|(_, section)| section)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.entries.iter().map(|(_, section)| section)
    }

    pub fn into_sections(self) -> Vec<Section> {
        self.entries
            .into_iter()
            .map(|(_, section)| section)
            .collect()
    }
}

impl RenderSink for SectionList {
    /// Unknown markers degrade to appending at the end.
    fn insert_section(&mut self, section: Section, before: Option<SectionId>) -> SectionId {
        let id = SectionId(self.next_id);
        self.next_id += 1;

        let position =
            before.and_then(|marker| self.entries.iter().position(|(entry_id, _)| *entry_id == marker));
        match position {
            Some(index) => self.entries.insert(index, (id, section)),
            None => self.entries.push((id, section)),
        }
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(kind: GroupKind) -> Section {
        Section::new(kind)
    }

    #[test]
    fn insert_appends_without_marker() {
        let mut sink = SectionList::new();
        sink.insert_section(section(GroupKind::Removed), None);
        sink.insert_section(section(GroupKind::Added), None);

        let kinds: Vec<GroupKind> = sink.iter().map(|s| s.kind).collect();
        assert_eq!(kinds, [GroupKind::Removed, GroupKind::Added]);
    }

    #[test]
    fn insert_before_marker_preserves_file_order() {
        let mut sink = SectionList::new();
        sink.insert_section(section(GroupKind::Header), None);
        let tail = sink.insert_section(section(GroupKind::Added), None);

        // Lazily expanded context lands between the two.
        let expanded = sink.insert_section(section(GroupKind::Unchanged), Some(tail));
        assert_eq!(sink.get(expanded).map(|s| s.kind), Some(GroupKind::Unchanged));

        let kinds: Vec<GroupKind> = sink.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            [GroupKind::Header, GroupKind::Unchanged, GroupKind::Added]
        );
    }

    #[test]
    fn insert_with_stale_marker_appends() {
        let mut sink = SectionList::new();
        sink.insert_section(section(GroupKind::Unchanged), None);
        let stale = SectionId(999);
        sink.insert_section(section(GroupKind::Added), Some(stale));

        let kinds: Vec<GroupKind> = sink.iter().map(|s| s.kind).collect();
        assert_eq!(kinds, [GroupKind::Unchanged, GroupKind::Added]);
    }

    #[test]
    fn raw_text_strips_styling() {
        let cell = TextCell::Highlighted(vec![
            StyledSpan::plain("let "),
            StyledSpan::plain("x"),
        ]);
        assert_eq!(cell.raw_text(), "let x");
        assert_eq!(TextCell::Plain("y".to_string()).raw_text(), "y");
    }
}
