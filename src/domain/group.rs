use serde::{Deserialize, Serialize};

use super::line::{DiffLine, LineKind};

/// Classification of a contiguous run of diff lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupKind {
    Unchanged,
    Added,
    Removed,
    /// A delta run holding removed lines followed by the added lines
    /// that replaced them.
    Mixed,
    /// Hunk header lines.
    Header,
}

impl GroupKind {
    /// Whether a line of `kind` belongs in a group of this kind.
    /// Classification authority stays with the parser; this only backs
    /// the debug assertion in [`DiffGroup::add_line`].
    fn accepts(self, kind: LineKind) -> bool {
        match self {
            GroupKind::Unchanged => matches!(kind, LineKind::Unchanged | LineKind::CommentAnchor),
            GroupKind::Added => kind == LineKind::Added,
            GroupKind::Removed => kind == LineKind::Removed,
            GroupKind::Mixed => matches!(kind, LineKind::Added | LineKind::Removed),
            GroupKind::Header => kind == LineKind::Header,
        }
    }
}

/// A contiguous run of [`DiffLine`]s sharing one classification.
///
/// Lines are appended during parse, in diff order, and read-only
/// afterwards; the kind is fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiffGroup {
    kind: GroupKind,
    lines: Vec<DiffLine>,
}

impl DiffGroup {
    pub fn new(kind: GroupKind) -> Self {
        Self {
            kind,
            lines: Vec::new(),
        }
    }

    pub fn with_lines(kind: GroupKind, lines: Vec<DiffLine>) -> Self {
        Self { kind, lines }
    }

    pub fn kind(&self) -> GroupKind {
        self.kind
    }

    pub fn lines(&self) -> &[DiffLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Appends `line` at the end. The line's own kind is not validated
    /// against the group kind in release builds; a mismatch only skews
    /// section styling, never rendering correctness.
    pub fn add_line(&mut self, line: DiffLine) {
        debug_assert!(
            self.kind.accepts(line.kind),
            "{:?} line appended to {:?} group",
            line.kind,
            self.kind
        );
        self.lines.push(line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unchanged(text: &str) -> DiffLine {
        DiffLine::new(LineKind::Unchanged, Some(1), Some(1), text)
    }

    #[test]
    fn add_line_preserves_insertion_order() {
        let mut group = DiffGroup::new(GroupKind::Unchanged);
        group.add_line(unchanged("one"));
        group.add_line(unchanged("two"));
        group.add_line(unchanged("three"));

        let texts: Vec<&str> = group.lines().iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, ["one", "two", "three"]);
    }

    #[test]
    fn add_line_keeps_duplicates() {
        let mut group = DiffGroup::new(GroupKind::Unchanged);
        group.add_line(unchanged("same"));
        group.add_line(unchanged("other"));
        group.add_line(unchanged("same"));

        assert_eq!(group.len(), 3);
        assert_eq!(group.lines()[0], group.lines()[2]);
    }

    #[test]
    fn with_lines_takes_ownership_in_order() {
        let group = DiffGroup::with_lines(
            GroupKind::Removed,
            vec![
                DiffLine::new(LineKind::Removed, Some(4), None, "a"),
                DiffLine::new(LineKind::Removed, Some(5), None, "b"),
            ],
        );
        assert_eq!(group.kind(), GroupKind::Removed);
        assert_eq!(group.len(), 2);
        assert_eq!(group.lines()[1].before_number, Some(5));
    }
}
