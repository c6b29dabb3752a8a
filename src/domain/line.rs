use serde::{Deserialize, Serialize};

/// Classification of a single diff line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineKind {
    /// Present in both versions.
    Unchanged,
    /// Present only in the new version.
    Added,
    /// Present only in the old version.
    Removed,
    /// Hunk header (`@@ … @@`); carries no line numbers.
    Header,
    /// Synthetic line that only anchors file-level comments.
    CommentAnchor,
}

/// Inline comment attached to a diff line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Message {
    /// Author identifier (agent or user).
    pub author: String,
    /// Body text (markdown).
    pub body: String,
}

/// Control offered next to a line that expands elided context.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContextAction {
    pub label: String,
    /// How many unchanged lines the control would reveal.
    pub hidden_lines: usize,
}

/// A single before/after line pairing within a diff.
///
/// Built once by the parser; the rendering pipeline only reads it.
/// Any non-header line carries at least one of `before_number` /
/// `after_number`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiffLine {
    pub kind: LineKind,
    /// Line number in the old version; `None` for pure additions.
    #[serde(default)]
    pub before_number: Option<usize>,
    /// Line number in the new version; `None` for pure removals.
    #[serde(default)]
    pub after_number: Option<usize>,
    /// Raw source text, without the diff prefix or trailing newline.
    pub text: String,
    /// Inline comments attached to this line, in display order.
    #[serde(default)]
    pub messages: Vec<Message>,
    /// Expand-context control, if the UI should offer one here.
    #[serde(default)]
    pub context_action: Option<ContextAction>,
    /// Intraline emphasis segments `(text, emphasized)` for paired
    /// remove/add lines.
    #[serde(default)]
    pub inline_segments: Option<Vec<(String, bool)>>,
}

impl DiffLine {
    pub fn new(
        kind: LineKind,
        before_number: Option<usize>,
        after_number: Option<usize>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            before_number,
            after_number,
            text: text.into(),
            messages: Vec::new(),
            context_action: None,
            inline_segments: None,
        }
    }
}
