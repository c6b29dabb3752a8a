//! Line-at-a-time syntax highlighting with continuation state.
//!
//! Multi-line constructs (block comments, raw strings) only highlight
//! correctly when the lexical state at the end of one line is carried
//! into the next. [`SyntaxHighlighter`] owns that state for one file
//! view and threads it through a [`Tokenizer`], degrading to
//! unhighlighted text whenever the tokenizer cannot cope.

mod syntect;

pub use self::syntect::{DEFAULT_THEME, SyntectState, SyntectTokenizer, detect_language};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 24-bit foreground color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// A run of characters sharing one style.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StyledSpan {
    pub text: String,
    /// Foreground color, if the theme assigns one.
    #[serde(default)]
    pub fg: Option<Rgb>,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
    #[serde(default)]
    pub underline: bool,
}

impl StyledSpan {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            fg: None,
            bold: false,
            italic: false,
            underline: false,
        }
    }
}

/// Failures a tokenizer may report for a single line.
#[derive(Debug, Error)]
pub enum TokenizeError {
    #[error("unknown language: {0}")]
    UnknownLanguage(String),

    #[error("line exceeds {limit} bytes")]
    LineTooLong { limit: usize },

    #[error("tokenizer failure: {0}")]
    Tokenizer(String),
}

/// Tokenizes one line of source text into styled spans.
///
/// Implementations may carry lexical context between lines via
/// `State`. The pipeline never constructs or inspects a state value;
/// it only threads whatever one call returned into the next call.
pub trait Tokenizer {
    /// Opaque continuation state at a line boundary.
    type State;

    /// Tokenize `text` (a single line, no trailing newline) for
    /// `language`, resuming from `state` when present.
    ///
    /// On success returns the styled spans plus the state to carry into
    /// the next line; a `None` state is valid and means "no open
    /// construct".
    fn tokenize_line(
        &self,
        language: &str,
        text: &str,
        state: Option<&Self::State>,
    ) -> Result<(Vec<StyledSpan>, Option<Self::State>), TokenizeError>;
}

/// Stateful per-file highlighting service.
///
/// One instance per file view; never share an instance across files.
/// Lines must be fed top-to-bottom through [`parse_text`]: skipping or
/// reordering lines silently yields stale lexical state, not an error.
/// Call [`reset_state`] when restarting from the top of the file.
///
/// [`parse_text`]: SyntaxHighlighter::parse_text
/// [`reset_state`]: SyntaxHighlighter::reset_state
pub struct SyntaxHighlighter<T: Tokenizer> {
    tokenizer: T,
    language: String,
    state: Option<T::State>,
}

impl<T: Tokenizer> SyntaxHighlighter<T> {
    /// `language` is an identifier the tokenizer understands; the empty
    /// string disables highlighting entirely.
    pub fn new(tokenizer: T, language: impl Into<String>) -> Self {
        Self {
            tokenizer,
            language: language.into(),
            state: None,
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Drops the continuation state, as if at the start of a file.
    /// Idempotent.
    pub fn reset_state(&mut self) {
        self.state = None;
    }

    /// Highlights one line, resuming from the previous call's lexical
    /// state.
    ///
    /// Returns `None` when highlighting is disabled or the tokenizer
    /// fails; the caller must render the raw text instead. A failure is
    /// logged and leaves the continuation state untouched, so one bad
    /// line never derails the rest of the file.
    pub fn parse_text(&mut self, text: &str) -> Option<Vec<StyledSpan>> {
        if self.language.is_empty() {
            return None;
        }

        match self
            .tokenizer
            .tokenize_line(&self.language, text, self.state.as_ref())
        {
            Ok((spans, next_state)) => {
                self.state = next_state;
                Some(spans)
            }
            Err(err) => {
                log::warn!(
                    "highlighting failed for language {:?}: {}",
                    self.language,
                    err
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two-state grammar: `/*` opens a comment, `*/` closes it. Lines
    /// inside (or opening) a comment come back as a single italic span.
    struct BlockCommentTokenizer;

    impl Tokenizer for BlockCommentTokenizer {
        type State = bool;

        fn tokenize_line(
            &self,
            _language: &str,
            text: &str,
            state: Option<&bool>,
        ) -> Result<(Vec<StyledSpan>, Option<bool>), TokenizeError> {
            if text.contains("boom") {
                return Err(TokenizeError::Tokenizer("boom".to_string()));
            }

            let was_inside = state.copied().unwrap_or(false);
            let in_comment = was_inside || text.contains("/*");

            let mut inside = was_inside;
            if text.contains("/*") {
                inside = true;
            }
            if text.contains("*/") {
                inside = false;
            }

            let span = StyledSpan {
                italic: in_comment,
                ..StyledSpan::plain(text)
            };
            Ok((vec![span], Some(inside)))
        }
    }

    fn comment_flags(lines: &[&str], highlighter: &mut SyntaxHighlighter<BlockCommentTokenizer>) -> Vec<bool> {
        lines
            .iter()
            .map(|line| highlighter.parse_text(line).unwrap()[0].italic)
            .collect()
    }

    #[test]
    fn empty_language_disables_highlighting() {
        let mut hl = SyntaxHighlighter::new(BlockCommentTokenizer, "");
        assert_eq!(hl.parse_text("fn main() {}"), None);
        assert_eq!(hl.parse_text(""), None);
    }

    #[test]
    fn state_threads_across_lines() {
        let lines = ["a", "/* start", "still in comment", "end */", "b"];

        let mut shared = SyntaxHighlighter::new(BlockCommentTokenizer, "demo");
        assert_eq!(
            comment_flags(&lines, &mut shared),
            [false, true, true, true, false]
        );

        // Fresh instance per line: no continuation, only the opening
        // line is marked.
        let isolated: Vec<bool> = lines
            .iter()
            .map(|line| {
                let mut hl = SyntaxHighlighter::new(BlockCommentTokenizer, "demo");
                hl.parse_text(line).unwrap()[0].italic
            })
            .collect();
        assert_eq!(isolated, [false, true, false, false, false]);
    }

    #[test]
    fn failure_returns_none_and_preserves_state() {
        let mut hl = SyntaxHighlighter::new(BlockCommentTokenizer, "demo");
        hl.parse_text("/* open");

        // The bad line falls back to plain...
        assert_eq!(hl.parse_text("boom"), None);

        // ...and the open-comment state is still live afterwards.
        let spans = hl.parse_text("still inside").unwrap();
        assert!(spans[0].italic);
    }

    #[test]
    fn reset_matches_fresh_instance() {
        let mut used = SyntaxHighlighter::new(BlockCommentTokenizer, "demo");
        used.parse_text("/* open");
        used.reset_state();

        let mut fresh = SyntaxHighlighter::new(BlockCommentTokenizer, "demo");
        assert_eq!(used.parse_text("x"), fresh.parse_text("x"));
    }
}
