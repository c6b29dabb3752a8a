//! syntect-backed production tokenizer.
//!
//! Syntax and theme sets are loaded once per process; per-line state
//! lives in [`SyntectState`] values owned by the calling highlighter.

use once_cell::sync::Lazy;
use std::path::Path;
use syntect::highlighting::{
    FontStyle, HighlightIterator, HighlightState, Highlighter, Theme, ThemeSet,
};
use syntect::parsing::{ParseState, ScopeStack, SyntaxReference, SyntaxSet};

use super::{Rgb, StyledSpan, TokenizeError, Tokenizer};

static SYNTAX_SET: Lazy<SyntaxSet> = Lazy::new(SyntaxSet::load_defaults_newlines);
static THEME_SET: Lazy<ThemeSet> = Lazy::new(ThemeSet::load_defaults);

pub const DEFAULT_THEME: &str = "base16-ocean.dark";

/// Lines longer than this render unhighlighted; pathological minified
/// content makes the grammar regexes crawl.
const MAX_LINE_LENGTH: usize = 2000;

/// Continuation state at a line boundary: scanner position plus the
/// theme's highlight stack. Only ever produced here.
#[derive(Clone)]
pub struct SyntectState {
    parse: ParseState,
    highlight: HighlightState,
}

/// [`Tokenizer`] backed by syntect's bundled grammars and themes.
#[derive(Clone)]
pub struct SyntectTokenizer {
    theme: &'static Theme,
}

impl SyntectTokenizer {
    /// Uses `theme_name` when the default theme set knows it, falling
    /// back to [`DEFAULT_THEME`].
    pub fn new(theme_name: &str) -> Self {
        let theme = THEME_SET
            .themes
            .get(theme_name)
            .unwrap_or_else(|| &THEME_SET.themes[DEFAULT_THEME]);
        Self { theme }
    }
}

impl Default for SyntectTokenizer {
    fn default() -> Self {
        Self::new(DEFAULT_THEME)
    }
}

impl Tokenizer for SyntectTokenizer {
    type State = SyntectState;

    fn tokenize_line(
        &self,
        language: &str,
        text: &str,
        state: Option<&SyntectState>,
    ) -> Result<(Vec<StyledSpan>, Option<SyntectState>), TokenizeError> {
        if text.len() > MAX_LINE_LENGTH {
            return Err(TokenizeError::LineTooLong {
                limit: MAX_LINE_LENGTH,
            });
        }

        let syntax = find_syntax(language)
            .ok_or_else(|| TokenizeError::UnknownLanguage(language.to_string()))?;

        let highlighter = Highlighter::new(self.theme);
        let mut next = match state {
            Some(prev) => prev.clone(),
            None => SyntectState {
                parse: ParseState::new(syntax),
                highlight: HighlightState::new(&highlighter, ScopeStack::new()),
            },
        };

        // The bundled grammars expect the newline to be present.
        let line = format!("{}\n", text.trim_end_matches('\n'));
        let ops = next
            .parse
            .parse_line(&line, &SYNTAX_SET)
            .map_err(|err| TokenizeError::Tokenizer(err.to_string()))?;

        let mut spans = Vec::new();
        for (style, piece) in HighlightIterator::new(&mut next.highlight, &ops, &line, &highlighter)
        {
            let piece = piece.trim_end_matches('\n');
            if piece.is_empty() {
                continue;
            }
            spans.push(StyledSpan {
                text: piece.to_string(),
                fg: Some(Rgb(
                    style.foreground.r,
                    style.foreground.g,
                    style.foreground.b,
                )),
                bold: style.font_style.contains(FontStyle::BOLD),
                italic: style.font_style.contains(FontStyle::ITALIC),
                underline: style.font_style.contains(FontStyle::UNDERLINE),
            });
        }

        Ok((spans, Some(next)))
    }
}

fn find_syntax(language: &str) -> Option<&'static SyntaxReference> {
    SYNTAX_SET
        .find_syntax_by_token(language)
        .or_else(|| SYNTAX_SET.find_syntax_by_name(language))
}

/// Maps a file path to a tokenizer language identifier by extension.
pub fn detect_language(file_path: &str) -> Option<String> {
    let path = Path::new(file_path);
    let ext = path.extension().and_then(|e| e.to_str())?;
    SYNTAX_SET
        .find_syntax_by_extension(ext)
        .map(|s| s.name.to_string())
}
