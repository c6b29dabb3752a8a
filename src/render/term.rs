//! ANSI terminal back end: one concrete consumer of the render
//! records.
//!
//! Row shape follows the source view's gutters: a four-wide before
//! column, a four-wide after column, the change prefix, then the text
//! cell. Split sections render two halves around a divider.

use crate::domain::LineKind;
use crate::syntax::StyledSpan;

use super::types::{Row, RowCells, Section, TextCell};

const RESET: &str = "\x1b[0m";
const DIM: &str = "\x1b[2m";
const REVERSE: &str = "\x1b[7m";
const NO_REVERSE: &str = "\x1b[27m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

/// Character budget for each half of a split row's text cell.
const SPLIT_TEXT_WIDTH: usize = 58;

/// Renders sections to a printable string. `color` off yields plain
/// text with identical layout.
pub fn sections_to_string(sections: &[Section], color: bool) -> String {
    let mut out = String::new();
    for section in sections {
        for row in &section.rows {
            write_row(&mut out, row, color);
        }
    }
    out
}

fn write_row(out: &mut String, row: &Row, color: bool) {
    match &row.cells {
        RowCells::Unified(cell) => write_unified_row(out, row, cell, color),
        RowCells::Split { old, new } => write_split_row(out, row, old.as_ref(), new.as_ref(), color),
    }
    write_messages(out, row, color);
}

fn write_unified_row(out: &mut String, row: &Row, cell: &TextCell, color: bool) {
    paint(out, DIM, color);
    out.push_str(&gutter(row.before_number));
    out.push(' ');
    out.push_str(&gutter(row.after_number));
    paint(out, RESET, color);

    out.push(' ');
    let kind_color = kind_color(row.kind);
    paint(out, kind_color, color);
    out.push(prefix(row.kind));
    out.push(' ');

    if let Some(segments) = &row.inline_segments {
        write_inline_segments(out, segments, color);
    } else {
        write_cell(out, cell, kind_color, color, None);
    }
    paint(out, RESET, color);

    if let Some(action) = &row.context_action {
        paint(out, DIM, color);
        out.push_str("  [");
        out.push_str(&action.label);
        out.push(']');
        paint(out, RESET, color);
    }
    out.push('\n');
}

fn write_split_row(
    out: &mut String,
    row: &Row,
    old: Option<&TextCell>,
    new: Option<&TextCell>,
    color: bool,
) {
    let old_color = if old.is_some() && new.is_none() {
        RED
    } else {
        ""
    };
    let new_color = if new.is_some() && old.is_none() {
        GREEN
    } else {
        ""
    };

    write_half(out, row.before_number, old, old_color, color);
    paint(out, DIM, color);
    out.push('│');
    paint(out, RESET, color);
    write_half(out, row.after_number, new, new_color, color);
    out.push('\n');
}

fn write_half(
    out: &mut String,
    number: Option<usize>,
    cell: Option<&TextCell>,
    cell_color: &str,
    color: bool,
) {
    paint(out, DIM, color);
    out.push_str(&gutter(number));
    paint(out, RESET, color);
    out.push(' ');

    let written = match cell {
        Some(cell) => {
            paint(out, cell_color, color);
            let n = write_cell(out, cell, cell_color, color, Some(SPLIT_TEXT_WIDTH));
            paint(out, RESET, color);
            n
        }
        None => 0,
    };
    for _ in written..SPLIT_TEXT_WIDTH {
        out.push(' ');
    }
}

/// Writes a text cell, clipped to `max_chars` when given, and returns
/// the number of visible characters written.
fn write_cell(
    out: &mut String,
    cell: &TextCell,
    fallback_color: &str,
    color: bool,
    max_chars: Option<usize>,
) -> usize {
    let budget = max_chars.unwrap_or(usize::MAX);
    let mut written = 0usize;

    match cell {
        TextCell::Highlighted(spans) => {
            for span in spans {
                if written >= budget {
                    break;
                }
                written += write_span(out, span, budget - written, color);
            }
        }
        TextCell::Plain(text) => {
            paint(out, fallback_color, color);
            for ch in text.chars() {
                if written >= budget {
                    break;
                }
                out.push(ch);
                written += 1;
            }
        }
    }
    written
}

fn write_span(out: &mut String, span: &StyledSpan, budget: usize, color: bool) -> usize {
    if color {
        if let Some(fg) = span.fg {
            out.push_str(&format!("\x1b[38;2;{};{};{}m", fg.0, fg.1, fg.2));
        }
        if span.bold {
            out.push_str("\x1b[1m");
        }
        if span.italic {
            out.push_str("\x1b[3m");
        }
        if span.underline {
            out.push_str("\x1b[4m");
        }
    }

    let mut written = 0usize;
    for ch in span.text.chars() {
        if written >= budget {
            break;
        }
        out.push(ch);
        written += 1;
    }

    paint(out, RESET, color);
    written
}

fn write_inline_segments(out: &mut String, segments: &[(String, bool)], color: bool) {
    for (text, emphasized) in segments {
        if *emphasized {
            paint(out, REVERSE, color);
            out.push_str(text);
            paint(out, NO_REVERSE, color);
        } else {
            out.push_str(text);
        }
    }
}

fn write_messages(out: &mut String, row: &Row, color: bool) {
    for message in &row.messages {
        paint(out, YELLOW, color);
        out.push_str("          ┃ ");
        out.push_str(&message.author);
        out.push_str(": ");
        out.push_str(&message.body);
        paint(out, RESET, color);
        out.push('\n');
    }
}

fn gutter(number: Option<usize>) -> String {
    match number {
        Some(n) => format!("{:>4}", n),
        None => "    ".to_string(),
    }
}

fn prefix(kind: LineKind) -> char {
    match kind {
        LineKind::Added => '+',
        LineKind::Removed => '-',
        LineKind::Unchanged | LineKind::Header | LineKind::CommentAnchor => ' ',
    }
}

fn kind_color(kind: LineKind) -> &'static str {
    match kind {
        LineKind::Added => GREEN,
        LineKind::Removed => RED,
        LineKind::Header => CYAN,
        LineKind::Unchanged | LineKind::CommentAnchor => "",
    }
}

fn paint(out: &mut String, code: &str, color: bool) {
    if color && !code.is_empty() {
        out.push_str(code);
    }
}
