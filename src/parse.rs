//! Unified diff text → renderable file models.
//!
//! Hunks become runs of [`DiffGroup`]s: unchanged context groups, pure
//! added/removed groups, and mixed groups for remove-then-add deltas.
//! Paired lines of similar content additionally get intraline emphasis
//! segments.

use log::debug;
use similar::{ChangeTag, TextDiff};
use unidiff::{Hunk, PatchSet};

use crate::domain::{
    ContextAction, DiffError, DiffGroup, DiffLine, FileDiff, GroupKind, LineKind,
};
use crate::syntax::detect_language;

const MAX_INLINE_LEN: usize = 600;
const MIN_INLINE_SIMILARITY: f32 = 0.3;

fn should_do_inline(old: &str, new: &str) -> bool {
    old.len() <= MAX_INLINE_LEN && new.len() <= MAX_INLINE_LEN
}

fn strip_git_prefix(path: &str) -> String {
    path.trim_start_matches("a/")
        .trim_start_matches("b/")
        .to_string()
}

fn similarity(old: &str, new: &str) -> f32 {
    TextDiff::from_chars(old, new).ratio()
}

fn inline_segments(old: &str, new: &str) -> Vec<(String, bool)> {
    let diff = TextDiff::from_chars(old, new);
    let mut segments = Vec::new();

    for change in diff.iter_all_changes() {
        let text = change.value().to_string();
        match change.tag() {
            ChangeTag::Equal => segments.push((text, false)),
            ChangeTag::Delete | ChangeTag::Insert => segments.push((text, true)),
        }
    }

    segments
}

fn header_group(hunk: &Hunk, elided: usize) -> DiffGroup {
    let text = format!(
        "@@ -{},{} +{},{} @@",
        hunk.source_start, hunk.source_length, hunk.target_start, hunk.target_length
    );
    let mut line = DiffLine::new(LineKind::Header, None, None, text);
    if elided > 0 {
        line.context_action = Some(ContextAction {
            label: format!("Show {} unchanged lines", elided),
            hidden_lines: elided,
        });
    }
    DiffGroup::with_lines(GroupKind::Header, vec![line])
}

fn build_groups_for_hunk(hunk: &Hunk, groups: &mut Vec<DiffGroup>) {
    let lines = hunk.lines();
    let mut i = 0usize;

    while i < lines.len() {
        let line = &lines[i];

        if line.is_context() {
            let mut group = DiffGroup::new(GroupKind::Unchanged);
            while i < lines.len() && lines[i].is_context() {
                group.add_line(DiffLine::new(
                    LineKind::Unchanged,
                    lines[i].source_line_no,
                    lines[i].target_line_no,
                    lines[i].value.as_str(),
                ));
                i += 1;
            }
            groups.push(group);
            continue;
        }

        let remove_start = i;
        let mut j = i;

        while j < lines.len() && lines[j].is_removed() {
            j += 1;
        }
        let insert_start = j;

        while j < lines.len() && lines[j].is_added() {
            j += 1;
        }

        let removed = &lines[remove_start..insert_start];
        let added = &lines[insert_start..j];

        if removed.is_empty() && added.is_empty() {
            // Unrecognized line type ("\ No newline at end of file").
            i += 1;
            continue;
        }

        let kind = if removed.is_empty() {
            GroupKind::Added
        } else if added.is_empty() {
            GroupKind::Removed
        } else {
            GroupKind::Mixed
        };

        // Intraline emphasis only when the runs pair up one-to-one and
        // at least one pair is actually similar.
        let pair_inline = removed.len() == added.len()
            && removed.iter().zip(added.iter()).any(|(old, new)| {
                similarity(old.value.as_str(), new.value.as_str()) > MIN_INLINE_SIMILARITY
            });

        let mut group = DiffGroup::new(kind);

        for (idx, old_line) in removed.iter().enumerate() {
            let old_text = old_line.value.as_str();
            let mut line = DiffLine::new(LineKind::Removed, old_line.source_line_no, None, old_text);

            if pair_inline {
                let new_text = added[idx].value.as_str();
                if similarity(old_text, new_text) > MIN_INLINE_SIMILARITY
                    && should_do_inline(old_text, new_text)
                {
                    line.inline_segments = Some(inline_segments(old_text, new_text));
                }
            }
            group.add_line(line);
        }

        for (idx, new_line) in added.iter().enumerate() {
            let new_text = new_line.value.as_str();
            let mut line = DiffLine::new(LineKind::Added, None, new_line.target_line_no, new_text);

            if pair_inline {
                let old_text = removed[idx].value.as_str();
                if similarity(old_text, new_text) > MIN_INLINE_SIMILARITY
                    && should_do_inline(old_text, new_text)
                {
                    line.inline_segments = Some(inline_segments(new_text, old_text));
                }
            }
            group.add_line(line);
        }

        groups.push(group);
        i = j;
    }
}

/// Parses unified diff text into per-file group sequences. Empty input
/// yields an empty list.
pub fn parse_unified(diff_text: &str) -> Result<Vec<FileDiff>, DiffError> {
    let trimmed = diff_text.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    let mut patch = PatchSet::new();
    patch
        .parse(trimmed)
        .map_err(|err| DiffError::Parse {
            message: err.to_string(),
        })?;

    let mut files_out = Vec::new();

    for file in patch.files() {
        let mut groups = Vec::new();
        let mut next_visible_line = 1usize;

        for hunk in file.hunks() {
            let elided = hunk.source_start.saturating_sub(next_visible_line);
            groups.push(header_group(hunk, elided));
            next_visible_line = hunk.source_start + hunk.source_length;

            build_groups_for_hunk(hunk, &mut groups);
        }

        let old_path = strip_git_prefix(&file.source_file);
        let new_path = strip_git_prefix(&file.target_file);
        let display = if new_path == "/dev/null" {
            &old_path
        } else {
            &new_path
        };
        let language = detect_language(display);
        debug!(
            "parsed {}: {} groups, language {:?}",
            display,
            groups.len(),
            language
        );

        files_out.push(FileDiff {
            old_path,
            new_path,
            language,
            groups,
            additions: file.added(),
            deletions: file.removed(),
        });
    }

    Ok(files_out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
diff --git a/src/main.rs b/src/main.rs
index 0123456..789abcd 100644
--- a/src/main.rs
+++ b/src/main.rs
@@ -10,5 +10,5 @@
 fn main() {
-    println!(\"Hello, world!\");
+    println!(\"Hello, reviewer!\");
     println!(\"Another line\");
 }
";

    #[test]
    fn empty_input_yields_no_files() {
        assert!(parse_unified("").unwrap().is_empty());
        assert!(parse_unified("   \n").unwrap().is_empty());
    }

    #[test]
    fn garbage_input_is_a_parse_error() {
        let err = parse_unified("not a diff at all").unwrap_err();
        assert!(matches!(err, DiffError::Parse { .. }));
    }

    #[test]
    fn groups_runs_by_classification() {
        let files = parse_unified(SAMPLE).unwrap();
        assert_eq!(files.len(), 1);

        let file = &files[0];
        assert_eq!(file.old_path, "src/main.rs");
        assert_eq!(file.new_path, "src/main.rs");
        assert_eq!(file.language.as_deref(), Some("Rust"));
        assert_eq!(file.additions, 1);
        assert_eq!(file.deletions, 1);

        let kinds: Vec<GroupKind> = file.groups.iter().map(|g| g.kind()).collect();
        assert_eq!(
            kinds,
            [
                GroupKind::Header,
                GroupKind::Unchanged,
                GroupKind::Mixed,
                GroupKind::Unchanged,
            ]
        );
    }

    #[test]
    fn mixed_group_keeps_numbers_and_order() {
        let files = parse_unified(SAMPLE).unwrap();
        let mixed = &files[0].groups[2];

        let lines = mixed.lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].kind, LineKind::Removed);
        assert_eq!(lines[0].before_number, Some(11));
        assert_eq!(lines[0].after_number, None);
        assert_eq!(lines[1].kind, LineKind::Added);
        assert_eq!(lines[1].before_number, None);
        assert_eq!(lines[1].after_number, Some(11));
    }

    #[test]
    fn similar_pairs_get_inline_segments() {
        let files = parse_unified(SAMPLE).unwrap();
        let mixed = &files[0].groups[2];

        let removed = &mixed.lines()[0];
        let segments = removed.inline_segments.as_ref().unwrap();
        let rebuilt: String = segments.iter().map(|(text, _)| text.as_str()).collect();
        assert_eq!(rebuilt, removed.text);
        assert!(segments.iter().any(|(_, emphasized)| *emphasized));
        assert!(segments.iter().any(|(_, emphasized)| !*emphasized));
    }

    #[test]
    fn hunk_header_carries_elision_action() {
        let files = parse_unified(SAMPLE).unwrap();
        let header = &files[0].groups[0];

        assert_eq!(header.len(), 1);
        let line = &header.lines()[0];
        assert_eq!(line.kind, LineKind::Header);
        assert_eq!(line.text, "@@ -10,5 +10,5 @@");

        let action = line.context_action.as_ref().unwrap();
        assert_eq!(action.hidden_lines, 9);
        assert!(action.label.contains('9'));
    }

    #[test]
    fn dissimilar_replacement_skips_inline_segments() {
        let diff = "\
--- a/notes.txt
+++ b/notes.txt
@@ -1,1 +1,1 @@
-aaaaaaaaaaaaaaaa
+zzzzzzzz
";
        let files = parse_unified(diff).unwrap();
        let mixed = files[0]
            .groups
            .iter()
            .find(|g| g.kind() == GroupKind::Mixed)
            .unwrap();
        assert!(mixed.lines().iter().all(|l| l.inline_segments.is_none()));
    }

    #[test]
    fn deleted_file_uses_old_path_for_language() {
        let diff = "\
--- a/gone.py
+++ /dev/null
@@ -1,2 +0,0 @@
-import os
-print(os.name)
";
        let files = parse_unified(diff).unwrap();
        let file = &files[0];
        assert_eq!(file.display_path(), "gone.py");
        assert_eq!(file.language.as_deref(), Some("Python"));
        assert_eq!(file.deletions, 2);

        let kinds: Vec<GroupKind> = file.groups.iter().map(|g| g.kind()).collect();
        assert_eq!(kinds, [GroupKind::Header, GroupKind::Removed]);
    }
}
