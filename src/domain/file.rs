use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use twox_hash::XxHash64;

use super::group::DiffGroup;

/// One file's worth of parsed diff content, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileDiff {
    pub old_path: String,
    pub new_path: String,
    /// Language identifier for syntax highlighting; `None` disables it.
    #[serde(default)]
    pub language: Option<String>,
    pub groups: Vec<DiffGroup>,
    pub additions: usize,
    pub deletions: usize,
}

impl FileDiff {
    /// Path shown to the user: the new path unless the file was deleted.
    pub fn display_path(&self) -> &str {
        if self.new_path == "/dev/null" {
            &self.old_path
        } else {
            &self.new_path
        }
    }

    /// Stable content fingerprint, used as a render-cache key.
    pub fn content_hash(&self) -> u64 {
        let mut hasher = XxHash64::with_seed(0);
        self.hash(&mut hasher);
        hasher.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DiffLine, GroupKind, LineKind};

    fn sample() -> FileDiff {
        FileDiff {
            old_path: "src/lib.rs".to_string(),
            new_path: "src/lib.rs".to_string(),
            language: Some("Rust".to_string()),
            groups: vec![DiffGroup::with_lines(
                GroupKind::Added,
                vec![DiffLine::new(LineKind::Added, None, Some(1), "fn f() {}")],
            )],
            additions: 1,
            deletions: 0,
        }
    }

    #[test]
    fn display_path_prefers_new_path() {
        let mut file = sample();
        assert_eq!(file.display_path(), "src/lib.rs");

        file.new_path = "/dev/null".to_string();
        assert_eq!(file.display_path(), "src/lib.rs");
    }

    #[test]
    fn content_hash_tracks_line_content() {
        let a = sample();
        let mut b = sample();
        assert_eq!(a.content_hash(), b.content_hash());

        b.groups[0] = DiffGroup::with_lines(
            GroupKind::Added,
            vec![DiffLine::new(LineKind::Added, None, Some(1), "fn g() {}")],
        );
        assert_ne!(a.content_hash(), b.content_hash());
    }
}
