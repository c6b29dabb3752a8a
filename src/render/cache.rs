//! Whole-file render cache.
//!
//! Re-render passes over an unchanged diff (window resize, scroll
//! rebuild) hit the cache and skip parsing and tokenization entirely.
//! Caching is per file, never per line: a per-line cache would bypass
//! the highlighter's continuation state.

use std::hash::Hasher;
use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;
use twox_hash::XxHash64;

use crate::domain::FileDiff;
use crate::syntax::Tokenizer;

use super::types::Section;
use super::{render_file, DiffLayout};

/// Memoizes [`render_file`] output per (file content, layout).
///
/// The key ignores tokenizer configuration, so use one renderer per
/// tokenizer/theme, the same way the source view owns its caches.
pub struct CachedRenderer {
    cache: LruCache<u64, Arc<Vec<Section>>>,
}

impl CachedRenderer {
    pub fn new(capacity: usize) -> Self {
        Self {
            cache: LruCache::new(NonZeroUsize::new(capacity.max(1)).expect("non-zero capacity")),
        }
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn render<T: Tokenizer + Clone>(
        &mut self,
        file: &FileDiff,
        layout: DiffLayout,
        tokenizer: T,
    ) -> Arc<Vec<Section>> {
        let key = cache_key(file, layout);
        if let Some(hit) = self.cache.get(&key) {
            return hit.clone();
        }

        let sections = Arc::new(render_file(file, layout, tokenizer));
        self.cache.put(key, sections.clone());
        sections
    }
}

impl Default for CachedRenderer {
    fn default() -> Self {
        Self::new(32)
    }
}

fn cache_key(file: &FileDiff, layout: DiffLayout) -> u64 {
    let mut hasher = XxHash64::with_seed(0);
    hasher.write_u64(file.content_hash());
    hasher.write_u8(match layout {
        DiffLayout::Unified => 0,
        DiffLayout::SideBySide => 1,
    });
    hasher.finish()
}
