//! LRU cache of tokenized query texts.
//!
//! Queries are usually drawn from a small set of literals, so the token
//! sequence for a given text is computed once and shared. Entries are
//! immutable; a lookup promotes the entry to most recently used.

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

use lru::LruCache;
use parking_lot::Mutex;
use tracing::debug;

use crate::tokens::Tokens;

/// Capacity of the process-wide cache.
pub const DEFAULT_CAPACITY: usize = 1024;

/// Thread-safe LRU cache mapping query text to its tokens.
pub struct TokenCache {
    cache: Mutex<LruCache<Box<str>, Arc<Tokens>>>,
    capacity: Option<NonZeroUsize>,
    stats: CacheStats,
}

impl TokenCache {
    /// Cache holding at most `capacity` texts.
    #[must_use]
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self::with_capacity(Some(capacity))
    }

    /// Cache with no eviction.
    #[must_use]
    pub fn unbounded() -> Self {
        Self::with_capacity(None)
    }

    /// Bounded cache for `Some`, unbounded for `None`.
    #[must_use]
    pub fn with_capacity(capacity: Option<NonZeroUsize>) -> Self {
        let cache = match capacity {
            Some(cap) => LruCache::new(cap),
            None => LruCache::unbounded(),
        };
        Self {
            cache: Mutex::new(cache),
            capacity,
            stats: CacheStats::default(),
        }
    }

    /// The process-wide cache, created on first use with
    /// [`DEFAULT_CAPACITY`].
    pub fn global() -> &'static Self {
        static GLOBAL: OnceLock<TokenCache> = OnceLock::new();
        GLOBAL.get_or_init(Self::default)
    }

    /// Tokens of `text`, from the cache when present.
    ///
    /// On a miss the text is tokenized outside the lock; when two threads
    /// miss on the same text concurrently both compute it and the later
    /// insert wins. Both results are identical.
    pub fn tokenize(&self, text: &str) -> Arc<Tokens> {
        if let Some(tokens) = self.get(text) {
            return tokens;
        }
        let tokens = Arc::new(Tokens::new(text));
        self.cache.lock().put(text.into(), Arc::clone(&tokens));
        tokens
    }

    /// Cached tokens of `text` without computing them on a miss.
    pub fn get(&self, text: &str) -> Option<Arc<Tokens>> {
        let hit = self.cache.lock().get(text).cloned();
        if hit.is_some() {
            self.stats.record_hit();
        } else {
            self.stats.record_miss();
        }
        debug!(len = text.len(), hit = hit.is_some(), "token cache lookup");
        hit
    }

    /// Whether `text` is cached. Does not touch recency or statistics.
    pub fn contains(&self, text: &str) -> bool {
        self.cache.lock().contains(text)
    }

    /// Configured capacity, `None` when unbounded.
    pub fn capacity(&self) -> Option<NonZeroUsize> {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.cache.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.lock().is_empty()
    }

    /// Drop every entry. Statistics are kept.
    pub fn clear(&self) {
        self.cache.lock().clear();
    }

    /// Snapshot of the hit/miss counters.
    pub fn stats(&self) -> CacheStats {
        self.stats.clone()
    }
}

impl Default for TokenCache {
    fn default() -> Self {
        Self::with_capacity(NonZeroUsize::new(DEFAULT_CAPACITY))
    }
}

impl std::fmt::Debug for TokenCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCache")
            .field("capacity", &self.capacity)
            .field("len", &self.len())
            .field("stats", &self.stats)
            .finish()
    }
}

/// Cache hit/miss statistics.
#[derive(Debug, Default)]
pub struct CacheStats {
    hits: AtomicU64,
    misses: AtomicU64,
}

impl Clone for CacheStats {
    fn clone(&self) -> Self {
        Self {
            hits: AtomicU64::new(self.hits()),
            misses: AtomicU64::new(self.misses()),
        }
    }
}

impl CacheStats {
    fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    #[must_use]
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// Fraction of lookups that hit, 0.0 when nothing was looked up.
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let hits = self.hits();
        let total = hits + self.misses();
        if total == 0 {
            0.0
        } else {
            #[allow(clippy::cast_precision_loss)]
            {
                hits as f64 / total as f64
            }
        }
    }
}
