//! Byte-budgeted LRU cache of formatted snippets.
//!
//! `FormatCache` stores `FormattedEntry` values keyed by their original text.
//! Recency is tracked by `lru::LruCache`; eviction is driven by the aggregate
//! size estimate rather than the entry count.

use std::sync::Arc;

use lru::LruCache;

use super::entry::FormattedEntry;

/// Caches formatted entries within a fixed byte budget.
pub struct FormatCache {
    /// Entries keyed by original text, most recently used at the front.
    entries: LruCache<Arc<str>, CachedEntry>,
    /// Aggregate size budget in bytes.
    capacity_bytes: usize,
    /// Sum of `charged_bytes` over all entries.
    total_bytes: usize,
    /// Number of cache hits.
    hit_count: u64,
    /// Number of cache misses.
    miss_count: u64,
    /// Number of entries removed to stay within budget.
    eviction_count: u64,
}

struct CachedEntry {
    entry: Arc<FormattedEntry>,
    /// Size estimate at the time the entry was last accounted.
    charged_bytes: usize,
}

impl FormatCache {
    /// Create an empty cache with the given byte budget.
    pub fn new(capacity_bytes: usize) -> Self {
        Self {
            entries: LruCache::unbounded(),
            capacity_bytes,
            total_bytes: 0,
            hit_count: 0,
            miss_count: 0,
            eviction_count: 0,
        }
    }

    /// Look up a cached entry and promote it to most recently used.
    ///
    /// The entry's size is re-accounted on every hit, since its mapping may
    /// have been materialized since it was inserted.
    pub fn get(&mut self, original: &str) -> Option<Arc<FormattedEntry>> {
        let Some(cached) = self.entries.get_mut(original) else {
            self.miss_count += 1;
            return None;
        };
        self.hit_count += 1;

        let entry = Arc::clone(&cached.entry);
        let current = entry.size_estimate();
        if current != cached.charged_bytes {
            self.total_bytes = self.total_bytes - cached.charged_bytes + current;
            cached.charged_bytes = current;
            self.evict_to_budget();
        }
        Some(entry)
    }

    /// Insert (or replace) an entry as most recently used, then evict down to budget.
    pub fn put(&mut self, entry: Arc<FormattedEntry>) {
        let key = Arc::clone(entry.original_arc());
        let charged_bytes = entry.size_estimate();

        if let Some(replaced) = self.entries.put(
            key,
            CachedEntry {
                entry,
                charged_bytes,
            },
        ) {
            self.total_bytes -= replaced.charged_bytes;
        }
        self.total_bytes += charged_bytes;
        self.evict_to_budget();
    }

    /// Membership test without touching recency or statistics.
    pub fn contains(&self, original: &str) -> bool {
        self.entries.contains(original)
    }

    /// Remove the entry for `original`, returning whether one existed.
    pub fn invalidate(&mut self, original: &str) -> bool {
        match self.entries.pop(original) {
            Some(removed) => {
                self.total_bytes -= removed.charged_bytes;
                true
            }
            None => false,
        }
    }

    /// Clear all cached entries and reset statistics.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.total_bytes = 0;
        self.hit_count = 0;
        self.miss_count = 0;
        self.eviction_count = 0;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_bytes(&self) -> usize {
        self.total_bytes
    }

    pub fn capacity_bytes(&self) -> usize {
        self.capacity_bytes
    }

    /// Cached keys ordered from least to most recently used.
    pub fn keys(&self) -> Vec<&str> {
        self.entries.iter().rev().map(|(k, _)| &**k).collect()
    }

    /// Get cache statistics (for diagnostics).
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entry_count: self.entries.len(),
            total_bytes: self.total_bytes,
            capacity_bytes: self.capacity_bytes,
            hit_count: self.hit_count,
            miss_count: self.miss_count,
            eviction_count: self.eviction_count,
        }
    }

    /// Drop least recently used entries until the budget holds. The last
    /// remaining entry is kept even if it alone exceeds the budget.
    fn evict_to_budget(&mut self) {
        while self.total_bytes > self.capacity_bytes && self.entries.len() > 1 {
            let Some((key, evicted)) = self.entries.pop_lru() else {
                break;
            };
            self.total_bytes -= evicted.charged_bytes;
            self.eviction_count += 1;
            log::debug!(
                "Evicted formatted snippet ({} bytes, {} chars of source); cache now {}/{} bytes",
                evicted.charged_bytes,
                key.chars().count(),
                self.total_bytes,
                self.capacity_bytes
            );
        }
    }
}

/// Cache statistics for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Current number of cached entries.
    pub entry_count: usize,
    /// Current aggregate size estimate.
    pub total_bytes: usize,
    /// Byte budget.
    pub capacity_bytes: usize,
    /// Number of cache hits.
    pub hit_count: u64,
    /// Number of cache misses.
    pub miss_count: u64,
    /// Number of budget-driven evictions.
    pub eviction_count: u64,
}
