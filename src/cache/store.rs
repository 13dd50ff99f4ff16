//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with lazy TTL expiry and a
//! capacity bound enforced by oldest-insertion eviction.

use std::collections::HashMap;

use tracing::debug;

use crate::cache::{CacheEntry, CacheStats};
use crate::cdx::SnapshotRows;

// == Snapshot Cache ==
/// In-memory store for CDX responses, keyed by the canonical upstream query.
///
/// All entries share one cache-wide TTL. Expiry is lazy: callers run
/// `purge_expired` at the start of each lookup instead of relying on a
/// background reaper. The capacity bound evicts the entry with the oldest
/// insertion time; this is not LRU (access times are never tracked).
#[derive(Debug)]
pub struct SnapshotCache {
    /// Cache-key to entry storage
    entries: HashMap<String, CacheEntry>,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    max_entries: usize,
    /// Entry time-to-live in milliseconds
    ttl_ms: u64,
}

impl SnapshotCache {
    // == Constructor ==
    /// Creates a new SnapshotCache with the given capacity and TTL.
    ///
    /// # Arguments
    /// * `max_entries` - Maximum number of entries the cache can hold
    /// * `ttl_secs` - Time-to-live applied to every entry, in seconds
    pub fn new(max_entries: usize, ttl_secs: u64) -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
            max_entries,
            ttl_ms: ttl_secs * 1000,
        }
    }

    // == Purge Expired ==
    /// Removes every entry whose age exceeds the TTL.
    ///
    /// Runs in O(n) over the current cache size on every lookup.
    ///
    /// Returns the number of entries removed.
    pub fn purge_expired(&mut self) -> usize {
        let before = self.entries.len();
        let ttl_ms = self.ttl_ms;
        self.entries.retain(|_, entry| !entry.is_expired(ttl_ms));

        let removed = before - self.entries.len();
        if removed > 0 {
            debug!(removed, "purged expired cache entries");
            self.stats.record_expirations(removed as u64);
        }
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    // == Get ==
    /// Returns the cached rows for a key if present and fresh.
    ///
    /// A stale entry found here (possible when it expired between the sweep
    /// and the probe) is removed and counted as a miss.
    pub fn get(&mut self, key: &str) -> Option<SnapshotRows> {
        match self.entries.get(key) {
            Some(entry) if !entry.is_expired(self.ttl_ms) => {
                self.stats.record_hit();
                Some(entry.rows.clone())
            }
            Some(_) => {
                self.entries.remove(key);
                self.stats.record_expirations(1);
                self.stats.set_total_entries(self.entries.len());
                self.stats.record_miss();
                None
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Insert ==
    /// Stores rows under a key, evicting the oldest entry if the capacity
    /// bound is exceeded.
    ///
    /// Re-inserting an existing key overwrites it and resets its age.
    /// Inserts are the only growth path, so the size can exceed the bound by
    /// at most one and a single eviction restores the invariant.
    pub fn insert(&mut self, key: String, rows: SnapshotRows) {
        self.entries.insert(key, CacheEntry::new(rows));

        if self.len() > self.max_entries {
            self.evict_oldest();
        }

        self.stats.set_total_entries(self.len());
    }

    // == Evict Oldest ==
    /// Removes the entry with the smallest insertion timestamp.
    ///
    /// An O(n) scan over insertion times, not LRU: reads never reorder
    /// entries, so the first-stored entry always goes first.
    fn evict_oldest(&mut self) {
        let oldest_key = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.stored_at)
            .map(|(key, _)| key.clone());

        if let Some(key) = oldest_key {
            debug!(key = %key, "evicting oldest cache entry");
            self.entries.remove(&key);
            self.stats.record_eviction();
        }
    }

    // == Contains ==
    /// Checks whether a key is currently stored, regardless of freshness.
    #[allow(dead_code)]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the cache is empty.
    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
