//! Cache Entry Module
//!
//! Defines the structure for individual cache entries.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::cdx::SnapshotRows;

// == Cache Entry ==
/// A single cached CDX response.
///
/// The time-to-live is a property of the cache, not the entry; an entry only
/// remembers when it was stored.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The cached snapshot rows, header row first
    pub rows: SnapshotRows,
    /// Insertion timestamp (Unix milliseconds)
    pub stored_at: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry stamped with the current time.
    pub fn new(rows: SnapshotRows) -> Self {
        Self {
            rows,
            stored_at: current_timestamp_ms(),
        }
    }

    // == Age ==
    /// Returns the entry age in milliseconds.
    pub fn age_ms(&self) -> u64 {
        current_timestamp_ms().saturating_sub(self.stored_at)
    }

    // == Is Expired ==
    /// Checks whether the entry has outlived the given TTL.
    ///
    /// Boundary condition: an entry is considered expired when its age is
    /// greater than or equal to the TTL, so an entry is never served once
    /// the full TTL duration has elapsed.
    pub fn is_expired(&self, ttl_ms: u64) -> bool {
        self.age_ms() >= ttl_ms
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis() as u64
}
