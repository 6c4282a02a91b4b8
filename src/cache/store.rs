//! Cache Store Module
//!
//! Fingerprint-keyed storage for analysis results with TTL-based eviction.
//! Holds at most one entry per fingerprint; a later insert for the same
//! fingerprint overwrites the earlier entry.

use std::collections::HashMap;

use crate::cache::entry::current_timestamp_ms;
use crate::cache::{CacheEntry, CacheStats};
use crate::fingerprint::Fingerprint;
use crate::models::AnalysisResult;

/// Default TTL for cached analysis results: one hour.
pub const DEFAULT_TTL_SECONDS: u64 = 3600;

// == Cache Store ==
/// In-memory store mapping fingerprints to analysis results.
///
/// Growth is bounded by age only: there is no entry-count cap, matching the
/// lifecycle policy of a session-scoped cache in front of an expensive
/// remote call. Methods take explicit timestamps so tests control the clock;
/// the `_at`-less conveniences use the wall clock.
#[derive(Debug)]
pub struct CacheStore {
    /// Fingerprint-keyed storage
    entries: HashMap<Fingerprint, CacheEntry>,
    /// Performance statistics
    stats: CacheStats,
    /// Entry time-to-live in milliseconds
    ttl_ms: u64,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new CacheStore with the given TTL in seconds.
    pub fn new(ttl_seconds: u64) -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
            ttl_ms: ttl_seconds * 1000,
        }
    }

    // == Lookup ==
    /// Retrieves the entry for a fingerprint at the given time.
    ///
    /// Entries past the TTL are reported absent but left in place; removing
    /// them is the eviction sweep's job. Records a hit or miss in the stats
    /// but never mutates the stored entries.
    pub fn lookup_at(&mut self, key: &Fingerprint, now_ms: u64) -> Option<CacheEntry> {
        match self.entries.get(key) {
            Some(entry) if !entry.is_expired_at(now_ms, self.ttl_ms) => {
                self.stats.record_hit();
                Some(entry.clone())
            }
            _ => {
                self.stats.record_miss();
                None
            }
        }
    }

    /// Retrieves the entry for a fingerprint using the wall clock.
    pub fn lookup(&mut self, key: &Fingerprint) -> Option<CacheEntry> {
        self.lookup_at(key, current_timestamp_ms())
    }

    // == Insert ==
    /// Stores an analysis result at the given time.
    ///
    /// Overwrites any existing entry for the same fingerprint, resetting its
    /// insertion time.
    pub fn insert_at(&mut self, key: Fingerprint, result: AnalysisResult, now_ms: u64) {
        self.entries.insert(key, CacheEntry::new(result, now_ms));
        self.stats.set_total_entries(self.entries.len());
    }

    /// Stores an analysis result using the wall clock.
    pub fn insert(&mut self, key: Fingerprint, result: AnalysisResult) {
        self.insert_at(key, result, current_timestamp_ms());
    }

    // == Evict Expired ==
    /// Removes every entry older than the TTL at the given time.
    ///
    /// Idempotent: calling it again with the same timestamp removes nothing
    /// extra. Returns the number of entries removed.
    pub fn evict_expired(&mut self, now_ms: u64) -> usize {
        let ttl_ms = self.ttl_ms;
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| !entry.is_expired_at(now_ms, ttl_ms));
        let removed = before - self.entries.len();

        self.stats.record_expirations(removed as u64);
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Length ==
    /// Returns the current number of live entries, expired or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
