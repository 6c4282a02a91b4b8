//! Cache Entry Module
//!
//! Defines the structure of a stored analysis result with its insertion time.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::models::AnalysisResult;

// == Cache Entry ==
/// A successfully obtained analysis result plus the time it was stored.
///
/// Entries are created only after a successful remote analysis; a fetch
/// failure never produces one.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The analysis payload
    pub result: AnalysisResult,
    /// Insertion timestamp (Unix milliseconds)
    pub stored_at_ms: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry stored at the given timestamp.
    pub fn new(result: AnalysisResult, stored_at_ms: u64) -> Self {
        Self {
            result,
            stored_at_ms,
        }
    }

    // == Is Expired ==
    /// Checks whether the entry has outlived the TTL at the given time.
    ///
    /// Boundary condition: an entry expires strictly after the TTL has
    /// elapsed (`now - stored_at > ttl`), so an entry inserted at t=0 with a
    /// 3600s TTL is still live at exactly t=3600s and gone at t=3601s.
    pub fn is_expired_at(&self, now_ms: u64, ttl_ms: u64) -> bool {
        now_ms.saturating_sub(self.stored_at_ms) > ttl_ms
    }

    // == Age ==
    /// Returns the entry's age in milliseconds at the given time.
    ///
    /// Clamps to zero if the clock reads earlier than the insertion time.
    pub fn age_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.stored_at_ms)
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
