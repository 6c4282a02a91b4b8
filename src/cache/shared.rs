//! Shared Analysis Cache
//!
//! Thread-safe handle over the cache store that runs the hit/miss/compute
//! flow in front of the remote analysis call.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use crate::cache::entry::current_timestamp_ms;
use crate::cache::{CacheEntry, CacheStats, CacheStore};
use crate::error::Result;
use crate::fingerprint::Fingerprint;
use crate::models::AnalysisResult;

// == Analysis Cache ==
/// Cloneable, thread-safe front for [`CacheStore`].
///
/// The request path and the background eviction sweep share the store
/// through an `RwLock`, so neither can observe a half-written entry.
#[derive(Clone)]
pub struct AnalysisCache {
    inner: Arc<RwLock<CacheStore>>,
}

impl AnalysisCache {
    /// Wraps a cache store in a shared handle.
    pub fn new(store: CacheStore) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    // == Lookup ==
    /// Returns the cached entry for a fingerprint, if present and fresh.
    pub async fn lookup(&self, key: &Fingerprint) -> Option<CacheEntry> {
        self.inner.write().await.lookup(key)
    }

    // == Get Or Compute ==
    /// Serves a cached result, or invokes `compute` on a miss.
    ///
    /// On a hit, `compute` is never invoked. On a miss, `compute` runs with
    /// no lock held (it awaits external I/O); its successful result is
    /// stored and returned, while a failure propagates unmodified and
    /// nothing is stored, so a retry on the same input attempts the remote
    /// call again.
    ///
    /// Concurrent misses for the same fingerprint each invoke their own
    /// `compute`; the later insert overwrites (last-write-wins on identical
    /// input, which is harmless).
    pub async fn get_or_compute<F, Fut>(&self, key: Fingerprint, compute: F) -> Result<AnalysisResult>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<AnalysisResult>>,
    {
        if let Some(entry) = self.inner.write().await.lookup(&key) {
            debug!(fingerprint = %key, "cache hit");
            return Ok(entry.result);
        }

        debug!(fingerprint = %key, "cache miss, invoking remote analysis");
        let result = compute().await?;

        self.inner.write().await.insert(key, result.clone());
        Ok(result)
    }

    // == Evict Expired ==
    /// Runs one eviction sweep against the wall clock.
    ///
    /// Returns the number of entries removed. Safe to invoke manually in
    /// addition to the periodic sweep.
    pub async fn evict_expired_now(&self) -> usize {
        self.inner.write().await.evict_expired(current_timestamp_ms())
    }

    /// Runs one eviction sweep at an explicit timestamp.
    pub async fn evict_expired_at(&self, now_ms: u64) -> usize {
        self.inner.write().await.evict_expired(now_ms)
    }

    // == Diagnostics ==
    /// Returns the number of live entries.
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Returns true if the cache holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    /// Returns a snapshot of the cache statistics.
    pub async fn stats(&self) -> CacheStats {
        self.inner.read().await.stats()
    }
}
