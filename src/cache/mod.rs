//! Cache Module
//!
//! Content-addressed caching of analysis results with TTL-based eviction.

mod entry;
mod shared;
mod stats;
mod store;


// Re-export public types
pub use entry::{current_timestamp_ms, CacheEntry};
pub use shared::AnalysisCache;
pub use stats::CacheStats;
pub use store::{CacheStore, DEFAULT_TTL_SECONDS};
