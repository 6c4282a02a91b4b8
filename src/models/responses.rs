//! Response DTOs for the analysis cache service API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::models::AnalysisResult;

/// Response body for the analyze operation (POST /analyze)
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeResponse {
    /// Fingerprint of the uploaded image, usable with GET /result/:fingerprint
    pub fingerprint: String,
    /// The analysis result (cached or freshly computed)
    pub result: AnalysisResult,
}

impl AnalyzeResponse {
    /// Creates a new AnalyzeResponse
    pub fn new(fingerprint: impl Into<String>, result: AnalysisResult) -> Self {
        Self {
            fingerprint: fingerprint.into(),
            result,
        }
    }
}

/// Response body for the lookup operation (GET /result/:fingerprint)
#[derive(Debug, Clone, Serialize)]
pub struct LookupResponse {
    /// The requested fingerprint
    pub fingerprint: String,
    /// The cached analysis result
    pub result: AnalysisResult,
    /// Age of the cached entry in seconds
    pub age_seconds: u64,
}

impl LookupResponse {
    /// Creates a new LookupResponse
    pub fn new(fingerprint: impl Into<String>, result: AnalysisResult, age_seconds: u64) -> Self {
        Self {
            fingerprint: fingerprint.into(),
            result,
            age_seconds,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Number of entries removed by the eviction sweep
    pub expirations: u64,
    /// Current number of entries in cache
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl StatsResponse {
    /// Creates a new StatsResponse from cache statistics
    pub fn new(hits: u64, misses: u64, expirations: u64, total_entries: usize) -> Self {
        let total_requests = hits + misses;
        let hit_rate = if total_requests > 0 {
            hits as f64 / total_requests as f64
        } else {
            0.0
        };
        Self {
            hits,
            misses,
            expirations,
            total_entries,
            hit_rate,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
