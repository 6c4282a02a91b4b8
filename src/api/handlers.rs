//! API Handlers
//!
//! HTTP request handlers for each endpoint of the analysis cache service.

use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use tracing::info;

use crate::analyzer::{ImageAnalyzer, VisionAnalyzer};
use crate::cache::{current_timestamp_ms, AnalysisCache, CacheStore};
use crate::config::Config;
use crate::error::{AnalysisError, Result};
use crate::fingerprint::Fingerprint;
use crate::models::{AnalyzeResponse, HealthResponse, LookupResponse, StatsResponse};

/// Application state shared across all handlers.
///
/// The analyzer sits behind a trait object so tests inject stubs in place
/// of the real vision client.
#[derive(Clone)]
pub struct AppState {
    /// Shared analysis cache
    pub cache: AnalysisCache,
    /// Remote image analyzer (the compute callback for cache misses)
    pub analyzer: Arc<dyn ImageAnalyzer>,
}

impl AppState {
    /// Creates a new AppState from a cache and an analyzer.
    pub fn new(cache: AnalysisCache, analyzer: Arc<dyn ImageAnalyzer>) -> Self {
        Self { cache, analyzer }
    }

    /// Creates a new AppState from configuration, wiring the real vision
    /// analyzer.
    pub fn from_config(config: &Config) -> Result<Self> {
        let cache = AnalysisCache::new(CacheStore::new(config.ttl_seconds));
        let analyzer = Arc::new(VisionAnalyzer::from_config(config)?);
        Ok(Self::new(cache, analyzer))
    }
}

/// Handler for POST /analyze
///
/// Fingerprints the uploaded image and serves the cached analysis if the
/// same bytes were seen within the TTL; otherwise calls the remote analyzer
/// and caches the successful result.
pub async fn analyze_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeResponse>> {
    let mut image: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AnalysisError::InvalidRequest(format!("Unreadable upload: {}", e)))?
    {
        if field.name() == Some("image") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AnalysisError::InvalidRequest(format!("Unreadable upload: {}", e)))?;
            image = Some(bytes.to_vec());
            break;
        }
    }

    // An empty file is a valid input with a stable fingerprint; only a
    // missing field is rejected
    let bytes = image.ok_or_else(|| {
        AnalysisError::InvalidRequest("Missing multipart field 'image'".to_string())
    })?;

    let fingerprint = Fingerprint::of_bytes(&bytes);
    info!(fingerprint = %fingerprint, size = bytes.len(), "analyze request");

    let analyzer = state.analyzer.clone();
    let result = state
        .cache
        .get_or_compute(fingerprint.clone(), move || async move {
            analyzer.analyze(&bytes).await
        })
        .await?;

    Ok(Json(AnalyzeResponse::new(fingerprint.to_string(), result)))
}

/// Handler for GET /result/:fingerprint
///
/// Lookup-only: returns the cached analysis for a fingerprint, 404 if the
/// entry is absent or past the TTL.
pub async fn result_handler(
    State(state): State<AppState>,
    Path(fingerprint): Path<String>,
) -> Result<Json<LookupResponse>> {
    let key = Fingerprint::from_hex(&fingerprint)?;

    let entry = state
        .cache
        .lookup(&key)
        .await
        .ok_or_else(|| AnalysisError::NotFound(key.to_string()))?;

    let age_seconds = entry.age_ms(current_timestamp_ms()) / 1000;
    Ok(Json(LookupResponse::new(
        key.to_string(),
        entry.result,
        age_seconds,
    )))
}

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.cache.stats().await;

    Json(StatsResponse::new(
        stats.hits,
        stats.misses,
        stats.expirations,
        stats.total_entries,
    ))
}

/// Handler for GET /health
///
/// Returns health status of the service.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AnalysisResult;
    use async_trait::async_trait;

    struct StubAnalyzer;

    #[async_trait]
    impl ImageAnalyzer for StubAnalyzer {
        async fn analyze(&self, _image: &[u8]) -> Result<AnalysisResult> {
            Ok(AnalysisResult::CaloriesOnly { calories: 250.0 })
        }
    }

    fn test_state() -> AppState {
        AppState::new(
            AnalysisCache::new(CacheStore::new(3600)),
            Arc::new(StubAnalyzer),
        )
    }

    #[tokio::test]
    async fn test_result_handler_not_found() {
        let state = test_state();
        let fingerprint = Fingerprint::of_bytes(b"never analyzed").to_string();

        let result = result_handler(State(state), Path(fingerprint)).await;
        assert!(matches!(result, Err(AnalysisError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_result_handler_malformed_fingerprint() {
        let state = test_state();

        let result = result_handler(State(state), Path("not-hex".to_string())).await;
        assert!(matches!(result, Err(AnalysisError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_result_handler_returns_cached_entry() {
        let state = test_state();
        let key = Fingerprint::of_bytes(b"some meal");
        state
            .cache
            .get_or_compute(key.clone(), || async {
                Ok(AnalysisResult::CaloriesOnly { calories: 250.0 })
            })
            .await
            .unwrap();

        let response = result_handler(State(state), Path(key.to_string()))
            .await
            .unwrap();
        assert_eq!(response.fingerprint, key.to_string());
        assert_eq!(
            response.result,
            AnalysisResult::CaloriesOnly { calories: 250.0 }
        );
    }

    #[tokio::test]
    async fn test_stats_handler_counts_lookups() {
        let state = test_state();
        let key = Fingerprint::of_bytes(b"some meal");

        // miss via result lookup
        let _ = result_handler(State(state.clone()), Path(key.to_string())).await;

        let response = stats_handler(State(state)).await;
        assert_eq!(response.hits, 0);
        assert_eq!(response.misses, 1);
        assert_eq!(response.total_entries, 0);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }
}
