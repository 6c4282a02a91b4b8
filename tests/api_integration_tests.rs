//! Integration Tests for API Endpoints
//!
//! Tests the full request/response cycle with a stub analyzer in place of
//! the remote vision endpoint, so the compute-callback accounting is
//! observable.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use calorie_cache::analyzer::ImageAnalyzer;
use calorie_cache::cache::CacheStore;
use calorie_cache::error::{AnalysisError, Result};
use calorie_cache::models::AnalysisResult;
use calorie_cache::{api::create_router, AnalysisCache, AppState, Fingerprint};

// == Stub Analyzers ==

/// Returns a fixed result and counts invocations.
#[derive(Default)]
struct CountingAnalyzer {
    calls: AtomicUsize,
}

#[async_trait]
impl ImageAnalyzer for CountingAnalyzer {
    async fn analyze(&self, _image: &[u8]) -> Result<AnalysisResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(AnalysisResult::Detailed {
            food_items: vec!["apple".to_string()],
            total_calories: 95.0,
        })
    }
}

/// Fails while the flag is set, then succeeds.
#[derive(Default)]
struct FlakyAnalyzer {
    failing: AtomicBool,
    calls: AtomicUsize,
}

#[async_trait]
impl ImageAnalyzer for FlakyAnalyzer {
    async fn analyze(&self, _image: &[u8]) -> Result<AnalysisResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(AnalysisError::RemoteCall("connection reset".to_string()));
        }
        Ok(AnalysisResult::CaloriesOnly { calories: 300.0 })
    }
}

// == Helper Functions ==

fn create_test_app(analyzer: Arc<dyn ImageAnalyzer>) -> Router {
    let cache = AnalysisCache::new(CacheStore::new(3600));
    let state = AppState::new(cache, analyzer);
    create_router(state)
}

fn multipart_request(image: &[u8]) -> Request<Body> {
    let boundary = "integration-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"meal.jpg\"\r\n\
             Content-Type: image/jpeg\r\n\r\n",
            boundary
        )
        .as_bytes(),
    );
    body.extend_from_slice(image);
    body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());

    Request::builder()
        .method("POST")
        .uri("/analyze")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// == Analyze Endpoint Tests ==

#[tokio::test]
async fn test_analyze_returns_result_and_fingerprint() {
    let analyzer = Arc::new(CountingAnalyzer::default());
    let app = create_test_app(analyzer.clone());
    let image = b"jpeg bytes of a plate of pasta";

    let response = app.oneshot(multipart_request(image)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    assert_eq!(
        json["fingerprint"].as_str().unwrap(),
        Fingerprint::of_bytes(image).as_str()
    );
    assert_eq!(json["result"]["foodItems"][0].as_str().unwrap(), "apple");
    assert_eq!(json["result"]["totalCalories"].as_f64().unwrap(), 95.0);
    assert_eq!(analyzer.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_analyze_identical_bytes_hit_cache() {
    let analyzer = Arc::new(CountingAnalyzer::default());
    let app = create_test_app(analyzer.clone());
    let image = b"same burger photo";

    for _ in 0..3 {
        let response = app
            .clone()
            .oneshot(multipart_request(image))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    // Only the first upload reached the remote analyzer
    assert_eq!(analyzer.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_analyze_distinct_bytes_each_compute() {
    let analyzer = Arc::new(CountingAnalyzer::default());
    let app = create_test_app(analyzer.clone());

    let first = app
        .clone()
        .oneshot(multipart_request(b"photo one"))
        .await
        .unwrap();
    let second = app
        .oneshot(multipart_request(b"photo two"))
        .await
        .unwrap();

    let first_json = body_to_json(first.into_body()).await;
    let second_json = body_to_json(second.into_body()).await;
    assert_ne!(first_json["fingerprint"], second_json["fingerprint"]);
    assert_eq!(analyzer.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_analyze_empty_file_is_valid() {
    let analyzer = Arc::new(CountingAnalyzer::default());
    let app = create_test_app(analyzer);

    let response = app.oneshot(multipart_request(b"")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    assert_eq!(
        json["fingerprint"].as_str().unwrap(),
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
}

#[tokio::test]
async fn test_analyze_missing_image_field() {
    let analyzer = Arc::new(CountingAnalyzer::default());
    let app = create_test_app(analyzer.clone());
    let boundary = "integration-test-boundary";
    let body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"comment\"\r\n\r\nlunch\r\n--{b}--\r\n",
        b = boundary
    );

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/analyze")
                .header(
                    "content-type",
                    format!("multipart/form-data; boundary={}", boundary),
                )
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert!(json.get("error").is_some());
    assert_eq!(analyzer.calls.load(Ordering::SeqCst), 0);
}

// == Failure Propagation Tests ==

#[tokio::test]
async fn test_analyze_failure_propagates_and_is_not_cached() {
    let analyzer = Arc::new(FlakyAnalyzer::default());
    analyzer.failing.store(true, Ordering::SeqCst);
    let app = create_test_app(analyzer.clone());
    let image = b"photo during outage";

    let response = app
        .clone()
        .oneshot(multipart_request(image))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = body_to_json(response.into_body()).await;
    assert!(json["error"].as_str().unwrap().contains("connection reset"));

    // Nothing was stored: a lookup reports absent
    let lookup = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/result/{}", Fingerprint::of_bytes(image)))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(lookup.status(), StatusCode::NOT_FOUND);

    // A retry on the same input attempts the remote call again
    analyzer.failing.store(false, Ordering::SeqCst);
    let retry = app.oneshot(multipart_request(image)).await.unwrap();
    assert_eq!(retry.status(), StatusCode::OK);
    assert_eq!(analyzer.calls.load(Ordering::SeqCst), 2);
}

// == Result Endpoint Tests ==

#[tokio::test]
async fn test_result_endpoint_serves_cached_analysis() {
    let analyzer = Arc::new(CountingAnalyzer::default());
    let app = create_test_app(analyzer.clone());
    let image = b"tray of sushi";

    let analyze = app
        .clone()
        .oneshot(multipart_request(image))
        .await
        .unwrap();
    assert_eq!(analyze.status(), StatusCode::OK);

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/result/{}", Fingerprint::of_bytes(image)))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["result"]["totalCalories"].as_f64().unwrap(), 95.0);
    assert!(json.get("age_seconds").is_some());
    // Serving the lookup did not re-invoke the analyzer
    assert_eq!(analyzer.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_result_endpoint_malformed_fingerprint() {
    let app = create_test_app(Arc::new(CountingAnalyzer::default()));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/result/not-a-fingerprint")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// == Stats Endpoint Tests ==

#[tokio::test]
async fn test_stats_endpoint_tracks_hits_and_misses() {
    let analyzer = Arc::new(CountingAnalyzer::default());
    let app = create_test_app(analyzer);
    let image = b"bowl of oatmeal";

    // miss + compute, then a hit
    let _ = app
        .clone()
        .oneshot(multipart_request(image))
        .await
        .unwrap();
    let _ = app
        .clone()
        .oneshot(multipart_request(image))
        .await
        .unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/stats")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["hits"].as_u64().unwrap(), 1);
    assert_eq!(json["misses"].as_u64().unwrap(), 1);
    assert_eq!(json["total_entries"].as_u64().unwrap(), 1);
    assert!(json.get("hit_rate").is_some());
}

// == Health Endpoint Tests ==

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app(Arc::new(CountingAnalyzer::default()));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"].as_str().unwrap(), "healthy");
    assert!(json.get("timestamp").is_some());
}
