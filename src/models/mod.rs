//! Data models for the analysis cache service
//!
//! Defines the analysis result union and the DTOs used for serializing
//! HTTP response bodies.

pub mod analysis;
pub mod responses;

// Re-export commonly used types
pub use analysis::AnalysisResult;
pub use responses::{
    AnalyzeResponse, ErrorResponse, HealthResponse, LookupResponse, StatsResponse,
};
