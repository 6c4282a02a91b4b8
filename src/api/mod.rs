//! API Module
//!
//! HTTP handlers and routing for the analysis cache service REST API.
//!
//! # Endpoints
//! - `POST /analyze` - Analyze an uploaded food image
//! - `GET /result/:fingerprint` - Look up a cached analysis
//! - `GET /stats` - Get cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
