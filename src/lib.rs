//! Calorie Cache - a content-addressed cache in front of food-image analysis
//!
//! Fingerprints uploaded food photos and caches the remote vision-model
//! analysis for an hour, so identical images never trigger redundant calls.

pub mod analyzer;
pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod fingerprint;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::AnalysisCache;
pub use config::Config;
pub use fingerprint::Fingerprint;
pub use tasks::spawn_sweep_task;
