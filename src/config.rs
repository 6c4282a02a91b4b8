//! Configuration Module
//!
//! Handles loading and managing service configuration from environment
//! variables. The vision API key is deliberately server-side only and is
//! never exposed through any endpoint.

use std::env;

use crate::cache::DEFAULT_TTL_SECONDS;

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible
/// defaults, except the API key which has no default.
#[derive(Debug, Clone)]
pub struct Config {
    /// Cached result time-to-live in seconds
    pub ttl_seconds: u64,
    /// Background eviction sweep interval in seconds
    pub sweep_interval: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Vision model endpoint URL
    pub vision_api_url: String,
    /// Vision model API key (server-side only)
    pub vision_api_key: String,
    /// Vision model name
    pub vision_model: String,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `TTL_SECONDS` - Cached result TTL in seconds (default: 3600)
    /// - `SWEEP_INTERVAL_SECONDS` - Sweep frequency in seconds (default: TTL)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `VISION_API_URL` - Vision endpoint URL (default: OpenAI chat completions)
    /// - `VISION_API_KEY` - API key for the vision endpoint (no default)
    /// - `VISION_MODEL` - Model name (default: gpt-4-vision-preview)
    pub fn from_env() -> Self {
        let ttl_seconds = env::var("TTL_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TTL_SECONDS);
        Self {
            ttl_seconds,
            sweep_interval: env::var("SWEEP_INTERVAL_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(ttl_seconds),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            vision_api_url: env::var("VISION_API_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1/chat/completions".to_string()),
            vision_api_key: env::var("VISION_API_KEY").unwrap_or_default(),
            vision_model: env::var("VISION_MODEL")
                .unwrap_or_else(|_| "gpt-4-vision-preview".to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ttl_seconds: DEFAULT_TTL_SECONDS,
            sweep_interval: DEFAULT_TTL_SECONDS,
            server_port: 3000,
            vision_api_url: "https://api.openai.com/v1/chat/completions".to_string(),
            vision_api_key: String::new(),
            vision_model: "gpt-4-vision-preview".to_string(),
        }
    }
}
