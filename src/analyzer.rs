//! Remote Image Analyzer
//!
//! Client for the vision-capable model endpoint that detects food items and
//! estimates calories. The API key lives in server-side configuration only;
//! browsers talk to this service, never to the model API directly.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::warn;

use crate::config::Config;
use crate::error::{AnalysisError, Result};
use crate::models::AnalysisResult;

/// Instruction sent alongside the image.
const ANALYSIS_PROMPT: &str = "Analyze this food image and provide: \
    1) What food items you see 2) Estimated calories for the entire portion. \
    Return the result in JSON format with fields: foodItems (array of strings) \
    and totalCalories (number)";

/// Request timeout for the remote call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// == Image Analyzer Trait ==
/// The injected compute seam: handlers depend on this trait, so tests swap
/// in stubs and the cache stays transport-agnostic.
#[async_trait]
pub trait ImageAnalyzer: Send + Sync {
    /// Analyzes a food image and returns the detected items and calories.
    async fn analyze(&self, image: &[u8]) -> Result<AnalysisResult>;
}

// == Vision Analyzer ==
/// [`ImageAnalyzer`] backed by an OpenAI-style chat-completions vision API.
pub struct VisionAnalyzer {
    client: reqwest::Client,
    api_url: String,
    model: String,
}

impl VisionAnalyzer {
    /// Builds an analyzer from service configuration.
    ///
    /// Fails if the API key cannot be encoded into an HTTP header.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let bearer = format!("Bearer {}", config.vision_api_key);
        let mut auth = HeaderValue::from_str(&bearer)
            .map_err(|e| AnalysisError::Internal(format!("Invalid API key: {}", e)))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AnalysisError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_url: config.vision_api_url.clone(),
            model: config.vision_model.clone(),
        })
    }

    /// Builds the chat-completions request body for an image.
    fn request_body(&self, image: &[u8]) -> serde_json::Value {
        let base64_image = BASE64.encode(image);
        json!({
            "model": self.model,
            "messages": [
                {
                    "role": "user",
                    "content": [
                        {
                            "type": "text",
                            "text": ANALYSIS_PROMPT
                        },
                        {
                            "type": "image_url",
                            "image_url": {
                                "url": format!("data:image/jpeg;base64,{}", base64_image)
                            }
                        }
                    ]
                }
            ],
            "max_tokens": 500
        })
    }
}

#[async_trait]
impl ImageAnalyzer for VisionAnalyzer {
    async fn analyze(&self, image: &[u8]) -> Result<AnalysisResult> {
        let response = self
            .client
            .post(&self.api_url)
            .json(&self.request_body(image))
            .send()
            .await
            .map_err(|e| AnalysisError::RemoteCall(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "vision endpoint returned non-success status");
            return Err(AnalysisError::RemoteCall(format!(
                "Vision endpoint returned status {}",
                status
            )));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| AnalysisError::RemoteCall(format!("Unreadable response body: {}", e)))?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| {
                AnalysisError::RemoteCall("Vision endpoint returned no choices".to_string())
            })?;

        // Malformed content is not an error: parse falls back to the raw
        // variant, which is itself cacheable
        Ok(AnalysisResult::parse(&content))
    }
}

// == Wire Types ==
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}
