//! Analysis result model
//!
//! Models the payload returned by the remote vision endpoint as a tagged
//! union so consumers pattern-match exhaustively instead of duck-typing the
//! shape-varying deployment responses.

use serde::{Deserialize, Serialize};

// == Analysis Result ==
/// Result of a remote food-image analysis.
///
/// Deployment variants of the remote endpoint return either a rich shape
/// (`{foodItems, totalCalories}`) or a flat one (`{calories}`). Anything
/// else is preserved verbatim as the `Raw` fallback, which is itself a valid
/// cacheable result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnalysisResult {
    /// Detected food items plus a total calorie estimate
    Detailed {
        #[serde(rename = "foodItems")]
        food_items: Vec<String>,
        #[serde(rename = "totalCalories")]
        total_calories: f64,
    },
    /// Calorie estimate only (flat deployment variant)
    CaloriesOnly { calories: f64 },
    /// Unparseable remote payload, raw text preserved
    Raw { raw: String },
}

impl AnalysisResult {
    // == Parse ==
    /// Parses remote response text into a structured result.
    ///
    /// When the expected structured shape cannot be parsed, substitutes the
    /// `Raw` fallback rather than failing the operation. Model replies often
    /// wrap JSON in markdown code fences; those are stripped first.
    pub fn parse(content: &str) -> Self {
        let stripped = strip_code_fence(content);
        serde_json::from_str(stripped).unwrap_or_else(|_| AnalysisResult::Raw {
            raw: content.to_string(),
        })
    }

    // == Calories ==
    /// Returns the calorie estimate, zero for the raw fallback.
    pub fn calories(&self) -> f64 {
        match self {
            AnalysisResult::Detailed { total_calories, .. } => *total_calories,
            AnalysisResult::CaloriesOnly { calories } => *calories,
            AnalysisResult::Raw { .. } => 0.0,
        }
    }

    // == Food Items ==
    /// Returns the detected food items, empty for shapes without them.
    pub fn food_items(&self) -> &[String] {
        match self {
            AnalysisResult::Detailed { food_items, .. } => food_items,
            _ => &[],
        }
    }
}

/// Strips a surrounding markdown code fence, if any.
fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|s| s.strip_suffix("```"))
        .map(str::trim)
        .unwrap_or(trimmed)
}
