#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Client for the external generative-AI overflow-prediction service.
//!
//! The service is a black box behind a documented contract: it receives
//! a structured ward context and returns a JSON prediction matching
//! [`OverflowPredictionResponse`]. Every failure mode — connect error,
//! timeout, quota, malformed output, out-of-range values — maps to an
//! [`AiError`] kind; callers treat any error as "no result" and must
//! never fabricate a prediction from it.

pub mod gemini;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use waste_grid_store_models::SeverityCounts;
use waste_grid_waste_models::UrgencyLevel;

pub use gemini::GeminiPredictor;

/// Errors from the prediction-service boundary.
#[derive(Debug, Error)]
pub enum AiError {
    /// HTTP request to the service failed (connect, TLS, timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("service error ({status}): {message}")]
    Service {
        /// HTTP status code.
        status: u16,
        /// Response body or error description.
        message: String,
    },

    /// The service's output did not contain a JSON prediction, or the
    /// JSON did not match the documented schema.
    #[error("malformed service response: {message}")]
    MalformedResponse {
        /// Description of what was wrong.
        message: String,
    },

    /// Missing credentials or other configuration.
    #[error("configuration error: {message}")]
    Config {
        /// Description.
        message: String,
    },
}

/// Structured ward context sent to the prediction service.
///
/// Assembled by the prediction engine from the ward document and its
/// last 7 days of reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverflowPredictionRequest {
    /// Target ward number.
    pub ward_number: u32,
    /// Open reports in the ward.
    pub active_reports: u32,
    /// Severity distribution over the 7-day window.
    pub severity_distribution: SeverityCounts,
    /// Ward average response time in minutes.
    pub avg_response_time: f64,
    /// Daily report counts for the last 7 days, keyed `YYYY-MM-DD`;
    /// days without reports are present with a zero count.
    pub weekly_trend: BTreeMap<String, u32>,
    /// Current cleanliness index.
    pub cleanliness_index: f64,
    /// Bin capacity in cubic metres.
    pub bin_capacity: f64,
}

/// Prediction returned by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverflowPredictionResponse {
    /// Overflow probability, 0-100.
    pub overflow_probability: f64,
    /// Hours until projected overflow; `None` when not imminent.
    pub estimated_time_to_overflow: Option<f64>,
    /// Service-assessed urgency.
    pub urgency_level: UrgencyLevel,
    /// Recommended immediate action.
    #[serde(default)]
    pub immediate_action: Option<String>,
    /// Longer-term preventive strategy.
    #[serde(default)]
    pub preventive_strategy: Option<String>,
    /// Service confidence, 0-1.
    #[serde(default)]
    pub confidence: Option<f64>,
}

impl OverflowPredictionResponse {
    /// Validates the payload against its documented bounds.
    ///
    /// # Errors
    ///
    /// Returns [`AiError::MalformedResponse`] when the probability is
    /// non-finite or outside 0-100, or the overflow horizon is negative.
    pub fn validate(self) -> Result<Self, AiError> {
        if !self.overflow_probability.is_finite()
            || !(0.0..=100.0).contains(&self.overflow_probability)
        {
            return Err(AiError::MalformedResponse {
                message: format!(
                    "overflowProbability {} outside 0-100",
                    self.overflow_probability
                ),
            });
        }
        if let Some(hours) = self.estimated_time_to_overflow {
            if !hours.is_finite() || hours < 0.0 {
                return Err(AiError::MalformedResponse {
                    message: format!("estimatedTimeToOverflow {hours} is not a valid horizon"),
                });
            }
        }
        Ok(self)
    }
}

/// Trait for overflow-prediction providers.
#[async_trait::async_trait]
pub trait OverflowPredictor: Send + Sync {
    /// Requests a prediction for one ward's context.
    ///
    /// # Errors
    ///
    /// Returns [`AiError`] on any service failure; the caller must treat
    /// this as "no result" and leave prior persisted state untouched.
    async fn predict(
        &self,
        request: &OverflowPredictionRequest,
    ) -> Result<OverflowPredictionResponse, AiError>;
}

/// Creates a predictor from environment variables.
///
/// Reads `GEMINI_API_KEY` (required), `GEMINI_MODEL` (default
/// `gemini-1.5-pro`), and `AI_TIMEOUT_SECS` (default 30).
///
/// # Errors
///
/// Returns [`AiError::Config`] when the API key is missing or the HTTP
/// client cannot be constructed.
pub fn create_predictor_from_env() -> Result<Box<dyn OverflowPredictor>, AiError> {
    let api_key = std::env::var("GEMINI_API_KEY").map_err(|_| AiError::Config {
        message: "GEMINI_API_KEY environment variable not set".to_string(),
    })?;
    let model =
        std::env::var("GEMINI_MODEL").unwrap_or_else(|_| "gemini-1.5-pro".to_string());
    let timeout_secs = std::env::var("AI_TIMEOUT_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(gemini::DEFAULT_TIMEOUT_SECS);

    Ok(Box::new(GeminiPredictor::new(api_key, model, timeout_secs)?))
}

/// Extracts the JSON object embedded in free text: the span from the
/// first `{` to the last `}`.
///
/// The service wraps its JSON in prose or markdown fences often enough
/// that responses cannot be parsed wholesale. An unbalanced span fails
/// downstream schema parsing, which is the error we want anyway.
#[must_use]
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end > start { Some(&text[start..=end]) } else { None }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_json_from_fenced_text() {
        let text = "Here is the prediction:\n```json\n{\"overflowProbability\": 72}\n```";
        assert_eq!(
            extract_json_object(text),
            Some("{\"overflowProbability\": 72}")
        );
        assert_eq!(extract_json_object("no json here"), None);
    }

    #[test]
    fn validate_rejects_out_of_range_probability() {
        let response = OverflowPredictionResponse {
            overflow_probability: 140.0,
            estimated_time_to_overflow: None,
            urgency_level: UrgencyLevel::High,
            immediate_action: None,
            preventive_strategy: None,
            confidence: None,
        };
        assert!(matches!(
            response.validate(),
            Err(AiError::MalformedResponse { .. })
        ));
    }

    #[test]
    fn validate_rejects_negative_horizon() {
        let response = OverflowPredictionResponse {
            overflow_probability: 70.0,
            estimated_time_to_overflow: Some(-4.0),
            urgency_level: UrgencyLevel::High,
            immediate_action: None,
            preventive_strategy: None,
            confidence: None,
        };
        assert!(matches!(
            response.validate(),
            Err(AiError::MalformedResponse { .. })
        ));
    }

    #[test]
    fn schema_parses_documented_payload() {
        let payload = r#"{
            "overflowProbability": 85,
            "estimatedTimeToOverflow": 9.5,
            "urgencyLevel": "CRITICAL",
            "immediateAction": "Dispatch compactor",
            "confidence": 0.9
        }"#;
        let parsed: OverflowPredictionResponse = serde_json::from_str(payload).unwrap();
        let validated = parsed.validate().unwrap();
        assert!((validated.overflow_probability - 85.0).abs() < f64::EPSILON);
        assert_eq!(validated.urgency_level, UrgencyLevel::Critical);
    }
}
