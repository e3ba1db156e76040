//! Gemini `generateContent` provider implementation.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{
    AiError, OverflowPredictionRequest, OverflowPredictionResponse, OverflowPredictor,
    extract_json_object,
};

/// Default per-request timeout in seconds.
///
/// The prediction call is the only network-bound suspension point in a
/// scheduler pass; it must fail soft rather than stall the batch.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Gemini REST API provider.
pub struct GeminiPredictor {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::Client,
}

impl GeminiPredictor {
    /// Creates a provider with the given credentials and timeout.
    ///
    /// # Errors
    ///
    /// Returns [`AiError::Config`] if the HTTP client cannot be built.
    pub fn new(api_key: String, model: String, timeout_secs: u64) -> Result<Self, AiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| AiError::Config {
                message: format!("failed to build HTTP client: {e}"),
            })?;
        Ok(Self {
            api_key,
            model,
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            client,
        })
    }

    /// Overrides the API base URL (tests point this at a local server).
    #[must_use]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    fn build_prompt(request: &OverflowPredictionRequest) -> String {
        let severity = serde_json::to_string(&request.severity_distribution)
            .unwrap_or_else(|_| "{}".to_string());
        let trend =
            serde_json::to_string(&request.weekly_trend).unwrap_or_else(|_| "{}".to_string());

        format!(
            r#"You are a predictive waste intelligence AI.

Given the following reports for Ward {ward}:
- Number of active reports: {active}
- Severity distribution: {severity}
- Average response time: {response_time} minutes
- Past 7-day trend: {trend}
- Current cleanliness index: {cleanliness}
- Infrastructure capacity: {capacity} cubic meters

Predict:
1. Probability of overflow (percentage 0-100)
2. Estimated time to overflow (in hours, can be null if not imminent)
3. Urgency level (LOW / MEDIUM / HIGH / CRITICAL)
4. Recommended immediate action (brief, actionable)
5. Long-term preventive strategy (brief)

Provide response in valid JSON format:
{{
  "overflowProbability": 0,
  "estimatedTimeToOverflow": null,
  "urgencyLevel": "",
  "immediateAction": "",
  "preventiveStrategy": "",
  "confidence": 0.0
}}"#,
            ward = request.ward_number,
            active = request.active_reports,
            severity = severity,
            response_time = request.avg_response_time,
            trend = trend,
            cleanliness = request.cleanliness_index,
            capacity = request.bin_capacity,
        )
    }
}

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

#[async_trait::async_trait]
impl OverflowPredictor for GeminiPredictor {
    async fn predict(
        &self,
        request: &OverflowPredictionRequest,
    ) -> Result<OverflowPredictionResponse, AiError> {
        let prompt = Self::build_prompt(request);
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: &prompt }],
            }],
        };

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let resp = self.client.post(&url).json(&body).send().await?;

        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            return Err(AiError::Service {
                status: status.as_u16(),
                message: text,
            });
        }

        let response: GenerateContentResponse =
            serde_json::from_str(&text).map_err(|e| AiError::MalformedResponse {
                message: format!("response envelope did not parse: {e}"),
            })?;

        let answer = response
            .candidates
            .first()
            .map(|c| {
                c.content
                    .parts
                    .iter()
                    .map(|p| p.text.as_str())
                    .collect::<String>()
            })
            .ok_or_else(|| AiError::MalformedResponse {
                message: "response contained no candidates".to_string(),
            })?;

        let json = extract_json_object(&answer).ok_or_else(|| AiError::MalformedResponse {
            message: "no JSON object in model output".to_string(),
        })?;

        let prediction: OverflowPredictionResponse =
            serde_json::from_str(json).map_err(|e| AiError::MalformedResponse {
                message: format!("prediction did not match schema: {e}"),
            })?;

        log::debug!(
            "Ward {} prediction: {:.0}% probability, urgency {}",
            request.ward_number,
            prediction.overflow_probability,
            prediction.urgency_level,
        );

        prediction.validate()
    }
}
