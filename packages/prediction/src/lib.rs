#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Per-ward overflow-risk prediction.
//!
//! Two variants share one urgency scale:
//!
//! - The AI-backed variant packages a 7-day report window as structured
//!   context and delegates to the external prediction service. It is
//!   richer (explained, horizon-aware) but network-bound; on service
//!   failure the ward is skipped and its prior persisted risk state is
//!   left untouched.
//! - The local variant derives a probability from bin load and average
//!   severity alone. It is instant and dependency-free, used by the
//!   dashboard surface and alert-triggering logic.

pub mod input;
pub mod local;

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;
use waste_grid_ai::{AiError, OverflowPredictionResponse, OverflowPredictor};
use waste_grid_store::{DocumentStore, StoreError, collections, typed};
use waste_grid_store_models::{OverflowRisk, Ward, WasteReport};

pub use input::{PREDICTION_WINDOW_DAYS, build_request};
pub use local::{DEFAULT_BIN_CAPACITY, LocalPrediction, predict_local};

/// Active-report total above which a ward is considered "busy" and
/// included in the scheduled prediction pass. On-demand calls bypass
/// this filter.
pub const BUSY_WARD_THRESHOLD: u32 = 10;

/// Minimum reports in the 7-day window for an AI prediction to be worth
/// requesting; sparser wards carry too little signal.
pub const MIN_WINDOW_REPORTS: usize = 5;

/// Errors from prediction operations.
#[derive(Debug, Error)]
pub enum PredictionError {
    /// Store access failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// The prediction service failed; treat as "no result".
    #[error("prediction service error: {0}")]
    Service(#[from] AiError),

    /// No ward with the requested number exists.
    #[error("ward {ward_number} not found")]
    WardNotFound {
        /// The requested ward number.
        ward_number: u32,
    },

    /// The requested ward number is outside the municipal 1-100 range.
    #[error("invalid ward number {ward_number}: expected 1-100")]
    InvalidWardNumber {
        /// The rejected ward number.
        ward_number: u32,
    },
}

/// Applies a successful service prediction to a ward's persisted risk
/// state.
#[must_use]
pub fn risk_from_response(
    response: &OverflowPredictionResponse,
    now: DateTime<Utc>,
) -> OverflowRisk {
    #[allow(clippy::cast_possible_truncation)]
    let horizon = response
        .estimated_time_to_overflow
        .map(|hours| now + Duration::seconds((hours * 3600.0).round() as i64));
    OverflowRisk {
        current_level: response.urgency_level,
        probability: response.overflow_probability,
        estimated_overflow_time: horizon,
        predicted_at: Some(now),
    }
}

/// On-demand AI prediction for one ward, persisting the outcome.
///
/// Bypasses the busy-ward filter used by the scheduled pass. On service
/// failure the error propagates and the ward document is not written.
///
/// # Errors
///
/// Returns [`PredictionError::InvalidWardNumber`] for an out-of-range
/// ward number, [`PredictionError::WardNotFound`] for an unknown ward,
/// [`PredictionError::Service`] when the AI call fails, or
/// [`PredictionError::Store`] on store failures.
pub async fn predict_ward(
    store: &dyn DocumentStore,
    predictor: &dyn OverflowPredictor,
    ward_number: u32,
    now: DateTime<Utc>,
) -> Result<OverflowPredictionResponse, PredictionError> {
    if !waste_grid_store_models::is_valid_ward_number(ward_number) {
        return Err(PredictionError::InvalidWardNumber { ward_number });
    }

    let wards: Vec<Ward> = typed::all(store, collections::WARDS).await?;
    let mut ward = wards
        .into_iter()
        .find(|w| w.ward_number == ward_number)
        .ok_or(PredictionError::WardNotFound { ward_number })?;

    let reports: Vec<WasteReport> = typed::all(store, collections::REPORTS).await?;
    let request = build_request(&ward, &reports, now);

    let response = predictor.predict(&request).await?;

    ward.overflow_risk = risk_from_response(&response, now);
    typed::replace(store, collections::WARDS, &ward.id, &ward).await?;

    log::info!(
        "Ward {ward_number}: overflow probability {:.0}%, urgency {}",
        response.overflow_probability,
        response.urgency_level
    );
    Ok(response)
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use waste_grid_ai::OverflowPredictionRequest;
    use waste_grid_store::MemoryStore;
    use waste_grid_waste_models::UrgencyLevel;

    use super::*;

    struct StubPredictor {
        response: Option<OverflowPredictionResponse>,
    }

    #[async_trait]
    impl OverflowPredictor for StubPredictor {
        async fn predict(
            &self,
            _request: &OverflowPredictionRequest,
        ) -> Result<OverflowPredictionResponse, AiError> {
            self.response.clone().ok_or(AiError::MalformedResponse {
                message: "stubbed failure".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn on_demand_prediction_persists_risk() {
        let store = MemoryStore::new();
        let ward = Ward::new("ward-3".into(), 3, "KK Nagar".into());
        typed::insert(&store, collections::WARDS, &ward).await.unwrap();

        let predictor = StubPredictor {
            response: Some(OverflowPredictionResponse {
                overflow_probability: 85.0,
                estimated_time_to_overflow: Some(6.0),
                urgency_level: UrgencyLevel::Critical,
                immediate_action: None,
                preventive_strategy: None,
                confidence: Some(0.9),
            }),
        };

        let now = Utc::now();
        let response = predict_ward(&store, &predictor, 3, now).await.unwrap();
        assert!((response.overflow_probability - 85.0).abs() < f64::EPSILON);

        let stored: Ward = typed::by_id(&store, collections::WARDS, "ward-3")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.overflow_risk.current_level, UrgencyLevel::Critical);
        assert!((stored.overflow_risk.probability - 85.0).abs() < f64::EPSILON);
        let horizon = stored.overflow_risk.estimated_overflow_time.unwrap();
        assert_eq!((horizon - now).num_hours(), 6);
        assert_eq!(stored.overflow_risk.predicted_at, Some(now));
    }

    #[tokio::test]
    async fn service_failure_leaves_prior_state_untouched() {
        let store = MemoryStore::new();
        let mut ward = Ward::new("ward-4".into(), 4, "Vilakkuthoon".into());
        ward.overflow_risk.probability = 33.0;
        ward.overflow_risk.current_level = UrgencyLevel::Medium;
        typed::insert(&store, collections::WARDS, &ward).await.unwrap();

        let predictor = StubPredictor { response: None };
        let result = predict_ward(&store, &predictor, 4, Utc::now()).await;
        assert!(matches!(result, Err(PredictionError::Service(_))));

        let stored: Ward = typed::by_id(&store, collections::WARDS, "ward-4")
            .await
            .unwrap()
            .unwrap();
        assert!((stored.overflow_risk.probability - 33.0).abs() < f64::EPSILON);
        assert_eq!(stored.overflow_risk.current_level, UrgencyLevel::Medium);
    }

    #[tokio::test]
    async fn unknown_ward_is_an_error() {
        let store = MemoryStore::new();
        let predictor = StubPredictor { response: None };
        let result = predict_ward(&store, &predictor, 99, Utc::now()).await;
        assert!(matches!(
            result,
            Err(PredictionError::WardNotFound { ward_number: 99 })
        ));
    }

    #[tokio::test]
    async fn out_of_range_ward_is_rejected_before_any_read() {
        let store = MemoryStore::new();
        let predictor = StubPredictor { response: None };
        let result = predict_ward(&store, &predictor, 101, Utc::now()).await;
        assert!(matches!(
            result,
            Err(PredictionError::InvalidWardNumber { ward_number: 101 })
        ));
    }
}
