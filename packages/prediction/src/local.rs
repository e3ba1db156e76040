//! Local (no-AI) overflow estimation.
//!
//! A load-and-severity heuristic for surfaces that need an instant
//! answer: the public dashboard and the alert-triggering scan. The AI
//! variant supersedes it wherever an explained prediction is worth a
//! network round trip.

use chrono::{DateTime, Duration, Utc};
use waste_grid_store_models::{Ward, WasteReport};
use waste_grid_waste_models::UrgencyLevel;

use crate::input::PREDICTION_WINDOW_DAYS;

/// Capacity assumed for wards whose bin inventory is not configured.
pub const DEFAULT_BIN_CAPACITY: f64 = 100.0;

/// Floor on the projected overflow horizon, in hours.
pub const MIN_HOURS_TO_OVERFLOW: f64 = 4.0;

/// A locally-computed overflow estimate.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalPrediction {
    /// Target ward number.
    pub ward_number: u32,
    /// Overflow probability, 0-100.
    pub probability: f64,
    /// Projected hours until overflow, at least
    /// [`MIN_HOURS_TO_OVERFLOW`].
    pub hours_to_overflow: f64,
    /// Urgency on the shared scale.
    pub urgency: UrgencyLevel,
    /// Current estimated bin load used for the estimate.
    pub current_load: f64,
    /// Capacity used as the denominator.
    pub bin_capacity: f64,
}

/// Estimates overflow risk from bin load and the 7-day severity profile.
///
/// `probability = min(1, load/capacity * (1 + avg severity fraction)) * 100`,
/// where the severity fraction maps the 1-5 scale onto 0-1. The horizon
/// shrinks as probability grows but never drops below four hours — a
/// crew cannot be staged faster than that.
#[must_use]
pub fn predict_local(ward: &Ward, reports: &[WasteReport], now: DateTime<Utc>) -> LocalPrediction {
    let window_start = now - Duration::days(PREDICTION_WINDOW_DAYS);
    let in_window: Vec<&WasteReport> = reports
        .iter()
        .filter(|r| {
            r.ward_number == ward.ward_number
                && r.reported_at >= window_start
                && r.reported_at <= now
        })
        .collect();

    let avg_severity_fraction = if in_window.is_empty() {
        0.0
    } else {
        #[allow(clippy::cast_precision_loss)]
        let avg = in_window
            .iter()
            .map(|r| f64::from(r.classification.severity.value()))
            .sum::<f64>()
            / in_window.len() as f64;
        avg / 5.0
    };

    let bin_capacity = if ward.infrastructure.capacity > 0.0 {
        ward.infrastructure.capacity
    } else {
        DEFAULT_BIN_CAPACITY
    };
    let current_load = ward.infrastructure.current_load.max(0.0);

    let probability =
        ((current_load / bin_capacity) * (1.0 + avg_severity_fraction)).min(1.0) * 100.0;
    let hours_to_overflow = (24.0 - probability / 10.0).max(MIN_HOURS_TO_OVERFLOW);

    LocalPrediction {
        ward_number: ward.ward_number,
        probability,
        hours_to_overflow,
        urgency: UrgencyLevel::from_probability(probability),
        current_load,
        bin_capacity,
    }
}
