//! Ward cleanliness index.
//!
//! A 0-100 composite over the ward's last 30 days of reports, from four
//! clamped factors: report frequency (25%), resolution speed (30%),
//! severity (25%), and resolution rate (20%).

use chrono::{DateTime, Duration, Utc};
use waste_grid_store_models::{CleanlinessFactors, WasteReport, Ward};
use waste_grid_waste_models::ReportStatus;

use crate::round1;

/// Report window feeding the cleanliness index, in days.
pub const CLEANLINESS_WINDOW_DAYS: i64 = 30;

const WEIGHT_FREQUENCY: f64 = 0.25;
const WEIGHT_SPEED: f64 = 0.30;
const WEIGHT_SEVERITY: f64 = 0.25;
const WEIGHT_RATE: f64 = 0.20;

/// Result of a cleanliness computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CleanlinessOutcome {
    /// Composite score, 0-100, one decimal.
    pub score: f64,
    /// Contributing factors; `None` when the window held no reports and
    /// the score is the clean-by-default 100.
    pub factors: Option<CleanlinessFactors>,
}

/// Computes the cleanliness index for one ward from its reports.
///
/// Reports outside the 30-day window ending at `now` are ignored, so
/// callers may pass the ward's full report log. A ward with zero reports
/// in the window scores 100: absence of signal is treated as
/// cleanliness, not uncertainty. That is a deliberate policy choice —
/// an unreported ward and a spotless ward are indistinguishable here.
#[must_use]
pub fn calculate_cleanliness(reports: &[WasteReport], now: DateTime<Utc>) -> CleanlinessOutcome {
    let window_start = now - Duration::days(CLEANLINESS_WINDOW_DAYS);
    let in_window: Vec<&WasteReport> = reports
        .iter()
        .filter(|r| r.reported_at >= window_start && r.reported_at <= now)
        .collect();

    if in_window.is_empty() {
        return CleanlinessOutcome {
            score: 100.0,
            factors: None,
        };
    }

    #[allow(clippy::cast_precision_loss)]
    let report_count = in_window.len() as f64;

    // Factor 1: report frequency (inverse; fewer reports per day = cleaner).
    #[allow(clippy::cast_precision_loss)]
    let reports_per_day = report_count / CLEANLINESS_WINDOW_DAYS as f64;
    let report_frequency = (100.0 - reports_per_day * 5.0).max(0.0);

    // Factor 2: resolution speed over resolved reports; zero when nothing
    // in the window was resolved.
    let resolved: Vec<&&WasteReport> = in_window
        .iter()
        .filter(|r| r.status == ReportStatus::Resolved)
        .collect();
    let resolution_speed = if resolved.is_empty() {
        0.0
    } else {
        #[allow(clippy::cast_precision_loss)]
        let avg_minutes = resolved
            .iter()
            .filter_map(|r| r.response_time_minutes())
            .map(|m| m as f64)
            .sum::<f64>()
            / resolved.len() as f64;
        (100.0 - avg_minutes / 2.0).max(0.0)
    };

    // Factor 3: severity of the reported issues.
    let avg_severity = in_window
        .iter()
        .map(|r| f64::from(r.classification.severity.value()))
        .sum::<f64>()
        / report_count;
    let severity_factor = (100.0 - avg_severity * 15.0).max(0.0);

    // Factor 4: resolution rate.
    #[allow(clippy::cast_precision_loss)]
    let resolution_rate = (resolved.len() as f64 / report_count) * 100.0;

    let score = report_frequency * WEIGHT_FREQUENCY
        + resolution_speed * WEIGHT_SPEED
        + severity_factor * WEIGHT_SEVERITY
        + resolution_rate * WEIGHT_RATE;

    CleanlinessOutcome {
        score: round1(score.clamp(0.0, 100.0)),
        factors: Some(CleanlinessFactors {
            report_frequency,
            resolution_speed,
            severity_factor,
            resolution_rate,
        }),
    }
}

/// Applies a cleanliness outcome to a ward document.
///
/// With factors present the score is recorded into the bounded history;
/// the zero-report default only moves the current score.
pub fn apply_cleanliness(ward: &mut Ward, outcome: CleanlinessOutcome, now: DateTime<Utc>) {
    match outcome.factors {
        Some(factors) => ward.cleanliness_index.record(outcome.score, now, factors),
        None => ward.cleanliness_index.current = outcome.score,
    }
}
