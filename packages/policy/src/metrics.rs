//! Ward metric aggregation for rule evaluation.

use chrono::{DateTime, Duration, Utc};
use waste_grid_store_models::{SeverityCounts, Ward, WasteReport};
use waste_grid_waste_models::{SeverityClass, WasteType};

/// Default incident lookback window, in days.
pub const DEFAULT_LOOKBACK_DAYS: i64 = 30;

/// Aggregated inputs to the policy rules for one ward.
#[derive(Debug, Clone, PartialEq)]
pub struct WardPolicyMetrics {
    /// Target ward number.
    pub ward_number: u32,
    /// Incidents in the lookback window.
    pub incident_count: u32,
    /// Share of window incidents flagged as illegal dumping, 0-100.
    pub illegal_dumping_rate: f64,
    /// The ward's current overflow-risk probability, 0-100.
    pub overflow_risk: f64,
    /// The ward's current cleanliness index.
    pub cleanliness_index: f64,
    /// Distinct waste types seen in the window.
    pub waste_types: Vec<WasteType>,
    /// Severity distribution over the window.
    pub severity_pattern: SeverityCounts,
    /// Lookback length, for context strings.
    pub lookback_days: i64,
}

impl WardPolicyMetrics {
    /// Classifies the incident pattern for priority weighting.
    ///
    /// Volume and criticality both escalate: a ward with many incidents
    /// or a run of critical ones reads as a critical pattern even if
    /// individual rules fired at lower levels.
    #[must_use]
    pub const fn severity_class(&self) -> SeverityClass {
        if self.incident_count > 50 || self.severity_pattern.critical > 5 {
            SeverityClass::Critical
        } else if self.incident_count > 30 || self.severity_pattern.high > 10 {
            SeverityClass::High
        } else if self.incident_count < 10 {
            SeverityClass::Low
        } else {
            SeverityClass::Medium
        }
    }
}

/// Aggregates a ward's report window into the rule-evaluation metrics.
///
/// `reports` may be the full log; other wards and out-of-window reports
/// are ignored.
#[must_use]
pub fn aggregate_metrics(
    ward: &Ward,
    reports: &[WasteReport],
    now: DateTime<Utc>,
    lookback_days: i64,
) -> WardPolicyMetrics {
    let window_start = now - Duration::days(lookback_days);
    let in_window: Vec<&WasteReport> = reports
        .iter()
        .filter(|r| {
            r.ward_number == ward.ward_number
                && r.reported_at >= window_start
                && r.reported_at <= now
        })
        .collect();

    let incident_count = u32::try_from(in_window.len()).unwrap_or(u32::MAX);

    let flagged = in_window
        .iter()
        .filter(|r| r.classification.illegal_dumping)
        .count();
    #[allow(clippy::cast_precision_loss)]
    let illegal_dumping_rate = if in_window.is_empty() {
        0.0
    } else {
        (flagged as f64 / in_window.len() as f64) * 100.0
    };

    let mut severity_pattern = SeverityCounts::default();
    let mut waste_types = Vec::new();
    for report in &in_window {
        severity_pattern.increment(report.classification.severity.bucket());
        if !waste_types.contains(&report.classification.waste_type) {
            waste_types.push(report.classification.waste_type);
        }
    }

    WardPolicyMetrics {
        ward_number: ward.ward_number,
        incident_count,
        illegal_dumping_rate,
        overflow_risk: ward.overflow_risk.probability,
        cleanliness_index: ward.cleanliness_index.current,
        waste_types,
        severity_pattern,
        lookback_days,
    }
}
