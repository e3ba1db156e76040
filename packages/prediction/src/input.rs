//! Prediction-input assembly.

use chrono::{DateTime, Duration, Utc};
use waste_grid_ai::OverflowPredictionRequest;
use waste_grid_store_models::{SeverityCounts, Ward, WasteReport, day_key};

use crate::local::DEFAULT_BIN_CAPACITY;

/// Report window feeding overflow prediction, in days.
pub const PREDICTION_WINDOW_DAYS: i64 = 7;

/// Fallback average response time (minutes) for wards with no resolved
/// reports yet.
pub const DEFAULT_AVG_RESPONSE_MINUTES: f64 = 30.0;

/// Packages a ward's 7-day report window as the structured context the
/// prediction service expects.
///
/// `reports` may be the full report log; anything outside the ward or
/// the window is ignored. The weekly trend always contains exactly seven
/// day keys, with zero counts for days without reports.
#[must_use]
pub fn build_request(
    ward: &Ward,
    reports: &[WasteReport],
    now: DateTime<Utc>,
) -> OverflowPredictionRequest {
    let window_start = now - Duration::days(PREDICTION_WINDOW_DAYS);
    let in_window: Vec<&WasteReport> = reports
        .iter()
        .filter(|r| {
            r.ward_number == ward.ward_number
                && r.reported_at >= window_start
                && r.reported_at <= now
        })
        .collect();

    let mut severity_distribution = SeverityCounts::default();
    for report in &in_window {
        severity_distribution.increment(report.classification.severity.bucket());
    }

    let mut weekly_trend = std::collections::BTreeMap::new();
    for offset in 0..PREDICTION_WINDOW_DAYS {
        weekly_trend.insert(day_key(now - Duration::days(offset)), 0u32);
    }
    for report in &in_window {
        if let Some(count) = weekly_trend.get_mut(&day_key(report.reported_at)) {
            *count += 1;
        }
    }

    let avg_response_time = if ward.performance.average_response_time > 0.0 {
        ward.performance.average_response_time
    } else {
        DEFAULT_AVG_RESPONSE_MINUTES
    };

    let bin_capacity = if ward.infrastructure.capacity > 0.0 {
        ward.infrastructure.capacity
    } else {
        DEFAULT_BIN_CAPACITY
    };

    OverflowPredictionRequest {
        ward_number: ward.ward_number,
        active_reports: ward.active_reports.total,
        severity_distribution,
        avg_response_time,
        weekly_trend,
        cleanliness_index: ward.cleanliness_index.current,
        bin_capacity,
    }
}

#[cfg(test)]
mod tests {
    use waste_grid_store_models::{Classification, GeoPoint, Reporter, ReporterKind};
    use waste_grid_waste_models::SeverityLevel;

    use super::*;

    fn report(ward: u32, severity: SeverityLevel, age_hours: i64, now: DateTime<Utc>) -> WasteReport {
        WasteReport::new(
            format!("WR-{ward}-{age_hours}"),
            GeoPoint::new(78.12, 9.93),
            ward,
            Classification {
                severity,
                ..Classification::unclassified()
            },
            Reporter {
                user_id: None,
                kind: ReporterKind::Citizen,
                anonymous: false,
            },
            now - Duration::hours(age_hours),
        )
    }

    #[test]
    fn window_has_seven_zero_filled_days() {
        let now = Utc::now();
        let ward = Ward::new("ward-1".into(), 1, "Test".into());
        let request = build_request(&ward, &[], now);
        assert_eq!(request.weekly_trend.len(), 7);
        assert!(request.weekly_trend.values().all(|&count| count == 0));
    }

    #[test]
    fn reports_bucket_into_days_and_severities() {
        let now = Utc::now();
        let mut ward = Ward::new("ward-1".into(), 1, "Test".into());
        ward.active_reports.total = 12;

        let reports = vec![
            report(1, SeverityLevel::Low, 2, now),
            report(1, SeverityLevel::Critical, 3, now),
            report(1, SeverityLevel::Moderate, 30, now),
            // Other ward and out-of-window reports are ignored.
            report(2, SeverityLevel::Critical, 2, now),
            report(1, SeverityLevel::Critical, 24 * 10, now),
        ];

        let request = build_request(&ward, &reports, now);
        assert_eq!(request.active_reports, 12);
        assert_eq!(request.severity_distribution.low, 1);
        assert_eq!(request.severity_distribution.medium, 1);
        assert_eq!(request.severity_distribution.critical, 1);
        let total_daily: u32 = request.weekly_trend.values().sum();
        assert_eq!(total_daily, 3);
    }

    #[test]
    fn defaults_cover_unconfigured_wards() {
        let now = Utc::now();
        let mut ward = Ward::new("ward-1".into(), 1, "Test".into());
        ward.infrastructure.capacity = 0.0;
        ward.performance.average_response_time = 0.0;

        let request = build_request(&ward, &[], now);
        assert!((request.bin_capacity - DEFAULT_BIN_CAPACITY).abs() < f64::EPSILON);
        assert!(
            (request.avg_response_time - DEFAULT_AVG_RESPONSE_MINUTES).abs() < f64::EPSILON
        );
    }
}
