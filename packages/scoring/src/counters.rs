//! Recomputed ward counters.
//!
//! `activeReports` and `performance` on the ward document are caches
//! derived from the report log. These functions rebuild them from
//! scratch; they never read the ward's existing counters.

use waste_grid_store_models::{ActiveReports, Performance, WasteReport};
use waste_grid_waste_models::ReportStatus;

/// Rebuilds a ward's open-report counters from its report log.
#[must_use]
pub fn recount_active_reports(reports: &[WasteReport]) -> ActiveReports {
    let mut counts = ActiveReports::default();
    for report in reports.iter().filter(|r| r.is_open()) {
        counts.total += 1;
        match report.status {
            ReportStatus::Reported => counts.by_status.reported += 1,
            ReportStatus::Verified => counts.by_status.verified += 1,
            ReportStatus::Assigned => counts.by_status.assigned += 1,
            ReportStatus::InProgress => counts.by_status.in_progress += 1,
            ReportStatus::Resolved | ReportStatus::Rejected => {}
        }
        counts
            .by_severity
            .increment(report.classification.severity.bucket());
    }
    counts
}

/// Rebuilds a ward's rolling performance figures from its report log.
///
/// Average response time is taken over resolved reports; resolution rate
/// over all reports. Both zero when there is nothing to measure.
#[must_use]
pub fn performance_from_reports(reports: &[WasteReport]) -> Performance {
    let resolved_minutes: Vec<i64> = reports
        .iter()
        .filter(|r| r.status == ReportStatus::Resolved)
        .filter_map(WasteReport::response_time_minutes)
        .collect();

    #[allow(clippy::cast_precision_loss)]
    let average_response_time = if resolved_minutes.is_empty() {
        0.0
    } else {
        resolved_minutes.iter().sum::<i64>() as f64 / resolved_minutes.len() as f64
    };

    let resolved_count = reports
        .iter()
        .filter(|r| r.status == ReportStatus::Resolved)
        .count();
    #[allow(clippy::cast_precision_loss)]
    let resolution_rate = if reports.is_empty() {
        0.0
    } else {
        (resolved_count as f64 / reports.len() as f64) * 100.0
    };

    Performance {
        average_response_time,
        resolution_rate,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use waste_grid_store_models::{Classification, GeoPoint, Reporter, ReporterKind, Resolution};
    use waste_grid_waste_models::SeverityLevel;

    use super::*;

    fn report(status: ReportStatus, severity: SeverityLevel) -> WasteReport {
        let now = Utc::now();
        let mut report = WasteReport::new(
            format!("WR-{status}-{severity}"),
            GeoPoint::new(78.12, 9.93),
            7,
            Classification {
                severity,
                ..Classification::unclassified()
            },
            Reporter {
                user_id: None,
                kind: ReporterKind::Citizen,
                anonymous: false,
            },
            now - Duration::hours(5),
        );
        if status != ReportStatus::Reported {
            if status == ReportStatus::Resolved {
                report.resolution = Some(Resolution {
                    resolved_at: report.reported_at + Duration::minutes(120),
                    resolved_by: None,
                    collected_kg: None,
                    action_taken: None,
                });
            }
            report.push_status(status, now, None, None);
        }
        report
    }

    #[test]
    fn recount_skips_terminal_reports() {
        let reports = vec![
            report(ReportStatus::Reported, SeverityLevel::Low),
            report(ReportStatus::Verified, SeverityLevel::Moderate),
            report(ReportStatus::InProgress, SeverityLevel::Critical),
            report(ReportStatus::Resolved, SeverityLevel::High),
            report(ReportStatus::Rejected, SeverityLevel::High),
        ];
        let counts = recount_active_reports(&reports);
        assert_eq!(counts.total, 3);
        assert_eq!(counts.by_status.reported, 1);
        assert_eq!(counts.by_status.verified, 1);
        assert_eq!(counts.by_status.in_progress, 1);
        assert_eq!(counts.by_severity.low, 1);
        assert_eq!(counts.by_severity.medium, 1);
        assert_eq!(counts.by_severity.critical, 1);
        assert_eq!(counts.by_severity.high, 0);
    }

    #[test]
    fn performance_averages_resolved_only() {
        let reports = vec![
            report(ReportStatus::Resolved, SeverityLevel::Low),
            report(ReportStatus::Reported, SeverityLevel::Low),
        ];
        let perf = performance_from_reports(&reports);
        assert!((perf.average_response_time - 120.0).abs() < f64::EPSILON);
        assert!((perf.resolution_rate - 50.0).abs() < f64::EPSILON);

        let empty = performance_from_reports(&[]);
        assert!((empty.average_response_time - 0.0).abs() < f64::EPSILON);
        assert!((empty.resolution_rate - 0.0).abs() < f64::EPSILON);
    }
}
