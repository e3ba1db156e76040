//! Command-center snapshot.
//!
//! A read-only aggregation of alerts, per-ward risk, fleet status, and
//! report counts, consumed by the external dashboard. Computed from
//! already-fetched state so it has no side effects of its own — truck
//! claims happen in alert generation, not here.

use chrono::{DateTime, Utc};
use serde::Serialize;
use waste_grid_prediction::{LocalPrediction, predict_local};
use waste_grid_store_models::{Truck, Ward, WasteReport};
use waste_grid_waste_models::{TruckStatus, UrgencyLevel};

use crate::{Alert, OVERFLOW_ALERT_THRESHOLD};

/// Number of alerts included inline in the snapshot.
const ALERT_LIST_CAP: usize = 10;

/// Aggregated dashboard state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandCenterSnapshot {
    /// Snapshot time.
    pub timestamp: DateTime<Utc>,
    /// Alert counts and the most recent entries.
    pub alerts: AlertSummary,
    /// Per-ward risk summary (local variant).
    pub predictions: PredictionSummary,
    /// Fleet status counts.
    pub trucks: TruckSummary,
    /// Report counts.
    pub reports: ReportSummary,
}

/// Alert counts for the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertSummary {
    /// All generated alerts this pass.
    pub total: usize,
    /// Alerts at CRITICAL severity.
    pub critical: usize,
    /// Alerts at HIGH severity.
    pub high: usize,
    /// Up to ten alerts, in generation order.
    pub list: Vec<Alert>,
}

/// Risk overview for the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionSummary {
    /// Mean overflow probability across wards.
    pub average_overflow_risk: f64,
    /// Wards above the alert threshold.
    pub high_risk_wards: usize,
    /// Every ward's local prediction.
    pub details: Vec<LocalPrediction>,
}

/// Fleet status counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TruckSummary {
    /// On a collection run.
    pub active: usize,
    /// Claimed, not yet en route.
    pub assigned: usize,
    /// Idle.
    pub available: usize,
    /// Fleet size.
    pub total: usize,
}

/// Report counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    /// All reports on record.
    pub total: usize,
    /// Reports flagged as illegal dumping.
    pub illegal_dumping: usize,
    /// Reports still open.
    pub unresolved: usize,
}

/// Builds the command-center snapshot from current state.
#[must_use]
pub fn snapshot(
    wards: &[Ward],
    reports: &[WasteReport],
    trucks: &[Truck],
    alerts: Vec<Alert>,
    now: DateTime<Utc>,
) -> CommandCenterSnapshot {
    let details: Vec<LocalPrediction> = wards
        .iter()
        .map(|ward| predict_local(ward, reports, now))
        .collect();

    #[allow(clippy::cast_precision_loss)]
    let average_overflow_risk = if details.is_empty() {
        0.0
    } else {
        details.iter().map(|p| p.probability).sum::<f64>() / details.len() as f64
    };
    let high_risk_wards = details
        .iter()
        .filter(|p| p.probability > OVERFLOW_ALERT_THRESHOLD)
        .count();

    let critical = alerts
        .iter()
        .filter(|a| a.severity == UrgencyLevel::Critical)
        .count();
    let high = alerts
        .iter()
        .filter(|a| a.severity == UrgencyLevel::High)
        .count();
    let total = alerts.len();
    let mut list = alerts;
    list.truncate(ALERT_LIST_CAP);

    CommandCenterSnapshot {
        timestamp: now,
        alerts: AlertSummary {
            total,
            critical,
            high,
            list,
        },
        predictions: PredictionSummary {
            average_overflow_risk,
            high_risk_wards,
            details,
        },
        trucks: TruckSummary {
            active: trucks.iter().filter(|t| t.status == TruckStatus::Active).count(),
            assigned: trucks
                .iter()
                .filter(|t| t.status == TruckStatus::Assigned)
                .count(),
            available: trucks
                .iter()
                .filter(|t| t.status == TruckStatus::Available)
                .count(),
            total: trucks.len(),
        },
        reports: ReportSummary {
            total: reports.len(),
            illegal_dumping: reports
                .iter()
                .filter(|r| r.classification.illegal_dumping)
                .count(),
            unresolved: reports.iter().filter(|r| r.is_open()).count(),
        },
    }
}

#[cfg(test)]
mod tests {
    use waste_grid_store_models::{Classification, GeoPoint, Reporter, ReporterKind};
    use waste_grid_waste_models::{ReportStatus, SeverityLevel};

    use super::*;

    fn ward(number: u32, load: f64) -> Ward {
        let mut ward = Ward::new(format!("ward-{number}"), number, format!("Ward {number}"));
        ward.infrastructure.current_load = load;
        ward.infrastructure.capacity = 100.0;
        ward
    }

    fn report(id: &str, ward: u32, flagged: bool, resolved: bool, now: DateTime<Utc>) -> WasteReport {
        let mut report = WasteReport::new(
            id.to_string(),
            GeoPoint::new(78.12, 9.93),
            ward,
            Classification {
                illegal_dumping: flagged,
                severity: SeverityLevel::Moderate,
                ..Classification::unclassified()
            },
            Reporter {
                user_id: None,
                kind: ReporterKind::Citizen,
                anonymous: false,
            },
            now,
        );
        if resolved {
            report.push_status(ReportStatus::Resolved, now, None, None);
        }
        report
    }

    #[test]
    fn snapshot_counts_match_store_contents() {
        let now = Utc::now();
        let wards = vec![ward(1, 90.0), ward(2, 10.0)];
        let reports = vec![
            report("WR-1", 1, true, false, now),
            report("WR-2", 1, false, true, now),
            report("WR-3", 2, false, false, now),
        ];
        let trucks = vec![
            Truck::available("truck-1".into(), "TN-58-MR-4012".into()),
            Truck {
                id: "truck-2".into(),
                name: "TN-58-MR-4023".into(),
                status: TruckStatus::Active,
                assigned_ward: Some(2),
            },
        ];

        let snapshot = snapshot(&wards, &reports, &trucks, Vec::new(), now);

        assert_eq!(snapshot.reports.total, 3);
        assert_eq!(snapshot.reports.illegal_dumping, 1);
        assert_eq!(snapshot.reports.unresolved, 2);
        assert_eq!(snapshot.trucks.total, 2);
        assert_eq!(snapshot.trucks.active, 1);
        assert_eq!(snapshot.trucks.available, 1);
        assert_eq!(snapshot.predictions.details.len(), 2);
        assert_eq!(snapshot.predictions.high_risk_wards, 1);
        assert!(snapshot.predictions.average_overflow_risk > 0.0);
    }

    #[test]
    fn alert_list_is_capped_at_ten() {
        let now = Utc::now();
        let alerts: Vec<Alert> = (0..14)
            .map(|i| Alert {
                id: format!("ALERT-{i}"),
                alert_type: crate::AlertType::OverflowRisk,
                severity: UrgencyLevel::Critical,
                ward_number: i,
                ward_name: format!("Ward {i}"),
                message: String::new(),
                hours_to_overflow: None,
                assigned_truck: None,
                actions: Vec::new(),
                created_at: now,
            })
            .collect();

        let snapshot = snapshot(&[], &[], &[], alerts, now);
        assert_eq!(snapshot.alerts.total, 14);
        assert_eq!(snapshot.alerts.critical, 14);
        assert_eq!(snapshot.alerts.list.len(), 10);
    }
}
