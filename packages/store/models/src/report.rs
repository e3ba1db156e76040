//! The `wasteReports` collection document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use waste_grid_waste_models::{ReportStatus, SeverityLevel, WasteType};

use crate::GeoPoint;

/// One citizen-or-sensor-originated waste observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WasteReport {
    /// Document ID, e.g. `WR-9f2c41d8a3b04e71`.
    pub id: String,
    /// Coordinate of the observation.
    pub coordinates: GeoPoint,
    /// Ward the observation falls in (1-100).
    pub ward_number: u32,
    /// Free-text address.
    pub address: Option<String>,
    /// Nearby landmark, if the reporter gave one.
    pub landmark: Option<String>,
    /// Classification produced by the AI service (or defaults).
    pub classification: Classification,
    /// Who filed the report.
    pub reporter: Reporter,
    /// Current lifecycle state; always equals the last history entry.
    pub status: ReportStatus,
    /// Append-only state transition log.
    pub status_history: Vec<StatusEntry>,
    /// Assignment details once a team/truck is attached.
    pub assignment: Option<Assignment>,
    /// Officer verification details.
    pub verification: Option<Verification>,
    /// Resolution details once resolved.
    pub resolution: Option<Resolution>,
    /// Creation time; immutable.
    pub reported_at: DateTime<Utc>,
}

impl WasteReport {
    /// Creates a freshly-submitted report in `Reported` status with an
    /// initial history entry.
    #[must_use]
    pub fn new(
        id: String,
        coordinates: GeoPoint,
        ward_number: u32,
        classification: Classification,
        reporter: Reporter,
        reported_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            coordinates,
            ward_number,
            address: None,
            landmark: None,
            classification,
            reporter,
            status: ReportStatus::Reported,
            status_history: vec![StatusEntry {
                status: ReportStatus::Reported,
                timestamp: reported_at,
                actor: None,
                notes: None,
            }],
            assignment: None,
            verification: None,
            resolution: None,
            reported_at,
        }
    }

    /// Appends a status transition, keeping `status` equal to the last
    /// history entry. History is append-only; entries are never edited
    /// or removed.
    pub fn push_status(
        &mut self,
        status: ReportStatus,
        timestamp: DateTime<Utc>,
        actor: Option<String>,
        notes: Option<String>,
    ) {
        self.status_history.push(StatusEntry {
            status,
            timestamp,
            actor,
            notes,
        });
        self.status = status;
    }

    /// Minutes between submission and resolution, `None` until resolved.
    #[must_use]
    pub fn response_time_minutes(&self) -> Option<i64> {
        self.resolution
            .as_ref()
            .map(|r| (r.resolved_at - self.reported_at).num_minutes())
    }

    /// Whether this report still counts toward its ward's active load.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.status.is_open()
    }
}

/// AI classification attached to a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    /// Detected waste type.
    pub waste_type: WasteType,
    /// Finer-grained sub-type string, if the classifier gave one.
    pub sub_type: Option<String>,
    /// Severity 1-5.
    pub severity: SeverityLevel,
    /// Whether the classifier flagged the site as illegal dumping.
    pub illegal_dumping: bool,
    /// Classifier confidence, 0-1.
    pub ai_confidence: f64,
}

impl Classification {
    /// A low-confidence default used when the classification service was
    /// unavailable at submission time.
    #[must_use]
    pub const fn unclassified() -> Self {
        Self {
            waste_type: WasteType::Unclassified,
            sub_type: None,
            severity: SeverityLevel::Moderate,
            illegal_dumping: false,
            ai_confidence: 0.0,
        }
    }
}

/// Origin of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReporterKind {
    /// Filed through the citizen app.
    Citizen,
    /// Filed by field staff.
    Officer,
    /// Raised from a CCTV detection.
    Cctv,
    /// Raised from a smart-bin sensor.
    IotSensor,
    /// Generated internally (e.g. seed data).
    System,
}

/// Who filed a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reporter {
    /// User document ID, absent for sensor/system origins.
    pub user_id: Option<String>,
    /// Origin channel.
    pub kind: ReporterKind,
    /// Whether the citizen chose to stay anonymous.
    pub anonymous: bool,
}

/// One entry in the append-only status history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusEntry {
    /// State entered.
    pub status: ReportStatus,
    /// When the transition happened.
    pub timestamp: DateTime<Utc>,
    /// User ID of whoever made the transition, if any.
    pub actor: Option<String>,
    /// Free-text notes.
    pub notes: Option<String>,
}

/// Crew/truck assignment details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    /// Crew name.
    pub team: Option<String>,
    /// Assigned officer's user ID.
    pub officer_id: Option<String>,
    /// Assigned truck's document ID.
    pub truck_id: Option<String>,
    /// When the assignment was made.
    pub assigned_at: DateTime<Utc>,
    /// Target completion time, if set.
    pub expected_completion: Option<DateTime<Utc>>,
}

/// Officer verification details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verification {
    /// Verifying officer's user ID.
    pub verified_by: String,
    /// When the report was verified.
    pub verified_at: DateTime<Utc>,
    /// Verification notes.
    pub notes: Option<String>,
}

/// Resolution details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolution {
    /// When the site was cleaned.
    pub resolved_at: DateTime<Utc>,
    /// Resolving actor's user ID.
    pub resolved_by: Option<String>,
    /// Collected weight in kilograms.
    pub collected_kg: Option<f64>,
    /// What was done.
    pub action_taken: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> WasteReport {
        WasteReport::new(
            "WR-test".to_string(),
            GeoPoint::new(78.1198, 9.9252),
            12,
            Classification::unclassified(),
            Reporter {
                user_id: None,
                kind: ReporterKind::System,
                anonymous: false,
            },
            Utc::now(),
        )
    }

    #[test]
    fn push_status_keeps_current_in_sync() {
        let mut report = sample_report();
        assert_eq!(report.status, ReportStatus::Reported);
        assert_eq!(report.status_history.len(), 1);

        let now = Utc::now();
        report.push_status(ReportStatus::Verified, now, Some("officer-1".into()), None);
        report.push_status(ReportStatus::Assigned, now, Some("officer-1".into()), None);

        assert_eq!(report.status, ReportStatus::Assigned);
        assert_eq!(report.status_history.len(), 3);
        assert_eq!(
            report.status_history.last().unwrap().status,
            report.status
        );
    }

    #[test]
    fn response_time_requires_resolution() {
        let mut report = sample_report();
        assert_eq!(report.response_time_minutes(), None);

        let resolved_at = report.reported_at + chrono::Duration::minutes(90);
        report.resolution = Some(Resolution {
            resolved_at,
            resolved_by: None,
            collected_kg: Some(40.0),
            action_taken: None,
        });
        report.push_status(ReportStatus::Resolved, resolved_at, None, None);

        assert_eq!(report.response_time_minutes(), Some(90));
    }

    #[test]
    fn wire_format_is_camel_case() {
        let report = sample_report();
        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("wardNumber").is_some());
        assert!(json.get("statusHistory").is_some());
        assert!(json.get("reportedAt").is_some());
    }
}
