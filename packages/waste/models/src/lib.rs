#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Waste taxonomy types and severity definitions.
//!
//! This crate defines the canonical waste type taxonomy, severity scale,
//! and shared status/urgency enums used across the entire waste-grid
//! system. Classification output, report documents, and every derived
//! score speak in these types.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Severity score for a waste report, from 1 (minimal) to 5 (critical).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum SeverityLevel {
    /// Level 1: Negligible accumulation, routine pickup
    Minimal = 1,
    /// Level 2: Small accumulation, no immediate hazard
    Low = 2,
    /// Level 3: Visible accumulation, service needed
    Moderate = 3,
    /// Level 4: Large accumulation or hazardous material nearby
    High = 4,
    /// Level 5: Severe accumulation, public-health hazard
    Critical = 5,
}

impl SeverityLevel {
    /// Returns the numeric value of this severity level.
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Creates a severity level from a numeric value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not in the range 1-5.
    pub const fn from_value(value: u8) -> Result<Self, InvalidSeverityError> {
        match value {
            1 => Ok(Self::Minimal),
            2 => Ok(Self::Low),
            3 => Ok(Self::Moderate),
            4 => Ok(Self::High),
            5 => Ok(Self::Critical),
            _ => Err(InvalidSeverityError { value }),
        }
    }

    /// Returns the distribution bucket this severity falls into.
    #[must_use]
    pub const fn bucket(self) -> SeverityBucket {
        match self {
            Self::Minimal | Self::Low => SeverityBucket::Low,
            Self::Moderate => SeverityBucket::Medium,
            Self::High => SeverityBucket::High,
            Self::Critical => SeverityBucket::Critical,
        }
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Minimal,
            Self::Low,
            Self::Moderate,
            Self::High,
            Self::Critical,
        ]
    }
}

/// Error returned when attempting to create a [`SeverityLevel`] from an
/// invalid numeric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidSeverityError {
    /// The invalid severity value that was provided.
    pub value: u8,
}

impl std::fmt::Display for InvalidSeverityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid severity value {}: expected 1-5", self.value)
    }
}

impl std::error::Error for InvalidSeverityError {}

/// Severity distribution bucket used by the overflow-prediction input.
///
/// Buckets the 1-5 severity scale: 1-2 low, 3 medium, 4 high, 5 critical.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SeverityBucket {
    /// Severity 1-2.
    Low,
    /// Severity 3.
    Medium,
    /// Severity 4.
    High,
    /// Severity 5.
    Critical,
}

/// Category of waste identified by the classification service.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum WasteType {
    /// Bottles, bags, packaging film
    Plastic,
    /// Food scraps, garden waste, market refuse
    Organic,
    /// Unsegregated household waste
    Mixed,
    /// Rubble, concrete, demolition debris
    Construction,
    /// Clinical and biomedical waste
    Medical,
    /// Discarded electronics and batteries
    EWaste,
    /// Chemicals, paints, solvents
    Hazardous,
    /// Cloth and garment waste
    Textile,
    /// Scrap metal and cans
    Metal,
    /// Bottles and broken glass
    Glass,
    /// Classification service could not determine a type
    Unclassified,
}

impl WasteType {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Plastic,
            Self::Organic,
            Self::Mixed,
            Self::Construction,
            Self::Medical,
            Self::EWaste,
            Self::Hazardous,
            Self::Textile,
            Self::Metal,
            Self::Glass,
            Self::Unclassified,
        ]
    }
}

/// Lifecycle state of a waste report.
///
/// Reports move forward through reported -> verified -> assigned ->
/// in-progress -> resolved; `rejected` is the other terminal state,
/// reached by officer rejection or the stale-report sweep.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ReportStatus {
    /// Submitted by a citizen or sensor, awaiting verification.
    Reported,
    /// Confirmed by an officer.
    Verified,
    /// Assigned to a collection team.
    Assigned,
    /// Collection underway.
    InProgress,
    /// Cleaned up and closed.
    Resolved,
    /// Closed without action (invalid, duplicate, or stale).
    Rejected,
}

impl ReportStatus {
    /// Whether this status is terminal (no further transitions).
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Resolved | Self::Rejected)
    }

    /// Whether this report still counts toward a ward's active load.
    #[must_use]
    pub const fn is_open(self) -> bool {
        !self.is_terminal()
    }
}

/// Urgency level attached to overflow predictions and alerts.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum UrgencyLevel {
    /// No action needed beyond routine collection.
    Low,
    /// Monitor; schedule within normal cadence.
    Medium,
    /// Collection needed ahead of schedule.
    High,
    /// Immediate dispatch required.
    Critical,
}

/// Probability above which a prediction is CRITICAL urgency.
pub const URGENCY_CRITICAL_THRESHOLD: f64 = 80.0;
/// Probability above which a prediction is HIGH urgency.
pub const URGENCY_HIGH_THRESHOLD: f64 = 60.0;
/// Probability above which a prediction is MEDIUM urgency.
pub const URGENCY_MEDIUM_THRESHOLD: f64 = 40.0;

impl UrgencyLevel {
    /// Maps an overflow probability (0-100) to an urgency level.
    ///
    /// Thresholds are shared by the AI-backed and local prediction
    /// variants so callers see a single urgency scale.
    #[must_use]
    pub fn from_probability(probability: f64) -> Self {
        if probability > URGENCY_CRITICAL_THRESHOLD {
            Self::Critical
        } else if probability > URGENCY_HIGH_THRESHOLD {
            Self::High
        } else if probability > URGENCY_MEDIUM_THRESHOLD {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// Role of a platform user.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum UserRole {
    /// Files reports, earns participation score.
    Citizen,
    /// Triages and resolves reports in assigned wards.
    WardOfficer,
    /// Oversees officers, reviews policy recommendations.
    Supervisor,
    /// Full platform access.
    Admin,
    /// Handles illegal-dumping enforcement actions.
    Enforcement,
}

/// Operational status of a collection truck.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TruckStatus {
    /// Idle, claimable by the escalation engine.
    Available,
    /// Claimed for a ward, not yet en route.
    Assigned,
    /// On a collection run.
    Active,
}

/// Lifecycle state of a policy recommendation.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum PolicyStatus {
    /// Freshly produced by the recommendation engine.
    Generated,
    /// Sent back for revision or awaiting a decision.
    UnderReview,
    /// Accepted by a supervisor or admin.
    Approved,
    /// Declined.
    Rejected,
    /// Funded and in progress.
    Implemented,
    /// Completed; outcomes being tracked.
    Monitored,
}

/// Severity class of an incident pattern, used by policy context.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SeverityClass {
    /// Sporadic, low-impact incidents.
    Low,
    /// Recurring incidents, moderate impact.
    Medium,
    /// Frequent or high-impact incidents.
    High,
    /// Sustained critical incident pattern.
    Critical,
}

impl SeverityClass {
    /// Weight contributed to the policy priority score.
    #[must_use]
    pub const fn priority_weight(self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
            Self::Critical => 4,
        }
    }
}

/// Budget priority attached to a policy recommendation.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BudgetPriority {
    /// Can wait for the next budget cycle.
    Low,
    /// Fund within the current cycle.
    Medium,
    /// Fund ahead of other discretionary items.
    High,
    /// Immediate allocation required.
    Urgent,
}

impl BudgetPriority {
    /// Weight contributed to the policy priority score.
    #[must_use]
    pub const fn priority_weight(self) -> u8 {
        match self {
            Self::Low => 0,
            Self::Medium => 1,
            Self::High => 2,
            Self::Urgent => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_from_value_roundtrip() {
        for v in 1..=5u8 {
            let severity = SeverityLevel::from_value(v).unwrap();
            assert_eq!(severity.value(), v);
        }
        assert!(SeverityLevel::from_value(0).is_err());
        assert!(SeverityLevel::from_value(6).is_err());
    }

    #[test]
    fn severity_bucket_mapping() {
        assert_eq!(SeverityLevel::Minimal.bucket(), SeverityBucket::Low);
        assert_eq!(SeverityLevel::Low.bucket(), SeverityBucket::Low);
        assert_eq!(SeverityLevel::Moderate.bucket(), SeverityBucket::Medium);
        assert_eq!(SeverityLevel::High.bucket(), SeverityBucket::High);
        assert_eq!(SeverityLevel::Critical.bucket(), SeverityBucket::Critical);
    }

    #[test]
    fn urgency_thresholds() {
        assert_eq!(UrgencyLevel::from_probability(95.0), UrgencyLevel::Critical);
        assert_eq!(UrgencyLevel::from_probability(80.0), UrgencyLevel::High);
        assert_eq!(UrgencyLevel::from_probability(61.0), UrgencyLevel::High);
        assert_eq!(UrgencyLevel::from_probability(60.0), UrgencyLevel::Medium);
        assert_eq!(UrgencyLevel::from_probability(40.0), UrgencyLevel::Low);
        assert_eq!(UrgencyLevel::from_probability(0.0), UrgencyLevel::Low);
    }

    #[test]
    fn terminal_statuses() {
        assert!(ReportStatus::Resolved.is_terminal());
        assert!(ReportStatus::Rejected.is_terminal());
        for status in [
            ReportStatus::Reported,
            ReportStatus::Verified,
            ReportStatus::Assigned,
            ReportStatus::InProgress,
        ] {
            assert!(status.is_open(), "{status} should be open");
        }
    }

    #[test]
    fn waste_type_wire_format() {
        let json = serde_json::to_string(&WasteType::EWaste).unwrap();
        assert_eq!(json, "\"e-waste\"");
        let back: WasteType = serde_json::from_str("\"e-waste\"").unwrap();
        assert_eq!(back, WasteType::EWaste);
    }
}
