#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Alert & escalation engine.
//!
//! Two independent generators run per pass and their results are
//! concatenated: overflow alerts from the local risk estimate, and
//! illegal-dumping alerts from flagged reports. Overflow alerts carry an
//! auto-assigned truck when one is available; assignment is an atomic
//! find-and-claim under the trucks collection lock, so concurrent passes
//! never double-assign.
//!
//! Alerts are ephemeral: computed per pass or per request, never
//! persisted.

pub mod dashboard;
pub mod engine;
pub mod trucks;

use chrono::{DateTime, Utc};
use serde::Serialize;
use strum_macros::{AsRefStr, Display};
use thiserror::Error;
use waste_grid_store::StoreError;
use waste_grid_store_models::Truck;
use waste_grid_waste_models::UrgencyLevel;

pub use dashboard::{CommandCenterSnapshot, snapshot};
pub use engine::{generate_alerts, illegal_dumping_alerts, overflow_alerts};
pub use trucks::{claim_truck, release_truck};

/// Canonical overflow-probability threshold above which an alert fires.
///
/// The call sites this engine replaced disagreed between 50 and 70; a
/// single named constant splits the difference and is applied uniformly.
pub const OVERFLOW_ALERT_THRESHOLD: f64 = 60.0;

/// More than this many illegal-dumping-flagged reports in a ward raises
/// an enforcement alert.
pub const ILLEGAL_DUMPING_ALERT_MIN: usize = 1;

/// Overflow horizon below which the emergency protocol is suggested.
pub const EMERGENCY_HORIZON_HOURS: f64 = 12.0;

/// Errors from alert generation.
#[derive(Debug, Error)]
pub enum AlertError {
    /// Store access failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// What kind of condition an alert reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, AsRefStr)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertType {
    /// A ward's bins are projected to overflow.
    OverflowRisk,
    /// A ward shows a pattern of illegal dumping.
    IllegalDumping,
}

/// Advisory actions attached to an alert. Annotations only — they never
/// drive state transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, AsRefStr)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum SuggestedAction {
    /// Send the assigned truck now.
    DispatchTruckImmediate,
    /// Notify the ward office.
    AlertWardOffice,
    /// Raise collection cadence.
    IncreaseCollectionFrequency,
    /// Watch the ward closely.
    MonitorClosely,
    /// Trigger the emergency response protocol.
    EmergencyProtocol,
}

/// One generated alert.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    /// Generated alert ID.
    pub id: String,
    /// Condition kind.
    pub alert_type: AlertType,
    /// Severity on the shared urgency scale.
    pub severity: UrgencyLevel,
    /// Affected ward.
    pub ward_number: u32,
    /// Affected ward's name.
    pub ward_name: String,
    /// Human-readable summary.
    pub message: String,
    /// Projected hours to overflow (overflow alerts only).
    pub hours_to_overflow: Option<f64>,
    /// Truck claimed for this alert, when one was available.
    pub assigned_truck: Option<Truck>,
    /// Advisory actions.
    pub actions: Vec<SuggestedAction>,
    /// When the alert was generated.
    pub created_at: DateTime<Utc>,
}

/// Derives the advisory actions for an overflow prediction.
///
/// Pure function of the probability and horizon; the threshold bands
/// overlap deliberately, so a critical prediction also carries the
/// high-band actions.
#[must_use]
pub fn suggested_actions(probability: f64, hours_to_overflow: f64) -> Vec<SuggestedAction> {
    let mut actions = Vec::new();
    if probability > 80.0 {
        actions.push(SuggestedAction::DispatchTruckImmediate);
        actions.push(SuggestedAction::AlertWardOffice);
    }
    if probability > 60.0 {
        actions.push(SuggestedAction::IncreaseCollectionFrequency);
        actions.push(SuggestedAction::MonitorClosely);
    }
    if hours_to_overflow < EMERGENCY_HORIZON_HOURS {
        actions.push(SuggestedAction::EmergencyProtocol);
    }
    actions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn critical_probability_gets_both_bands() {
        let actions = suggested_actions(92.0, 20.0);
        assert_eq!(
            actions,
            vec![
                SuggestedAction::DispatchTruckImmediate,
                SuggestedAction::AlertWardOffice,
                SuggestedAction::IncreaseCollectionFrequency,
                SuggestedAction::MonitorClosely,
            ]
        );
    }

    #[test]
    fn short_horizon_adds_emergency_protocol() {
        let actions = suggested_actions(65.0, 8.0);
        assert!(actions.contains(&SuggestedAction::EmergencyProtocol));
        assert!(!actions.contains(&SuggestedAction::DispatchTruckImmediate));
    }

    #[test]
    fn quiet_ward_gets_no_actions() {
        assert!(suggested_actions(30.0, 24.0).is_empty());
    }
}
