//! The `users` collection document.

use serde::{Deserialize, Serialize};
use waste_grid_waste_models::UserRole;

/// A platform user: citizen, officer, supervisor, admin, or enforcement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Document ID.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Role determining which metrics block applies.
    pub role: UserRole,
    /// Wards this user is assigned to (officers and supervisors).
    #[serde(default)]
    pub assigned_wards: Vec<u32>,
    /// Citizen engagement counters and derived score.
    #[serde(default)]
    pub citizen_metrics: CitizenMetrics,
    /// Officer workload counters and derived efficiency.
    #[serde(default)]
    pub officer_metrics: OfficerMetrics,
}

impl User {
    /// Creates a user with zeroed metrics.
    #[must_use]
    pub fn new(id: String, name: String, role: UserRole) -> Self {
        Self {
            id,
            name,
            role,
            assigned_wards: Vec::new(),
            citizen_metrics: CitizenMetrics::default(),
            officer_metrics: OfficerMetrics::default(),
        }
    }
}

/// Citizen engagement counters.
///
/// `participation_score` is a pure function of the submitted/verified
/// counters, recomputed by the scheduler; it is never hand-edited.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CitizenMetrics {
    /// Reports this citizen has filed.
    pub reports_submitted: u32,
    /// Filed reports that were verified by an officer.
    pub reports_verified: u32,
    /// Derived participation score, 0-10.
    pub participation_score: f64,
}

/// Officer workload counters.
///
/// `efficiency` is a pure function of the assigned/completed counters,
/// recomputed by the scheduler; it is never hand-edited.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfficerMetrics {
    /// Tasks assigned to this officer.
    pub tasks_assigned: u32,
    /// Tasks this officer completed.
    pub tasks_completed: u32,
    /// Derived completion rate, 0-100.
    pub efficiency: f64,
    /// Average response time in minutes.
    pub average_response_time: f64,
}
