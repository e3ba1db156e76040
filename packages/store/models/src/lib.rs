#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Document shapes for the waste-grid document store.
//!
//! These types mirror the JSON documents held in the external store's
//! `wasteReports`, `wards`, `users`, `trucks`, and `policies` collections.
//! Derived fields on wards and users (`cleanlinessIndex`, `overflowRisk`,
//! `participationScore`, `efficiency`) are caches recomputed from the
//! report log, never sources of truth.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use waste_grid_waste_models::TruckStatus;

pub mod policy;
pub mod report;
pub mod user;
pub mod ward;

pub use policy::{
    ImpactEstimate, Implementation, InfrastructureItem, Milestone, PolicyContext,
    PolicyRecommendationDoc, PolicyStatusEntry, RecommendationPayload, Review, ReviewDecision,
};
pub use report::{
    Assignment, Classification, Reporter, ReporterKind, Resolution, StatusEntry, Verification,
    WasteReport,
};
pub use user::{CitizenMetrics, OfficerMetrics, User};
pub use ward::{
    ActiveReports, BinInfrastructure, CleanlinessEntry, CleanlinessFactors, CleanlinessIndex,
    Demographics, OverflowRisk, Performance, SeverityCounts, StatusCounts, Ward,
};

/// A WGS84 coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Longitude in degrees.
    pub longitude: f64,
    /// Latitude in degrees.
    pub latitude: f64,
}

impl GeoPoint {
    /// Creates a point from longitude/latitude degrees.
    #[must_use]
    pub const fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    /// Whether both components are finite and within WGS84 bounds.
    #[must_use]
    pub fn is_valid(self) -> bool {
        self.longitude.is_finite()
            && self.latitude.is_finite()
            && (-180.0..=180.0).contains(&self.longitude)
            && (-90.0..=90.0).contains(&self.latitude)
    }
}

/// Valid ward numbers span 1-100.
pub const MAX_WARD_NUMBER: u32 = 100;

/// Whether a ward number is within the municipal range.
#[must_use]
pub const fn is_valid_ward_number(ward_number: u32) -> bool {
    ward_number >= 1 && ward_number <= MAX_WARD_NUMBER
}

/// A truck in the collection fleet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Truck {
    /// Document ID.
    pub id: String,
    /// Registration plate, e.g. `TN-58-MR-4012`.
    pub name: String,
    /// Operational status.
    pub status: TruckStatus,
    /// Ward this truck is currently claimed for, if any.
    pub assigned_ward: Option<u32>,
}

impl Truck {
    /// Creates an available truck with the given id and registration.
    #[must_use]
    pub const fn available(id: String, name: String) -> Self {
        Self {
            id,
            name,
            status: TruckStatus::Available,
            assigned_ward: None,
        }
    }
}

/// Generates a prefixed document ID, e.g. `WR-9f2c41d8a3b04e71`.
#[must_use]
pub fn prefixed_id(prefix: &str) -> String {
    let id = uuid::Uuid::new_v4().simple().to_string();
    format!("{prefix}-{}", &id[..16])
}

/// Formats a timestamp as the `YYYY-MM-DD` day key used by the 7-day
/// report-trend histogram.
#[must_use]
pub fn day_key(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geo_point_validity() {
        assert!(GeoPoint::new(78.1198, 9.9252).is_valid());
        assert!(!GeoPoint::new(f64::NAN, 9.9252).is_valid());
        assert!(!GeoPoint::new(200.0, 9.9252).is_valid());
        assert!(!GeoPoint::new(78.1198, -95.0).is_valid());
    }

    #[test]
    fn ward_number_bounds() {
        assert!(is_valid_ward_number(1));
        assert!(is_valid_ward_number(100));
        assert!(!is_valid_ward_number(0));
        assert!(!is_valid_ward_number(101));
    }

    #[test]
    fn prefixed_ids_are_unique() {
        let a = prefixed_id("WR");
        let b = prefixed_id("WR");
        assert!(a.starts_with("WR-"));
        assert_ne!(a, b);
    }
}
