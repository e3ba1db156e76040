#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Single-vehicle route optimization over geotagged hotspots.
//!
//! Nearest-neighbour ordering with a closing leg back to the start,
//! over great-circle distances. O(n²), which is the right complexity
//! class for the intended inputs (tens of hotspots per truck, not
//! thousands); a spatial index or 2-opt refinement would be the next
//! step if hotspot sets ever grow past that.

use serde::{Deserialize, Serialize};
use waste_grid_store_models::{GeoPoint, WasteReport};
use waste_grid_waste_models::SeverityLevel;

/// Mean Earth radius in kilometres.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Assumed average truck speed in km/h.
pub const AVG_SPEED_KMH: f64 = 30.0;

/// Baseline fuel efficiency in km per litre.
pub const FUEL_EFFICIENCY_KM_PER_L: f64 = 4.0;

/// Share of baseline fuel an optimized route consumes.
pub const OPTIMIZATION_FACTOR: f64 = 0.75;

/// Fuel price per litre, in rupees.
pub const FUEL_PRICE_PER_L: f64 = 100.0;

/// Kilograms of CO₂ avoided per litre of fuel saved.
pub const CO2_KG_PER_L: f64 = 2.3;

/// A geocoded cleanup location with its severity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotspot {
    /// Location.
    pub coordinates: GeoPoint,
    /// Severity of the waste accumulation there.
    pub severity: SeverityLevel,
}

/// An optimized single-vehicle route with its savings estimates.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizedRoute {
    /// The truck the route is planned for.
    pub truck_id: String,
    /// Visiting order; a permutation of the input hotspots.
    pub route: Vec<Hotspot>,
    /// Total distance including the closing leg, in km.
    pub total_distance_km: f64,
    /// Estimated driving time in minutes at [`AVG_SPEED_KMH`].
    pub estimated_time_minutes: f64,
    /// Fuel the optimized route needs, in litres.
    pub fuel_required_l: f64,
    /// Fuel saved versus the unoptimized baseline, in litres.
    pub fuel_savings_l: f64,
    /// Cost saved at [`FUEL_PRICE_PER_L`], in rupees.
    pub cost_savings: f64,
    /// CO₂ avoided, in kilograms.
    pub co2_reduced_kg: f64,
}

/// Great-circle distance between two points via the haversine formula.
#[must_use]
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let phi1 = a.latitude.to_radians();
    let phi2 = b.latitude.to_radians();
    let d_phi = (b.latitude - a.latitude).to_radians();
    let d_lambda = (b.longitude - a.longitude).to_radians();

    let h = (d_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Orders hotspots into a visiting sequence for one truck.
///
/// Nearest-neighbour: start at the first hotspot in input order, then
/// repeatedly append the closest unvisited hotspot; finally close the
/// loop back to the start. Returns `None` for an empty hotspot set.
#[must_use]
pub fn optimize_route(truck_id: &str, hotspots: &[Hotspot]) -> Option<OptimizedRoute> {
    if hotspots.is_empty() {
        return None;
    }

    let mut route = vec![hotspots[0]];
    let mut remaining: Vec<Hotspot> = hotspots[1..].to_vec();
    let mut total_distance = 0.0;

    while !remaining.is_empty() {
        let tail = route[route.len() - 1].coordinates;

        let mut nearest_idx = 0;
        let mut nearest_dist = f64::INFINITY;
        for (idx, spot) in remaining.iter().enumerate() {
            let dist = haversine_km(tail, spot.coordinates);
            if dist < nearest_dist {
                nearest_dist = dist;
                nearest_idx = idx;
            }
        }

        total_distance += nearest_dist;
        route.push(remaining.swap_remove(nearest_idx));
    }

    // Close the loop back to the start.
    total_distance += haversine_km(route[route.len() - 1].coordinates, route[0].coordinates);

    let baseline_fuel = total_distance / FUEL_EFFICIENCY_KM_PER_L;
    let optimized_fuel = baseline_fuel * OPTIMIZATION_FACTOR;
    let fuel_savings = baseline_fuel - optimized_fuel;

    Some(OptimizedRoute {
        truck_id: truck_id.to_string(),
        route,
        total_distance_km: total_distance,
        estimated_time_minutes: total_distance / AVG_SPEED_KMH * 60.0,
        fuel_required_l: optimized_fuel,
        fuel_savings_l: fuel_savings,
        cost_savings: fuel_savings * FUEL_PRICE_PER_L,
        co2_reduced_kg: fuel_savings * CO2_KG_PER_L,
    })
}

/// Extracts route-optimizer input from a ward's unresolved reports.
///
/// Reports with malformed coordinates are dropped here so distance math
/// never sees them.
#[must_use]
pub fn hotspots_from_reports(reports: &[WasteReport], ward_number: u32) -> Vec<Hotspot> {
    reports
        .iter()
        .filter(|r| r.ward_number == ward_number && r.is_open() && r.coordinates.is_valid())
        .map(|r| Hotspot {
            coordinates: r.coordinates,
            severity: r.classification.severity,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spot(longitude: f64, latitude: f64) -> Hotspot {
        Hotspot {
            coordinates: GeoPoint::new(longitude, latitude),
            severity: SeverityLevel::Moderate,
        }
    }

    #[test]
    fn haversine_identity_and_symmetry() {
        let a = GeoPoint::new(78.1198, 9.9252);
        let b = GeoPoint::new(78.1405, 9.9195);
        assert!((haversine_km(a, a) - 0.0).abs() < f64::EPSILON);
        assert!((haversine_km(a, b) - haversine_km(b, a)).abs() < 1e-12);
    }

    #[test]
    fn haversine_known_distance() {
        // Madurai to Chennai is roughly 425 km great-circle.
        let madurai = GeoPoint::new(78.1198, 9.9252);
        let chennai = GeoPoint::new(80.2707, 13.0827);
        let d = haversine_km(madurai, chennai);
        assert!((400.0..450.0).contains(&d), "got {d} km");
    }

    #[test]
    fn empty_input_yields_no_route() {
        assert!(optimize_route("truck-1", &[]).is_none());
    }

    #[test]
    fn single_hotspot_route_is_degenerate() {
        let route = optimize_route("truck-1", &[spot(78.12, 9.92)]).unwrap();
        assert_eq!(route.route.len(), 1);
        assert!((route.total_distance_km - 0.0).abs() < f64::EPSILON);
        assert!((route.fuel_savings_l - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn route_is_a_permutation_of_the_input() {
        let hotspots: Vec<Hotspot> = (0..12)
            .map(|i| spot(78.0 + f64::from(i) * 0.01, 9.9 + f64::from(i % 5) * 0.02))
            .collect();
        let route = optimize_route("truck-1", &hotspots).unwrap();

        assert_eq!(route.route.len(), hotspots.len());
        for original in &hotspots {
            assert_eq!(
                route.route.iter().filter(|h| *h == original).count(),
                1,
                "hotspot {original:?} should appear exactly once"
            );
        }
        assert_eq!(route.route[0], hotspots[0]);
    }

    #[test]
    fn nearest_neighbour_orders_collinear_points() {
        // Points on a line, shuffled; starting from the westmost, the
        // greedy route must walk them west to east.
        let hotspots = [
            spot(78.00, 9.92),
            spot(78.06, 9.92),
            spot(78.02, 9.92),
            spot(78.04, 9.92),
        ];
        let route = optimize_route("truck-1", &hotspots).unwrap();
        let longitudes: Vec<f64> = route.route.iter().map(|h| h.coordinates.longitude).collect();
        assert_eq!(longitudes, vec![78.00, 78.02, 78.04, 78.06]);
    }

    #[test]
    fn hotspots_come_from_open_reports_only() {
        use waste_grid_store_models::{Classification, Reporter, ReporterKind};
        use waste_grid_waste_models::ReportStatus;

        let now = chrono::Utc::now();
        let make = |id: &str, ward: u32| {
            WasteReport::new(
                id.to_string(),
                GeoPoint::new(78.12, 9.93),
                ward,
                Classification::unclassified(),
                Reporter {
                    user_id: None,
                    kind: ReporterKind::Citizen,
                    anonymous: false,
                },
                now,
            )
        };

        let mut resolved = make("WR-resolved", 7);
        resolved.push_status(ReportStatus::Resolved, now, None, None);

        let reports = vec![make("WR-open", 7), resolved, make("WR-elsewhere", 8)];
        let hotspots = hotspots_from_reports(&reports, 7);
        assert_eq!(hotspots.len(), 1);
    }

    #[test]
    fn savings_model_is_consistent() {
        let hotspots = [spot(78.00, 9.92), spot(78.10, 9.92)];
        let route = optimize_route("truck-1", &hotspots).unwrap();

        let baseline = route.total_distance_km / FUEL_EFFICIENCY_KM_PER_L;
        assert!((route.fuel_required_l - baseline * 0.75).abs() < 1e-9);
        assert!((route.fuel_savings_l - baseline * 0.25).abs() < 1e-9);
        assert!((route.cost_savings - route.fuel_savings_l * 100.0).abs() < 1e-9);
        assert!((route.co2_reduced_kg - route.fuel_savings_l * 2.3).abs() < 1e-9);
        assert!(
            (route.estimated_time_minutes - route.total_distance_km * 2.0).abs() < 1e-9,
            "30 km/h means 2 minutes per km"
        );
    }
}
