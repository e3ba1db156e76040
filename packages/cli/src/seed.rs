//! Deterministic demo dataset.
//!
//! Five wards modelled on central Madurai, a four-truck fleet, a handful
//! of users, and a spread of reports exercising every engine: overflow
//! load, illegal-dumping clusters, resolved reports with realistic
//! response times, and one stale leftover for the sweep.

use chrono::{DateTime, Duration, Utc};
use waste_grid_store::{DocumentStore, StoreError, collections, typed};
use waste_grid_store_models::{
    Classification, GeoPoint, Reporter, ReporterKind, Resolution, Truck, User, Ward, WasteReport,
};
use waste_grid_waste_models::{ReportStatus, SeverityLevel, UserRole, WasteType};

struct WardSeed {
    number: u32,
    name: &'static str,
    zone: &'static str,
    population: u32,
    load: f64,
    capacity: f64,
}

const WARD_SEEDS: &[WardSeed] = &[
    WardSeed {
        number: 1,
        name: "SS Colony",
        zone: "south",
        population: 12_500,
        load: 75.0,
        capacity: 100.0,
    },
    WardSeed {
        number: 2,
        name: "Anna Main Road",
        zone: "central",
        population: 15_800,
        load: 85.0,
        capacity: 100.0,
    },
    WardSeed {
        number: 3,
        name: "Meenakshi Temple Zone",
        zone: "central",
        population: 18_200,
        load: 92.0,
        capacity: 100.0,
    },
    WardSeed {
        number: 4,
        name: "KK Nagar",
        zone: "west",
        population: 14_100,
        load: 71.0,
        capacity: 120.0,
    },
    WardSeed {
        number: 5,
        name: "Vilakkuthoon",
        zone: "central",
        population: 11_300,
        load: 30.0,
        capacity: 100.0,
    },
];

struct ReportSeed {
    ward: u32,
    waste_type: WasteType,
    severity: u8,
    illegal: bool,
    age_hours: i64,
    resolved_after_minutes: Option<i64>,
}

const REPORT_SEEDS: &[ReportSeed] = &[
    // Ward 2: illegal-dumping cluster.
    ReportSeed { ward: 2, waste_type: WasteType::Construction, severity: 4, illegal: true, age_hours: 2, resolved_after_minutes: None },
    ReportSeed { ward: 2, waste_type: WasteType::Mixed, severity: 3, illegal: true, age_hours: 6, resolved_after_minutes: None },
    ReportSeed { ward: 2, waste_type: WasteType::Plastic, severity: 2, illegal: false, age_hours: 12, resolved_after_minutes: Some(95) },
    // Ward 3: heavy, severe load around the temple.
    ReportSeed { ward: 3, waste_type: WasteType::Organic, severity: 5, illegal: false, age_hours: 3, resolved_after_minutes: None },
    ReportSeed { ward: 3, waste_type: WasteType::Mixed, severity: 4, illegal: true, age_hours: 8, resolved_after_minutes: None },
    ReportSeed { ward: 3, waste_type: WasteType::Organic, severity: 4, illegal: true, age_hours: 20, resolved_after_minutes: None },
    ReportSeed { ward: 3, waste_type: WasteType::Plastic, severity: 3, illegal: false, age_hours: 30, resolved_after_minutes: Some(140) },
    ReportSeed { ward: 3, waste_type: WasteType::Mixed, severity: 5, illegal: false, age_hours: 50, resolved_after_minutes: Some(200) },
    ReportSeed { ward: 3, waste_type: WasteType::Organic, severity: 3, illegal: false, age_hours: 70, resolved_after_minutes: None },
    // Ward 1: moderate activity.
    ReportSeed { ward: 1, waste_type: WasteType::Plastic, severity: 2, illegal: false, age_hours: 10, resolved_after_minutes: Some(60) },
    ReportSeed { ward: 1, waste_type: WasteType::EWaste, severity: 3, illegal: false, age_hours: 40, resolved_after_minutes: None },
    // Ward 4: quiet, mostly resolved.
    ReportSeed { ward: 4, waste_type: WasteType::Organic, severity: 2, illegal: false, age_hours: 26, resolved_after_minutes: Some(45) },
    ReportSeed { ward: 4, waste_type: WasteType::Textile, severity: 1, illegal: false, age_hours: 60, resolved_after_minutes: Some(30) },
    // Ward 5: one stale report for the sweep to pick up.
    ReportSeed { ward: 5, waste_type: WasteType::Mixed, severity: 2, illegal: false, age_hours: 24 * 35, resolved_after_minutes: None },
];

/// Ward centre coordinates for generated report locations.
const fn ward_centre(ward: u32) -> GeoPoint {
    match ward {
        1 => GeoPoint::new(78.1042, 9.9030),
        2 => GeoPoint::new(78.1285, 9.9224),
        3 => GeoPoint::new(78.1193, 9.9195),
        4 => GeoPoint::new(78.0784, 9.9348),
        _ => GeoPoint::new(78.1148, 9.9178),
    }
}

/// Populates the store with the demo dataset.
///
/// # Errors
///
/// Returns [`StoreError`] if any insert fails (e.g. seeding twice).
pub async fn seed(store: &dyn DocumentStore, now: DateTime<Utc>) -> Result<(), StoreError> {
    for seed in WARD_SEEDS {
        let mut ward = Ward::new(
            format!("ward-{}", seed.number),
            seed.number,
            seed.name.to_string(),
        );
        ward.zone = Some(seed.zone.to_string());
        ward.demographics.population = seed.population;
        ward.infrastructure.current_load = seed.load;
        ward.infrastructure.capacity = seed.capacity;
        ward.infrastructure.total_bins = 40;
        ward.infrastructure.smart_bins = 6;
        typed::insert(store, collections::WARDS, &ward).await?;
    }

    for (i, registration) in ["TN-58-MR-4012", "TN-58-MR-4023", "TN-58-MR-4087", "TN-58-MR-4091"]
        .iter()
        .enumerate()
    {
        let truck = Truck::available(format!("truck-{}", i + 1), (*registration).to_string());
        typed::insert(store, collections::TRUCKS, &truck).await?;
    }

    seed_users(store).await?;

    for (i, seed) in REPORT_SEEDS.iter().enumerate() {
        let reported_at = now - Duration::hours(seed.age_hours);
        let mut report = WasteReport::new(
            format!("WR-seed-{i:02}"),
            ward_centre(seed.ward),
            seed.ward,
            Classification {
                waste_type: seed.waste_type,
                sub_type: None,
                severity: SeverityLevel::from_value(seed.severity)
                    .unwrap_or(SeverityLevel::Moderate),
                illegal_dumping: seed.illegal,
                ai_confidence: 0.88,
            },
            Reporter {
                user_id: Some("user-citizen-1".to_string()),
                kind: ReporterKind::Citizen,
                anonymous: false,
            },
            reported_at,
        );
        if let Some(minutes) = seed.resolved_after_minutes {
            let resolved_at = reported_at + Duration::minutes(minutes);
            report.resolution = Some(Resolution {
                resolved_at,
                resolved_by: Some("user-officer-1".to_string()),
                collected_kg: Some(35.0),
                action_taken: Some("Collected and segregated".to_string()),
            });
            report.push_status(ReportStatus::Verified, reported_at, None, None);
            report.push_status(
                ReportStatus::Resolved,
                resolved_at,
                Some("user-officer-1".to_string()),
                None,
            );
        }
        typed::insert(store, collections::REPORTS, &report).await?;
    }

    log::info!(
        "Seeded {} wards, 4 trucks, {} reports",
        WARD_SEEDS.len(),
        REPORT_SEEDS.len()
    );
    Ok(())
}

async fn seed_users(store: &dyn DocumentStore) -> Result<(), StoreError> {
    let mut citizen1 = User::new(
        "user-citizen-1".to_string(),
        "Meena Krishnan".to_string(),
        UserRole::Citizen,
    );
    citizen1.citizen_metrics.reports_submitted = 24;
    citizen1.citizen_metrics.reports_verified = 18;

    let mut citizen2 = User::new(
        "user-citizen-2".to_string(),
        "Ravi Shankar".to_string(),
        UserRole::Citizen,
    );
    citizen2.citizen_metrics.reports_submitted = 3;
    citizen2.citizen_metrics.reports_verified = 3;

    let mut officer1 = User::new(
        "user-officer-1".to_string(),
        "Priya Raman".to_string(),
        UserRole::WardOfficer,
    );
    officer1.assigned_wards = vec![2, 3];
    officer1.officer_metrics.tasks_assigned = 40;
    officer1.officer_metrics.tasks_completed = 33;

    let mut officer2 = User::new(
        "user-officer-2".to_string(),
        "Suresh Kumar".to_string(),
        UserRole::WardOfficer,
    );
    officer2.assigned_wards = vec![1, 4, 5];
    officer2.officer_metrics.tasks_assigned = 22;
    officer2.officer_metrics.tasks_completed = 21;

    for user in [&citizen1, &citizen2, &officer1, &officer2] {
        typed::insert(store, collections::USERS, user).await?;
    }
    Ok(())
}
