//! Alert generators.

use chrono::{DateTime, Utc};
use waste_grid_prediction::predict_local;
use waste_grid_store::{DocLocks, DocumentStore, collections, typed};
use waste_grid_store_models::{Ward, WasteReport, prefixed_id};
use waste_grid_waste_models::UrgencyLevel;

use crate::{
    Alert, AlertError, AlertType, ILLEGAL_DUMPING_ALERT_MIN, OVERFLOW_ALERT_THRESHOLD,
    suggested_actions, trucks,
};

/// Generates overflow alerts for every ward over the threshold, claiming
/// a truck per alert while the fleet lasts.
///
/// Uses the local prediction variant: alert scanning runs every pass and
/// cannot afford a network round trip per ward. A ward whose local
/// probability exceeds [`OVERFLOW_ALERT_THRESHOLD`] gets one alert; no
/// available truck never suppresses the alert.
///
/// # Errors
///
/// Returns [`AlertError::Store`] if truck assignment fails; prediction
/// itself is local and infallible.
pub async fn overflow_alerts(
    store: &dyn DocumentStore,
    locks: &DocLocks,
    wards: &[Ward],
    reports: &[WasteReport],
    now: DateTime<Utc>,
) -> Result<Vec<Alert>, AlertError> {
    let mut alerts = Vec::new();

    for ward in wards {
        let prediction = predict_local(ward, reports, now);
        if prediction.probability <= OVERFLOW_ALERT_THRESHOLD {
            continue;
        }

        let assigned_truck = trucks::claim_truck(store, locks, ward.ward_number).await?;

        alerts.push(Alert {
            id: prefixed_id("ALERT"),
            alert_type: AlertType::OverflowRisk,
            severity: prediction.urgency,
            ward_number: ward.ward_number,
            ward_name: ward.name.clone(),
            message: format!(
                "{} overflow risk ({:.0}% probability)",
                prediction.urgency, prediction.probability
            ),
            hours_to_overflow: Some(prediction.hours_to_overflow),
            assigned_truck,
            actions: suggested_actions(prediction.probability, prediction.hours_to_overflow),
            created_at: now,
        });
    }

    Ok(alerts)
}

/// Generates one HIGH-severity enforcement alert per ward whose
/// illegal-dumping-flagged report count exceeds
/// [`ILLEGAL_DUMPING_ALERT_MIN`].
#[must_use]
pub fn illegal_dumping_alerts(
    wards: &[Ward],
    reports: &[WasteReport],
    now: DateTime<Utc>,
) -> Vec<Alert> {
    wards
        .iter()
        .filter_map(|ward| {
            let flagged = reports
                .iter()
                .filter(|r| {
                    r.ward_number == ward.ward_number && r.classification.illegal_dumping
                })
                .count();
            (flagged > ILLEGAL_DUMPING_ALERT_MIN).then(|| Alert {
                id: prefixed_id("ALERT"),
                alert_type: AlertType::IllegalDumping,
                severity: UrgencyLevel::High,
                ward_number: ward.ward_number,
                ward_name: ward.name.clone(),
                message: format!(
                    "{flagged} illegal dumping incidents detected - enforcement action required"
                ),
                hours_to_overflow: None,
                assigned_truck: None,
                actions: Vec::new(),
                created_at: now,
            })
        })
        .collect()
}

/// Runs both generators over the store's current state and concatenates
/// their results.
///
/// # Errors
///
/// Returns [`AlertError::Store`] if wards, reports, or trucks cannot be
/// read, or a truck claim cannot be written.
pub async fn generate_alerts(
    store: &dyn DocumentStore,
    locks: &DocLocks,
    now: DateTime<Utc>,
) -> Result<Vec<Alert>, AlertError> {
    let wards: Vec<Ward> = typed::all(store, collections::WARDS).await?;
    let reports: Vec<WasteReport> = typed::all(store, collections::REPORTS).await?;

    let mut alerts = overflow_alerts(store, locks, &wards, &reports, now).await?;
    alerts.extend(illegal_dumping_alerts(&wards, &reports, now));

    log::info!("Generated {} alerts across {} wards", alerts.len(), wards.len());
    Ok(alerts)
}
