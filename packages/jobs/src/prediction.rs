//! Six-hourly overflow-prediction pass.

use futures::StreamExt;
use waste_grid_ai::OverflowPredictor;
use waste_grid_prediction::{
    BUSY_WARD_THRESHOLD, MIN_WINDOW_REPORTS, PREDICTION_WINDOW_DAYS, build_request,
    risk_from_response,
};
use waste_grid_store::{collections, typed};
use waste_grid_store_models::{Ward, WasteReport};

use crate::{JobContext, JobError, PassSummary, WORKER_POOL_SIZE};

/// Requests AI predictions for busy wards and persists the results.
///
/// Only wards whose active-report total exceeds
/// [`BUSY_WARD_THRESHOLD`], with more than [`MIN_WINDOW_REPORTS`]
/// reports in the 7-day window, are predicted; everything else is
/// skipped. A failed service call is logged and skipped — the ward's
/// prior persisted risk state stays untouched, a stale-but-honest
/// prediction being preferable to a fabricated fresh one.
///
/// # Errors
///
/// Returns [`JobError::Store`] only when the initial ward/report reads
/// fail.
pub async fn run(ctx: &JobContext, predictor: &dyn OverflowPredictor) -> Result<PassSummary, JobError> {
    let wards: Vec<Ward> = typed::all(ctx.store.as_ref(), collections::WARDS).await?;
    let reports: Vec<WasteReport> = typed::all(ctx.store.as_ref(), collections::REPORTS).await?;

    let window_start = ctx.now - chrono::Duration::days(PREDICTION_WINDOW_DAYS);

    let mut summary = PassSummary::default();
    let mut units = Vec::new();
    for ward in wards {
        if ward.active_reports.total <= BUSY_WARD_THRESHOLD {
            summary.skipped += 1;
            continue;
        }
        let window_count = reports
            .iter()
            .filter(|r| {
                r.ward_number == ward.ward_number
                    && r.reported_at >= window_start
                    && r.reported_at <= ctx.now
            })
            .count();
        if window_count <= MIN_WINDOW_REPORTS {
            summary.skipped += 1;
            continue;
        }
        units.push(ward);
    }

    let mut results = futures::stream::iter(units.into_iter().map(|ward| {
        let request = build_request(&ward, &reports, ctx.now);
        async move {
            let outcome = predictor.predict(&request).await;
            (ward, outcome)
        }
    }))
    .buffer_unordered(WORKER_POOL_SIZE);

    while let Some((ward, outcome)) = results.next().await {
        match outcome {
            Ok(response) => {
                match persist(ctx, &ward.id, risk_from_response(&response, ctx.now)).await {
                    Ok(()) => summary.updated += 1,
                    Err(e) => {
                        summary.failed += 1;
                        log::error!(
                            "Persisting prediction failed for ward {}: {e}",
                            ward.ward_number
                        );
                    }
                }
            }
            Err(e) => {
                summary.failed += 1;
                log::error!("AI prediction failed for ward {}: {e}", ward.ward_number);
            }
        }
    }

    log::info!(
        "Overflow prediction pass: {} wards updated, {} skipped, {} failed",
        summary.updated,
        summary.skipped,
        summary.failed
    );
    Ok(summary)
}

async fn persist(
    ctx: &JobContext,
    ward_id: &str,
    risk: waste_grid_store_models::OverflowRisk,
) -> Result<(), JobError> {
    let _guard = ctx.locks.acquire(collections::WARDS, ward_id).await;

    let Some(mut ward) =
        typed::by_id::<Ward>(ctx.store.as_ref(), collections::WARDS, ward_id).await?
    else {
        return Ok(());
    };
    ward.overflow_risk = risk;
    typed::replace(ctx.store.as_ref(), collections::WARDS, ward_id, &ward).await?;
    Ok(())
}
