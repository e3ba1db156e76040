//! Daily cleanliness recompute pass.

use futures::StreamExt;
use waste_grid_scoring::{
    apply_cleanliness, calculate_cleanliness, performance_from_reports, recount_active_reports,
};
use waste_grid_store::{collections, typed};
use waste_grid_store_models::{Ward, WasteReport};

use crate::{JobContext, JobError, PassSummary, WORKER_POOL_SIZE};

/// Recomputes every ward's cleanliness index, active-report counters,
/// and performance figures.
///
/// Each ward is an independent work unit processed through a bounded
/// pool. A ward's store failure is logged and skipped; the rest of the
/// batch continues.
///
/// # Errors
///
/// Returns [`JobError::Store`] only when the initial ward/report reads
/// fail.
pub async fn run(ctx: &JobContext) -> Result<PassSummary, JobError> {
    let wards: Vec<Ward> = typed::all(ctx.store.as_ref(), collections::WARDS).await?;
    let reports: Vec<WasteReport> = typed::all(ctx.store.as_ref(), collections::REPORTS).await?;

    let mut summary = PassSummary::default();
    let mut results = futures::stream::iter(wards.into_iter().map(|ward| {
        let ctx = ctx.clone();
        let ward_reports: Vec<WasteReport> = reports
            .iter()
            .filter(|r| r.ward_number == ward.ward_number)
            .cloned()
            .collect();
        async move { (ward.ward_number, recompute_ward(&ctx, &ward.id, &ward_reports).await) }
    }))
    .buffer_unordered(WORKER_POOL_SIZE);

    while let Some((ward_number, result)) = results.next().await {
        match result {
            Ok(()) => summary.updated += 1,
            Err(e) => {
                summary.failed += 1;
                log::error!("Cleanliness update failed for ward {ward_number}: {e}");
            }
        }
    }

    log::info!(
        "Cleanliness pass: {} wards updated, {} failed",
        summary.updated,
        summary.failed
    );
    Ok(summary)
}

/// Read-modify-write for one ward, serialized on the ward document.
async fn recompute_ward(
    ctx: &JobContext,
    ward_id: &str,
    ward_reports: &[WasteReport],
) -> Result<(), JobError> {
    let _guard = ctx.locks.acquire(collections::WARDS, ward_id).await;

    let Some(mut ward) =
        typed::by_id::<Ward>(ctx.store.as_ref(), collections::WARDS, ward_id).await?
    else {
        // Deleted between the scan and this unit; nothing to update.
        return Ok(());
    };

    let outcome = calculate_cleanliness(ward_reports, ctx.now);
    apply_cleanliness(&mut ward, outcome, ctx.now);
    ward.active_reports = recount_active_reports(ward_reports);
    ward.performance = performance_from_reports(ward_reports);

    typed::replace(ctx.store.as_ref(), collections::WARDS, ward_id, &ward).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{Duration, Utc};
    use waste_grid_store::{DocLocks, MemoryStore};
    use waste_grid_store_models::{Classification, GeoPoint, Reporter, ReporterKind};
    use waste_grid_waste_models::SeverityLevel;

    use super::*;

    fn seed_report(id: &str, ward: u32, severity: SeverityLevel, age_days: i64) -> WasteReport {
        WasteReport::new(
            id.to_string(),
            GeoPoint::new(78.12, 9.93),
            ward,
            Classification {
                severity,
                ..Classification::unclassified()
            },
            Reporter {
                user_id: None,
                kind: ReporterKind::Citizen,
                anonymous: false,
            },
            Utc::now() - Duration::days(age_days),
        )
    }

    #[tokio::test]
    async fn pass_updates_every_ward() {
        let store = Arc::new(MemoryStore::new());
        let locks = Arc::new(DocLocks::new());

        for number in 1..=3u32 {
            let ward = Ward::new(format!("ward-{number}"), number, format!("Ward {number}"));
            typed::insert(store.as_ref(), collections::WARDS, &ward)
                .await
                .unwrap();
        }
        typed::insert(
            store.as_ref(),
            collections::REPORTS,
            &seed_report("WR-1", 1, SeverityLevel::Critical, 2),
        )
        .await
        .unwrap();

        let ctx = JobContext::new(store.clone(), locks);
        let summary = run(&ctx).await.unwrap();
        assert_eq!(summary.updated, 3);
        assert_eq!(summary.failed, 0);

        // Ward 1 had a critical report: scored below the clean default,
        // with history and counters.
        let ward1: Ward = typed::by_id(store.as_ref(), collections::WARDS, "ward-1")
            .await
            .unwrap()
            .unwrap();
        assert!(ward1.cleanliness_index.current < 100.0);
        assert_eq!(ward1.cleanliness_index.history.len(), 1);
        assert_eq!(ward1.active_reports.total, 1);
        assert_eq!(ward1.active_reports.by_severity.critical, 1);

        // Wards without reports keep the clean default and no history.
        let ward2: Ward = typed::by_id(store.as_ref(), collections::WARDS, "ward-2")
            .await
            .unwrap()
            .unwrap();
        assert!((ward2.cleanliness_index.current - 100.0).abs() < f64::EPSILON);
        assert!(ward2.cleanliness_index.history.is_empty());
    }

    #[tokio::test]
    async fn pass_is_idempotent_for_same_timestamp() {
        let store = Arc::new(MemoryStore::new());
        let locks = Arc::new(DocLocks::new());
        let ward = Ward::new("ward-1".to_string(), 1, "Ward 1".to_string());
        typed::insert(store.as_ref(), collections::WARDS, &ward)
            .await
            .unwrap();
        typed::insert(
            store.as_ref(),
            collections::REPORTS,
            &seed_report("WR-1", 1, SeverityLevel::Moderate, 3),
        )
        .await
        .unwrap();

        let now = Utc::now();
        let ctx = JobContext::at(store.clone(), Arc::clone(&locks), now);
        run(&ctx).await.unwrap();
        let first: Ward = typed::by_id(store.as_ref(), collections::WARDS, "ward-1")
            .await
            .unwrap()
            .unwrap();

        let ctx = JobContext::at(store.clone(), locks, now);
        run(&ctx).await.unwrap();
        let second: Ward = typed::by_id(store.as_ref(), collections::WARDS, "ward-1")
            .await
            .unwrap()
            .unwrap();

        assert!(
            (first.cleanliness_index.current - second.cleanliness_index.current).abs()
                < f64::EPSILON
        );
        // Re-running appends history but derives the identical score.
        assert_eq!(second.cleanliness_index.history.len(), 2);
    }
}
