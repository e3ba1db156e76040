//! Daily stale-report sweep.

use chrono::Duration;
use futures::StreamExt;
use waste_grid_store::{collections, typed};
use waste_grid_store_models::WasteReport;
use waste_grid_waste_models::ReportStatus;

use crate::{JobContext, JobError, PassSummary, WORKER_POOL_SIZE};

/// Reports in a non-terminal state older than this are auto-closed.
pub const STALE_AFTER_DAYS: i64 = 30;

/// Note appended to the status history of an auto-closed report.
pub const STALE_SWEEP_NOTE: &str = "Auto-closed due to inactivity after 30 days";

/// Transitions stale non-terminal reports to `rejected`.
///
/// A transition, never a deletion: the report and its full history
/// remain on record, with the auto-close appended as one more history
/// entry.
///
/// # Errors
///
/// Returns [`JobError::Store`] only when the initial report read fails.
pub async fn run(ctx: &JobContext) -> Result<PassSummary, JobError> {
    let reports: Vec<WasteReport> = typed::all(ctx.store.as_ref(), collections::REPORTS).await?;
    let cutoff = ctx.now - Duration::days(STALE_AFTER_DAYS);

    let mut summary = PassSummary::default();
    let stale: Vec<WasteReport> = reports
        .into_iter()
        .filter(|r| r.status.is_open() && r.reported_at < cutoff)
        .collect();

    let mut results = futures::stream::iter(stale.into_iter().map(|report| {
        let ctx = ctx.clone();
        async move { (report.id.clone(), reject_stale(&ctx, &report.id).await) }
    }))
    .buffer_unordered(WORKER_POOL_SIZE);

    while let Some((report_id, result)) = results.next().await {
        match result {
            Ok(true) => summary.updated += 1,
            Ok(false) => summary.skipped += 1,
            Err(e) => {
                summary.failed += 1;
                log::error!("Stale sweep failed for report {report_id}: {e}");
            }
        }
    }

    log::info!("Stale sweep: {} reports auto-closed", summary.updated);
    Ok(summary)
}

/// Re-checks and rejects one report under its document lock.
///
/// Returns `false` when the report was resolved or removed between the
/// scan and this unit.
async fn reject_stale(ctx: &JobContext, report_id: &str) -> Result<bool, JobError> {
    let _guard = ctx.locks.acquire(collections::REPORTS, report_id).await;

    let Some(mut report) =
        typed::by_id::<WasteReport>(ctx.store.as_ref(), collections::REPORTS, report_id).await?
    else {
        return Ok(false);
    };
    if !report.status.is_open() {
        return Ok(false);
    }

    report.push_status(
        ReportStatus::Rejected,
        ctx.now,
        None,
        Some(STALE_SWEEP_NOTE.to_string()),
    );
    typed::replace(ctx.store.as_ref(), collections::REPORTS, report_id, &report).await?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Utc;
    use waste_grid_store::{DocLocks, MemoryStore};
    use waste_grid_store_models::{Classification, GeoPoint, Reporter, ReporterKind};

    use super::*;

    fn report(id: &str, age_days: i64, status: ReportStatus) -> WasteReport {
        let reported_at = Utc::now() - Duration::days(age_days);
        let mut report = WasteReport::new(
            id.to_string(),
            GeoPoint::new(78.12, 9.93),
            5,
            Classification::unclassified(),
            Reporter {
                user_id: None,
                kind: ReporterKind::Citizen,
                anonymous: false,
            },
            reported_at,
        );
        if status != ReportStatus::Reported {
            report.push_status(status, reported_at, None, None);
        }
        report
    }

    #[tokio::test]
    async fn sweeps_only_stale_open_reports() {
        let store = Arc::new(MemoryStore::new());
        let locks = Arc::new(DocLocks::new());

        typed::insert(store.as_ref(), collections::REPORTS, &report("WR-stale", 31, ReportStatus::Reported))
            .await
            .unwrap();
        typed::insert(store.as_ref(), collections::REPORTS, &report("WR-fresh", 29, ReportStatus::Reported))
            .await
            .unwrap();
        typed::insert(store.as_ref(), collections::REPORTS, &report("WR-done", 40, ReportStatus::Resolved))
            .await
            .unwrap();

        let ctx = JobContext::new(store.clone(), locks);
        let summary = run(&ctx).await.unwrap();
        assert_eq!(summary.updated, 1);

        let stale: WasteReport = typed::by_id(store.as_ref(), collections::REPORTS, "WR-stale")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stale.status, ReportStatus::Rejected);
        let last = stale.status_history.last().unwrap();
        assert_eq!(last.status, ReportStatus::Rejected);
        assert_eq!(last.notes.as_deref(), Some(STALE_SWEEP_NOTE));
        // Transition, not deletion: the original entry is still first.
        assert_eq!(stale.status_history.first().unwrap().status, ReportStatus::Reported);

        let fresh: WasteReport = typed::by_id(store.as_ref(), collections::REPORTS, "WR-fresh")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fresh.status, ReportStatus::Reported);
        assert_eq!(fresh.status_history.len(), 1);

        let done: WasteReport = typed::by_id(store.as_ref(), collections::REPORTS, "WR-done")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(done.status, ReportStatus::Resolved);
    }

    #[tokio::test]
    async fn assigned_stale_reports_are_swept_too() {
        let store = Arc::new(MemoryStore::new());
        let locks = Arc::new(DocLocks::new());
        typed::insert(
            store.as_ref(),
            collections::REPORTS,
            &report("WR-assigned", 45, ReportStatus::Assigned),
        )
        .await
        .unwrap();

        let ctx = JobContext::new(store.clone(), locks);
        let summary = run(&ctx).await.unwrap();
        assert_eq!(summary.updated, 1);
    }
}
