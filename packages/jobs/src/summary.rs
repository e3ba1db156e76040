//! Daily summary report.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use waste_grid_store::{collections, typed};
use waste_grid_store_models::WasteReport;

use crate::{JobContext, JobError};

/// Yesterday's platform activity in three numbers.
///
/// Read-only: the pass mutates nothing. Delivery to administrators is an
/// external collaborator's job; this pass computes and logs the figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySummary {
    /// Start of the summarized day.
    pub day_start: DateTime<Utc>,
    /// Reports received during the day.
    pub reports_received: usize,
    /// Reports resolved during the day.
    pub reports_resolved: usize,
    /// Reports currently open (at computation time, not day end).
    pub active_reports: usize,
}

/// Computes the summary for the day before the context's `now`.
///
/// # Errors
///
/// Returns [`JobError::Store`] when the report read fails.
pub async fn run(ctx: &JobContext) -> Result<DailySummary, JobError> {
    let reports: Vec<WasteReport> = typed::all(ctx.store.as_ref(), collections::REPORTS).await?;

    let today_start = ctx
        .now
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .map_or(ctx.now, |t| t.and_utc());
    let yesterday_start = today_start - Duration::days(1);

    let reports_received = reports
        .iter()
        .filter(|r| r.reported_at >= yesterday_start && r.reported_at < today_start)
        .count();

    let reports_resolved = reports
        .iter()
        .filter_map(|r| r.resolution.as_ref())
        .filter(|res| res.resolved_at >= yesterday_start && res.resolved_at < today_start)
        .count();

    let active_reports = reports.iter().filter(|r| r.is_open()).count();

    let summary = DailySummary {
        day_start: yesterday_start,
        reports_received,
        reports_resolved,
        active_reports,
    };

    log::info!(
        "Daily summary for {}: {} received, {} resolved, {} active",
        yesterday_start.format("%Y-%m-%d"),
        summary.reports_received,
        summary.reports_resolved,
        summary.active_reports
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use waste_grid_store::{DocLocks, MemoryStore};
    use waste_grid_store_models::{
        Classification, GeoPoint, Reporter, ReporterKind, Resolution,
    };
    use waste_grid_waste_models::ReportStatus;

    use super::*;

    fn report(id: &str, reported_at: DateTime<Utc>) -> WasteReport {
        WasteReport::new(
            id.to_string(),
            GeoPoint::new(78.12, 9.93),
            1,
            Classification::unclassified(),
            Reporter {
                user_id: None,
                kind: ReporterKind::Citizen,
                anonymous: false,
            },
            reported_at,
        )
    }

    #[tokio::test]
    async fn summary_buckets_by_day() {
        let store = Arc::new(MemoryStore::new());
        let locks = Arc::new(DocLocks::new());

        let now = Utc::now();
        let today_start = now.date_naive().and_hms_opt(0, 0, 0).unwrap().and_utc();
        let yesterday_noon = today_start - Duration::hours(12);
        let two_days_ago = today_start - Duration::hours(36);

        // Received yesterday, still open.
        typed::insert(store.as_ref(), collections::REPORTS, &report("WR-1", yesterday_noon))
            .await
            .unwrap();

        // Received earlier, resolved yesterday.
        let mut resolved = report("WR-2", two_days_ago);
        resolved.resolution = Some(Resolution {
            resolved_at: yesterday_noon,
            resolved_by: None,
            collected_kg: Some(25.0),
            action_taken: None,
        });
        resolved.push_status(ReportStatus::Resolved, yesterday_noon, None, None);
        typed::insert(store.as_ref(), collections::REPORTS, &resolved)
            .await
            .unwrap();

        // Received today: outside yesterday's window.
        typed::insert(
            store.as_ref(),
            collections::REPORTS,
            &report("WR-3", today_start + Duration::hours(1)),
        )
        .await
        .unwrap();

        let ctx = JobContext::at(store, locks, now);
        let summary = run(&ctx).await.unwrap();

        assert_eq!(summary.reports_received, 1);
        assert_eq!(summary.reports_resolved, 1);
        assert_eq!(summary.active_reports, 2);
    }
}
