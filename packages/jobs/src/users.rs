//! Daily participation and efficiency scoring passes.

use futures::StreamExt;
use waste_grid_scoring::{officer_efficiency, participation_score};
use waste_grid_store::{collections, typed};
use waste_grid_store_models::User;
use waste_grid_waste_models::UserRole;

use crate::{JobContext, JobError, PassSummary, WORKER_POOL_SIZE};

/// Recomputes participation scores for active citizens.
///
/// Citizens who have never submitted a report are skipped; their score
/// stays at the zero default.
///
/// # Errors
///
/// Returns [`JobError::Store`] only when the initial user read fails.
pub async fn run_participation(ctx: &JobContext) -> Result<PassSummary, JobError> {
    run_scoring_pass(ctx, "Participation", |user| {
        if user.role == UserRole::Citizen && user.citizen_metrics.reports_submitted > 0 {
            Some(update_participation)
        } else {
            None
        }
    })
    .await
}

/// Recomputes efficiency ratings for officers with assigned work.
///
/// # Errors
///
/// Returns [`JobError::Store`] only when the initial user read fails.
pub async fn run_efficiency(ctx: &JobContext) -> Result<PassSummary, JobError> {
    run_scoring_pass(ctx, "Efficiency", |user| {
        if user.role == UserRole::WardOfficer && user.officer_metrics.tasks_assigned > 0 {
            Some(update_efficiency)
        } else {
            None
        }
    })
    .await
}

fn update_participation(user: &mut User) {
    user.citizen_metrics.participation_score = participation_score(
        user.citizen_metrics.reports_submitted,
        user.citizen_metrics.reports_verified,
    );
}

fn update_efficiency(user: &mut User) {
    user.officer_metrics.efficiency = officer_efficiency(
        user.officer_metrics.tasks_assigned,
        user.officer_metrics.tasks_completed,
    );
}

async fn run_scoring_pass(
    ctx: &JobContext,
    label: &str,
    select: impl Fn(&User) -> Option<fn(&mut User)>,
) -> Result<PassSummary, JobError> {
    let users: Vec<User> = typed::all(ctx.store.as_ref(), collections::USERS).await?;

    let mut summary = PassSummary::default();
    let mut units = Vec::new();
    for user in users {
        match select(&user) {
            Some(update) => units.push((user, update)),
            None => summary.skipped += 1,
        }
    }

    let mut results = futures::stream::iter(units.into_iter().map(|(user, update)| {
        let ctx = ctx.clone();
        async move { (user.id.clone(), recompute_user(&ctx, &user.id, update).await) }
    }))
    .buffer_unordered(WORKER_POOL_SIZE);

    while let Some((user_id, result)) = results.next().await {
        match result {
            Ok(()) => summary.updated += 1,
            Err(e) => {
                summary.failed += 1;
                log::error!("{label} update failed for user {user_id}: {e}");
            }
        }
    }

    log::info!(
        "{label} pass: {} users updated, {} skipped, {} failed",
        summary.updated,
        summary.skipped,
        summary.failed
    );
    Ok(summary)
}

/// Read-modify-write for one user, serialized on the user document.
///
/// Counters are re-read under the lock so a report submitted mid-pass is
/// reflected rather than overwritten.
async fn recompute_user(
    ctx: &JobContext,
    user_id: &str,
    update: fn(&mut User),
) -> Result<(), JobError> {
    let _guard = ctx.locks.acquire(collections::USERS, user_id).await;

    let Some(mut user) =
        typed::by_id::<User>(ctx.store.as_ref(), collections::USERS, user_id).await?
    else {
        return Ok(());
    };
    update(&mut user);
    typed::replace(ctx.store.as_ref(), collections::USERS, user_id, &user).await?;
    Ok(())
}
