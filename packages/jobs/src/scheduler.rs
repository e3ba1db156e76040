//! Fixed-interval job scheduling.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use waste_grid_ai::OverflowPredictor;
use waste_grid_store::{DocLocks, DocumentStore};

use crate::{JobContext, cleanliness, prediction, summary, sweep, users};

const DAY: Duration = Duration::from_secs(24 * 60 * 60);
const SIX_HOURS: Duration = Duration::from_secs(6 * 60 * 60);

/// Per-job intervals.
///
/// Jobs are independently scheduled and tolerate overlap; a long
/// cleanliness pass running into an overflow pass is fine because their
/// writes to shared ward documents serialize through the lock registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    /// Cleanliness recompute interval.
    pub cleanliness: Duration,
    /// Overflow prediction interval.
    pub overflow: Duration,
    /// Participation scoring interval.
    pub participation: Duration,
    /// Officer efficiency interval.
    pub efficiency: Duration,
    /// Stale-report sweep interval.
    pub sweep: Duration,
    /// Daily summary interval.
    pub summary: Duration,
}

impl Default for Schedule {
    fn default() -> Self {
        Self {
            cleanliness: DAY,
            overflow: SIX_HOURS,
            participation: DAY,
            efficiency: DAY,
            sweep: DAY,
            summary: DAY,
        }
    }
}

impl Schedule {
    /// Builds a schedule from environment overrides.
    ///
    /// Each `WASTE_GRID_<JOB>_INTERVAL_SECS` variable overrides one
    /// interval; unset or unparseable values keep the default. Demo
    /// deployments use this to compress a day into minutes.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cleanliness: env_interval("WASTE_GRID_CLEANLINESS_INTERVAL_SECS", defaults.cleanliness),
            overflow: env_interval("WASTE_GRID_OVERFLOW_INTERVAL_SECS", defaults.overflow),
            participation: env_interval(
                "WASTE_GRID_PARTICIPATION_INTERVAL_SECS",
                defaults.participation,
            ),
            efficiency: env_interval("WASTE_GRID_EFFICIENCY_INTERVAL_SECS", defaults.efficiency),
            sweep: env_interval("WASTE_GRID_SWEEP_INTERVAL_SECS", defaults.sweep),
            summary: env_interval("WASTE_GRID_SUMMARY_INTERVAL_SECS", defaults.summary),
        }
    }
}

fn env_interval(var: &str, default: Duration) -> Duration {
    std::env::var(var)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .map_or(default, Duration::from_secs)
}

/// Owns the recurring jobs.
pub struct Scheduler {
    store: Arc<dyn DocumentStore>,
    locks: Arc<DocLocks>,
    predictor: Arc<dyn OverflowPredictor>,
    schedule: Schedule,
}

impl Scheduler {
    /// Creates a scheduler with the default schedule.
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>, predictor: Arc<dyn OverflowPredictor>) -> Self {
        Self {
            store,
            locks: Arc::new(DocLocks::new()),
            predictor,
            schedule: Schedule::default(),
        }
    }

    /// Overrides the schedule.
    #[must_use]
    pub const fn with_schedule(mut self, schedule: Schedule) -> Self {
        self.schedule = schedule;
        self
    }

    /// Spawns every job onto the current runtime and returns their
    /// handles.
    ///
    /// Each job runs its first pass immediately, then on its interval.
    /// A pass failure is logged and the job keeps its schedule; no
    /// failure propagates across jobs or kills the process.
    #[must_use]
    pub fn spawn(&self) -> Vec<JoinHandle<()>> {
        let mut handles = Vec::with_capacity(6);

        handles.push(self.spawn_job("cleanliness", self.schedule.cleanliness, |ctx| async move {
            cleanliness::run(&ctx).await.map(|_| ())
        }));

        let predictor = Arc::clone(&self.predictor);
        handles.push(self.spawn_job("overflow-prediction", self.schedule.overflow, move |ctx| {
            let predictor = Arc::clone(&predictor);
            async move { prediction::run(&ctx, predictor.as_ref()).await.map(|_| ()) }
        }));

        handles.push(self.spawn_job(
            "participation",
            self.schedule.participation,
            |ctx| async move { users::run_participation(&ctx).await.map(|_| ()) },
        ));

        handles.push(self.spawn_job("efficiency", self.schedule.efficiency, |ctx| async move {
            users::run_efficiency(&ctx).await.map(|_| ())
        }));

        handles.push(self.spawn_job("stale-sweep", self.schedule.sweep, |ctx| async move {
            sweep::run(&ctx).await.map(|_| ())
        }));

        handles.push(self.spawn_job("daily-summary", self.schedule.summary, |ctx| async move {
            summary::run(&ctx).await.map(|_| ())
        }));

        handles
    }

    fn spawn_job<F, Fut>(&self, name: &'static str, period: Duration, job: F) -> JoinHandle<()>
    where
        F: Fn(JobContext) -> Fut + Send + 'static,
        Fut: Future<Output = Result<(), crate::JobError>> + Send + 'static,
    {
        let store = Arc::clone(&self.store);
        let locks = Arc::clone(&self.locks);

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                log::debug!("Running job: {name}");
                let ctx = JobContext::new(Arc::clone(&store), Arc::clone(&locks));
                if let Err(e) = job(ctx).await {
                    log::error!("Job {name} failed: {e}");
                }
            }
        })
    }
}
