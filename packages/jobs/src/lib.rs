#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Recurring background jobs.
//!
//! The scheduler drives the derived-state recomputations on fixed,
//! independent intervals: cleanliness (daily), overflow prediction
//! (6-hourly, busy wards only), participation and efficiency scoring
//! (daily), the stale-report sweep (daily), and the read-only daily
//! summary. Jobs are fault-isolated twice over — one entity's failure
//! never aborts the rest of its batch, and one job's failure never
//! aborts another job or the process.
//!
//! Every pass works through an explicit [`JobContext`] built at pass
//! start; nothing is cached between passes, so a pass always sees the
//! store's current state.

pub mod cleanliness;
pub mod prediction;
pub mod scheduler;
pub mod summary;
pub mod sweep;
pub mod users;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;
use waste_grid_store::{DocLocks, DocumentStore, StoreError};

pub use scheduler::{Schedule, Scheduler};
pub use summary::DailySummary;

/// Upper bound on concurrent per-entity work within one pass.
///
/// Entities are independent, so passes fan out; the bound keeps a large
/// municipality from turning one pass into a thundering herd against
/// the store.
pub const WORKER_POOL_SIZE: usize = 8;

/// Errors from job passes.
///
/// Per-entity failures are logged and absorbed inside each pass; a
/// `JobError` means the pass could not run at all (e.g. the initial
/// collection read failed).
#[derive(Debug, Error)]
pub enum JobError {
    /// Store access failed before any per-entity work started.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Everything one pass needs: the store, the lock registry, and the
/// pass's single notion of "now".
///
/// Built fresh per pass and dropped afterwards.
#[derive(Clone)]
pub struct JobContext {
    /// Document store handle.
    pub store: Arc<dyn DocumentStore>,
    /// Per-document lock registry shared across all jobs.
    pub locks: Arc<DocLocks>,
    /// The pass's timestamp; every derived value in one pass uses it.
    pub now: DateTime<Utc>,
}

impl JobContext {
    /// Builds a context for a pass starting now.
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>, locks: Arc<DocLocks>) -> Self {
        Self {
            store,
            locks,
            now: Utc::now(),
        }
    }

    /// Builds a context with a fixed timestamp (tests, replays).
    #[must_use]
    pub const fn at(store: Arc<dyn DocumentStore>, locks: Arc<DocLocks>, now: DateTime<Utc>) -> Self {
        Self { store, locks, now }
    }
}

/// Outcome counts for one batch pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PassSummary {
    /// Entities recomputed and written.
    pub updated: usize,
    /// Entities skipped by a filter (not busy, nothing to do).
    pub skipped: usize,
    /// Entities whose recomputation failed and was logged.
    pub failed: usize,
}
