#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Derived per-ward and per-user scores.
//!
//! Pure, deterministic computations over report windows and user
//! counters: the ward cleanliness index, citizen participation score,
//! officer efficiency, and the recomputed active-report counters. All
//! functions here are side-effect free; the scheduler owns reading
//! inputs and persisting outputs.

pub mod cleanliness;
pub mod counters;
pub mod participation;

pub use cleanliness::{
    CLEANLINESS_WINDOW_DAYS, CleanlinessOutcome, apply_cleanliness, calculate_cleanliness,
};
pub use counters::{performance_from_reports, recount_active_reports};
pub use participation::{officer_efficiency, participation_score};

/// Rounds a score to one decimal place.
#[must_use]
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
