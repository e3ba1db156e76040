#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Policy recommendation engine.
//!
//! Threshold rules over aggregated ward metrics emit prioritized
//! infrastructure/enforcement/awareness recommendations. Rules are
//! independent — zero, one, or many may fire per ward — and every
//! recommendation's budget, timeline, and expected impact come from a
//! fixed per-kind template table, not from computation. A separate
//! weighted scorer derives the 1-10 priority.

pub mod engine;
pub mod lifecycle;
pub mod metrics;
pub mod rules;

use thiserror::Error;
use waste_grid_store::StoreError;

pub use engine::{generate_for_ward, priority_score, recommendation_doc};
pub use lifecycle::{implement, review, update_progress};
pub use metrics::{DEFAULT_LOOKBACK_DAYS, WardPolicyMetrics, aggregate_metrics};
pub use rules::{FiredRule, RecommendationKind, RecommendationTemplate, evaluate_rules};

/// Errors from policy operations.
#[derive(Debug, Error)]
pub enum PolicyError {
    /// Store access failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// No ward with the requested number exists.
    #[error("ward {ward_number} not found")]
    WardNotFound {
        /// The requested ward number.
        ward_number: u32,
    },

    /// The requested ward number is outside the municipal 1-100 range.
    #[error("invalid ward number {ward_number}: expected 1-100")]
    InvalidWardNumber {
        /// The rejected ward number.
        ward_number: u32,
    },

    /// No policy recommendation with the requested ID exists.
    #[error("policy recommendation {id} not found")]
    PolicyNotFound {
        /// The requested document ID.
        id: String,
    },

    /// The requested lifecycle transition is not allowed from the
    /// document's current status.
    #[error("cannot {operation} a policy in status {status}")]
    InvalidTransition {
        /// The attempted operation.
        operation: &'static str,
        /// The document's current status.
        status: waste_grid_waste_models::PolicyStatus,
    },
}
