//! Policy recommendation lifecycle operations.
//!
//! generated -> under-review -> approved/rejected -> implemented ->
//! monitored. Review and implementation are supervisor/admin actions
//! arriving through the external API layer; progress updates come from
//! field staff.

use chrono::{DateTime, Utc};
use waste_grid_store_models::{
    Implementation, Milestone, PolicyRecommendationDoc, Review, ReviewDecision,
};
use waste_grid_waste_models::PolicyStatus;

use crate::PolicyError;

/// Records a review decision.
///
/// Approved/rejected are terminal for the review phase; needs-revision
/// sends the document to under-review for regeneration.
pub fn review(
    doc: &mut PolicyRecommendationDoc,
    decision: ReviewDecision,
    reviewer: &str,
    feedback: Option<String>,
    now: DateTime<Utc>,
) {
    let status = match decision {
        ReviewDecision::Approved => PolicyStatus::Approved,
        ReviewDecision::Rejected => PolicyStatus::Rejected,
        ReviewDecision::NeedsRevision => PolicyStatus::UnderReview,
    };

    doc.review = Some(Review {
        reviewed_by: reviewer.to_string(),
        reviewed_at: now,
        decision,
        feedback: feedback.clone(),
    });
    doc.push_status(status, now, Some(reviewer.to_string()), feedback);
}

/// Moves an approved recommendation into implementation.
///
/// # Errors
///
/// Returns [`PolicyError::InvalidTransition`] unless the document is
/// currently approved.
pub fn implement(
    doc: &mut PolicyRecommendationDoc,
    approver: &str,
    expected_completion: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Result<(), PolicyError> {
    if doc.status != PolicyStatus::Approved {
        return Err(PolicyError::InvalidTransition {
            operation: "implement",
            status: doc.status,
        });
    }

    doc.implementation = Some(Implementation {
        approved_by: approver.to_string(),
        start_date: now,
        expected_completion,
        actual_completion: None,
        progress: 0,
        milestones: Vec::new(),
    });
    doc.push_status(
        PolicyStatus::Implemented,
        now,
        Some(approver.to_string()),
        Some("Approved for implementation".to_string()),
    );
    Ok(())
}

/// Updates implementation progress, optionally recording a milestone.
///
/// Progress is clamped to 0-100; reaching 100 stamps the completion date
/// and moves the document to monitored.
///
/// # Errors
///
/// Returns [`PolicyError::InvalidTransition`] unless the document is in
/// implementation.
pub fn update_progress(
    doc: &mut PolicyRecommendationDoc,
    progress: u8,
    milestone: Option<String>,
    now: DateTime<Utc>,
) -> Result<(), PolicyError> {
    if doc.status != PolicyStatus::Implemented {
        return Err(PolicyError::InvalidTransition {
            operation: "update progress on",
            status: doc.status,
        });
    }

    let Some(implementation) = doc.implementation.as_mut() else {
        return Err(PolicyError::InvalidTransition {
            operation: "update progress on",
            status: doc.status,
        });
    };

    implementation.progress = progress.min(100);
    if let Some(milestone) = milestone {
        implementation.milestones.push(Milestone {
            milestone,
            completed_at: now,
        });
    }

    if implementation.progress == 100 {
        implementation.actual_completion = Some(now);
        doc.push_status(
            PolicyStatus::Monitored,
            now,
            None,
            Some("Implementation complete".to_string()),
        );
    }
    Ok(())
}
