//! The `policies` collection document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use waste_grid_waste_models::{BudgetPriority, PolicyStatus, SeverityClass, WasteType};

/// A generated policy recommendation for a ward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyRecommendationDoc {
    /// Document ID, e.g. `POL-9f2c41d8a3b04e71`.
    pub id: String,
    /// Target ward number.
    pub ward_number: u32,
    /// The incident pattern that triggered the recommendation.
    pub context: PolicyContext,
    /// What is being recommended.
    pub recommendations: RecommendationPayload,
    /// Derived priority, 1-10.
    pub priority: u8,
    /// Current lifecycle state.
    pub status: PolicyStatus,
    /// Append-only state transition log.
    pub status_history: Vec<PolicyStatusEntry>,
    /// Review decision, once reviewed.
    pub review: Option<Review>,
    /// Implementation tracking, once approved for implementation.
    pub implementation: Option<Implementation>,
    /// When the recommendation was generated.
    pub created_at: DateTime<Utc>,
}

impl PolicyRecommendationDoc {
    /// Appends a status transition, keeping `status` equal to the last
    /// history entry.
    pub fn push_status(
        &mut self,
        status: PolicyStatus,
        timestamp: DateTime<Utc>,
        actor: Option<String>,
        notes: Option<String>,
    ) {
        self.status_history.push(PolicyStatusEntry {
            status,
            timestamp,
            actor,
            notes,
        });
        self.status = status;
    }
}

/// One entry in a policy recommendation's status history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyStatusEntry {
    /// State entered.
    pub status: PolicyStatus,
    /// When the transition happened.
    pub timestamp: DateTime<Utc>,
    /// User ID of whoever made the transition, if any.
    pub actor: Option<String>,
    /// Free-text notes.
    pub notes: Option<String>,
}

/// The aggregated incident pattern a recommendation was generated from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyContext {
    /// Incidents in the lookback window.
    pub incident_count: u32,
    /// Human-readable window, e.g. `Last 30 days`.
    pub timeframe: String,
    /// Severity class of the pattern.
    pub severity: SeverityClass,
    /// Distinct waste types observed.
    pub waste_types: Vec<WasteType>,
    /// Share of incidents flagged as illegal dumping, 0-100.
    pub illegal_dumping_rate: f64,
}

/// The recommendation payload: what to build, enforce, and communicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationPayload {
    /// Infrastructure measures (CCTV, bins, processing units).
    pub infrastructure: Vec<InfrastructureItem>,
    /// Enforcement measures (patrols, fines).
    pub enforcement: Vec<String>,
    /// Awareness measures (campaigns, training).
    pub awareness: Vec<String>,
    /// How urgently this should be funded.
    pub budget_priority: BudgetPriority,
    /// Expected outcomes.
    pub estimated_impact: ImpactEstimate,
}

/// One infrastructure recommendation line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfrastructureItem {
    /// What to install, e.g. `CCTV surveillance network`.
    pub kind: String,
    /// Budget estimate in rupees.
    pub estimated_cost: u64,
    /// Deployment timeline, e.g. `2 months`.
    pub timeline: String,
    /// Expected impact, e.g. `-78% illegal dumping`.
    pub expected_impact: String,
}

/// Expected outcomes of a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactEstimate {
    /// Expected reduction in complaints, percent.
    pub complaint_reduction: f64,
    /// Expected return on investment, percent.
    pub roi: f64,
    /// Days to implement.
    pub days_to_implement: u32,
}

/// A supervisor/admin review decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// Reviewer's user ID.
    pub reviewed_by: String,
    /// When the review happened.
    pub reviewed_at: DateTime<Utc>,
    /// Decision: approved, rejected, or needs-revision.
    pub decision: ReviewDecision,
    /// Reviewer feedback.
    pub feedback: Option<String>,
}

/// Outcome of a policy review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReviewDecision {
    /// Accepted; eligible for implementation.
    Approved,
    /// Declined.
    Rejected,
    /// Sent back for revision.
    NeedsRevision,
}

/// Implementation tracking for an approved recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Implementation {
    /// Approving admin's user ID.
    pub approved_by: String,
    /// When implementation started.
    pub start_date: DateTime<Utc>,
    /// Target completion, if set.
    pub expected_completion: Option<DateTime<Utc>>,
    /// Actual completion, stamped when progress reaches 100.
    pub actual_completion: Option<DateTime<Utc>>,
    /// Completion percentage, 0-100.
    pub progress: u8,
    /// Completed milestones.
    pub milestones: Vec<Milestone>,
}

/// One completed implementation milestone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    /// Milestone description.
    pub milestone: String,
    /// When it was completed.
    pub completed_at: DateTime<Utc>,
}
