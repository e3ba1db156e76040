//! Threshold rules and recommendation templates.

use strum_macros::{AsRefStr, Display};
use waste_grid_store_models::{ImpactEstimate, InfrastructureItem};
use waste_grid_waste_models::{BudgetPriority, SeverityClass};

use crate::metrics::WardPolicyMetrics;

/// Illegal-dumping rate (percent) above which surveillance is
/// recommended.
pub const ILLEGAL_DUMPING_RATE_THRESHOLD: f64 = 20.0;

/// Overflow probability above which a collection-frequency increase is
/// recommended.
pub const OVERFLOW_RISK_THRESHOLD: f64 = 60.0;

/// Cleanliness index below which community engagement is recommended.
pub const CLEANLINESS_THRESHOLD: f64 = 70.0;

/// Incident count above which an organic-processing unit is
/// recommended, when no other rule already covers the ward.
pub const INCIDENT_COUNT_THRESHOLD: u32 = 20;

/// The kinds of recommendation the rules can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum RecommendationKind {
    /// AI-assisted CCTV network against illegal dumping.
    SurveillanceNetwork,
    /// More frequent bin collection plus mobile compactors.
    CollectionFrequencyIncrease,
    /// SHG-based cleanup and awareness programme.
    CommunityEngagement,
    /// Ward-level organic waste processing unit.
    OrganicProcessingUnit,
}

/// Fixed template for one recommendation kind.
///
/// Budget, timeline, and impact are domain constants maintained with the
/// municipal engineering cell, not computed values.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationTemplate {
    /// Headline, e.g. `Install CCTV surveillance network`.
    pub title: &'static str,
    /// Infrastructure line item.
    pub infrastructure: InfrastructureItem,
    /// Enforcement measures.
    pub enforcement: Vec<String>,
    /// Awareness measures.
    pub awareness: Vec<String>,
    /// Funding urgency.
    pub budget_priority: BudgetPriority,
    /// Expected outcomes.
    pub estimated_impact: ImpactEstimate,
}

impl RecommendationKind {
    /// Severity class this rule assigns when it fires.
    #[must_use]
    pub const fn severity_class(self) -> SeverityClass {
        match self {
            Self::SurveillanceNetwork => SeverityClass::Critical,
            Self::CollectionFrequencyIncrease => SeverityClass::High,
            Self::CommunityEngagement | Self::OrganicProcessingUnit => SeverityClass::Medium,
        }
    }

    /// The fixed template for this kind.
    #[must_use]
    pub fn template(self) -> RecommendationTemplate {
        match self {
            Self::SurveillanceNetwork => RecommendationTemplate {
                title: "Install CCTV surveillance network",
                infrastructure: InfrastructureItem {
                    kind: "AI-assisted CCTV network at dumping hotspots".to_string(),
                    estimated_cost: 800_000,
                    timeline: "2 months".to_string(),
                    expected_impact: "-78% illegal dumping".to_string(),
                },
                enforcement: vec![
                    "Night patrol at flagged hotspots".to_string(),
                    "Fine notices from camera evidence".to_string(),
                ],
                awareness: vec!["Signage at monitored locations".to_string()],
                budget_priority: BudgetPriority::Urgent,
                estimated_impact: ImpactEstimate {
                    complaint_reduction: 78.0,
                    roi: 40.0,
                    days_to_implement: 60,
                },
            },
            Self::CollectionFrequencyIncrease => RecommendationTemplate {
                title: "Increase bin collection frequency",
                infrastructure: InfrastructureItem {
                    kind: "Mobile compactor units and added collection shifts".to_string(),
                    estimated_cost: 300_000,
                    timeline: "3 weeks".to_string(),
                    expected_impact: "+45% collection capacity".to_string(),
                },
                enforcement: Vec::new(),
                awareness: vec!["Publish the revised collection schedule".to_string()],
                budget_priority: BudgetPriority::High,
                estimated_impact: ImpactEstimate {
                    complaint_reduction: 45.0,
                    roi: 25.0,
                    days_to_implement: 21,
                },
            },
            Self::CommunityEngagement => RecommendationTemplate {
                title: "Community cleanliness initiative",
                infrastructure: InfrastructureItem {
                    kind: "SHG-run street cleaning equipment".to_string(),
                    estimated_cost: 250_000,
                    timeline: "3-4 months".to_string(),
                    expected_impact: "+20% community engagement".to_string(),
                },
                enforcement: Vec::new(),
                awareness: vec![
                    "Door-to-door segregation drive".to_string(),
                    "Ward cleanliness leaderboard outreach".to_string(),
                ],
                budget_priority: BudgetPriority::Medium,
                estimated_impact: ImpactEstimate {
                    complaint_reduction: 20.0,
                    roi: 15.0,
                    days_to_implement: 100,
                },
            },
            Self::OrganicProcessingUnit => RecommendationTemplate {
                title: "Ward-level organic processing unit",
                infrastructure: InfrastructureItem {
                    kind: "Composting and bio-gas unit".to_string(),
                    estimated_cost: 520_000,
                    timeline: "4 months".to_string(),
                    expected_impact: "-34% landfill load".to_string(),
                },
                enforcement: Vec::new(),
                awareness: vec!["Household composting training for SHG members".to_string()],
                budget_priority: BudgetPriority::Medium,
                estimated_impact: ImpactEstimate {
                    complaint_reduction: 34.0,
                    roi: 30.0,
                    days_to_implement: 120,
                },
            },
        }
    }
}

/// One rule that fired for a ward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FiredRule {
    /// What to recommend.
    pub kind: RecommendationKind,
    /// Severity class the rule assigns.
    pub severity: SeverityClass,
}

/// Evaluates all rules against a ward's metrics.
///
/// Rules are independent; any subset may fire. The organic-processing
/// rule is the exception: it is a fallback for high-volume wards that no
/// targeted rule already covers.
#[must_use]
pub fn evaluate_rules(metrics: &WardPolicyMetrics) -> Vec<FiredRule> {
    let mut fired = Vec::new();

    if metrics.illegal_dumping_rate > ILLEGAL_DUMPING_RATE_THRESHOLD {
        fired.push(FiredRule {
            kind: RecommendationKind::SurveillanceNetwork,
            severity: RecommendationKind::SurveillanceNetwork.severity_class(),
        });
    }

    if metrics.overflow_risk > OVERFLOW_RISK_THRESHOLD {
        fired.push(FiredRule {
            kind: RecommendationKind::CollectionFrequencyIncrease,
            severity: RecommendationKind::CollectionFrequencyIncrease.severity_class(),
        });
    }

    if metrics.cleanliness_index < CLEANLINESS_THRESHOLD {
        fired.push(FiredRule {
            kind: RecommendationKind::CommunityEngagement,
            severity: RecommendationKind::CommunityEngagement.severity_class(),
        });
    }

    if fired.is_empty() && metrics.incident_count > INCIDENT_COUNT_THRESHOLD {
        fired.push(FiredRule {
            kind: RecommendationKind::OrganicProcessingUnit,
            severity: RecommendationKind::OrganicProcessingUnit.severity_class(),
        });
    }

    fired
}
