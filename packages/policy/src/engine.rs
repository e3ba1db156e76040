//! Recommendation document assembly and priority scoring.

use chrono::{DateTime, Utc};
use waste_grid_store::{DocumentStore, collections, typed};
use waste_grid_store_models::{
    ImpactEstimate, PolicyContext, PolicyRecommendationDoc, RecommendationPayload, Ward,
    WasteReport, prefixed_id,
};
use waste_grid_waste_models::{BudgetPriority, PolicyStatus, SeverityClass};

use crate::metrics::{WardPolicyMetrics, aggregate_metrics};
use crate::rules::{FiredRule, evaluate_rules};
use crate::PolicyError;

/// Weighted priority scorer.
///
/// Base 5, plus the severity-class weight (1-4), plus the
/// budget-priority weight (0-3), plus an expected-impact bonus (+2 above
/// 50% complaint reduction, +1 above 30%), capped at 10.
#[must_use]
pub fn priority_score(
    severity: SeverityClass,
    budget_priority: BudgetPriority,
    impact: &ImpactEstimate,
) -> u8 {
    let mut score = 5u8;
    score += severity.priority_weight();
    score += budget_priority.priority_weight();
    if impact.complaint_reduction > 50.0 {
        score += 2;
    } else if impact.complaint_reduction > 30.0 {
        score += 1;
    }
    score.min(10)
}

/// Builds the persisted document for one fired rule.
#[must_use]
pub fn recommendation_doc(
    metrics: &WardPolicyMetrics,
    rule: FiredRule,
    now: DateTime<Utc>,
) -> PolicyRecommendationDoc {
    let template = rule.kind.template();
    let priority = priority_score(rule.severity, template.budget_priority, &template.estimated_impact);

    let mut doc = PolicyRecommendationDoc {
        id: prefixed_id("POL"),
        ward_number: metrics.ward_number,
        context: PolicyContext {
            incident_count: metrics.incident_count,
            timeframe: format!("Last {} days", metrics.lookback_days),
            severity: rule.severity,
            waste_types: metrics.waste_types.clone(),
            illegal_dumping_rate: metrics.illegal_dumping_rate,
        },
        recommendations: RecommendationPayload {
            infrastructure: vec![template.infrastructure],
            enforcement: template.enforcement,
            awareness: template.awareness,
            budget_priority: template.budget_priority,
            estimated_impact: template.estimated_impact,
        },
        priority,
        status: PolicyStatus::Generated,
        status_history: Vec::new(),
        review: None,
        implementation: None,
        created_at: now,
    };
    doc.push_status(
        PolicyStatus::Generated,
        now,
        None,
        Some(template.title.to_string()),
    );
    doc
}

/// Evaluates the rules for one ward and persists a recommendation
/// document per fired rule.
///
/// # Errors
///
/// Returns [`PolicyError::InvalidWardNumber`] for an out-of-range ward
/// number, [`PolicyError::WardNotFound`] for an unknown ward, or
/// [`PolicyError::Store`] if reads or writes fail. Nothing is persisted
/// when no rule fires.
pub async fn generate_for_ward(
    store: &dyn DocumentStore,
    ward_number: u32,
    lookback_days: i64,
    now: DateTime<Utc>,
) -> Result<Vec<PolicyRecommendationDoc>, PolicyError> {
    if !waste_grid_store_models::is_valid_ward_number(ward_number) {
        return Err(PolicyError::InvalidWardNumber { ward_number });
    }

    let wards: Vec<Ward> = typed::all(store, collections::WARDS).await?;
    let ward = wards
        .into_iter()
        .find(|w| w.ward_number == ward_number)
        .ok_or(PolicyError::WardNotFound { ward_number })?;

    let reports: Vec<WasteReport> = typed::all(store, collections::REPORTS).await?;
    let metrics = aggregate_metrics(&ward, &reports, now, lookback_days);

    let fired = evaluate_rules(&metrics);
    if fired.is_empty() {
        log::debug!("Ward {ward_number}: no policy rules fired");
        return Ok(Vec::new());
    }

    let mut docs = Vec::with_capacity(fired.len());
    for rule in fired {
        let doc = recommendation_doc(&metrics, rule, now);
        typed::insert(store, collections::POLICIES, &doc).await?;
        log::info!(
            "Ward {ward_number}: generated {} recommendation (priority {})",
            rule.kind,
            doc.priority
        );
        docs.push(doc);
    }
    Ok(docs)
}

#[cfg(test)]
mod tests {
    use waste_grid_store::MemoryStore;
    use waste_grid_store_models::{Classification, GeoPoint, Reporter, ReporterKind, SeverityCounts};
    use waste_grid_waste_models::{SeverityLevel, WasteType};

    use super::*;
    use crate::rules::RecommendationKind;

    #[test]
    fn scorer_caps_at_ten() {
        let impact = ImpactEstimate {
            complaint_reduction: 78.0,
            roi: 40.0,
            days_to_implement: 60,
        };
        // 5 + 4 + 3 + 2 = 14, capped.
        assert_eq!(
            priority_score(SeverityClass::Critical, BudgetPriority::Urgent, &impact),
            10
        );
    }

    #[test]
    fn scorer_weights_add_up() {
        let modest = ImpactEstimate {
            complaint_reduction: 20.0,
            roi: 15.0,
            days_to_implement: 100,
        };
        // 5 + 2 + 1 + 0 = 8.
        assert_eq!(
            priority_score(SeverityClass::Medium, BudgetPriority::Medium, &modest),
            8
        );

        let decent = ImpactEstimate {
            complaint_reduction: 34.0,
            roi: 30.0,
            days_to_implement: 120,
        };
        // 5 + 1 + 0 + 1 = 7.
        assert_eq!(
            priority_score(SeverityClass::Low, BudgetPriority::Low, &decent),
            7
        );
    }

    #[test]
    fn doc_carries_context_and_template() {
        let now = Utc::now();
        let metrics = WardPolicyMetrics {
            ward_number: 9,
            incident_count: 14,
            illegal_dumping_rate: 35.0,
            overflow_risk: 10.0,
            cleanliness_index: 80.0,
            waste_types: vec![WasteType::Plastic],
            severity_pattern: SeverityCounts::default(),
            lookback_days: 30,
        };
        let rule = FiredRule {
            kind: RecommendationKind::SurveillanceNetwork,
            severity: SeverityClass::Critical,
        };

        let doc = recommendation_doc(&metrics, rule, now);
        assert_eq!(doc.ward_number, 9);
        assert_eq!(doc.context.timeframe, "Last 30 days");
        assert_eq!(doc.context.severity, SeverityClass::Critical);
        assert_eq!(doc.priority, 10);
        assert_eq!(doc.status, PolicyStatus::Generated);
        assert_eq!(doc.status_history.len(), 1);
        assert_eq!(doc.recommendations.infrastructure[0].estimated_cost, 800_000);
    }

    #[tokio::test]
    async fn generate_persists_one_doc_per_fired_rule() {
        let store = MemoryStore::new();
        let now = Utc::now();

        let mut ward = Ward::new("ward-2".into(), 2, "Anna Main Road".into());
        ward.overflow_risk.probability = 75.0;
        ward.cleanliness_index.current = 60.0;
        typed::insert(&store, collections::WARDS, &ward).await.unwrap();

        // Half the reports flagged: surveillance + collection + community.
        for i in 0..6u32 {
            let report = WasteReport::new(
                format!("WR-{i}"),
                GeoPoint::new(78.12, 9.93),
                2,
                Classification {
                    waste_type: WasteType::Mixed,
                    sub_type: None,
                    severity: SeverityLevel::High,
                    illegal_dumping: i % 2 == 0,
                    ai_confidence: 0.8,
                },
                Reporter {
                    user_id: None,
                    kind: ReporterKind::Citizen,
                    anonymous: false,
                },
                now - chrono::Duration::days(i64::from(i)),
            );
            typed::insert(&store, collections::REPORTS, &report).await.unwrap();
        }

        let docs = generate_for_ward(&store, 2, 30, now).await.unwrap();
        assert_eq!(docs.len(), 3);

        let persisted: Vec<PolicyRecommendationDoc> =
            typed::all(&store, collections::POLICIES).await.unwrap();
        assert_eq!(persisted.len(), 3);
        assert!(persisted.iter().all(|d| d.status == PolicyStatus::Generated));
    }

    #[tokio::test]
    async fn quiet_ward_persists_nothing() {
        let store = MemoryStore::new();
        let ward = Ward::new("ward-3".into(), 3, "Quiet Ward".into());
        typed::insert(&store, collections::WARDS, &ward).await.unwrap();

        let docs = generate_for_ward(&store, 3, 30, Utc::now()).await.unwrap();
        assert!(docs.is_empty());
        let persisted: Vec<PolicyRecommendationDoc> =
            typed::all(&store, collections::POLICIES).await.unwrap();
        assert!(persisted.is_empty());
    }
}
