//! # lexgraph-dispute
//!
//! Predicts *where* a contract is likely to be contested, not just whether
//! it is risky. Four signals produce candidate hotspots (inter-clause
//! conflicts, unmet dependencies, one-sided clauses, and highly expected
//! clauses that are absent), which are deduplicated per clause kind and
//! rolled into an overall dispute risk.

use tracing::debug;

use lexgraph_core::{
    ClassifiedClause, DisputeHotspot, DisputePrediction, GraphAnalysis, HotspotCategory,
    HotspotSeverity, PowerAnalysis,
};

/// Predict dispute hotspots from the upstream analyses.
pub fn predict(
    graph: &GraphAnalysis,
    power: &PowerAnalysis,
    _classified: &[ClassifiedClause],
) -> DisputePrediction {
    let mut hotspots: Vec<DisputeHotspot> = Vec::new();

    // Signal 1: clauses involved in conflicts flag both endpoints.
    for conflict in &graph.conflicts {
        let probability = (conflict.severity * 0.8 + 0.1).min(0.95);
        for (kind, id, other) in [
            (conflict.clause_a, &conflict.clause_a_id, conflict.clause_b),
            (conflict.clause_b, &conflict.clause_b_id, conflict.clause_a),
        ] {
            hotspots.push(DisputeHotspot {
                clause_type: kind,
                clause_id: id.clone(),
                probability,
                severity: HotspotSeverity::from_probability(probability),
                category: HotspotCategory::Conflict,
                reason: conflict.description.clone(),
                recommendation: format!(
                    "Reconcile {} with {}. Add an explicit carve-out or priority clause.",
                    kind.display_name(),
                    other.display_name(),
                ),
            });
        }
    }

    // Signal 2: dependencies on absent clauses create legal gaps.
    for gap in &graph.missing_dependencies {
        let probability = (gap.severity * 0.7 + 0.15).min(0.85);
        hotspots.push(DisputeHotspot {
            clause_type: gap.clause_has,
            clause_id: "?".to_string(),
            probability,
            severity: HotspotSeverity::from_probability(probability),
            category: HotspotCategory::Gap,
            reason: format!(
                "{} depends on {}, but {} is missing. {}",
                gap.clause_has.display_name(),
                gap.clause_needs.display_name(),
                gap.clause_needs.display_name(),
                gap.description,
            ),
            recommendation: format!(
                "Add a {} clause to support the {} provision.",
                gap.clause_needs.display_name(),
                gap.clause_has.display_name(),
            ),
        });
    }

    // Signal 3: one-sided clauses scaled by the overall power imbalance.
    for asym in &power.asymmetric_clauses {
        let probability = (0.4 + (power.power_score / 100.0) * 0.4).min(0.80);
        hotspots.push(DisputeHotspot {
            clause_type: asym.clause_type,
            clause_id: asym.clause_id.clone(),
            probability,
            severity: HotspotSeverity::from_probability(probability),
            category: HotspotCategory::Power,
            reason: format!(
                "One-sided clause favoring {}. Triggers: {}",
                asym.favors,
                asym.triggers
                    .iter()
                    .take(2)
                    .cloned()
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
            recommendation: format!(
                "Negotiate more balanced terms in {}.",
                asym.clause_type.display_name(),
            ),
        });
    }

    // Signal 4: strongly expected clauses that are absent.
    for missing in &graph.missing_expected {
        if missing.expected_prevalence >= 0.8 {
            let probability = missing.expected_prevalence * 0.5;
            hotspots.push(DisputeHotspot {
                clause_type: missing.clause_type,
                clause_id: "MISSING".to_string(),
                probability,
                severity: HotspotSeverity::from_probability(probability),
                category: HotspotCategory::Gap,
                reason: format!(
                    "Expected clause '{}' is missing. Present in {:.0}% of similar contracts.",
                    missing.clause_type.display_name(),
                    missing.expected_prevalence * 100.0,
                ),
                recommendation: missing.recommendation.clone(),
            });
        }
    }

    // Highest probability first, then one hotspot per clause kind.
    hotspots.sort_by(|a, b| b.probability.total_cmp(&a.probability));
    let mut seen = Vec::new();
    hotspots.retain(|h| {
        if seen.contains(&h.clause_type) {
            false
        } else {
            seen.push(h.clause_type);
            true
        }
    });

    let overall_dispute_risk = if hotspots.is_empty() {
        (graph.structural_risk * 0.3).max(0.0)
    } else {
        let weighted: f64 = hotspots
            .iter()
            .take(5)
            .map(|h| {
                let w = if h.severity == HotspotSeverity::Critical { 1.0 } else { 0.7 };
                h.probability * w
            })
            .sum();
        (weighted * 25.0 + graph.structural_risk * 0.3).min(100.0)
    };

    let top_risks: Vec<String> = hotspots
        .iter()
        .take(3)
        .map(|h| format!("{}: {}", h.severity.as_str(), h.reason))
        .collect();

    let likely = hotspots.iter().filter(|h| h.probability >= 0.6).count();
    let dispute_count_prediction = if likely >= 4 {
        "High (5+ potential disputes)"
    } else if likely >= 2 {
        "Medium (2-4 potential disputes)"
    } else {
        "Low (0-1 potential disputes)"
    }
    .to_string();

    debug!(
        hotspots = hotspots.len(),
        overall = overall_dispute_risk,
        "dispute prediction"
    );

    DisputePrediction {
        hotspots,
        overall_dispute_risk,
        dispute_count_prediction,
        top_risks,
    }
}
