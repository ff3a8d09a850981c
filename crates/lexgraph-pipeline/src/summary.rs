//! Executive summary text for the top of a report.

use lexgraph_core::{DisputePrediction, GraphAnalysis, PowerAnalysis, RiskLevel};

/// One-paragraph digest of the structural, power and dispute findings.
pub fn executive_summary(
    graph: &GraphAnalysis,
    power: &PowerAnalysis,
    disputes: &DisputePrediction,
    risk_level: RiskLevel,
) -> String {
    let mut parts: Vec<String> = Vec::new();

    let level = match risk_level {
        RiskLevel::High => "HIGH",
        RiskLevel::Medium => "MEDIUM",
        RiskLevel::Low => "LOW",
    };
    parts.push(format!("Contract Risk Level: {level}."));

    if graph.conflict_count > 0 {
        parts.push(format!(
            "{} inter-clause conflict(s) detected.",
            graph.conflict_count
        ));
    }
    if graph.dependency_gap_count > 0 {
        parts.push(format!(
            "{} missing clause dependency(ies).",
            graph.dependency_gap_count
        ));
    }
    if !graph.missing_expected.is_empty() {
        let top: Vec<String> = graph
            .missing_expected
            .iter()
            .take(3)
            .map(|m| m.clause_type.display_name())
            .collect();
        parts.push(format!("Missing expected clauses: {}.", top.join(", ")));
    }
    if power.power_score > 30.0 {
        parts.push(format!(
            "Power imbalance detected (score: {:.0}/100): {} holds the dominant position.",
            power.power_score, power.dominant_party,
        ));
    }
    if let Some(top) = disputes.hotspots.first() {
        parts.push(format!(
            "Highest dispute risk: {} ({:.0}% probability).",
            top.clause_type.display_name(),
            top.probability * 100.0,
        ));
    }
    parts.push(format!(
        "Completeness: {:.0}%.",
        graph.completeness_score * 100.0
    ));

    parts.join(" ")
}
