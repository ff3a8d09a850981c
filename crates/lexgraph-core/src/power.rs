//! Party power-asymmetry entities.

use serde::{Deserialize, Serialize};

use crate::taxonomy::ClauseType;

/// Per-party obligation/protection accounting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartyBurden {
    pub party: String,
    /// `clip(0, 100, 70*obl/(obl+prot+1) + min(30, 10*one_sided))`.
    pub burden_score: f64,
    pub obligations: f64,
    pub protections: f64,
    pub one_sided: usize,
}

/// A clause carrying at least one one-sided trigger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AsymmetricClause {
    pub clause_id: String,
    #[serde(rename = "type")]
    pub clause_type: ClauseType,
    /// The party accruing the protections of this clause.
    pub favors: String,
    pub triggers: Vec<String>,
}

/// Party-level power analysis for one contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerAnalysis {
    /// At most two parties, extraction order.
    pub parties: Vec<String>,
    /// `min(100, |burden_a - burden_b| + 5 * asymmetric_count)`.
    pub power_score: f64,
    /// Party with the lower burden.
    pub dominant_party: String,
    /// Party with the higher burden.
    pub burdened_party: String,
    pub asymmetric_clauses: Vec<AsymmetricClause>,
    pub total_obligations: usize,
    pub total_protections: usize,
    pub burdens: Vec<PartyBurden>,
}

impl PowerAnalysis {
    /// Total marker signals observed, the simulator's sample-size proxy.
    pub fn total_signals(&self) -> usize {
        self.total_obligations + self.total_protections
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn power_analysis_round_trips() {
        let analysis = PowerAnalysis {
            parties: vec!["Provider".into(), "Client".into()],
            power_score: 50.0,
            dominant_party: "Client".into(),
            burdened_party: "Provider".into(),
            asymmetric_clauses: vec![AsymmetricClause {
                clause_id: "clause_0".into(),
                clause_type: ClauseType::Indemnification,
                favors: "Client".into(),
                triggers: vec!["without limitation".into()],
            }],
            total_obligations: 1,
            total_protections: 1,
            burdens: vec![],
        };
        let json = serde_json::to_string(&analysis).unwrap();
        let back: PowerAnalysis = serde_json::from_str(&json).unwrap();
        assert_eq!(back, analysis);
        assert_eq!(analysis.total_signals(), 2);
    }
}
