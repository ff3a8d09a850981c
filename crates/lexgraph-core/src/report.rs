//! The top-level analysis report.
//!
//! The JSON layout of [`Report`] is the public contract consumed by
//! storage, job, webhook and UI layers; field names are stable and value
//! ranges are tested. Optional sections are omitted (not null) when the
//! corresponding stage was disabled or degraded.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::clause::ClassifiedClause;
use crate::corpus::CorpusComparison;
use crate::dispute::DisputePrediction;
use crate::graph::GraphAnalysis;
use crate::power::PowerAnalysis;
use crate::rewrite::RewriteSuggestion;
use crate::simulation::RiskSimulation;
use crate::taxonomy::ClauseType;

/// Overall risk banding: `>= 70` high, `>= 40` medium, else low.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    High,
    Medium,
    Low,
}

impl RiskLevel {
    pub fn from_score(score: f64) -> Self {
        if score >= 70.0 {
            RiskLevel::High
        } else if score >= 40.0 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

/// Advisory per-stage outcome attached to every report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageStatus {
    Ok,
    /// Stage produced a best-effort result on a fallback path.
    Degraded,
    /// Stage disabled by options or preconditions.
    Skipped,
    /// Stage failed; its section is absent.
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub contract_type: String,
    pub total_clauses: usize,
    pub analysis_time_ms: u64,
    pub engine_version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Overall {
    pub risk_score: f64,
    pub risk_level: RiskLevel,
    pub executive_summary: String,
}

/// Complete analysis report for one contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub metadata: ReportMetadata,
    pub classifications: Vec<ClassifiedClause>,
    pub graph_analysis: GraphAnalysis,
    pub power_analysis: PowerAnalysis,
    pub dispute_prediction: DisputePrediction,
    pub overall: Overall,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_rewrites: Option<Vec<RewriteSuggestion>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_simulation: Option<RiskSimulation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corpus_comparison: Option<CorpusComparison>,
    #[serde(default)]
    pub stage_status: BTreeMap<String, StageStatus>,
}

impl Report {
    /// Clause kinds present in this contract (excludes `Unknown`).
    pub fn present_types(&self) -> Vec<ClauseType> {
        let mut kinds: Vec<ClauseType> = self
            .classifications
            .iter()
            .map(|c| c.clause_type)
            .filter(|k| *k != ClauseType::Unknown)
            .collect();
        kinds.sort();
        kinds.dedup();
        kinds
    }

    /// Concatenated clause text, the overlay's view of the full contract.
    pub fn full_text(&self) -> String {
        let mut out = String::new();
        for clause in &self.classifications {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(&clause.text);
        }
        out
    }

    /// Concatenated text of all clauses of one kind.
    pub fn text_of_type(&self, kind: ClauseType) -> String {
        let mut out = String::new();
        for clause in self.classifications.iter().filter(|c| c.clause_type == kind) {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(&clause.text);
        }
        out
    }

    /// Mean calibrated confidence over all clauses; 0.5 when empty.
    pub fn average_calibrated_confidence(&self) -> f64 {
        if self.classifications.is_empty() {
            return 0.5;
        }
        let sum: f64 = self.classifications.iter().map(|c| c.calibrated_confidence).sum();
        sum / self.classifications.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clause::Language;

    fn minimal_report() -> Report {
        Report {
            metadata: ReportMetadata {
                contract_type: "MSA".into(),
                total_clauses: 1,
                analysis_time_ms: 12,
                engine_version: "v11".into(),
            },
            classifications: vec![ClassifiedClause {
                id: "section_0".into(),
                text: "Provider shall indemnify Client.".into(),
                header: String::new(),
                start_pos: 0,
                end_pos: 32,
                coherence: 0.7,
                clause_type: ClauseType::Indemnification,
                raw_confidence: 0.7,
                calibrated_confidence: 0.11,
                entropy_ratio: 0.92,
                margin: 0.02,
                needs_review: true,
                top_k: vec![],
                risk_weight: 0.9,
                category: "risk_allocation".into(),
                language: Language::En,
            }],
            graph_analysis: GraphAnalysis::default(),
            power_analysis: PowerAnalysis {
                parties: vec!["Provider".into(), "Client".into()],
                power_score: 10.0,
                dominant_party: "Client".into(),
                burdened_party: "Provider".into(),
                asymmetric_clauses: vec![],
                total_obligations: 1,
                total_protections: 0,
                burdens: vec![],
            },
            dispute_prediction: DisputePrediction::default(),
            overall: Overall {
                risk_score: 20.0,
                risk_level: RiskLevel::Low,
                executive_summary: "Contract Risk Level: LOW.".into(),
            },
            suggested_rewrites: None,
            risk_simulation: None,
            corpus_comparison: None,
            stage_status: BTreeMap::new(),
        }
    }

    #[test]
    fn risk_level_banding() {
        assert_eq!(RiskLevel::from_score(75.0), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(70.0), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(40.0), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(39.9), RiskLevel::Low);
    }

    #[test]
    fn optional_sections_are_omitted_not_null() {
        let v = serde_json::to_value(minimal_report()).unwrap();
        assert!(v.get("suggested_rewrites").is_none());
        assert!(v.get("risk_simulation").is_none());
        assert_eq!(v["overall"]["risk_level"], "LOW");
    }

    #[test]
    fn unknown_fields_are_tolerated_on_read() {
        let mut v = serde_json::to_value(minimal_report()).unwrap();
        v["future_section"] = serde_json::json!({"x": 1});
        let back: Report = serde_json::from_value(v).unwrap();
        assert_eq!(back.metadata.total_clauses, 1);
    }

    #[test]
    fn helpers_digest_classifications() {
        let report = minimal_report();
        assert_eq!(report.present_types(), vec![ClauseType::Indemnification]);
        assert!(report.full_text().contains("indemnify"));
        assert!(report.text_of_type(ClauseType::Termination).is_empty());
        assert!((report.average_calibrated_confidence() - 0.11).abs() < 1e-9);
    }
}
