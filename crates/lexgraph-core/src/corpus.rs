//! Corpus comparison entities.
//!
//! The running sufficient statistics themselves live in the corpus crate;
//! only the comparison output, which is embedded in reports, is shared.

use serde::{Deserialize, Serialize};

/// Kind of a detected anomaly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyKind {
    Outlier,
    Missing,
    UnusualConfidence,
}

/// Severity ladder for anomalies, most severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnomalySeverity {
    Alert,
    Warning,
    Info,
}

/// A statistically unusual observation relative to the corpus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClauseAnomaly {
    /// Clause kind name, or `"overall"` for contract-level anomalies.
    pub clause_type: String,
    pub clause_id: String,
    pub kind: AnomalyKind,
    pub z_score: f64,
    pub description: String,
    pub severity: AnomalySeverity,
}

/// Result of comparing one contract against the learned corpus profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusComparison {
    /// Sorted by severity, then by |z|.
    pub anomalies: Vec<ClauseAnomaly>,
    pub risk_z_score: f64,
    /// Jaccard similarity of present clause kinds vs corpus kinds.
    pub structural_similarity: f64,
    /// Share of the corpus's common kinds (presence rate > 0.5) present here.
    pub clause_coverage: f64,
    pub summary: String,
}

impl CorpusComparison {
    /// Placeholder result used while the corpus holds fewer than 3 contracts.
    pub fn insufficient_data() -> Self {
        CorpusComparison {
            anomalies: Vec::new(),
            risk_z_score: 0.0,
            structural_similarity: 0.5,
            clause_coverage: 0.5,
            summary: "Insufficient corpus data for comparison (need 3+ contracts).".into(),
        }
    }
}
