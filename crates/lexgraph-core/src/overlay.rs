//! Overlay report entities: symbolic verdicts, case-law citations, graph
//! attention scores, debate transcripts, and the meta-fused report.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::report::StageStatus;
use crate::taxonomy::ClauseType;

/// Doctrine family a rule belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DoctrineFamily {
    Proportionality,
    GoodFaith,
    GapFilling,
    Unconscionability,
    Interpretation,
    PublicPolicy,
    Formation,
}

/// Severity assigned to a doctrine rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleSeverity {
    Critical,
    High,
    Medium,
    Low,
}

/// A fired doctrine rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoctrineViolation {
    pub rule_id: String,
    pub family: DoctrineFamily,
    pub description: String,
    pub severity: RuleSeverity,
    /// Share of applicable predicates that held, in `[0.7, 1]` for fired rules.
    pub confidence: f64,
    pub risk_contribution: f64,
    pub remedy: String,
    pub citation: String,
}

/// Output of the symbolic reasoner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolicVerdict {
    pub violations: Vec<DoctrineViolation>,
    /// Fraction of the rule set evaluable against this report.
    pub doctrine_coverage: f64,
    pub symbolic_risk: f64,
    pub neural_risk: f64,
    /// `alpha * neural + (1 - alpha) * symbolic`.
    pub fused_risk: f64,
    pub alpha: f64,
    pub reasoning_chain: Vec<String>,
}

/// One retrieved case citation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseCitation {
    pub case_id: String,
    pub case_name: String,
    pub jurisdiction: String,
    pub year: u16,
    pub relevance: f64,
    pub principle: String,
    /// Language a court has upheld, offered as the grounded rewrite.
    pub grounded_rewrite: String,
    pub risk_explanation: String,
    #[serde(rename = "type")]
    pub clause_type: ClauseType,
}

/// Output of the case-law retrieval pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RagResult {
    /// Unique by case, highest relevance kept, at most 10.
    pub citations: Vec<CaseCitation>,
    pub jurisdictions: Vec<String>,
    pub clause_types: Vec<ClauseType>,
}

/// Per-node output of the graph attention network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRisk {
    pub clause_id: String,
    #[serde(rename = "type")]
    pub clause_type: ClauseType,
    /// Sigmoid risk score in `[0, 1]`.
    pub risk: f64,
    /// Attention-derived importance; sums to ~1 over the graph.
    pub importance: f64,
}

/// A high-attention edge surfaced for explanation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttentionEdge {
    pub source: String,
    pub target: String,
    pub weight: f64,
}

/// Output of the graph attention network.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GatScores {
    pub node_results: Vec<NodeRisk>,
    /// 64-dimensional pooled graph embedding.
    pub graph_embedding: Vec<f32>,
    pub graph_risk: f64,
    /// Attention-entropy concentration signal in `[0, 1]`.
    pub structural_anomaly: f64,
    /// At most 10 edges, by attention weight.
    pub top_edges: Vec<AttentionEdge>,
}

impl GatScores {
    /// Result for an empty graph: all scores zero.
    pub fn empty() -> Self {
        GatScores::default()
    }
}

/// Which side of the debate an argument belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DebatePosition {
    Prosecution,
    Defense,
}

/// Severity claimed by a debate argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgumentSeverity {
    Critical,
    High,
    Medium,
    Low,
}

impl ArgumentSeverity {
    /// Risk-weight thresholds: `>= 0.8` critical, `>= 0.6` high,
    /// `>= 0.4` medium, else low.
    pub fn from_risk_weight(w: f64) -> Self {
        if w >= 0.8 {
            ArgumentSeverity::Critical
        } else if w >= 0.6 {
            ArgumentSeverity::High
        } else if w >= 0.4 {
            ArgumentSeverity::Medium
        } else {
            ArgumentSeverity::Low
        }
    }
}

/// One argument advanced by the prosecution or defense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebateArgument {
    /// Clause kind name, or a synthetic topic like `"structure"` / `"power"`.
    pub topic: String,
    pub position: DebatePosition,
    pub severity: ArgumentSeverity,
    pub confidence: f64,
    pub claim: String,
    pub evidence: Vec<String>,
}

/// Outcome of a judge's ruling on one debated topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RulingOutcome {
    Sustained,
    Overruled,
}

/// The judge's ruling on one topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ruling {
    pub topic: String,
    pub outcome: RulingOutcome,
    pub rationale: String,
    pub risk_adjustment: f64,
}

/// Final debate verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebateVerdict {
    HighRisk,
    ModerateRisk,
    Acceptable,
}

/// Full transcript of the adversarial debate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebateTranscript {
    pub prosecution: Vec<DebateArgument>,
    pub defense: Vec<DebateArgument>,
    pub rulings: Vec<Ruling>,
    pub verdict: DebateVerdict,
    /// Net risk adjustment in fractional units; the meta-fusion scales by 100.
    pub risk_adjustment: f64,
}

/// The meta-fused overlay report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct V12Report {
    pub v11_risk: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbolic: Option<SymbolicVerdict>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rag: Option<RagResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gnn: Option<GatScores>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debate: Option<DebateTranscript>,
    /// Equal-weight blend of the available perspectives, in `[0, 100]`.
    pub fused_risk: f64,
    /// Agreement-derived confidence in `[0.1, 0.99]`.
    pub confidence: f64,
    pub engine_version: String,
    #[serde(default)]
    pub stage_status: BTreeMap<String, StageStatus>,
}
