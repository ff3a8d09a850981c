//! Rewrite suggestion entities.

use serde::{Deserialize, Serialize};

use crate::taxonomy::ClauseType;

/// Negotiation posture of a template, ascending safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateLevel {
    Aggressive,
    MarketStandard,
    Balanced,
    Protective,
}

/// How hard the suggested change is expected to be to negotiate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NegotiationDifficulty {
    Easy,
    Moderate,
    Hard,
}

impl NegotiationDifficulty {
    /// Bigger asked-for risk reductions are harder to land:
    /// `>= 30` hard, `>= 15` moderate, else easy.
    pub fn from_risk_reduction(reduction: f64) -> Self {
        if reduction >= 30.0 {
            NegotiationDifficulty::Hard
        } else if reduction >= 15.0 {
            NegotiationDifficulty::Moderate
        } else {
            NegotiationDifficulty::Easy
        }
    }
}

/// Tag of one token-level diff operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffTag {
    Equal,
    Replace,
    Insert,
    Delete,
}

/// One token-range operation transforming the original into the suggestion.
///
/// Ranges are half-open token indexes into the original (`a`) and the
/// suggested (`b`) token sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffOp {
    pub tag: DiffTag,
    pub a_lo: usize,
    pub a_hi: usize,
    pub b_lo: usize,
    pub b_hi: usize,
}

/// A safer-language suggestion for one clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewriteSuggestion {
    pub clause_id: String,
    #[serde(rename = "type")]
    pub clause_type: ClauseType,
    pub original: String,
    pub suggested: String,
    /// Risk points saved by adopting the template.
    pub risk_reduction: f64,
    pub template_level: TemplateLevel,
    /// Cosine similarity between the clause and the chosen template.
    pub similarity: f64,
    pub diff_summary: Vec<DiffOp>,
    pub explanation: String,
    pub negotiation_difficulty: NegotiationDifficulty,
}
