//! Clause-level entities produced by the chunker and classifier.

use serde::{Deserialize, Serialize};

use crate::taxonomy::ClauseType;

/// A contiguous span of contract text produced by the chunker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// Positional id: `section_<n>` for structured chunks, `clause_<n>`
    /// for paragraph-fallback chunks.
    pub id: String,
    pub text: String,
    /// First line of the chunk, trimmed to 80 characters.
    pub header: String,
    /// Character offset into the (normalized) source text.
    pub start_pos: usize,
    pub end_pos: usize,
    /// Mean embedding similarity across the chunk's internal boundaries.
    pub coherence: f64,
}

/// Detected clause language. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Fr,
}

/// One entry of the classifier's top-k output.
///
/// Probabilities are renormalized over the top 3, so they sum to 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopPrediction {
    #[serde(rename = "type")]
    pub clause_type: ClauseType,
    pub probability: f64,
}

/// A chunk with its classification and calibration metrics attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedClause {
    pub id: String,
    pub text: String,
    pub header: String,
    pub start_pos: usize,
    pub end_pos: usize,
    pub coherence: f64,
    #[serde(rename = "type")]
    pub clause_type: ClauseType,
    /// Raw cosine similarity of the winning prototype.
    pub raw_confidence: f64,
    /// Post-softmax probability of the winning kind.
    pub calibrated_confidence: f64,
    /// Normalized entropy of the calibrated distribution: 0 = certain,
    /// 1 = uniform.
    pub entropy_ratio: f64,
    /// Calibrated probability gap between the top two kinds.
    pub margin: f64,
    pub needs_review: bool,
    pub top_k: Vec<TopPrediction>,
    pub risk_weight: f64,
    pub category: String,
    pub language: Language,
}

impl ClassifiedClause {
    /// Category one-hot index for graph attention features.
    /// `None` when the clause kind is `Unknown`.
    pub fn category_index(&self) -> Option<usize> {
        self.clause_type.category().map(|c| c.one_hot_index())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_serializes_with_contract_field_names() {
        let clause = ClassifiedClause {
            id: "section_0".into(),
            text: "Either party may terminate...".into(),
            header: "1. TERMINATION".into(),
            start_pos: 0,
            end_pos: 29,
            coherence: 0.7,
            clause_type: ClauseType::Termination,
            raw_confidence: 0.81,
            calibrated_confidence: 0.12,
            entropy_ratio: 0.9,
            margin: 0.03,
            needs_review: true,
            top_k: vec![TopPrediction { clause_type: ClauseType::Termination, probability: 1.0 }],
            risk_weight: 0.7,
            category: "lifecycle".into(),
            language: Language::En,
        };
        let v: serde_json::Value = serde_json::to_value(&clause).unwrap();
        assert_eq!(v["type"], "termination");
        assert_eq!(v["top_k"][0]["type"], "termination");
        assert_eq!(v["language"], "en");
        assert!(v.get("clause_type").is_none());
    }

    #[test]
    fn json_round_trip_preserves_fields() {
        let clause = ClassifiedClause {
            id: "clause_3".into(),
            text: "t".into(),
            header: String::new(),
            start_pos: 5,
            end_pos: 6,
            coherence: 0.5,
            clause_type: ClauseType::Unknown,
            raw_confidence: 0.0,
            calibrated_confidence: 1.0 / 15.0,
            entropy_ratio: 1.0,
            margin: 0.0,
            needs_review: true,
            top_k: vec![],
            risk_weight: 0.5,
            category: "unknown".into(),
            language: Language::Fr,
        };
        let json = serde_json::to_string(&clause).unwrap();
        let back: ClassifiedClause = serde_json::from_str(&json).unwrap();
        assert_eq!(back, clause);
    }
}
