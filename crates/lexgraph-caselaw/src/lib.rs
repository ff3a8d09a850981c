//! # lexgraph-caselaw
//!
//! Retrieval over a curated index of landmark cases. Each risky clause in
//! a report becomes a query; the closest cases ground the report's
//! recommendations in language courts have actually upheld.
//!
//! The index is embedded once at construction with the same encoder the
//! classifier uses. When no encoder is available, retrieval degrades to a
//! type-match sorted by recency, still useful if not semantic.

mod cases;

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, warn};

use lexgraph_core::{CaseCitation, ClauseType, Encoder, RagResult, Report};

pub use cases::{case_index, CaseEntry};

/// Score bonus when the case's clause kind matches the query clause.
const TYPE_BOOST: f64 = 0.2;
/// Citations kept per report.
const MAX_CITATIONS: usize = 10;
/// Relevance assigned by the non-semantic fallback.
const FALLBACK_RELEVANCE: f64 = 0.85;

/// Case-law retrieval index.
pub struct CaseLawIndex {
    encoder: Arc<dyn Encoder>,
    /// One embedding per case entry; `None` when the encoder failed at
    /// construction, which switches retrieval to the type-match fallback.
    embeddings: Option<Vec<Vec<f32>>>,
}

impl CaseLawIndex {
    pub fn new(encoder: Arc<dyn Encoder>) -> Self {
        let texts: Vec<String> = case_index().iter().map(searchable_text).collect();
        let refs: Vec<&str> = texts.iter().map(|s| s.as_str()).collect();
        let embeddings = match encoder.encode(&refs) {
            Ok(v) => {
                debug!(cases = v.len(), "case index embedded");
                Some(v)
            }
            Err(e) => {
                warn!("case embedding failed, retrieval degraded to type match: {e}");
                None
            }
        };
        CaseLawIndex { encoder, embeddings }
    }

    /// Retrieve citations for the risky clauses of a report.
    ///
    /// A clause qualifies as a query when `risk_weight >= 0.5`, it is
    /// flagged for review, or its calibrated confidence is below 0.7.
    /// Results are deduplicated per case (max relevance wins) and capped.
    pub fn retrieve(&self, report: &Report, top_k: usize) -> RagResult {
        let mut best: BTreeMap<&'static str, CaseCitation> = BTreeMap::new();

        for clause in &report.classifications {
            let risky = clause.risk_weight >= 0.5
                || clause.needs_review
                || clause.calibrated_confidence < 0.7;
            if !risky || clause.clause_type == ClauseType::Unknown {
                continue;
            }

            for (case, relevance) in self.query(clause.clause_type, &clause.text, top_k) {
                let entry = best.entry(case.id);
                match entry {
                    std::collections::btree_map::Entry::Occupied(mut o) => {
                        if relevance > o.get().relevance {
                            o.insert(citation(case, relevance));
                        }
                    }
                    std::collections::btree_map::Entry::Vacant(v) => {
                        v.insert(citation(case, relevance));
                    }
                }
            }
        }

        let mut citations: Vec<CaseCitation> = best.into_values().collect();
        citations.sort_by(|a, b| b.relevance.total_cmp(&a.relevance));
        citations.truncate(MAX_CITATIONS);

        let mut jurisdictions: Vec<String> =
            citations.iter().map(|c| c.jurisdiction.clone()).collect();
        jurisdictions.sort();
        jurisdictions.dedup();

        let mut clause_types: Vec<ClauseType> =
            citations.iter().map(|c| c.clause_type).collect();
        clause_types.sort();
        clause_types.dedup();

        debug!(citations = citations.len(), "case retrieval complete");
        RagResult { citations, jurisdictions, clause_types }
    }

    /// Score all cases for one clause; top-k `(case, relevance)` pairs.
    fn query(
        &self,
        kind: ClauseType,
        text: &str,
        top_k: usize,
    ) -> Vec<(&'static CaseEntry, f64)> {
        match &self.embeddings {
            Some(embeddings) => {
                let query_text = format!("{} {}", kind.as_str(), truncate(text, 300));
                let query = match self.encoder.encode_one(&query_text) {
                    Ok(q) => q,
                    Err(e) => {
                        warn!("query encoding failed, falling back to type match: {e}");
                        return fallback_matches(kind, top_k);
                    }
                };
                let mut scored: Vec<(&'static CaseEntry, f64)> = case_index()
                    .iter()
                    .zip(embeddings)
                    .map(|(case, emb)| {
                        let boost = if case.clause_type == kind { TYPE_BOOST } else { 0.0 };
                        let score = lexgraph_core::cosine(emb, &query) as f64 + boost;
                        (case, score.clamp(0.0, 1.0))
                    })
                    .collect();
                scored.sort_by(|a, b| b.1.total_cmp(&a.1));
                scored.truncate(top_k);
                scored
            }
            None => fallback_matches(kind, top_k),
        }
    }
}

/// Non-semantic fallback: same-kind cases, newest first.
fn fallback_matches(kind: ClauseType, top_k: usize) -> Vec<(&'static CaseEntry, f64)> {
    let mut matches: Vec<&'static CaseEntry> = case_index()
        .iter()
        .filter(|c| c.clause_type == kind)
        .collect();
    matches.sort_by(|a, b| b.year.cmp(&a.year));
    matches
        .into_iter()
        .take(top_k)
        .map(|c| (c, FALLBACK_RELEVANCE))
        .collect()
}

fn citation(case: &CaseEntry, relevance: f64) -> CaseCitation {
    CaseCitation {
        case_id: case.id.to_string(),
        case_name: case.name.to_string(),
        jurisdiction: case.jurisdiction.to_string(),
        year: case.year,
        relevance,
        principle: case.principle.to_string(),
        grounded_rewrite: case.safe_language.to_string(),
        risk_explanation: format!("{} Risk factors: {}.", case.ruling, case.risk_factors.join(", ")),
        clause_type: case.clause_type,
    }
}

fn searchable_text(case: &CaseEntry) -> String {
    format!(
        "{} {} {} {}",
        case.clause_type.as_str(),
        case.ruling,
        case.principle,
        case.risk_factors.join(" "),
    )
}

/// Char-boundary-safe prefix.
fn truncate(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexgraph_core::{
        ClassifiedClause, DisputePrediction, EncoderError, GraphAnalysis, HashingEncoder,
        Language, Overall, PowerAnalysis, ReportMetadata, RiskLevel,
    };
    use std::collections::BTreeMap as StdBTreeMap;

    fn clause(kind: ClauseType, text: &str, risk_weight: f64) -> ClassifiedClause {
        ClassifiedClause {
            id: "section_0".into(),
            text: text.into(),
            header: String::new(),
            start_pos: 0,
            end_pos: text.len(),
            coherence: 0.6,
            clause_type: kind,
            raw_confidence: 0.6,
            calibrated_confidence: 0.1,
            entropy_ratio: 0.9,
            margin: 0.02,
            needs_review: true,
            top_k: vec![],
            risk_weight,
            category: "x".into(),
            language: Language::En,
        }
    }

    fn report(clauses: Vec<ClassifiedClause>) -> Report {
        Report {
            metadata: ReportMetadata {
                contract_type: "MSA".into(),
                total_clauses: clauses.len(),
                analysis_time_ms: 1,
                engine_version: "v11".into(),
            },
            classifications: clauses,
            graph_analysis: GraphAnalysis::default(),
            power_analysis: PowerAnalysis {
                parties: vec!["A".into(), "B".into()],
                power_score: 10.0,
                dominant_party: "A".into(),
                burdened_party: "B".into(),
                asymmetric_clauses: vec![],
                total_obligations: 0,
                total_protections: 0,
                burdens: vec![],
            },
            dispute_prediction: DisputePrediction::default(),
            overall: Overall {
                risk_score: 50.0,
                risk_level: RiskLevel::Medium,
                executive_summary: String::new(),
            },
            suggested_rewrites: None,
            risk_simulation: None,
            corpus_comparison: None,
            stage_status: StdBTreeMap::new(),
        }
    }

    #[test]
    fn risky_clause_retrieves_matching_cases() {
        let index = CaseLawIndex::new(Arc::new(HashingEncoder::new()));
        let r = report(vec![clause(
            ClauseType::LimitationOfLiability,
            "Neither party shall be liable for consequential damages or lost profits; an \
             exclusion clause covers fundamental breach.",
            0.85,
        )]);
        let result = index.retrieve(&r, 3);
        assert!(!result.citations.is_empty());
        assert!(result.citations.len() <= 3);
        // Type boost should surface a limitation-of-liability case on top.
        assert_eq!(result.citations[0].clause_type, ClauseType::LimitationOfLiability);
    }

    #[test]
    fn citations_are_unique_and_capped() {
        let index = CaseLawIndex::new(Arc::new(HashingEncoder::new()));
        let kinds = [
            ClauseType::LimitationOfLiability,
            ClauseType::Termination,
            ClauseType::Indemnification,
            ClauseType::DataProtection,
            ClauseType::NonCompete,
            ClauseType::IpOwnership,
        ];
        let clauses = kinds
            .iter()
            .map(|&k| clause(k, "clause text about obligations and liability", 0.9))
            .collect();
        let result = index.retrieve(&report(clauses), 5);
        assert!(result.citations.len() <= MAX_CITATIONS);
        let mut ids: Vec<&str> = result.citations.iter().map(|c| c.case_id.as_str()).collect();
        let before = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(before, ids.len());
        for pair in result.citations.windows(2) {
            assert!(pair[0].relevance >= pair[1].relevance);
        }
    }

    #[test]
    fn safe_clauses_are_not_queried() {
        let index = CaseLawIndex::new(Arc::new(HashingEncoder::new()));
        let mut c = clause(ClauseType::AuditRights, "audit once per year", 0.3);
        c.needs_review = false;
        c.calibrated_confidence = 0.9;
        let result = index.retrieve(&report(vec![c]), 3);
        assert!(result.citations.is_empty());
    }

    struct FailingEncoder;
    impl Encoder for FailingEncoder {
        fn encode(&self, _: &[&str]) -> Result<Vec<Vec<f32>>, EncoderError> {
            Err(EncoderError::Unavailable("offline".into()))
        }
    }

    #[test]
    fn fallback_returns_type_matches_by_recency() {
        let index = CaseLawIndex::new(Arc::new(FailingEncoder));
        let r = report(vec![clause(
            ClauseType::Termination,
            "termination for convenience",
            0.7,
        )]);
        let result = index.retrieve(&r, 3);
        assert!(!result.citations.is_empty());
        for c in &result.citations {
            assert_eq!(c.clause_type, ClauseType::Termination);
            assert!((c.relevance - FALLBACK_RELEVANCE).abs() < 1e-9);
        }
        // Newest first.
        for pair in result.citations.windows(2) {
            assert!(pair[0].year >= pair[1].year);
        }
    }

    #[test]
    fn jurisdictions_and_kinds_are_summarized() {
        let index = CaseLawIndex::new(Arc::new(HashingEncoder::new()));
        let r = report(vec![
            clause(ClauseType::DataProtection, "personal data processing and transfers", 0.75),
            clause(ClauseType::GoverningLaw, "governed by the laws of Delaware", 0.3),
        ]);
        let result = index.retrieve(&r, 3);
        assert!(!result.jurisdictions.is_empty());
        assert!(!result.clause_types.is_empty());
    }
}
