//! # lexgraph-rewrite
//!
//! Retrieves safer alternative clause language from a curated template
//! bank, using the same sentence encoder as the classifier. No generative
//! model is involved: suggestions are real templates, ranked by a blend of
//! semantic similarity to the clause at hand and the risk reduction they
//! offer.

mod diff;
mod templates;

use std::sync::Arc;

use tracing::{debug, warn};

use lexgraph_core::{
    ClauseType, Encoder, NegotiationDifficulty, RewriteSuggestion, TemplateLevel,
};

pub use diff::token_ops;
pub use templates::{template_bank, ClauseTemplate};

/// Weight of semantic similarity in the retrieval score.
const SIM_WEIGHT: f64 = 0.4;
/// Weight of normalized risk reduction in the retrieval score.
const REDUCTION_WEIGHT: f64 = 0.6;

/// Template retrieval engine with pre-computed embeddings.
pub struct RewriteEngine {
    encoder: Arc<dyn Encoder>,
    /// One embedding per bank entry, `None` when the encoder was
    /// unavailable at construction. Suggestions are then disabled.
    embeddings: Option<Vec<Vec<f32>>>,
}

impl RewriteEngine {
    /// Pre-embed the template bank. Encoder failure disables the engine
    /// rather than failing construction.
    pub fn new(encoder: Arc<dyn Encoder>) -> Self {
        let texts: Vec<&str> = template_bank().iter().map(|t| t.text).collect();
        let embeddings = match encoder.encode(&texts) {
            Ok(v) => {
                debug!(templates = v.len(), "template bank embedded");
                Some(v)
            }
            Err(e) => {
                warn!("template embedding failed, rewrite engine disabled: {e}");
                None
            }
        };
        RewriteEngine { encoder, embeddings }
    }

    /// Suggest a safer template for one clause.
    ///
    /// Candidates of the clause's kind whose bank risk is strictly below
    /// `current_risk` are scored `0.4*sim + 0.6*(current - risk)/100`; the
    /// best wins. When nothing in the bank is strictly safer, the
    /// lowest-risk template of the kind is returned so the caller still
    /// sees the safest known wording. Unknown kinds and uncovered kinds
    /// yield `None`; that is an absence, not an error.
    pub fn suggest(
        &self,
        clause_text: &str,
        clause_type: ClauseType,
        current_risk: f64,
        preferred_level: Option<TemplateLevel>,
    ) -> Option<RewriteSuggestion> {
        let embeddings = self.embeddings.as_ref()?;
        if clause_type == ClauseType::Unknown || clause_text.trim().is_empty() {
            return None;
        }

        let candidates: Vec<(usize, &ClauseTemplate)> = template_bank()
            .iter()
            .enumerate()
            .filter(|(_, t)| t.clause_type == clause_type)
            .filter(|(_, t)| preferred_level.map_or(true, |lvl| t.level == lvl))
            .collect();
        if candidates.is_empty() {
            return None;
        }

        let query = match self.encoder.encode_one(clause_text) {
            Ok(q) => q,
            Err(e) => {
                warn!("clause encoding failed, no suggestion: {e}");
                return None;
            }
        };

        let scored: Vec<(f64, f64, &ClauseTemplate)> = candidates
            .iter()
            .map(|(i, t)| {
                let sim = lexgraph_core::cosine(&embeddings[*i], &query) as f64;
                (sim, t.risk_score, *t)
            })
            .collect();

        let chosen = scored
            .iter()
            .filter(|(_, risk, _)| *risk < current_risk)
            .max_by(|a, b| {
                let score_a = SIM_WEIGHT * a.0 + REDUCTION_WEIGHT * (current_risk - a.1) / 100.0;
                let score_b = SIM_WEIGHT * b.0 + REDUCTION_WEIGHT * (current_risk - b.1) / 100.0;
                score_a.total_cmp(&score_b)
            })
            .or_else(|| scored.iter().min_by(|a, b| a.1.total_cmp(&b.1)))?;

        let (similarity, template_risk, template) = (chosen.0, chosen.1, chosen.2);
        let risk_reduction = current_risk - template_risk;

        Some(RewriteSuggestion {
            clause_id: String::new(),
            clause_type,
            original: clause_text.to_string(),
            suggested: template.text.to_string(),
            risk_reduction,
            template_level: template.level,
            similarity,
            diff_summary: diff::token_ops(clause_text, template.text),
            explanation: format!(
                "Replacing the current {} wording with the {} template ({}) lowers estimated \
                 exposure by {:.0} points.",
                clause_type.display_name(),
                level_name(template.level),
                template.jurisdiction,
                risk_reduction.max(0.0),
            ),
            negotiation_difficulty: NegotiationDifficulty::from_risk_reduction(risk_reduction),
        })
    }
}

fn level_name(level: TemplateLevel) -> &'static str {
    match level {
        TemplateLevel::Aggressive => "aggressive",
        TemplateLevel::MarketStandard => "market-standard",
        TemplateLevel::Balanced => "balanced",
        TemplateLevel::Protective => "protective",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexgraph_core::{EncoderError, HashingEncoder};

    fn engine() -> RewriteEngine {
        RewriteEngine::new(Arc::new(HashingEncoder::new()))
    }

    #[test]
    fn suggests_a_strictly_safer_template() {
        let suggestion = engine()
            .suggest(
                "Customer shall indemnify Provider from any and all claims without limitation.",
                ClauseType::Indemnification,
                70.0,
                None,
            )
            .expect("indemnification is covered");
        assert!(suggestion.risk_reduction > 0.0);
        assert!(suggestion.suggested.to_lowercase().contains("indemnify"));
        assert!(!suggestion.diff_summary.is_empty());
    }

    #[test]
    fn low_current_risk_falls_back_to_safest_template() {
        let suggestion = engine()
            .suggest(
                "Each party indemnifies the other, capped as provided elsewhere.",
                ClauseType::Indemnification,
                10.0,
                None,
            )
            .expect("fallback still suggests");
        assert_eq!(suggestion.template_level, TemplateLevel::Protective);
        assert!(suggestion.risk_reduction < 0.0);
    }

    #[test]
    fn preferred_level_is_respected() {
        let suggestion = engine()
            .suggest(
                "Either party may terminate at will.",
                ClauseType::Termination,
                90.0,
                Some(TemplateLevel::Balanced),
            )
            .unwrap();
        assert_eq!(suggestion.template_level, TemplateLevel::Balanced);
    }

    #[test]
    fn unknown_and_uncovered_kinds_yield_nothing() {
        assert!(engine().suggest("text", ClauseType::Unknown, 80.0, None).is_none());
        // Insurance has no templates in the bank.
        assert!(engine().suggest("insurance text", ClauseType::Insurance, 80.0, None).is_none());
    }

    #[test]
    fn difficulty_tracks_reduction() {
        let suggestion = engine()
            .suggest(
                "In no event shall Provider be liable for anything at all hereunder.",
                ClauseType::LimitationOfLiability,
                90.0,
                None,
            )
            .unwrap();
        assert_eq!(
            suggestion.negotiation_difficulty,
            NegotiationDifficulty::from_risk_reduction(suggestion.risk_reduction)
        );
    }

    struct FailingEncoder;
    impl Encoder for FailingEncoder {
        fn encode(&self, _: &[&str]) -> Result<Vec<Vec<f32>>, EncoderError> {
            Err(EncoderError::Unavailable("offline".into()))
        }
    }

    #[test]
    fn degraded_encoder_disables_suggestions() {
        let engine = RewriteEngine::new(Arc::new(FailingEncoder));
        assert!(engine
            .suggest("some clause", ClauseType::Termination, 80.0, None)
            .is_none());
    }
}
