//! # lexgraph-classifier
//!
//! Zero-shot clause classification against the closed taxonomy.
//!
//! At construction the classifier encodes each taxonomy entry's combined
//! EN+FR description into a unit-norm prototype vector. Classification is
//! a cosine scan over the prototypes, followed by a deterministic
//! calibration pass: similarities become logits under a fixed temperature
//! and bias, a numerically stable softmax turns them into probabilities,
//! and the entropy and top-two margin of that distribution decide whether
//! the prediction needs human review.
//!
//! Raw cosine similarity is not a probability; the calibrated distribution
//! is deliberately soft, so downstream consumers compare probabilities
//! against the uniform baseline rather than against absolute thresholds.

use std::sync::Arc;

use tracing::{debug, warn};

use lexgraph_core::{
    Chunk, ClassifiedClause, ClauseType, Encoder, Language, TopPrediction, EMBED_DIM,
};

/// Softmax temperature applied to cosine logits.
const TEMPERATURE: f64 = 2.5;
/// Additive bias applied to cosine logits before scaling.
const BIAS: f64 = -0.8;
/// Review threshold on the calibrated top-two margin.
const MARGIN_FLOOR: f64 = 0.08;
/// Review threshold on the normalized entropy.
const ENTROPY_CEIL: f64 = 0.75;

/// French function-word markers for language detection.
const FR_MARKERS: &[&str] = &[
    "le", "la", "les", "de", "des", "du", "au", "aux", "et", "ou", "dans", "pour", "avec",
    "sur", "par", "ne", "pas", "etre", "sont", "est", "doit", "doivent", "cette", "une",
];

/// Prototype-index clause classifier.
pub struct ClauseClassifier {
    encoder: Arc<dyn Encoder>,
    /// Unit-norm prototype per classifiable kind, in `ClauseType::ALL`
    /// order. `None` when the encoder was unavailable at construction;
    /// classification then degrades to the unknown fallback.
    prototypes: Option<Vec<Vec<f32>>>,
}

impl ClauseClassifier {
    /// Build the prototype index. Encoder failure is not fatal: the
    /// classifier is still constructed and every input classifies as
    /// `Unknown` with maximum entropy until the encoder recovers.
    pub fn new(encoder: Arc<dyn Encoder>) -> Self {
        let texts: Vec<String> = ClauseType::ALL
            .iter()
            .map(|kind| {
                let d = kind
                    .descriptor()
                    .unwrap_or_else(|| unreachable!("descriptor for {kind}"));
                format!("{} {}", d.description_en, d.description_fr)
            })
            .collect();
        let refs: Vec<&str> = texts.iter().map(|s| s.as_str()).collect();

        let prototypes = match encoder.encode(&refs) {
            Ok(vectors) => {
                debug!(prototypes = vectors.len(), "prototype index built");
                Some(vectors)
            }
            Err(e) => {
                warn!("prototype encoding failed, classifier degraded: {e}");
                None
            }
        };
        ClauseClassifier { encoder, prototypes }
    }

    /// Number of classes in the calibrated distribution.
    pub fn num_classes(&self) -> usize {
        ClauseType::ALL.len()
    }

    /// Classify a single chunk.
    pub fn classify(&self, chunk: &Chunk) -> ClassifiedClause {
        self.classify_batch(std::slice::from_ref(chunk))
            .pop()
            .unwrap_or_else(|| unreachable!("batch of one yields one"))
    }

    /// Classify a batch of chunks with one encoder call.
    pub fn classify_batch(&self, chunks: &[Chunk]) -> Vec<ClassifiedClause> {
        if chunks.is_empty() {
            return Vec::new();
        }

        let prototypes = match &self.prototypes {
            Some(p) => p,
            None => return chunks.iter().map(|c| unknown_clause(c)).collect(),
        };

        // One encode call for the whole contract; empty texts are skipped
        // and classified as unknown.
        let mut non_empty: Vec<usize> = Vec::new();
        let mut texts: Vec<&str> = Vec::new();
        for (i, chunk) in chunks.iter().enumerate() {
            if !chunk.text.trim().is_empty() {
                non_empty.push(i);
                texts.push(chunk.text.as_str());
            }
        }

        let embeddings = if texts.is_empty() {
            Vec::new()
        } else {
            match self.encoder.encode(&texts) {
                Ok(e) => e,
                Err(e) => {
                    warn!("batch encoding failed, classifying as unknown: {e}");
                    return chunks.iter().map(|c| unknown_clause(c)).collect();
                }
            }
        };

        let mut out: Vec<ClassifiedClause> = chunks.iter().map(|c| unknown_clause(c)).collect();
        for (slot, embedding) in non_empty.into_iter().zip(embeddings) {
            out[slot] = self.classify_embedded(&chunks[slot], &embedding, prototypes);
        }
        out
    }

    fn classify_embedded(
        &self,
        chunk: &Chunk,
        embedding: &[f32],
        prototypes: &[Vec<f32>],
    ) -> ClassifiedClause {
        if prototypes.first().map(|p| p.len()) != Some(embedding.len()) {
            warn!(
                got = embedding.len(),
                expected = EMBED_DIM,
                "embedding dimensionality mismatch, classifying as unknown"
            );
            return unknown_clause(chunk);
        }

        let sims: Vec<f64> = prototypes
            .iter()
            .map(|p| lexgraph_core::cosine(p, embedding) as f64)
            .collect();

        let (best_idx, &raw_confidence) = sims
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .unwrap_or((0, &0.0));
        let clause_type = ClauseType::ALL[best_idx];

        let probs = calibrate(&sims);
        let calibrated_confidence = probs[best_idx];
        let entropy_ratio = normalized_entropy(&probs);
        let margin = top_two_margin(&probs);
        let needs_review = margin < MARGIN_FLOOR || entropy_ratio > ENTROPY_CEIL;

        // Top 3 kinds, probabilities renormalized to sum to 1.
        let mut order: Vec<usize> = (0..probs.len()).collect();
        order.sort_by(|&a, &b| probs[b].total_cmp(&probs[a]));
        let top: Vec<usize> = order.into_iter().take(3).collect();
        let top_mass: f64 = top.iter().map(|&i| probs[i]).sum();
        let top_k = top
            .iter()
            .map(|&i| TopPrediction {
                clause_type: ClauseType::ALL[i],
                probability: if top_mass > 0.0 { probs[i] / top_mass } else { 0.0 },
            })
            .collect();

        let language = detect_language(&chunk.text);

        ClassifiedClause {
            id: chunk.id.clone(),
            text: chunk.text.clone(),
            header: chunk.header.clone(),
            start_pos: chunk.start_pos,
            end_pos: chunk.end_pos,
            coherence: chunk.coherence,
            clause_type,
            raw_confidence,
            calibrated_confidence,
            entropy_ratio,
            margin,
            needs_review,
            top_k,
            risk_weight: clause_type.risk_weight(),
            category: clause_type
                .category()
                .map(|c| c.as_str().to_string())
                .unwrap_or_else(|| "unknown".to_string()),
            language,
        }
    }
}

/// Temperature/bias calibration: treat similarities as logits and apply a
/// numerically stable softmax (max subtraction before exponentiation).
fn calibrate(sims: &[f64]) -> Vec<f64> {
    let logits: Vec<f64> = sims.iter().map(|s| (s + BIAS) / TEMPERATURE).collect();
    let max = logits.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = logits.iter().map(|l| (l - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    if sum <= 0.0 {
        let uniform = 1.0 / sims.len().max(1) as f64;
        return vec![uniform; sims.len()];
    }
    exps.into_iter().map(|e| e / sum).collect()
}

/// Shannon entropy of the distribution over the entropy of the uniform
/// distribution: 0 = certain, 1 = uniform.
fn normalized_entropy(probs: &[f64]) -> f64 {
    if probs.len() < 2 {
        return 0.0;
    }
    let h: f64 = probs
        .iter()
        .filter(|&&p| p > 0.0)
        .map(|&p| -p * p.ln())
        .sum();
    (h / (probs.len() as f64).ln()).clamp(0.0, 1.0)
}

/// Gap between the two largest probabilities.
fn top_two_margin(probs: &[f64]) -> f64 {
    let mut first = 0.0f64;
    let mut second = 0.0f64;
    for &p in probs {
        if p > first {
            second = first;
            first = p;
        } else if p > second {
            second = p;
        }
    }
    first - second
}

/// Count French function-word hits; three or more label the clause `fr`.
/// Purely informational; classification is language-agnostic because the
/// prototypes combine both languages.
fn detect_language(text: &str) -> Language {
    let mut hits = 0usize;
    for token in text.split(|c: char| !c.is_alphanumeric()) {
        if token.is_empty() {
            continue;
        }
        let lower = token.to_lowercase();
        if FR_MARKERS.contains(&lower.as_str()) {
            hits += 1;
            if hits >= 3 {
                return Language::Fr;
            }
        }
    }
    Language::En
}

/// Fallback classification for empty input or a degraded encoder: unknown
/// kind at the uniform baseline, flagged for review.
fn unknown_clause(chunk: &Chunk) -> ClassifiedClause {
    let k = ClauseType::ALL.len() as f64;
    ClassifiedClause {
        id: chunk.id.clone(),
        text: chunk.text.clone(),
        header: chunk.header.clone(),
        start_pos: chunk.start_pos,
        end_pos: chunk.end_pos,
        coherence: chunk.coherence,
        clause_type: ClauseType::Unknown,
        raw_confidence: 0.0,
        calibrated_confidence: 1.0 / k,
        entropy_ratio: 1.0,
        margin: 0.0,
        needs_review: true,
        top_k: Vec::new(),
        risk_weight: ClauseType::Unknown.risk_weight(),
        category: "unknown".to_string(),
        language: detect_language(&chunk.text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use lexgraph_core::HashingEncoder;
    use proptest::prelude::*;

    fn chunk(text: &str) -> Chunk {
        Chunk {
            id: "section_0".into(),
            text: text.into(),
            header: String::new(),
            start_pos: 0,
            end_pos: text.len(),
            coherence: 0.7,
        }
    }

    fn classifier() -> ClauseClassifier {
        ClauseClassifier::new(Arc::new(HashingEncoder::new()))
    }

    #[test]
    fn governing_law_clause_classifies_correctly() {
        let c = classifier().classify(&chunk(
            "This Agreement shall be governed by and construed in accordance with the laws \
             of the State of Delaware, without regard to conflict of laws principles, and \
             the parties submit to the exclusive jurisdiction of the courts located there.",
        ));
        assert_eq!(c.clause_type, ClauseType::GoverningLaw);
        assert!(c.raw_confidence > 0.2, "raw = {}", c.raw_confidence);
        assert!(c.calibrated_confidence > 1.0 / 15.0);
    }

    #[test]
    fn indemnification_clause_classifies_correctly() {
        let c = classifier().classify(&chunk(
            "Provider shall indemnify, defend and hold harmless Client and its officers \
             from and against any third party claims, losses, damages and expenses \
             including reasonable attorneys fees arising out of Provider's breach.",
        ));
        assert_eq!(c.clause_type, ClauseType::Indemnification);
        assert_eq!(c.category, "risk_allocation");
        assert!((c.risk_weight - 0.9).abs() < 1e-9);
    }

    #[test]
    fn calibration_invariants_hold() {
        let c = classifier().classify(&chunk(
            "Neither party shall be liable for indirect, incidental or consequential \
             damages; aggregate liability shall not exceed the fees paid in the twelve \
             months preceding the claim.",
        ));
        assert!((0.0..=1.0).contains(&c.calibrated_confidence));
        assert!((0.0..=1.0).contains(&c.entropy_ratio));
        assert!(c.margin >= 0.0);
        assert_eq!(c.top_k.len(), 3);
        let mass: f64 = c.top_k.iter().map(|t| t.probability).sum();
        assert_relative_eq!(mass, 1.0, epsilon = 1e-6);
        assert_eq!(c.needs_review, c.margin < 0.08 || c.entropy_ratio > 0.75);
    }

    #[test]
    fn empty_text_returns_unknown_max_entropy() {
        let c = classifier().classify(&chunk("   "));
        assert_eq!(c.clause_type, ClauseType::Unknown);
        assert_relative_eq!(c.calibrated_confidence, 1.0 / 15.0, epsilon = 1e-9);
        assert_eq!(c.entropy_ratio, 1.0);
        assert!(c.needs_review);
    }

    #[test]
    fn batch_matches_individual_classification() {
        let clf = classifier();
        let chunks = vec![
            chunk("This Agreement shall be governed by the laws of Delaware."),
            chunk("Either party may terminate for convenience upon thirty days notice."),
        ];
        let batch = clf.classify_batch(&chunks);
        for (c, single) in batch.iter().zip(chunks.iter().map(|c| clf.classify(c))) {
            assert_eq!(c.clause_type, single.clause_type);
            assert_relative_eq!(
                c.calibrated_confidence,
                single.calibrated_confidence,
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn french_text_detected() {
        let c = classifier().classify(&chunk(
            "Chaque partie garde secretes les informations confidentielles de la partie \
             divulgatrice et les utilise uniquement aux fins du contrat pour la duree.",
        ));
        assert_eq!(c.language, Language::Fr);
    }

    #[test]
    fn english_text_detected() {
        let c = classifier().classify(&chunk(
            "Each party shall keep the other party's information secret at all times.",
        ));
        assert_eq!(c.language, Language::En);
    }

    struct FailingEncoder;
    impl Encoder for FailingEncoder {
        fn encode(&self, _texts: &[&str]) -> Result<Vec<Vec<f32>>, lexgraph_core::EncoderError> {
            Err(lexgraph_core::EncoderError::Unavailable("offline".into()))
        }
    }

    #[test]
    fn degraded_encoder_yields_unknown_not_error() {
        let clf = ClauseClassifier::new(Arc::new(FailingEncoder));
        let c = clf.classify(&chunk("Provider shall indemnify Client."));
        assert_eq!(c.clause_type, ClauseType::Unknown);
        assert!(c.needs_review);
    }

    proptest! {
        #[test]
        fn softmax_is_a_distribution(sims in proptest::collection::vec(-1.0f64..1.0, 2..20)) {
            let probs = calibrate(&sims);
            let sum: f64 = probs.iter().sum();
            prop_assert!((sum - 1.0).abs() < 1e-9);
            prop_assert!(probs.iter().all(|p| (0.0..=1.0).contains(p)));
        }

        #[test]
        fn entropy_ratio_bounded(sims in proptest::collection::vec(-1.0f64..1.0, 2..20)) {
            let probs = calibrate(&sims);
            let h = normalized_entropy(&probs);
            prop_assert!((0.0..=1.0).contains(&h));
        }
    }
}
