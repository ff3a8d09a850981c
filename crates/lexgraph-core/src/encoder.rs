//! Sentence encoder abstraction.
//!
//! The pipeline never assumes a particular embedding provider: everything
//! downstream works against [`Encoder`], whose outputs are unit-normalized
//! `f32` vectors. [`HashingEncoder`] is the built-in implementation, a
//! deterministic 384-d feature-hashing bag-of-tokens encoder that needs no
//! ML runtime. A local ONNX model or a remote embedding service drops in
//! behind the same trait.

use thiserror::Error;

/// Embedding dimensionality used across the pipeline.
pub const EMBED_DIM: usize = 384;

/// Errors surfaced by an encoder implementation.
#[derive(Debug, Error)]
pub enum EncoderError {
    /// The backing model or service could not be reached. Callers fall
    /// back to non-semantic paths; this is never fatal to an analysis.
    #[error("encoder unavailable: {0}")]
    Unavailable(String),
    #[error("encoding failed: {0}")]
    Failed(String),
}

/// A batch sentence encoder producing unit-normalized vectors.
pub trait Encoder: Send + Sync {
    /// Encode a batch of texts. Output vectors are L2-normalized so the
    /// dot product of any two equals their cosine similarity.
    fn encode(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EncoderError>;

    /// Encode a single text.
    fn encode_one(&self, text: &str) -> Result<Vec<f32>, EncoderError> {
        let mut batch = self.encode(&[text])?;
        batch
            .pop()
            .ok_or_else(|| EncoderError::Failed("empty batch result".into()))
    }
}

/// Cosine similarity of two equal-length vectors.
///
/// Inputs are expected unit-normalized; the dot product is returned as-is
/// (zero vectors yield 0).
pub fn cosine(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// L2-normalize a vector in place. Zero vectors are left untouched.
pub fn l2_normalize(v: &mut [f32]) {
    let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
}

/// FNV-1a 64-bit hash. Used for token hashing and for seeding the
/// deterministic pseudo-embeddings of the graph attention network.
pub fn fnv1a64(bytes: &[u8]) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for &b in bytes {
        hash ^= b as u64;
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}

// SplitMix64 step; cheap deterministic stream for per-token directions.
fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// Function words excluded from hashing; they carry no clause signal and
/// would otherwise dominate every similarity.
const STOPWORDS: &[&str] = &[
    "the", "and", "for", "that", "this", "with", "from", "are", "was", "were", "has", "have",
    "had", "its", "any", "all", "may", "can", "not", "nor", "but", "such", "other", "each",
    "than", "then", "upon", "into", "out", "under", "over", "here", "there", "hereof",
    "herein", "hereto", "thereof", "shall", "must", "will", "party", "parties", "les", "des",
    "une", "aux", "par", "sur", "dans", "pour", "avec", "est", "sont", "qui", "que", "ses",
    "leur", "cette",
];

/// Deterministic feature-hashing sentence encoder.
///
/// Tokens are lowercased alphanumeric runs of length >= 2 minus a small
/// stopword list. Each token hashes to a pseudo-random unit direction in
/// the embedding space; directions are accumulated with sublinear
/// `1 + ln(tf)` weighting and the sum is L2-normalized. Two texts sharing
/// salient vocabulary therefore score high cosine similarity, which is all
/// the prototype classifier and the retrieval indexes require.
#[derive(Debug, Clone)]
pub struct HashingEncoder {
    dim: usize,
}

impl HashingEncoder {
    pub fn new() -> Self {
        HashingEncoder { dim: EMBED_DIM }
    }

    /// An encoder with a non-default dimensionality, for tests.
    pub fn with_dim(dim: usize) -> Self {
        HashingEncoder { dim }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    fn tokenize(text: &str) -> Vec<String> {
        let mut tokens = Vec::new();
        let mut current = String::new();
        for ch in text.chars() {
            if ch.is_alphanumeric() {
                current.extend(ch.to_lowercase());
            } else if !current.is_empty() {
                tokens.push(std::mem::take(&mut current));
            }
        }
        if !current.is_empty() {
            tokens.push(current);
        }
        tokens
            .into_iter()
            .filter(|t| t.len() >= 2 && !STOPWORDS.contains(&t.as_str()))
            .collect()
    }

    fn token_direction(&self, token: &str) -> Vec<f32> {
        let mut state = fnv1a64(token.as_bytes());
        let mut v = Vec::with_capacity(self.dim);
        for _ in 0..self.dim {
            let bits = splitmix64(&mut state);
            // Map the top 24 bits to [-1, 1).
            let unit = (bits >> 40) as f32 / (1u64 << 23) as f32 - 1.0;
            v.push(unit);
        }
        l2_normalize(&mut v);
        v
    }

    fn embed(&self, text: &str) -> Vec<f32> {
        let tokens = Self::tokenize(text);
        // Ordered map: accumulation order must be stable or float
        // rounding makes nominally equal embeddings differ bit-wise.
        let mut counts: std::collections::BTreeMap<String, usize> = std::collections::BTreeMap::new();
        for t in tokens {
            *counts.entry(t).or_insert(0) += 1;
        }
        let mut v = vec![0.0f32; self.dim];
        for (token, tf) in counts {
            let weight = 1.0 + (tf as f32).ln();
            let dir = self.token_direction(&token);
            for (acc, d) in v.iter_mut().zip(dir) {
                *acc += weight * d;
            }
        }
        l2_normalize(&mut v);
        v
    }
}

impl Default for HashingEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Encoder for HashingEncoder {
    fn encode(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EncoderError> {
        Ok(texts.iter().map(|t| self.embed(t)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn embeddings_are_unit_normalized() {
        let enc = HashingEncoder::new();
        let v = enc.encode_one("Either party may terminate this agreement").unwrap();
        assert_eq!(v.len(), EMBED_DIM);
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert_relative_eq!(norm, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn encoding_is_deterministic() {
        let enc = HashingEncoder::new();
        let a = enc.encode_one("indemnify defend hold harmless").unwrap();
        let b = enc.encode_one("indemnify defend hold harmless").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn shared_vocabulary_scores_higher() {
        let enc = HashingEncoder::new();
        let claim = enc
            .encode_one("Provider shall indemnify and hold harmless Client from claims")
            .unwrap();
        let indemnity = enc
            .encode_one("indemnify defend hold harmless claims losses damages")
            .unwrap();
        let payments = enc
            .encode_one("invoices due within thirty days interest accrues late payment")
            .unwrap();
        assert!(cosine(&claim, &indemnity) > cosine(&claim, &payments));
    }

    #[test]
    fn empty_text_yields_zero_vector() {
        let enc = HashingEncoder::new();
        let v = enc.encode_one("").unwrap();
        assert!(v.iter().all(|x| *x == 0.0));
        assert_eq!(cosine(&v, &v), 0.0);
    }

    #[test]
    fn batch_matches_single() {
        let enc = HashingEncoder::new();
        let batch = enc.encode(&["governing law of Delaware", "payment terms"]).unwrap();
        assert_eq!(batch[0], enc.encode_one("governing law of Delaware").unwrap());
        assert_eq!(batch[1], enc.encode_one("payment terms").unwrap());
    }

    #[test]
    fn fnv_is_stable() {
        // Reference value for the empty input per the FNV-1a offset basis.
        assert_eq!(fnv1a64(b""), 0xcbf2_9ce4_8422_2325);
        assert_ne!(fnv1a64(b"termination"), fnv1a64(b"indemnification"));
    }
}
