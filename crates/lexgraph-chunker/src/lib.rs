//! # lexgraph-chunker
//!
//! Splits contract text into coherent chunks.
//!
//! Well-structured contracts are split on numbered section headers. For
//! everything else the chunker slides a window of sentences through the
//! text, embeds each window, and places boundaries where the similarity
//! between consecutive windows drops, which marks a topic shift. Chunks shorter than
//! the floor are merged into their predecessor; chunks over the ceiling
//! are split at paragraph breaks. If no strategy produces usable chunks,
//! a double-newline paragraph split is the last resort.

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use lexgraph_core::{Chunk, Encoder};

/// Start-of-line numbered section header, optionally prefixed with
/// Section/Article/Clause. Split-before semantics are implemented by
/// slicing between match start offsets (the regex engine has no
/// look-ahead).
static HEADER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*(?:(?i:section|article|clause)[ \t]+)?\d{1,2}\.\s+[A-Z]")
        .expect("static header pattern")
});

/// Numbered header appearing mid-sentence after a newline.
static INLINE_HEADER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\n[ \t]*\d{1,2}\.\s+[A-Z]")
        .expect("static inline header pattern")
});

/// Leading section-number prefix of a header line.
static HEADER_PREFIX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?i:(?:section|article|clause)\s+)?\d{1,2}\.?\s*(.+)$")
        .expect("static header prefix pattern")
});

/// Tuning knobs for the chunker.
#[derive(Debug, Clone)]
pub struct ChunkerConfig {
    /// Sentences per sliding window.
    pub window_size: usize,
    /// Absolute similarity ceiling for the adaptive boundary threshold.
    pub threshold: f64,
    pub min_chunk_chars: usize,
    pub max_chunk_chars: usize,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        ChunkerConfig {
            window_size: 3,
            threshold: 0.40,
            min_chunk_chars: 80,
            max_chunk_chars: 3000,
        }
    }
}

/// Embedding-driven contract chunker.
pub struct SemanticChunker {
    encoder: Arc<dyn Encoder>,
    config: ChunkerConfig,
}

impl SemanticChunker {
    pub fn new(encoder: Arc<dyn Encoder>) -> Self {
        Self::with_config(encoder, ChunkerConfig::default())
    }

    pub fn with_config(encoder: Arc<dyn Encoder>, config: ChunkerConfig) -> Self {
        SemanticChunker { encoder, config }
    }

    /// Split contract text into ordered chunks.
    ///
    /// Strategy ladder: numbered-section regex when it yields at least 4
    /// sections, then windowed-embedding boundary detection, then a
    /// paragraph split. Never fails; degenerate input yields few (or no)
    /// chunks.
    pub fn chunk(&self, text: &str) -> Vec<Chunk> {
        let regex_chunks = self.regex_sections(text);
        if regex_chunks.len() >= 4 {
            debug!(sections = regex_chunks.len(), "regex chunking");
            return regex_chunks;
        }

        let semantic = self.chunk_semantic(text);
        if !semantic.is_empty() {
            return semantic;
        }

        self.paragraph_fallback(text)
    }

    /// Regex-only chunking, used directly when semantic chunking is
    /// disabled by pipeline options. Falls back to paragraphs below 4
    /// sections.
    pub fn chunk_regex(&self, text: &str) -> Vec<Chunk> {
        let sections = self.regex_sections(text);
        if sections.len() >= 4 {
            return sections;
        }
        self.paragraph_fallback(text)
    }

    fn regex_sections(&self, text: &str) -> Vec<Chunk> {
        let starts: Vec<usize> = HEADER_RE.find_iter(text).map(|m| m.start()).collect();
        if starts.is_empty() {
            return Vec::new();
        }

        let mut offsets = Vec::with_capacity(starts.len() + 1);
        if starts[0] > 0 {
            offsets.push(0);
        }
        offsets.extend(starts);
        offsets.push(text.len());

        let mut chunks = Vec::new();
        for pair in offsets.windows(2) {
            let raw = text[pair[0]..pair[1]].trim();
            if raw.len() < self.config.min_chunk_chars {
                continue;
            }
            let body = truncate_chars(raw, self.config.max_chunk_chars);
            chunks.push(Chunk {
                id: format!("section_{}", chunks.len()),
                text: body.to_string(),
                header: extract_header(raw),
                start_pos: pair[0],
                end_pos: pair[0] + body.len(),
                // Structured text is assumed reasonably coherent.
                coherence: 0.7,
            });
        }
        chunks
    }

    fn chunk_semantic(&self, text: &str) -> Vec<Chunk> {
        let sentences = split_sentences(text);
        if sentences.len() < self.config.window_size * 2 {
            return Vec::new();
        }

        let windows: Vec<String> = sentences
            .windows(self.config.window_size)
            .map(|w| w.join(" "))
            .collect();
        let window_refs: Vec<&str> = windows.iter().map(|s| s.as_str()).collect();

        let embeddings = match self.encoder.encode(&window_refs) {
            Ok(e) => e,
            Err(e) => {
                warn!("window encoding failed, falling back to paragraphs: {e}");
                return Vec::new();
            }
        };

        let sims: Vec<f64> = embeddings
            .windows(2)
            .map(|pair| lexgraph_core::cosine(&pair[0], &pair[1]) as f64)
            .collect();
        if sims.is_empty() {
            return Vec::new();
        }

        let boundaries = self.find_boundaries(&sims, sentences.len());
        debug!(
            sentences = sentences.len(),
            boundaries = boundaries.len(),
            "semantic chunking"
        );
        self.build_chunks(&sentences, &boundaries, &sims)
    }

    /// Boundary selection with an adaptive threshold: a split lands where
    /// similarity dips below `max(0.2, min(threshold, mean - 0.5*std))`,
    /// or at a strict local minimum below `mean - 0.3*std`.
    fn find_boundaries(&self, sims: &[f64], n_sentences: usize) -> Vec<usize> {
        let mean = sims.iter().sum::<f64>() / sims.len() as f64;
        let std = if sims.len() > 2 {
            let var = sims.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / sims.len() as f64;
            var.sqrt()
        } else {
            0.1
        };
        let adaptive = (mean - 0.5 * std).min(self.config.threshold).max(0.2);

        let mut boundaries = Vec::new();
        for (i, &sim) in sims.iter().enumerate() {
            let local_min = (i == 0 || sims[i - 1] > sim)
                && (i + 1 == sims.len() || sims[i + 1] > sim);
            if sim < adaptive || (local_min && sim < mean - 0.3 * std) {
                let sent_idx = i + self.config.window_size;
                if sent_idx < n_sentences {
                    boundaries.push(sent_idx);
                }
            }
        }
        boundaries.dedup();
        boundaries
    }

    fn build_chunks(&self, sentences: &[String], boundaries: &[usize], sims: &[f64]) -> Vec<Chunk> {
        let mut cuts = Vec::with_capacity(boundaries.len() + 2);
        cuts.push(0);
        cuts.extend_from_slice(boundaries);
        cuts.push(sentences.len());

        let mut chunks: Vec<Chunk> = Vec::new();
        for pair in cuts.windows(2) {
            let (start, end) = (pair[0], pair[1]);
            if start >= end {
                continue;
            }
            let text = sentences[start..end].join(" ").trim().to_string();
            if text.is_empty() {
                continue;
            }

            // Undersized chunks merge into their predecessor.
            if text.len() < self.config.min_chunk_chars {
                if let Some(last) = chunks.last_mut() {
                    last.text.push(' ');
                    last.text.push_str(&text);
                    last.end_pos += text.len() + 1;
                    continue;
                }
            }

            if text.len() > self.config.max_chunk_chars {
                let base = chunks.len();
                chunks.extend(self.split_oversized(&text, base));
                continue;
            }

            let coherence = {
                let lo = start.saturating_sub(1);
                let hi = end.min(sims.len());
                if lo < hi {
                    sims[lo..hi].iter().sum::<f64>() / (hi - lo) as f64
                } else {
                    0.5
                }
            };
            let start_pos: usize = sentences[..start].iter().map(|s| s.len() + 1).sum();

            chunks.push(Chunk {
                id: format!("section_{}", chunks.len()),
                text: text.clone(),
                header: extract_header(&text),
                start_pos,
                end_pos: start_pos + text.len(),
                coherence,
            });
        }
        chunks
    }

    fn split_oversized(&self, text: &str, base: usize) -> Vec<Chunk> {
        let mut parts: Vec<String> = Vec::new();
        let mut current = String::new();
        for para in text.split("\n\n") {
            if !current.is_empty() && current.len() + para.len() > self.config.max_chunk_chars {
                parts.push(std::mem::take(&mut current));
            }
            if current.is_empty() {
                current = para.to_string();
            } else {
                current.push_str("\n\n");
                current.push_str(para);
            }
        }
        if !current.trim().is_empty() {
            parts.push(current);
        }

        parts
            .into_iter()
            .enumerate()
            .map(|(i, part)| {
                let part = part.trim().to_string();
                Chunk {
                    id: format!("section_{}", base + i),
                    header: extract_header(&part),
                    start_pos: 0,
                    end_pos: part.len(),
                    coherence: 0.5,
                    text: part,
                }
            })
            .collect()
    }

    fn paragraph_fallback(&self, text: &str) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        let mut offset = 0usize;
        for para in text.split("\n\n") {
            let trimmed = para.trim();
            if trimmed.len() > 30 {
                let body = truncate_chars(trimmed, self.config.max_chunk_chars);
                chunks.push(Chunk {
                    id: format!("clause_{}", chunks.len()),
                    text: body.to_string(),
                    header: extract_header(trimmed),
                    start_pos: offset,
                    end_pos: offset + body.len(),
                    coherence: 0.5,
                });
            }
            offset += para.len() + 2;
        }
        chunks
    }
}

/// Split text into sentences.
///
/// Common abbreviations are neutralized first so "e.g." does not end a
/// sentence; the scanner then breaks after `[.!?;]` followed by whitespace
/// and a capital, digit, opening paren or quote. Numbered headers embedded
/// mid-sentence force an extra split.
fn split_sentences(text: &str) -> Vec<String> {
    let mut clean = text.to_string();
    for (abbr, repl) in [
        ("e.g.", "eg"),
        ("i.e.", "ie"),
        ("etc.", "etc"),
        ("vs.", "vs"),
        ("No.", "No"),
        ("Art.", "Art"),
        ("Sec.", "Sec"),
        ("Ltd.", "Ltd"),
        ("Inc.", "Inc"),
        ("Corp.", "Corp"),
    ] {
        clean = clean.replace(abbr, repl);
    }

    let bytes: Vec<char> = clean.chars().collect();
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut i = 0;
    while i < bytes.len() {
        let ch = bytes[i];
        current.push(ch);
        if matches!(ch, '.' | '!' | '?' | ';') {
            // Look ahead: whitespace then a sentence-opening character.
            let mut j = i + 1;
            let mut saw_ws = false;
            while j < bytes.len() && bytes[j].is_whitespace() {
                saw_ws = true;
                j += 1;
            }
            if saw_ws
                && j < bytes.len()
                && (bytes[j].is_ascii_uppercase()
                    || bytes[j].is_ascii_digit()
                    || bytes[j] == '('
                    || bytes[j] == '"')
            {
                sentences.push(std::mem::take(&mut current));
                i = j;
                continue;
            }
        }
        i += 1;
    }
    if !current.trim().is_empty() {
        sentences.push(current);
    }

    // Numbered headers inside a sentence start a new one.
    let mut expanded = Vec::new();
    for sent in sentences {
        let mut last = 0usize;
        for m in INLINE_HEADER_RE.find_iter(&sent) {
            // The match begins at the newline; split just after it.
            let cut = m.start() + 1;
            if cut > last {
                expanded.push(sent[last..cut].to_string());
                last = cut;
            }
        }
        expanded.push(sent[last..].to_string());
    }

    expanded
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| s.len() > 15)
        .collect()
}

/// First line of a chunk, with any section-number prefix stripped, at most
/// 80 characters.
fn extract_header(text: &str) -> String {
    let first_line = text.lines().next().unwrap_or("").trim();
    let header = HEADER_PREFIX_RE
        .captures(first_line)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim())
        .unwrap_or(first_line);
    truncate_chars(header, 80).to_string()
}

/// Truncate at a char boundary, never mid-codepoint.
fn truncate_chars(s: &str, max: usize) -> &str {
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
    use lexgraph_core::HashingEncoder;

    fn chunker() -> SemanticChunker {
        SemanticChunker::new(Arc::new(HashingEncoder::new()))
    }

    const STRUCTURED: &str = "\
MASTER SERVICE AGREEMENT

1. INDEMNIFICATION. Provider shall indemnify, defend and hold harmless Client from any \
third party claims, losses and damages arising out of Provider's breach of this Agreement.

2. LIMITATION OF LIABILITY. Neither party shall be liable for indirect or consequential \
damages. Aggregate liability shall not exceed the fees paid in the prior twelve months.

3. TERMINATION. Either party may terminate this Agreement for convenience upon thirty days \
prior written notice, or for cause upon material breach that remains uncured.

4. CONFIDENTIALITY. Each party shall keep the other party's confidential information \
secret and use it solely for the purposes of this Agreement for a period of five years.

5. GOVERNING LAW. This Agreement shall be governed by the laws of the State of Delaware, \
without regard to its conflict of laws principles.

6. PAYMENT TERMS. Client shall pay all undisputed invoices within thirty days of receipt. \
Late payments accrue interest at one percent per month.";

    #[test]
    fn structured_contract_splits_on_sections() {
        let chunks = chunker().chunk(STRUCTURED);
        assert!(chunks.len() >= 6, "expected 6+ sections, got {}", chunks.len());
        assert!(chunks.iter().any(|c| c.header.contains("INDEMNIFICATION")));
        assert!(chunks.iter().any(|c| c.header.contains("PAYMENT")));
        for c in &chunks {
            assert!(c.text.len() <= 3000);
            assert!(c.id.starts_with("section_"));
        }
    }

    #[test]
    fn headers_strip_section_numbers() {
        let chunks = chunker().chunk(STRUCTURED);
        let gov = chunks.iter().find(|c| c.text.contains("Delaware")).unwrap();
        assert!(gov.header.starts_with("GOVERNING LAW"), "header: {}", gov.header);
    }

    #[test]
    fn short_text_falls_back_to_paragraphs() {
        let text = "Provider shall indemnify Client without limitation.";
        let chunks = chunker().chunk(text);
        assert_eq!(chunks.len(), 1);
        assert!(chunks[0].id.starts_with("clause_"));
    }

    #[test]
    fn tiny_fragments_are_dropped() {
        let chunks = chunker().chunk("Too short.\n\nAlso short.");
        assert!(chunks.is_empty());
    }

    #[test]
    fn unstructured_long_text_produces_ordered_chunks() {
        // Three topics with no numbered headers; enough sentences for the
        // semantic path.
        let text = "The supplier shall deliver the goods to the warehouse each week. \
The supplier shall package all goods for transport safely. Deliveries arrive on Monday \
mornings before nine. The delivery schedule may be adjusted by mutual agreement. \
Confidential information must be protected by both parties at all times. Neither party \
may disclose confidential records to any third person. All confidential documents shall \
be returned upon request of the disclosing party. Trade secrets remain protected for five \
years after expiry. Payment of invoices is due within thirty days of the invoice date. \
Interest accrues daily on all overdue and unpaid invoice amounts. The customer pays all \
bank transfer charges for payments. Disputed invoice amounts follow the notice procedure.";
        let chunks = chunker().chunk(text);
        assert!(!chunks.is_empty());
        let mut pos = 0;
        for c in &chunks {
            assert!(c.start_pos >= pos || c.start_pos == 0);
            pos = c.start_pos;
            assert!((0.0..=1.0).contains(&c.coherence) || c.coherence <= 1.0);
        }
    }

    #[test]
    fn regex_only_mode_respects_sections() {
        let chunks = chunker().chunk_regex(STRUCTURED);
        assert!(chunks.len() >= 6);
    }

    #[test]
    fn sentences_ignore_abbreviations() {
        let sents = split_sentences(
            "The parties agree, e.g. by signature, to the terms stated here. A new sentence \
             then follows for the avoidance of doubt.",
        );
        assert_eq!(sents.len(), 2);
    }

    #[test]
    fn oversized_chunks_are_split() {
        let para = "word ".repeat(400);
        let big = format!("{}\n\n{}", para, para);
        let config = ChunkerConfig { max_chunk_chars: 1500, ..Default::default() };
        let chunker = SemanticChunker::with_config(Arc::new(HashingEncoder::new()), config);
        let chunks = chunker.chunk(&big);
        assert!(chunks.iter().all(|c| c.text.len() <= 2000));
    }
}
