//! # lexgraph-gat
//!
//! A two-layer multi-head graph attention network over the contract
//! clause graph, in pure dense linear algebra. Weights are
//! Xavier-initialized from a fixed seed with a calibration bias on the
//! risk head: a deterministic heuristic scorer, not a trained model.
//! Scores are ordinal risk signals, one voice among the overlay's four.
//!
//! Node features are `[384-d embedding | calibrated confidence |
//! risk weight | 14-d category one-hot]` = 400-d. When no true embedding
//! is supplied, a deterministic pseudo-embedding is generated from a hash
//! of the clause kind, so the network runs without any encoder at all.

mod kernel;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use lexgraph_core::{
    catalog, fnv1a64, l2_normalize, AttentionEdge, ClauseType, GatScores, NodeRisk, Report,
    MISSING_PREFIX,
};

use kernel::{elu, leaky_relu, matmul, relu, row_softmax, sigmoid};

/// Embedding slice of the node feature vector.
const EMBED_DIM: usize = 384;
/// Full node feature width: embedding + confidence + risk weight + one-hot.
const FEATURE_DIM: usize = EMBED_DIM + 2 + 14;
/// First layer output width.
const HIDDEN_DIM: usize = 256;
/// Second layer output width.
const OUT_DIM: usize = 128;
/// Attention heads per layer.
const HEADS: usize = 4;
/// Risk head hidden width.
const RISK_HIDDEN: usize = 32;
/// LeakyReLU slope for attention logits.
const LEAKY_SLOPE: f32 = 0.2;
/// Weight init seed; fixed for reproducibility.
const INIT_SEED: u64 = 42;
/// Output bias reflecting that most clauses carry some risk.
const RISK_CALIBRATION_BIAS: f32 = 0.4;
/// Edges surfaced for explanation.
const TOP_EDGES: usize = 10;

struct HeadParams {
    /// `in_dim x head_dim`, row-major.
    w: Vec<f32>,
    a_src: Vec<f32>,
    a_dst: Vec<f32>,
    bias: Vec<f32>,
}

struct GatLayer {
    in_dim: usize,
    head_dim: usize,
    heads: Vec<HeadParams>,
}

impl GatLayer {
    fn init(rng: &mut StdRng, in_dim: usize, out_dim: usize) -> Self {
        let head_dim = out_dim / HEADS;
        let heads = (0..HEADS)
            .map(|_| HeadParams {
                w: xavier(rng, in_dim, head_dim),
                a_src: xavier(rng, head_dim, 1),
                a_dst: xavier(rng, head_dim, 1),
                bias: vec![0.0; head_dim],
            })
            .collect();
        GatLayer { in_dim, head_dim, heads }
    }

    /// One attention layer over `n` nodes.
    ///
    /// Returns the concatenated head outputs after ELU and the attention
    /// matrix averaged across heads.
    fn forward(
        &self,
        x: &[f32],
        n: usize,
        adj: &[bool],
        edge_weights: &[f32],
    ) -> (Vec<f32>, Vec<f32>) {
        let out_dim = self.head_dim * HEADS;
        let mut out = vec![0.0f32; n * out_dim];
        let mut attn_avg = vec![0.0f32; n * n];

        for (h, head) in self.heads.iter().enumerate() {
            let wh = matmul(x, n, self.in_dim, &head.w, self.head_dim);

            let src: Vec<f32> = (0..n)
                .map(|i| dot(&head.a_src, &wh[i * self.head_dim..(i + 1) * self.head_dim]))
                .collect();
            let dst: Vec<f32> = (0..n)
                .map(|j| dot(&head.a_dst, &wh[j * self.head_dim..(j + 1) * self.head_dim]))
                .collect();

            // Attention logits, masked to the adjacency; known edge
            // severities enter as a log-weight term.
            let mut attn = vec![f32::NEG_INFINITY; n * n];
            for i in 0..n {
                for j in 0..n {
                    if adj[i * n + j] {
                        let mut e = leaky_relu(src[i] + dst[j], LEAKY_SLOPE);
                        let w = edge_weights[i * n + j];
                        if w > 0.0 {
                            e += (w + 1e-6).ln();
                        }
                        attn[i * n + j] = e;
                    }
                }
            }
            row_softmax(&mut attn, n, n);

            let head_out = matmul(&attn, n, n, &wh, self.head_dim);
            for i in 0..n {
                for d in 0..self.head_dim {
                    out[i * out_dim + h * self.head_dim + d] =
                        head_out[i * self.head_dim + d] + head.bias[d];
                }
            }
            for (acc, a) in attn_avg.iter_mut().zip(&attn) {
                *acc += a / HEADS as f32;
            }
        }

        for v in out.iter_mut() {
            *v = elu(*v);
        }
        (out, attn_avg)
    }
}

/// The contract graph attention network.
pub struct ContractGat {
    layer1: GatLayer,
    layer2: GatLayer,
    risk_w1: Vec<f32>,
    risk_b1: Vec<f32>,
    risk_w2: Vec<f32>,
    risk_b2: f32,
}

impl Default for ContractGat {
    fn default() -> Self {
        Self::new()
    }
}

impl ContractGat {
    pub fn new() -> Self {
        let mut rng = StdRng::seed_from_u64(INIT_SEED);
        let layer1 = GatLayer::init(&mut rng, FEATURE_DIM, HIDDEN_DIM);
        let layer2 = GatLayer::init(&mut rng, HIDDEN_DIM, OUT_DIM);
        let risk_w1 = xavier(&mut rng, OUT_DIM, RISK_HIDDEN);
        let risk_b1 = vec![0.0; RISK_HIDDEN];
        let risk_w2 = xavier(&mut rng, RISK_HIDDEN, 1);
        ContractGat {
            layer1,
            layer2,
            risk_w1,
            risk_b1,
            risk_w2,
            risk_b2: RISK_CALIBRATION_BIAS,
        }
    }

    /// Run the network over a report using pseudo-embeddings.
    pub fn forward(&self, report: &Report) -> GatScores {
        self.forward_with_embeddings(report, None)
    }

    /// Run the network, consuming true clause embeddings when supplied
    /// (one per classification, 384-d).
    pub fn forward_with_embeddings(
        &self,
        report: &Report,
        embeddings: Option<&[Vec<f32>]>,
    ) -> GatScores {
        let n = report.classifications.len();
        if n == 0 {
            return GatScores::empty();
        }

        let x = node_features(report, embeddings);
        let (adj, edge_weights) = adjacency(report, n);

        let (h1, _attn1) = self.layer1.forward(&x, n, &adj, &edge_weights);
        let (h2, attn2) = self.layer2.forward(&h1, n, &adj, &edge_weights);

        // Risk head: 128 -> 32 (ReLU) -> 1 (sigmoid).
        let mut hidden = matmul(&h2, n, OUT_DIM, &self.risk_w1, RISK_HIDDEN);
        for i in 0..n {
            for d in 0..RISK_HIDDEN {
                hidden[i * RISK_HIDDEN + d] = relu(hidden[i * RISK_HIDDEN + d] + self.risk_b1[d]);
            }
        }
        let raw = matmul(&hidden, n, RISK_HIDDEN, &self.risk_w2, 1);
        let risks: Vec<f64> = raw
            .iter()
            .map(|r| sigmoid(r + self.risk_b2) as f64)
            .collect();

        // Importance: attention received per node, normalized.
        let mut importance = vec![0.0f64; n];
        for j in 0..n {
            for i in 0..n {
                importance[i] += attn2[j * n + i] as f64;
            }
        }
        let total: f64 = importance.iter().sum();
        if total > 0.0 {
            for v in importance.iter_mut() {
                *v /= total;
            }
        } else {
            importance.fill(1.0 / n as f64);
        }

        let graph_risk = 100.0
            * risks
                .iter()
                .zip(&importance)
                .map(|(r, w)| r * w)
                .sum::<f64>();

        let node_results: Vec<NodeRisk> = report
            .classifications
            .iter()
            .enumerate()
            .map(|(i, clause)| NodeRisk {
                clause_id: clause.id.clone(),
                clause_type: clause.clause_type,
                risk: risks[i],
                importance: importance[i],
            })
            .collect();

        debug!(nodes = n, graph_risk, "graph attention forward pass");

        GatScores {
            node_results,
            graph_embedding: readout(&h2, n),
            graph_risk,
            structural_anomaly: attention_anomaly(&attn2),
            top_edges: top_edges(report, &attn2, n),
        }
    }
}

/// Build the `n x 400` feature matrix.
fn node_features(report: &Report, embeddings: Option<&[Vec<f32>]>) -> Vec<f32> {
    let n = report.classifications.len();
    let mut x = vec![0.0f32; n * FEATURE_DIM];
    for (i, clause) in report.classifications.iter().enumerate() {
        let row = &mut x[i * FEATURE_DIM..(i + 1) * FEATURE_DIM];

        let provided = embeddings
            .and_then(|e| e.get(i))
            .filter(|e| e.len() == EMBED_DIM);
        match provided {
            Some(embedding) => row[..EMBED_DIM].copy_from_slice(embedding),
            None => {
                let pseudo = pseudo_embedding(clause.clause_type);
                row[..EMBED_DIM].copy_from_slice(&pseudo);
            }
        }
        row[EMBED_DIM] = clause.calibrated_confidence as f32;
        row[EMBED_DIM + 1] = clause.risk_weight as f32;
        if let Some(idx) = clause.category_index() {
            row[EMBED_DIM + 2 + idx] = 1.0;
        }
    }
    x
}

/// Deterministic stand-in embedding, seeded by a hash of the clause kind.
fn pseudo_embedding(kind: ClauseType) -> Vec<f32> {
    let mut rng = StdRng::seed_from_u64(fnv1a64(kind.as_str().as_bytes()));
    let mut v: Vec<f32> = (0..EMBED_DIM).map(|_| rng.gen_range(-1.0..1.0)).collect();
    l2_normalize(&mut v);
    v
}

/// Symmetric adjacency with self-loops from the report's graph edges;
/// synthesized from the static relationship catalog when the report
/// carries none.
fn adjacency(report: &Report, n: usize) -> (Vec<bool>, Vec<f32>) {
    let mut adj = vec![false; n * n];
    let mut weights = vec![0.0f32; n * n];

    let index_of = |id: &str| -> Option<usize> {
        report.classifications.iter().position(|c| c.id == id)
    };

    let mut connected = false;
    for edge in &report.graph_analysis.edges {
        if edge.target.starts_with(MISSING_PREFIX) {
            continue;
        }
        if let (Some(i), Some(j)) = (index_of(&edge.source), index_of(&edge.target)) {
            let w = edge.severity.max(0.05) as f32;
            for (a, b) in [(i, j), (j, i)] {
                adj[a * n + b] = true;
                weights[a * n + b] = weights[a * n + b].max(w);
            }
            connected = true;
        }
    }

    if !connected {
        // No edges in the report: fall back to the static catalog over
        // the kinds actually present.
        for rule in catalog::relationship_catalog() {
            let i = report
                .classifications
                .iter()
                .position(|c| c.clause_type == rule.source);
            let j = report
                .classifications
                .iter()
                .position(|c| c.clause_type == rule.target);
            if let (Some(i), Some(j)) = (i, j) {
                let w = rule.severity.max(0.05) as f32;
                for (a, b) in [(i, j), (j, i)] {
                    adj[a * n + b] = true;
                    weights[a * n + b] = weights[a * n + b].max(w);
                }
            }
        }
    }

    for i in 0..n {
        adj[i * n + i] = true;
        weights[i * n + i] = weights[i * n + i].max(1.0);
    }
    (adj, weights)
}

/// `concat(mean_pool, max_pool)` over the final node states, truncated to
/// the published 64-d graph embedding.
fn readout(h: &[f32], n: usize) -> Vec<f32> {
    let mut pooled = vec![0.0f32; OUT_DIM * 2];
    for d in 0..OUT_DIM {
        let mut sum = 0.0f32;
        let mut max = f32::NEG_INFINITY;
        for i in 0..n {
            let v = h[i * OUT_DIM + d];
            sum += v;
            max = max.max(v);
        }
        pooled[d] = sum / n as f32;
        pooled[OUT_DIM + d] = max;
    }
    pooled.truncate(64);
    pooled
}

/// Entropy-based concentration signal over the layer-2 attention: 0 when
/// attention spreads evenly, approaching 1 when it piles onto few edges.
fn attention_anomaly(attn: &[f32]) -> f64 {
    let nonzero: Vec<f64> = attn.iter().filter(|v| **v > 0.0).map(|v| *v as f64).collect();
    if nonzero.len() < 2 {
        return 0.0;
    }
    let total: f64 = nonzero.iter().sum();
    if total <= 0.0 {
        return 0.0;
    }
    let entropy: f64 = nonzero
        .iter()
        .map(|v| {
            let p = v / total;
            -p * p.ln()
        })
        .sum();
    let max_entropy = (nonzero.len() as f64).ln();
    (1.0 - entropy / max_entropy).clamp(0.0, 1.0)
}

/// Highest-attention non-loop edges for the report.
fn top_edges(report: &Report, attn: &[f32], n: usize) -> Vec<AttentionEdge> {
    let mut edges: Vec<(usize, usize, f32)> = Vec::new();
    for i in 0..n {
        for j in 0..n {
            if i != j && attn[i * n + j] > 0.0 {
                edges.push((i, j, attn[i * n + j]));
            }
        }
    }
    edges.sort_by(|a, b| b.2.total_cmp(&a.2));
    edges
        .into_iter()
        .take(TOP_EDGES)
        .map(|(i, j, w)| AttentionEdge {
            source: report.classifications[i].id.clone(),
            target: report.classifications[j].id.clone(),
            weight: w as f64,
        })
        .collect()
}

fn xavier(rng: &mut StdRng, fan_in: usize, fan_out: usize) -> Vec<f32> {
    let limit = (6.0f32 / (fan_in + fan_out) as f32).sqrt();
    (0..fan_in * fan_out)
        .map(|_| rng.gen_range(-limit..limit))
        .collect()
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use lexgraph_core::{
        ClassifiedClause, ClauseEdge, DisputePrediction, EdgeKind, GraphAnalysis, Language,
        Overall, PowerAnalysis, ReportMetadata, RiskLevel,
    };
    use std::collections::BTreeMap;

    fn clause(id: &str, kind: ClauseType) -> ClassifiedClause {
        ClassifiedClause {
            id: id.into(),
            text: format!("{} text", kind.display_name()),
            header: String::new(),
            start_pos: 0,
            end_pos: 0,
            coherence: 0.6,
            clause_type: kind,
            raw_confidence: 0.6,
            calibrated_confidence: 0.1,
            entropy_ratio: 0.9,
            margin: 0.02,
            needs_review: false,
            top_k: vec![],
            risk_weight: kind.risk_weight(),
            category: "x".into(),
            language: Language::En,
        }
    }

    fn report(kinds: &[ClauseType], edges: Vec<ClauseEdge>) -> Report {
        Report {
            metadata: ReportMetadata {
                contract_type: "MSA".into(),
                total_clauses: kinds.len(),
                analysis_time_ms: 1,
                engine_version: "v11".into(),
            },
            classifications: kinds
                .iter()
                .enumerate()
                .map(|(i, &k)| clause(&format!("section_{i}"), k))
                .collect(),
            graph_analysis: GraphAnalysis { edges, ..Default::default() },
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
                risk_score: 40.0,
                risk_level: RiskLevel::Medium,
                executive_summary: String::new(),
            },
            suggested_rewrites: None,
            risk_simulation: None,
            corpus_comparison: None,
            stage_status: BTreeMap::new(),
        }
    }

    fn edge(src: &str, dst: &str, severity: f64) -> ClauseEdge {
        ClauseEdge {
            source: src.into(),
            target: dst.into(),
            kind: EdgeKind::Conflicts,
            severity,
            description: "d".into(),
            is_satisfied: false,
        }
    }

    #[test]
    fn empty_graph_yields_zero_scores() {
        let gat = ContractGat::new();
        let scores = gat.forward(&report(&[], vec![]));
        assert_eq!(scores.graph_risk, 0.0);
        assert!(scores.node_results.is_empty());
        assert!(scores.graph_embedding.is_empty());
    }

    #[test]
    fn node_invariants_hold() {
        let gat = ContractGat::new();
        let scores = gat.forward(&report(
            &[
                ClauseType::Indemnification,
                ClauseType::LimitationOfLiability,
                ClauseType::Termination,
            ],
            vec![edge("section_0", "section_1", 0.9)],
        ));

        for node in &scores.node_results {
            assert!((0.0..=1.0).contains(&node.risk), "risk {}", node.risk);
        }
        let total_importance: f64 = scores.node_results.iter().map(|n| n.importance).sum();
        assert_relative_eq!(total_importance, 1.0, epsilon = 1e-6);
        assert!((0.0..=1.0).contains(&scores.structural_anomaly));
        assert!((0.0..=100.0).contains(&scores.graph_risk));
        assert_eq!(scores.graph_embedding.len(), 64);
    }

    #[test]
    fn forward_is_deterministic() {
        let gat = ContractGat::new();
        let r = report(
            &[ClauseType::Indemnification, ClauseType::Warranty],
            vec![edge("section_0", "section_1", 0.6)],
        );
        let a = gat.forward(&r);
        let b = gat.forward(&r);
        assert_eq!(a, b);

        // A freshly initialized network is identical too (fixed seed).
        let other = ContractGat::new();
        assert_eq!(other.forward(&r), a);
    }

    #[test]
    fn missing_edges_fall_back_to_the_catalog() {
        let gat = ContractGat::new();
        // Indemnification and limitation of liability relate in the
        // static catalog, so attention flows even with no report edges.
        let scores = gat.forward(&report(
            &[ClauseType::Indemnification, ClauseType::LimitationOfLiability],
            vec![],
        ));
        assert!(!scores.top_edges.is_empty());
    }

    #[test]
    fn sentinel_edges_are_ignored() {
        let gat = ContractGat::new();
        let scores = gat.forward(&report(
            &[ClauseType::Termination],
            vec![edge("section_0", "missing:dispute_resolution", 0.7)],
        ));
        // Only the self-loop remains; no explainable edges.
        assert!(scores.top_edges.is_empty());
        assert_eq!(scores.node_results.len(), 1);
    }

    #[test]
    fn true_embeddings_change_the_outcome() {
        let gat = ContractGat::new();
        let r = report(
            &[ClauseType::Indemnification, ClauseType::Warranty],
            vec![edge("section_0", "section_1", 0.6)],
        );
        let pseudo = gat.forward(&r);
        let real: Vec<Vec<f32>> = (0..2)
            .map(|i| {
                let mut v = vec![0.0f32; 384];
                v[i] = 1.0;
                v
            })
            .collect();
        let with_real = gat.forward_with_embeddings(&r, Some(&real));
        assert_ne!(pseudo, with_real);
    }

    #[test]
    fn top_edges_are_sorted_and_bounded() {
        let gat = ContractGat::new();
        let kinds = [
            ClauseType::Indemnification,
            ClauseType::LimitationOfLiability,
            ClauseType::Termination,
            ClauseType::DisputeResolution,
            ClauseType::GoverningLaw,
            ClauseType::Confidentiality,
        ];
        let scores = gat.forward(&report(&kinds, vec![]));
        assert!(scores.top_edges.len() <= 10);
        for pair in scores.top_edges.windows(2) {
            assert!(pair[0].weight >= pair[1].weight);
        }
    }
}
