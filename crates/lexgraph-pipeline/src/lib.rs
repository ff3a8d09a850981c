//! # lexgraph-pipeline
//!
//! End-to-end contract analysis: chunk -> classify -> (graph || power)
//! -> dispute -> (rewrite || simulate) -> corpus, plus the overlay pass
//! that fuses symbolic doctrine evaluation, case-law retrieval, graph
//! attention and an adversarial debate into a single meta-fused score.
//!
//! A [`Pipeline`] owns every index and model: the encoder, the
//! classifier's prototype index, the rewrite template embeddings, the
//! case-law index, the graph attention weights and the corpus store.
//! They are built once and shared immutably across analyses; only the
//! corpus store takes a short-lived lock per ingest. Each `analyze` call
//! is self-contained and, given the same input, seed and corpus
//! snapshot, deterministic.
//!
//! Cancellation is cooperative: arm a timer (or any supervisor) that
//! calls [`CancelToken::cancel`] and the analysis stops at the next stage
//! boundary, discarding partial results.
//!
//! ## Example
//!
//! ```rust
//! use lexgraph_pipeline::{AnalyzeOptions, Pipeline};
//!
//! let pipeline = Pipeline::new();
//! let report = pipeline
//!     .analyze(
//!         "1. TERMINATION. Either party may terminate upon thirty days notice.",
//!         "MSA",
//!         &AnalyzeOptions::default(),
//!     )
//!     .unwrap();
//! assert_eq!(report.metadata.contract_type, "MSA");
//! ```

mod fusion;
mod summary;

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;
use thiserror::Error;
use tracing::{debug, info, warn};

use lexgraph_caselaw::CaseLawIndex;
use lexgraph_chunker::SemanticChunker;
use lexgraph_classifier::ClauseClassifier;
use lexgraph_core::{
    CancelToken, ClassifiedClause, DisputePrediction, Encoder, GraphAnalysis, HashingEncoder,
    Overall, PowerAnalysis, Report, ReportMetadata, RewriteSuggestion, RiskLevel, StageStatus,
    V12Report,
};
use lexgraph_corpus::CorpusStore;
use lexgraph_debate::DebateConfig;
use lexgraph_gat::ContractGat;
use lexgraph_rewrite::RewriteEngine;

pub use fusion::meta_fuse;
pub use lexgraph_debate::DebateConfig as DebateTunables;

/// Engine version stamped on v11 reports.
pub const ENGINE_VERSION_V11: &str = "v11";
/// Engine version stamped on overlay reports.
pub const ENGINE_VERSION_V12: &str = "v12";

/// Dispute probability (x100) above which a clause receives a rewrite
/// suggestion during full analysis.
const REWRITE_RISK_FLOOR: f64 = 35.0;

/// Blend weights for the overall risk score.
const STRUCTURAL_WEIGHT: f64 = 0.3;
const POWER_WEIGHT: f64 = 0.2;
const DISPUTE_WEIGHT: f64 = 0.5;

/// Pipeline errors. Degraded stages never error; cancellation is the
/// only way an analysis stops early.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("analysis cancelled")]
    Cancelled,
}

pub type PipelineResult<T> = Result<T, PipelineError>;

/// Per-analysis options. Every stage toggle defaults to on.
#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    pub semantic_chunking: bool,
    pub suggest_rewrites: bool,
    pub simulate_risk: bool,
    pub corpus_compare: bool,
    /// Simulator seed; `None` derives one from the clock.
    pub seed: Option<u64>,
    pub cancel: Option<CancelToken>,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        AnalyzeOptions {
            semantic_chunking: true,
            suggest_rewrites: true,
            simulate_risk: true,
            corpus_compare: true,
            seed: None,
            cancel: None,
        }
    }
}

impl AnalyzeOptions {
    /// Default options with a pinned simulator seed.
    pub fn seeded(seed: u64) -> Self {
        AnalyzeOptions { seed: Some(seed), ..Default::default() }
    }
}

/// Overlay options.
#[derive(Debug, Clone)]
pub struct OverlayOptions {
    pub enable_symbolic: bool,
    pub enable_rag: bool,
    pub enable_gnn: bool,
    pub enable_debate: bool,
    pub cancel: Option<CancelToken>,
}

impl Default for OverlayOptions {
    fn default() -> Self {
        OverlayOptions {
            enable_symbolic: true,
            enable_rag: true,
            enable_gnn: true,
            enable_debate: true,
            cancel: None,
        }
    }
}

/// Pipeline construction options.
#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    /// Corpus profile path; `None` keeps the profile in memory only.
    pub corpus_profile_path: Option<PathBuf>,
    pub debate: DebateConfig,
}

/// The long-lived analysis engine.
pub struct Pipeline {
    chunker: SemanticChunker,
    classifier: ClauseClassifier,
    rewrite: RewriteEngine,
    caselaw: CaseLawIndex,
    gat: ContractGat,
    corpus: Mutex<CorpusStore>,
    config: PipelineConfig,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Pipeline {
    /// Pipeline with the built-in deterministic encoder and an in-memory
    /// corpus profile.
    pub fn new() -> Self {
        Self::with_encoder(Arc::new(HashingEncoder::new()), PipelineConfig::default())
    }

    /// Pipeline over any encoder implementation.
    pub fn with_encoder(encoder: Arc<dyn Encoder>, config: PipelineConfig) -> Self {
        let corpus = match &config.corpus_profile_path {
            Some(path) => CorpusStore::open(path.clone()),
            None => CorpusStore::in_memory(),
        };
        let pipeline = Pipeline {
            chunker: SemanticChunker::new(Arc::clone(&encoder)),
            classifier: ClauseClassifier::new(Arc::clone(&encoder)),
            rewrite: RewriteEngine::new(Arc::clone(&encoder)),
            caselaw: CaseLawIndex::new(encoder),
            gat: ContractGat::new(),
            corpus: Mutex::new(corpus),
            config,
        };
        info!("pipeline initialized");
        pipeline
    }

    /// Run the full analysis on one contract.
    ///
    /// Empty input yields a minimal low-risk report rather than an error;
    /// only cancellation aborts.
    pub fn analyze(
        &self,
        text: &str,
        contract_type: &str,
        opts: &AnalyzeOptions,
    ) -> PipelineResult<Report> {
        let started = Instant::now();
        ensure_active(&opts.cancel)?;

        let mut stage_status: BTreeMap<String, StageStatus> = BTreeMap::new();

        if text.trim().is_empty() {
            warn!("empty contract text, returning minimal report");
            stage_status.insert("input".into(), StageStatus::Failed);
            return Ok(minimal_report(contract_type, started, stage_status));
        }

        // Chunk.
        let chunks = if opts.semantic_chunking {
            self.chunker.chunk(text)
        } else {
            self.chunker.chunk_regex(text)
        };
        stage_status.insert(
            "chunker".into(),
            if chunks.is_empty() { StageStatus::Degraded } else { StageStatus::Ok },
        );
        debug!(chunks = chunks.len(), "chunking complete");

        // Classify.
        ensure_active(&opts.cancel)?;
        let classified = self.classifier.classify_batch(&chunks);
        stage_status.insert("classifier".into(), StageStatus::Ok);

        // Graph and power are independent; run them side by side.
        ensure_active(&opts.cancel)?;
        let (graph_out, power) = rayon::join(
            || lexgraph_graph::build_contract_graph(&classified, contract_type),
            || lexgraph_power::analyze(&classified, text),
        );
        let (_, graph) = graph_out;
        stage_status.insert("graph".into(), StageStatus::Ok);
        stage_status.insert("power".into(), StageStatus::Ok);

        // Dispute joins on both.
        ensure_active(&opts.cancel)?;
        let disputes = lexgraph_dispute::predict(&graph, &power, &classified);
        stage_status.insert("dispute".into(), StageStatus::Ok);

        let overall_risk = (STRUCTURAL_WEIGHT * graph.structural_risk
            + POWER_WEIGHT * power.power_score
            + DISPUTE_WEIGHT * disputes.overall_dispute_risk)
            .min(100.0);
        let risk_level = RiskLevel::from_score(overall_risk);

        // Rewrites and simulation are independent of each other.
        ensure_active(&opts.cancel)?;
        let (suggested_rewrites, risk_simulation) = rayon::join(
            || {
                opts.suggest_rewrites
                    .then(|| self.suggest_rewrites(&classified, &disputes))
                    .flatten()
            },
            || {
                opts.simulate_risk.then(|| {
                    lexgraph_simulator::simulate(
                        &classified,
                        &graph,
                        &power,
                        &disputes,
                        lexgraph_simulator::DEFAULT_TRIALS,
                        opts.seed,
                    )
                })
            },
        );
        stage_status.insert(
            "rewrite".into(),
            if opts.suggest_rewrites { StageStatus::Ok } else { StageStatus::Skipped },
        );
        stage_status.insert(
            "simulator".into(),
            if opts.simulate_risk { StageStatus::Ok } else { StageStatus::Skipped },
        );

        let executive_summary = summary::executive_summary(&graph, &power, &disputes, risk_level);

        let mut report = Report {
            metadata: ReportMetadata {
                contract_type: contract_type.to_string(),
                total_clauses: classified.len(),
                analysis_time_ms: started.elapsed().as_millis() as u64,
                engine_version: ENGINE_VERSION_V11.to_string(),
            },
            classifications: classified,
            graph_analysis: graph,
            power_analysis: power,
            dispute_prediction: disputes,
            overall: Overall { risk_score: overall_risk, risk_level, executive_summary },
            suggested_rewrites,
            risk_simulation,
            corpus_comparison: None,
            stage_status,
        };

        // Corpus learning: ingest first, then compare against the corpus
        // that now includes this contract. Single writer behind the lock.
        ensure_active(&opts.cancel)?;
        if opts.corpus_compare {
            let mut corpus = self.corpus.lock();
            corpus.ingest(&report);
            report.corpus_comparison = Some(corpus.compare(&report));
            report.stage_status.insert("corpus".into(), StageStatus::Ok);
        } else {
            report.stage_status.insert("corpus".into(), StageStatus::Skipped);
        }

        info!(
            clauses = report.metadata.total_clauses,
            risk = report.overall.risk_score,
            "analysis complete"
        );
        Ok(report)
    }

    /// Run the overlay pass over a completed report.
    ///
    /// The four subsystems are independent: any disabled (or failed) one
    /// is absent from the output and the meta-fusion renormalizes over
    /// whatever ran.
    pub fn analyze_v12(
        &self,
        report: &Report,
        opts: &OverlayOptions,
    ) -> PipelineResult<V12Report> {
        ensure_active(&opts.cancel)?;
        let v11_risk = report.overall.risk_score;
        let mut stage_status: BTreeMap<String, StageStatus> = BTreeMap::new();

        // Two pairs of independent subsystems.
        let ((symbolic, rag), (gnn, debate)) = rayon::join(
            || {
                rayon::join(
                    || opts.enable_symbolic.then(|| lexgraph_symbolic::evaluate(report)),
                    || opts.enable_rag.then(|| self.caselaw.retrieve(report, 3)),
                )
            },
            || {
                rayon::join(
                    || opts.enable_gnn.then(|| self.gat.forward(report)),
                    || {
                        opts.enable_debate
                            .then(|| lexgraph_debate::debate(report, &self.config.debate))
                    },
                )
            },
        );
        ensure_active(&opts.cancel)?;

        for (name, ran) in [
            ("symbolic", symbolic.is_some()),
            ("rag", rag.is_some()),
            ("gnn", gnn.is_some()),
            ("debate", debate.is_some()),
        ] {
            stage_status.insert(
                name.into(),
                if ran { StageStatus::Ok } else { StageStatus::Skipped },
            );
        }

        let mut scores = vec![v11_risk];
        if let Some(s) = &symbolic {
            scores.push(s.fused_risk);
        }
        if let Some(g) = &gnn {
            if !g.node_results.is_empty() {
                scores.push(g.graph_risk);
            }
        }
        if let Some(d) = &debate {
            scores.push((v11_risk + 100.0 * d.risk_adjustment).clamp(0.0, 100.0));
        }
        let (fused_risk, confidence) = fusion::meta_fuse(&scores);

        debug!(fused_risk, confidence, sources = scores.len(), "overlay fused");

        Ok(V12Report {
            v11_risk,
            symbolic,
            rag,
            gnn,
            debate,
            fused_risk,
            confidence,
            engine_version: ENGINE_VERSION_V12.to_string(),
            stage_status,
        })
    }

    /// Rewrite suggestions for clauses whose dispute probability clears
    /// the floor.
    fn suggest_rewrites(
        &self,
        classified: &[ClassifiedClause],
        disputes: &DisputePrediction,
    ) -> Option<Vec<RewriteSuggestion>> {
        let prob_of: BTreeMap<_, f64> = disputes
            .hotspots
            .iter()
            .map(|h| (h.clause_type, h.probability))
            .collect();

        let mut suggestions = Vec::new();
        for clause in classified {
            let risk = prob_of.get(&clause.clause_type).copied().unwrap_or(0.0) * 100.0;
            if risk < REWRITE_RISK_FLOOR {
                continue;
            }
            if let Some(mut suggestion) =
                self.rewrite.suggest(&clause.text, clause.clause_type, risk, None)
            {
                suggestion.clause_id = clause.id.clone();
                suggestions.push(suggestion);
            }
        }
        if suggestions.is_empty() {
            None
        } else {
            Some(suggestions)
        }
    }
}

fn ensure_active(cancel: &Option<CancelToken>) -> PipelineResult<()> {
    match cancel {
        Some(token) if token.is_cancelled() => Err(PipelineError::Cancelled),
        _ => Ok(()),
    }
}

/// Minimal report for invalid input: zero clauses, low risk, never an
/// error.
fn minimal_report(
    contract_type: &str,
    started: Instant,
    stage_status: BTreeMap<String, StageStatus>,
) -> Report {
    Report {
        metadata: ReportMetadata {
            contract_type: contract_type.to_string(),
            total_clauses: 0,
            analysis_time_ms: started.elapsed().as_millis() as u64,
            engine_version: ENGINE_VERSION_V11.to_string(),
        },
        classifications: Vec::new(),
        graph_analysis: GraphAnalysis {
            completeness_score: 1.0,
            ..Default::default()
        },
        power_analysis: PowerAnalysis {
            parties: vec!["Party A".into(), "Party B".into()],
            power_score: 0.0,
            dominant_party: "Party A".into(),
            burdened_party: "Party B".into(),
            asymmetric_clauses: Vec::new(),
            total_obligations: 0,
            total_protections: 0,
            burdens: Vec::new(),
        },
        dispute_prediction: DisputePrediction {
            dispute_count_prediction: "Low (0-1 potential disputes)".into(),
            ..Default::default()
        },
        overall: Overall {
            risk_score: 0.0,
            risk_level: RiskLevel::Low,
            executive_summary: "Contract Risk Level: LOW. No analyzable text provided.".into(),
        },
        suggested_rewrites: None,
        risk_simulation: None,
        corpus_comparison: None,
        stage_status,
    }
}
