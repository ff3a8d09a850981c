//! # lexgraph-core
//!
//! Shared data model for the lexgraph contract analysis pipeline.
//!
//! This crate holds everything more than one pipeline stage needs to agree
//! on: the closed clause taxonomy, the static relationship catalog and
//! expected-clause tables, the entity types that flow between stages
//! (chunks, classified clauses, graph analyses, reports), the overlay
//! report types, and the [`Encoder`] seam that abstracts the sentence
//! encoder away from any particular ML runtime.
//!
//! Entities are immutable snapshots: a stage consumes values produced
//! upstream and produces new values. Nothing here carries interior
//! mutability except [`CancelToken`], which is a shared flag by design.
//!
//! ## Example
//!
//! ```rust
//! use lexgraph_core::taxonomy::ClauseType;
//!
//! let ct = ClauseType::Indemnification;
//! assert_eq!(ct.as_str(), "indemnification");
//! assert!(ct.risk_weight() > 0.8);
//! ```

pub mod cancel;
pub mod catalog;
pub mod clause;
pub mod corpus;
pub mod dispute;
pub mod encoder;
pub mod graph;
pub mod overlay;
pub mod power;
pub mod report;
pub mod rewrite;
pub mod simulation;
pub mod taxonomy;

pub use cancel::CancelToken;
pub use catalog::{expected_clauses, relationship_catalog, EdgeKind, RelationshipRule};
pub use clause::{Chunk, ClassifiedClause, Language, TopPrediction};
pub use corpus::{AnomalyKind, AnomalySeverity, ClauseAnomaly, CorpusComparison};
pub use dispute::{DisputeHotspot, DisputePrediction, HotspotCategory, HotspotSeverity};
pub use encoder::{cosine, fnv1a64, l2_normalize, Encoder, EncoderError, HashingEncoder, EMBED_DIM};
pub use graph::{
    ClauseEdge, Conflict, ContractGraph, GraphAnalysis, GraphNode, MissingDependency,
    MissingExpected, MISSING_PREFIX,
};
pub use overlay::{
    ArgumentSeverity, AttentionEdge, CaseCitation, DebateArgument, DebatePosition,
    DebateTranscript, DebateVerdict, DoctrineFamily, DoctrineViolation, GatScores, NodeRisk,
    RagResult, Ruling, RulingOutcome, RuleSeverity, SymbolicVerdict, V12Report,
};
pub use power::{AsymmetricClause, PartyBurden, PowerAnalysis};
pub use report::{Overall, Report, ReportMetadata, RiskLevel, StageStatus};
pub use rewrite::{DiffOp, DiffTag, NegotiationDifficulty, RewriteSuggestion, TemplateLevel};
pub use simulation::{RiskSimulation, UncertaintySource, Volatility};
pub use taxonomy::{ClauseCategory, ClauseType};

/// Library version, embedded in report metadata.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
