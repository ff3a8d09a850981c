//! Contract graph entities.
//!
//! Nodes are classified clauses; edges are typed relationships derived from
//! the static catalog. A `depends_on` edge whose target kind is absent from
//! the contract is materialized as an unsatisfied edge pointing at the
//! sentinel node id `missing:<clause_type>`.

use serde::{Deserialize, Serialize};

use crate::catalog::EdgeKind;
use crate::taxonomy::ClauseType;

/// Sentinel node id prefix for absent dependency targets.
pub const MISSING_PREFIX: &str = "missing:";

/// A node of the contract graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    #[serde(rename = "type")]
    pub clause_type: ClauseType,
}

/// A typed, weighted edge between two clause nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClauseEdge {
    /// Source node id (a clause id).
    pub source: String,
    /// Target node id; `missing:<type>` when the dependency is unmet.
    pub target: String,
    pub kind: EdgeKind,
    pub severity: f64,
    pub description: String,
    pub is_satisfied: bool,
}

/// The directed clause-relationship graph for one contract.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContractGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<ClauseEdge>,
}

impl ContractGraph {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Index of a node id in insertion order, ignoring sentinel targets.
    pub fn node_index(&self, id: &str) -> Option<usize> {
        self.nodes.iter().position(|n| n.id == id)
    }
}

/// A detected conflict between two present clauses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conflict {
    pub clause_a: ClauseType,
    pub clause_b: ClauseType,
    pub clause_a_id: String,
    pub clause_b_id: String,
    pub severity: f64,
    pub description: String,
}

/// A `depends_on` relationship whose target kind is absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingDependency {
    pub clause_has: ClauseType,
    pub clause_needs: ClauseType,
    pub severity: f64,
    pub description: String,
}

/// An expected clause kind that this contract does not contain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingExpected {
    #[serde(rename = "type")]
    pub clause_type: ClauseType,
    pub expected_prevalence: f64,
    /// `floor(prevalence * 40)`, the kind's share of structural risk.
    pub risk_contribution: u32,
    pub recommendation: String,
}

/// Structural analysis derived from the contract graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphAnalysis {
    pub conflicts: Vec<Conflict>,
    pub missing_dependencies: Vec<MissingDependency>,
    pub missing_expected: Vec<MissingExpected>,
    pub structural_risk: f64,
    pub completeness_score: f64,
    pub conflict_count: usize,
    pub dependency_gap_count: usize,
    /// All materialized edges, for downstream consumers that rebuild
    /// adjacency (graph attention).
    pub edges: Vec<ClauseEdge>,
}
