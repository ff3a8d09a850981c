//! # lexgraph-graph
//!
//! Builds the clause relationship graph for one contract and derives its
//! structural analysis: inter-clause conflicts, unmet dependencies,
//! expected-but-absent clauses, structural risk and completeness.
//!
//! Edges come from the static relationship catalog, keyed by the clause
//! kinds present in the contract. A `depends_on` rule whose target kind is
//! absent materializes as an unsatisfied edge to the sentinel node
//! `missing:<kind>`, so the gap itself becomes part of the graph.

use std::collections::BTreeMap;

use tracing::debug;

use lexgraph_core::{
    catalog, ClassifiedClause, ClauseEdge, ClauseType, Conflict, ContractGraph, EdgeKind,
    GraphAnalysis, GraphNode, MissingDependency, MissingExpected, MISSING_PREFIX,
};

/// Build the contract graph and its structural analysis.
pub fn build_contract_graph(
    classified: &[ClassifiedClause],
    contract_type: &str,
) -> (ContractGraph, GraphAnalysis) {
    let mut graph = ContractGraph::default();
    // First clause id per present kind; edges attach to first occurrences.
    let mut first_of: BTreeMap<ClauseType, &str> = BTreeMap::new();

    for clause in classified {
        graph.nodes.push(GraphNode {
            id: clause.id.clone(),
            clause_type: clause.clause_type,
        });
        if clause.clause_type != ClauseType::Unknown {
            first_of.entry(clause.clause_type).or_insert(&clause.id);
        }
    }

    let mut conflicts = Vec::new();
    let mut missing_dependencies = Vec::new();

    for rule in catalog::relationship_catalog() {
        let source_id = first_of.get(&rule.source).copied();
        let target_id = first_of.get(&rule.target).copied();

        match (rule.kind, source_id, target_id) {
            (EdgeKind::Conflicts, Some(src), Some(dst)) => {
                graph.edges.push(ClauseEdge {
                    source: src.to_string(),
                    target: dst.to_string(),
                    kind: EdgeKind::Conflicts,
                    severity: rule.severity,
                    description: rule.description.to_string(),
                    is_satisfied: false,
                });
                conflicts.push(Conflict {
                    clause_a: rule.source,
                    clause_b: rule.target,
                    clause_a_id: src.to_string(),
                    clause_b_id: dst.to_string(),
                    severity: rule.severity,
                    description: rule.description.to_string(),
                });
            }
            (EdgeKind::DependsOn, Some(src), Some(dst)) => {
                graph.edges.push(ClauseEdge {
                    source: src.to_string(),
                    target: dst.to_string(),
                    kind: EdgeKind::DependsOn,
                    severity: rule.severity,
                    description: rule.description.to_string(),
                    is_satisfied: true,
                });
            }
            (EdgeKind::DependsOn, Some(src), None) => {
                graph.edges.push(ClauseEdge {
                    source: src.to_string(),
                    target: format!("{}{}", MISSING_PREFIX, rule.target.as_str()),
                    kind: EdgeKind::DependsOn,
                    severity: rule.severity,
                    description: rule.description.to_string(),
                    is_satisfied: false,
                });
                missing_dependencies.push(MissingDependency {
                    clause_has: rule.source,
                    clause_needs: rule.target,
                    severity: rule.severity,
                    description: rule.description.to_string(),
                });
            }
            (EdgeKind::Limits | EdgeKind::Supplements | EdgeKind::References, Some(src), Some(dst)) => {
                graph.edges.push(ClauseEdge {
                    source: src.to_string(),
                    target: dst.to_string(),
                    kind: rule.kind,
                    severity: rule.severity,
                    description: rule.description.to_string(),
                    is_satisfied: true,
                });
            }
            _ => {}
        }
    }

    let missing_expected = find_missing_expected(&first_of, contract_type);
    let completeness_score = completeness(&first_of, contract_type);
    let structural_risk =
        structural_risk(&conflicts, &missing_dependencies, &missing_expected);

    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        conflicts = conflicts.len(),
        gaps = missing_dependencies.len(),
        "contract graph built"
    );

    let analysis = GraphAnalysis {
        conflict_count: conflicts.len(),
        dependency_gap_count: missing_dependencies.len(),
        conflicts,
        missing_dependencies,
        missing_expected,
        structural_risk,
        completeness_score,
        edges: graph.edges.clone(),
    };

    (graph, analysis)
}

/// Expected kinds absent from this contract, most prevalent first.
fn find_missing_expected(
    present: &BTreeMap<ClauseType, &str>,
    contract_type: &str,
) -> Vec<MissingExpected> {
    let Some(table) = catalog::expected_clauses(contract_type) else {
        return Vec::new();
    };
    let mut missing: Vec<MissingExpected> = table
        .iter()
        .filter(|(kind, _)| !present.contains_key(kind))
        .map(|&(kind, prevalence)| MissingExpected {
            clause_type: kind,
            expected_prevalence: prevalence,
            risk_contribution: (prevalence * 40.0).floor() as u32,
            recommendation: format!(
                "Add a {} clause; present in {:.0}% of {} contracts.",
                kind.display_name(),
                prevalence * 100.0,
                contract_type.to_ascii_uppercase(),
            ),
        })
        .collect();
    missing.sort_by(|a, b| b.expected_prevalence.total_cmp(&a.expected_prevalence));
    missing
}

/// `|present ∩ expected| / |expected|`; 1.0 when the kind has no table.
fn completeness(present: &BTreeMap<ClauseType, &str>, contract_type: &str) -> f64 {
    let Some(table) = catalog::expected_clauses(contract_type) else {
        return 1.0;
    };
    if table.is_empty() {
        return 1.0;
    }
    let hit = table.iter().filter(|(kind, _)| present.contains_key(kind)).count();
    hit as f64 / table.len() as f64
}

/// Aggregate structural risk, capped at 100: conflicts weigh 30x their
/// severity, unmet dependencies 25x, and the five most prevalent missing
/// expected kinds add their risk contribution.
fn structural_risk(
    conflicts: &[Conflict],
    gaps: &[MissingDependency],
    missing_expected: &[MissingExpected],
) -> f64 {
    let conflict_part: f64 = conflicts.iter().map(|c| c.severity * 30.0).sum();
    let gap_part: f64 = gaps.iter().map(|g| g.severity * 25.0).sum();
    let missing_part: f64 = missing_expected
        .iter()
        .take(5)
        .map(|m| m.risk_contribution as f64)
        .sum();
    (conflict_part + gap_part + missing_part).min(100.0)
}
