//! Static relationship catalog and expected-clause tables.
//!
//! The catalog drives edge construction in the contract graph: each rule
//! says how a source clause kind relates to a target kind when one or both
//! are present. The expected-clause tables say which kinds a given contract
//! kind is expected to contain and how prevalent they are in practice.
//! Both are compile-time data; a change here is a minor version bump.

use serde::{Deserialize, Serialize};

use crate::taxonomy::ClauseType;

/// Kind of a typed edge between clauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    Conflicts,
    DependsOn,
    Limits,
    Supplements,
    References,
}

impl EdgeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeKind::Conflicts => "conflicts",
            EdgeKind::DependsOn => "depends_on",
            EdgeKind::Limits => "limits",
            EdgeKind::Supplements => "supplements",
            EdgeKind::References => "references",
        }
    }
}

/// One entry of the static relationship catalog.
#[derive(Debug, Clone, Copy)]
pub struct RelationshipRule {
    pub source: ClauseType,
    pub target: ClauseType,
    pub kind: EdgeKind,
    pub description: &'static str,
    pub severity: f64,
}

/// The full relationship catalog.
pub fn relationship_catalog() -> &'static [RelationshipRule] {
    &CATALOG
}

static CATALOG: [RelationshipRule; 20] = [
    RelationshipRule {
        source: ClauseType::Indemnification,
        target: ClauseType::LimitationOfLiability,
        kind: EdgeKind::Conflicts,
        description: "Broad indemnification undermines the liability cap when carve-outs are \
            not reconciled",
        severity: 0.9,
    },
    RelationshipRule {
        source: ClauseType::Warranty,
        target: ClauseType::LimitationOfLiability,
        kind: EdgeKind::Conflicts,
        description: "Express warranties sit uneasily with a blanket exclusion of damages",
        severity: 0.6,
    },
    RelationshipRule {
        source: ClauseType::IpOwnership,
        target: ClauseType::Assignment,
        kind: EdgeKind::Conflicts,
        description: "Free assignability can defeat exclusive ownership of work product",
        severity: 0.5,
    },
    RelationshipRule {
        source: ClauseType::Termination,
        target: ClauseType::DisputeResolution,
        kind: EdgeKind::DependsOn,
        description: "Termination for cause needs an agreed forum for contested breaches",
        severity: 0.7,
    },
    RelationshipRule {
        source: ClauseType::Termination,
        target: ClauseType::PaymentTerms,
        kind: EdgeKind::DependsOn,
        description: "Wind-down requires agreed treatment of fees accrued at termination",
        severity: 0.5,
    },
    RelationshipRule {
        source: ClauseType::Indemnification,
        target: ClauseType::Insurance,
        kind: EdgeKind::DependsOn,
        description: "Uncapped indemnity is hollow without insurance behind it",
        severity: 0.6,
    },
    RelationshipRule {
        source: ClauseType::DisputeResolution,
        target: ClauseType::GoverningLaw,
        kind: EdgeKind::DependsOn,
        description: "An arbitration or forum clause needs a governing law to apply",
        severity: 0.8,
    },
    RelationshipRule {
        source: ClauseType::IpOwnership,
        target: ClauseType::Confidentiality,
        kind: EdgeKind::DependsOn,
        description: "Ownership of deliverables leans on secrecy of the underlying materials",
        severity: 0.5,
    },
    RelationshipRule {
        source: ClauseType::PaymentTerms,
        target: ClauseType::AuditRights,
        kind: EdgeKind::DependsOn,
        description: "Usage-based fees are unverifiable without audit rights",
        severity: 0.4,
    },
    RelationshipRule {
        source: ClauseType::DataProtection,
        target: ClauseType::AuditRights,
        kind: EdgeKind::DependsOn,
        description: "Processor obligations are unenforceable without inspection rights",
        severity: 0.5,
    },
    RelationshipRule {
        source: ClauseType::LimitationOfLiability,
        target: ClauseType::Warranty,
        kind: EdgeKind::Limits,
        description: "The cap bounds remedies available for warranty breach",
        severity: 0.4,
    },
    RelationshipRule {
        source: ClauseType::LimitationOfLiability,
        target: ClauseType::Indemnification,
        kind: EdgeKind::Limits,
        description: "Cap carve-outs determine how much of the indemnity survives",
        severity: 0.5,
    },
    RelationshipRule {
        source: ClauseType::DataProtection,
        target: ClauseType::Confidentiality,
        kind: EdgeKind::Supplements,
        description: "Personal-data duties extend the general secrecy obligation",
        severity: 0.3,
    },
    RelationshipRule {
        source: ClauseType::ForceMajeure,
        target: ClauseType::Termination,
        kind: EdgeKind::Supplements,
        description: "Extended force majeure commonly matures into a termination right",
        severity: 0.4,
    },
    RelationshipRule {
        source: ClauseType::Insurance,
        target: ClauseType::Indemnification,
        kind: EdgeKind::Supplements,
        description: "Coverage requirements back the indemnity with a solvent payer",
        severity: 0.3,
    },
    RelationshipRule {
        source: ClauseType::Confidentiality,
        target: ClauseType::NonCompete,
        kind: EdgeKind::Supplements,
        description: "Secrecy and non-compete restraints protect the same interest",
        severity: 0.2,
    },
    RelationshipRule {
        source: ClauseType::Confidentiality,
        target: ClauseType::Termination,
        kind: EdgeKind::References,
        description: "Secrecy obligations typically survive termination",
        severity: 0.3,
    },
    RelationshipRule {
        source: ClauseType::NonCompete,
        target: ClauseType::Termination,
        kind: EdgeKind::References,
        description: "The restricted period runs from the termination date",
        severity: 0.4,
    },
    RelationshipRule {
        source: ClauseType::Assignment,
        target: ClauseType::Termination,
        kind: EdgeKind::References,
        description: "Unconsented assignment is commonly a termination trigger",
        severity: 0.3,
    },
    RelationshipRule {
        source: ClauseType::Warranty,
        target: ClauseType::DisputeResolution,
        kind: EdgeKind::References,
        description: "Warranty claims route through the agreed dispute procedure",
        severity: 0.3,
    },
];

/// Expected clause kinds and their prevalence for a contract kind.
///
/// Kind matching is case-insensitive on the common acronyms. Unrecognized
/// contract kinds have no table; completeness is then defined as 1.0.
pub fn expected_clauses(contract_type: &str) -> Option<&'static [(ClauseType, f64)]> {
    match contract_type.to_ascii_uppercase().as_str() {
        "MSA" => Some(&MSA_EXPECTED),
        "NDA" => Some(&NDA_EXPECTED),
        "SLA" => Some(&SLA_EXPECTED),
        "SAAS" => Some(&SAAS_EXPECTED),
        _ => None,
    }
}

static MSA_EXPECTED: [(ClauseType, f64); 10] = [
    (ClauseType::LimitationOfLiability, 0.95),
    (ClauseType::GoverningLaw, 0.93),
    (ClauseType::Termination, 0.9),
    (ClauseType::Confidentiality, 0.88),
    (ClauseType::PaymentTerms, 0.85),
    (ClauseType::Indemnification, 0.82),
    (ClauseType::Warranty, 0.75),
    (ClauseType::DisputeResolution, 0.7),
    (ClauseType::IpOwnership, 0.65),
    (ClauseType::DataProtection, 0.6),
];

static NDA_EXPECTED: [(ClauseType, f64); 6] = [
    (ClauseType::Confidentiality, 0.98),
    (ClauseType::GoverningLaw, 0.85),
    (ClauseType::Termination, 0.8),
    (ClauseType::DisputeResolution, 0.45),
    (ClauseType::NonCompete, 0.3),
    (ClauseType::Assignment, 0.25),
];

static SLA_EXPECTED: [(ClauseType, f64); 8] = [
    (ClauseType::Warranty, 0.92),
    (ClauseType::PaymentTerms, 0.9),
    (ClauseType::Termination, 0.85),
    (ClauseType::LimitationOfLiability, 0.85),
    (ClauseType::GoverningLaw, 0.8),
    (ClauseType::ForceMajeure, 0.6),
    (ClauseType::AuditRights, 0.5),
    (ClauseType::DisputeResolution, 0.5),
];

static SAAS_EXPECTED: [(ClauseType, f64); 10] = [
    (ClauseType::PaymentTerms, 0.95),
    (ClauseType::LimitationOfLiability, 0.93),
    (ClauseType::DataProtection, 0.9),
    (ClauseType::Termination, 0.88),
    (ClauseType::Confidentiality, 0.85),
    (ClauseType::IpOwnership, 0.8),
    (ClauseType::GoverningLaw, 0.8),
    (ClauseType::Warranty, 0.7),
    (ClauseType::Indemnification, 0.68),
    (ClauseType::Insurance, 0.4),
];
