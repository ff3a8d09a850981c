//! The doctrine rule set.
//!
//! Forty-two rules across seven doctrine families. Each rule carries
//! preconditions evaluated against the analyzed report, a severity, a
//! risk contribution, a remedy, and the doctrine it descends from.
//! Patterns are matched case-insensitively against the contract text.

use lexgraph_core::{ClauseType, DoctrineFamily, RuleSeverity};

/// Preconditions of one rule. Absent fields do not participate.
///
/// `requires_clause*`, `missing_clause` and `missing_pattern` are hard
/// predicates: when they fail the rule cannot fire at all. The remaining
/// predicates are soft and only lower the rule's confidence.
#[derive(Debug, Clone, Copy, Default)]
pub struct Preconditions {
    pub requires_clause: Option<ClauseType>,
    pub requires_clause_secondary: Option<ClauseType>,
    pub missing_clause: Option<ClauseType>,
    pub contract_types: Option<&'static [&'static str]>,
    /// Fires when `risk_score >= threshold * 100`.
    pub risk_threshold: Option<f64>,
    pub clause_pattern: Option<&'static str>,
    pub clause_pattern_secondary: Option<&'static str>,
    pub missing_pattern: Option<&'static str>,
}

/// One doctrine rule.
#[derive(Debug, Clone, Copy)]
pub struct DoctrineRule {
    pub id: &'static str,
    pub family: DoctrineFamily,
    pub description: &'static str,
    pub severity: RuleSeverity,
    pub risk_contribution: f64,
    pub remedy: &'static str,
    pub citation: &'static str,
    pub pre: Preconditions,
}

const NONE: Preconditions = Preconditions {
    requires_clause: None,
    requires_clause_secondary: None,
    missing_clause: None,
    contract_types: None,
    risk_threshold: None,
    clause_pattern: None,
    clause_pattern_secondary: None,
    missing_pattern: None,
};

pub fn doctrine_rules() -> &'static [DoctrineRule] {
    &RULES
}

static RULES: [DoctrineRule; 42] = [
    // ---- Proportionality ----
    DoctrineRule {
        id: "PROP-001",
        family: DoctrineFamily::Proportionality,
        description: "Indemnification obligations without a limitation of liability leave \
            exposure uncapped",
        severity: RuleSeverity::Critical,
        risk_contribution: 0.35,
        remedy: "Add a limitation of liability clause with negotiated carve-outs for the \
            indemnity",
        citation: "Restatement (Second) of Contracts s. 351",
        pre: Preconditions {
            requires_clause: Some(ClauseType::Indemnification),
            missing_clause: Some(ClauseType::LimitationOfLiability),
            ..NONE
        },
    },
    DoctrineRule {
        id: "PROP-002",
        family: DoctrineFamily::Proportionality,
        description: "Blanket exclusion of all damages leaves the other party without a \
            meaningful remedy",
        severity: RuleSeverity::High,
        risk_contribution: 0.2,
        remedy: "Replace the blanket exclusion with a cap tied to fees paid",
        citation: "Photo Production Ltd v Securicor Transport Ltd [1980] AC 827",
        pre: Preconditions {
            requires_clause: Some(ClauseType::LimitationOfLiability),
            clause_pattern: Some("in no event|any damages whatsoever|exclusive remedy"),
            ..NONE
        },
    },
    DoctrineRule {
        id: "PROP-003",
        family: DoctrineFamily::Proportionality,
        description: "Unbounded indemnity language (without limitation, any and all claims) \
            is disproportionate to typical consideration",
        severity: RuleSeverity::High,
        risk_contribution: 0.22,
        remedy: "Scope the indemnity to third-party claims caused by identified conduct",
        citation: "Vallance v Victor (proportionality of secondary obligations)",
        pre: Preconditions {
            requires_clause: Some(ClauseType::Indemnification),
            clause_pattern: Some("without limitation|any and all claims"),
            ..NONE
        },
    },
    DoctrineRule {
        id: "PROP-004",
        family: DoctrineFamily::Proportionality,
        description: "Wholesale warranty disclaimer shifts all product risk to the recipient",
        severity: RuleSeverity::Medium,
        risk_contribution: 0.12,
        remedy: "Retain a baseline professional-performance warranty with a remedy ladder",
        citation: "UCC s. 2-316",
        pre: Preconditions {
            requires_clause: Some(ClauseType::Warranty),
            clause_pattern: Some("as is|disclaims? all( other)? warranties"),
            ..NONE
        },
    },
    DoctrineRule {
        id: "PROP-005",
        family: DoctrineFamily::Proportionality,
        description: "Immediate termination without notice or cause deprives the counterparty \
            of reliance protection",
        severity: RuleSeverity::Medium,
        risk_contribution: 0.12,
        remedy: "Add a notice period and a cure window for non-material breaches",
        citation: "Restatement (Second) of Contracts s. 237",
        pre: Preconditions {
            requires_clause: Some(ClauseType::Termination),
            clause_pattern: Some("terminate (this agreement )?(immediately|at any time) without (notice|cause)"),
            ..NONE
        },
    },
    DoctrineRule {
        id: "PROP-006",
        family: DoctrineFamily::Proportionality,
        description: "Restraint of trade broader than needed to protect a legitimate interest",
        severity: RuleSeverity::High,
        risk_contribution: 0.18,
        remedy: "Narrow the restraint's duration and territory to the protectable interest",
        citation: "Nordenfelt v Maxim Nordenfelt Guns & Ammunition Co [1894] AC 535",
        pre: Preconditions {
            requires_clause: Some(ClauseType::NonCompete),
            clause_pattern: Some("(five|ten|5|10) years|worldwide|anywhere in the world"),
            ..NONE
        },
    },
    DoctrineRule {
        id: "PROP-007",
        family: DoctrineFamily::Proportionality,
        description: "High aggregate risk despite a liability cap suggests the cap does not \
            reach the loss drivers",
        severity: RuleSeverity::Medium,
        risk_contribution: 0.1,
        remedy: "Align cap carve-outs with the clauses generating the risk",
        citation: "Cavendish Square Holding BV v Makdessi [2015] UKSC 67",
        pre: Preconditions {
            requires_clause: Some(ClauseType::LimitationOfLiability),
            risk_threshold: Some(0.7),
            ..NONE
        },
    },
    // ---- Good faith ----
    DoctrineRule {
        id: "GF-001",
        family: DoctrineFamily::GoodFaith,
        description: "Sole-discretion powers without a reasonableness qualifier invite \
            opportunistic exercise",
        severity: RuleSeverity::High,
        risk_contribution: 0.18,
        remedy: "Qualify discretionary powers with 'reasonably exercised' language",
        citation: "Bhasin v Hrynew, 2014 SCC 71; UCC s. 1-304",
        pre: Preconditions {
            clause_pattern: Some("sole discretion|absolute discretion"),
            missing_pattern: Some("reasonabl"),
            ..NONE
        },
    },
    DoctrineRule {
        id: "GF-002",
        family: DoctrineFamily::GoodFaith,
        description: "Termination for convenience with no notice period defeats the \
            counterparty's legitimate expectations",
        severity: RuleSeverity::Medium,
        risk_contribution: 0.12,
        remedy: "Attach a 30-day written notice requirement to convenience termination",
        citation: "Abu Dhabi National Tanker Co v Product Star Shipping (The Product Star)",
        pre: Preconditions {
            requires_clause: Some(ClauseType::Termination),
            clause_pattern: Some("terminat\\w+ for convenience"),
            missing_pattern: Some("notice"),
            ..NONE
        },
    },
    DoctrineRule {
        id: "GF-003",
        family: DoctrineFamily::GoodFaith,
        description: "Unilateral amendment rights let one party rewrite the bargain",
        severity: RuleSeverity::High,
        risk_contribution: 0.2,
        remedy: "Require mutual written consent for amendments, or notice plus a \
            termination right",
        citation: "Badgett v Security State Bank, 116 Wash. 2d 563 (1991)",
        pre: Preconditions {
            clause_pattern: Some("unilaterally (amend|modify|change)|reserves the right to (amend|modify|change)"),
            ..NONE
        },
    },
    DoctrineRule {
        id: "GF-004",
        family: DoctrineFamily::GoodFaith,
        description: "Non-refundable fees regardless of performance decouple payment from \
            delivery",
        severity: RuleSeverity::Medium,
        risk_contribution: 0.1,
        remedy: "Make prepaid fees refundable pro rata on termination without cause",
        citation: "Restatement (Second) of Contracts s. 205",
        pre: Preconditions {
            requires_clause: Some(ClauseType::PaymentTerms),
            clause_pattern: Some("non-?refundable"),
            ..NONE
        },
    },
    DoctrineRule {
        id: "GF-005",
        family: DoctrineFamily::GoodFaith,
        description: "Service suspension without notice weaponizes operational dependence",
        severity: RuleSeverity::Medium,
        risk_contribution: 0.12,
        remedy: "Require notice and a grace period before suspension for non-payment",
        citation: "Market Street Associates v Frey, 941 F.2d 588 (7th Cir. 1991)",
        pre: Preconditions {
            clause_pattern: Some("suspend\\w*[^.]{0,40}without notice"),
            ..NONE
        },
    },
    DoctrineRule {
        id: "GF-006",
        family: DoctrineFamily::GoodFaith,
        description: "Audit rights without notice or business-hours limits become a \
            harassment vector",
        severity: RuleSeverity::Low,
        risk_contribution: 0.08,
        remedy: "Limit audits to reasonable notice, business hours, and annual frequency",
        citation: "Restatement (Second) of Contracts s. 205 cmt. d",
        pre: Preconditions {
            requires_clause: Some(ClauseType::AuditRights),
            missing_pattern: Some("reasonable notice|business hours"),
            ..NONE
        },
    },
    // ---- Gap filling ----
    DoctrineRule {
        id: "GAP-001",
        family: DoctrineFamily::GapFilling,
        description: "Termination rights with no dispute resolution forum leave contested \
            breaches unresolvable",
        severity: RuleSeverity::High,
        risk_contribution: 0.18,
        remedy: "Add an escalation and arbitration clause covering termination disputes",
        citation: "UNIDROIT Principles art. 4.8 (supplying omitted terms)",
        pre: Preconditions {
            requires_clause: Some(ClauseType::Termination),
            missing_clause: Some(ClauseType::DisputeResolution),
            ..NONE
        },
    },
    DoctrineRule {
        id: "GAP-002",
        family: DoctrineFamily::GapFilling,
        description: "An indemnity without insurance requirements may be worthless against an \
            insolvent indemnitor",
        severity: RuleSeverity::Medium,
        risk_contribution: 0.1,
        remedy: "Require liability insurance with limits matched to the indemnity exposure",
        citation: "UNIDROIT Principles art. 5.1.2",
        pre: Preconditions {
            requires_clause: Some(ClauseType::Indemnification),
            missing_clause: Some(ClauseType::Insurance),
            ..NONE
        },
    },
    DoctrineRule {
        id: "GAP-003",
        family: DoctrineFamily::GapFilling,
        description: "A dispute resolution procedure without governing law leaves the \
            arbitrator without a decision standard",
        severity: RuleSeverity::High,
        risk_contribution: 0.16,
        remedy: "Add a governing law clause naming a specific body of law",
        citation: "Compagnie Tunisienne de Navigation v Compagnie d'Armement Maritime [1971] AC 572",
        pre: Preconditions {
            requires_clause: Some(ClauseType::DisputeResolution),
            missing_clause: Some(ClauseType::GoverningLaw),
            ..NONE
        },
    },
    DoctrineRule {
        id: "GAP-004",
        family: DoctrineFamily::GapFilling,
        description: "Service frameworks without termination mechanics strand the parties in \
            an unwindable relationship",
        severity: RuleSeverity::Medium,
        risk_contribution: 0.12,
        remedy: "Add termination for convenience and for cause with wind-down obligations",
        citation: "UCC s. 2-309 (termination of open-duration contracts)",
        pre: Preconditions {
            missing_clause: Some(ClauseType::Termination),
            contract_types: Some(&["MSA", "SAAS", "SLA"]),
            ..NONE
        },
    },
    DoctrineRule {
        id: "GAP-005",
        family: DoctrineFamily::GapFilling,
        description: "Commercial frameworks that exchange sensitive information lack a \
            confidentiality clause",
        severity: RuleSeverity::High,
        risk_contribution: 0.15,
        remedy: "Add mutual confidentiality obligations with standard exclusions",
        citation: "Coco v A.N. Clark (Engineers) Ltd [1969] RPC 41",
        pre: Preconditions {
            missing_clause: Some(ClauseType::Confidentiality),
            contract_types: Some(&["MSA", "NDA", "SAAS"]),
            ..NONE
        },
    },
    DoctrineRule {
        id: "GAP-006",
        family: DoctrineFamily::GapFilling,
        description: "No governing law clause invites a conflicts-of-law dispute before the \
            merits are ever reached",
        severity: RuleSeverity::Medium,
        risk_contribution: 0.12,
        remedy: "Add a governing law and forum clause",
        citation: "Restatement (Second) of Conflict of Laws s. 188",
        pre: Preconditions {
            missing_clause: Some(ClauseType::GoverningLaw),
            ..NONE
        },
    },
    DoctrineRule {
        id: "GAP-007",
        family: DoctrineFamily::GapFilling,
        description: "Data processing obligations without audit rights cannot be verified",
        severity: RuleSeverity::Low,
        risk_contribution: 0.08,
        remedy: "Add audit or certification rights over the processor's controls",
        citation: "GDPR art. 28(3)(h)",
        pre: Preconditions {
            requires_clause: Some(ClauseType::DataProtection),
            missing_clause: Some(ClauseType::AuditRights),
            ..NONE
        },
    },
    DoctrineRule {
        id: "GAP-008",
        family: DoctrineFamily::GapFilling,
        description: "IP ownership allocation without confidentiality protection leaks the \
            very assets being allocated",
        severity: RuleSeverity::Medium,
        risk_contribution: 0.1,
        remedy: "Add confidentiality obligations covering pre-existing and developed IP",
        citation: "Saltman Engineering Co v Campbell Engineering Co (1948) 65 RPC 203",
        pre: Preconditions {
            requires_clause: Some(ClauseType::IpOwnership),
            missing_clause: Some(ClauseType::Confidentiality),
            ..NONE
        },
    },
    // ---- Unconscionability ----
    DoctrineRule {
        id: "UNC-001",
        family: DoctrineFamily::Unconscionability,
        description: "Blanket waiver of rights or claims strips remedies wholesale",
        severity: RuleSeverity::High,
        risk_contribution: 0.2,
        remedy: "Strike the blanket waiver; enumerate narrow, knowing waivers if any",
        citation: "Williams v Walker-Thomas Furniture Co., 350 F.2d 445 (D.C. Cir. 1965)",
        pre: Preconditions {
            clause_pattern: Some("waives? (any|all) (rights?|claims?)"),
            ..NONE
        },
    },
    DoctrineRule {
        id: "UNC-002",
        family: DoctrineFamily::Unconscionability,
        description: "Class proceeding waivers in adhesive terms concentrate dispute power",
        severity: RuleSeverity::High,
        risk_contribution: 0.18,
        remedy: "Pair any class waiver with cost-shifting and small-claims carve-outs",
        citation: "AT&T Mobility LLC v Concepcion, 563 U.S. 333 (2011)",
        pre: Preconditions {
            clause_pattern: Some("class (action|proceeding)s? waiver|waiv\\w+ any right to class"),
            ..NONE
        },
    },
    DoctrineRule {
        id: "UNC-003",
        family: DoctrineFamily::Unconscionability,
        description: "Discretionary powers concentrated in one party of an already high-risk \
            bargain",
        severity: RuleSeverity::High,
        risk_contribution: 0.15,
        remedy: "Balance discretionary rights or subject them to objective criteria",
        citation: "A&M Produce Co v FMC Corp, 135 Cal. App. 3d 473 (1982)",
        pre: Preconditions {
            risk_threshold: Some(0.6),
            clause_pattern: Some("sole discretion|unilateral"),
            ..NONE
        },
    },
    DoctrineRule {
        id: "UNC-004",
        family: DoctrineFamily::Unconscionability,
        description: "Liquidated damages untethered from a genuine pre-estimate operate as a \
            penalty",
        severity: RuleSeverity::Medium,
        risk_contribution: 0.12,
        remedy: "Recite the loss estimate underlying the liquidated sum",
        citation: "Dunlop Pneumatic Tyre Co v New Garage & Motor Co [1915] AC 79",
        pre: Preconditions {
            clause_pattern: Some("liquidated damages|penalty of"),
            missing_pattern: Some("genuine pre-?estimate|reasonable estimate"),
            ..NONE
        },
    },
    DoctrineRule {
        id: "UNC-005",
        family: DoctrineFamily::Unconscionability,
        description: "Default interest at punitive rates",
        severity: RuleSeverity::Medium,
        risk_contribution: 0.1,
        remedy: "Cap default interest at a commercially reasonable rate",
        citation: "Jobson v Johnson [1989] 1 WLR 1026",
        pre: Preconditions {
            requires_clause: Some(ClauseType::PaymentTerms),
            clause_pattern: Some("maximum lawful rate|(two|three|2|3) percent per month"),
            ..NONE
        },
    },
    DoctrineRule {
        id: "UNC-006",
        family: DoctrineFamily::Unconscionability,
        description: "Perpetual restraints that never sunset",
        severity: RuleSeverity::High,
        risk_contribution: 0.15,
        remedy: "Add a sunset to all post-termination restraints",
        citation: "Mitchel v Reynolds (1711) 1 P Wms 181",
        pre: Preconditions {
            requires_clause: Some(ClauseType::NonCompete),
            clause_pattern: Some("perpetual|in perpetuity|survive indefinitely"),
            ..NONE
        },
    },
    // ---- Interpretation ----
    DoctrineRule {
        id: "INT-001",
        family: DoctrineFamily::Interpretation,
        description: "'Notwithstanding anything to the contrary' creates undisclosed priority \
            knots between clauses",
        severity: RuleSeverity::Medium,
        risk_contribution: 0.1,
        remedy: "Replace blanket supremacy language with an explicit order-of-precedence \
            clause",
        citation: "Rainy Sky SA v Kookmin Bank [2011] UKSC 50",
        pre: Preconditions {
            clause_pattern: Some("notwithstanding anything to the contrary"),
            ..NONE
        },
    },
    DoctrineRule {
        id: "INT-002",
        family: DoctrineFamily::Interpretation,
        description: "'Best efforts' obligations without a definition invite disputes over \
            the standard of performance",
        severity: RuleSeverity::Low,
        risk_contribution: 0.08,
        remedy: "Define the efforts standard or convert to concrete obligations",
        citation: "Bloor v Falstaff Brewing Corp, 601 F.2d 609 (2d Cir. 1979)",
        pre: Preconditions {
            clause_pattern: Some("best efforts|best endeavou?rs"),
            missing_pattern: Some("means|defined as"),
            ..NONE
        },
    },
    DoctrineRule {
        id: "INT-003",
        family: DoctrineFamily::Interpretation,
        description: "'Material breach' used as a trigger but never defined",
        severity: RuleSeverity::Low,
        risk_contribution: 0.08,
        remedy: "Define materiality or enumerate the breaches justifying termination",
        citation: "Hongkong Fir Shipping Co v Kawasaki Kisen Kaisha [1962] 2 QB 26",
        pre: Preconditions {
            clause_pattern: Some("material breach"),
            missing_pattern: Some("material breach (means|includes)"),
            ..NONE
        },
    },
    DoctrineRule {
        id: "INT-004",
        family: DoctrineFamily::Interpretation,
        description: "A governing law clause without a forum or venue selection",
        severity: RuleSeverity::Low,
        risk_contribution: 0.08,
        remedy: "Add a jurisdiction or arbitration seat alongside the governing law",
        citation: "The Eleftheria [1970] P 94",
        pre: Preconditions {
            requires_clause: Some(ClauseType::GoverningLaw),
            missing_pattern: Some("jurisdiction|venue|forum|arbitrat"),
            ..NONE
        },
    },
    DoctrineRule {
        id: "INT-005",
        family: DoctrineFamily::Interpretation,
        description: "Heavy reliance on open-ended enumerations ('including but not limited \
            to') leaves scope to litigation",
        severity: RuleSeverity::Low,
        risk_contribution: 0.05,
        remedy: "Close the key enumerations or state the limiting principle",
        citation: "Ejusdem generis canon; Circuit City Stores v Adams, 532 U.S. 105 (2001)",
        pre: Preconditions {
            clause_pattern: Some("including but not limited to|including without limitation"),
            ..NONE
        },
    },
    // ---- Public policy ----
    DoctrineRule {
        id: "PP-001",
        family: DoctrineFamily::PublicPolicy,
        description: "Employment-adjacent restraints in a commercial contract draw heightened \
            scrutiny",
        severity: RuleSeverity::Medium,
        risk_contribution: 0.12,
        remedy: "Confine restraints to corporate parties; carve out individual employment",
        citation: "Edwards v Arthur Andersen LLP, 44 Cal. 4th 937 (2008)",
        pre: Preconditions {
            requires_clause: Some(ClauseType::NonCompete),
            clause_pattern: Some("employee|personnel|individual"),
            ..NONE
        },
    },
    DoctrineRule {
        id: "PP-002",
        family: DoctrineFamily::PublicPolicy,
        description: "Personal data processing without a breach notification duty",
        severity: RuleSeverity::High,
        risk_contribution: 0.15,
        remedy: "Add breach notification within a fixed period after awareness",
        citation: "GDPR art. 33",
        pre: Preconditions {
            requires_clause: Some(ClauseType::DataProtection),
            missing_pattern: Some("breach notification|notify\\w*[^.]{0,40}breach"),
            ..NONE
        },
    },
    DoctrineRule {
        id: "PP-003",
        family: DoctrineFamily::PublicPolicy,
        description: "The contract handles personal data but has no data protection clause",
        severity: RuleSeverity::High,
        risk_contribution: 0.18,
        remedy: "Add a data processing clause with security measures and transfer safeguards",
        citation: "GDPR art. 28",
        pre: Preconditions {
            missing_clause: Some(ClauseType::DataProtection),
            contract_types: Some(&["MSA", "SAAS"]),
            clause_pattern: Some("personal data|personal information|personally identifiable"),
            ..NONE
        },
    },
    DoctrineRule {
        id: "PP-004",
        family: DoctrineFamily::PublicPolicy,
        description: "Waiver of injunctive or equitable relief forecloses the only effective \
            remedy for confidentiality breaches",
        severity: RuleSeverity::Medium,
        risk_contribution: 0.1,
        remedy: "Preserve equitable relief for confidentiality and IP breaches",
        citation: "eBay Inc v MercExchange, 547 U.S. 388 (2006)",
        pre: Preconditions {
            clause_pattern: Some("waives?[^.]{0,40}(injunctive|equitable) relief"),
            ..NONE
        },
    },
    DoctrineRule {
        id: "PP-005",
        family: DoctrineFamily::PublicPolicy,
        description: "Exclusion of liability for gross negligence, willful misconduct or \
            fraud is unenforceable in most fora and signals overreach",
        severity: RuleSeverity::Critical,
        risk_contribution: 0.25,
        remedy: "Carve gross negligence, willful misconduct and fraud out of all exclusions",
        citation: "HIH Casualty & General Insurance v Chase Manhattan Bank [2003] UKHL 6",
        pre: Preconditions {
            clause_pattern: Some("(excludes?|excluding|no liability for)[^.]{0,60}(gross negligence|willful misconduct|fraud)|even in the event of[^.]{0,30}(gross negligence|fraud)"),
            ..NONE
        },
    },
    // ---- Formation ----
    DoctrineRule {
        id: "FORM-001",
        family: DoctrineFamily::Formation,
        description: "No execution language anywhere in the analyzed text",
        severity: RuleSeverity::Low,
        risk_contribution: 0.08,
        remedy: "Confirm the executed counterparts exist outside the analyzed excerpt",
        citation: "Restatement (Second) of Contracts s. 27",
        pre: Preconditions {
            missing_pattern: Some("executed|signed|signature|in witness whereof"),
            ..NONE
        },
    },
    DoctrineRule {
        id: "FORM-002",
        family: DoctrineFamily::Formation,
        description: "'Subject to contract' or non-binding language casts doubt on intent to \
            be bound",
        severity: RuleSeverity::Medium,
        risk_contribution: 0.12,
        remedy: "State expressly which sections bind on signature",
        citation: "RTS Flexible Systems Ltd v Molkerei Alois Muller [2010] UKSC 14",
        pre: Preconditions {
            clause_pattern: Some("subject to contract|non-?binding"),
            ..NONE
        },
    },
    DoctrineRule {
        id: "FORM-003",
        family: DoctrineFamily::Formation,
        description: "Automatic renewal with no opt-out mechanics locks the parties in by \
            inertia",
        severity: RuleSeverity::Medium,
        risk_contribution: 0.12,
        remedy: "Add a non-renewal notice window before each renewal date",
        citation: "N.Y. Gen. Oblig. Law s. 5-903",
        pre: Preconditions {
            clause_pattern: Some("automatically renew"),
            missing_pattern: Some("opt.?out|non-?renewal|notice of termination"),
            ..NONE
        },
    },
    DoctrineRule {
        id: "FORM-004",
        family: DoctrineFamily::Formation,
        description: "Terms incorporated by reference without an identifiable attachment",
        severity: RuleSeverity::Low,
        risk_contribution: 0.08,
        remedy: "Attach or precisely identify every incorporated document",
        citation: "Thornton v Shoe Lane Parking [1971] 2 QB 163",
        pre: Preconditions {
            clause_pattern: Some("incorporated by reference"),
            missing_pattern: Some("attached|exhibit|schedule|annex"),
            ..NONE
        },
    },
    DoctrineRule {
        id: "FORM-005",
        family: DoctrineFamily::Formation,
        description: "A risky bargain with no agreed dispute forum compounds enforcement \
            uncertainty",
        severity: RuleSeverity::Medium,
        risk_contribution: 0.1,
        remedy: "Add a dispute resolution ladder before positions harden",
        citation: "Scott v Avery (1856) 5 HL Cas 811",
        pre: Preconditions {
            missing_clause: Some(ClauseType::DisputeResolution),
            risk_threshold: Some(0.5),
            ..NONE
        },
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashMap, HashSet};

    #[test]
    fn forty_two_rules_with_unique_ids() {
        assert_eq!(doctrine_rules().len(), 42);
        let ids: HashSet<&str> = doctrine_rules().iter().map(|r| r.id).collect();
        assert_eq!(ids.len(), 42);
    }

    #[test]
    fn every_family_is_represented() {
        let mut by_family: HashMap<DoctrineFamily, usize> = HashMap::new();
        for rule in doctrine_rules() {
            *by_family.entry(rule.family).or_insert(0) += 1;
        }
        assert_eq!(by_family.len(), 7);
        for (family, count) in by_family {
            assert!(count >= 5, "{family:?} has only {count} rules");
        }
    }

    #[test]
    fn contributions_in_unit_range() {
        for rule in doctrine_rules() {
            assert!((0.0..=1.0).contains(&rule.risk_contribution), "{}", rule.id);
            assert!(!rule.remedy.is_empty());
            assert!(!rule.citation.is_empty());
        }
    }

    #[test]
    fn every_rule_has_at_least_one_precondition() {
        for rule in doctrine_rules() {
            let p = &rule.pre;
            let any = p.requires_clause.is_some()
                || p.requires_clause_secondary.is_some()
                || p.missing_clause.is_some()
                || p.contract_types.is_some()
                || p.risk_threshold.is_some()
                || p.clause_pattern.is_some()
                || p.clause_pattern_secondary.is_some()
                || p.missing_pattern.is_some();
            assert!(any, "{} has no preconditions", rule.id);
        }
    }
}
