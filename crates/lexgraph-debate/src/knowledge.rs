//! Debate knowledge base: per clause kind, the risks a prosecutor raises,
//! the precedents cited, and the defenses available.

use lexgraph_core::ClauseType;

#[derive(Debug, Clone, Copy)]
pub struct DebateEntry {
    pub clause_type: ClauseType,
    pub risks: &'static [&'static str],
    pub precedents: &'static [&'static str],
    pub defenses: &'static [&'static str],
}

pub fn knowledge_base() -> &'static [DebateEntry] {
    &KNOWLEDGE
}

pub fn entry_for(kind: ClauseType) -> Option<&'static DebateEntry> {
    KNOWLEDGE.iter().find(|e| e.clause_type == kind)
}

static KNOWLEDGE: [DebateEntry; 10] = [
    DebateEntry {
        clause_type: ClauseType::Indemnification,
        risks: &[
            "uncapped indemnity exposure for third party claims",
            "indemnity may cover the indemnitee's own negligence",
            "no notice or defense-control conditions on the indemnity",
            "indemnity survives termination indefinitely",
        ],
        precedents: &[
            "Smith v South Wales Switchgear (clear words needed for own-negligence indemnity)",
            "Stewart Title v Gustafson (open-ended triggers read against the drafter)",
        ],
        defenses: &[
            "mutual indemnities are standard in service agreements of this kind",
            "the indemnity is confined to third-party claims, not direct damages",
            "notice and cooperation conditions cabin the practical exposure",
        ],
    },
    DebateEntry {
        clause_type: ClauseType::LimitationOfLiability,
        risks: &[
            "blanket exclusion of all damages leaves no meaningful remedy",
            "cap excludes too little: carve-outs swallow the limitation",
            "exclusion may purport to cover gross negligence or fraud",
            "asymmetric cap protects only one party",
        ],
        precedents: &[
            "Hadley v Baxendale (foreseeability limits consequential damages)",
            "HIH v Chase Manhattan (fraud cannot be excluded)",
        ],
        defenses: &[
            "fee-based caps are the universal market allocation of risk",
            "both parties are sophisticated commercial actors who priced the cap",
            "statutory carve-outs apply regardless of the drafting",
        ],
    },
    DebateEntry {
        clause_type: ClauseType::Termination,
        risks: &[
            "termination at will without notice destroys reliance investments",
            "one-sided termination rights create hold-up leverage",
            "no cure period converts trivial breaches into termination events",
        ],
        precedents: &[
            "Bhasin v Hrynew (honest performance constrains termination)",
            "Hongkong Fir (materiality gates termination for breach)",
        ],
        defenses: &[
            "convenience termination with notice is standard and mutual",
            "cure periods protect against opportunistic termination",
            "wind-down obligations preserve continuity for both sides",
        ],
    },
    DebateEntry {
        clause_type: ClauseType::Confidentiality,
        risks: &[
            "perpetual secrecy obligations are operationally unmanageable",
            "undefined confidential information sweeps in everything",
            "no standard exclusions for public or independently developed information",
        ],
        precedents: &[
            "Coco v Clark (information must have the quality of confidence)",
            "Saltman Engineering (springboard doctrine)",
        ],
        defenses: &[
            "five-year terms with standard exclusions track market practice",
            "trade secrets legitimately warrant indefinite protection",
            "mutual obligations burden both parties equally",
        ],
    },
    DebateEntry {
        clause_type: ClauseType::PaymentTerms,
        risks: &[
            "non-refundable fees decouple payment from performance",
            "punitive default interest operates as a penalty",
            "immediate suspension rights weaponize operational dependence",
        ],
        precedents: &[
            "Dunlop v New Garage (penalty doctrine)",
            "Cavendish v Makdessi (legitimate interest test)",
        ],
        defenses: &[
            "net-30 terms with modest interest are market standard",
            "suspension follows notice and applies to undisputed amounts only",
            "milestone billing aligns payment with delivery",
        ],
    },
    DebateEntry {
        clause_type: ClauseType::IpOwnership,
        risks: &[
            "work-product assignment may sweep in pre-existing IP",
            "ambiguous ownership of derivative works invites dispute",
            "no license-back strands the paying party",
        ],
        precedents: &[
            "IBM v Catamore (express allocation required)",
            "eBay v MercExchange (equitable factors govern IP injunctions)",
        ],
        defenses: &[
            "pre-existing IP is expressly retained by each party",
            "customer ownership of bespoke deliverables is the market norm",
            "license-back of embedded materials protects continuity",
        ],
    },
    DebateEntry {
        clause_type: ClauseType::DataProtection,
        risks: &[
            "processing without documented instructions or purpose limits",
            "no breach notification window",
            "unrestricted sub-processing and international transfers",
        ],
        precedents: &[
            "Google Spain (responsibility follows processing)",
            "Schrems II (transfers need case-by-case safeguards)",
        ],
        defenses: &[
            "the data processing annex allocates roles and safeguards",
            "notification windows match regulatory baselines",
            "sub-processors are flowed down identical obligations",
        ],
    },
    DebateEntry {
        clause_type: ClauseType::Warranty,
        risks: &[
            "as-is disclaimers strip all quality assurance",
            "exclusive remedy clauses may fail of their essential purpose",
            "warranty periods too short to surface latent defects",
        ],
        precedents: &[
            "Jacob & Youngs v Kent (substantial performance)",
            "The Hansa Nord (remedies scale with gravity)",
        ],
        defenses: &[
            "professional-performance warranties are the service-industry norm",
            "re-performance remedies keep disputes out of court",
            "statutory warranties persist where non-excludable",
        ],
    },
    DebateEntry {
        clause_type: ClauseType::DisputeResolution,
        risks: &[
            "one-sided arbitrator selection taints the forum",
            "class waivers plus cost allocation may bar small claims entirely",
            "mandatory arbitration hides systemic issues from public courts",
        ],
        precedents: &[
            "AT&T Mobility v Concepcion (arbitration enforced as written)",
            "Scott v Avery (sequencing clauses are valid)",
        ],
        defenses: &[
            "neutral-institution arbitration is faster and cheaper for both sides",
            "escalation ladders resolve most disputes before filing",
            "injunctive carve-outs preserve urgent remedies",
        ],
    },
    DebateEntry {
        clause_type: ClauseType::NonCompete,
        risks: &[
            "restraints broader than any legitimate protectable interest",
            "worldwide or multi-year scope chills lawful competition",
            "employee-level restraints are void in several jurisdictions",
        ],
        precedents: &[
            "Nordenfelt (reasonableness test)",
            "Edwards v Arthur Andersen (California voids employee covenants)",
        ],
        defenses: &[
            "narrow non-solicitation is the only restraint imposed",
            "the restraint protects identifiable goodwill actually transferred",
            "duration and territory match the protected interest",
        ],
    },
];
