//! Curated case index.
//!
//! Thirty landmark entries spanning the clause taxonomy. `ruling`
//! states what the court decided, `principle` the doctrine it stands for,
//! and `safe_language` wording consistent with the ruling that can ground
//! a rewrite. Compile-time data; a minor-version concern.

use lexgraph_core::ClauseType;

#[derive(Debug, Clone, Copy)]
pub struct CaseEntry {
    pub id: &'static str,
    pub name: &'static str,
    pub clause_type: ClauseType,
    pub jurisdiction: &'static str,
    pub year: u16,
    pub ruling: &'static str,
    pub principle: &'static str,
    pub safe_language: &'static str,
    pub risk_factors: &'static [&'static str],
}

pub fn case_index() -> &'static [CaseEntry] {
    &CASES
}

static CASES: [CaseEntry; 30] = [
    CaseEntry {
        id: "case-hadley-1854",
        name: "Hadley v Baxendale",
        clause_type: ClauseType::LimitationOfLiability,
        jurisdiction: "England",
        year: 1854,
        ruling: "Damages are limited to losses arising naturally from the breach or within \
            the parties' contemplation at formation.",
        principle: "Consequential damages must be foreseeable to be recoverable.",
        safe_language: "Neither party shall be liable for indirect or consequential losses \
            that were not reasonably foreseeable at the date of this Agreement.",
        risk_factors: &["consequential damages", "lost profits", "foreseeability"],
    },
    CaseEntry {
        id: "case-photo-production-1980",
        name: "Photo Production Ltd v Securicor Transport Ltd",
        clause_type: ClauseType::LimitationOfLiability,
        jurisdiction: "England",
        year: 1980,
        ruling: "Clear exclusion clauses between commercial parties are enforced even for \
            fundamental breach.",
        principle: "Exclusions survive fundamental breach if the words are clear.",
        safe_language: "The limitations in this clause apply to any claim however arising, \
            including fundamental breach, to the extent permitted by law.",
        risk_factors: &["exclusion clause", "fundamental breach", "blanket exclusion"],
    },
    CaseEntry {
        id: "case-cavendish-2015",
        name: "Cavendish Square Holding BV v Makdessi",
        clause_type: ClauseType::PaymentTerms,
        jurisdiction: "UK",
        year: 2015,
        ruling: "A clause is a penalty only if out of all proportion to a legitimate \
            interest in performance.",
        principle: "Liquidated sums must protect a legitimate interest proportionately.",
        safe_language: "The parties agree the sums in this clause are a genuine pre-estimate \
            of loss protecting a legitimate commercial interest.",
        risk_factors: &["penalty", "liquidated damages", "disproportionate sum"],
    },
    CaseEntry {
        id: "case-dunlop-1915",
        name: "Dunlop Pneumatic Tyre Co v New Garage & Motor Co",
        clause_type: ClauseType::PaymentTerms,
        jurisdiction: "England",
        year: 1915,
        ruling: "Stipulated sums payable on breach are unenforceable penalties unless a \
            genuine pre-estimate of loss.",
        principle: "Penalty doctrine distinguishes deterrence from compensation.",
        safe_language: "Late payment interest accrues at one percent per month, which the \
            parties agree reflects the cost of late payment.",
        risk_factors: &["penalty interest", "default charges", "deterrent sums"],
    },
    CaseEntry {
        id: "case-williams-1965",
        name: "Williams v Walker-Thomas Furniture Co",
        clause_type: ClauseType::LimitationOfLiability,
        jurisdiction: "US",
        year: 1965,
        ruling: "Unconscionable terms procured through absence of meaningful choice are \
            unenforceable.",
        principle: "Procedural plus substantive unconscionability voids oppressive terms.",
        safe_language: "Each party confirms it had the opportunity to review this Agreement \
            with counsel and negotiate its terms.",
        risk_factors: &["unconscionable", "adhesion", "unequal bargaining power"],
    },
    CaseEntry {
        id: "case-concepcion-2011",
        name: "AT&T Mobility LLC v Concepcion",
        clause_type: ClauseType::DisputeResolution,
        jurisdiction: "US",
        year: 2011,
        ruling: "The Federal Arbitration Act preempts state rules conditioning arbitration \
            on class procedures.",
        principle: "Arbitration agreements are enforced according to their terms.",
        safe_language: "Disputes shall be resolved by individual arbitration; small claims \
            and injunctive relief for IP breaches are carved out.",
        risk_factors: &["class action waiver", "arbitration", "consumer claims"],
    },
    CaseEntry {
        id: "case-scott-avery-1856",
        name: "Scott v Avery",
        clause_type: ClauseType::DisputeResolution,
        jurisdiction: "England",
        year: 1856,
        ruling: "Parties may make arbitration a condition precedent to litigation.",
        principle: "Agreed dispute ladders are enforceable sequencing, not ouster of courts.",
        safe_language: "No party may commence court proceedings until the escalation and \
            arbitration steps in this clause are exhausted, except for urgent injunctive \
            relief.",
        risk_factors: &["condition precedent", "forum sequencing", "premature litigation"],
    },
    CaseEntry {
        id: "case-bhasin-2014",
        name: "Bhasin v Hrynew",
        clause_type: ClauseType::Termination,
        jurisdiction: "Canada",
        year: 2014,
        ruling: "A duty of honest performance governs the exercise of contractual rights, \
            including non-renewal.",
        principle: "Good faith constrains discretionary and termination powers.",
        safe_language: "Each party shall exercise its rights under this clause honestly and \
            in good faith, with reasonable notice of non-renewal.",
        risk_factors: &["bad faith termination", "discretionary non-renewal", "honesty"],
    },
    CaseEntry {
        id: "case-product-star-1993",
        name: "The Product Star (No 2)",
        clause_type: ClauseType::Termination,
        jurisdiction: "England",
        year: 1993,
        ruling: "Contractual discretion must not be exercised arbitrarily, capriciously or \
            unreasonably.",
        principle: "Discretionary powers carry an implied rationality constraint.",
        safe_language: "Any discretion conferred by this Agreement shall be exercised \
            reasonably and for the purposes for which it was conferred.",
        risk_factors: &["sole discretion", "arbitrary exercise", "capricious termination"],
    },
    CaseEntry {
        id: "case-hongkong-fir-1962",
        name: "Hongkong Fir Shipping Co v Kawasaki Kisen Kaisha",
        clause_type: ClauseType::Termination,
        jurisdiction: "England",
        year: 1962,
        ruling: "Termination for breach of an innominate term requires deprivation of \
            substantially the whole benefit.",
        principle: "Not every breach justifies termination; materiality matters.",
        safe_language: "Either party may terminate for a material breach that remains \
            uncured thirty days after written notice describing the breach.",
        risk_factors: &["termination trigger", "material breach undefined", "minor breach"],
    },
    CaseEntry {
        id: "case-coco-clark-1969",
        name: "Coco v A.N. Clark (Engineers) Ltd",
        clause_type: ClauseType::Confidentiality,
        jurisdiction: "England",
        year: 1969,
        ruling: "Breach of confidence requires information with the necessary quality of \
            confidence imparted in circumstances importing an obligation.",
        principle: "Confidentiality obligations need identifiable protected information.",
        safe_language: "Confidential Information means non-public information identified as \
            confidential or that a reasonable person would understand to be confidential.",
        risk_factors: &["undefined confidential information", "overbroad secrecy"],
    },
    CaseEntry {
        id: "case-saltman-1948",
        name: "Saltman Engineering Co v Campbell Engineering Co",
        clause_type: ClauseType::Confidentiality,
        jurisdiction: "England",
        year: 1948,
        ruling: "Confidential drawings may not be used as a springboard even after partial \
            publication.",
        principle: "The springboard doctrine outlasts partial disclosure.",
        safe_language: "Recipient shall not use Confidential Information as a development \
            springboard, including after portions become public through no fault of its own.",
        risk_factors: &["springboard use", "derived products", "residual knowledge"],
    },
    CaseEntry {
        id: "case-nordenfelt-1894",
        name: "Nordenfelt v Maxim Nordenfelt Guns & Ammunition Co",
        clause_type: ClauseType::NonCompete,
        jurisdiction: "England",
        year: 1894,
        ruling: "Restraints of trade are void unless reasonable in the parties' and the \
            public's interest.",
        principle: "Restraints must be no wider than a legitimate interest requires.",
        safe_language: "The restriction applies only to the named business lines, within the \
            counties where services were performed, for twelve months after termination.",
        risk_factors: &["worldwide restraint", "excessive duration", "restraint of trade"],
    },
    CaseEntry {
        id: "case-edwards-2008",
        name: "Edwards v Arthur Andersen LLP",
        clause_type: ClauseType::NonCompete,
        jurisdiction: "US-CA",
        year: 2008,
        ruling: "California voids employee non-competition covenants outside statutory \
            exceptions.",
        principle: "Employee mobility defeats most individual non-competes in California.",
        safe_language: "Nothing in this clause restricts any individual's lawful employment; \
            restrictions bind only the corporate parties.",
        risk_factors: &["employee non-compete", "california", "void covenant"],
    },
    CaseEntry {
        id: "case-mitchel-1711",
        name: "Mitchel v Reynolds",
        clause_type: ClauseType::NonCompete,
        jurisdiction: "England",
        year: 1711,
        ruling: "General restraints are void; particular restraints need consideration and \
            reasonable limits.",
        principle: "Time- and place-limited restraints with consideration may stand.",
        safe_language: "The restraint is limited to the sold goodwill, a defined territory \
            and a fixed term supported by stated consideration.",
        risk_factors: &["perpetual restraint", "no consideration", "general restraint"],
    },
    CaseEntry {
        id: "case-jacob-youngs-1921",
        name: "Jacob & Youngs v Kent",
        clause_type: ClauseType::Warranty,
        jurisdiction: "US-NY",
        year: 1921,
        ruling: "Substantial performance with trivial defects earns the contract price less \
            diminution in value.",
        principle: "Trivial nonconformity does not forfeit the bargain.",
        safe_language: "Deliverables materially conforming to the specification are accepted, \
            with nonconformities remedied by repair, replacement or equitable price \
            adjustment.",
        risk_factors: &["strict conformance", "forfeiture", "trivial defects"],
    },
    CaseEntry {
        id: "case-hansa-nord-1976",
        name: "Cehave NV v Bremer Handelsgesellschaft (The Hansa Nord)",
        clause_type: ClauseType::Warranty,
        jurisdiction: "England",
        year: 1976,
        ruling: "Rejection of goods requires a breach going to the root; minor quality \
            shortfalls sound in damages.",
        principle: "Remedies scale with the gravity of the warranty breach.",
        safe_language: "For warranty breaches, Customer's remedies are re-performance, then \
            refund of affected fees; rejection is reserved for material nonconformance.",
        risk_factors: &["rejection rights", "minor defects", "remedy ladder"],
    },
    CaseEntry {
        id: "case-hih-2003",
        name: "HIH Casualty & General Insurance v Chase Manhattan Bank",
        clause_type: ClauseType::LimitationOfLiability,
        jurisdiction: "England",
        year: 2003,
        ruling: "Exclusions cannot shelter a party's own fraud; clear words cannot reach it.",
        principle: "Fraud carve-outs are mandatory in practice.",
        safe_language: "Nothing in this Agreement excludes or limits liability for fraud, \
            gross negligence or willful misconduct.",
        risk_factors: &["fraud exclusion", "gross negligence", "willful misconduct"],
    },
    CaseEntry {
        id: "case-mercexchange-2006",
        name: "eBay Inc v MercExchange LLC",
        clause_type: ClauseType::IpOwnership,
        jurisdiction: "US",
        year: 2006,
        ruling: "Injunctions in IP disputes follow traditional equitable factors, not \
            automatic rules.",
        principle: "Equitable relief for IP requires a real showing of irreparable harm.",
        safe_language: "The parties acknowledge that breach of the IP provisions may cause \
            irreparable harm for which damages are inadequate, entitling the owner to seek \
            injunctive relief.",
        risk_factors: &["injunction", "irreparable harm", "ip enforcement"],
    },
    CaseEntry {
        id: "case-ibm-catamore-1976",
        name: "IBM Corp v Catamore Enterprises",
        clause_type: ClauseType::IpOwnership,
        jurisdiction: "US",
        year: 1976,
        ruling: "Ambiguity over ownership of developed software resolves against the drafter \
            absent an express allocation.",
        principle: "Work-product ownership must be allocated expressly.",
        safe_language: "All work product created specifically for Customer under a statement \
            of work is assigned to Customer on payment; Provider retains its pre-existing \
            materials and general know-how.",
        risk_factors: &["work product ownership", "ambiguous assignment", "developed ip"],
    },
    CaseEntry {
        id: "case-smith-south-wales-1891",
        name: "Smith v South Wales Switchgear",
        clause_type: ClauseType::Indemnification,
        jurisdiction: "UK",
        year: 1978,
        ruling: "An indemnity covering the indemnitee's own negligence requires clear and \
            unambiguous words.",
        principle: "Indemnities are construed narrowly against the party they benefit.",
        safe_language: "Each party shall indemnify the other against third-party claims \
            caused by the indemnifying party's breach or negligence; neither indemnifies the \
            other against the other's own negligence.",
        risk_factors: &["own negligence indemnity", "broad indemnity", "unclear scope"],
    },
    CaseEntry {
        id: "case-stewart-gustafson-1998",
        name: "Stewart Title Guaranty v Gustafson",
        clause_type: ClauseType::Indemnification,
        jurisdiction: "US",
        year: 1998,
        ruling: "Indemnity obligations accrue on defined triggers; open-ended 'any and all \
            claims' language is read against the drafter.",
        principle: "Indemnity triggers and procedures must be express.",
        safe_language: "Indemnification is conditioned on prompt written notice, sole control \
            of the defense by the indemnifying party, and reasonable cooperation.",
        risk_factors: &["any and all claims", "no notice condition", "defense control"],
    },
    CaseEntry {
        id: "case-linden-gardens-1994",
        name: "Linden Gardens Trust v Lenesta Sludge Disposals",
        clause_type: ClauseType::Assignment,
        jurisdiction: "England",
        year: 1994,
        ruling: "Contractual prohibitions on assignment are effective; purported assignments \
            in breach pass nothing.",
        principle: "Anti-assignment clauses bind successors.",
        safe_language: "Neither party may assign this Agreement without prior written \
            consent, not to be unreasonably withheld; merger and affiliate transfers are \
            permitted with notice.",
        risk_factors: &["assignment prohibition", "change of control", "consent standard"],
    },
    CaseEntry {
        id: "case-taylor-caldwell-1863",
        name: "Taylor v Caldwell",
        clause_type: ClauseType::ForceMajeure,
        jurisdiction: "England",
        year: 1863,
        ruling: "Destruction of the subject matter without fault discharges both parties.",
        principle: "Impossibility excuses performance; force majeure clauses codify it.",
        safe_language: "Neither party is liable for failure to perform caused by events \
            beyond its reasonable control, provided it notifies the other promptly and \
            resumes performance when the event ends.",
        risk_factors: &["impossibility", "supervening event", "no force majeure clause"],
    },
    CaseEntry {
        id: "case-superior-overseas-1982",
        name: "Superior Overseas Development Corp v British Gas",
        clause_type: ClauseType::ForceMajeure,
        jurisdiction: "England",
        year: 1982,
        ruling: "Hardship and force majeure clauses are construed by their words; economic \
            onerousness alone rarely qualifies.",
        principle: "Market shifts are not force majeure absent express language.",
        safe_language: "Force majeure excludes changes in market conditions, currency \
            fluctuation and events whose effects could be avoided by reasonable precautions.",
        risk_factors: &["economic hardship", "market change", "overbroad force majeure"],
    },
    CaseEntry {
        id: "case-google-spain-2014",
        name: "Google Spain SL v AEPD",
        clause_type: ClauseType::DataProtection,
        jurisdiction: "EU",
        year: 2014,
        ruling: "Data protection obligations follow the processing activity, not the \
            corporate form or location.",
        principle: "Processing roles and responsibilities must be allocated explicitly.",
        safe_language: "The parties' controller and processor roles are identified in the \
            data processing annex, which allocates compliance responsibilities for each \
            processing activity.",
        risk_factors: &["controller processor roles", "extraterritorial", "processing scope"],
    },
    CaseEntry {
        id: "case-schrems-ii-2020",
        name: "Data Protection Commissioner v Facebook Ireland (Schrems II)",
        clause_type: ClauseType::DataProtection,
        jurisdiction: "EU",
        year: 2020,
        ruling: "International transfers need case-by-case safeguards; standard clauses \
            alone may not suffice.",
        principle: "Transfer mechanisms require supplementary measures where law conflicts.",
        safe_language: "Personal data is transferred outside the EEA only under a valid \
            transfer mechanism with documented supplementary measures.",
        risk_factors: &["international transfer", "standard contractual clauses", "surveillance"],
    },
    CaseEntry {
        id: "case-vita-food-1939",
        name: "Vita Food Products v Unus Shipping Co",
        clause_type: ClauseType::GoverningLaw,
        jurisdiction: "Privy Council",
        year: 1939,
        ruling: "An express choice of law is honored if bona fide, legal and not contrary to \
            public policy.",
        principle: "Party autonomy governs choice of law.",
        safe_language: "This Agreement is governed by the laws of the named jurisdiction, \
            chosen in good faith for its developed commercial law.",
        risk_factors: &["choice of law", "public policy", "connection to forum"],
    },
    CaseEntry {
        id: "case-eleftheria-1970",
        name: "The Eleftheria",
        clause_type: ClauseType::GoverningLaw,
        jurisdiction: "England",
        year: 1970,
        ruling: "Foreign jurisdiction clauses are enforced by stay absent strong cause shown.",
        principle: "Forum selection carries real weight; drafting it loosely invites battle.",
        safe_language: "The parties submit to the exclusive jurisdiction of the courts of the \
            chosen forum, waiving objections of inconvenient forum.",
        risk_factors: &["forum selection", "parallel proceedings", "jurisdiction battle"],
    },
    CaseEntry {
        id: "case-sumpter-hedges-1898",
        name: "Sumpter v Hedges",
        clause_type: ClauseType::PaymentTerms,
        jurisdiction: "England",
        year: 1898,
        ruling: "An abandoning contractor recovers nothing for part performance of an entire \
            obligation.",
        principle: "Entire-obligation payment structures are all-or-nothing.",
        safe_language: "Fees accrue in milestones; on termination, Customer pays for \
            milestones accepted and work in progress at the agreed rates.",
        risk_factors: &["entire obligation", "milestone payment", "abandonment"],
    },
];
