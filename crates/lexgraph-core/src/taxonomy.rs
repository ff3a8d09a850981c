//! Closed clause taxonomy.
//!
//! Fifteen named clause kinds plus an `Unknown` sentinel. Each kind carries
//! a canonical English and French description (the classifier builds its
//! prototype index from the combined text), a risk weight in `[0, 1]`, and
//! a category key. The taxonomy is fixed at build time; changing it is a
//! minor-version event because prototype vectors, the relationship catalog,
//! and the GAT one-hot layout all depend on it.

use serde::{Deserialize, Serialize};

/// A clause kind from the closed taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClauseType {
    Indemnification,
    LimitationOfLiability,
    Termination,
    Confidentiality,
    GoverningLaw,
    DisputeResolution,
    PaymentTerms,
    IpOwnership,
    Warranty,
    DataProtection,
    ForceMajeure,
    NonCompete,
    Assignment,
    Insurance,
    AuditRights,
    /// Sentinel for unclassifiable input. Not part of the prototype index.
    Unknown,
}

/// Category key for a clause kind.
///
/// Fourteen distinct keys: the two liability-allocation kinds share
/// `risk_allocation`, every other kind has its own key. `force_majeure`
/// doubles as both a clause kind and a category key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClauseCategory {
    RiskAllocation,
    Lifecycle,
    Information,
    GoverningLaw,
    DisputeResolution,
    Commercial,
    IntellectualProperty,
    Assurance,
    Compliance,
    ForceMajeure,
    Restrictive,
    Transfer,
    Coverage,
    Oversight,
}

impl ClauseCategory {
    /// All category keys, in one-hot order.
    pub const ALL: [ClauseCategory; 14] = [
        ClauseCategory::RiskAllocation,
        ClauseCategory::Lifecycle,
        ClauseCategory::Information,
        ClauseCategory::GoverningLaw,
        ClauseCategory::DisputeResolution,
        ClauseCategory::Commercial,
        ClauseCategory::IntellectualProperty,
        ClauseCategory::Assurance,
        ClauseCategory::Compliance,
        ClauseCategory::ForceMajeure,
        ClauseCategory::Restrictive,
        ClauseCategory::Transfer,
        ClauseCategory::Coverage,
        ClauseCategory::Oversight,
    ];

    /// Index into the one-hot layout used by graph attention node features.
    pub fn one_hot_index(&self) -> usize {
        Self::ALL.iter().position(|c| c == self).unwrap_or(0)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ClauseCategory::RiskAllocation => "risk_allocation",
            ClauseCategory::Lifecycle => "lifecycle",
            ClauseCategory::Information => "information",
            ClauseCategory::GoverningLaw => "governing_law",
            ClauseCategory::DisputeResolution => "dispute_resolution",
            ClauseCategory::Commercial => "commercial",
            ClauseCategory::IntellectualProperty => "intellectual_property",
            ClauseCategory::Assurance => "assurance",
            ClauseCategory::Compliance => "compliance",
            ClauseCategory::ForceMajeure => "force_majeure",
            ClauseCategory::Restrictive => "restrictive",
            ClauseCategory::Transfer => "transfer",
            ClauseCategory::Coverage => "coverage",
            ClauseCategory::Oversight => "oversight",
        }
    }
}

/// Static descriptor for one taxonomy entry.
#[derive(Debug, Clone, Copy)]
pub struct ClauseDescriptor {
    pub kind: ClauseType,
    pub label: &'static str,
    pub description_en: &'static str,
    pub description_fr: &'static str,
    pub risk_weight: f64,
    pub category: ClauseCategory,
}

impl ClauseType {
    /// The fifteen classifiable kinds, in prototype-index order.
    pub const ALL: [ClauseType; 15] = [
        ClauseType::Indemnification,
        ClauseType::LimitationOfLiability,
        ClauseType::Termination,
        ClauseType::Confidentiality,
        ClauseType::GoverningLaw,
        ClauseType::DisputeResolution,
        ClauseType::PaymentTerms,
        ClauseType::IpOwnership,
        ClauseType::Warranty,
        ClauseType::DataProtection,
        ClauseType::ForceMajeure,
        ClauseType::NonCompete,
        ClauseType::Assignment,
        ClauseType::Insurance,
        ClauseType::AuditRights,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ClauseType::Indemnification => "indemnification",
            ClauseType::LimitationOfLiability => "limitation_of_liability",
            ClauseType::Termination => "termination",
            ClauseType::Confidentiality => "confidentiality",
            ClauseType::GoverningLaw => "governing_law",
            ClauseType::DisputeResolution => "dispute_resolution",
            ClauseType::PaymentTerms => "payment_terms",
            ClauseType::IpOwnership => "ip_ownership",
            ClauseType::Warranty => "warranty",
            ClauseType::DataProtection => "data_protection",
            ClauseType::ForceMajeure => "force_majeure",
            ClauseType::NonCompete => "non_compete",
            ClauseType::Assignment => "assignment",
            ClauseType::Insurance => "insurance",
            ClauseType::AuditRights => "audit_rights",
            ClauseType::Unknown => "unknown",
        }
    }

    /// Parse a snake_case kind name. Unrecognized names map to `Unknown`.
    pub fn parse(name: &str) -> ClauseType {
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == name)
            .unwrap_or(ClauseType::Unknown)
    }

    pub fn descriptor(&self) -> Option<&'static ClauseDescriptor> {
        DESCRIPTORS.iter().find(|d| d.kind == *self)
    }

    /// Risk weight in `[0, 1]`. `Unknown` sits at the neutral midpoint.
    pub fn risk_weight(&self) -> f64 {
        self.descriptor().map(|d| d.risk_weight).unwrap_or(0.5)
    }

    /// Category key. `None` for `Unknown`.
    pub fn category(&self) -> Option<ClauseCategory> {
        self.descriptor().map(|d| d.category)
    }

    /// Human-readable label, e.g. `"limitation of liability"`.
    pub fn display_name(&self) -> String {
        self.as_str().replace('_', " ")
    }
}

impl std::fmt::Display for ClauseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Descriptor table for the fifteen classifiable kinds.
///
/// The descriptions are the classifier prototypes: the combined EN+FR text
/// of each entry is what clause text is scored against, so the wording
/// deliberately leans on the vocabulary these clauses use in the wild.
pub static DESCRIPTORS: [ClauseDescriptor; 15] = [
    ClauseDescriptor {
        kind: ClauseType::Indemnification,
        label: "Indemnification",
        description_en: "Indemnification and hold harmless obligations. One party agrees to \
            indemnify, defend and hold harmless the other party and its affiliates, officers \
            and employees from and against any third party claims, demands, losses, damages, \
            liabilities, costs and expenses including reasonable attorneys fees arising out of \
            breach, negligence or infringement.",
        description_fr: "Obligations d'indemnisation et de garantie. Une partie s'engage a \
            indemniser, defendre et garantir l'autre partie contre toute reclamation de tiers, \
            perte, dommage, responsabilite, cout et depense, y compris les honoraires d'avocat, \
            resultant d'une violation, d'une negligence ou d'une contrefacon.",
        risk_weight: 0.9,
        category: ClauseCategory::RiskAllocation,
    },
    ClauseDescriptor {
        kind: ClauseType::LimitationOfLiability,
        label: "Limitation of Liability",
        description_en: "Limitation of liability and exclusion of damages. Neither party shall \
            be liable for indirect, incidental, special, consequential or punitive damages, \
            loss of profits or revenue. Aggregate liability is capped and shall not exceed the \
            fees paid or payable in the twelve months preceding the claim.",
        description_fr: "Limitation de responsabilite et exclusion des dommages. Aucune partie \
            ne sera responsable des dommages indirects, accessoires, speciaux ou consecutifs, \
            perte de profits ou de revenus. La responsabilite globale est plafonnee et ne \
            depassera pas les montants payes au cours des douze mois precedents.",
        risk_weight: 0.85,
        category: ClauseCategory::RiskAllocation,
    },
    ClauseDescriptor {
        kind: ClauseType::Termination,
        label: "Termination",
        description_en: "Termination of the agreement. Either party may terminate for \
            convenience upon prior written notice, or terminate for cause upon material breach \
            that remains uncured after a cure period. Effect of termination, survival of \
            accrued rights and wind-down obligations.",
        description_fr: "Resiliation du contrat. Chaque partie peut resilier pour convenance \
            moyennant un preavis ecrit, ou resilier pour faute en cas de manquement grave non \
            repare apres une periode de remediation. Effets de la resiliation et survie des \
            droits acquis.",
        risk_weight: 0.7,
        category: ClauseCategory::Lifecycle,
    },
    ClauseDescriptor {
        kind: ClauseType::Confidentiality,
        label: "Confidentiality",
        description_en: "Confidentiality and non-disclosure. Each party shall keep confidential \
            information of the disclosing party secret, use it solely for the purpose of the \
            agreement, restrict disclosure to persons with a need to know, and return or \
            destroy confidential materials upon request.",
        description_fr: "Confidentialite et non-divulgation. Chaque partie garde secretes les \
            informations confidentielles de la partie divulgatrice, les utilise uniquement aux \
            fins du contrat, limite la divulgation aux personnes ayant besoin d'en connaitre et \
            restitue ou detruit les documents confidentiels sur demande.",
        risk_weight: 0.5,
        category: ClauseCategory::Information,
    },
    ClauseDescriptor {
        kind: ClauseType::GoverningLaw,
        label: "Governing Law",
        description_en: "Governing law and jurisdiction. This agreement shall be governed by \
            and construed in accordance with the laws of a named state or country, without \
            regard to conflict of laws principles, and the parties submit to the exclusive \
            jurisdiction of the courts located there.",
        description_fr: "Droit applicable et juridiction. Le present contrat est regi et \
            interprete conformement aux lois d'un etat ou pays designe, sans egard aux regles \
            de conflit de lois, et les parties se soumettent a la competence exclusive des \
            tribunaux qui y siegent.",
        risk_weight: 0.3,
        category: ClauseCategory::GoverningLaw,
    },
    ClauseDescriptor {
        kind: ClauseType::DisputeResolution,
        label: "Dispute Resolution",
        description_en: "Dispute resolution procedure. Disputes arising out of or in connection \
            with the agreement shall first be escalated to good faith negotiation, then \
            mediation, and finally binding arbitration under named rules, before resort to \
            litigation.",
        description_fr: "Procedure de reglement des differends. Les litiges decoulant du \
            contrat sont d'abord soumis a une negociation de bonne foi, puis a une mediation, \
            et enfin a un arbitrage contraignant selon un reglement designe, avant tout \
            recours contentieux.",
        risk_weight: 0.55,
        category: ClauseCategory::DisputeResolution,
    },
    ClauseDescriptor {
        kind: ClauseType::PaymentTerms,
        label: "Payment Terms",
        description_en: "Payment terms and invoicing. Fees, charges and payment schedule. \
            Invoices are due within a set number of days, late payments accrue interest, taxes \
            are the responsibility of the paying party, and disputed amounts follow a notice \
            procedure.",
        description_fr: "Conditions de paiement et facturation. Honoraires, frais et \
            echeancier de paiement. Les factures sont payables sous un delai determine, les \
            retards de paiement portent interet et les taxes sont a la charge de la partie \
            payante.",
        risk_weight: 0.6,
        category: ClauseCategory::Commercial,
    },
    ClauseDescriptor {
        kind: ClauseType::IpOwnership,
        label: "IP Ownership",
        description_en: "Intellectual property ownership and license. Pre-existing intellectual \
            property remains with the originating party. Ownership of work product, \
            deliverables and derivative works, assignment of rights, and license grants \
            including scope, exclusivity and territory.",
        description_fr: "Propriete intellectuelle et licence. La propriete intellectuelle \
            preexistante reste acquise a la partie d'origine. Propriete des livrables et des \
            oeuvres derivees, cession des droits et concession de licences, y compris portee, \
            exclusivite et territoire.",
        risk_weight: 0.8,
        category: ClauseCategory::IntellectualProperty,
    },
    ClauseDescriptor {
        kind: ClauseType::Warranty,
        label: "Warranty",
        description_en: "Warranties and disclaimers. The services will be performed in a \
            professional and workmanlike manner and will materially conform to the \
            documentation. Except as expressly stated, all other warranties including \
            merchantability and fitness for a particular purpose are disclaimed.",
        description_fr: "Garanties et exclusions de garantie. Les services seront executes de \
            maniere professionnelle et conforme aux regles de l'art et correspondront pour \
            l'essentiel a la documentation. Toute autre garantie, y compris de qualite \
            marchande ou d'adequation a un usage particulier, est exclue.",
        risk_weight: 0.65,
        category: ClauseCategory::Assurance,
    },
    ClauseDescriptor {
        kind: ClauseType::DataProtection,
        label: "Data Protection",
        description_en: "Data protection and privacy. Processing of personal data in \
            accordance with applicable data protection laws, security measures, breach \
            notification within a set period, sub-processor obligations, and international \
            data transfer safeguards.",
        description_fr: "Protection des donnees et vie privee. Traitement des donnees \
            personnelles conformement aux lois applicables sur la protection des donnees, \
            mesures de securite, notification des violations dans un delai determine et \
            garanties de transfert international.",
        risk_weight: 0.75,
        category: ClauseCategory::Compliance,
    },
    ClauseDescriptor {
        kind: ClauseType::ForceMajeure,
        label: "Force Majeure",
        description_en: "Force majeure. Neither party is liable for delay or failure to \
            perform caused by events beyond its reasonable control, including acts of God, \
            war, terrorism, epidemics, labor disputes and failures of utilities, provided the \
            affected party gives notice and resumes performance promptly.",
        description_fr: "Force majeure. Aucune partie n'est responsable d'un retard ou d'un \
            defaut d'execution cause par des evenements hors de son controle raisonnable, \
            notamment catastrophes naturelles, guerre, epidemies et conflits sociaux, sous \
            reserve de notification et de reprise rapide de l'execution.",
        risk_weight: 0.45,
        category: ClauseCategory::ForceMajeure,
    },
    ClauseDescriptor {
        kind: ClauseType::NonCompete,
        label: "Non-Compete",
        description_en: "Non-competition and non-solicitation. During the term and for a \
            restricted period thereafter, a party shall not compete with the business, solicit \
            customers or employees, or engage in competing activities within a defined \
            territory.",
        description_fr: "Non-concurrence et non-sollicitation. Pendant la duree du contrat et \
            pour une periode restreinte ensuite, une partie s'interdit de concurrencer \
            l'activite, de solliciter les clients ou les salaries, ou d'exercer des activites \
            concurrentes sur un territoire defini.",
        risk_weight: 0.6,
        category: ClauseCategory::Restrictive,
    },
    ClauseDescriptor {
        kind: ClauseType::Assignment,
        label: "Assignment",
        description_en: "Assignment and transfer. Neither party may assign or transfer the \
            agreement or its rights and obligations without the prior written consent of the \
            other party, except to an affiliate or in connection with a merger or sale of \
            substantially all assets.",
        description_fr: "Cession et transfert. Aucune partie ne peut ceder ou transferer le \
            contrat ni ses droits et obligations sans le consentement prealable ecrit de \
            l'autre partie, sauf a une societe affiliee ou dans le cadre d'une fusion ou \
            cession d'actifs.",
        risk_weight: 0.4,
        category: ClauseCategory::Transfer,
    },
    ClauseDescriptor {
        kind: ClauseType::Insurance,
        label: "Insurance",
        description_en: "Insurance requirements. A party shall maintain commercial general \
            liability, professional liability and cyber insurance coverage with specified \
            minimum limits from reputable insurers, and shall provide certificates of \
            insurance upon request.",
        description_fr: "Exigences d'assurance. Une partie souscrit et maintient des \
            assurances de responsabilite civile generale, de responsabilite professionnelle et \
            de cyber-risques avec des plafonds minimaux specifies et fournit des attestations \
            d'assurance sur demande.",
        risk_weight: 0.35,
        category: ClauseCategory::Coverage,
    },
    ClauseDescriptor {
        kind: ClauseType::AuditRights,
        label: "Audit Rights",
        description_en: "Audit and inspection rights. Upon reasonable notice, a party may \
            audit the books, records and systems of the other party to verify compliance with \
            the agreement, no more than once per year, during business hours and at its own \
            expense.",
        description_fr: "Droits d'audit et d'inspection. Moyennant un preavis raisonnable, une \
            partie peut auditer les livres, registres et systemes de l'autre partie afin de \
            verifier le respect du contrat, au plus une fois par an, pendant les heures \
            ouvrables et a ses frais.",
        risk_weight: 0.3,
        category: ClauseCategory::Oversight,
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn taxonomy_covers_all_kinds() {
        assert_eq!(ClauseType::ALL.len(), 15);
        assert_eq!(DESCRIPTORS.len(), 15);
        for kind in ClauseType::ALL {
            assert!(kind.descriptor().is_some(), "{kind} has no descriptor");
        }
        assert!(ClauseType::Unknown.descriptor().is_none());
    }

    #[test]
    fn risk_weights_in_range() {
        for d in &DESCRIPTORS {
            assert!((0.0..=1.0).contains(&d.risk_weight), "{}", d.kind);
        }
    }

    #[test]
    fn categories_are_fourteen_distinct_keys() {
        let keys: HashSet<&str> = ClauseCategory::ALL.iter().map(|c| c.as_str()).collect();
        assert_eq!(keys.len(), 14);
        let used: HashSet<ClauseCategory> = DESCRIPTORS.iter().map(|d| d.category).collect();
        assert_eq!(used.len(), 14, "every category key is used");
    }

    #[test]
    fn parse_round_trips() {
        for kind in ClauseType::ALL {
            assert_eq!(ClauseType::parse(kind.as_str()), kind);
        }
        assert_eq!(ClauseType::parse("not_a_clause"), ClauseType::Unknown);
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&ClauseType::LimitationOfLiability).unwrap();
        assert_eq!(json, "\"limitation_of_liability\"");
        let back: ClauseType = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ClauseType::LimitationOfLiability);
    }

    #[test]
    fn one_hot_indexes_are_stable_and_unique() {
        let idx: HashSet<usize> = ClauseCategory::ALL.iter().map(|c| c.one_hot_index()).collect();
        assert_eq!(idx.len(), 14);
        assert_eq!(ClauseCategory::RiskAllocation.one_hot_index(), 0);
    }

    #[test]
    fn descriptions_carry_both_languages() {
        for d in &DESCRIPTORS {
            assert!(d.description_en.len() > 80, "{} EN too thin", d.kind);
            assert!(d.description_fr.len() > 80, "{} FR too thin", d.kind);
        }
    }
}
