//! Curated clause template bank.
//!
//! Four templates per covered clause kind, one per negotiation level.
//! Risk scores are editorial judgments of how much exposure each wording
//! leaves with the receiving party; lower is safer. The bank is
//! compile-time data and a minor-version concern.

use lexgraph_core::{ClauseType, TemplateLevel};

/// One template entry.
#[derive(Debug, Clone, Copy)]
pub struct ClauseTemplate {
    pub clause_type: ClauseType,
    pub level: TemplateLevel,
    pub text: &'static str,
    pub risk_score: f64,
    pub jurisdiction: &'static str,
}

pub fn template_bank() -> &'static [ClauseTemplate] {
    &BANK
}

static BANK: [ClauseTemplate; 44] = [
    // Indemnification
    ClauseTemplate {
        clause_type: ClauseType::Indemnification,
        level: TemplateLevel::Aggressive,
        text: "Customer shall indemnify, defend and hold harmless Provider from any and all \
            claims, losses and expenses of whatever nature arising from or related to \
            Customer's use of the services, without limitation.",
        risk_score: 88.0,
        jurisdiction: "US",
    },
    ClauseTemplate {
        clause_type: ClauseType::Indemnification,
        level: TemplateLevel::MarketStandard,
        text: "Each party shall indemnify the other against third-party claims arising from \
            its breach of this Agreement or its negligence, subject to prompt notice and \
            sole control of the defense.",
        risk_score: 55.0,
        jurisdiction: "US",
    },
    ClauseTemplate {
        clause_type: ClauseType::Indemnification,
        level: TemplateLevel::Balanced,
        text: "Each party shall indemnify the other against third-party claims arising from \
            its material breach, gross negligence or willful misconduct, capped as provided \
            in the limitation of liability clause.",
        risk_score: 42.0,
        jurisdiction: "US",
    },
    ClauseTemplate {
        clause_type: ClauseType::Indemnification,
        level: TemplateLevel::Protective,
        text: "Provider shall indemnify Customer against third-party claims alleging that the \
            services infringe intellectual property rights. Customer's indemnification \
            obligations are limited to claims arising from Customer data or willful \
            misconduct, and both indemnities are subject to the liability cap.",
        risk_score: 28.0,
        jurisdiction: "US",
    },
    // Limitation of liability
    ClauseTemplate {
        clause_type: ClauseType::LimitationOfLiability,
        level: TemplateLevel::Aggressive,
        text: "In no event shall Provider be liable for any damages whatsoever, whether \
            direct, indirect or consequential, and Customer's exclusive remedy is \
            re-performance of the services.",
        risk_score: 85.0,
        jurisdiction: "US",
    },
    ClauseTemplate {
        clause_type: ClauseType::LimitationOfLiability,
        level: TemplateLevel::MarketStandard,
        text: "Neither party shall be liable for indirect, incidental or consequential \
            damages. Each party's aggregate liability shall not exceed the fees paid or \
            payable in the twelve months preceding the claim.",
        risk_score: 52.0,
        jurisdiction: "US",
    },
    ClauseTemplate {
        clause_type: ClauseType::LimitationOfLiability,
        level: TemplateLevel::Balanced,
        text: "Neither party shall be liable for indirect or consequential damages. Aggregate \
            liability shall not exceed the fees paid in the twelve months preceding the \
            claim, except for breach of confidentiality or indemnification obligations.",
        risk_score: 40.0,
        jurisdiction: "US",
    },
    ClauseTemplate {
        clause_type: ClauseType::LimitationOfLiability,
        level: TemplateLevel::Protective,
        text: "Liability shall not exceed the fees paid in the twelve months preceding the \
            claim, except for (i) indemnification obligations, (ii) gross negligence or \
            willful misconduct, and (iii) breach of confidentiality, which are uncapped.",
        risk_score: 30.0,
        jurisdiction: "US",
    },
    // Termination
    ClauseTemplate {
        clause_type: ClauseType::Termination,
        level: TemplateLevel::Aggressive,
        text: "Provider may terminate this Agreement immediately upon notice for any reason. \
            Customer may terminate only for Provider's uncured material breach upon ninety \
            days written notice.",
        risk_score: 80.0,
        jurisdiction: "US",
    },
    ClauseTemplate {
        clause_type: ClauseType::Termination,
        level: TemplateLevel::MarketStandard,
        text: "Either party may terminate for convenience upon thirty days written notice, \
            and for cause if the other party materially breaches and fails to cure within \
            thirty days of notice.",
        risk_score: 45.0,
        jurisdiction: "US",
    },
    ClauseTemplate {
        clause_type: ClauseType::Termination,
        level: TemplateLevel::Balanced,
        text: "Either party may terminate for convenience upon sixty days written notice or \
            for uncured material breach. Upon termination, prepaid fees for undelivered \
            services are refunded pro rata and transition assistance is provided.",
        risk_score: 38.0,
        jurisdiction: "US",
    },
    ClauseTemplate {
        clause_type: ClauseType::Termination,
        level: TemplateLevel::Protective,
        text: "Customer may terminate for convenience upon thirty days notice with a pro-rata \
            refund of prepaid fees. Either party may terminate immediately for insolvency or \
            uncured material breach, with ninety days of transition assistance at the \
            then-current rates.",
        risk_score: 30.0,
        jurisdiction: "US",
    },
    // Confidentiality
    ClauseTemplate {
        clause_type: ClauseType::Confidentiality,
        level: TemplateLevel::Aggressive,
        text: "Recipient shall keep all information of Discloser, however obtained, strictly \
            confidential in perpetuity and shall be liable for any disclosure by any person \
            to whom it provides access.",
        risk_score: 70.0,
        jurisdiction: "US",
    },
    ClauseTemplate {
        clause_type: ClauseType::Confidentiality,
        level: TemplateLevel::MarketStandard,
        text: "Each party shall protect the other's confidential information with the same \
            care it uses for its own, and at least reasonable care, disclosing it only to \
            persons with a need to know who are bound by comparable obligations.",
        risk_score: 40.0,
        jurisdiction: "US",
    },
    ClauseTemplate {
        clause_type: ClauseType::Confidentiality,
        level: TemplateLevel::Balanced,
        text: "Confidentiality obligations run for five years from disclosure and do not \
            apply to information that is public, independently developed, or rightfully \
            received from a third party. Compelled disclosures require prompt notice.",
        risk_score: 32.0,
        jurisdiction: "US",
    },
    ClauseTemplate {
        clause_type: ClauseType::Confidentiality,
        level: TemplateLevel::Protective,
        text: "Confidentiality obligations run for three years from disclosure, with standard \
            exclusions, compelled-disclosure notice, and return or certified destruction of \
            materials on request. Trade secrets remain protected for as long as they qualify.",
        risk_score: 25.0,
        jurisdiction: "US",
    },
    // Governing law
    ClauseTemplate {
        clause_type: ClauseType::GoverningLaw,
        level: TemplateLevel::Aggressive,
        text: "This Agreement is governed by the laws of Provider's place of incorporation, \
            and Customer submits to the exclusive jurisdiction of the courts there, waiving \
            any objection to venue.",
        risk_score: 60.0,
        jurisdiction: "US",
    },
    ClauseTemplate {
        clause_type: ClauseType::GoverningLaw,
        level: TemplateLevel::MarketStandard,
        text: "This Agreement shall be governed by the laws of the State of Delaware, without \
            regard to its conflict of laws principles, and the parties submit to the \
            exclusive jurisdiction of the state and federal courts located there.",
        risk_score: 35.0,
        jurisdiction: "US",
    },
    ClauseTemplate {
        clause_type: ClauseType::GoverningLaw,
        level: TemplateLevel::Balanced,
        text: "This Agreement shall be governed by the laws of the State of New York. The \
            parties submit to the non-exclusive jurisdiction of the courts sitting in New \
            York County.",
        risk_score: 30.0,
        jurisdiction: "US",
    },
    ClauseTemplate {
        clause_type: ClauseType::GoverningLaw,
        level: TemplateLevel::Protective,
        text: "This Agreement shall be governed by the laws of the jurisdiction of the \
            defendant's principal place of business, so that neither party gains a home \
            forum advantage when bringing a claim.",
        risk_score: 25.0,
        jurisdiction: "US",
    },
    // Dispute resolution
    ClauseTemplate {
        clause_type: ClauseType::DisputeResolution,
        level: TemplateLevel::Aggressive,
        text: "All disputes shall be finally resolved by binding arbitration before a single \
            arbitrator selected by Provider, with each party bearing its own costs and \
            Customer waiving any right to class proceedings.",
        risk_score: 75.0,
        jurisdiction: "US",
    },
    ClauseTemplate {
        clause_type: ClauseType::DisputeResolution,
        level: TemplateLevel::MarketStandard,
        text: "Disputes shall first be escalated to senior executives for good-faith \
            negotiation for thirty days, then to binding arbitration under the AAA \
            Commercial Rules by one arbitrator seated in the governing-law forum.",
        risk_score: 45.0,
        jurisdiction: "US",
    },
    ClauseTemplate {
        clause_type: ClauseType::DisputeResolution,
        level: TemplateLevel::Balanced,
        text: "Disputes escalate through negotiation and non-binding mediation before either \
            party may commence proceedings. Either party may seek injunctive relief at any \
            time for breaches of confidentiality or intellectual property obligations.",
        risk_score: 38.0,
        jurisdiction: "US",
    },
    ClauseTemplate {
        clause_type: ClauseType::DisputeResolution,
        level: TemplateLevel::Protective,
        text: "Disputes escalate through executive negotiation and mediation; unresolved \
            disputes go to arbitration by three arbitrators with reasoned awards, discovery \
            proportionate to the amount in dispute, and fees awarded to the prevailing party.",
        risk_score: 30.0,
        jurisdiction: "US",
    },
    // Payment terms
    ClauseTemplate {
        clause_type: ClauseType::PaymentTerms,
        level: TemplateLevel::Aggressive,
        text: "All fees are due upon receipt of invoice and are non-refundable. Provider may \
            suspend the services immediately and without notice for any overdue amount, and \
            Customer shall pay interest at the maximum lawful rate.",
        risk_score: 78.0,
        jurisdiction: "US",
    },
    ClauseTemplate {
        clause_type: ClauseType::PaymentTerms,
        level: TemplateLevel::MarketStandard,
        text: "Undisputed invoices are payable within thirty days of receipt. Late amounts \
            accrue interest at one percent per month. Taxes are the responsibility of \
            Customer, excluding taxes on Provider's income.",
        risk_score: 48.0,
        jurisdiction: "US",
    },
    ClauseTemplate {
        clause_type: ClauseType::PaymentTerms,
        level: TemplateLevel::Balanced,
        text: "Undisputed invoices are payable within forty-five days. Customer may withhold \
            amounts disputed in good faith upon written notice, and the parties shall \
            resolve disputed amounts within thirty days while services continue.",
        risk_score: 38.0,
        jurisdiction: "US",
    },
    ClauseTemplate {
        clause_type: ClauseType::PaymentTerms,
        level: TemplateLevel::Protective,
        text: "Invoices are payable within sixty days. Suspension of services requires thirty \
            days notice of non-payment and applies only to undisputed amounts. Interest on \
            late payment is capped at six percent per annum.",
        risk_score: 28.0,
        jurisdiction: "US",
    },
    // IP ownership
    ClauseTemplate {
        clause_type: ClauseType::IpOwnership,
        level: TemplateLevel::Aggressive,
        text: "All work product, improvements and derivative works, including pre-existing \
            materials incorporated therein, shall be owned exclusively by Provider, and \
            Customer assigns all right, title and interest thereto.",
        risk_score: 82.0,
        jurisdiction: "US",
    },
    ClauseTemplate {
        clause_type: ClauseType::IpOwnership,
        level: TemplateLevel::MarketStandard,
        text: "Each party retains its pre-existing intellectual property. Deliverables are \
            owned by Customer upon payment, with Provider retaining a license to its general \
            knowledge, tools and methodologies.",
        risk_score: 45.0,
        jurisdiction: "US",
    },
    ClauseTemplate {
        clause_type: ClauseType::IpOwnership,
        level: TemplateLevel::Balanced,
        text: "Pre-existing intellectual property remains with the originating party. \
            Customer owns deliverables created specifically for it; Provider grants a \
            perpetual license to any embedded Provider materials necessary to use them.",
        risk_score: 38.0,
        jurisdiction: "US",
    },
    ClauseTemplate {
        clause_type: ClauseType::IpOwnership,
        level: TemplateLevel::Protective,
        text: "Customer owns all deliverables and work product upon creation, including \
            assignable moral rights. Provider's pre-existing materials may be embedded only \
            with notice and are licensed perpetually, irrevocably and royalty-free.",
        risk_score: 30.0,
        jurisdiction: "US",
    },
    // Warranty
    ClauseTemplate {
        clause_type: ClauseType::Warranty,
        level: TemplateLevel::Aggressive,
        text: "The services are provided as is and as available. Provider disclaims all \
            warranties, express or implied, including merchantability, fitness for a \
            particular purpose and non-infringement.",
        risk_score: 75.0,
        jurisdiction: "US",
    },
    ClauseTemplate {
        clause_type: ClauseType::Warranty,
        level: TemplateLevel::MarketStandard,
        text: "Provider warrants that the services will be performed in a professional and \
            workmanlike manner consistent with industry standards. Customer's exclusive \
            remedy for breach is re-performance of the deficient services.",
        risk_score: 48.0,
        jurisdiction: "US",
    },
    ClauseTemplate {
        clause_type: ClauseType::Warranty,
        level: TemplateLevel::Balanced,
        text: "Provider warrants professional performance and material conformance to the \
            documentation for ninety days. Remedies are re-performance or, if \
            re-performance fails, a refund of the fees for the affected services.",
        risk_score: 38.0,
        jurisdiction: "US",
    },
    ClauseTemplate {
        clause_type: ClauseType::Warranty,
        level: TemplateLevel::Protective,
        text: "Provider warrants professional performance, conformance to documentation, \
            non-infringement and absence of malicious code. Warranty remedies are in \
            addition to, not in lieu of, other remedies available under this Agreement.",
        risk_score: 28.0,
        jurisdiction: "US",
    },
    // Data protection
    ClauseTemplate {
        clause_type: ClauseType::DataProtection,
        level: TemplateLevel::Aggressive,
        text: "Customer is solely responsible for the lawfulness of all data provided to \
            Provider. Provider processes data as it sees fit to deliver and improve the \
            services and disclaims liability for any data incident.",
        risk_score: 85.0,
        jurisdiction: "EU",
    },
    ClauseTemplate {
        clause_type: ClauseType::DataProtection,
        level: TemplateLevel::MarketStandard,
        text: "Provider processes personal data only on documented instructions, applies \
            appropriate technical and organizational measures, and notifies Customer of \
            personal data breaches without undue delay.",
        risk_score: 45.0,
        jurisdiction: "EU",
    },
    ClauseTemplate {
        clause_type: ClauseType::DataProtection,
        level: TemplateLevel::Balanced,
        text: "Provider processes personal data per documented instructions with appropriate \
            safeguards, notifies breaches within seventy-two hours, flows obligations down \
            to sub-processors, and supports data subject requests and audits.",
        risk_score: 35.0,
        jurisdiction: "EU",
    },
    ClauseTemplate {
        clause_type: ClauseType::DataProtection,
        level: TemplateLevel::Protective,
        text: "Provider acts solely as processor under a data processing agreement with \
            breach notification within forty-eight hours, annual independent audits, prior \
            written approval of sub-processors, and deletion certification on exit.",
        risk_score: 25.0,
        jurisdiction: "EU",
    },
    // Non-compete
    ClauseTemplate {
        clause_type: ClauseType::NonCompete,
        level: TemplateLevel::Aggressive,
        text: "Customer shall not, during the term and for five years thereafter, engage \
            anywhere in the world in any business competitive with Provider, nor solicit \
            any employee, contractor or customer of Provider.",
        risk_score: 80.0,
        jurisdiction: "US",
    },
    ClauseTemplate {
        clause_type: ClauseType::NonCompete,
        level: TemplateLevel::MarketStandard,
        text: "During the term and for twelve months thereafter, neither party shall solicit \
            for employment the other party's personnel directly involved in the services, \
            general advertisements excepted.",
        risk_score: 45.0,
        jurisdiction: "US",
    },
    ClauseTemplate {
        clause_type: ClauseType::NonCompete,
        level: TemplateLevel::Balanced,
        text: "Non-solicitation of involved personnel runs for twelve months after the term \
            and is each party's sole restraint; nothing limits either party from competing, \
            hiring through general advertisements, or serving any customer.",
        risk_score: 35.0,
        jurisdiction: "US",
    },
    ClauseTemplate {
        clause_type: ClauseType::NonCompete,
        level: TemplateLevel::Protective,
        text: "No restraint survives termination except six months of non-solicitation of \
            personnel directly involved in the services, limited to the counties where the \
            services were performed and subject to a liquidated buy-out.",
        risk_score: 25.0,
        jurisdiction: "US",
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn four_levels_per_covered_kind() {
        let mut by_kind: BTreeMap<ClauseType, Vec<TemplateLevel>> = BTreeMap::new();
        for t in template_bank() {
            by_kind.entry(t.clause_type).or_default().push(t.level);
        }
        assert_eq!(by_kind.len(), 10);
        for (kind, levels) in by_kind {
            assert_eq!(levels.len(), 4, "{kind} should carry 4 templates");
        }
    }

    #[test]
    fn protective_is_always_safest() {
        let mut by_kind: BTreeMap<ClauseType, Vec<(TemplateLevel, f64)>> = BTreeMap::new();
        for t in template_bank() {
            by_kind.entry(t.clause_type).or_default().push((t.level, t.risk_score));
        }
        for (kind, entries) in by_kind {
            let protective = entries
                .iter()
                .find(|(l, _)| *l == TemplateLevel::Protective)
                .map(|(_, r)| *r)
                .unwrap();
            for (level, risk) in entries {
                if level != TemplateLevel::Protective {
                    assert!(risk > protective, "{kind}: {level:?} not above protective");
                }
            }
        }
    }

    #[test]
    fn risk_scores_in_range() {
        for t in template_bank() {
            assert!((0.0..=100.0).contains(&t.risk_score));
            assert!(t.text.len() > 80);
        }
    }
}
