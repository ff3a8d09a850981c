//! # lexgraph-power
//!
//! Quantifies party-level power asymmetry.
//!
//! The analyzer extracts up to two party names from the contract opening,
//! then walks each clause counting obligation markers, protection markers
//! and one-sided triggers (EN + FR lists). Obligations accrue to the
//! clause's subject, the party named closest before the first obligation
//! marker; protections accrue to the other party. Per-party burden scores and
//! the 0–100 power score fall out of the counts.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use lexgraph_core::{AsymmetricClause, ClassifiedClause, PartyBurden, PowerAnalysis};

static OBLIGATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(shall|must|will|agrees to|undertakes|is required to|is obligated to|doit|doivent|s'engage|est tenu de)\b",
    )
    .expect("static obligation pattern")
});

static PROTECTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(not be liable|no liability|hold harmless|indemnif\w*|disclaim\w*|shall not exceed|limited to|exempt\w*|waive[sd]?\b|ne sera pas responsable|degage de toute responsabilite|garanti\w*)",
    )
    .expect("static protection pattern")
});

static ONE_SIDED_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(sole discretion|absolute discretion|solely responsible|unilateral\w*|without limitation|without any liability|at any time without|exclusive right|no obligation to|a sa seule discretion|discretion exclusive)",
    )
    .expect("static one-sided pattern")
});

/// Quoted defined term near the opening, e.g. `("Provider")`.
static QUOTED_PARTY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"["\u{201C}]([A-Z][A-Za-z0-9 .&'-]{1,40}?)["\u{201D}]"#)
        .expect("static quoted party pattern")
});

/// Standard role words scanned when no quoted names are found.
const ROLE_WORDS: &[&str] = &[
    "Provider", "Supplier", "Vendor", "Contractor", "Consultant", "Licensor", "Licensee",
    "Customer", "Client", "Buyer", "Seller", "Company", "Partner", "Distributor",
];

/// Quoted terms that name the document, not a party.
const NON_PARTY_TERMS: &[&str] = &[
    "Agreement", "Contract", "Effective Date", "Services", "Term", "Confidential Information",
];

/// Analyze party power asymmetry across the classified clauses.
pub fn analyze(classified: &[ClassifiedClause], full_text: &str) -> PowerAnalysis {
    let parties = extract_parties(full_text);
    debug!(?parties, "parties extracted");

    let mut obligations = [0.0f64; 2];
    let mut protections = [0.0f64; 2];
    let mut one_sided = [0usize; 2];
    let mut total_obligations = 0usize;
    let mut total_protections = 0usize;
    let mut asymmetric = Vec::new();

    for clause in classified {
        let obl = OBLIGATION_RE.find_iter(&clause.text).count();
        let prot = PROTECTION_RE.find_iter(&clause.text).count();
        let triggers: Vec<String> = ONE_SIDED_RE
            .find_iter(&clause.text)
            .map(|m| m.as_str().to_lowercase())
            .collect();

        total_obligations += obl;
        total_protections += prot;

        match attribute_subject(&clause.text, &parties) {
            Some(subject) => {
                let other = 1 - subject;
                obligations[subject] += obl as f64;
                protections[other] += prot as f64;
                if !triggers.is_empty() {
                    one_sided[subject] += triggers.len();
                    asymmetric.push(AsymmetricClause {
                        clause_id: clause.id.clone(),
                        clause_type: clause.clause_type,
                        favors: parties[other].clone(),
                        triggers,
                    });
                }
            }
            None => {
                // Both or neither party named with no readable subject:
                // split the counts evenly.
                obligations[0] += obl as f64 / 2.0;
                obligations[1] += obl as f64 / 2.0;
                protections[0] += prot as f64 / 2.0;
                protections[1] += prot as f64 / 2.0;
                if !triggers.is_empty() {
                    asymmetric.push(AsymmetricClause {
                        clause_id: clause.id.clone(),
                        clause_type: clause.clause_type,
                        favors: "unclear".to_string(),
                        triggers,
                    });
                }
            }
        }
    }

    let burdens: Vec<PartyBurden> = (0..2)
        .map(|i| PartyBurden {
            party: parties[i].clone(),
            burden_score: burden_score(obligations[i], protections[i], one_sided[i]),
            obligations: obligations[i],
            protections: protections[i],
            one_sided: one_sided[i],
        })
        .collect();

    let power_score = ((burdens[0].burden_score - burdens[1].burden_score).abs()
        + 5.0 * asymmetric.len() as f64)
        .min(100.0);

    // Dominant party carries the lower burden; ties resolve by order.
    let (dominant, burdened) = if burdens[0].burden_score <= burdens[1].burden_score {
        (0, 1)
    } else {
        (1, 0)
    };

    PowerAnalysis {
        dominant_party: parties[dominant].clone(),
        burdened_party: parties[burdened].clone(),
        parties: parties.to_vec(),
        power_score,
        asymmetric_clauses: asymmetric,
        total_obligations,
        total_protections,
        burdens,
    }
}

/// `clip(0, 100, 70*obl/(obl+prot+1) + min(30, 10*one_sided))`.
fn burden_score(obligations: f64, protections: f64, one_sided: usize) -> f64 {
    let ratio = 70.0 * obligations / (obligations + protections + 1.0);
    let lopsided = (10.0 * one_sided as f64).min(30.0);
    (ratio + lopsided).clamp(0.0, 100.0)
}

/// Extract up to two party names: quoted defined terms near the opening,
/// then standard role words, then placeholder names.
fn extract_parties(full_text: &str) -> [String; 2] {
    // Quoted defined terms are only trusted near the opening.
    let mut cut = full_text.len().min(1500);
    while cut > 0 && !full_text.is_char_boundary(cut) {
        cut -= 1;
    }
    let opening = &full_text[..cut];

    let mut found: Vec<String> = Vec::new();
    for cap in QUOTED_PARTY_RE.captures_iter(opening) {
        if let Some(m) = cap.get(1) {
            let name = m.as_str().trim().to_string();
            if !NON_PARTY_TERMS.contains(&name.as_str()) && !found.contains(&name) {
                found.push(name);
            }
        }
        if found.len() == 2 {
            return [found[0].clone(), found[1].clone()];
        }
    }

    // Role-word fallback, ordered by first occurrence in the text.
    let mut roles: Vec<(usize, &str)> = ROLE_WORDS
        .iter()
        .filter_map(|role| full_text.find(role).map(|pos| (pos, *role)))
        .collect();
    roles.sort_by_key(|(pos, _)| *pos);
    for (_, role) in roles {
        if !found.iter().any(|f| f == role) {
            found.push(role.to_string());
        }
        if found.len() == 2 {
            return [found[0].clone(), found[1].clone()];
        }
    }

    match found.len() {
        0 => ["Party A".to_string(), "Party B".to_string()],
        1 => {
            let counterpart = if found[0] == "Party A" { "Party B" } else { "Party A" };
            [found[0].clone(), counterpart.to_string()]
        }
        _ => [found[0].clone(), found[1].clone()],
    }
}

/// Index of the party the clause's obligations accrue to.
///
/// Preference order: the party named closest before the first obligation
/// marker (the grammatical subject), then the only party named in the
/// clause. `None` means no attribution is possible and counts split
/// evenly.
fn attribute_subject(text: &str, parties: &[String; 2]) -> Option<usize> {
    let positions: Vec<Option<usize>> = parties.iter().map(|p| text.find(p.as_str())).collect();

    if let Some(marker) = OBLIGATION_RE.find(text) {
        let mut best: Option<(usize, usize)> = None; // (party, position)
        for (i, pos) in positions.iter().enumerate() {
            if let Some(p) = pos {
                if *p < marker.start() && best.map_or(true, |(_, bp)| *p > bp) {
                    best = Some((i, *p));
                }
            }
        }
        if let Some((party, _)) = best {
            return Some(party);
        }
    }

    match (positions[0], positions[1]) {
        (Some(_), None) => Some(0),
        (None, Some(_)) => Some(1),
        _ => None,
    }
}
