//! # lexgraph-debate
//!
//! Structured adversarial review of a contract report. A prosecution
//! pass argues the worst case for each risky clause, a defense pass
//! argues why the clause is standard, and a judge weighs both sides per
//! topic. The transcript is the point: a reader can follow, agree with,
//! or contest every step, and the net risk adjustment feeds meta-fusion.

mod knowledge;

use std::collections::BTreeMap;

use tracing::debug;

use lexgraph_core::{
    ArgumentSeverity, ClauseType, DebateArgument, DebatePosition, DebateTranscript,
    DebateVerdict, Report, Ruling, RulingOutcome,
};

pub use knowledge::{entry_for, knowledge_base, DebateEntry};

/// Tunables for the debate protocol. The severity weights and the ruling
/// asymmetry threshold were set empirically; both are exposed rather than
/// hard-coded.
#[derive(Debug, Clone)]
pub struct DebateConfig {
    pub critical_weight: f64,
    pub high_weight: f64,
    pub medium_weight: f64,
    pub low_weight: f64,
    /// One side must out-argue the other by this factor to win outright.
    pub ruling_threshold: f64,
    /// Keyword overlap with a listed risk that triggers prosecution.
    pub overlap_threshold: f64,
}

impl Default for DebateConfig {
    fn default() -> Self {
        DebateConfig {
            critical_weight: 1.0,
            high_weight: 0.8,
            medium_weight: 0.6,
            low_weight: 0.4,
            ruling_threshold: 1.2,
            overlap_threshold: 0.3,
        }
    }
}

impl DebateConfig {
    fn weight(&self, severity: ArgumentSeverity) -> f64 {
        match severity {
            ArgumentSeverity::Critical => self.critical_weight,
            ArgumentSeverity::High => self.high_weight,
            ArgumentSeverity::Medium => self.medium_weight,
            ArgumentSeverity::Low => self.low_weight,
        }
    }
}

/// Run the full debate protocol over a report.
pub fn debate(report: &Report, config: &DebateConfig) -> DebateTranscript {
    let prosecution = prosecute(report, config);
    let defense = defend(report, &prosecution);
    let (rulings, risk_adjustment) = judge(&prosecution, &defense, config);

    let sustained = rulings
        .iter()
        .filter(|r| r.outcome == RulingOutcome::Sustained)
        .count();
    let overruled = rulings.len() - sustained;
    let verdict = if sustained > 2 * overruled {
        DebateVerdict::HighRisk
    } else if sustained > overruled {
        DebateVerdict::ModerateRisk
    } else {
        DebateVerdict::Acceptable
    };

    debug!(
        prosecution = prosecution.len(),
        defense = defense.len(),
        sustained,
        overruled,
        "debate concluded"
    );

    DebateTranscript { prosecution, defense, rulings, verdict, risk_adjustment }
}

/// Prosecution pass: one argument per risky clause kind, plus structural
/// and power arguments where the upstream analyses support them.
fn prosecute(report: &Report, config: &DebateConfig) -> Vec<DebateArgument> {
    let mut arguments = Vec::new();

    for kind in report.present_types() {
        let Some(entry) = entry_for(kind) else { continue };
        let risk_weight = kind.risk_weight();
        let text = report.text_of_type(kind);
        let overlap = entry
            .risks
            .iter()
            .map(|risk| keyword_overlap(&text, risk))
            .fold(0.0f64, f64::max);

        if risk_weight > 0.6 || overlap >= config.overlap_threshold {
            let mut evidence: Vec<String> =
                entry.risks.iter().take(3).map(|s| s.to_string()).collect();
            evidence.extend(entry.precedents.iter().take(2).map(|s| s.to_string()));

            arguments.push(DebateArgument {
                topic: kind.as_str().to_string(),
                position: DebatePosition::Prosecution,
                severity: ArgumentSeverity::from_risk_weight(risk_weight),
                confidence: (risk_weight + 0.1).min(1.0),
                claim: format!(
                    "The {} clause exposes the burdened party to {}.",
                    kind.display_name(),
                    entry.risks.first().copied().unwrap_or("unquantified risk"),
                ),
                evidence,
            });
        }
    }

    let conflicts = report.graph_analysis.conflict_count;
    if conflicts > 0 {
        arguments.push(DebateArgument {
            topic: "structure".to_string(),
            position: DebatePosition::Prosecution,
            severity: if conflicts >= 2 { ArgumentSeverity::High } else { ArgumentSeverity::Medium },
            confidence: (0.5 + 0.15 * conflicts as f64).min(0.95),
            claim: format!(
                "The contract contains {conflicts} unresolved inter-clause conflict(s); \
                 contradictory obligations are litigation fuel."
            ),
            evidence: report
                .graph_analysis
                .conflicts
                .iter()
                .take(3)
                .map(|c| c.description.clone())
                .collect(),
        });
    }

    let power = report.power_analysis.power_score;
    if (power - 50.0).abs() > 20.0 {
        let (severity, claim) = if power > 50.0 {
            (
                ArgumentSeverity::High,
                format!(
                    "A power score of {power:.0}/100 shows {} bearing a disproportionate \
                     share of the obligations.",
                    report.power_analysis.burdened_party,
                ),
            )
        } else {
            (
                ArgumentSeverity::Low,
                "The obligation profile is thin; key duties may simply be unstated rather \
                 than balanced."
                    .to_string(),
            )
        };
        arguments.push(DebateArgument {
            topic: "power".to_string(),
            position: DebatePosition::Prosecution,
            severity,
            confidence: 0.6,
            claim,
            evidence: report
                .power_analysis
                .asymmetric_clauses
                .iter()
                .take(3)
                .map(|a| format!("{} favors {}", a.clause_type.display_name(), a.favors))
                .collect(),
        });
    }

    arguments
}

/// Defense pass: rebut every prosecuted topic that has defense material.
fn defend(report: &Report, prosecution: &[DebateArgument]) -> Vec<DebateArgument> {
    let mut arguments = Vec::new();

    for pro in prosecution {
        match pro.topic.as_str() {
            "structure" => arguments.push(DebateArgument {
                topic: pro.topic.clone(),
                position: DebatePosition::Defense,
                severity: ArgumentSeverity::Low,
                confidence: 0.5,
                claim: "Apparent conflicts routinely resolve through ordinary construction \
                    and order-of-precedence reading."
                    .to_string(),
                evidence: vec![
                    "Courts reconcile clauses before voiding them".to_string(),
                    "Carve-outs and priority language can be added in redline".to_string(),
                ],
            }),
            "power" => arguments.push(DebateArgument {
                topic: pro.topic.clone(),
                position: DebatePosition::Defense,
                severity: ArgumentSeverity::Low,
                confidence: 0.5,
                claim: "Asymmetry of obligations reflects asymmetry of roles, not \
                    overreach; the service provider naturally carries delivery duties."
                    .to_string(),
                evidence: vec![
                    "Role-appropriate obligations are not unconscionable".to_string(),
                    "Pricing already compensates the burdened party".to_string(),
                ],
            }),
            topic => {
                let kind = ClauseType::parse(topic);
                let Some(entry) = entry_for(kind) else { continue };
                let confidence = 0.8 * average_confidence(report, kind);
                arguments.push(DebateArgument {
                    topic: pro.topic.clone(),
                    position: DebatePosition::Defense,
                    severity: ArgumentSeverity::Low,
                    confidence,
                    claim: format!(
                        "The {} clause tracks market practice; {}.",
                        kind.display_name(),
                        entry.defenses.first().copied().unwrap_or("it is unexceptional"),
                    ),
                    evidence: entry.defenses.iter().take(3).map(|s| s.to_string()).collect(),
                });
            }
        }
    }

    arguments
}

/// Judge pass: weigh each topic's strongest arguments.
fn judge(
    prosecution: &[DebateArgument],
    defense: &[DebateArgument],
    config: &DebateConfig,
) -> (Vec<Ruling>, f64) {
    let defense_by_topic: BTreeMap<&str, &DebateArgument> =
        defense.iter().map(|d| (d.topic.as_str(), d)).collect();

    let mut rulings = Vec::new();
    let mut total_adjustment = 0.0;

    for pro in prosecution {
        let pro_total = pro.confidence * config.weight(pro.severity)
            + 0.1 * pro.evidence.len().min(3) as f64;
        let def = defense_by_topic.get(pro.topic.as_str());
        let def_total = def
            .map(|d| d.confidence * config.weight(d.severity) + 0.1 * d.evidence.len().min(3) as f64)
            .unwrap_or(0.0);

        let (outcome, rationale, adjustment) = if pro_total > config.ruling_threshold * def_total {
            (
                RulingOutcome::Sustained,
                format!(
                    "Prosecution carries the topic ({pro_total:.2} vs {def_total:.2}); the \
                     risk is real and unrebutted."
                ),
                pro.confidence * 0.1,
            )
        } else if def_total > config.ruling_threshold * pro_total {
            (
                RulingOutcome::Overruled,
                format!(
                    "Defense prevails ({def_total:.2} vs {pro_total:.2}); the clause sits \
                     within market practice."
                ),
                -0.05,
            )
        } else {
            (
                RulingOutcome::Sustained,
                format!(
                    "Arguments are closely matched ({pro_total:.2} vs {def_total:.2}); \
                     caution favors treating the risk as live."
                ),
                pro.confidence * 0.05,
            )
        };

        total_adjustment += adjustment;
        rulings.push(Ruling {
            topic: pro.topic.clone(),
            outcome,
            rationale,
            risk_adjustment: adjustment,
        });
    }

    (rulings, total_adjustment)
}

/// Share of a risk phrase's tokens that appear in the clause text.
fn keyword_overlap(text: &str, risk: &str) -> f64 {
    let text_lower = text.to_lowercase();
    let text_tokens: std::collections::BTreeSet<&str> = text_lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.len() >= 3)
        .collect();
    let risk_lower = risk.to_lowercase();
    let risk_tokens: Vec<&str> = risk_lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.len() >= 3)
        .collect();
    if risk_tokens.is_empty() {
        return 0.0;
    }
    let hits = risk_tokens.iter().filter(|t| text_tokens.contains(*t)).count();
    hits as f64 / risk_tokens.len() as f64
}

/// Mean calibrated confidence of the clauses of one kind; 0.5 when absent.
fn average_confidence(report: &Report, kind: ClauseType) -> f64 {
    let matching: Vec<f64> = report
        .classifications
        .iter()
        .filter(|c| c.clause_type == kind)
        .map(|c| c.calibrated_confidence)
        .collect();
    if matching.is_empty() {
        return 0.5;
    }
    matching.iter().sum::<f64>() / matching.len() as f64
}
