//! # lexgraph-symbolic
//!
//! Evaluates the doctrine rule set against an analyzed report and fuses
//! the symbolic verdict with the neural risk score.
//!
//! The neural layer perceives (clause kinds, confidence, risk weights);
//! the symbolic layer deduces (doctrine violations with remedies and
//! citations); an adaptive blend decides how much to trust each: high
//! classifier confidence shifts weight to the neural score, many fired
//! rules shift it to the symbolic one.

mod rules;

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use lexgraph_core::{ClauseType, DoctrineViolation, Report, SymbolicVerdict};

pub use rules::{doctrine_rules, DoctrineRule, Preconditions};

/// Confidence floor for a rule to fire.
const FIRE_THRESHOLD: f64 = 0.7;
/// Ceiling on the symbolic risk score.
const SYMBOLIC_CAP: f64 = 95.0;

/// A rule with its patterns compiled once at load.
struct CompiledRule {
    rule: &'static DoctrineRule,
    clause_pattern: Option<Pattern>,
    clause_pattern_secondary: Option<Pattern>,
    missing_pattern: Option<Pattern>,
}

/// Compiled regex, or a lowercase substring needle when the pattern does
/// not compile.
enum Pattern {
    Re(Regex),
    Substring(String),
}

impl Pattern {
    fn compile(source: &str) -> Pattern {
        match Regex::new(&format!("(?i){source}")) {
            Ok(re) => Pattern::Re(re),
            Err(e) => {
                tracing::warn!("doctrine pattern fell back to substring match: {e}");
                Pattern::Substring(source.to_lowercase())
            }
        }
    }

    fn is_match(&self, text: &str, text_lower: &str) -> bool {
        match self {
            Pattern::Re(re) => re.is_match(text),
            Pattern::Substring(needle) => text_lower.contains(needle),
        }
    }
}

static COMPILED: Lazy<Vec<CompiledRule>> = Lazy::new(|| {
    doctrine_rules()
        .iter()
        .map(|rule| CompiledRule {
            rule,
            clause_pattern: rule.pre.clause_pattern.map(Pattern::compile),
            clause_pattern_secondary: rule.pre.clause_pattern_secondary.map(Pattern::compile),
            missing_pattern: rule.pre.missing_pattern.map(Pattern::compile),
        })
        .collect()
});

/// Evaluate all doctrine rules against a report.
pub fn evaluate(report: &Report) -> SymbolicVerdict {
    let present: BTreeSet<ClauseType> = report.present_types().into_iter().collect();
    let full_text = report.full_text();
    let full_text_lower = full_text.to_lowercase();
    let contract_type = report.metadata.contract_type.to_ascii_uppercase();
    let neural_risk = report.overall.risk_score;

    let mut violations: Vec<DoctrineViolation> = Vec::new();
    let mut reasoning_chain: Vec<String> = Vec::new();
    let mut evaluable = 0usize;

    for compiled in COMPILED.iter() {
        let rule = compiled.rule;
        let mut satisfied = 0usize;
        let mut total = 0usize;
        let mut vetoed = false;

        // Hard predicates: failure vetoes the rule outright.
        if let Some(kind) = rule.pre.requires_clause {
            total += 1;
            if present.contains(&kind) {
                satisfied += 1;
            } else {
                vetoed = true;
            }
        }
        if let Some(kind) = rule.pre.requires_clause_secondary {
            total += 1;
            if present.contains(&kind) {
                satisfied += 1;
            } else {
                vetoed = true;
            }
        }
        if let Some(kind) = rule.pre.missing_clause {
            total += 1;
            if !present.contains(&kind) {
                satisfied += 1;
            } else {
                vetoed = true;
            }
        }
        if let Some(pattern) = &compiled.missing_pattern {
            total += 1;
            if !pattern.is_match(&full_text, &full_text_lower) {
                satisfied += 1;
            } else {
                vetoed = true;
            }
        }

        // Soft predicates: failure only lowers confidence.
        if let Some(kinds) = rule.pre.contract_types {
            total += 1;
            if kinds.iter().any(|k| k.eq_ignore_ascii_case(&contract_type)) {
                satisfied += 1;
            }
        }
        if let Some(threshold) = rule.pre.risk_threshold {
            total += 1;
            if neural_risk >= threshold * 100.0 {
                satisfied += 1;
            }
        }
        if let Some(pattern) = &compiled.clause_pattern {
            total += 1;
            if pattern.is_match(&full_text, &full_text_lower) {
                satisfied += 1;
            }
        }
        if let Some(pattern) = &compiled.clause_pattern_secondary {
            total += 1;
            if pattern.is_match(&full_text, &full_text_lower) {
                satisfied += 1;
            }
        }

        if vetoed {
            continue;
        }
        evaluable += 1;

        let confidence = if total == 0 { 0.0 } else { satisfied as f64 / total as f64 };
        if confidence >= FIRE_THRESHOLD {
            reasoning_chain.push(format!(
                "{} [{}]: {} (confidence {:.2})",
                rule.id,
                family_name(rule.family),
                rule.description,
                confidence,
            ));
            violations.push(DoctrineViolation {
                rule_id: rule.id.to_string(),
                family: rule.family,
                description: rule.description.to_string(),
                severity: rule.severity,
                confidence,
                risk_contribution: rule.risk_contribution,
                remedy: rule.remedy.to_string(),
                citation: rule.citation.to_string(),
            });
        }
    }

    let symbolic_risk = (100.0
        * violations
            .iter()
            .map(|v| v.risk_contribution * v.confidence)
            .sum::<f64>())
    .min(SYMBOLIC_CAP);

    let avg_confidence = report.average_calibrated_confidence();
    let alpha = blend_alpha(avg_confidence, violations.len());
    let fused_risk = alpha * neural_risk + (1.0 - alpha) * symbolic_risk;
    let doctrine_coverage = evaluable as f64 / doctrine_rules().len() as f64;

    debug!(
        violations = violations.len(),
        symbolic_risk,
        alpha,
        fused_risk,
        "symbolic evaluation"
    );

    SymbolicVerdict {
        violations,
        doctrine_coverage,
        symbolic_risk,
        neural_risk,
        fused_risk,
        alpha,
        reasoning_chain,
    }
}

/// Adaptive neural/symbolic blend weight.
///
/// `clip(0.25, 0.75, 0.5 + 0.4*(avg_conf - 0.5) - 0.15*min(1, n/10))`:
/// trust the classifier when it is confident, trust the doctrine rules
/// when many of them fire.
pub fn blend_alpha(avg_calibrated_confidence: f64, n_violations: usize) -> f64 {
    let violation_pull = 0.15 * (n_violations as f64 / 10.0).min(1.0);
    (0.5 + 0.4 * (avg_calibrated_confidence - 0.5) - violation_pull).clamp(0.25, 0.75)
}

fn family_name(family: lexgraph_core::DoctrineFamily) -> &'static str {
    use lexgraph_core::DoctrineFamily::*;
    match family {
        Proportionality => "proportionality",
        GoodFaith => "good_faith",
        GapFilling => "gap_filling",
        Unconscionability => "unconscionability",
        Interpretation => "interpretation",
        PublicPolicy => "public_policy",
        Formation => "formation",
    }
}
