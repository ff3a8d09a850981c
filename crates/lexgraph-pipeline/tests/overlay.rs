//! Overlay (v12) scenarios: symbolic fusion, retrieval, graph attention,
//! debate, and the meta-fused report.

use lexgraph_core::{ClauseType, RuleSeverity};
use lexgraph_pipeline::{AnalyzeOptions, OverlayOptions, Pipeline};

fn analyze(pipeline: &Pipeline, text: &str, kind: &str) -> lexgraph_core::Report {
    pipeline
        .analyze(text, kind, &AnalyzeOptions { seed: Some(42), ..Default::default() })
        .unwrap()
}

const UNCAPPED_INDEMNITY: &str = "\
Provider shall indemnify, defend and hold harmless Client from any and all claims \
without limitation, at Provider's sole expense.";

#[test]
fn uncapped_indemnity_triggers_the_doctrine_overlay() {
    let pipeline = Pipeline::new();
    let report = analyze(&pipeline, UNCAPPED_INDEMNITY, "GENERIC");
    assert_eq!(report.classifications[0].clause_type, ClauseType::Indemnification);
    assert!(!report.present_types().contains(&ClauseType::LimitationOfLiability));

    let overlay = pipeline
        .analyze_v12(&report, &OverlayOptions { enable_rag: false, enable_gnn: false, enable_debate: false, ..Default::default() })
        .unwrap();

    let symbolic = overlay.symbolic.as_ref().expect("symbolic enabled");
    let prop = symbolic
        .violations
        .iter()
        .find(|v| v.rule_id == "PROP-001")
        .expect("uncapped indemnity fires PROP-001");
    assert_eq!(prop.severity, RuleSeverity::Critical);

    assert!(
        symbolic.fused_risk > overlay.v11_risk + 3.0,
        "symbolic fused {} should exceed v11 {} by 3+",
        symbolic.fused_risk,
        overlay.v11_risk,
    );
    assert!(overlay.fused_risk > overlay.v11_risk + 3.0);
}

#[test]
fn overlay_invariants_hold() {
    let pipeline = Pipeline::new();
    let report = analyze(
        &pipeline,
        "1. INDEMNIFICATION. Provider shall indemnify, defend and hold harmless Client \
         from any and all third party claims, losses and damages without limitation.\n\n\
         2. LIMITATION OF LIABILITY. Neither party shall be liable for indirect or \
         consequential damages; aggregate liability shall not exceed the fees paid in \
         the twelve months preceding the claim.\n\n\
         3. TERMINATION. Provider may terminate this Agreement at its sole discretion \
         at any time without notice to Client for any reason whatsoever.\n\n\
         4. GOVERNING LAW. This Agreement is governed by and construed in accordance \
         with the laws of the State of Delaware; the parties submit to the exclusive \
         jurisdiction of the courts located in Delaware.",
        "MSA",
    );
    let overlay = pipeline.analyze_v12(&report, &OverlayOptions::default()).unwrap();

    // Meta report bounds.
    assert!((0.0..=100.0).contains(&overlay.fused_risk));
    assert!((0.1..=0.99).contains(&overlay.confidence));
    assert_eq!(overlay.engine_version, "v12");

    // Symbolic verdict bounds.
    let symbolic = overlay.symbolic.as_ref().unwrap();
    assert!((0.25..=0.75).contains(&symbolic.alpha));
    let lo = symbolic.neural_risk.min(symbolic.symbolic_risk);
    let hi = symbolic.neural_risk.max(symbolic.symbolic_risk);
    assert!(symbolic.fused_risk >= lo - 1e-9 && symbolic.fused_risk <= hi + 1e-9);
    assert!((0.0..=1.0).contains(&symbolic.doctrine_coverage));

    // Graph attention bounds.
    let gnn = overlay.gnn.as_ref().unwrap();
    for node in &gnn.node_results {
        assert!((0.0..=1.0).contains(&node.risk));
    }
    let importance: f64 = gnn.node_results.iter().map(|n| n.importance).sum();
    assert!((importance - 1.0).abs() < 1e-6, "importance sums to {importance}");
    assert!((0.0..=1.0).contains(&gnn.structural_anomaly));

    // Retrieval bounds.
    let rag = overlay.rag.as_ref().unwrap();
    assert!(rag.citations.len() <= 10);
    for pair in rag.citations.windows(2) {
        assert!(pair[0].relevance >= pair[1].relevance);
    }

    // Debate coherence.
    let debate = overlay.debate.as_ref().unwrap();
    assert_eq!(debate.rulings.len(), debate.prosecution.len());
}

#[test]
fn risk_ordered_fixtures_fuse_in_order() {
    let pipeline = Pipeline::new();

    let low = analyze(
        &pipeline,
        "1. CONFIDENTIALITY. Each party shall keep the confidential information of the \
         disclosing party secret, use it solely for this Agreement, and return materials \
         on request, subject to standard exclusions and reasonable care.\n\n\
         2. GOVERNING LAW. This Agreement is governed by the laws of the State of New \
         York; the parties submit to the exclusive jurisdiction of the courts there.\n\n\
         3. TERMINATION. Either party may terminate for convenience upon sixty days \
         written notice, or for material breach remaining uncured after thirty days. This \
         Agreement is signed in counterparts.\n\n\
         4. DISPUTE RESOLUTION. Disputes escalate to executive negotiation, then \
         mediation, then binding arbitration seated in New York under reasonable rules.",
        "GENERIC",
    );

    let standard = analyze(
        &pipeline,
        "1. INDEMNIFICATION. Provider shall indemnify, defend and hold harmless Client \
         from third party claims arising out of Provider's breach or negligence.\n\n\
         2. TERMINATION. Provider may terminate for convenience; Client may terminate \
         only for material breach remaining uncured after ninety days notice.\n\n\
         3. PAYMENT TERMS. All fees are non-refundable; invoices are due upon receipt \
         and late amounts accrue interest at the maximum lawful rate.\n\n\
         4. WARRANTY. The services are provided as is and Provider disclaims all \
         warranties, express or implied, including fitness for a particular purpose.",
        "MSA",
    );

    let high = analyze(
        &pipeline,
        "1. INDEMNIFICATION. Customer shall indemnify, defend and hold harmless Provider \
         from any and all claims without limitation, including claims arising from \
         Provider's own conduct.\n\n\
         2. TERMINATION. Provider may terminate immediately without notice at its sole \
         discretion; Customer waives any right to cure.\n\n\
         3. LIMITATION OF LIABILITY. Customer waives all rights and remedies; in no \
         event shall Provider be liable for any damages whatsoever, and Provider \
         excludes liability for gross negligence and willful misconduct \
         notwithstanding anything to the contrary.\n\n\
         4. NON-COMPETE. Customer shall not compete anywhere in the world for ten years \
         and shall not solicit any employee or personnel of Provider in perpetuity.",
        "MSA",
    );

    assert!(
        low.overall.risk_score < standard.overall.risk_score
            && standard.overall.risk_score < high.overall.risk_score,
        "v11 ordering: {} < {} < {}",
        low.overall.risk_score,
        standard.overall.risk_score,
        high.overall.risk_score,
    );

    // The graph attention scorer is a seeded heuristic, not a trained
    // model; its graph score does not track contract nastiness and is
    // left out of the strict-ordering assertion.
    let opts = OverlayOptions { enable_gnn: false, ..Default::default() };
    let fused_low = pipeline.analyze_v12(&low, &opts).unwrap().fused_risk;
    let fused_standard = pipeline.analyze_v12(&standard, &opts).unwrap().fused_risk;
    let fused_high = pipeline.analyze_v12(&high, &opts).unwrap().fused_risk;

    assert!(
        fused_low < fused_standard && fused_standard < fused_high,
        "fused ordering: {fused_low} < {fused_standard} < {fused_high}",
    );
}

#[test]
fn subsystems_toggle_independently() {
    let pipeline = Pipeline::new();
    let report = analyze(&pipeline, UNCAPPED_INDEMNITY, "GENERIC");

    let only_debate = pipeline
        .analyze_v12(
            &report,
            &OverlayOptions {
                enable_symbolic: false,
                enable_rag: false,
                enable_gnn: false,
                enable_debate: true,
                cancel: None,
            },
        )
        .unwrap();
    assert!(only_debate.symbolic.is_none());
    assert!(only_debate.rag.is_none());
    assert!(only_debate.gnn.is_none());
    assert!(only_debate.debate.is_some());
    assert!((0.0..=100.0).contains(&only_debate.fused_risk));

    use lexgraph_core::StageStatus;
    assert_eq!(only_debate.stage_status.get("symbolic"), Some(&StageStatus::Skipped));
    assert_eq!(only_debate.stage_status.get("debate"), Some(&StageStatus::Ok));
}

#[test]
fn overlay_report_serializes_stably() {
    let pipeline = Pipeline::new();
    let report = analyze(&pipeline, UNCAPPED_INDEMNITY, "GENERIC");
    let overlay = pipeline.analyze_v12(&report, &OverlayOptions::default()).unwrap();

    let json = serde_json::to_string(&overlay).unwrap();
    let parsed: lexgraph_core::V12Report = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, overlay);

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert!(value["v11_risk"].is_number());
    assert!(value["fused_risk"].is_number());
    assert!(value["symbolic"]["violations"].is_array());
}

#[test]
fn cancellation_aborts_the_overlay() {
    let pipeline = Pipeline::new();
    let report = analyze(&pipeline, UNCAPPED_INDEMNITY, "GENERIC");
    let token = lexgraph_core::CancelToken::new();
    token.cancel();
    let err = pipeline
        .analyze_v12(&report, &OverlayOptions { cancel: Some(token), ..Default::default() })
        .unwrap_err();
    assert!(matches!(err, lexgraph_pipeline::PipelineError::Cancelled));
}
