//! # lexgraph-corpus
//!
//! Learns running statistical patterns across analyzed contracts and
//! flags outliers in new ones: "this contract's risk is 2.3 standard
//! deviations above the corpus average" needs no labeled dataset, only
//! sufficient statistics accumulated per ingest.
//!
//! The profile persists as JSON. The file carries human-readable summary
//! fields alongside `_raw_*` sufficient statistics; only the raw fields
//! matter for reconstruction, and unknown fields are tolerated so newer
//! writers do not break older readers. Writes go to a temp file, fsync,
//! then an atomic rename; a crash mid-write leaves the previous profile
//! intact.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use lexgraph_core::{
    AnomalyKind, AnomalySeverity, ClauseAnomaly, CorpusComparison, Report,
};

/// Contracts required before comparisons are meaningful.
const MIN_CONTRACTS: u64 = 3;

/// Running sufficient statistics for one clause kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClauseStatistics {
    pub count: u64,
    pub confidence_sum: f64,
    pub confidence_sq_sum: f64,
    pub risk_weight_sum: f64,
    pub risk_weight_sq_sum: f64,
    pub text_length_sum: f64,
    pub text_length_sq_sum: f64,
    /// Contracts containing at least one clause of this kind.
    pub presence_count: u64,
}

impl ClauseStatistics {
    pub fn mean_confidence(&self) -> f64 {
        self.confidence_sum / self.count.max(1) as f64
    }

    /// Defaults to 0.1 below two observations; floored at 0.01 so
    /// z-scores stay finite.
    pub fn std_confidence(&self) -> f64 {
        if self.count < 2 {
            return 0.1;
        }
        let mean = self.mean_confidence();
        let variance = (self.confidence_sq_sum / self.count as f64) - mean * mean;
        variance.max(0.0).sqrt().max(0.01)
    }

    pub fn mean_risk_weight(&self) -> f64 {
        self.risk_weight_sum / self.count.max(1) as f64
    }

    pub fn mean_text_length(&self) -> f64 {
        self.text_length_sum / self.count.max(1) as f64
    }
}

/// The full corpus profile: aggregates plus per-kind statistics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CorpusProfile {
    pub total_contracts: u64,
    pub contract_type_counts: BTreeMap<String, u64>,
    pub clause_stats: BTreeMap<String, ClauseStatistics>,
    pub risk_score_sum: f64,
    pub risk_score_sq_sum: f64,
    pub clause_count_sum: f64,
    pub clause_count_sq_sum: f64,
}

impl CorpusProfile {
    pub fn mean_risk(&self) -> f64 {
        self.risk_score_sum / self.total_contracts.max(1) as f64
    }

    /// Defaults to 10 below two contracts; floored at 1 so z-scores stay
    /// bounded.
    pub fn std_risk(&self) -> f64 {
        if self.total_contracts < 2 {
            return 10.0;
        }
        let mean = self.mean_risk();
        let variance = (self.risk_score_sq_sum / self.total_contracts as f64) - mean * mean;
        variance.max(0.0).sqrt().max(1.0)
    }

    pub fn mean_clause_count(&self) -> f64 {
        self.clause_count_sum / self.total_contracts.max(1) as f64
    }

    fn presence_rate(&self, stats: &ClauseStatistics) -> f64 {
        stats.presence_count as f64 / self.total_contracts.max(1) as f64
    }
}

/// Human-readable summary of one clause kind, written alongside the raw
/// statistics for people reading the profile file.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ClauseStatsSummary {
    count: u64,
    mean_confidence: f64,
    std_confidence: f64,
    mean_risk_weight: f64,
    mean_text_length: f64,
    presence_count: u64,
}

/// On-disk layout. Readable fields are derived; `_raw_*` fields are the
/// source of truth on load.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ProfileFile {
    #[serde(default)]
    total_contracts: u64,
    #[serde(default)]
    contract_type_counts: BTreeMap<String, u64>,
    #[serde(default)]
    mean_risk_score: f64,
    #[serde(default)]
    std_risk_score: f64,
    #[serde(default)]
    mean_clause_count: f64,
    #[serde(default)]
    clause_statistics: BTreeMap<String, ClauseStatsSummary>,
    #[serde(default, rename = "_raw_clause_stats")]
    raw_clause_stats: BTreeMap<String, ClauseStatistics>,
    #[serde(default, rename = "_risk_score_sum")]
    risk_score_sum: f64,
    #[serde(default, rename = "_risk_score_sq_sum")]
    risk_score_sq_sum: f64,
    #[serde(default, rename = "_clause_count_sum")]
    clause_count_sum: f64,
    #[serde(default, rename = "_clause_count_sq_sum")]
    clause_count_sq_sum: f64,
}

/// Corpus store: in-memory profile plus optional JSON persistence.
///
/// Single-writer: the pipeline serializes ingests behind a mutex and this
/// type assumes exclusive `&mut` access for writes.
pub struct CorpusStore {
    path: Option<PathBuf>,
    profile: CorpusProfile,
}

impl CorpusStore {
    /// Open a store backed by `path`, loading any existing profile. Load
    /// failures log a warning and start fresh; the in-memory profile is
    /// the source of truth.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let profile = match fs::read(&path) {
            Ok(bytes) => match serde_json::from_slice::<ProfileFile>(&bytes) {
                Ok(file) => {
                    let profile = CorpusProfile {
                        total_contracts: file.total_contracts,
                        contract_type_counts: file.contract_type_counts,
                        clause_stats: file.raw_clause_stats,
                        risk_score_sum: file.risk_score_sum,
                        risk_score_sq_sum: file.risk_score_sq_sum,
                        clause_count_sum: file.clause_count_sum,
                        clause_count_sq_sum: file.clause_count_sq_sum,
                    };
                    info!(contracts = profile.total_contracts, "corpus profile loaded");
                    profile
                }
                Err(e) => {
                    warn!("corpus profile unreadable, starting fresh: {e}");
                    CorpusProfile::default()
                }
            },
            Err(_) => CorpusProfile::default(),
        };
        CorpusStore { path: Some(path), profile }
    }

    /// A store without persistence.
    pub fn in_memory() -> Self {
        CorpusStore { path: None, profile: CorpusProfile::default() }
    }

    pub fn profile(&self) -> &CorpusProfile {
        &self.profile
    }

    /// Learn from one analyzed report and persist the updated profile.
    pub fn ingest(&mut self, report: &Report) {
        let profile = &mut self.profile;
        let risk = report.overall.risk_score;
        let clause_count = report.metadata.total_clauses as f64;

        profile.total_contracts += 1;
        *profile
            .contract_type_counts
            .entry(report.metadata.contract_type.clone())
            .or_insert(0) += 1;
        profile.risk_score_sum += risk;
        profile.risk_score_sq_sum += risk * risk;
        profile.clause_count_sum += clause_count;
        profile.clause_count_sq_sum += clause_count * clause_count;

        let mut seen: BTreeSet<String> = BTreeSet::new();
        for clause in &report.classifications {
            let key = clause.clause_type.as_str().to_string();
            let stats = profile.clause_stats.entry(key.clone()).or_default();
            let conf = clause.raw_confidence;
            let len = clause.text.len() as f64;
            stats.count += 1;
            stats.confidence_sum += conf;
            stats.confidence_sq_sum += conf * conf;
            stats.risk_weight_sum += clause.risk_weight;
            stats.risk_weight_sq_sum += clause.risk_weight * clause.risk_weight;
            stats.text_length_sum += len;
            stats.text_length_sq_sum += len * len;
            seen.insert(key);
        }
        for key in seen {
            if let Some(stats) = profile.clause_stats.get_mut(&key) {
                stats.presence_count += 1;
            }
        }

        debug!(
            contracts = profile.total_contracts,
            kinds = profile.clause_stats.len(),
            "report ingested"
        );
        self.persist();
    }

    /// Compare a report against the learned profile.
    pub fn compare(&self, report: &Report) -> CorpusComparison {
        let profile = &self.profile;
        if profile.total_contracts < MIN_CONTRACTS {
            return CorpusComparison::insufficient_data();
        }

        let risk = report.overall.risk_score;
        let risk_z = (risk - profile.mean_risk()) / profile.std_risk();
        let mut anomalies: Vec<ClauseAnomaly> = Vec::new();

        let present: BTreeSet<String> = report
            .classifications
            .iter()
            .map(|c| c.clause_type.as_str().to_string())
            .collect();

        // Per-clause confidence outliers.
        for clause in &report.classifications {
            let key = clause.clause_type.as_str();
            let Some(stats) = profile.clause_stats.get(key) else { continue };
            if stats.count < 3 {
                continue;
            }
            let conf_z = (clause.raw_confidence - stats.mean_confidence()) / stats.std_confidence();
            if conf_z.abs() > 2.0 {
                anomalies.push(ClauseAnomaly {
                    clause_type: key.to_string(),
                    clause_id: clause.id.clone(),
                    kind: AnomalyKind::UnusualConfidence,
                    z_score: conf_z,
                    description: format!(
                        "Classification confidence ({:.2}) is {} compared to the corpus \
                         average ({:.2}). This clause may be atypical or misclassified.",
                        clause.raw_confidence,
                        if conf_z < 0.0 { "unusually low" } else { "unusually high" },
                        stats.mean_confidence(),
                    ),
                    severity: if conf_z.abs() > 2.5 {
                        AnomalySeverity::Warning
                    } else {
                        AnomalySeverity::Info
                    },
                });
            }
        }

        // Common kinds that are absent here.
        for (key, stats) in &profile.clause_stats {
            if stats.count < 3 {
                continue;
            }
            let prevalence = profile.presence_rate(stats);
            if prevalence > 0.7 && !present.contains(key) {
                anomalies.push(ClauseAnomaly {
                    clause_type: key.clone(),
                    clause_id: "MISSING".to_string(),
                    kind: AnomalyKind::Missing,
                    z_score: -prevalence * 3.0,
                    description: format!(
                        "Clause kind '{}' is present in {:.0}% of analyzed contracts but \
                         missing here.",
                        key.replace('_', " "),
                        prevalence * 100.0,
                    ),
                    severity: if prevalence > 0.85 {
                        AnomalySeverity::Warning
                    } else {
                        AnomalySeverity::Info
                    },
                });
            }
        }

        // Kinds present here but rare in the corpus.
        for key in &present {
            let Some(stats) = profile.clause_stats.get(key) else { continue };
            let prevalence = profile.presence_rate(stats);
            if prevalence < 0.15 && stats.presence_count >= 1 {
                anomalies.push(ClauseAnomaly {
                    clause_type: key.clone(),
                    clause_id: "PRESENT".to_string(),
                    kind: AnomalyKind::Outlier,
                    z_score: 2.0,
                    description: format!(
                        "Clause kind '{}' is unusual (only in {:.0}% of analyzed contracts).",
                        key.replace('_', " "),
                        prevalence * 100.0,
                    ),
                    severity: AnomalySeverity::Info,
                });
            }
        }

        // Contract-level risk outlier.
        if risk_z.abs() > 2.0 {
            anomalies.push(ClauseAnomaly {
                clause_type: "overall".to_string(),
                clause_id: "RISK".to_string(),
                kind: AnomalyKind::Outlier,
                z_score: risk_z,
                description: format!(
                    "Overall risk score ({:.0}) is significantly {} than the corpus average \
                     ({:.0} +/- {:.0}).",
                    risk,
                    if risk_z > 0.0 { "higher" } else { "lower" },
                    profile.mean_risk(),
                    profile.std_risk(),
                ),
                severity: if risk_z.abs() > 3.0 {
                    AnomalySeverity::Alert
                } else {
                    AnomalySeverity::Warning
                },
            });
        }

        // Jaccard similarity of present kinds vs corpus kinds.
        let corpus_kinds: BTreeSet<&String> = profile.clause_stats.keys().collect();
        let union = corpus_kinds.len() + present.iter().filter(|k| !corpus_kinds.contains(k)).count();
        let structural_similarity = if union == 0 {
            0.5
        } else {
            present.iter().filter(|k| corpus_kinds.contains(k)).count() as f64 / union as f64
        };

        // Coverage of the corpus's common kinds.
        let common: Vec<&String> = profile
            .clause_stats
            .iter()
            .filter(|(_, s)| profile.presence_rate(s) > 0.5)
            .map(|(k, _)| k)
            .collect();
        let clause_coverage = if common.is_empty() {
            1.0
        } else {
            common.iter().filter(|k| present.contains(k.as_str())).count() as f64 / common.len() as f64
        };

        anomalies.sort_by(|a, b| {
            a.severity
                .cmp(&b.severity)
                .then(b.z_score.abs().total_cmp(&a.z_score.abs()))
        });

        let summary = summarize(profile.total_contracts, &anomalies, risk_z, clause_coverage);

        CorpusComparison {
            anomalies,
            risk_z_score: risk_z,
            structural_similarity,
            clause_coverage,
            summary,
        }
    }

    /// Persist the profile. Failures log and continue; the in-memory
    /// profile remains authoritative.
    fn persist(&self) {
        let Some(path) = &self.path else { return };
        if let Err(e) = write_atomic(path, &self.profile) {
            warn!("corpus profile not persisted: {e}");
        }
    }
}

fn summarize(
    contracts: u64,
    anomalies: &[ClauseAnomaly],
    risk_z: f64,
    coverage: f64,
) -> String {
    let mut parts = vec![format!("Compared against corpus of {contracts} analyzed contracts.")];
    if risk_z.abs() > 2.0 {
        parts.push(format!(
            "Risk score is unusually {} (z={risk_z:.1}).",
            if risk_z > 0.0 { "high" } else { "low" }
        ));
    } else if risk_z.abs() > 1.0 {
        parts.push(format!(
            "Risk score is {} average (z={risk_z:.1}).",
            if risk_z > 0.0 { "above" } else { "below" }
        ));
    } else {
        parts.push("Risk score is within normal range.".to_string());
    }
    let alerts = anomalies.iter().filter(|a| a.severity == AnomalySeverity::Alert).count();
    let warnings = anomalies.iter().filter(|a| a.severity == AnomalySeverity::Warning).count();
    if alerts > 0 {
        parts.push(format!("{alerts} critical anomaly(ies) detected."));
    }
    if warnings > 0 {
        parts.push(format!("{warnings} warning(s) flagged."));
    }
    if alerts == 0 && warnings == 0 {
        parts.push("No significant anomalies detected.".to_string());
    }
    parts.push(format!("Clause coverage: {:.0}% of typical clauses present.", coverage * 100.0));
    parts.join(" ")
}

/// Serialize the profile and atomically replace the file at `path`:
/// write to a sibling temp file, fsync, rename.
fn write_atomic(path: &Path, profile: &CorpusProfile) -> std::io::Result<()> {
    let file = ProfileFile {
        total_contracts: profile.total_contracts,
        contract_type_counts: profile.contract_type_counts.clone(),
        mean_risk_score: profile.mean_risk(),
        std_risk_score: profile.std_risk(),
        mean_clause_count: profile.mean_clause_count(),
        clause_statistics: profile
            .clause_stats
            .iter()
            .map(|(k, s)| {
                (
                    k.clone(),
                    ClauseStatsSummary {
                        count: s.count,
                        mean_confidence: s.mean_confidence(),
                        std_confidence: s.std_confidence(),
                        mean_risk_weight: s.mean_risk_weight(),
                        mean_text_length: s.mean_text_length(),
                        presence_count: s.presence_count,
                    },
                )
            })
            .collect(),
        raw_clause_stats: profile.clause_stats.clone(),
        risk_score_sum: profile.risk_score_sum,
        risk_score_sq_sum: profile.risk_score_sq_sum,
        clause_count_sum: profile.clause_count_sum,
        clause_count_sq_sum: profile.clause_count_sq_sum,
    };
    let bytes = serde_json::to_vec_pretty(&file)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let tmp = path.with_extension("json.tmp");
    {
        let mut f = fs::File::create(&tmp)?;
        f.write_all(&bytes)?;
        f.sync_all()?;
    }
    fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexgraph_core::{
        ClassifiedClause, ClauseType, DisputePrediction, GraphAnalysis, Language, Overall,
        PowerAnalysis, Report, ReportMetadata, RiskLevel,
    };

    fn clause(kind: ClauseType, confidence: f64) -> ClassifiedClause {
        ClassifiedClause {
            id: format!("section_{}", kind.as_str()),
            text: format!("{} body text of reasonable length", kind.display_name()),
            header: String::new(),
            start_pos: 0,
            end_pos: 0,
            coherence: 0.6,
            clause_type: kind,
            raw_confidence: confidence,
            calibrated_confidence: 0.1,
            entropy_ratio: 0.9,
            margin: 0.02,
            needs_review: false,
            top_k: vec![],
            risk_weight: kind.risk_weight(),
            category: "x".into(),
            language: Language::En,
        }
    }

    fn report(risk: f64, kinds: &[ClauseType]) -> Report {
        Report {
            metadata: ReportMetadata {
                contract_type: "MSA".into(),
                total_clauses: kinds.len(),
                analysis_time_ms: 1,
                engine_version: "v11".into(),
            },
            classifications: kinds.iter().map(|&k| clause(k, 0.6)).collect(),
            graph_analysis: GraphAnalysis::default(),
            power_analysis: PowerAnalysis {
                parties: vec!["A".into(), "B".into()],
                power_score: 10.0,
                dominant_party: "A".into(),
                burdened_party: "B".into(),
                asymmetric_clauses: vec![],
                total_obligations: 0,
                total_protections: 0,
                burdens: vec![],
            },
            dispute_prediction: DisputePrediction::default(),
            overall: Overall {
                risk_score: risk,
                risk_level: RiskLevel::from_score(risk),
                executive_summary: String::new(),
            },
            suggested_rewrites: None,
            risk_simulation: None,
            corpus_comparison: None,
            stage_status: BTreeMap::new(),
        }
    }

    const TYPICAL: &[ClauseType] = &[
        ClauseType::Termination,
        ClauseType::Confidentiality,
        ClauseType::GoverningLaw,
        ClauseType::PaymentTerms,
    ];

    #[test]
    fn insufficient_corpus_returns_placeholder() {
        let mut store = CorpusStore::in_memory();
        store.ingest(&report(45.0, TYPICAL));
        let comparison = store.compare(&report(45.0, TYPICAL));
        assert_eq!(comparison.summary, CorpusComparison::insufficient_data().summary);
    }

    #[test]
    fn high_risk_contract_is_an_outlier() {
        let mut store = CorpusStore::in_memory();
        for _ in 0..5 {
            store.ingest(&report(45.0, TYPICAL));
        }
        let spike = report(85.0, TYPICAL);
        store.ingest(&spike);
        let comparison = store.compare(&spike);

        assert!(comparison.risk_z_score > 1.5, "z = {}", comparison.risk_z_score);
        assert!(comparison.anomalies.iter().any(|a| {
            a.kind == AnomalyKind::Outlier
                && matches!(a.severity, AnomalySeverity::Warning | AnomalySeverity::Alert)
        }));
    }

    #[test]
    fn missing_common_clause_is_flagged() {
        let mut store = CorpusStore::in_memory();
        for _ in 0..4 {
            store.ingest(&report(45.0, TYPICAL));
        }
        let thin = report(45.0, &[ClauseType::Termination]);
        store.ingest(&thin);
        let comparison = store.compare(&thin);
        assert!(comparison
            .anomalies
            .iter()
            .any(|a| a.kind == AnomalyKind::Missing && a.clause_type == "governing_law"));
        assert!(comparison.clause_coverage < 1.0);
    }

    #[test]
    fn rare_clause_kind_is_an_outlier() {
        let mut store = CorpusStore::in_memory();
        for _ in 0..9 {
            store.ingest(&report(45.0, TYPICAL));
        }
        let mut kinds = TYPICAL.to_vec();
        kinds.push(ClauseType::NonCompete);
        let odd = report(45.0, &kinds);
        store.ingest(&odd);
        let comparison = store.compare(&odd);
        assert!(comparison
            .anomalies
            .iter()
            .any(|a| a.kind == AnomalyKind::Outlier && a.clause_type == "non_compete"));
    }

    #[test]
    fn repeat_ingests_converge() {
        let mut store = CorpusStore::in_memory();
        let r = report(50.0, TYPICAL);
        store.ingest(&r);
        store.ingest(&r);
        store.ingest(&r);
        let second = store.compare(&r);
        store.ingest(&r);
        let third = store.compare(&r);
        assert_eq!(second.risk_z_score, third.risk_z_score);
        assert_eq!(second.anomalies.len(), third.anomalies.len());
        assert_eq!(second.clause_coverage, third.clause_coverage);
    }

    #[test]
    fn profile_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corpus_profile.json");
        {
            let mut store = CorpusStore::open(&path);
            for _ in 0..4 {
                store.ingest(&report(52.0, TYPICAL));
            }
        }
        let reopened = CorpusStore::open(&path);
        assert_eq!(reopened.profile().total_contracts, 4);
        assert!((reopened.profile().mean_risk() - 52.0).abs() < 1e-9);
        let stats = reopened.profile().clause_stats.get("termination").unwrap();
        assert_eq!(stats.presence_count, 4);

        // The file carries both readable and raw sections.
        let raw: serde_json::Value =
            serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
        assert!(raw.get("mean_risk_score").is_some());
        assert!(raw.get("_raw_clause_stats").is_some());
    }

    #[test]
    fn corrupt_profile_starts_fresh() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corpus_profile.json");
        fs::write(&path, b"{ not json").unwrap();
        let store = CorpusStore::open(&path);
        assert_eq!(store.profile().total_contracts, 0);
    }

    #[test]
    fn anomalies_sorted_most_severe_first() {
        let mut store = CorpusStore::in_memory();
        for _ in 0..6 {
            store.ingest(&report(45.0, TYPICAL));
        }
        // Very high risk plus a missing common clause.
        let odd = report(95.0, &[ClauseType::NonCompete]);
        store.ingest(&odd);
        let comparison = store.compare(&odd);
        for pair in comparison.anomalies.windows(2) {
            assert!(pair[0].severity <= pair[1].severity);
        }
    }
}
