//! Dispute prediction entities.

use serde::{Deserialize, Serialize};

use crate::taxonomy::ClauseType;

/// Qualitative severity of a hotspot, mapped from its probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HotspotSeverity {
    Critical,
    High,
    Medium,
    Low,
}

impl HotspotSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            HotspotSeverity::Critical => "CRITICAL",
            HotspotSeverity::High => "HIGH",
            HotspotSeverity::Medium => "MEDIUM",
            HotspotSeverity::Low => "LOW",
        }
    }

    /// Probability thresholds: `>= 0.8` critical, `>= 0.6` high,
    /// `>= 0.4` medium, else low.
    pub fn from_probability(p: f64) -> Self {
        if p >= 0.8 {
            HotspotSeverity::Critical
        } else if p >= 0.6 {
            HotspotSeverity::High
        } else if p >= 0.4 {
            HotspotSeverity::Medium
        } else {
            HotspotSeverity::Low
        }
    }
}

/// Which upstream signal produced a hotspot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HotspotCategory {
    Conflict,
    Gap,
    Power,
}

/// A clause predicted to be contested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisputeHotspot {
    #[serde(rename = "type")]
    pub clause_type: ClauseType,
    pub clause_id: String,
    pub probability: f64,
    pub severity: HotspotSeverity,
    pub category: HotspotCategory,
    pub reason: String,
    pub recommendation: String,
}

/// Complete dispute prediction for a contract.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisputePrediction {
    /// Unique by clause kind, highest probability first.
    pub hotspots: Vec<DisputeHotspot>,
    pub overall_dispute_risk: f64,
    /// `"High (5+ potential disputes)"` / `"Medium (2-4 ...)"` / `"Low (0-1 ...)"`.
    pub dispute_count_prediction: String,
    /// Up to three `"SEVERITY: reason"` digests.
    pub top_risks: Vec<String>,
}

impl Default for HotspotSeverity {
    fn default() -> Self {
        HotspotSeverity::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_thresholds() {
        assert_eq!(HotspotSeverity::from_probability(0.85), HotspotSeverity::Critical);
        assert_eq!(HotspotSeverity::from_probability(0.8), HotspotSeverity::Critical);
        assert_eq!(HotspotSeverity::from_probability(0.6), HotspotSeverity::High);
        assert_eq!(HotspotSeverity::from_probability(0.45), HotspotSeverity::Medium);
        assert_eq!(HotspotSeverity::from_probability(0.1), HotspotSeverity::Low);
    }

    #[test]
    fn severity_serializes_uppercase() {
        let json = serde_json::to_string(&HotspotSeverity::Critical).unwrap();
        assert_eq!(json, "\"CRITICAL\"");
    }

    #[test]
    fn hotspot_round_trips() {
        let spot = DisputeHotspot {
            clause_type: ClauseType::Indemnification,
            clause_id: "section_1".into(),
            probability: 0.6,
            severity: HotspotSeverity::High,
            category: HotspotCategory::Power,
            reason: "one-sided".into(),
            recommendation: "negotiate".into(),
        };
        let json = serde_json::to_string(&spot).unwrap();
        let back: DisputeHotspot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, spot);
    }
}
