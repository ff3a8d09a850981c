//! Monte-Carlo risk simulation result types.

use serde::{Deserialize, Serialize};

/// Qualitative width of the 95% confidence interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Volatility {
    Low,
    Medium,
    High,
}

impl Volatility {
    /// CI95 width thresholds: `< 15` low, `< 30` medium, else high.
    pub fn from_ci_width(width: f64) -> Self {
        if width < 15.0 {
            Volatility::Low
        } else if width < 30.0 {
            Volatility::Medium
        } else {
            Volatility::High
        }
    }
}

/// Which uncertainty source dominated the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UncertaintySource {
    Classification,
    GraphStructure,
    PowerAsymmetry,
}

/// Distributional risk estimate from repeated perturbed re-scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskSimulation {
    pub mean: f64,
    pub median: f64,
    pub std: f64,
    /// Percentiles 2.5 and 97.5.
    pub ci_95: [f64; 2],
    /// Percentiles 10 and 90.
    pub ci_80: [f64; 2],
    /// 5th percentile.
    pub best_case: f64,
    /// 95th percentile.
    pub worst_case: f64,
    pub volatility: Volatility,
    pub volatility_explanation: String,
    /// Eleven bin edges over `[0, 100]`.
    pub histogram_bins: Vec<f64>,
    /// Ten counts; sums to `n_trials`.
    pub histogram_counts: Vec<u32>,
    pub n_trials: usize,
    pub dominant_uncertainty_source: UncertaintySource,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volatility_thresholds() {
        assert_eq!(Volatility::from_ci_width(10.0), Volatility::Low);
        assert_eq!(Volatility::from_ci_width(15.0), Volatility::Medium);
        assert_eq!(Volatility::from_ci_width(30.0), Volatility::High);
    }

    #[test]
    fn uncertainty_source_names() {
        let json = serde_json::to_string(&UncertaintySource::GraphStructure).unwrap();
        assert_eq!(json, "\"graph_structure\"");
    }
}
