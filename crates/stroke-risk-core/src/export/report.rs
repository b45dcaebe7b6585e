//! Patient risk report.

use serde::{Deserialize, Serialize};

use crate::models::{ContributionEntry, RiskTier};
use crate::pipeline::{protective_factors, risk_increasing_factors};

/// Summary shown for Low Risk.
pub const LOW_RISK_SUMMARY: &str =
    "The likelihood of stroke is currently low. Continue healthy lifestyle habits.";

/// Summary shown for Medium Risk.
pub const MEDIUM_RISK_SUMMARY: &str =
    "Moderate stroke risk detected. Medical advice is recommended.";

/// Summary shown for High Risk.
pub const HIGH_RISK_SUMMARY: &str =
    "High stroke risk detected. Immediate medical consultation is advised.";

pub fn summary_for(tier: RiskTier) -> &'static str {
    match tier {
        RiskTier::Low => LOW_RISK_SUMMARY,
        RiskTier::Medium => MEDIUM_RISK_SUMMARY,
        RiskTier::High => HIGH_RISK_SUMMARY,
    }
}

/// Everything a renderer needs for one patient.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Report {
    pub patient_name: String,
    /// Positive-class probability (0.0 - 1.0)
    pub probability: f64,
    pub tier: RiskTier,
    pub summary_text: String,
    /// Labels of the top risk-raising features, strongest first
    pub risk_increasing_factors: Vec<String>,
    /// Labels of the bottom risk-lowering features, strongest last
    pub protective_factors: Vec<String>,
}

impl Report {
    /// Assemble a report from ranked contributions (highest first).
    pub fn build(
        patient_name: &str,
        probability: f64,
        tier: RiskTier,
        ranked: &[ContributionEntry],
    ) -> Self {
        Self {
            patient_name: patient_name.to_string(),
            probability,
            tier,
            summary_text: summary_for(tier).to_string(),
            risk_increasing_factors: risk_increasing_factors(ranked)
                .into_iter()
                .map(|e| e.label.clone())
                .collect(),
            protective_factors: protective_factors(ranked)
                .into_iter()
                .map(|e| e.label.clone())
                .collect(),
        }
    }

    /// Probability as displayed, two decimals.
    pub fn probability_display(&self) -> String {
        format!("{:.2}", self.probability)
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
