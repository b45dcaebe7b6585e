//! Prediction and explanation models.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Discrete stroke risk tier.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RiskTier {
    #[serde(rename = "Low Risk")]
    Low,
    #[serde(rename = "Medium Risk")]
    Medium,
    #[serde(rename = "High Risk")]
    High,
}

impl RiskTier {
    /// Display label, e.g. "High Risk".
    pub fn label(&self) -> &'static str {
        match self {
            RiskTier::Low => "Low Risk",
            RiskTier::Medium => "Medium Risk",
            RiskTier::High => "High Risk",
        }
    }

    /// Result banner shown above the probability.
    pub fn headline(&self) -> &'static str {
        match self {
            RiskTier::Low => "Low Risk Detected",
            RiskTier::Medium => "Moderate Risk Detected",
            RiskTier::High => "High Risk Detected",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Model output for one patient.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PredictionResult {
    /// Positive-class probability (0.0 - 1.0)
    pub probability: f64,
    pub tier: RiskTier,
}

/// How much one encoded column moved the linear score.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContributionEntry {
    /// Column position in the schema
    pub index: usize,
    /// Technical feature name
    pub feature_name: String,
    /// Display label (technical name when unmapped)
    pub label: String,
    /// Encoded value
    pub raw_value: f64,
    /// Model coefficient at the same position
    pub coefficient: f64,
    /// raw_value × coefficient
    pub contribution: f64,
}

impl ContributionEntry {
    pub fn increases_risk(&self) -> bool {
        self.contribution > 0.0
    }

    pub fn is_protective(&self) -> bool {
        self.contribution < 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_strings() {
        assert_eq!(RiskTier::Low.to_string(), "Low Risk");
        assert_eq!(RiskTier::Medium.headline(), "Moderate Risk Detected");
        assert_eq!(RiskTier::High.label(), "High Risk");
    }

    #[test]
    fn test_tier_json_uses_label() {
        for tier in [RiskTier::Low, RiskTier::Medium, RiskTier::High] {
            let json = serde_json::to_string(&tier).unwrap();
            assert_eq!(json, format!("\"{}\"", tier.label()));
            assert_eq!(serde_json::from_str::<RiskTier>(&json).unwrap(), tier);
        }
    }

    #[test]
    fn test_contribution_sign() {
        let mut entry = ContributionEntry {
            index: 0,
            feature_name: "num__age".into(),
            label: "Age".into(),
            raw_value: 1.5,
            coefficient: 0.4,
            contribution: 0.6,
        };
        assert!(entry.increases_risk());
        assert!(!entry.is_protective());

        entry.contribution = 0.0;
        assert!(!entry.increases_risk());
        assert!(!entry.is_protective());
    }
}
