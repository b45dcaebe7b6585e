//! Linear contribution ranking.
//!
//! Each encoded column contributes `value × coefficient` to the log-odds.
//! Entries are sorted by contribution, highest first; the sort is stable so
//! equal contributions keep schema order.

use crate::models::{ContributionEntry, EncodedVector};

use super::{ModelError, ModelResult};

/// Maximum entries considered for each factor list.
pub const MAX_FACTORS: usize = 10;

/// Technical feature name → report label.
const FEATURE_LABELS: &[(&str, &str)] = &[
    ("num__age", "Age"),
    ("num__avg_glucose_level", "Average Glucose Level"),
    ("num__bmi", "Body Mass Index (BMI)"),
    ("num__hypertension", "Hypertension"),
    ("num__heart_disease", "Heart Disease"),
    ("cat__gender_Male", "Gender: Male"),
    ("cat__gender_Female", "Gender: Female"),
    ("cat__ever_married_Yes", "Married"),
    ("cat__ever_married_No", "Not Married"),
    ("cat__Residence_type_Urban", "Urban Resident"),
    ("cat__Residence_type_Rural", "Rural Resident"),
    ("cat__smoking_status_smokes", "Smoker"),
    ("cat__smoking_status_never smoked", "Never Smoked"),
    ("cat__smoking_status_formerly smoked", "Former Smoker"),
    ("cat__work_type_Private", "Private Job"),
    ("cat__work_type_Self-employed", "Self Employed"),
    ("cat__work_type_Govt_job", "Government Job"),
    ("cat__work_type_children", "Child"),
    ("cat__work_type_Never_worked", "Never Worked"),
    ("cat__heart_disease_0", "No Heart Disease"),
    ("cat__hypertension_0", "No Hypertension"),
];

/// Report label for a technical feature name, if one is defined.
pub fn display_label(name: &str) -> Option<&'static str> {
    FEATURE_LABELS
        .iter()
        .find(|(technical, _)| *technical == name)
        .map(|(_, label)| *label)
}

/// Report label, falling back to the technical name.
pub fn label_for(name: &str) -> String {
    display_label(name).unwrap_or(name).to_string()
}

/// Compute and sort per-feature contributions.
pub fn rank(
    vector: &EncodedVector<'_>,
    coefficients: &[f64],
) -> ModelResult<Vec<ContributionEntry>> {
    if vector.len() != coefficients.len() {
        return Err(ModelError::DimensionMismatch {
            expected: coefficients.len(),
            actual: vector.len(),
        });
    }

    let mut entries: Vec<ContributionEntry> = vector
        .iter()
        .zip(coefficients.iter().copied())
        .enumerate()
        .map(|(index, ((feature, value), coefficient))| ContributionEntry {
            index,
            feature_name: feature.name.clone(),
            label: feature.label.clone(),
            raw_value: value,
            coefficient,
            contribution: value * coefficient,
        })
        .collect();

    // Stable: ties (including 0.0 vs -0.0) keep schema order
    entries.sort_by(|a, b| {
        b.contribution
            .partial_cmp(&a.contribution)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    Ok(entries)
}

/// Head of the ranking, keeping only entries that raise risk.
pub fn risk_increasing_factors(ranked: &[ContributionEntry]) -> Vec<&ContributionEntry> {
    ranked
        .iter()
        .take(MAX_FACTORS)
        .filter(|e| e.increases_risk())
        .collect()
}

/// Tail of the ranking, keeping only entries that lower risk.
///
/// Order is the ranked order of the tail slice, so the most protective
/// factor comes last.
pub fn protective_factors(ranked: &[ContributionEntry]) -> Vec<&ContributionEntry> {
    let start = ranked.len().saturating_sub(MAX_FACTORS);
    ranked[start..].iter().filter(|e| e.is_protective()).collect()
}
