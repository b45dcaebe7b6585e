//! Serialized layouts of the encoder and classifier artifacts.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{ArtifactResult, ConfigurationError};

/// Fitted feature encoder.
///
/// ```json
/// {
///   "feature_names": ["num__age", "cat__gender_Male", ...],
///   "scaler": { "age": { "mean": 43.2, "scale": 22.6 }, ... }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EncoderArtifact {
    /// Output columns in model order
    pub feature_names: Vec<String>,
    /// Standardization parameters keyed by input column
    #[serde(default)]
    pub scaler: BTreeMap<String, ScalerParams>,
}

/// Standardization parameters for one numeric column.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ScalerParams {
    pub mean: f64,
    pub scale: f64,
}

impl ScalerParams {
    pub fn validate(&self, name: &str) -> ArtifactResult<()> {
        if !self.mean.is_finite() {
            return Err(invalid(name, "mean is not finite"));
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(invalid(name, "scale must be finite and positive"));
        }
        Ok(())
    }
}

/// Fitted binary linear classifier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClassifierArtifact {
    /// One weight per encoded column
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    /// Column names the classifier was fit on, when the training job recorded them
    #[serde(default)]
    pub feature_names: Option<Vec<String>>,
}

impl ClassifierArtifact {
    pub fn validate(&self) -> ArtifactResult<()> {
        if !self.intercept.is_finite() {
            return Err(invalid("intercept", "not finite"));
        }
        if let Some(index) = self.coefficients.iter().position(|c| !c.is_finite()) {
            return Err(invalid(&format!("coefficient {}", index), "not finite"));
        }
        Ok(())
    }
}

fn invalid(name: &str, reason: &str) -> ConfigurationError {
    ConfigurationError::InvalidParameter {
        name: name.to_string(),
        reason: reason.to_string(),
    }
}
