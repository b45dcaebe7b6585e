//! Logistic regression inference.

use crate::artifacts::{ArtifactResult, ClassifierArtifact, ConfigurationError};
use crate::models::{EncodedVector, FeatureSchema};

use super::{ModelError, ModelResult};

/// Linear classifier with a logistic link.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskPredictor {
    coefficients: Vec<f64>,
    intercept: f64,
}

impl RiskPredictor {
    /// Build a predictor and check it against the encoder's schema.
    pub fn from_artifact(
        artifact: &ClassifierArtifact,
        schema: &FeatureSchema,
    ) -> ArtifactResult<Self> {
        artifact.validate()?;

        if artifact.coefficients.len() != schema.len() {
            return Err(ConfigurationError::WidthMismatch {
                coefficients: artifact.coefficients.len(),
                features: schema.len(),
            });
        }

        if let Some(names) = &artifact.feature_names {
            if names.len() != schema.len() {
                return Err(ConfigurationError::WidthMismatch {
                    coefficients: names.len(),
                    features: schema.len(),
                });
            }
            for (index, (classifier, encoder)) in names.iter().zip(schema.iter()).enumerate() {
                if *classifier != encoder.name {
                    return Err(ConfigurationError::FeatureOrderMismatch {
                        index,
                        classifier: classifier.clone(),
                        encoder: encoder.name.clone(),
                    });
                }
            }
        }

        Ok(Self {
            coefficients: artifact.coefficients.clone(),
            intercept: artifact.intercept,
        })
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Log-odds of the positive class.
    pub fn decision_function(&self, vector: &EncodedVector<'_>) -> ModelResult<f64> {
        if vector.len() != self.coefficients.len() {
            return Err(ModelError::DimensionMismatch {
                expected: self.coefficients.len(),
                actual: vector.len(),
            });
        }

        let dot: f64 = self
            .coefficients
            .iter()
            .zip(vector.values())
            .map(|(w, x)| w * x)
            .sum();

        Ok(dot + self.intercept)
    }

    /// Probability of the positive class (stroke).
    pub fn predict(&self, vector: &EncodedVector<'_>) -> ModelResult<f64> {
        self.decision_function(vector).map(sigmoid)
    }
}

/// Logistic function, split by sign so `exp` never overflows.
pub fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FeatureSource, FeatureSpec, NumericField};

    fn schema(names: &[&str]) -> FeatureSchema {
        FeatureSchema::new(
            names
                .iter()
                .map(|n| FeatureSpec {
                    name: n.to_string(),
                    label: n.to_string(),
                    source: FeatureSource::Scaled {
                        field: NumericField::Age,
                        mean: 0.0,
                        scale: 1.0,
                    },
                })
                .collect(),
        )
    }

    fn classifier(coefficients: Vec<f64>, intercept: f64) -> ClassifierArtifact {
        ClassifierArtifact {
            coefficients,
            intercept,
            feature_names: None,
        }
    }

    #[test]
    fn test_sigmoid() {
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-12);
        assert!(sigmoid(800.0) <= 1.0);
        assert!(sigmoid(-800.0) >= 0.0);
        assert!((sigmoid(2.0) + sigmoid(-2.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_predict() {
        let schema = schema(&["a", "b"]);
        let predictor = RiskPredictor::from_artifact(&classifier(vec![1.0, -2.0], 0.5), &schema)
            .unwrap();
        let vector = EncodedVector::new(&schema, vec![2.0, 1.0]);

        assert!((predictor.decision_function(&vector).unwrap() - 0.5).abs() < 1e-12);
        assert!((predictor.predict(&vector).unwrap() - sigmoid(0.5)).abs() < 1e-12);
    }

    #[test]
    fn test_width_mismatch_at_load() {
        let schema = schema(&["a", "b", "c"]);
        let err = RiskPredictor::from_artifact(&classifier(vec![1.0, 2.0], 0.0), &schema)
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::WidthMismatch {
                coefficients: 2,
                features: 3
            }
        ));
    }

    #[test]
    fn test_feature_order_mismatch_at_load() {
        let schema = schema(&["a", "b"]);
        let mut artifact = classifier(vec![1.0, 2.0], 0.0);
        artifact.feature_names = Some(vec!["b".into(), "a".into()]);

        let err = RiskPredictor::from_artifact(&artifact, &schema).unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::FeatureOrderMismatch { index: 0, .. }
        ));

        artifact.feature_names = Some(vec!["a".into(), "b".into()]);
        assert!(RiskPredictor::from_artifact(&artifact, &schema).is_ok());
    }

    #[test]
    fn test_dimension_mismatch_per_request() {
        let schema = schema(&["a", "b"]);
        let predictor =
            RiskPredictor::from_artifact(&classifier(vec![1.0, 2.0], 0.0), &schema).unwrap();
        let short = EncodedVector::new(&schema, vec![1.0]);

        assert_eq!(
            predictor.predict(&short),
            Err(ModelError::DimensionMismatch {
                expected: 2,
                actual: 1
            })
        );
    }
}
