//! Feature encoder.
//!
//! Turns a validated patient record into the encoded vector the classifier
//! expects:
//! - Numeric columns are standardized with the fitted mean/scale
//! - Categorical columns become 0/1 indicators, one per fitted category

use std::collections::HashSet;

use crate::artifacts::{ArtifactResult, ConfigurationError, EncoderArtifact};
use crate::models::{
    CategoricalField, EncodedVector, FeatureSchema, FeatureSource, FeatureSpec, NumericField,
    PatientInput, CATEGORICAL_PREFIX, NUMERIC_PREFIX,
};

use super::ranker::label_for;

/// Encoder built from a fitted artifact.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureEncoder {
    schema: FeatureSchema,
}

impl FeatureEncoder {
    /// Build the feature schema from a fitted encoder artifact.
    pub fn from_artifact(artifact: &EncoderArtifact) -> ArtifactResult<Self> {
        if artifact.feature_names.is_empty() {
            return Err(ConfigurationError::EmptySchema);
        }

        let mut seen = HashSet::new();
        let mut features = Vec::with_capacity(artifact.feature_names.len());

        for name in &artifact.feature_names {
            if !seen.insert(name.as_str()) {
                return Err(ConfigurationError::DuplicateFeature(name.clone()));
            }
            features.push(parse_feature(name, artifact)?);
        }

        Ok(Self {
            schema: FeatureSchema::new(features),
        })
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    /// Encode a patient record. Output order is the schema order.
    pub fn encode(&self, input: &PatientInput) -> EncodedVector<'_> {
        let values = self
            .schema
            .iter()
            .map(|feature| encode_one(&feature.source, input))
            .collect();

        EncodedVector::new(&self.schema, values)
    }
}

fn encode_one(source: &FeatureSource, input: &PatientInput) -> f64 {
    match source {
        FeatureSource::Scaled { field, mean, scale } => (input.numeric(*field) - mean) / scale,
        FeatureSource::Indicator { field, category } => {
            if input.category(*field) == category.as_str() {
                1.0
            } else {
                0.0
            }
        }
    }
}

/// Resolve one technical column name against the known input fields.
fn parse_feature(name: &str, artifact: &EncoderArtifact) -> ArtifactResult<FeatureSpec> {
    let source = if let Some(column) = name.strip_prefix(NUMERIC_PREFIX) {
        let field = NumericField::from_column(column)
            .ok_or_else(|| ConfigurationError::UnknownFeature(name.to_string()))?;
        let params = artifact
            .scaler
            .get(column)
            .ok_or_else(|| ConfigurationError::MissingScaler(name.to_string()))?;
        params.validate(name)?;

        FeatureSource::Scaled {
            field,
            mean: params.mean,
            scale: params.scale,
        }
    } else if let Some(suffix) = name.strip_prefix(CATEGORICAL_PREFIX) {
        let (field, category) = CategoricalField::split_indicator(suffix)
            .ok_or_else(|| ConfigurationError::UnknownFeature(name.to_string()))?;

        if !field.known_categories().iter().any(|known| *known == category) {
            tracing::warn!(
                "Feature {} names a category the form never produces; it will always encode to 0",
                name
            );
        }

        FeatureSource::Indicator {
            field,
            category: category.to_string(),
        }
    } else {
        return Err(ConfigurationError::UnknownFeature(name.to_string()));
    };

    Ok(FeatureSpec {
        name: name.to_string(),
        label: label_for(name),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::ScalerParams;
    use crate::models::PatientForm;

    fn artifact(names: &[&str]) -> EncoderArtifact {
        let mut scaler = std::collections::BTreeMap::new();
        scaler.insert("age".to_string(), ScalerParams { mean: 40.0, scale: 20.0 });
        scaler.insert(
            "avg_glucose_level".to_string(),
            ScalerParams {
                mean: 100.0,
                scale: 50.0,
            },
        );
        EncoderArtifact {
            feature_names: names.iter().map(|s| s.to_string()).collect(),
            scaler,
        }
    }

    fn patient(form: PatientForm) -> PatientInput {
        PatientInput::from_form("Test Patient", &form).unwrap()
    }

    #[test]
    fn test_scaling_and_indicators() {
        let encoder = FeatureEncoder::from_artifact(&artifact(&[
            "num__age",
            "num__avg_glucose_level",
            "cat__gender_Female",
            "cat__gender_Male",
            "cat__smoking_status_never smoked",
        ]))
        .unwrap();

        let mut form = PatientForm::default();
        form.age = 60;
        form.avg_glucose_level = 200.0;
        let vector = encoder.encode(&patient(form));

        assert_eq!(vector.values(), &[1.0, 2.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_labels_resolved_once() {
        let encoder =
            FeatureEncoder::from_artifact(&artifact(&["num__age", "cat__gender_Other"])).unwrap();
        let schema = encoder.schema();
        assert_eq!(schema.get(0).unwrap().label, "Age");
        assert_eq!(schema.get(1).unwrap().label, "cat__gender_Other");
    }

    #[test]
    fn test_unreachable_category_encodes_zero() {
        let encoder = FeatureEncoder::from_artifact(&artifact(&["cat__gender_Other"])).unwrap();
        let vector = encoder.encode(&patient(PatientForm::default()));
        assert_eq!(vector.values(), &[0.0]);
    }

    #[test]
    fn test_flag_as_category() {
        let encoder = FeatureEncoder::from_artifact(&artifact(&[
            "cat__hypertension_0",
            "cat__heart_disease_0",
        ]))
        .unwrap();
        let mut form = PatientForm::default();
        form.heart_disease = 1;
        let vector = encoder.encode(&patient(form));
        assert_eq!(vector.values(), &[1.0, 0.0]);
    }

    #[test]
    fn test_missing_scaler() {
        let err = FeatureEncoder::from_artifact(&artifact(&["num__bmi"])).unwrap_err();
        assert!(matches!(err, ConfigurationError::MissingScaler(name) if name == "num__bmi"));
    }

    #[test]
    fn test_unknown_features() {
        for name in ["num__weight", "cat__blood_type_A", "remainder__id", "age"] {
            let err = FeatureEncoder::from_artifact(&artifact(&[name])).unwrap_err();
            assert!(matches!(err, ConfigurationError::UnknownFeature(_)), "{}", name);
        }
    }

    #[test]
    fn test_duplicate_and_empty() {
        let err =
            FeatureEncoder::from_artifact(&artifact(&["num__age", "num__age"])).unwrap_err();
        assert!(matches!(err, ConfigurationError::DuplicateFeature(_)));

        let err = FeatureEncoder::from_artifact(&artifact(&[])).unwrap_err();
        assert!(matches!(err, ConfigurationError::EmptySchema));
    }

    #[test]
    fn test_encode_is_deterministic() {
        let encoder = FeatureEncoder::from_artifact(&artifact(&[
            "num__age",
            "cat__work_type_Private",
        ]))
        .unwrap();
        let input = patient(PatientForm::default());
        assert_eq!(encoder.encode(&input), encoder.encode(&input));
    }
}
