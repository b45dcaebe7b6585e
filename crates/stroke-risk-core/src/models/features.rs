//! Feature schema models.
//!
//! The schema is the ordered list of encoded columns the classifier was
//! trained on. It is built once when the encoder artifact is loaded and every
//! later stage indexes into it by position.

use serde::{Deserialize, Serialize};

/// Prefix the fitted transformer gives scaled numeric columns.
pub const NUMERIC_PREFIX: &str = "num__";

/// Prefix the fitted transformer gives one-hot indicator columns.
pub const CATEGORICAL_PREFIX: &str = "cat__";

/// Input columns that can be standardized.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NumericField {
    Age,
    AvgGlucoseLevel,
    Bmi,
    Hypertension,
    HeartDisease,
}

impl NumericField {
    pub const ALL: [NumericField; 5] = [
        NumericField::Age,
        NumericField::AvgGlucoseLevel,
        NumericField::Bmi,
        NumericField::Hypertension,
        NumericField::HeartDisease,
    ];

    /// Column name in the training frame.
    pub fn column(&self) -> &'static str {
        match self {
            NumericField::Age => "age",
            NumericField::AvgGlucoseLevel => "avg_glucose_level",
            NumericField::Bmi => "bmi",
            NumericField::Hypertension => "hypertension",
            NumericField::HeartDisease => "heart_disease",
        }
    }

    pub fn from_column(column: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.column() == column)
    }
}

/// Input columns that can be one-hot expanded.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CategoricalField {
    Gender,
    Hypertension,
    HeartDisease,
    EverMarried,
    WorkType,
    ResidenceType,
    SmokingStatus,
}

impl CategoricalField {
    pub const ALL: [CategoricalField; 7] = [
        CategoricalField::Gender,
        CategoricalField::Hypertension,
        CategoricalField::HeartDisease,
        CategoricalField::EverMarried,
        CategoricalField::WorkType,
        CategoricalField::ResidenceType,
        CategoricalField::SmokingStatus,
    ];

    /// Column name in the training frame.
    pub fn column(&self) -> &'static str {
        match self {
            CategoricalField::Gender => "gender",
            CategoricalField::Hypertension => "hypertension",
            CategoricalField::HeartDisease => "heart_disease",
            CategoricalField::EverMarried => "ever_married",
            CategoricalField::WorkType => "work_type",
            CategoricalField::ResidenceType => "Residence_type",
            CategoricalField::SmokingStatus => "smoking_status",
        }
    }

    /// Split an indicator suffix such as `work_type_Self-employed` into field and category.
    pub fn split_indicator(suffix: &str) -> Option<(Self, &str)> {
        Self::ALL.into_iter().find_map(|field| {
            suffix
                .strip_prefix(field.column())
                .and_then(|rest| rest.strip_prefix('_'))
                .filter(|category| !category.is_empty())
                .map(|category| (field, category))
        })
    }

    /// Every category the form can produce for this field.
    pub fn known_categories(&self) -> &'static [&'static str] {
        match self {
            CategoricalField::Gender => &["Male", "Female"],
            CategoricalField::Hypertension | CategoricalField::HeartDisease => &["0", "1"],
            CategoricalField::EverMarried => &["Yes", "No"],
            CategoricalField::WorkType => &[
                "Private",
                "Self-employed",
                "Govt_job",
                "children",
                "Never_worked",
            ],
            CategoricalField::ResidenceType => &["Urban", "Rural"],
            CategoricalField::SmokingStatus => &["never smoked", "formerly smoked", "smokes"],
        }
    }
}

/// How a single encoded column is computed from a patient record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum FeatureSource {
    /// `(value - mean) / scale`
    Scaled {
        field: NumericField,
        mean: f64,
        scale: f64,
    },
    /// 1.0 when the field equals `category`, else 0.0
    Indicator {
        field: CategoricalField,
        category: String,
    },
}

/// One encoded column.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeatureSpec {
    /// Technical name, e.g. `cat__smoking_status_smokes`
    pub name: String,
    /// Human-readable label for reports
    pub label: String,
    pub source: FeatureSource,
}

/// Ordered encoded columns.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeatureSchema {
    features: Vec<FeatureSpec>,
}

impl FeatureSchema {
    pub fn new(features: Vec<FeatureSpec>) -> Self {
        Self { features }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&FeatureSpec> {
        self.features.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FeatureSpec> {
        self.features.iter()
    }

    /// Technical names in column order.
    pub fn names(&self) -> Vec<&str> {
        self.features.iter().map(|f| f.name.as_str()).collect()
    }
}

/// A patient record after encoding, one value per schema column.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedVector<'s> {
    schema: &'s FeatureSchema,
    values: Vec<f64>,
}

impl<'s> EncodedVector<'s> {
    /// Pair raw values with a schema.
    ///
    /// The value count is not checked here; the predictor and ranker reject
    /// vectors whose width disagrees with the model.
    pub fn new(schema: &'s FeatureSchema, values: Vec<f64>) -> Self {
        Self { schema, values }
    }

    pub fn schema(&self) -> &'s FeatureSchema {
        self.schema
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// (column, value) pairs in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&'s FeatureSpec, f64)> + '_ {
        self.schema.iter().zip(self.values.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_column_roundtrip() {
        for field in NumericField::ALL {
            assert_eq!(NumericField::from_column(field.column()), Some(field));
        }
        assert_eq!(NumericField::from_column("Residence_type"), None);
    }

    #[test]
    fn test_split_indicator() {
        assert_eq!(
            CategoricalField::split_indicator("work_type_Self-employed"),
            Some((CategoricalField::WorkType, "Self-employed"))
        );
        assert_eq!(
            CategoricalField::split_indicator("smoking_status_never smoked"),
            Some((CategoricalField::SmokingStatus, "never smoked"))
        );
        assert_eq!(
            CategoricalField::split_indicator("heart_disease_0"),
            Some((CategoricalField::HeartDisease, "0"))
        );
        assert_eq!(CategoricalField::split_indicator("gender_"), None);
        assert_eq!(CategoricalField::split_indicator("blood_type_A"), None);
    }

    #[test]
    fn test_vector_pairs_schema_order() {
        let schema = FeatureSchema::new(vec![
            FeatureSpec {
                name: "num__age".into(),
                label: "Age".into(),
                source: FeatureSource::Scaled {
                    field: NumericField::Age,
                    mean: 0.0,
                    scale: 1.0,
                },
            },
            FeatureSpec {
                name: "cat__gender_Male".into(),
                label: "Gender: Male".into(),
                source: FeatureSource::Indicator {
                    field: CategoricalField::Gender,
                    category: "Male".into(),
                },
            },
        ]);
        let vector = EncodedVector::new(&schema, vec![0.5, 1.0]);

        let pairs: Vec<(&str, f64)> = vector.iter().map(|(f, v)| (f.name.as_str(), v)).collect();
        assert_eq!(pairs, vec![("num__age", 0.5), ("cat__gender_Male", 1.0)]);
        assert_eq!(schema.names(), vec!["num__age", "cat__gender_Male"]);
    }
}
