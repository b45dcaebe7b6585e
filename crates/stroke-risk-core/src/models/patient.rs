//! Patient models.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;
use strsim::jaro_winkler;
use thiserror::Error;

use super::{CategoricalField, NumericField};

/// Accepted age range in whole years.
pub const AGE_RANGE: RangeInclusive<u32> = 1..=120;

/// Accepted average glucose level range (mg/dL).
pub const GLUCOSE_RANGE: RangeInclusive<f64> = 50.0..=300.0;

/// Accepted BMI range.
pub const BMI_RANGE: RangeInclusive<f64> = 10.0..=60.0;

/// Minimum similarity for a "did you mean" suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Errors raised while validating form input. These are user-correctable.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Please enter a valid name.")]
    EmptyName,

    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },

    #[error("{field} must be 0 or 1, got {value}")]
    NotAFlag { field: &'static str, value: i64 },

    #[error("unknown {field} '{value}'{}", did_you_mean(.suggestion))]
    UnknownCategory {
        field: &'static str,
        value: String,
        suggestion: Option<&'static str>,
    },
}

fn did_you_mean(suggestion: &Option<&'static str>) -> String {
    match suggestion {
        Some(s) => format!(" (did you mean '{}'?)", s),
        None => String::new(),
    }
}

pub type ValidationResult<T> = Result<T, ValidationError>;

/// A closed set of form choices, spelled the way the trained model saw them.
pub trait Category: Sized + Copy + 'static {
    /// Form field name used in error messages.
    const FIELD: &'static str;
    /// Every choice, in form display order.
    const ALL: &'static [Self];

    fn as_str(&self) -> &'static str;

    /// Parse an exact category string, suggesting the closest choice on failure.
    fn parse(value: &str) -> ValidationResult<Self> {
        if let Some(found) = Self::ALL.iter().find(|c| c.as_str() == value) {
            return Ok(*found);
        }

        let lower = value.trim().to_lowercase();
        let suggestion = Self::ALL
            .iter()
            .map(|c| (c.as_str(), jaro_winkler(&lower, &c.as_str().to_lowercase())))
            .filter(|(_, score)| *score >= SUGGESTION_THRESHOLD)
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(s, _)| s);

        Err(ValidationError::UnknownCategory {
            field: Self::FIELD,
            value: value.to_string(),
            suggestion,
        })
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Gender {
    Male,
    Female,
}

impl Category for Gender {
    const FIELD: &'static str = "gender";
    const ALL: &'static [Self] = &[Gender::Male, Gender::Female];

    fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum EverMarried {
    Yes,
    No,
}

impl Category for EverMarried {
    const FIELD: &'static str = "ever_married";
    const ALL: &'static [Self] = &[EverMarried::Yes, EverMarried::No];

    fn as_str(&self) -> &'static str {
        match self {
            EverMarried::Yes => "Yes",
            EverMarried::No => "No",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum WorkType {
    Private,
    #[serde(rename = "Self-employed")]
    SelfEmployed,
    #[serde(rename = "Govt_job")]
    GovtJob,
    #[serde(rename = "children")]
    Children,
    #[serde(rename = "Never_worked")]
    NeverWorked,
}

impl Category for WorkType {
    const FIELD: &'static str = "work_type";
    const ALL: &'static [Self] = &[
        WorkType::Private,
        WorkType::SelfEmployed,
        WorkType::GovtJob,
        WorkType::Children,
        WorkType::NeverWorked,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            WorkType::Private => "Private",
            WorkType::SelfEmployed => "Self-employed",
            WorkType::GovtJob => "Govt_job",
            WorkType::Children => "children",
            WorkType::NeverWorked => "Never_worked",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ResidenceType {
    Urban,
    Rural,
}

impl Category for ResidenceType {
    const FIELD: &'static str = "residence_type";
    const ALL: &'static [Self] = &[ResidenceType::Urban, ResidenceType::Rural];

    fn as_str(&self) -> &'static str {
        match self {
            ResidenceType::Urban => "Urban",
            ResidenceType::Rural => "Rural",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SmokingStatus {
    #[serde(rename = "never smoked")]
    NeverSmoked,
    #[serde(rename = "formerly smoked")]
    FormerlySmoked,
    #[serde(rename = "smokes")]
    Smokes,
}

impl Category for SmokingStatus {
    const FIELD: &'static str = "smoking_status";
    const ALL: &'static [Self] = &[
        SmokingStatus::NeverSmoked,
        SmokingStatus::FormerlySmoked,
        SmokingStatus::Smokes,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            SmokingStatus::NeverSmoked => "never smoked",
            SmokingStatus::FormerlySmoked => "formerly smoked",
            SmokingStatus::Smokes => "smokes",
        }
    }
}

macro_rules! category_traits {
    ($($ty:ty),*) => {
        $(
            impl FromStr for $ty {
                type Err = ValidationError;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    <$ty as Category>::parse(s)
                }
            }

            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )*
    };
}

category_traits!(Gender, EverMarried, WorkType, ResidenceType, SmokingStatus);

/// Raw health details as entered on the details form, before validation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PatientForm {
    pub age: i64,
    pub gender: String,
    /// 0 = No, 1 = Yes
    pub hypertension: i64,
    /// 0 = No, 1 = Yes
    pub heart_disease: i64,
    pub ever_married: String,
    pub work_type: String,
    pub residence_type: String,
    pub avg_glucose_level: f64,
    pub bmi: f64,
    pub smoking_status: String,
}

impl Default for PatientForm {
    /// The values the details form starts with.
    fn default() -> Self {
        Self {
            age: 45,
            gender: "Male".into(),
            hypertension: 0,
            heart_disease: 0,
            ever_married: "Yes".into(),
            work_type: "Private".into(),
            residence_type: "Urban".into(),
            avg_glucose_level: 120.0,
            bmi: 25.0,
            smoking_status: "never smoked".into(),
        }
    }
}

/// A validated patient record. Only constructible through [`PatientInput::from_form`].
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PatientInput {
    name: String,
    age: u32,
    gender: Gender,
    hypertension: bool,
    heart_disease: bool,
    ever_married: EverMarried,
    work_type: WorkType,
    residence_type: ResidenceType,
    avg_glucose_level: f64,
    bmi: f64,
    smoking_status: SmokingStatus,
}

impl PatientInput {
    /// Validate a patient name and form into a pipeline input.
    ///
    /// The name is kept exactly as entered; it only has to contain
    /// something other than whitespace.
    pub fn from_form(name: &str, form: &PatientForm) -> ValidationResult<Self> {
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }

        let age = check_age(form.age)?;

        Ok(Self {
            name: name.to_string(),
            age,
            gender: form.gender.parse()?,
            hypertension: check_flag("hypertension", form.hypertension)?,
            heart_disease: check_flag("heart_disease", form.heart_disease)?,
            ever_married: form.ever_married.parse()?,
            work_type: form.work_type.parse()?,
            residence_type: form.residence_type.parse()?,
            avg_glucose_level: check_range(
                "avg_glucose_level",
                form.avg_glucose_level,
                GLUCOSE_RANGE,
            )?,
            bmi: check_range("bmi", form.bmi, BMI_RANGE)?,
            smoking_status: form.smoking_status.parse()?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn hypertension(&self) -> bool {
        self.hypertension
    }

    pub fn heart_disease(&self) -> bool {
        self.heart_disease
    }

    pub fn ever_married(&self) -> EverMarried {
        self.ever_married
    }

    pub fn work_type(&self) -> WorkType {
        self.work_type
    }

    pub fn residence_type(&self) -> ResidenceType {
        self.residence_type
    }

    pub fn avg_glucose_level(&self) -> f64 {
        self.avg_glucose_level
    }

    pub fn bmi(&self) -> f64 {
        self.bmi
    }

    pub fn smoking_status(&self) -> SmokingStatus {
        self.smoking_status
    }

    /// Unscaled value of a numeric column. Flags read as 0.0 / 1.0.
    pub fn numeric(&self, field: NumericField) -> f64 {
        match field {
            NumericField::Age => f64::from(self.age),
            NumericField::AvgGlucoseLevel => self.avg_glucose_level,
            NumericField::Bmi => self.bmi,
            NumericField::Hypertension => flag_value(self.hypertension),
            NumericField::HeartDisease => flag_value(self.heart_disease),
        }
    }

    /// Category string of a categorical column. Flags read as "0" / "1".
    pub fn category(&self, field: CategoricalField) -> &'static str {
        match field {
            CategoricalField::Gender => self.gender.as_str(),
            CategoricalField::Hypertension => flag_category(self.hypertension),
            CategoricalField::HeartDisease => flag_category(self.heart_disease),
            CategoricalField::EverMarried => self.ever_married.as_str(),
            CategoricalField::WorkType => self.work_type.as_str(),
            CategoricalField::ResidenceType => self.residence_type.as_str(),
            CategoricalField::SmokingStatus => self.smoking_status.as_str(),
        }
    }
}

fn check_age(age: i64) -> ValidationResult<u32> {
    let in_range = u32::try_from(age)
        .ok()
        .filter(|a| AGE_RANGE.contains(a));

    in_range.ok_or(ValidationError::OutOfRange {
        field: "age",
        min: f64::from(*AGE_RANGE.start()),
        max: f64::from(*AGE_RANGE.end()),
        value: age as f64,
    })
}

fn check_flag(field: &'static str, value: i64) -> ValidationResult<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        _ => Err(ValidationError::NotAFlag { field, value }),
    }
}

fn check_range(
    field: &'static str,
    value: f64,
    range: RangeInclusive<f64>,
) -> ValidationResult<f64> {
    // NaN fails `contains`
    if range.contains(&value) {
        Ok(value)
    } else {
        Err(ValidationError::OutOfRange {
            field,
            min: *range.start(),
            max: *range.end(),
            value,
        })
    }
}

fn flag_value(flag: bool) -> f64 {
    if flag {
        1.0
    } else {
        0.0
    }
}

fn flag_category(flag: bool) -> &'static str {
    if flag {
        "1"
    } else {
        "0"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_form_is_valid() {
        let input = PatientInput::from_form("Jane Doe", &PatientForm::default()).unwrap();
        assert_eq!(input.name(), "Jane Doe");
        assert_eq!(input.age(), 45);
        assert_eq!(input.gender(), Gender::Male);
        assert!(!input.hypertension());
        assert_eq!(input.smoking_status(), SmokingStatus::NeverSmoked);
    }

    #[test]
    fn test_blank_name_rejected() {
        let err = PatientInput::from_form("   ", &PatientForm::default()).unwrap_err();
        assert_eq!(err, ValidationError::EmptyName);
        assert_eq!(err.to_string(), "Please enter a valid name.");
    }

    #[test]
    fn test_name_kept_as_entered() {
        let input = PatientInput::from_form(" Ann ", &PatientForm::default()).unwrap();
        assert_eq!(input.name(), " Ann ");
    }

    #[test]
    fn test_age_bounds() {
        let mut form = PatientForm::default();
        form.age = 1;
        assert!(PatientInput::from_form("a", &form).is_ok());
        form.age = 120;
        assert!(PatientInput::from_form("a", &form).is_ok());
        form.age = 0;
        assert!(matches!(
            PatientInput::from_form("a", &form),
            Err(ValidationError::OutOfRange { field: "age", .. })
        ));
        form.age = -5;
        assert!(PatientInput::from_form("a", &form).is_err());
        form.age = 121;
        assert!(PatientInput::from_form("a", &form).is_err());
    }

    #[test]
    fn test_float_bounds() {
        let mut form = PatientForm::default();
        form.avg_glucose_level = 300.0;
        form.bmi = 10.0;
        assert!(PatientInput::from_form("a", &form).is_ok());

        form.bmi = 60.5;
        let err = PatientInput::from_form("a", &form).unwrap_err();
        assert_eq!(err.to_string(), "bmi must be between 10 and 60, got 60.5");

        form.bmi = f64::NAN;
        assert!(PatientInput::from_form("a", &form).is_err());
    }

    #[test]
    fn test_flags() {
        let mut form = PatientForm::default();
        form.hypertension = 1;
        form.heart_disease = 1;
        let input = PatientInput::from_form("a", &form).unwrap();
        assert_eq!(input.numeric(NumericField::Hypertension), 1.0);
        assert_eq!(input.category(CategoricalField::HeartDisease), "1");

        form.hypertension = 2;
        assert_eq!(
            PatientInput::from_form("a", &form).unwrap_err(),
            ValidationError::NotAFlag {
                field: "hypertension",
                value: 2
            }
        );
    }

    #[test]
    fn test_category_exact_spelling() {
        assert_eq!("Self-employed".parse::<WorkType>().unwrap(), WorkType::SelfEmployed);
        assert_eq!("children".parse::<WorkType>().unwrap(), WorkType::Children);
        assert_eq!(
            "formerly smoked".parse::<SmokingStatus>().unwrap(),
            SmokingStatus::FormerlySmoked
        );
        assert!("male".parse::<Gender>().is_err());
    }

    #[test]
    fn test_category_suggestion() {
        let err = "self employed".parse::<WorkType>().unwrap_err();
        match &err {
            ValidationError::UnknownCategory { suggestion, .. } => {
                assert_eq!(*suggestion, Some("Self-employed"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(err.to_string().contains("did you mean 'Self-employed'"));

        let err = "zzz".parse::<SmokingStatus>().unwrap_err();
        assert_eq!(err.to_string(), "unknown smoking_status 'zzz'");
    }

    #[test]
    fn test_category_serde_spelling() {
        let json = serde_json::to_string(&WorkType::GovtJob).unwrap();
        assert_eq!(json, "\"Govt_job\"");
        let status: SmokingStatus = serde_json::from_str("\"never smoked\"").unwrap();
        assert_eq!(status, SmokingStatus::NeverSmoked);
    }
}
