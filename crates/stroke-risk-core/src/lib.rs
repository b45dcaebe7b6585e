//! Stroke Risk Core Library
//!
//! Screening pipeline that scores stroke risk with a pre-trained linear
//! classifier and explains the score feature by feature.
//!
//! # Architecture
//!
//! ```text
//! Registration → Details form
//!                     │
//!              PatientInput::from_form  (ValidationError stops here)
//!                     │
//!     ┌───────────────▼───────────────┐
//!     │          RiskEngine           │
//!     │  FeatureEncoder  → EncodedVector
//!     │  RiskPredictor   → probability │
//!     │  classify        → RiskTier    │
//!     │  rank            → contributions
//!     └───────────────┬───────────────┘
//!                     │
//!               Report::build
//!                     │
//!              ReportDocument ──► DocumentRenderer (text, PDF)
//! ```
//!
//! # Core Principle
//!
//! **Model state is loaded once and never mutated.** A [`RiskEngine`] is
//! built at startup from two artifacts and passed by reference to every
//! assessment; a bad artifact stops the process before any request.
//!
//! # Modules
//!
//! - [`artifacts`]: Artifact formats, loading and SHA-256 fingerprints
//! - [`config`]: Startup configuration
//! - [`models`]: Domain types (PatientInput, FeatureSchema, RiskTier, etc.)
//! - [`pipeline`]: Encoder, predictor, tiering and contribution ranking
//! - [`export`]: Report assembly and document rendering
//! - [`flow`]: Registration → Details → Results state machine

pub mod artifacts;
pub mod config;
pub mod export;
pub mod flow;
pub mod models;
pub mod pipeline;

// Re-export commonly used types
pub use artifacts::{ClassifierArtifact, ConfigurationError, EncoderArtifact};
pub use config::EngineConfig;
pub use export::{DocumentRenderer, PlainTextRenderer, RenderError, Report, ReportDocument};
pub use flow::{transition, FlowError, FlowEvent, FlowState};
pub use models::{
    ContributionEntry, PatientForm, PatientInput, PredictionResult, RiskTier, ValidationError,
};
pub use pipeline::{Assessment, ModelError, PipelineError, RiskEngine};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::path::PathBuf;
use std::sync::Arc;

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum StrokeRiskError {
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Model error: {0}")]
    ModelError(String),

    #[error("Render error: {0}")]
    RenderError(String),
}

impl From<ConfigurationError> for StrokeRiskError {
    fn from(e: ConfigurationError) -> Self {
        StrokeRiskError::ConfigurationError(e.to_string())
    }
}

impl From<PipelineError> for StrokeRiskError {
    fn from(e: PipelineError) -> Self {
        match e {
            PipelineError::Validation(v) => StrokeRiskError::InvalidInput(v.to_string()),
            PipelineError::Model(m) => StrokeRiskError::ModelError(m.to_string()),
        }
    }
}

impl From<RenderError> for StrokeRiskError {
    fn from(e: RenderError) -> Self {
        StrokeRiskError::RenderError(e.to_string())
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Load the encoder and classifier artifacts.
#[uniffi::export]
pub fn open_engine(
    encoder_path: String,
    classifier_path: String,
) -> Result<Arc<StrokeRiskCore>, StrokeRiskError> {
    let config = EngineConfig::new(PathBuf::from(encoder_path), PathBuf::from(classifier_path))?;
    let engine = RiskEngine::load(&config)?;
    Ok(Arc::new(StrokeRiskCore {
        engine: Arc::new(engine),
    }))
}

/// Build an engine from artifact JSON held in memory (bundled models, tests).
#[uniffi::export]
pub fn open_engine_from_json(
    encoder_json: String,
    classifier_json: String,
) -> Result<Arc<StrokeRiskCore>, StrokeRiskError> {
    let encoder: artifacts::LoadedArtifact<EncoderArtifact> =
        artifacts::parse_artifact("encoder", encoder_json.as_bytes(), None)?;
    let classifier: artifacts::LoadedArtifact<ClassifierArtifact> =
        artifacts::parse_artifact("classifier", classifier_json.as_bytes(), None)?;
    let engine = RiskEngine::from_artifacts(&encoder.artifact, &classifier.artifact)?;
    Ok(Arc::new(StrokeRiskCore {
        engine: Arc::new(engine),
    }))
}

// =========================================================================
// Main API Object
// =========================================================================

/// Read-only engine handle for FFI.
#[derive(uniffi::Object)]
pub struct StrokeRiskCore {
    engine: Arc<RiskEngine>,
}

#[uniffi::export]
impl StrokeRiskCore {
    /// Validate a submission and run the full pipeline.
    pub fn assess(&self, patient: FfiPatient) -> Result<FfiReport, StrokeRiskError> {
        let form: PatientForm = patient.form.into();
        let report = self.engine.assess_form(&patient.name, &form)?;
        Ok(report.into())
    }

    /// Encoded column names in model order.
    pub fn feature_names(&self) -> Vec<String> {
        self.engine
            .schema()
            .names()
            .into_iter()
            .map(String::from)
            .collect()
    }

    /// Report as pretty JSON.
    pub fn assess_json(&self, patient: FfiPatient) -> Result<String, StrokeRiskError> {
        let form: PatientForm = patient.form.into();
        let report = self.engine.assess_form(&patient.name, &form)?;
        report
            .to_json()
            .map_err(|e| StrokeRiskError::RenderError(e.to_string()))
    }

    /// Report as plain text.
    pub fn assess_text(&self, patient: FfiPatient) -> Result<String, StrokeRiskError> {
        let form: PatientForm = patient.form.into();
        let report = self.engine.assess_form(&patient.name, &form)?;
        let bytes = PlainTextRenderer.render(&ReportDocument::from_report(&report))?;
        String::from_utf8(bytes).map_err(|e| StrokeRiskError::RenderError(e.to_string()))
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe details form.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatientForm {
    pub age: i64,
    pub gender: String,
    pub hypertension: i64,
    pub heart_disease: i64,
    pub ever_married: String,
    pub work_type: String,
    pub residence_type: String,
    pub avg_glucose_level: f64,
    pub bmi: f64,
    pub smoking_status: String,
}

impl From<FfiPatientForm> for PatientForm {
    fn from(form: FfiPatientForm) -> Self {
        PatientForm {
            age: form.age,
            gender: form.gender,
            hypertension: form.hypertension,
            heart_disease: form.heart_disease,
            ever_married: form.ever_married,
            work_type: form.work_type,
            residence_type: form.residence_type,
            avg_glucose_level: form.avg_glucose_level,
            bmi: form.bmi,
            smoking_status: form.smoking_status,
        }
    }
}

/// FFI-safe submission: registration name plus details form.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatient {
    pub name: String,
    pub form: FfiPatientForm,
}

/// FFI-safe report.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiReport {
    pub patient_name: String,
    pub probability: f64,
    pub tier: String,
    pub headline: String,
    pub summary_text: String,
    pub risk_increasing_factors: Vec<String>,
    pub protective_factors: Vec<String>,
}

impl From<Report> for FfiReport {
    fn from(report: Report) -> Self {
        Self {
            patient_name: report.patient_name,
            probability: report.probability,
            tier: report.tier.label().to_string(),
            headline: report.tier.headline().to_string(),
            summary_text: report.summary_text,
            risk_increasing_factors: report.risk_increasing_factors,
            protective_factors: report.protective_factors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENCODER_JSON: &str = r#"{
        "feature_names": ["num__age", "cat__gender_Male", "cat__gender_Female"],
        "scaler": {"age": {"mean": 45.0, "scale": 20.0}}
    }"#;
    const CLASSIFIER_JSON: &str = r#"{"coefficients": [1.5, 0.3, -0.3], "intercept": -2.0}"#;

    fn patient(name: &str) -> FfiPatient {
        let form = PatientForm::default();
        FfiPatient {
            name: name.into(),
            form: FfiPatientForm {
                age: form.age,
                gender: form.gender,
                hypertension: form.hypertension,
                heart_disease: form.heart_disease,
                ever_married: form.ever_married,
                work_type: form.work_type,
                residence_type: form.residence_type,
                avg_glucose_level: form.avg_glucose_level,
                bmi: form.bmi,
                smoking_status: form.smoking_status,
            },
        }
    }

    #[test]
    fn test_ffi_assess() {
        let core = open_engine_from_json(ENCODER_JSON.into(), CLASSIFIER_JSON.into()).unwrap();
        assert_eq!(
            core.feature_names(),
            vec!["num__age", "cat__gender_Male", "cat__gender_Female"]
        );

        let report = core.assess(patient("Jane")).unwrap();
        assert_eq!(report.tier, "Low Risk");
        assert_eq!(report.headline, "Low Risk Detected");
        assert_eq!(report.risk_increasing_factors, vec!["Gender: Male"]);
        assert!(report.protective_factors.is_empty());
    }

    #[test]
    fn test_ffi_errors_flattened() {
        let core = open_engine_from_json(ENCODER_JSON.into(), CLASSIFIER_JSON.into()).unwrap();
        let err = core.assess(patient("")).unwrap_err();
        assert!(matches!(err, StrokeRiskError::InvalidInput(_)));

        let bad = open_engine_from_json(
            ENCODER_JSON.into(),
            r#"{"coefficients":[1.0],"intercept":0.0}"#.into(),
        );
        assert!(matches!(bad, Err(StrokeRiskError::ConfigurationError(_))));
    }

    #[test]
    fn test_ffi_text_report() {
        let core = open_engine_from_json(ENCODER_JSON.into(), CLASSIFIER_JSON.into()).unwrap();
        let text = core.assess_text(patient("Jane")).unwrap();
        assert!(text.contains("Patient Name: Jane"));
        assert!(text.contains("Probability: 0.15"));
    }
}
