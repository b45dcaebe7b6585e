//! Risk scoring pipeline.
//!
//! Pipeline: Validation → Encoding → Inference → Tiering → Ranking → Report

mod encoder;
mod predictor;
mod ranker;
mod tier;

pub use encoder::*;
pub use predictor::*;
pub use ranker::*;
pub use tier::*;

use thiserror::Error;

use crate::artifacts::{
    load_artifact, ArtifactResult, ClassifierArtifact, EncoderArtifact, LoadedArtifact,
};
use crate::config::EngineConfig;
use crate::export::Report;
use crate::models::{
    ContributionEntry, FeatureSchema, PatientForm, PatientInput, PredictionResult,
    ValidationError,
};

/// Per-request model errors. These indicate a broken deployment, not bad input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("encoded vector has {actual} values but the model has {expected} coefficients")]
    DimensionMismatch { expected: usize, actual: usize },
}

pub type ModelResult<T> = Result<T, ModelError>;

/// Errors from a full assessment.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("model error: {0}")]
    Model(#[from] ModelError),
}

pub type PipelineResult<T> = Result<T, PipelineError>;

/// SHA-256 of the artifacts an engine was built from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArtifactFingerprints {
    pub encoder: Option<String>,
    pub classifier: Option<String>,
}

/// Model output plus its explanation, before report assembly.
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    pub prediction: PredictionResult,
    /// All contributions, highest first
    pub contributions: Vec<ContributionEntry>,
}

/// Loaded, read-only model state. Build once, share by reference.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskEngine {
    encoder: FeatureEncoder,
    predictor: RiskPredictor,
    fingerprints: ArtifactFingerprints,
}

impl RiskEngine {
    /// Load both artifacts named by `config` and cross-check them.
    pub fn load(config: &EngineConfig) -> ArtifactResult<Self> {
        let encoder: LoadedArtifact<EncoderArtifact> =
            load_artifact("encoder", config.encoder_path(), config.encoder_sha256())?;
        let classifier: LoadedArtifact<ClassifierArtifact> =
            load_artifact("classifier", config.classifier_path(), config.classifier_sha256())?;

        let mut engine = Self::from_artifacts(&encoder.artifact, &classifier.artifact)?;
        engine.fingerprints = ArtifactFingerprints {
            encoder: Some(encoder.fingerprint),
            classifier: Some(classifier.fingerprint),
        };

        tracing::info!(
            "Loaded stroke model: {} features, encoder {}, classifier {}",
            engine.schema().len(),
            engine.fingerprints.encoder.as_deref().unwrap_or("-"),
            engine.fingerprints.classifier.as_deref().unwrap_or("-"),
        );

        Ok(engine)
    }

    /// Build from artifacts already in memory (fixtures, embedded models).
    pub fn from_artifacts(
        encoder: &EncoderArtifact,
        classifier: &ClassifierArtifact,
    ) -> ArtifactResult<Self> {
        let encoder = FeatureEncoder::from_artifact(encoder)?;
        let predictor = RiskPredictor::from_artifact(classifier, encoder.schema())?;

        Ok(Self {
            encoder,
            predictor,
            fingerprints: ArtifactFingerprints::default(),
        })
    }

    pub fn schema(&self) -> &FeatureSchema {
        self.encoder.schema()
    }

    pub fn encoder(&self) -> &FeatureEncoder {
        &self.encoder
    }

    pub fn predictor(&self) -> &RiskPredictor {
        &self.predictor
    }

    pub fn fingerprints(&self) -> &ArtifactFingerprints {
        &self.fingerprints
    }

    /// Encode, predict, tier and rank one patient.
    pub fn evaluate(&self, input: &PatientInput) -> ModelResult<Assessment> {
        let vector = self.encoder.encode(input);
        let probability = self.predictor.predict(&vector)?;
        let tier = classify(probability);
        let contributions = rank(&vector, self.predictor.coefficients())?;

        tracing::debug!("Assessment complete: probability={:.4}, tier={}", probability, tier);

        Ok(Assessment {
            prediction: PredictionResult { probability, tier },
            contributions,
        })
    }

    /// Run the full pipeline for a validated patient.
    pub fn assess(&self, input: &PatientInput) -> PipelineResult<Report> {
        let assessment = self.evaluate(input).map_err(|e| {
            tracing::error!("Assessment aborted: {}", e);
            e
        })?;

        Ok(Report::build(
            input.name(),
            assessment.prediction.probability,
            assessment.prediction.tier,
            &assessment.contributions,
        ))
    }

    /// Validate raw form input, then run the pipeline.
    ///
    /// Validation failures return before any stage runs.
    pub fn assess_form(&self, name: &str, form: &PatientForm) -> PipelineResult<Report> {
        let input = PatientInput::from_form(name, form)?;
        self.assess(&input)
    }
}
