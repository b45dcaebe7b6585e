//! Engine configuration.
//!
//! Resolved once at process startup by the host (CLI, mobile shell) and
//! passed into [`crate::RiskEngine::load`]. Nothing in this crate reads
//! environment variables.

use std::path::{Path, PathBuf};

use crate::artifacts::{normalize_digest, ArtifactResult, ConfigurationError};

/// Where the trained artifacts live and what they must hash to.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    encoder_path: PathBuf,
    classifier_path: PathBuf,
    encoder_sha256: Option<String>,
    classifier_sha256: Option<String>,
}

impl EngineConfig {
    pub fn new(encoder_path: PathBuf, classifier_path: PathBuf) -> ArtifactResult<Self> {
        if encoder_path.as_os_str().is_empty() {
            return Err(ConfigurationError::InvalidConfig(
                "encoder artifact path cannot be empty".into(),
            ));
        }
        if classifier_path.as_os_str().is_empty() {
            return Err(ConfigurationError::InvalidConfig(
                "classifier artifact path cannot be empty".into(),
            ));
        }

        Ok(Self {
            encoder_path,
            classifier_path,
            encoder_sha256: None,
            classifier_sha256: None,
        })
    }

    /// Require the encoder artifact to hash to `digest`.
    pub fn with_encoder_sha256(mut self, digest: &str) -> ArtifactResult<Self> {
        self.encoder_sha256 = Some(normalize_digest(digest)?);
        Ok(self)
    }

    /// Require the classifier artifact to hash to `digest`.
    pub fn with_classifier_sha256(mut self, digest: &str) -> ArtifactResult<Self> {
        self.classifier_sha256 = Some(normalize_digest(digest)?);
        Ok(self)
    }

    pub fn encoder_path(&self) -> &Path {
        &self.encoder_path
    }

    pub fn classifier_path(&self) -> &Path {
        &self.classifier_path
    }

    pub fn encoder_sha256(&self) -> Option<&str> {
        self.encoder_sha256.as_deref()
    }

    pub fn classifier_sha256(&self) -> Option<&str> {
        self.classifier_sha256.as_deref()
    }
}
