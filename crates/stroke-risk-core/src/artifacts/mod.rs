//! Trained model artifacts.
//!
//! Two JSON documents are produced by the training job: the fitted feature
//! encoder and the fitted classifier. Both are read once at startup; any
//! problem here is fatal and the engine is never built.

mod digest;
mod schema;

pub use digest::*;
pub use schema::*;

use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Startup-time configuration errors.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("failed to read {artifact} artifact {}: {source}", .path.display())]
    Io {
        artifact: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed {artifact} artifact: {source}")]
    Json {
        artifact: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("{artifact} artifact digest mismatch: expected {expected}, found {actual}")]
    DigestMismatch {
        artifact: &'static str,
        expected: String,
        actual: String,
    },

    #[error("encoder declares no features")]
    EmptySchema,

    #[error("unrecognised feature '{0}'")]
    UnknownFeature(String),

    #[error("duplicate feature '{0}'")]
    DuplicateFeature(String),

    #[error("no scaler parameters for numeric feature '{0}'")]
    MissingScaler(String),

    #[error("invalid parameter for '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("classifier has {coefficients} coefficients but encoder produces {features} features")]
    WidthMismatch { coefficients: usize, features: usize },

    #[error("classifier feature {index} is '{classifier}' but encoder produces '{encoder}'")]
    FeatureOrderMismatch {
        index: usize,
        classifier: String,
        encoder: String,
    },
}

pub type ArtifactResult<T> = Result<T, ConfigurationError>;

/// A parsed artifact together with the SHA-256 of the bytes it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedArtifact<T> {
    pub artifact: T,
    pub fingerprint: String,
}

/// Read and parse an artifact file, checking its digest when one is expected.
pub fn load_artifact<T: DeserializeOwned>(
    artifact: &'static str,
    path: &Path,
    expected_sha256: Option<&str>,
) -> ArtifactResult<LoadedArtifact<T>> {
    let bytes = std::fs::read(path).map_err(|source| ConfigurationError::Io {
        artifact,
        path: path.to_path_buf(),
        source,
    })?;
    parse_artifact(artifact, &bytes, expected_sha256)
}

/// Parse artifact bytes already in memory.
pub fn parse_artifact<T: DeserializeOwned>(
    artifact: &'static str,
    bytes: &[u8],
    expected_sha256: Option<&str>,
) -> ArtifactResult<LoadedArtifact<T>> {
    let fingerprint = sha256_hex(bytes);
    if let Some(expected) = expected_sha256 {
        verify_digest(artifact, expected, &fingerprint)?;
    }

    let parsed = serde_json::from_slice(bytes)
        .map_err(|source| ConfigurationError::Json { artifact, source })?;

    Ok(LoadedArtifact {
        artifact: parsed,
        fingerprint,
    })
}
