//! SHA-256 fingerprints for artifact files.

use sha2::{Digest, Sha256};

use super::{ArtifactResult, ConfigurationError};

/// Lowercase hex SHA-256 of `bytes`.
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Check that a configured digest is 64 hex characters and lowercase it.
pub fn normalize_digest(digest: &str) -> ArtifactResult<String> {
    let trimmed = digest.trim();
    let decoded = hex::decode(trimmed)
        .map_err(|e| ConfigurationError::InvalidConfig(format!("invalid SHA-256 digest: {}", e)))?;
    if decoded.len() != 32 {
        return Err(ConfigurationError::InvalidConfig(format!(
            "SHA-256 digest must be 32 bytes, got {}",
            decoded.len()
        )));
    }
    Ok(trimmed.to_lowercase())
}

/// Compare an expected digest against the computed fingerprint.
pub fn verify_digest(artifact: &'static str, expected: &str, actual: &str) -> ArtifactResult<()> {
    let expected = normalize_digest(expected)?;
    if expected != actual {
        return Err(ConfigurationError::DigestMismatch {
            artifact,
            expected,
            actual: actual.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_digest() {
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_normalize_digest() {
        let upper = "BA7816BF8F01CFEA414140DE5DAE2223B00361A396177A9CB410FF61F20015AD";
        assert_eq!(normalize_digest(upper).unwrap(), sha256_hex(b"abc"));
        assert!(normalize_digest("abcd").is_err());
        assert!(normalize_digest("not hex").is_err());
    }

    #[test]
    fn test_verify_digest() {
        let actual = sha256_hex(b"abc");
        assert!(verify_digest("encoder", &actual, &actual).is_ok());
        let err = verify_digest("encoder", &sha256_hex(b"abd"), &actual).unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::DigestMismatch {
                artifact: "encoder",
                ..
            }
        ));
    }
}
