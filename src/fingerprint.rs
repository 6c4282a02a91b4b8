//! Content Fingerprint Module
//!
//! Derives a stable identity key from raw image bytes. The fingerprint is
//! used purely as a cache key, not as a security credential.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{AnalysisError, Result};

/// Length of the hex-encoded SHA-256 digest.
pub const FINGERPRINT_LEN: usize = 64;

// == Fingerprint ==
/// Lowercase hex SHA-256 digest of an image's complete byte content.
///
/// Identical byte sequences always produce the same fingerprint; any byte
/// difference yields a different one with overwhelming probability.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    // == Of Bytes ==
    /// Computes the fingerprint of a byte buffer.
    ///
    /// The whole buffer is digested as one unit (uploads are small images,
    /// no streaming needed). Infallible; the empty input produces the
    /// well-known empty-input SHA-256 digest.
    pub fn of_bytes(bytes: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        Self(format!("{:x}", hasher.finalize()))
    }

    // == From Hex ==
    /// Parses a fingerprint from its hex representation.
    ///
    /// Used for path parameters on the lookup endpoint. Rejects anything
    /// that is not exactly 64 lowercase hex characters.
    pub fn from_hex(s: &str) -> Result<Self> {
        let valid = s.len() == FINGERPRINT_LEN
            && s.chars()
                .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase());
        if !valid {
            return Err(AnalysisError::InvalidRequest(format!(
                "Invalid fingerprint: expected {} lowercase hex characters",
                FINGERPRINT_LEN
            )));
        }
        Ok(Self(s.to_string()))
    }

    /// Returns the hex digest as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_deterministic() {
        let a = Fingerprint::of_bytes(b"pizza slice");
        let b = Fingerprint::of_bytes(b"pizza slice");
        assert_eq!(a, b);
    }

    #[test]
    fn test_fingerprint_distinct_inputs() {
        let a = Fingerprint::of_bytes(b"pizza slice");
        let b = Fingerprint::of_bytes(b"pizza slicf");
        assert_ne!(a, b);
    }

    #[test]
    fn test_fingerprint_empty_input_is_stable() {
        // SHA-256 of the empty byte sequence is a fixed constant
        let a = Fingerprint::of_bytes(b"");
        let b = Fingerprint::of_bytes(&[]);
        assert_eq!(a, b);
        assert_eq!(
            a.as_str(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_fingerprint_is_lowercase_hex() {
        let fp = Fingerprint::of_bytes(b"banana");
        assert_eq!(fp.as_str().len(), FINGERPRINT_LEN);
        assert!(fp
            .as_str()
            .chars()
            .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_from_hex_roundtrip() {
        let fp = Fingerprint::of_bytes(b"salad");
        let parsed = Fingerprint::from_hex(fp.as_str()).unwrap();
        assert_eq!(fp, parsed);
    }

    #[test]
    fn test_from_hex_rejects_wrong_length() {
        assert!(Fingerprint::from_hex("abc123").is_err());
    }

    #[test]
    fn test_from_hex_rejects_non_hex() {
        let bad = "z".repeat(FINGERPRINT_LEN);
        assert!(Fingerprint::from_hex(&bad).is_err());
    }

    #[test]
    fn test_from_hex_rejects_uppercase() {
        let upper = Fingerprint::of_bytes(b"soup").as_str().to_uppercase();
        assert!(Fingerprint::from_hex(&upper).is_err());
    }
}
