//! Content fingerprints for asset addressing
//!
//! Provides [`Fingerprint`], the content-derived identifier used to address
//! published assets deterministically and to deduplicate uploads upstream.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use sha2::{Digest, Sha256};

/// Content-derived asset identifier (lowercase hex)
///
/// A fingerprint is the sole input to object-key derivation, so two assets
/// with equal content always resolve to the same storage address.
///
/// The string is validated on construction: non-empty, lowercase hex digits
/// only. Fingerprints of any length are accepted because callers may supply
/// hashes computed by external packaging steps.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Create a fingerprint from a precomputed hash string
    ///
    /// # Errors
    /// Returns an error if the string is empty or contains characters
    /// outside `[0-9a-f]`.
    pub fn new(hash: impl Into<String>) -> Result<Self, FingerprintError> {
        let hash = hash.into();
        if hash.is_empty() {
            return Err(FingerprintError::Empty);
        }
        if let Some(ch) = hash
            .chars()
            .find(|c| !(c.is_ascii_digit() || ('a'..='f').contains(c)))
        {
            return Err(FingerprintError::InvalidCharacter { ch });
        }
        Ok(Self(hash))
    }

    /// Compute the SHA-256 fingerprint of arbitrary content
    #[must_use]
    pub fn of_bytes(data: &[u8]) -> Self {
        let digest = Sha256::digest(data);
        Self(hex::encode(digest))
    }

    /// The fingerprint as a string slice
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Fingerprint {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Fingerprint {
    type Err = FingerprintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Fingerprint {
    type Error = FingerprintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Fingerprint> for String {
    fn from(fingerprint: Fingerprint) -> Self {
        fingerprint.0
    }
}

impl AsRef<str> for Fingerprint {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Errors from fingerprint construction
#[derive(Debug, thiserror::Error)]
pub enum FingerprintError {
    /// Fingerprint string was empty
    #[error("fingerprint must not be empty")]
    Empty,

    /// Fingerprint contained a non-hex character
    #[error("fingerprint must be lowercase hex, found {ch:?}")]
    InvalidCharacter {
        /// The offending character
        ch: char,
    },
}
