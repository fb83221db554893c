//! Asset publication requests
//!
//! The inputs a synthesizer receives while a unit's template is rendered:
//! one request per referenced asset, carrying the content fingerprint used
//! for addressing and upstream deduplication.

use crate::fingerprint::Fingerprint;

/// Request to publish a file-based asset
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FileAssetSource {
    /// Content fingerprint, the sole input to address derivation
    pub source_hash: Fingerprint,

    /// Path of the packaged file on disk, if already staged
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

impl FileAssetSource {
    /// Create a request from a content fingerprint
    #[must_use]
    pub fn new(source_hash: Fingerprint) -> Self {
        Self {
            source_hash,
            file_name: None,
        }
    }

    /// Attach the staged file path
    #[must_use]
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }
}

/// Request to publish a container-image asset
///
/// Carried for contract completeness: child synthesizers reject these
/// unconditionally, but the capability contract must be able to express the
/// request so a unit wired to any synthesizer implementation type-checks.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ImageAssetSource {
    /// Content fingerprint of the image build context
    pub source_hash: Fingerprint,

    /// Build directory, if staged locally
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory_name: Option<String>,
}

impl ImageAssetSource {
    /// Create a request from a content fingerprint
    #[must_use]
    pub fn new(source_hash: Fingerprint) -> Self {
        Self {
            source_hash,
            directory_name: None,
        }
    }
}
