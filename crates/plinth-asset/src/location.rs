//! Resolved asset locations
//!
//! The outputs of address derivation: where a published asset can be found
//! once the owning environment has uploaded it. Every field is a pure
//! function of the deployment target's identity and the asset fingerprint.

use crate::addressing;

/// Resolved location of a published file asset
///
/// Both URL forms address the same object; legacy consumers read either.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FileAssetLocation {
    /// Bucket holding the object
    pub bucket_name: String,

    /// Key of the object within the bucket
    pub object_key: String,

    /// HTTPS form of the object address
    pub http_url: String,

    /// Storage-native (`s3://`) form of the object address
    pub s3_object_url: String,
}

impl FileAssetLocation {
    /// Compose a location from a bucket/key pair and the target's network
    /// identity
    ///
    /// Builds both URL forms so they are guaranteed to refer to the same
    /// bucket and key.
    #[must_use]
    pub fn compose(
        region: &str,
        url_suffix: &str,
        bucket_name: String,
        object_key: String,
    ) -> Self {
        let http_url = addressing::https_object_url(region, url_suffix, &bucket_name, &object_key);
        let s3_object_url = addressing::s3_object_url(&bucket_name, &object_key);
        Self {
            bucket_name,
            object_key,
            http_url,
            s3_object_url,
        }
    }

    /// Legacy alias for [`FileAssetLocation::http_url`]
    ///
    /// Older consumers read the HTTPS address under this name; the value is
    /// identical, stored once.
    #[inline]
    #[must_use]
    pub fn s3_url(&self) -> &str {
        &self.http_url
    }
}

/// Resolved location of a published container-image asset
///
/// Produced only by environments that own an image registry; child
/// synthesizers never return one.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ImageAssetLocation {
    /// Repository holding the image
    pub repository_name: String,

    /// Fully qualified image URI
    pub image_uri: String,
}
