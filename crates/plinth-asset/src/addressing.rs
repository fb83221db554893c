//! Deterministic storage addressing for published file assets
//!
//! Every synthesizer derives bucket names, object keys, and URLs from these
//! functions, so a parent environment and a child synthesizer nested inside
//! it always agree on where an asset lives. All derivations are pure string
//! functions of the deployment target's identity and the asset fingerprint;
//! no derivation performs a network round trip.
//!
//! Bucket names follow the bootstrap stack's naming scheme
//! (`cdk-<qualifier>-assets-<account>-<region>`) so that assets land in the
//! buckets the bootstrapped environment already provisions.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::fingerprint::Fingerprint;

/// Qualifier used by the default bootstrap stack
pub const DEFAULT_QUALIFIER: &str = "hnb659fds";

/// Suffix appended to every file-asset object key
const OBJECT_KEY_SUFFIX: &str = ".zip";

/// Key prefix under which file assets are stored
const OBJECT_KEY_PREFIX: &str = "assets";

/// Bootstrap-resource naming qualifier
///
/// Distinguishes multiple bootstrap deployments sharing one account/region.
/// An explicit configuration value on the parent handle rather than ambient
/// process state, so address derivation stays a pure function.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Qualifier(String);

impl Qualifier {
    /// Create a qualifier
    ///
    /// # Errors
    /// Returns an error unless the qualifier is non-empty and lowercase
    /// alphanumeric (it is embedded in bucket names, which forbid most
    /// punctuation).
    pub fn new(qualifier: impl Into<String>) -> Result<Self, QualifierError> {
        let qualifier = qualifier.into();
        if qualifier.is_empty() {
            return Err(QualifierError::Empty);
        }
        if let Some(ch) = qualifier
            .chars()
            .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit()))
        {
            return Err(QualifierError::InvalidCharacter { ch });
        }
        Ok(Self(qualifier))
    }

    /// The qualifier as a string slice
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Qualifier {
    fn default() -> Self {
        Self(DEFAULT_QUALIFIER.to_string())
    }
}

impl Display for Qualifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Qualifier {
    type Err = QualifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Qualifier {
    type Error = QualifierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Qualifier> for String {
    fn from(qualifier: Qualifier) -> Self {
        qualifier.0
    }
}

/// Errors from qualifier construction
#[derive(Debug, thiserror::Error)]
pub enum QualifierError {
    /// Qualifier string was empty
    #[error("qualifier must not be empty")]
    Empty,

    /// Qualifier contained a character not allowed in bucket names
    #[error("qualifier must be lowercase alphanumeric, found {ch:?}")]
    InvalidCharacter {
        /// The offending character
        ch: char,
    },
}

/// Name of the bootstrap bucket holding file assets for a deployment target
#[must_use]
pub fn asset_bucket_name(qualifier: &Qualifier, account: &str, region: &str) -> String {
    format!("cdk-{qualifier}-assets-{account}-{region}")
}

/// Object key under which a file asset is stored
///
/// Always `assets/<fingerprint>.zip`.
#[must_use]
pub fn asset_object_key(fingerprint: &Fingerprint) -> String {
    format!("{OBJECT_KEY_PREFIX}/{fingerprint}{OBJECT_KEY_SUFFIX}")
}

/// HTTPS form of an object address
#[must_use]
pub fn https_object_url(region: &str, url_suffix: &str, bucket_name: &str, object_key: &str) -> String {
    format!("https://s3.{region}.{url_suffix}/{bucket_name}/{object_key}")
}

/// Storage-native (`s3://`) form of an object address
#[must_use]
pub fn s3_object_url(bucket_name: &str, object_key: &str) -> String {
    format!("s3://{bucket_name}/{object_key}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn default_qualifier_matches_bootstrap_stack() {
        assert_eq!(Qualifier::default().as_str(), "hnb659fds");
    }

    #[test]
    fn qualifier_rejects_empty() {
        assert!(matches!(Qualifier::new(""), Err(QualifierError::Empty)));
    }

    #[test]
    fn qualifier_rejects_punctuation() {
        assert!(matches!(
            Qualifier::new("my-qualifier"),
            Err(QualifierError::InvalidCharacter { ch: '-' })
        ));
    }

    #[test]
    fn bucket_name_embeds_target_identity() {
        let bucket = asset_bucket_name(&Qualifier::default(), "111111111111", "us-east-1");
        assert_eq!(bucket, "cdk-hnb659fds-assets-111111111111-us-east-1");
    }

    #[test]
    fn bucket_name_honors_custom_qualifier() {
        let qualifier = Qualifier::new("prod7").unwrap();
        let bucket = asset_bucket_name(&qualifier, "222222222222", "eu-west-1");
        assert_eq!(bucket, "cdk-prod7-assets-222222222222-eu-west-1");
    }

    #[test]
    fn object_key_has_fixed_prefix_and_suffix() {
        let fingerprint = Fingerprint::new("abc123").unwrap();
        assert_eq!(asset_object_key(&fingerprint), "assets/abc123.zip");
    }

    #[test]
    fn url_forms_share_bucket_and_key() {
        let https = https_object_url("us-east-1", "amazonaws.com", "bucket", "assets/k.zip");
        let s3 = s3_object_url("bucket", "assets/k.zip");
        assert_eq!(
            https,
            "https://s3.us-east-1.amazonaws.com/bucket/assets/k.zip"
        );
        assert_eq!(s3, "s3://bucket/assets/k.zip");
    }

    proptest! {
        #[test]
        fn prop_object_key_is_deterministic(hash in "[0-9a-f]{1,64}") {
            let fingerprint = Fingerprint::new(hash).unwrap();
            prop_assert_eq!(
                asset_object_key(&fingerprint),
                asset_object_key(&fingerprint)
            );
        }

        #[test]
        fn prop_object_key_embeds_fingerprint(hash in "[0-9a-f]{1,64}") {
            let fingerprint = Fingerprint::new(hash.clone()).unwrap();
            let key = asset_object_key(&fingerprint);
            prop_assert_eq!(key, format!("assets/{hash}.zip"));
        }
    }
}
