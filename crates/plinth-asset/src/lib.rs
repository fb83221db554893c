//! Plinth Asset System
//!
//! Asset identity and deterministic storage addressing for deployable units.
//!
//! # Core Concepts
//!
//! - [`Fingerprint`]: content-derived identifier used for addressing and
//!   deduplication
//! - [`FileAssetSource`] / [`ImageAssetSource`]: publication requests
//! - [`FileAssetLocation`] / [`ImageAssetLocation`]: resolved addresses
//! - [`Qualifier`] and the [`addressing`] functions: the bootstrap naming
//!   scheme shared by every synthesizer, so parent and child derivations
//!   always agree byte-for-byte
//!
//! # Example
//!
//! ```rust
//! use plinth_asset::{addressing, Fingerprint, Qualifier};
//!
//! let fingerprint = Fingerprint::new("abc123").unwrap();
//! let bucket = addressing::asset_bucket_name(&Qualifier::default(), "111111111111", "us-east-1");
//! let key = addressing::asset_object_key(&fingerprint);
//!
//! assert_eq!(bucket, "cdk-hnb659fds-assets-111111111111-us-east-1");
//! assert_eq!(key, "assets/abc123.zip");
//! ```

// Core modules
pub mod addressing;
mod fingerprint;
mod location;
mod source;

// Re-exports
pub use addressing::{Qualifier, QualifierError, DEFAULT_QUALIFIER};
pub use fingerprint::{Fingerprint, FingerprintError};
pub use location::{FileAssetLocation, ImageAssetLocation};
pub use source::{FileAssetSource, ImageAssetSource};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
