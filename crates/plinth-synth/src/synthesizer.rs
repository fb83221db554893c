//! Synthesizer capability contract and parent-environment handle
//!
//! [`UnitSynthesizer`] is the contract the host framework expects from every
//! synthesizer implementation; a unit wired to any implementation is
//! indistinguishable from one wired to another. [`AssetPublisher`] is the
//! narrower seam a synthesizer consumes from the deployment environment that
//! actually owns durable storage.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use plinth_asset::{
    FileAssetLocation, FileAssetSource, ImageAssetLocation, ImageAssetSource, Qualifier,
};

use crate::error::SynthError;
use crate::session::SynthesisSession;
use crate::unit::DeployableUnit;

/// Publication capability of a deployment environment
///
/// # Contract
/// Implementations must store (or schedule storage of) the asset and return
/// where it will live. Locations must follow the bootstrap addressing scheme
/// of `plinth_asset::addressing` byte-for-byte: collaborators recompute
/// addresses from the same inputs and assume both derivations agree.
pub trait AssetPublisher {
    /// Publish a file asset
    ///
    /// # Errors
    /// Returns an error if the environment cannot accept the asset.
    fn publish_file_asset(
        &mut self,
        source: &FileAssetSource,
    ) -> Result<FileAssetLocation, SynthError>;

    /// Publish a container-image asset
    ///
    /// # Errors
    /// Returns an error if the environment cannot accept the asset.
    fn publish_image_asset(
        &mut self,
        source: &ImageAssetSource,
    ) -> Result<ImageAssetLocation, SynthError>;
}

/// Shared handle to a publication capability
///
/// Synthesis is a single-threaded pass (no operation suspends), so plain
/// `Rc<RefCell<..>>` sharing is sufficient.
pub type SharedPublisher = Rc<RefCell<dyn AssetPublisher>>;

/// Handle to the parent deployable unit's resolved deployment environment
///
/// Captured once at synthesizer construction and immutable afterwards:
/// resolved account and region identifiers, the network domain suffix used
/// for URL construction, the bootstrap qualifier, and the environment's
/// publication capability.
#[derive(Clone)]
pub struct ParentHandle {
    account: String,
    region: String,
    url_suffix: String,
    qualifier: Qualifier,
    publisher: SharedPublisher,
}

impl ParentHandle {
    /// Capture a parent environment
    #[must_use]
    pub fn new(
        account: impl Into<String>,
        region: impl Into<String>,
        url_suffix: impl Into<String>,
        qualifier: Qualifier,
        publisher: SharedPublisher,
    ) -> Self {
        Self {
            account: account.into(),
            region: region.into(),
            url_suffix: url_suffix.into(),
            qualifier,
            publisher,
        }
    }

    /// Resolved account identifier
    #[inline]
    #[must_use]
    pub fn account(&self) -> &str {
        &self.account
    }

    /// Resolved region identifier
    #[inline]
    #[must_use]
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Network domain suffix for URL construction
    #[inline]
    #[must_use]
    pub fn url_suffix(&self) -> &str {
        &self.url_suffix
    }

    /// Bootstrap-resource qualifier
    #[inline]
    #[must_use]
    pub fn qualifier(&self) -> &Qualifier {
        &self.qualifier
    }

    /// Forward a file-asset request to the environment's publisher
    ///
    /// # Errors
    /// Propagates the publisher's error.
    pub fn publish_file_asset(
        &self,
        source: &FileAssetSource,
    ) -> Result<FileAssetLocation, SynthError> {
        self.publisher.borrow_mut().publish_file_asset(source)
    }
}

impl fmt::Debug for ParentHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParentHandle")
            .field("account", &self.account)
            .field("region", &self.region)
            .field("url_suffix", &self.url_suffix)
            .field("qualifier", &self.qualifier)
            .finish_non_exhaustive()
    }
}

/// Synthesizer capability contract
///
/// The host framework drives every synthesizer through these four
/// operations: attach it to a unit, route asset references produced during
/// rendering, and finally render the unit into a session.
pub trait UnitSynthesizer {
    /// Attach this synthesizer to the unit it will serve
    ///
    /// # Errors
    /// Fails with [`SynthError::AlreadyBound`] on a second call; binding
    /// happens at most once per instance.
    fn bind(&mut self, unit: Rc<DeployableUnit>) -> Result<(), SynthError>;

    /// Publish a file asset referenced by the unit's template
    ///
    /// # Errors
    /// Fails with [`SynthError::Unsupported`] if this synthesizer cannot own
    /// assets.
    fn publish_file_asset(
        &mut self,
        source: &FileAssetSource,
    ) -> Result<FileAssetLocation, SynthError>;

    /// Publish a container-image asset referenced by the unit's template
    ///
    /// # Errors
    /// Fails with [`SynthError::Unsupported`] if this synthesizer cannot own
    /// image assets.
    fn publish_image_asset(
        &mut self,
        source: &ImageAssetSource,
    ) -> Result<ImageAssetLocation, SynthError>;

    /// Render the bound unit into the session
    ///
    /// # Errors
    /// Fails with [`SynthError::NotBound`] before [`UnitSynthesizer::bind`].
    fn synthesize(&mut self, session: &mut SynthesisSession) -> Result<(), SynthError>;
}
