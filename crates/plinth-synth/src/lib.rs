//! Plinth Synthesis System
//!
//! Deployable-unit synthesis with delegated asset publication.
//!
//! # Core Concepts
//!
//! - [`DeployableUnit`]: a renderable collection of resource definitions
//! - [`SynthesisSession`]: staging area for one synthesis pass
//! - [`UnitSynthesizer`]: the capability contract every synthesizer
//!   implementation conforms to
//! - [`AssetPublisher`] / [`ParentHandle`]: the seam to the deployment
//!   environment that owns durable storage
//! - [`DelegatingChildSynthesizer`]: synthesizer for units nested inside a
//!   parent unit; publishes through the parent, recomputes deterministic
//!   addresses, and logs every resolved location for the parent to drain
//!
//! # Example
//!
//! ```rust,ignore
//! use plinth_synth::{DelegatingChildSynthesizer, UnitSynthesizer};
//!
//! let mut synthesizer = DelegatingChildSynthesizer::new(parent);
//! synthesizer.bind(child_unit)?;
//! let location = synthesizer.publish_file_asset(&source)?;
//! synthesizer.synthesize(&mut session)?;
//! let locations = synthesizer.file_locations();
//! ```

// Core modules
mod child;
mod error;
mod session;
mod synthesizer;
mod unit;

// Re-exports
pub use child::{DelegatingChildSynthesizer, PublishedLocation};
pub use error::SynthError;
pub use session::SynthesisSession;
pub use synthesizer::{AssetPublisher, ParentHandle, SharedPublisher, UnitSynthesizer};
pub use unit::DeployableUnit;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
