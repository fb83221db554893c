//! Error types for unit synthesis
//!
//! Every variant reports a caller-side invariant violation or an emission
//! failure, synchronously at the violating call. There is no retry policy:
//! transient conditions belong to the delegated publication mechanism, which
//! is an external collaborator.

/// Main synthesis error type
#[derive(Debug, thiserror::Error)]
pub enum SynthError {
    /// Second bind attempt on an already-bound synthesizer
    #[error("a synthesizer can only be bound once; create a new instance to use with a different unit")]
    AlreadyBound,

    /// Synthesis attempted before binding
    #[error("synthesizer is not bound to a unit; call bind() first")]
    NotBound,

    /// Operation the synthesizer structurally cannot support
    #[error("unsupported operation: {0}")]
    Unsupported(String),

    /// Unit name unusable as a template file stem
    #[error("invalid unit name: {0:?}")]
    InvalidUnitName(String),

    /// Delegated publication mechanism failed
    #[error("publication failed: {0}")]
    Publication(String),

    /// Template serialization failed
    #[error("template serialization failed: {0}")]
    Template(#[from] serde_json::Error),

    /// Assembly output could not be written
    #[error("assembly io error: {0}")]
    Io(#[from] std::io::Error),
}

impl SynthError {
    /// Check if the error reports a structural incompatibility
    ///
    /// Structural errors signal a usage mistake by the caller and are never
    /// retryable.
    #[inline]
    #[must_use]
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::AlreadyBound | Self::NotBound | Self::Unsupported(_)
        )
    }
}
