//! Deployable units
//!
//! A deployable unit is a renderable collection of resource definitions
//! intended for one deployment target. Units carry their template body as a
//! JSON value; rendering is plain serialization.

use serde_json::Value;

use crate::error::SynthError;

/// A renderable collection of resource definitions (a "stack")
///
/// The unit itself is passive: a synthesizer bound to it decides whether the
/// rendered template becomes a top-level deployable of the assembly or an
/// asset of an owning parent unit.
#[derive(Debug, Clone, PartialEq)]
pub struct DeployableUnit {
    name: String,
    template: Value,
}

impl DeployableUnit {
    /// Create a unit from a name and template body
    ///
    /// # Errors
    /// Returns an error if the name is empty or contains characters that
    /// cannot appear in a template file stem.
    pub fn new(name: impl Into<String>, template: Value) -> Result<Self, SynthError> {
        let name = name.into();
        let valid = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
        if !valid {
            return Err(SynthError::InvalidUnitName(name));
        }
        Ok(Self { name, template })
    }

    /// Unit name, used as the template file stem
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Template body
    #[inline]
    #[must_use]
    pub fn template(&self) -> &Value {
        &self.template
    }

    /// Render the template body to its serialized form
    ///
    /// # Errors
    /// Returns an error if the template body cannot be serialized.
    pub fn render(&self) -> Result<String, SynthError> {
        Ok(serde_json::to_string_pretty(&self.template)?)
    }
}
