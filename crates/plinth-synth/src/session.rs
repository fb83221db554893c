//! Synthesis sessions
//!
//! A session is the staging area for one synthesis pass: templates are
//! emitted into its output directory, and units that deploy independently
//! are registered in its manifest. Emitting and registering are distinct
//! steps. A child unit's template is emitted but never registered, because
//! the child deploys as a file asset of its parent rather than as a
//! top-level deployable of the assembly.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::SynthError;
use crate::unit::DeployableUnit;

/// Manifest format version written to assembly output
const MANIFEST_VERSION: u32 = 1;

/// Staging area for one synthesis pass
#[derive(Debug)]
pub struct SynthesisSession {
    out_dir: PathBuf,
    emitted: Vec<PathBuf>,
    deployables: Vec<String>,
}

impl SynthesisSession {
    /// Create a session writing into `out_dir`
    #[must_use]
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            emitted: Vec::new(),
            deployables: Vec::new(),
        }
    }

    /// Output directory of this session
    #[inline]
    #[must_use]
    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Emit a unit's rendered template into the output directory
    ///
    /// Writes `<name>.template.json`. Emitting does NOT register the unit as
    /// a deployable; callers that want the unit deployed independently must
    /// also call [`SynthesisSession::register_deployable`].
    ///
    /// # Errors
    /// Returns an error if rendering or writing fails.
    pub fn emit_template(&mut self, unit: &DeployableUnit) -> Result<PathBuf, SynthError> {
        let rendered = unit.render()?;
        fs::create_dir_all(&self.out_dir)?;
        let path = self.out_dir.join(format!("{}.template.json", unit.name()));
        fs::write(&path, rendered)?;
        tracing::debug!("emitted template for unit {} at {}", unit.name(), path.display());
        self.emitted.push(path.clone());
        Ok(path)
    }

    /// Register a unit as a top-level deployable of the assembly
    pub fn register_deployable(&mut self, unit: &DeployableUnit) {
        self.deployables.push(unit.name().to_string());
    }

    /// Template files emitted so far, in emission order
    #[inline]
    #[must_use]
    pub fn emitted(&self) -> &[PathBuf] {
        &self.emitted
    }

    /// Units registered as top-level deployables, in registration order
    #[inline]
    #[must_use]
    pub fn deployables(&self) -> &[String] {
        &self.deployables
    }

    /// Write the assembly manifest listing registered deployables
    ///
    /// # Errors
    /// Returns an error if the manifest cannot be serialized or written.
    pub fn write_manifest(&self) -> Result<PathBuf, SynthError> {
        let manifest = AssemblyManifest {
            version: MANIFEST_VERSION,
            deployables: &self.deployables,
        };
        fs::create_dir_all(&self.out_dir)?;
        let path = self.out_dir.join("manifest.json");
        fs::write(&path, serde_json::to_string_pretty(&manifest)?)?;
        Ok(path)
    }
}

/// Serialized form of the assembly manifest
#[derive(Debug, serde::Serialize)]
struct AssemblyManifest<'a> {
    version: u32,
    deployables: &'a [String],
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn unit(name: &str) -> DeployableUnit {
        DeployableUnit::new(name, json!({"Resources": {}})).unwrap()
    }

    #[test]
    fn emit_writes_template_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = SynthesisSession::new(dir.path());
        let path = session.emit_template(&unit("MyStack")).unwrap();

        assert_eq!(path, dir.path().join("MyStack.template.json"));
        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("Resources"));
    }

    #[test]
    fn emit_does_not_register() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = SynthesisSession::new(dir.path());
        session.emit_template(&unit("Child")).unwrap();

        assert_eq!(session.emitted().len(), 1);
        assert!(session.deployables().is_empty());
    }

    #[test]
    fn register_records_unit_name() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = SynthesisSession::new(dir.path());
        let parent = unit("Parent");
        session.emit_template(&parent).unwrap();
        session.register_deployable(&parent);

        assert_eq!(session.deployables(), ["Parent".to_string()]);
    }

    #[test]
    fn manifest_lists_only_registered_units() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = SynthesisSession::new(dir.path());
        let parent = unit("Parent");
        let child = unit("Child");
        session.emit_template(&parent).unwrap();
        session.register_deployable(&parent);
        session.emit_template(&child).unwrap();

        let path = session.write_manifest().unwrap();
        let manifest: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(manifest["deployables"], json!(["Parent"]));
    }
}
