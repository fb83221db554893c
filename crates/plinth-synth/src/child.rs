//! Delegating child synthesizer
//!
//! Synthesizer for a deployable unit nested inside a parent unit. The child
//! has no deployment identity of its own: every file asset it references is
//! published through the parent's environment, and its rendered template is
//! emitted without being registered as a top-level deployable, since the
//! surrounding orchestration packages the template itself as a file asset of
//! the parent.
//!
//! The synthesizer recomputes each asset's address from the parent's
//! identity instead of trusting the location the parent returns, so the
//! child's output stays independent of any future change to the parent's own
//! addressing format. It records every resolved (bucket, key) pair in an
//! ordered log the parent drains after synthesis.

use std::rc::Rc;

use plinth_asset::{
    addressing, FileAssetLocation, FileAssetSource, ImageAssetLocation, ImageAssetSource,
};

use crate::error::SynthError;
use crate::session::SynthesisSession;
use crate::synthesizer::{ParentHandle, UnitSynthesizer};
use crate::unit::DeployableUnit;

/// One resolved (bucket, key) pair recorded during synthesis
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PublishedLocation {
    /// Bucket the asset was addressed into
    pub bucket_name: String,

    /// Object key within the bucket
    pub object_key: String,
}

/// Synthesizer that delegates asset publication to a parent unit's
/// environment
///
/// # Lifecycle
/// Constructed with the parent handle fixed; bound to its unit exactly once;
/// accumulates location-log entries during one synthesis pass; discarded
/// after the parent has drained the log. There is no reset. The host
/// framework routes asset references here while the bound unit's template
/// renders, so no address is resolved before binding has occurred.
#[derive(Debug)]
pub struct DelegatingChildSynthesizer {
    parent: Option<ParentHandle>,
    bound: Option<Rc<DeployableUnit>>,
    file_locations: Vec<PublishedLocation>,
}

impl DelegatingChildSynthesizer {
    /// Create a synthesizer delegating to `parent`
    #[must_use]
    pub fn new(parent: ParentHandle) -> Self {
        Self {
            parent: Some(parent),
            bound: None,
            file_locations: Vec::new(),
        }
    }

    /// Create a synthesizer with no parent environment
    ///
    /// Serves units that structurally cannot own assets: every publication
    /// attempt fails with [`SynthError::Unsupported`] and nothing is logged.
    #[must_use]
    pub fn detached() -> Self {
        Self {
            parent: None,
            bound: None,
            file_locations: Vec::new(),
        }
    }

    /// Resolved (bucket, key) pairs, in publication order
    ///
    /// Empty if no file assets were requested. The snapshot grows only
    /// through further [`UnitSynthesizer::publish_file_asset`] calls; no
    /// other party mutates it.
    #[inline]
    #[must_use]
    pub fn file_locations(&self) -> &[PublishedLocation] {
        &self.file_locations
    }

    /// The unit this synthesizer is bound to, if bound
    #[inline]
    #[must_use]
    pub fn bound_unit(&self) -> Option<&DeployableUnit> {
        self.bound.as_deref()
    }
}

impl UnitSynthesizer for DelegatingChildSynthesizer {
    fn bind(&mut self, unit: Rc<DeployableUnit>) -> Result<(), SynthError> {
        if self.bound.is_some() {
            return Err(SynthError::AlreadyBound);
        }
        tracing::debug!("binding child synthesizer to unit {}", unit.name());
        self.bound = Some(unit);
        Ok(())
    }

    fn publish_file_asset(
        &mut self,
        source: &FileAssetSource,
    ) -> Result<FileAssetLocation, SynthError> {
        let Some(parent) = &self.parent else {
            return Err(SynthError::Unsupported(
                "this deployable unit cannot own assets".to_string(),
            ));
        };

        // The parent performs (or schedules) the real upload. Its returned
        // location is discarded; the address is recomputed below from the
        // same naming scheme.
        parent.publish_file_asset(source)?;

        let bucket_name =
            addressing::asset_bucket_name(parent.qualifier(), parent.account(), parent.region());
        let object_key = addressing::asset_object_key(&source.source_hash);
        let location = FileAssetLocation::compose(
            parent.region(),
            parent.url_suffix(),
            bucket_name,
            object_key,
        );

        tracing::debug!(
            "resolved file asset {} to s3://{}/{}",
            source.source_hash,
            location.bucket_name,
            location.object_key
        );
        self.file_locations.push(PublishedLocation {
            bucket_name: location.bucket_name.clone(),
            object_key: location.object_key.clone(),
        });
        Ok(location)
    }

    fn publish_image_asset(
        &mut self,
        _source: &ImageAssetSource,
    ) -> Result<ImageAssetLocation, SynthError> {
        // No meaningful address exists for images here: this synthesizer
        // only models file-object storage.
        Err(SynthError::Unsupported(
            "child units cannot publish container-image assets".to_string(),
        ))
    }

    fn synthesize(&mut self, session: &mut SynthesisSession) -> Result<(), SynthError> {
        let unit = self.bound.as_ref().ok_or(SynthError::NotBound)?;
        // Emit the template without registering it as a deployable: the
        // template itself becomes a file asset of the parent.
        session.emit_template(unit)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plinth_asset::{Fingerprint, Qualifier};
    use std::cell::RefCell;

    // Minimal in-module publisher; richer fixtures live in plinth-test-utils.
    #[derive(Default)]
    struct CountingPublisher {
        file_calls: usize,
    }

    impl crate::synthesizer::AssetPublisher for CountingPublisher {
        fn publish_file_asset(
            &mut self,
            source: &FileAssetSource,
        ) -> Result<FileAssetLocation, SynthError> {
            self.file_calls += 1;
            Ok(FileAssetLocation::compose(
                "us-east-1",
                "amazonaws.com",
                "parent-bucket".to_string(),
                format!("parent/{}.zip", source.source_hash),
            ))
        }

        fn publish_image_asset(
            &mut self,
            _source: &ImageAssetSource,
        ) -> Result<ImageAssetLocation, SynthError> {
            Err(SynthError::Unsupported("no registry".to_string()))
        }
    }

    fn parent_with_counter() -> (ParentHandle, Rc<RefCell<CountingPublisher>>) {
        let publisher = Rc::new(RefCell::new(CountingPublisher::default()));
        let parent = ParentHandle::new(
            "111111111111",
            "us-east-1",
            "amazonaws.com",
            Qualifier::default(),
            publisher.clone(),
        );
        (parent, publisher)
    }

    fn file_source(hash: &str) -> FileAssetSource {
        FileAssetSource::new(Fingerprint::new(hash).unwrap())
    }

    fn child_unit(name: &str) -> Rc<DeployableUnit> {
        Rc::new(DeployableUnit::new(name, serde_json::json!({})).unwrap())
    }

    #[test]
    fn publish_recomputes_address_ignoring_parent_result() {
        let (parent, _) = parent_with_counter();
        let mut synth = DelegatingChildSynthesizer::new(parent);
        synth.bind(child_unit("Child")).unwrap();
        let location = synth.publish_file_asset(&file_source("abc123")).unwrap();

        // The counting publisher returns parent-bucket/parent/..; the child
        // must return the recomputed bootstrap address instead.
        assert_eq!(
            location.bucket_name,
            "cdk-hnb659fds-assets-111111111111-us-east-1"
        );
        assert_eq!(location.object_key, "assets/abc123.zip");
    }

    #[test]
    fn publish_delegates_exactly_once_per_request() {
        let (parent, publisher) = parent_with_counter();
        let mut synth = DelegatingChildSynthesizer::new(parent);
        synth.bind(child_unit("Child")).unwrap();
        synth.publish_file_asset(&file_source("aa")).unwrap();
        synth.publish_file_asset(&file_source("bb")).unwrap();

        assert_eq!(publisher.borrow().file_calls, 2);
    }

    #[test]
    fn log_preserves_request_order() {
        let (parent, _) = parent_with_counter();
        let mut synth = DelegatingChildSynthesizer::new(parent);
        synth.bind(child_unit("Child")).unwrap();
        synth.publish_file_asset(&file_source("aa")).unwrap();
        synth.publish_file_asset(&file_source("bb")).unwrap();

        let keys: Vec<&str> = synth
            .file_locations()
            .iter()
            .map(|l| l.object_key.as_str())
            .collect();
        assert_eq!(keys, ["assets/aa.zip", "assets/bb.zip"]);
    }

    #[test]
    fn detached_synthesizer_rejects_files_and_logs_nothing() {
        let mut synth = DelegatingChildSynthesizer::detached();
        let result = synth.publish_file_asset(&file_source("abc123"));

        assert!(matches!(result, Err(SynthError::Unsupported(_))));
        assert!(synth.file_locations().is_empty());
    }

    #[test]
    fn image_assets_always_rejected() {
        let (parent, _) = parent_with_counter();
        let mut synth = DelegatingChildSynthesizer::new(parent);
        let source = ImageAssetSource::new(Fingerprint::new("abc123").unwrap());

        // Before binding.
        assert!(matches!(
            synth.publish_image_asset(&source),
            Err(SynthError::Unsupported(_))
        ));

        // After binding.
        synth.bind(child_unit("Child")).unwrap();
        assert!(matches!(
            synth.publish_image_asset(&source),
            Err(SynthError::Unsupported(_))
        ));
    }

    #[test]
    fn second_bind_fails_and_keeps_first_unit() {
        let (parent, _) = parent_with_counter();
        let mut synth = DelegatingChildSynthesizer::new(parent);
        synth.bind(child_unit("First")).unwrap();
        let result = synth.bind(child_unit("Second"));

        assert!(matches!(result, Err(SynthError::AlreadyBound)));
        assert_eq!(synth.bound_unit().unwrap().name(), "First");
    }

    #[test]
    fn synthesize_requires_binding() {
        let (parent, _) = parent_with_counter();
        let mut synth = DelegatingChildSynthesizer::new(parent);
        let dir = tempfile::tempdir().unwrap();
        let mut session = SynthesisSession::new(dir.path());

        assert!(matches!(
            synth.synthesize(&mut session),
            Err(SynthError::NotBound)
        ));
    }

    #[test]
    fn delegation_failure_appends_nothing() {
        struct RefusingPublisher;

        impl crate::synthesizer::AssetPublisher for RefusingPublisher {
            fn publish_file_asset(
                &mut self,
                _source: &FileAssetSource,
            ) -> Result<FileAssetLocation, SynthError> {
                Err(SynthError::Publication("bucket unavailable".to_string()))
            }

            fn publish_image_asset(
                &mut self,
                _source: &ImageAssetSource,
            ) -> Result<ImageAssetLocation, SynthError> {
                Err(SynthError::Publication("bucket unavailable".to_string()))
            }
        }

        let parent = ParentHandle::new(
            "111111111111",
            "us-east-1",
            "amazonaws.com",
            Qualifier::default(),
            Rc::new(RefCell::new(RefusingPublisher)),
        );
        let mut synth = DelegatingChildSynthesizer::new(parent);
        synth.bind(child_unit("Child")).unwrap();

        let result = synth.publish_file_asset(&file_source("abc123"));
        assert!(matches!(result, Err(SynthError::Publication(_))));
        assert!(synth.file_locations().is_empty());
    }
}
