//! Testing utilities for the Plinth workspace
//!
//! Shared publishers, fixtures, and parent-handle constructors.

#![allow(missing_docs)]

use std::cell::RefCell;
use std::rc::Rc;

use plinth_asset::{
    addressing, FileAssetLocation, FileAssetSource, Fingerprint, ImageAssetLocation,
    ImageAssetSource, Qualifier,
};
use plinth_synth::{AssetPublisher, DeployableUnit, ParentHandle, SynthError};

/// Test account used by the default fixtures
pub const TEST_ACCOUNT: &str = "111111111111";
/// Test region used by the default fixtures
pub const TEST_REGION: &str = "us-east-1";
/// Test URL suffix used by the default fixtures
pub const TEST_URL_SUFFIX: &str = "amazonaws.com";

/// Reference publisher for a bootstrapped environment
///
/// Computes locations through `plinth_asset::addressing`, the same naming
/// module child synthesizers recompute from, and records every request it
/// receives, so tests can assert on delegation counts and forwarded
/// fingerprints.
pub struct EnvironmentPublisher {
    account: String,
    region: String,
    url_suffix: String,
    qualifier: Qualifier,
    pub file_requests: Vec<FileAssetSource>,
    pub image_requests: Vec<ImageAssetSource>,
}

impl EnvironmentPublisher {
    pub fn new(
        account: impl Into<String>,
        region: impl Into<String>,
        url_suffix: impl Into<String>,
        qualifier: Qualifier,
    ) -> Self {
        Self {
            account: account.into(),
            region: region.into(),
            url_suffix: url_suffix.into(),
            qualifier,
            file_requests: Vec::new(),
            image_requests: Vec::new(),
        }
    }
}

impl AssetPublisher for EnvironmentPublisher {
    fn publish_file_asset(
        &mut self,
        source: &FileAssetSource,
    ) -> Result<FileAssetLocation, SynthError> {
        self.file_requests.push(source.clone());
        let bucket_name =
            addressing::asset_bucket_name(&self.qualifier, &self.account, &self.region);
        let object_key = addressing::asset_object_key(&source.source_hash);
        Ok(FileAssetLocation::compose(
            &self.region,
            &self.url_suffix,
            bucket_name,
            object_key,
        ))
    }

    fn publish_image_asset(
        &mut self,
        source: &ImageAssetSource,
    ) -> Result<ImageAssetLocation, SynthError> {
        self.image_requests.push(source.clone());
        Ok(ImageAssetLocation {
            repository_name: format!("cdk-{}-container-assets", self.qualifier),
            image_uri: format!(
                "{}.dkr.ecr.{}.{}/cdk-{}-container-assets:{}",
                self.account, self.region, self.url_suffix, self.qualifier, source.source_hash
            ),
        })
    }
}

/// Publisher that refuses every request
///
/// For exercising delegated-failure paths.
pub struct FailingPublisher;

impl AssetPublisher for FailingPublisher {
    fn publish_file_asset(
        &mut self,
        _source: &FileAssetSource,
    ) -> Result<FileAssetLocation, SynthError> {
        Err(SynthError::Publication("environment unavailable".to_string()))
    }

    fn publish_image_asset(
        &mut self,
        _source: &ImageAssetSource,
    ) -> Result<ImageAssetLocation, SynthError> {
        Err(SynthError::Publication("environment unavailable".to_string()))
    }
}

/// Parent handle over a fresh recording publisher with the default test
/// identity
pub fn recording_parent() -> (ParentHandle, Rc<RefCell<EnvironmentPublisher>>) {
    recording_parent_with(TEST_ACCOUNT, TEST_REGION, Qualifier::default())
}

/// Parent handle over a fresh recording publisher with a custom identity
pub fn recording_parent_with(
    account: &str,
    region: &str,
    qualifier: Qualifier,
) -> (ParentHandle, Rc<RefCell<EnvironmentPublisher>>) {
    let publisher = Rc::new(RefCell::new(EnvironmentPublisher::new(
        account,
        region,
        TEST_URL_SUFFIX,
        qualifier.clone(),
    )));
    let parent = ParentHandle::new(account, region, TEST_URL_SUFFIX, qualifier, publisher.clone());
    (parent, publisher)
}

/// Parent handle whose publisher refuses every request
pub fn failing_parent() -> ParentHandle {
    ParentHandle::new(
        TEST_ACCOUNT,
        TEST_REGION,
        TEST_URL_SUFFIX,
        Qualifier::default(),
        Rc::new(RefCell::new(FailingPublisher)),
    )
}

/// File-asset request from a raw fingerprint string
pub fn file_source(hash: &str) -> FileAssetSource {
    FileAssetSource::new(Fingerprint::new(hash).unwrap())
}

/// Image-asset request from a raw fingerprint string
pub fn image_source(hash: &str) -> ImageAssetSource {
    ImageAssetSource::new(Fingerprint::new(hash).unwrap())
}

/// Deployable unit with a one-resource template body
pub fn sample_unit(name: &str) -> Rc<DeployableUnit> {
    Rc::new(
        DeployableUnit::new(
            name,
            serde_json::json!({
                "Resources": {
                    "Topic": { "Type": "AWS::SNS::Topic" }
                }
            }),
        )
        .unwrap(),
    )
}
