use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_s3::Client as S3Client;
#[cfg(test)]
use mockall::automock;
use std::fmt;
use tracing::debug;

use crate::config::LoaderConfig;

/// Bucket and key of one object named by a storage notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectLocation {
    pub bucket: String,
    pub key: String,
}

impl ObjectLocation {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }
}

impl fmt::Display for ObjectLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s3://{}/{}", self.bucket, self.key)
    }
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn get_object(&self, location: &ObjectLocation) -> Result<Vec<u8>>;
}

#[derive(Clone, Debug)]
pub struct S3ObjectStore {
    inner: S3Client,
}

impl S3ObjectStore {
    pub fn new(inner: S3Client) -> Self {
        Self { inner }
    }

    /// Endpoint overrides usually point at emulators, which need path-style addressing.
    pub fn from_config(sdk_config: &SdkConfig, config: &LoaderConfig) -> Self {
        let mut builder = aws_sdk_s3::config::Builder::from(sdk_config);
        if config.endpoint_url.is_some() {
            builder = builder.force_path_style(true);
        }
        Self::new(S3Client::from_conf(builder.build()))
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn get_object(&self, location: &ObjectLocation) -> Result<Vec<u8>> {
        let resp = self
            .inner
            .get_object()
            .bucket(&location.bucket)
            .key(&location.key)
            .send()
            .await
            .with_context(|| format!("failed to fetch {}", location))?;

        let body = resp
            .body
            .collect()
            .await
            .with_context(|| format!("failed to read body of {}", location))?;
        let bytes = body.into_bytes().to_vec();

        debug!(bucket = %location.bucket, key = %location.key, size = bytes.len(), "Fetched object");
        Ok(bytes)
    }
}
