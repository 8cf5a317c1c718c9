use crate::core::client::error::ProviderError;
use crate::core::client::storage::{StorageClient, StorageError};
use crate::types::{Acl, BucketSummary, Location, ObjectSummary};
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{BucketCannedAcl, BucketLocationConstraint, CreateBucketConfiguration};
use aws_sdk_s3::Client;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct AWSS3 {
    pub(crate) client: Arc<Client>,
}

impl AWSS3 {
    /// Creates a new instance of AWSS3 with the provided AWS configuration.
    /// # Arguments
    /// * `aws_config` - The AWS configuration.
    /// * `force_path_style` - Address buckets as `endpoint/bucket`, needed behind a custom endpoint (LocalStack).
    ///
    /// # Returns
    /// * `Self` - The new instance of AWSS3.
    pub fn new(aws_config: &SdkConfig, force_path_style: bool) -> Self {
        let s3_config = aws_sdk_s3::config::Builder::from(aws_config).force_path_style(force_path_style).build();
        Self { client: Arc::new(Client::from_conf(s3_config)) }
    }

    pub fn client(&self) -> &Client {
        self.client.as_ref()
    }
}

#[async_trait]
impl StorageClient for AWSS3 {
    async fn create_bucket(&self, bucket: &str, acl: Acl, location: Location) -> Result<Option<String>, StorageError> {
        let mut request = self.client.create_bucket().bucket(bucket).acl(BucketCannedAcl::from(acl.as_ref()));

        if location.needs_location_constraint() {
            let configuration = CreateBucketConfiguration::builder()
                .location_constraint(BucketLocationConstraint::from(location.region()))
                .build();
            request = request.create_bucket_configuration(configuration);
        }

        let output = request.send().await.map_err(|e| ProviderError::from_sdk("CreateBucket", e))?;
        Ok(output.location().map(str::to_string))
    }

    async fn delete_bucket(&self, bucket: &str) -> Result<(), StorageError> {
        self.client.delete_bucket().bucket(bucket).send().await.map_err(|e| ProviderError::from_sdk("DeleteBucket", e))?;
        Ok(())
    }

    async fn list_buckets(&self) -> Result<Vec<BucketSummary>, StorageError> {
        let output = self.client.list_buckets().send().await.map_err(|e| ProviderError::from_sdk("ListBuckets", e))?;

        Ok(output
            .buckets()
            .iter()
            .filter_map(|bucket| {
                bucket.name().map(|name| BucketSummary {
                    name: name.to_string(),
                    created_at: bucket
                        .creation_date()
                        .and_then(|d| DateTime::<Utc>::from_timestamp(d.secs(), d.subsec_nanos())),
                })
            })
            .collect())
    }

    async fn put_object(&self, bucket: &str, key: &str, data: Bytes) -> Result<(), StorageError> {
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(data))
            .send()
            .await
            .map_err(|e| ProviderError::from_sdk("PutObject", e))?;
        Ok(())
    }

    async fn get_object(&self, bucket: &str, key: &str) -> Result<Bytes, StorageError> {
        let output = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| ProviderError::from_sdk("GetObject", e))?;

        let data = output.body.collect().await.map_err(|e| StorageError::ObjectStreamError(e.to_string()))?;

        Ok(data.into_bytes())
    }

    async fn list_objects(&self, bucket: &str) -> Result<Vec<ObjectSummary>, StorageError> {
        let output = self
            .client
            .list_objects_v2()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| ProviderError::from_sdk("ListObjectsV2", e))?;

        Ok(output
            .contents()
            .iter()
            .filter_map(|object| {
                object.key().map(|key| ObjectSummary {
                    key: key.to_string(),
                    size: object.size(),
                    e_tag: object.e_tag().map(str::to_string),
                })
            })
            .collect())
    }
}
