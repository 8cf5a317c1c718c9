pub mod error;
pub mod s3;

use crate::types::{Acl, BucketSummary, Location, ObjectSummary};
use async_trait::async_trait;
use bytes::Bytes;
pub use error::StorageError;

/// Trait defining object storage operations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StorageClient: Send + Sync {
    /// Create a bucket, returns the provider's location string for it when there is one
    async fn create_bucket(&self, bucket: &str, acl: Acl, location: Location) -> Result<Option<String>, StorageError>;

    /// Delete a bucket, the bucket must be empty
    async fn delete_bucket(&self, bucket: &str) -> Result<(), StorageError>;

    /// List every bucket visible to the credentials
    async fn list_buckets(&self) -> Result<Vec<BucketSummary>, StorageError>;

    async fn put_object(&self, bucket: &str, key: &str, data: Bytes) -> Result<(), StorageError>;

    async fn get_object(&self, bucket: &str, key: &str) -> Result<Bytes, StorageError>;

    /// List the first page of objects in a bucket (up to 1000 keys)
    async fn list_objects(&self, bucket: &str) -> Result<Vec<ObjectSummary>, StorageError>;
}
