use std::path::Path;
use std::sync::Arc;

use bytes::Bytes;
use tracing::instrument;

use crate::core::client::storage::{StorageClient, StorageError};
use crate::types::{Acl, Location, ObjectSummary};

/// A named bucket in object storage.
///
/// The wrapper holds no provider state: creating it does not create the bucket, call [`Bucket::create`].
#[derive(Clone)]
pub struct Bucket {
    client: Arc<dyn StorageClient>,
    name: String,
    acl: Acl,
    location: Location,
}

impl std::fmt::Debug for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bucket").field("name", &self.name).field("acl", &self.acl).field("location", &self.location).finish()
    }
}

impl Bucket {
    pub fn new(client: Arc<dyn StorageClient>, name: impl Into<String>, acl: Acl, location: Location) -> Self {
        Self { client, name: name.into(), acl, location }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn acl(&self) -> Acl {
        self.acl
    }

    pub fn location(&self) -> Location {
        self.location
    }

    /// Create the bucket with the wrapper's ACL and location.
    ///
    /// Returns the provider's location string when it reports one. Creating a bucket that
    /// already exists is an error reported by the provider.
    #[instrument(skip(self), fields(resource = %self.name))]
    pub async fn create(&self) -> Result<Option<String>, StorageError> {
        let location = self.client.create_bucket(&self.name, self.acl, self.location).await.inspect_err(|e| {
            tracing::error!(error = %e, acl = %self.acl, location = %self.location, "Failed to create bucket");
        })?;
        tracing::info!(location = ?location, "Bucket created");
        Ok(location)
    }

    /// Whether a bucket named exactly `name` is visible to the credentials.
    #[instrument(skip(self), fields(resource = %self.name))]
    pub async fn exists(&self, name: &str) -> Result<bool, StorageError> {
        let buckets = self.list_buckets().await?;
        Ok(buckets.iter().any(|bucket| bucket == name))
    }

    /// Names of every bucket visible to the credentials
    #[instrument(skip(self), fields(resource = %self.name))]
    pub async fn list_buckets(&self) -> Result<Vec<String>, StorageError> {
        let buckets = self.client.list_buckets().await.inspect_err(|e| {
            tracing::error!(error = %e, "Failed to list buckets");
        })?;
        Ok(buckets.into_iter().map(|bucket| bucket.name).collect())
    }

    /// Delete the bucket. The provider refuses to delete a bucket that still holds objects.
    #[instrument(skip(self), fields(resource = %self.name))]
    pub async fn delete(&self) -> Result<(), StorageError> {
        self.client.delete_bucket(&self.name).await.inspect_err(|e| {
            tracing::error!(error = %e, "Failed to delete bucket");
        })?;
        tracing::info!("Bucket deleted");
        Ok(())
    }

    /// Upload the file at `local_path` under `key`.
    #[instrument(skip(self, local_path), fields(resource = %self.name, path = %local_path.as_ref().display()))]
    pub async fn upload(&self, key: &str, local_path: impl AsRef<Path>) -> Result<(), StorageError> {
        let path = local_path.as_ref();
        let data = tokio::fs::read(path)
            .await
            .map_err(|source| StorageError::LocalRead { path: path.to_path_buf(), source })
            .inspect_err(|e| tracing::error!(error = %e, "Failed to read file to upload"))?;

        let size = data.len();
        self.client.put_object(&self.name, key, Bytes::from(data)).await.inspect_err(|e| {
            tracing::error!(error = %e, key, "Failed to upload object");
        })?;
        tracing::info!(key, size, "Object uploaded");
        Ok(())
    }

    /// Download `key` into `local_path`, creating missing parent directories.
    #[instrument(skip(self, local_path), fields(resource = %self.name, path = %local_path.as_ref().display()))]
    pub async fn download(&self, key: &str, local_path: impl AsRef<Path>) -> Result<(), StorageError> {
        let path = local_path.as_ref();
        let data = self.client.get_object(&self.name, key).await.inspect_err(|e| {
            tracing::error!(error = %e, key, "Failed to download object");
        })?;

        let write = async {
            if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(parent).await?;
            }
            tokio::fs::write(path, &data).await
        };
        write
            .await
            .map_err(|source| StorageError::LocalWrite { path: path.to_path_buf(), source })
            .inspect_err(|e| tracing::error!(error = %e, key, "Failed to write downloaded object"))?;

        tracing::info!(key, size = data.len(), "Object downloaded");
        Ok(())
    }

    /// First page of objects in the bucket (up to 1000 keys, no pagination)
    #[instrument(skip(self), fields(resource = %self.name))]
    pub async fn list_objects(&self) -> Result<Vec<ObjectSummary>, StorageError> {
        self.client.list_objects(&self.name).await.inspect_err(|e| {
            tracing::error!(error = %e, "Failed to list objects");
        })
    }
}
