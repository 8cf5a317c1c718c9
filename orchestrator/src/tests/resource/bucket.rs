use std::sync::Arc;

use assert_matches::assert_matches;
use bytes::Bytes;
use mockall::predicate::eq;
use rstest::*;
use tempfile::TempDir;
use tracing_test::traced_test;

use crate::core::client::error::ErrorKind;
use crate::core::client::storage::{MockStorageClient, StorageClient, StorageError};
use crate::resource::Bucket;
use crate::tests::common::fake::FakeProvider;
use crate::tests::common::{fake_provider, media_file, INPUT_BUCKET, INPUT_KEY, MEDIA_BYTES};
use crate::types::{Acl, BucketSummary, Location};

fn listing(names: &[&str]) -> Vec<BucketSummary> {
    names.iter().map(|name| BucketSummary { name: name.to_string(), created_at: None }).collect()
}

/// Only exact names count: prefixes, suffixes and substrings of listed buckets do not.
#[rstest]
#[case("in1", true)]
#[case("in10", true)]
#[case("in", false)]
#[case("n1", false)]
#[case("my-in1-archive", false)]
#[case("absent", false)]
#[tokio::test]
async fn exists_matches_exact_names_only(#[case] name: &str, #[case] expected: bool) {
    let mut storage = MockStorageClient::new();
    storage.expect_list_buckets().times(1).returning(|| Ok(listing(&["in1", "in10", "my-in1"])));

    let bucket = Bucket::new(Arc::new(storage), INPUT_BUCKET, Acl::Private, Location::Ireland);
    assert_eq!(bucket.exists(name).await.unwrap(), expected);
}

#[rstest]
#[tokio::test]
async fn create_sends_acl_and_location() {
    let mut storage = MockStorageClient::new();
    storage
        .expect_create_bucket()
        .with(eq("media-tokyo"), eq(Acl::PublicRead), eq(Location::Tokyo))
        .times(1)
        .returning(|_, _, _| Ok(Some("http://media-tokyo.s3.amazonaws.com/".to_string())));

    let bucket = Bucket::new(Arc::new(storage), "media-tokyo", Acl::PublicRead, Location::Tokyo);
    assert_eq!(bucket.create().await.unwrap().as_deref(), Some("http://media-tokyo.s3.amazonaws.com/"));
}

#[rstest]
#[tokio::test]
async fn create_twice_fails_remotely(fake_provider: FakeProvider) {
    let bucket = Bucket::new(Arc::new(fake_provider), INPUT_BUCKET, Acl::Private, Location::Ireland);
    bucket.create().await.unwrap();

    let err = bucket.create().await.unwrap_err();
    assert_matches!(err, StorageError::Provider(ref provider) if provider.code.as_deref() == Some("BucketAlreadyOwnedByYou"));
}

#[rstest]
#[tokio::test]
#[traced_test]
async fn upload_permission_error_is_logged_and_returned(fake_provider: FakeProvider, media_file: (TempDir, std::path::PathBuf)) {
    let (_dir, path) = media_file;
    fake_provider.seed_bucket(INPUT_BUCKET);
    fake_provider.deny("PutObject");

    let bucket = Bucket::new(Arc::new(fake_provider.clone()), INPUT_BUCKET, Acl::Private, Location::Ireland);
    let err = bucket.upload(INPUT_KEY, &path).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::PermissionDenied);
    assert!(fake_provider.object(INPUT_BUCKET, INPUT_KEY).is_none());
    assert!(logs_contain("Failed to upload object"));
    assert!(logs_contain("PutObject failed (PermissionDenied)"));
}

#[rstest]
#[tokio::test]
async fn upload_of_missing_local_file_is_a_local_error(fake_provider: FakeProvider) {
    fake_provider.seed_bucket(INPUT_BUCKET);
    let bucket = Bucket::new(Arc::new(fake_provider), INPUT_BUCKET, Acl::Private, Location::Ireland);

    let err = bucket.upload(INPUT_KEY, "does/not/exist.mp4").await.unwrap_err();
    assert_matches!(err, StorageError::LocalRead { .. });
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[rstest]
#[tokio::test]
async fn download_creates_parent_directories(fake_provider: FakeProvider, media_file: (TempDir, std::path::PathBuf)) {
    let (dir, path) = media_file;
    fake_provider.seed_bucket(INPUT_BUCKET);
    let bucket = Bucket::new(Arc::new(fake_provider), INPUT_BUCKET, Acl::Private, Location::Ireland);
    bucket.upload(INPUT_KEY, &path).await.unwrap();

    let target = dir.path().join("downloads/720p").join(INPUT_KEY);
    bucket.download(INPUT_KEY, &target).await.unwrap();

    assert_eq!(std::fs::read(&target).unwrap(), MEDIA_BYTES);
}

#[rstest]
#[tokio::test]
async fn download_of_missing_key_is_not_found(fake_provider: FakeProvider) {
    fake_provider.seed_bucket(INPUT_BUCKET);
    let bucket = Bucket::new(Arc::new(fake_provider), INPUT_BUCKET, Acl::Private, Location::Ireland);
    let dir = tempfile::tempdir().unwrap();

    let err = bucket.download("missing.mp4", dir.path().join("missing.mp4")).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(!dir.path().join("missing.mp4").exists());
}

#[rstest]
#[tokio::test]
async fn delete_requires_an_empty_bucket(fake_provider: FakeProvider) {
    fake_provider.seed_bucket(INPUT_BUCKET);
    let storage = Arc::new(fake_provider.clone());
    let bucket = Bucket::new(storage.clone(), INPUT_BUCKET, Acl::Private, Location::Ireland);
    storage.put_object(INPUT_BUCKET, INPUT_KEY, Bytes::from_static(MEDIA_BYTES)).await.unwrap();

    assert!(bucket.delete().await.is_err());
    assert!(fake_provider.has_bucket(INPUT_BUCKET));

    let empty = Bucket::new(storage, "empty", Acl::Private, Location::Ireland);
    empty.create().await.unwrap();
    empty.delete().await.unwrap();
    assert!(!fake_provider.has_bucket("empty"));
}

#[rstest]
#[tokio::test]
async fn list_objects_returns_uploaded_keys(fake_provider: FakeProvider, media_file: (TempDir, std::path::PathBuf)) {
    let (_dir, path) = media_file;
    fake_provider.seed_bucket(INPUT_BUCKET);
    let bucket = Bucket::new(Arc::new(fake_provider), INPUT_BUCKET, Acl::Private, Location::Ireland);
    assert!(bucket.list_objects().await.unwrap().is_empty());

    bucket.upload(INPUT_KEY, &path).await.unwrap();
    let objects = bucket.list_objects().await.unwrap();

    assert_eq!(objects.len(), 1);
    assert_eq!(objects[0].key, INPUT_KEY);
    assert_eq!(objects[0].size, Some(MEDIA_BYTES.len() as i64));
}
