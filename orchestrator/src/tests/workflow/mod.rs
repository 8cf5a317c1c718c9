use std::path::PathBuf;
use std::time::Duration;

use assert_matches::assert_matches;
use rstest::*;
use tempfile::TempDir;
use tracing_test::traced_test;

use crate::core::client::error::ErrorKind;
use crate::core::client::{QueueClient, TopicClient};
use crate::tests::common::fake::FakeProvider;
use crate::tests::common::{
    fake_provider, fast_poll, media_file, resource_names, transcode_args, RecordingSleeper, INPUT_BUCKET, INPUT_KEY,
    MEDIA_BYTES, OUTPUT_BUCKET, PIPELINE_NAME, QUEUE_NAME, TOPIC_NAME,
};
use crate::tests::config::TestConfigBuilder;
use crate::types::params::{PollArgs, ResourceNames};
use crate::types::transcoder::TRANSCODER_DEFAULT_ROLE;
use crate::types::{JobStatus, Location, Preset};
use crate::utils::poll::PollError;
use crate::workflow::{record_seen, DemoWorkflow};
use crate::MediaError;

fn workflow(fake: &FakeProvider, names: ResourceNames) -> (DemoWorkflow<RecordingSleeper>, RecordingSleeper) {
    let services = TestConfigBuilder::new().with_fake(fake.clone()).build();
    let sleeper = RecordingSleeper::default();
    let workflow = DemoWorkflow::with_sleeper(services.config, names, sleeper.clone()).unwrap();
    (workflow, sleeper)
}

#[rstest]
#[tokio::test]
async fn demo_transcodes_and_reports_completion(
    fake_provider: FakeProvider,
    resource_names: ResourceNames,
    fast_poll: PollArgs,
    media_file: (TempDir, PathBuf),
) {
    let (_dir, path) = media_file;
    let (workflow, _sleeper) = workflow(&fake_provider, resource_names);
    assert_eq!(workflow.location(), Location::Ireland);

    let outcome = workflow.run(&transcode_args(path), &fast_poll, true).await.unwrap();

    let topic_arn = outcome.topic_arn.clone().unwrap();
    let queue_url = outcome.queue_url.clone().unwrap();
    assert!(topic_arn.ends_with(&format!(":{}", TOPIC_NAME)));
    assert!(queue_url.ends_with(&format!("/{}", QUEUE_NAME)));
    assert_eq!(fake_provider.object(INPUT_BUCKET, INPUT_KEY).as_deref(), Some(MEDIA_BYTES));
    assert!(fake_provider.has_bucket(OUTPUT_BUCKET));
    assert!(fake_provider.queue_policy(&queue_url).unwrap().contains(&topic_arn));
    assert_eq!(fake_provider.subscribers(&topic_arn).len(), 1);

    assert_eq!(outcome.job.preset_id.as_deref(), Some(Preset::HD720p.preset_id()));
    assert_eq!(outcome.job.output_key_prefix.as_deref(), Some("720p/"));
    assert_eq!(outcome.pipeline_jobs.len(), 1);
    assert_eq!(outcome.pipeline_jobs[0].id, outcome.job.id);
    assert_eq!(outcome.pipeline_jobs[0].status(), Some(JobStatus::Submitted));

    let states: Vec<&str> = outcome.notifications.iter().map(|n| n.state.as_str()).collect();
    assert_eq!(states, vec!["PROGRESSING", "COMPLETED"]);
    assert!(outcome.notifications.iter().all(|n| n.job_id == outcome.job.id));
    assert_eq!(outcome.final_status, JobStatus::Complete);
}

#[rstest]
#[tokio::test]
async fn second_run_adopts_existing_resources(
    fake_provider: FakeProvider,
    resource_names: ResourceNames,
    fast_poll: PollArgs,
    media_file: (TempDir, PathBuf),
) {
    let (_dir, path) = media_file;
    let (workflow, _sleeper) = workflow(&fake_provider, resource_names);

    let first = workflow.run(&transcode_args(path.clone()), &fast_poll, true).await.unwrap();
    let second = workflow.run(&transcode_args(path), &fast_poll, true).await.unwrap();

    assert_eq!(first.topic_arn, second.topic_arn);
    assert_eq!(first.queue_url, second.queue_url);
    assert_eq!(first.pipeline_id, second.pipeline_id);
    assert_eq!(fake_provider.pipeline_count(), 1);
    assert_ne!(first.job.id, second.job.id);
    assert_eq!(second.pipeline_jobs.len(), 2);
    // subscribing twice keeps a single subscription
    assert_eq!(fake_provider.subscribers(&second.topic_arn.unwrap()).len(), 1);
    assert_eq!(second.final_status, JobStatus::Complete);
}

#[rstest]
#[tokio::test]
async fn waiting_gives_up_without_notifications(
    fake_provider: FakeProvider,
    resource_names: ResourceNames,
    fast_poll: PollArgs,
    media_file: (TempDir, PathBuf),
) {
    let (_dir, path) = media_file;
    fake_provider.silence_job_events();
    let (workflow, sleeper) = workflow(&fake_provider, resource_names);

    let err = workflow.run(&transcode_args(path), &fast_poll, true).await.unwrap_err();

    assert_matches!(err, MediaError::PollError(PollError::Exhausted { attempts: 5, .. }));
    assert_eq!(err.kind(), ErrorKind::Transient);
    // the upload is visible at once, every delay comes from waiting for notifications
    assert_eq!(
        sleeper.delays(),
        vec![
            Duration::from_millis(10),
            Duration::from_millis(20),
            Duration::from_millis(40),
            Duration::from_millis(80)
        ]
    );
}

#[rstest]
#[tokio::test]
async fn unsubscribed_queue_never_hears_about_the_job(
    fake_provider: FakeProvider,
    resource_names: ResourceNames,
    #[with(2)] fast_poll: PollArgs,
    media_file: (TempDir, PathBuf),
) {
    let (_dir, path) = media_file;
    let (workflow, _sleeper) = workflow(&fake_provider, resource_names);

    let err = workflow.run(&transcode_args(path), &fast_poll, false).await.unwrap_err();

    assert_matches!(err, MediaError::PollError(PollError::Exhausted { attempts: 2, .. }));
    assert_eq!(fake_provider.pipeline_count(), 1);
}

#[rstest]
#[tokio::test]
#[traced_test]
async fn upload_permission_error_stops_the_demo(
    fake_provider: FakeProvider,
    resource_names: ResourceNames,
    fast_poll: PollArgs,
    media_file: (TempDir, PathBuf),
) {
    let (_dir, path) = media_file;
    fake_provider.deny("PutObject");
    let (workflow, sleeper) = workflow(&fake_provider, resource_names);

    let err = workflow.run(&transcode_args(path), &fast_poll, true).await.unwrap_err();

    assert_matches!(err, MediaError::StorageError(_));
    assert_eq!(err.kind(), ErrorKind::PermissionDenied);
    assert_eq!(fake_provider.pipeline_count(), 0);
    assert!(sleeper.delays().is_empty());
    assert!(logs_contain("Failed to upload object"));
}

#[rstest]
#[tokio::test]
async fn missing_transcoder_role_is_not_found(
    fake_provider: FakeProvider,
    resource_names: ResourceNames,
    fast_poll: PollArgs,
    media_file: (TempDir, PathBuf),
) {
    let (_dir, path) = media_file;
    fake_provider.remove_role(TRANSCODER_DEFAULT_ROLE);
    let (workflow, _sleeper) = workflow(&fake_provider, resource_names);

    let err = workflow.run(&transcode_args(path), &fast_poll, true).await.unwrap_err();

    assert_matches!(err, MediaError::TranscoderError(_));
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(fake_provider.object(INPUT_BUCKET, INPUT_KEY).as_deref(), Some(MEDIA_BYTES));
}

#[rstest]
#[tokio::test]
#[traced_test]
async fn unreadable_messages_are_skipped_and_deleted(
    fake_provider: FakeProvider,
    resource_names: ResourceNames,
    fast_poll: PollArgs,
    media_file: (TempDir, PathBuf),
) {
    let (_dir, path) = media_file;
    let queue_url = fake_provider.seed_queue(QUEUE_NAME);
    fake_provider.send_raw(&queue_url, "definitely not json");
    fake_provider.send_raw(&queue_url, r#"{"Type":"Notification","Message":"{\"state\":42}"}"#);
    let (workflow, _sleeper) = workflow(&fake_provider, resource_names);

    let outcome = workflow.run(&transcode_args(path), &fast_poll, true).await.unwrap();

    assert_eq!(outcome.queue_url.as_deref(), Some(queue_url.as_str()));
    assert_eq!(outcome.notifications.len(), 2);
    assert_eq!(outcome.final_status, JobStatus::Complete);
    assert!(logs_contain("Skipping unreadable message"));

    fake_provider.expire_visibility();
    assert!(fake_provider.receive_messages(&queue_url).await.unwrap().is_empty());
}

#[rstest]
#[tokio::test]
async fn notifications_for_other_jobs_do_not_end_the_wait(
    fake_provider: FakeProvider,
    resource_names: ResourceNames,
    fast_poll: PollArgs,
    media_file: (TempDir, PathBuf),
) {
    let (_dir, path) = media_file;
    let topic_arn = fake_provider.seed_topic(TOPIC_NAME);
    let (workflow, _sleeper) = workflow(&fake_provider, resource_names);

    // subscribe the queue first by running once, then publish a stale completion
    workflow.run(&transcode_args(path.clone()), &fast_poll, true).await.unwrap();
    fake_provider.publish(&topic_arn, r#"{"state":"COMPLETED","jobId":"someone-else"}"#);

    let outcome = workflow.run(&transcode_args(path), &fast_poll, true).await.unwrap();

    let job_ids: Vec<&str> = outcome.notifications.iter().map(|n| n.job_id.as_str()).collect();
    assert_eq!(job_ids[0], "someone-else");
    assert_eq!(outcome.notifications.len(), 3);
    assert_eq!(outcome.final_status, JobStatus::Complete);
}

#[rstest]
#[tokio::test]
async fn teardown_keeps_non_empty_buckets(
    fake_provider: FakeProvider,
    resource_names: ResourceNames,
    fast_poll: PollArgs,
    media_file: (TempDir, PathBuf),
) {
    let (_dir, path) = media_file;
    let (workflow, _sleeper) = workflow(&fake_provider, resource_names);
    workflow.run(&transcode_args(path), &fast_poll, true).await.unwrap();

    let report = workflow.teardown().await.unwrap();

    assert_eq!(
        report.deleted,
        vec![
            format!("pipeline {}", PIPELINE_NAME),
            format!("topic {}", TOPIC_NAME),
            format!("queue {}", QUEUE_NAME),
            format!("bucket {}", OUTPUT_BUCKET),
        ]
    );
    assert!(report.not_found.is_empty());
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, format!("bucket {}", INPUT_BUCKET));
    assert!(report.failed[0].1.contains("DeleteBucket failed"));

    assert_eq!(fake_provider.pipeline_count(), 0);
    assert!(fake_provider.has_bucket(INPUT_BUCKET));
    assert!(!fake_provider.has_bucket(OUTPUT_BUCKET));
}

#[rstest]
#[tokio::test]
async fn teardown_of_nothing_reports_everything_missing(fake_provider: FakeProvider, resource_names: ResourceNames) {
    let (workflow, _sleeper) = workflow(&fake_provider, resource_names);

    let report = workflow.teardown().await.unwrap();

    assert!(report.deleted.is_empty());
    assert!(report.failed.is_empty());
    assert_eq!(report.not_found.len(), 5);
}

#[rstest]
#[tokio::test]
async fn teardown_only_deletes_exactly_named_topics_and_queues(
    fake_provider: FakeProvider,
    resource_names: ResourceNames,
) {
    fake_provider.seed_topic(TOPIC_NAME);
    let alerts_topic = fake_provider.seed_topic("prod-t1-alerts");
    let billing_queue = fake_provider.seed_queue("billing-q1");
    let (workflow, _sleeper) = workflow(&fake_provider, resource_names);

    let report = workflow.teardown().await.unwrap();

    assert_eq!(report.deleted, vec![format!("topic {}", TOPIC_NAME)]);
    assert!(report.not_found.contains(&format!("queue {}", QUEUE_NAME)));
    assert!(report.failed.is_empty());
    assert_eq!(fake_provider.list_topics().await.unwrap(), vec![alerts_topic]);
    assert_eq!(fake_provider.list_queues().await.unwrap(), vec![billing_queue]);
}

#[rstest]
#[tokio::test]
async fn failed_lookup_does_not_stop_teardown(
    fake_provider: FakeProvider,
    resource_names: ResourceNames,
    fast_poll: PollArgs,
    media_file: (TempDir, PathBuf),
) {
    let (_dir, path) = media_file;
    let (workflow, _sleeper) = workflow(&fake_provider, resource_names);
    workflow.run(&transcode_args(path), &fast_poll, true).await.unwrap();
    fake_provider.deny("ListPipelines");

    let report = workflow.teardown().await.unwrap();

    let failed: Vec<&str> = report.failed.iter().map(|(resource, _)| resource.as_str()).collect();
    assert_eq!(failed, vec![format!("pipeline {}", PIPELINE_NAME), format!("bucket {}", INPUT_BUCKET)]);
    assert!(report.failed[0].1.contains("ListPipelines failed"));
    assert_eq!(
        report.deleted,
        vec![format!("topic {}", TOPIC_NAME), format!("queue {}", QUEUE_NAME), format!("bucket {}", OUTPUT_BUCKET)]
    );
    assert_eq!(fake_provider.pipeline_count(), 1);
    assert!(!fake_provider.has_bucket(OUTPUT_BUCKET));
}

#[rstest]
#[tokio::test]
#[traced_test]
async fn queue_matched_by_suffix_keeps_its_policy(
    fake_provider: FakeProvider,
    resource_names: ResourceNames,
    fast_poll: PollArgs,
    media_file: (TempDir, PathBuf),
) {
    let (_dir, path) = media_file;
    let billing_queue = fake_provider.seed_queue("billing-q1");
    fake_provider.set_queue_policy(&billing_queue, "billing policy").await.unwrap();
    let (workflow, _sleeper) = workflow(&fake_provider, resource_names);

    let outcome = workflow.run(&transcode_args(path), &fast_poll, true).await.unwrap();

    assert_eq!(outcome.queue_url.as_deref(), Some(billing_queue.as_str()));
    assert_eq!(fake_provider.queue_policy(&billing_queue).as_deref(), Some("billing policy"));
    assert!(logs_contain("leaving its policy alone"));
}

#[rstest]
fn seen_notifications_survive_a_poisoned_lock() {
    let seen = std::sync::Mutex::new(vec![1]);
    let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        let _guard = seen.lock().unwrap();
        panic!("holder panicked");
    }));
    assert!(seen.is_poisoned());

    record_seen(&seen, 2);

    assert_eq!(seen.into_inner().unwrap_or_else(|poisoned| poisoned.into_inner()), vec![1, 2]);
}

#[rstest]
fn unsupported_region_is_a_config_error(resource_names: ResourceNames) {
    let services = TestConfigBuilder::new().with_region("eu-central-1").build();

    let Err(err) = DemoWorkflow::new(services.config, resource_names) else {
        panic!("eu-central-1 has no transcoding service");
    };

    assert_matches!(err, MediaError::ConfigError(message) if message.contains("eu-central-1"));
}
