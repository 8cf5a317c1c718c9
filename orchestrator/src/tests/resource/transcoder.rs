use std::sync::Arc;

use assert_matches::assert_matches;
use mockall::predicate::eq;
use rstest::*;

use crate::core::client::error::ErrorKind;
use crate::core::client::identity::MockIdentityClient;
use crate::core::client::storage::MockStorageClient;
use crate::core::client::topic::MockTopicClient;
use crate::core::client::transcoder::{MockTranscoderClient, TranscoderError};
use crate::resource::{Bucket, NotificationTopic, TranscodingService};
use crate::tests::common::fake::FakeProvider;
use crate::tests::common::{fake_provider, INPUT_BUCKET, OUTPUT_BUCKET, PIPELINE_NAME, TOPIC_NAME};
use crate::types::transcoder::TRANSCODER_DEFAULT_ROLE;
use crate::types::{Acl, JobStatus, Location, Pipeline, PipelineNotifications, Preset};

const TOPIC_ARN: &str = "arn:aws:sns:eu-west-1:000000000000:t1";
const ROLE_ARN: &str = "arn:aws:iam::000000000000:role/Elastic_Transcoder_Default_Role";

struct Wiring {
    input: Bucket,
    output: Bucket,
    topic: NotificationTopic,
}

#[fixture]
fn wiring() -> Wiring {
    let storage = Arc::new(MockStorageClient::new());
    let mut topic = NotificationTopic::new(Arc::new(MockTopicClient::new()), TOPIC_NAME);
    topic.adopt(TOPIC_ARN);
    Wiring {
        input: Bucket::new(storage.clone(), INPUT_BUCKET, Acl::Private, Location::Ireland),
        output: Bucket::new(storage, OUTPUT_BUCKET, Acl::Private, Location::Ireland),
        topic,
    }
}

fn identity() -> MockIdentityClient {
    let mut identity = MockIdentityClient::new();
    identity.expect_role_arn().with(eq(TRANSCODER_DEFAULT_ROLE)).returning(|_| Ok(ROLE_ARN.to_string()));
    identity
}

fn pipeline(id: &str, name: &str) -> Pipeline {
    Pipeline {
        id: id.to_string(),
        name: name.to_string(),
        arn: None,
        status: Some("Active".to_string()),
        input_bucket: Some(INPUT_BUCKET.to_string()),
        output_bucket: Some(OUTPUT_BUCKET.to_string()),
        role: Some(ROLE_ARN.to_string()),
        notifications: PipelineNotifications::all_to(TOPIC_ARN),
    }
}

#[rstest]
#[tokio::test]
async fn create_pipeline_routes_every_event_to_the_topic(wiring: Wiring) {
    let mut client = MockTranscoderClient::new();
    client
        .expect_create_pipeline()
        .withf(|spec| {
            let topic = Some(TOPIC_ARN.to_string());
            spec.name == PIPELINE_NAME
                && spec.input_bucket == INPUT_BUCKET
                && spec.output_bucket == OUTPUT_BUCKET
                && spec.role_arn == ROLE_ARN
                && spec.notifications.progressing == topic
                && spec.notifications.completed == topic
                && spec.notifications.warning == topic
                && spec.notifications.error == topic
        })
        .times(1)
        .returning(|spec| Ok(Some(pipeline("1700000000001-000001", &spec.name))));

    let mut service = TranscodingService::new(Arc::new(client), Arc::new(identity()), Location::Ireland);
    let created = service.create_pipeline(PIPELINE_NAME, &wiring.input, &wiring.output, &wiring.topic).await.unwrap();

    assert_eq!(created.id, "1700000000001-000001");
    assert_eq!(service.pipeline_id(), Some("1700000000001-000001"));
}

#[rstest]
#[tokio::test]
async fn create_pipeline_without_body_is_an_error(wiring: Wiring) {
    let mut client = MockTranscoderClient::new();
    client.expect_create_pipeline().times(1).returning(|_| Ok(None));

    let mut service = TranscodingService::new(Arc::new(client), Arc::new(identity()), Location::Ireland);
    let result = service.create_pipeline(PIPELINE_NAME, &wiring.input, &wiring.output, &wiring.topic).await;

    assert_matches!(result, Err(TranscoderError::MissingPipeline(name)) if name == PIPELINE_NAME);
    assert_eq!(service.pipeline_id(), None);
}

#[rstest]
#[tokio::test]
async fn create_pipeline_needs_a_topic_arn(wiring: Wiring) {
    let mut client = MockTranscoderClient::new();
    client.expect_create_pipeline().times(0);
    let mut identity = MockIdentityClient::new();
    identity.expect_role_arn().times(0);

    let topic = NotificationTopic::new(Arc::new(MockTopicClient::new()), "not-created");
    let mut service = TranscodingService::new(Arc::new(client), Arc::new(identity), Location::Ireland);
    let result = service.create_pipeline(PIPELINE_NAME, &wiring.input, &wiring.output, &topic).await;

    assert_matches!(result, Err(TranscoderError::TopicNotCreated(name)) if name == "not-created");
}

#[rstest]
#[tokio::test]
async fn missing_role_is_not_found(fake_provider: FakeProvider, wiring: Wiring) {
    fake_provider.remove_role(TRANSCODER_DEFAULT_ROLE);
    let provider = Arc::new(fake_provider);
    let mut service = TranscodingService::new(provider.clone(), provider, Location::Ireland);

    let err = service.create_pipeline(PIPELINE_NAME, &wiring.input, &wiring.output, &wiring.topic).await.unwrap_err();

    assert_matches!(err, TranscoderError::Role(_));
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[rstest]
#[case(PIPELINE_NAME, Some("2"))]
#[case("p", None)]
#[case("p1-archive", None)]
#[tokio::test]
async fn find_pipeline_matches_exact_names(#[case] name: &str, #[case] expected_id: Option<&str>) {
    let mut client = MockTranscoderClient::new();
    client
        .expect_list_pipelines()
        .returning(|| Ok(vec![pipeline("1", "p1-old"), pipeline("2", PIPELINE_NAME), pipeline("3", "p10")]));

    let mut service = TranscodingService::new(Arc::new(client), Arc::new(MockIdentityClient::new()), Location::Ireland);
    let found = service.find_pipeline(name).await.unwrap();
    assert_eq!(found.map(|pipeline| pipeline.id).as_deref(), expected_id);
    assert_eq!(service.pipeline_id(), None);

    assert_eq!(service.exists(name).await.unwrap(), expected_id.is_some());
    assert_eq!(service.pipeline_id(), expected_id);
}

#[rstest]
#[tokio::test]
async fn create_job_needs_an_adopted_pipeline() {
    let mut client = MockTranscoderClient::new();
    client.expect_create_job().times(0);

    let service = TranscodingService::new(Arc::new(client), Arc::new(MockIdentityClient::new()), Location::Ireland);
    let result = service.create_job("movie.mp4", "out.mp4", Preset::HD720p, "720p/").await;

    assert_matches!(result, Err(TranscoderError::NoPipelineAdopted));
}

#[rstest]
#[case(Preset::HD1080p)]
#[case(Preset::SD320p4x3)]
#[tokio::test]
async fn create_job_sends_preset_id_and_prefix(#[case] preset: Preset) {
    let mut client = MockTranscoderClient::new();
    client
        .expect_create_job()
        .withf(move |spec| {
            spec.pipeline_id == "p-7"
                && spec.input_key == "movie.mp4"
                && spec.output_key == "out.mp4"
                && spec.output_key_prefix == "1080p/"
                && spec.preset_id == preset.preset_id()
        })
        .times(1)
        .returning(|spec| {
            Ok(Some(crate::types::Job {
                id: "j-1".to_string(),
                pipeline_id: Some(spec.pipeline_id),
                input_key: Some(spec.input_key),
                output_key: Some(spec.output_key),
                output_key_prefix: Some(spec.output_key_prefix),
                preset_id: Some(spec.preset_id),
                status: Some("Submitted".to_string()),
            }))
        });

    let mut service = TranscodingService::new(Arc::new(client), Arc::new(MockIdentityClient::new()), Location::Ireland);
    service.adopt_pipeline("p-7");
    let job = service.create_job("movie.mp4", "out.mp4", preset, "1080p/").await.unwrap();

    assert_eq!(job.id, "j-1");
    assert_eq!(job.status(), Some(JobStatus::Submitted));
}

#[rstest]
#[tokio::test]
async fn list_jobs_by_status_defaults_to_complete() {
    let mut client = MockTranscoderClient::new();
    client.expect_list_jobs_by_status().with(eq(JobStatus::Complete)).times(1).returning(|_| Ok(vec![]));

    let service = TranscodingService::new(Arc::new(client), Arc::new(MockIdentityClient::new()), Location::Ireland);
    assert!(service.list_jobs_by_status(JobStatus::default()).await.unwrap().is_empty());
}

#[rstest]
#[tokio::test]
async fn delete_pipeline_forgets_it(fake_provider: FakeProvider, wiring: Wiring) {
    fake_provider.seed_bucket(INPUT_BUCKET);
    fake_provider.seed_bucket(OUTPUT_BUCKET);
    let provider = Arc::new(fake_provider.clone());
    let mut service = TranscodingService::new(provider.clone(), provider, Location::Ireland);
    service.create_pipeline(PIPELINE_NAME, &wiring.input, &wiring.output, &wiring.topic).await.unwrap();

    service.delete_pipeline().await.unwrap();

    assert_eq!(service.pipeline_id(), None);
    assert_eq!(fake_provider.pipeline_count(), 0);
    assert_matches!(service.delete_pipeline().await, Err(TranscoderError::NoPipelineAdopted));
}

#[rstest]
#[tokio::test]
async fn cancel_job_is_visible_in_status_listing(fake_provider: FakeProvider, wiring: Wiring) {
    fake_provider.seed_bucket(INPUT_BUCKET);
    fake_provider.seed_bucket(OUTPUT_BUCKET);
    fake_provider.silence_job_events();
    let provider = Arc::new(fake_provider);
    let mut service = TranscodingService::new(provider.clone(), provider, Location::Ireland);
    service.create_pipeline(PIPELINE_NAME, &wiring.input, &wiring.output, &wiring.topic).await.unwrap();
    let job = service.create_job("movie.mp4", "out.mp4", Preset::HD720p, "720p/").await.unwrap();

    service.cancel_job(&job.id).await.unwrap();

    let canceled = service.list_jobs_by_status(JobStatus::Canceled).await.unwrap();
    assert_eq!(canceled.len(), 1);
    assert_eq!(canceled[0].id, job.id);
    assert!(service.list_jobs_by_status(JobStatus::Submitted).await.unwrap().is_empty());
}
