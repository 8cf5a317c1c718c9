use std::str::FromStr;
use std::sync::Mutex;

use tracing::instrument;

use crate::core::Config;
use crate::resource::{Bucket, NotificationQueue, NotificationTopic, TranscodingService};
use crate::types::notification::NotificationParseError;
use crate::types::params::{PollArgs, ResourceNames, TranscodeArgs};
use crate::types::{Acl, Job, JobStatus, Location, TranscoderNotification};
use crate::utils::poll::{poll_until, Sleeper, TokioSleeper};
use crate::{MediaError, MediaResult};

/// What a demo run provisioned and observed.
#[derive(Debug, Clone)]
pub struct DemoOutcome {
    pub topic_arn: Option<String>,
    pub queue_url: Option<String>,
    pub pipeline_id: Option<String>,
    /// The submitted job, as returned on submission
    pub job: Job,
    /// Jobs of the pipeline listed right after submission
    pub pipeline_jobs: Vec<Job>,
    /// Every notification read from the queue, in arrival order
    pub notifications: Vec<TranscoderNotification>,
    /// Terminal status reported for the submitted job
    pub final_status: JobStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeardownReport {
    pub deleted: Vec<String>,
    pub not_found: Vec<String>,
    /// Resource and error text of every failed deletion
    pub failed: Vec<(String, String)>,
}

impl TeardownReport {
    fn record<E: std::fmt::Display>(&mut self, resource: String, result: Result<(), E>) {
        match result {
            Ok(()) => self.deleted.push(resource),
            Err(e) => {
                tracing::warn!(resource = %resource, error = %e, "Failed to delete resource");
                self.failed.push((resource, e.to_string()));
            }
        }
    }
}

/// The demo transcoding workflow: topic, queue, buckets, upload, pipeline, job, notifications.
///
/// Existing resources with the configured names are adopted instead of created, so the demo can
/// be run repeatedly against the same account.
pub struct DemoWorkflow<S: Sleeper = TokioSleeper> {
    config: Config,
    names: ResourceNames,
    location: Location,
    acl: Acl,
    sleeper: S,
}

impl DemoWorkflow<TokioSleeper> {
    pub fn new(config: Config, names: ResourceNames) -> MediaResult<Self> {
        Self::with_sleeper(config, names, TokioSleeper)
    }
}

impl<S: Sleeper> DemoWorkflow<S> {
    /// Build a workflow that waits with `sleeper`. The bucket and pipeline location follows the configured region.
    pub fn with_sleeper(config: Config, names: ResourceNames, sleeper: S) -> MediaResult<Self> {
        let region = &config.provider_config().region;
        let location = Location::from_str(region)
            .map_err(|_| MediaError::ConfigError(format!("Region {} is not supported by the transcoding service", region)))?;
        Ok(Self { config, names, location, acl: Acl::default(), sleeper })
    }

    pub fn location(&self) -> Location {
        self.location
    }

    fn topic(&self) -> NotificationTopic {
        NotificationTopic::new(self.config.topic(), self.names.topic.as_str())
    }

    fn queue(&self) -> NotificationQueue {
        NotificationQueue::new(self.config.queue(), self.names.queue.as_str())
    }

    fn bucket(&self, name: &str) -> Bucket {
        Bucket::new(self.config.storage(), name, self.acl, self.location)
    }

    fn transcoder(&self) -> TranscodingService {
        TranscodingService::new(self.config.transcoder(), self.config.identity(), self.location)
    }

    async fn ensure_bucket(&self, name: &str) -> MediaResult<Bucket> {
        let bucket = self.bucket(name);
        if bucket.exists(name).await? {
            tracing::info!(bucket = name, "Using existing bucket");
        } else {
            bucket.create().await?;
        }
        Ok(bucket)
    }

    /// Run the whole workflow and wait for a terminal notification about the submitted job.
    #[instrument(skip_all, fields(resource = "demo"))]
    pub async fn run(&self, transcode: &TranscodeArgs, poll: &PollArgs, subscribe_queue: bool) -> MediaResult<DemoOutcome> {
        let mut topic = self.topic();
        if topic.exists(&self.names.topic).await? {
            tracing::info!(arn = ?topic.arn(), "Using existing topic");
        } else {
            topic.create(None).await?;
        }

        let mut queue = self.queue();
        if queue.exists(&self.names.queue).await? {
            tracing::info!(url = ?queue.url(), "Using existing queue");
        } else {
            queue.create(None).await?;
        }

        if subscribe_queue {
            // The policy attribute is replaced wholesale, never on a queue only matched by suffix
            if queue.is_exact_match() {
                queue.allow_topic(&topic).await?;
            } else {
                tracing::warn!(url = ?queue.url(), name = %self.names.queue, "Queue not named exactly, leaving its policy alone");
            }
            topic.subscribe(&queue).await?;
        }

        let input_bucket = self.ensure_bucket(&self.names.input_bucket).await?;
        input_bucket.upload(&transcode.input_key, &transcode.input_file).await?;

        let key = transcode.input_key.as_str();
        let bucket = &input_bucket;
        poll_until(&format!("upload of {}", key), &poll.upload, &self.sleeper, move || async move {
            let objects = bucket.list_objects().await?;
            Ok::<_, MediaError>(objects.iter().any(|object| object.key == key).then_some(()))
        })
        .await?;
        tracing::info!(key, "Upload visible in input bucket");

        let output_bucket = self.ensure_bucket(&self.names.output_bucket).await?;

        let mut transcoder = self.transcoder();
        if transcoder.exists(&self.names.pipeline).await? {
            tracing::info!(pipeline_id = ?transcoder.pipeline_id(), "Using existing pipeline");
        } else {
            transcoder.create_pipeline(&self.names.pipeline, &input_bucket, &output_bucket, &topic).await?;
        }

        let job = transcoder
            .create_job(&transcode.input_key, &transcode.output_key, transcode.preset, &transcode.output_prefix)
            .await?;

        let pipeline_jobs = transcoder.list_jobs_by_pipeline().await?;
        for listed in &pipeline_jobs {
            tracing::info!(job_id = %listed.id, status = ?listed.status, output_key = ?listed.output_key, "Pipeline job");
        }

        let (notifications, final_status) = self.wait_for_job(&queue, &job, poll).await?;

        Ok(DemoOutcome {
            topic_arn: topic.arn().map(str::to_string),
            queue_url: queue.url().map(str::to_string),
            pipeline_id: transcoder.pipeline_id().map(str::to_string),
            job,
            pipeline_jobs,
            notifications,
            final_status,
        })
    }

    /// Drain the queue until a terminal notification about `job` arrives.
    ///
    /// Every received message is deleted, including ones that do not parse or concern other jobs.
    async fn wait_for_job(
        &self,
        queue: &NotificationQueue,
        job: &Job,
        poll: &PollArgs,
    ) -> MediaResult<(Vec<TranscoderNotification>, JobStatus)> {
        let seen: Mutex<Vec<TranscoderNotification>> = Mutex::new(Vec::new());
        let seen_ref = &seen;
        let job_id = job.id.as_str();

        let final_status = poll_until(
            &format!("notifications for job {}", job_id),
            &poll.notifications,
            &self.sleeper,
            move || async move {
                let mut terminal = None;
                for message in queue.receive_messages().await? {
                    let parsed = message
                        .body
                        .as_deref()
                        .ok_or(NotificationParseError::MissingBody)
                        .and_then(TranscoderNotification::from_queue_body);

                    if let Some(receipt_handle) = message.receipt_handle.as_deref() {
                        queue.delete_message(receipt_handle).await?;
                    }

                    match parsed {
                        Ok(notification) => {
                            tracing::info!(state = %notification.state, job_id = %notification.job_id, "Notification");
                            if notification.job_id == job_id && notification.is_terminal() {
                                terminal = notification.job_status();
                            }
                            record_seen(seen_ref, notification);
                        }
                        Err(e) => {
                            tracing::warn!(error = %e, message_id = ?message.message_id, "Skipping unreadable message")
                        }
                    }
                }
                Ok::<_, MediaError>(terminal)
            },
        )
        .await?;

        let notifications = seen.into_inner().unwrap_or_else(|poisoned| poisoned.into_inner());
        tracing::info!(job_id, status = %final_status, "Job finished");
        Ok((notifications, final_status))
    }

    /// Delete the pipeline, topic and queue named exactly as configured, then the buckets.
    ///
    /// Missing resources are skipped. Failed lookups and deletions are reported, not fatal, so one
    /// non-empty bucket does not keep the rest around.
    #[instrument(skip_all, fields(resource = "teardown"))]
    pub async fn teardown(&self) -> MediaResult<TeardownReport> {
        let mut report = TeardownReport::default();

        let mut transcoder = self.transcoder();
        let label = format!("pipeline {}", self.names.pipeline);
        match transcoder.exists(&self.names.pipeline).await {
            Ok(true) => report.record(label, transcoder.delete_pipeline().await),
            Ok(false) => report.not_found.push(label),
            Err(e) => report.record(label, Err(e)),
        }

        let mut topic = self.topic();
        let label = format!("topic {}", self.names.topic);
        match topic.exists_exact(&self.names.topic).await {
            Ok(true) => report.record(label, topic.delete().await),
            Ok(false) => report.not_found.push(label),
            Err(e) => report.record(label, Err(e)),
        }

        let mut queue = self.queue();
        let label = format!("queue {}", self.names.queue);
        match queue.exists_exact(&self.names.queue).await {
            Ok(true) => report.record(label, queue.delete().await),
            Ok(false) => report.not_found.push(label),
            Err(e) => report.record(label, Err(e)),
        }

        for name in [&self.names.input_bucket, &self.names.output_bucket] {
            let bucket = self.bucket(name);
            let label = format!("bucket {}", name);
            match bucket.exists(name).await {
                Ok(true) => report.record(label, bucket.delete().await),
                Ok(false) => report.not_found.push(label),
                Err(e) => report.record(label, Err(e)),
            }
        }

        tracing::info!(
            deleted = report.deleted.len(),
            not_found = report.not_found.len(),
            failed = report.failed.len(),
            "Teardown finished"
        );
        Ok(report)
    }
}

/// Append to a shared list, recovering it if a previous holder panicked.
pub(crate) fn record_seen<T>(seen: &Mutex<Vec<T>>, item: T) {
    seen.lock().unwrap_or_else(|poisoned| poisoned.into_inner()).push(item);
}
