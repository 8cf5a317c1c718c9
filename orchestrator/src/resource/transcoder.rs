use std::sync::Arc;

use tracing::instrument;

use crate::core::client::identity::IdentityClient;
use crate::core::client::transcoder::{TranscoderClient, TranscoderError};
use crate::resource::bucket::Bucket;
use crate::resource::topic::NotificationTopic;
use crate::types::transcoder::TRANSCODER_DEFAULT_ROLE;
use crate::types::{Job, JobSpec, JobStatus, Location, Pipeline, PipelineNotifications, PipelineSpec, Preset};

/// Pipelines and jobs of the transcoding service.
///
/// A service instance works against at most one pipeline at a time, the one it created or adopted.
#[derive(Clone)]
pub struct TranscodingService {
    client: Arc<dyn TranscoderClient>,
    identity: Arc<dyn IdentityClient>,
    location: Location,
    pipeline_id: Option<String>,
}

impl std::fmt::Debug for TranscodingService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranscodingService")
            .field("location", &self.location)
            .field("pipeline_id", &self.pipeline_id)
            .finish()
    }
}

impl TranscodingService {
    pub fn new(client: Arc<dyn TranscoderClient>, identity: Arc<dyn IdentityClient>, location: Location) -> Self {
        Self { client, identity, location, pipeline_id: None }
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn pipeline_id(&self) -> Option<&str> {
        self.pipeline_id.as_deref()
    }

    fn require_pipeline(&self) -> Result<&str, TranscoderError> {
        self.pipeline_id.as_deref().ok_or(TranscoderError::NoPipelineAdopted)
    }

    #[instrument(skip(self), fields(resource = "pipelines"))]
    pub async fn list_pipelines(&self) -> Result<Vec<Pipeline>, TranscoderError> {
        self.client.list_pipelines().await.inspect_err(|e| {
            tracing::error!(error = %e, "Failed to list pipelines");
        })
    }

    /// Pipeline named exactly `name`, if any.
    #[instrument(skip(self), fields(resource = %name))]
    pub async fn find_pipeline(&self, name: &str) -> Result<Option<Pipeline>, TranscoderError> {
        let pipelines = self.list_pipelines().await?;
        Ok(pipelines.into_iter().find(|pipeline| pipeline.name == name))
    }

    /// Work against the pipeline `pipeline_id` from now on.
    pub fn adopt_pipeline(&mut self, pipeline_id: impl Into<String>) {
        let pipeline_id = pipeline_id.into();
        tracing::debug!(pipeline_id = %pipeline_id, "Adopting pipeline");
        self.pipeline_id = Some(pipeline_id);
    }

    /// [`find_pipeline`](Self::find_pipeline) and, on a match, adopt it.
    pub async fn exists(&mut self, name: &str) -> Result<bool, TranscoderError> {
        match self.find_pipeline(name).await? {
            Some(pipeline) => {
                self.adopt_pipeline(pipeline.id);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Create a pipeline reading from `input`, writing to `output` and publishing every event
    /// (progressing, completed, warning, error) to `topic`. The new pipeline is adopted.
    #[instrument(skip(self, input, output, topic), fields(resource = %name, input = %input.name(), output = %output.name()))]
    pub async fn create_pipeline(
        &mut self,
        name: &str,
        input: &Bucket,
        output: &Bucket,
        topic: &NotificationTopic,
    ) -> Result<Pipeline, TranscoderError> {
        let topic_arn = topic
            .arn()
            .ok_or_else(|| TranscoderError::TopicNotCreated(topic.name().to_string()))
            .inspect_err(|e| tracing::error!(error = %e, "Cannot create pipeline"))?;

        let role_arn = self.identity.role_arn(TRANSCODER_DEFAULT_ROLE).await.inspect_err(|e| {
            tracing::error!(error = %e, role = TRANSCODER_DEFAULT_ROLE, "Failed to resolve transcoder role");
        })?;

        let spec = PipelineSpec {
            name: name.to_string(),
            input_bucket: input.name().to_string(),
            output_bucket: output.name().to_string(),
            role_arn,
            notifications: PipelineNotifications::all_to(topic_arn),
        };

        let pipeline = self
            .client
            .create_pipeline(spec)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to create pipeline"))?
            .ok_or_else(|| TranscoderError::MissingPipeline(name.to_string()))
            .inspect_err(|e| tracing::error!(error = %e, "Failed to create pipeline"))?;

        tracing::info!(pipeline_id = %pipeline.id, topic_arn, "Pipeline created");
        self.adopt_pipeline(pipeline.id.clone());
        Ok(pipeline)
    }

    /// Delete the adopted pipeline and forget it.
    #[instrument(skip(self), fields(resource = ?self.pipeline_id))]
    pub async fn delete_pipeline(&mut self) -> Result<(), TranscoderError> {
        let pipeline_id = self.require_pipeline()?;
        self.client.delete_pipeline(pipeline_id).await.inspect_err(|e| {
            tracing::error!(error = %e, pipeline_id, "Failed to delete pipeline");
        })?;
        tracing::info!(pipeline_id, "Pipeline deleted");
        self.pipeline_id = None;
        Ok(())
    }

    /// Submit one job against the adopted pipeline.
    #[instrument(skip(self), fields(resource = ?self.pipeline_id))]
    pub async fn create_job(
        &self,
        input_key: &str,
        output_key: &str,
        preset: Preset,
        output_prefix: &str,
    ) -> Result<Job, TranscoderError> {
        let pipeline_id = self.require_pipeline().inspect_err(|e| tracing::error!(error = %e, "Cannot create job"))?;

        let spec = JobSpec {
            pipeline_id: pipeline_id.to_string(),
            input_key: input_key.to_string(),
            output_key: output_key.to_string(),
            output_key_prefix: output_prefix.to_string(),
            preset_id: preset.preset_id().to_string(),
        };

        let job = self
            .client
            .create_job(spec)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to create job"))?
            .ok_or_else(|| TranscoderError::MissingJob(pipeline_id.to_string()))
            .inspect_err(|e| tracing::error!(error = %e, "Failed to create job"))?;

        tracing::info!(job_id = %job.id, status = ?job.status, %preset, "Job created");
        Ok(job)
    }

    #[instrument(skip(self), fields(resource = %job_id))]
    pub async fn cancel_job(&self, job_id: &str) -> Result<(), TranscoderError> {
        self.client.cancel_job(job_id).await.inspect_err(|e| {
            tracing::error!(error = %e, "Failed to cancel job");
        })?;
        tracing::info!("Job canceled");
        Ok(())
    }

    /// Jobs in `status`, across all pipelines. `JobStatus::default()` is `Complete`.
    #[instrument(skip(self), fields(resource = %status))]
    pub async fn list_jobs_by_status(&self, status: JobStatus) -> Result<Vec<Job>, TranscoderError> {
        self.client.list_jobs_by_status(status).await.inspect_err(|e| {
            tracing::error!(error = %e, "Failed to list jobs by status");
        })
    }

    /// Jobs of the adopted pipeline
    #[instrument(skip(self), fields(resource = ?self.pipeline_id))]
    pub async fn list_jobs_by_pipeline(&self) -> Result<Vec<Job>, TranscoderError> {
        let pipeline_id = self.require_pipeline()?;
        self.client.list_jobs_by_pipeline(pipeline_id).await.inspect_err(|e| {
            tracing::error!(error = %e, pipeline_id, "Failed to list jobs by pipeline");
        })
    }
}
