use crate::core::client::error::ProviderError;
use crate::core::client::transcoder::{TranscoderClient, TranscoderError};
use crate::types::{Job, JobSpec, JobStatus, Pipeline, PipelineNotifications, PipelineSpec};
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_elastictranscoder::types::{
    CreateJobOutput, Job as SdkJob, JobInput, Notifications, Pipeline as SdkPipeline,
};
use aws_sdk_elastictranscoder::Client;
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct ElasticTranscoder {
    pub(crate) client: Arc<Client>,
}

impl ElasticTranscoder {
    pub fn new(aws_config: &SdkConfig) -> Self {
        let config = aws_sdk_elastictranscoder::config::Builder::from(aws_config).build();
        Self { client: Arc::new(Client::from_conf(config)) }
    }

    pub fn client(&self) -> &Client {
        self.client.as_ref()
    }
}

impl From<&SdkPipeline> for Pipeline {
    fn from(pipeline: &SdkPipeline) -> Self {
        let notifications = pipeline
            .notifications()
            .map(|n| PipelineNotifications {
                progressing: n.progressing().map(str::to_string),
                completed: n.completed().map(str::to_string),
                warning: n.warning().map(str::to_string),
                error: n.error().map(str::to_string),
            })
            .unwrap_or_default();

        Pipeline {
            id: pipeline.id().unwrap_or_default().to_string(),
            name: pipeline.name().unwrap_or_default().to_string(),
            arn: pipeline.arn().map(str::to_string),
            status: pipeline.status().map(str::to_string),
            input_bucket: pipeline.input_bucket().map(str::to_string),
            output_bucket: pipeline.output_bucket().map(str::to_string),
            role: pipeline.role().map(str::to_string),
            notifications,
        }
    }
}

impl From<&SdkJob> for Job {
    fn from(job: &SdkJob) -> Self {
        let output = job.output();
        Job {
            id: job.id().unwrap_or_default().to_string(),
            pipeline_id: job.pipeline_id().map(str::to_string),
            input_key: job.input().and_then(|input| input.key()).map(str::to_string),
            output_key: output.and_then(|o| o.key()).map(str::to_string),
            output_key_prefix: job.output_key_prefix().map(str::to_string),
            preset_id: output.and_then(|o| o.preset_id()).map(str::to_string),
            status: job.status().map(str::to_string),
        }
    }
}

#[async_trait]
impl TranscoderClient for ElasticTranscoder {
    async fn list_pipelines(&self) -> Result<Vec<Pipeline>, TranscoderError> {
        let output =
            self.client.list_pipelines().send().await.map_err(|e| ProviderError::from_sdk("ListPipelines", e))?;
        Ok(output.pipelines().iter().map(Pipeline::from).collect())
    }

    async fn create_pipeline(&self, spec: PipelineSpec) -> Result<Option<Pipeline>, TranscoderError> {
        let notifications = Notifications::builder()
            .set_progressing(spec.notifications.progressing)
            .set_completed(spec.notifications.completed)
            .set_warning(spec.notifications.warning)
            .set_error(spec.notifications.error)
            .build();

        let output = self
            .client
            .create_pipeline()
            .name(spec.name)
            .input_bucket(spec.input_bucket)
            .output_bucket(spec.output_bucket)
            .role(spec.role_arn)
            .notifications(notifications)
            .send()
            .await
            .map_err(|e| ProviderError::from_sdk("CreatePipeline", e))?;

        Ok(output.pipeline().map(Pipeline::from))
    }

    async fn delete_pipeline(&self, pipeline_id: &str) -> Result<(), TranscoderError> {
        self.client
            .delete_pipeline()
            .id(pipeline_id)
            .send()
            .await
            .map_err(|e| ProviderError::from_sdk("DeletePipeline", e))?;
        Ok(())
    }

    async fn create_job(&self, spec: JobSpec) -> Result<Option<Job>, TranscoderError> {
        let output = self
            .client
            .create_job()
            .pipeline_id(spec.pipeline_id)
            .input(JobInput::builder().key(spec.input_key).build())
            .output(CreateJobOutput::builder().key(spec.output_key).preset_id(spec.preset_id).build())
            .output_key_prefix(spec.output_key_prefix)
            .send()
            .await
            .map_err(|e| ProviderError::from_sdk("CreateJob", e))?;

        Ok(output.job().map(Job::from))
    }

    async fn cancel_job(&self, job_id: &str) -> Result<(), TranscoderError> {
        self.client.cancel_job().id(job_id).send().await.map_err(|e| ProviderError::from_sdk("CancelJob", e))?;
        Ok(())
    }

    async fn list_jobs_by_status(&self, status: JobStatus) -> Result<Vec<Job>, TranscoderError> {
        let output = self
            .client
            .list_jobs_by_status()
            .status(status.as_ref())
            .send()
            .await
            .map_err(|e| ProviderError::from_sdk("ListJobsByStatus", e))?;
        Ok(output.jobs().iter().map(Job::from).collect())
    }

    async fn list_jobs_by_pipeline(&self, pipeline_id: &str) -> Result<Vec<Job>, TranscoderError> {
        let output = self
            .client
            .list_jobs_by_pipeline()
            .pipeline_id(pipeline_id)
            .send()
            .await
            .map_err(|e| ProviderError::from_sdk("ListJobsByPipeline", e))?;
        Ok(output.jobs().iter().map(Job::from).collect())
    }
}
