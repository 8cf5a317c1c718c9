pub mod elastic_transcoder;
pub mod error;

use crate::types::{Job, JobSpec, JobStatus, Pipeline, PipelineSpec};
use async_trait::async_trait;
pub use error::TranscoderError;

/// Trait defining transcoding pipeline and job operations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TranscoderClient: Send + Sync {
    /// First page of pipelines visible to the credentials
    async fn list_pipelines(&self) -> Result<Vec<Pipeline>, TranscoderError>;

    /// Create a pipeline, `None` when the provider answers without a pipeline body
    async fn create_pipeline(&self, spec: PipelineSpec) -> Result<Option<Pipeline>, TranscoderError>;

    async fn delete_pipeline(&self, pipeline_id: &str) -> Result<(), TranscoderError>;

    /// Submit a job, `None` when the provider answers without a job body
    async fn create_job(&self, spec: JobSpec) -> Result<Option<Job>, TranscoderError>;

    async fn cancel_job(&self, job_id: &str) -> Result<(), TranscoderError>;

    async fn list_jobs_by_status(&self, status: JobStatus) -> Result<Vec<Job>, TranscoderError>;

    async fn list_jobs_by_pipeline(&self, pipeline_id: &str) -> Result<Vec<Job>, TranscoderError>;
}
