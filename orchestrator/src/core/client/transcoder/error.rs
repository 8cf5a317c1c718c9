use crate::core::client::error::{ErrorKind, ProviderError};
use crate::core::client::identity::IdentityError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TranscoderError {
    #[error("Transcoder provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Failed to resolve the transcoder role: {0}")]
    Role(#[from] IdentityError),

    /// The provider accepted `CreatePipeline` but returned no pipeline body.
    #[error("Create pipeline error! No pipeline returned for {0}")]
    MissingPipeline(String),

    #[error("Provider did not return a job for pipeline {0}")]
    MissingJob(String),

    /// No pipeline has been created or adopted by this service instance.
    #[error("No pipeline adopted, create or adopt one first")]
    NoPipelineAdopted,

    #[error("Topic {0} has no ARN, create or adopt it before wiring it to a pipeline")]
    TopicNotCreated(String),
}

impl TranscoderError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TranscoderError::Provider(e) => e.kind,
            TranscoderError::Role(e) => e.kind(),
            TranscoderError::NoPipelineAdopted | TranscoderError::TopicNotCreated(_) => ErrorKind::NotFound,
            TranscoderError::MissingPipeline(_) | TranscoderError::MissingJob(_) => ErrorKind::Unknown,
        }
    }
}
