use crate::core::client::error::{ErrorKind, ProviderError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QueueError {
    #[error("Queue provider error: {0}")]
    Provider(#[from] ProviderError),

    /// The wrapper has no URL yet: neither `create` nor `adopt` ran.
    #[error("Queue {0} has no URL, create or adopt it first")]
    NotCreated(String),

    /// The topic allowed to publish has no ARN yet.
    #[error("Topic {0} has no ARN, create or adopt it before allowing it to publish")]
    TopicNotCreated(String),

    #[error("Failed to get queue url for queue name : {0}")]
    FailedToGetQueueUrl(String),

    #[error("Failed to get queue arn for queue url : {0}")]
    FailedToGetQueueArn(String),

    #[error("Failed to build queue policy: {0}")]
    PolicyError(#[from] serde_json::Error),
}

impl QueueError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            QueueError::Provider(e) => e.kind,
            QueueError::NotCreated(_) | QueueError::TopicNotCreated(_) => ErrorKind::NotFound,
            QueueError::FailedToGetQueueUrl(_) | QueueError::FailedToGetQueueArn(_) | QueueError::PolicyError(_) => {
                ErrorKind::Unknown
            }
        }
    }
}
