use crate::core::client::error::{ErrorKind, ProviderError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TopicError {
    #[error("Topic provider error: {0}")]
    Provider(#[from] ProviderError),

    /// The wrapper has no ARN yet: neither `create` nor `adopt` ran.
    #[error("Topic {0} has no ARN, create or adopt it first")]
    NotCreated(String),

    /// The queue to subscribe has no ARN yet.
    #[error("Queue {0} has no ARN, create or adopt it before subscribing")]
    QueueNotCreated(String),

    #[error("Provider did not return a topic ARN for {0}")]
    MissingTopicArn(String),
}

impl TopicError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TopicError::Provider(e) => e.kind,
            TopicError::NotCreated(_) | TopicError::QueueNotCreated(_) => ErrorKind::NotFound,
            TopicError::MissingTopicArn(_) => ErrorKind::Unknown,
        }
    }
}
