use thiserror::Error;

use crate::core::client::error::ErrorKind;
use crate::core::client::identity::IdentityError;
use crate::core::client::queue::QueueError;
use crate::core::client::storage::StorageError;
use crate::core::client::topic::TopicError;
use crate::core::client::transcoder::TranscoderError;
use crate::types::notification::NotificationParseError;
use crate::utils::poll::PollError;

/// Result type for media orchestrator operations
pub type MediaResult<T> = Result<T, MediaError>;

/// Error types for the media orchestrator
#[derive(Error, Debug)]
pub enum MediaError {
    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("Topic error: {0}")]
    TopicError(#[from] TopicError),

    #[error("Queue error: {0}")]
    QueueError(#[from] QueueError),

    #[error("Transcoder error: {0}")]
    TranscoderError(#[from] TranscoderError),

    #[error("Identity error: {0}")]
    IdentityError(#[from] IdentityError),

    #[error("Notification error: {0}")]
    NotificationError(#[from] NotificationParseError),

    #[error("Poll error: {0}")]
    PollError(#[from] PollError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error while installing the logger
    #[error("Logging setup error: {0}")]
    LoggingError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Media Orchestrator Error: {0}")]
    Other(#[from] anyhow::Error),
}

impl MediaError {
    /// Classification of the underlying failure, `Unknown` for local errors.
    pub fn kind(&self) -> ErrorKind {
        match self {
            MediaError::StorageError(e) => e.kind(),
            MediaError::TopicError(e) => e.kind(),
            MediaError::QueueError(e) => e.kind(),
            MediaError::TranscoderError(e) => e.kind(),
            MediaError::IdentityError(e) => e.kind(),
            MediaError::PollError(_) => ErrorKind::Transient,
            MediaError::NotificationError(_)
            | MediaError::ConfigError(_)
            | MediaError::LoggingError(_)
            | MediaError::IoError(_)
            | MediaError::JsonError(_)
            | MediaError::Other(_) => ErrorKind::Unknown,
        }
    }
}
