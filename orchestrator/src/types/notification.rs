use crate::types::transcoder::JobStatus;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotificationParseError {
    #[error("Queue message has no body")]
    MissingBody,
    #[error("Queue message body is not an SNS envelope: {0}")]
    InvalidEnvelope(#[source] serde_json::Error),
    #[error("SNS envelope message is not a transcoder notification: {0}")]
    InvalidPayload(#[source] serde_json::Error),
}

/// The SNS envelope wrapping everything delivered to an SQS subscriber.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SnsEnvelope {
    message: String,
    #[serde(default)]
    topic_arn: Option<String>,
}

/// Event published by Elastic Transcoder on the pipeline's notification topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscoderNotification {
    /// One of `PROGRESSING`, `COMPLETED`, `WARNING`, `ERROR`.
    pub state: String,
    pub job_id: String,
    #[serde(default)]
    pub pipeline_id: Option<String>,
    #[serde(default)]
    pub error_code: Option<i64>,
    #[serde(default)]
    pub message_details: Option<String>,
    #[serde(skip)]
    pub topic_arn: Option<String>,
}

impl TranscoderNotification {
    /// Parse a queue body: the SNS envelope is JSON, and its `Message` field is JSON again.
    pub fn from_queue_body(body: &str) -> Result<Self, NotificationParseError> {
        let envelope: SnsEnvelope = serde_json::from_str(body).map_err(NotificationParseError::InvalidEnvelope)?;
        let mut notification: TranscoderNotification =
            serde_json::from_str(&envelope.message).map_err(NotificationParseError::InvalidPayload)?;
        notification.topic_arn = envelope.topic_arn;
        Ok(notification)
    }

    /// Job status implied by the event, `None` for warnings.
    pub fn job_status(&self) -> Option<JobStatus> {
        match self.state.as_str() {
            "PROGRESSING" => Some(JobStatus::Progressing),
            "COMPLETED" => Some(JobStatus::Complete),
            "ERROR" => Some(JobStatus::Error),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.job_status().is_some_and(|status| status.is_terminal())
    }
}
