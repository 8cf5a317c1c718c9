use serde::{Deserialize, Serialize};

/// A message pulled from a queue, acknowledged later through its receipt handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueMessage {
    pub message_id: Option<String>,
    pub body: Option<String>,
    pub receipt_handle: Option<String>,
}
