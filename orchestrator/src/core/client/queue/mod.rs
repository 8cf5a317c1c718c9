pub mod error;
pub mod sqs;

use crate::types::QueueMessage;
use async_trait::async_trait;
pub use error::QueueError;

/// Trait defining queue operations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QueueClient: Send + Sync {
    /// Create a queue and return its URL
    async fn create_queue(&self, queue_name: &str) -> Result<String, QueueError>;

    async fn delete_queue(&self, queue_url: &str) -> Result<(), QueueError>;

    /// URLs of every queue visible to the credentials
    async fn list_queues(&self) -> Result<Vec<String>, QueueError>;

    /// Resolve the queue ARN from its `QueueArn` attribute
    async fn get_queue_arn(&self, queue_url: &str) -> Result<String, QueueError>;

    /// Replace the queue's access policy document
    async fn set_queue_policy(&self, queue_url: &str, policy: &str) -> Result<(), QueueError>;

    /// One short-poll receive, returns whatever the provider hands back (possibly nothing)
    async fn receive_messages(&self, queue_url: &str) -> Result<Vec<QueueMessage>, QueueError>;

    async fn delete_message(&self, queue_url: &str, receipt_handle: &str) -> Result<(), QueueError>;
}
