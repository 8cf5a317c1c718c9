pub mod error;
pub mod sns;

use async_trait::async_trait;
pub use error::TopicError;

/// Protocol tag used when an SQS queue subscribes to a topic.
pub const SQS_PROTOCOL: &str = "sqs";

/// TopicClient trait
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TopicClient: Send + Sync {
    /// create_topic creates (or returns the already existing) topic and returns its ARN.
    async fn create_topic(&self, name: &str) -> Result<String, TopicError>;

    async fn delete_topic(&self, topic_arn: &str) -> Result<(), TopicError>;

    /// list_topics returns the ARN of every topic visible to the credentials.
    async fn list_topics(&self) -> Result<Vec<String>, TopicError>;

    /// subscribe attaches `endpoint` to the topic, returns the subscription ARN when the provider reports one.
    ///
    /// # Arguments
    ///
    /// * `topic_arn` - The topic to subscribe to.
    /// * `protocol` - Delivery protocol, e.g. [`SQS_PROTOCOL`].
    /// * `endpoint` - Protocol specific endpoint, the queue ARN for SQS.
    async fn subscribe(&self, topic_arn: &str, protocol: &str, endpoint: &str) -> Result<Option<String>, TopicError>;
}
