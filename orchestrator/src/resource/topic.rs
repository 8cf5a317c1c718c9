use std::sync::Arc;

use tracing::instrument;

use crate::core::client::topic::{TopicClient, TopicError, SQS_PROTOCOL};
use crate::resource::queue::NotificationQueue;

/// A pub/sub topic identified by its ARN once created or adopted.
#[derive(Clone)]
pub struct NotificationTopic {
    client: Arc<dyn TopicClient>,
    name: String,
    arn: Option<String>,
}

impl std::fmt::Debug for NotificationTopic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationTopic").field("name", &self.name).field("arn", &self.arn).finish()
    }
}

impl NotificationTopic {
    pub fn new(client: Arc<dyn TopicClient>, name: impl Into<String>) -> Self {
        Self { client, name: name.into(), arn: None }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arn(&self) -> Option<&str> {
        self.arn.as_deref()
    }

    /// First topic ARN containing `name` anywhere.
    ///
    /// This is a substring match, so `name` also matches unrelated topics whose ARN happens to
    /// contain it (`demo` matches `arn:...:demo-other`). Buckets match exactly and queues by suffix.
    #[instrument(skip(self), fields(resource = %self.name))]
    pub async fn find(&self, name: &str) -> Result<Option<String>, TopicError> {
        let topics = self.list_topics().await?;
        Ok(topics.into_iter().find(|arn| arn.contains(name)))
    }

    /// Point the wrapper at an existing topic.
    pub fn adopt(&mut self, arn: impl Into<String>) {
        let arn = arn.into();
        tracing::debug!(topic = %self.name, arn = %arn, "Adopting topic");
        self.arn = Some(arn);
    }

    /// [`find`](Self::find) and, on a match, [`adopt`](Self::adopt) the matched ARN.
    pub async fn exists(&mut self, name: &str) -> Result<bool, TopicError> {
        match self.find(name).await? {
            Some(arn) => {
                self.adopt(arn);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Topic ARN whose last segment is exactly `name`.
    #[instrument(skip(self), fields(resource = %self.name))]
    pub async fn find_exact(&self, name: &str) -> Result<Option<String>, TopicError> {
        let topics = self.list_topics().await?;
        Ok(topics.into_iter().find(|arn| arn.rsplit(':').next() == Some(name)))
    }

    /// [`find_exact`](Self::find_exact) and, on a match, [`adopt`](Self::adopt) the matched ARN.
    pub async fn exists_exact(&mut self, name: &str) -> Result<bool, TopicError> {
        match self.find_exact(name).await? {
            Some(arn) => {
                self.adopt(arn);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Create the topic, renaming the wrapper first when `name` is given. Returns the topic ARN.
    #[instrument(skip(self), fields(resource = %self.name))]
    pub async fn create(&mut self, name: Option<&str>) -> Result<String, TopicError> {
        if let Some(name) = name {
            self.name = name.to_string();
        }
        let arn = self.client.create_topic(&self.name).await.inspect_err(|e| {
            tracing::error!(error = %e, topic = %self.name, "Failed to create topic");
        })?;
        tracing::info!(topic = %self.name, arn = %arn, "Topic created");
        self.arn = Some(arn.clone());
        Ok(arn)
    }

    /// Delete the topic by ARN and forget the ARN.
    #[instrument(skip(self), fields(resource = %self.name))]
    pub async fn delete(&mut self) -> Result<(), TopicError> {
        let arn = self.arn.as_deref().ok_or_else(|| TopicError::NotCreated(self.name.clone()))?;
        self.client.delete_topic(arn).await.inspect_err(|e| {
            tracing::error!(error = %e, arn, "Failed to delete topic");
        })?;
        tracing::info!(arn, "Topic deleted");
        self.arn = None;
        Ok(())
    }

    #[instrument(skip(self), fields(resource = %self.name))]
    pub async fn list_topics(&self) -> Result<Vec<String>, TopicError> {
        self.client.list_topics().await.inspect_err(|e| {
            tracing::error!(error = %e, "Failed to list topics");
        })
    }

    /// Subscribe `queue` to the topic over the `sqs` protocol.
    ///
    /// Both the topic and the queue need an ARN, nothing is sent to the provider otherwise.
    /// Returns the subscription ARN when the provider reports one.
    #[instrument(skip(self, queue), fields(resource = %self.name, queue = %queue.name()))]
    pub async fn subscribe(&self, queue: &NotificationQueue) -> Result<Option<String>, TopicError> {
        let topic_arn = self
            .arn
            .as_deref()
            .ok_or_else(|| TopicError::NotCreated(self.name.clone()))
            .inspect_err(|e| tracing::error!(error = %e, "Cannot subscribe"))?;
        let queue_arn = queue
            .arn()
            .ok_or_else(|| TopicError::QueueNotCreated(queue.name().to_string()))
            .inspect_err(|e| tracing::error!(error = %e, "Cannot subscribe"))?;

        let subscription_arn = self.client.subscribe(topic_arn, SQS_PROTOCOL, queue_arn).await.inspect_err(|e| {
            tracing::error!(error = %e, topic_arn, queue_arn, "Failed to subscribe queue to topic");
        })?;
        tracing::info!(topic_arn, queue_arn, subscription = ?subscription_arn, "Queue subscribed to topic");
        Ok(subscription_arn)
    }
}
