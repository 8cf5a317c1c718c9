use std::sync::Arc;

use serde_json::json;
use tracing::instrument;

use crate::core::client::queue::{QueueClient, QueueError};
use crate::resource::topic::NotificationTopic;
use crate::types::QueueMessage;

/// A message queue identified by its URL (and ARN) once created or adopted.
#[derive(Clone)]
pub struct NotificationQueue {
    client: Arc<dyn QueueClient>,
    name: String,
    url: Option<String>,
    arn: Option<String>,
}

impl std::fmt::Debug for NotificationQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationQueue")
            .field("name", &self.name)
            .field("url", &self.url)
            .field("arn", &self.arn)
            .finish()
    }
}

impl NotificationQueue {
    pub fn new(client: Arc<dyn QueueClient>, name: impl Into<String>) -> Self {
        Self { client, name: name.into(), url: None, arn: None }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn arn(&self) -> Option<&str> {
        self.arn.as_deref()
    }

    fn require_url(&self) -> Result<&str, QueueError> {
        self.url.as_deref().ok_or_else(|| QueueError::NotCreated(self.name.clone()))
    }

    /// First queue URL ending with `name`.
    #[instrument(skip(self), fields(resource = %self.name))]
    pub async fn find(&self, name: &str) -> Result<Option<String>, QueueError> {
        let urls = self.list_queues().await?;
        Ok(urls.into_iter().find(|url| url.ends_with(name)))
    }

    /// Point the wrapper at an existing queue, resolving its ARN.
    #[instrument(skip(self), fields(resource = %self.name))]
    pub async fn adopt(&mut self, url: &str) -> Result<(), QueueError> {
        let arn = self.client.get_queue_arn(url).await.inspect_err(|e| {
            tracing::error!(error = %e, url, "Failed to resolve queue ARN");
        })?;
        tracing::debug!(url, arn = %arn, "Adopting queue");
        self.url = Some(url.to_string());
        self.arn = Some(arn);
        Ok(())
    }

    /// [`find`](Self::find) and, on a match, [`adopt`](Self::adopt) the matched URL.
    pub async fn exists(&mut self, name: &str) -> Result<bool, QueueError> {
        match self.find(name).await? {
            Some(url) => {
                self.adopt(&url).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Queue URL whose last path segment is exactly `name`.
    #[instrument(skip(self), fields(resource = %self.name))]
    pub async fn find_exact(&self, name: &str) -> Result<Option<String>, QueueError> {
        let urls = self.list_queues().await?;
        Ok(urls.into_iter().find(|url| queue_name_of(url) == name))
    }

    /// [`find_exact`](Self::find_exact) and, on a match, [`adopt`](Self::adopt) the matched URL.
    pub async fn exists_exact(&mut self, name: &str) -> Result<bool, QueueError> {
        match self.find_exact(name).await? {
            Some(url) => {
                self.adopt(&url).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// True when the recorded URL names this queue exactly, not just by suffix.
    pub fn is_exact_match(&self) -> bool {
        self.url.as_deref().is_some_and(|url| queue_name_of(url) == self.name)
    }

    /// Create the queue, renaming the wrapper first when `name` is given. Returns the queue URL.
    #[instrument(skip(self), fields(resource = %self.name))]
    pub async fn create(&mut self, name: Option<&str>) -> Result<String, QueueError> {
        if let Some(name) = name {
            self.name = name.to_string();
        }
        let url = self.client.create_queue(&self.name).await.inspect_err(|e| {
            tracing::error!(error = %e, queue = %self.name, "Failed to create queue");
        })?;
        self.adopt(&url).await?;
        tracing::info!(queue = %self.name, url = %url, "Queue created");
        Ok(url)
    }

    /// Delete the queue by URL and forget its URL and ARN.
    #[instrument(skip(self), fields(resource = %self.name))]
    pub async fn delete(&mut self) -> Result<(), QueueError> {
        let url = self.require_url()?;
        self.client.delete_queue(url).await.inspect_err(|e| {
            tracing::error!(error = %e, url, "Failed to delete queue");
        })?;
        tracing::info!(url, "Queue deleted");
        self.url = None;
        self.arn = None;
        Ok(())
    }

    #[instrument(skip(self), fields(resource = %self.name))]
    pub async fn list_queues(&self) -> Result<Vec<String>, QueueError> {
        self.client.list_queues().await.inspect_err(|e| {
            tracing::error!(error = %e, "Failed to list queues");
        })
    }

    /// One short-poll receive. An empty result does not mean the queue is empty.
    #[instrument(skip(self), fields(resource = %self.name))]
    pub async fn receive_messages(&self) -> Result<Vec<QueueMessage>, QueueError> {
        let url = self.require_url()?;
        let messages = self.client.receive_messages(url).await.inspect_err(|e| {
            tracing::error!(error = %e, url, "Failed to receive messages");
        })?;
        tracing::debug!(count = messages.len(), "Received messages");
        Ok(messages)
    }

    /// Acknowledge a received message so it is not delivered again.
    #[instrument(skip(self, receipt_handle), fields(resource = %self.name))]
    pub async fn delete_message(&self, receipt_handle: &str) -> Result<(), QueueError> {
        let url = self.require_url()?;
        self.client.delete_message(url, receipt_handle).await.inspect_err(|e| {
            tracing::error!(error = %e, url, "Failed to delete message");
        })
    }

    /// Let `topic` publish into this queue.
    ///
    /// Without this policy the provider silently drops what the topic delivers.
    #[instrument(skip(self, topic), fields(resource = %self.name, topic = %topic.name()))]
    pub async fn allow_topic(&self, topic: &NotificationTopic) -> Result<(), QueueError> {
        let url = self.require_url()?;
        let queue_arn = self.arn.as_deref().ok_or_else(|| QueueError::NotCreated(self.name.clone()))?;
        let topic_arn = topic.arn().ok_or_else(|| QueueError::TopicNotCreated(topic.name().to_string()))?;

        let policy = serde_json::to_string(&publish_policy(queue_arn, topic_arn))?;
        self.client.set_queue_policy(url, &policy).await.inspect_err(|e| {
            tracing::error!(error = %e, url, topic_arn, "Failed to set queue policy");
        })?;
        tracing::info!(topic_arn, "Topic allowed to publish to queue");
        Ok(())
    }
}

fn queue_name_of(url: &str) -> &str {
    url.trim_end_matches('/').rsplit('/').next().unwrap_or_default()
}

/// Policy granting `topic_arn` `sqs:SendMessage` on `queue_arn`.
pub(crate) fn publish_policy(queue_arn: &str, topic_arn: &str) -> serde_json::Value {
    json!({
        "Version": "2012-10-17",
        "Statement": [{
            "Sid": "AllowTopicToSendMessage",
            "Effect": "Allow",
            "Principal": { "Service": "sns.amazonaws.com" },
            "Action": "sqs:SendMessage",
            "Resource": queue_arn,
            "Condition": { "ArnEquals": { "aws:SourceArn": topic_arn } }
        }]
    })
}
