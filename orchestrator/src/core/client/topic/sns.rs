use crate::core::client::error::ProviderError;
use crate::core::client::topic::{TopicClient, TopicError};
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_sns::Client;
use std::sync::Arc;

/// SNS is a thin handle over the AWS SNS client.
#[derive(Clone, Debug)]
pub struct SNS(pub(crate) Arc<Client>);

impl SNS {
    pub fn new(aws_config: &SdkConfig) -> Self {
        Self(Arc::new(Client::new(aws_config)))
    }

    pub fn client(&self) -> &Client {
        self.0.as_ref()
    }
}

#[async_trait]
impl TopicClient for SNS {
    async fn create_topic(&self, name: &str) -> Result<String, TopicError> {
        let response =
            self.client().create_topic().name(name).send().await.map_err(|e| ProviderError::from_sdk("CreateTopic", e))?;

        let topic_arn = response.topic_arn().ok_or_else(|| TopicError::MissingTopicArn(name.to_string()))?;
        tracing::debug!(topic_arn = %topic_arn, "SNS topic created");
        Ok(topic_arn.to_string())
    }

    async fn delete_topic(&self, topic_arn: &str) -> Result<(), TopicError> {
        self.client()
            .delete_topic()
            .topic_arn(topic_arn)
            .send()
            .await
            .map_err(|e| ProviderError::from_sdk("DeleteTopic", e))?;
        Ok(())
    }

    async fn list_topics(&self) -> Result<Vec<String>, TopicError> {
        let resp = self.client().list_topics().send().await.map_err(|e| ProviderError::from_sdk("ListTopics", e))?;
        Ok(resp.topics().iter().filter_map(|topic| topic.topic_arn().map(str::to_string)).collect())
    }

    async fn subscribe(&self, topic_arn: &str, protocol: &str, endpoint: &str) -> Result<Option<String>, TopicError> {
        let resp = self
            .client()
            .subscribe()
            .topic_arn(topic_arn)
            .protocol(protocol)
            .endpoint(endpoint)
            .send()
            .await
            .map_err(|e| ProviderError::from_sdk("Subscribe", e))?;
        Ok(resp.subscription_arn().map(str::to_string))
    }
}
