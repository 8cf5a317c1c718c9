use crate::core::client::error::ProviderError;
use crate::core::client::queue::{QueueClient, QueueError};
use crate::types::QueueMessage;
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_sqs::types::QueueAttributeName;
use aws_sdk_sqs::Client;

#[derive(Clone, Debug)]
pub struct SQS(Client);

impl SQS {
    /// Build the client from the shared SDK configuration (region, endpoint override, credentials).
    pub fn new(aws_config: &SdkConfig) -> Self {
        Self(Client::from_conf(aws_sdk_sqs::config::Builder::from(aws_config).build()))
    }

    pub fn client(&self) -> &Client {
        &self.0
    }
}

#[async_trait]
impl QueueClient for SQS {
    async fn create_queue(&self, queue_name: &str) -> Result<String, QueueError> {
        let output = self
            .client()
            .create_queue()
            .queue_name(queue_name)
            .send()
            .await
            .map_err(|e| ProviderError::from_sdk("CreateQueue", e))?;

        output.queue_url().map(str::to_string).ok_or_else(|| QueueError::FailedToGetQueueUrl(queue_name.to_string()))
    }

    async fn delete_queue(&self, queue_url: &str) -> Result<(), QueueError> {
        self.client()
            .delete_queue()
            .queue_url(queue_url)
            .send()
            .await
            .map_err(|e| ProviderError::from_sdk("DeleteQueue", e))?;
        Ok(())
    }

    async fn list_queues(&self) -> Result<Vec<String>, QueueError> {
        let output = self.client().list_queues().send().await.map_err(|e| ProviderError::from_sdk("ListQueues", e))?;
        Ok(output.queue_urls().to_vec())
    }

    async fn get_queue_arn(&self, queue_url: &str) -> Result<String, QueueError> {
        let attributes = self
            .client()
            .get_queue_attributes()
            .queue_url(queue_url)
            .attribute_names(QueueAttributeName::QueueArn)
            .send()
            .await
            .map_err(|e| ProviderError::from_sdk("GetQueueAttributes", e))?;

        attributes
            .attributes()
            .and_then(|attributes| attributes.get(&QueueAttributeName::QueueArn))
            .cloned()
            .ok_or_else(|| QueueError::FailedToGetQueueArn(queue_url.to_string()))
    }

    async fn set_queue_policy(&self, queue_url: &str, policy: &str) -> Result<(), QueueError> {
        self.client()
            .set_queue_attributes()
            .queue_url(queue_url)
            .attributes(QueueAttributeName::Policy, policy)
            .send()
            .await
            .map_err(|e| ProviderError::from_sdk("SetQueueAttributes", e))?;
        Ok(())
    }

    async fn receive_messages(&self, queue_url: &str) -> Result<Vec<QueueMessage>, QueueError> {
        let output = self
            .client()
            .receive_message()
            .queue_url(queue_url)
            .send()
            .await
            .map_err(|e| ProviderError::from_sdk("ReceiveMessage", e))?;

        Ok(output
            .messages()
            .iter()
            .map(|message| QueueMessage {
                message_id: message.message_id().map(str::to_string),
                body: message.body().map(str::to_string),
                receipt_handle: message.receipt_handle().map(str::to_string),
            })
            .collect())
    }

    async fn delete_message(&self, queue_url: &str, receipt_handle: &str) -> Result<(), QueueError> {
        self.client()
            .delete_message()
            .queue_url(queue_url)
            .receipt_handle(receipt_handle)
            .send()
            .await
            .map_err(|e| ProviderError::from_sdk("DeleteMessage", e))?;
        Ok(())
    }
}
