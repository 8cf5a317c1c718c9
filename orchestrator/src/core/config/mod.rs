use std::sync::Arc;

use crate::core::client::{
    ElasticTranscoder, IdentityClient, QueueClient, StorageClient, TopicClient, TranscoderClient, AWSS3, IAM, SNS,
    SQS,
};
use crate::core::cloud::CloudProvider;
use crate::types::params::ProviderConfig;

/// The provider clients every resource wrapper is built from.
///
/// Clients are shared trait objects so tests can hand in mocks or the in-memory fake.
#[derive(Clone)]
pub struct Config {
    /// Resolved provider configuration
    provider_config: ProviderConfig,
    /// Storage client
    storage: Arc<dyn StorageClient>,
    /// Topic client
    topic: Arc<dyn TopicClient>,
    /// Queue client
    queue: Arc<dyn QueueClient>,
    /// Transcoder client
    transcoder: Arc<dyn TranscoderClient>,
    /// Identity client
    identity: Arc<dyn IdentityClient>,
}

impl Config {
    pub fn new(
        provider_config: ProviderConfig,
        storage: Arc<dyn StorageClient>,
        topic: Arc<dyn TopicClient>,
        queue: Arc<dyn QueueClient>,
        transcoder: Arc<dyn TranscoderClient>,
        identity: Arc<dyn IdentityClient>,
    ) -> Self {
        Self { provider_config, storage, topic, queue, transcoder, identity }
    }

    /// Build the AWS clients described by `provider_config`
    pub async fn from_provider_config(provider_config: ProviderConfig) -> Self {
        let cloud_provider = CloudProvider::from_provider_config(&provider_config).await;
        tracing::debug!(
            provider = %cloud_provider,
            region = %provider_config.region,
            endpoint = ?provider_config.endpoint_url.as_ref().map(|u| u.as_str()),
            "Building provider clients"
        );

        let storage = Self::build_storage_client(&cloud_provider, provider_config.uses_custom_endpoint());
        let topic = Self::build_topic_client(&cloud_provider);
        let queue = Self::build_queue_client(&cloud_provider);
        let transcoder = Self::build_transcoder_client(&cloud_provider);
        let identity = Self::build_identity_client(&cloud_provider);

        Self::new(provider_config, storage, topic, queue, transcoder, identity)
    }

    fn build_storage_client(cloud_provider: &CloudProvider, force_path_style: bool) -> Arc<dyn StorageClient> {
        Arc::new(AWSS3::new(cloud_provider.get_aws_config(), force_path_style))
    }

    fn build_topic_client(cloud_provider: &CloudProvider) -> Arc<dyn TopicClient> {
        Arc::new(SNS::new(cloud_provider.get_aws_config()))
    }

    fn build_queue_client(cloud_provider: &CloudProvider) -> Arc<dyn QueueClient> {
        Arc::new(SQS::new(cloud_provider.get_aws_config()))
    }

    fn build_transcoder_client(cloud_provider: &CloudProvider) -> Arc<dyn TranscoderClient> {
        Arc::new(ElasticTranscoder::new(cloud_provider.get_aws_config()))
    }

    fn build_identity_client(cloud_provider: &CloudProvider) -> Arc<dyn IdentityClient> {
        Arc::new(IAM::new(cloud_provider.get_aws_config()))
    }

    /// Returns the provider config
    pub fn provider_config(&self) -> &ProviderConfig {
        &self.provider_config
    }

    /// Returns the storage client
    pub fn storage(&self) -> Arc<dyn StorageClient> {
        self.storage.clone()
    }

    /// Returns the topic client
    pub fn topic(&self) -> Arc<dyn TopicClient> {
        self.topic.clone()
    }

    /// Returns the queue client
    pub fn queue(&self) -> Arc<dyn QueueClient> {
        self.queue.clone()
    }

    /// Returns the transcoder client
    pub fn transcoder(&self) -> Arc<dyn TranscoderClient> {
        self.transcoder.clone()
    }

    /// Returns the identity client
    pub fn identity(&self) -> Arc<dyn IdentityClient> {
        self.identity.clone()
    }
}
