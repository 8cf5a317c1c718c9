use crate::types::params::ProviderConfig;
use aws_config::SdkConfig;

/// Cloud provider
/// This enum represents the different cloud providers the clients can be built against.
#[derive(Clone)]
pub enum CloudProvider {
    AWS(Box<SdkConfig>),
}

impl CloudProvider {
    /// Resolve the SDK configuration described by `provider_config`.
    pub async fn from_provider_config(provider_config: &ProviderConfig) -> Self {
        CloudProvider::AWS(Box::new(provider_config.get_aws_config().await))
    }

    /// Get the AWS SDK config
    pub fn get_aws_config(&self) -> &SdkConfig {
        match self {
            CloudProvider::AWS(config) => config.as_ref(),
        }
    }

    pub fn get_provider_name(&self) -> String {
        match self {
            CloudProvider::AWS(_) => "AWS".to_string(),
        }
    }
}

impl std::fmt::Debug for CloudProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.get_provider_name().as_str())
    }
}

// Implement Display using Debug since they share the same formatting
impl std::fmt::Display for CloudProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}
