use crate::core::client::error::ProviderError;
use crate::core::client::identity::{IdentityClient, IdentityError};
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_iam::Client;

#[derive(Clone, Debug)]
pub struct IAM(Client);

impl IAM {
    pub fn new(aws_config: &SdkConfig) -> Self {
        Self(Client::new(aws_config))
    }

    pub fn client(&self) -> &Client {
        &self.0
    }
}

#[async_trait]
impl IdentityClient for IAM {
    async fn role_arn(&self, role_name: &str) -> Result<String, IdentityError> {
        let output = self
            .client()
            .get_role()
            .role_name(role_name)
            .send()
            .await
            .map_err(|e| ProviderError::from_sdk("GetRole", e))?;

        output.role().map(|role| role.arn().to_string()).ok_or_else(|| IdentityError::RoleNotFound(role_name.to_string()))
    }
}
