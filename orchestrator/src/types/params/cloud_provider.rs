use crate::cli::provider::aws::AWSConfigCliArgs;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_credential_types::Credentials;
use url::Url;

/// Explicit provider configuration handed to every client instead of relying on ambient globals.
///
/// Anything left unset falls through to the SDK's default resolution chain
/// (environment, shared config files, instance metadata).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub region: String,
    /// Override for every service endpoint, e.g. `http://localhost:4566` for LocalStack.
    pub endpoint_url: Option<Url>,
    pub profile: Option<String>,
    pub static_credentials: Option<StaticCredentials>,
}

#[derive(Clone, PartialEq, Eq)]
pub struct StaticCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
}

impl std::fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"** redacted **")
            .finish()
    }
}

impl ProviderConfig {
    pub fn new(region: impl Into<String>) -> Self {
        Self { region: region.into(), endpoint_url: None, profile: None, static_credentials: None }
    }

    pub fn with_endpoint_url(mut self, endpoint_url: Url) -> Self {
        self.endpoint_url = Some(endpoint_url);
        self
    }

    pub fn uses_custom_endpoint(&self) -> bool {
        self.endpoint_url.is_some()
    }

    pub async fn get_aws_config(&self) -> SdkConfig {
        let mut loader = aws_config::defaults(BehaviorVersion::latest()).region(Region::new(self.region.clone()));

        if let Some(endpoint_url) = &self.endpoint_url {
            loader = loader.endpoint_url(endpoint_url.as_str().trim_end_matches('/'));
        }
        if let Some(profile) = &self.profile {
            loader = loader.profile_name(profile);
        }
        if let Some(credentials) = &self.static_credentials {
            loader = loader.credentials_provider(Credentials::from_keys(
                credentials.access_key_id.clone(),
                credentials.secret_access_key.clone(),
                None,
            ));
        }

        loader.load().await
    }
}

impl From<AWSConfigCliArgs> for ProviderConfig {
    fn from(args: AWSConfigCliArgs) -> Self {
        let static_credentials = match (args.aws_access_key_id, args.aws_secret_access_key) {
            (Some(access_key_id), Some(secret_access_key)) => {
                Some(StaticCredentials { access_key_id, secret_access_key })
            }
            _ => None,
        };
        Self {
            region: args.aws_region,
            endpoint_url: args.aws_endpoint_url,
            profile: args.aws_profile,
            static_credentials,
        }
    }
}
