use clap::Args;
use url::Url;

/// Parameters used to config AWS.
#[derive(Clone, Args)]
pub struct AWSConfigCliArgs {
    /// The region every client talks to.
    #[arg(env = "AWS_REGION", long, default_value = "eu-west-1")]
    pub aws_region: String,

    /// Override the endpoint of every AWS service.
    /// Point this at LocalStack (e.g. http://localhost:4566) to run against a local stack.
    #[arg(env = "MEDIA_ORCHESTRATOR_AWS_ENDPOINT_URL", long)]
    pub aws_endpoint_url: Option<Url>,

    /// Named profile from the shared AWS config files.
    #[arg(env = "AWS_PROFILE", long)]
    pub aws_profile: Option<String>,

    /// Static access key id, only used together with the secret access key.
    #[arg(env = "AWS_ACCESS_KEY_ID", long, hide_env_values = true, requires = "aws_secret_access_key")]
    pub aws_access_key_id: Option<String>,

    /// Static secret access key, only used together with the access key id.
    #[arg(env = "AWS_SECRET_ACCESS_KEY", long, hide_env_values = true, requires = "aws_access_key_id")]
    pub aws_secret_access_key: Option<String>,
}

impl std::fmt::Debug for AWSConfigCliArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AWSConfigCliArgs")
            .field("aws_region", &self.aws_region)
            .field("aws_endpoint_url", &self.aws_endpoint_url)
            .field("aws_profile", &self.aws_profile)
            .field("aws_access_key_id", &self.aws_access_key_id)
            .field("aws_secret_access_key", &self.aws_secret_access_key.as_ref().map(|_| "** redacted **"))
            .finish()
    }
}
