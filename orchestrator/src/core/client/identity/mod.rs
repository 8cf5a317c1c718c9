pub mod error;
pub mod iam;

use async_trait::async_trait;
pub use error::IdentityError;

/// Trait defining role lookups
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityClient: Send + Sync {
    /// Resolve a role name to its ARN
    async fn role_arn(&self, role_name: &str) -> Result<String, IdentityError>;
}
