use crate::core::client::error::{ErrorKind, ProviderError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IdentityError {
    #[error("Identity provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Role {0} not found")]
    RoleNotFound(String),
}

impl IdentityError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            IdentityError::Provider(e) => e.kind,
            IdentityError::RoleNotFound(_) => ErrorKind::NotFound,
        }
    }
}
