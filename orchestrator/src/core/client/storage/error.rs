use crate::core::client::error::{ErrorKind, ProviderError};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Failed to stream object: {0}")]
    ObjectStreamError(String),

    #[error("Failed to read local file {path}: {source}")]
    LocalRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write local file {path}: {source}")]
    LocalWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StorageError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StorageError::Provider(e) => e.kind,
            StorageError::ObjectStreamError(_) => ErrorKind::Transient,
            StorageError::LocalRead { source, .. } | StorageError::LocalWrite { source, .. } => match source.kind() {
                std::io::ErrorKind::NotFound => ErrorKind::NotFound,
                std::io::ErrorKind::PermissionDenied => ErrorKind::PermissionDenied,
                _ => ErrorKind::Unknown,
            },
        }
    }
}
