use aws_sdk_s3::config::http::HttpResponse;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use serde::{Deserialize, Serialize};
use strum_macros::Display;
use thiserror::Error;

/// Coarse classification of a failed provider call, so callers can branch without parsing text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum ErrorKind {
    NotFound,
    PermissionDenied,
    Throttled,
    /// Timeouts, connection failures and unreadable responses.
    Transient,
    Unknown,
}

impl ErrorKind {
    /// Map an AWS error code to a kind.
    pub fn from_code(code: &str) -> Option<Self> {
        let kind = match code {
            "NoSuchBucket"
            | "NoSuchKey"
            | "NotFound"
            | "NotFoundException"
            | "QueueDoesNotExist"
            | "AWS.SimpleQueueService.NonExistentQueue"
            | "ResourceNotFoundException"
            | "NoSuchEntity" => ErrorKind::NotFound,
            "AccessDenied"
            | "AccessDeniedException"
            | "AuthorizationError"
            | "Forbidden"
            | "InvalidAccessKeyId"
            | "InvalidClientTokenId"
            | "SignatureDoesNotMatch"
            | "ExpiredToken" => ErrorKind::PermissionDenied,
            "Throttling"
            | "ThrottlingException"
            | "ThrottledException"
            | "SlowDown"
            | "RequestLimitExceeded"
            | "TooManyRequestsException"
            | "LimitExceededException" => ErrorKind::Throttled,
            "InternalError" | "InternalFailure" | "ServiceUnavailable" | "RequestTimeout" => ErrorKind::Transient,
            _ => return None,
        };
        Some(kind)
    }

    /// Fallback for responses that carry no error code (e.g. S3 HEAD requests).
    pub fn from_status(status: u16) -> Self {
        match status {
            404 => ErrorKind::NotFound,
            401 | 403 => ErrorKind::PermissionDenied,
            429 => ErrorKind::Throttled,
            500..=599 => ErrorKind::Transient,
            _ => ErrorKind::Unknown,
        }
    }
}

/// A failed call to one of the provider APIs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{operation} failed ({kind}): {message}")]
pub struct ProviderError {
    pub kind: ErrorKind,
    pub operation: &'static str,
    pub code: Option<String>,
    pub message: String,
}

impl ProviderError {
    pub fn new(
        kind: ErrorKind,
        operation: &'static str,
        code: Option<&str>,
        message: impl Into<String>,
    ) -> Self {
        Self { kind, operation, code: code.map(str::to_string), message: message.into() }
    }

    /// Classify an SDK error returned by `send()` on any of the service clients.
    pub fn from_sdk<E>(operation: &'static str, err: SdkError<E, HttpResponse>) -> Self
    where
        E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
    {
        let code = err.code().map(str::to_string);
        let kind = match &err {
            SdkError::TimeoutError(_) | SdkError::DispatchFailure(_) | SdkError::ResponseError(_) => {
                ErrorKind::Transient
            }
            SdkError::ServiceError(context) => code
                .as_deref()
                .and_then(ErrorKind::from_code)
                .unwrap_or_else(|| ErrorKind::from_status(context.raw().status().as_u16())),
            _ => code.as_deref().and_then(ErrorKind::from_code).unwrap_or(ErrorKind::Unknown),
        };
        Self { kind, operation, code, message: DisplayErrorContext(&err).to_string() }
    }
}
