//! Error classification for console actions
//!
//! Internals propagate `anyhow::Error` with context. At the action boundary
//! the error chain is reduced to an [`ErrorKind`] using the AWS error code
//! from `ProvideErrorMetadata`, so the shell can render a differentiated
//! banner instead of a bare failure.

use aws_sdk_connect::error::{ProvideErrorMetadata, SdkError};
use aws_sdk_connect::operation::{
    delete_contact_flow::DeleteContactFlowError, delete_queue::DeleteQueueError,
    describe_instance::DescribeInstanceError, list_contact_flows::ListContactFlowsError,
    list_queue_quick_connects::ListQueueQuickConnectsError, list_queues::ListQueuesError,
};
use crate::store::StoreError;
use connect_console_common::SelectionError;
use std::fmt;
use thiserror::Error;

/// Failure categories surfaced to the operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Instance or resource does not exist
    NotFound,
    /// Credentials are missing, expired or lack permission
    AccessDenied,
    /// Provider rate limit
    Throttled,
    /// Reading or writing local files failed
    LocalIo,
    /// Anything else
    Unknown,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::NotFound => "not found",
            ErrorKind::AccessDenied => "access denied",
            ErrorKind::Throttled => "throttled",
            ErrorKind::LocalIo => "local file error",
            ErrorKind::Unknown => "error",
        }
    }

    /// Banner text shown for a failed action of this kind
    pub fn banner(self) -> &'static str {
        match self {
            ErrorKind::NotFound => "The instance or resource was not found",
            ErrorKind::AccessDenied => "Access denied by Amazon Connect",
            ErrorKind::Throttled => "Request throttled by Amazon Connect",
            ErrorKind::LocalIo => "Could not read or write local snapshot files",
            ErrorKind::Unknown => "The request failed",
        }
    }

    /// A hint for resolving the failure, if one applies
    pub fn suggestion(self) -> Option<&'static str> {
        match self {
            ErrorKind::NotFound => Some("Check the instance id, or reload the list."),
            ErrorKind::AccessDenied => {
                Some("Check AWS credentials and the connect:* permissions of the caller.")
            }
            ErrorKind::Throttled => Some("Wait a moment and run the action again."),
            ErrorKind::LocalIo => Some("Check that the data directory exists and is writable."),
            ErrorKind::Unknown => None,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a failed console action
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ActionError {
    pub kind: ErrorKind,
    /// AWS error code, when the failure came from the provider
    pub code: Option<String>,
    pub message: String,
}

impl ActionError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            code: None,
            message: message.into(),
        }
    }

    /// Classify an error chain
    pub fn from_anyhow(error: &anyhow::Error) -> Self {
        let (kind, code) = classify_anyhow_error(error);
        Self {
            kind,
            code,
            message: format!("{error:#}"),
        }
    }

    pub fn suggestion(&self) -> Option<&'static str> {
        self.kind.suggestion()
    }
}

impl From<anyhow::Error> for ActionError {
    fn from(error: anyhow::Error) -> Self {
        Self::from_anyhow(&error)
    }
}

impl From<StoreError> for ActionError {
    fn from(error: StoreError) -> Self {
        Self::new(ErrorKind::LocalIo, error.to_string())
    }
}

impl From<SelectionError> for ActionError {
    fn from(error: SelectionError) -> Self {
        Self::new(ErrorKind::Unknown, error.to_string())
    }
}

/// Known AWS error codes for "not found" conditions
const NOT_FOUND_CODES: &[&str] = &["ResourceNotFoundException", "NotFoundException"];

/// Known AWS error codes for authentication and authorization failures
const ACCESS_DENIED_CODES: &[&str] = &[
    "AccessDeniedException",
    "AccessDenied",
    "UnauthorizedException",
    "UnrecognizedClientException",
    "InvalidClientTokenId",
    "ExpiredTokenException",
];

/// Known AWS error codes for throttling/rate limiting
const THROTTLING_CODES: &[&str] = &[
    "ThrottlingException",
    "Throttling",
    "TooManyRequestsException",
    "LimitExceededException",
    "RequestLimitExceeded",
];

/// Classify an AWS error code.
pub fn classify_aws_error(code: Option<&str>) -> ErrorKind {
    match code {
        Some(c) if NOT_FOUND_CODES.contains(&c) => ErrorKind::NotFound,
        Some(c) if ACCESS_DENIED_CODES.contains(&c) => ErrorKind::AccessDenied,
        Some(c) if THROTTLING_CODES.contains(&c) => ErrorKind::Throttled,
        _ => ErrorKind::Unknown,
    }
}

/// Extract code and message from an SDK error of operation error type `E`.
fn sdk_error_code<E>(cause: &(dyn std::error::Error + 'static)) -> Option<Option<String>>
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
{
    cause
        .downcast_ref::<SdkError<E>>()
        .map(|e| e.code().map(str::to_string))
}

/// Classify an error chain into a kind and, when available, the AWS code.
///
/// Walks the chain looking for the SDK errors of the operations this crate
/// calls, then for local I/O errors. Falls back to matching known codes in
/// the Debug representation.
pub fn classify_anyhow_error(error: &anyhow::Error) -> (ErrorKind, Option<String>) {
    for cause in error.chain() {
        let code = sdk_error_code::<DescribeInstanceError>(cause)
            .or_else(|| sdk_error_code::<ListQueuesError>(cause))
            .or_else(|| sdk_error_code::<ListContactFlowsError>(cause))
            .or_else(|| sdk_error_code::<DeleteQueueError>(cause))
            .or_else(|| sdk_error_code::<DeleteContactFlowError>(cause))
            .or_else(|| sdk_error_code::<ListQueueQuickConnectsError>(cause));
        if let Some(code) = code {
            return (classify_aws_error(code.as_deref()), code);
        }

        if cause.is::<std::io::Error>()
            || cause.is::<csv::Error>()
            || cause.is::<serde_json::Error>()
            || cause.is::<StoreError>()
        {
            return (ErrorKind::LocalIo, None);
        }
    }

    let debug_str = format!("{error:?}");
    match extract_error_code(&debug_str) {
        Some(code) => (classify_aws_error(Some(&code)), Some(code)),
        None => (ErrorKind::Unknown, None),
    }
}

/// Extract a known AWS error code from a debug string representation
fn extract_error_code(debug_str: &str) -> Option<String> {
    NOT_FOUND_CODES
        .iter()
        .chain(ACCESS_DENIED_CODES)
        .chain(THROTTLING_CODES)
        .find(|code| debug_str.contains(*code))
        .map(|code| (*code).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn not_found_codes() {
        for code in NOT_FOUND_CODES {
            assert_eq!(classify_aws_error(Some(code)), ErrorKind::NotFound, "{code}");
        }
    }

    #[test]
    fn access_denied_codes() {
        for code in ACCESS_DENIED_CODES {
            assert_eq!(
                classify_aws_error(Some(code)),
                ErrorKind::AccessDenied,
                "{code}"
            );
        }
    }

    #[test]
    fn throttling_codes() {
        for code in THROTTLING_CODES {
            assert_eq!(classify_aws_error(Some(code)), ErrorKind::Throttled, "{code}");
        }
    }

    #[test]
    fn unknown_and_missing_codes() {
        assert_eq!(
            classify_aws_error(Some("ResourceInUseException")),
            ErrorKind::Unknown
        );
        assert_eq!(classify_aws_error(None), ErrorKind::Unknown);
    }

    #[test]
    fn io_error_in_chain_is_local_io() {
        let err: anyhow::Error = Err::<(), _>(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "read-only",
        ))
        .context("Failed to write queues.csv")
        .unwrap_err();

        let action = ActionError::from_anyhow(&err);
        assert_eq!(action.kind, ErrorKind::LocalIo);
        assert!(action.message.contains("queues.csv"));
        assert!(action.message.contains("read-only"));
    }

    #[test]
    fn debug_string_fallback() {
        let err = anyhow::anyhow!("service error: ThrottlingException: Rate exceeded");
        let (kind, code) = classify_anyhow_error(&err);
        assert_eq!(kind, ErrorKind::Throttled);
        assert_eq!(code.as_deref(), Some("ThrottlingException"));
    }

    #[test]
    fn plain_error_is_unknown() {
        let err = anyhow::anyhow!("connection refused");
        let action: ActionError = err.into();
        assert_eq!(action.kind, ErrorKind::Unknown);
        assert_eq!(action.code, None);
        assert!(action.suggestion().is_none());
    }

    #[test]
    fn every_kind_has_a_banner() {
        for kind in [
            ErrorKind::NotFound,
            ErrorKind::AccessDenied,
            ErrorKind::Throttled,
            ErrorKind::LocalIo,
            ErrorKind::Unknown,
        ] {
            assert!(!kind.banner().is_empty());
        }
    }
}
