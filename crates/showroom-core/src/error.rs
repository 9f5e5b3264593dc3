//! Error types module
//!
//! This module provides the core error type used throughout Showroom.
//! Every simulated backend call, repository operation, and service resolves
//! to `AppError`, which describes how it is presented to the user through
//! `ErrorMetadata`.

use std::io;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// Machine-readable error code (e.g., "NOT_FOUND")
    fn error_code(&self) -> &'static str;

    /// Whether this error is recoverable (can be retried)
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the client
    fn suggested_action(&self) -> Option<&'static str>;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Operation cancelled: {0}")]
    Cancelled(String),

    #[error("Save failed: {0}")]
    SaveFailed(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidInput(format!("JSON parsing error: {}", err))
    }
}

impl From<uuid::Error> for AppError {
    fn from(err: uuid::Error) -> Self {
        AppError::InvalidInput(format!("UUID parsing error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::InvalidInput(format!("Validation error: {}", err))
    }
}

/// Static metadata for each variant: (error_code, recoverable, suggested_action, log_level).
fn app_error_static_metadata(err: &AppError) -> (&'static str, bool, Option<&'static str>, LogLevel) {
    match err {
        AppError::InvalidInput(_) => (
            "INVALID_INPUT",
            false,
            Some("Check request parameters and try again"),
            LogLevel::Debug,
        ),
        AppError::NotFound(_) => (
            "NOT_FOUND",
            false,
            Some("Verify the resource ID exists"),
            LogLevel::Debug,
        ),
        AppError::Conflict(_) => (
            "CONFLICT",
            false,
            Some("Choose a different identifier"),
            LogLevel::Debug,
        ),
        AppError::Unauthorized(_) => (
            "UNAUTHORIZED",
            false,
            Some("Sign in with valid credentials"),
            LogLevel::Debug,
        ),
        AppError::Cancelled(_) => (
            "CANCELLED",
            true,
            Some("Start the operation again"),
            LogLevel::Debug,
        ),
        AppError::SaveFailed(_) => (
            "SAVE_FAILED",
            true,
            Some("Retry after a short delay"),
            LogLevel::Warn,
        ),
        AppError::Internal(_) | AppError::InternalWithSource { .. } => (
            "INTERNAL_ERROR",
            true,
            Some("Retry after a short delay"),
            LogLevel::Error,
        ),
    }
}

impl AppError {
    /// Get detailed error information including error chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

impl ErrorMetadata for AppError {
    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).0
    }

    fn is_recoverable(&self) -> bool {
        app_error_static_metadata(self).1
    }

    fn suggested_action(&self) -> Option<&'static str> {
        app_error_static_metadata(self).2
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).3
    }

    fn client_message(&self) -> String {
        match self {
            AppError::InvalidInput(ref msg) => msg.clone(),
            AppError::NotFound(ref msg) => msg.clone(),
            AppError::Conflict(ref msg) => msg.clone(),
            AppError::Unauthorized(ref msg) => msg.clone(),
            AppError::Cancelled(_) => "The operation was cancelled".to_string(),
            AppError::SaveFailed(ref msg) => msg.clone(),
            AppError::Internal(_) | AppError::InternalWithSource { .. } => {
                "Internal error".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_metadata_not_found() {
        let err = AppError::NotFound("Vehicle not found".to_string());
        assert_eq!(err.error_code(), "NOT_FOUND");
        assert!(!err.is_recoverable());
        assert_eq!(err.client_message(), "Vehicle not found");
        assert_eq!(err.log_level(), LogLevel::Debug);
    }

    #[test]
    fn test_error_metadata_unauthorized() {
        let err = AppError::Unauthorized("Invalid email or password".to_string());
        assert_eq!(err.error_code(), "UNAUTHORIZED");
        assert_eq!(err.client_message(), "Invalid email or password");
        assert_eq!(err.suggested_action(), Some("Sign in with valid credentials"));
    }

    #[test]
    fn test_internal_hides_details() {
        let err = AppError::from(anyhow::anyhow!("lock poisoned in asset table"));
        assert_eq!(err.error_code(), "INTERNAL_ERROR");
        assert_eq!(err.client_message(), "Internal error");
        assert!(err.detailed_message().contains("lock poisoned"));
    }

    #[test]
    fn test_cancelled_is_recoverable() {
        let err = AppError::Cancelled("upload".to_string());
        assert!(err.is_recoverable());
        assert_eq!(err.client_message(), "The operation was cancelled");
    }
}
