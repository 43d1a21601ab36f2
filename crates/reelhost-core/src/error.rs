//! Error types module
//!
//! This module provides the core error types used throughout the Reelhost service.
//! Every failure the thumbnail pipeline can report is a variant of `AppError`, and
//! each variant self-describes how it is presented to clients through `ErrorMetadata`.

use crate::naming::NamingError;
use crate::validation::MediaTypeError;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues like write conflicts
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
/// This trait allows errors to self-describe their HTTP response characteristics
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "STORAGE_ERROR")
    fn error_code(&self) -> &'static str;

    /// Whether this error is recoverable (can be retried)
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the client
    fn suggested_action(&self) -> Option<&'static str>;

    /// Client-facing message (never the internal error text)
    fn client_message(&self) -> String;

    /// Whether the internal message may carry security-sensitive detail
    fn is_sensitive(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AppError {
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Missing bearer credential")]
    MissingCredential,

    #[error("Invalid credential: {0}")]
    InvalidCredential(String),

    #[error("Record not found: {0}")]
    RecordNotFound(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Form parse failure: {0}")]
    FormParseFailure(String),

    #[error("Upload exceeds limit of {limit} bytes")]
    PayloadTooLarge { limit: usize },

    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("Random generation failure: {0}")]
    RandomGenerationFailure(String),

    #[error("Write failure: {0}")]
    WriteFailure(String),

    #[error("Metadata conflict: {0}")]
    MetadataConflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<MediaTypeError> for AppError {
    fn from(err: MediaTypeError) -> Self {
        AppError::UnsupportedMediaType(err.to_string())
    }
}

impl From<NamingError> for AppError {
    fn from(err: NamingError) -> Self {
        AppError::RandomGenerationFailure(err.to_string())
    }
}

impl From<uuid::Error> for AppError {
    fn from(err: uuid::Error) -> Self {
        AppError::InvalidIdentifier(format!("UUID parsing error: {}", err))
    }
}

/// Static metadata for each variant: (http_status, error_code, recoverable, suggested_action, sensitive, log_level).
fn app_error_static_metadata(
    err: &AppError,
) -> (
    u16,
    &'static str,
    bool,
    Option<&'static str>,
    bool,
    LogLevel,
) {
    match err {
        AppError::InvalidIdentifier(_) => (
            400,
            "INVALID_IDENTIFIER",
            false,
            Some("Verify the video ID is a valid UUID"),
            false,
            LogLevel::Debug,
        ),
        AppError::MissingCredential => (
            401,
            "MISSING_CREDENTIAL",
            false,
            Some("Send an Authorization: Bearer <token> header"),
            false,
            LogLevel::Debug,
        ),
        AppError::InvalidCredential(_) => (
            401,
            "INVALID_CREDENTIAL",
            false,
            Some("Refresh the access token and retry"),
            true,
            LogLevel::Debug,
        ),
        AppError::RecordNotFound(_) => (
            401,
            "VIDEO_NOT_ACCESSIBLE",
            false,
            Some("Verify the video ID exists and belongs to you"),
            false,
            LogLevel::Debug,
        ),
        AppError::Forbidden(_) => (
            403,
            "NOT_VIDEO_OWNER",
            false,
            Some("Only the video owner can change its thumbnail"),
            false,
            LogLevel::Debug,
        ),
        AppError::FormParseFailure(_) => (
            400,
            "INVALID_FORM",
            false,
            Some("Send a multipart form with a single 'thumbnail' file field"),
            false,
            LogLevel::Debug,
        ),
        AppError::PayloadTooLarge { .. } => (
            413,
            "PAYLOAD_TOO_LARGE",
            false,
            Some("Reduce the image size and retry"),
            false,
            LogLevel::Debug,
        ),
        AppError::UnsupportedMediaType(_) => (
            400,
            "UNSUPPORTED_MEDIA_TYPE",
            false,
            Some("Upload an image/jpeg or image/png file"),
            false,
            LogLevel::Debug,
        ),
        AppError::RandomGenerationFailure(_) => (
            500,
            "RANDOM_GENERATION_FAILURE",
            false,
            Some("Contact support if this error persists"),
            true,
            LogLevel::Error,
        ),
        AppError::WriteFailure(_) => (
            500,
            "STORAGE_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
        AppError::MetadataConflict(_) => (
            409,
            "METADATA_CONFLICT",
            true,
            Some("Fetch the latest video and retry the upload"),
            true,
            LogLevel::Warn,
        ),
        AppError::Internal(_) => (
            500,
            "INTERNAL_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
    }
}

impl AppError {
    /// Get the error type name for logging
    pub fn error_type(&self) -> &str {
        match self {
            AppError::InvalidIdentifier(_) => "InvalidIdentifier",
            AppError::MissingCredential => "MissingCredential",
            AppError::InvalidCredential(_) => "InvalidCredential",
            AppError::RecordNotFound(_) => "RecordNotFound",
            AppError::Forbidden(_) => "Forbidden",
            AppError::FormParseFailure(_) => "FormParseFailure",
            AppError::PayloadTooLarge { .. } => "PayloadTooLarge",
            AppError::UnsupportedMediaType(_) => "UnsupportedMediaType",
            AppError::RandomGenerationFailure(_) => "RandomGenerationFailure",
            AppError::WriteFailure(_) => "WriteFailure",
            AppError::MetadataConflict(_) => "MetadataConflict",
            AppError::Internal(_) => "Internal",
        }
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn is_recoverable(&self) -> bool {
        app_error_static_metadata(self).2
    }

    fn suggested_action(&self) -> Option<&'static str> {
        app_error_static_metadata(self).3
    }

    fn is_sensitive(&self) -> bool {
        app_error_static_metadata(self).4
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).5
    }

    fn client_message(&self) -> String {
        match self {
            AppError::InvalidIdentifier(_) => "Invalid video ID".to_string(),
            AppError::MissingCredential => "Missing bearer token".to_string(),
            AppError::InvalidCredential(_) => "Invalid or expired token".to_string(),
            AppError::RecordNotFound(_) => "Video not accessible".to_string(),
            AppError::Forbidden(_) => "User is not the video owner".to_string(),
            AppError::FormParseFailure(_) => "Unable to parse form file".to_string(),
            AppError::PayloadTooLarge { limit } => format!(
                "Thumbnail exceeds maximum size of {} MB",
                limit / (1024 * 1024)
            ),
            AppError::UnsupportedMediaType(_) => "Unsupported image type".to_string(),
            AppError::RandomGenerationFailure(_) => "Failed to name thumbnail".to_string(),
            AppError::WriteFailure(_) => "Failed to store thumbnail".to_string(),
            AppError::MetadataConflict(_) => "Couldn't update video".to_string(),
            AppError::Internal(_) => "Internal server error".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let cases = [
            (AppError::InvalidIdentifier("x".into()), 400),
            (AppError::MissingCredential, 401),
            (AppError::InvalidCredential("expired".into()), 401),
            (AppError::RecordNotFound("v".into()), 401),
            (AppError::Forbidden("v".into()), 403),
            (AppError::FormParseFailure("x".into()), 400),
            (AppError::PayloadTooLarge { limit: 10 }, 413),
            (AppError::UnsupportedMediaType("text/plain".into()), 400),
            (AppError::RandomGenerationFailure("x".into()), 500),
            (AppError::WriteFailure("x".into()), 500),
            (AppError::MetadataConflict("x".into()), 409),
            (AppError::Internal("x".into()), 500),
        ];

        for (err, status) in cases {
            assert_eq!(err.http_status_code(), status, "{}", err.error_type());
        }
    }

    #[test]
    fn test_client_message_hides_internal_text() {
        let err = AppError::InvalidCredential("signature mismatch for kid=abc".into());
        assert_eq!(err.client_message(), "Invalid or expired token");
        assert!(err.is_sensitive());

        let err = AppError::WriteFailure("/srv/assets/x.png: permission denied".into());
        assert!(!err.client_message().contains("/srv"));
    }

    #[test]
    fn test_payload_too_large_message() {
        let err = AppError::PayloadTooLarge {
            limit: 10 * 1024 * 1024,
        };
        assert_eq!(
            err.client_message(),
            "Thumbnail exceeds maximum size of 10 MB"
        );
    }

    #[test]
    fn test_media_type_error_maps_to_unsupported() {
        let err: AppError = MediaTypeError::Malformed("???".into()).into();
        assert_eq!(err.error_code(), "UNSUPPORTED_MEDIA_TYPE");
    }
}
