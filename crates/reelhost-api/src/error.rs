//! HTTP error response conversion
//!
//! Handlers return `Result<_, HttpAppError>`. Anything convertible into `AppError`
//! (including a pipeline `UploadFailure`) renders as a JSON `ErrorResponse` with the
//! status code the error declares, and is logged once at the error's log level.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use reelhost_core::{AppError, ErrorMetadata, LogLevel};
use serde::{Deserialize, Serialize};

use crate::services::thumbnail::{UploadFailure, UploadStage};

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    /// Machine-readable error code for programmatic handling
    pub code: String,
    /// Whether this error is recoverable (can be retried)
    pub recoverable: bool,
    /// Suggested action for the client
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_action: Option<String>,
}

impl From<&AppError> for ErrorResponse {
    fn from(err: &AppError) -> Self {
        Self {
            error: err.client_message(),
            code: err.error_code().to_string(),
            recoverable: err.is_recoverable(),
            suggested_action: err.suggested_action().map(String::from),
        }
    }
}

/// Wrapper type for AppError to implement IntoResponse
/// This is necessary because of Rust's orphan rules - we can't implement
/// IntoResponse (external trait) for AppError (external type from reelhost-core)
#[derive(Debug)]
pub struct HttpAppError {
    pub error: AppError,
    pub stage: Option<UploadStage>,
}

impl From<AppError> for HttpAppError {
    fn from(error: AppError) -> Self {
        HttpAppError { error, stage: None }
    }
}

impl From<UploadFailure> for HttpAppError {
    fn from(failure: UploadFailure) -> Self {
        HttpAppError {
            error: failure.error,
            stage: Some(failure.stage),
        }
    }
}

fn log_error(error: &AppError, stage: Option<UploadStage>) {
    let error_type = error.error_type();
    let stage = stage.map(|s| s.to_string()).unwrap_or_default();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, stage = %stage, "Request failed");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type = error_type, stage = %stage, "Request failed");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, error_type = error_type, stage = %stage, "Request failed");
        }
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(&self.error, self.stage);

        (status, Json(ErrorResponse::from(&self.error))).into_response()
    }
}
