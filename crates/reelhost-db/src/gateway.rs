//! Video record gateway
//!
//! Read and replace access to video metadata records. Implementations collapse
//! every read failure into `NotFound` and every rejected write into `Conflict`.

use async_trait::async_trait;
use reelhost_core::models::VideoRecord;
use reelhost_core::AppError;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    #[error("Video record not found: {0}")]
    NotFound(String),

    #[error("Video record update rejected: {0}")]
    Conflict(String),
}

impl From<RecordError> for AppError {
    fn from(err: RecordError) -> Self {
        match err {
            RecordError::NotFound(msg) => AppError::RecordNotFound(msg),
            RecordError::Conflict(msg) => AppError::MetadataConflict(msg),
        }
    }
}

#[async_trait]
pub trait VideoRecordGateway: Send + Sync {
    /// Load a record by id.
    async fn fetch(&self, video_id: Uuid) -> Result<VideoRecord, RecordError>;

    /// Replace the stored record with `record`.
    ///
    /// The write only succeeds if the stored record has not changed since
    /// `record` was fetched (same `updated_at`). Returns the record as stored.
    async fn update(&self, record: &VideoRecord) -> Result<VideoRecord, RecordError>;
}
