//! Storage abstraction trait
//!
//! This module defines the Storage trait implemented by the asset store.

use async_trait::async_trait;
use bytes::Bytes;
use reelhost_core::AppError;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Read failed: {0}")]
    ReadFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid asset name: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::InvalidKey(_) | StorageError::ConfigError(_) => {
                AppError::Internal(err.to_string())
            }
            _ => AppError::WriteFailure(err.to_string()),
        }
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage abstraction trait
///
/// Writes are durable once `write` returns: the bytes have been flushed to the
/// backing medium and the returned locator resolves to them.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Persist `data` under `name` and return its public locator.
    ///
    /// An existing asset with the same name is never overwritten.
    async fn write(&self, name: &str, data: Bytes) -> StorageResult<String>;

    /// Read an asset back by name
    async fn read(&self, name: &str) -> StorageResult<Bytes>;

    /// Check if an asset exists
    async fn exists(&self, name: &str) -> StorageResult<bool>;

    /// Public locator for `name`, whether or not it has been written yet
    fn public_url(&self, name: &str) -> String;
}
