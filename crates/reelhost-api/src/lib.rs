//! Reelhost API Library
//!
//! This crate provides the HTTP handlers, the thumbnail upload pipeline, and
//! application setup.

// Module declarations
pub mod constants;
mod handlers;
pub mod services;
pub mod setup;
mod telemetry;
mod utils;

// Public modules
pub mod auth;
pub mod error;
pub mod state;

// Re-exports
pub use error::{ErrorResponse, HttpAppError};
pub use services::thumbnail::{ThumbnailUploadPipeline, UploadFailure, UploadStage, Uploader};
