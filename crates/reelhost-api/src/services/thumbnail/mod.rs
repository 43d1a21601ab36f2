//! Thumbnail upload pipeline
//!
//! Orchestrates authenticate → resolve owner → validate → name → persist → record,
//! strictly in that order. The first failing step ends the upload; nothing is retried
//! and an asset written before a failed record update is left in place.

mod pipeline;
mod stage;

pub use pipeline::{ThumbnailUploadPipeline, Uploader};
pub use stage::{UploadFailure, UploadStage};
