//! Shared application state

use std::sync::Arc;

use crate::services::thumbnail::ThumbnailUploadPipeline;

pub struct AppState {
    pub pipeline: Arc<ThumbnailUploadPipeline>,
}

impl AppState {
    pub fn new(pipeline: Arc<ThumbnailUploadPipeline>) -> Self {
        Self { pipeline }
    }
}
