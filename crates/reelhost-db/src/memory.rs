//! In-memory video record gateway with the same optimistic-update rules as Postgres.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use reelhost_core::models::VideoRecord;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::gateway::{RecordError, VideoRecordGateway};

#[derive(Default)]
pub struct InMemoryVideoRepository {
    videos: RwLock<HashMap<Uuid, VideoRecord>>,
}

impl InMemoryVideoRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, video: VideoRecord) {
        self.videos.write().await.insert(video.id, video);
    }

    pub async fn get(&self, id: Uuid) -> Option<VideoRecord> {
        self.videos.read().await.get(&id).cloned()
    }
}

#[async_trait]
impl VideoRecordGateway for InMemoryVideoRepository {
    async fn fetch(&self, video_id: Uuid) -> Result<VideoRecord, RecordError> {
        self.get(video_id)
            .await
            .ok_or_else(|| RecordError::NotFound(video_id.to_string()))
    }

    async fn update(&self, record: &VideoRecord) -> Result<VideoRecord, RecordError> {
        let mut videos = self.videos.write().await;
        let stored = videos
            .get_mut(&record.id)
            .ok_or_else(|| RecordError::Conflict(format!("video {} no longer exists", record.id)))?;

        if stored.updated_at != record.updated_at {
            return Err(RecordError::Conflict(format!(
                "video {} was modified concurrently",
                record.id
            )));
        }

        let mut updated = record.clone();
        updated.updated_at = Utc::now().max(record.updated_at + Duration::microseconds(1));
        *stored = updated.clone();

        Ok(updated)
    }
}
