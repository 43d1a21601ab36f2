use async_trait::async_trait;
use reelhost_core::models::VideoRecord;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

use crate::gateway::{RecordError, VideoRecordGateway};

const VIDEO_COLUMNS: &str =
    "id, user_id, title, description, thumbnail_url, video_url, created_at, updated_at";

/// Repository for video metadata records
#[derive(Clone)]
pub struct PgVideoRepository {
    pool: PgPool,
}

impl PgVideoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new video record
    #[tracing::instrument(skip(self, video), fields(db.table = "videos", db.operation = "insert", db.record_id = %video.id))]
    pub async fn create(&self, video: &VideoRecord) -> Result<VideoRecord, sqlx::Error> {
        let query = format!(
            r#"
            INSERT INTO videos (id, user_id, title, description, thumbnail_url, video_url)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {VIDEO_COLUMNS}
            "#
        );

        sqlx::query_as::<Postgres, VideoRecord>(&query)
            .bind(video.id)
            .bind(video.user_id)
            .bind(&video.title)
            .bind(&video.description)
            .bind(&video.thumbnail_url)
            .bind(&video.video_url)
            .fetch_one(&self.pool)
            .await
    }

    /// Get video by ID
    #[tracing::instrument(skip(self), fields(db.table = "videos", db.operation = "select", db.record_id = %id))]
    pub async fn get_video(&self, id: Uuid) -> Result<Option<VideoRecord>, sqlx::Error> {
        let query = format!("SELECT {VIDEO_COLUMNS} FROM videos WHERE id = $1");

        sqlx::query_as::<Postgres, VideoRecord>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Replace every mutable column, guarded by the previously read `updated_at`.
    ///
    /// Returns `None` when the row changed (or vanished) since it was read.
    #[tracing::instrument(skip(self, video), fields(db.table = "videos", db.operation = "update", db.record_id = %video.id))]
    pub async fn update_video(&self, video: &VideoRecord) -> Result<Option<VideoRecord>, sqlx::Error> {
        let query = format!(
            r#"
            UPDATE videos
            SET title = $2,
                description = $3,
                thumbnail_url = $4,
                video_url = $5,
                updated_at = GREATEST(clock_timestamp(), $6 + INTERVAL '1 microsecond')
            WHERE id = $1 AND updated_at = $6
            RETURNING {VIDEO_COLUMNS}
            "#
        );

        sqlx::query_as::<Postgres, VideoRecord>(&query)
            .bind(video.id)
            .bind(&video.title)
            .bind(&video.description)
            .bind(&video.thumbnail_url)
            .bind(&video.video_url)
            .bind(video.updated_at)
            .fetch_optional(&self.pool)
            .await
    }
}

#[async_trait]
impl VideoRecordGateway for PgVideoRepository {
    async fn fetch(&self, video_id: Uuid) -> Result<VideoRecord, RecordError> {
        match self.get_video(video_id).await {
            Ok(Some(video)) => Ok(video),
            Ok(None) => Err(RecordError::NotFound(video_id.to_string())),
            Err(e) => {
                tracing::warn!(error = %e, video_id = %video_id, "Failed to fetch video record");
                Err(RecordError::NotFound(video_id.to_string()))
            }
        }
    }

    async fn update(&self, record: &VideoRecord) -> Result<VideoRecord, RecordError> {
        match self.update_video(record).await {
            Ok(Some(video)) => Ok(video),
            Ok(None) => Err(RecordError::Conflict(format!(
                "video {} was modified concurrently",
                record.id
            ))),
            Err(e) => {
                tracing::warn!(error = %e, video_id = %record.id, "Failed to update video record");
                Err(RecordError::Conflict(e.to_string()))
            }
        }
    }
}
