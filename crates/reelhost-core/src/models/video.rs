use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Metadata record for an uploaded video.
///
/// Created elsewhere; the thumbnail pipeline only reads it and replaces it
/// wholesale through the record gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct VideoRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,
    pub video_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl VideoRecord {
    pub fn new(user_id: Uuid, title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            title: title.into(),
            description: None,
            thumbnail_url: None,
            video_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.user_id == user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_has_no_thumbnail() {
        let owner = Uuid::new_v4();
        let video = VideoRecord::new(owner, "boots");
        assert!(video.thumbnail_url.is_none());
        assert!(video.is_owned_by(owner));
        assert!(!video.is_owned_by(Uuid::new_v4()));
    }

    #[test]
    fn test_serializes_thumbnail_url() {
        let mut video = VideoRecord::new(Uuid::new_v4(), "boots");
        video.thumbnail_url = Some("http://localhost:8091/assets/abc.png".to_string());
        let json = serde_json::to_value(&video).unwrap();
        assert_eq!(json["thumbnail_url"], "http://localhost:8091/assets/abc.png");
        assert_eq!(json["title"], "boots");
    }
}
