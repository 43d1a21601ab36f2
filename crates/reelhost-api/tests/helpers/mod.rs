//! Test helpers: build the router over in-memory records and a temp asset root.
//!
//! Run from workspace root: `cargo test -p reelhost-api --test thumbnail_upload_test`.

#![allow(dead_code)]

pub mod fixtures;

use axum_test::TestServer;
use chrono::Duration;
use reelhost_api::auth::JwtService;
use reelhost_api::setup::routes::build_router;
use reelhost_api::state::AppState;
use reelhost_api::ThumbnailUploadPipeline;
use reelhost_core::models::VideoRecord;
use reelhost_core::{Config, RandomAssetNamer};
use reelhost_db::InMemoryVideoRepository;
use reelhost_storage::LocalStorage;
use std::collections::HashMap;
use std::sync::Arc;
use tempfile::TempDir;
use uuid::Uuid;

pub const TEST_JWT_SECRET: &str = "integration-test-secret-32-chars-min";
pub const TEST_PUBLIC_BASE_URL: &str = "http://localhost:8091";

pub fn thumbnail_path(video_id: impl std::fmt::Display) -> String {
    format!("/api/videos/{}/thumbnail", video_id)
}

/// Test application: server plus handles on its collaborators.
pub struct TestApp {
    pub server: TestServer,
    pub videos: Arc<InMemoryVideoRepository>,
    pub jwt: JwtService,
    pub config: Config,
    pub assets_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    pub fn token_for(&self, user_id: Uuid) -> String {
        self.jwt
            .issue_token(user_id, Duration::hours(1))
            .expect("Failed to issue token")
    }

    pub fn expired_token_for(&self, user_id: Uuid) -> String {
        self.jwt
            .issue_token(user_id, Duration::minutes(-5))
            .expect("Failed to issue token")
    }

    /// Insert a video owned by a fresh user; returns the video and its owner's token.
    pub async fn seed_video(&self) -> (VideoRecord, String) {
        let owner = Uuid::new_v4();
        let video = VideoRecord::new(owner, "seeded video");
        self.videos.insert(video.clone()).await;
        (video, self.token_for(owner))
    }

    pub async fn stored_video(&self, id: Uuid) -> VideoRecord {
        self.videos.get(id).await.expect("video should exist")
    }

    /// Names of every file written under the asset root.
    pub fn asset_files(&self) -> Vec<String> {
        std::fs::read_dir(self.assets_dir.path())
            .expect("Failed to read assets dir")
            .map(|entry| {
                entry
                    .expect("Failed to read dir entry")
                    .file_name()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect()
    }
}

pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(&[]).await
}

/// Build the app with extra configuration variables layered over the defaults.
pub async fn setup_test_app_with(overrides: &[(&str, &str)]) -> TestApp {
    let assets_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let assets_root = assets_dir.path().to_string_lossy().into_owned();

    let mut vars: HashMap<String, String> = HashMap::from([
        ("DATABASE_URL".to_string(), "postgres://unused/reelhost".to_string()),
        ("JWT_SECRET".to_string(), TEST_JWT_SECRET.to_string()),
        ("PUBLIC_BASE_URL".to_string(), TEST_PUBLIC_BASE_URL.to_string()),
        ("ASSETS_ROOT".to_string(), assets_root),
    ]);
    for (key, value) in overrides {
        vars.insert(key.to_string(), value.to_string());
    }

    let config = Config::from_vars(|key| vars.get(key).cloned()).expect("Invalid test config");
    config.validate().expect("Invalid test config");

    let storage = LocalStorage::new(config.assets_root(), config.asset_base_url())
        .await
        .expect("Failed to create local storage");
    let videos = Arc::new(InMemoryVideoRepository::new());
    let jwt = JwtService::new(config.jwt_secret(), config.jwt_issuer());

    let pipeline = ThumbnailUploadPipeline::new(
        Arc::new(jwt.clone()),
        videos.clone(),
        Arc::new(RandomAssetNamer::new()),
        Arc::new(storage),
        config.max_thumbnail_size_bytes(),
    );
    let state = Arc::new(AppState::new(Arc::new(pipeline)));

    let server = TestServer::new(build_router(state)).expect("Failed to start test server");

    TestApp {
        server,
        videos,
        jwt,
        config,
        assets_dir,
    }
}
