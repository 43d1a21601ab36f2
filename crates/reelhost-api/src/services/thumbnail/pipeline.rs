use std::sync::Arc;

use reelhost_core::models::{StoredAsset, UploadRequest, ValidatedAsset, VideoRecord};
use reelhost_core::{check_media_type, AppError, AssetNamer};
use reelhost_db::VideoRecordGateway;
use reelhost_storage::Storage;
use uuid::Uuid;

use super::stage::{UploadFailure, UploadStage};
use crate::auth::IdentityResolver;

/// A caller whose credential has been verified.
///
/// Only [`ThumbnailUploadPipeline::authenticate`] can produce one, so an upload
/// body is never consumed on behalf of an unauthenticated caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Uploader {
    user_id: Uuid,
}

pub struct ThumbnailUploadPipeline {
    identity: Arc<dyn IdentityResolver>,
    videos: Arc<dyn VideoRecordGateway>,
    namer: Arc<dyn AssetNamer>,
    storage: Arc<dyn Storage>,
    max_upload_bytes: usize,
}

impl ThumbnailUploadPipeline {
    pub fn new(
        identity: Arc<dyn IdentityResolver>,
        videos: Arc<dyn VideoRecordGateway>,
        namer: Arc<dyn AssetNamer>,
        storage: Arc<dyn Storage>,
        max_upload_bytes: usize,
    ) -> Self {
        Self {
            identity,
            videos,
            namer,
            storage,
            max_upload_bytes,
        }
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }

    /// Verify the caller. Touches neither the record store nor the asset store.
    pub fn authenticate(&self, authorization: Option<&str>) -> Result<Uploader, UploadFailure> {
        self.identity
            .verify(authorization)
            .map(|user_id| Uploader { user_id })
            .map_err(|e| fail(UploadStage::Authenticating, e))
    }

    /// Authenticate, then upload.
    pub async fn run(
        &self,
        authorization: Option<&str>,
        request: UploadRequest,
    ) -> Result<VideoRecord, UploadFailure> {
        let uploader = self.authenticate(authorization)?;
        self.upload(&uploader, request).await
    }

    /// Store the thumbnail and point the video record at it.
    ///
    /// The record is only updated after the asset write has returned.
    #[tracing::instrument(
        skip_all,
        fields(video_id = %request.video_id, user_id = %uploader.user_id)
    )]
    pub async fn upload(
        &self,
        uploader: &Uploader,
        request: UploadRequest,
    ) -> Result<VideoRecord, UploadFailure> {
        let UploadRequest {
            video_id,
            bytes,
            declared_media_type,
        } = request;

        if bytes.len() > self.max_upload_bytes {
            return Err(fail(
                UploadStage::Receiving,
                AppError::PayloadTooLarge {
                    limit: self.max_upload_bytes,
                },
            ));
        }

        let mut video = self
            .videos
            .fetch(video_id)
            .await
            .map_err(|e| fail(UploadStage::OwnerResolving, e))?;

        if !video.is_owned_by(uploader.user_id) {
            return Err(fail(
                UploadStage::OwnerResolving,
                AppError::Forbidden(format!(
                    "user {} does not own video {}",
                    uploader.user_id, video_id
                )),
            ));
        }

        let asset = ValidatedAsset {
            media_type: check_media_type(&declared_media_type)
                .map_err(|e| fail(UploadStage::Validating, e))?,
            bytes,
        };

        let name = self
            .namer
            .generate(asset.media_type)
            .map_err(|e| fail(UploadStage::Naming, e))?;

        let size_bytes = asset.bytes.len();
        let locator = self
            .storage
            .write(&name.file_name(), asset.bytes)
            .await
            .map_err(|e| fail(UploadStage::Persisting, e))?;
        let stored = StoredAsset { name, locator };

        video.thumbnail_url = Some(stored.locator.clone());
        let updated = match self.videos.update(&video).await {
            Ok(updated) => updated,
            Err(e) => {
                tracing::warn!(
                    asset = %stored.name,
                    locator = %stored.locator,
                    "Thumbnail stored but video record not updated; asset is orphaned"
                );
                return Err(fail(UploadStage::Recording, e));
            }
        };

        tracing::info!(
            asset = %stored.name,
            media_type = %asset.media_type,
            size_bytes,
            stage = %UploadStage::Succeeded,
            "Thumbnail uploaded"
        );

        Ok(updated)
    }
}

fn fail(stage: UploadStage, error: impl Into<AppError>) -> UploadFailure {
    let failure = UploadFailure::new(stage, error);
    tracing::debug!(
        stage = %failure.stage,
        error_type = failure.error.error_type(),
        "Thumbnail upload stopped"
    );
    failure
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::JwtService;
    use async_trait::async_trait;
    use bytes::Bytes;
    use chrono::Duration;
    use reelhost_core::models::{AssetName, ImageMediaType};
    use reelhost_core::{NamingError, RandomAssetNamer};
    use reelhost_db::{InMemoryVideoRepository, RecordError};
    use reelhost_storage::{StorageError, StorageResult};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    const SECRET: &str = "pipeline-test-secret-with-32-chars!!";
    const BASE_URL: &str = "http://localhost:8091/assets";
    const MAX_BYTES: usize = 1024 * 1024;

    /// In-memory gateway that counts calls and can reject updates.
    #[derive(Default)]
    struct CountingGateway {
        inner: InMemoryVideoRepository,
        fetches: AtomicUsize,
        updates: AtomicUsize,
        reject_updates: bool,
    }

    #[async_trait]
    impl VideoRecordGateway for CountingGateway {
        async fn fetch(&self, video_id: Uuid) -> Result<VideoRecord, RecordError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            self.inner.fetch(video_id).await
        }

        async fn update(&self, record: &VideoRecord) -> Result<VideoRecord, RecordError> {
            self.updates.fetch_add(1, Ordering::SeqCst);
            if self.reject_updates {
                return Err(RecordError::Conflict("concurrent modification".to_string()));
            }
            self.inner.update(record).await
        }
    }

    #[derive(Default)]
    struct RecordingStorage {
        writes: Mutex<Vec<(String, Bytes)>>,
        fail_writes: bool,
    }

    impl RecordingStorage {
        fn write_count(&self) -> usize {
            self.writes.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl Storage for RecordingStorage {
        async fn write(&self, name: &str, data: Bytes) -> StorageResult<String> {
            if self.fail_writes {
                return Err(StorageError::WriteFailed("disk full".to_string()));
            }
            self.writes.lock().unwrap().push((name.to_string(), data));
            Ok(self.public_url(name))
        }

        async fn read(&self, name: &str) -> StorageResult<Bytes> {
            self.writes
                .lock()
                .unwrap()
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, data)| data.clone())
                .ok_or_else(|| StorageError::NotFound(name.to_string()))
        }

        async fn exists(&self, name: &str) -> StorageResult<bool> {
            Ok(self.writes.lock().unwrap().iter().any(|(n, _)| n == name))
        }

        fn public_url(&self, name: &str) -> String {
            format!("{}/{}", BASE_URL, name)
        }
    }

    struct BrokenNamer;

    impl AssetNamer for BrokenNamer {
        fn generate(&self, _media_type: ImageMediaType) -> Result<AssetName, NamingError> {
            Err(NamingError::EntropyUnavailable("getrandom failed".to_string()))
        }
    }

    struct Harness {
        pipeline: ThumbnailUploadPipeline,
        jwt: JwtService,
        videos: Arc<CountingGateway>,
        storage: Arc<RecordingStorage>,
        owner: Uuid,
        video: VideoRecord,
    }

    impl Harness {
        fn token_for(&self, user_id: Uuid) -> String {
            format!(
                "Bearer {}",
                self.jwt.issue_token(user_id, Duration::hours(1)).unwrap()
            )
        }

        fn owner_token(&self) -> String {
            self.token_for(self.owner)
        }

        fn request(&self, bytes: Vec<u8>, media_type: &str) -> UploadRequest {
            UploadRequest {
                video_id: self.video.id,
                bytes: Bytes::from(bytes),
                declared_media_type: media_type.to_string(),
            }
        }

        async fn stored_video(&self) -> VideoRecord {
            self.videos.inner.get(self.video.id).await.unwrap()
        }
    }

    async fn harness_with(
        videos: CountingGateway,
        storage: RecordingStorage,
        namer: Arc<dyn AssetNamer>,
    ) -> Harness {
        let owner = Uuid::new_v4();
        let video = VideoRecord::new(owner, "launch trailer");
        videos.inner.insert(video.clone()).await;

        let jwt = JwtService::new(SECRET, "reelhost-access");
        let videos = Arc::new(videos);
        let storage = Arc::new(storage);
        let pipeline = ThumbnailUploadPipeline::new(
            Arc::new(jwt.clone()),
            videos.clone(),
            namer,
            storage.clone(),
            MAX_BYTES,
        );

        Harness {
            pipeline,
            jwt,
            videos,
            storage,
            owner,
            video,
        }
    }

    async fn harness() -> Harness {
        harness_with(
            CountingGateway::default(),
            RecordingStorage::default(),
            Arc::new(RandomAssetNamer::new()),
        )
        .await
    }

    #[tokio::test]
    async fn test_png_upload_sets_thumbnail_url() {
        let h = harness().await;
        let token = h.owner_token();

        let updated = h
            .pipeline
            .run(Some(token.as_str()), h.request(vec![7u8; 50 * 1024], "image/png"))
            .await
            .unwrap();

        let url = updated.thumbnail_url.clone().unwrap();
        let (name, data) = h.storage.writes.lock().unwrap()[0].clone();
        assert_eq!(url, format!("{}/{}", BASE_URL, name));
        assert!(url.ends_with(".png"));
        assert_eq!(name.trim_end_matches(".png").len(), 43);
        assert_eq!(data.len(), 50 * 1024);
        assert_eq!(h.stored_video().await, updated);
    }

    #[tokio::test]
    async fn test_jpeg_upload_uses_jpeg_extension() {
        let h = harness().await;
        let token = h.owner_token();

        let updated = h
            .pipeline
            .run(Some(token.as_str()), h.request(vec![0xff, 0xd8, 0xff], "image/jpeg"))
            .await
            .unwrap();

        assert!(updated.thumbnail_url.unwrap().ends_with(".jpeg"));
    }

    #[tokio::test]
    async fn test_unsupported_type_writes_nothing() {
        for media_type in ["application/pdf", "text/plain", "image/gif", "not a type"] {
            let h = harness().await;
            let token = h.owner_token();

            let failure = h
                .pipeline
                .run(Some(token.as_str()), h.request(b"%PDF-1.7".to_vec(), media_type))
                .await
                .unwrap_err();

            assert_eq!(failure.stage, UploadStage::Validating);
            assert!(matches!(failure.error, AppError::UnsupportedMediaType(_)));
            assert_eq!(h.storage.write_count(), 0);
            assert_eq!(h.videos.updates.load(Ordering::SeqCst), 0);
            assert_eq!(h.stored_video().await, h.video);
        }
    }

    #[tokio::test]
    async fn test_conflict_leaves_orphaned_asset() {
        let h = harness_with(
            CountingGateway {
                reject_updates: true,
                ..Default::default()
            },
            RecordingStorage::default(),
            Arc::new(RandomAssetNamer::new()),
        )
        .await;
        let token = h.owner_token();

        let failure = h
            .pipeline
            .run(Some(token.as_str()), h.request(vec![1u8; 128], "image/png"))
            .await
            .unwrap_err();

        assert_eq!(failure.stage, UploadStage::Recording);
        assert!(matches!(failure.error, AppError::MetadataConflict(_)));
        assert_eq!(h.storage.write_count(), 1);
        assert_eq!(h.stored_video().await, h.video);
    }

    #[tokio::test]
    async fn test_expired_credential_touches_nothing() {
        let h = harness().await;
        let expired = format!(
            "Bearer {}",
            h.jwt
                .issue_token(h.owner, Duration::seconds(-120))
                .unwrap()
        );

        let failure = h
            .pipeline
            .run(Some(expired.as_str()), h.request(vec![1u8; 16], "image/png"))
            .await
            .unwrap_err();

        assert_eq!(failure.stage, UploadStage::Authenticating);
        assert!(matches!(failure.error, AppError::InvalidCredential(_)));
        assert_eq!(h.videos.fetches.load(Ordering::SeqCst), 0);
        assert_eq!(h.videos.updates.load(Ordering::SeqCst), 0);
        assert_eq!(h.storage.write_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_credential_touches_nothing() {
        let h = harness().await;

        let failure = h
            .pipeline
            .run(None, h.request(vec![1u8; 16], "image/png"))
            .await
            .unwrap_err();

        assert_eq!(failure.error, AppError::MissingCredential);
        assert_eq!(h.videos.fetches.load(Ordering::SeqCst), 0);
        assert_eq!(h.storage.write_count(), 0);
    }

    #[tokio::test]
    async fn test_write_failure_skips_update() {
        let h = harness_with(
            CountingGateway::default(),
            RecordingStorage {
                fail_writes: true,
                ..Default::default()
            },
            Arc::new(RandomAssetNamer::new()),
        )
        .await;
        let token = h.owner_token();

        let failure = h
            .pipeline
            .run(Some(token.as_str()), h.request(vec![1u8; 16], "image/png"))
            .await
            .unwrap_err();

        assert_eq!(failure.stage, UploadStage::Persisting);
        assert!(matches!(failure.error, AppError::WriteFailure(_)));
        assert_eq!(h.videos.updates.load(Ordering::SeqCst), 0);
        assert_eq!(h.stored_video().await, h.video);
    }

    #[tokio::test]
    async fn test_entropy_failure_skips_write() {
        let h = harness_with(
            CountingGateway::default(),
            RecordingStorage::default(),
            Arc::new(BrokenNamer),
        )
        .await;
        let token = h.owner_token();

        let failure = h
            .pipeline
            .run(Some(token.as_str()), h.request(vec![1u8; 16], "image/png"))
            .await
            .unwrap_err();

        assert_eq!(failure.stage, UploadStage::Naming);
        assert!(matches!(
            failure.error,
            AppError::RandomGenerationFailure(_)
        ));
        assert_eq!(h.storage.write_count(), 0);
    }

    #[tokio::test]
    async fn test_unknown_video_is_not_found() {
        let h = harness().await;
        let token = h.owner_token();
        let mut request = h.request(vec![1u8; 16], "image/png");
        request.video_id = Uuid::new_v4();

        let failure = h.pipeline.run(Some(token.as_str()), request).await.unwrap_err();

        assert_eq!(failure.stage, UploadStage::OwnerResolving);
        assert!(matches!(failure.error, AppError::RecordNotFound(_)));
        assert_eq!(h.storage.write_count(), 0);
    }

    #[tokio::test]
    async fn test_other_user_is_forbidden() {
        let h = harness().await;
        let token = h.token_for(Uuid::new_v4());

        let failure = h
            .pipeline
            .run(Some(token.as_str()), h.request(vec![1u8; 16], "image/png"))
            .await
            .unwrap_err();

        assert_eq!(failure.stage, UploadStage::OwnerResolving);
        assert!(matches!(failure.error, AppError::Forbidden(_)));
        assert_eq!(h.storage.write_count(), 0);
        assert_eq!(h.videos.updates.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_oversized_upload_rejected_before_fetch() {
        let h = harness().await;
        let token = h.owner_token();

        let failure = h
            .pipeline
            .run(Some(token.as_str()), h.request(vec![0u8; MAX_BYTES + 1], "image/png"))
            .await
            .unwrap_err();

        assert_eq!(failure.stage, UploadStage::Receiving);
        assert_eq!(failure.error, AppError::PayloadTooLarge { limit: MAX_BYTES });
        assert_eq!(h.videos.fetches.load(Ordering::SeqCst), 0);
        assert_eq!(h.storage.write_count(), 0);
    }
}
