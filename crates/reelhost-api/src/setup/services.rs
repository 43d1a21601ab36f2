//! Service wiring

use anyhow::Result;
use reelhost_core::{Config, RandomAssetNamer};
use reelhost_db::PgVideoRepository;
use reelhost_storage::Storage;
use sqlx::PgPool;
use std::sync::Arc;

use crate::auth::JwtService;
use crate::services::thumbnail::ThumbnailUploadPipeline;
use crate::state::AppState;

pub fn initialize_services(
    config: &Config,
    pool: PgPool,
    storage: Arc<dyn Storage>,
) -> Result<Arc<AppState>> {
    let jwt = JwtService::new(config.jwt_secret(), config.jwt_issuer());
    let videos = PgVideoRepository::new(pool);

    let pipeline = ThumbnailUploadPipeline::new(
        Arc::new(jwt),
        Arc::new(videos),
        Arc::new(RandomAssetNamer::new()),
        storage,
        config.max_thumbnail_size_bytes(),
    );

    tracing::info!(
        max_thumbnail_bytes = config.max_thumbnail_size_bytes(),
        "Thumbnail upload pipeline ready"
    );

    Ok(Arc::new(AppState::new(Arc::new(pipeline))))
}
