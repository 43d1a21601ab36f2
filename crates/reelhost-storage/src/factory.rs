use crate::{LocalStorage, Storage, StorageResult};
use reelhost_core::Config;
use std::sync::Arc;

/// Create the asset store from configuration
pub async fn create_storage(config: &Config) -> StorageResult<Arc<dyn Storage>> {
    let storage = LocalStorage::new(config.assets_root(), config.asset_base_url()).await?;

    tracing::info!(
        root = %config.assets_root(),
        base_url = %config.asset_base_url(),
        "Asset storage initialized"
    );

    Ok(Arc::new(storage))
}
