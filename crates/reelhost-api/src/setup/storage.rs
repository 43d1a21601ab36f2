//! Asset storage setup

use anyhow::{Context, Result};
use reelhost_core::Config;
use reelhost_storage::Storage;
use std::sync::Arc;

pub async fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    reelhost_storage::create_storage(config)
        .await
        .context("Failed to initialize asset storage")
}
