//! Configuration validation
//!
//! Validates critical configuration values at startup to catch misconfigurations early.

use anyhow::Result;
use reelhost_core::Config;

/// Validate critical configuration values
pub fn validate_config(config: &Config) -> Result<()> {
    config.validate()?;

    if config.is_production() && config.public_base_url().starts_with("http://localhost") {
        tracing::warn!(
            public_base_url = %config.public_base_url(),
            "Production mode with a localhost PUBLIC_BASE_URL - thumbnail URLs will not resolve for clients"
        );
    }

    Ok(())
}
