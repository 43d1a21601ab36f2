//! Configuration module
//!
//! This module provides configuration structures for the thumbnail service,
//! including server, database, authentication, and asset storage settings.

use std::env;

use crate::constants::DEFAULT_JWT_ISSUER;

// Common constants
const DEFAULT_PORT: u16 = 8091;
const MAX_CONNECTIONS: u32 = 10;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const MAX_THUMBNAIL_SIZE_MB: usize = 10;
const MIN_JWT_SECRET_LEN: usize = 32;

/// Server, database and authentication settings
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub environment: String,
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    pub jwt_secret: String,
    pub jwt_issuer: String,
    /// `compact` (default) or `json`
    pub log_format: String,
}

/// Where thumbnails are written and how they are addressed publicly
#[derive(Clone, Debug)]
pub struct AssetConfig {
    pub assets_root: String,
    /// Scheme and authority the assets are served from, e.g. `http://localhost:8091`.
    pub public_base_url: String,
    /// Path segment under which the asset root is exposed.
    pub assets_path_segment: String,
    pub max_thumbnail_size_bytes: usize,
}

#[derive(Clone, Debug)]
pub struct ServiceConfig {
    pub base: BaseConfig,
    pub assets: AssetConfig,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<ServiceConfig>);

impl Config {
    fn as_service(&self) -> &ServiceConfig {
        &self.0
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let environment = self.as_service().base.environment.to_lowercase();
        environment == "production" || environment == "prod"
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_vars<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = ServiceConfig::from_vars(lookup)?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.as_service().validate()
    }

    // Convenience getters for common fields
    pub fn server_port(&self) -> u16 {
        self.as_service().base.server_port
    }

    pub fn environment(&self) -> &str {
        &self.as_service().base.environment
    }

    pub fn database_url(&self) -> &str {
        &self.as_service().base.database_url
    }

    pub fn db_max_connections(&self) -> u32 {
        self.as_service().base.db_max_connections
    }

    pub fn db_timeout_seconds(&self) -> u64 {
        self.as_service().base.db_timeout_seconds
    }

    pub fn jwt_secret(&self) -> &str {
        &self.as_service().base.jwt_secret
    }

    pub fn jwt_issuer(&self) -> &str {
        &self.as_service().base.jwt_issuer
    }

    pub fn log_format(&self) -> &str {
        &self.as_service().base.log_format
    }

    pub fn json_logs(&self) -> bool {
        self.log_format().eq_ignore_ascii_case("json")
    }

    pub fn assets_root(&self) -> &str {
        &self.as_service().assets.assets_root
    }

    pub fn public_base_url(&self) -> &str {
        &self.as_service().assets.public_base_url
    }

    pub fn assets_path_segment(&self) -> &str {
        &self.as_service().assets.assets_path_segment
    }

    pub fn max_thumbnail_size_bytes(&self) -> usize {
        self.as_service().assets.max_thumbnail_size_bytes
    }

    /// Base URL that stored asset names are appended to.
    pub fn asset_base_url(&self) -> String {
        let assets = &self.as_service().assets;
        format!(
            "{}/{}",
            assets.public_base_url.trim_end_matches('/'),
            assets.assets_path_segment.trim_matches('/')
        )
    }
}

impl ServiceConfig {
    fn from_vars<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("ENVIRONMENT")
            .or_else(|| lookup("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let server_port = lookup("PORT")
            .unwrap_or_else(|| DEFAULT_PORT.to_string())
            .parse::<u16>()
            .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?;

        let max_thumbnail_size_mb = lookup("MAX_THUMBNAIL_SIZE_MB")
            .unwrap_or_else(|| MAX_THUMBNAIL_SIZE_MB.to_string())
            .parse::<usize>()
            .unwrap_or(MAX_THUMBNAIL_SIZE_MB);

        let base = BaseConfig {
            server_port,
            environment,
            database_url: lookup("DATABASE_URL")
                .ok_or_else(|| anyhow::anyhow!("DATABASE_URL must be set"))?,
            db_max_connections: lookup("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|| MAX_CONNECTIONS.to_string())
                .parse()
                .unwrap_or(MAX_CONNECTIONS),
            db_timeout_seconds: lookup("DB_TIMEOUT_SECONDS")
                .unwrap_or_else(|| CONNECTION_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(CONNECTION_TIMEOUT_SECS),
            jwt_secret: lookup("JWT_SECRET")
                .ok_or_else(|| anyhow::anyhow!("JWT_SECRET must be set for authentication"))?,
            jwt_issuer: lookup("JWT_ISSUER").unwrap_or_else(|| DEFAULT_JWT_ISSUER.to_string()),
            log_format: lookup("LOG_FORMAT").unwrap_or_else(|| "compact".to_string()),
        };

        let max_thumbnail_size_bytes = max_thumbnail_size_mb
            .checked_mul(1024 * 1024)
            .ok_or_else(|| anyhow::anyhow!("MAX_THUMBNAIL_SIZE_MB is too large"))?;

        let assets = AssetConfig {
            assets_root: lookup("ASSETS_ROOT").unwrap_or_else(|| "./assets".to_string()),
            public_base_url: lookup("PUBLIC_BASE_URL")
                .unwrap_or_else(|| format!("http://localhost:{}", server_port)),
            assets_path_segment: lookup("ASSETS_PATH_SEGMENT")
                .unwrap_or_else(|| "assets".to_string()),
            max_thumbnail_size_bytes,
        };

        Ok(ServiceConfig { base, assets })
    }

    fn validate(&self) -> Result<(), anyhow::Error> {
        if self.base.jwt_secret.len() < MIN_JWT_SECRET_LEN {
            return Err(anyhow::anyhow!(
                "JWT_SECRET must be at least 32 characters long"
            ));
        }

        if !self.base.database_url.starts_with("postgres://")
            && !self.base.database_url.starts_with("postgresql://")
        {
            return Err(anyhow::anyhow!(
                "DATABASE_URL must be a valid PostgreSQL connection string"
            ));
        }

        if !self.assets.public_base_url.starts_with("http://")
            && !self.assets.public_base_url.starts_with("https://")
        {
            return Err(anyhow::anyhow!(
                "PUBLIC_BASE_URL must start with http:// or https://"
            ));
        }

        if self.assets.assets_root.trim().is_empty() {
            return Err(anyhow::anyhow!("ASSETS_ROOT cannot be empty"));
        }

        if self.assets.max_thumbnail_size_bytes == 0 {
            return Err(anyhow::anyhow!(
                "MAX_THUMBNAIL_SIZE_MB must be greater than zero"
            ));
        }

        Ok(())
    }
}
