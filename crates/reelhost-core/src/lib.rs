//! Reelhost Core Library
//!
//! This crate provides the domain models, error types, configuration and upload
//! validation that are shared across all Reelhost components.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod naming;
pub mod validation;

// Re-export commonly used types
pub use config::{AssetConfig, BaseConfig, Config, ServiceConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use naming::{AssetNamer, NamingError, RandomAssetNamer};
pub use validation::{check_media_type, MediaTypeError};
