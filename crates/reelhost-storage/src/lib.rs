//! Reelhost Storage Library
//!
//! This crate provides the asset store for Reelhost: the `Storage` trait and its
//! local filesystem implementation.
//!
//! # Asset names
//!
//! Assets live flat under the configured root. A name is a single path component;
//! names containing `/`, `\` or `..` are rejected. The public locator of an asset is
//! `{base_url}/{name}` and is computed without touching the filesystem.

pub mod factory;
pub mod local;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use local::LocalStorage;
pub use traits::{Storage, StorageError, StorageResult};
