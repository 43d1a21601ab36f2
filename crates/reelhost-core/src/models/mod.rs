//! Data models for the application
//!
//! This module contains the video metadata record and the value types that
//! flow through a single thumbnail upload.

mod asset;
mod video;

// Re-export all models for convenient imports
pub use asset::*;
pub use video::*;
