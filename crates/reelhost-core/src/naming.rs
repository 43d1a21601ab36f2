//! Asset naming
//!
//! Thumbnail file names are 256 bits of OS entropy encoded as unpadded base64url,
//! followed by the extension of the validated media type. Uniqueness rests on the
//! entropy width alone; no registry of issued names is kept.

use rand::rngs::OsRng;
use rand::TryRngCore;

use crate::constants::ASSET_TOKEN_BYTES;
use crate::models::{AssetName, ImageMediaType};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NamingError {
    #[error("Entropy source unavailable: {0}")]
    EntropyUnavailable(String),
}

/// Produces unpredictable file names for validated uploads.
pub trait AssetNamer: Send + Sync {
    fn generate(&self, media_type: ImageMediaType) -> Result<AssetName, NamingError>;
}

/// Namer backed by the operating system's CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomAssetNamer;

impl RandomAssetNamer {
    pub fn new() -> Self {
        Self
    }
}

impl AssetNamer for RandomAssetNamer {
    fn generate(&self, media_type: ImageMediaType) -> Result<AssetName, NamingError> {
        let mut entropy = [0u8; ASSET_TOKEN_BYTES];
        OsRng
            .try_fill_bytes(&mut entropy)
            .map_err(|e| NamingError::EntropyUnavailable(e.to_string()))?;

        Ok(AssetName::from_entropy(&entropy, media_type))
    }
}
