use std::fmt::{Display, Formatter, Result as FmtResult};

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use bytes::Bytes;
use uuid::Uuid;

/// Image media types accepted for thumbnails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageMediaType {
    Jpeg,
    Png,
}

impl ImageMediaType {
    /// Type and subtype without parameters, e.g. `image/png`.
    pub fn essence(&self) -> &'static str {
        match self {
            ImageMediaType::Jpeg => "image/jpeg",
            ImageMediaType::Png => "image/png",
        }
    }

    pub fn subtype(&self) -> &'static str {
        self.essence()
            .split_once('/')
            .map(|(_, subtype)| subtype)
            .unwrap_or_default()
    }

    /// File extension (without the dot); always the subtype, so JPEG is `jpeg`.
    pub fn extension(&self) -> &'static str {
        self.subtype()
    }
}

impl Display for ImageMediaType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.essence())
    }
}

/// File name for a stored asset: a random URL-safe token plus an extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetName {
    token: String,
    extension: &'static str,
}

impl AssetName {
    /// Encode `entropy` as an unpadded base64url token.
    pub fn from_entropy(entropy: &[u8], media_type: ImageMediaType) -> Self {
        Self {
            token: URL_SAFE_NO_PAD.encode(entropy),
            extension: media_type.extension(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn extension(&self) -> &str {
        self.extension
    }

    pub fn file_name(&self) -> String {
        format!("{}.{}", self.token, self.extension)
    }
}

impl Display for AssetName {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}.{}", self.token, self.extension)
    }
}

/// Payload of one thumbnail upload, alive only for the request.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub video_id: Uuid,
    pub bytes: Bytes,
    pub declared_media_type: String,
}

/// Upload bytes whose media type passed the allow-list.
#[derive(Debug, Clone)]
pub struct ValidatedAsset {
    pub media_type: ImageMediaType,
    pub bytes: Bytes,
}

/// An asset that has been durably written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredAsset {
    pub name: AssetName,
    pub locator: String,
}
