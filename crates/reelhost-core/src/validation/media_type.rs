use mime::Mime;

use crate::models::ImageMediaType;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MediaTypeError {
    #[error("Malformed media type: {0}")]
    Malformed(String),

    #[error("Media type not allowed: {0}")]
    Unsupported(String),
}

/// Parse a declared media type and match it against the allow-list.
///
/// Parameters such as `charset` are ignored; only the essence is compared,
/// case-insensitively.
pub fn check_media_type(declared: &str) -> Result<ImageMediaType, MediaTypeError> {
    let parsed: Mime = declared
        .trim()
        .parse()
        .map_err(|_| MediaTypeError::Malformed(declared.to_string()))?;

    let essence = parsed.essence_str().to_ascii_lowercase();
    match essence.as_str() {
        "image/jpeg" => Ok(ImageMediaType::Jpeg),
        "image/png" => Ok(ImageMediaType::Png),
        _ => {
            tracing::debug!(declared = %declared, "Rejected media type outside allow-list");
            Err(MediaTypeError::Unsupported(essence))
        }
    }
}
