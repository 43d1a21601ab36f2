//! Constants shared by every Reelhost crate.

/// Multipart form field that carries the thumbnail image.
pub const THUMBNAIL_FORM_FIELD: &str = "thumbnail";

/// Number of random bytes behind every asset token (256 bits).
pub const ASSET_TOKEN_BYTES: usize = 32;

/// Issuer stamped into and required on access tokens.
pub const DEFAULT_JWT_ISSUER: &str = "reelhost-access";

/// Content type assumed when a multipart field declares none.
pub const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";
