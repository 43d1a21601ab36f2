//! HTTP-level constants

/// Route that accepts thumbnail uploads.
pub const THUMBNAIL_UPLOAD_PATH: &str = "/api/videos/{video_id}/thumbnail";

pub const HEALTH_PATH: &str = "/health";

/// Slack on top of the thumbnail limit for multipart boundaries and part headers.
pub const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;
