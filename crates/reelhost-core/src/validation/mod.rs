//! Upload validation
//!
//! Thumbnails are checked against a closed allow-list of image media types.

mod media_type;

pub use media_type::{check_media_type, MediaTypeError};
