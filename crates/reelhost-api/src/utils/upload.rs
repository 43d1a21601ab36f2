//! Multipart extraction for thumbnail uploads

use axum::extract::multipart::{Multipart, MultipartError};
use axum::http::StatusCode;
use bytes::{Bytes, BytesMut};
use reelhost_core::constants::{FALLBACK_CONTENT_TYPE, THUMBNAIL_FORM_FIELD};
use reelhost_core::AppError;

/// The thumbnail part of an upload form
#[derive(Debug)]
pub struct ThumbnailField {
    pub bytes: Bytes,
    pub content_type: String,
    pub file_name: Option<String>,
}

fn multipart_error(err: MultipartError, max_bytes: usize) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::PayloadTooLarge { limit: max_bytes };
    }
    AppError::FormParseFailure(err.body_text())
}

/// Read the single `thumbnail` field, aborting as soon as it exceeds `max_bytes`.
///
/// Other fields are skipped. A missing field Content-Type falls back to
/// `application/octet-stream`, which the media type check then rejects.
pub async fn extract_thumbnail_field(
    mut multipart: Multipart,
    max_bytes: usize,
) -> Result<ThumbnailField, AppError> {
    let mut thumbnail: Option<ThumbnailField> = None;

    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, max_bytes))?
    {
        if field.name() != Some(THUMBNAIL_FORM_FIELD) {
            continue;
        }

        if thumbnail.is_some() {
            return Err(AppError::FormParseFailure(
                "Multiple thumbnail fields are not allowed; send exactly one field named 'thumbnail'"
                    .to_string(),
            ));
        }

        let file_name = field.file_name().map(str::to_string);
        let content_type = field
            .content_type()
            .map(str::to_string)
            .unwrap_or_else(|| FALLBACK_CONTENT_TYPE.to_string());

        let mut buffer = BytesMut::new();
        while let Some(chunk) = field
            .chunk()
            .await
            .map_err(|e| multipart_error(e, max_bytes))?
        {
            if buffer.len() + chunk.len() > max_bytes {
                return Err(AppError::PayloadTooLarge { limit: max_bytes });
            }
            buffer.extend_from_slice(&chunk);
        }

        thumbnail = Some(ThumbnailField {
            bytes: buffer.freeze(),
            content_type,
            file_name,
        });
    }

    thumbnail.ok_or_else(|| AppError::FormParseFailure("No thumbnail provided".to_string()))
}
