use std::sync::Arc;

use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, Path, State};
use axum::http::{header::AUTHORIZATION, HeaderMap};
use axum::Json;
use reelhost_core::models::{UploadRequest, VideoRecord};
use reelhost_core::AppError;
use uuid::Uuid;

use crate::error::HttpAppError;
use crate::state::AppState;
use crate::utils::upload::extract_thumbnail_field;

/// `POST /api/videos/{video_id}/thumbnail`
///
/// The video id is parsed and the caller authenticated before any of the
/// multipart body is read.
#[tracing::instrument(skip(state, headers, multipart))]
pub async fn upload_thumbnail(
    State(state): State<Arc<AppState>>,
    Path(video_id): Path<String>,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<VideoRecord>, HttpAppError> {
    let video_id = Uuid::parse_str(&video_id)
        .map_err(|_| AppError::InvalidIdentifier(video_id.clone()))?;

    let authorization = headers
        .get(AUTHORIZATION)
        .map(|value| value.to_str().unwrap_or_default());
    let uploader = state.pipeline.authenticate(authorization)?;

    let multipart = multipart.map_err(|e| AppError::FormParseFailure(e.body_text()))?;
    let thumbnail = extract_thumbnail_field(multipart, state.pipeline.max_upload_bytes()).await?;

    tracing::debug!(
        file_name = thumbnail.file_name.as_deref().unwrap_or("unknown"),
        content_type = %thumbnail.content_type,
        size_bytes = thumbnail.bytes.len(),
        "Thumbnail received"
    );

    let video = state
        .pipeline
        .upload(
            &uploader,
            UploadRequest {
                video_id,
                bytes: thumbnail.bytes,
                declared_media_type: thumbnail.content_type,
            },
        )
        .await?;

    Ok(Json(video))
}
