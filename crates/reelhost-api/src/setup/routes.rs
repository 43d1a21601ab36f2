//! Route table

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::constants::{HEALTH_PATH, MULTIPART_OVERHEAD_BYTES, THUMBNAIL_UPLOAD_PATH};
use crate::handlers::{health::health_check, thumbnail_upload::upload_thumbnail};
use crate::state::AppState;

pub fn build_router(state: Arc<AppState>) -> Router {
    let body_limit = state
        .pipeline
        .max_upload_bytes()
        .saturating_add(MULTIPART_OVERHEAD_BYTES);

    Router::new()
        .route(
            THUMBNAIL_UPLOAD_PATH,
            post(upload_thumbnail).layer(DefaultBodyLimit::max(body_limit)),
        )
        .route(HEALTH_PATH, get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
