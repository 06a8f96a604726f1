//! HTTP surface: `GET /lists/:list_id/videos`.

use crate::service::PlaylistService;
use crate::types::PlaylistVideos;
use crate::Error;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::error;

#[derive(Clone)]
pub struct AppState {
    pub service: PlaylistService,
}

/// Error body returned when a playlist cannot be served.
#[derive(Debug)]
pub struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({ "error": self.0.to_string() }));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

pub fn router(service: PlaylistService) -> Router {
    Router::new()
        .route("/lists/:list_id/videos", get(list_videos))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { service })
}

async fn list_videos(
    State(state): State<AppState>,
    Path(list_id): Path<String>,
) -> Result<Json<PlaylistVideos>, ApiError> {
    match state.service.videos(&list_id).await {
        Ok(body) => Ok(Json(body)),
        Err(e) => {
            error!(playlist = %list_id, error = %e, "playlist lookup failed");
            Err(e.into())
        }
    }
}
