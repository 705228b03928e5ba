use axum::{Json, Router, http::StatusCode, response::IntoResponse, routing::get};
use util::state::AppState;

use crate::response::ApiResponse;

/// GET /api/health
///
/// Liveness probe; returns 200 as long as the server is up.
async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(ApiResponse::success((), "Service is healthy")),
    )
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/", get(health))
}
