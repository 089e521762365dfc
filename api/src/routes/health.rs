use axum::{Json, Router, response::IntoResponse, routing::get};
use serde::Serialize;
use util::{config, state::AppState};

use crate::response::ApiResponse;

/// Builds the `/health` route group.
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/", get(health_check))
}

#[derive(Debug, Serialize)]
struct HealthStatus {
    status: &'static str,
    service: String,
}

/// GET /api/health
///
/// Public liveness probe.
///
/// ```json
/// { "success": true, "data": { "status": "OK", "service": "school-records" }, "message": "Health check passed" }
/// ```
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::success(
        HealthStatus {
            status: "OK",
            service: config::project_name(),
        },
        "Health check passed",
    ))
}
