use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use services::marks::MarksService;
use util::state::AppState;

use crate::auth::CurrentActor;
use crate::response::{ApiResponse, Empty, service_error};

/// DELETE /api/marks/{marks_id}
///
/// Owner or admin only. The record is removed permanently.
pub async fn delete_marks(
    State(app_state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(marks_id): Path<i64>,
) -> impl IntoResponse {
    match MarksService::delete(app_state.db(), &actor, marks_id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse::success(Empty, "Marks deleted successfully")),
        ),
        Err(e) => service_error(e),
    }
}
