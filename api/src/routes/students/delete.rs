use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use services::student::StudentService;
use util::state::AppState;

use crate::auth::CurrentActor;
use crate::response::{ApiResponse, Empty, service_error};

/// DELETE /api/students/{student_id}
///
/// Soft delete (admin only). The record stays, marked inactive.
pub async fn delete_student(
    State(app_state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(student_id): Path<i64>,
) -> impl IntoResponse {
    match StudentService::delete(app_state.db(), &actor, student_id).await {
        Ok(_) => (
            StatusCode::OK,
            Json(ApiResponse::success(Empty, "Student deleted successfully")),
        ),
        Err(e) => service_error(e),
    }
}
