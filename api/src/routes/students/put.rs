use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use services::student::{StudentService, UpdateStudent};
use util::state::AppState;

use super::common::StudentResponse;
use crate::auth::CurrentActor;
use crate::response::{ApiResponse, service_error};

/// PUT /api/students/{student_id}
///
/// Partial update; any subset of the create fields plus `is_active`.
/// Roll number and email uniqueness is re-checked when they change.
pub async fn update_student(
    State(app_state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(student_id): Path<i64>,
    Json(req): Json<UpdateStudent>,
) -> impl IntoResponse {
    match StudentService::update(app_state.db(), &actor, student_id, req).await {
        Ok(student) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                StudentResponse::from(student),
                "Student updated successfully",
            )),
        ),
        Err(e) => service_error(e),
    }
}
