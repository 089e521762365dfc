use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use services::teacher::TeacherService;
use util::state::AppState;

use super::common::TeacherResponse;
use crate::auth::CurrentActor;
use crate::response::{ApiResponse, service_error};

/// GET /api/teachers
///
/// Active teachers ordered by name. Admin only.
///
/// ### Responses
/// - `200 OK` with a list of teachers
/// - `401 Unauthorized` / `403 Forbidden`
pub async fn list_teachers(
    State(app_state): State<AppState>,
    CurrentActor(actor): CurrentActor,
) -> impl IntoResponse {
    match TeacherService::list(app_state.db(), &actor).await {
        Ok(teachers) => {
            let data: Vec<TeacherResponse> = teachers.into_iter().map(Into::into).collect();
            (
                StatusCode::OK,
                Json(ApiResponse::success(data, "Teachers retrieved successfully")),
            )
        }
        Err(e) => service_error(e),
    }
}

/// GET /api/teachers/{teacher_id}
///
/// One teacher by id. Admin only.
pub async fn get_teacher(
    State(app_state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(teacher_id): Path<i64>,
) -> impl IntoResponse {
    match TeacherService::get(app_state.db(), &actor, teacher_id).await {
        Ok(teacher) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                TeacherResponse::from(teacher),
                "Teacher retrieved successfully",
            )),
        ),
        Err(e) => service_error(e),
    }
}
