use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use services::marks::{MarksService, UpdateMarks};
use util::{config, state::AppState};

use super::common::MarksResponse;
use crate::auth::CurrentActor;
use crate::response::{ApiResponse, service_error};

/// PUT /api/marks/{marks_id}
///
/// Only the teacher who entered the record, or an admin, may update it.
///
/// ### Responses
/// - `200 OK`
/// - `400 Bad Request` (validation, or a duplicate key under `DUPLICATE_MARKS_POLICY=reject`)
/// - `403 Forbidden` (`"You can only update marks you entered"`)
/// - `404 Not Found`
pub async fn update_marks(
    State(app_state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(marks_id): Path<i64>,
    Json(req): Json<UpdateMarks>,
) -> impl IntoResponse {
    let policy = config::duplicate_marks_policy();
    match MarksService::update(app_state.db(), &actor, policy, marks_id, req).await {
        Ok(marks) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                MarksResponse::from(marks),
                "Marks updated successfully",
            )),
        ),
        Err(e) => service_error(e),
    }
}
