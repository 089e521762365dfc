use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use services::teacher::{TeacherService, UpdateProfile};
use util::state::AppState;

use crate::auth::CurrentActor;
use crate::response::{ApiResponse, service_error};
use crate::routes::teachers::common::TeacherResponse;

/// PUT /api/auth/profile
///
/// Updates the caller's `name`, `email`, `phone` and/or `subject`. Other fields
/// in the body are ignored.
pub async fn update_profile(
    State(app_state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Json(req): Json<UpdateProfile>,
) -> impl IntoResponse {
    match TeacherService::update_profile(app_state.db(), &actor, req).await {
        Ok(teacher) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                TeacherResponse::from(teacher),
                "Profile updated successfully",
            )),
        ),
        Err(e) => service_error(e),
    }
}
