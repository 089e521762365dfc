use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use services::teacher::TeacherService;
use util::state::AppState;

use crate::auth::CurrentActor;
use crate::response::{ApiResponse, service_error};
use crate::routes::teachers::common::TeacherResponse;

/// GET /api/auth/profile
///
/// Returns the authenticated teacher's own profile.
pub async fn get_profile(
    State(app_state): State<AppState>,
    CurrentActor(actor): CurrentActor,
) -> impl IntoResponse {
    match TeacherService::profile(app_state.db(), &actor).await {
        Ok(teacher) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                TeacherResponse::from(teacher),
                "Profile retrieved successfully",
            )),
        ),
        Err(e) => service_error(e),
    }
}
