use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use services::student::{CreateStudent, StudentService};
use util::state::AppState;

use super::common::StudentResponse;
use crate::auth::CurrentActor;
use crate::response::{ApiResponse, service_error};

/// POST /api/students
///
/// ### Request Body
/// ```json
/// {
///   "name": "Alice Johnson",
///   "roll_number": "2024001",
///   "class_name": "10th",
///   "section": "A",
///   "email": "alice@student.com",
///   "gender": "Female",
///   "date_of_birth": "2008-05-15"
/// }
/// ```
///
/// ### Responses
/// - `201 Created`
/// - `400 Bad Request` (`"Student with this roll number already exists"`, `"Invalid email format"`, ...)
/// - `401 Unauthorized`
pub async fn create_student(
    State(app_state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Json(req): Json<CreateStudent>,
) -> impl IntoResponse {
    match StudentService::create(app_state.db(), &actor, req).await {
        Ok(student) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                StudentResponse::from(student),
                "Student created successfully",
            )),
        ),
        Err(e) => service_error(e),
    }
}
