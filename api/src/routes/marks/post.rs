use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use services::marks::{CreateMarks, MarksService};
use util::{config, state::AppState};

use super::common::MarksResponse;
use crate::auth::CurrentActor;
use crate::response::{ApiResponse, service_error};

/// POST /api/marks
///
/// Records marks entered by the caller. `percentage` and `grade` are derived
/// and cannot be supplied.
///
/// ### Request Body
/// ```json
/// {
///   "student_id": 1,
///   "subject": "Mathematics",
///   "exam_type": "Final",
///   "marks_obtained": 82,
///   "total_marks": 100,
///   "academic_year": "2024",
///   "semester": "1st"
/// }
/// ```
///
/// ### Responses
/// - `201 Created`
/// - `400 Bad Request` (range violations, duplicate entry under the `reject` policy)
/// - `401 Unauthorized`
/// - `404 Not Found` (`"Student not found"`)
pub async fn create_marks(
    State(app_state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Json(req): Json<CreateMarks>,
) -> impl IntoResponse {
    let policy = config::duplicate_marks_policy();
    match MarksService::create(app_state.db(), &actor, policy, req).await {
        Ok(marks) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                MarksResponse::from(marks),
                "Marks added successfully",
            )),
        ),
        Err(e) => service_error(e),
    }
}
