use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use services::teacher::{RegisterTeacher, TeacherService};
use util::state::AppState;

use crate::auth::{CurrentActor, generate_jwt};
use crate::response::{ApiResponse, service_error};
use crate::routes::teachers::common::TeacherResponse;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Default)]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: String,
    pub teacher: TeacherResponse,
}

/// POST /api/auth/login
///
/// Authenticates an active teacher and issues a JWT.
///
/// ### Request Body
/// ```json
/// { "email": "teacher@school.com", "password": "password123" }
/// ```
///
/// ### Responses
/// - `200 OK` with `{ token, expires_at, teacher }`
/// - `401 Unauthorized` with `"Invalid email or password"`
pub async fn login(
    State(app_state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> impl IntoResponse {
    let teacher = match TeacherService::login(app_state.db(), &req.email, &req.password).await {
        Ok(teacher) => teacher,
        Err(e) => return service_error::<LoginResponse>(e),
    };

    match generate_jwt(teacher.id, teacher.is_admin()) {
        Ok((token, expires_at)) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                LoginResponse {
                    token,
                    expires_at,
                    teacher: teacher.into(),
                },
                "Login successful",
            )),
        ),
        Err(e) => {
            tracing::error!(error = %e, "token encoding failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Internal server error")),
            )
        }
    }
}

/// POST /api/auth/register
///
/// Registers a teacher account. Admin only.
///
/// ### Request Body
/// ```json
/// {
///   "name": "John Smith",
///   "email": "john@school.com",
///   "password": "secret123",
///   "subject": "Mathematics",
///   "phone": "555-0101",
///   "role": "teacher"
/// }
/// ```
///
/// ### Responses
/// - `201 Created`
/// - `400 Bad Request` (validation failure or `"Teacher with this email already exists"`)
/// - `401 Unauthorized` / `403 Forbidden`
pub async fn register(
    State(app_state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Json(req): Json<RegisterTeacher>,
) -> impl IntoResponse {
    match TeacherService::register(app_state.db(), &actor, req).await {
        Ok(teacher) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                TeacherResponse::from(teacher),
                "Teacher registered successfully",
            )),
        ),
        Err(e) => service_error(e),
    }
}
