use axum::{Json, http::StatusCode};
use serde::Serialize;
use services::error::ServiceError;

/// Standardized wrapper for every JSON response:
///
/// ```json
/// { "success": true, "data": { ... }, "message": "Student fetched successfully" }
/// ```
///
/// Error responses carry `T::default()` as `data`.
#[derive(Serialize)]
pub struct ApiResponse<T>
where
    T: Serialize,
{
    pub success: bool,
    pub data: T,
    pub message: String,
}

impl<T> ApiResponse<T>
where
    T: Serialize,
{
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self
    where
        T: Default,
    {
        Self {
            success: false,
            data: T::default(),
            message: message.into(),
        }
    }
}

/// Empty payload for responses without data.
#[derive(Serialize, Default)]
pub struct Empty;

/// HTTP status for a service failure.
pub fn status_for(err: &ServiceError) -> StatusCode {
    match err {
        ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
        ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        ServiceError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
        ServiceError::Forbidden(_) => StatusCode::FORBIDDEN,
        ServiceError::Storage(_) | ServiceError::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Converts a service failure into the error envelope.
///
/// Internal failures are logged here and reported with a generic message.
pub fn service_error<T>(err: ServiceError) -> (StatusCode, Json<ApiResponse<T>>)
where
    T: Serialize + Default,
{
    let status = status_for(&err);
    let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
        tracing::error!(error = %err, "request failed");
        "Internal server error".to_owned()
    } else {
        err.to_string()
    };
    (status, Json(ApiResponse::error(message)))
}
