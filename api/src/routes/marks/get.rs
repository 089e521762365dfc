use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use services::export::ExportService;
use services::marks::MarksService;
use util::state::AppState;

use super::common::{MarksQuery, MarksResponse};
use crate::auth::CurrentActor;
use crate::response::{ApiResponse, Empty, service_error};
use crate::routes::common::csv_attachment;

/// GET /api/marks
///
/// All marks, newest exam first. Optional filters: `subject`, `exam_type`, `academic_year`.
///
/// ### Responses
/// - `200 OK`
/// - `400 Bad Request` for an unknown `exam_type`
/// - `401 Unauthorized`
pub async fn list_marks(
    State(app_state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Query(query): Query<MarksQuery>,
) -> impl IntoResponse {
    let filter = match query.into_filter() {
        Ok(filter) => filter,
        Err(msg) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<Vec<MarksResponse>>::error(msg)),
            );
        }
    };

    match MarksService::list(app_state.db(), &actor, &filter).await {
        Ok(marks) => {
            let data: Vec<MarksResponse> = marks.into_iter().map(Into::into).collect();
            (
                StatusCode::OK,
                Json(ApiResponse::success(data, "Marks retrieved successfully")),
            )
        }
        Err(e) => service_error(e),
    }
}

/// GET /api/marks/export
///
/// CSV attachment `all_students_marks.csv`, same filters as `GET /api/marks`.
pub async fn export_marks(
    State(app_state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Query(query): Query<MarksQuery>,
) -> Response {
    let filter = match query.into_filter() {
        Ok(filter) => filter,
        Err(msg) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<Empty>::error(msg)),
            )
                .into_response();
        }
    };

    match ExportService::all_marks(app_state.db(), &actor, &filter).await {
        Ok(export) => csv_attachment(export),
        Err(e) => service_error::<Empty>(e).into_response(),
    }
}

/// GET /api/marks/{marks_id}
pub async fn get_marks(
    State(app_state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(marks_id): Path<i64>,
) -> impl IntoResponse {
    match MarksService::get(app_state.db(), &actor, marks_id).await {
        Ok(marks) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                MarksResponse::from(marks),
                "Marks retrieved successfully",
            )),
        ),
        Err(e) => service_error(e),
    }
}
