use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use services::export::ExportService;
use services::student::StudentService;
use util::state::AppState;

use super::common::{StudentListQuery, StudentResponse};
use crate::auth::CurrentActor;
use crate::response::{ApiResponse, Empty, service_error};
use crate::routes::common::csv_attachment;
use crate::routes::marks::common::MarksResponse;

/// GET /api/students
///
/// Active students sorted by name, optionally filtered by `class_name` and `section`.
///
/// ### Example
/// `GET /api/students?class_name=10th&section=A`
pub async fn list_students(
    State(app_state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Query(query): Query<StudentListQuery>,
) -> impl IntoResponse {
    match StudentService::list(
        app_state.db(),
        &actor,
        query.class_name.as_deref(),
        query.section.as_deref(),
    )
    .await
    {
        Ok(students) => {
            let data: Vec<StudentResponse> = students.into_iter().map(Into::into).collect();
            (
                StatusCode::OK,
                Json(ApiResponse::success(data, "Students retrieved successfully")),
            )
        }
        Err(e) => service_error(e),
    }
}

/// GET /api/students/{student_id}
pub async fn get_student(
    State(app_state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(student_id): Path<i64>,
) -> impl IntoResponse {
    match StudentService::get(app_state.db(), &actor, student_id).await {
        Ok(student) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                StudentResponse::from(student),
                "Student retrieved successfully",
            )),
        ),
        Err(e) => service_error(e),
    }
}

/// GET /api/students/roll/{roll_number}
///
/// Active student with the given roll number.
pub async fn get_student_by_roll_number(
    State(app_state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(roll_number): Path<String>,
) -> impl IntoResponse {
    match StudentService::get_by_roll_number(app_state.db(), &actor, &roll_number).await {
        Ok(student) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                StudentResponse::from(student),
                "Student retrieved successfully",
            )),
        ),
        Err(e) => service_error(e),
    }
}

#[derive(Debug, Serialize, Default)]
pub struct StudentMarksResponse {
    pub student: StudentResponse,
    pub marks: Vec<MarksResponse>,
}

/// GET /api/students/{student_id}/marks
///
/// The student together with all their marks, newest exam first.
pub async fn get_student_marks(
    State(app_state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(student_id): Path<i64>,
) -> impl IntoResponse {
    match StudentService::marks(app_state.db(), &actor, student_id).await {
        Ok((student, marks)) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                StudentMarksResponse {
                    student: student.into(),
                    marks: marks.into_iter().map(Into::into).collect(),
                },
                "Student marks retrieved successfully",
            )),
        ),
        Err(e) => service_error(e),
    }
}

/// GET /api/students/{student_id}/marks/export
///
/// CSV attachment named `<Student_Name>_marks.csv`.
pub async fn export_student_marks(
    State(app_state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(student_id): Path<i64>,
) -> Response {
    match ExportService::student_marks(app_state.db(), &actor, student_id).await {
        Ok(export) => csv_attachment(export),
        Err(e) => service_error::<Empty>(e).into_response(),
    }
}
