//! `/students` routes.
//!
//! Every handler resolves the caller with `CurrentActor` and leaves the
//! permission decision to the student service.

pub mod common;
pub mod delete;
pub mod get;
pub mod post;
pub mod put;

use axum::{Router, routing::get};
use util::state::AppState;

use delete::delete_student;
use get::{
    export_student_marks, get_student, get_student_by_roll_number, get_student_marks,
    list_students,
};
use post::create_student;
use put::update_student;

/// - `GET /students` → `list_students`
/// - `POST /students` → `create_student`
/// - `GET /students/roll/{roll_number}` → `get_student_by_roll_number`
/// - `GET /students/{student_id}` → `get_student`
/// - `PUT /students/{student_id}` → `update_student`
/// - `DELETE /students/{student_id}` → `delete_student`
/// - `GET /students/{student_id}/marks` → `get_student_marks`
/// - `GET /students/{student_id}/marks/export` → `export_student_marks`
pub fn students_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_students).post(create_student))
        .route("/roll/{roll_number}", get(get_student_by_roll_number))
        .route(
            "/{student_id}",
            get(get_student).put(update_student).delete(delete_student),
        )
        .route("/{student_id}/marks", get(get_student_marks))
        .route("/{student_id}/marks/export", get(export_student_marks))
}
