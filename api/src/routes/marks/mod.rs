//! `/marks` routes.

pub mod common;
pub mod delete;
pub mod get;
pub mod post;
pub mod put;

use axum::{Router, routing::get};
use util::state::AppState;

use delete::delete_marks;
use get::{export_marks, get_marks, list_marks};
use post::create_marks;
use put::update_marks;

/// - `GET /marks` → `list_marks`
/// - `POST /marks` → `create_marks`
/// - `GET /marks/export` → `export_marks`
/// - `GET /marks/{marks_id}` → `get_marks`
/// - `PUT /marks/{marks_id}` → `update_marks`
/// - `DELETE /marks/{marks_id}` → `delete_marks`
pub fn marks_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_marks).post(create_marks))
        .route("/export", get(export_marks))
        .route(
            "/{marks_id}",
            get(get_marks).put(update_marks).delete(delete_marks),
        )
}
