//! `/teachers` routes (admin only).

pub mod common;
pub mod get;

use axum::{Router, routing::get};
use util::state::AppState;

use get::{get_teacher, list_teachers};

/// - `GET /teachers` → `list_teachers`
/// - `GET /teachers/{teacher_id}` → `get_teacher`
pub fn teachers_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_teachers))
        .route("/{teacher_id}", get(get_teacher))
}
