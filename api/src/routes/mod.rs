//! HTTP route entry point for `/api/...`.
//!
//! Route groups:
//! - `/health` → liveness probe (public)
//! - `/auth` → login, teacher registration, own profile
//! - `/students` → student records, their marks and CSV export
//! - `/marks` → marks records and CSV export
//! - `/teachers` → teacher directory (admin)
//! - `/analytics` → per-class statistics
//!
//! No route-level guards are mounted: each handler resolves the caller as an
//! `Actor` and the service layer applies the access policy.

use axum::Router;
use util::state::AppState;

use crate::routes::{
    analytics::analytics_routes, auth::auth_routes, health::health_routes,
    marks::marks_routes, students::students_routes, teachers::teachers_routes,
};

pub mod analytics;
pub mod auth;
pub mod common;
pub mod health;
pub mod marks;
pub mod students;
pub mod teachers;

/// Builds the `/api` router with its state applied.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health_routes())
        .nest("/auth", auth_routes())
        .nest("/students", students_routes())
        .nest("/marks", marks_routes())
        .nest("/teachers", teachers_routes())
        .nest("/analytics", analytics_routes())
        .with_state(app_state)
}
