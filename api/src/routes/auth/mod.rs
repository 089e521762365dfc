//! `/auth` routes: login, admin-only registration and the caller's own profile.

pub mod get;
pub mod post;
pub mod put;

use axum::{
    Router,
    routing::{get, post},
};
use util::state::AppState;

use get::get_profile;
use post::{login, register};
use put::update_profile;

/// - `POST /auth/login` → `login`
/// - `POST /auth/register` → `register`
/// - `GET /auth/profile` → `get_profile`
/// - `PUT /auth/profile` → `update_profile`
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/register", post(register))
        .route("/profile", get(get_profile).put(update_profile))
}
