pub mod get;

use axum::{Router, routing::get};
use util::state::AppState;

use get::get_class_analytics;

/// - `GET /analytics/classes/{class_name}` → `get_class_analytics`
pub fn analytics_routes() -> Router<AppState> {
    Router::new().route("/classes/{class_name}", get(get_class_analytics))
}
