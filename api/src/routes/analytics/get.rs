use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Serialize;
use services::analytics::{AnalyticsService, ClassAnalytics};
use util::state::AppState;

use crate::auth::CurrentActor;
use crate::response::{ApiResponse, service_error};

#[derive(Debug, Serialize, Default)]
pub struct ClassAnalyticsResponse {
    pub class_name: String,
    pub total_students: u64,
    pub average_percentage: f64,
    pub highest_percentage: f64,
    pub lowest_percentage: f64,
    pub pass_rate: f64,
}

impl From<ClassAnalytics> for ClassAnalyticsResponse {
    fn from(a: ClassAnalytics) -> Self {
        Self {
            class_name: a.class_name,
            total_students: a.total_students,
            average_percentage: a.average_percentage,
            highest_percentage: a.highest_percentage,
            lowest_percentage: a.lowest_percentage,
            pass_rate: a.pass_rate,
        }
    }
}

/// GET /api/analytics/classes/{class_name}
///
/// Aggregates over the marks of the class's active students. All figures
/// are `0` when the class has no marks.
pub async fn get_class_analytics(
    State(app_state): State<AppState>,
    CurrentActor(actor): CurrentActor,
    Path(class_name): Path<String>,
) -> impl IntoResponse {
    match AnalyticsService::class_analytics(app_state.db(), &actor, &class_name).await {
        Ok(analytics) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                ClassAnalyticsResponse::from(analytics),
                "Class analytics retrieved successfully",
            )),
        ),
        Err(e) => service_error(e),
    }
}
