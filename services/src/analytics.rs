use db::models::{marks, student};
use sea_orm::DatabaseConnection;
use serde::Serialize;

use crate::access::{AccessPolicy, Action, Actor, Resource};
use crate::error::ServiceResult;
use crate::grade::GradeEngine;

/// Aggregate results for the active students of one class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassAnalytics {
    pub class_name: String,
    pub total_students: u64,
    pub average_percentage: f64,
    pub highest_percentage: f64,
    pub lowest_percentage: f64,
    /// Share of marks records at or above the pass mark, in percent.
    pub pass_rate: f64,
}

impl ClassAnalytics {
    /// Aggregates over `percentages`. All figures are zero when there are none.
    pub fn from_percentages(class_name: &str, total_students: u64, percentages: &[f64]) -> Self {
        if percentages.is_empty() {
            return Self {
                class_name: class_name.to_owned(),
                total_students,
                average_percentage: 0.0,
                highest_percentage: 0.0,
                lowest_percentage: 0.0,
                pass_rate: 0.0,
            };
        }

        let count = percentages.len() as f64;
        let sum: f64 = percentages.iter().sum();
        let highest = percentages.iter().copied().fold(f64::MIN, f64::max);
        let lowest = percentages.iter().copied().fold(f64::MAX, f64::min);
        let passed = percentages
            .iter()
            .filter(|p| GradeEngine::is_passing(**p))
            .count() as f64;

        Self {
            class_name: class_name.to_owned(),
            total_students,
            average_percentage: sum / count,
            highest_percentage: highest,
            lowest_percentage: lowest,
            pass_rate: passed / count * 100.0,
        }
    }
}

pub struct AnalyticsService;

impl AnalyticsService {
    pub async fn class_analytics(
        db: &DatabaseConnection,
        actor: &Actor,
        class_name: &str,
    ) -> ServiceResult<ClassAnalytics> {
        AccessPolicy::authorize(actor, Action::ClassAnalytics, &Resource::Any)?;

        let students = student::Model::list_active(db, Some(class_name), None).await?;
        let ids: Vec<i64> = students.iter().map(|s| s.id).collect();
        let percentages: Vec<f64> = marks::Model::find_for_students(db, &ids)
            .await?
            .into_iter()
            .map(|m| m.percentage)
            .collect();

        Ok(ClassAnalytics::from_percentages(
            class_name,
            students.len() as u64,
            &percentages,
        ))
    }
}
