use async_graphql::{Context, Object, Result};
use db::models::marks::{ExamType, MarksFilter};
use services::analytics::AnalyticsService;
use services::marks::MarksService;
use services::student::StudentService;
use services::teacher::TeacherService;
use std::str::FromStr;

use super::errors::{bad_input, gql_error};
use super::types::{ClassAnalyticsObject, Marks, Student, Teacher};
use super::{actor, db};

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Active students, sorted by name.
    async fn students(
        &self,
        ctx: &Context<'_>,
        class_name: Option<String>,
        section: Option<String>,
    ) -> Result<Vec<Student>> {
        let students = StudentService::list(
            db(ctx)?,
            actor(ctx)?,
            class_name.as_deref(),
            section.as_deref(),
        )
        .await
        .map_err(gql_error)?;
        Ok(students.into_iter().map(Into::into).collect())
    }

    /// Nullable: an unknown id yields `null` here plus a `NOT_FOUND` error,
    /// leaving sibling fields intact.
    async fn student(&self, ctx: &Context<'_>, id: i64) -> Result<Option<Student>> {
        StudentService::get(db(ctx)?, actor(ctx)?, id)
            .await
            .map(|s| Some(s.into()))
            .map_err(gql_error)
    }

    async fn student_by_roll_number(&self, ctx: &Context<'_>, roll_number: String) -> Result<Option<Student>> {
        StudentService::get_by_roll_number(db(ctx)?, actor(ctx)?, &roll_number)
            .await
            .map(|s| Some(s.into()))
            .map_err(gql_error)
    }

    /// Every marks record, newest exam first.
    async fn all_marks(&self, ctx: &Context<'_>) -> Result<Vec<Marks>> {
        list_marks(ctx, MarksFilter::default()).await
    }

    async fn student_marks(&self, ctx: &Context<'_>, student_id: i64) -> Result<Vec<Marks>> {
        let (_, records) = StudentService::marks(db(ctx)?, actor(ctx)?, student_id)
            .await
            .map_err(gql_error)?;
        Ok(records.into_iter().map(Into::into).collect())
    }

    async fn marks_by_subject(&self, ctx: &Context<'_>, subject: String) -> Result<Vec<Marks>> {
        list_marks(
            ctx,
            MarksFilter {
                subject: Some(subject),
                ..Default::default()
            },
        )
        .await
    }

    async fn marks_by_exam_type(&self, ctx: &Context<'_>, exam_type: String) -> Result<Vec<Marks>> {
        let exam_type = ExamType::from_str(exam_type.trim())
            .map_err(|_| bad_input(format!("Invalid exam type '{exam_type}'")))?;
        list_marks(
            ctx,
            MarksFilter {
                exam_type: Some(exam_type),
                ..Default::default()
            },
        )
        .await
    }

    /// Admin only.
    async fn teachers(&self, ctx: &Context<'_>) -> Result<Vec<Teacher>> {
        let teachers = TeacherService::list(db(ctx)?, actor(ctx)?)
            .await
            .map_err(gql_error)?;
        Ok(teachers.into_iter().map(Into::into).collect())
    }

    /// Admin only.
    async fn teacher(&self, ctx: &Context<'_>, id: i64) -> Result<Option<Teacher>> {
        TeacherService::get(db(ctx)?, actor(ctx)?, id)
            .await
            .map(|t| Some(t.into()))
            .map_err(gql_error)
    }

    /// The authenticated teacher.
    async fn me(&self, ctx: &Context<'_>) -> Result<Teacher> {
        TeacherService::profile(db(ctx)?, actor(ctx)?)
            .await
            .map(Into::into)
            .map_err(gql_error)
    }

    async fn class_analytics(&self, ctx: &Context<'_>, class_name: String) -> Result<ClassAnalyticsObject> {
        AnalyticsService::class_analytics(db(ctx)?, actor(ctx)?, &class_name)
            .await
            .map(Into::into)
            .map_err(gql_error)
    }
}

async fn list_marks(ctx: &Context<'_>, filter: MarksFilter) -> Result<Vec<Marks>> {
    let records = MarksService::list(db(ctx)?, actor(ctx)?, &filter)
        .await
        .map_err(gql_error)?;
    Ok(records.into_iter().map(Into::into).collect())
}
