use async_graphql::{Context, Object, Result};
use services::marks::MarksService;
use services::student::StudentService;
use services::teacher::TeacherService;
use util::config;

use super::errors::{gql_error, internal};
use super::types::{
    AuthPayload, LoginInput, Marks, MarksInput, RegisterTeacherInput, Student, StudentInput,
    Teacher, UpdateMarksInput, UpdateProfileInput, UpdateStudentInput,
};
use super::{actor, db};
use crate::auth::generate_jwt;

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Exchanges credentials of an active teacher for a JWT.
    async fn login(&self, ctx: &Context<'_>, input: LoginInput) -> Result<AuthPayload> {
        let teacher = TeacherService::login(db(ctx)?, &input.email, &input.password)
            .await
            .map_err(gql_error)?;
        let (token, expires_at) = generate_jwt(teacher.id, teacher.is_admin()).map_err(|e| {
            tracing::error!(error = %e, "token encoding failed");
            internal()
        })?;
        Ok(AuthPayload {
            token,
            expires_at,
            teacher: teacher.into(),
        })
    }

    /// Admin only.
    async fn register_teacher(&self, ctx: &Context<'_>, input: RegisterTeacherInput) -> Result<Teacher> {
        let input = input.into_service()?;
        TeacherService::register(db(ctx)?, actor(ctx)?, input)
            .await
            .map(Into::into)
            .map_err(gql_error)
    }

    async fn update_profile(&self, ctx: &Context<'_>, input: UpdateProfileInput) -> Result<Teacher> {
        TeacherService::update_profile(db(ctx)?, actor(ctx)?, input.into())
            .await
            .map(Into::into)
            .map_err(gql_error)
    }

    async fn add_student(&self, ctx: &Context<'_>, input: StudentInput) -> Result<Student> {
        let input = input.into_service()?;
        StudentService::create(db(ctx)?, actor(ctx)?, input)
            .await
            .map(Into::into)
            .map_err(gql_error)
    }

    async fn update_student(
        &self,
        ctx: &Context<'_>,
        id: i64,
        input: UpdateStudentInput,
    ) -> Result<Student> {
        let input = input.into_service()?;
        StudentService::update(db(ctx)?, actor(ctx)?, id, input)
            .await
            .map(Into::into)
            .map_err(gql_error)
    }

    /// Soft delete, admin only.
    async fn delete_student(&self, ctx: &Context<'_>, id: i64) -> Result<bool> {
        StudentService::delete(db(ctx)?, actor(ctx)?, id)
            .await
            .map(|_| true)
            .map_err(gql_error)
    }

    /// Uses the same duplicate-marks policy as the REST endpoint.
    async fn add_marks(&self, ctx: &Context<'_>, input: MarksInput) -> Result<Marks> {
        let input = input.into_service()?;
        MarksService::create(db(ctx)?, actor(ctx)?, config::duplicate_marks_policy(), input)
            .await
            .map(Into::into)
            .map_err(gql_error)
    }

    async fn update_marks(&self, ctx: &Context<'_>, id: i64, input: UpdateMarksInput) -> Result<Marks> {
        let input = input.into_service()?;
        MarksService::update(db(ctx)?, actor(ctx)?, config::duplicate_marks_policy(), id, input)
            .await
            .map(Into::into)
            .map_err(gql_error)
    }

    async fn delete_marks(&self, ctx: &Context<'_>, id: i64) -> Result<bool> {
        MarksService::delete(db(ctx)?, actor(ctx)?, id)
            .await
            .map(|_| true)
            .map_err(gql_error)
    }
}
