use chrono::Utc;
use db::models::teacher::{self, ActiveModel, Model, Role};
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, DatabaseConnection};
use serde::Deserialize;
use validator::Validate;

use crate::access::{AccessPolicy, Action, Actor, Resource};
use crate::error::{ServiceError, ServiceResult, map_unique_violation};
use crate::validation::{TEACHER_EMAIL_TAKEN, ensure_teacher_email_unique, non_blank};

pub const INVALID_CREDENTIALS: &str = "Invalid email or password";
pub const TEACHER_NOT_FOUND: &str = "Teacher not found";

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterTeacher {
    #[validate(custom(function = "non_blank", message = "Name is required"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 6, message = "Password must be at least 6 characters long"))]
    pub password: String,

    #[validate(custom(function = "non_blank", message = "Subject is required"))]
    pub subject: String,

    pub phone: Option<String>,

    /// Defaults to `teacher`.
    pub role: Option<Role>,
}

/// Self-service profile changes. Only these four fields are editable.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProfile {
    #[validate(custom(function = "non_blank", message = "Name is required"))]
    pub name: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    pub phone: Option<String>,

    #[validate(custom(function = "non_blank", message = "Subject is required"))]
    pub subject: Option<String>,
}

pub struct TeacherService;

impl TeacherService {
    /// Resolves the actor behind an authenticated teacher id.
    ///
    /// Missing or deactivated teachers resolve to `Actor::Anonymous`.
    pub async fn actor_for(db: &DatabaseConnection, teacher_id: i64) -> ServiceResult<Actor> {
        let actor = match Model::find_by_id(db, teacher_id).await? {
            Some(t) if t.is_active && t.is_admin() => Actor::Admin { id: t.id },
            Some(t) if t.is_active => Actor::Teacher { id: t.id },
            _ => Actor::Anonymous,
        };
        Ok(actor)
    }

    /// Checks credentials of an active teacher.
    pub async fn login(db: &DatabaseConnection, email: &str, password: &str) -> ServiceResult<Model> {
        match Model::find_by_email(db, email).await? {
            Some(t) if t.is_active && t.verify_password(password) => {
                tracing::info!(teacher_id = t.id, "teacher logged in");
                Ok(t)
            }
            _ => {
                tracing::warn!("failed login attempt");
                Err(ServiceError::Unauthenticated(INVALID_CREDENTIALS.into()))
            }
        }
    }

    pub async fn register(
        db: &DatabaseConnection,
        actor: &Actor,
        input: RegisterTeacher,
    ) -> ServiceResult<Model> {
        AccessPolicy::authorize(actor, Action::RegisterTeacher, &Resource::Any)?;
        input.validate()?;
        ensure_teacher_email_unique(db, &input.email, None).await?;

        let teacher = Model::create(
            db,
            &input.name,
            &input.email,
            &input.password,
            &input.subject,
            input.phone.as_deref(),
            input.role.unwrap_or(Role::Teacher),
        )
        .await
        .map_err(|e| map_unique_violation(e, |_| TEACHER_EMAIL_TAKEN.into()))?;

        tracing::info!(teacher_id = teacher.id, role = %teacher.role, "teacher registered");
        Ok(teacher)
    }

    pub async fn profile(db: &DatabaseConnection, actor: &Actor) -> ServiceResult<Model> {
        AccessPolicy::authorize(actor, Action::ReadOwnProfile, &Resource::Any)?;
        let id = AccessPolicy::require_authenticated(actor)?;
        Model::find_by_id(db, id)
            .await?
            .ok_or_else(|| ServiceError::not_found(TEACHER_NOT_FOUND))
    }

    /// Updates the caller's own profile.
    pub async fn update_profile(
        db: &DatabaseConnection,
        actor: &Actor,
        input: UpdateProfile,
    ) -> ServiceResult<Model> {
        let id = AccessPolicy::require_authenticated(actor)?;
        Self::update_teacher_profile(db, actor, id, input).await
    }

    /// Updates the profile of `teacher_id`, which must be the caller.
    pub async fn update_teacher_profile(
        db: &DatabaseConnection,
        actor: &Actor,
        teacher_id: i64,
        input: UpdateProfile,
    ) -> ServiceResult<Model> {
        AccessPolicy::authorize(actor, Action::UpdateOwnProfile, &Resource::Profile { teacher_id })?;
        input.validate()?;

        let existing = Model::find_by_id(db, teacher_id)
            .await?
            .ok_or_else(|| ServiceError::not_found(TEACHER_NOT_FOUND))?;

        if let Some(email) = &input.email {
            ensure_teacher_email_unique(db, email, Some(teacher_id)).await?;
        }

        let mut active: ActiveModel = existing.into();
        if let Some(name) = input.name {
            active.name = Set(name.trim().to_owned());
        }
        if let Some(email) = input.email {
            active.email = Set(email.trim().to_lowercase());
        }
        if let Some(phone) = input.phone {
            active.phone = Set(Some(phone.trim().to_owned()));
        }
        if let Some(subject) = input.subject {
            active.subject = Set(subject.trim().to_owned());
        }
        active.updated_at = Set(Utc::now());

        active
            .update(db)
            .await
            .map_err(|e| map_unique_violation(e, |_| TEACHER_EMAIL_TAKEN.into()))
    }

    /// Active teachers, by name.
    pub async fn list(db: &DatabaseConnection, actor: &Actor) -> ServiceResult<Vec<Model>> {
        AccessPolicy::authorize(actor, Action::ListTeachers, &Resource::Any)?;
        Ok(Model::list_active(db).await?)
    }

    pub async fn get(db: &DatabaseConnection, actor: &Actor, id: i64) -> ServiceResult<Model> {
        AccessPolicy::authorize(actor, Action::ReadTeacher, &Resource::Any)?;
        Model::find_by_id(db, id)
            .await?
            .ok_or_else(|| ServiceError::not_found(TEACHER_NOT_FOUND))
    }
}
