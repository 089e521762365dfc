use chrono::{NaiveDate, Utc};
use db::models::marks;
use db::models::student::{ActiveModel, Gender, Model, NewStudent};
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, DatabaseConnection};
use serde::Deserialize;
use validator::Validate;

use crate::access::{AccessPolicy, Action, Actor, Resource};
use crate::error::{ServiceError, ServiceResult, map_unique_violation};
use crate::validation::{ensure_student_unique, non_blank, student_conflict};

pub const STUDENT_NOT_FOUND: &str = "Student not found";

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateStudent {
    #[validate(custom(function = "non_blank", message = "Name is required"))]
    pub name: String,

    #[validate(custom(function = "non_blank", message = "Roll number is required"))]
    pub roll_number: String,

    #[validate(custom(function = "non_blank", message = "Class is required"))]
    pub class_name: String,

    #[validate(custom(function = "non_blank", message = "Section is required"))]
    pub section: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    pub phone: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Gender,
    pub admission_date: Option<NaiveDate>,
}

/// Partial student update. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateStudent {
    #[validate(custom(function = "non_blank", message = "Name is required"))]
    pub name: Option<String>,

    #[validate(custom(function = "non_blank", message = "Roll number is required"))]
    pub roll_number: Option<String>,

    #[validate(custom(function = "non_blank", message = "Class is required"))]
    pub class_name: Option<String>,

    #[validate(custom(function = "non_blank", message = "Section is required"))]
    pub section: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    pub phone: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub admission_date: Option<NaiveDate>,
    pub is_active: Option<bool>,
}

pub struct StudentService;

impl StudentService {
    pub async fn list(
        db: &DatabaseConnection,
        actor: &Actor,
        class_name: Option<&str>,
        section: Option<&str>,
    ) -> ServiceResult<Vec<Model>> {
        AccessPolicy::authorize(actor, Action::ReadStudents, &Resource::Any)?;
        Ok(Model::list_active(db, class_name, section).await?)
    }

    pub async fn get(db: &DatabaseConnection, actor: &Actor, id: i64) -> ServiceResult<Model> {
        AccessPolicy::authorize(actor, Action::ReadStudents, &Resource::Any)?;
        Model::find_by_id(db, id)
            .await?
            .ok_or_else(|| ServiceError::not_found(STUDENT_NOT_FOUND))
    }

    /// Active student with `roll_number`.
    pub async fn get_by_roll_number(
        db: &DatabaseConnection,
        actor: &Actor,
        roll_number: &str,
    ) -> ServiceResult<Model> {
        AccessPolicy::authorize(actor, Action::ReadStudents, &Resource::Any)?;
        Model::find_active_by_roll_number(db, roll_number)
            .await?
            .ok_or_else(|| ServiceError::not_found(STUDENT_NOT_FOUND))
    }

    pub async fn create(
        db: &DatabaseConnection,
        actor: &Actor,
        input: CreateStudent,
    ) -> ServiceResult<Model> {
        AccessPolicy::authorize(actor, Action::CreateStudent, &Resource::Any)?;
        input.validate()?;
        ensure_student_unique(db, Some(&input.roll_number), Some(&input.email), None).await?;

        let student = Model::create(
            db,
            NewStudent {
                name: input.name,
                roll_number: input.roll_number,
                class_name: input.class_name,
                section: input.section,
                email: input.email,
                phone: input.phone,
                address: input.address,
                date_of_birth: input.date_of_birth,
                gender: input.gender,
                admission_date: input.admission_date,
            },
        )
        .await
        .map_err(|e| map_unique_violation(e, student_conflict))?;

        tracing::info!(student_id = student.id, roll_number = %student.roll_number, "student created");
        Ok(student)
    }

    pub async fn update(
        db: &DatabaseConnection,
        actor: &Actor,
        id: i64,
        input: UpdateStudent,
    ) -> ServiceResult<Model> {
        AccessPolicy::authorize(actor, Action::UpdateStudent, &Resource::Any)?;
        input.validate()?;

        let existing = Model::find_by_id(db, id)
            .await?
            .ok_or_else(|| ServiceError::not_found(STUDENT_NOT_FOUND))?;

        let roll_changed = input
            .roll_number
            .as_deref()
            .filter(|r| r.trim() != existing.roll_number);
        let email_changed = input
            .email
            .as_deref()
            .filter(|e| e.trim().to_lowercase() != existing.email);
        ensure_student_unique(db, roll_changed, email_changed, Some(id)).await?;

        let mut active: ActiveModel = existing.into();
        if let Some(name) = input.name {
            active.name = Set(name.trim().to_owned());
        }
        if let Some(roll_number) = input.roll_number {
            active.roll_number = Set(roll_number.trim().to_owned());
        }
        if let Some(class_name) = input.class_name {
            active.class_name = Set(class_name.trim().to_owned());
        }
        if let Some(section) = input.section {
            active.section = Set(section.trim().to_owned());
        }
        if let Some(email) = input.email {
            active.email = Set(email.trim().to_lowercase());
        }
        if let Some(phone) = input.phone {
            active.phone = Set(Some(phone));
        }
        if let Some(address) = input.address {
            active.address = Set(Some(address));
        }
        if let Some(dob) = input.date_of_birth {
            active.date_of_birth = Set(Some(dob));
        }
        if let Some(gender) = input.gender {
            active.gender = Set(gender);
        }
        if let Some(admission_date) = input.admission_date {
            active.admission_date = Set(admission_date);
        }
        if let Some(is_active) = input.is_active {
            active.is_active = Set(is_active);
        }
        active.updated_at = Set(Utc::now());

        let student = active
            .update(db)
            .await
            .map_err(|e| map_unique_violation(e, student_conflict))?;
        tracing::info!(student_id = student.id, "student updated");
        Ok(student)
    }

    /// Soft delete. The row stays and keeps its roll number and email.
    pub async fn delete(db: &DatabaseConnection, actor: &Actor, id: i64) -> ServiceResult<Model> {
        AccessPolicy::authorize(actor, Action::DeleteStudent, &Resource::Any)?;
        let student = Model::soft_delete(db, id)
            .await?
            .ok_or_else(|| ServiceError::not_found(STUDENT_NOT_FOUND))?;
        tracing::info!(student_id = id, "student deactivated");
        Ok(student)
    }

    /// Marks of an active student, newest exam first.
    pub async fn marks(
        db: &DatabaseConnection,
        actor: &Actor,
        student_id: i64,
    ) -> ServiceResult<(Model, Vec<marks::Model>)> {
        AccessPolicy::authorize(actor, Action::ReadMarks, &Resource::Any)?;
        let student = Model::find_active_by_id(db, student_id)
            .await?
            .ok_or_else(|| ServiceError::not_found(STUDENT_NOT_FOUND))?;
        let records = marks::Model::find_for_student(db, student_id).await?;
        Ok((student, records))
    }
}
