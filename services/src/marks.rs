use chrono::{DateTime, Utc};
use db::models::marks::{self, ActiveModel, ExamType, MarksFilter, Model, NewMarks, Semester};
use db::models::student;
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, DatabaseConnection};
use serde::Deserialize;
use util::config::DuplicateMarksPolicy;
use validator::Validate;

use crate::access::{AccessPolicy, Action, Actor, Resource};
use crate::error::{ServiceError, ServiceResult};
use crate::grade::GradeEngine;
use crate::student::STUDENT_NOT_FOUND;
use crate::validation::{ensure_no_duplicate_marks, marks_in_range, non_blank};

pub const MARKS_NOT_FOUND: &str = "Marks not found";

/// A new marks entry. Percentage and grade are always derived, never accepted.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMarks {
    pub student_id: i64,

    #[validate(custom(function = "non_blank", message = "Subject is required"))]
    pub subject: String,

    pub exam_type: Option<ExamType>,

    #[validate(custom(function = "marks_in_range", message = "Marks obtained must be between 0 and 100"))]
    pub marks_obtained: f64,

    #[validate(range(exclusive_min = 0.0, message = "Total marks must be greater than 0"))]
    pub total_marks: Option<f64>,

    pub exam_date: Option<DateTime<Utc>>,
    pub academic_year: Option<String>,
    pub semester: Option<Semester>,
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateMarks {
    #[validate(custom(function = "non_blank", message = "Subject is required"))]
    pub subject: Option<String>,

    pub exam_type: Option<ExamType>,

    #[validate(custom(function = "marks_in_range", message = "Marks obtained must be between 0 and 100"))]
    pub marks_obtained: Option<f64>,

    #[validate(range(exclusive_min = 0.0, message = "Total marks must be greater than 0"))]
    pub total_marks: Option<f64>,

    pub exam_date: Option<DateTime<Utc>>,
    pub academic_year: Option<String>,
    pub semester: Option<Semester>,
    pub remarks: Option<String>,
}

impl UpdateMarks {
    fn touches_score(&self) -> bool {
        self.marks_obtained.is_some() || self.total_marks.is_some()
    }

    fn touches_key(&self) -> bool {
        self.subject.is_some() || self.exam_type.is_some() || self.academic_year.is_some()
    }
}

pub struct MarksService;

impl MarksService {
    /// All marks matching `filter`, newest exam first.
    pub async fn list(
        db: &DatabaseConnection,
        actor: &Actor,
        filter: &MarksFilter,
    ) -> ServiceResult<Vec<Model>> {
        AccessPolicy::authorize(actor, Action::ReadMarks, &Resource::Any)?;
        Ok(Model::find_filtered(db, filter).await?)
    }

    pub async fn get(db: &DatabaseConnection, actor: &Actor, id: i64) -> ServiceResult<Model> {
        AccessPolicy::authorize(actor, Action::ReadMarks, &Resource::Any)?;
        Model::find_by_id(db, id)
            .await?
            .ok_or_else(|| ServiceError::not_found(MARKS_NOT_FOUND))
    }

    /// Marks of any student, active or not, newest exam first.
    pub async fn for_student(
        db: &DatabaseConnection,
        actor: &Actor,
        student_id: i64,
    ) -> ServiceResult<Vec<Model>> {
        AccessPolicy::authorize(actor, Action::ReadMarks, &Resource::Any)?;
        Ok(Model::find_for_student(db, student_id).await?)
    }

    /// Records marks entered by `actor`.
    ///
    /// With `DuplicateMarksPolicy::Reject`, a second record for the same
    /// student, subject, exam type and academic year is refused.
    pub async fn create(
        db: &DatabaseConnection,
        actor: &Actor,
        policy: DuplicateMarksPolicy,
        input: CreateMarks,
    ) -> ServiceResult<Model> {
        AccessPolicy::authorize(actor, Action::CreateMarks, &Resource::Any)?;
        let entered_by = AccessPolicy::require_authenticated(actor)?;
        input.validate()?;

        student::Model::find_active_by_id(db, input.student_id)
            .await?
            .ok_or_else(|| ServiceError::not_found(STUDENT_NOT_FOUND))?;

        let subject = input.subject.trim().to_owned();
        let exam_type = input.exam_type.unwrap_or_default();
        let academic_year = input
            .academic_year
            .unwrap_or_else(marks::current_academic_year);

        if policy == DuplicateMarksPolicy::Reject {
            ensure_no_duplicate_marks(
                db,
                input.student_id,
                &subject,
                exam_type,
                &academic_year,
                None,
            )
            .await?;
        }

        let mut record = NewMarks {
            student_id: input.student_id,
            entered_by,
            subject,
            exam_type: Some(exam_type),
            marks_obtained: input.marks_obtained,
            total_marks: input.total_marks,
            exam_date: input.exam_date,
            academic_year: Some(academic_year),
            semester: input.semester,
            remarks: input.remarks,
        }
        .into_active_model();

        GradeEngine::recompute(&mut record)?;

        let saved = record.insert(db).await?;

        tracing::info!(
            marks_id = saved.id,
            student_id = saved.student_id,
            entered_by,
            grade = %saved.grade,
            "marks recorded"
        );
        Ok(saved)
    }

    /// Owner or admin only. Percentage and grade are recomputed whenever the
    /// update carries `marks_obtained` or `total_marks`.
    ///
    /// With `DuplicateMarksPolicy::Reject`, moving the record onto the key of
    /// another record (student, subject, exam type, academic year) is refused.
    pub async fn update(
        db: &DatabaseConnection,
        actor: &Actor,
        policy: DuplicateMarksPolicy,
        id: i64,
        input: UpdateMarks,
    ) -> ServiceResult<Model> {
        AccessPolicy::require_authenticated(actor)?;
        let existing = Model::find_by_id(db, id)
            .await?
            .ok_or_else(|| ServiceError::not_found(MARKS_NOT_FOUND))?;
        AccessPolicy::authorize(
            actor,
            Action::UpdateMarks,
            &Resource::Marks {
                entered_by: existing.entered_by,
            },
        )?;
        input.validate()?;

        if policy == DuplicateMarksPolicy::Reject && input.touches_key() {
            let subject = input
                .subject
                .as_deref()
                .map(str::trim)
                .unwrap_or(&existing.subject);
            let exam_type = input.exam_type.unwrap_or(existing.exam_type);
            let academic_year = input
                .academic_year
                .as_deref()
                .unwrap_or(&existing.academic_year);
            ensure_no_duplicate_marks(
                db,
                existing.student_id,
                subject,
                exam_type,
                academic_year,
                Some(existing.id),
            )
            .await?;
        }

        let recompute = input.touches_score();
        let mut active: ActiveModel = existing.into();
        if let Some(subject) = input.subject {
            active.subject = Set(subject.trim().to_owned());
        }
        if let Some(exam_type) = input.exam_type {
            active.exam_type = Set(exam_type);
        }
        if let Some(obtained) = input.marks_obtained {
            active.marks_obtained = Set(obtained);
        }
        if let Some(total) = input.total_marks {
            active.total_marks = Set(total);
        }
        if let Some(exam_date) = input.exam_date {
            active.exam_date = Set(exam_date);
        }
        if let Some(year) = input.academic_year {
            active.academic_year = Set(year);
        }
        if let Some(semester) = input.semester {
            active.semester = Set(semester);
        }
        if let Some(remarks) = input.remarks {
            active.remarks = Set(Some(remarks));
        }
        if recompute {
            GradeEngine::recompute(&mut active)?;
        }
        active.updated_at = Set(Utc::now());

        let saved = active.update(db).await?;
        tracing::info!(marks_id = saved.id, grade = %saved.grade, "marks updated");
        Ok(saved)
    }

    /// Physical delete, owner or admin only.
    pub async fn delete(db: &DatabaseConnection, actor: &Actor, id: i64) -> ServiceResult<()> {
        AccessPolicy::require_authenticated(actor)?;
        let existing = Model::find_by_id(db, id)
            .await?
            .ok_or_else(|| ServiceError::not_found(MARKS_NOT_FOUND))?;
        AccessPolicy::authorize(
            actor,
            Action::DeleteMarks,
            &Resource::Marks {
                entered_by: existing.entered_by,
            },
        )?;

        if !marks::Model::delete_by_id(db, id).await? {
            return Err(ServiceError::not_found(MARKS_NOT_FOUND));
        }
        tracing::info!(marks_id = id, "marks deleted");
        Ok(())
    }
}
