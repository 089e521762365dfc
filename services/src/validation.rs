//! Field rules shared by the service inputs, plus the storage-backed
//! uniqueness checks that cannot be expressed as `validator` attributes.

use db::models::{marks, student, teacher};
use sea_orm::DatabaseConnection;
use validator::ValidationError;

use crate::error::{ServiceError, ServiceResult};
use crate::grade::GradeEngine;

pub const ROLL_NUMBER_TAKEN: &str = "Student with this roll number already exists";
pub const STUDENT_EMAIL_TAKEN: &str = "Student with this email already exists";
pub const TEACHER_EMAIL_TAKEN: &str = "Teacher with this email already exists";
pub const DUPLICATE_MARKS: &str =
    "Marks already exist for this student, subject, exam type and academic year";

/// Rejects empty or whitespace-only strings.
pub fn non_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

pub fn marks_in_range<T: std::borrow::Borrow<f64>>(value: T) -> Result<(), ValidationError> {
    if GradeEngine::MARKS_RANGE.contains(value.borrow()) {
        Ok(())
    } else {
        Err(ValidationError::new("range"))
    }
}

pub async fn ensure_student_unique(
    db: &DatabaseConnection,
    roll_number: Option<&str>,
    email: Option<&str>,
    except_id: Option<i64>,
) -> ServiceResult<()> {
    if let Some(roll_number) = roll_number {
        if student::Model::roll_number_taken(db, roll_number, except_id).await? {
            return Err(ServiceError::validation(ROLL_NUMBER_TAKEN));
        }
    }
    if let Some(email) = email {
        if student::Model::email_taken(db, email, except_id).await? {
            return Err(ServiceError::validation(STUDENT_EMAIL_TAKEN));
        }
    }
    Ok(())
}

pub async fn ensure_teacher_email_unique(
    db: &DatabaseConnection,
    email: &str,
    except_id: Option<i64>,
) -> ServiceResult<()> {
    if teacher::Model::email_taken(db, email, except_id).await? {
        return Err(ServiceError::validation(TEACHER_EMAIL_TAKEN));
    }
    Ok(())
}

pub async fn ensure_no_duplicate_marks(
    db: &DatabaseConnection,
    student_id: i64,
    subject: &str,
    exam_type: marks::ExamType,
    academic_year: &str,
    except_id: Option<i64>,
) -> ServiceResult<()> {
    if marks::Model::find_duplicate(db, student_id, subject, exam_type, academic_year, except_id)
        .await?
        .is_some()
    {
        return Err(ServiceError::validation(DUPLICATE_MARKS));
    }
    Ok(())
}

/// Message for a unique-index violation on the `students` table.
pub(crate) fn student_conflict(detail: &str) -> String {
    if detail.contains("email") {
        STUDENT_EMAIL_TAKEN.to_owned()
    } else {
        ROLL_NUMBER_TAKEN.to_owned()
    }
}
