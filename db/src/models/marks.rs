use chrono::{DateTime, Datelike, Utc};
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;
use sea_orm::QueryOrder;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// One exam result for one student, in the `marks` table.
///
/// `percentage` and `grade` are derived columns. They are never taken from
/// callers; the grading service fills them in before every insert or update
/// that touches `marks_obtained` or `total_marks`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "marks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    /// Teacher that entered the record; the record's owner.
    pub entered_by: i64,
    pub subject: String,
    pub exam_type: ExamType,
    pub marks_obtained: f64,
    pub total_marks: f64,
    pub percentage: f64,
    pub grade: String,
    pub exam_date: DateTime<Utc>,
    pub academic_year: String,
    pub semester: Semester,
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, EnumIter, DeriveActiveEnum, Display, EnumString, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[strum(ascii_case_insensitive)]
pub enum ExamType {
    #[default]
    #[sea_orm(string_value = "Midterm")]
    Midterm,

    #[sea_orm(string_value = "Final")]
    Final,

    #[sea_orm(string_value = "Quiz")]
    Quiz,

    #[sea_orm(string_value = "Assignment")]
    Assignment,

    #[sea_orm(string_value = "Project")]
    Project,
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, EnumIter, DeriveActiveEnum, Display, EnumString, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum Semester {
    #[default]
    #[sea_orm(string_value = "1st")]
    #[strum(serialize = "1st")]
    #[serde(rename = "1st")]
    First,

    #[sea_orm(string_value = "2nd")]
    #[strum(serialize = "2nd")]
    #[serde(rename = "2nd")]
    Second,

    #[sea_orm(string_value = "3rd")]
    #[strum(serialize = "3rd")]
    #[serde(rename = "3rd")]
    Third,

    #[sea_orm(string_value = "4th")]
    #[strum(serialize = "4th")]
    #[serde(rename = "4th")]
    Fourth,

    #[sea_orm(string_value = "5th")]
    #[strum(serialize = "5th")]
    #[serde(rename = "5th")]
    Fifth,

    #[sea_orm(string_value = "6th")]
    #[strum(serialize = "6th")]
    #[serde(rename = "6th")]
    Sixth,

    #[sea_orm(string_value = "7th")]
    #[strum(serialize = "7th")]
    #[serde(rename = "7th")]
    Seventh,

    #[sea_orm(string_value = "8th")]
    #[strum(serialize = "8th")]
    #[serde(rename = "8th")]
    Eighth,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::student::Entity",
        from = "Column::StudentId",
        to = "super::student::Column::Id",
        on_delete = "Cascade"
    )]
    Student,

    #[sea_orm(
        belongs_to = "super::teacher::Entity",
        from = "Column::EnteredBy",
        to = "super::teacher::Column::Id"
    )]
    Teacher,
}

impl Related<super::student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::teacher::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teacher.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Caller-supplied inputs for a marks record. Derived fields are absent on purpose.
#[derive(Debug, Clone)]
pub struct NewMarks {
    pub student_id: i64,
    pub entered_by: i64,
    pub subject: String,
    pub exam_type: Option<ExamType>,
    pub marks_obtained: f64,
    pub total_marks: Option<f64>,
    pub exam_date: Option<DateTime<Utc>>,
    pub academic_year: Option<String>,
    pub semester: Option<Semester>,
    pub remarks: Option<String>,
}

/// Academic year used when none is given: the current calendar year.
pub fn current_academic_year() -> String {
    Utc::now().year().to_string()
}

impl NewMarks {
    /// Builds an unsaved row with defaults applied. `percentage` and `grade`
    /// are left `NotSet`; the insert fails until they are computed.
    pub fn into_active_model(self) -> ActiveModel {
        let now = Utc::now();
        ActiveModel {
            id: NotSet,
            student_id: Set(self.student_id),
            entered_by: Set(self.entered_by),
            subject: Set(self.subject.trim().to_owned()),
            exam_type: Set(self.exam_type.unwrap_or_default()),
            marks_obtained: Set(self.marks_obtained),
            total_marks: Set(self.total_marks.unwrap_or(100.0)),
            percentage: NotSet,
            grade: NotSet,
            exam_date: Set(self.exam_date.unwrap_or(now)),
            academic_year: Set(self.academic_year.unwrap_or_else(current_academic_year)),
            semester: Set(self.semester.unwrap_or_default()),
            remarks: Set(self.remarks),
            created_at: Set(now),
            updated_at: Set(now),
        }
    }
}

/// Optional narrowing for marks listings.
#[derive(Debug, Clone, Default)]
pub struct MarksFilter {
    pub subject: Option<String>,
    pub exam_type: Option<ExamType>,
    pub academic_year: Option<String>,
}

impl Model {
    pub async fn find_by_id(db: &DbConn, id: i64) -> Result<Option<Model>, DbErr> {
        Entity::find_by_id(id).one(db).await
    }

    /// All marks of one student, newest exam first.
    pub async fn find_for_student(db: &DbConn, student_id: i64) -> Result<Vec<Model>, DbErr> {
        Entity::find()
            .filter(Column::StudentId.eq(student_id))
            .order_by_desc(Column::ExamDate)
            .order_by_desc(Column::Id)
            .all(db)
            .await
    }

    /// Marks for any of `student_ids`.
    pub async fn find_for_students(db: &DbConn, student_ids: &[i64]) -> Result<Vec<Model>, DbErr> {
        if student_ids.is_empty() {
            return Ok(Vec::new());
        }
        Entity::find()
            .filter(Column::StudentId.is_in(student_ids.iter().copied()))
            .all(db)
            .await
    }

    /// Marks matching `filter`, newest exam first.
    pub async fn find_filtered(db: &DbConn, filter: &MarksFilter) -> Result<Vec<Model>, DbErr> {
        let mut query = Entity::find();
        if let Some(subject) = &filter.subject {
            query = query.filter(Column::Subject.eq(subject.as_str()));
        }
        if let Some(exam_type) = filter.exam_type {
            query = query.filter(Column::ExamType.eq(exam_type));
        }
        if let Some(year) = &filter.academic_year {
            query = query.filter(Column::AcademicYear.eq(year.as_str()));
        }
        query
            .order_by_desc(Column::ExamDate)
            .order_by_desc(Column::Id)
            .all(db)
            .await
    }

    /// An existing record for the same student, subject, exam type and academic year,
    /// other than `except_id`.
    pub async fn find_duplicate(
        db: &DbConn,
        student_id: i64,
        subject: &str,
        exam_type: ExamType,
        academic_year: &str,
        except_id: Option<i64>,
    ) -> Result<Option<Model>, DbErr> {
        let mut query = Entity::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::Subject.eq(subject.trim()))
            .filter(Column::ExamType.eq(exam_type))
            .filter(Column::AcademicYear.eq(academic_year));
        if let Some(id) = except_id {
            query = query.filter(Column::Id.ne(id));
        }
        query.one(db).await
    }

    /// Physically removes a record. Returns whether a row was deleted.
    pub async fn delete_by_id(db: &DbConn, id: i64) -> Result<bool, DbErr> {
        let result = Entity::delete_by_id(id).exec(db).await?;
        Ok(result.rows_affected > 0)
    }
}
