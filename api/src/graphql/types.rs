//! GraphQL object and input types.
//!
//! Enum-valued fields travel as strings (`"Midterm"`, `"1st"`, `"Female"`,
//! `"admin"`) and are parsed with the storage enums' `FromStr`.

use std::str::FromStr;

use async_graphql::{ComplexObject, Context, InputObject, Result, SimpleObject};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use db::models::{
    marks::{self, ExamType, Semester},
    student::{self, Gender},
    teacher::{self, Role},
};
use services::analytics::ClassAnalytics;
use services::marks::{CreateMarks, MarksService, UpdateMarks};
use services::student::{CreateStudent, StudentService, UpdateStudent};
use services::teacher::{RegisterTeacher, UpdateProfile};

use super::errors::{bad_input, gql_error};
use super::{actor, db};

#[derive(SimpleObject)]
pub struct Teacher {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub phone: Option<String>,
    pub role: String,
    pub is_active: bool,
    pub created_at: String,
}

impl From<teacher::Model> for Teacher {
    fn from(t: teacher::Model) -> Self {
        Self {
            id: t.id,
            name: t.name,
            email: t.email,
            subject: t.subject,
            phone: t.phone,
            role: t.role.to_string(),
            is_active: t.is_active,
            created_at: t.created_at.to_rfc3339(),
        }
    }
}

#[derive(SimpleObject)]
#[graphql(complex)]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub roll_number: String,
    pub class_name: String,
    pub section: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<String>,
    pub gender: String,
    pub admission_date: String,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[ComplexObject]
impl Student {
    /// Marks of this student, newest exam first.
    async fn marks(&self, ctx: &Context<'_>) -> Result<Vec<Marks>> {
        let records = MarksService::for_student(db(ctx)?, actor(ctx)?, self.id)
            .await
            .map_err(gql_error)?;
        Ok(records.into_iter().map(Into::into).collect())
    }
}

impl From<student::Model> for Student {
    fn from(s: student::Model) -> Self {
        Self {
            id: s.id,
            name: s.name,
            roll_number: s.roll_number,
            class_name: s.class_name,
            section: s.section,
            email: s.email,
            phone: s.phone,
            address: s.address,
            date_of_birth: s.date_of_birth.map(|d| d.to_string()),
            gender: s.gender.to_string(),
            admission_date: s.admission_date.to_string(),
            is_active: s.is_active,
            created_at: s.created_at.to_rfc3339(),
            updated_at: s.updated_at.to_rfc3339(),
        }
    }
}

#[derive(SimpleObject)]
#[graphql(complex)]
pub struct Marks {
    pub id: i64,
    pub student_id: i64,
    pub entered_by: i64,
    pub subject: String,
    pub exam_type: String,
    pub marks_obtained: f64,
    pub total_marks: f64,
    pub percentage: f64,
    pub grade: String,
    pub exam_date: String,
    pub academic_year: String,
    pub semester: String,
    pub remarks: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[ComplexObject]
impl Marks {
    async fn student(&self, ctx: &Context<'_>) -> Result<Student> {
        StudentService::get(db(ctx)?, actor(ctx)?, self.student_id)
            .await
            .map(Into::into)
            .map_err(gql_error)
    }
}

impl From<marks::Model> for Marks {
    fn from(m: marks::Model) -> Self {
        Self {
            id: m.id,
            student_id: m.student_id,
            entered_by: m.entered_by,
            subject: m.subject,
            exam_type: m.exam_type.to_string(),
            marks_obtained: m.marks_obtained,
            total_marks: m.total_marks,
            percentage: m.percentage,
            grade: m.grade,
            exam_date: m.exam_date.to_rfc3339(),
            academic_year: m.academic_year,
            semester: m.semester.to_string(),
            remarks: m.remarks,
            created_at: m.created_at.to_rfc3339(),
            updated_at: m.updated_at.to_rfc3339(),
        }
    }
}

#[derive(SimpleObject)]
pub struct AuthPayload {
    pub token: String,
    pub expires_at: String,
    pub teacher: Teacher,
}

#[derive(SimpleObject)]
#[graphql(name = "ClassAnalytics")]
pub struct ClassAnalyticsObject {
    pub class_name: String,
    pub total_students: u64,
    pub average_percentage: f64,
    pub highest_percentage: f64,
    pub lowest_percentage: f64,
    pub pass_rate: f64,
}

impl From<ClassAnalytics> for ClassAnalyticsObject {
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

// --- Inputs ---

fn parse_enum<T: FromStr>(value: Option<String>, what: &str) -> Result<Option<T>> {
    value
        .map(|v| T::from_str(v.trim()).map_err(|_| bad_input(format!("Invalid {what} '{v}'"))))
        .transpose()
}

fn parse_date(value: Option<String>, what: &str) -> Result<Option<NaiveDate>> {
    value
        .map(|v| {
            NaiveDate::parse_from_str(v.trim(), "%Y-%m-%d")
                .map_err(|_| bad_input(format!("Invalid {what} '{v}', expected YYYY-MM-DD")))
        })
        .transpose()
}

/// Accepts RFC 3339 timestamps or plain `YYYY-MM-DD` dates (midnight UTC).
fn parse_timestamp(value: Option<String>, what: &str) -> Result<Option<DateTime<Utc>>> {
    value
        .map(|v| {
            let v = v.trim();
            DateTime::parse_from_rfc3339(v)
                .map(|dt| dt.with_timezone(&Utc))
                .or_else(|_| {
                    NaiveDate::parse_from_str(v, "%Y-%m-%d")
                        .ok()
                        .and_then(|d| d.and_hms_opt(0, 0, 0))
                        .map(|naive| Utc.from_utc_datetime(&naive))
                        .ok_or(())
                })
                .map_err(|_| bad_input(format!("Invalid {what} '{v}'")))
        })
        .transpose()
}

#[derive(InputObject)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

#[derive(InputObject)]
pub struct RegisterTeacherInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub subject: String,
    pub phone: Option<String>,
    pub role: Option<String>,
}

impl RegisterTeacherInput {
    pub fn into_service(self) -> Result<RegisterTeacher> {
        Ok(RegisterTeacher {
            role: parse_enum::<Role>(self.role, "role")?,
            name: self.name,
            email: self.email,
            password: self.password,
            subject: self.subject,
            phone: self.phone,
        })
    }
}

#[derive(InputObject)]
pub struct UpdateProfileInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub subject: Option<String>,
}

impl From<UpdateProfileInput> for UpdateProfile {
    fn from(i: UpdateProfileInput) -> Self {
        Self {
            name: i.name,
            email: i.email,
            phone: i.phone,
            subject: i.subject,
        }
    }
}

#[derive(InputObject)]
pub struct StudentInput {
    pub name: String,
    pub roll_number: String,
    pub class_name: String,
    pub section: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<String>,
    pub gender: String,
    pub admission_date: Option<String>,
}

impl StudentInput {
    pub fn into_service(self) -> Result<CreateStudent> {
        let gender = parse_enum::<Gender>(Some(self.gender), "gender")?
            .ok_or_else(|| bad_input("Gender is required"))?;
        Ok(CreateStudent {
            date_of_birth: parse_date(self.date_of_birth, "date of birth")?,
            admission_date: parse_date(self.admission_date, "admission date")?,
            gender,
            name: self.name,
            roll_number: self.roll_number,
            class_name: self.class_name,
            section: self.section,
            email: self.email,
            phone: self.phone,
            address: self.address,
        })
    }
}

#[derive(InputObject)]
pub struct UpdateStudentInput {
    pub name: Option<String>,
    pub roll_number: Option<String>,
    pub class_name: Option<String>,
    pub section: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub date_of_birth: Option<String>,
    pub gender: Option<String>,
    pub admission_date: Option<String>,
    pub is_active: Option<bool>,
}

impl UpdateStudentInput {
    pub fn into_service(self) -> Result<UpdateStudent> {
        Ok(UpdateStudent {
            date_of_birth: parse_date(self.date_of_birth, "date of birth")?,
            admission_date: parse_date(self.admission_date, "admission date")?,
            gender: parse_enum::<Gender>(self.gender, "gender")?,
            name: self.name,
            roll_number: self.roll_number,
            class_name: self.class_name,
            section: self.section,
            email: self.email,
            phone: self.phone,
            address: self.address,
            is_active: self.is_active,
        })
    }
}

/// Percentage and grade are not accepted; they are always derived.
#[derive(InputObject)]
pub struct MarksInput {
    pub student_id: i64,
    pub subject: String,
    pub exam_type: Option<String>,
    pub marks_obtained: f64,
    pub total_marks: Option<f64>,
    pub exam_date: Option<String>,
    pub academic_year: Option<String>,
    pub semester: Option<String>,
    pub remarks: Option<String>,
}

impl MarksInput {
    pub fn into_service(self) -> Result<CreateMarks> {
        Ok(CreateMarks {
            exam_type: parse_enum::<ExamType>(self.exam_type, "exam type")?,
            semester: parse_enum::<Semester>(self.semester, "semester")?,
            exam_date: parse_timestamp(self.exam_date, "exam date")?,
            student_id: self.student_id,
            subject: self.subject,
            marks_obtained: self.marks_obtained,
            total_marks: self.total_marks,
            academic_year: self.academic_year,
            remarks: self.remarks,
        })
    }
}

#[derive(InputObject)]
pub struct UpdateMarksInput {
    pub subject: Option<String>,
    pub exam_type: Option<String>,
    pub marks_obtained: Option<f64>,
    pub total_marks: Option<f64>,
    pub exam_date: Option<String>,
    pub academic_year: Option<String>,
    pub semester: Option<String>,
    pub remarks: Option<String>,
}

impl UpdateMarksInput {
    pub fn into_service(self) -> Result<UpdateMarks> {
        Ok(UpdateMarks {
            exam_type: parse_enum::<ExamType>(self.exam_type, "exam type")?,
            semester: parse_enum::<Semester>(self.semester, "semester")?,
            exam_date: parse_timestamp(self.exam_date, "exam date")?,
            subject: self.subject,
            marks_obtained: self.marks_obtained,
            total_marks: self.total_marks,
            academic_year: self.academic_year,
            remarks: self.remarks,
        })
    }
}
