//! CSV export of marks records.

use std::collections::HashMap;

use db::models::marks::{MarksFilter, Model as Marks};
use db::models::student::Model as Student;
use sea_orm::DatabaseConnection;
use serde::Serialize;

use crate::access::{AccessPolicy, Action, Actor, Resource};
use crate::error::ServiceResult;
use crate::student::StudentService;

pub const ALL_MARKS_FILENAME: &str = "all_students_marks.csv";

/// A finished export ready to be sent as an attachment.
#[derive(Debug, Clone)]
pub struct CsvExport {
    pub filename: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    #[serde(rename = "Student Name")]
    student_name: &'a str,
    #[serde(rename = "Roll Number")]
    roll_number: &'a str,
    #[serde(rename = "Class")]
    class_name: &'a str,
    #[serde(rename = "Section")]
    section: &'a str,
    #[serde(rename = "Subject")]
    subject: &'a str,
    #[serde(rename = "Exam Type")]
    exam_type: String,
    #[serde(rename = "Marks Obtained")]
    marks_obtained: f64,
    #[serde(rename = "Total Marks")]
    total_marks: f64,
    #[serde(rename = "Percentage")]
    percentage: String,
    #[serde(rename = "Grade")]
    grade: &'a str,
    #[serde(rename = "Exam Date")]
    exam_date: String,
    #[serde(rename = "Academic Year")]
    academic_year: &'a str,
    #[serde(rename = "Semester")]
    semester: String,
    #[serde(rename = "Remarks")]
    remarks: &'a str,
}

impl<'a> ExportRow<'a> {
    fn new(student: &'a Student, marks: &'a Marks) -> Self {
        Self {
            student_name: &student.name,
            roll_number: &student.roll_number,
            class_name: &student.class_name,
            section: &student.section,
            subject: &marks.subject,
            exam_type: marks.exam_type.to_string(),
            marks_obtained: marks.marks_obtained,
            total_marks: marks.total_marks,
            percentage: format!("{:.2}%", marks.percentage),
            grade: &marks.grade,
            exam_date: marks.exam_date.format("%Y-%m-%d").to_string(),
            academic_year: &marks.academic_year,
            semester: marks.semester.to_string(),
            remarks: marks.remarks.as_deref().unwrap_or(""),
        }
    }
}

fn write_csv<'a, I>(rows: I) -> ServiceResult<Vec<u8>>
where
    I: IntoIterator<Item = (&'a Student, &'a Marks)>,
{
    let mut writer = csv::Writer::from_writer(Vec::new());
    for (student, marks) in rows {
        writer.serialize(ExportRow::new(student, marks))?;
    }
    writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()).into())
}

/// `Alice Johnson` becomes `Alice_Johnson_marks.csv`.
///
/// Only ASCII letters, digits, `-` and `.` survive, so the result is always
/// safe inside a quoted `Content-Disposition` filename.
pub fn student_filename(name: &str) -> String {
    let stem: Vec<String> = name
        .split_whitespace()
        .map(|word| {
            word.chars()
                .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '.'))
                .collect::<String>()
        })
        .filter(|word| !word.is_empty())
        .collect();
    if stem.is_empty() {
        return "student_marks.csv".to_owned();
    }
    format!("{}_marks.csv", stem.join("_"))
}

pub struct ExportService;

impl ExportService {
    /// Every marks record of one active student.
    pub async fn student_marks(
        db: &DatabaseConnection,
        actor: &Actor,
        student_id: i64,
    ) -> ServiceResult<CsvExport> {
        AccessPolicy::authorize(actor, Action::ExportMarks, &Resource::Any)?;
        let (student, records) = StudentService::marks(db, actor, student_id).await?;
        let bytes = write_csv(records.iter().map(|m| (&student, m)))?;

        tracing::info!(student_id, rows = records.len(), "student marks exported");
        Ok(CsvExport {
            filename: student_filename(&student.name),
            bytes,
        })
    }

    /// Marks matching `filter` across all students, newest exam first.
    pub async fn all_marks(
        db: &DatabaseConnection,
        actor: &Actor,
        filter: &MarksFilter,
    ) -> ServiceResult<CsvExport> {
        AccessPolicy::authorize(actor, Action::ExportMarks, &Resource::Any)?;
        let records = Marks::find_filtered(db, filter).await?;

        let mut ids: Vec<i64> = records.iter().map(|m| m.student_id).collect();
        ids.sort_unstable();
        ids.dedup();
        let students: HashMap<i64, Student> = Student::find_by_ids(db, &ids)
            .await?
            .into_iter()
            .map(|s| (s.id, s))
            .collect();

        let rows = records
            .iter()
            .filter_map(|m| students.get(&m.student_id).map(|s| (s, m)));
        let bytes = write_csv(rows)?;

        tracing::info!(rows = records.len(), "marks exported");
        Ok(CsvExport {
            filename: ALL_MARKS_FILENAME.to_owned(),
            bytes,
        })
    }
}
