use db::models::marks::{ExamType, MarksFilter, Model as Marks};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Serialize, Default)]
pub struct MarksResponse {
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

impl From<Marks> for MarksResponse {
    fn from(m: Marks) -> Self {
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

/// Query string for marks listings and exports.
#[derive(Debug, Deserialize, Default)]
pub struct MarksQuery {
    pub subject: Option<String>,
    pub exam_type: Option<String>,
    pub academic_year: Option<String>,
}

impl MarksQuery {
    /// Builds the storage filter, rejecting unknown exam types.
    pub fn into_filter(self) -> Result<MarksFilter, String> {
        let exam_type = self
            .exam_type
            .map(|s| ExamType::from_str(&s).map_err(|_| format!("Invalid exam type '{s}'")))
            .transpose()?;
        Ok(MarksFilter {
            subject: self.subject,
            exam_type,
            academic_year: self.academic_year,
        })
    }
}
