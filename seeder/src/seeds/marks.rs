use crate::seed::{SeedFuture, Seeder};
use crate::seeds::teacher::TEACHER_EMAIL;
use db::models::marks::{ExamType, NewMarks, Semester};
use db::models::{student, teacher};
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr};
use services::grade::GradeEngine;

pub struct MarksSeeder;

const SUBJECTS: [&str; 5] = ["Mathematics", "Physics", "Chemistry", "English", "History"];
const EXAM_TYPES: [ExamType; 3] = [ExamType::Midterm, ExamType::Final, ExamType::Quiz];

impl Seeder for MarksSeeder {
    fn seed<'a>(&'a self, db: &'a DatabaseConnection) -> SeedFuture<'a> {
        Box::pin(async move {
            let entered_by = teacher::Model::find_by_email(db, TEACHER_EMAIL)
                .await?
                .ok_or_else(|| DbErr::RecordNotFound(TEACHER_EMAIL.into()))?
                .id;

            for student in student::Model::list_active(db, None, None).await? {
                for subject in SUBJECTS {
                    let exam_type = EXAM_TYPES[fastrand::usize(..EXAM_TYPES.len())];
                    let mut record = NewMarks {
                        student_id: student.id,
                        entered_by,
                        subject: subject.into(),
                        exam_type: Some(exam_type),
                        marks_obtained: fastrand::u32(25..=100) as f64,
                        total_marks: None,
                        exam_date: None,
                        academic_year: None,
                        semester: Some(Semester::First),
                        remarks: None,
                    }
                    .into_active_model();
                    GradeEngine::recompute(&mut record).map_err(|e| DbErr::Custom(e.to_string()))?;
                    record.insert(db).await?;
                }
            }

            Ok(())
        })
    }
}
