//! Percentage and letter-grade derivation for marks records.

use std::ops::RangeInclusive;

use db::models::marks;
use sea_orm::ActiveValue::Set;
use strum::{Display, EnumString, IntoStaticStr};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct InvalidInputError(pub String);

/// Letter grade, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, IntoStaticStr)]
pub enum Grade {
    #[strum(serialize = "A+")]
    APlus,
    A,
    #[strum(serialize = "A-")]
    AMinus,
    #[strum(serialize = "B+")]
    BPlus,
    B,
    #[strum(serialize = "B-")]
    BMinus,
    #[strum(serialize = "C+")]
    CPlus,
    C,
    #[strum(serialize = "C-")]
    CMinus,
    #[strum(serialize = "D+")]
    DPlus,
    D,
    F,
}

impl Grade {
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// Inclusive lower bounds, checked top to bottom.
const GRADE_TABLE: [(f64, Grade); 11] = [
    (90.0, Grade::APlus),
    (85.0, Grade::A),
    (80.0, Grade::AMinus),
    (75.0, Grade::BPlus),
    (70.0, Grade::B),
    (65.0, Grade::BMinus),
    (60.0, Grade::CPlus),
    (55.0, Grade::C),
    (50.0, Grade::CMinus),
    (45.0, Grade::DPlus),
    (40.0, Grade::D),
];

/// A record whose percentage and grade are derived from its raw score.
pub trait Gradeable {
    /// `(marks_obtained, total_marks)`, if both are known.
    fn score(&self) -> Option<(f64, f64)>;

    fn set_derived(&mut self, percentage: f64, grade: Grade);
}

impl Gradeable for marks::ActiveModel {
    fn score(&self) -> Option<(f64, f64)> {
        let obtained = self.marks_obtained.try_as_ref()?;
        let total = self.total_marks.try_as_ref()?;
        Some((*obtained, *total))
    }

    fn set_derived(&mut self, percentage: f64, grade: Grade) {
        self.percentage = Set(percentage);
        self.grade = Set(grade.to_string());
    }
}

pub struct GradeEngine;

impl GradeEngine {
    /// Accepted range for `marks_obtained`, enforced by marks validation.
    pub const MARKS_RANGE: RangeInclusive<f64> = 0.0..=100.0;

    pub const PASS_PERCENTAGE: f64 = 40.0;

    /// `marks_obtained / total_marks * 100`, unclamped.
    pub fn compute_percentage(
        marks_obtained: f64,
        total_marks: f64,
    ) -> Result<f64, InvalidInputError> {
        if !total_marks.is_finite() || total_marks <= 0.0 {
            return Err(InvalidInputError(
                "Total marks must be greater than 0".into(),
            ));
        }
        if !marks_obtained.is_finite() {
            return Err(InvalidInputError("Marks obtained must be a number".into()));
        }
        Ok((marks_obtained / total_marks) * 100.0)
    }

    /// Maps any percentage to a grade. NaN and anything below 40 is `F`.
    pub fn compute_grade(percentage: f64) -> Grade {
        GRADE_TABLE
            .iter()
            .find(|(min, _)| percentage >= *min)
            .map(|(_, grade)| *grade)
            .unwrap_or(Grade::F)
    }

    pub fn is_passing(percentage: f64) -> bool {
        percentage >= Self::PASS_PERCENTAGE
    }

    /// Overwrites the record's derived fields from its current score.
    pub fn recompute<R: Gradeable>(record: &mut R) -> Result<(), InvalidInputError> {
        let (obtained, total) = record
            .score()
            .ok_or_else(|| InvalidInputError("Marks obtained and total marks are required".into()))?;
        let percentage = Self::compute_percentage(obtained, total)?;
        record.set_derived(percentage, Self::compute_grade(percentage));
        Ok(())
    }
}
