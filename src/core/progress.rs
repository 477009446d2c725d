//! Student progress: recorded course results and pending-course queries

use crate::core::error::{PlannerError, Result};
use crate::core::models::{AcademicHistory, Catalog, Period};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use tracing::debug;

/// Valid grades (1.0–7.0 scale, stored times ten)
pub const GRADE_RANGE: RangeInclusive<u8> = 10..=70;

/// Valid academic years
pub const YEAR_RANGE: RangeInclusive<i32> = 2000..=2100;

/// Outcome of taking a course
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseStatus {
    /// The course was passed
    Approved,
    /// The course was failed
    Failed,
}

/// One recorded course result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    /// Course code
    pub course_code: String,
    /// Result
    pub status: CourseStatus,
    /// Final grade times ten, if known
    #[serde(default)]
    pub grade: Option<u8>,
    /// Year the course was taken
    pub year: i32,
    /// Period the course was taken in
    pub period: Period,
}

impl ProgressRecord {
    /// Check field ranges
    ///
    /// # Errors
    /// Returns [`PlannerError::InvalidProgress`] naming the offending field
    pub fn validate(&self) -> Result<()> {
        if self.course_code.trim().is_empty() {
            return Err(PlannerError::InvalidProgress(
                "course code must not be empty".to_string(),
            ));
        }
        if let Some(grade) = self.grade {
            if !GRADE_RANGE.contains(&grade) {
                return Err(PlannerError::InvalidProgress(format!(
                    "grade {grade} outside {}..={}",
                    GRADE_RANGE.start(),
                    GRADE_RANGE.end()
                )));
            }
        }
        if !YEAR_RANGE.contains(&self.year) {
            return Err(PlannerError::InvalidProgress(format!(
                "year {} outside {}..={}",
                self.year,
                YEAR_RANGE.start(),
                YEAR_RANGE.end()
            )));
        }
        Ok(())
    }

    /// Validate the record and fold it into `history`.
    ///
    /// An approval is always recorded; an earlier failure of the same course
    /// stays in the failed set. A failure is ignored once the course is
    /// approved.
    ///
    /// # Errors
    /// Returns [`PlannerError::InvalidProgress`] for out-of-range records
    pub fn apply_to(&self, history: &mut AcademicHistory) -> Result<()> {
        self.validate()?;
        let code = self.course_code.trim().to_string();
        match self.status {
            CourseStatus::Approved => {
                history.approved.insert(code);
            }
            CourseStatus::Failed => {
                if !history.is_approved(&code) {
                    history.failed.insert(code);
                }
            }
        }
        Ok(())
    }
}

/// Catalog courses the student has not approved yet, in catalog order
#[must_use]
pub fn pending_courses(catalog: &Catalog, history: &AcademicHistory) -> Vec<String> {
    let pending: Vec<String> = catalog
        .codes()
        .filter(|code| !history.is_approved(code))
        .map(ToString::to_string)
        .collect();

    debug!(
        "Pending courses for {}: {}",
        catalog.career_code,
        if pending.is_empty() {
            "none".to_string()
        } else {
            pending.join(", ")
        }
    );
    pending
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Course;

    fn record(code: &str, status: CourseStatus) -> ProgressRecord {
        ProgressRecord {
            course_code: code.to_string(),
            status,
            grade: Some(55),
            year: 2025,
            period: Period::S1,
        }
    }

    #[test]
    fn test_validate_ranges() {
        assert!(record("MAT001", CourseStatus::Approved).validate().is_ok());

        let mut low_grade = record("MAT001", CourseStatus::Failed);
        low_grade.grade = Some(9);
        assert!(matches!(
            low_grade.validate(),
            Err(PlannerError::InvalidProgress(msg)) if msg.contains("grade")
        ));

        let mut old = record("MAT001", CourseStatus::Approved);
        old.year = 1999;
        assert!(old.validate().is_err());

        let mut no_grade = record("MAT001", CourseStatus::Approved);
        no_grade.grade = None;
        assert!(no_grade.validate().is_ok());

        assert!(record("  ", CourseStatus::Approved).validate().is_err());
    }

    #[test]
    fn test_apply_failure_then_approval() {
        let mut history = AcademicHistory::new();
        record("FIS001", CourseStatus::Failed)
            .apply_to(&mut history)
            .unwrap();
        assert!(history.has_failed("FIS001"));

        record("FIS001", CourseStatus::Approved)
            .apply_to(&mut history)
            .unwrap();
        assert!(history.is_approved("FIS001"));
        assert!(history.has_failed("FIS001"));
    }

    #[test]
    fn test_failure_after_approval_is_ignored() {
        let mut history = AcademicHistory::from_lists(["MAT001"], Vec::<&str>::new());
        record("MAT001", CourseStatus::Failed)
            .apply_to(&mut history)
            .unwrap();
        assert!(!history.has_failed("MAT001"));
    }

    #[test]
    fn test_pending_courses_in_catalog_order() {
        let catalog = Catalog::from_courses(
            "ICCI",
            vec![
                Course::new("MAT001", "Cálculo I", 3),
                Course::new("PRG001", "Programación I", 4),
                Course::new("FIS001", "Física I", 4),
            ],
        );
        let history = AcademicHistory::from_lists(["PRG001"], ["FIS001"]);

        assert_eq!(pending_courses(&catalog, &history), vec!["MAT001", "FIS001"]);
    }

    #[test]
    fn test_record_json_shape() {
        let json = r#"{"courseCode":"MAT001","status":"failed","grade":32,"year":2024,"period":"S2"}"#;
        let parsed: ProgressRecord = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.status, CourseStatus::Failed);
        assert_eq!(parsed.period, Period::S2);
    }
}
