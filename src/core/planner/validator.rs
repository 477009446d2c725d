//! Rule checks for a single manually entered term
//!
//! Rules are applied course by course in the order the term lists them and
//! the first failure wins:
//! 1. The course must exist in the catalog
//! 2. Every prerequisite must already be approved
//! 3. I/V terms only admit courses the student has failed
//!
//! Once every course passes, the accumulated credits are checked against the
//! per-semester cap.

use crate::core::error::TermRejection;
use crate::core::models::{Catalog, SemesterPlan, ValidationResult};
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Validate one term against the catalog and the history simulated so far.
///
/// Neither set is modified; the caller commits the term's courses into the
/// approved set once the term is accepted.
#[must_use]
pub fn validate_semester(
    semester: &SemesterPlan,
    catalog: &Catalog,
    approved_so_far: &BTreeSet<String>,
    failed_so_far: &BTreeSet<String>,
    max_credits: u32,
) -> ValidationResult {
    let label = semester.label();
    debug!("Validating rules for semester {label}");

    // u64 so a term cannot wrap past the cap
    let mut semester_credits: u64 = 0;

    for code in &semester.courses {
        let Some(course) = catalog.get_course(code) else {
            warn!("Course not found: {code}");
            return ValidationResult::rejected(
                TermRejection::UnknownCourse {
                    course: code.clone(),
                },
                0,
            );
        };

        if let Some(missing) = course
            .prerequisites
            .iter()
            .find(|p| !approved_so_far.contains(*p))
        {
            warn!("Missing prerequisite {missing} for {code}");
            return ValidationResult::rejected(
                TermRejection::MissingPrerequisite {
                    prerequisite: missing.clone(),
                    course: code.clone(),
                },
                0,
            );
        }

        if semester.period.is_special() && !failed_so_far.contains(code) {
            warn!("Course {code} cannot be taken in {label}: not a retake");
            return ValidationResult::rejected(
                TermRejection::RetakeOnly {
                    course: code.clone(),
                },
                0,
            );
        }

        semester_credits += u64::from(course.credits);
    }

    let credits = u32::try_from(semester_credits).unwrap_or(u32::MAX);
    if semester_credits > u64::from(max_credits) {
        warn!("Semester {label} exceeds credit cap ({semester_credits} > {max_credits})");
        return ValidationResult::rejected(
            TermRejection::CreditCapExceeded {
                credits,
                max: max_credits,
            },
            credits,
        );
    }

    ValidationResult::accepted(credits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{Course, Period};

    fn catalog() -> Catalog {
        Catalog::from_courses(
            "ICCI",
            vec![
                Course::new("MAT001", "Cálculo I", 3),
                Course::new("PRG001", "Programación I", 4),
                Course::new("PRG002", "Programación II", 4).with_prerequisite("PRG001"),
            ],
        )
    }

    fn set(codes: &[&str]) -> BTreeSet<String> {
        codes.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_accepts_term_within_cap() {
        let term = SemesterPlan::with_courses(Period::S1, 2025, ["PRG001"]);
        let result = validate_semester(&term, &catalog(), &set(&["MAT001"]), &set(&[]), 10);
        assert!(result.is_valid());
        assert_eq!(result.semester_credits, 4);
    }

    #[test]
    fn test_unknown_course() {
        let term = SemesterPlan::with_courses(Period::S1, 2025, ["XYZ999"]);
        let result = validate_semester(&term, &catalog(), &set(&[]), &set(&[]), 10);
        assert_eq!(
            result.error,
            Some(TermRejection::UnknownCourse {
                course: "XYZ999".to_string()
            })
        );
        assert_eq!(result.semester_credits, 0);
    }

    #[test]
    fn test_missing_prerequisite() {
        let term = SemesterPlan::with_courses(Period::S1, 2025, ["PRG002"]);
        let result = validate_semester(&term, &catalog(), &set(&[]), &set(&[]), 10);
        assert_eq!(
            result.error.map(|e| e.to_string()),
            Some("missing prerequisite PRG001 for PRG002".to_string())
        );
        assert_eq!(result.semester_credits, 0);
    }

    #[test]
    fn test_prerequisite_in_same_term_does_not_count() {
        let term = SemesterPlan::with_courses(Period::S1, 2025, ["PRG001", "PRG002"]);
        let result = validate_semester(&term, &catalog(), &set(&[]), &set(&[]), 20);
        assert!(matches!(
            result.error,
            Some(TermRejection::MissingPrerequisite { .. })
        ));
    }

    #[test]
    fn test_special_term_requires_retake() {
        let term = SemesterPlan::with_courses(Period::I, 2025, ["PRG001"]);
        let result = validate_semester(&term, &catalog(), &set(&[]), &set(&[]), 10);
        assert!(matches!(result.error, Some(TermRejection::RetakeOnly { .. })));

        let summer = SemesterPlan::with_courses(Period::V, 2025, ["PRG001"]);
        let result = validate_semester(&summer, &catalog(), &set(&[]), &set(&["PRG001"]), 10);
        assert!(result.is_valid());
        assert_eq!(result.semester_credits, 4);
    }

    #[test]
    fn test_special_term_rule_applies_even_within_cap() {
        let term = SemesterPlan::with_courses(Period::V, 2025, ["MAT001"]);
        let result = validate_semester(&term, &catalog(), &set(&[]), &set(&["PRG001"]), 100);
        assert!(!result.is_valid());
    }

    #[test]
    fn test_credit_cap_reports_accumulated_credits() {
        let term = SemesterPlan::with_courses(Period::S1, 2025, ["PRG001", "MAT001"]);
        let result = validate_semester(&term, &catalog(), &set(&[]), &set(&[]), 5);
        assert_eq!(
            result.error.as_ref().map(ToString::to_string),
            Some("exceeds credit cap (7 > 5)".to_string())
        );
        assert_eq!(result.semester_credits, 7);
    }

    #[test]
    fn test_course_rule_wins_over_cap() {
        let term = SemesterPlan::with_courses(Period::S1, 2025, ["PRG001", "MAT001", "XYZ999"]);
        let result = validate_semester(&term, &catalog(), &set(&[]), &set(&[]), 1);
        assert!(matches!(result.error, Some(TermRejection::UnknownCourse { .. })));
        assert_eq!(result.semester_credits, 0);
    }

    #[test]
    fn test_empty_term_is_valid() {
        let term = SemesterPlan::new(Period::S2, 2025);
        let result = validate_semester(&term, &catalog(), &set(&[]), &set(&[]), 0);
        assert!(result.is_valid());
        assert_eq!(result.semester_credits, 0);
    }

    #[test]
    fn test_inputs_are_not_mutated() {
        let approved = set(&["MAT001"]);
        let term = SemesterPlan::with_courses(Period::S1, 2025, ["PRG001"]);
        let _ = validate_semester(&term, &catalog(), &approved, &set(&[]), 10);
        assert_eq!(approved, set(&["MAT001"]));
    }

    #[test]
    fn test_huge_credits_do_not_wrap_past_cap() {
        let catalog = Catalog::from_courses(
            "ICCI",
            vec![
                Course::new("A", "", 3),
                Course::new("HUGE", "", u32::MAX),
            ],
        );
        let term = SemesterPlan::with_courses(Period::S1, 2025, ["A", "HUGE"]);
        let result = validate_semester(&term, &catalog, &set(&[]), &set(&[]), 10);

        assert_eq!(
            result.error,
            Some(TermRejection::CreditCapExceeded {
                credits: u32::MAX,
                max: 10
            })
        );
        assert_eq!(result.semester_credits, u32::MAX);
    }
}
