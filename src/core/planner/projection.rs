//! Forward projection of the courses left after the manual plan
//!
//! The planner fills synthetic regular terms greedily:
//! 1. Scan the remaining courses in catalog order
//! 2. Take a course when all of its prerequisites were approved before the
//!    term and it fits under the credit and course caps
//! 3. Commit the term's courses to the approved set and move to the next term
//! 4. Stop when nothing remains, or when a whole pass admits no course
//!    (cyclic/unreachable prerequisites or caps too small); the leftovers are
//!    reported as pending instead of failing

use crate::core::models::{
    Catalog, Course, ProjectionResult, SemesterCredits, SemesterPlan, Term,
};
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

/// Caps applied to every projected term
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectionConfig {
    /// Maximum credits per term (inclusive)
    pub max_credits: u32,
    /// Maximum number of courses per term (inclusive), unlimited when `None`
    pub max_courses: Option<u32>,
}

impl ProjectionConfig {
    /// Config with a credit cap and no course cap
    #[must_use]
    pub const fn new(max_credits: u32) -> Self {
        Self {
            max_credits,
            max_courses: None,
        }
    }

    /// Add a course cap
    #[must_use]
    pub const fn with_max_courses(mut self, max_courses: u32) -> Self {
        self.max_courses = Some(max_courses);
        self
    }
}

/// A synthetic term being filled
#[derive(Debug, Clone)]
struct ProjectedTerm {
    term: Term,
    courses: Vec<String>,
    total_credits: u32,
}

impl ProjectedTerm {
    const fn new(term: Term) -> Self {
        Self {
            term,
            courses: Vec::new(),
            total_credits: 0,
        }
    }

    fn add_course(&mut self, course_code: String, credits: u32) {
        self.courses.push(course_code);
        self.total_credits += credits;
    }

    /// Whether `course` can join this term under `config`
    fn admits(&self, course: &Course, approved: &BTreeSet<String>, config: &ProjectionConfig) -> bool {
        let fits_courses = config
            .max_courses
            .map_or(true, |max| self.courses.len() < max as usize);
        let fits_credits = self
            .total_credits
            .checked_add(course.credits)
            .is_some_and(|total| total <= config.max_credits);

        fits_courses && fits_credits && course.prerequisites_met(|p| approved.contains(p))
    }

    fn into_plan(self) -> (SemesterPlan, SemesterCredits) {
        let credits = SemesterCredits {
            semester: self.term.label(),
            credits: self.total_credits,
        };
        let plan = SemesterPlan {
            period: self.term.period,
            year: self.term.year,
            courses: self.courses,
        };
        (plan, credits)
    }
}

/// Greedy planner that schedules every unapproved catalog course
pub struct ProjectionPlanner<'a> {
    catalog: &'a Catalog,
    config: ProjectionConfig,
}

impl<'a> ProjectionPlanner<'a> {
    /// Create a planner over `catalog`
    #[must_use]
    pub const fn new(catalog: &'a Catalog, config: ProjectionConfig) -> Self {
        Self { catalog, config }
    }

    /// Project the remaining courses into terms starting at `first_term`.
    ///
    /// `approved` grows with every scheduled course; on return it holds the
    /// approved set as simulated through the last projected term.
    #[must_use]
    pub fn project(&self, approved: &mut BTreeSet<String>, first_term: Term) -> ProjectionResult {
        let mut remaining: Vec<&Course> = self
            .catalog
            .courses()
            .filter(|c| !approved.contains(&c.code))
            .collect();

        debug!(
            "Projecting {} remaining courses from {first_term} (max {} credits, max {:?} courses)",
            remaining.len(),
            self.config.max_credits,
            self.config.max_courses
        );

        let mut result = ProjectionResult::default();
        let mut term = first_term;

        while !remaining.is_empty() {
            let mut draft = ProjectedTerm::new(term);
            let mut leftover = Vec::with_capacity(remaining.len());

            for course in remaining {
                if draft.admits(course, approved, &self.config) {
                    draft.add_course(course.code.clone(), course.credits);
                } else {
                    leftover.push(course);
                }
            }
            remaining = leftover;

            if draft.courses.is_empty() {
                warn!(
                    "Projection stalled at {term}: {} courses cannot be scheduled",
                    remaining.len()
                );
                break;
            }

            approved.extend(draft.courses.iter().cloned());
            debug!(
                "Projected {term}: {} ({} credits)",
                draft.courses.join(", "),
                draft.total_credits
            );

            let (plan, credits) = draft.into_plan();
            result.plan.push(plan);
            result.credits.push(credits);
            term = term.next_regular();
        }

        result.pending = remaining.into_iter().map(|c| c.code.clone()).collect();
        info!(
            "Projection produced {} terms, {} courses pending",
            result.plan.len(),
            result.pending.len()
        );
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Period;

    fn set(codes: &[&str]) -> BTreeSet<String> {
        codes.iter().map(ToString::to_string).collect()
    }

    fn chain_catalog() -> Catalog {
        Catalog::from_courses(
            "ICCI",
            vec![
                Course::new("MAT001", "Cálculo I", 3),
                Course::new("PRG001", "Programación I", 4),
                Course::new("PRG002", "Programación II", 4).with_prerequisite("PRG001"),
                Course::new("PRG003", "Estructuras de Datos", 4).with_prerequisite("PRG002"),
            ],
        )
    }

    const S1_2026: Term = Term::new(Period::S1, 2026);

    #[test]
    fn test_chain_is_spread_over_terms() {
        let catalog = chain_catalog();
        let planner = ProjectionPlanner::new(&catalog, ProjectionConfig::new(30));
        let mut approved = set(&[]);

        let result = planner.project(&mut approved, S1_2026);

        assert!(result.pending.is_empty());
        assert_eq!(result.plan.len(), 3);
        assert_eq!(result.plan[0].courses, vec!["MAT001", "PRG001"]);
        assert_eq!(result.plan[1].courses, vec!["PRG002"]);
        assert_eq!(result.plan[2].courses, vec!["PRG003"]);
        assert_eq!(result.plan[0].label(), "S1-2026");
        assert_eq!(result.plan[1].label(), "S2-2026");
        assert_eq!(result.plan[2].label(), "S1-2027");
        assert_eq!(result.credits[0].credits, 7);
        assert_eq!(approved.len(), 4);
    }

    #[test]
    fn test_credit_cap_skips_and_continues_scanning() {
        let catalog = Catalog::from_courses(
            "ICCI",
            vec![
                Course::new("BIG", "Taller", 6),
                Course::new("MID", "Física", 4),
                Course::new("SMALL", "Inglés", 1),
            ],
        );
        let planner = ProjectionPlanner::new(&catalog, ProjectionConfig::new(5));
        let mut approved = set(&[]);

        let result = planner.project(&mut approved, S1_2026);

        assert_eq!(result.plan.len(), 1);
        assert_eq!(result.plan[0].courses, vec!["MID", "SMALL"]);
        assert_eq!(result.pending, vec!["BIG"]);
    }

    #[test]
    fn test_course_cap() {
        let catalog = chain_catalog();
        let planner =
            ProjectionPlanner::new(&catalog, ProjectionConfig::new(30).with_max_courses(1));
        let mut approved = set(&[]);

        let result = planner.project(&mut approved, S1_2026);

        assert_eq!(result.plan.len(), 4);
        assert!(result.plan.iter().all(|t| t.courses.len() == 1));
        assert!(result.pending.is_empty());
    }

    #[test]
    fn test_zero_course_cap_deadlocks_immediately() {
        let catalog = chain_catalog();
        let planner =
            ProjectionPlanner::new(&catalog, ProjectionConfig::new(30).with_max_courses(0));
        let mut approved = set(&[]);

        let result = planner.project(&mut approved, S1_2026);

        assert!(result.plan.is_empty());
        assert_eq!(result.pending.len(), 4);
        assert!(result.is_deadlocked());
    }

    #[test]
    fn test_self_prerequisite_and_cycle_end_in_pending() {
        let catalog = Catalog::from_courses(
            "ICCI",
            vec![
                Course::new("MAT001", "Cálculo I", 3),
                Course::new("SELF", "Autorreferente", 3).with_prerequisite("SELF"),
                Course::new("CYC_A", "Ciclo A", 3).with_prerequisite("CYC_B"),
                Course::new("CYC_B", "Ciclo B", 3).with_prerequisite("CYC_A"),
                Course::new("MAT002", "Cálculo II", 3).with_prerequisite("MAT001"),
            ],
        );
        let planner = ProjectionPlanner::new(&catalog, ProjectionConfig::new(30));
        let mut approved = set(&[]);

        let result = planner.project(&mut approved, S1_2026);

        assert_eq!(result.plan.len(), 2);
        assert_eq!(result.pending, vec!["SELF", "CYC_A", "CYC_B"]);
        assert!(approved.contains("MAT002"));
    }

    #[test]
    fn test_nothing_remaining() {
        let catalog = chain_catalog();
        let planner = ProjectionPlanner::new(&catalog, ProjectionConfig::new(30));
        let mut approved = set(&["MAT001", "PRG001", "PRG002", "PRG003"]);

        let result = planner.project(&mut approved, S1_2026);

        assert_eq!(result, ProjectionResult::default());
    }

    #[test]
    fn test_projected_terms_respect_rules() {
        let catalog = chain_catalog();
        let config = ProjectionConfig::new(8).with_max_courses(2);
        let planner = ProjectionPlanner::new(&catalog, config);
        let mut approved = set(&[]);

        let result = planner.project(&mut approved, Term::new(Period::S2, 2025));

        let mut seen = set(&[]);
        for term in &result.plan {
            assert!(!term.period.is_special());
            let credits: u32 = term
                .courses
                .iter()
                .filter_map(|c| catalog.get_course(c))
                .map(|c| c.credits)
                .sum();
            assert!(credits <= 8);
            assert!(term.courses.len() <= 2);
            for code in &term.courses {
                let course = catalog.get_course(code).unwrap();
                assert!(course.prerequisites_met(|p| seen.contains(p)));
            }
            seen.extend(term.courses.iter().cloned());
        }
    }

    #[test]
    fn test_huge_credits_never_share_a_term() {
        let catalog = Catalog::from_courses(
            "ICCI",
            vec![
                Course::new("A", "", 3),
                Course::new("HUGE", "", u32::MAX),
            ],
        );
        let planner = ProjectionPlanner::new(&catalog, ProjectionConfig::new(10));
        let mut approved = set(&[]);

        let result = planner.project(&mut approved, S1_2026);

        assert_eq!(result.plan.len(), 1);
        assert_eq!(result.plan[0].courses, vec!["A"]);
        assert_eq!(result.credits[0].credits, 3);
        assert_eq!(result.pending, vec!["HUGE"]);
    }
}
