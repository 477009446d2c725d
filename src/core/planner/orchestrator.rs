//! Plan orchestration: validate the manual plan term by term, then project
//! the rest of the degree.

use super::projection::{ProjectionConfig, ProjectionPlanner};
use super::validator::validate_semester;
use crate::core::error::{PlannerError, Result};
use crate::core::models::{
    AcademicHistory, Catalog, FullProjection, PlanRequest, SemesterCredits, ALREADY_GRADUATED,
};
use crate::core::sources::{CatalogSource, HistoryStore};
use std::collections::BTreeSet;
use tracing::{debug, error, info};

/// Run a full simulation on already-fetched data.
///
/// This is the pure core of [`PlanOrchestrator::generate_projection`]: it
/// reads `catalog` and `history` without modifying them and either returns
/// the whole projection or the first failing term.
///
/// # Errors
/// Returns [`PlannerError::InvalidTerm`] for the first manual term that
/// breaks a rule; nothing from that term or later terms is committed.
pub fn simulate(
    catalog: &Catalog,
    history: &AcademicHistory,
    request: &PlanRequest,
) -> Result<FullProjection> {
    let mut simulated_approved = history.approved.clone();
    let failed: BTreeSet<String> = history
        .failed
        .iter()
        .chain(&request.simulated_fails)
        .cloned()
        .collect();

    debug!("Manual plan received: {} semesters", request.manual_plan.len());

    let mut total_credits_per_semester = Vec::with_capacity(request.manual_plan.len());
    for semester in &request.manual_plan {
        let label = semester.label();
        info!(
            "Validating semester {label} ({} courses)",
            semester.courses.len()
        );

        let validation = validate_semester(
            semester,
            catalog,
            &simulated_approved,
            &failed,
            request.max_credits_per_semester,
        );

        if let Some(reason) = validation.error {
            error!("Error in {label}: {reason}");
            return Err(PlannerError::InvalidTerm {
                term: label,
                reason,
            });
        }

        simulated_approved.extend(semester.courses.iter().cloned());
        debug!(
            "Semester {label} valid ({} credits)",
            validation.semester_credits
        );
        total_credits_per_semester.push(SemesterCredits {
            semester: label,
            credits: validation.semester_credits,
        });
    }

    info!("Projecting remaining courses");
    let first_projected = request
        .manual_plan
        .last()
        .map_or(request.start_term, |last| last.term().next_regular());

    let mut config = ProjectionConfig::new(request.max_credits_per_semester);
    if let Some(max_courses) = request.max_courses_per_semester {
        config = config.with_max_courses(max_courses);
    }
    let projection =
        ProjectionPlanner::new(catalog, config).project(&mut simulated_approved, first_projected);

    let mut full_plan = request.manual_plan.clone();
    full_plan.extend(projection.plan);

    let estimated_graduation = full_plan
        .last()
        .map_or_else(|| ALREADY_GRADUATED.to_string(), |term| term.label());

    info!("Projection generated. Estimated graduation: {estimated_graduation}");

    Ok(FullProjection {
        estimated_graduation,
        total_credits_per_semester,
        projected_credits_per_semester: projection.credits,
        full_plan,
        approved_courses: simulated_approved,
        pending_courses: projection.pending,
    })
}

/// Drives one projection request against the catalog and history collaborators
pub struct PlanOrchestrator<'a> {
    catalogs: &'a dyn CatalogSource,
    histories: &'a dyn HistoryStore,
}

impl<'a> PlanOrchestrator<'a> {
    /// Create an orchestrator over the given collaborators
    #[must_use]
    pub const fn new(catalogs: &'a dyn CatalogSource, histories: &'a dyn HistoryStore) -> Self {
        Self {
            catalogs,
            histories,
        }
    }

    /// Fetch the student's history and the career's catalog, then simulate
    /// the request.
    ///
    /// # Errors
    /// - [`PlannerError::UnknownCareer`] when the catalog cannot be resolved
    /// - [`PlannerError::InvalidTerm`] when a manual term breaks a rule
    /// - transport/store errors from the collaborators
    pub fn generate_projection(&self, request: &PlanRequest) -> Result<FullProjection> {
        info!(
            "Generating projection for student {}, career {}",
            request.student_id, request.career_code
        );

        let history = self.histories.get_history(&request.student_id)?;
        let catalog = self.catalogs.fetch_catalog(&request.career_code)?;

        simulate(&catalog, &history, request)
    }

    /// Courses of `career_code` the student has not approved yet
    ///
    /// # Errors
    /// Propagates collaborator errors
    pub fn pending_courses(&self, student_id: &str, career_code: &str) -> Result<Vec<String>> {
        info!("Computing pending courses of {student_id} for career {career_code}");
        let history = self.histories.get_history(student_id)?;
        let catalog = self.catalogs.fetch_catalog(career_code)?;
        Ok(crate::core::progress::pending_courses(&catalog, &history))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::TermRejection;
    use crate::core::models::{Course, Period, SemesterPlan, Term};
    use crate::core::sources::{InMemoryHistoryStore, StaticCatalogSource};

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

    fn request() -> PlanRequest {
        PlanRequest::new("student-1", "ICCI", 10, Term::new(Period::S1, 2025))
    }

    #[test]
    fn test_manual_terms_then_projection() {
        let history = AcademicHistory::from_lists(["MAT001"], Vec::<&str>::new());
        let req = request().with_term(SemesterPlan::with_courses(Period::S1, 2025, ["PRG001"]));

        let projection = simulate(&catalog(), &history, &req).unwrap();

        assert_eq!(
            projection.total_credits_per_semester,
            vec![SemesterCredits {
                semester: "S1-2025".to_string(),
                credits: 4
            }]
        );
        assert_eq!(projection.full_plan.len(), 2);
        assert_eq!(projection.full_plan[1].label(), "S2-2025");
        assert_eq!(projection.full_plan[1].courses, vec!["PRG002"]);
        assert_eq!(projection.estimated_graduation, "S2-2025");
        assert!(projection.is_complete());
        // history snapshot untouched
        assert_eq!(history.approved.len(), 1);
    }

    #[test]
    fn test_invalid_term_aborts_without_partial_result() {
        let history = AcademicHistory::new();
        let req = request()
            .with_term(SemesterPlan::with_courses(Period::S1, 2025, ["PRG001"]))
            .with_term(SemesterPlan::with_courses(Period::S2, 2025, ["MAT001", "XYZ"]));

        let err = simulate(&catalog(), &history, &req).unwrap_err();
        match err {
            PlannerError::InvalidTerm { term, reason } => {
                assert_eq!(term, "S2-2025");
                assert_eq!(
                    reason,
                    TermRejection::UnknownCourse {
                        course: "XYZ".to_string()
                    }
                );
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_simulated_fails_unlock_special_terms() {
        let history = AcademicHistory::new();
        let winter = SemesterPlan::with_courses(Period::I, 2025, ["MAT001"]);

        let plain = request().with_term(winter.clone());
        assert!(simulate(&catalog(), &history, &plain).is_err());

        let with_retake = request()
            .with_term(winter)
            .with_simulated_fails(["MAT001"]);
        let projection = simulate(&catalog(), &history, &with_retake).unwrap();
        // projection resumes in the regular term after winter
        assert_eq!(projection.full_plan[1].label(), "S2-2025");
    }

    #[test]
    fn test_already_graduated() {
        let history = AcademicHistory::from_lists(["MAT001", "PRG001", "PRG002"], Vec::<&str>::new());
        let projection = simulate(&catalog(), &history, &request()).unwrap();

        assert_eq!(projection.estimated_graduation, ALREADY_GRADUATED);
        assert!(projection.full_plan.is_empty());
        assert!(projection.pending_courses.is_empty());
    }

    #[test]
    fn test_empty_manual_plan_starts_at_start_term() {
        let history = AcademicHistory::new();
        let req = PlanRequest::new("s", "ICCI", 10, Term::new(Period::S2, 2026));

        let projection = simulate(&catalog(), &history, &req).unwrap();
        assert_eq!(projection.full_plan[0].label(), "S2-2026");
        assert!(projection.total_credits_per_semester.is_empty());
        assert_eq!(projection.projected_credits_per_semester[0].credits, 7);
    }

    #[test]
    fn test_orchestrator_uses_collaborators() {
        let catalogs = StaticCatalogSource::new().with_catalog(catalog());
        let histories = InMemoryHistoryStore::seeded([(
            "student-1",
            AcademicHistory::from_lists(["MAT001"], Vec::<&str>::new()),
        )]);
        let orchestrator = PlanOrchestrator::new(&catalogs, &histories);

        let projection = orchestrator.generate_projection(&request()).unwrap();
        assert!(projection.approved_courses.contains("MAT001"));
        assert_eq!(
            orchestrator.pending_courses("student-1", "ICCI").unwrap(),
            vec!["PRG001", "PRG002"]
        );

        let mut unknown = request();
        unknown.career_code = "NOPE".to_string();
        assert!(matches!(
            orchestrator.generate_projection(&unknown),
            Err(PlannerError::UnknownCareer(_))
        ));
    }
}
