//! Validation and projection result models

use super::{SemesterPlan, Term};
use crate::core::error::TermRejection;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Graduation label used when nothing remains to be scheduled
pub const ALREADY_GRADUATED: &str = "Ya egresado";

/// Outcome of validating one manual term
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    /// Credits consumed by the term. Zero for course-level rejections,
    /// the accumulated total for cap rejections.
    pub semester_credits: u32,
    /// Reason the term was rejected, if it was
    pub error: Option<TermRejection>,
}

impl ValidationResult {
    /// An accepted term consuming `credits`
    #[must_use]
    pub const fn accepted(credits: u32) -> Self {
        Self {
            semester_credits: credits,
            error: None,
        }
    }

    /// A rejected term
    #[must_use]
    pub const fn rejected(reason: TermRejection, credits: u32) -> Self {
        Self {
            semester_credits: credits,
            error: Some(reason),
        }
    }

    /// Whether the term was accepted
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.error.is_none()
    }
}

/// Credits consumed by one term
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemesterCredits {
    /// Term label (e.g., `S1-2025`)
    pub semester: String,
    /// Credits consumed
    pub credits: u32,
}

/// Synthesized remainder of a degree
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// Synthetic terms in order
    pub plan: Vec<SemesterPlan>,
    /// Credits of each synthetic term, parallel to `plan`
    pub credits: Vec<SemesterCredits>,
    /// Courses that could not be scheduled, in catalog order
    pub pending: Vec<String>,
}

impl ProjectionResult {
    /// True when the projection stalled with courses left over
    #[must_use]
    pub fn is_deadlocked(&self) -> bool {
        !self.pending.is_empty()
    }
}

/// Inputs of one projection run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanRequest {
    /// Student whose history is used
    pub student_id: String,
    /// Career whose catalog is used
    pub career_code: String,
    /// Manually entered terms, validated in order
    #[serde(default)]
    pub manual_plan: Vec<SemesterPlan>,
    /// Per-term credit cap
    pub max_credits_per_semester: u32,
    /// Per-term course cap for projected terms
    #[serde(default)]
    pub max_courses_per_semester: Option<u32>,
    /// First projected term when the manual plan is empty
    pub start_term: Term,
    /// Extra courses treated as failed for I/V eligibility
    #[serde(default)]
    pub simulated_fails: Vec<String>,
}

impl PlanRequest {
    /// Create a request with an empty manual plan and no course cap
    #[must_use]
    pub fn new(
        student_id: impl Into<String>,
        career_code: impl Into<String>,
        max_credits_per_semester: u32,
        start_term: Term,
    ) -> Self {
        Self {
            student_id: student_id.into(),
            career_code: career_code.into(),
            manual_plan: Vec::new(),
            max_credits_per_semester,
            max_courses_per_semester: None,
            start_term,
            simulated_fails: Vec::new(),
        }
    }

    /// Append a manual term
    #[must_use]
    pub fn with_term(mut self, term: SemesterPlan) -> Self {
        self.manual_plan.push(term);
        self
    }

    /// Set the course cap for projected terms
    #[must_use]
    pub const fn with_max_courses(mut self, max_courses: u32) -> Self {
        self.max_courses_per_semester = Some(max_courses);
        self
    }

    /// Add simulated fails
    #[must_use]
    pub fn with_simulated_fails<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.simulated_fails.extend(codes.into_iter().map(Into::into));
        self
    }
}

/// Final output of a projection run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullProjection {
    /// Label of the last planned term, or [`ALREADY_GRADUATED`]
    pub estimated_graduation: String,
    /// Credits of each manual term
    pub total_credits_per_semester: Vec<SemesterCredits>,
    /// Credits of each projected term
    pub projected_credits_per_semester: Vec<SemesterCredits>,
    /// Manual terms followed by projected terms
    pub full_plan: Vec<SemesterPlan>,
    /// Approved set after simulating the whole plan
    pub approved_courses: BTreeSet<String>,
    /// Courses the projection could not schedule
    pub pending_courses: Vec<String>,
}

impl FullProjection {
    /// Whether every course ended up scheduled or approved
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.pending_courses.is_empty()
    }

    /// One-line status for display
    #[must_use]
    pub fn status_line(&self) -> String {
        if self.is_complete() {
            "plan complete".to_string()
        } else {
            format!(
                "plan incomplete, {} courses pending",
                self.pending_courses.len()
            )
        }
    }

    /// Credits of every term, manual first
    pub fn all_semester_credits(&self) -> impl Iterator<Item = &SemesterCredits> {
        self.total_credits_per_semester
            .iter()
            .chain(&self.projected_credits_per_semester)
    }
}
