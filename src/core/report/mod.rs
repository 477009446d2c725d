//! Report generation for degree projections

pub mod markdown;

pub use markdown::ProjectionReporter;

use crate::core::models::{Catalog, FullProjection};

/// Data needed to render a projection report
#[derive(Debug, Clone, Copy)]
pub struct ReportContext<'a> {
    /// Student the projection belongs to
    pub student_id: &'a str,
    /// Projection to render
    pub projection: &'a FullProjection,
    /// Catalog used for course names and credits
    pub catalog: &'a Catalog,
}

impl<'a> ReportContext<'a> {
    /// Create a new report context
    #[must_use]
    pub const fn new(
        student_id: &'a str,
        projection: &'a FullProjection,
        catalog: &'a Catalog,
    ) -> Self {
        Self {
            student_id,
            projection,
            catalog,
        }
    }

    /// Display name for a course code, `CODE - Name` when the name is known
    #[must_use]
    pub fn course_label(&self, code: &str) -> String {
        match self.catalog.get_course(code) {
            Some(course) if !course.name.is_empty() => format!("{code} - {}", course.name),
            _ => code.to_string(),
        }
    }

    /// Credits over every planned term
    #[must_use]
    pub fn total_credits(&self) -> u32 {
        self.projection
            .all_semester_credits()
            .map(|entry| entry.credits)
            .sum()
    }
}
