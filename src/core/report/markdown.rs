//! Markdown projection report
//!
//! Renders a [`FullProjection`](crate::core::models::FullProjection) as a
//! Markdown document from an embedded template.

use super::ReportContext;
use crate::core::error::Result;
use std::fmt::Write;
use std::fs;
use std::path::Path;
use tracing::info;

/// Embedded Markdown report template
const MARKDOWN_TEMPLATE: &str = include_str!("templates/projection.md");

/// Markdown report generator
#[derive(Debug, Default, Clone, Copy)]
pub struct ProjectionReporter;

impl ProjectionReporter {
    /// Create a new reporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Render the report as a string
    #[must_use]
    pub fn render(&self, ctx: &ReportContext) -> String {
        let projection = ctx.projection;
        let manual_count = projection.total_credits_per_semester.len();
        let projected_count = projection.full_plan.len() - manual_count;

        MARKDOWN_TEMPLATE
            .replace("{{student_id}}", ctx.student_id)
            .replace("{{career_code}}", &ctx.catalog.career_code)
            .replace(
                "{{estimated_graduation}}",
                &projection.estimated_graduation,
            )
            .replace("{{term_count}}", &projection.full_plan.len().to_string())
            .replace("{{manual_count}}", &manual_count.to_string())
            .replace("{{projected_count}}", &projected_count.to_string())
            .replace("{{total_credits}}", &ctx.total_credits().to_string())
            .replace("{{term_schedule}}", &Self::schedule_table(ctx))
            .replace("{{status_line}}", &projection.status_line())
            .replace("{{pending_courses}}", &Self::pending_list(ctx))
    }

    /// Render and write the report to `output_path`, creating its directory
    ///
    /// # Errors
    /// Returns an error if the file cannot be written
    pub fn generate(&self, ctx: &ReportContext, output_path: &Path) -> Result<()> {
        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(output_path, self.render(ctx))?;
        info!("Projection report written to {}", output_path.display());
        Ok(())
    }

    fn schedule_table(ctx: &ReportContext) -> String {
        let projection = ctx.projection;
        if projection.full_plan.is_empty() {
            return "_No terms left to plan._".to_string();
        }

        let manual_count = projection.total_credits_per_semester.len();
        let mut table = String::new();
        table.push_str("| Term | Source | Courses | Credits |\n");
        table.push_str("|---|---|---|---|\n");

        for (index, (term, credits)) in projection
            .full_plan
            .iter()
            .zip(projection.all_semester_credits())
            .enumerate()
        {
            let source = if index < manual_count {
                "manual"
            } else {
                "projected"
            };
            let courses: Vec<String> = term
                .courses
                .iter()
                .map(|code| ctx.course_label(code))
                .collect();
            let _ = writeln!(
                table,
                "| {} | {source} | {} | {} |",
                term.label(),
                courses.join(", "),
                credits.credits
            );
        }

        table
    }

    fn pending_list(ctx: &ReportContext) -> String {
        let pending = &ctx.projection.pending_courses;
        if pending.is_empty() {
            return "All catalog courses are scheduled or approved.".to_string();
        }

        let mut list = String::from(
            "These courses could not be scheduled because their prerequisites can never be met:\n\n",
        );
        for code in pending {
            let _ = writeln!(list, "- {}", ctx.course_label(code));
        }
        list
    }
}
