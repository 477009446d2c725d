//! Project command handler

use super::{catalog_cache, history_store};
use degree_planner::config::Config;
use degree_planner::core::error::Result;
use degree_planner::core::models::{FullProjection, PlanRequest, SemesterPlan, Term};
use degree_planner::core::planner::PlanOrchestrator;
use degree_planner::core::report::{ProjectionReporter, ReportContext};
use degree_planner::core::sources::CatalogSource;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Arguments of the `project` subcommand
#[derive(Debug, Clone)]
pub struct ProjectOptions {
    /// Student identifier
    pub student: String,
    /// Career code
    pub career: String,
    /// Manual plan JSON file
    pub plan: Option<PathBuf>,
    /// Credit cap override
    pub max_credits: Option<u32>,
    /// Course cap override
    pub max_courses: Option<u32>,
    /// Start term override
    pub start: Option<Term>,
    /// Courses to treat as failed
    pub retake: Vec<String>,
    /// Report destination; empty for the reports directory
    pub report: Option<String>,
    /// JSON destination
    pub json: Option<PathBuf>,
}

/// Read a manual plan file (a JSON array of terms)
///
/// # Errors
/// Returns an error if the file cannot be read or is not a list of terms
pub fn load_manual_plan(path: &Path) -> Result<Vec<SemesterPlan>> {
    let content = fs::read_to_string(path)?;
    let plan: Vec<SemesterPlan> = serde_json::from_str(&content)?;
    info!("Loaded {} manual terms from {}", plan.len(), path.display());
    Ok(plan)
}

/// Build the request from the options, filling gaps from config
///
/// # Errors
/// Returns an error if the plan file is unreadable or the configured start
/// term cannot be parsed
pub fn build_request(options: &ProjectOptions, config: &Config) -> Result<PlanRequest> {
    let start_term = match options.start {
        Some(term) => term,
        None => config.planner.start_term.parse()?,
    };
    let max_credits = options
        .max_credits
        .unwrap_or(config.planner.max_credits_per_semester);

    let mut request = PlanRequest::new(&options.student, &options.career, max_credits, start_term)
        .with_simulated_fails(options.retake.iter().cloned());
    if let Some(path) = &options.plan {
        request.manual_plan = load_manual_plan(path)?;
    }
    if let Some(max_courses) = options.max_courses.or_else(|| config.planner.course_cap()) {
        request = request.with_max_courses(max_courses);
    }
    Ok(request)
}

/// Run the projection and write the requested outputs
///
/// # Errors
/// Propagates request, planning and output errors
pub fn run(options: &ProjectOptions, config: &Config, verbose: bool) -> Result<()> {
    let request = build_request(options, config)?;
    let catalogs = catalog_cache(config);
    let histories = history_store(config);

    let projection = PlanOrchestrator::new(&catalogs, &histories).generate_projection(&request)?;
    print_summary(&request, &projection, verbose);

    if let Some(path) = &options.json {
        fs::write(path, serde_json::to_string_pretty(&projection)?)?;
        println!("✓ Projection written: {}", path.display());
    }

    if let Some(target) = &options.report {
        let path = report_path(target, config, &request);
        // Already cached by the orchestrator run
        let catalog = catalogs.fetch_catalog(&request.career_code)?;
        let ctx = ReportContext::new(&request.student_id, &projection, &catalog);
        ProjectionReporter::new().generate(&ctx, &path)?;
        println!("✓ Report generated: {}", path.display());
    }

    Ok(())
}

fn report_path(target: &str, config: &Config, request: &PlanRequest) -> PathBuf {
    if target.is_empty() {
        Path::new(&config.paths.reports_dir).join(format!(
            "{}-{}.md",
            request.student_id, request.career_code
        ))
    } else {
        PathBuf::from(target)
    }
}

fn print_summary(request: &PlanRequest, projection: &FullProjection, verbose: bool) {
    println!(
        "✓ Projection for {} ({})",
        request.student_id, request.career_code
    );
    println!(
        "  Estimated graduation: {}",
        projection.estimated_graduation
    );

    for (term, credits) in projection
        .full_plan
        .iter()
        .zip(projection.all_semester_credits())
    {
        println!(
            "  {:<8} {:>3} cr  {}",
            term.label(),
            credits.credits,
            term.courses.join(", ")
        );
    }

    if projection.is_complete() {
        println!("  Status: {}", projection.status_line());
    } else {
        println!(
            "  Status: {} ({})",
            projection.status_line(),
            projection.pending_courses.join(", ")
        );
    }

    if verbose {
        println!(
            "  Manual terms: {}, projected terms: {}",
            projection.total_credits_per_semester.len(),
            projection.projected_credits_per_semester.len()
        );
        println!(
            "  Approved after plan: {} courses",
            projection.approved_courses.len()
        );
    }
}
