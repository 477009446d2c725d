//! Pending command handler

use super::{catalog_cache, history_store};
use degree_planner::config::Config;
use degree_planner::core::error::Result;
use degree_planner::core::planner::PlanOrchestrator;
use degree_planner::core::sources::CatalogSource;

/// Print the courses `student` still has to approve in `career`
///
/// # Errors
/// Propagates catalog and history errors
pub fn run(student: &str, career: &str, config: &Config, verbose: bool) -> Result<()> {
    let catalogs = catalog_cache(config);
    let histories = history_store(config);
    let pending = PlanOrchestrator::new(&catalogs, &histories).pending_courses(student, career)?;

    if pending.is_empty() {
        println!("✓ {student} has no pending courses in {career}");
        return Ok(());
    }

    println!("Pending courses for {student} ({career}): {}", pending.len());
    let catalog = catalogs.fetch_catalog(career)?;
    let mut credits = 0;
    for code in &pending {
        match catalog.get_course(code) {
            Some(course) => {
                credits += course.credits;
                println!("  {code:<10} {:>2} cr  {}", course.credits, course.name);
            }
            None => println!("  {code}"),
        }
    }
    if verbose {
        println!("  Total pending credits: {credits}");
    }
    Ok(())
}
