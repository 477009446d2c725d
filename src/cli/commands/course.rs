//! Course command handler

use super::catalog_cache;
use degree_planner::config::Config;
use degree_planner::core::error::{PlannerError, Result};
use degree_planner::core::models::Course;
use degree_planner::core::sources::{CatalogCache, CatalogSource};

/// Look `code` up in the catalog of `career` only
fn career_course<S: CatalogSource>(
    cache: &CatalogCache<S>,
    career: &str,
    code: &str,
) -> Result<Course> {
    cache
        .get(career)?
        .get_course(code)
        .cloned()
        .ok_or_else(|| PlannerError::UnknownCourse(code.to_string()))
}

/// Print one course of `career`
///
/// # Errors
/// Returns [`PlannerError::UnknownCourse`] when the code is not in the catalog
pub fn run(code: &str, career: &str, config: &Config) -> Result<()> {
    let course = career_course(&catalog_cache(config), career, code)?;

    println!("{} - {}", course.code, course.name);
    println!("  Career:        {career}");
    println!("  Credits:       {}", course.credits);
    if course.prerequisites.is_empty() {
        println!("  Prerequisites: (none)");
    } else {
        println!("  Prerequisites: {}", course.prerequisites.join(", "));
    }
    Ok(())
}
