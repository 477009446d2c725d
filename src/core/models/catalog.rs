//! Catalog (curriculum) model

use super::Course;
use std::collections::HashMap;
use tracing::warn;

/// Immutable course listing for one career, keyed by course code.
///
/// Courses keep the order in which the curriculum listed them; the
/// projection planner relies on that order to stay deterministic.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// Career code this catalog belongs to
    pub career_code: String,

    /// Courses in curriculum order
    courses: Vec<Course>,

    /// Course code -> position in `courses`
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Create an empty catalog for a career
    #[must_use]
    pub fn new(career_code: impl Into<String>) -> Self {
        Self {
            career_code: career_code.into(),
            courses: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Build a catalog from courses in curriculum order.
    ///
    /// When a code appears more than once the first occurrence wins.
    #[must_use]
    pub fn from_courses<I>(career_code: impl Into<String>, courses: I) -> Self
    where
        I: IntoIterator<Item = Course>,
    {
        let mut catalog = Self::new(career_code);
        for course in courses {
            let code = course.code.clone();
            if !catalog.add_course(course) {
                warn!(
                    "Duplicate course {code} in catalog {}; keeping first entry",
                    catalog.career_code
                );
            }
        }
        catalog
    }

    /// Add a course to the catalog
    ///
    /// # Returns
    /// `true` if the course was added, `false` if a course with that code already exists
    pub fn add_course(&mut self, course: Course) -> bool {
        if self.index.contains_key(&course.code) {
            return false;
        }
        self.index.insert(course.code.clone(), self.courses.len());
        self.courses.push(course);
        true
    }

    /// Get a course by its code
    #[must_use]
    pub fn get_course(&self, code: &str) -> Option<&Course> {
        self.index.get(code).map(|&idx| &self.courses[idx])
    }

    /// Whether the catalog lists `code`
    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.index.contains_key(code)
    }

    /// All courses in curriculum order
    pub fn courses(&self) -> impl Iterator<Item = &Course> {
        self.courses.iter()
    }

    /// All course codes in curriculum order
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.courses.iter().map(|c| c.code.as_str())
    }

    /// Number of courses in the catalog
    #[must_use]
    pub fn total_courses(&self) -> usize {
        self.courses.len()
    }

    /// Sum of credits across the whole curriculum
    #[must_use]
    pub fn total_credits(&self) -> u32 {
        self.courses
            .iter()
            .fold(0, |total: u32, c| total.saturating_add(c.credits))
    }

    /// Validate that every prerequisite references a course in this catalog
    ///
    /// # Errors
    /// Returns `Err` with one message per dangling prerequisite reference
    pub fn validate_prerequisites(&self) -> Result<(), Vec<String>> {
        let invalid: Vec<String> = self
            .courses
            .iter()
            .flat_map(|course| {
                course
                    .prerequisites
                    .iter()
                    .filter(|p| !self.contains(p))
                    .map(move |p| format!("Course '{}': prerequisite '{p}' not found", course.code))
            })
            .collect();

        if invalid.is_empty() {
            Ok(())
        } else {
            Err(invalid)
        }
    }
}
