//! Course model

use serde::{Deserialize, Serialize};

/// Represents a course in a career's curriculum
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Course code, unique within a catalog (e.g., "PRG001")
    pub code: String,

    /// Course name (e.g., "Programación I")
    #[serde(default)]
    pub name: String,

    /// Credit weight (SCT credits)
    pub credits: u32,

    /// Prerequisites - stored as course codes
    #[serde(default)]
    pub prerequisites: Vec<String>,
}

impl Course {
    /// Create a new course without prerequisites
    ///
    /// # Arguments
    /// * `code` - Course code
    /// * `name` - Full course name
    /// * `credits` - Credit weight
    #[must_use]
    pub fn new(code: impl Into<String>, name: impl Into<String>, credits: u32) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            credits,
            prerequisites: Vec::new(),
        }
    }

    /// Builder-style variant of [`add_prerequisite`](Self::add_prerequisite)
    #[must_use]
    pub fn with_prerequisite(mut self, prereq_code: impl Into<String>) -> Self {
        self.add_prerequisite(prereq_code.into());
        self
    }

    /// Add a prerequisite by course code
    pub fn add_prerequisite(&mut self, prereq_code: String) {
        if !self.prerequisites.contains(&prereq_code) {
            self.prerequisites.push(prereq_code);
        }
    }

    /// Whether every prerequisite satisfies `is_approved`
    pub fn prerequisites_met<F>(&self, mut is_approved: F) -> bool
    where
        F: FnMut(&str) -> bool,
    {
        self.prerequisites.iter().all(|p| is_approved(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_creation() {
        let course = Course::new("PRG001", "Programación I", 4);

        assert_eq!(course.code, "PRG001");
        assert_eq!(course.name, "Programación I");
        assert_eq!(course.credits, 4);
        assert!(course.prerequisites.is_empty());
    }

    #[test]
    fn test_add_prerequisite() {
        let mut course = Course::new("PRG002", "Programación II", 4);

        course.add_prerequisite("PRG001".to_string());
        assert_eq!(course.prerequisites, vec!["PRG001".to_string()]);

        // Adding duplicate should not duplicate
        course.add_prerequisite("PRG001".to_string());
        assert_eq!(course.prerequisites.len(), 1);
    }

    #[test]
    fn test_prerequisites_met() {
        let course = Course::new("PRG002", "Programación II", 4)
            .with_prerequisite("PRG001")
            .with_prerequisite("MAT001");

        assert!(course.prerequisites_met(|_| true));
        assert!(!course.prerequisites_met(|code| code == "PRG001"));
        assert!(Course::new("MAT001", "Cálculo I", 3).prerequisites_met(|_| false));
    }

    #[test]
    fn test_deserialize_without_optional_fields() {
        let course: Course = serde_json::from_str(r#"{"code":"ING101","credits":2}"#).unwrap();
        assert_eq!(course.code, "ING101");
        assert!(course.name.is_empty());
        assert!(course.prerequisites.is_empty());
    }
}
