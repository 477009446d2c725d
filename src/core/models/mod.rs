//! Data models for `degree_planner`

pub mod catalog;
pub mod course;
pub mod history;
pub mod projection;
pub mod semester;

pub use catalog::Catalog;
pub use course::Course;
pub use history::AcademicHistory;
pub use projection::{
    FullProjection, PlanRequest, ProjectionResult, SemesterCredits, ValidationResult,
    ALREADY_GRADUATED,
};
pub use semester::{Period, SemesterPlan, Term};
