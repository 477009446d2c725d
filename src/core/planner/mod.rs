//! Semester-plan validation and forward projection

pub mod orchestrator;
pub mod projection;
pub mod validator;

pub use orchestrator::{simulate, PlanOrchestrator};
pub use projection::{ProjectionConfig, ProjectionPlanner};
pub use validator::validate_semester;
