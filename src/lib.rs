//! Degree planning engine
//!
//! Validates a student's hand-written semester plan against a career
//! catalog and projects the remaining courses into future terms.

pub mod config;
pub mod core;
pub mod logging;

pub use crate::core::error::{PlannerError, Result, TermRejection};
pub use crate::core::get_version;
pub use crate::core::models::{
    AcademicHistory, Catalog, Course, FullProjection, Period, PlanRequest, SemesterPlan, Term,
};
pub use crate::core::planner::{simulate, PlanOrchestrator};
