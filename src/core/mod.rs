//! Planning engine: models, validation, projection and data sources

pub mod error;
pub mod models;
pub mod planner;
pub mod progress;
pub mod report;
pub mod sources;

/// Returns the current version of the `degree-planner` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
