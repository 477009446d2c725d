//! Collaborators that feed the planner with catalogs and academic history
//!
//! The planner itself performs no I/O; it receives whatever these traits
//! return. Implementations decide where the data lives (JSON files, memory)
//! and own the consistency of their stores.

pub mod catalog_cache;
pub mod catalog_source;
pub mod history_store;

pub use catalog_cache::CatalogCache;
pub use catalog_source::{JsonCatalogSource, StaticCatalogSource};
pub use history_store::{InMemoryHistoryStore, JsonHistoryStore};

use crate::core::error::Result;
use crate::core::models::{AcademicHistory, Catalog};
use crate::core::progress::ProgressRecord;
use std::sync::Arc;

/// Source of career catalogs
pub trait CatalogSource: Send + Sync {
    /// Fetch the full catalog for `career_code`
    ///
    /// # Errors
    /// Returns [`PlannerError::UnknownCareer`](crate::core::error::PlannerError::UnknownCareer)
    /// when the career does not exist, or a transport error when the catalog
    /// cannot be read
    fn fetch_catalog(&self, career_code: &str) -> Result<Arc<Catalog>>;
}

/// Read/write access to students' academic history
pub trait HistoryStore: Send + Sync {
    /// History of `student_id`; empty when the student has none recorded
    ///
    /// # Errors
    /// Returns an error only when the store itself cannot be read
    fn get_history(&self, student_id: &str) -> Result<AcademicHistory>;

    /// Replace the history of `student_id`
    ///
    /// # Errors
    /// Returns an error when the store cannot be updated
    fn set_history(&self, student_id: &str, history: AcademicHistory) -> Result<()>;

    /// Apply one progress record to the student's history and return the
    /// updated history
    ///
    /// The provided body reads and writes in two steps; stores shared
    /// between threads override it to do both under one lock.
    ///
    /// # Errors
    /// Returns [`PlannerError::InvalidProgress`](crate::core::error::PlannerError::InvalidProgress)
    /// for out-of-range records, or a store error
    fn record_progress(&self, student_id: &str, record: &ProgressRecord) -> Result<AcademicHistory> {
        let mut history = self.get_history(student_id)?;
        record.apply_to(&mut history)?;
        self.set_history(student_id, history.clone())?;
        Ok(history)
    }
}
