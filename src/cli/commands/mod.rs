//! CLI command handlers for `degreeplanner`.
//!
//! Each subcommand lives in its own module. Handlers that touch planner data
//! return [`degree_planner::Result`] so `main` can pick the exit code.

pub mod config;
pub mod course;
pub mod history;
pub mod pending;
pub mod project;

use degree_planner::config::Config;
use degree_planner::core::sources::{CatalogCache, JsonCatalogSource, JsonHistoryStore};

/// Catalog source for the configured catalogs directory
pub fn catalog_cache(config: &Config) -> CatalogCache<JsonCatalogSource> {
    CatalogCache::new(JsonCatalogSource::new(&config.paths.catalogs_dir))
}

/// History store for the configured history file
pub fn history_store(config: &Config) -> JsonHistoryStore {
    JsonHistoryStore::new(&config.paths.history_file)
}
