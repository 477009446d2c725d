//! Process-level catalog cache
//!
//! Catalogs are immutable once loaded, so the cache hands out shared
//! `Arc<Catalog>` handles. Entries are never evicted on their own; callers
//! force a refresh with [`CatalogCache::invalidate`] or [`CatalogCache::clear`].

use super::CatalogSource;
use crate::core::error::{PlannerError, Result};
use crate::core::models::{Catalog, Course};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::{debug, info, warn};

/// Caching wrapper around any [`CatalogSource`]
pub struct CatalogCache<S> {
    source: S,
    entries: RwLock<HashMap<String, Arc<Catalog>>>,
}

impl<S: CatalogSource> CatalogCache<S> {
    /// Wrap `source` with an empty cache
    #[must_use]
    pub fn new(source: S) -> Self {
        Self {
            source,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// The wrapped source
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Catalog for `career_code`, loading it on first use
    ///
    /// # Errors
    /// Propagates the source's error on a cache miss
    pub fn get(&self, career_code: &str) -> Result<Arc<Catalog>> {
        {
            let entries = self.entries.read().map_err(PlannerError::store)?;
            if let Some(catalog) = entries.get(career_code) {
                debug!("Catalog found in cache: {career_code}");
                return Ok(Arc::clone(catalog));
            }
        }

        info!("Catalog cache miss for {career_code}");
        let catalog = self.source.fetch_catalog(career_code)?;

        let mut entries = self.entries.write().map_err(PlannerError::store)?;
        // Another caller may have loaded it meanwhile; keep the first copy.
        let cached = entries
            .entry(career_code.to_string())
            .or_insert_with(|| Arc::clone(&catalog));
        Ok(Arc::clone(cached))
    }

    /// Whether `career_code` is currently cached
    #[must_use]
    pub fn contains(&self, career_code: &str) -> bool {
        self.entries
            .read()
            .is_ok_and(|entries| entries.contains_key(career_code))
    }

    /// Number of cached catalogs
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().map_or(0, |entries| entries.len())
    }

    /// Whether the cache is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop the cached catalog for `career_code`
    ///
    /// # Returns
    /// `true` if an entry was removed
    pub fn invalidate(&self, career_code: &str) -> bool {
        self.entries
            .write()
            .is_ok_and(|mut entries| entries.remove(career_code).is_some())
    }

    /// Drop every cached catalog
    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.clear();
        }
    }

    /// Find a course by code across all cached catalogs
    ///
    /// # Errors
    /// Returns a store error if the cache lock is poisoned
    pub fn find_course(&self, course_code: &str) -> Result<Option<Course>> {
        let entries = self.entries.read().map_err(PlannerError::store)?;
        let found = entries
            .values()
            .find_map(|catalog| catalog.get_course(course_code))
            .cloned();

        if found.is_none() {
            warn!("Course {course_code} not found in any cached catalog");
        }
        Ok(found)
    }

    /// Credits of a course across cached catalogs, 0 when unknown
    #[must_use]
    pub fn course_credits(&self, course_code: &str) -> u32 {
        self.find_course(course_code)
            .ok()
            .flatten()
            .map_or(0, |course| course.credits)
    }
}

impl<S: CatalogSource> CatalogSource for CatalogCache<S> {
    fn fetch_catalog(&self, career_code: &str) -> Result<Arc<Catalog>> {
        self.get(career_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Source that counts how often it is hit
    struct CountingSource {
        hits: AtomicUsize,
    }

    impl CatalogSource for CountingSource {
        fn fetch_catalog(&self, career_code: &str) -> Result<Arc<Catalog>> {
            self.hits.fetch_add(1, Ordering::SeqCst);
            if career_code == "ICCI" {
                Ok(Arc::new(Catalog::from_courses(
                    "ICCI",
                    vec![Course::new("MAT001", "Cálculo I", 6)],
                )))
            } else {
                Err(PlannerError::UnknownCareer(career_code.to_string()))
            }
        }
    }

    fn cache() -> CatalogCache<CountingSource> {
        CatalogCache::new(CountingSource {
            hits: AtomicUsize::new(0),
        })
    }

    #[test]
    fn test_second_lookup_is_served_from_cache() {
        let cache = cache();
        let first = cache.get("ICCI").unwrap();
        let second = cache.get("ICCI").unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.source().hits.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_invalidate_forces_refresh() {
        let cache = cache();
        let _ = cache.get("ICCI").unwrap();
        assert!(cache.invalidate("ICCI"));
        assert!(!cache.contains("ICCI"));
        let _ = cache.get("ICCI").unwrap();
        assert_eq!(cache.source().hits.load(Ordering::SeqCst), 2);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_unknown_career_is_not_cached() {
        let cache = cache();
        assert!(matches!(cache.get("XX"), Err(PlannerError::UnknownCareer(_))));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_course_lookup_across_cached_catalogs() {
        let cache = cache();
        assert_eq!(cache.course_credits("MAT001"), 0);

        let _ = cache.get("ICCI").unwrap();
        assert_eq!(cache.find_course("MAT001").unwrap().map(|c| c.credits), Some(6));
        assert_eq!(cache.course_credits("MAT001"), 6);
        assert!(cache.find_course("FIS001").unwrap().is_none());
    }
}
