//! Catalog sources backed by JSON files or memory

use super::CatalogSource;
use crate::core::error::{PlannerError, Result};
use crate::core::models::{Catalog, Course};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Reads `<dir>/<career_code>.json`, a JSON array of courses in curriculum order:
///
/// ```json
/// [
///   {"code": "MAT001", "name": "Cálculo I", "credits": 6, "prerequisites": []},
///   {"code": "MAT002", "name": "Cálculo II", "credits": 6, "prerequisites": ["MAT001"]}
/// ]
/// ```
#[derive(Debug, Clone)]
pub struct JsonCatalogSource {
    dir: PathBuf,
}

impl JsonCatalogSource {
    /// Create a source reading catalogs from `dir`
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory catalogs are read from
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the catalog file for `career_code`, or `None` when the code
    /// could escape the catalog directory
    fn catalog_path(&self, career_code: &str) -> Option<PathBuf> {
        let well_formed = !career_code.is_empty()
            && career_code
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        well_formed.then(|| self.dir.join(format!("{career_code}.json")))
    }
}

impl CatalogSource for JsonCatalogSource {
    fn fetch_catalog(&self, career_code: &str) -> Result<Arc<Catalog>> {
        let path = self
            .catalog_path(career_code)
            .ok_or_else(|| PlannerError::UnknownCareer(career_code.to_string()))?;

        info!("Reading catalog for {career_code} from {}", path.display());
        let content = fs::read_to_string(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => PlannerError::UnknownCareer(career_code.to_string()),
            _ => PlannerError::Io(e),
        })?;

        let courses: Vec<Course> = serde_json::from_str(&content)?;
        let catalog = Catalog::from_courses(career_code, courses);
        debug!(
            "Catalog {career_code} loaded with {} courses",
            catalog.total_courses()
        );
        Ok(Arc::new(catalog))
    }
}

/// In-memory catalogs, keyed by career code
#[derive(Debug, Clone, Default)]
pub struct StaticCatalogSource {
    catalogs: HashMap<String, Arc<Catalog>>,
}

impl StaticCatalogSource {
    /// Create an empty source
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a catalog under its career code
    #[must_use]
    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.insert(catalog);
        self
    }

    /// Register or replace a catalog under its career code
    pub fn insert(&mut self, catalog: Catalog) {
        self.catalogs
            .insert(catalog.career_code.clone(), Arc::new(catalog));
    }
}

impl CatalogSource for StaticCatalogSource {
    fn fetch_catalog(&self, career_code: &str) -> Result<Arc<Catalog>> {
        self.catalogs
            .get(career_code)
            .cloned()
            .ok_or_else(|| PlannerError::UnknownCareer(career_code.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_json_source_reads_catalog_in_order() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("ICCI.json"),
            r#"[
                {"code": "PRG001", "name": "Programación I", "credits": 4},
                {"code": "MAT001", "name": "Cálculo I", "credits": 3},
                {"code": "PRG002", "name": "Programación II", "credits": 4, "prerequisites": ["PRG001"]}
            ]"#,
        )
        .unwrap();

        let source = JsonCatalogSource::new(dir.path());
        let catalog = source.fetch_catalog("ICCI").unwrap();

        assert_eq!(catalog.career_code, "ICCI");
        assert_eq!(catalog.codes().collect::<Vec<_>>(), vec!["PRG001", "MAT001", "PRG002"]);
        assert_eq!(
            catalog.get_course("PRG002").unwrap().prerequisites,
            vec!["PRG001".to_string()]
        );
    }

    #[test]
    fn test_json_source_unknown_career() {
        let dir = TempDir::new().unwrap();
        let source = JsonCatalogSource::new(dir.path());

        assert!(matches!(
            source.fetch_catalog("NOPE"),
            Err(PlannerError::UnknownCareer(code)) if code == "NOPE"
        ));
        assert!(matches!(
            source.fetch_catalog("../etc/passwd"),
            Err(PlannerError::UnknownCareer(_))
        ));
    }

    #[test]
    fn test_json_source_malformed_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("BAD.json"), "{not json").unwrap();
        let source = JsonCatalogSource::new(dir.path());

        let err = source.fetch_catalog("BAD").unwrap_err();
        assert!(matches!(err, PlannerError::Json(_)));
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_static_source() {
        let source = StaticCatalogSource::new()
            .with_catalog(Catalog::from_courses("ICCI", vec![Course::new("MAT001", "Cálculo I", 3)]));

        assert_eq!(source.fetch_catalog("ICCI").unwrap().total_courses(), 1);
        assert!(source.fetch_catalog("ICI").is_err());
    }
}
