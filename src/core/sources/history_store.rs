//! Academic history stores

use super::HistoryStore;
use crate::core::error::{PlannerError, Result};
use crate::core::models::AcademicHistory;
use crate::core::progress::ProgressRecord;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, RwLock};
use tracing::{debug, info};

/// History kept in memory for the lifetime of the store
#[derive(Debug, Default)]
pub struct InMemoryHistoryStore {
    records: RwLock<HashMap<String, AcademicHistory>>,
}

impl InMemoryHistoryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with `(student_id, history)` pairs
    #[must_use]
    pub fn seeded<I, S>(seed: I) -> Self
    where
        I: IntoIterator<Item = (S, AcademicHistory)>,
        S: Into<String>,
    {
        Self {
            records: RwLock::new(seed.into_iter().map(|(id, h)| (id.into(), h)).collect()),
        }
    }
}

impl HistoryStore for InMemoryHistoryStore {
    fn get_history(&self, student_id: &str) -> Result<AcademicHistory> {
        info!("Reading academic history of {student_id}");
        let records = self.records.read().map_err(PlannerError::store)?;
        Ok(records.get(student_id).cloned().unwrap_or_default())
    }

    fn set_history(&self, student_id: &str, history: AcademicHistory) -> Result<()> {
        info!("Saving academic history of {student_id}");
        self.records
            .write()
            .map_err(PlannerError::store)?
            .insert(student_id.to_string(), history);
        Ok(())
    }

    fn record_progress(&self, student_id: &str, record: &ProgressRecord) -> Result<AcademicHistory> {
        record.validate()?;
        info!("Recording {} for {student_id}", record.course_code);
        let mut records = self.records.write().map_err(PlannerError::store)?;
        let history = records.entry(student_id.to_string()).or_default();
        record.apply_to(history)?;
        Ok(history.clone())
    }
}

/// History persisted as one JSON object mapping student id to history:
///
/// ```json
/// {"student-123": {"approved": ["MAT001"], "failed": ["FIS001"]}}
/// ```
///
/// A missing file behaves like an empty store.
#[derive(Debug)]
pub struct JsonHistoryStore {
    path: PathBuf,
    // Held across every load/save so read-modify-write cycles in this
    // process do not interleave
    write_lock: Mutex<()>,
}

impl JsonHistoryStore {
    /// Create a store backed by `path`
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// File the store reads and writes
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_all(&self) -> Result<BTreeMap<String, AcademicHistory>> {
        match fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn save_all(&self, records: &BTreeMap<String, AcademicHistory>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, serde_json::to_string_pretty(records)?)?;
        Ok(())
    }
}

impl HistoryStore for JsonHistoryStore {
    fn get_history(&self, student_id: &str) -> Result<AcademicHistory> {
        info!("Reading academic history of {student_id}");
        let _guard = self.write_lock.lock().map_err(PlannerError::store)?;
        let history = self.load_all()?.remove(student_id).unwrap_or_default();
        debug!(
            "History of {student_id}: {} approved, {} failed",
            history.approved.len(),
            history.failed.len()
        );
        Ok(history)
    }

    fn set_history(&self, student_id: &str, history: AcademicHistory) -> Result<()> {
        info!(
            "Saving academic history of {student_id} to {}",
            self.path.display()
        );
        let _guard = self.write_lock.lock().map_err(PlannerError::store)?;
        let mut records = self.load_all()?;
        records.insert(student_id.to_string(), history);
        self.save_all(&records)
    }

    fn record_progress(&self, student_id: &str, record: &ProgressRecord) -> Result<AcademicHistory> {
        record.validate()?;
        info!(
            "Recording {} for {student_id} in {}",
            record.course_code,
            self.path.display()
        );
        let _guard = self.write_lock.lock().map_err(PlannerError::store)?;
        let mut records = self.load_all()?;
        let history = records.entry(student_id.to_string()).or_default();
        record.apply_to(history)?;
        let updated = history.clone();
        self.save_all(&records)?;
        Ok(updated)
    }
}
