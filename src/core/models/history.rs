//! Academic history model

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Approved and failed course codes for one student.
///
/// A code may sit in both sets (failed once, approved on a retake). For
/// prerequisite purposes `approved` always wins; `failed` is only consulted
/// to decide whether a course may be taken in an I/V term.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcademicHistory {
    /// Approved course codes
    #[serde(default)]
    pub approved: BTreeSet<String>,
    /// Failed course codes
    #[serde(default)]
    pub failed: BTreeSet<String>,
}

impl AcademicHistory {
    /// Create an empty history
    #[must_use]
    pub const fn new() -> Self {
        Self {
            approved: BTreeSet::new(),
            failed: BTreeSet::new(),
        }
    }

    /// Build a history from plain lists, dropping duplicates
    #[must_use]
    pub fn from_lists<A, F, S>(approved: A, failed: F) -> Self
    where
        A: IntoIterator<Item = S>,
        F: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            approved: approved.into_iter().map(Into::into).collect(),
            failed: failed.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether `code` is approved
    #[must_use]
    pub fn is_approved(&self, code: &str) -> bool {
        self.approved.contains(code)
    }

    /// Whether `code` has been failed at least once
    #[must_use]
    pub fn has_failed(&self, code: &str) -> bool {
        self.failed.contains(code)
    }

    /// True when no course has been recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.approved.is_empty() && self.failed.is_empty()
    }
}
