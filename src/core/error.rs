//! Error types for planning operations

use std::fmt;
use thiserror::Error;

/// Result type for planning operations
pub type Result<T> = std::result::Result<T, PlannerError>;

/// Why a manually entered term was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TermRejection {
    /// The course is not part of the career's catalog
    UnknownCourse {
        /// Offending course code
        course: String,
    },
    /// A prerequisite had not been approved before the term
    MissingPrerequisite {
        /// Prerequisite that is missing
        prerequisite: String,
        /// Course that requires it
        course: String,
    },
    /// A first attempt was placed in an I/V term
    RetakeOnly {
        /// Offending course code
        course: String,
    },
    /// The term's credits exceed the per-semester cap
    CreditCapExceeded {
        /// Credits the term would consume
        credits: u32,
        /// Cap supplied by the caller
        max: u32,
    },
}

impl fmt::Display for TermRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownCourse { course } => write!(f, "course {course} does not exist"),
            Self::MissingPrerequisite {
                prerequisite,
                course,
            } => write!(f, "missing prerequisite {prerequisite} for {course}"),
            Self::RetakeOnly { course } => write!(
                f,
                "only retakes allowed in I/V ({course} has not been failed)"
            ),
            Self::CreditCapExceeded { credits, max } => {
                write!(f, "exceeds credit cap ({credits} > {max})")
            }
        }
    }
}

/// Planner error types
#[derive(Error, Debug)]
pub enum PlannerError {
    /// A manual term failed validation; the whole plan is rejected
    #[error("invalid term {term}: {reason}")]
    InvalidTerm {
        /// Label of the failing term (e.g., `S1-2025`)
        term: String,
        /// Specific rule that failed
        reason: TermRejection,
    },

    /// The catalog collaborator does not know the career code
    #[error("career not found: {0}")]
    UnknownCareer(String),

    /// A course lookup outside of term validation failed
    #[error("course not found: {0}")]
    UnknownCourse(String),

    /// A progress record is out of range
    #[error("invalid progress record: {0}")]
    InvalidProgress(String),

    /// A term label could not be parsed
    #[error("invalid term label: '{0}' (expected e.g. S1-2025)")]
    InvalidTermLabel(String),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A store could not be read or updated
    #[error("store error: {0}")]
    Store(String),
}

impl PlannerError {
    /// Create a store error
    pub fn store<E: fmt::Display>(err: E) -> Self {
        Self::Store(err.to_string())
    }

    /// Whether the failure is caused by the caller's input (4xx-style)
    /// rather than by the environment
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidTerm { .. }
                | Self::UnknownCareer(_)
                | Self::UnknownCourse(_)
                | Self::InvalidProgress(_)
                | Self::InvalidTermLabel(_)
        )
    }
}
