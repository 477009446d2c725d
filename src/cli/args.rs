//! CLI argument definitions for `degreeplanner`

use clap::{builder::BoolishValueParser, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use degree_planner::config::ConfigOverrides;
use degree_planner::core::models::{Period, Term};
use degree_planner::core::progress::CourseStatus;

/// CLI log level argument
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
    /// Trace-level logging
    Trace,
    /// No logging
    Off,
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let as_str = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
            Self::Off => "off",
        };
        write!(f, "{as_str}")
    }
}

/// Result of a recorded course
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum StatusArg {
    /// Course passed
    Approved,
    /// Course failed
    Failed,
}

impl From<StatusArg> for CourseStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Approved => Self::Approved,
            StatusArg::Failed => Self::Failed,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    Get {
        /// Optional configuration key (e.g., `level`, `catalogs_dir`, `max_credits`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Reset one configuration value to its default.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum HistorySubcommand {
    /// Show a student's approved and failed courses
    Show {
        /// Student identifier
        #[arg(long)]
        student: String,
    },
    /// Replace a student's history
    Set {
        /// Student identifier
        #[arg(long)]
        student: String,
        /// Approved course codes (comma separated)
        #[arg(long, value_delimiter = ',', value_name = "CODES")]
        approved: Vec<String>,
        /// Failed course codes (comma separated)
        #[arg(long, value_delimiter = ',', value_name = "CODES")]
        failed: Vec<String>,
    },
    /// Record the result of one course
    Record {
        /// Student identifier
        #[arg(long)]
        student: String,
        /// Course code
        #[arg(long)]
        course: String,
        /// Result of the course
        #[arg(long, value_enum)]
        status: StatusArg,
        /// Final grade times ten (10-70)
        #[arg(long)]
        grade: Option<u8>,
        /// Year the course was taken
        #[arg(long)]
        year: i32,
        /// Period the course was taken in (S1, S2, I, V)
        #[arg(long)]
        period: Period,
    },
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Validate a manual plan and project the remaining courses.
    Project {
        /// Student identifier
        #[arg(long)]
        student: String,

        /// Career code of the catalog to plan against
        #[arg(long)]
        career: String,

        /// JSON file with the manual plan: `[{"period":"S1","year":2025,"courses":[...]}]`
        #[arg(long, value_name = "FILE")]
        plan: Option<PathBuf>,

        /// Credit cap per term (defaults to config `max_credits_per_semester`)
        #[arg(long, value_name = "CREDITS")]
        max_credits: Option<u32>,

        /// Course cap per projected term (defaults to config `max_courses_per_semester`)
        #[arg(long, value_name = "COUNT")]
        max_courses: Option<u32>,

        /// First projected term when the plan is empty, e.g. `S1-2026`
        #[arg(long, value_name = "TERM")]
        start: Option<Term>,

        /// Courses to treat as failed for intersession/summer eligibility
        #[arg(long, value_delimiter = ',', value_name = "CODES")]
        retake: Vec<String>,

        /// Write a Markdown report; without a path it goes to the reports directory
        #[arg(long, value_name = "FILE", num_args = 0..=1, default_missing_value = "")]
        report: Option<String>,

        /// Write the full projection as JSON
        #[arg(long, value_name = "FILE")]
        json: Option<PathBuf>,
    },
    /// List catalog courses the student has not approved yet.
    Pending {
        /// Student identifier
        #[arg(long)]
        student: String,
        /// Career code
        #[arg(long)]
        career: String,
    },
    /// Inspect or edit academic histories.
    History {
        #[command(subcommand)]
        subcommand: HistorySubcommand,
    },
    /// Show one course of a career catalog.
    Course {
        /// Course code
        #[arg(value_name = "CODE")]
        code: String,
        /// Career code
        #[arg(long)]
        career: String,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "degreeplanner",
    about = "Validate semester plans and project degree completion",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level. Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Override the catalogs directory
    #[arg(long = "catalogs-dir", value_name = "DIR")]
    pub catalogs_dir: Option<PathBuf>,

    /// Override the history file
    #[arg(long = "history-file", value_name = "PATH")]
    pub history_file: Option<PathBuf>,

    /// Override the reports directory
    #[arg(long = "reports-dir", value_name = "DIR")]
    pub reports_dir: Option<PathBuf>,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

fn path_string(path: Option<&PathBuf>) -> Option<String> {
    path.map(|p| p.to_string_lossy().to_string())
}

impl Cli {
    /// Convert CLI flags into config overrides; `None` means no override
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string()),
            file: path_string(self.config_log_file.as_ref()),
            verbose: self.config_verbose,
            catalogs_dir: path_string(self.catalogs_dir.as_ref()),
            history_file: path_string(self.history_file.as_ref()),
            reports_dir: path_string(self.reports_dir.as_ref()),
        }
    }

    /// Runtime log level: `--log-level`, then `--debug`, then `configured`,
    /// then `warn`
    pub fn effective_log_level(&self, configured: &str) -> String {
        if let Some(level) = self.log_level {
            return level.to_string();
        }
        if self.debug_flag {
            return LogLevelArg::Debug.to_string();
        }
        if configured.trim().is_empty() {
            LogLevelArg::Warn.to_string()
        } else {
            configured.trim().to_ascii_lowercase()
        }
    }
}
