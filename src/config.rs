//! Configuration for the `degreeplanner` CLI

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default CLI configuration loaded based on build profile.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Variable expanded to the config directory in string values
pub const DIR_VARIABLE: &str = "$DEGREE_PLANNER";

/// Errors raised while editing or persisting the configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Key is not a known configuration field
    #[error("Unknown config key: '{0}'")]
    UnknownKey(String),

    /// Value could not be converted to the field's type
    #[error("Invalid value for '{key}': '{value}'")]
    InvalidValue {
        /// Config key
        key: String,
        /// Rejected value
        value: String,
    },

    /// File could not be read, written or removed
    #[error("config I/O error: {0}")]
    Io(#[from] io::Error),

    /// TOML could not be parsed
    #[error("invalid config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config could not be rendered as TOML
    #[error("could not serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace, off)
    #[serde(default)]
    pub level: String,
    /// Log file path; empty logs to stderr
    #[serde(default)]
    pub file: String,
    /// Print extra summary lines
    #[serde(default)]
    pub verbose: bool,
}

/// Data locations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory holding `<career>.json` catalogs
    #[serde(default)]
    pub catalogs_dir: String,
    /// JSON file holding every student's academic history
    #[serde(default)]
    pub history_file: String,
    /// Directory for generated Markdown reports
    #[serde(default)]
    pub reports_dir: String,
}

/// Planner defaults used when the command line omits them
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Credit cap per term
    #[serde(default)]
    pub max_credits_per_semester: u32,
    /// Course cap per projected term, 0 for unlimited
    #[serde(default)]
    pub max_courses_per_semester: u32,
    /// First projected term when no manual plan is given, e.g. `S1-2026`
    #[serde(default)]
    pub start_term: String,
}

impl PlannerConfig {
    /// Course cap as an option, `None` when unlimited
    #[must_use]
    pub const fn course_cap(&self) -> Option<u32> {
        match self.max_courses_per_semester {
            0 => None,
            n => Some(n),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Data locations
    #[serde(default)]
    pub paths: PathsConfig,
    /// Planner defaults
    #[serde(default)]
    pub planner: PlannerConfig,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override catalogs directory
    pub catalogs_dir: Option<String>,
    /// Override history file
    pub history_file: Option<String>,
    /// Override reports directory
    pub reports_dir: Option<String>,
}

fn parse_u32(key: &str, value: &str) -> Result<u32, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn fill_if_empty(target: &mut String, default: &str) -> bool {
    if target.is_empty() && !default.is_empty() {
        default.clone_into(target);
        true
    } else {
        false
    }
}

impl Config {
    /// Get the `$DEGREE_PLANNER` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/degreeplanner`
    /// - macOS: `~/Library/Application Support/degreeplanner`
    /// - Windows: `%APPDATA%\degreeplanner`
    #[must_use]
    pub fn get_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("degreeplanner")
    }

    /// Get the user config file path (`config.toml`, or `dconfig.toml` in
    /// debug builds)
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_config_dir().join(CONFIG_FILE_NAME)
    }

    fn expand_variables(value: &str) -> String {
        if value.contains(DIR_VARIABLE) {
            let dir = Self::get_config_dir();
            value.replace(DIR_VARIABLE, &dir.to_string_lossy())
        } else {
            value.to_string()
        }
    }

    /// Fill empty fields from `defaults`.
    ///
    /// Used on load so fields added in newer versions get their default
    /// values while user settings are kept.
    ///
    /// # Returns
    /// `true` if any field changed
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let mut changed = fill_if_empty(&mut self.logging.level, &defaults.logging.level);
        changed |= fill_if_empty(&mut self.logging.file, &defaults.logging.file);
        changed |= fill_if_empty(&mut self.paths.catalogs_dir, &defaults.paths.catalogs_dir);
        changed |= fill_if_empty(&mut self.paths.history_file, &defaults.paths.history_file);
        changed |= fill_if_empty(&mut self.paths.reports_dir, &defaults.paths.reports_dir);
        changed |= fill_if_empty(&mut self.planner.start_term, &defaults.planner.start_term);

        if self.planner.max_credits_per_semester == 0
            && defaults.planner.max_credits_per_semester != 0
        {
            self.planner.max_credits_per_semester = defaults.planner.max_credits_per_semester;
            changed = true;
        }

        changed
    }

    /// Apply CLI-provided overrides for this run only; nothing is persisted
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file.clone_from(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }
        if let Some(dir) = &overrides.catalogs_dir {
            self.paths.catalogs_dir.clone_from(dir);
        }
        if let Some(file) = &overrides.history_file {
            self.paths.history_file.clone_from(file);
        }
        if let Some(dir) = &overrides.reports_dir {
            self.paths.reports_dir.clone_from(dir);
        }
    }

    /// Parse a TOML string, expanding `$DEGREE_PLANNER` in path values.
    ///
    /// Missing sections and fields take their serde defaults.
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] if the TOML does not match the schema
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(toml_str)?;

        config.logging.file = Self::expand_variables(&config.logging.file);
        config.paths.catalogs_dir = Self::expand_variables(&config.paths.catalogs_dir);
        config.paths.history_file = Self::expand_variables(&config.paths.history_file);
        config.paths.reports_dir = Self::expand_variables(&config.paths.reports_dir);

        Ok(config)
    }

    /// Load the compiled-in defaults for the current build profile
    ///
    /// # Panics
    /// Panics if the embedded defaults are not valid TOML, which would be a
    /// build defect.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Load the user configuration, creating it from defaults on first run.
    ///
    /// An existing file has missing fields merged in from defaults and is
    /// re-saved when that changed anything. Unreadable files fall back to
    /// defaults.
    #[must_use]
    pub fn load() -> Self {
        Self::load_from(&Self::get_config_file_path())
    }

    /// Same as [`load`](Self::load) for an explicit file
    #[must_use]
    pub fn load_from(path: &Path) -> Self {
        let defaults = Self::from_defaults();

        if !path.exists() {
            let _ = defaults.save_to(path);
            return defaults;
        }

        match fs::read_to_string(path)
            .map_err(ConfigError::from)
            .and_then(|content| Self::from_toml(&content))
        {
            Ok(mut config) => {
                if config.merge_defaults(&defaults) {
                    let _ = config.save_to(path);
                }
                config
            }
            Err(_) => defaults,
        }
    }

    /// Save to the user config file
    ///
    /// # Errors
    /// Returns an error if the directory or file cannot be written
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::get_config_file_path())
    }

    /// Save to an explicit file, creating its directory
    ///
    /// # Errors
    /// Returns an error if the directory or file cannot be written
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Get a configuration value by key.
    ///
    /// Keys are field names (`level`, `file`, `verbose`, `catalogs_dir`,
    /// `history_file`, `reports_dir`, `max_credits`, `max_courses`,
    /// `start_term`); dashes are accepted in place of underscores.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key.replace('-', "_").as_str() {
            "level" => self.logging.level.clone(),
            "file" => self.logging.file.clone(),
            "verbose" => self.logging.verbose.to_string(),
            "catalogs_dir" => self.paths.catalogs_dir.clone(),
            "history_file" => self.paths.history_file.clone(),
            "reports_dir" => self.paths.reports_dir.clone(),
            "max_credits" | "max_credits_per_semester" => {
                self.planner.max_credits_per_semester.to_string()
            }
            "max_courses" | "max_courses_per_semester" => {
                self.planner.max_courses_per_semester.to_string()
            }
            "start_term" => self.planner.start_term.clone(),
            _ => return None,
        };
        Some(value)
    }

    /// Set a configuration value by key. Call [`save`](Self::save) to persist.
    ///
    /// # Errors
    /// Returns an error for unknown keys or values of the wrong type
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key.replace('-', "_").as_str() {
            "level" => self.logging.level = value.to_string(),
            "file" => self.logging.file = value.to_string(),
            "verbose" => {
                self.logging.verbose =
                    value.parse::<bool>().map_err(|_| ConfigError::InvalidValue {
                        key: key.to_string(),
                        value: value.to_string(),
                    })?;
            }
            "catalogs_dir" => self.paths.catalogs_dir = value.to_string(),
            "history_file" => self.paths.history_file = value.to_string(),
            "reports_dir" => self.paths.reports_dir = value.to_string(),
            "max_credits" | "max_credits_per_semester" => {
                self.planner.max_credits_per_semester = parse_u32(key, value)?;
            }
            "max_courses" | "max_courses_per_semester" => {
                self.planner.max_courses_per_semester = parse_u32(key, value)?;
            }
            "start_term" => self.planner.start_term = value.to_string(),
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }

    /// Reset one key to its value in `defaults`
    ///
    /// # Errors
    /// Returns an error if the key is not recognized
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), ConfigError> {
        match key.replace('-', "_").as_str() {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "catalogs_dir" => self
                .paths
                .catalogs_dir
                .clone_from(&defaults.paths.catalogs_dir),
            "history_file" => self
                .paths
                .history_file
                .clone_from(&defaults.paths.history_file),
            "reports_dir" => self
                .paths
                .reports_dir
                .clone_from(&defaults.paths.reports_dir),
            "max_credits" | "max_credits_per_semester" => {
                self.planner.max_credits_per_semester = defaults.planner.max_credits_per_semester;
            }
            "max_courses" | "max_courses_per_semester" => {
                self.planner.max_courses_per_semester = defaults.planner.max_courses_per_semester;
            }
            "start_term" => self
                .planner
                .start_term
                .clone_from(&defaults.planner.start_term),
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }

    /// Delete the user config file; the next [`load`](Self::load) recreates it
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be removed
    pub fn reset() -> Result<(), ConfigError> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[paths]")?;
        writeln!(f, "  catalogs_dir = \"{}\"", self.paths.catalogs_dir)?;
        writeln!(f, "  history_file = \"{}\"", self.paths.history_file)?;
        writeln!(f, "  reports_dir = \"{}\"", self.paths.reports_dir)?;

        writeln!(f, "\n[planner]")?;
        writeln!(
            f,
            "  max_credits_per_semester = {}",
            self.planner.max_credits_per_semester
        )?;
        writeln!(
            f,
            "  max_courses_per_semester = {}",
            self.planner.max_courses_per_semester
        )?;
        writeln!(f, "  start_term = \"{}\"", self.planner.start_term)?;

        Ok(())
    }
}
