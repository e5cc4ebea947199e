//! Runtime configuration for planner hosts.
//!
//! # Responsibility
//! - Resolve database and logging locations from the environment.
//! - Hold the fixed blob keys under which collections are persisted.
//!
//! # Invariants
//! - Blank environment values are treated as absent.
//! - Resolution never fails; every setting has a default except `log_dir`.

use crate::logging::{default_log_level, init_logging, LoggingError};
use std::path::PathBuf;

/// Blob key holding the serialized task array.
pub const TASKS_KEY: &str = "studyPlanner_tasks";
/// Blob key holding the serialized goal array.
pub const GOALS_KEY: &str = "studyPlanner_goals";

pub const DB_PATH_ENV: &str = "STUDYPLAN_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "STUDYPLAN_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "STUDYPLAN_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "studyplan.sqlite3";

/// Resolved host configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerConfig {
    /// SQLite file backing the blob store.
    pub db_path: PathBuf,
    /// Log level passed to `init_logging`.
    pub log_level: String,
    /// Rolling log directory; logging stays disabled when `None`.
    pub log_dir: Option<PathBuf>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            db_path: std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl PlannerConfig {
    /// Resolves configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves configuration through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let defaults = Self::default();
        Self {
            db_path: non_blank(DB_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or(defaults.db_path),
            log_level: non_blank(LOG_LEVEL_ENV).unwrap_or(defaults.log_level),
            log_dir: non_blank(LOG_DIR_ENV).map(PathBuf::from),
        }
    }

    /// Starts file logging when a log directory is configured.
    ///
    /// Returns `Ok(false)` when logging is disabled by configuration.
    pub fn init_logging(&self) -> Result<bool, LoggingError> {
        let Some(log_dir) = &self.log_dir else {
            return Ok(false);
        };
        init_logging(&self.log_level, &log_dir.to_string_lossy())?;
        Ok(true)
    }
}
