//! Configuration loaded from environment variables.
//!
//! All settings have defaults so the library works with zero configuration
//! for local development.

use std::path::PathBuf;

/// Health tracker configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerConfig {
    /// SQLite database file.
    /// Env: `HEALTH_TRACKER_DB_PATH`
    /// Default: `./health_tracker.db`
    pub database_path: PathBuf,

    /// Directory for rotating log files. Console only when unset.
    /// Env: `HEALTH_TRACKER_LOG_DIR`
    pub log_dir: Option<PathBuf>,

    /// Log file name prefix.
    /// Env: `HEALTH_TRACKER_LOG_PREFIX`
    /// Default: `health_tracker`
    pub log_file_prefix: String,

    /// Number of daily log files kept.
    /// Env: `HEALTH_TRACKER_LOG_MAX_FILES`
    /// Default: `7`
    pub log_max_files: usize,

    /// Filter directives used when `RUST_LOG` is unset.
    /// Env: `HEALTH_TRACKER_LOG`
    /// Default: `info,health_tracker_core=debug`
    pub log_filter: String,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("./health_tracker.db"),
            log_dir: None,
            log_file_prefix: "health_tracker".to_string(),
            log_max_files: 7,
            log_filter: "info,health_tracker_core=debug".to_string(),
        }
    }
}

impl TrackerConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup("HEALTH_TRACKER_DB_PATH") {
            if !path.is_empty() {
                config.database_path = PathBuf::from(path);
            }
        }

        if let Some(dir) = lookup("HEALTH_TRACKER_LOG_DIR") {
            if !dir.is_empty() {
                config.log_dir = Some(PathBuf::from(dir));
            }
        }

        if let Some(prefix) = lookup("HEALTH_TRACKER_LOG_PREFIX") {
            if !prefix.is_empty() {
                config.log_file_prefix = prefix;
            }
        }

        if let Some(val) = lookup("HEALTH_TRACKER_LOG_MAX_FILES") {
            match val.parse::<usize>() {
                Ok(n) if n > 0 => config.log_max_files = n,
                _ => {
                    tracing::warn!(
                        value = %val,
                        "Invalid HEALTH_TRACKER_LOG_MAX_FILES, using default"
                    );
                }
            }
        }

        if let Some(filter) = lookup("HEALTH_TRACKER_LOG") {
            if !filter.is_empty() {
                config.log_filter = filter;
            }
        }

        config
    }
}
