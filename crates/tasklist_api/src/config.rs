//! Boundary configuration resolved from the environment.
//!
//! | Variable | Meaning | Default |
//! |---|---|---|
//! | `TASKLIST_DB_PATH` | SQLite database file | `<temp>/tasklist.sqlite3` |
//! | `TASKLIST_LOG_LEVEL` | `trace\|debug\|info\|warn\|error` | build-mode default |
//! | `TASKLIST_LOG_DIR` | absolute log directory; unset disables file logging | unset |

use std::path::PathBuf;
use tasklist_core::default_log_level;

pub const DB_PATH_ENV: &str = "TASKLIST_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "TASKLIST_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "TASKLIST_LOG_DIR";
pub const DEFAULT_DB_FILE_NAME: &str = "tasklist.sqlite3";

/// Settings the boundary layer needs before serving a call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    pub log_dir: Option<String>,
}

impl ApiConfig {
    /// Reads the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves settings through `lookup`; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            db_path: read(DB_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME)),
            log_level: read(LOG_LEVEL_ENV).unwrap_or_else(|| default_log_level().to_string()),
            log_dir: read(LOG_DIR_ENV),
        }
    }

    /// Starts file logging when a log directory is configured.
    ///
    /// Returns `Ok(false)` when logging stays disabled.
    pub fn init_logging(&self) -> Result<bool, String> {
        match &self.log_dir {
            Some(dir) => tasklist_core::init_logging(&self.log_level, dir).map(|()| true),
            None => Ok(false),
        }
    }
}
