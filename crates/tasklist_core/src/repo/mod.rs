//! Repository layer: the ordered collection store behind the services.
//!
//! # Responsibility
//! - Define the data access contracts the ordering logic runs against.
//! - Keep SQL, row parsing and schema checks inside the repository boundary.
//!
//! # Invariants
//! - Repositories only bind to connections migrated to the latest schema.
//! - Reads reject malformed persisted rows instead of masking them.
//! - Repositories never open transactions themselves; callers hand them a
//!   connection or an open transaction and own commit/rollback.

use crate::db::DbError;
use crate::model::list::ListId;
use crate::model::task::TaskId;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod list_repo;
mod schema;
pub mod task_repo;

pub use schema::ensure_connection_ready;

/// Result type used by list/task repository operations.
pub type RepoResult<T> = Result<T, RepoError>;

/// Errors from list/task repository operations.
#[derive(Debug)]
pub enum RepoError {
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// Task row does not exist.
    TaskNotFound(TaskId),
    /// List row does not exist.
    ListNotFound(ListId),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
    /// Required column is missing from expected table.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    /// Persisted data cannot be converted to a valid read model.
    InvalidData(String),
}

impl RepoError {
    /// Returns whether the failure came from lock contention on the store.
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Db(err) if err.is_busy())
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::TaskNotFound(id) => write!(f, "task not found: {id}"),
            Self::ListNotFound(id) => write!(f, "list not found: {id}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "task repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "task repository requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "task repository requires column `{column}` in table `{table}`"
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}
