//! Schema readiness checks run before a repository or service binds to a connection.

use super::{RepoError, RepoResult};
use crate::db::migrations::{latest_version, schema_version};
use rusqlite::Connection;

const REQUIRED_COLUMNS: &[(&str, &[&str])] = &[
    ("lists", &["id", "title", "created_at"]),
    (
        "tasks",
        &[
            "id",
            "title",
            "status",
            "list_id",
            "priority",
            "created_at",
            "updated_at",
        ],
    ),
];

/// Verifies `conn` is migrated to the latest schema and carries every
/// table/column the repositories query.
pub fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = schema_version(conn)?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    for &(table, columns) in REQUIRED_COLUMNS {
        let existing = table_columns(conn, table)?;
        if existing.is_empty() {
            return Err(RepoError::MissingRequiredTable(table));
        }
        for &column in columns {
            if !existing.iter().any(|name| name.as_str() == column) {
                return Err(RepoError::MissingRequiredColumn { table, column });
            }
        }
    }

    Ok(())
}

fn table_columns(conn: &Connection, table: &str) -> RepoResult<Vec<String>> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    let mut columns = Vec::new();
    while let Some(row) = rows.next()? {
        columns.push(row.get::<_, String>(1)?);
    }
    Ok(columns)
}
