use rusqlite::Connection;
use tasklist_core::db::migrations::latest_version;
use tasklist_core::db::{open_db, open_db_in_memory, DbError};
use tasklist_core::{OrderingError, OrderingService, RepoError, SqliteListRepository};

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "lists");
    assert_table_exists(&conn, "tasks");
}

#[test]
fn tasks_table_carries_priority_index_and_foreign_keys() {
    let conn = open_db_in_memory().unwrap();

    let index_exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1 FROM sqlite_master
                WHERE type = 'index' AND name = 'idx_tasks_list_priority'
            );",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(index_exists, 1);

    let foreign_keys: i64 = conn
        .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(foreign_keys, 1);

    let err = conn
        .execute(
            "INSERT INTO tasks (id, title, status, list_id, priority)
             VALUES ('t1', 'orphan', 'pending', 'missing-list', 1);",
            [],
        )
        .unwrap_err();
    assert!(err.to_string().contains("FOREIGN KEY"));
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasklist.db");

    let conn_first = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_first), latest_version());
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    assert_table_exists(&conn_second, "tasks");
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn repositories_reject_unmigrated_connections() {
    let conn = Connection::open_in_memory().unwrap();

    let err = SqliteListRepository::try_new(&conn).err().unwrap();
    assert!(matches!(
        err,
        RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        } if expected_version == latest_version()
    ));

    let err = OrderingService::try_new(&conn).err().unwrap();
    assert!(matches!(
        err,
        OrderingError::Repo(RepoError::UninitializedConnection { .. })
    ));
}

#[test]
fn repositories_reject_schema_missing_a_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!(
        "CREATE TABLE lists (id TEXT PRIMARY KEY, title TEXT, created_at INTEGER);
         CREATE TABLE tasks (id TEXT PRIMARY KEY, title TEXT, list_id TEXT, priority INTEGER);
         PRAGMA user_version = {};",
        latest_version()
    ))
    .unwrap();

    let err = SqliteListRepository::try_new(&conn).err().unwrap();
    assert!(matches!(
        err,
        RepoError::MissingRequiredColumn {
            table: "tasks",
            column: "status",
        }
    ));
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
