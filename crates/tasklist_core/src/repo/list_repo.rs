//! List repository contract and SQLite implementation.
//!
//! # Invariants
//! - Lists are returned in creation order: `created_at ASC, rowid ASC`.
//! - Each list's tasks are returned in render order: `priority DESC, id ASC`.
//! - `list_all` reads lists and tasks from one read transaction.

use super::task_repo::{parse_task_row, TASK_SELECT_SQL};
use super::{RepoError, RepoResult};
use crate::model::list::{List, ListId, ListView};
use crate::model::task::Task;
use rusqlite::{Connection, Row, Transaction, TransactionBehavior};
use std::collections::HashMap;
use uuid::Uuid;

const LIST_SELECT_SQL: &str = "SELECT id, title, created_at FROM lists";

/// Repository interface for list operations.
pub trait ListRepository {
    /// Creates one list.
    fn create_list(&self, title: &str) -> RepoResult<List>;
    /// Loads one list with its sorted tasks.
    fn get_list_view(&self, id: ListId) -> RepoResult<Option<ListView>>;
    /// Loads every list with its sorted tasks.
    fn list_all(&self) -> RepoResult<Vec<ListView>>;
}

/// SQLite-backed list repository.
pub struct SqliteListRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteListRepository<'conn> {
    /// Creates repository from migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        super::ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl ListRepository for SqliteListRepository<'_> {
    fn create_list(&self, title: &str) -> RepoResult<List> {
        let id = Uuid::new_v4();
        self.conn.execute(
            "INSERT INTO lists (id, title) VALUES (?1, ?2);",
            [id.to_string().as_str(), title],
        )?;
        load_list(self.conn, id)?.ok_or(RepoError::ListNotFound(id))
    }

    fn get_list_view(&self, id: ListId) -> RepoResult<Option<ListView>> {
        load_list_view(self.conn, id)
    }

    fn list_all(&self) -> RepoResult<Vec<ListView>> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Deferred)?;
        let lists = load_all_list_views(&tx)?;
        tx.commit()?;
        Ok(lists)
    }
}

fn load_all_list_views(conn: &Connection) -> RepoResult<Vec<ListView>> {
    let mut stmt =
        conn.prepare(&format!("{LIST_SELECT_SQL} ORDER BY created_at ASC, rowid ASC;"))?;
    let mut rows = stmt.query([])?;
    let mut lists = Vec::new();
    while let Some(row) = rows.next()? {
        lists.push(parse_list_row(row)?);
    }

    let mut tasks_by_list: HashMap<ListId, Vec<Task>> = HashMap::new();
    let mut stmt = conn.prepare(&format!("{TASK_SELECT_SQL} ORDER BY priority DESC, id ASC;"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let task = parse_task_row(row)?;
        tasks_by_list.entry(task.list_id).or_default().push(task);
    }

    Ok(lists
        .into_iter()
        .map(|list| {
            let tasks = tasks_by_list.remove(&list.id).unwrap_or_default();
            ListView::new(list, tasks)
        })
        .collect())
}

fn load_list(conn: &Connection, id: ListId) -> RepoResult<Option<List>> {
    let mut stmt = conn.prepare_cached(&format!("{LIST_SELECT_SQL} WHERE id = ?1;"))?;
    let mut rows = stmt.query([id.to_string()])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(parse_list_row(row)?));
    }
    Ok(None)
}

/// Loads one list joined with its tasks in render order.
pub(crate) fn load_list_view(conn: &Connection, id: ListId) -> RepoResult<Option<ListView>> {
    let Some(list) = load_list(conn, id)? else {
        return Ok(None);
    };

    let mut stmt = conn.prepare_cached(&format!(
        "{TASK_SELECT_SQL}
         WHERE list_id = ?1
         ORDER BY priority DESC, id ASC;"
    ))?;
    let mut rows = stmt.query([id.to_string()])?;
    let mut tasks = Vec::new();
    while let Some(row) = rows.next()? {
        tasks.push(parse_task_row(row)?);
    }
    Ok(Some(ListView::new(list, tasks)))
}

fn parse_list_row(row: &Row<'_>) -> RepoResult<List> {
    let id_text: String = row.get("id")?;
    Ok(List {
        id: parse_uuid(&id_text, "lists.id")?,
        title: row.get("title")?,
        created_at: row.get("created_at")?,
    })
}

pub(crate) fn parse_uuid(value: &str, column: &'static str) -> RepoResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid `{value}` in {column}")))
}
