//! Task repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Expose the store primitives the ordering logic is built from: find one,
//!   find top-of-list, range shift, create, partial update, set priority.
//! - Load the joined task/list view returned to callers.
//!
//! # Invariants
//! - Shifts are range predicates evaluated by the store, never positional
//!   arithmetic over an in-memory copy of the list.
//! - Task listings are deterministic: `priority DESC, id ASC`.
//! - No method here opens or commits a transaction.

use super::list_repo::{load_list_view, parse_uuid};
use super::{RepoError, RepoResult};
use crate::model::list::{ListId, TaskView};
use crate::model::task::{Task, TaskId, TaskPatch, TaskStatus};
use rusqlite::{params, Connection, OptionalExtension, Row};
use uuid::Uuid;

pub(crate) const TASK_SELECT_SQL: &str = "SELECT
    id,
    title,
    status,
    list_id,
    priority,
    created_at,
    updated_at
FROM tasks";

/// Priority window selected by a shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriorityRange {
    /// `priority >= bound`
    AtLeast(i64),
    /// `priority <= bound`
    AtMost(i64),
}

impl PriorityRange {
    pub fn contains(self, priority: i64) -> bool {
        match self {
            Self::AtLeast(bound) => priority >= bound,
            Self::AtMost(bound) => priority <= bound,
        }
    }
}

/// Insert payload for a task whose id the store assigns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub list_id: ListId,
    pub title: String,
    pub status: TaskStatus,
    pub priority: i64,
}

/// Store primitives for one list-scoped ordered collection of tasks.
///
/// Implementations are bound to a single connection or open transaction;
/// every call observes the writes of earlier calls on the same handle.
pub trait TaskRepository {
    /// Returns whether a list row exists.
    fn list_exists(&self, list_id: ListId) -> RepoResult<bool>;
    /// Loads one task by id.
    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>>;
    /// Loads the highest-priority task of a list, if any.
    fn top_task(&self, list_id: ListId) -> RepoResult<Option<Task>>;
    /// Loads the lowest-priority task of a list, if any.
    fn bottom_task(&self, list_id: ListId) -> RepoResult<Option<Task>>;
    /// Inserts one task and returns the stored row.
    fn insert_task(&self, new_task: &NewTask) -> RepoResult<Task>;
    /// Writes only the `Some` fields of `patch`.
    fn patch_task(&self, id: TaskId, patch: &TaskPatch) -> RepoResult<Task>;
    /// Adds `delta` to the priority of every task of `list_id` inside `range`.
    ///
    /// Returns the number of rows shifted.
    fn shift_priorities(
        &self,
        list_id: ListId,
        range: PriorityRange,
        delta: i64,
    ) -> RepoResult<usize>;
    /// Overwrites one task's priority.
    fn set_priority(&self, id: TaskId, priority: i64) -> RepoResult<()>;
    /// Loads one task joined with its list and the list's sorted tasks.
    fn load_task_view(&self, id: TaskId) -> RepoResult<TaskView>;
}

/// SQLite-backed task repository.
///
/// Bind it to a `rusqlite::Transaction` (which derefs to `Connection`) to get
/// read-your-writes across a multi-step ordering operation.
pub struct SqliteTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    /// Binds to a connection that is already known to be migrated.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn list_exists(&self, list_id: ListId) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM lists WHERE id = ?1);",
            [list_id.to_string()],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>> {
        let mut stmt = self
            .conn
            .prepare_cached(&format!("{TASK_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_task_row(row)?));
        }
        Ok(None)
    }

    fn top_task(&self, list_id: ListId) -> RepoResult<Option<Task>> {
        load_edge_task(self.conn, list_id, "priority DESC, id ASC")
    }

    fn bottom_task(&self, list_id: ListId) -> RepoResult<Option<Task>> {
        load_edge_task(self.conn, list_id, "priority ASC, id DESC")
    }

    fn insert_task(&self, new_task: &NewTask) -> RepoResult<Task> {
        let id = Uuid::new_v4();
        self.conn.execute(
            "INSERT INTO tasks (id, title, status, list_id, priority)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                id.to_string(),
                new_task.title.as_str(),
                new_task.status.as_db_str(),
                new_task.list_id.to_string(),
                new_task.priority,
            ],
        )?;
        load_required_task(self.conn, id)
    }

    fn patch_task(&self, id: TaskId, patch: &TaskPatch) -> RepoResult<Task> {
        if patch.is_empty() {
            return load_required_task(self.conn, id);
        }

        let changed = self.conn.execute(
            "UPDATE tasks
             SET title = COALESCE(?2, title),
                 status = COALESCE(?3, status),
                 updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?1;",
            params![
                id.to_string(),
                patch.title.as_deref(),
                patch.status.map(TaskStatus::as_db_str),
            ],
        )?;
        if changed == 0 {
            return Err(RepoError::TaskNotFound(id));
        }
        load_required_task(self.conn, id)
    }

    fn shift_priorities(
        &self,
        list_id: ListId,
        range: PriorityRange,
        delta: i64,
    ) -> RepoResult<usize> {
        let sql = match range {
            PriorityRange::AtLeast(_) => {
                "UPDATE tasks
                 SET priority = priority + ?3,
                     updated_at = (strftime('%s', 'now') * 1000)
                 WHERE list_id = ?1
                   AND priority >= ?2;"
            }
            PriorityRange::AtMost(_) => {
                "UPDATE tasks
                 SET priority = priority + ?3,
                     updated_at = (strftime('%s', 'now') * 1000)
                 WHERE list_id = ?1
                   AND priority <= ?2;"
            }
        };
        let bound = match range {
            PriorityRange::AtLeast(bound) | PriorityRange::AtMost(bound) => bound,
        };
        let shifted = self
            .conn
            .execute(sql, params![list_id.to_string(), bound, delta])?;
        Ok(shifted)
    }

    fn set_priority(&self, id: TaskId, priority: i64) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE tasks
             SET priority = ?2,
                 updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?1;",
            params![id.to_string(), priority],
        )?;
        if changed == 0 {
            return Err(RepoError::TaskNotFound(id));
        }
        Ok(())
    }

    fn load_task_view(&self, id: TaskId) -> RepoResult<TaskView> {
        let task = load_required_task(self.conn, id)?;
        let list = load_list_view(self.conn, task.list_id)?
            .ok_or(RepoError::ListNotFound(task.list_id))?;
        Ok(TaskView { task, list })
    }
}

fn load_edge_task(
    conn: &Connection,
    list_id: ListId,
    order_by: &str,
) -> RepoResult<Option<Task>> {
    let mut stmt = conn.prepare_cached(&format!(
        "{TASK_SELECT_SQL}
         WHERE list_id = ?1
         ORDER BY {order_by}
         LIMIT 1;"
    ))?;
    let mut rows = stmt.query([list_id.to_string()])?;
    if let Some(row) = rows.next()? {
        return Ok(Some(parse_task_row(row)?));
    }
    Ok(None)
}

fn load_required_task(conn: &Connection, id: TaskId) -> RepoResult<Task> {
    let task: Option<Task> = conn
        .query_row(
            &format!("{TASK_SELECT_SQL} WHERE id = ?1;"),
            [id.to_string()],
            |row| Ok(parse_task_row(row)),
        )
        .optional()?
        .transpose()?;
    task.ok_or(RepoError::TaskNotFound(id))
}

pub(crate) fn parse_task_row(row: &Row<'_>) -> RepoResult<Task> {
    let id_text: String = row.get("id")?;
    let list_id_text: String = row.get("list_id")?;
    let status_text: String = row.get("status")?;
    let status = TaskStatus::from_db_str(&status_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid task status `{status_text}` in tasks.status"
        ))
    })?;

    Ok(Task {
        id: parse_uuid(&id_text, "tasks.id")?,
        title: row.get("title")?,
        status,
        list_id: parse_uuid(&list_id_text, "tasks.list_id")?,
        priority: row.get("priority")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}
