//! Task create/update/move façade.
//!
//! # Responsibility
//! - Run each task write inside one `BEGIN IMMEDIATE` transaction.
//! - Hand the transaction-scoped repository to the assigner/reindexer.
//!
//! # Invariants
//! - Input validation (titles, move references) happens before `BEGIN`.
//! - A failed operation never commits; dropping the transaction rolls back.
//! - Title/status updates never touch `priority`.

use crate::model::list::{ListId, TaskView};
use crate::model::task::{normalize_title, Task, TaskId, TaskPatch, TaskStatus};
use crate::ordering::{
    MoveReference, OrderingError, OrderingResult, PriorityAssigner, PriorityReindexer,
};
use crate::repo::ensure_connection_ready;
use crate::repo::task_repo::{NewTask, SqliteTaskRepository, TaskRepository};
use rusqlite::{Connection, Transaction, TransactionBehavior};

/// Façade for the priority-ordered task operations.
pub struct OrderingService<'conn> {
    conn: &'conn Connection,
}

impl<'conn> OrderingService<'conn> {
    /// Binds to a migrated connection.
    ///
    /// The connection must not already be inside a transaction.
    pub fn try_new(conn: &'conn Connection) -> OrderingResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }

    /// Appends a `Pending` task to the top of `list_id`.
    ///
    /// Returns the new task joined with its list in render order.
    pub fn create_task(
        &self,
        list_id: ListId,
        title: impl Into<String>,
    ) -> OrderingResult<TaskView> {
        let title = normalize_title(title)?;
        self.in_transaction(|repo| {
            if !repo.list_exists(list_id)? {
                return Err(OrderingError::ListNotFound(list_id));
            }
            let priority = PriorityAssigner::new(repo).assign(list_id)?;
            let task = repo.insert_task(&NewTask {
                list_id,
                title,
                status: TaskStatus::Pending,
                priority,
            })?;
            Ok(repo.load_task_view(task.id)?)
        })
    }

    /// Applies the present fields of `patch` to one task.
    pub fn update_task(&self, id: TaskId, patch: TaskPatch) -> OrderingResult<Task> {
        let patch = patch.normalized()?;
        self.in_transaction(|repo| Ok(repo.patch_task(id, &patch)?))
    }

    /// Moves `id` before or after another task of the same list.
    ///
    /// Exactly one of `before_id`/`after_id` must be given.
    pub fn move_task(
        &self,
        id: TaskId,
        before_id: Option<TaskId>,
        after_id: Option<TaskId>,
    ) -> OrderingResult<TaskView> {
        let reference = MoveReference::from_ids(before_id, after_id)?;
        self.move_task_to(id, reference)
    }

    /// Moves `id` relative to an already validated reference.
    pub fn move_task_to(&self, id: TaskId, reference: MoveReference) -> OrderingResult<TaskView> {
        self.in_transaction(|repo| PriorityReindexer::new(repo).reposition(id, reference))
    }

    fn in_transaction<T>(
        &self,
        op: impl FnOnce(&SqliteTaskRepository<'_>) -> OrderingResult<T>,
    ) -> OrderingResult<T> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let value = op(&SqliteTaskRepository::new(&tx))?;
        tx.commit()?;
        Ok(value)
    }
}
