//! Append-to-end priority assignment.

use super::{OrderingError, OrderingResult};
use crate::model::list::ListId;
use crate::repo::task_repo::TaskRepository;

/// Computes the priority of a task appended to a list.
///
/// "Append" means top of the rendered list: the new task gets the current
/// maximum plus one, so it sorts first under `priority` descending.
pub struct PriorityAssigner<'repo, R: TaskRepository + ?Sized> {
    repo: &'repo R,
}

impl<'repo, R: TaskRepository + ?Sized> PriorityAssigner<'repo, R> {
    pub fn new(repo: &'repo R) -> Self {
        Self { repo }
    }

    /// Returns `max(priority in list) + 1`, or `1` for an empty list.
    pub fn assign(&self, list_id: ListId) -> OrderingResult<i64> {
        let current_max = self
            .repo
            .top_task(list_id)?
            .map_or(0, |task| task.priority);
        current_max
            .checked_add(1)
            .ok_or(OrderingError::PriorityExhausted(list_id))
    }
}
