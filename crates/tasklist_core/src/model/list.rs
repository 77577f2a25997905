//! List model and the joined read views returned to callers.

use crate::model::task::{Task, TaskId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable list identifier.
pub type ListId = Uuid;

/// Persisted list row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct List {
    pub id: ListId,
    pub title: String,
    pub created_at: i64,
}

/// A list with its tasks in render order (`priority` descending).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListView {
    pub id: ListId,
    pub title: String,
    pub created_at: i64,
    pub tasks: Vec<Task>,
}

impl ListView {
    pub fn new(list: List, tasks: Vec<Task>) -> Self {
        Self {
            id: list.id,
            title: list.title,
            created_at: list.created_at,
            tasks,
        }
    }

    /// Task ids in render order.
    pub fn task_ids(&self) -> Vec<TaskId> {
        self.tasks.iter().map(|task| task.id).collect()
    }
}

/// A task joined with its owning list, so callers can re-render the list
/// without a second read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskView {
    #[serde(flatten)]
    pub task: Task,
    pub list: ListView,
}
