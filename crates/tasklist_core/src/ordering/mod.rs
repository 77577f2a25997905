//! Priority ordering of tasks inside one list.
//!
//! # Responsibility
//! - Assign append-to-end priorities to new tasks.
//! - Relocate a task next to a reference task by shifting a priority range.
//! - Classify ordering failures; this module never logs.
//!
//! # Invariants
//! - Rendering is `priority` descending: the highest value is the top of the list.
//! - Input validation runs before the first store write.
//! - Callers run every multi-step operation inside one store transaction.

use crate::model::list::ListId;
use crate::model::task::{TaskId, ValidationError};
use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod assigner;
#[cfg(test)]
mod fake_repo;
pub mod reindexer;

pub use assigner::PriorityAssigner;
pub use reindexer::{MoveReference, PriorityReindexer, ShiftPlan};

/// Result type for ordering operations.
pub type OrderingResult<T> = Result<T, OrderingError>;

/// Why a move request's reference ids were rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveInputError {
    /// Both `before_id` and `after_id` were supplied.
    BothReferences,
    /// Neither `before_id` nor `after_id` was supplied.
    MissingReference,
}

impl Display for MoveInputError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BothReferences => {
                write!(f, "beforeId and afterId need to be input one at a time")
            }
            Self::MissingReference => write!(f, "missing beforeId or afterId"),
        }
    }
}

/// Errors from task create/update/move operations.
#[derive(Debug)]
pub enum OrderingError {
    /// Move request carried both or neither reference id.
    InvalidInput(MoveInputError),
    /// Title or status text was rejected.
    InvalidField(ValidationError),
    /// The move's reference task does not exist.
    ReferenceNotFound(TaskId),
    /// The task being updated or moved does not exist.
    NotFound(TaskId),
    /// The list a task is created in does not exist.
    ListNotFound(ListId),
    /// Moving task and reference task belong to different lists.
    ListMismatch {
        task_id: TaskId,
        reference_id: TaskId,
    },
    /// Appending would overflow the priority range of the list.
    PriorityExhausted(ListId),
    /// Store failure or transaction abort; never retried here.
    Repo(RepoError),
}

impl Display for OrderingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput(err) => write!(f, "{err}"),
            Self::InvalidField(err) => write!(f, "{err}"),
            Self::ReferenceNotFound(_) => write!(f, "incorrect beforeId or afterId"),
            Self::NotFound(id) => write!(f, "task not found: {id}"),
            Self::ListNotFound(id) => write!(f, "list not found: {id}"),
            Self::ListMismatch {
                task_id,
                reference_id,
            } => write!(
                f,
                "task {task_id} and reference task {reference_id} belong to different lists"
            ),
            Self::PriorityExhausted(id) => {
                write!(f, "no priority left above the top task of list {id}")
            }
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for OrderingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidField(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<MoveInputError> for OrderingError {
    fn from(value: MoveInputError) -> Self {
        Self::InvalidInput(value)
    }
}

impl From<ValidationError> for OrderingError {
    fn from(value: ValidationError) -> Self {
        Self::InvalidField(value)
    }
}

impl From<RepoError> for OrderingError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::TaskNotFound(id) => Self::NotFound(id),
            RepoError::ListNotFound(id) => Self::ListNotFound(id),
            other => Self::Repo(other),
        }
    }
}

impl From<rusqlite::Error> for OrderingError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Repo(value.into())
    }
}
