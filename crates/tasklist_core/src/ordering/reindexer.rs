//! Relocation of an existing task next to a reference task.
//!
//! # Invariants
//! - Before `R`: every task of `R`'s list with `priority >= R.priority` moves
//!   up by one (including `R`), and the moving task takes `R`'s old value.
//! - After `R`: every task of `R`'s list with `priority <= R.priority - 1`
//!   moves down by one (excluding `R`), and the moving task takes `R`'s
//!   unchanged value. The moving task and `R` can end up sharing a priority;
//!   this path reproduces the established behavior and does not displace `R`.
//! - A shift that would push any row past the `i64` range is rejected with
//!   `PriorityExhausted` before the first write.

use super::{MoveInputError, OrderingError, OrderingResult};
use crate::model::list::{ListId, TaskView};
use crate::model::task::{Task, TaskId};
use crate::repo::task_repo::{PriorityRange, TaskRepository};

/// Which side of the reference task the moving task lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveReference {
    /// Render directly above the reference task.
    Before(TaskId),
    /// Render directly below the reference task.
    After(TaskId),
}

impl MoveReference {
    /// Builds a reference from the two optional ids of a move request.
    ///
    /// # Errors
    /// - `BothReferences` when both ids are present.
    /// - `MissingReference` when neither is present.
    pub fn from_ids(
        before_id: Option<TaskId>,
        after_id: Option<TaskId>,
    ) -> Result<Self, MoveInputError> {
        match (before_id, after_id) {
            (Some(_), Some(_)) => Err(MoveInputError::BothReferences),
            (None, None) => Err(MoveInputError::MissingReference),
            (Some(id), None) => Ok(Self::Before(id)),
            (None, Some(id)) => Ok(Self::After(id)),
        }
    }

    pub fn reference_id(self) -> TaskId {
        match self {
            Self::Before(id) | Self::After(id) => id,
        }
    }
}

/// The store writes one move performs, derived from the reference row alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftPlan {
    pub list_id: ListId,
    /// Rows to shift; `None` when the range is provably empty.
    pub range: Option<PriorityRange>,
    pub delta: i64,
    /// Priority written to the moving task after the shift.
    pub target_priority: i64,
}

impl ShiftPlan {
    /// Plans a move relative to `reference` as it is stored right now.
    pub fn for_reference(reference: &Task, placement: MoveReference) -> Self {
        match placement {
            MoveReference::Before(_) => Self {
                list_id: reference.list_id,
                range: Some(PriorityRange::AtLeast(reference.priority)),
                delta: 1,
                target_priority: reference.priority,
            },
            MoveReference::After(_) => Self {
                list_id: reference.list_id,
                range: reference.priority.checked_sub(1).map(PriorityRange::AtMost),
                delta: -1,
                target_priority: reference.priority,
            },
        }
    }
}

/// Applies [`ShiftPlan`]s against a transaction-scoped repository.
pub struct PriorityReindexer<'repo, R: TaskRepository + ?Sized> {
    repo: &'repo R,
}

impl<'repo, R: TaskRepository + ?Sized> PriorityReindexer<'repo, R> {
    pub fn new(repo: &'repo R) -> Self {
        Self { repo }
    }

    /// Moves `task_id` next to the task named by `reference`.
    ///
    /// Every lookup happens before the first write, so a rejected move
    /// leaves the store untouched even outside a transaction.
    ///
    /// # Errors
    /// - `ReferenceNotFound` when the reference id resolves to nothing.
    /// - `NotFound` when the moving task does not exist.
    /// - `ListMismatch` when the two tasks live in different lists.
    /// - `PriorityExhausted` when the shift would overflow a priority.
    pub fn reposition(&self, task_id: TaskId, reference: MoveReference) -> OrderingResult<TaskView> {
        let reference_id = reference.reference_id();
        let reference_task = self
            .repo
            .get_task(reference_id)?
            .ok_or(OrderingError::ReferenceNotFound(reference_id))?;
        let moving_task = self
            .repo
            .get_task(task_id)?
            .ok_or(OrderingError::NotFound(task_id))?;
        if moving_task.list_id != reference_task.list_id {
            return Err(OrderingError::ListMismatch {
                task_id,
                reference_id,
            });
        }

        let plan = ShiftPlan::for_reference(&reference_task, reference);
        if let Some(range) = plan.range {
            self.ensure_shift_fits(&plan, range)?;
            self.repo.shift_priorities(plan.list_id, range, plan.delta)?;
        }
        self.repo.set_priority(task_id, plan.target_priority)?;
        Ok(self.repo.load_task_view(task_id)?)
    }

    /// Checks the row at the far end of `range`, the only one that can overflow.
    fn ensure_shift_fits(&self, plan: &ShiftPlan, range: PriorityRange) -> OrderingResult<()> {
        let edge = match range {
            PriorityRange::AtLeast(_) => self.repo.top_task(plan.list_id)?,
            PriorityRange::AtMost(_) => self.repo.bottom_task(plan.list_id)?,
        };
        let overflows = edge
            .filter(|task| range.contains(task.priority))
            .is_some_and(|task| task.priority.checked_add(plan.delta).is_none());
        if overflows {
            return Err(OrderingError::PriorityExhausted(plan.list_id));
        }
        Ok(())
    }
}
