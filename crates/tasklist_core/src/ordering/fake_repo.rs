//! In-memory `TaskRepository` that records writes, for ordering unit tests.

use crate::model::list::{List, ListId, ListView, TaskView};
use crate::model::task::{Task, TaskId, TaskPatch, TaskStatus};
use crate::repo::task_repo::{NewTask, PriorityRange, TaskRepository};
use crate::repo::{RepoError, RepoResult};
use std::cell::{Cell, RefCell};
use uuid::Uuid;

#[derive(Default)]
pub(crate) struct FakeTaskRepository {
    lists: RefCell<Vec<List>>,
    tasks: RefCell<Vec<Task>>,
    writes: Cell<usize>,
    shifts: RefCell<Vec<(ListId, PriorityRange, i64)>>,
}

impl FakeTaskRepository {
    pub(crate) fn add_list(&self, title: &str) -> ListId {
        let id = Uuid::new_v4();
        self.lists.borrow_mut().push(List {
            id,
            title: title.to_string(),
            created_at: 0,
        });
        id
    }

    pub(crate) fn add_task(&self, list_id: ListId, title: &str, priority: i64) -> TaskId {
        let id = Uuid::new_v4();
        self.tasks.borrow_mut().push(Task {
            id,
            title: title.to_string(),
            status: TaskStatus::Pending,
            list_id,
            priority,
            created_at: 0,
            updated_at: 0,
        });
        id
    }

    pub(crate) fn task(&self, id: TaskId) -> Task {
        self.tasks
            .borrow()
            .iter()
            .find(|task| task.id == id)
            .cloned()
            .expect("task should exist in fake repository")
    }

    pub(crate) fn writes(&self) -> usize {
        self.writes.get()
    }

    pub(crate) fn shifts(&self) -> Vec<(ListId, PriorityRange, i64)> {
        self.shifts.borrow().clone()
    }

    fn record_write(&self) {
        self.writes.set(self.writes.get() + 1);
    }
}

impl TaskRepository for FakeTaskRepository {
    fn list_exists(&self, list_id: ListId) -> RepoResult<bool> {
        Ok(self.lists.borrow().iter().any(|list| list.id == list_id))
    }

    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>> {
        Ok(self.tasks.borrow().iter().find(|task| task.id == id).cloned())
    }

    fn top_task(&self, list_id: ListId) -> RepoResult<Option<Task>> {
        Ok(self
            .tasks
            .borrow()
            .iter()
            .filter(|task| task.list_id == list_id)
            .max_by_key(|task| task.priority)
            .cloned())
    }

    fn bottom_task(&self, list_id: ListId) -> RepoResult<Option<Task>> {
        Ok(self
            .tasks
            .borrow()
            .iter()
            .filter(|task| task.list_id == list_id)
            .min_by_key(|task| task.priority)
            .cloned())
    }

    fn insert_task(&self, new_task: &NewTask) -> RepoResult<Task> {
        self.record_write();
        let id = self.add_task(new_task.list_id, &new_task.title, new_task.priority);
        let mut tasks = self.tasks.borrow_mut();
        let task = tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or(RepoError::TaskNotFound(id))?;
        task.status = new_task.status;
        Ok(task.clone())
    }

    fn patch_task(&self, id: TaskId, patch: &TaskPatch) -> RepoResult<Task> {
        self.record_write();
        let mut tasks = self.tasks.borrow_mut();
        let task = tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or(RepoError::TaskNotFound(id))?;
        if let Some(title) = &patch.title {
            task.title = title.clone();
        }
        if let Some(status) = patch.status {
            task.status = status;
        }
        Ok(task.clone())
    }

    fn shift_priorities(
        &self,
        list_id: ListId,
        range: PriorityRange,
        delta: i64,
    ) -> RepoResult<usize> {
        self.record_write();
        self.shifts.borrow_mut().push((list_id, range, delta));
        let mut shifted = 0;
        for task in self.tasks.borrow_mut().iter_mut() {
            if task.list_id == list_id && range.contains(task.priority) {
                task.priority = task.priority.checked_add(delta).ok_or_else(|| {
                    RepoError::InvalidData(format!("priority overflow on task {}", task.id))
                })?;
                shifted += 1;
            }
        }
        Ok(shifted)
    }

    fn set_priority(&self, id: TaskId, priority: i64) -> RepoResult<()> {
        self.record_write();
        let mut tasks = self.tasks.borrow_mut();
        let task = tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or(RepoError::TaskNotFound(id))?;
        task.priority = priority;
        Ok(())
    }

    fn load_task_view(&self, id: TaskId) -> RepoResult<TaskView> {
        let task = self.get_task(id)?.ok_or(RepoError::TaskNotFound(id))?;
        let list = self
            .lists
            .borrow()
            .iter()
            .find(|list| list.id == task.list_id)
            .cloned()
            .ok_or(RepoError::ListNotFound(task.list_id))?;
        let mut tasks = self
            .tasks
            .borrow()
            .iter()
            .filter(|candidate| candidate.list_id == list.id)
            .cloned()
            .collect::<Vec<_>>();
        tasks.sort_by(|a, b| b.priority.cmp(&a.priority).then(a.id.cmp(&b.id)));
        Ok(TaskView {
            task,
            list: ListView::new(list, tasks),
        })
    }
}
