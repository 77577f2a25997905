//! Core of the task-list backend: priority ordering of tasks within a list.
//! This crate is the single source of truth for ordering invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod ordering;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::list::{List, ListId, ListView, TaskView};
pub use model::task::{Task, TaskId, TaskPatch, TaskStatus, ValidationError};
pub use ordering::{MoveInputError, MoveReference, OrderingError, OrderingResult};
pub use repo::list_repo::{ListRepository, SqliteListRepository};
pub use repo::task_repo::{SqliteTaskRepository, TaskRepository};
pub use repo::{RepoError, RepoResult};
pub use service::list_service::{ListService, ListServiceError};
pub use service::ordering_service::OrderingService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
