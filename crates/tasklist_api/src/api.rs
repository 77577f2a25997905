//! Use-case API for boundary callers (CLI, embedding hosts).
//!
//! # Responsibility
//! - Parse text ids and status values into core types.
//! - Run one core use case per call against the configured database.
//! - Classify failures into stable [`ErrorCode`]s inside an [`ApiResponse`].
//!
//! # Invariants
//! - Calls never panic and never return `Err`; failures travel in the envelope.
//! - Each call opens its own connection; no connection outlives a call.
//! - Logs carry ids and codes only, never titles.

use crate::config::ApiConfig;
use crate::response::{ApiError, ApiResponse, ErrorCode};
use log::{error, info, warn};
use rusqlite::Connection;
use std::path::PathBuf;
use std::time::Instant;
use tasklist_core::db::open_db;
use tasklist_core::{
    ListService, ListView, OrderingService, SqliteListRepository, Task, TaskId, TaskPatch,
    TaskStatus, TaskView,
};
use uuid::Uuid;

type ApiResult<T> = Result<T, ApiError>;

/// Entry point bound to one database file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListApi {
    db_path: PathBuf,
}

impl TaskListApi {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    pub fn from_config(config: &ApiConfig) -> Self {
        Self::new(config.db_path.clone())
    }

    /// Creates an empty list.
    pub fn create_list(&self, title: &str) -> ApiResponse<ListView> {
        self.run("list_create", "List created.", |conn| {
            let service = list_service(conn)?;
            Ok(service.create_list(title)?)
        })
    }

    /// Returns one list with its tasks, highest priority first.
    pub fn get_list(&self, list_id: &str) -> ApiResponse<ListView> {
        self.run("list_get", "List loaded.", |conn| {
            let list_id = parse_id("listId", list_id)?;
            let service = list_service(conn)?;
            Ok(service.get_list(list_id)?)
        })
    }

    /// Returns every list in creation order, tasks highest priority first.
    pub fn list_all(&self) -> ApiResponse<Vec<ListView>> {
        self.run("list_all", "Lists loaded.", |conn| {
            let service = list_service(conn)?;
            Ok(service.list_all()?)
        })
    }

    /// Appends a new `PENDING` task to the top of a list.
    pub fn create_task(&self, list_id: &str, title: &str) -> ApiResponse<TaskView> {
        self.run("task_create", "Task created.", |conn| {
            let list_id = parse_id("listId", list_id)?;
            let service = OrderingService::try_new(conn)?;
            Ok(service.create_task(list_id, title)?)
        })
    }

    /// Updates the given fields of a task; `None` leaves a field untouched.
    ///
    /// `status` accepts `PENDING` or `COMPLETED` in any case.
    pub fn update_task(
        &self,
        id: &str,
        title: Option<&str>,
        status: Option<&str>,
    ) -> ApiResponse<Task> {
        self.run("task_update", "Task updated.", |conn| {
            let id = parse_id("id", id)?;
            let mut patch = TaskPatch::default();
            if let Some(title) = title {
                patch = patch.title(title);
            }
            if let Some(status) = status {
                patch = patch.status(status.parse::<TaskStatus>()?);
            }
            let service = OrderingService::try_new(conn)?;
            Ok(service.update_task(id, patch)?)
        })
    }

    /// Moves a task directly before or after another task of its list.
    ///
    /// Blank reference ids count as absent.
    pub fn move_task(
        &self,
        id: &str,
        before_id: Option<&str>,
        after_id: Option<&str>,
    ) -> ApiResponse<TaskView> {
        self.run("task_move", "Task moved.", |conn| {
            let id = parse_id("id", id)?;
            let before_id = parse_optional_id("beforeId", before_id)?;
            let after_id = parse_optional_id("afterId", after_id)?;
            let service = OrderingService::try_new(conn)?;
            Ok(service.move_task(id, before_id, after_id)?)
        })
    }

    fn run<T>(
        &self,
        event: &'static str,
        success_message: &'static str,
        op: impl FnOnce(&Connection) -> ApiResult<T>,
    ) -> ApiResponse<T> {
        let started_at = Instant::now();
        info!("event={event} module=api status=start");

        let result = open_db(&self.db_path)
            .map_err(ApiError::from)
            .and_then(|conn| op(&conn));
        let duration_ms = started_at.elapsed().as_millis();

        match result {
            Ok(data) => {
                info!("event={event} module=api status=ok duration_ms={duration_ms}");
                ApiResponse::success(success_message, data)
            }
            Err(err) => {
                if err.code == ErrorCode::StoreUnavailable {
                    error!(
                        "event={event} module=api status=error duration_ms={duration_ms} error_code={} busy={} db_path={}",
                        err.code,
                        err.busy,
                        self.db_path.display()
                    );
                } else {
                    warn!(
                        "event={event} module=api status=error duration_ms={duration_ms} error_code={}",
                        err.code
                    );
                }
                ApiResponse::failure(err)
            }
        }
    }
}

fn list_service(conn: &Connection) -> ApiResult<ListService<SqliteListRepository<'_>>> {
    Ok(ListService::new(SqliteListRepository::try_new(conn)?))
}

fn parse_id(field: &str, raw: &str) -> ApiResult<TaskId> {
    Uuid::parse_str(raw.trim()).map_err(|_| {
        ApiError::new(
            ErrorCode::InvalidInput,
            format!("{field} is not a valid id: `{}`", raw.trim()),
        )
    })
}

fn parse_optional_id(field: &str, raw: Option<&str>) -> ApiResult<Option<TaskId>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_id(field, value).map(Some),
    }
}
