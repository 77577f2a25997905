//! Task domain model.
//!
//! # Responsibility
//! - Define the task record, its two-valued status and the partial update shape.
//! - Validate user-provided titles before they reach storage.
//!
//! # Invariants
//! - `id` and `list_id` never change after creation.
//! - `priority` is only changed by ordering operations, never by a patch.

use crate::model::list::ListId;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Stable task identifier.
pub type TaskId = Uuid;

/// Completion state of a task.
///
/// There is no workflow: any state may follow any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    #[default]
    Pending,
    Completed,
}

impl TaskStatus {
    /// Storage representation used in `tasks.status`.
    pub fn as_db_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
        }
    }

    /// Parses the storage representation written by [`TaskStatus::as_db_str`].
    pub fn from_db_str(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

impl Display for TaskStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "PENDING"),
            Self::Completed => write!(f, "COMPLETED"),
        }
    }
}

impl FromStr for TaskStatus {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            other => Err(ValidationError::UnknownStatus(other.to_string())),
        }
    }
}

/// Persisted task row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub status: TaskStatus,
    pub list_id: ListId,
    /// Rank key inside `list_id`; higher renders first. Not contiguous.
    pub priority: i64,
    /// Epoch ms.
    pub created_at: i64,
    /// Epoch ms; bumped by every write to the row, shifts included.
    pub updated_at: i64,
}

/// Fields a caller may change on an existing task.
///
/// `None` means "leave as is", never "clear".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub status: Option<TaskStatus>,
}

impl TaskPatch {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Returns whether applying this patch would write nothing.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.status.is_none()
    }

    /// Trims a present title and rejects it when blank.
    pub fn normalized(self) -> Result<Self, ValidationError> {
        let title = self.title.map(normalize_title).transpose()?;
        Ok(Self {
            title,
            status: self.status,
        })
    }
}

/// Rejected user input for task and list fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Title is empty after trim.
    BlankTitle,
    /// Status text is neither `PENDING` nor `COMPLETED`.
    UnknownStatus(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankTitle => write!(f, "title must not be blank"),
            Self::UnknownStatus(value) => {
                write!(f, "unknown task status `{value}`; expected PENDING|COMPLETED")
            }
        }
    }
}

impl Error for ValidationError {}

/// Trims `value` and rejects blank titles.
pub fn normalize_title(value: impl Into<String>) -> Result<String, ValidationError> {
    let value = value.into();
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::BlankTitle);
    }
    Ok(trimmed.to_string())
}
