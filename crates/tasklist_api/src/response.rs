//! Response envelopes and error classification for boundary callers.

use serde::Serialize;
use std::fmt::{Display, Formatter};
use tasklist_core::db::DbError;
use tasklist_core::{ListServiceError, OrderingError, RepoError, ValidationError};

/// Stable, machine-readable failure class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Malformed ids, blank titles, unknown statuses, both/neither move reference.
    InvalidInput,
    /// Move reference id resolves to no task.
    ReferenceNotFound,
    /// Target task or list does not exist.
    NotFound,
    /// Task creation names a list that does not exist.
    ListNotFound,
    /// Moving task and reference task live in different lists.
    ListMismatch,
    /// The list's priority range is used up.
    PriorityExhausted,
    /// Store unreachable, busy, incompatible, or the transaction aborted.
    StoreUnavailable,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InvalidInput => "invalid_input",
            Self::ReferenceNotFound => "reference_not_found",
            Self::NotFound => "not_found",
            Self::ListNotFound => "list_not_found",
            Self::ListMismatch => "list_mismatch",
            Self::PriorityExhausted => "priority_exhausted",
            Self::StoreUnavailable => "store_unavailable",
        }
    }
}

impl Display for ErrorCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classified failure carried to the envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
    /// Lock contention outlasted the busy timeout; the same call may succeed later.
    pub busy: bool,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            busy: false,
        }
    }

    fn store(err: &dyn Display, busy: bool) -> Self {
        let message = if busy {
            format!("store busy, retry later: {err}")
        } else {
            err.to_string()
        };
        Self {
            code: ErrorCode::StoreUnavailable,
            message,
            busy,
        }
    }
}

impl From<OrderingError> for ApiError {
    fn from(value: OrderingError) -> Self {
        let code = match &value {
            OrderingError::InvalidInput(_) | OrderingError::InvalidField(_) => {
                ErrorCode::InvalidInput
            }
            OrderingError::ReferenceNotFound(_) => ErrorCode::ReferenceNotFound,
            OrderingError::NotFound(_) => ErrorCode::NotFound,
            OrderingError::ListNotFound(_) => ErrorCode::ListNotFound,
            OrderingError::ListMismatch { .. } => ErrorCode::ListMismatch,
            OrderingError::PriorityExhausted(_) => ErrorCode::PriorityExhausted,
            OrderingError::Repo(err) => return Self::store(err, err.is_busy()),
        };
        Self::new(code, value.to_string())
    }
}

impl From<ListServiceError> for ApiError {
    fn from(value: ListServiceError) -> Self {
        let code = match &value {
            ListServiceError::InvalidTitle(_) => ErrorCode::InvalidInput,
            ListServiceError::NotFound(_) => ErrorCode::NotFound,
            ListServiceError::Repo(err) => return Self::store(err, err.is_busy()),
        };
        Self::new(code, value.to_string())
    }
}

impl From<RepoError> for ApiError {
    fn from(value: RepoError) -> Self {
        Self::store(&value, value.is_busy())
    }
}

impl From<DbError> for ApiError {
    fn from(value: DbError) -> Self {
        Self::store(&value, value.is_busy())
    }
}

impl From<ValidationError> for ApiError {
    fn from(value: ValidationError) -> Self {
        Self::new(ErrorCode::InvalidInput, value.to_string())
    }
}

/// Envelope returned by every boundary call.
///
/// Exactly one of `data` / `error_code` is set, matching `ok`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub data: Option<T>,
    pub error_code: Option<ErrorCode>,
    pub message: String,
}

impl<T> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            ok: true,
            data: Some(data),
            error_code: None,
            message: message.into(),
        }
    }

    pub fn failure(error: ApiError) -> Self {
        Self {
            ok: false,
            data: None,
            error_code: Some(error.code),
            message: error.message,
        }
    }
}
