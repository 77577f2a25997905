//! List create/read use cases.

use crate::model::list::{ListId, ListView};
use crate::model::task::{normalize_title, ValidationError};
use crate::repo::list_repo::ListRepository;
use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from list service operations.
#[derive(Debug)]
pub enum ListServiceError {
    /// Title is blank after trim.
    InvalidTitle(ValidationError),
    /// List does not exist.
    NotFound(ListId),
    /// Repository-level failure.
    Repo(RepoError),
}

impl Display for ListServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTitle(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "list not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ListServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidTitle(err) => Some(err),
            Self::NotFound(_) => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for ListServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::ListNotFound(id) => Self::NotFound(id),
            other => Self::Repo(other),
        }
    }
}

impl From<ValidationError> for ListServiceError {
    fn from(value: ValidationError) -> Self {
        Self::InvalidTitle(value)
    }
}

/// List service facade.
pub struct ListService<R: ListRepository> {
    repo: R,
}

impl<R: ListRepository> ListService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates an empty list.
    pub fn create_list(&self, title: impl Into<String>) -> Result<ListView, ListServiceError> {
        let title = normalize_title(title)?;
        let list = self.repo.create_list(title.as_str())?;
        Ok(ListView::new(list, Vec::new()))
    }

    /// Loads one list with its tasks in render order.
    pub fn get_list(&self, id: ListId) -> Result<ListView, ListServiceError> {
        self.repo
            .get_list_view(id)?
            .ok_or(ListServiceError::NotFound(id))
    }

    /// Loads every list with its tasks in render order.
    pub fn list_all(&self) -> Result<Vec<ListView>, ListServiceError> {
        self.repo.list_all().map_err(Into::into)
    }
}
