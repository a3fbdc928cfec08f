//! Service-level errors for board coordination.

use crate::board::{
    domain::{TaskDomainError, TaskId, UserId},
    ports::{CommentThreadError, ProfileDirectoryError, TaskStoreError},
};
use thiserror::Error;

/// Client-side precondition failures. These never reach the store.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A field failed domain validation.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// The requested assignee does not resolve to a profile.
    #[error("unknown assignee: {0}")]
    UnknownAssignee(UserId),

    /// The task is not part of the loaded collection.
    #[error("task {0} is not on the board")]
    UnknownTask(TaskId),

    /// Another mutation for the task has not settled yet.
    #[error("update already in progress for task {0}")]
    UpdateInProgress(TaskId),
}

/// Errors surfaced by the mutation coordinator.
#[derive(Debug, Error)]
pub enum BoardError {
    /// Client-side validation failed.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The store rejected or failed a read or write.
    #[error(transparent)]
    Store(TaskStoreError),

    /// The mutation targeted a task that no longer exists in the store.
    #[error("task {0} no longer exists")]
    StaleState(TaskId),

    /// The comment thread rejected or failed a request.
    #[error(transparent)]
    Comment(#[from] CommentThreadError),

    /// Resolving a profile failed.
    #[error(transparent)]
    Profiles(#[from] ProfileDirectoryError),
}

impl From<TaskDomainError> for BoardError {
    fn from(err: TaskDomainError) -> Self {
        Self::Validation(ValidationError::Domain(err))
    }
}

impl From<TaskStoreError> for BoardError {
    /// A "not found" answer to a write means the local view is stale.
    fn from(err: TaskStoreError) -> Self {
        match err {
            TaskStoreError::NotFound(task_id) => Self::StaleState(task_id),
            other => Self::Store(other),
        }
    }
}

/// Result type for board coordination.
pub type BoardResult<T> = Result<T, BoardError>;
