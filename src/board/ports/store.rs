//! Task store port: the remote, authoritative task collection.

use crate::board::domain::{Task, TaskDraft, TaskId, TaskStatus};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task store operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

/// Contract of the remote task collection.
///
/// Implementations report failures with enough detail for a user-facing
/// message and never retry on their own; retrying is the caller's decision.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Lists all tasks, newest first by creation time.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError`] when the read is rejected or fails.
    async fn list(&self) -> TaskStoreResult<Vec<Task>>;

    /// Changes the status of an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when the task no longer exists.
    async fn update_status(&self, id: &TaskId, status: TaskStatus) -> TaskStoreResult<()>;

    /// Stores a new task in the scheduled column and returns it with its
    /// store-issued identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError`] when the write is rejected or fails.
    async fn create(&self, draft: &TaskDraft) -> TaskStoreResult<Task>;

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when the task no longer exists.
    async fn delete(&self, id: &TaskId) -> TaskStoreResult<()>;
}

/// Errors returned by task store implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskStoreError {
    /// The task does not exist (deleted by another actor, or never existed).
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The caller is not allowed to perform the operation.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// The store rejected the write because it violates a constraint.
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    /// The store could not be reached.
    #[error("store unreachable: {0}")]
    Connectivity(String),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Returns `true` for failures where repeating an idempotent request may
    /// succeed.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Connectivity(_))
    }
}
