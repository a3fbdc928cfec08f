//! Comment thread port.
//!
//! Comments are independent of board state; the board only forwards writes
//! and surfaces their outcome.

use crate::board::domain::{Comment, CommentId, CommentText, TaskId, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for comment thread operations.
pub type CommentThreadResult<T> = Result<T, CommentThreadError>;

/// Per-task comment storage.
#[async_trait]
pub trait CommentThread: Send + Sync {
    /// Lists the comments of a task, newest first.
    async fn list(&self, task_id: &TaskId) -> CommentThreadResult<Vec<Comment>>;

    /// Adds a comment and returns it with store-assigned identity.
    ///
    /// # Errors
    ///
    /// Returns [`CommentThreadError`] when the write is rejected or fails.
    async fn add(
        &self,
        task_id: &TaskId,
        author: &UserId,
        text: &CommentText,
    ) -> CommentThreadResult<Comment>;

    /// Deletes a comment.
    ///
    /// # Errors
    ///
    /// Returns [`CommentThreadError::NotFound`] when the comment does not
    /// exist.
    async fn delete(&self, id: &CommentId) -> CommentThreadResult<()>;
}

/// Errors returned by comment thread implementations.
#[derive(Debug, Clone, Error)]
pub enum CommentThreadError {
    /// The comment does not exist.
    #[error("comment not found: {0}")]
    NotFound(CommentId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl CommentThreadError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
