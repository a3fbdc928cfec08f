//! Task comments.

use super::{CommentId, TaskDomainError, TaskId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Validated comment body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentText(String);

impl CommentText {
    /// Validates comment text, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyCommentText`] when nothing but
    /// whitespace remains.
    pub fn new(value: &str) -> Result<Self, TaskDomainError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyCommentText);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the text as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A comment attached to a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    id: CommentId,
    task_id: TaskId,
    author: UserId,
    text: CommentText,
    created_at: DateTime<Utc>,
}

impl Comment {
    /// Creates a comment record with store-assigned identity and timestamp.
    #[must_use]
    pub const fn new(
        id: CommentId,
        task_id: TaskId,
        author: UserId,
        text: CommentText,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            task_id,
            author,
            text,
            created_at,
        }
    }

    /// Returns the comment identifier.
    #[must_use]
    pub const fn id(&self) -> &CommentId {
        &self.id
    }

    /// Returns the task the comment belongs to.
    #[must_use]
    pub const fn task_id(&self) -> &TaskId {
        &self.task_id
    }

    /// Returns the author profile identifier.
    #[must_use]
    pub const fn author(&self) -> &UserId {
        &self.author
    }

    /// Returns the comment body.
    #[must_use]
    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
