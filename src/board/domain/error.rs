//! Error types for board domain validation and parsing.

use super::TaskId;
use thiserror::Error;

/// Errors returned while constructing domain board values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// An identifier was blank.
    #[error("{0} identifier must not be empty")]
    EmptyIdentifier(&'static str),

    /// The task description is empty after trimming.
    #[error("task description must not be empty")]
    EmptyDescription,

    /// The task description exceeds the configured limit.
    #[error("task description is {actual} characters, the limit is {max}")]
    DescriptionTooLong {
        /// Configured maximum length in characters.
        max: usize,
        /// Actual length in characters.
        actual: usize,
    },

    /// A persisted task was last updated before it was created.
    #[error("task {0} has updated_at earlier than created_at")]
    TimestampsOutOfOrder(TaskId),

    /// The assignee display name is empty after trimming.
    #[error("assignee name must not be empty")]
    EmptyAssigneeName,

    /// The comment text is empty after trimming.
    #[error("comment text must not be empty")]
    EmptyCommentText,
}

/// Error returned while parsing task statuses and column identifiers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing task priorities.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParsePriorityError(pub String);
