//! User-visible notifications and store-side change events.

use super::{TaskId, TaskStatus, UserId};
use serde::Serialize;

/// Severity of a user-visible notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationLevel {
    /// A mutation was confirmed.
    Success,
    /// A mutation or load failed.
    Error,
}

/// Toast surfaced to the user when a mutation settles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    level: NotificationLevel,
    title: String,
    message: String,
    task_id: Option<TaskId>,
}

impl Notification {
    /// Creates a success notification.
    #[must_use]
    pub fn success(
        title: impl Into<String>,
        message: impl Into<String>,
        task_id: Option<TaskId>,
    ) -> Self {
        Self {
            level: NotificationLevel::Success,
            title: title.into(),
            message: message.into(),
            task_id,
        }
    }

    /// Creates an error notification.
    #[must_use]
    pub fn error(
        title: impl Into<String>,
        message: impl Into<String>,
        task_id: Option<TaskId>,
    ) -> Self {
        Self {
            level: NotificationLevel::Error,
            title: title.into(),
            message: message.into(),
            task_id,
        }
    }

    /// Returns the severity.
    #[must_use]
    pub const fn level(&self) -> NotificationLevel {
        self.level
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the message body.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the task the notification is about, if any.
    #[must_use]
    pub const fn task_id(&self) -> Option<&TaskId> {
        self.task_id.as_ref()
    }
}

/// Change reported by the store layer to downstream dispatchers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskChangeEvent {
    /// A task was assigned to a profile.
    Assignment {
        /// The assigned task.
        task_id: TaskId,
        /// The profile it was assigned to.
        assignee: UserId,
    },
    /// A task moved to another status.
    StatusChange {
        /// The moved task.
        task_id: TaskId,
        /// The confirmed new status.
        new_status: TaskStatus,
    },
}

impl TaskChangeEvent {
    /// Returns the task the event concerns.
    #[must_use]
    pub const fn task_id(&self) -> &TaskId {
        match self {
            Self::Assignment { task_id, .. } | Self::StatusChange { task_id, .. } => task_id,
        }
    }
}
