//! Task record and the value types that describe it.

use super::{ParsePriorityError, ParseTaskStatusError, TaskDomainError, TaskId, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle stage of a task and the sole determinant of its board column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task is planned but not started.
    Scheduled,
    /// Task is being worked on.
    InProgress,
    /// Task is finished.
    Completed,
}

impl TaskStatus {
    /// All statuses in board column order.
    pub const ALL: [Self; 3] = [Self::Scheduled, Self::InProgress, Self::Completed];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }

    /// Returns the column title shown on the board.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Scheduled => "Scheduled",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
        }
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    /// Parses storage values and the column identifiers used by drag sources.
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "scheduled" => Ok(Self::Scheduled),
            "in_progress" | "inprogress" | "in-progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Low priority.
    Low,
    /// Medium priority.
    Medium,
    /// High priority.
    High,
}

impl Priority {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl TryFrom<&str> for Priority {
    type Error = ParsePriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(ParsePriorityError(value.to_owned())),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Weak reference from a task to the profile it is assigned to.
///
/// The board never owns profile data; the display name is a lookup copy used
/// for rendering and assignee filtering.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Assignee {
    user_id: UserId,
    name: String,
}

impl Assignee {
    /// Creates an assignee reference.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyAssigneeName`] when the name is blank.
    pub fn new(user_id: UserId, name: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = name.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyAssigneeName);
        }
        Ok(Self {
            user_id,
            name: trimmed.to_owned(),
        })
    }

    /// Returns the referenced profile identifier.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Task record as confirmed by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    description: String,
    status: TaskStatus,
    priority: Priority,
    deadline: DateTime<Utc>,
    assignee: Option<Assignee>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Store-issued identifier.
    pub id: TaskId,
    /// Free-text description.
    pub description: String,
    /// Lifecycle status.
    pub status: TaskStatus,
    /// Priority.
    pub priority: Priority,
    /// Deadline; may lie in the past.
    pub deadline: DateTime<Utc>,
    /// Assigned profile, if any.
    pub assignee: Option<Assignee>,
    /// Server-assigned creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Server-assigned latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Reconstructs a task from persisted storage.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyDescription`] for a blank description
    /// and [`TaskDomainError::TimestampsOutOfOrder`] when `updated_at`
    /// precedes `created_at`.
    pub fn from_persisted(data: PersistedTaskData) -> Result<Self, TaskDomainError> {
        if data.description.trim().is_empty() {
            return Err(TaskDomainError::EmptyDescription);
        }
        if data.updated_at < data.created_at {
            return Err(TaskDomainError::TimestampsOutOfOrder(data.id));
        }
        Ok(Self {
            id: data.id,
            description: data.description,
            status: data.status,
            priority: data.priority,
            deadline: data.deadline,
            assignee: data.assignee,
            created_at: data.created_at,
            updated_at: data.updated_at,
        })
    }

    /// Creates the first persisted version of a draft with a store-issued id.
    #[must_use]
    pub fn from_draft(id: TaskId, draft: TaskDraft, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id,
            description: draft.description,
            status: TaskStatus::Scheduled,
            priority: draft.priority,
            deadline: draft.deadline,
            assignee: Some(draft.assignee),
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the deadline.
    #[must_use]
    pub const fn deadline(&self) -> DateTime<Utc> {
        self.deadline
    }

    /// Returns the assignee reference, if any.
    #[must_use]
    pub const fn assignee(&self) -> Option<&Assignee> {
        self.assignee.as_ref()
    }

    /// Returns the assignee display name, if any.
    #[must_use]
    pub fn assignee_name(&self) -> Option<&str> {
        self.assignee.as_ref().map(Assignee::name)
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns a copy displayed under another status, timestamps untouched.
    ///
    /// Used for pending overrides and local patches; the store never sees it.
    #[must_use]
    pub fn with_status(&self, status: TaskStatus) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }

    /// Applies a status change on the store side and stamps `updated_at`.
    pub fn transition_to(&mut self, status: TaskStatus, clock: &impl Clock) {
        self.status = status;
        self.updated_at = clock.utc().max(self.created_at);
    }
}

/// Validated fields for a task that has not been stored yet.
///
/// A draft carries no identifier and no status: the store issues the id and
/// every new task starts in [`TaskStatus::Scheduled`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    description: String,
    priority: Priority,
    deadline: DateTime<Utc>,
    assignee: Assignee,
}

impl TaskDraft {
    /// Validates new task fields.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyDescription`] for a blank description
    /// and [`TaskDomainError::DescriptionTooLong`] when it exceeds
    /// `max_description_length` characters.
    pub fn new(
        description: &str,
        priority: Priority,
        deadline: DateTime<Utc>,
        assignee: Assignee,
        max_description_length: usize,
    ) -> Result<Self, TaskDomainError> {
        Ok(Self {
            description: Self::checked_description(description, max_description_length)?,
            priority,
            deadline,
            assignee,
        })
    }

    /// Trims a description and checks it against the length limit, counted
    /// in characters.
    ///
    /// # Errors
    ///
    /// Same as [`Self::new`].
    pub fn checked_description(
        description: &str,
        max_description_length: usize,
    ) -> Result<String, TaskDomainError> {
        let trimmed = description.trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyDescription);
        }
        let actual = trimmed.chars().count();
        if actual > max_description_length {
            return Err(TaskDomainError::DescriptionTooLong {
                max: max_description_length,
                actual,
            });
        }
        Ok(trimmed.to_owned())
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the deadline.
    #[must_use]
    pub const fn deadline(&self) -> DateTime<Utc> {
        self.deadline
    }

    /// Returns the resolved assignee.
    #[must_use]
    pub const fn assignee(&self) -> &Assignee {
        &self.assignee
    }
}
