//! Raw task rows as exchanged with the remote collection.
//!
//! A row embeds the assignee profile the way the store's joined select
//! returns it. Rows are converted into validated [`Task`] values before they
//! reach the board.

use crate::board::domain::{
    Assignee, ParsePriorityError, ParseTaskStatusError, PersistedTaskData, Priority, Task,
    TaskDomainError, TaskId, TaskStatus, UserId,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Embedded assignee profile of a task row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRecord {
    /// Profile identifier.
    pub id: String,
    /// Display name.
    pub name: String,
}

/// Task row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    /// Store-issued identifier.
    pub id: String,
    /// Free-text description.
    pub description: String,
    /// Status in storage form.
    pub status: String,
    /// Priority in storage form.
    pub priority: String,
    /// Deadline.
    pub deadline: DateTime<Utc>,
    /// Assigned profile id; the profile may have been removed since.
    #[serde(default)]
    pub user_id: Option<String>,
    /// Joined assignee profile.
    #[serde(default)]
    pub profile: Option<ProfileRecord>,
    /// Server-assigned creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Server-assigned latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Errors raised while converting rows into domain tasks.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RecordConversionError {
    /// A field failed domain validation.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// The status column holds an unknown value.
    #[error(transparent)]
    Status(#[from] ParseTaskStatusError),
    /// The priority column holds an unknown value.
    #[error(transparent)]
    Priority(#[from] ParsePriorityError),
}

impl TaskRecord {
    /// Parses a JSON array of rows.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`serde_json::Error`] when the document is not
    /// an array of rows.
    pub fn parse_list(json: &str) -> Result<Vec<Self>, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl TryFrom<TaskRecord> for Task {
    type Error = RecordConversionError;

    fn try_from(record: TaskRecord) -> Result<Self, Self::Error> {
        // A dangling user_id without a joined profile renders as unassigned.
        let assignee = record
            .profile
            .map(|profile| Assignee::new(UserId::new(profile.id)?, profile.name))
            .transpose()?;

        Ok(Self::from_persisted(PersistedTaskData {
            id: TaskId::new(record.id)?,
            description: record.description,
            status: TaskStatus::try_from(record.status.as_str())?,
            priority: Priority::try_from(record.priority.as_str())?,
            deadline: record.deadline,
            assignee,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })?)
    }
}

impl From<&Task> for TaskRecord {
    fn from(task: &Task) -> Self {
        let profile = task.assignee().map(|assignee| ProfileRecord {
            id: assignee.user_id().to_string(),
            name: assignee.name().to_owned(),
        });
        Self {
            id: task.id().to_string(),
            description: task.description().to_owned(),
            status: task.status().as_str().to_owned(),
            priority: task.priority().as_str().to_owned(),
            deadline: task.deadline(),
            user_id: profile.as_ref().map(|profile| profile.id.clone()),
            profile,
            created_at: task.created_at(),
            updated_at: task.updated_at(),
        }
    }
}
