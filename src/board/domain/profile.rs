//! User profiles referenced by task assignees.

use super::{Assignee, TaskDomainError, UserId};
use serde::{Deserialize, Serialize};

/// Profile data owned by the profile directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    id: UserId,
    name: String,
}

impl UserProfile {
    /// Creates a profile.
    #[must_use]
    pub fn new(id: UserId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Returns the profile identifier.
    #[must_use]
    pub const fn id(&self) -> &UserId {
        &self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Builds the weak assignee reference stored on tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyAssigneeName`] when the profile has a
    /// blank display name.
    pub fn to_assignee(&self) -> Result<Assignee, TaskDomainError> {
        Assignee::new(self.id.clone(), self.name.clone())
    }
}
