//! Board filter selections.

use super::{ParsePriorityError, Priority, Task};
use serde::{Deserialize, Serialize};

/// Sentinel used by selectors for "no filtering".
pub const ALL_SELECTION: &str = "all";

/// A selector value: either everything or one concrete value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Selection<T> {
    /// Matches every value.
    #[default]
    All,
    /// Matches only the given value.
    Only(T),
}

impl<T> Selection<T> {
    /// Returns `true` when the selection does not filter.
    #[must_use]
    pub const fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl<T: PartialEq> Selection<T> {
    /// Returns `true` when `value` passes the selection.
    #[must_use]
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => expected == value,
        }
    }
}

impl TryFrom<&str> for Selection<Priority> {
    type Error = ParsePriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        if value.trim().eq_ignore_ascii_case(ALL_SELECTION) {
            return Ok(Self::All);
        }
        Priority::try_from(value).map(Self::Only)
    }
}

impl From<&str> for Selection<String> {
    fn from(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case(ALL_SELECTION) || trimmed.is_empty() {
            Self::All
        } else {
            Self::Only(trimmed.to_owned())
        }
    }
}

/// Active priority and assignee filters of the board view.
///
/// Filters only decide what is rendered. They never reach the store and never
/// change a task's column membership.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct FilterState {
    /// Priority selection.
    pub priority: Selection<Priority>,
    /// Assignee display-name selection.
    pub assignee: Selection<String>,
}

impl FilterState {
    /// Returns a copy with the priority selection replaced.
    #[must_use]
    pub const fn with_priority(mut self, priority: Selection<Priority>) -> Self {
        self.priority = priority;
        self
    }

    /// Returns a copy with the assignee selection replaced.
    #[must_use]
    pub fn with_assignee(mut self, assignee: Selection<String>) -> Self {
        self.assignee = assignee;
        self
    }

    /// Returns `true` when neither selection filters.
    #[must_use]
    pub const fn is_unfiltered(&self) -> bool {
        self.priority.is_all() && self.assignee.is_all()
    }

    /// Conjunctive predicate over both selections.
    ///
    /// An unassigned task never matches a concrete assignee selection.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        let priority_matches = self.priority.matches(&task.priority());
        let assignee_matches = match &self.assignee {
            Selection::All => true,
            Selection::Only(name) => task.assignee_name() == Some(name.as_str()),
        };
        priority_matches && assignee_matches
    }
}
