//! Derived board layout.

use super::{TaskId, TaskStatus};
use serde::Serialize;

/// Ordered group of task ids sharing one status.
///
/// Columns are rebuilt from the task collection on every change and are never
/// persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    status: TaskStatus,
    task_ids: Vec<TaskId>,
}

impl Column {
    /// Creates a column for `status` with the given ordered ids.
    #[must_use]
    pub const fn new(status: TaskStatus, task_ids: Vec<TaskId>) -> Self {
        Self { status, task_ids }
    }

    /// Returns the status this column groups.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the display title.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        self.status.title()
    }

    /// Returns the ordered task ids.
    #[must_use]
    pub fn task_ids(&self) -> &[TaskId] {
        &self.task_ids
    }

    /// Returns the number of rendered tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.task_ids.len()
    }

    /// Returns `true` when the column renders no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.task_ids.is_empty()
    }

    /// Returns the index of `task_id` in this column.
    #[must_use]
    pub fn position(&self, task_id: &TaskId) -> Option<usize> {
        self.task_ids.iter().position(|id| id == task_id)
    }
}

/// Column layout of the board, one column per status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Board {
    scheduled: Column,
    in_progress: Column,
    completed: Column,
}

impl Board {
    /// Assembles a board from its three columns.
    #[must_use]
    pub const fn new(
        scheduled: Vec<TaskId>,
        in_progress: Vec<TaskId>,
        completed: Vec<TaskId>,
    ) -> Self {
        Self {
            scheduled: Column::new(TaskStatus::Scheduled, scheduled),
            in_progress: Column::new(TaskStatus::InProgress, in_progress),
            completed: Column::new(TaskStatus::Completed, completed),
        }
    }

    /// Returns the column for `status`.
    #[must_use]
    pub const fn column(&self, status: TaskStatus) -> &Column {
        match status {
            TaskStatus::Scheduled => &self.scheduled,
            TaskStatus::InProgress => &self.in_progress,
            TaskStatus::Completed => &self.completed,
        }
    }

    /// Iterates over the columns in board order.
    pub fn columns(&self) -> impl Iterator<Item = &Column> {
        [&self.scheduled, &self.in_progress, &self.completed].into_iter()
    }

    /// Finds the column and index currently rendering `task_id`.
    #[must_use]
    pub fn locate(&self, task_id: &TaskId) -> Option<(TaskStatus, usize)> {
        self.columns()
            .find_map(|column| column.position(task_id).map(|index| (column.status(), index)))
    }

    /// Returns the total number of rendered tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns().map(Column::len).sum()
    }

    /// Returns `true` when no column renders a task.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns().all(Column::is_empty)
    }
}
