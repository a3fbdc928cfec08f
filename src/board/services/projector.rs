//! Board projection: the pure mapping from tasks and filters to columns.

use crate::board::domain::{Board, FilterState, Task, TaskId, TaskStatus};
use std::collections::HashSet;

/// Partitions `tasks` into status columns, keeping only tasks that pass
/// `filters`.
///
/// Order within each column is the incoming collection order. With
/// unfiltered selections every task appears exactly once, in the column of
/// its status.
#[must_use]
pub fn project(tasks: &[Task], filters: &FilterState) -> Board {
    let mut scheduled: Vec<TaskId> = Vec::new();
    let mut in_progress: Vec<TaskId> = Vec::new();
    let mut completed: Vec<TaskId> = Vec::new();

    for task in tasks.iter().filter(|task| filters.matches(task)) {
        let bucket = match task.status() {
            TaskStatus::Scheduled => &mut scheduled,
            TaskStatus::InProgress => &mut in_progress,
            TaskStatus::Completed => &mut completed,
        };
        bucket.push(task.id().clone());
    }

    Board::new(scheduled, in_progress, completed)
}

/// Assignee display names over the unfiltered collection, for populating the
/// assignee selector.
///
/// Names are de-duplicated and keep the order of their first occurrence.
#[must_use]
pub fn unique_assignees(tasks: &[Task]) -> Vec<String> {
    let mut seen = HashSet::new();
    tasks
        .iter()
        .filter_map(Task::assignee_name)
        .filter(|name| seen.insert(*name))
        .map(str::to_owned)
        .collect()
}
