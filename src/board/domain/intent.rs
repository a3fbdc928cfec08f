//! Drop gestures and the intents derived from them.

use super::{ParseTaskStatusError, TaskDomainError, TaskId, TaskStatus};
use thiserror::Error;

/// A position inside a rendered column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DropLocation {
    /// Column identity.
    pub column: TaskStatus,
    /// Index within the rendered (filtered) column.
    pub index: usize,
}

impl DropLocation {
    /// Creates a drop location.
    #[must_use]
    pub const fn new(column: TaskStatus, index: usize) -> Self {
        Self { column, index }
    }
}

/// Completed drag gesture as reported by the view layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropEvent {
    /// The dragged task.
    pub task_id: TaskId,
    /// Where the card was picked up.
    pub source: DropLocation,
    /// Where the card was dropped; `None` when the gesture was cancelled or
    /// released outside every column.
    pub destination: Option<DropLocation>,
}

/// Errors raised while decoding a drop gesture from raw view identifiers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DropEventError {
    /// A column identifier was not recognised.
    #[error(transparent)]
    Column(#[from] ParseTaskStatusError),
    /// The dragged card identifier was blank.
    #[error(transparent)]
    Task(#[from] TaskDomainError),
}

impl DropEvent {
    /// Creates a drop event from typed parts.
    #[must_use]
    pub const fn new(
        task_id: TaskId,
        source: DropLocation,
        destination: Option<DropLocation>,
    ) -> Self {
        Self {
            task_id,
            source,
            destination,
        }
    }

    /// Decodes a drop event from the identifiers a drag-and-drop view emits.
    ///
    /// # Errors
    ///
    /// Returns [`DropEventError`] when a column identifier is unknown or the
    /// dragged id is blank.
    pub fn from_raw(
        draggable_id: &str,
        source: (&str, usize),
        destination: Option<(&str, usize)>,
    ) -> Result<Self, DropEventError> {
        let (source_column, source_index) = source;
        let landed = destination
            .map(|(column, index)| {
                TaskStatus::try_from(column).map(|status| DropLocation::new(status, index))
            })
            .transpose()?;
        Ok(Self {
            task_id: TaskId::new(draggable_id)?,
            source: DropLocation::new(TaskStatus::try_from(source_column)?, source_index),
            destination: landed,
        })
    }
}

/// Outcome of translating a drop gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragIntent {
    /// Nothing moved; no persistence call may follow.
    NoOp,
    /// Visual reorder inside one column. Ephemeral: the next refetch resets it.
    LocalReorder {
        /// Column being reordered.
        column: TaskStatus,
        /// Rendered index the card left.
        from_index: usize,
        /// Rendered index the card landed on.
        to_index: usize,
    },
    /// Cross-column move; the only outcome that reaches the store.
    StatusChange {
        /// The dragged task.
        task_id: TaskId,
        /// Status of the destination column.
        new_status: TaskStatus,
    },
}
