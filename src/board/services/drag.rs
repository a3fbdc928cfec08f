//! Drag intent translation and ephemeral column reordering.

use crate::board::domain::{DragIntent, DropEvent, TaskId};

/// Converts a completed drop gesture into an intent.
///
/// Only a move across columns yields [`DragIntent::StatusChange`]; drops that
/// did not move the card, or were cancelled, are [`DragIntent::NoOp`].
#[must_use]
pub fn translate(event: &DropEvent) -> DragIntent {
    let Some(destination) = event.destination else {
        return DragIntent::NoOp;
    };

    if destination.column != event.source.column {
        return DragIntent::StatusChange {
            task_id: event.task_id.clone(),
            new_status: destination.column,
        };
    }

    if destination.index == event.source.index {
        DragIntent::NoOp
    } else {
        DragIntent::LocalReorder {
            column: destination.column,
            from_index: event.source.index,
            to_index: destination.index,
        }
    }
}

/// Moves a card within one column.
///
/// `full` is the column's complete ordering and `visible` the subset the user
/// sees under the active filters; the indices address `visible`. The card is
/// moved to the slot of the card currently shown at `to_index`, so hidden
/// cards keep their relative order. Returns `None` when an index is out of
/// range or the visible ids are not part of `full`.
#[must_use]
pub fn reorder_within(
    full: &[TaskId],
    visible: &[TaskId],
    from_index: usize,
    to_index: usize,
) -> Option<Vec<TaskId>> {
    let moved = visible.get(from_index)?;
    let anchor = visible.get(to_index)?;
    let from = full.iter().position(|id| id == moved)?;
    let to = full.iter().position(|id| id == anchor)?;

    let mut reordered = full.to_vec();
    let card = reordered.remove(from);
    reordered.insert(to, card);
    Some(reordered)
}
