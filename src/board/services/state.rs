//! Board state container owned by the mutation coordinator.
//!
//! Holds the last confirmed task collection, the filter selections, pending
//! optimistic overrides and ephemeral column orderings. Every change bumps a
//! revision published on a watch channel so renderers know when to
//! re-project. The lock is never held across an await.

use super::drag::reorder_within;
use super::projector::{project, unique_assignees};
use crate::board::domain::{Board, FilterState, Task, TaskId, TaskStatus};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::sync::watch;

/// Consistent, render-ready view of the board at one revision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView {
    /// Revision the view was taken at.
    pub revision: u64,
    /// Projected columns under the active filters.
    pub board: Board,
    /// Tasks as displayed: confirmed records with pending overrides applied.
    pub tasks: Vec<Task>,
    /// Active filter selections.
    pub filters: FilterState,
    /// Assignee names for the assignee selector.
    pub assignees: Vec<String>,
    /// `true` when the last refetch failed and the view was patched locally.
    pub stale: bool,
}

impl BoardView {
    /// Looks up a displayed task.
    #[must_use]
    pub fn task(&self, task_id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id() == task_id)
    }

    /// Returns the rendered tasks of one column in display order.
    #[must_use]
    pub fn column_tasks(&self, status: TaskStatus) -> Vec<&Task> {
        self.board
            .column(status)
            .task_ids()
            .iter()
            .filter_map(|task_id| self.task(task_id))
            .collect()
    }
}

#[derive(Debug, Default)]
struct BoardInner {
    snapshot: Arc<Vec<Task>>,
    filters: FilterState,
    pending: HashMap<TaskId, TaskStatus>,
    local_orders: HashMap<TaskStatus, Vec<TaskId>>,
    stale: bool,
    mounted: bool,
    epoch: u64,
}

impl BoardInner {
    const fn is_current(&self, epoch: u64) -> bool {
        self.mounted && self.epoch == epoch
    }

    /// Confirmed tasks with pending overrides applied, in display order.
    fn displayed_tasks(&self) -> Vec<Task> {
        let mut tasks: Vec<Task> = self
            .snapshot
            .iter()
            .map(|task| {
                self.pending
                    .get(task.id())
                    .map_or_else(|| task.clone(), |status| task.with_status(*status))
            })
            .collect();
        if !self.local_orders.is_empty() {
            // Stable: tasks without a local slot keep the store order after
            // the reordered ones of their column.
            tasks.sort_by_key(|task| self.local_rank(task));
        }
        tasks
    }

    fn local_rank(&self, task: &Task) -> usize {
        self.local_orders
            .get(&task.status())
            .and_then(|order| order.iter().position(|id| id == task.id()))
            .unwrap_or(usize::MAX)
    }
}

/// Shared board state. Only the coordinator writes it.
#[derive(Debug)]
pub(crate) struct BoardState {
    inner: RwLock<BoardInner>,
    revision: watch::Sender<u64>,
}

impl Default for BoardState {
    fn default() -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            inner: RwLock::new(BoardInner::default()),
            revision,
        }
    }
}

impl BoardState {
    fn read(&self) -> RwLockReadGuard<'_, BoardInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, BoardInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn bump(&self) {
        self.revision.send_modify(|revision| *revision += 1);
    }

    /// Applies `update` when `epoch` is still the mounted one and bumps the
    /// revision. Returns `false` when the update was suppressed.
    fn update_current(&self, epoch: u64, update: impl FnOnce(&mut BoardInner)) -> bool {
        {
            let mut inner = self.write();
            if !inner.is_current(epoch) {
                return false;
            }
            update(&mut inner);
        }
        self.bump();
        true
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    pub(crate) fn epoch(&self) -> u64 {
        self.read().epoch
    }

    pub(crate) fn is_mounted(&self) -> bool {
        self.read().mounted
    }

    pub(crate) fn is_current(&self, epoch: u64) -> bool {
        self.read().is_current(epoch)
    }

    /// Starts a new mounted lifetime with default filters and returns its
    /// epoch. Overrides of earlier lifetimes are discarded.
    pub(crate) fn mount(&self) -> u64 {
        let epoch = {
            let mut inner = self.write();
            inner.epoch += 1;
            inner.mounted = true;
            inner.filters = FilterState::default();
            inner.pending.clear();
            inner.local_orders.clear();
            inner.epoch
        };
        self.bump();
        epoch
    }

    pub(crate) fn unmount(&self) {
        self.write().mounted = false;
        self.bump();
    }

    /// Returns the last confirmed version of a task.
    pub(crate) fn confirmed_task(&self, task_id: &TaskId) -> Option<Task> {
        self.read()
            .snapshot
            .iter()
            .find(|task| task.id() == task_id)
            .cloned()
    }

    pub(crate) fn pending_status(&self, task_id: &TaskId) -> Option<TaskStatus> {
        self.read().pending.get(task_id).copied()
    }

    pub(crate) fn set_pending(&self, epoch: u64, task_id: &TaskId, status: TaskStatus) -> bool {
        self.update_current(epoch, |inner| {
            inner.pending.insert(task_id.clone(), status);
        })
    }

    pub(crate) fn clear_pending(&self, epoch: u64, task_id: &TaskId) -> bool {
        self.update_current(epoch, |inner| {
            inner.pending.remove(task_id);
        })
    }

    /// Swaps in a freshly fetched collection.
    ///
    /// Pending overrides for which `keep_pending` returns `false` are cleared
    /// in the same step, so readers see either the old state or the
    /// refreshed one. Local orderings reset.
    pub(crate) fn replace_snapshot(
        &self,
        epoch: u64,
        tasks: Vec<Task>,
        keep_pending: impl Fn(&TaskId) -> bool,
    ) -> bool {
        self.update_current(epoch, |inner| {
            inner.snapshot = Arc::new(tasks);
            inner.local_orders.clear();
            inner.stale = false;
            inner.pending.retain(|task_id, _| keep_pending(task_id));
        })
    }

    /// Applies a confirmed change locally when the refetch failed and marks
    /// the collection stale. Local orderings reset as on a refetch.
    pub(crate) fn patch_snapshot(
        &self,
        epoch: u64,
        settled: Option<&TaskId>,
        patch: impl FnOnce(&mut Vec<Task>),
    ) -> bool {
        self.update_current(epoch, |inner| {
            let mut tasks = inner.snapshot.as_ref().clone();
            patch(&mut tasks);
            inner.snapshot = Arc::new(tasks);
            inner.local_orders.clear();
            inner.stale = true;
            if let Some(task_id) = settled {
                inner.pending.remove(task_id);
            }
        })
    }

    pub(crate) fn mark_stale(&self, epoch: u64) -> bool {
        self.update_current(epoch, |inner| inner.stale = true)
    }

    pub(crate) fn filters(&self) -> FilterState {
        self.read().filters.clone()
    }

    pub(crate) fn set_filters(&self, filters: FilterState) {
        {
            let mut inner = self.write();
            if inner.filters == filters {
                return;
            }
            inner.filters = filters;
        }
        self.bump();
    }

    /// Moves a card within `column` using rendered indices.
    ///
    /// Returns `false` and leaves the board untouched when an index is out of
    /// range.
    pub(crate) fn apply_local_reorder(
        &self,
        column: TaskStatus,
        from_index: usize,
        to_index: usize,
    ) -> bool {
        {
            let mut inner = self.write();
            let tasks = inner.displayed_tasks();
            let full = project(&tasks, &FilterState::default());
            let visible = project(&tasks, &inner.filters);
            let Some(order) = reorder_within(
                full.column(column).task_ids(),
                visible.column(column).task_ids(),
                from_index,
                to_index,
            ) else {
                return false;
            };
            inner.local_orders.insert(column, order);
        }
        self.bump();
        true
    }

    pub(crate) fn view(&self) -> BoardView {
        let inner = self.read();
        let tasks = inner.displayed_tasks();
        BoardView {
            revision: *self.revision.borrow(),
            board: project(&tasks, &inner.filters),
            assignees: unique_assignees(&inner.snapshot),
            filters: inner.filters.clone(),
            stale: inner.stale,
            tasks,
        }
    }
}
