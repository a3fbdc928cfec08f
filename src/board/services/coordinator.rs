//! Mutation coordination for the task board.
//!
//! The coordinator is the only writer of board state. Every mutation follows
//! the same protocol: validate locally, then hand the write and its
//! settlement to a detached runtime task. Settlement refetches the collection
//! (success) or restores the last confirmed state (failure) and surfaces the
//! outcome as a notification. It runs to completion even when the caller goes
//! away; only a view that was unmounted in the meantime stays untouched.

use super::{
    BoardConfig, BoardError, BoardResult, UpdateStrategy, ValidationError,
    drag::translate,
    in_flight::{InFlightPermit, InFlightRegistry},
    state::{BoardState, BoardView},
};
use crate::board::{
    domain::{
        Board, Comment, CommentId, CommentText, DragIntent, DropEvent, FilterState, Notification,
        Priority, Selection, Task, TaskDraft, TaskId, TaskStatus, UserId,
    },
    ports::{
        BoardNotifier, CommentThread, ProfileDirectory, TaskStore, TaskStoreError,
        TaskStoreResult,
    },
};
use chrono::{DateTime, Utc};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinError;
use tracing::{debug, info, warn};

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    description: String,
    priority: Priority,
    deadline: DateTime<Utc>,
    assignee: UserId,
}

impl CreateTaskRequest {
    /// Creates a request. The new task always starts in the scheduled column.
    #[must_use]
    pub fn new(
        description: impl Into<String>,
        priority: Priority,
        deadline: DateTime<Utc>,
        assignee: UserId,
    ) -> Self {
        Self {
            description: description.into(),
            priority,
            deadline,
            assignee,
        }
    }
}

/// Runs `future` on its own runtime task so that dropping the caller does not
/// cancel an issued write.
async fn detached<T>(future: impl Future<Output = T> + Send + 'static) -> Result<T, JoinError>
where
    T: Send + 'static,
{
    tokio::spawn(future).await
}

/// Repeats `attempt` after transient failures, at most `retry_limit` times.
async fn with_retries<T, F, Fut>(retry_limit: u32, mut attempt: F) -> TaskStoreResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = TaskStoreResult<T>>,
{
    let mut retries = 0;
    loop {
        match attempt().await {
            Err(err) if err.is_transient() && retries < retry_limit => {
                retries += 1;
                debug!(retry = retries, error = %err, "retrying store request");
            }
            outcome => return outcome,
        }
    }
}

/// Handles a mutation settles against.
///
/// A clone travels into the detached task together with the write, so the
/// board is updated and the user notified whether or not the caller still
/// waits for the outcome.
struct Settlement<S, M, N> {
    store: Arc<S>,
    comments: Arc<M>,
    notifier: Arc<N>,
    state: Arc<BoardState>,
    in_flight: Arc<InFlightRegistry>,
    retry_limit: u32,
    epoch: u64,
}

impl<S, M, N> Clone for Settlement<S, M, N> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            comments: Arc::clone(&self.comments),
            notifier: Arc::clone(&self.notifier),
            state: Arc::clone(&self.state),
            in_flight: Arc::clone(&self.in_flight),
            retry_limit: self.retry_limit,
            epoch: self.epoch,
        }
    }
}

impl<S, M, N> Settlement<S, M, N>
where
    S: TaskStore,
    M: CommentThread,
    N: BoardNotifier,
{
    async fn change_status(
        &self,
        permit: InFlightPermit,
        task_id: &TaskId,
        from: TaskStatus,
        to: TaskStatus,
    ) -> BoardResult<()> {
        let written = with_retries(self.retry_limit, || self.store.update_status(task_id, to)).await;
        let outcome = match written {
            Ok(()) => {
                info!(task_id = %task_id, from = %from, to = %to, "status change confirmed");
                self.settle(Some(task_id), |tasks| {
                    if let Some(task) = tasks.iter_mut().find(|task| task.id() == task_id) {
                        *task = task.with_status(to);
                    }
                })
                .await;
                self.notify(Notification::success(
                    "Task updated",
                    format!("Task {task_id} moved to {}", to.title()),
                    Some(task_id.clone()),
                ));
                Ok(())
            }
            Err(source) => {
                self.state.clear_pending(self.epoch, task_id);
                let vanished = matches!(source, TaskStoreError::NotFound(_));
                if vanished {
                    self.resync().await;
                }
                let err = BoardError::from(source);
                self.report_failure("Could not update task", Some(task_id), &err);
                Err(err)
            }
        };
        drop(permit);
        outcome
    }

    async fn create(&self, draft: &TaskDraft) -> BoardResult<Task> {
        // Creation is not idempotent and is never retried.
        match self.store.create(draft).await {
            Ok(task) => {
                info!(task_id = %task.id(), "task created");
                let inserted = task.clone();
                self.settle(None, move |tasks| tasks.insert(0, inserted))
                    .await;
                self.notify(Notification::success(
                    "Task created",
                    format!("Task {} added to {}", task.id(), task.status().title()),
                    Some(task.id().clone()),
                ));
                Ok(task)
            }
            Err(source) => {
                let err = BoardError::from(source);
                self.report_failure("Could not create task", None, &err);
                Err(err)
            }
        }
    }

    async fn delete(&self, permit: InFlightPermit, task_id: &TaskId) -> BoardResult<()> {
        let outcome = match self.store.delete(task_id).await {
            Ok(()) => {
                info!(task_id = %task_id, "task deleted");
                self.settle(Some(task_id), |tasks| {
                    tasks.retain(|task| task.id() != task_id);
                })
                .await;
                self.notify(Notification::success(
                    "Task deleted",
                    format!("Task {task_id} deleted"),
                    Some(task_id.clone()),
                ));
                Ok(())
            }
            Err(source) => {
                if matches!(source, TaskStoreError::NotFound(_)) {
                    self.resync().await;
                }
                let err = BoardError::from(source);
                self.report_failure("Could not delete task", Some(task_id), &err);
                Err(err)
            }
        };
        drop(permit);
        outcome
    }

    async fn add_comment(
        &self,
        task_id: &TaskId,
        author: &UserId,
        body: &CommentText,
    ) -> BoardResult<Comment> {
        match self.comments.add(task_id, author, body).await {
            Ok(comment) => {
                self.notify(Notification::success(
                    "Comment added",
                    format!("Comment added to task {task_id}"),
                    Some(task_id.clone()),
                ));
                Ok(comment)
            }
            Err(source) => {
                let err = BoardError::from(source);
                self.report_failure("Could not add comment", Some(task_id), &err);
                Err(err)
            }
        }
    }

    async fn delete_comment(&self, comment_id: &CommentId) -> BoardResult<()> {
        match self.comments.delete(comment_id).await {
            Ok(()) => {
                self.notify(Notification::success(
                    "Comment deleted",
                    format!("Comment {comment_id} deleted"),
                    None,
                ));
                Ok(())
            }
            Err(source) => {
                let err = BoardError::from(source);
                self.report_failure("Could not delete comment", None, &err);
                Err(err)
            }
        }
    }

    async fn fetch_tasks(&self) -> TaskStoreResult<Vec<Task>> {
        with_retries(self.retry_limit, || self.store.list()).await
    }

    /// Overrides survive a refetch only while their write is in flight.
    fn keeps_pending<'a>(&'a self, settled: Option<&'a TaskId>) -> impl Fn(&TaskId) -> bool + 'a {
        move |task_id| settled != Some(task_id) && self.in_flight.is_busy(task_id)
    }

    /// Refetches after a confirmed write. When the refetch fails the
    /// confirmed change is patched in locally and the view marked stale.
    async fn settle(&self, settled: Option<&TaskId>, patch: impl FnOnce(&mut Vec<Task>)) {
        match self.fetch_tasks().await {
            Ok(tasks) => {
                if !self
                    .state
                    .replace_snapshot(self.epoch, tasks, self.keeps_pending(settled))
                {
                    debug!("view unmounted, refreshed collection dropped");
                }
            }
            Err(err) => {
                warn!(error = %err, "refetch after confirmed write failed");
                if self.state.patch_snapshot(self.epoch, settled, patch) {
                    self.notify(Notification::error(
                        "Could not refresh tasks",
                        err.to_string(),
                        None,
                    ));
                }
            }
        }
    }

    /// Best-effort refetch after the store reported a vanished task.
    async fn resync(&self) {
        match self.fetch_tasks().await {
            Ok(tasks) => {
                self.state
                    .replace_snapshot(self.epoch, tasks, self.keeps_pending(None));
            }
            Err(err) => {
                warn!(error = %err, "resync after stale mutation failed");
                self.state.mark_stale(self.epoch);
            }
        }
    }

    /// Unwraps the outcome of a detached settlement. A settlement that did
    /// not run to completion is reported here instead.
    fn joined<T>(
        &self,
        title: &str,
        task_id: Option<&TaskId>,
        joined: Result<BoardResult<T>, JoinError>,
    ) -> BoardResult<T> {
        joined.unwrap_or_else(|source| {
            let err = BoardError::Store(TaskStoreError::persistence(source));
            self.report_failure(title, task_id, &err);
            Err(err)
        })
    }

    fn notify(&self, notification: Notification) {
        if self.state.is_current(self.epoch) {
            self.notifier.notify(notification);
        } else {
            debug!(title = notification.title(), "view unmounted, notification dropped");
        }
    }

    fn report_failure(&self, title: &str, task_id: Option<&TaskId>, err: &BoardError) {
        warn!(task_id = ?task_id.map(TaskId::as_str), error = %err, "{title}");
        let message = task_id.map_or_else(
            || err.to_string(),
            |id| format!("Task {id}: {err}"),
        );
        self.notify(Notification::error(title, message, task_id.cloned()));
    }
}

/// Owns the board state and every write against the task store.
pub struct MutationCoordinator<S, P, M, N>
where
    S: TaskStore + 'static,
    P: ProfileDirectory,
    M: CommentThread + 'static,
    N: BoardNotifier + 'static,
{
    store: Arc<S>,
    profiles: Arc<P>,
    comments: Arc<M>,
    notifier: Arc<N>,
    config: BoardConfig,
    state: Arc<BoardState>,
    in_flight: Arc<InFlightRegistry>,
}

impl<S, P, M, N> MutationCoordinator<S, P, M, N>
where
    S: TaskStore + 'static,
    P: ProfileDirectory,
    M: CommentThread + 'static,
    N: BoardNotifier + 'static,
{
    /// Creates an unmounted coordinator with default configuration.
    #[must_use]
    pub fn new(store: Arc<S>, profiles: Arc<P>, comments: Arc<M>, notifier: Arc<N>) -> Self {
        Self {
            store,
            profiles,
            comments,
            notifier,
            config: BoardConfig::default(),
            state: Arc::default(),
            in_flight: Arc::default(),
        }
    }

    /// Replaces the configuration.
    #[must_use]
    pub const fn with_config(mut self, config: BoardConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &BoardConfig {
        &self.config
    }

    // ---- view ------------------------------------------------------------

    /// Subscribes to board revisions. The value changes whenever the
    /// projection inputs change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.state.subscribe()
    }

    /// Returns a consistent render-ready view.
    #[must_use]
    pub fn view(&self) -> BoardView {
        self.state.view()
    }

    /// Returns the projected columns under the active filters.
    #[must_use]
    pub fn board(&self) -> Board {
        self.state.view().board
    }

    /// Returns assignee names for the assignee selector.
    #[must_use]
    pub fn unique_assignees(&self) -> Vec<String> {
        self.state.view().assignees
    }

    /// Returns the status a task is optimistically shown under, if any.
    #[must_use]
    pub fn pending_status(&self, task_id: &TaskId) -> Option<TaskStatus> {
        self.state.pending_status(task_id)
    }

    /// Returns `true` while the board view is mounted.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.state.is_mounted()
    }

    // ---- filters ---------------------------------------------------------

    /// Returns the active filter selections.
    #[must_use]
    pub fn filters(&self) -> FilterState {
        self.state.filters()
    }

    /// Selects a priority. Never contacts the store.
    pub fn set_priority_filter(&self, priority: Selection<Priority>) {
        self.state
            .set_filters(self.state.filters().with_priority(priority));
    }

    /// Selects an assignee by display name. Never contacts the store.
    pub fn set_assignee_filter(&self, assignee: Selection<String>) {
        self.state
            .set_filters(self.state.filters().with_assignee(assignee));
    }

    /// Resets both selections to "all".
    pub fn reset_filters(&self) {
        self.state.set_filters(FilterState::default());
    }

    // ---- lifecycle -------------------------------------------------------

    /// Mounts the board view: filters reset to "all" and the collection is
    /// loaded.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Store`] when the initial load fails.
    pub async fn mount(&self) -> BoardResult<()> {
        let epoch = self.state.mount();
        debug!(epoch, "board mounted");
        self.load(epoch).await
    }

    /// Unmounts the board view. Writes already issued still complete, but
    /// their settlement no longer updates state or notifies.
    pub fn unmount(&self) {
        self.state.unmount();
        debug!("board unmounted");
    }

    /// Refetches the collection. Resets ephemeral column orderings and drops
    /// overrides whose write already settled.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Store`] when the fetch fails.
    pub async fn refresh(&self) -> BoardResult<()> {
        self.load(self.state.epoch()).await
    }

    async fn load(&self, epoch: u64) -> BoardResult<()> {
        let settlement = self.settlement(epoch);
        match settlement.fetch_tasks().await {
            Ok(tasks) => {
                debug!(count = tasks.len(), "task collection loaded");
                self.state
                    .replace_snapshot(epoch, tasks, settlement.keeps_pending(None));
                Ok(())
            }
            Err(source) => {
                let err = BoardError::Store(source);
                settlement.report_failure("Could not load tasks", None, &err);
                Err(err)
            }
        }
    }

    // ---- drag and drop ---------------------------------------------------

    /// Translates a drop gesture and carries out the resulting intent.
    ///
    /// No-ops never reach the store, local reorders only touch the view, and
    /// status changes go through [`Self::apply_status_change`].
    ///
    /// # Errors
    ///
    /// Returns the status change error for cross-column drops.
    pub async fn handle_drop(&self, event: &DropEvent) -> BoardResult<DragIntent> {
        let intent = translate(event);
        match &intent {
            DragIntent::NoOp => {
                debug!(task_id = %event.task_id, "drop without movement");
            }
            DragIntent::LocalReorder {
                column,
                from_index,
                to_index,
            } => {
                if !self
                    .state
                    .apply_local_reorder(*column, *from_index, *to_index)
                {
                    debug!(
                        column = %column,
                        from_index,
                        to_index,
                        "reorder outside rendered range ignored"
                    );
                }
            }
            DragIntent::StatusChange {
                task_id,
                new_status,
            } => self.apply_status_change(task_id, *new_status).await?,
        }
        Ok(intent)
    }

    // ---- task mutations --------------------------------------------------

    /// Moves a task to another status.
    ///
    /// Once the write is issued, dropping the returned future no longer
    /// affects it: the board still settles and the outcome is still
    /// notified.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Validation`] when the task is not on the board or
    /// another update for it is in flight under the reject policy,
    /// [`BoardError::StaleState`] when the task vanished from the store, and
    /// [`BoardError::Store`] when the write fails. The board keeps or
    /// restores the task's last confirmed column on every error.
    pub async fn apply_status_change(
        &self,
        task_id: &TaskId,
        new_status: TaskStatus,
    ) -> BoardResult<()> {
        let settlement = self.settlement(self.state.epoch());
        let (permit, from) = match self.claim_status_change(task_id, new_status).await {
            Ok(Some(claimed)) => claimed,
            Ok(None) => return Ok(()),
            Err(err) => {
                settlement.report_failure("Could not update task", Some(task_id), &err);
                return Err(err);
            }
        };

        if self.config.update_strategy == UpdateStrategy::Optimistic {
            self.state.set_pending(settlement.epoch, task_id, new_status);
        }

        let detached_settlement = settlement.clone();
        let target = task_id.clone();
        let joined = detached(async move {
            detached_settlement
                .change_status(permit, &target, from, new_status)
                .await
        })
        .await;
        settlement.joined("Could not update task", Some(task_id), joined)
    }

    /// Takes the task's mutation slot and checks the move against the
    /// confirmed snapshot. Returns `None` when the task already has
    /// `new_status`.
    async fn claim_status_change(
        &self,
        task_id: &TaskId,
        new_status: TaskStatus,
    ) -> BoardResult<Option<(InFlightPermit, TaskStatus)>> {
        let permit = self
            .in_flight
            .acquire(task_id, self.config.in_flight_policy)
            .await?;
        let current = self
            .state
            .confirmed_task(task_id)
            .ok_or_else(|| ValidationError::UnknownTask(task_id.clone()))?;
        if current.status() == new_status {
            debug!(task_id = %task_id, status = %new_status, "status unchanged");
            return Ok(None);
        }
        Ok(Some((permit, current.status())))
    }

    /// Creates a task in the scheduled column and returns it with its
    /// store-issued identifier.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Validation`] for a blank or oversized description
    /// or an unknown assignee (the store is not contacted), and
    /// [`BoardError::Store`] when the write fails.
    pub async fn create_task(&self, request: CreateTaskRequest) -> BoardResult<Task> {
        let settlement = self.settlement(self.state.epoch());
        let draft = match self.draft(request).await {
            Ok(draft) => draft,
            Err(err) => {
                settlement.report_failure("Could not create task", None, &err);
                return Err(err);
            }
        };

        let detached_settlement = settlement.clone();
        let joined = detached(async move { detached_settlement.create(&draft).await }).await;
        settlement.joined("Could not create task", None, joined)
    }

    async fn draft(&self, request: CreateTaskRequest) -> BoardResult<TaskDraft> {
        let CreateTaskRequest {
            description,
            priority,
            deadline,
            assignee,
        } = request;
        let max = self.config.max_description_length;
        let trimmed = TaskDraft::checked_description(&description, max)?;
        let found = self.profiles.find(&assignee).await?;
        let profile = found.ok_or(ValidationError::UnknownAssignee(assignee))?;
        Ok(TaskDraft::new(
            &trimmed,
            priority,
            deadline,
            profile.to_assignee()?,
            max,
        )?)
    }

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::StaleState`] when the task was already gone and
    /// [`BoardError::Store`] when the write fails.
    pub async fn delete_task(&self, task_id: &TaskId) -> BoardResult<()> {
        let settlement = self.settlement(self.state.epoch());
        let permit = match self
            .in_flight
            .acquire(task_id, self.config.in_flight_policy)
            .await
        {
            Ok(permit) => permit,
            Err(source) => {
                let err = BoardError::from(source);
                settlement.report_failure("Could not delete task", Some(task_id), &err);
                return Err(err);
            }
        };

        let detached_settlement = settlement.clone();
        let target = task_id.clone();
        let joined =
            detached(async move { detached_settlement.delete(permit, &target).await }).await;
        settlement.joined("Could not delete task", Some(task_id), joined)
    }

    // ---- comments --------------------------------------------------------

    /// Lists the comments of a task, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Comment`] when the thread cannot be read.
    pub async fn list_comments(&self, task_id: &TaskId) -> BoardResult<Vec<Comment>> {
        let settlement = self.settlement(self.state.epoch());
        self.comments.list(task_id).await.map_err(|source| {
            let err = BoardError::from(source);
            settlement.report_failure("Could not load comments", Some(task_id), &err);
            err
        })
    }

    /// Adds a comment to a task.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Validation`] for blank text (the thread is not
    /// contacted) and [`BoardError::Comment`] when the write fails.
    pub async fn add_comment(
        &self,
        task_id: &TaskId,
        author: &UserId,
        text: &str,
    ) -> BoardResult<Comment> {
        let settlement = self.settlement(self.state.epoch());
        let body = match CommentText::new(text) {
            Ok(body) => body,
            Err(source) => {
                let err = BoardError::from(source);
                settlement.report_failure("Could not add comment", Some(task_id), &err);
                return Err(err);
            }
        };

        let detached_settlement = settlement.clone();
        let task = task_id.clone();
        let user = author.clone();
        let joined = detached(async move {
            detached_settlement.add_comment(&task, &user, &body).await
        })
        .await;
        settlement.joined("Could not add comment", Some(task_id), joined)
    }

    /// Deletes a comment.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Comment`] when the comment is missing or the
    /// write fails.
    pub async fn delete_comment(&self, comment_id: &CommentId) -> BoardResult<()> {
        let settlement = self.settlement(self.state.epoch());
        let detached_settlement = settlement.clone();
        let id = comment_id.clone();
        let joined =
            detached(async move { detached_settlement.delete_comment(&id).await }).await;
        settlement.joined("Could not delete comment", None, joined)
    }

    fn settlement(&self, epoch: u64) -> Settlement<S, M, N> {
        Settlement {
            store: Arc::clone(&self.store),
            comments: Arc::clone(&self.comments),
            notifier: Arc::clone(&self.notifier),
            state: Arc::clone(&self.state),
            in_flight: Arc::clone(&self.in_flight),
            retry_limit: self.config.retry_limit,
            epoch,
        }
    }
}
