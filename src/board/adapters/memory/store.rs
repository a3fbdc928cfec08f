//! In-memory task store.

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use crate::board::{
    adapters::record::TaskRecord,
    domain::{Task, TaskChangeEvent, TaskDraft, TaskId, TaskStatus},
    ports::{TaskChangeDispatcher, TaskStore, TaskStoreError, TaskStoreResult},
};

/// Thread-safe in-memory task store.
///
/// Issues UUID identifiers, stamps timestamps from the injected clock, lists
/// newest first and forwards committed changes to an optional dispatcher.
pub struct InMemoryTaskStore<C = DefaultClock>
where
    C: Clock + Send + Sync,
{
    state: Arc<RwLock<InMemoryTaskState>>,
    clock: Arc<C>,
    dispatcher: Option<Arc<dyn TaskChangeDispatcher>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, StoredTask>,
    next_sequence: u64,
}

#[derive(Debug)]
struct StoredTask {
    task: Task,
    sequence: u64,
}

impl InMemoryTaskState {
    fn insert(&mut self, task: Task) -> TaskStoreResult<()> {
        if self.tasks.contains_key(task.id()) {
            return Err(TaskStoreError::ConstraintViolation(format!(
                "duplicate task identifier: {}",
                task.id()
            )));
        }
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.tasks
            .insert(task.id().clone(), StoredTask { task, sequence });
        Ok(())
    }
}

fn poisoned(err: impl ToString) -> TaskStoreError {
    TaskStoreError::persistence(std::io::Error::other(err.to_string()))
}

impl<C> Clone for InMemoryTaskStore<C>
where
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            clock: Arc::clone(&self.clock),
            dispatcher: self.dispatcher.clone(),
        }
    }
}

impl Default for InMemoryTaskStore<DefaultClock> {
    fn default() -> Self {
        Self::new(Arc::new(DefaultClock))
    }
}

impl<C> InMemoryTaskStore<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty store stamping timestamps from `clock`.
    #[must_use]
    pub fn new(clock: Arc<C>) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryTaskState::default())),
            clock,
            dispatcher: None,
        }
    }

    /// Forwards committed changes to `dispatcher`.
    #[must_use]
    pub fn with_dispatcher(mut self, dispatcher: Arc<dyn TaskChangeDispatcher>) -> Self {
        self.dispatcher = Some(dispatcher);
        self
    }

    /// Inserts already-persisted tasks, keeping their ids and timestamps.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::ConstraintViolation`] when an id is already
    /// present.
    pub fn seed(&self, tasks: impl IntoIterator<Item = Task>) -> TaskStoreResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        for task in tasks {
            state.insert(task)?;
        }
        Ok(())
    }

    /// Inserts tasks from a JSON array of task rows and returns how many were
    /// loaded.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::Persistence`] when the document or a row is
    /// malformed, and [`TaskStoreError::ConstraintViolation`] on duplicates.
    pub fn seed_json(&self, json: &str) -> TaskStoreResult<usize> {
        let tasks = TaskRecord::parse_list(json)
            .map_err(TaskStoreError::persistence)?
            .into_iter()
            .map(Task::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(TaskStoreError::persistence)?;
        let count = tasks.len();
        self.seed(tasks)?;
        Ok(count)
    }

    async fn dispatch(&self, event: TaskChangeEvent) {
        let Some(dispatcher) = &self.dispatcher else {
            return;
        };
        if let Err(err) = dispatcher.dispatch(&event).await {
            tracing::warn!(
                task_id = %event.task_id(),
                error = %err,
                "task change dispatch failed"
            );
        }
    }
}

#[async_trait]
impl<C> TaskStore for InMemoryTaskStore<C>
where
    C: Clock + Send + Sync,
{
    async fn list(&self) -> TaskStoreResult<Vec<Task>> {
        let state = self.state.read().map_err(poisoned)?;
        let mut stored: Vec<&StoredTask> = state.tasks.values().collect();
        stored.sort_by_key(|entry| Reverse((entry.task.created_at(), entry.sequence)));
        Ok(stored.into_iter().map(|entry| entry.task.clone()).collect())
    }

    async fn update_status(&self, id: &TaskId, status: TaskStatus) -> TaskStoreResult<()> {
        let changed = {
            let mut state = self.state.write().map_err(poisoned)?;
            let entry = state
                .tasks
                .get_mut(id)
                .ok_or_else(|| TaskStoreError::NotFound(id.clone()))?;
            let changed = entry.task.status() != status;
            entry.task.transition_to(status, &*self.clock);
            changed
        };

        if changed {
            self.dispatch(TaskChangeEvent::StatusChange {
                task_id: id.clone(),
                new_status: status,
            })
            .await;
        }
        Ok(())
    }

    async fn create(&self, draft: &TaskDraft) -> TaskStoreResult<Task> {
        let id = TaskId::new(Uuid::new_v4().to_string()).map_err(TaskStoreError::persistence)?;
        let task = Task::from_draft(id, draft.clone(), &*self.clock);
        self.state.write().map_err(poisoned)?.insert(task.clone())?;

        self.dispatch(TaskChangeEvent::Assignment {
            task_id: task.id().clone(),
            assignee: draft.assignee().user_id().clone(),
        })
        .await;
        Ok(task)
    }

    async fn delete(&self, id: &TaskId) -> TaskStoreResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        state
            .tasks
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| TaskStoreError::NotFound(id.clone()))
    }
}
