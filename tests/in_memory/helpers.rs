//! Shared helpers for in-memory board integration tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use taskboard::board::{
    adapters::memory::{
        InMemoryCommentThread, InMemoryProfileDirectory, InMemoryTaskStore, RecordingDispatcher,
        RecordingNotifier,
    },
    domain::{Task, TaskDraft, TaskId, TaskStatus, UserId, UserProfile},
    ports::{TaskStore, TaskStoreError, TaskStoreResult},
    services::{BoardConfig, MutationCoordinator},
};
use tokio::sync::Semaphore;

/// Task rows: `1` and `2` scheduled, `3` in progress and `4` completed,
/// listed newest first.
pub const SEED_ROWS: &str = r#"[
    {
        "id": "1",
        "description": "Draft roadmap",
        "status": "scheduled",
        "priority": "high",
        "deadline": "2026-03-20T17:00:00Z",
        "user_id": "user-ada",
        "profile": { "id": "user-ada", "name": "Ada" },
        "created_at": "2026-03-02T12:00:00Z",
        "updated_at": "2026-03-02T12:00:00Z"
    },
    {
        "id": "2",
        "description": "Book venue",
        "status": "scheduled",
        "priority": "low",
        "deadline": "2026-03-21T17:00:00Z",
        "user_id": "user-grace",
        "profile": { "id": "user-grace", "name": "Grace" },
        "created_at": "2026-03-02T11:00:00Z",
        "updated_at": "2026-03-02T11:00:00Z"
    },
    {
        "id": "3",
        "description": "Fix login bug",
        "status": "in_progress",
        "priority": "high",
        "deadline": "2026-03-10T17:00:00Z",
        "user_id": "user-grace",
        "profile": { "id": "user-grace", "name": "Grace" },
        "created_at": "2026-03-02T10:00:00Z",
        "updated_at": "2026-03-03T09:00:00Z"
    },
    {
        "id": "4",
        "description": "Archive old boards",
        "status": "completed",
        "priority": "medium",
        "deadline": "2026-03-05T17:00:00Z",
        "created_at": "2026-03-02T09:00:00Z",
        "updated_at": "2026-03-04T09:00:00Z"
    }
]"#;

/// Parses a task identifier.
#[must_use]
pub fn task_id(value: &str) -> TaskId {
    TaskId::new(value).expect("valid task id")
}

/// Parses a user identifier.
#[must_use]
pub fn user_id(value: &str) -> UserId {
    UserId::new(value).expect("valid user id")
}

/// Profiles referenced by [`SEED_ROWS`].
#[must_use]
pub fn profiles() -> InMemoryProfileDirectory {
    InMemoryProfileDirectory::with_profiles([
        UserProfile::new(user_id("user-ada"), "Ada"),
        UserProfile::new(user_id("user-grace"), "Grace"),
    ])
}

/// Ids of one column of the coordinator's current board.
#[must_use]
pub fn column_ids<S, P, M, N>(
    coordinator: &MutationCoordinator<S, P, M, N>,
    status: TaskStatus,
) -> Vec<String>
where
    S: TaskStore + 'static,
    P: taskboard::board::ports::ProfileDirectory,
    M: taskboard::board::ports::CommentThread + 'static,
    N: taskboard::board::ports::BoardNotifier + 'static,
{
    coordinator
        .board()
        .column(status)
        .task_ids()
        .iter()
        .map(ToString::to_string)
        .collect()
}

/// Coordinator over the in-memory store.
pub type MemoryCoordinator = MutationCoordinator<
    InMemoryTaskStore,
    InMemoryProfileDirectory,
    InMemoryCommentThread,
    RecordingNotifier,
>;

/// A mounted board over the in-memory adapters.
pub struct BoardHarness {
    pub coordinator: MemoryCoordinator,
    pub store: Arc<InMemoryTaskStore>,
    pub notifier: Arc<RecordingNotifier>,
    pub dispatcher: Arc<RecordingDispatcher>,
}

/// Seeds the in-memory store with [`SEED_ROWS`] and mounts a board over it.
pub async fn mounted_board(config: BoardConfig) -> BoardHarness {
    let dispatcher = Arc::new(RecordingDispatcher::new());
    let base: InMemoryTaskStore = InMemoryTaskStore::default();
    let store = Arc::new(base.with_dispatcher(dispatcher.clone()));
    store.seed_json(SEED_ROWS).expect("seed rows should load");
    let notifier = Arc::new(RecordingNotifier::new());
    let coordinator: MemoryCoordinator = MutationCoordinator::new(
        Arc::clone(&store),
        Arc::new(profiles()),
        Arc::new(InMemoryCommentThread::default()),
        Arc::clone(&notifier),
    )
    .with_config(config);
    coordinator.mount().await.expect("mount should succeed");
    BoardHarness {
        coordinator,
        store,
        notifier,
        dispatcher,
    }
}

/// Store whose status updates wait at a gate until the test releases them.
///
/// Tracks how many updates are in flight per task so tests can assert
/// serialization.
pub struct GatedStore {
    inner: InMemoryTaskStore,
    gate: Semaphore,
    update_calls: AtomicUsize,
    in_flight: Mutex<HashMap<TaskId, usize>>,
    max_in_flight: AtomicUsize,
    reject_updates: Mutex<Option<TaskStoreError>>,
}

impl GatedStore {
    /// Creates a closed gate over a store seeded with [`SEED_ROWS`].
    #[must_use]
    pub fn seeded() -> Self {
        let inner: InMemoryTaskStore = InMemoryTaskStore::default();
        inner.seed_json(SEED_ROWS).expect("seed rows should load");
        Self {
            inner,
            gate: Semaphore::new(0),
            update_calls: AtomicUsize::new(0),
            in_flight: Mutex::new(HashMap::new()),
            max_in_flight: AtomicUsize::new(0),
            reject_updates: Mutex::new(None),
        }
    }

    /// Lets `count` waiting or future updates through.
    pub fn release(&self, count: usize) {
        self.gate.add_permits(count);
    }

    /// Makes every following update fail with `err` once released.
    pub fn reject_with(&self, err: TaskStoreError) {
        *self
            .reject_updates
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(err);
    }

    /// Number of updates that reached the store.
    #[must_use]
    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }

    /// Highest number of concurrent updates observed for any single task.
    #[must_use]
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    /// Waits until `count` updates have reached the store.
    pub async fn wait_for_updates(&self, count: usize) {
        tokio::time::timeout(Duration::from_secs(5), async {
            while self.update_calls() < count {
                tokio::time::sleep(Duration::from_millis(2)).await;
            }
        })
        .await
        .expect("updates should reach the store in time");
    }

    /// Reads the stored status of a task, bypassing the gate.
    pub async fn stored_status(&self, id: &TaskId) -> Option<TaskStatus> {
        self.inner
            .list()
            .await
            .expect("list should succeed")
            .into_iter()
            .find(|task| task.id() == id)
            .map(|task| task.status())
    }

    fn enter(&self, id: &TaskId) {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        let count = in_flight.entry(id.clone()).or_default();
        *count += 1;
        self.max_in_flight.fetch_max(*count, Ordering::SeqCst);
    }

    fn leave(&self, id: &TaskId) {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(count) = in_flight.get_mut(id) {
            *count -= 1;
        }
    }
}

#[async_trait]
impl TaskStore for GatedStore {
    async fn list(&self) -> TaskStoreResult<Vec<Task>> {
        self.inner.list().await
    }

    async fn update_status(&self, id: &TaskId, status: TaskStatus) -> TaskStoreResult<()> {
        self.enter(id);
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        let opened = self.gate.acquire().await;
        let rejection = self
            .reject_updates
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        let result = match (opened, rejection) {
            (Err(err), _) => Err(TaskStoreError::Connectivity(err.to_string())),
            (Ok(permit), Some(err)) => {
                permit.forget();
                Err(err)
            }
            (Ok(permit), None) => {
                permit.forget();
                self.inner.update_status(id, status).await
            }
        };
        self.leave(id);
        result
    }

    async fn create(&self, draft: &TaskDraft) -> TaskStoreResult<Task> {
        self.inner.create(draft).await
    }

    async fn delete(&self, id: &TaskId) -> TaskStoreResult<()> {
        self.inner.delete(id).await
    }
}

/// Coordinator over a [`GatedStore`].
pub type GatedCoordinator = MutationCoordinator<
    GatedStore,
    InMemoryProfileDirectory,
    InMemoryCommentThread,
    RecordingNotifier,
>;

/// Mounts a board over a fresh [`GatedStore`].
pub async fn gated_board(
    config: BoardConfig,
) -> (GatedCoordinator, Arc<GatedStore>, Arc<RecordingNotifier>) {
    let store = Arc::new(GatedStore::seeded());
    let notifier = Arc::new(RecordingNotifier::new());
    let coordinator: GatedCoordinator = MutationCoordinator::new(
        Arc::clone(&store),
        Arc::new(profiles()),
        Arc::new(InMemoryCommentThread::default()),
        Arc::clone(&notifier),
    )
    .with_config(config);
    coordinator.mount().await.expect("mount should succeed");
    (coordinator, store, notifier)
}
