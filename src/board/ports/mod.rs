//! Port contracts for the task board.
//!
//! Ports define infrastructure-agnostic interfaces used by board services.

pub mod comments;
pub mod notifier;
pub mod profiles;
pub mod store;

pub use comments::{CommentThread, CommentThreadError, CommentThreadResult};
pub use notifier::{BoardNotifier, DispatchError, TaskChangeDispatcher};
pub use profiles::{ProfileDirectory, ProfileDirectoryError};
pub use store::{TaskStore, TaskStoreError, TaskStoreResult};

#[cfg(test)]
pub use notifier::MockBoardNotifier;
#[cfg(test)]
pub use profiles::MockProfileDirectory;
#[cfg(test)]
pub use store::MockTaskStore;
