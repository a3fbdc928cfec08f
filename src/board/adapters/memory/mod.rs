//! In-memory adapters for board ports.
//!
//! Useful for tests, demos and embedding the board without a remote store.

mod comments;
mod notifier;
mod profiles;
mod store;

pub use comments::InMemoryCommentThread;
pub use notifier::{RecordingDispatcher, RecordingNotifier};
pub use profiles::InMemoryProfileDirectory;
pub use store::InMemoryTaskStore;
