//! Domain model for the task board.
//!
//! Tasks are authoritative records owned by the store. Columns and boards are
//! derived views; drop events and intents are transient values that live only
//! until a mutation settles.

mod column;
mod comment;
mod error;
mod filter;
mod ids;
mod intent;
mod notification;
mod profile;
mod task;

pub use column::{Board, Column};
pub use comment::{Comment, CommentText};
pub use error::{ParsePriorityError, ParseTaskStatusError, TaskDomainError};
pub use filter::{ALL_SELECTION, FilterState, Selection};
pub use ids::{CommentId, TaskId, UserId};
pub use intent::{DragIntent, DropEvent, DropEventError, DropLocation};
pub use notification::{Notification, NotificationLevel, TaskChangeEvent};
pub use profile::UserProfile;
pub use task::{Assignee, PersistedTaskData, Priority, Task, TaskDraft, TaskStatus};
