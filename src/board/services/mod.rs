//! Application services for the task board.
//!
//! Projection and drag translation are pure functions; the
//! [`MutationCoordinator`] owns board state and every write against the
//! store.

mod config;
mod coordinator;
mod drag;
mod error;
mod in_flight;
mod projector;
mod state;


pub use config::{BoardConfig, InFlightPolicy, UpdateStrategy};
pub use coordinator::{CreateTaskRequest, MutationCoordinator};
pub use drag::{reorder_within, translate};
pub use error::{BoardError, BoardResult, ValidationError};
pub use projector::{project, unique_assignees};
pub use state::BoardView;
