//! Recording notifier and dispatcher.

use async_trait::async_trait;
use std::sync::{Arc, Mutex, PoisonError};

use crate::board::{
    domain::{Notification, TaskChangeEvent},
    ports::{BoardNotifier, DispatchError, TaskChangeDispatcher},
};

/// Notifier that keeps every notification it receives.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    received: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingNotifier {
    /// Creates an empty notifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the notifications received so far, oldest first.
    #[must_use]
    pub fn notifications(&self) -> Vec<Notification> {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Removes and returns the notifications received so far.
    #[must_use]
    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.received.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl BoardNotifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);
    }
}

/// Dispatcher that keeps every event and can be told to fail.
#[derive(Debug, Clone, Default)]
pub struct RecordingDispatcher {
    events: Arc<Mutex<Vec<TaskChangeEvent>>>,
    failing: bool,
}

impl RecordingDispatcher {
    /// Creates a dispatcher that accepts every event.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a dispatcher that records events and then reports failure.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    /// Returns the events received so far, oldest first.
    #[must_use]
    pub fn events(&self) -> Vec<TaskChangeEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl TaskChangeDispatcher for RecordingDispatcher {
    async fn dispatch(&self, event: &TaskChangeEvent) -> Result<(), DispatchError> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
        if self.failing {
            return Err(DispatchError::delivery(std::io::Error::other(
                "mail relay unavailable",
            )));
        }
        Ok(())
    }
}
