//! Notification ports.

use crate::board::domain::{Notification, TaskChangeEvent};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Surfaces toasts to the user.
#[cfg_attr(test, mockall::automock)]
pub trait BoardNotifier: Send + Sync {
    /// Shows a notification.
    fn notify(&self, notification: Notification);
}

/// Downstream consumer of store-side task changes, such as an email sender.
///
/// Invoked by the store layer after a write commits. A dispatch failure never
/// rolls back or blocks the write.
#[async_trait]
pub trait TaskChangeDispatcher: Send + Sync {
    /// Delivers a change event.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError`] when delivery fails.
    async fn dispatch(&self, event: &TaskChangeEvent) -> Result<(), DispatchError>;
}

/// Errors returned by change dispatchers.
#[derive(Debug, Clone, Error)]
pub enum DispatchError {
    /// The recipient opted out of notifications.
    #[error("notifications disabled for recipient")]
    Disabled,

    /// Delivery failed.
    #[error("delivery failed: {0}")]
    Delivery(Arc<dyn std::error::Error + Send + Sync>),
}

impl DispatchError {
    /// Wraps a delivery error.
    pub fn delivery(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Delivery(Arc::new(err))
    }
}
