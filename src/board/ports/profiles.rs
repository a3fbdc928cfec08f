//! Profile directory port used to resolve assignees.

use crate::board::domain::{UserId, UserProfile};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Read-only lookup of user profiles.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileDirectory: Send + Sync {
    /// Finds a profile by identifier.
    ///
    /// Returns `None` when no profile exists.
    async fn find(&self, id: &UserId) -> Result<Option<UserProfile>, ProfileDirectoryError>;
}

/// Errors returned by profile directory implementations.
#[derive(Debug, Clone, Error)]
pub enum ProfileDirectoryError {
    /// Lookup failed.
    #[error("profile lookup failed: {0}")]
    Lookup(Arc<dyn std::error::Error + Send + Sync>),
}

impl ProfileDirectoryError {
    /// Wraps a lookup error.
    pub fn lookup(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Lookup(Arc::new(err))
    }
}
