//! In-memory profile directory.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::board::{
    domain::{UserId, UserProfile},
    ports::{ProfileDirectory, ProfileDirectoryError},
};

/// Thread-safe in-memory profile directory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProfileDirectory {
    profiles: Arc<RwLock<HashMap<UserId, UserProfile>>>,
}

impl InMemoryProfileDirectory {
    /// Creates a directory holding `profiles`.
    #[must_use]
    pub fn with_profiles(profiles: impl IntoIterator<Item = UserProfile>) -> Self {
        let by_id = profiles
            .into_iter()
            .map(|profile| (profile.id().clone(), profile))
            .collect();
        Self {
            profiles: Arc::new(RwLock::new(by_id)),
        }
    }

    /// Adds or replaces a profile.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileDirectoryError::Lookup`] when the directory lock is
    /// poisoned.
    pub fn upsert(&self, profile: UserProfile) -> Result<(), ProfileDirectoryError> {
        let mut profiles = self.profiles.write().map_err(|err| {
            ProfileDirectoryError::lookup(std::io::Error::other(err.to_string()))
        })?;
        profiles.insert(profile.id().clone(), profile);
        Ok(())
    }
}

#[async_trait]
impl ProfileDirectory for InMemoryProfileDirectory {
    async fn find(&self, id: &UserId) -> Result<Option<UserProfile>, ProfileDirectoryError> {
        let profiles = self.profiles.read().map_err(|err| {
            ProfileDirectoryError::lookup(std::io::Error::other(err.to_string()))
        })?;
        Ok(profiles.get(id).cloned())
    }
}
