//! Board coordination settings.

use serde::Deserialize;

/// What happens to a mutation for a task that already has one in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InFlightPolicy {
    /// Wait until the earlier mutation settles, then run.
    #[default]
    Queue,
    /// Fail fast with "update already in progress".
    Reject,
}

/// How a status change is shown while the store has not confirmed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateStrategy {
    /// Keep the task in its confirmed column until the store answers.
    #[default]
    Pessimistic,
    /// Show the task in the target column at once and revert on failure.
    Optimistic,
}

/// Configuration for the mutation coordinator.
///
/// # Examples
///
/// ```
/// use taskboard::board::services::{BoardConfig, InFlightPolicy, UpdateStrategy};
///
/// let config = BoardConfig::default();
/// assert_eq!(config.in_flight_policy, InFlightPolicy::Queue);
/// assert_eq!(config.update_strategy, UpdateStrategy::Pessimistic);
///
/// let parsed = BoardConfig::from_json(r#"{"update_strategy": "optimistic"}"#)
///     .expect("valid configuration");
/// assert_eq!(parsed.update_strategy, UpdateStrategy::Optimistic);
/// assert_eq!(parsed.retry_limit, 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Per-task serialization policy.
    pub in_flight_policy: InFlightPolicy,
    /// Presentation of unconfirmed status changes.
    pub update_strategy: UpdateStrategy,
    /// Extra attempts for idempotent requests after a connectivity failure.
    pub retry_limit: u32,
    /// Maximum task description length in characters.
    pub max_description_length: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            in_flight_policy: InFlightPolicy::Queue,
            update_strategy: UpdateStrategy::Pessimistic,
            retry_limit: 0,
            max_description_length: 2000,
        }
    }
}

impl BoardConfig {
    /// Parses a configuration document; missing keys take default values.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`serde_json::Error`] for malformed documents.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Sets the per-task serialization policy.
    #[must_use]
    pub const fn with_in_flight_policy(mut self, policy: InFlightPolicy) -> Self {
        self.in_flight_policy = policy;
        self
    }

    /// Sets the presentation of unconfirmed status changes.
    #[must_use]
    pub const fn with_update_strategy(mut self, strategy: UpdateStrategy) -> Self {
        self.update_strategy = strategy;
        self
    }

    /// Sets the retry limit for idempotent requests.
    #[must_use]
    pub const fn with_retry_limit(mut self, retry_limit: u32) -> Self {
        self.retry_limit = retry_limit;
        self
    }

    /// Sets the maximum description length.
    #[must_use]
    pub const fn with_max_description_length(mut self, max: usize) -> Self {
        self.max_description_length = max;
        self
    }
}
