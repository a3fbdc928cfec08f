//! Store-issued identifiers for the board domain.
//!
//! Identifiers are opaque strings assigned by the remote store. The board
//! never synthesizes them; it only validates that they are non-blank.

use super::TaskDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! store_identifier {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps a store-issued identifier.
            ///
            /// # Errors
            ///
            /// Returns [`TaskDomainError::EmptyIdentifier`] when the value is
            /// empty or whitespace only.
            pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
                let raw = value.into();
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    return Err(TaskDomainError::EmptyIdentifier($kind));
                }
                Ok(Self(trimmed.to_owned()))
            }

            /// Returns the identifier as `str`.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

store_identifier!(
    /// Identifier of a task record.
    TaskId,
    "task"
);

store_identifier!(
    /// Identifier of a user profile.
    UserId,
    "user"
);

store_identifier!(
    /// Identifier of a task comment.
    CommentId,
    "comment"
);
