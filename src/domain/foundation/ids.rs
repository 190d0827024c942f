//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque key identifying one user's conversation within one channel.
///
/// Channels that host a single chat per user pass the user id straight
/// through; channels with multiple concurrent chats scope the key with
/// [`ConversationKey::scoped`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationKey(String);

impl ConversationKey {
    /// Creates a key from a raw channel-supplied identifier.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Creates a composite key for a user within a specific chat.
    pub fn scoped(chat_id: &str, user_id: &str) -> Self {
        Self(format!("{}_{}", chat_id, user_id))
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConversationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ConversationKey {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}
