//! Channel adapter ports: inbound message shape and outbound sending.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::foundation::ConversationKey;

/// A text message received from a chat platform, already stripped of
/// platform-specific envelope fields by the adapter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundMessage {
    /// Chat the message arrived in.
    pub chat_id: String,
    /// Platform user id of the sender.
    pub user_id: String,
    /// Display name of the sender, when the platform provides one.
    pub sender_name: Option<String>,
    /// Message text.
    pub text: String,
}

impl InboundMessage {
    /// Creates an inbound message without a sender display name.
    pub fn new(
        chat_id: impl Into<String>,
        user_id: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            chat_id: chat_id.into(),
            user_id: user_id.into(),
            sender_name: None,
            text: text.into(),
        }
    }

    /// Attaches the sender's display name.
    pub fn with_sender_name(mut self, name: impl Into<String>) -> Self {
        self.sender_name = Some(name.into());
        self
    }

    /// Conversation key scoping the sender to this chat.
    pub fn conversation_key(&self) -> ConversationKey {
        ConversationKey::scoped(&self.chat_id, &self.user_id)
    }

    /// Name to attribute tickets to.
    pub fn submitter(&self) -> &str {
        self.sender_name.as_deref().unwrap_or(&self.user_id)
    }
}

/// Errors surfaced when delivering an outbound message.
#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("message delivery failed: {0}")]
    DeliveryFailed(String),
}

/// Outbound side of a channel adapter.
#[async_trait]
pub trait ChannelSender: Send + Sync {
    /// Sends a text message to a chat.
    async fn send(&self, chat_id: &str, text: &str) -> Result<(), ChannelError>;
}
