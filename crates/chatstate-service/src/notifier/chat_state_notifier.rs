//! Chat-state notifier trait
//!
//! The network layer implements `ChatStateNotifier` to put chat-state stanzas on the wire.

use async_trait::async_trait;
use chatstate_core::OutboundChatState;
use thiserror::Error;

/// Result type for notifier operations
pub type NotifierResult<T> = Result<T, NotifierError>;

/// Errors raised while sending a chat-state notification
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotifierError {
    /// The transport could not deliver the notification
    #[error("Transport error: {0}")]
    Transport(String),
}

impl NotifierError {
    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }
}

/// Sends chat-state notifications to conversation partners
#[async_trait]
pub trait ChatStateNotifier: Send + Sync {
    /// Tell `recipient` that the local user's chat state is now `state`
    async fn send_chat_state(&self, recipient: &str, state: OutboundChatState)
        -> NotifierResult<()>;
}

/// Notifier that only writes notifications to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingNotifier;

#[async_trait]
impl ChatStateNotifier for LoggingNotifier {
    async fn send_chat_state(
        &self,
        recipient: &str,
        state: OutboundChatState,
    ) -> NotifierResult<()> {
        tracing::info!(recipient = %recipient, state = %state, "Chat state notification");
        Ok(())
    }
}
