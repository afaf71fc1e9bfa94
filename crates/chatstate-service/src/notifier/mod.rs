//! Outbound chat-state notifications

mod chat_state_notifier;

pub use chat_state_notifier::{ChatStateNotifier, LoggingNotifier, NotifierError, NotifierResult};
