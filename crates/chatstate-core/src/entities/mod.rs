//! Domain entities

mod chat_session;
mod chat_state;

pub use chat_session::{ChatStateSession, GONE_TIMEOUT, INACTIVE_TIMEOUT};
pub use chat_state::{ChatState, OutboundChatState};
