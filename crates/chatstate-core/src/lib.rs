//! # chatstate-core
//!
//! Domain layer for per-conversation chat-state tracking: the chat-state enum, the session
//! record with its inactivity transitions, the clock abstraction and domain errors.
//! This crate has zero dependencies on infrastructure (logging backends, runtimes, etc.).

pub mod clock;
pub mod entities;
pub mod error;

// Re-export commonly used types at crate root
pub use clock::{Clock, ManualClock, SharedClock, SystemClock};
pub use entities::{ChatState, ChatStateSession, OutboundChatState, GONE_TIMEOUT, INACTIVE_TIMEOUT};
pub use error::{ChatStateError, ChatStateResult};
