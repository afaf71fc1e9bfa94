//! Domain error types

mod chat_state_error;

pub use chat_state_error::{ChatStateError, ChatStateResult};
