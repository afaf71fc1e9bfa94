//! # chatstate-service
//!
//! Application layer on top of the chat-state registry. Translates conversation events
//! (opened, closed, user input, incoming and outgoing messages) into registry updates and
//! decides when a chat-state notification has to go out to a peer.
//!
//! ## Modules
//!
//! - **notifier**: the outbound notification seam and a logging implementation
//! - **services**: `ChatStateService` and the periodic `IdleMonitor`

pub mod notifier;
pub mod services;

pub use notifier::{ChatStateNotifier, LoggingNotifier, NotifierError, NotifierResult};
pub use services::{ChatStateService, IdleMonitor};
