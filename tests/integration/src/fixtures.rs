//! Test fixtures and data generators
//!
//! Provides reusable test data for integration tests.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use chatstate_core::OutboundChatState;
use chatstate_service::{ChatStateNotifier, NotifierError, NotifierResult};
use parking_lot::Mutex;

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// A unique bare JID-style recipient
pub fn unique_recipient() -> String {
    format!("contact{}@example.org", unique_suffix())
}

/// Notifier that records every notification instead of sending it
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<(String, OutboundChatState)>>,
    offline: AtomicBool,
}

impl RecordingNotifier {
    /// Drain the notifications recorded so far
    pub fn take(&self) -> Vec<(String, OutboundChatState)> {
        std::mem::take(&mut *self.sent.lock())
    }

    /// Make subsequent sends fail with a transport error
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }
}

#[async_trait]
impl ChatStateNotifier for RecordingNotifier {
    async fn send_chat_state(
        &self,
        recipient: &str,
        state: OutboundChatState,
    ) -> NotifierResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(NotifierError::transport("connection lost"));
        }
        self.sent.lock().push((recipient.to_string(), state));
        Ok(())
    }
}
