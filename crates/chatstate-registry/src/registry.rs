//! Chat-state registry
//!
//! Owns one `ChatStateSession` per recipient. Every keyed operation comes in two flavours:
//! a `try_*` method that reports a missing session as `ChatStateError::SessionNotFound`, and a
//! plain method that logs the error and falls back to a default (`false` / no mutation).

use chatstate_core::{
    ChatState, ChatStateError, ChatStateResult, ChatStateSession, SharedClock, SystemClock,
};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// Registry shared between the event loop and the idle poller
///
/// A single mutex guards the whole session table.
pub type SharedChatStateRegistry = Arc<Mutex<ChatStateRegistry>>;

/// Create a shared registry driven by `clock`
#[must_use]
pub fn create_shared_registry(clock: SharedClock) -> SharedChatStateRegistry {
    Arc::new(Mutex::new(ChatStateRegistry::with_clock(clock)))
}

/// Table of chat-state sessions keyed by recipient
pub struct ChatStateRegistry {
    sessions: HashMap<String, ChatStateSession>,
    clock: SharedClock,
}

impl ChatStateRegistry {
    /// Create an empty registry on the system monotonic clock
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create an empty registry on a custom clock
    #[must_use]
    pub fn with_clock(clock: SharedClock) -> Self {
        Self {
            sessions: HashMap::new(),
            clock,
        }
    }

    /// Create a registry wrapped in `Arc<Mutex<_>>`
    #[must_use]
    pub fn new_shared() -> SharedChatStateRegistry {
        Arc::new(Mutex::new(Self::new()))
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Reset to an empty table
    pub fn init(&mut self) {
        self.sessions = HashMap::new();
    }

    /// Drop every session
    pub fn clear(&mut self) {
        let count = self.sessions.len();
        self.sessions.clear();

        if count > 0 {
            tracing::debug!(count = count, "Cleared chat sessions");
        }
    }

    /// Check if a session is tracked for `recipient`
    pub fn exists(&self, recipient: &str) -> bool {
        self.sessions.contains_key(recipient)
    }

    /// Start tracking `recipient`, replacing any existing session
    pub fn start(&mut self, recipient: &str, peer_supports_chat_states: bool) {
        let session = ChatStateSession::new(recipient, peer_supports_chat_states, self.clock.now());
        let replaced = self
            .sessions
            .insert(recipient.to_string(), session)
            .is_some();

        tracing::debug!(
            recipient = %recipient,
            peer_supports = peer_supports_chat_states,
            replaced = replaced,
            "Chat session started"
        );
    }

    /// Stop tracking `recipient`; does nothing if it is not tracked
    pub fn end(&mut self, recipient: &str) {
        if self.sessions.remove(recipient).is_some() {
            tracing::debug!(recipient = %recipient, "Chat session ended");
        }
    }

    // =========================================================================
    // Fallible API
    // =========================================================================

    fn session(&self, recipient: &str) -> ChatStateResult<&ChatStateSession> {
        self.sessions
            .get(recipient)
            .ok_or_else(|| ChatStateError::session_not_found(recipient))
    }

    fn session_mut(&mut self, recipient: &str) -> ChatStateResult<&mut ChatStateSession> {
        self.sessions
            .get_mut(recipient)
            .ok_or_else(|| ChatStateError::session_not_found(recipient))
    }

    /// Mark the conversation active and restart its idle timer
    pub fn try_set_active(&mut self, recipient: &str) -> ChatStateResult<()> {
        let now = self.clock.now();
        self.session_mut(recipient)?.set_active(now);
        Ok(())
    }

    /// Re-evaluate idle time, returning the new state if it changed
    pub fn try_mark_inactivity(&mut self, recipient: &str) -> ChatStateResult<Option<ChatState>> {
        let now = self.clock.now();
        let session = self.session_mut(recipient)?;
        let transition = session.mark_inactivity(now);

        if let Some(state) = transition {
            tracing::debug!(
                recipient = %recipient,
                state = %state,
                idle_secs = session.idle_duration(now).as_secs(),
                "Chat state changed"
            );
        }

        Ok(transition)
    }

    pub fn try_set_notification_sent(&mut self, recipient: &str) -> ChatStateResult<()> {
        self.session_mut(recipient)?.mark_notification_sent();
        Ok(())
    }

    pub fn try_get_notification_sent(&self, recipient: &str) -> ChatStateResult<bool> {
        Ok(self.session(recipient)?.notification_sent())
    }

    pub fn try_state(&self, recipient: &str) -> ChatStateResult<ChatState> {
        Ok(self.session(recipient)?.state())
    }

    pub fn try_is_active(&self, recipient: &str) -> ChatStateResult<bool> {
        Ok(self.try_state(recipient)? == ChatState::Active)
    }

    pub fn try_is_inactive(&self, recipient: &str) -> ChatStateResult<bool> {
        Ok(self.try_state(recipient)? == ChatState::Inactive)
    }

    pub fn try_is_gone(&self, recipient: &str) -> ChatStateResult<bool> {
        Ok(self.try_state(recipient)? == ChatState::Gone)
    }

    pub fn try_get_peer_supports(&self, recipient: &str) -> ChatStateResult<bool> {
        Ok(self.session(recipient)?.peer_supports_chat_states())
    }

    pub fn try_set_peer_supports(&mut self, recipient: &str, supports: bool) -> ChatStateResult<()> {
        self.session_mut(recipient)?
            .set_peer_supports_chat_states(supports);
        Ok(())
    }

    // =========================================================================
    // Log-and-default API
    // =========================================================================

    pub fn set_active(&mut self, recipient: &str) {
        report(self.try_set_active(recipient));
    }

    pub fn mark_inactivity(&mut self, recipient: &str) {
        report(self.try_mark_inactivity(recipient));
    }

    pub fn set_notification_sent(&mut self, recipient: &str) {
        report(self.try_set_notification_sent(recipient));
    }

    pub fn get_notification_sent(&self, recipient: &str) -> bool {
        report(self.try_get_notification_sent(recipient))
    }

    pub fn is_active(&self, recipient: &str) -> bool {
        report(self.try_is_active(recipient))
    }

    pub fn is_inactive(&self, recipient: &str) -> bool {
        report(self.try_is_inactive(recipient))
    }

    pub fn is_gone(&self, recipient: &str) -> bool {
        report(self.try_is_gone(recipient))
    }

    pub fn get_peer_supports(&self, recipient: &str) -> bool {
        report(self.try_get_peer_supports(recipient))
    }

    pub fn set_peer_supports(&mut self, recipient: &str, supports: bool) {
        report(self.try_set_peer_supports(recipient, supports));
    }

    // =========================================================================
    // Queries without diagnostics
    // =========================================================================

    /// Current state, or `None` if the recipient is not tracked
    pub fn state(&self, recipient: &str) -> Option<ChatState> {
        self.sessions.get(recipient).map(ChatStateSession::state)
    }

    /// Number of tracked sessions
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// All tracked recipients
    pub fn recipients(&self) -> Vec<String> {
        self.sessions.keys().cloned().collect()
    }
}

/// Log a missing session and fall back to the default value
fn report<T: Default>(result: ChatStateResult<T>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            tracing::error!(recipient = %e.recipient(), code = e.code(), "{e}");
            T::default()
        }
    }
}

impl Default for ChatStateRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ChatStateRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatStateRegistry")
            .field("sessions", &self.sessions.len())
            .field("clock", &self.clock)
            .finish()
    }
}
