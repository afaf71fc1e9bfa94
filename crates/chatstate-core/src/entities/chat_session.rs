//! Chat session entity
//!
//! Per-recipient chat-state record and its inactivity state machine.

use std::time::{Duration, Instant};

use super::ChatState;

/// Idle time after which a conversation becomes inactive (2 minutes)
pub const INACTIVE_TIMEOUT: Duration = Duration::from_secs(120);
/// Idle time after which a conversation is considered gone (10 minutes)
pub const GONE_TIMEOUT: Duration = Duration::from_secs(600);

/// Chat-state metadata for one conversation partner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatStateSession {
    recipient: String,
    peer_supports_chat_states: bool,
    state: ChatState,
    last_activity: Instant,
    notification_sent: bool,
}

impl ChatStateSession {
    /// Create a session in the `Started` state with its activity timer starting at `now`
    #[must_use]
    pub fn new(recipient: impl Into<String>, peer_supports_chat_states: bool, now: Instant) -> Self {
        Self {
            recipient: recipient.into(),
            peer_supports_chat_states,
            state: ChatState::Started,
            last_activity: now,
            notification_sent: false,
        }
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    pub fn state(&self) -> ChatState {
        self.state
    }

    pub fn peer_supports_chat_states(&self) -> bool {
        self.peer_supports_chat_states
    }

    pub fn set_peer_supports_chat_states(&mut self, supports: bool) {
        self.peer_supports_chat_states = supports;
    }

    pub fn notification_sent(&self) -> bool {
        self.notification_sent
    }

    /// Record that the notification for the current state went out
    pub fn mark_notification_sent(&mut self) {
        self.notification_sent = true;
    }

    /// Time since the last recorded activity
    pub fn idle_duration(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.last_activity)
    }

    /// Enter `Active` and restart the activity timer.
    ///
    /// Leaves `notification_sent` untouched.
    pub fn set_active(&mut self, now: Instant) {
        self.state = ChatState::Active;
        self.last_activity = now;
    }

    /// Advance the state according to the idle time at `now`.
    ///
    /// Gone is checked before inactive. Entering a new state clears `notification_sent`.
    /// Returns the new state when a transition happened.
    pub fn mark_inactivity(&mut self, now: Instant) -> Option<ChatState> {
        let elapsed = self.idle_duration(now);

        let target = if elapsed > GONE_TIMEOUT {
            ChatState::Gone
        } else if elapsed > INACTIVE_TIMEOUT {
            ChatState::Inactive
        } else {
            return None;
        };

        if self.state == target {
            return None;
        }

        self.state = target;
        self.notification_sent = false;
        Some(target)
    }
}
