//! Chat-state service
//!
//! Drives the registry from conversation events and sends the resulting chat-state
//! notifications. Notifications go out only to peers that declared chat-state support, and
//! at most once per state thanks to the registry's sent flag.

use std::sync::Arc;

use chatstate_core::{ChatState, OutboundChatState};
use chatstate_registry::SharedChatStateRegistry;
use tracing::{debug, instrument, warn};

use crate::notifier::ChatStateNotifier;

/// Chat-state service
///
/// The registry lock is never held across a notifier call.
pub struct ChatStateService {
    registry: SharedChatStateRegistry,
    notifier: Arc<dyn ChatStateNotifier>,
}

impl ChatStateService {
    /// Create a new ChatStateService
    pub fn new(registry: SharedChatStateRegistry, notifier: Arc<dyn ChatStateNotifier>) -> Self {
        Self { registry, notifier }
    }

    /// The registry this service drives
    pub fn registry(&self) -> &SharedChatStateRegistry {
        &self.registry
    }

    /// A conversation window was opened
    pub fn conversation_opened(&self, recipient: &str, peer_supports: bool) {
        self.registry.lock().start(recipient, peer_supports);
    }

    /// A message arrived from `recipient`
    ///
    /// Starts tracking unknown senders; for known ones the message's capability declaration
    /// replaces the stored one.
    pub fn incoming_message(&self, recipient: &str, peer_supports: bool) {
        let mut registry = self.registry.lock();
        if registry.exists(recipient) {
            registry.set_peer_supports(recipient, peer_supports);
        } else {
            registry.start(recipient, peer_supports);
        }
    }

    /// The user sent a message; it carries the active state itself
    pub fn message_sent(&self, recipient: &str) {
        let mut registry = self.registry.lock();
        registry.set_active(recipient);
        registry.set_notification_sent(recipient);
    }

    /// The user typed into the conversation with `recipient`
    ///
    /// Returns `true` if an `active` notification was sent.
    #[instrument(skip(self))]
    pub async fn user_input(&self, recipient: &str) -> bool {
        let (previous, supports) = {
            let mut registry = self.registry.lock();
            let previous = registry.state(recipient);
            registry.set_active(recipient);
            let Some(previous) = previous else {
                return false;
            };
            (previous, registry.get_peer_supports(recipient))
        };

        if previous == ChatState::Active || !supports {
            return false;
        }

        self.notify(recipient, OutboundChatState::Active).await
    }

    /// The conversation window was closed
    ///
    /// Sends `gone` to supporting peers, then stops tracking. Returns `true` if `gone` was sent.
    #[instrument(skip(self))]
    pub async fn conversation_closed(&self, recipient: &str) -> bool {
        let supports = {
            let registry = self.registry.lock();
            if !registry.exists(recipient) {
                return false;
            }
            registry.get_peer_supports(recipient)
        };

        let sent = if supports {
            self.notify(recipient, OutboundChatState::Gone).await
        } else {
            false
        };

        self.registry.lock().end(recipient);
        sent
    }

    /// Re-evaluate every tracked conversation and announce new inactive/gone states
    ///
    /// A failed notification leaves the sent flag clear, so the next check retries it.
    /// Returns the number of notifications sent.
    pub async fn check_idle(&self) -> usize {
        let pending = {
            let mut registry = self.registry.lock();
            let mut pending = Vec::new();

            for recipient in registry.recipients() {
                registry.mark_inactivity(&recipient);

                if !registry.get_peer_supports(&recipient)
                    || registry.get_notification_sent(&recipient)
                {
                    continue;
                }

                let announced = registry
                    .state(&recipient)
                    .filter(|state| state.is_idle())
                    .and_then(ChatState::outbound);
                if let Some(state) = announced {
                    pending.push((recipient, state));
                }
            }

            pending
        };

        let mut sent = 0;
        for (recipient, state) in pending {
            if self.notify(&recipient, state).await {
                sent += 1;
            }
        }

        if sent > 0 {
            debug!(sent = sent, "Idle chat states announced");
        }

        sent
    }

    /// Send one notification and flag it as sent if the session is still in that state
    async fn notify(&self, recipient: &str, state: OutboundChatState) -> bool {
        if let Err(e) = self.notifier.send_chat_state(recipient, state).await {
            warn!(
                recipient = %recipient,
                state = %state,
                error = %e,
                "Failed to send chat state notification"
            );
            return false;
        }

        let mut registry = self.registry.lock();
        if registry.state(recipient) == Some(ChatState::from(state)) {
            registry.set_notification_sent(recipient);
        }

        debug!(recipient = %recipient, state = %state, "Chat state notification sent");
        true
    }
}

impl std::fmt::Debug for ChatStateService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatStateService")
            .field("registry", &self.registry)
            .finish()
    }
}
