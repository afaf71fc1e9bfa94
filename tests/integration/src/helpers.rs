//! Test helpers for integration tests
//!
//! `TestHarness` owns a service whose registry runs on a `ManualClock`.

use std::sync::Arc;
use std::time::Duration;

use chatstate_core::{ManualClock, OutboundChatState};
use chatstate_registry::{create_shared_registry, SharedChatStateRegistry};
use chatstate_service::ChatStateService;

use crate::fixtures::RecordingNotifier;

/// Service, notifier and clock wired together
pub struct TestHarness {
    pub clock: ManualClock,
    pub notifier: Arc<RecordingNotifier>,
    pub service: Arc<ChatStateService>,
}

impl TestHarness {
    pub fn new() -> Self {
        let clock = ManualClock::new();
        let registry = create_shared_registry(Arc::new(clock.clone()));
        let notifier = Arc::new(RecordingNotifier::default());
        let service = Arc::new(ChatStateService::new(registry, notifier.clone()));

        Self {
            clock,
            notifier,
            service,
        }
    }

    pub fn registry(&self) -> &SharedChatStateRegistry {
        self.service.registry()
    }

    /// Advance the clock by whole seconds
    pub fn advance_secs(&self, secs: u64) {
        self.clock.advance(Duration::from_secs(secs));
    }

    /// Drain recorded notifications as `(recipient, state)` pairs
    pub fn sent(&self) -> Vec<(String, OutboundChatState)> {
        self.notifier.take()
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
