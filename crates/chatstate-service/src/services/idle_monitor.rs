//! Idle monitor
//!
//! Periodically asks the chat-state service to re-evaluate idle conversations.

use std::sync::Arc;
use std::time::Duration;

use chatstate_common::MonitorConfig;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use super::ChatStateService;

/// Polls `ChatStateService::check_idle` on a fixed interval
#[derive(Debug)]
pub struct IdleMonitor {
    service: Arc<ChatStateService>,
    poll_interval: Duration,
}

impl IdleMonitor {
    /// Create a monitor; a zero interval is bumped to one millisecond
    pub fn new(service: Arc<ChatStateService>, poll_interval: Duration) -> Self {
        Self {
            service,
            poll_interval: poll_interval.max(Duration::from_millis(1)),
        }
    }

    /// Create a monitor using the configured poll interval
    pub fn from_config(service: Arc<ChatStateService>, config: &MonitorConfig) -> Self {
        Self::new(service, config.poll_interval())
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Poll until `shutdown` becomes `true` or its sender is dropped
    pub async fn run(self, mut shutdown: watch::Receiver<bool>) {
        let mut ticker = interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        tracing::info!(
            poll_interval_ms = self.poll_interval.as_millis(),
            "Idle monitor started"
        );

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let sent = self.service.check_idle().await;
                    tracing::trace!(sent = sent, "Idle check completed");
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        tracing::info!("Idle monitor stopped");
    }

    /// Run the monitor on the tokio runtime
    pub fn spawn(self, shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
        tokio::spawn(self.run(shutdown))
    }
}
