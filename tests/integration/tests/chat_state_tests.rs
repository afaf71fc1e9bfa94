//! Chat-State Integration Tests
//!
//! End-to-end scenarios across the registry, the service and the idle monitor.
//!
//! Run with: cargo test -p integration-tests --test chat_state_tests

use std::time::Duration;

use chatstate_core::{ChatState, OutboundChatState};
use chatstate_service::IdleMonitor;
use integration_tests::{unique_recipient, TestHarness};
use tokio::sync::watch;

// ============================================================================
// Registry Scenarios
// ============================================================================

#[test]
fn test_inactive_gone_and_back_to_active() {
    let harness = TestHarness::new();
    let peer = unique_recipient();
    let mut registry = harness.registry().lock();

    registry.start(&peer, true);
    registry.set_active(&peer);

    harness.advance_secs(130);
    registry.mark_inactivity(&peer);
    assert!(registry.is_inactive(&peer));
    assert!(!registry.is_gone(&peer));
    assert!(!registry.get_notification_sent(&peer));

    harness.advance_secs(480);
    registry.mark_inactivity(&peer);
    assert!(registry.is_gone(&peer));
    assert!(!registry.get_notification_sent(&peer));

    registry.set_active(&peer);
    registry.set_notification_sent(&peer);
    harness.advance_secs(119);
    registry.mark_inactivity(&peer);
    assert_eq!(registry.state(&peer), Some(ChatState::Active));
    assert!(registry.get_notification_sent(&peer));
}

#[test]
fn test_restart_overwrites_and_clear_forgets_everyone() {
    let harness = TestHarness::new();
    let first = unique_recipient();
    let second = unique_recipient();
    let mut registry = harness.registry().lock();

    registry.start(&first, true);
    registry.start(&second, true);
    registry.start(&first, false);

    assert_eq!(registry.len(), 2);
    assert!(!registry.get_peer_supports(&first));
    assert_eq!(registry.state(&first), Some(ChatState::Started));

    registry.clear();
    assert!(!registry.exists(&first));
    assert!(!registry.exists(&second));
}

// ============================================================================
// Service Scenarios
// ============================================================================

#[tokio::test]
async fn test_full_conversation_lifecycle() {
    let harness = TestHarness::new();
    let peer = unique_recipient();
    let service = &harness.service;

    service.incoming_message(&peer, true);
    assert!(service.user_input(&peer).await);
    service.message_sent(&peer);

    harness.advance_secs(200);
    assert_eq!(service.check_idle().await, 1);

    harness.advance_secs(500);
    assert_eq!(service.check_idle().await, 1);

    assert!(service.user_input(&peer).await);
    assert!(service.conversation_closed(&peer).await);

    assert_eq!(
        harness.sent(),
        vec![
            (peer.clone(), OutboundChatState::Active),
            (peer.clone(), OutboundChatState::Inactive),
            (peer.clone(), OutboundChatState::Gone),
            (peer.clone(), OutboundChatState::Active),
            (peer.clone(), OutboundChatState::Gone),
        ]
    );
    assert!(!harness.registry().lock().exists(&peer));
}

#[tokio::test]
async fn test_only_supporting_peers_are_notified() {
    let harness = TestHarness::new();
    let modern = unique_recipient();
    let legacy = unique_recipient();

    harness.service.conversation_opened(&modern, true);
    harness.service.conversation_opened(&legacy, false);

    harness.advance_secs(121);
    assert_eq!(harness.service.check_idle().await, 1);
    assert_eq!(harness.sent(), vec![(modern, OutboundChatState::Inactive)]);
    assert!(harness.registry().lock().is_inactive(&legacy));
}

#[tokio::test]
async fn test_notification_retried_after_transport_failure() {
    let harness = TestHarness::new();
    let peer = unique_recipient();
    harness.service.conversation_opened(&peer, true);

    harness.notifier.set_offline(true);
    harness.advance_secs(601);
    assert_eq!(harness.service.check_idle().await, 0);

    harness.notifier.set_offline(false);
    assert_eq!(harness.service.check_idle().await, 1);
    assert_eq!(harness.service.check_idle().await, 0);
    assert_eq!(harness.sent(), vec![(peer, OutboundChatState::Gone)]);
}

// ============================================================================
// Idle Monitor
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_idle_monitor_drives_transitions() {
    let harness = TestHarness::new();
    let peer = unique_recipient();
    harness.service.conversation_opened(&peer, true);

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let monitor = IdleMonitor::new(harness.service.clone(), Duration::from_secs(1)).spawn(shutdown_rx);

    harness.advance_secs(150);
    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert_eq!(harness.sent(), vec![(peer.clone(), OutboundChatState::Inactive)]);

    harness.advance_secs(500);
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(harness.sent(), vec![(peer, OutboundChatState::Gone)]);

    shutdown_tx.send(true).unwrap();
    monitor.await.unwrap();
}
