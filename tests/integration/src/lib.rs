//! Integration test utilities for the chat-state workspace
//!
//! This crate provides a harness that wires the registry, the service and a recording
//! notifier to a manually advanced clock, so scenarios spanning minutes run instantly.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
