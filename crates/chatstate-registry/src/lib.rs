//! # chatstate-registry
//!
//! In-memory table of chat-state sessions, one per conversation partner.
//!
//! ## Example
//!
//! ```
//! use chatstate_registry::ChatStateRegistry;
//!
//! let mut registry = ChatStateRegistry::new();
//! registry.start("alice@example.org", true);
//! registry.set_active("alice@example.org");
//!
//! assert!(registry.exists("alice@example.org"));
//! assert!(!registry.is_inactive("alice@example.org"));
//! ```

mod registry;

pub use registry::{create_shared_registry, ChatStateRegistry, SharedChatStateRegistry};
