//! Services

mod chat_state;
mod idle_monitor;

pub use chat_state::ChatStateService;
pub use idle_monitor::IdleMonitor;
