//! Chat-state values.
//!
//! `ChatState` is what the registry tracks for a conversation; `OutboundChatState` is the subset
//! that can be announced to a peer.

use serde::{Deserialize, Serialize};

/// Presence state of a single conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatState {
    /// Conversation opened, no user activity recorded yet
    #[default]
    Started,
    /// User recently produced input in this conversation
    Active,
    /// No activity for longer than the inactive timeout
    Inactive,
    /// No activity for longer than the gone timeout
    Gone,
}

impl ChatState {
    /// The notification that announces this state to a peer, if any.
    ///
    /// `Started` is never announced.
    #[must_use]
    pub fn outbound(self) -> Option<OutboundChatState> {
        match self {
            Self::Started => None,
            Self::Active => Some(OutboundChatState::Active),
            Self::Inactive => Some(OutboundChatState::Inactive),
            Self::Gone => Some(OutboundChatState::Gone),
        }
    }

    /// Check if the conversation has gone idle (inactive or gone)
    #[must_use]
    pub fn is_idle(self) -> bool {
        matches!(self, Self::Inactive | Self::Gone)
    }
}

impl std::fmt::Display for ChatState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Started => write!(f, "started"),
            Self::Active => write!(f, "active"),
            Self::Inactive => write!(f, "inactive"),
            Self::Gone => write!(f, "gone"),
        }
    }
}

impl std::str::FromStr for ChatState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "started" => Ok(Self::Started),
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            "gone" => Ok(Self::Gone),
            _ => Err(format!("Invalid chat state: {s}")),
        }
    }
}

/// Chat state carried by an outbound notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutboundChatState {
    Active,
    Inactive,
    Gone,
}

impl From<OutboundChatState> for ChatState {
    fn from(state: OutboundChatState) -> Self {
        match state {
            OutboundChatState::Active => Self::Active,
            OutboundChatState::Inactive => Self::Inactive,
            OutboundChatState::Gone => Self::Gone,
        }
    }
}

impl std::fmt::Display for OutboundChatState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        ChatState::from(*self).fmt(f)
    }
}
