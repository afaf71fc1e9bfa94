//! Chat-state errors - error types for the domain layer

use thiserror::Error;

/// Result alias for fallible chat-state operations
pub type ChatStateResult<T> = Result<T, ChatStateError>;

/// Chat-state domain errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatStateError {
    /// No session is tracked for the recipient
    #[error("No chat session found for {0}.")]
    SessionNotFound(String),
}

impl ChatStateError {
    /// Create a session-not-found error
    pub fn session_not_found(recipient: impl Into<String>) -> Self {
        Self::SessionNotFound(recipient.into())
    }

    /// Get an error code string for diagnostics
    pub fn code(&self) -> &'static str {
        match self {
            Self::SessionNotFound(_) => "UNKNOWN_SESSION",
        }
    }

    /// Recipient the error refers to
    pub fn recipient(&self) -> &str {
        match self {
            Self::SessionNotFound(recipient) => recipient,
        }
    }
}
