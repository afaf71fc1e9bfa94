//! Line commands read from stdin
//!
//! ```text
//! open <recipient> [yes|no]    conversation opened (peer supports chat states, default yes)
//! recv <recipient> [yes|no]    message received from recipient
//! input <recipient>            user typed into the conversation
//! sent <recipient>             user sent a message
//! close <recipient>            conversation closed
//! status                       log every tracked conversation
//! quit                         stop the monitor
//! ```

use std::str::FromStr;

/// A parsed stdin command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Open { recipient: String, supports: bool },
    Received { recipient: String, supports: bool },
    Input { recipient: String },
    Sent { recipient: String },
    Close { recipient: String },
    Status,
    Quit,
}

/// Command parse errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,

    #[error("Unknown command: {0}")]
    Unknown(String),

    #[error("Missing recipient for {0}")]
    MissingRecipient(&'static str),

    #[error("Invalid support flag: {0}")]
    InvalidFlag(String),
}

fn parse_flag(value: Option<&str>) -> Result<bool, CommandError> {
    match value.map(str::to_lowercase).as_deref() {
        None | Some("yes" | "true" | "1") => Ok(true),
        Some("no" | "false" | "0") => Ok(false),
        Some(other) => Err(CommandError::InvalidFlag(other.to_string())),
    }
}

fn next_recipient<'a>(
    parts: &mut impl Iterator<Item = &'a str>,
    command: &'static str,
) -> Result<String, CommandError> {
    parts
        .next()
        .map(str::to_string)
        .ok_or(CommandError::MissingRecipient(command))
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.split_whitespace();
        let name = parts.next().ok_or(CommandError::Empty)?.to_lowercase();

        let command = match name.as_str() {
            "open" => Self::Open {
                recipient: next_recipient(&mut parts, "open")?,
                supports: parse_flag(parts.next())?,
            },
            "recv" => Self::Received {
                recipient: next_recipient(&mut parts, "recv")?,
                supports: parse_flag(parts.next())?,
            },
            "input" => Self::Input {
                recipient: next_recipient(&mut parts, "input")?,
            },
            "sent" => Self::Sent {
                recipient: next_recipient(&mut parts, "sent")?,
            },
            "close" => Self::Close {
                recipient: next_recipient(&mut parts, "close")?,
            },
            "status" => Self::Status,
            "quit" | "exit" => Self::Quit,
            _ => return Err(CommandError::Unknown(name)),
        };

        Ok(command)
    }
}
