// src/core/errors.rs

//! Defines the primary error type for the entire application.

use std::sync::Arc;
use thiserror::Error;
use tokio_util::codec::LinesCodecError;

/// The main error enum, representing all possible failures within the server.
/// Using `thiserror` allows for clean error definitions and automatic `From`
/// trait implementations.
///
/// The `Display` strings of the per-command variants are the exact lines the
/// protocol sends back to the client.
#[derive(Error, Debug)]
pub enum ShiftError {
    #[error("IO Error: {0}")]
    Io(Arc<std::io::Error>),

    #[error("No port available in the range {start}..{end}")]
    NoPortAvailable { start: u16, end: u16 },

    #[error("Unrecognized command.")]
    UnknownCommand(String),

    #[error("Permission denied.")]
    PermissionDenied,

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Persistence Error: {0}")]
    Persistence(String),
}

impl ShiftError {
    /// True if this error is one the protocol reports to the client as a
    /// single response line, leaving the session running.
    pub fn is_client_visible(&self) -> bool {
        matches!(
            self,
            ShiftError::UnknownCommand(_) | ShiftError::PermissionDenied
        )
    }
}

// --- From trait implementations for easy error conversion ---

impl From<std::io::Error> for ShiftError {
    fn from(e: std::io::Error) -> Self {
        ShiftError::Io(Arc::new(e))
    }
}

impl From<LinesCodecError> for ShiftError {
    fn from(e: LinesCodecError) -> Self {
        match e {
            LinesCodecError::Io(io) => ShiftError::Io(Arc::new(io)),
            LinesCodecError::MaxLineLengthExceeded => {
                ShiftError::Protocol("line length limit exceeded".to_string())
            }
        }
    }
}
