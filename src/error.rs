//! Error types for the STOMP protocol engine.
//!
//! Protocol operations on the client never surface these directly for
//! transport failures; those are reported through
//! [`StompEvent::WillDisconnect`](crate::StompEvent::WillDisconnect). The
//! variants here also travel inside events, hence `Clone`.

use thiserror::Error;

/// Result type alias for STOMP operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while driving a STOMP session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The transport failed to open, write or close.
    #[error("Transport error: {0}")]
    Transport(String),

    /// A write was attempted while the transport was not open.
    #[error("Transport is not open")]
    NotConnected,

    /// The transport closed without a clean shutdown.
    #[error("Connection closed uncleanly (code {code}): {reason}")]
    ConnectionClosed {
        /// Close code reported by the transport.
        code: u16,
        /// Close reason reported by the transport.
        reason: String,
    },

    /// An inbound payload could not be turned into a frame.
    #[error("Invalid frame: {0}")]
    InvalidFrame(String),

    /// A structured body could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The background engine task has stopped.
    #[error("STOMP engine has stopped")]
    EngineStopped,
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<std::str::Utf8Error> for Error {
    fn from(err: std::str::Utf8Error) -> Self {
        Error::InvalidFrame(format!("payload is not valid UTF-8: {err}"))
    }
}
