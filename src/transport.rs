//! Transport boundary.
//!
//! The engine does not own a socket implementation. Any bidirectional
//! message transport (typically a WebSocket client) is plugged in through
//! [`Transport`], and its asynchronous notifications are fed back as
//! [`TransportEvent`]s.

use bytes::Bytes;

use crate::error::Result;

/// An outbound message transport.
///
/// Methods must not block: `send` queues the text as one transport message
/// and returns. Open/close completion is reported later through
/// [`TransportEvent::Opened`] and [`TransportEvent::Closed`].
pub trait Transport {
    /// Start opening the connection.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`](crate::Error::Transport) if the open
    /// cannot even be attempted.
    fn open(&mut self) -> Result<()>;

    /// Queue `text` as one transport message.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`](crate::Error::Transport) on write failure.
    fn send(&mut self, text: &str) -> Result<()>;

    /// Whether the connection is currently open for writing.
    fn is_open(&self) -> bool;

    /// Start closing the connection.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Transport`](crate::Error::Transport) on failure.
    fn close(&mut self) -> Result<()>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn open(&mut self) -> Result<()> {
        (**self).open()
    }

    fn send(&mut self, text: &str) -> Result<()> {
        (**self).send(text)
    }

    fn is_open(&self) -> bool {
        (**self).is_open()
    }

    fn close(&mut self) -> Result<()> {
        (**self).close()
    }
}

/// Raw inbound message as delivered by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// A text message.
    Text(String),
    /// A binary message, expected to hold UTF-8 frame text.
    Binary(Bytes),
}

impl Payload {
    /// Payload length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Payload::Text(text) => text.len(),
            Payload::Binary(bytes) => bytes.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Payload::Text(text)
    }
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Payload::Text(text.to_owned())
    }
}

impl From<Bytes> for Payload {
    fn from(bytes: Bytes) -> Self {
        Payload::Binary(bytes)
    }
}

/// Notification raised by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    /// The connection is open.
    Opened,
    /// A message arrived.
    Message(Payload),
    /// The connection closed.
    Closed {
        /// Close code.
        code: u16,
        /// Close reason.
        reason: String,
        /// Whether the close handshake completed normally.
        was_clean: bool,
    },
    /// The transport failed.
    Error(String),
}

impl TransportEvent {
    /// Convenience constructor for an inbound text message.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        TransportEvent::Message(Payload::Text(text.into()))
    }

    /// Convenience constructor for a clean close.
    #[must_use]
    pub fn closed_cleanly() -> Self {
        TransportEvent::Closed {
            code: 1000,
            reason: String::new(),
            was_clean: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_len() {
        assert_eq!(Payload::from("abc").len(), 3);
        assert!(Payload::Binary(Bytes::new()).is_empty());
    }

    #[test]
    fn test_event_helpers() {
        assert_eq!(
            TransportEvent::text("\n"),
            TransportEvent::Message(Payload::Text("\n".into()))
        );
        assert!(matches!(
            TransportEvent::closed_cleanly(),
            TransportEvent::Closed { code: 1000, was_clean: true, .. }
        ));
    }
}
